#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User checked or unchecked a stage.
    StageToggled { stage: String, enabled: bool },
    /// User picked a tool for a checked stage.
    OptionSelected { stage: String, option: String },
    /// User clicked Generate.
    GenerateClicked,
    /// Engine resolved a generation, successfully or not.
    GenerationFinished {
        generation_id: crate::GenerationId,
        result: crate::GenerationResult,
    },
    /// User asked to copy the current output.
    CopyClicked,
    /// User asked to save the current output.
    DownloadClicked,
    /// The output reached the clipboard.
    OutputCopied,
    /// The clipboard rejected the output.
    OutputCopyFailed { message: String },
    /// The output file was written.
    OutputSaved { path: String },
    /// The output file could not be written.
    OutputSaveFailed { message: String },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
