use crate::GenerationId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one remote generation for `prompt`.
    Generate {
        generation_id: GenerationId,
        prompt: String,
    },
    CopyToClipboard { text: String },
    SaveOutput {
        filename: String,
        mime_type: &'static str,
        contents: String,
    },
}
