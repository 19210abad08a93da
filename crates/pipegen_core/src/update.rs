use pipegen_logging::{pipegen_debug, pipegen_info, pipegen_warn};

use crate::output::{DEFAULT_OUTPUT_FILENAME, OUTPUT_MIME_TYPE};
use crate::prompt::build_prompt;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::StageToggled { stage, enabled } => {
            if let Err(err) = state.set_stage(&stage, enabled) {
                pipegen_warn!("Rejected stage toggle: {}", err);
            }
            Vec::new()
        }
        Msg::OptionSelected { stage, option } => {
            if let Err(err) = state.set_option(&stage, &option) {
                pipegen_warn!("Rejected option selection: {}", err);
            }
            Vec::new()
        }
        Msg::GenerateClicked => {
            // The flag is raised here, before the effect leaves the core, so a
            // second click can never dispatch a parallel request.
            if state.in_progress() {
                pipegen_debug!("Generate ignored: generation already in progress");
                return (state, Vec::new());
            }
            let request = state.selection().snapshot();
            let prompt = build_prompt(&request);
            let generation_id = state.begin_generation();
            pipegen_info!(
                "Generation {} dispatched with {} stage(s)",
                generation_id,
                request.choices().len()
            );
            vec![Effect::Generate {
                generation_id,
                prompt,
            }]
        }
        Msg::GenerationFinished {
            generation_id,
            result,
        } => {
            if !state.finish_generation(generation_id, result) {
                pipegen_warn!("Dropped result of stale generation {}", generation_id);
            }
            Vec::new()
        }
        Msg::CopyClicked => match state.output().exportable() {
            Some(text) => vec![Effect::CopyToClipboard {
                text: text.to_string(),
            }],
            None => Vec::new(),
        },
        Msg::DownloadClicked => match state.output().exportable() {
            Some(text) => vec![Effect::SaveOutput {
                filename: DEFAULT_OUTPUT_FILENAME.to_string(),
                mime_type: OUTPUT_MIME_TYPE,
                contents: text.to_string(),
            }],
            None => Vec::new(),
        },
        Msg::OutputCopied => {
            state.set_status("Copied output to clipboard.");
            Vec::new()
        }
        Msg::OutputCopyFailed { message } => {
            state.set_status(format!("Copy failed: {message}"));
            Vec::new()
        }
        Msg::OutputSaved { path } => {
            state.set_status(format!("Saved {path}"));
            Vec::new()
        }
        Msg::OutputSaveFailed { message } => {
            state.set_status(format!("Save failed: {message}"));
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
