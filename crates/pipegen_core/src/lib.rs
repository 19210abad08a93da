//! Pipegen core: pure selection state machine, prompt building and view-model helpers.
mod catalog;
mod effect;
mod msg;
mod output;
mod prompt;
mod selection;
mod state;
mod update;
mod view_model;

pub use catalog::{Stage, StageCatalog};
pub use effect::Effect;
pub use msg::Msg;
pub use output::{
    FailureKind, GenerationResult, OutputSink, DEFAULT_OUTPUT_FILENAME, ERROR_MARKER,
    OUTPUT_MIME_TYPE,
};
pub use prompt::{build_prompt, PROMPT_POSTSCRIPT, PROMPT_PREAMBLE};
pub use selection::{
    GenerationRequest, InvalidSelection, SelectionState, StageChoice, StageSelection,
    ENABLED_VALUE,
};
pub use state::{AppState, GenerationId};
pub use update::update;
pub use view_model::{AppViewModel, StageRowView};
