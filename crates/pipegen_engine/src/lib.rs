//! Pipegen engine: remote generation, background execution and file output.
mod engine;
mod generate;
mod persist;
mod types;

pub use engine::EngineHandle;
pub use generate::{
    decode_completion, Generator, GeneratorSettings, ReqwestGenerator, DEFAULT_ENDPOINT,
    DEFAULT_MODEL,
};
pub use persist::{ensure_output_dir, save_pipeline, AtomicFileWriter, PersistError};
pub use types::{
    EngineEvent, FailureKind, GenerationError, GenerationId, NETWORK_ERROR_MESSAGE,
    REMOTE_ERROR_FALLBACK,
};
