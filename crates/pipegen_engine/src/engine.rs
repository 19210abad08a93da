use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use pipegen_logging::{pipegen_debug, pipegen_error, pipegen_info};

use crate::generate::{Generator, GeneratorSettings, ReqwestGenerator};
use crate::types::REMOTE_ERROR_FALLBACK;
use crate::{EngineEvent, FailureKind, GenerationError, GenerationId};

enum EngineCommand {
    Generate {
        generation_id: GenerationId,
        prompt: String,
    },
}

/// Runs generations on a background thread with its own tokio runtime.
///
/// Commands are fire-and-forget; each one produces exactly one
/// [`EngineEvent::GenerationCompleted`] readable through [`EngineHandle::try_recv`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: GeneratorSettings) -> io::Result<Self> {
        Self::with_generator(Arc::new(ReqwestGenerator::new(settings)))
    }

    pub fn with_generator(generator: Arc<dyn Generator>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        let worker_tx = event_tx.clone();
        thread::Builder::new()
            .name("pipegen-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let generator = generator.clone();
                    let event_tx = worker_tx.clone();
                    runtime.spawn(async move {
                        handle_command(generator, command, event_tx).await;
                    });
                }
                pipegen_debug!("Engine command channel closed");
            })?;

        Ok(Self {
            cmd_tx,
            event_tx,
            event_rx,
        })
    }

    pub fn generate(&self, generation_id: GenerationId, prompt: impl Into<String>) {
        let command = EngineCommand::Generate {
            generation_id,
            prompt: prompt.into(),
        };
        if self.cmd_tx.send(command).is_err() {
            pipegen_error!(
                "Engine thread is gone; generation {} was not started",
                generation_id
            );
            let _ = self.event_tx.send(EngineEvent::GenerationCompleted {
                generation_id,
                result: Err(GenerationError::new(
                    FailureKind::Remote,
                    REMOTE_ERROR_FALLBACK,
                )),
            });
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    generator: Arc<dyn Generator>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Generate {
            generation_id,
            prompt,
        } => {
            // A panic inside the generator surfaces here as a JoinError.
            let task = tokio::spawn(async move { generator.generate(&prompt).await });
            let result = task.await.unwrap_or_else(|err| {
                pipegen_error!("Generation {} task failed: {}", generation_id, err);
                Err(GenerationError::new(
                    FailureKind::Remote,
                    REMOTE_ERROR_FALLBACK,
                ))
            });
            match &result {
                Ok(text) => pipegen_info!(
                    "Generation {} succeeded ({} bytes)",
                    generation_id,
                    text.len()
                ),
                Err(err) => pipegen_info!("Generation {} failed: {}", generation_id, err),
            }
            if event_tx
                .send(EngineEvent::GenerationCompleted {
                    generation_id,
                    result,
                })
                .is_err()
            {
                pipegen_debug!(
                    "Generation {} finished after the handle was dropped",
                    generation_id
                );
            }
        }
    }
}
