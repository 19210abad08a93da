use std::path::PathBuf;

use pipegen_core::{Effect, FailureKind, GenerationResult, Msg};
use pipegen_engine::{save_pipeline, EngineEvent, EngineHandle, GenerationError};
use pipegen_logging::{pipegen_error, pipegen_info};

use super::clipboard::ClipboardSink;

/// Executes effects emitted by the core and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    output_dir: PathBuf,
    clipboard: ClipboardSink,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, output_dir: PathBuf) -> Self {
        Self {
            engine,
            output_dir,
            clipboard: ClipboardSink::default(),
        }
    }

    /// Runs `effects` in order. Returns messages produced synchronously.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::Generate {
                    generation_id,
                    prompt,
                } => {
                    pipegen_info!(
                        "Generate generation_id={} prompt_len={}",
                        generation_id,
                        prompt.len()
                    );
                    self.engine.generate(generation_id, prompt);
                }
                Effect::CopyToClipboard { text } => {
                    let msg = match self.clipboard.copy(&text) {
                        Ok(()) => Msg::OutputCopied,
                        Err(err) => Msg::OutputCopyFailed {
                            message: err.to_string(),
                        },
                    };
                    follow_ups.push(msg);
                }
                Effect::SaveOutput {
                    filename,
                    mime_type,
                    contents,
                } => {
                    let msg = match save_pipeline(&self.output_dir, &filename, &contents) {
                        Ok(path) => {
                            pipegen_info!("Saved {} ({}) to {:?}", filename, mime_type, path);
                            Msg::OutputSaved {
                                path: path.display().to_string(),
                            }
                        }
                        Err(err) => {
                            pipegen_error!(
                                "Failed to save {} in {:?}: {}",
                                filename,
                                self.output_dir,
                                err
                            );
                            Msg::OutputSaveFailed {
                                message: err.to_string(),
                            }
                        }
                    };
                    follow_ups.push(msg);
                }
            }
        }
        follow_ups
    }

    /// Drains finished generations without blocking.
    pub fn poll_events(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(|event| match event {
                EngineEvent::GenerationCompleted {
                    generation_id,
                    result,
                } => Msg::GenerationFinished {
                    generation_id,
                    result: map_result(result),
                },
            })
            .collect()
    }
}

fn map_result(result: Result<String, GenerationError>) -> GenerationResult {
    match result {
        Ok(text) => GenerationResult::Success(text),
        Err(err) => GenerationResult::failure(map_kind(err.kind), err.message),
    }
}

fn map_kind(kind: pipegen_engine::FailureKind) -> FailureKind {
    match kind {
        pipegen_engine::FailureKind::MissingCredential => FailureKind::MissingCredential,
        pipegen_engine::FailureKind::Network => FailureKind::NetworkError,
        pipegen_engine::FailureKind::Remote => FailureKind::RemoteError,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::thread;
    use std::time::{Duration, Instant};

    use pipegen_core::{update, AppState};
    use pipegen_engine::GeneratorSettings;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn runner(settings: GeneratorSettings, output_dir: PathBuf) -> EffectRunner {
        EffectRunner::new(EngineHandle::new(settings).unwrap(), output_dir)
    }

    fn wait_for_msg(runner: &EffectRunner) -> Msg {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(msg) = runner.poll_events().into_iter().next() {
                return msg;
            }
            assert!(Instant::now() < deadline, "engine never answered");
            thread::sleep(Duration::from_millis(10));
        }
    }

    /// Clicks Generate, runs the effect and feeds the answer back, checking the
    /// in-progress flag on both sides of the resolution.
    fn generate_once(runner: &mut EffectRunner) -> AppState {
        let (state, _) = update(
            AppState::new(),
            Msg::StageToggled {
                stage: "Build".into(),
                enabled: true,
            },
        );
        let (state, effects) = update(state, Msg::GenerateClicked);
        assert!(state.in_progress());
        assert!(runner.run(effects).is_empty());
        assert!(state.in_progress());

        let msg = wait_for_msg(runner);
        let (state, _) = update(state, msg);
        assert!(!state.in_progress());
        state
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn success_round_trip_clears_flag_and_exposes_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "foo: bar"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let mut runner = runner(
            GeneratorSettings {
                endpoint: server.uri(),
                api_key: Some("sk-test".into()),
                ..GeneratorSettings::default()
            },
            temp.path().to_path_buf(),
        );

        let state = generate_once(&mut runner);
        assert_eq!(
            state.output().current(),
            Some(&GenerationResult::Success("foo: bar".into()))
        );

        let (state, effects) = update(state, Msg::DownloadClicked);
        let follow_ups = runner.run(effects);
        let (state, _) = follow_ups
            .into_iter()
            .fold((state, Vec::new()), |(state, _), msg| update(state, msg));
        assert!(state.view().status.unwrap().starts_with("Saved "));
        assert_eq!(
            fs::read(temp.path().join(".gitlab-ci.yml")).unwrap(),
            b"foo: bar"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn remote_error_round_trip_clears_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(json!({"error": {"message": "rate limited"}})),
            )
            .mount(&server)
            .await;

        let mut runner = runner(
            GeneratorSettings {
                endpoint: server.uri(),
                api_key: Some("sk-test".into()),
                ..GeneratorSettings::default()
            },
            PathBuf::from("."),
        );

        let state = generate_once(&mut runner);
        assert_eq!(
            state.output().current(),
            Some(&GenerationResult::failure(FailureKind::RemoteError, "rate limited"))
        );
        assert_eq!(state.view().output_text, "❌ Error: rate limited");
    }

    #[test]
    fn network_error_round_trip_clears_flag() {
        let mut runner = runner(
            GeneratorSettings {
                endpoint: "http://127.0.0.1:9/v1/chat/completions".into(),
                api_key: Some("sk-test".into()),
                connect_timeout: Duration::from_millis(500),
                request_timeout: Duration::from_secs(2),
                ..GeneratorSettings::default()
            },
            PathBuf::from("."),
        );

        let state = generate_once(&mut runner);
        assert!(matches!(
            state.output().current(),
            Some(GenerationResult::Failure {
                kind: FailureKind::NetworkError,
                ..
            })
        ));
    }

    #[test]
    fn missing_credential_round_trip_clears_flag() {
        let mut runner = runner(GeneratorSettings::default(), PathBuf::from("."));
        let state = generate_once(&mut runner);
        assert!(matches!(
            state.output().current(),
            Some(GenerationResult::Failure {
                kind: FailureKind::MissingCredential,
                ..
            })
        ));
    }

    #[test]
    fn copy_always_reports_an_outcome() {
        // Headless machines have no clipboard; either way the core hears back.
        let mut runner = runner(GeneratorSettings::default(), PathBuf::from("."));
        let msgs = runner.run(vec![Effect::CopyToClipboard {
            text: "a: b".into(),
        }]);
        assert!(matches!(
            msgs.as_slice(),
            [Msg::OutputCopied] | [Msg::OutputCopyFailed { .. }]
        ));
    }

    #[test]
    fn failed_save_reports_back() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let mut runner = runner(GeneratorSettings::default(), blocker);

        let msgs = runner.run(vec![Effect::SaveOutput {
            filename: ".gitlab-ci.yml".into(),
            mime_type: "text/yaml",
            contents: "a: b".into(),
        }]);
        assert!(matches!(msgs.as_slice(), [Msg::OutputSaveFailed { .. }]));
    }
}
