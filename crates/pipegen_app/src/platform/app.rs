use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use pipegen_core::{update, AppState, Msg, StageCatalog};
use pipegen_engine::EngineHandle;
use pipegen_logging::{pipegen_debug, pipegen_info};

use super::config::Config;
use super::effects::EffectRunner;
use super::ui::input::{self, Input, HELP};
use super::ui::render;

const TICK: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    // A missing .env file is fine; the key may come from the environment.
    let _ = dotenv::dotenv();
    let config = Config::parse();
    pipegen_logging::initialize(
        config.log_destination(),
        config.log_level,
        &config.log_file,
    );
    pipegen_info!(
        "Starting pipegen model={} endpoint={} credential_configured={}",
        config.model,
        config.endpoint,
        config.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    );

    let engine = EngineHandle::new(config.generator_settings())
        .context("failed to start generation engine")?;
    let mut runner = EffectRunner::new(engine, config.output_dir.clone());

    let catalog = StageCatalog::builtin();
    let input_rx = spawn_input_reader(catalog)?;

    let mut stdout = io::stdout();
    let mut state = AppState::with_catalog(catalog);
    writeln!(stdout, "{HELP}\n")?;

    // Quitting waits for an in-flight generation: requests are never cancelled.
    let mut quitting = false;
    loop {
        let mut inbox = runner.poll_events();
        if quitting {
            thread::sleep(TICK);
        } else {
            match input_rx.recv_timeout(TICK) {
                Ok(Input::Msg(msg)) => inbox.push(msg),
                Ok(Input::Show) => {
                    write!(stdout, "{}", render::render(&state.view()))?;
                }
                Ok(Input::Help) => writeln!(stdout, "{HELP}")?,
                Ok(Input::Invalid(reason)) => writeln!(stdout, "{reason}")?,
                Ok(Input::Quit) | Err(RecvTimeoutError::Disconnected) => quitting = true,
                Err(RecvTimeoutError::Timeout) => inbox.push(Msg::Tick),
            }
        }

        for msg in inbox {
            state = dispatch(state, msg, &mut runner);
        }
        if state.consume_dirty() {
            write!(stdout, "\n{}", render::render(&state.view()))?;
            stdout.flush()?;
        }
        if quitting && !state.in_progress() {
            break;
        }
    }

    pipegen_info!("pipegen exiting");
    Ok(())
}

/// Applies `msg` and every message its effects produce synchronously.
fn dispatch(state: AppState, msg: Msg, runner: &mut EffectRunner) -> AppState {
    let mut state = state;
    let mut queue = VecDeque::from([msg]);
    while let Some(msg) = queue.pop_front() {
        if !matches!(msg, Msg::Tick) {
            pipegen_debug!("dispatch {}", msg_name(&msg));
        }
        let (next, effects) = update(state, msg);
        state = next;
        queue.extend(runner.run(effects));
    }
    state
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::StageToggled { .. } => "StageToggled",
        Msg::OptionSelected { .. } => "OptionSelected",
        Msg::GenerateClicked => "GenerateClicked",
        Msg::GenerationFinished { .. } => "GenerationFinished",
        Msg::CopyClicked => "CopyClicked",
        Msg::DownloadClicked => "DownloadClicked",
        Msg::OutputCopied => "OutputCopied",
        Msg::OutputCopyFailed { .. } => "OutputCopyFailed",
        Msg::OutputSaved { .. } => "OutputSaved",
        Msg::OutputSaveFailed { .. } => "OutputSaveFailed",
        Msg::Tick => "Tick",
        Msg::NoOp => "NoOp",
    }
}

/// Reads stdin on its own thread so the loop can keep draining engine events.
fn spawn_input_reader(catalog: StageCatalog) -> io::Result<mpsc::Receiver<Input>> {
    let (input_tx, input_rx) = mpsc::channel();
    thread::Builder::new()
        .name("pipegen-input".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if let Some(input) = input::parse(&line, catalog) {
                    if input_tx.send(input).is_err() {
                        return;
                    }
                }
            }
            let _ = input_tx.send(Input::Quit);
        })?;
    Ok(input_rx)
}
