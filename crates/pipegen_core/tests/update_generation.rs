use std::sync::Once;

use pipegen_core::{
    build_prompt, update, AppState, Effect, FailureKind, GenerationId, GenerationRequest,
    GenerationResult, Msg,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pipegen_logging::initialize_for_tests);
}

fn toggle(state: AppState, stage: &str, enabled: bool) -> AppState {
    update(
        state,
        Msg::StageToggled {
            stage: stage.to_string(),
            enabled,
        },
    )
    .0
}

fn dispatch(state: AppState) -> (AppState, GenerationId, String) {
    let (state, effects) = update(state, Msg::GenerateClicked);
    match effects.as_slice() {
        [Effect::Generate {
            generation_id,
            prompt,
        }] => (state, *generation_id, prompt.clone()),
        other => panic!("expected a single Generate effect, got {other:?}"),
    }
}

#[test]
fn generate_builds_prompt_from_current_selection() {
    init_logging();
    let state = toggle(AppState::new(), "Test", true);
    let state = toggle(state, "Build", true);
    let (state, _) = update(
        state,
        Msg::OptionSelected {
            stage: "Build".into(),
            option: "Gradle".into(),
        },
    );

    let (_state, _id, prompt) = dispatch(state);
    let expected = build_prompt(&GenerationRequest::from_pairs([
        ("Build", "Gradle"),
        ("Test", "enabled"),
    ]));
    assert_eq!(prompt, expected);
}

#[test]
fn in_progress_spans_dispatch_to_resolution_for_every_outcome() {
    init_logging();
    let outcomes = [
        GenerationResult::Success("foo: bar".into()),
        GenerationResult::failure(FailureKind::RemoteError, "rate limited"),
        GenerationResult::failure(
            FailureKind::NetworkError,
            "Failed to connect to the generation service.",
        ),
    ];

    for result in outcomes {
        let state = toggle(AppState::new(), "Test", true);
        assert!(!state.in_progress());
        assert!(state.view().generate_enabled);

        let (state, generation_id, _) = dispatch(state);
        assert!(state.in_progress());
        let view = state.view();
        assert!(!view.generate_enabled);
        assert_eq!(view.generate_label, "Generating...");

        let (state, effects) = update(
            state,
            Msg::GenerationFinished {
                generation_id,
                result: result.clone(),
            },
        );
        assert!(effects.is_empty());
        assert!(!state.in_progress());
        assert_eq!(state.output().current(), Some(&result));
        assert_eq!(state.view().generate_label, "Generate YAML");
    }
}

#[test]
fn second_click_while_in_progress_is_ignored() {
    init_logging();
    let (state, first_id, _) = dispatch(AppState::new());

    let (state, effects) = update(state, Msg::GenerateClicked);
    assert!(effects.is_empty());
    assert_eq!(state.pending_generation(), Some(first_id));

    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            generation_id: first_id,
            result: GenerationResult::Success("a: b".into()),
        },
    );
    let (_state, second_id, _) = dispatch(state);
    assert_ne!(first_id, second_id);
}

#[test]
fn stale_completion_does_not_clear_flag_or_output() {
    init_logging();
    let (state, generation_id, _) = dispatch(AppState::new());

    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            generation_id: generation_id + 100,
            result: GenerationResult::Success("stale".into()),
        },
    );
    assert!(state.in_progress());
    assert_eq!(state.output().current(), None);
}

#[test]
fn failures_render_with_error_marker() {
    init_logging();
    let (state, generation_id, _) = dispatch(AppState::new());
    let (mut state, _) = update(
        state,
        Msg::GenerationFinished {
            generation_id,
            result: GenerationResult::failure(FailureKind::MissingCredential, "no key"),
        },
    );

    let view = state.view();
    assert_eq!(view.output_text, "❌ Error: no key");
    assert!(view.output_is_error);
    assert!(!view.can_export);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn invalid_selection_messages_leave_state_untouched() {
    init_logging();
    let mut state = AppState::new();
    assert!(state.consume_dirty());
    let before = state.selection().clone();

    let (state, effects) = update(
        state,
        Msg::OptionSelected {
            stage: "Build".into(),
            option: "Maven".into(),
        },
    );
    assert!(effects.is_empty());
    let (mut state, _) = update(
        state,
        Msg::StageToggled {
            stage: "Nope".into(),
            enabled: true,
        },
    );
    assert_eq!(state.selection(), &before);
    assert!(!state.consume_dirty(), "rejected messages must not re-render");

    let mut state = toggle(state, "Build", true);
    assert!(state.consume_dirty());
}
