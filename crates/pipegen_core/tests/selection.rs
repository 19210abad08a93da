use pipegen_core::{
    GenerationRequest, InvalidSelection, SelectionState, Stage, StageCatalog, StageSelection,
    ENABLED_VALUE,
};
use pretty_assertions::assert_eq;

static SMALL_STAGES: &[Stage] = &[
    Stage::with_options("Build", &["Maven", "Gradle"]),
    Stage::toggle("Test"),
    Stage::with_options("Deploy", &["Kubernetes", "AWS"]),
];

fn small() -> SelectionState {
    SelectionState::new(StageCatalog::new(SMALL_STAGES))
}

#[test]
fn new_state_is_empty() {
    let state = SelectionState::default();
    assert!(state.snapshot().is_empty());
    assert_eq!(state.selected_count(), 0);
}

#[test]
fn enabling_defaults_to_first_option_or_sentinel() {
    let mut state = small();
    state.set_stage("Build", true).unwrap();
    state.set_stage("Test", true).unwrap();

    assert_eq!(state.selection("Build"), Some(StageSelection::Tool("Maven")));
    assert_eq!(state.selection("Test"), Some(StageSelection::Enabled));
    assert_eq!(state.selection("Deploy"), None);
}

#[test]
fn disabling_removes_stage_from_snapshot() {
    let mut state = small();
    state.set_stage("Build", true).unwrap();
    state.set_stage("Test", true).unwrap();
    state.set_stage("Build", false).unwrap();

    assert_eq!(
        state.snapshot(),
        GenerationRequest::from_pairs([("Test", ENABLED_VALUE)])
    );
    assert!(!state.is_selected("Build"));
}

#[test]
fn set_stage_is_idempotent() {
    let mut state = small();
    state.set_stage("Deploy", true).unwrap();
    state.set_option("Deploy", "AWS").unwrap();
    let before = state.clone();

    state.set_stage("Deploy", true).unwrap();
    assert_eq!(state, before);

    state.set_stage("Test", false).unwrap();
    state.set_stage("Test", false).unwrap();
    assert_eq!(state, before);
}

#[test]
fn snapshot_follows_catalog_order_not_click_order() {
    let mut state = small();
    state.set_stage("Deploy", true).unwrap();
    state.set_stage("Test", true).unwrap();
    state.set_stage("Build", true).unwrap();
    state.set_option("Build", "Gradle").unwrap();

    assert_eq!(
        state.snapshot(),
        GenerationRequest::from_pairs([
            ("Build", "Gradle"),
            ("Test", "enabled"),
            ("Deploy", "Kubernetes"),
        ])
    );
}

#[test]
fn set_option_rejects_contract_violations() {
    let mut state = small();
    assert_eq!(
        state.set_option("Build", "Maven"),
        Err(InvalidSelection::NotSelected("Build".into()))
    );

    state.set_stage("Build", true).unwrap();
    assert_eq!(
        state.set_option("Build", "Bazel"),
        Err(InvalidSelection::UnknownOption {
            stage: "Build".into(),
            option: "Bazel".into(),
        })
    );

    state.set_stage("Test", true).unwrap();
    assert_eq!(
        state.set_option("Test", "enabled"),
        Err(InvalidSelection::NoOptions("Test".into()))
    );

    assert_eq!(
        state.set_stage("Lint", true),
        Err(InvalidSelection::UnknownStage("Lint".into()))
    );

    // Rejected calls leave the selection untouched.
    assert_eq!(state.selection("Build"), Some(StageSelection::Tool("Maven")));
}

#[test]
fn snapshot_values_are_always_declared_options_or_sentinel() {
    let catalog = StageCatalog::builtin();
    let mut state = SelectionState::new(catalog);

    // Walk a deterministic sequence of toggles and option picks over every stage.
    for (round, stage) in catalog.stages().iter().cycle().take(40).enumerate() {
        let _ = state.set_stage(stage.name, round % 3 != 0);
        if let Some(option) = stage.options.get(round % 4) {
            let _ = state.set_option(stage.name, option);
        }
        let _ = state.set_option(stage.name, "not-a-tool");

        for choice in state.snapshot().choices() {
            let declared = catalog.find(&choice.stage).expect("stage from catalog");
            if declared.has_options() {
                assert!(declared.options.contains(&choice.value.as_str()));
            } else {
                assert_eq!(choice.value, ENABLED_VALUE);
            }
            assert!(state.is_selected(&choice.stage));
        }
    }
}
