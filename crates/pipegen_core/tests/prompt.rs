use pipegen_core::{build_prompt, GenerationRequest, SelectionState, PROMPT_POSTSCRIPT};

#[test]
fn prompt_contains_one_line_per_pair() {
    let request = GenerationRequest::from_pairs([("Build", "Maven"), ("Test", "enabled")]);
    let prompt = build_prompt(&request);

    assert!(prompt.contains("Build: Maven"));
    assert!(prompt.contains("Test: enabled"));
    assert!(prompt.contains(PROMPT_POSTSCRIPT));
}

#[test]
fn prompt_is_deterministic_for_identical_snapshots() {
    let mut a = SelectionState::default();
    let mut b = SelectionState::default();
    for state in [&mut a, &mut b] {
        state.set_stage("Deploy", true).unwrap();
        state.set_option("Deploy", "OpenShift").unwrap();
        state.set_stage("SAST Scan", true).unwrap();
    }

    assert_eq!(build_prompt(&a.snapshot()), build_prompt(&b.snapshot()));
    assert_eq!(build_prompt(&a.snapshot()), build_prompt(&a.snapshot()));
}

#[test]
fn empty_selection_still_builds_prompt() {
    let prompt = build_prompt(&SelectionState::default().snapshot());
    assert_eq!(
        prompt,
        "Generate a GitLab CI YAML pipeline with the following configuration:\n\n\n\n\
         Only return valid .gitlab-ci.yml content. YAML only as output."
    );
}
