use crate::selection::GenerationRequest;

pub const PROMPT_PREAMBLE: &str =
    "Generate a GitLab CI YAML pipeline with the following configuration:";
pub const PROMPT_POSTSCRIPT: &str =
    "Only return valid .gitlab-ci.yml content. YAML only as output.";

/// Renders a request into the instruction text sent to the generation service.
///
/// Same request, same prompt: the output depends only on the request contents
/// and their order.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let lines = request
        .choices()
        .iter()
        .map(|choice| format!("{}: {}", choice.stage, choice.value))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{PROMPT_PREAMBLE}\n\n{lines}\n\n{PROMPT_POSTSCRIPT}")
}
