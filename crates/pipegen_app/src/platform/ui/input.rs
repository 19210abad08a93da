//! Parses typed terminal commands into core messages.

use pipegen_core::{Msg, Stage, StageCatalog};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Msg(Msg),
    Show,
    Help,
    Quit,
    Invalid(String),
}

pub const HELP: &str = "\
Commands:
  on <stage>            include a stage (number or name)
  off <stage>           remove a stage
  use <stage> <tool>    pick the tool for a stage
  generate | g          generate .gitlab-ci.yml
  copy                  copy the generated YAML to the clipboard
  save                  save the generated YAML as .gitlab-ci.yml
  show                  redraw the screen
  help                  show this help
  quit | q              exit";

pub fn parse(line: &str, catalog: StageCatalog) -> Option<Input> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let input = match command.to_ascii_lowercase().as_str() {
        "on" | "off" => match resolve_stage(rest, catalog) {
            Some(stage) => Input::Msg(Msg::StageToggled {
                stage: stage.name.to_string(),
                enabled: command.eq_ignore_ascii_case("on"),
            }),
            None => Input::Invalid(format!("unknown stage {rest:?}")),
        },
        "use" => parse_use(rest, catalog),
        "generate" | "g" => Input::Msg(Msg::GenerateClicked),
        "copy" => Input::Msg(Msg::CopyClicked),
        "save" => Input::Msg(Msg::DownloadClicked),
        "show" => Input::Show,
        "help" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        other => Input::Invalid(format!("unknown command {other:?}; type help")),
    };
    Some(input)
}

// Stage names contain spaces, so the tool is the last word.
fn parse_use(rest: &str, catalog: StageCatalog) -> Input {
    let Some((stage_ref, tool)) = rest.rsplit_once(char::is_whitespace) else {
        return Input::Invalid("usage: use <stage> <tool>".to_string());
    };
    let Some(stage) = resolve_stage(stage_ref, catalog) else {
        return Input::Invalid(format!("unknown stage {:?}", stage_ref.trim()));
    };
    match stage
        .options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(tool))
    {
        Some(option) => Input::Msg(Msg::OptionSelected {
            stage: stage.name.to_string(),
            option: option.to_string(),
        }),
        None if stage.has_options() => Input::Invalid(format!(
            "{} supports: {}",
            stage.name,
            stage.options.join(", ")
        )),
        None => Input::Invalid(format!("{} has no tool choice", stage.name)),
    }
}

fn resolve_stage(reference: &str, catalog: StageCatalog) -> Option<&'static Stage> {
    let reference = reference.trim();
    if let Ok(number) = reference.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| catalog.stages().get(index));
    }
    catalog
        .stages()
        .iter()
        .find(|stage| stage.name.eq_ignore_ascii_case(reference))
}
