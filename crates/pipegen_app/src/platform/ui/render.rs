use std::fmt::Write as _;

use pipegen_core::{AppViewModel, StageRowView, DEFAULT_OUTPUT_FILENAME};

const RULE: &str = "----------------------------------------------------------------";

/// Renders the whole screen as plain text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "CI/CD Pipeline Generator");
    let _ = writeln!(out, "{RULE}");
    for (index, row) in view.stages.iter().enumerate() {
        let _ = writeln!(out, "{}", stage_line(index + 1, row));
    }
    let _ = writeln!(out, "{RULE}");

    let button = if view.generate_enabled {
        format!("[ {} ]", view.generate_label)
    } else {
        format!("( {} )", view.generate_label)
    };
    let _ = writeln!(out, "{button}");

    if !view.output_text.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Generated {DEFAULT_OUTPUT_FILENAME}");
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "{}", view.output_text.trim_end());
        let _ = writeln!(out, "{RULE}");
    }
    if view.can_export {
        let _ = writeln!(out, "Actions: copy | save");
    }
    if let Some(status) = &view.status {
        let _ = writeln!(out, "{status}");
    }
    out
}

fn stage_line(number: usize, row: &StageRowView) -> String {
    let mark = if row.checked { 'x' } else { ' ' };
    let mut line = format!("{number:>2}. [{mark}] {}", row.name);
    if row.checked && !row.options.is_empty() {
        let choices = row
            .options
            .iter()
            .map(|option| {
                if Some(option) == row.selected_option.as_ref() {
                    format!("<{option}>")
                } else {
                    option.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(line, "  {choices}");
    }
    line
}
