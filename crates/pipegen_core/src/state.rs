use crate::catalog::StageCatalog;
use crate::output::OutputSink;
use crate::selection::{InvalidSelection, SelectionState};
use crate::view_model::{AppViewModel, StageRowView};

pub type GenerationId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    selection: SelectionState,
    output: OutputSink,
    pending: Option<GenerationId>,
    next_generation_id: GenerationId,
    status: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_catalog(StageCatalog::builtin())
    }

    pub fn with_catalog(catalog: StageCatalog) -> Self {
        Self {
            selection: SelectionState::new(catalog),
            output: OutputSink::default(),
            pending: None,
            next_generation_id: 1,
            status: None,
            dirty: true,
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn output(&self) -> &OutputSink {
        &self.output
    }

    /// True strictly between dispatching a generation and receiving its result.
    pub fn in_progress(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_generation(&self) -> Option<GenerationId> {
        self.pending
    }

    pub fn view(&self) -> AppViewModel {
        let stages = self
            .selection
            .catalog()
            .stages()
            .iter()
            .map(|stage| {
                let selection = self.selection.selection(stage.name);
                StageRowView {
                    name: stage.name.to_string(),
                    checked: selection.is_some(),
                    options: stage.options.iter().map(|o| o.to_string()).collect(),
                    selected_option: selection
                        .filter(|_| stage.has_options())
                        .map(|s| s.value().to_string()),
                }
            })
            .collect();

        let in_progress = self.in_progress();
        AppViewModel {
            stages,
            in_progress,
            generate_enabled: !in_progress,
            generate_label: if in_progress {
                "Generating..."
            } else {
                "Generate YAML"
            },
            output_text: self.output.display_text(),
            output_is_error: self
                .output
                .current()
                .is_some_and(|result| !result.is_success()),
            can_export: self.output.exportable().is_some(),
            status: self.status.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Rejected changes leave the state clean.
    pub(crate) fn set_stage(&mut self, name: &str, enabled: bool) -> Result<(), InvalidSelection> {
        self.selection.set_stage(name, enabled)?;
        self.dirty = true;
        Ok(())
    }

    pub(crate) fn set_option(&mut self, name: &str, option: &str) -> Result<(), InvalidSelection> {
        self.selection.set_option(name, option)?;
        self.dirty = true;
        Ok(())
    }

    /// Marks a generation as outstanding and returns its id.
    pub(crate) fn begin_generation(&mut self) -> GenerationId {
        let id = self.next_generation_id;
        self.next_generation_id += 1;
        self.pending = Some(id);
        self.status = None;
        self.dirty = true;
        id
    }

    /// Stores `result` if it answers the outstanding generation.
    pub(crate) fn finish_generation(
        &mut self,
        generation_id: GenerationId,
        result: crate::GenerationResult,
    ) -> bool {
        if self.pending != Some(generation_id) {
            return false;
        }
        self.pending = None;
        self.output.set(result);
        self.dirty = true;
        true
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
        self.dirty = true;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
