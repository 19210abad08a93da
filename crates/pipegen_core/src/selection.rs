use thiserror::Error;

use crate::catalog::StageCatalog;

/// Value sent for stages that have no tool choice.
pub const ENABLED_VALUE: &str = "enabled";

/// What a checked stage currently holds. Unchecked stages have no selection at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageSelection {
    Enabled,
    Tool(&'static str),
}

impl StageSelection {
    pub fn value(&self) -> &'static str {
        match *self {
            StageSelection::Enabled => ENABLED_VALUE,
            StageSelection::Tool(tool) => tool,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSelection {
    #[error("unknown stage {0:?}")]
    UnknownStage(String),
    #[error("stage {0:?} is not selected")]
    NotSelected(String),
    #[error("stage {0:?} has no tool options")]
    NoOptions(String),
    #[error("{option:?} is not an option of stage {stage:?}")]
    UnknownOption { stage: String, option: String },
}

/// One `(stage, value)` line of a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageChoice {
    pub stage: String,
    pub value: String,
}

/// Immutable snapshot of the selection taken when generation is triggered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationRequest {
    choices: Vec<StageChoice>,
}

impl GenerationRequest {
    pub fn from_pairs<S, V>(pairs: impl IntoIterator<Item = (S, V)>) -> Self
    where
        S: Into<String>,
        V: Into<String>,
    {
        Self {
            choices: pairs
                .into_iter()
                .map(|(stage, value)| StageChoice {
                    stage: stage.into(),
                    value: value.into(),
                })
                .collect(),
        }
    }

    pub fn choices(&self) -> &[StageChoice] {
        &self.choices
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

/// Per-stage selection slots, indexed in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    catalog: StageCatalog,
    slots: Vec<Option<StageSelection>>,
}

impl SelectionState {
    pub fn new(catalog: StageCatalog) -> Self {
        Self {
            catalog,
            slots: vec![None; catalog.len()],
        }
    }

    pub fn catalog(&self) -> StageCatalog {
        self.catalog
    }

    /// Checks or unchecks a stage. Checking an already checked stage keeps its tool.
    pub fn set_stage(&mut self, name: &str, enabled: bool) -> Result<(), InvalidSelection> {
        let index = self.index_of(name)?;
        if !enabled {
            self.slots[index] = None;
            return Ok(());
        }
        if self.slots[index].is_none() {
            let stage = &self.catalog.stages()[index];
            self.slots[index] = Some(match stage.options.first().copied() {
                Some(first) => StageSelection::Tool(first),
                None => StageSelection::Enabled,
            });
        }
        Ok(())
    }

    pub fn set_option(&mut self, name: &str, option: &str) -> Result<(), InvalidSelection> {
        let index = self.index_of(name)?;
        let stage = &self.catalog.stages()[index];
        if self.slots[index].is_none() {
            return Err(InvalidSelection::NotSelected(name.to_string()));
        }
        if !stage.has_options() {
            return Err(InvalidSelection::NoOptions(name.to_string()));
        }
        let tool = stage
            .option(option)
            .ok_or_else(|| InvalidSelection::UnknownOption {
                stage: name.to_string(),
                option: option.to_string(),
            })?;
        self.slots[index] = Some(StageSelection::Tool(tool));
        Ok(())
    }

    pub fn selection(&self, name: &str) -> Option<StageSelection> {
        self.catalog
            .position(name)
            .and_then(|index| self.slots[index])
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selection(name).is_some()
    }

    pub fn selected_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn snapshot(&self) -> GenerationRequest {
        GenerationRequest::from_pairs(
            self.catalog
                .stages()
                .iter()
                .zip(&self.slots)
                .filter_map(|(stage, slot)| slot.map(|selection| (stage.name, selection.value()))),
        )
    }

    fn index_of(&self, name: &str) -> Result<usize, InvalidSelection> {
        self.catalog
            .position(name)
            .ok_or_else(|| InvalidSelection::UnknownStage(name.to_string()))
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(StageCatalog::builtin())
    }
}
