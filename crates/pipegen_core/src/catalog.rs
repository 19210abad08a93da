/// A named pipeline stage. Stages without options are plain on/off toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub name: &'static str,
    pub options: &'static [&'static str],
}

impl Stage {
    pub const fn toggle(name: &'static str) -> Self {
        Self { name, options: &[] }
    }

    pub const fn with_options(name: &'static str, options: &'static [&'static str]) -> Self {
        Self { name, options }
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Looks up `option` and returns the catalog-owned string for it.
    pub fn option(&self, option: &str) -> Option<&'static str> {
        self.options.iter().copied().find(|candidate| *candidate == option)
    }
}

const BUILTIN_STAGES: &[Stage] = &[
    Stage::with_options("Build", &["Maven", "Gradle", "npm", "pip"]),
    Stage::toggle("Test"),
    Stage::toggle("SonarQube Scan"),
    Stage::toggle("Docker Build & Push"),
    Stage::toggle("SAST Scan"),
    Stage::toggle("DAST Scan"),
    Stage::toggle("Manual Approval"),
    Stage::with_options("Deploy", &["Kubernetes", "OpenShift", "AWS"]),
];

/// Fixed, ordered set of stages available for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageCatalog {
    stages: &'static [Stage],
}

impl StageCatalog {
    pub fn builtin() -> Self {
        Self::new(BUILTIN_STAGES)
    }

    pub fn new(stages: &'static [Stage]) -> Self {
        Self { stages }
    }

    /// Stages in display order.
    pub fn stages(&self) -> &'static [Stage] {
        self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.stages.iter().position(|stage| stage.name == name)
    }

    pub fn find(&self, name: &str) -> Option<&'static Stage> {
        self.stages.iter().find(|stage| stage.name == name)
    }
}

impl Default for StageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
