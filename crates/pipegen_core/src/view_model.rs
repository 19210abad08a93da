#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub stages: Vec<StageRowView>,
    pub in_progress: bool,
    pub generate_enabled: bool,
    pub generate_label: &'static str,
    pub output_text: String,
    pub output_is_error: bool,
    /// Copy and download are offered only for successful output.
    pub can_export: bool,
    pub status: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRowView {
    pub name: String,
    pub checked: bool,
    pub options: Vec<String>,
    /// Current tool; `None` when unchecked or for plain toggles.
    pub selected_option: Option<String>,
}
