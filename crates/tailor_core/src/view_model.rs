use crate::{TailorReport, MIN_FIELD_CHARS};

/// What the request area shows. Derived from `RequestState`, so at most one
/// of loading, result and error is ever visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestPanel {
    #[default]
    Hidden,
    Loading,
    Result(TailorReport),
    Error(String),
}

/// Live character counter for a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldStats {
    pub chars: usize,
    /// Non-empty but shorter than the minimum the backend accepts.
    pub needs_more: bool,
}

impl FieldStats {
    pub fn of(text: &str) -> Self {
        let chars = text.chars().count();
        Self {
            chars,
            needs_more: chars > 0 && chars < MIN_FIELD_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub request: RequestPanel,
    pub resume: FieldStats,
    pub job_description: FieldStats,
    pub ingest_message: Option<String>,
    pub health_line: Option<String>,
    pub submit_enabled: bool,
    pub inputs_enabled: bool,
    pub dirty: bool,
}
