use crate::view_model::{AppViewModel, FieldStats, RequestPanel};

/// Generation ticket attached to each accepted tailoring request.
pub type Ticket = u64;
/// Generation ticket attached to each file extraction.
pub type IngestId = u64;

/// The user-editable text pair. Lives only in memory for the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResumeDraft {
    pub resume_text: String,
    pub job_description: String,
}

/// Structured result of a successful tailoring call, as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TailorReport {
    pub summary: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub tailored_resume: String,
}

/// Single source of truth for the request panel. Exactly one variant is live,
/// so the loading, result and error panels can never show together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Submitting {
        ticket: Ticket,
    },
    Succeeded(TailorReport),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestFailure {
    UnsupportedFormat,
    ReadError,
    ParseError,
}

impl IngestFailure {
    /// Short instruction shown next to the upload control.
    pub fn user_message(self) -> &'static str {
        match self {
            IngestFailure::UnsupportedFormat => {
                "Unsupported file type. Please use TXT, PDF, or DOCX files."
            }
            IngestFailure::ReadError => {
                "Error reading file. Please try again or copy and paste the text."
            }
            IngestFailure::ParseError => {
                "Error reading document. Please copy and paste the text instead."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Text(String),
    Failure(IngestFailure),
}

/// The upload control's own message slot, independent of `RequestState`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IngestState {
    #[default]
    Empty,
    Reading {
        file_name: String,
        id: IngestId,
    },
    Loaded {
        file_name: String,
    },
    Failed {
        file_name: String,
        failure: IngestFailure,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HealthState {
    #[default]
    Unknown,
    Checking,
    Healthy(String),
    Unreachable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    draft: ResumeDraft,
    request: RequestState,
    ingest: IngestState,
    health: HealthState,
    last_ticket: Ticket,
    last_ingest_id: IngestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let submitting = self.is_submitting();
        let request = match &self.request {
            RequestState::Idle => RequestPanel::Hidden,
            RequestState::Submitting { .. } => RequestPanel::Loading,
            RequestState::Succeeded(report) => RequestPanel::Result(report.clone()),
            RequestState::Failed(message) => RequestPanel::Error(message.clone()),
        };
        let ingest_message = match &self.ingest {
            IngestState::Empty => None,
            IngestState::Reading { file_name, .. } => Some(format!("Processing {file_name}...")),
            IngestState::Loaded { file_name } => {
                Some(format!("{file_name}: file loaded successfully"))
            }
            IngestState::Failed { file_name, failure } => {
                Some(format!("{file_name}: {}", failure.user_message()))
            }
        };
        let health_line = match &self.health {
            HealthState::Unknown => None,
            HealthState::Checking => Some("Backend: checking...".to_string()),
            HealthState::Healthy(status) => Some(format!("Backend: {status}")),
            HealthState::Unreachable(message) => Some(format!("Backend unreachable: {message}")),
        };

        AppViewModel {
            request,
            resume: FieldStats::of(&self.draft.resume_text),
            job_description: FieldStats::of(&self.draft.job_description),
            ingest_message,
            health_line,
            submit_enabled: !submitting,
            inputs_enabled: !submitting,
            dirty: self.dirty,
        }
    }

    pub fn draft(&self) -> &ResumeDraft {
        &self.draft
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn ingest(&self) -> &IngestState {
        &self.ingest
    }

    pub fn health(&self) -> &HealthState {
        &self.health
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.request, RequestState::Submitting { .. })
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_resume_text(&mut self, text: String) {
        self.draft.resume_text = text;
        self.mark_dirty();
    }

    pub(crate) fn set_job_description(&mut self, text: String) {
        self.draft.job_description = text;
        self.mark_dirty();
    }

    pub(crate) fn set_request(&mut self, request: RequestState) {
        self.request = request;
        self.mark_dirty();
    }

    /// Moves to `Submitting` under a fresh ticket and returns it.
    pub(crate) fn begin_submission(&mut self) -> Ticket {
        self.last_ticket += 1;
        let ticket = self.last_ticket;
        self.set_request(RequestState::Submitting { ticket });
        ticket
    }

    /// Whether a completion for `ticket` is still the current request.
    pub(crate) fn is_current_ticket(&self, ticket: Ticket) -> bool {
        matches!(self.request, RequestState::Submitting { ticket: current } if current == ticket)
    }

    pub(crate) fn begin_ingest(&mut self, file_name: String) -> IngestId {
        self.last_ingest_id += 1;
        let id = self.last_ingest_id;
        self.ingest = IngestState::Reading { file_name, id };
        self.mark_dirty();
        id
    }

    /// Applies an extraction outcome if `id` is the file currently being read.
    /// Returns false for stale outcomes, leaving state untouched.
    pub(crate) fn finish_ingest(&mut self, id: IngestId, outcome: IngestOutcome) -> bool {
        let file_name = match &self.ingest {
            IngestState::Reading {
                file_name,
                id: current,
            } if *current == id => file_name.clone(),
            _ => return false,
        };
        self.ingest = match outcome {
            IngestOutcome::Text(text) => {
                self.draft.resume_text = text;
                IngestState::Loaded { file_name }
            }
            IngestOutcome::Failure(failure) => IngestState::Failed { file_name, failure },
        };
        self.mark_dirty();
        true
    }

    pub(crate) fn set_health(&mut self, health: HealthState) {
        self.health = health;
        self.mark_dirty();
    }

    /// Empties the draft and returns every panel to its initial state.
    /// Ticket counters keep counting so older completions stay stale.
    pub(crate) fn clear(&mut self) {
        let was_clean = self.draft == ResumeDraft::default()
            && self.request == RequestState::Idle
            && self.ingest == IngestState::Empty;
        self.draft = ResumeDraft::default();
        self.request = RequestState::Idle;
        self.ingest = IngestState::Empty;
        if !was_clean {
            self.mark_dirty();
        }
    }
}
