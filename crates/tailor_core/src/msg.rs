use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User replaced the resume text.
    ResumeEdited(String),
    /// User replaced the job description text.
    JobDescriptionEdited(String),
    /// User picked (or dropped) a resume file.
    FileChosen { file_name: String, path: PathBuf },
    /// Extraction finished for a previously chosen file.
    ExtractionFinished {
        id: crate::IngestId,
        outcome: crate::IngestOutcome,
    },
    /// User clicked Tailor.
    SubmitClicked,
    /// The tailoring call resolved. `Err` carries the classified, user-facing message.
    TailorCompleted {
        ticket: crate::Ticket,
        result: Result<crate::TailorReport, String>,
    },
    /// User clicked Clear All.
    ClearClicked,
    /// User closed the error banner.
    ErrorDismissed,
    /// User asked for the backend status.
    HealthRequested,
    /// Health probe result: `Ok(status)` or `Err(message)`.
    HealthReported(Result<String, String>),
    /// Render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
