
use serde::{Deserialize, Serialize};

/// Generation ticket for a tailoring request, assigned by the caller.
pub type RequestId = u64;
/// Generation ticket for a file extraction, assigned by the caller.
pub type ExtractionId = u64;

/// Body of `POST /tailor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TailorRequest<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
}

/// Successful `POST /tailor` payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TailorResult {
    pub summary: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub tailored_resume: String,
}

/// `GET /health` payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionFailureKind {
    UnsupportedFormat,
    ReadError,
    ParseError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    Text(String),
    Failure(ExtractionFailureKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailureKind {
    /// The endpoint answered with a non-success status.
    ServerError { status: u16 },
    /// The request went out but no response came back.
    NetworkError,
    /// The request could not be built or its response not understood.
    ClientError,
}

/// A classified transport failure; `message` is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportFailureKind,
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: TransportFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn client(message: impl Into<String>) -> Self {
        Self::new(TransportFailureKind::ClientError, message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ExtractionCompleted {
        id: ExtractionId,
        result: ExtractionResult,
    },
    TailorCompleted {
        id: RequestId,
        result: Result<TailorResult, TransportError>,
    },
    HealthChecked(Result<HealthStatus, TransportError>),
}
