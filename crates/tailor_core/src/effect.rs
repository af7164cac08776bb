use std::path::PathBuf;

use crate::{IngestId, Ticket};

/// Side effects requested by `update`; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read and extract text from a resume file.
    ExtractFile {
        id: IngestId,
        file_name: String,
        path: PathBuf,
    },
    /// Send the draft to the remote tailoring endpoint, exactly once.
    SubmitTailor {
        ticket: Ticket,
        resume_text: String,
        job_description: String,
    },
    /// Ping the remote health endpoint.
    CheckHealth,
}
