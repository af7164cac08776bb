//! Tailor engine: document extraction, the tailoring service client and the
//! background runtime that executes both.
mod docx;
mod engine;
mod extract;
mod pdf;
mod settings;
mod transport;
mod types;

pub use engine::EngineHandle;
pub use extract::{extract, ByteSource, DocumentFormat, FileSource, MemorySource};
pub use settings::{SettingsError, TailorSettings, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use transport::{ReqwestTailorClient, TailorClient, GENERIC_FAILURE_MESSAGE};
pub use types::{
    EngineEvent, ExtractionFailureKind, ExtractionId, ExtractionResult, HealthStatus, RequestId,
    TailorRequest, TailorResult, TransportError, TransportFailureKind,
};
