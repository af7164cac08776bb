use std::io;
use std::path::PathBuf;

use encoding_rs::UTF_8;
use tailor_logging::{tailor_debug, tailor_warn};
use thiserror::Error;

use crate::{docx, pdf, ExtractionFailureKind, ExtractionResult};

/// Formats the extractor understands, picked from the file extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    Docx,
    Unsupported,
}

impl DocumentFormat {
    /// Maps the text after the last `.` (case-insensitive) to a format.
    pub fn from_file_name(file_name: &str) -> Self {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "txt" => DocumentFormat::PlainText,
            "pdf" => DocumentFormat::Pdf,
            "docx" => DocumentFormat::Docx,
            _ => DocumentFormat::Unsupported,
        }
    }
}

/// Where the bytes of a chosen file come from. Only read once a supported
/// format has been selected.
#[async_trait::async_trait]
pub trait ByteSource: Send + Sync {
    async fn read(&self) -> io::Result<Vec<u8>>;
}

/// Reads a file from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl ByteSource for FileSource {
    async fn read(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

/// Bytes already in memory, e.g. from a drop target.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

#[async_trait::async_trait]
impl ByteSource for MemorySource {
    async fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

#[derive(Debug, Error)]
pub(crate) enum ExtractError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("pdf: {0}")]
    Pdf(String),
    #[error("docx: {0}")]
    Docx(String),
    #[error("decoder task failed: {0}")]
    Decoder(String),
}

impl ExtractError {
    fn kind(&self) -> ExtractionFailureKind {
        match self {
            ExtractError::Io(_) => ExtractionFailureKind::ReadError,
            ExtractError::Pdf(_) | ExtractError::Docx(_) | ExtractError::Decoder(_) => {
                ExtractionFailureKind::ParseError
            }
        }
    }
}

/// Converts a chosen file into plain text.
///
/// Never fails outright: every problem is folded into
/// `ExtractionResult::Failure` so the caller can tell the user to paste the
/// text by hand instead.
pub async fn extract(file_name: &str, source: &dyn ByteSource) -> ExtractionResult {
    let format = DocumentFormat::from_file_name(file_name);
    let outcome = match format {
        DocumentFormat::Unsupported => {
            tailor_debug!("Rejecting {} without reading it", file_name);
            return ExtractionResult::Failure(ExtractionFailureKind::UnsupportedFormat);
        }
        DocumentFormat::PlainText => read_plain_text(source).await,
        DocumentFormat::Pdf => decode_binary(source, pdf::pdf_to_text).await,
        DocumentFormat::Docx => decode_binary(source, docx::docx_to_text).await,
    };

    match outcome {
        Ok(text) => {
            tailor_debug!(
                "Extracted {} chars from {} ({:?})",
                text.chars().count(),
                file_name,
                format
            );
            ExtractionResult::Text(text)
        }
        Err(err) => {
            tailor_warn!("Extraction of {} failed: {}", file_name, err);
            ExtractionResult::Failure(err.kind())
        }
    }
}

/// UTF-8 with a leading BOM dropped; invalid sequences become U+FFFD.
async fn read_plain_text(source: &dyn ByteSource) -> Result<String, ExtractError> {
    let bytes = source.read().await?;
    let (text, had_errors) = UTF_8.decode_with_bom_removal(&bytes);
    if had_errors {
        tailor_debug!("Replaced invalid UTF-8 sequences in plain text upload");
    }
    Ok(text.into_owned())
}

/// Runs a decoder on the blocking pool. A panicking decoder surfaces as a
/// join error and is reported like any other parse failure.
async fn decode_binary(
    source: &dyn ByteSource,
    decoder: fn(&[u8]) -> Result<String, ExtractError>,
) -> Result<String, ExtractError> {
    let bytes = source.read().await?;
    tokio::task::spawn_blocking(move || decoder(&bytes))
        .await
        .map_err(|err| ExtractError::Decoder(err.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::DocumentFormat;

    #[test]
    fn format_follows_lowercased_extension() {
        assert_eq!(DocumentFormat::from_file_name("cv.TXT"), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::from_file_name("my.cv.Pdf"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_file_name("resume.docx"), DocumentFormat::Docx);
    }

    #[test]
    fn unknown_or_missing_extension_is_unsupported() {
        assert_eq!(DocumentFormat::from_file_name("resume.csv"), DocumentFormat::Unsupported);
        assert_eq!(DocumentFormat::from_file_name("resume.doc"), DocumentFormat::Unsupported);
        assert_eq!(DocumentFormat::from_file_name("README"), DocumentFormat::Unsupported);
        assert_eq!(DocumentFormat::from_file_name("resume."), DocumentFormat::Unsupported);
    }
}
