use std::sync::{Arc, Mutex};
use std::time::Duration;

use tailor_engine::{
    EngineEvent, EngineHandle, ExtractionFailureKind, ExtractionResult, HealthStatus,
    TailorClient, TailorResult, TransportError,
};
use tempfile::TempDir;

const WAIT: Duration = Duration::from_secs(5);

/// Records calls and answers from a canned result.
struct FakeClient {
    calls: Mutex<Vec<(String, String)>>,
    answer: Result<TailorResult, TransportError>,
}

#[async_trait::async_trait]
impl TailorClient for FakeClient {
    async fn submit_tailor_request(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<TailorResult, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((resume_text.to_string(), job_description.to_string()));
        self.answer.clone()
    }

    async fn check_health(&self) -> Result<HealthStatus, TransportError> {
        Ok(HealthStatus {
            status: "ok".to_string(),
        })
    }
}

fn fake(answer: Result<TailorResult, TransportError>) -> Arc<FakeClient> {
    Arc::new(FakeClient {
        calls: Mutex::new(Vec::new()),
        answer,
    })
}

#[test]
fn submit_reports_completion_with_same_id() {
    let result = TailorResult {
        summary: "s".to_string(),
        matched_skills: vec!["Rust".to_string()],
        missing_skills: vec![],
        tailored_resume: "r".to_string(),
    };
    let client = fake(Ok(result.clone()));
    let engine = EngineHandle::with_client(client.clone()).unwrap();

    engine.submit(7, "resume", "job");

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::TailorCompleted {
            id: 7,
            result: Ok(result)
        })
    );
    assert_eq!(
        client.calls.lock().unwrap().as_slice(),
        &[("resume".to_string(), "job".to_string())]
    );
}

#[test]
fn extract_reads_file_on_runtime() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cv.txt");
    std::fs::write(&path, "Plain resume").unwrap();
    let engine = EngineHandle::with_client(fake(Ok(TailorResult::default()))).unwrap();

    engine.extract(3, "cv.txt", &path);
    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::ExtractionCompleted {
            id: 3,
            result: ExtractionResult::Text("Plain resume".to_string())
        })
    );

    engine.extract(4, "cv.rtf", &path);
    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::ExtractionCompleted {
            id: 4,
            result: ExtractionResult::Failure(ExtractionFailureKind::UnsupportedFormat)
        })
    );
}

#[test]
fn health_check_is_forwarded() {
    let engine = EngineHandle::with_client(fake(Ok(TailorResult::default()))).unwrap();
    engine.check_health();
    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::HealthChecked(Ok(HealthStatus {
            status: "ok".to_string()
        })))
    );
}
