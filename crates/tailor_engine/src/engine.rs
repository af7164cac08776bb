use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tailor_logging::tailor_debug;

use crate::extract::{extract, FileSource};
use crate::transport::{ReqwestTailorClient, TailorClient};
use crate::{EngineEvent, ExtractionId, RequestId, TailorSettings};

enum EngineCommand {
    Extract {
        id: ExtractionId,
        file_name: String,
        path: PathBuf,
    },
    Tailor {
        id: RequestId,
        resume_text: String,
        job_description: String,
    },
    CheckHealth,
}

/// Runs extraction and network work on a background tokio runtime and hands
/// results back as `EngineEvent`s. Commands run concurrently and are never
/// cancelled; callers drop stale events by id.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: TailorSettings) -> std::io::Result<Self> {
        Self::with_client(Arc::new(ReqwestTailorClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn TailorClient>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
            tailor_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn extract(&self, id: ExtractionId, file_name: impl Into<String>, path: impl Into<PathBuf>) {
        let _ = self.cmd_tx.send(EngineCommand::Extract {
            id,
            file_name: file_name.into(),
            path: path.into(),
        });
    }

    pub fn submit(
        &self,
        id: RequestId,
        resume_text: impl Into<String>,
        job_description: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::Tailor {
            id,
            resume_text: resume_text.into(),
            job_description: job_description.into(),
        });
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckHealth);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn TailorClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Extract {
            id,
            file_name,
            path,
        } => {
            let source = FileSource::new(path);
            let result = extract(&file_name, &source).await;
            EngineEvent::ExtractionCompleted { id, result }
        }
        EngineCommand::Tailor {
            id,
            resume_text,
            job_description,
        } => {
            let result = client
                .submit_tailor_request(&resume_text, &job_description)
                .await;
            EngineEvent::TailorCompleted { id, result }
        }
        EngineCommand::CheckHealth => EngineEvent::HealthChecked(client.check_health().await),
    };
    let _ = event_tx.send(event);
}
