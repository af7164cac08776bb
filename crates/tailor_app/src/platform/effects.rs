use tailor_core::{Effect, IngestFailure, IngestOutcome, Msg, TailorReport};
use tailor_engine::{
    EngineEvent, EngineHandle, ExtractionFailureKind, ExtractionResult, TailorResult,
    TailorSettings, TransportError,
};
use tailor_logging::{tailor_info, tailor_warn};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: TailorSettings) -> std::io::Result<Self> {
        tailor_info!(
            "Tailoring service at {} (timeout {:?})",
            settings.base_url,
            settings.request_timeout
        );
        Ok(Self {
            engine: EngineHandle::new(settings)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ExtractFile {
                    id,
                    file_name,
                    path,
                } => {
                    tailor_info!("ExtractFile id={} file={}", id, file_name);
                    self.engine.extract(id, file_name, path);
                }
                Effect::SubmitTailor {
                    ticket,
                    resume_text,
                    job_description,
                } => {
                    tailor_info!(
                        "SubmitTailor ticket={} resume_len={} job_len={}",
                        ticket,
                        resume_text.len(),
                        job_description.len()
                    );
                    self.engine.submit(ticket, resume_text, job_description);
                }
                Effect::CheckHealth => self.engine.check_health(),
            }
        }
    }

    /// Engine results that arrived since the last call, as core messages.
    pub fn drain(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ExtractionCompleted { id, result } => Msg::ExtractionFinished {
            id,
            outcome: map_extraction(result),
        },
        EngineEvent::TailorCompleted { id, result } => Msg::TailorCompleted {
            ticket: id,
            result: map_tailor(result),
        },
        EngineEvent::HealthChecked(result) => Msg::HealthReported(match result {
            Ok(health) => Ok(health.status),
            Err(err) => {
                tailor_warn!("Health check failed: {}", err);
                Err(err.message)
            }
        }),
    }
}

fn map_extraction(result: ExtractionResult) -> IngestOutcome {
    match result {
        ExtractionResult::Text(text) => IngestOutcome::Text(text),
        ExtractionResult::Failure(kind) => IngestOutcome::Failure(match kind {
            ExtractionFailureKind::UnsupportedFormat => IngestFailure::UnsupportedFormat,
            ExtractionFailureKind::ReadError => IngestFailure::ReadError,
            ExtractionFailureKind::ParseError => IngestFailure::ParseError,
        }),
    }
}

fn map_tailor(result: Result<TailorResult, TransportError>) -> Result<TailorReport, String> {
    result
        .map(|tailored| TailorReport {
            summary: tailored.summary,
            matched_skills: tailored.matched_skills,
            missing_skills: tailored.missing_skills,
            tailored_resume: tailored.tailored_resume,
        })
        .map_err(|err| err.message)
}
