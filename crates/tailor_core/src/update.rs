use tailor_logging::{tailor_debug, tailor_info};

use crate::{validate, AppState, Effect, HealthState, Msg, RequestState, ValidationOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ResumeEdited(text) => {
            if !state.is_submitting() {
                state.set_resume_text(text);
            }
            Vec::new()
        }
        Msg::JobDescriptionEdited(text) => {
            if !state.is_submitting() {
                state.set_job_description(text);
            }
            Vec::new()
        }
        Msg::FileChosen { file_name, path } => {
            if state.is_submitting() {
                return (state, Vec::new());
            }
            let id = state.begin_ingest(file_name.clone());
            vec![Effect::ExtractFile {
                id,
                file_name,
                path,
            }]
        }
        Msg::ExtractionFinished { id, outcome } => {
            if !state.finish_ingest(id, outcome) {
                tailor_debug!("Dropping stale extraction result id={}", id);
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            // The submit control is disabled while a request is in flight; a
            // submit that gets through anyway is rejected, never queued.
            if state.is_submitting() {
                tailor_debug!("Ignoring submit while a request is in flight");
                return (state, Vec::new());
            }
            let draft = state.draft();
            match validate(&draft.resume_text, &draft.job_description) {
                ValidationOutcome::Invalid(reason) => {
                    state.set_request(RequestState::Failed(reason.to_string()));
                    Vec::new()
                }
                ValidationOutcome::Valid => {
                    let resume_text = draft.resume_text.clone();
                    let job_description = draft.job_description.clone();
                    let ticket = state.begin_submission();
                    tailor_info!("Submitting tailor request ticket={}", ticket);
                    vec![Effect::SubmitTailor {
                        ticket,
                        resume_text,
                        job_description,
                    }]
                }
            }
        }
        Msg::TailorCompleted { ticket, result } => {
            if !state.is_current_ticket(ticket) {
                tailor_debug!("Dropping stale tailor completion ticket={}", ticket);
                return (state, Vec::new());
            }
            let next = match result {
                Ok(report) => RequestState::Succeeded(report),
                Err(message) => RequestState::Failed(message),
            };
            state.set_request(next);
            Vec::new()
        }
        Msg::ClearClicked => {
            state.clear();
            Vec::new()
        }
        Msg::ErrorDismissed => {
            if matches!(state.request(), RequestState::Failed(_)) {
                state.set_request(RequestState::Idle);
            }
            Vec::new()
        }
        Msg::HealthRequested => {
            state.set_health(HealthState::Checking);
            vec![Effect::CheckHealth]
        }
        Msg::HealthReported(result) => {
            let health = match result {
                Ok(status) => HealthState::Healthy(status),
                Err(message) => HealthState::Unreachable(message),
            };
            state.set_health(health);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
