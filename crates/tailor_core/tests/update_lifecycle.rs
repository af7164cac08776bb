use std::sync::Once;

use pretty_assertions::assert_eq;
use tailor_core::{
    update, AppState, Effect, Msg, RequestPanel, RequestState, ResumeDraft, TailorReport, Ticket,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tailor_logging::initialize_for_tests);
}

const RESUME: &str = "Jane Doe\nSoftware Engineer\n\nExperience:\n- 5 years building Rust services";
const JOB: &str = "Senior Rust Developer. Must know tokio, async networking, and observability.";

fn with_draft(resume: &str, job: &str) -> AppState {
    let (state, _) = update(AppState::new(), Msg::ResumeEdited(resume.to_string()));
    let (state, _) = update(state, Msg::JobDescriptionEdited(job.to_string()));
    state
}

fn submit(state: AppState) -> (AppState, Ticket) {
    let (state, effects) = update(state, Msg::SubmitClicked);
    let ticket = match effects.as_slice() {
        [Effect::SubmitTailor { ticket, .. }] => *ticket,
        other => panic!("expected one SubmitTailor effect, got {other:?}"),
    };
    (state, ticket)
}

fn report() -> TailorReport {
    TailorReport {
        summary: "Seasoned Rust engineer".to_string(),
        matched_skills: vec!["Rust".to_string(), "tokio".to_string(), "async".to_string()],
        missing_skills: vec!["observability".to_string(), "Kubernetes".to_string()],
        tailored_resume: "Jane Doe\nSenior Rust Engineer".to_string(),
    }
}

#[test]
fn valid_submit_moves_idle_to_submitting_to_succeeded() {
    init_logging();
    let state = with_draft(RESUME, JOB);
    assert_eq!(state.request(), &RequestState::Idle);

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(
        effects,
        vec![Effect::SubmitTailor {
            ticket: 1,
            resume_text: RESUME.to_string(),
            job_description: JOB.to_string(),
        }]
    );
    assert_eq!(state.request(), &RequestState::Submitting { ticket: 1 });
    assert_eq!(state.view().request, RequestPanel::Loading);
    assert!(!state.view().submit_enabled);

    let (state, effects) = update(
        state,
        Msg::TailorCompleted {
            ticket: 1,
            result: Ok(report()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.request(), &RequestState::Succeeded(report()));

    // Skill lists come through untouched, in order.
    match state.view().request {
        RequestPanel::Result(shown) => {
            assert_eq!(shown.matched_skills, vec!["Rust", "tokio", "async"]);
            assert_eq!(shown.missing_skills, vec!["observability", "Kubernetes"]);
        }
        other => panic!("expected result panel, got {other:?}"),
    }
}

#[test]
fn invalid_submit_fails_without_network_effect() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(
        state.request(),
        &RequestState::Failed("Please enter your resume text".to_string())
    );

    let state = with_draft(RESUME, "too short");
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(
        state.view().request,
        RequestPanel::Error("Job description must be at least 50 characters long".to_string())
    );
}

#[test]
fn transport_failure_lands_in_failed() {
    init_logging();
    let (state, ticket) = submit(with_draft(RESUME, JOB));

    let (state, _) = update(
        state,
        Msg::TailorCompleted {
            ticket,
            result: Err(
                "Unable to connect to the server. Make sure the backend is running on http://localhost:8000"
                    .to_string(),
            ),
        },
    );

    match state.request() {
        RequestState::Failed(message) => {
            assert!(message.starts_with("Unable to connect to the server"))
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    // Draft survives a failed request so the user can retry.
    assert_eq!(state.draft().resume_text, RESUME);
}

#[test]
fn clear_while_submitting_discards_stale_completion() {
    init_logging();
    let (state, ticket) = submit(with_draft(RESUME, JOB));

    let (state, effects) = update(state, Msg::ClearClicked);
    assert!(effects.is_empty());
    assert_eq!(state.request(), &RequestState::Idle);

    let (state, effects) = update(
        state,
        Msg::TailorCompleted {
            ticket,
            result: Ok(report()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.request(), &RequestState::Idle);
    assert_eq!(state.draft(), &ResumeDraft::default());
}

#[test]
fn stale_completion_does_not_override_newer_request() {
    init_logging();
    let (state, first) = submit(with_draft(RESUME, JOB));
    let (state, _) = update(state, Msg::ClearClicked);
    let (state, second) = submit(with_draft_on(state, RESUME, JOB));
    assert!(second > first);

    let (state, _) = update(
        state,
        Msg::TailorCompleted {
            ticket: first,
            result: Err("old failure".to_string()),
        },
    );
    assert_eq!(state.request(), &RequestState::Submitting { ticket: second });

    let (state, _) = update(
        state,
        Msg::TailorCompleted {
            ticket: second,
            result: Ok(report()),
        },
    );
    assert_eq!(state.request(), &RequestState::Succeeded(report()));
}

fn with_draft_on(state: AppState, resume: &str, job: &str) -> AppState {
    let (state, _) = update(state, Msg::ResumeEdited(resume.to_string()));
    let (state, _) = update(state, Msg::JobDescriptionEdited(job.to_string()));
    state
}

#[test]
fn second_submit_while_submitting_is_ignored() {
    init_logging();
    let (mut state, ticket) = submit(with_draft(RESUME, JOB));
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(state.request(), &RequestState::Submitting { ticket });
    assert!(!state.consume_dirty());
}

#[test]
fn edits_are_rejected_while_submitting() {
    init_logging();
    let (state, _) = submit(with_draft(RESUME, JOB));

    let (state, _) = update(state, Msg::ResumeEdited("changed".to_string()));
    let (state, _) = update(state, Msg::JobDescriptionEdited("changed".to_string()));

    assert_eq!(state.draft().resume_text, RESUME);
    assert_eq!(state.draft().job_description, JOB);
    assert!(!state.view().inputs_enabled);
}

#[test]
fn resubmit_from_terminal_state_replaces_result() {
    init_logging();
    let (state, ticket) = submit(with_draft(RESUME, JOB));
    let (state, _) = update(
        state,
        Msg::TailorCompleted {
            ticket,
            result: Ok(report()),
        },
    );

    let (state, next_ticket) = submit(state);
    assert_eq!(next_ticket, ticket + 1);
    assert_eq!(state.view().request, RequestPanel::Loading);

    let replacement = TailorReport {
        summary: "Second pass".to_string(),
        ..TailorReport::default()
    };
    let (state, _) = update(
        state,
        Msg::TailorCompleted {
            ticket: next_ticket,
            result: Ok(replacement.clone()),
        },
    );
    assert_eq!(state.request(), &RequestState::Succeeded(replacement));
}

#[test]
fn dismiss_error_returns_to_idle_and_keeps_draft() {
    init_logging();
    let state = with_draft(RESUME, "short");
    let (state, _) = update(state, Msg::SubmitClicked);
    assert!(matches!(state.request(), RequestState::Failed(_)));

    let (state, effects) = update(state, Msg::ErrorDismissed);
    assert!(effects.is_empty());
    assert_eq!(state.request(), &RequestState::Idle);
    assert_eq!(state.draft().resume_text, RESUME);
    assert_eq!(state.draft().job_description, "short");
}

#[test]
fn dismiss_outside_failed_is_noop() {
    init_logging();
    let (state, ticket) = submit(with_draft(RESUME, JOB));
    let (state, _) = update(state, Msg::ErrorDismissed);
    assert_eq!(state.request(), &RequestState::Submitting { ticket });
}

#[test]
fn clear_twice_equals_clear_once() {
    init_logging();
    let state = with_draft(RESUME, "short");
    let (state, _) = update(state, Msg::SubmitClicked);

    let (once, _) = update(state, Msg::ClearClicked);
    let (mut twice, effects) = update(once.clone(), Msg::ClearClicked);

    assert!(effects.is_empty());
    assert_eq!(twice.request(), &RequestState::Idle);
    assert_eq!(twice.draft(), &ResumeDraft::default());
    assert_eq!(twice.view().request, once.view().request);
    assert_eq!(twice.draft(), once.draft());
    // The second clear changed nothing beyond what the first already flagged.
    assert!(twice.consume_dirty());
    let (mut thrice, _) = update(twice, Msg::ClearClicked);
    assert!(!thrice.consume_dirty());
}

#[test]
fn new_validation_failure_overwrites_previous_message() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::SubmitClicked);
    let state = with_draft_on(state, RESUME, "");
    let (state, _) = update(state, Msg::SubmitClicked);

    assert_eq!(
        state.view().request,
        RequestPanel::Error("Please enter the job description".to_string())
    );
}
