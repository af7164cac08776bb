//! Tailor core: pure request-lifecycle state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod validation;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, HealthState, IngestFailure, IngestId, IngestOutcome, IngestState, RequestState,
    ResumeDraft, TailorReport, Ticket,
};
pub use update::update;
pub use validation::{validate, ValidationOutcome, MIN_FIELD_CHARS};
pub use view_model::{AppViewModel, FieldStats, RequestPanel};
