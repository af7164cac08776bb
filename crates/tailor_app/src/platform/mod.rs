//! Terminal front end: reads commands, runs the core update loop, executes
//! effects through the engine and prints the view model.
mod app;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
