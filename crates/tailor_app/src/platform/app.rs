use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use tailor_core::{update, AppState, IngestState, Msg, RequestState};
use tailor_engine::TailorSettings;
use tailor_logging::{tailor_info, tailor_warn};

use super::effects::EffectRunner;
use super::logging;
use super::ui::input::{self, Command, HELP};
use super::ui::render::render;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Everything the main loop reacts to, from the terminal or from itself.
enum AppEvent {
    Msg(Msg),
    Show,
    Help,
    Notice(String),
    Quit,
}

/// `tailor_app` starts the interactive prompt;
/// `tailor_app <resume-file> <job-file>` tailors once and prints the result.
pub fn run_app() -> anyhow::Result<()> {
    logging::initialize_from_env();

    let settings = TailorSettings::from_env().context("reading TAILOR_API_URL")?;
    let runner = EffectRunner::new(settings).context("starting engine runtime")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => run_interactive(&runner),
        [resume, job] => run_once(&runner, PathBuf::from(resume), PathBuf::from(job)),
        _ => bail!("usage: tailor_app [<resume-file> <job-description-file>]"),
    }
}

fn run_interactive(runner: &EffectRunner) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    spawn_stdin_reader(event_tx);

    println!("Resume Tailor. Type 'help' for commands.");
    let mut state = AppState::new();
    loop {
        for msg in runner.drain() {
            state = dispatch(state, msg, runner);
        }
        match event_rx.recv_timeout(POLL_INTERVAL) {
            Ok(AppEvent::Msg(msg)) => state = dispatch(state, msg, runner),
            Ok(AppEvent::Show) => print!("{}", render(&state.view())),
            Ok(AppEvent::Help) => println!("{HELP}"),
            Ok(AppEvent::Notice(text)) => println!("{text}"),
            Ok(AppEvent::Quit) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
        let _ = io::stdout().flush();
    }
    tailor_info!("Interactive session ended");
    Ok(())
}

/// Applies one message, hands its effects to the engine and reprints on change.
fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (mut state, effects) = update(state, msg);
    runner.enqueue(effects);
    if state.consume_dirty() {
        print!("{}", render(&state.view()));
    }
    state
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        let mut reader = stdin.lock();
        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) => {
                    tailor_warn!("stdin read failed: {}", err);
                    break;
                }
            }
            let event = match input::parse_command(&line) {
                Ok(Some(command)) => command_event(command, &mut reader),
                Ok(None) => continue,
                Err(message) => AppEvent::Notice(message),
            };
            let quit = matches!(event, AppEvent::Quit);
            if event_tx.send(event).is_err() || quit {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::Quit);
    });
}

fn command_event(command: Command, reader: &mut impl BufRead) -> AppEvent {
    let msg = match command {
        Command::LoadResume(path) => input::choose_resume_file(&path),
        Command::LoadJob(path) => input::load_job_description(&path),
        Command::PasteResume => paste(reader, "resume").map(Msg::ResumeEdited),
        Command::PasteJob => paste(reader, "job description").map(Msg::JobDescriptionEdited),
        Command::Submit => Ok(Msg::SubmitClicked),
        Command::Clear => Ok(Msg::ClearClicked),
        Command::Dismiss => Ok(Msg::ErrorDismissed),
        Command::Health => Ok(Msg::HealthRequested),
        Command::Show => return AppEvent::Show,
        Command::Help => return AppEvent::Help,
        Command::Quit => return AppEvent::Quit,
    };
    match msg {
        Ok(msg) => AppEvent::Msg(msg),
        Err(message) => AppEvent::Notice(message),
    }
}

fn paste(reader: &mut impl BufRead, what: &str) -> Result<String, String> {
    println!(
        "Paste the {what}; finish with a line containing only '{}'.",
        input::PASTE_TERMINATOR
    );
    input::read_paste(reader).map_err(|err| format!("Could not read pasted text: {err}"))
}

/// Loads both files, submits once extraction lands, and waits for the
/// request to reach a terminal state.
fn run_once(runner: &EffectRunner, resume: PathBuf, job: PathBuf) -> anyhow::Result<()> {
    let chosen = input::choose_resume_file(&resume).map_err(|message| anyhow!(message))?;
    let job_text = input::load_job_description(&job).map_err(|message| anyhow!(message))?;

    let mut state = AppState::new();
    for msg in [job_text, chosen] {
        let (next, effects) = update(state, msg);
        runner.enqueue(effects);
        state = next;
    }

    loop {
        let mut progressed = false;
        for msg in runner.drain() {
            progressed = true;
            let (next, effects) = update(state, msg);
            runner.enqueue(effects);
            state = next;

            if let IngestState::Failed { file_name, failure } = state.ingest() {
                bail!("{file_name}: {}", failure.user_message());
            }
            if matches!(state.ingest(), IngestState::Loaded { .. })
                && matches!(state.request(), RequestState::Idle)
            {
                let (next, effects) = update(state, Msg::SubmitClicked);
                runner.enqueue(effects);
                state = next;
            }
        }

        match state.request() {
            RequestState::Succeeded(_) => {
                print!("{}", render(&state.view()));
                return Ok(());
            }
            RequestState::Failed(message) => bail!("{message}"),
            RequestState::Idle | RequestState::Submitting { .. } => {}
        }
        if !progressed {
            thread::sleep(POLL_INTERVAL);
        }
    }
}
