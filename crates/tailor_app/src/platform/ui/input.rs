use std::io::BufRead;
use std::path::{Path, PathBuf};

use tailor_core::Msg;

/// Largest resume file accepted for extraction.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Line that ends a multi-line paste.
pub const PASTE_TERMINATOR: &str = ".";

pub const HELP: &str = "\
Commands:
  resume <path>   load a resume file (.txt, .pdf, .docx)
  job <path>      load the job description from a text file
  paste-resume    paste resume text, end with a line containing only '.'
  paste-job       paste the job description, end with a line containing only '.'
  submit          tailor the resume to the job description
  clear           clear both fields and any result
  dismiss         close the error message
  health          check whether the backend is reachable
  show            print the current screen
  help            show this list
  quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadResume(PathBuf),
    LoadJob(PathBuf),
    PasteResume,
    PasteJob,
    Submit,
    Clear,
    Dismiss,
    Health,
    Show,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "resume" | "upload" => Command::LoadResume(required_path(word, rest)?),
        "job" => Command::LoadJob(required_path(word, rest)?),
        "paste-resume" => Command::PasteResume,
        "paste-job" => Command::PasteJob,
        "submit" | "tailor" => Command::Submit,
        "clear" => Command::Clear,
        "dismiss" => Command::Dismiss,
        "health" => Command::Health,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command '{other}'. Type 'help' for a list.")),
    };
    Ok(Some(command))
}

fn required_path(word: &str, rest: &str) -> Result<PathBuf, String> {
    let rest = rest.trim_matches(|c| c == '"' || c == '\'');
    if rest.is_empty() {
        Err(format!("Usage: {word} <path>"))
    } else {
        Ok(PathBuf::from(rest))
    }
}

/// Reads lines until the terminator (or end of input) and joins them with `\n`.
pub fn read_paste(reader: &mut impl BufRead) -> std::io::Result<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let content = line.trim_end_matches(['\n', '\r']);
        if content == PASTE_TERMINATOR {
            break;
        }
        lines.push(content.to_string());
    }
    Ok(lines.join("\n"))
}

/// Turns a resume path into a `FileChosen` message after the size check the
/// upload widget enforces.
pub fn choose_resume_file(path: &Path) -> Result<Msg, String> {
    let metadata =
        std::fs::metadata(path).map_err(|err| format!("Cannot open {}: {err}", path.display()))?;
    if !metadata.is_file() {
        return Err(format!("{} is not a file", path.display()));
    }
    if metadata.len() > MAX_UPLOAD_BYTES {
        return Err(format!(
            "{} is larger than 10MB. Please copy and paste the text instead.",
            path.display()
        ));
    }
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Msg::FileChosen {
        file_name,
        path: path.to_path_buf(),
    })
}

/// Loads a job description from a UTF-8 text file.
pub fn load_job_description(path: &Path) -> Result<Msg, String> {
    std::fs::read_to_string(path)
        .map(Msg::JobDescriptionEdited)
        .map_err(|err| format!("Cannot read {}: {err}", path.display()))
}
