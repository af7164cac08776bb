use std::fmt::Write;

use tailor_core::{AppViewModel, FieldStats, RequestPanel, TailorReport, MIN_FIELD_CHARS};

const RULE: &str = "------------------------------------------------------------";

/// Text for the whole screen: status lines, then whichever request panel is live.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    if let Some(health) = &view.health_line {
        let _ = writeln!(out, "{health}");
    }
    let _ = writeln!(out, "Resume: {}", counter(view.resume));
    let _ = writeln!(out, "Job description: {}", counter(view.job_description));
    if let Some(message) = &view.ingest_message {
        let _ = writeln!(out, "Upload: {message}");
    }

    match &view.request {
        RequestPanel::Hidden => {}
        RequestPanel::Loading => {
            let _ = writeln!(out, "Tailoring resume... (submit is disabled until it finishes)");
        }
        RequestPanel::Error(message) => {
            let _ = writeln!(out, "Error: {message}");
            let _ = writeln!(out, "(type 'dismiss' to close)");
        }
        RequestPanel::Result(report) => render_report(&mut out, report),
    }

    out
}

fn counter(stats: FieldStats) -> String {
    if stats.needs_more {
        format!(
            "{} characters (minimum {} characters required)",
            stats.chars, MIN_FIELD_CHARS
        )
    } else {
        format!("{} characters", stats.chars)
    }
}

fn render_report(out: &mut String, report: &TailorReport) {
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Professional Summary");
    let _ = writeln!(out, "{}", report.summary);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Matched Skills ({}): {}",
        report.matched_skills.len(),
        skill_list(&report.matched_skills, "No matched skills found")
    );
    let _ = writeln!(
        out,
        "Skills to Develop ({}): {}",
        report.missing_skills.len(),
        skill_list(&report.missing_skills, "Great! No missing skills identified")
    );
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Tailored Resume");
    let _ = writeln!(out, "{}", report.tailored_resume);
    let _ = writeln!(out, "{RULE}");
}

fn skill_list(skills: &[String], empty: &str) -> String {
    if skills.is_empty() {
        empty.to_string()
    } else {
        skills.join(", ")
    }
}
