// src/views/mod.rs
//! Plain-text rendering of wizard state for the terminal

use chrono::Datelike;
use std::fmt::Write;

use crate::utils::preview;
use crate::wizard::{Step, WizardState};

pub mod results;

pub const TITLE: &str = "AI Resume Screening System";
pub const TAGLINE: &str = "Get AI-powered insights on how your resume matches job requirements";
pub const LOADING: &str = "Analyzing resume with AI...";

const DESCRIPTION_PREVIEW_CHARS: usize = 150;

pub fn header() -> String {
    format!("{}\n{}\n", TITLE, TAGLINE)
}

pub fn footer(year: i32) -> String {
    format!("(c) {} Resume Screening System\n", year)
}

pub fn error_banner(state: &WizardState) -> Option<String> {
    let message = state.error_message.as_ref()?;
    let mut banner = format!("ERROR: {}  [enter :dismiss to close]\n", message);
    if let Some(hint) = &state.error_hint {
        let _ = writeln!(banner, "  Hint: {}", hint);
    }
    Some(banner)
}

/// `[1 Enter Job Details] -- [2 Upload Resume] --  3 View Results `
pub fn progress_tracker(current: Step) -> String {
    Step::ALL
        .iter()
        .map(|step| {
            if *step <= current {
                format!("[{} {}]", step.number(), step.label())
            } else {
                format!(" {} {} ", step.number(), step.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" -- ")
}

pub fn job_form(state: &WizardState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Enter Job Details");
    let _ = writeln!(
        out,
        "Enter the job title and description to analyze your resume against"
    );
    if state.is_submitting {
        let _ = writeln!(out, "Processing...");
    }
    out
}

pub fn resume_upload(state: &WizardState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Upload Your Resume");
    let _ = writeln!(out, "Selected Job: {}", state.job_details.title);
    let _ = writeln!(
        out,
        "{}",
        preview(&state.job_details.description, DESCRIPTION_PREVIEW_CHARS)
    );
    let _ = writeln!(out);
    match &state.selected_resume {
        Some(file) => {
            let _ = writeln!(out, "Selected file: {}", file.name);
        }
        None => {
            let _ = writeln!(out, "No file selected.");
            let _ = writeln!(out, "Supported formats: PDF, DOC, DOCX, TXT (max 5MB)");
        }
    }
    if state.is_loading {
        let _ = writeln!(out, "{}", LOADING);
    }
    out
}

/// Everything shown for the current state, top to bottom.
pub fn screen(state: &WizardState) -> String {
    let mut out = header();
    out.push('\n');
    if let Some(banner) = error_banner(state) {
        out.push_str(&banner);
        out.push('\n');
    }
    out.push_str(&progress_tracker(state.step));
    out.push_str("\n\n");

    match state.step {
        Step::EnteringJob => out.push_str(&job_form(state)),
        Step::UploadingResume => out.push_str(&resume_upload(state)),
        Step::ViewingResults => {
            if let Some(result) = &state.analysis_result {
                out.push_str(&results::render(result, &state.job_details));
            }
        }
    }

    out.push('\n');
    out.push_str(&footer(chrono::Local::now().year()));
    out
}
