// src/views/results.rs
//! Step 3: the analysis report

use std::fmt::Write;

use crate::types::{AnalysisResult, JobDetails};

const GAUGE_WIDTH: usize = 20;

pub const NO_STRENGTHS: &str = "No key strengths identified";
pub const NO_GAPS: &str = "No significant gaps identified";
pub const NO_EXPERIENCE: &str = "No experience data extracted";
pub const NO_EDUCATION: &str = "No education data extracted";
pub const NO_SKILLS: &str = "No skills data extracted";

/// `[##########----------] 50 out of 100`
pub fn score_gauge(score: u8) -> String {
    let score = score.min(100);
    let filled = (score as usize * GAUGE_WIDTH + 50) / 100;
    format!(
        "[{}{}] {} out of 100",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled),
        score
    )
}

fn bullet_list(out: &mut String, items: &[String], marker: &str, empty: &str) {
    if items.is_empty() {
        let _ = writeln!(out, "  ({})", empty);
    } else {
        for item in items {
            let _ = writeln!(out, "  {} {}", marker, item);
        }
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

pub fn render(result: &AnalysisResult, job: &JobDetails) -> String {
    let mut out = String::new();
    let info = &result.extracted_info;

    let _ = writeln!(out, "Resume Analysis Results");
    let _ = writeln!(out, "=======================");
    let _ = writeln!(out, "{}", score_gauge(result.score));
    let _ = writeln!(out, "{}", result.match_level().label());
    let _ = writeln!(out);
    let _ = writeln!(out, "Job: {}", job.title);
    if !result.summary.is_empty() {
        let _ = writeln!(out, "{}", result.summary);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Key Strengths");
    bullet_list(&mut out, &result.strengths, "+", NO_STRENGTHS);

    let _ = writeln!(out);
    let _ = writeln!(out, "Areas for Improvement");
    bullet_list(&mut out, &result.gaps, "!", NO_GAPS);

    let _ = writeln!(out);
    let _ = writeln!(out, "Information Extracted from Resume");
    if let Some(name) = present(&info.name) {
        let _ = writeln!(out, "  Name: {}", name);
    }
    if let Some(email) = present(&info.email) {
        let _ = writeln!(out, "  Email: {}", email);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Professional Experience");
    if info.experience.is_empty() {
        let _ = writeln!(out, "  ({})", NO_EXPERIENCE);
    }
    for exp in &info.experience {
        let _ = writeln!(out, "  - {}", exp.company);
        let _ = writeln!(out, "    {}", exp.title);
        if let Some(duration) = &exp.duration {
            let _ = writeln!(out, "    {}", duration);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Education");
    if info.education.is_empty() {
        let _ = writeln!(out, "  ({})", NO_EDUCATION);
    }
    for edu in &info.education {
        let _ = writeln!(out, "  - {}", edu.institution);
        let _ = writeln!(out, "    {}", edu.degree);
        if let Some(field) = &edu.field {
            let _ = writeln!(out, "    {}", field);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Skills");
    if info.skills.is_empty() {
        let _ = writeln!(out, "  ({})", NO_SKILLS);
    } else {
        let _ = writeln!(out, "  {}", info.skills.join(", "));
    }

    out
}
