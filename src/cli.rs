// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, info, warn};

use crate::core::Backend;
use crate::types::ResumeFile;
use crate::views;
use crate::wizard::{Step, Wizard, WizardCommand, WizardState};

#[derive(Parser)]
#[command(name = "resume-screen")]
#[command(about = "Screen a resume against a job description using the analysis backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Backend base URL, overrides config.yaml and RESUME_SCREEN_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Configuration file (defaults to ./config.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Walk through the three steps interactively (default)
    Wizard,
    /// Run all three steps at once and print the results
    Analyze {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        resume: PathBuf,
        /// Print the raw analysis as JSON
        #[arg(long)]
        json: bool,
    },
}

const DISMISS: &str = ":dismiss";
const REMOVE: &str = ":remove";
const QUIT: &str = ":quit";

const BUSY_INPUT_IGNORED: &str = "Still working, input ignored (:dismiss and :quit still apply).";

fn prompt(step: Step) -> &'static str {
    match step {
        Step::EnteringJob => "Job title: ",
        Step::UploadingResume => {
            "Resume path (empty line submits the selected file, :remove, :dismiss, :quit): "
        }
        Step::ViewingResults => "Press enter to start a new analysis (:quit to exit): ",
    }
}

/// Interactive driver: renders the current screen, reads one answer, forwards it as a command.
pub async fn run_interactive<B, R, W>(wizard: &mut Wizard<B>, input: R, out: &mut W) -> Result<()>
where
    B: Backend + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        let step = wizard.state().step;
        write!(out, "{}\n{}", views::screen(wizard.state()), prompt(step))?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            QUIT => break,
            DISMISS => {
                wizard.handle(WizardCommand::DismissError).await;
                continue;
            }
            _ => {}
        }

        let quit = match step {
            Step::EnteringJob => {
                writeln!(out, "Job description (finish with an empty line):")?;
                out.flush()?;
                let mut description = Vec::new();
                while let Some(next) = lines.next_line().await? {
                    if next.trim().is_empty() {
                        break;
                    }
                    description.push(next);
                }
                let command = WizardCommand::SubmitJob {
                    title: line,
                    description: description.join("\n"),
                };
                drive(wizard, command, &mut lines, out).await?
            }
            Step::UploadingResume => match line.trim() {
                "" => drive(wizard, WizardCommand::SubmitResume, &mut lines, out).await?,
                REMOVE => drive(wizard, WizardCommand::RemoveResume, &mut lines, out).await?,
                path => match ResumeFile::load(Path::new(path)).await {
                    Ok(file) => {
                        wizard.accept(WizardCommand::SelectResume(file));
                        if wizard.state().selected_resume.is_some() {
                            drive(wizard, WizardCommand::SubmitResume, &mut lines, out).await?
                        } else {
                            false
                        }
                    }
                    Err(e) => {
                        warn!("Could not load resume: {:#}", e);
                        writeln!(out, "Could not read {}: {:#}", path, e)?;
                        false
                    }
                },
            },
            Step::ViewingResults => drive(wizard, WizardCommand::Restart, &mut lines, out).await?,
        };

        if quit {
            break;
        }
    }

    Ok(())
}

/// Forward one command. While the request it dispatches is in flight, input
/// keeps being read: `:dismiss` applies at once, `:quit` ends the session once
/// the request settles, anything else is dropped. Returns whether to quit.
async fn drive<B, R, W>(
    wizard: &mut Wizard<B>,
    command: WizardCommand,
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<bool>
where
    B: Backend + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let Some(mut request) = wizard.accept(command) else {
        return Ok(false);
    };
    writeln!(out, "{}", busy_line(wizard.state()))?;
    out.flush()?;

    let mut quit = false;
    let mut input_open = true;
    loop {
        tokio::select! {
            biased;
            completion = &mut request => {
                wizard.complete(completion);
                return Ok(quit);
            }
            line = lines.next_line(), if input_open => match line? {
                None => input_open = false,
                Some(line) => match line.trim() {
                    DISMISS => {
                        wizard.accept(WizardCommand::DismissError);
                    }
                    QUIT => quit = true,
                    other => {
                        debug!(input = other, "Dropping input while a request is in flight");
                        writeln!(out, "{}", BUSY_INPUT_IGNORED)?;
                    }
                },
            },
        }
    }
}

fn busy_line(state: &WizardState) -> &'static str {
    if state.is_loading {
        views::LOADING
    } else {
        "Processing..."
    }
}

/// One-shot driver. Fails with the banner text if the wizard stops short of the results.
pub async fn run_analyze<B, W>(
    wizard: &mut Wizard<B>,
    title: String,
    description: String,
    resume: &Path,
    json: bool,
    out: &mut W,
) -> Result<()>
where
    B: Backend + 'static,
    W: Write,
{
    wizard
        .handle(WizardCommand::SubmitJob { title, description })
        .await;
    ensure_step(wizard.state(), Step::UploadingResume)?;

    let file = ResumeFile::load(resume).await?;
    wizard.upload_resume(file).await;
    ensure_step(wizard.state(), Step::ViewingResults)?;

    let state = wizard.state();
    let result = state
        .analysis_result
        .as_ref()
        .context("Results step reached without an analysis")?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
    } else {
        write!(out, "{}", views::results::render(result, &state.job_details))?;
    }

    info!(score = result.score, "Analysis printed");
    Ok(())
}

fn ensure_step(state: &WizardState, expected: Step) -> Result<()> {
    if state.step == expected {
        return Ok(());
    }
    let message = state
        .error_message
        .clone()
        .unwrap_or_else(|| format!("Wizard stopped at step {}", state.step));
    anyhow::bail!(message)
}
