// src/wizard/controller.rs
//! The only place wizard state is mutated

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

use crate::core::Backend;
use crate::error::WizardError;
use crate::types::{AnalysisResult, JobDetails, JobId, ResumeFile};
use crate::validator::{validate_job_details, validate_resume_file, ValidationError};

use super::state::{Step, WizardState};

pub const SAVE_JOB_FAILED: &str = "Failed to save job details. Please try again.";
pub const ANALYSIS_FAILED: &str = "Failed to analyze resume. Please try again.";

/// User intent forwarded by a view.
#[derive(Debug, Clone)]
pub enum WizardCommand {
    SubmitJob { title: String, description: String },
    SelectResume(ResumeFile),
    RemoveResume,
    SubmitResume,
    DismissError,
    Restart,
}

/// Outcome of a backend request, applied with [`Wizard::complete`].
#[derive(Debug)]
pub enum Completion {
    JobSaved {
        details: JobDetails,
        outcome: Result<JobId, WizardError>,
    },
    Analyzed {
        job_id: JobId,
        outcome: Result<AnalysisResult, WizardError>,
    },
}

/// A dispatched backend request. It owns everything it needs, so the wizard
/// stays free to take commands while it runs.
pub type InFlight = Pin<Box<dyn Future<Output = Completion> + Send>>;

enum Event {
    Completed(Completion),
    Command(Option<WizardCommand>),
}

pub struct Wizard<B> {
    backend: Arc<B>,
    state: WizardState,
    verbose_errors: bool,
    session_id: Uuid,
    last_error: Option<WizardError>,
    updates: watch::Sender<WizardState>,
}

impl<B: Backend + 'static> Wizard<B> {
    pub fn new(backend: B) -> Self {
        let (updates, _) = watch::channel(WizardState::default());
        Self {
            backend: Arc::new(backend),
            state: WizardState::default(),
            verbose_errors: false,
            session_id: Uuid::new_v4(),
            last_error: None,
            updates,
        }
    }

    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Most recent failure, kept for callers that need more than the banner text.
    pub fn last_error(&self) -> Option<&WizardError> {
        self.last_error.as_ref()
    }

    /// Receives a snapshot after every mutation, including the busy flags
    /// being raised before a request is awaited.
    pub fn subscribe(&self) -> watch::Receiver<WizardState> {
        self.updates.subscribe()
    }

    /// Apply one command and wait for any request it dispatches.
    pub async fn handle(&mut self, command: WizardCommand) -> &WizardState {
        if let Some(request) = self.accept(command) {
            let completion = request.await;
            self.complete(completion);
        }
        &self.state
    }

    /// Consume commands until every sender is dropped, then hand back the final state.
    ///
    /// Commands keep flowing while a request is in flight: a dismissal lands
    /// straight away, a second submission is dropped by the busy gate.
    pub async fn run(mut self, mut commands: mpsc::Receiver<WizardCommand>) -> WizardState {
        let mut in_flight: Option<InFlight> = None;

        loop {
            let event = match in_flight.as_mut() {
                Some(request) => tokio::select! {
                    completion = request => Event::Completed(completion),
                    command = commands.recv() => Event::Command(command),
                },
                None => Event::Command(commands.recv().await),
            };

            match event {
                Event::Completed(completion) => {
                    in_flight = None;
                    self.complete(completion);
                }
                Event::Command(Some(command)) => {
                    // the busy flags keep this to at most one request at a time
                    if let Some(request) = self.accept(command) {
                        in_flight = Some(request);
                    }
                }
                Event::Command(None) => {
                    if let Some(request) = in_flight.take() {
                        let completion = request.await;
                        self.complete(completion);
                    }
                    break;
                }
            }
        }

        self.state
    }

    /// Select a file and, if it passes validation, submit it.
    pub async fn upload_resume(&mut self, file: ResumeFile) -> &WizardState {
        self.handle(WizardCommand::SelectResume(file)).await;
        if self.state.selected_resume.is_some() {
            self.handle(WizardCommand::SubmitResume).await;
        }
        &self.state
    }

    /// Apply the synchronous part of a command. Returns the backend request
    /// it dispatched, if any, with the matching busy flag already raised.
    pub fn accept(&mut self, command: WizardCommand) -> Option<InFlight> {
        let span = self.span();
        let _entered = span.enter();

        match command {
            WizardCommand::SubmitJob { title, description } => {
                return self.submit_job(title, description);
            }
            WizardCommand::SelectResume(file) => self.select_resume(file),
            WizardCommand::RemoveResume => {
                if self.state.step != Step::UploadingResume || self.state.is_loading {
                    debug!("Ignoring resume removal outside of an idle upload step");
                } else if self.state.selected_resume.take().is_some() {
                    self.publish();
                }
            }
            WizardCommand::SubmitResume => return self.submit_resume(),
            WizardCommand::DismissError => {
                self.state.error_message = None;
                self.state.error_hint = None;
                self.publish();
            }
            WizardCommand::Restart => self.restart(),
        }
        None
    }

    /// Clear the busy flag raised by [`Wizard::accept`] and apply the outcome.
    pub fn complete(&mut self, completion: Completion) {
        let span = self.span();
        let _entered = span.enter();

        match completion {
            Completion::JobSaved { details, outcome } => {
                self.state.is_submitting = false;
                match outcome {
                    Ok(job_id) => {
                        info!(job_id = %job_id, "Job saved, moving to resume upload");
                        self.state.job_id = Some(job_id);
                        self.state.job_details = details;
                        self.state.step = Step::UploadingResume;
                        self.publish();
                    }
                    Err(e) => self.fail(e, SAVE_JOB_FAILED),
                }
            }
            Completion::Analyzed { job_id, outcome } => {
                self.state.is_loading = false;
                match outcome {
                    Ok(result) => {
                        info!(job_id = %job_id, score = result.score, "Showing analysis results");
                        self.state.analysis_result = Some(result);
                        self.state.step = Step::ViewingResults;
                        self.publish();
                    }
                    Err(e) => self.fail(e, ANALYSIS_FAILED),
                }
            }
        }
    }

    fn span(&self) -> Span {
        info_span!("wizard", session = %self.session_id, step = self.state.step.number())
    }

    fn submit_job(&mut self, title: String, description: String) -> Option<InFlight> {
        if self.state.step != Step::EnteringJob || self.state.is_submitting {
            debug!("Ignoring job submission outside of an idle job form");
            return None;
        }

        if let Err(e) = validate_job_details(&title, &description) {
            self.fail(e.into(), SAVE_JOB_FAILED);
            return None;
        }

        let details = JobDetails::new(title, description);

        self.state.is_submitting = true;
        self.publish();

        let backend = Arc::clone(&self.backend);
        let request = async move {
            let outcome = backend.submit_job(&details).await;
            Completion::JobSaved { details, outcome }
        };
        Some(Box::pin(request.instrument(Span::current())))
    }

    fn select_resume(&mut self, file: ResumeFile) {
        if self.state.step != Step::UploadingResume || self.state.is_loading {
            debug!("Ignoring resume selection outside of an idle upload step");
            return;
        }

        match validate_resume_file(&file) {
            Ok(()) => {
                debug!(file = ?file, "Resume selected");
                self.state.selected_resume = Some(file);
                self.publish();
            }
            Err(e) => {
                self.state.selected_resume = None;
                self.fail(e.into(), ANALYSIS_FAILED);
            }
        }
    }

    fn submit_resume(&mut self) -> Option<InFlight> {
        if self.state.step != Step::UploadingResume || self.state.is_loading {
            debug!("Ignoring resume submission outside of an idle upload step");
            return None;
        }

        let Some(file) = self.state.selected_resume.clone() else {
            self.fail(ValidationError::not_selected().into(), ANALYSIS_FAILED);
            return None;
        };

        let Some(job_id) = self.state.job_id.clone() else {
            warn!("Upload step reached without a job id");
            self.fail(
                WizardError::Transport("no job id for this session".to_string()),
                ANALYSIS_FAILED,
            );
            return None;
        };

        self.state.is_loading = true;
        self.publish();

        let backend = Arc::clone(&self.backend);
        let request = async move {
            let outcome = backend.submit_resume_for_analysis(&job_id, &file).await;
            Completion::Analyzed { job_id, outcome }
        };
        Some(Box::pin(request.instrument(Span::current())))
    }

    fn restart(&mut self) {
        if self.state.step != Step::ViewingResults {
            debug!("Ignoring restart before results are shown");
            return;
        }
        info!("Starting a new analysis");
        self.state = WizardState::default();
        self.last_error = None;
        self.publish();
    }

    fn fail(&mut self, error: WizardError, generic: &str) {
        warn!(code = error.code(), "Wizard step failed: {}", error);
        self.state.error_message = Some(error.user_message(generic, self.verbose_errors));
        self.state.error_hint = error.hint().map(str::to_string);
        self.last_error = Some(error);
        self.publish();
    }

    fn publish(&self) {
        self.updates.send_replace(self.state.clone());
    }
}
