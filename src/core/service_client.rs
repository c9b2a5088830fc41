// src/core/service_client.rs
//! HTTP client for the resume analysis backend

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{error, info, trace};

use crate::error::WizardError;
use crate::types::{
    job::{JobDetails, JobId, ResumeFile},
    response::{AnalyzeResponse, JobCreatedResponse},
    AnalysisResult,
};

pub const JOB_ENDPOINT: &str = "/api/job";
pub const ANALYZE_ENDPOINT: &str = "/api/analyze";

/// The two calls the wizard makes. Each call issues exactly one request.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn submit_job(&self, details: &JobDetails) -> Result<JobId, WizardError>;

    async fn submit_resume_for_analysis(
        &self,
        job_id: &JobId,
        file: &ResumeFile,
    ) -> Result<AnalysisResult, WizardError>;
}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// No timeout or retry policy is layered on top of reqwest's defaults.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Reads the body of a response, turning non-2xx statuses into transport errors.
    async fn success_body(
        &self,
        response: reqwest::Response,
        what: &str,
    ) -> Result<String, WizardError> {
        let status = response.status();
        trace!("{} response status: {}", what, status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("{} failed with status {}: {}", what, status, error_text);
            return Err(WizardError::Transport(format!(
                "{} returned status {}",
                what, status
            )));
        }

        response.text().await.map_err(|e| {
            error!("Failed to read {} response: {}", what, e);
            WizardError::Transport(format!("Failed to read {} response: {}", what, e))
        })
    }
}

#[async_trait]
impl Backend for ServiceClient {
    async fn submit_job(&self, details: &JobDetails) -> Result<JobId, WizardError> {
        let url = self.url(JOB_ENDPOINT);
        info!(title = %details.title, "Saving job details: {}", url);

        let response = self
            .client
            .post(&url)
            .json(details)
            .send()
            .await
            .map_err(|e| {
                error!("Job request failed: {}", e);
                WizardError::Transport(format!("Failed to POST to {}: {}", url, e))
            })?;

        let body = self.success_body(response, "Job submission").await?;

        let created: JobCreatedResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Unexpected job response: {}. Raw response: {}", e, body);
            WizardError::Transport(format!("Failed to parse job response: {}", e))
        })?;

        if let Some(message) = &created.message {
            info!(job_id = %created.job_id, "Backend: {}", message);
        }

        Ok(created.job_id)
    }

    async fn submit_resume_for_analysis(
        &self,
        job_id: &JobId,
        file: &ResumeFile,
    ) -> Result<AnalysisResult, WizardError> {
        let url = self.url(ANALYZE_ENDPOINT);

        let part = Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| WizardError::Transport(format!("Failed to create multipart: {}", e)))?;

        let form = Form::new()
            .part("resume", part)
            .text("job_id", job_id.to_string());

        info!(job_id = %job_id, file = %file.name, "Calling resume analysis service: {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Analyze request failed: {}", e);
                WizardError::Transport(format!("Failed to POST to {}: {}", url, e))
            })?;

        let body = self.success_body(response, "Resume analysis").await?;

        match AnalyzeResponse::from_json(&body) {
            Ok(AnalyzeResponse::Completed(result)) => {
                info!(job_id = %job_id, score = result.score, "Analysis completed");
                Ok(result)
            }
            Ok(AnalyzeResponse::Failed(message)) => {
                error!(job_id = %job_id, "Analysis service reported an error: {}", message);
                Err(WizardError::Application(message))
            }
            Err(e) => {
                error!("Unexpected analysis response: {}. Raw response: {}", e, body);
                Err(WizardError::Transport(format!(
                    "Failed to parse analysis response: {}",
                    e
                )))
            }
        }
    }
}
