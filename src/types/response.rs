use serde::{Deserialize, Serialize};

use crate::types::analysis::AnalysisResult;
use crate::types::job::JobId;

// ===== Backend Response Types =====

#[derive(Debug, Serialize, Deserialize)]
pub struct JobCreatedResponse {
    pub job_id: JobId,
    pub message: Option<String>,
}

/// Body of a 2xx `/api/analyze` reply.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeResponse {
    Completed(AnalysisResult),
    /// Transport succeeded but the payload carries an `error` string.
    Failed(String),
}

impl AnalyzeResponse {
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;

        let embedded = value
            .get("error")
            .and_then(|e| e.as_str())
            .filter(|e| !e.is_empty())
            .map(str::to_string);

        match embedded {
            Some(error) => Ok(Self::Failed(error)),
            None => Ok(Self::Completed(serde_json::from_value(value)?)),
        }
    }
}
