// src/validator.rs
//! Client-side checks run before anything is sent to the backend

use thiserror::Error;
use tracing::warn;

use crate::types::job::{JobDetails, ResumeFile, MIME_DOC, MIME_DOCX, MIME_PDF, MIME_TEXT};
use crate::utils::format_size;

pub const ACCEPTED_MIME_TYPES: [&str; 4] = [MIME_PDF, MIME_DOC, MIME_DOCX, MIME_TEXT];

/// 5 MiB
pub const MAX_RESUME_SIZE: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub error_type: ValidationErrorType,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorType {
    EmptyJobFields,
    WrongFormat,
    TooLarge,
    NotSelected,
}

impl ValidationErrorType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyJobFields => "JOB_FIELDS_EMPTY",
            Self::WrongFormat => "RESUME_WRONG_FORMAT",
            Self::TooLarge => "RESUME_TOO_LARGE",
            Self::NotSelected => "RESUME_NOT_SELECTED",
        }
    }
}

impl ValidationError {
    fn new(error_type: ValidationErrorType, message: &str, suggestion: &str) -> Self {
        Self {
            error_type,
            message: message.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    pub fn empty_job_fields() -> Self {
        Self::new(
            ValidationErrorType::EmptyJobFields,
            "Please enter both job title and description.",
            "Fill in the job title and paste the full job description",
        )
    }

    pub fn wrong_format() -> Self {
        Self::new(
            ValidationErrorType::WrongFormat,
            "Please upload a resume in PDF, DOC, DOCX, or TXT format.",
            "Convert your resume to PDF, Word or plain text",
        )
    }

    pub fn too_large() -> Self {
        Self::new(
            ValidationErrorType::TooLarge,
            "File size should not exceed 5MB.",
            "Compress your resume or remove embedded images",
        )
    }

    pub fn not_selected() -> Self {
        Self::new(
            ValidationErrorType::NotSelected,
            "Please select a resume file to upload.",
            "Choose a PDF, DOC, DOCX or TXT file",
        )
    }

    pub fn code(&self) -> &'static str {
        self.error_type.code()
    }
}

/// Both fields must contain something other than whitespace.
pub fn validate_job_details(title: &str, description: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() || description.trim().is_empty() {
        warn!(
            title_empty = title.trim().is_empty(),
            description_empty = description.trim().is_empty(),
            "Job details rejected"
        );
        return Err(ValidationError::empty_job_fields());
    }
    Ok(())
}

pub fn validate_job(details: &JobDetails) -> Result<(), ValidationError> {
    validate_job_details(&details.title, &details.description)
}

/// Type is checked first; a wrong type is reported even when the file is also too large.
pub fn validate_resume_file(file: &ResumeFile) -> Result<(), ValidationError> {
    if !ACCEPTED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        warn!(file = %file.name, mime_type = %file.mime_type, "Resume rejected: unsupported type");
        return Err(ValidationError::wrong_format());
    }

    if file.size_bytes > MAX_RESUME_SIZE {
        warn!(
            file = %file.name,
            size = %format_size(file.size_bytes),
            "Resume rejected: file too large"
        );
        return Err(ValidationError::too_large());
    }

    Ok(())
}
