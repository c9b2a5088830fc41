// src/types/mod.rs
//! Data exchanged between the wizard, the validator and the analysis backend

pub mod analysis;
pub mod job;
pub mod response;

pub use analysis::{AnalysisResult, EducationEntry, ExperienceEntry, ExtractedInfo, MatchLevel};
pub use job::{JobDetails, JobId, ResumeFile};
pub use response::{AnalyzeResponse, JobCreatedResponse};
