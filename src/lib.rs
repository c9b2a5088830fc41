//! Client for a resume screening backend: a three-step wizard that saves a
//! job, uploads a resume for analysis and renders the scored result.

pub mod cli;
pub mod core;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;
pub mod validator;
pub mod views;
pub mod wizard;

pub use crate::core::{Backend, ConfigManager, ServiceClient};
pub use error::WizardError;
pub use types::{AnalysisResult, JobDetails, JobId, ResumeFile};
pub use wizard::{Step, Wizard, WizardCommand, WizardState};
