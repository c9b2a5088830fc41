// src/wizard/mod.rs
//! Three-step screening wizard: job details, resume upload, results

pub mod controller;
pub mod state;


pub use controller::{Completion, InFlight, Wizard, WizardCommand, ANALYSIS_FAILED, SAVE_JOB_FAILED};
pub use state::{Step, WizardState};
