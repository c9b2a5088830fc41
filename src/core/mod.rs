// src/core/mod.rs
//! Backend access and configuration shared by the library and the binary

pub mod config_manager;
pub mod service_client;

pub use config_manager::{ClientConfig, ConfigManager};
pub use service_client::{Backend, ServiceClient};
