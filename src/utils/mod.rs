//! Configuration

pub mod config;

pub use config::{EngineConfig, ValidationResult};
