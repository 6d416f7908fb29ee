//! Error types

pub mod error;

pub use error::{ConfigError, EngineError, EngineResult, PersistenceError};
