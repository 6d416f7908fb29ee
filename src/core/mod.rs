//! Core types, constants and the marker store

pub mod types;
pub mod constants;
pub mod store;

pub use types::*;
pub use constants::*;
pub use store::MarkerStore;
