//! Domain layer for the Questlog progression engine
//!
//! This module contains the data model, the leveling curve and the port
//! traits the engine's external collaborators implement.

pub mod error;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use error::{DomainError, DomainResult};
