//! Infrastructure layer module
//!
//! This module contains the infrastructure adapters:
//! - In-memory implementations of the repository and ledger ports
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod memory;
