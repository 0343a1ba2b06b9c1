//! CLI command implementations.

pub mod level;
pub mod replay;
