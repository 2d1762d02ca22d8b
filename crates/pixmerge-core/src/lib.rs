//! Pixmerge Core Library
//!
//! This crate provides configuration, error types, and constants that are shared
//! across all pixmerge components.

pub mod config;
pub mod constants;
pub mod error;

// Re-export commonly used types
pub use config::{BaseConfig, CombinerServiceConfig, Config};
pub use error::{AppError, ErrorMetadata, LogLevel};
