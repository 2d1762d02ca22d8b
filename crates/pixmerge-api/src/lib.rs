//! Pixmerge API Library
//!
//! This crate provides the HTTP handlers, error rendering, and application setup
//! for the image combination service.

mod api_doc;
mod handlers;
mod utils;

// Public modules
pub mod error;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use handlers::combine::CombineResponse;
pub use state::AppState;
