//! PDF Search Core Library
//!
//! Foundational utilities shared by the PDF search crates:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Environment configuration

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
