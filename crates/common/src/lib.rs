//! Telegrid Common Utilities
//!
//! Shared infrastructure for all telegrid crates:
//! - Error types
//! - Uniform sample grid and millisecond/second conversions
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
