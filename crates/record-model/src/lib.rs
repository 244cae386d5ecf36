//! Telegrid Record Model
//!
//! Defines the core data contracts for telemetry resampling:
//! - **Records:** Schema-free field maps with a well-known millisecond timestamp
//! - **Series:** Per-participant, timestamp-ordered record sequences
//! - **Frames:** Output views reshaped from resampled records
//!
//! Non-numeric values (identifiers, enumerated states) are carried verbatim
//! as JSON values; only numbers are ever interpolated.

pub mod frame;
pub mod record;

pub use frame::*;
pub use record::*;
