//! Common types used throughout the core.
//!
//! Holds the architectural trap representation shared by the decoder and the
//! trap unit, and the error type returned when loading a configuration.

/// Error types and trap definitions.
pub mod error;

pub use error::{ConfigError, Trap};
