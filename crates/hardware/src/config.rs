//! Configuration system for the decode and trap core.
//!
//! This module defines the build-time options the core consumes as read-only inputs. It provides:
//! 1. **Defaults:** Baseline option values (RV32IMC with user mode and debug support).
//! 2. **Structure:** A flat `CoreConfig` deserialized from JSON.
//! 3. **Derived queries:** Effective enables after force-disable overrides.
//!
//! Configuration is supplied as JSON (`CoreConfig::from_json`, `CoreConfig::from_file`) or
//! built with `CoreConfig::default()`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Default configuration constants for the core.
///
/// These values apply when a field is absent from the JSON document.
mod defaults {
    /// Full 32-entry register file.
    pub const E32: bool = false;

    /// Compressed ("C") extension enabled.
    pub const COMPRESSED: bool = true;

    /// Multiply/divide ("M") extension enabled.
    pub const MUL_DIV: bool = true;

    /// User mode implemented.
    pub const USER_MODE: bool = true;

    /// User-level interrupts ("N") not implemented.
    pub const USER_INTERRUPTS: bool = false;

    /// Debug mode implemented.
    pub const DEBUG_ENABLE: bool = true;
}

/// Core build options.
///
/// # Examples
///
/// ```
/// use rvcore::config::CoreConfig;
///
/// let config = CoreConfig::from_json(r#"{ "compressed_force_disable": true }"#).unwrap();
/// assert!(!config.compressed_enabled());
/// assert_eq!(config.instruction_alignment(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    /// Narrow register file (x0-x15); any use of x16-x31 is illegal.
    #[serde(default = "CoreConfig::default_e32")]
    pub e32: bool,

    /// Compressed instruction support.
    #[serde(default = "CoreConfig::default_compressed")]
    pub compressed: bool,

    /// Overrides `compressed`, disabling the extension.
    #[serde(default)]
    pub compressed_force_disable: bool,

    /// Multiply/divide instruction support.
    #[serde(default = "CoreConfig::default_mul_div")]
    pub mul_div: bool,

    /// User mode support; enables the CSR privilege check.
    #[serde(default = "CoreConfig::default_user_mode")]
    pub user_mode: bool,

    /// User-level trap CSRs and interrupt delegation.
    #[serde(default = "CoreConfig::default_user_interrupts")]
    pub user_interrupts: bool,

    /// Debug mode support.
    #[serde(default = "CoreConfig::default_debug_enable")]
    pub debug_enable: bool,

    /// Overrides `debug_enable`, disabling debug mode.
    #[serde(default)]
    pub debug_force_disable: bool,
}

impl CoreConfig {
    const fn default_e32() -> bool {
        defaults::E32
    }

    const fn default_compressed() -> bool {
        defaults::COMPRESSED
    }

    const fn default_mul_div() -> bool {
        defaults::MUL_DIV
    }

    const fn default_user_mode() -> bool {
        defaults::USER_MODE
    }

    const fn default_user_interrupts() -> bool {
        defaults::USER_INTERRUPTS
    }

    const fn default_debug_enable() -> bool {
        defaults::DEBUG_ENABLE
    }

    /// Whether 16-bit instructions decode at all.
    pub const fn compressed_enabled(&self) -> bool {
        self.compressed && !self.compressed_force_disable
    }

    /// Whether debug mode and the debug CSRs exist.
    pub const fn debug_enabled(&self) -> bool {
        self.debug_enable && !self.debug_force_disable
    }

    /// Required alignment in bytes of control-transfer targets.
    pub const fn instruction_alignment(&self) -> u32 {
        if self.compressed_enabled() { 2 } else { 4 }
    }

    /// Checks option combinations that cannot be built.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UserInterruptsWithoutUserMode` when user interrupts
    /// are requested without user mode.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.user_interrupts && !self.user_mode {
            return Err(ConfigError::UserInterruptsWithoutUserMode);
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON or unknown fields, and
    /// any error `validate` reports.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as `from_json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

impl Default for CoreConfig {
    /// RV32IMC with user mode and debug mode, no user interrupts.
    fn default() -> Self {
        Self {
            e32: defaults::E32,
            compressed: defaults::COMPRESSED,
            compressed_force_disable: false,
            mul_div: defaults::MUL_DIV,
            user_mode: defaults::USER_MODE,
            user_interrupts: defaults::USER_INTERRUPTS,
            debug_enable: defaults::DEBUG_ENABLE,
            debug_force_disable: false,
        }
    }
}
