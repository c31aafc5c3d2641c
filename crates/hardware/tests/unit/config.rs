//! Core Configuration.
//!
//! Covers the JSON loaders, default values, validation and the derived
//! enable queries.

use std::io::Write;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

use crate::common::{rv32e, rv32i_machine_only, rv32imc};
use rvcore::common::error::ConfigError;
use rvcore::config::CoreConfig;

#[test]
fn defaults_are_rv32imc_with_user_and_debug() {
    let config = CoreConfig::default();
    assert!(!config.e32);
    assert!(config.compressed_enabled());
    assert!(config.mul_div);
    assert!(config.user_mode);
    assert!(!config.user_interrupts);
    assert!(config.debug_enabled());
}

#[test]
fn partial_document_keeps_remaining_defaults() {
    let config = CoreConfig::from_json(r#"{ "e32": true, "mul_div": false }"#).unwrap();
    assert_eq!(
        config,
        CoreConfig {
            e32: true,
            mul_div: false,
            ..CoreConfig::default()
        }
    );
}

#[rstest]
#[case::unknown_field(r#"{ "vector": true }"#)]
#[case::wrong_type(r#"{ "e32": "yes" }"#)]
#[case::not_json("e32 = true")]
fn malformed_documents_are_rejected(#[case] text: &str) {
    assert!(matches!(CoreConfig::from_json(text), Err(ConfigError::Parse(_))));
}

#[test]
fn user_interrupts_require_user_mode() {
    let err = CoreConfig::from_json(r#"{ "user_mode": false, "user_interrupts": true }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::UserInterruptsWithoutUserMode));
    assert_eq!(err.to_string(), "user_interrupts requires user_mode");

    let ok = CoreConfig::from_json(r#"{ "user_interrupts": true }"#).unwrap();
    assert!(ok.validate().is_ok());
}

#[test]
fn loads_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "compressed": false, "debug_force_disable": true }}"#).unwrap();

    let config = CoreConfig::from_file(file.path()).unwrap();
    assert!(!config.compressed_enabled());
    assert!(!config.debug_enabled());
    assert!(config.debug_enable);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CoreConfig::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[rstest]
#[case::rv32imc(rv32imc(), 2)]
#[case::rv32e(rv32e(), 2)]
#[case::no_compressed(rv32i_machine_only(), 4)]
#[case::force_disabled(CoreConfig { compressed_force_disable: true, ..rv32imc() }, 4)]
fn target_alignment_follows_compressed(#[case] config: CoreConfig, #[case] alignment: u32) {
    assert_eq!(config.instruction_alignment(), alignment);
}

#[test]
fn config_serializes_every_field() {
    let json = serde_json::to_value(CoreConfig::default()).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 8);
    assert_eq!(object["compressed"], serde_json::Value::Bool(true));
}
