//! Privilege Mode Tests.

use rstest::rstest;

use rvcore::core::arch::mode::PrivilegeMode;

#[test]
fn modes_order_by_privilege() {
    assert!(PrivilegeMode::User < PrivilegeMode::Supervisor);
    assert!(PrivilegeMode::Supervisor < PrivilegeMode::Machine);
    assert!(PrivilegeMode::Machine < PrivilegeMode::Debug);
}

#[rstest]
#[case(0, PrivilegeMode::User)]
#[case(1, PrivilegeMode::Supervisor)]
#[case(3, PrivilegeMode::Machine)]
#[case(7, PrivilegeMode::Debug)]
fn encodings_round_trip(#[case] raw: u8, #[case] mode: PrivilegeMode) {
    assert_eq!(PrivilegeMode::from_u8(raw), mode);
    assert_eq!(mode.to_u8(), raw);
}

/// The reserved encoding 2 falls back to Machine.
#[test]
fn unknown_encoding_is_machine() {
    assert_eq!(PrivilegeMode::from_u8(2), PrivilegeMode::Machine);
}

#[rstest]
#[case("u", Some(PrivilegeMode::User))]
#[case("M", Some(PrivilegeMode::Machine))]
#[case("debug", Some(PrivilegeMode::Debug))]
#[case("Supervisor", Some(PrivilegeMode::Supervisor))]
#[case("h", None)]
#[case("", None)]
fn parse_accepts_letters_and_names(#[case] text: &str, #[case] expected: Option<PrivilegeMode>) {
    assert_eq!(PrivilegeMode::parse(text), expected);
}

#[test]
fn display_uses_name() {
    assert_eq!(PrivilegeMode::Machine.to_string(), "Machine");
    assert_eq!(PrivilegeMode::User.to_string(), PrivilegeMode::User.name());
}
