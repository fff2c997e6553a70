//! Inclusion policy tests.

use wirestruct_integration_test::Account;
use wirestruct_serialize::{
    Configuration, Struct, StructWriter, Visibility, to_vec,
};

fn with_policy(policy: Visibility) -> Configuration {
    Configuration::builder().policy(policy).build()
}

#[test]
fn inferred_qualifiers() {
    let account = Account::new(1, 2, 3);
    let qualifiers: Vec<_> = account
        .layout()
        .fields()
        .iter()
        .map(|field| (field.name(), field.visibility()))
        .collect();

    assert_eq!(qualifiers, [
        ("id", Visibility::PUBLIC),
        ("balance", Visibility::PACKAGE),
        ("pin", Visibility::PRIVATE),
        ("audit_level", Visibility::PROTECTED),
        ("session_token", Visibility::PUBLIC | Visibility::TRANSIENT),
    ]);
}

#[test]
fn default_policy_writes_everything_but_transient() {
    let account = Account::new(7, -1, 0x1234);

    let bytes = to_vec(&account, Configuration::default()).unwrap();

    assert_eq!(bytes, [
        0x00, 0x00, 0x00, 0x07, // id
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, // balance
        0x12, 0x34, // pin
        0x02, // audit level
    ]);
}

#[test]
fn public_only() {
    let account = Account::new(7, -1, 0x1234);

    let bytes = to_vec(&account, with_policy(Visibility::PUBLIC)).unwrap();

    assert_eq!(bytes, [0x00, 0x00, 0x00, 0x07]);
}

#[test]
fn transient_fields_need_an_explicit_policy() {
    let account = Account::new(7, -1, 0x1234);

    let bytes = to_vec(
        &account,
        with_policy(Visibility::PUBLIC | Visibility::TRANSIENT),
    )
    .unwrap();

    assert_eq!(bytes, [
        0x00, 0x00, 0x00, 0x07, // id
        0xde, 0xad, 0xbe, 0xef, // session token
    ]);
}

#[test]
fn empty_policy_writes_nothing() {
    let account = Account::new(7, -1, 0x1234);

    assert!(to_vec(&account, with_policy(Visibility::empty())).unwrap().is_empty());
}

#[test]
fn policy_can_change_between_calls() {
    let account = Account::new(1, 0, 0);
    let mut writer = StructWriter::new(Vec::new());

    writer.set_policy(Visibility::PROTECTED);
    writer.serialize(&account).unwrap();
    writer.set_policy(Visibility::PRIVATE | Visibility::PROTECTED);
    writer.serialize(&account).unwrap();

    assert_eq!(writer.into_inner(), [0x02, 0x00, 0x00, 0x02]);
    assert_eq!(account.pin(), 0);
}
