//! Log output of the engine.

use tracing_test::traced_test;
use wirestruct_integration_test::{Account, Ouroboros};
use wirestruct_serialize::{Configuration, StructWriter, to_vec};

#[test]
#[traced_test]
fn transient_fields_are_reported() {
    let account = Account::new(1, 2, 3);
    let mut writer = StructWriter::new(Vec::new());

    tracing::info!("serializing account {}", 1);
    writer.serialize(&account).unwrap();

    assert!(logs_contain("serializing account 1"));
    assert!(logs_contain("skipping `Account.session_token`"));
    assert!(!logs_contain("skipping `Account.id`"));
}

#[test]
#[traced_test]
fn aborts_are_reported_with_their_path() {
    let node = Ouroboros { id: 1, parent: None };

    assert!(to_vec(&node, Configuration::default()).is_err());

    assert!(logs_contain("serialization aborted at `parent`"));
    assert!(logs_contain("cyclic object graph through `Ouroboros`"));
}
