//! Load, patch and write environments on disk
use chem::environment::{EnvironmentStore, StoreError};
use chem::patch::{apply_patch, Mutation};
use chem::path::parse_path;
use pretty_assertions::assert_eq;

const PRODUCTION: &str = r#"{
  "name": "production",
  "description": "eu cluster",
  "default_attributes": {
    "client": {
      "ldap_server": "ldap1.example.com",
      "port": 389
    }
  },
  "run_list": [
    "recipe[base]"
  ]
}"#;

fn store_with_production() -> (tempfile::TempDir, EnvironmentStore) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("production.json"), PRODUCTION).unwrap();
    let store = EnvironmentStore::new(dir.path().to_owned());
    (dir, store)
}

#[test]
fn untouched_document_is_written_back_identically() {
    let (_dir, store) = store_with_production();

    let document = store.load("production").unwrap();
    store.write("production", &document).unwrap();

    let written = std::fs::read_to_string(store.path("production")).unwrap();
    assert_eq!(written, PRODUCTION);
}

#[test]
fn set_round_trip_keeps_key_order() {
    let (_dir, store) = store_with_production();
    let patch = parse_path("default_attributes.client.ldap_server:ldap2.example.com")
        .unwrap()
        .patch;

    let document = store.load("production").unwrap();
    let document = apply_patch(document, &patch, Mutation::Set);
    store.write("production", &document).unwrap();

    let reloaded = store.load("production").unwrap();
    assert_eq!(reloaded, document);

    let written = std::fs::read_to_string(store.path("production")).unwrap();
    assert_eq!(
        written,
        PRODUCTION.replace("ldap1.example.com", "ldap2.example.com")
    );
}

#[test]
fn large_numbers_survive_a_rewrite() {
    const NUMBERS: &str = r#"{
  "id": 18446744073709551615,
  "big": 123456789012345678901234567890,
  "negative": -99999999999999999999,
  "ratio": 0.25,
  "name": "production"
}"#;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("numbers.json"), NUMBERS).unwrap();
    let store = EnvironmentStore::new(dir.path().to_owned());

    let patch = parse_path("name:production").unwrap().patch;
    let document = apply_patch(store.load("numbers").unwrap(), &patch, Mutation::Set);
    store.write("numbers", &document).unwrap();

    let written = std::fs::read_to_string(store.path("numbers")).unwrap();
    assert_eq!(written, NUMBERS);
}

#[test]
fn unset_round_trip() {
    let (_dir, store) = store_with_production();
    let patch = parse_path("description").unwrap().patch;

    let document = apply_patch(store.load("production").unwrap(), &patch, Mutation::Unset);
    store.write("production", &document).unwrap();

    let keys: Vec<_> = store
        .load("production")
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, ["name", "default_attributes", "run_list"]);
}

#[test]
fn missing_environment_is_an_io_error() {
    let (_dir, store) = store_with_production();
    assert!(matches!(
        store.load("staging"),
        Err(StoreError::Io { .. })
    ));
}

#[test]
fn top_level_must_be_an_object() {
    let (dir, store) = store_with_production();
    std::fs::write(dir.path().join("list.json"), "[1, 2]").unwrap();

    assert!(matches!(
        store.load("list"),
        Err(StoreError::NotAnObject { found: "array", .. })
    ));
}
