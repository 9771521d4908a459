//! Integration tests for the Lockbox vault module.

use std::fs;

use lockbox::crypto::{decrypt, derive_key, encrypt, DerivedKey};
use lockbox::errors::LockboxError;
use lockbox::vault::{format, Secret, Vault, VaultStore};
use tempfile::TempDir;

/// Helper: create a temporary vault file path inside a fresh temp dir.
fn vault_store() -> (TempDir, VaultStore) {
    let dir = TempDir::new().expect("create temp dir");
    let store = VaultStore::new(dir.path().join("test.vault"));
    (dir, store)
}

fn key(passphrase: &str) -> DerivedKey {
    derive_key(passphrase, "abc123").expect("derive key")
}

/// A vault with every kind of record in it.
fn sample_vault() -> Vault {
    let mut vault = Vault::new();
    vault.categories.add("Email");
    vault.categories.add("Banking");
    vault
        .secrets
        .add(
            Secret::new(Some(0), "mail.example.com", "alice", "p@ss", "line one\nline two"),
            &vault.categories,
        )
        .unwrap();
    vault
        .secrets
        .add(
            Secret::new(None, "https://bank.example", "bob", "ünïcødé", ""),
            &vault.categories,
        )
        .unwrap();
    vault.categories.delete(1, &vault.secrets).unwrap();
    vault
}

// ---------------------------------------------------------------------------
// Create / save / load round-trip
// ---------------------------------------------------------------------------

#[test]
fn create_writes_an_empty_vault() {
    let (_dir, store) = vault_store();
    let key = key("correcthorse");

    let created = store.create(&key).expect("create vault");
    assert_eq!(created, Vault::new());

    let loaded = store.load(&key).expect("load vault");
    assert_eq!(loaded, Vault::new());
}

#[test]
fn save_and_load_roundtrip() {
    let (_dir, store) = vault_store();
    let key = key("correcthorse");
    let vault = sample_vault();

    store.save(&key, &vault).expect("save");
    let loaded = store.load(&key).expect("load");

    assert_eq!(loaded, vault);
}

#[test]
fn each_save_uses_a_new_nonce() {
    let (_dir, store) = vault_store();
    let key = key("correcthorse");

    store.save(&key, &sample_vault()).unwrap();
    let first = fs::read(store.path()).unwrap();
    store.save(&key, &sample_vault()).unwrap();
    let second = fs::read(store.path()).unwrap();

    assert_ne!(first[..16], second[..16]);
}

#[test]
fn create_vault_twice_fails() {
    let (_dir, store) = vault_store();
    let key = key("correcthorse");

    store.create(&key).unwrap();
    assert!(matches!(
        store.create(&key),
        Err(LockboxError::VaultAlreadyExists(_))
    ));
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn wrong_key_fails_to_load() {
    let (_dir, store) = vault_store();
    store.save(&key("correcthorse"), &sample_vault()).unwrap();

    assert!(matches!(
        store.load(&key("wrong-horse")),
        Err(LockboxError::AuthenticationFailed)
    ));
}

#[test]
fn tampered_file_detected() {
    let (_dir, store) = vault_store();
    let key = key("tamper-pw");
    store.save(&key, &sample_vault()).unwrap();

    // Flip a byte in the ciphertext region.
    let mut data = fs::read(store.path()).expect("read vault file");
    let last = data.len() - 1;
    data[last] ^= 0xFF;
    fs::write(store.path(), &data).expect("write tampered file");

    assert!(matches!(
        store.load(&key),
        Err(LockboxError::AuthenticationFailed)
    ));
}

#[test]
fn truncated_file_detected() {
    let (_dir, store) = vault_store();
    fs::write(store.path(), [0u8; 20]).unwrap();

    assert!(matches!(
        store.load(&key("anything")),
        Err(LockboxError::AuthenticationFailed)
    ));
}

#[test]
fn authentic_but_unparseable_payload_is_corrupt() {
    let (_dir, store) = vault_store();
    let key = key("correcthorse");

    let blob = encrypt(&key, b"this is not json").unwrap();
    fs::write(store.path(), format::encode(&blob)).unwrap();

    assert!(matches!(
        store.load(&key),
        Err(LockboxError::VaultCorrupt(_))
    ));
}

#[test]
fn open_nonexistent_vault_fails() {
    let (_dir, store) = vault_store();
    assert!(matches!(
        store.load(&key("any")),
        Err(LockboxError::VaultNotFound(_))
    ));
}

// ---------------------------------------------------------------------------
// Compatibility with the established document layout
// ---------------------------------------------------------------------------

#[test]
fn loads_legacy_document_with_string_category_references() {
    let (_dir, store) = vault_store();
    let key = key("correcthorse");

    // `categories` is absent; references are strings, "" meaning none.
    let legacy = r#"{"secrets": [
        {"category": "", "name": "example.com", "login": "alice", "password": "p@ss", "notes": ""},
        {"category": "0", "name": "mail", "login": "bob", "password": "x", "notes": "a\nb"}
    ]}"#;
    let blob = encrypt(&key, legacy.as_bytes()).unwrap();
    fs::write(store.path(), format::encode(&blob)).unwrap();

    let vault = store.load(&key).expect("legacy vault loads");
    assert!(vault.categories.is_empty());
    assert_eq!(vault.secrets.len(), 2);
    assert_eq!(vault.secrets.get(0).unwrap().category, None);
    assert_eq!(vault.secrets.get(1).unwrap().category, Some(0));
    assert_eq!(vault.secrets.get(1).unwrap().notes, "a\nb");
}

#[test]
fn saved_document_uses_string_category_references() {
    let (_dir, store) = vault_store();
    let key = key("correcthorse");
    store.save(&key, &sample_vault()).unwrap();

    let data = fs::read(store.path()).unwrap();
    let plaintext = decrypt(&key, &format::decode(&data).unwrap()).unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&plaintext).unwrap();

    assert_eq!(doc["secrets"][0]["category"], "0");
    assert_eq!(doc["secrets"][1]["category"], "");
    assert_eq!(doc["categories"][1]["active"], false);
}
