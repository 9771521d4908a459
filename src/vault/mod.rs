//! Vault module — the encrypted credential store.
//!
//! This module provides:
//! - `Vault`, `Secret` and `Category` record types (`model`)
//! - Positional CRUD over secrets (`secrets`) and categories (`categories`)
//! - The `nonce || tag || ciphertext` file layout (`format`)
//! - `VaultStore` for loading and saving the encrypted file (`store`)

pub mod categories;
pub mod format;
pub mod model;
pub mod secrets;
pub mod store;

// Re-export the most commonly used items.
pub use categories::{CategoryRepository, UNRESOLVED_CATEGORY};
pub use model::{Category, CategorySummary, Secret, SecretSummary, Vault};
pub use secrets::SecretRepository;
pub use store::VaultStore;
