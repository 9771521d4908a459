//! Secret records inside a decrypted vault.
//!
//! Secrets are addressed by their position in the list.  Deleting a
//! secret shifts every later secret down by one, so an index must not be
//! reused across a delete.

use serde::{Deserialize, Serialize};

use super::categories::CategoryRepository;
use super::model::{Secret, SecretSummary};
use crate::errors::{LockboxError, Result};

/// Ordered list of secrets, serialized as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretRepository {
    secrets: Vec<Secret>,
}

impl SecretRepository {
    /// Append a secret and return its index.
    ///
    /// A category reference must point at an existing, active category.
    pub fn add(&mut self, secret: Secret, categories: &CategoryRepository) -> Result<usize> {
        if let Some(category) = secret.category {
            if !categories.is_selectable(category) {
                return Err(LockboxError::CategoryNotFound(category));
            }
        }
        self.secrets.push(secret);
        Ok(self.secrets.len() - 1)
    }

    pub fn get(&self, index: usize) -> Result<&Secret> {
        self.secrets
            .get(index)
            .ok_or(LockboxError::SecretNotFound(index))
    }

    /// Remove the secret at `index`, shifting later secrets down.
    pub fn delete(&mut self, index: usize) -> Result<Secret> {
        if index >= self.secrets.len() {
            return Err(LockboxError::SecretNotFound(index));
        }
        Ok(self.secrets.remove(index))
    }

    /// Case-insensitive substring search over name, login and notes.
    ///
    /// Both sides are folded to upper case, so `"strasse"` matches
    /// `"straße"`.  Results keep vault order and carry the current index
    /// and the resolved category name.
    pub fn search(&self, query: &str, categories: &CategoryRepository) -> Vec<SecretSummary> {
        let needle = query.to_uppercase();
        self.secrets
            .iter()
            .enumerate()
            .filter(|(_, s)| {
                needle.is_empty()
                    || s.name.to_uppercase().contains(&needle)
                    || s.login.to_uppercase().contains(&needle)
                    || s.notes.to_uppercase().contains(&needle)
            })
            .map(|(index, s)| SecretSummary {
                index,
                category: categories.resolve_name(s.category).to_string(),
                name: s.name.clone(),
                login: s.login.clone(),
            })
            .collect()
    }

    /// Every secret, in order.
    pub fn list_all(&self, categories: &CategoryRepository) -> Vec<SecretSummary> {
        self.search("", categories)
    }

    /// Returns `true` if any secret references category `index`.
    pub fn references_category(&self, index: usize) -> bool {
        self.secrets.iter().any(|s| s.category == Some(index))
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}
