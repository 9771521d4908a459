//! Category records inside a decrypted vault.
//!
//! Categories are soft-deleted: `delete` only clears the `active` flag, so
//! category indices never shift and secrets keep valid references.

use serde::{Deserialize, Serialize};

use super::model::{Category, CategorySummary};
use super::secrets::SecretRepository;
use crate::errors::{LockboxError, Result};

/// Display name for a missing or inactive category.
pub const UNRESOLVED_CATEGORY: &str = "n/a";

/// Ordered list of categories, serialized as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRepository {
    categories: Vec<Category>,
}

impl CategoryRepository {
    /// Append an active category and return its index.
    pub fn add(&mut self, name: impl Into<String>) -> usize {
        self.categories.push(Category {
            name: name.into(),
            active: true,
        });
        self.categories.len() - 1
    }

    pub fn get(&self, index: usize) -> Result<&Category> {
        self.categories
            .get(index)
            .ok_or(LockboxError::CategoryNotFound(index))
    }

    /// Rename the category at `index`.  Inactive categories can be renamed.
    pub fn rename(&mut self, index: usize, new_name: impl Into<String>) -> Result<()> {
        let category = self
            .categories
            .get_mut(index)
            .ok_or(LockboxError::CategoryNotFound(index))?;
        category.name = new_name.into();
        Ok(())
    }

    /// Deactivate the category at `index`.
    ///
    /// Fails with `CategoryInUse` while any secret still references it.
    /// Deleting an already inactive category succeeds.
    pub fn delete(&mut self, index: usize, secrets: &SecretRepository) -> Result<()> {
        if index >= self.categories.len() {
            return Err(LockboxError::CategoryNotFound(index));
        }
        if self.is_used(index, secrets) {
            return Err(LockboxError::CategoryInUse(index));
        }
        self.categories[index].active = false;
        Ok(())
    }

    /// Returns `true` if any secret references category `index`.
    pub fn is_used(&self, index: usize, secrets: &SecretRepository) -> bool {
        secrets.references_category(index)
    }

    /// The category's name if it exists and is active, `"n/a"` otherwise.
    pub fn resolve_name(&self, index: Option<usize>) -> &str {
        index
            .and_then(|i| self.categories.get(i))
            .filter(|c| c.active)
            .map_or(UNRESOLVED_CATEGORY, |c| c.name.as_str())
    }

    /// Returns `true` if a new secret may be filed under `index`.
    pub fn is_selectable(&self, index: usize) -> bool {
        self.categories.get(index).is_some_and(|c| c.active)
    }

    /// Active categories with their indices, in order.
    pub fn list_active(&self) -> Vec<CategorySummary> {
        self.categories
            .iter()
            .enumerate()
            .filter(|(_, c)| c.active)
            .map(|(index, c)| CategorySummary {
                index,
                name: c.name.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::Secret;

    #[test]
    fn add_appends_active_categories() {
        let mut repo = CategoryRepository::default();
        assert_eq!(repo.add("Email"), 0);
        assert_eq!(repo.add("Banking"), 1);
        assert!(repo.get(0).unwrap().active);
        assert_eq!(repo.list_active().len(), 2);
    }

    #[test]
    fn rename_out_of_range_is_not_found() {
        let mut repo = CategoryRepository::default();
        repo.add("Email");
        repo.rename(0, "Mail").unwrap();
        assert_eq!(repo.resolve_name(Some(0)), "Mail");
        assert!(matches!(
            repo.rename(1, "x"),
            Err(LockboxError::CategoryNotFound(1))
        ));
    }

    #[test]
    fn delete_is_soft_and_keeps_indices() {
        let secrets = SecretRepository::default();
        let mut repo = CategoryRepository::default();
        repo.add("a");
        repo.add("b");
        repo.add("c");

        repo.delete(1, &secrets).unwrap();

        assert_eq!(repo.len(), 3);
        assert_eq!(repo.resolve_name(Some(1)), UNRESOLVED_CATEGORY);
        assert_eq!(repo.resolve_name(Some(2)), "c");
        let active: Vec<usize> = repo.list_active().iter().map(|c| c.index).collect();
        assert_eq!(active, vec![0, 2]);
        assert!(!repo.is_selectable(1));
    }

    #[test]
    fn delete_in_use_category_fails() {
        let mut repo = CategoryRepository::default();
        repo.add("Email");
        let mut secrets = SecretRepository::default();
        secrets
            .add(Secret::new(Some(0), "mail", "u", "p", ""), &repo)
            .unwrap();

        assert!(repo.is_used(0, &secrets));
        assert!(matches!(
            repo.delete(0, &secrets),
            Err(LockboxError::CategoryInUse(0))
        ));
        assert!(repo.get(0).unwrap().active);
    }

    #[test]
    fn delete_out_of_range_is_not_found() {
        let mut repo = CategoryRepository::default();
        assert!(matches!(
            repo.delete(0, &SecretRepository::default()),
            Err(LockboxError::CategoryNotFound(0))
        ));
    }

    #[test]
    fn deleting_twice_is_harmless() {
        let secrets = SecretRepository::default();
        let mut repo = CategoryRepository::default();
        repo.add("Email");
        repo.delete(0, &secrets).unwrap();
        repo.delete(0, &secrets).unwrap();
        assert!(repo.list_active().is_empty());
    }

    #[test]
    fn resolve_name_handles_missing_references() {
        let repo = CategoryRepository::default();
        assert_eq!(repo.resolve_name(None), UNRESOLVED_CATEGORY);
        assert_eq!(repo.resolve_name(Some(42)), UNRESOLVED_CATEGORY);
    }
}
