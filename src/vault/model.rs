//! Record types stored inside a decrypted vault.
//!
//! The JSON layout mirrors the files written by earlier releases:
//! a secret's category reference is stored as a string (`""` for none,
//! the decimal index otherwise).  JSON `null` and integers are accepted
//! on read.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::categories::CategoryRepository;
use super::secrets::SecretRepository;

/// The decrypted vault document.
///
/// A missing `secrets` or `categories` key means "none created yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    #[serde(default)]
    pub secrets: SecretRepository,

    #[serde(default)]
    pub categories: CategoryRepository,
}

impl Vault {
    /// An empty vault, as written by `setup`.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A single credential record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
pub struct Secret {
    /// Positional index of the category, if any.
    #[serde(
        default,
        serialize_with = "category_ref::serialize",
        deserialize_with = "category_ref::deserialize"
    )]
    pub category: Option<usize>,

    /// Name or URL.
    pub name: String,

    pub login: String,

    pub password: String,

    /// Free-form, possibly multi-line.
    #[serde(default)]
    pub notes: String,
}

impl Secret {
    pub fn new(
        category: Option<usize>,
        name: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            category,
            name: name.into(),
            login: login.into(),
            password: password.into(),
            notes: notes.into(),
        }
    }
}

// Keep passwords out of debug output and panic messages.
impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("category", &self.category)
            .field("name", &self.name)
            .field("login", &self.login)
            .field("password", &"********")
            .field("notes", &self.notes)
            .finish()
    }
}

/// A category record.  Never removed, only deactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub active: bool,
}

/// Lightweight view of a secret for listings (no password).
///
/// Returned by `SecretRepository::search` together with the secret's
/// current index and its resolved category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSummary {
    pub index: usize,
    pub category: String,
    pub name: String,
    pub login: String,
}

/// An active category together with its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub index: usize,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Serde helpers for the category reference
// ---------------------------------------------------------------------------

pub(crate) mod category_ref {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRef {
        Index(usize),
        Text(String),
    }

    pub(crate) fn serialize<S>(value: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(index) => serializer.serialize_str(&index.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawRef>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawRef::Index(index)) => Ok(Some(index)),
            Some(RawRef::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                text.parse::<usize>().map(Some).map_err(|_| {
                    serde::de::Error::custom(format!("invalid category reference '{text}'"))
                })
            }
        }
    }
}
