//! Local key-value persistence for cart snapshots.
//!
//! The cart never talks to a storage backend directly; it is handed a
//! [`Store`] at construction. Two implementations ship with the crate:
//!
//! - [`MemoryStore`] - `HashMap` backed, for tests and throwaway sessions
//! - [`FileStore`] - one JSON file per key under a data directory
//!
//! Stores are single-writer: exactly one cart owns a store for the lifetime
//! of a session.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors that can occur when reading or writing a [`Store`].
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading a stored value failed.
    #[error("failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing a value failed.
    #[error("failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Encoding a snapshot failed.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    /// The key contains characters a store cannot address.
    #[error("invalid store key '{0}': use ASCII letters, digits, '-' or '_'")]
    InvalidKey(String),
}

/// A string key-value store.
pub trait Store {
    /// Fetch the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replace the value stored under `key`.
    ///
    /// The write is complete when this returns.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Check that `key` is usable by every store implementation.
///
/// # Errors
///
/// Returns [`PersistenceError::InvalidKey`] for empty keys or keys with
/// characters outside `[A-Za-z0-9_-]`.
pub fn validate_key(key: &str) -> Result<(), PersistenceError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(PersistenceError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("cart").is_ok());
        assert!(validate_key("cart_v2-test").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../cart").is_err());
        assert!(validate_key("my cart").is_err());
    }

    #[test]
    fn test_persistence_error_display() {
        let err = PersistenceError::InvalidKey("a/b".to_string());
        assert_eq!(
            err.to_string(),
            "invalid store key 'a/b': use ASCII letters, digits, '-' or '_'"
        );
    }
}
