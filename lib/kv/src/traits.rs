use crate::error::KVError;

/// KVStore provides a namespaced key-value storage interface.
///
/// Keys follow a namespaced convention: `assign:task:T1`, `assign:user:a@x.com`.
/// Every single-key mutation commits on its own; the batch operations commit
/// all of their keys in one write transaction, so callers can rely on
/// all-or-nothing semantics across several records.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), KVError>;

    /// Write several key-value pairs in one transaction: either every pair
    /// is written or none is.
    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError>;

    /// Remove several keys in one transaction: either every key is removed
    /// or none is.
    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError>;

    /// Scan all keys matching a prefix. Returns (key, value) pairs sorted
    /// by key.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError>;
}
