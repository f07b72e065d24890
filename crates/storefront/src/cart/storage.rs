//! Durable cart storage.
//!
//! One named record holds the serialized [`CartSnapshot`]. It is read once
//! when the store opens and written after every mutation. There is no
//! versioning or migration logic: a stored record whose shape no longer
//! matches deserializes to "absent" and the cart starts empty.

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use super::CartSnapshot;

/// Error reading or writing the durable cart record.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Durable storage collaborator for the cart store.
///
/// Implementations persist whole snapshots; ordering beyond latest-write-wins
/// is not part of the contract.
pub trait CartStorage: Send + Sync {
    /// Load the persisted snapshot.
    ///
    /// Returns `Ok(None)` when no record exists or the stored shape is
    /// incompatible (fail-open, see module docs).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] only for I/O failures.
    fn load(&self) -> Result<Option<CartSnapshot>, StorageError>;

    /// Persist the full snapshot, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the record cannot be written.
    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError>;
}

/// File-backed storage: one JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage backed by the given file path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<CartSnapshot>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                // Incompatible stored shape is treated as absent, not fatal.
                tracing::warn!(path = %self.path.display(), "Discarding unreadable cart record: {e}");
                Ok(None)
            }
        }
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;
        let mut file = std::fs::File::create(&self.path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

/// In-memory storage for tests.
///
/// Snapshots round-trip through JSON so tests exercise the same
/// serialization path as the file backend. Clones share the underlying cell,
/// which lets a test reopen "the same device storage".
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    cell: Arc<Mutex<Option<String>>>,
    fail_writes: bool,
}

impl MemoryStorage {
    /// Empty storage that accepts writes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose writes always fail, for exercising the best-effort
    /// persistence contract.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            cell: Arc::new(Mutex::new(None)),
            fail_writes: true,
        }
    }

    /// Storage pre-seeded with raw record content (possibly garbage).
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            cell: Arc::new(Mutex::new(Some(raw.into()))),
            fail_writes: false,
        }
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<CartSnapshot>, StorageError> {
        let cell = self.cell.lock().map_err(|_| StorageError::Poisoned)?;
        let Some(raw) = cell.as_ref() else {
            return Ok(None);
        };

        match serde_json::from_str(raw) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                tracing::warn!("Discarding unreadable cart record: {e}");
                Ok(None)
            }
        }
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io(std::io::Error::other(
                "writes disabled for this test",
            )));
        }

        let json = serde_json::to_string(snapshot)?;
        let mut cell = self.cell.lock().map_err(|_| StorageError::Poisoned)?;
        *cell = Some(json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;
    use verde_core::{Price, ProductId};

    fn snapshot() -> CartSnapshot {
        let items = vec![LineItem {
            id: ProductId::new("a"),
            name: "Product A".to_owned(),
            image: "/images/a.jpg".to_owned(),
            unit_price: Price::from_cents(2000),
            original_unit_price: Some(Price::from_cents(2500)),
            quantity: 2,
        }];
        let (item_count, subtotal) = crate::cart::aggregates(&items);
        CartSnapshot {
            items,
            item_count,
            subtotal,
        }
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = JsonFileStorage::new(dir.path().join("nested/cart.json"));

        assert!(storage.load().expect("load").is_none());

        let original = snapshot();
        storage.save(&original).expect("save");
        let restored = storage.load().expect("load").expect("present");
        assert_eq!(restored, original);
    }

    #[test]
    fn test_file_storage_fails_open_on_garbage() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cart.json");
        std::fs::write(&path, "{ not json at all").expect("write garbage");

        let storage = JsonFileStorage::new(path);
        assert!(storage.load().expect("load").is_none());
    }

    #[test]
    fn test_file_storage_fails_open_on_incompatible_shape() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cart.json");
        std::fs::write(&path, r#"{"version": 7, "lines": []}"#).expect("write");

        let storage = JsonFileStorage::new(path);
        assert!(storage.load().expect("load").is_none());
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        let original = snapshot();
        storage.save(&original).expect("save");
        assert_eq!(storage.load().expect("load"), Some(original));
    }

    #[test]
    fn test_memory_storage_failing_writes() {
        let storage = MemoryStorage::failing();
        assert!(storage.save(&snapshot()).is_err());
        assert!(storage.load().expect("load").is_none());
    }

    #[test]
    fn test_memory_storage_with_raw_garbage_loads_as_absent() {
        let storage = MemoryStorage::with_raw("[1, 2, 3]");
        assert!(storage.load().expect("load").is_none());
    }
}
