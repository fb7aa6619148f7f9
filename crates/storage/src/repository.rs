use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use tally_core::model::RecordMap;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Config store contract for the single persisted progress record.
///
/// The record is an opaque key/value map here; defaulting and validation of
/// individual keys happen in the domain layer.
#[async_trait]
pub trait ProgressRecordRepository: Send + Sync {
    /// Fetch the stored record, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored body is not a
    /// key/value object, or other storage errors.
    async fn load_record(&self) -> Result<Option<RecordMap>, StorageError>;

    /// Replace the stored record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_record(&self, record: &RecordMap) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    record: Arc<Mutex<Option<RecordMap>>>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already persisted record.
    #[must_use]
    pub fn with_record(record: RecordMap) -> Self {
        Self {
            record: Arc::new(Mutex::new(Some(record))),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of successful `save_record` calls so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Current stored record, bypassing the trait.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn snapshot(&self) -> Result<Option<RecordMap>, StorageError> {
        let guard = self
            .record
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl ProgressRecordRepository for InMemoryRepository {
    async fn load_record(&self) -> Result<Option<RecordMap>, StorageError> {
        self.snapshot()
    }

    async fn save_record(&self, record: &RecordMap) -> Result<(), StorageError> {
        let mut guard = self
            .record
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(record.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Holds the config store behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub records: Arc<dyn ProgressRecordRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let records: Arc<dyn ProgressRecordRepository> = Arc::new(InMemoryRepository::new());
        Self { records }
    }
}
