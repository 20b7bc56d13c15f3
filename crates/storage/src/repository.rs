use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use survey_core::model::{Answer, UserId};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Tab-scoped scratch pad for the current survey attempt.
///
/// Every mutation is durable as soon as the call returns; there is no batching.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The participant registered in this session, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_user_id(&self) -> Result<Option<UserId>, StorageError>;

    /// Record the participant returned by signup, replacing any earlier value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set_user_id(&self, id: &UserId) -> Result<(), StorageError>;

    /// Append one answer after those already recorded.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the answer cannot be stored.
    async fn append_answer(&self, answer: &Answer) -> Result<(), StorageError>;

    /// Overwrite the most recent answer, or append it when none is recorded yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the answer cannot be stored.
    async fn replace_last_answer(&self, answer: &Answer) -> Result<(), StorageError>;

    /// All answers in the order they were appended; empty before the first one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_answers(&self) -> Result<Vec<Answer>, StorageError>;

    /// Drop every recorded answer.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the answers cannot be removed.
    async fn clear_answers(&self) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
struct SessionData {
    user_id: Option<UserId>,
    answers: Vec<Answer>,
}

/// In-memory session store; lives as long as the process.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    data: Arc<Mutex<SessionData>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_user_id(&self) -> Result<Option<UserId>, StorageError> {
        let guard = self
            .data
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.user_id.clone())
    }

    async fn set_user_id(&self, id: &UserId) -> Result<(), StorageError> {
        let mut guard = self
            .data
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.user_id = Some(id.clone());
        Ok(())
    }

    async fn append_answer(&self, answer: &Answer) -> Result<(), StorageError> {
        let mut guard = self
            .data
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.answers.push(answer.clone());
        Ok(())
    }

    async fn replace_last_answer(&self, answer: &Answer) -> Result<(), StorageError> {
        let mut guard = self
            .data
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match guard.answers.last_mut() {
            Some(last) => *last = answer.clone(),
            None => guard.answers.push(answer.clone()),
        }
        Ok(())
    }

    async fn get_answers(&self) -> Result<Vec<Answer>, StorageError> {
        let guard = self
            .data
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.answers.clone())
    }

    async fn clear_answers(&self) -> Result<(), StorageError> {
        let mut guard = self
            .data
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.answers.clear();
        Ok(())
    }
}

/// Storage handles behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub session: Arc<dyn SessionStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let session: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        Self { session }
    }
}
