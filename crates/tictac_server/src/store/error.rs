//! Storage error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Which part of a storage operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StoreErrorKind {
    /// The backend could not be reached or opened.
    #[display("connection")]
    Connection,
    /// Schema setup failed.
    #[display("migration")]
    Migration,
    /// A query was rejected or failed while running.
    #[display("query")]
    Query,
    /// A game could not be encoded to or decoded from its stored form.
    #[display("encoding")]
    Encoding,
    /// Stored data decoded but contradicts its own row.
    #[display("corrupt record")]
    Corrupt,
    /// A thread panicked while holding the in-memory tables.
    #[display("poisoned lock")]
    Poisoned,
}

/// Storage failure with its kind and the location that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Storage {} error: {} at {}:{}", kind, message, file, line)]
pub struct StoreError {
    kind: StoreErrorKind,
    message: String,
    line: u32,
    file: &'static str,
}

impl StoreError {
    /// Creates a storage error, recording the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Which part of the operation failed.
    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }

    /// Backend message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source location that raised the error, as `(file, line)`.
    pub fn location(&self) -> (&'static str, u32) {
        (self.file, self.line)
    }
}

impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(StoreErrorKind::Query, err.to_string())
    }
}

impl From<diesel::ConnectionError> for StoreError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(StoreErrorKind::Connection, err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(StoreErrorKind::Encoding, err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    #[track_caller]
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::new(StoreErrorKind::Poisoned, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_kinds_follow_source() {
        let query: StoreError = diesel::result::Error::NotFound.into();
        assert_eq!(query.kind(), StoreErrorKind::Query);

        let encoding: StoreError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert_eq!(encoding.kind(), StoreErrorKind::Encoding);

        let lock = Mutex::new(());
        let _ = std::panic::catch_unwind(|| {
            let _guard = lock.lock().unwrap();
            panic!("poison");
        });
        let poisoned: StoreError = lock.lock().unwrap_err().into();
        assert_eq!(poisoned.kind(), StoreErrorKind::Poisoned);
    }

    #[test]
    fn test_location_is_caller() {
        let err = StoreError::new(StoreErrorKind::Corrupt, "bad row");
        let (file, line) = err.location();
        assert!(file.ends_with("error.rs"));
        assert!(line > 0);
        assert_eq!(
            err.to_string(),
            format!("Storage corrupt record error: bad row at {}:{}", file, line)
        );
    }
}
