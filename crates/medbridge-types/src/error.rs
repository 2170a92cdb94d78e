use thiserror::Error;

/// Errors from repository operations (used by trait definitions in medbridge-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("{entity} not found")]
    NotFound { entity: &'static str },
}

/// Errors from the audio blob store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(String),

    #[error("invalid audio filename: {0}")]
    InvalidFilename(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("no such table: messages".to_string());
        assert_eq!(err.to_string(), "query error: no such table: messages");

        let err = RepositoryError::NotFound {
            entity: "conversation",
        };
        assert_eq!(err.to_string(), "conversation not found");
    }

    #[test]
    fn test_storage_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StorageError = io.into();
        assert!(err.to_string().contains("denied"));
    }
}
