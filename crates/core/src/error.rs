//! Unified error types for geomap.
//!
//! Every variant carries a stable code prefix in its message so tool callers can
//! branch on it without parsing free text.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the geomap pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., latitude out of range).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Cache database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// No cached geocode for the given address.
    #[error("CACHE_MISS: {0}")]
    CacheMiss(String),

    /// The record store was unreachable or rejected a query.
    #[error("STORE_QUERY_FAILED: {0}")]
    StoreQuery(String),

    /// A request-level geocoding lookup produced no usable result.
    #[error("LOOKUP_FAILED: {0}")]
    LookupFailed(String),

    /// The bulk billing-country update failed.
    #[error("CORRECTION_FAILED: {0}")]
    CorrectionFailed(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::CacheMiss(msg) => (-32001, msg.clone()),
            Error::Database(e) => (-32002, e.to_string()),
            Error::MigrationFailed(msg) => (-32002, msg.clone()),
            Error::StoreQuery(msg) => (-32003, msg.clone()),
            Error::LookupFailed(msg) => (-32004, msg.clone()),
            Error::CorrectionFailed(msg) => (-32005, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::StoreQuery("no such table: accounts".to_string());
        assert!(err.to_string().starts_with("STORE_QUERY_FAILED"));
        assert!(err.to_string().contains("accounts"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::CorrectionFailed("disk I/O error".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32005);

        let err = Error::InvalidInput("lat out of range".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32602);
    }

    #[test]
    fn test_rusqlite_error_is_cache_error() {
        let err: Error = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, Error::Database(_)));
        assert!(err.to_string().starts_with("CACHE_ERROR"));
    }
}
