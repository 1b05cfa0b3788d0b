//! Error types for package loading and resource access.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::fetch::FetchError;

/// Result type for package operations.
pub type PackageResult<T> = Result<T, PackageError>;

/// Errors that can occur while loading a package or reading its resources.
#[derive(Debug, Error)]
pub enum PackageError {
    /// A resource descriptor has the wrong shape or cannot be located.
    #[error("invalid resource: {0}")]
    InvalidResource(String),

    /// The reference is not an object, an existing path or a URL.
    #[error("reference not found: {0}")]
    ReferenceNotFound(String),

    /// Descriptor text is not valid JSON.
    #[error("failed to parse descriptor from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Descriptor is valid JSON but not a JSON object, or has a malformed
    /// top-level field.
    #[error("invalid descriptor from {origin}: {reason}")]
    InvalidDescriptor { origin: String, reason: String },

    /// Failed to read a file.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// HTTP collaborator failure, passed through as-is.
    #[error(transparent)]
    Network(#[from] FetchError),

    /// The schema document could not be compiled.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_not_found_display() {
        let err = PackageError::ReferenceNotFound("missing/dir".to_string());
        assert_eq!(err.to_string(), "reference not found: missing/dir");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = PackageError::Io {
            path: PathBuf::from("/tmp/nope.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/tmp/nope.json"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_network_error_is_transparent() {
        let fetch = FetchError::Status {
            url: "http://example.com/datapackage.json".to_string(),
            status: 404,
        };
        let expected = fetch.to_string();
        let err = PackageError::from(fetch);
        assert_eq!(err.to_string(), expected);
    }
}
