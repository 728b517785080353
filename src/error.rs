//! Error types for the Canard library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`CanardError`] enum.
//!
//! # Examples
//!
//! ```
//! use canard::error::{CanardError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(CanardError::dataset("label column missing"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::Path;

use anyhow;
use thiserror::Error;

/// The main error type for Canard operations.
///
/// Uses the `thiserror` crate for the `Error` trait implementation and
/// provides convenience constructors for the common cases.
#[derive(Error, Debug)]
pub enum CanardError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Dataset-related errors (missing file, bad columns, bad labels)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Analysis-related errors (tokenization, filtering)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model-related errors (training, prediction)
    #[error("Model error: {0}")]
    Model(String),

    /// A persisted artifact is missing or unreadable.
    ///
    /// This is the "model not available" condition: callers must not crash
    /// on it, they either fall back to a fresh training run or refuse
    /// predictions.
    #[error("Model not available: {0}")]
    ModelUnavailable(String),

    /// Artifact serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with CanardError.
pub type Result<T> = std::result::Result<T, CanardError>;

impl CanardError {
    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        CanardError::Dataset(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        CanardError::Analysis(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        CanardError::Model(msg.into())
    }

    /// Create a "model not available" error referring to an artifact path.
    pub fn model_unavailable(path: &Path) -> Self {
        CanardError::ModelUnavailable(format!(
            "artifact missing or unreadable: {}",
            path.display()
        ))
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        CanardError::Serialization(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        CanardError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        CanardError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = CanardError::dataset("Test dataset error");
        assert_eq!(error.to_string(), "Dataset error: Test dataset error");

        let error = CanardError::model("Test model error");
        assert_eq!(error.to_string(), "Model error: Test model error");

        let error = CanardError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let canard_error = CanardError::from(io_error);

        match canard_error {
            CanardError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_model_unavailable_names_path() {
        let error = CanardError::model_unavailable(Path::new("/tmp/models/model.bin"));
        assert!(error.to_string().contains("model.bin"));
        assert!(matches!(error, CanardError::ModelUnavailable(_)));
    }
}
