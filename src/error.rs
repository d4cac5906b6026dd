//! Error types for the `pdf-qa` crate.

use thiserror::Error;

/// Errors that can occur during ingestion and question answering.
#[derive(Debug, Error)]
pub enum QaError {
    /// The PDF bytes were corrupt, encrypted, or otherwise unreadable.
    #[error("Extraction error: {0}")]
    ExtractionError(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A document with this ID has already been ingested.
    ///
    /// Re-ingesting requires an explicit delete first; documents are never
    /// overwritten implicitly.
    #[error("Duplicate document ID: {0}")]
    DuplicateIdError(String),

    /// A request parameter was rejected before any retrieval work.
    #[error("Invalid parameter: {0}")]
    InvalidParameterError(String),

    /// The external answer generator failed or timed out.
    #[error("Generation error ({provider}): {message}")]
    GenerationError {
        /// The generation provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStoreError {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for ingestion and retrieval operations.
pub type Result<T> = std::result::Result<T, QaError>;
