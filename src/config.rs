//! Configuration for the question-answering pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{QaError, Result};

/// Configuration parameters for ingestion and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QaConfig {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Smallest accepted result count for retrieval requests.
    pub min_k: usize,
    /// Largest accepted result count for retrieval requests.
    pub max_k: usize,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self { chunk_size: 1000, chunk_overlap: 100, min_k: 1, max_k: 10 }
    }
}

impl QaConfig {
    /// Create a new builder for constructing a [`QaConfig`].
    pub fn builder() -> QaConfigBuilder {
        QaConfigBuilder::default()
    }

    /// Validate a requested result count against the configured bounds.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::InvalidParameterError`] if `k` is outside
    /// `min_k..=max_k`.
    pub fn validate_k(&self, k: usize) -> Result<()> {
        if k < self.min_k || k > self.max_k {
            return Err(QaError::InvalidParameterError(format!(
                "k must be between {} and {}, got {k}",
                self.min_k, self.max_k
            )));
        }
        Ok(())
    }
}

/// Builder for constructing a validated [`QaConfig`].
#[derive(Debug, Clone, Default)]
pub struct QaConfigBuilder {
    config: QaConfig,
}

impl QaConfigBuilder {
    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the smallest accepted result count for retrieval requests.
    pub fn min_k(mut self, k: usize) -> Self {
        self.config.min_k = k;
        self
    }

    /// Set the largest accepted result count for retrieval requests.
    pub fn max_k(mut self, k: usize) -> Self {
        self.config.max_k = k;
        self
    }

    /// Build the [`QaConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::ConfigError`] if:
    /// - `chunk_size == 0`
    /// - `chunk_overlap >= chunk_size`
    /// - `min_k == 0`
    /// - `min_k > max_k`
    pub fn build(self) -> Result<QaConfig> {
        if self.config.chunk_size == 0 {
            return Err(QaError::ConfigError("chunk_size must be greater than zero".to_string()));
        }
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(QaError::ConfigError(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.min_k == 0 {
            return Err(QaError::ConfigError("min_k must be greater than zero".to_string()));
        }
        if self.config.min_k > self.config.max_k {
            return Err(QaError::ConfigError(format!(
                "min_k ({}) must not exceed max_k ({})",
                self.config.min_k, self.config.max_k
            )));
        }
        Ok(self.config)
    }
}
