//! Vector store trait for persisting chunks with embeddings and searching
//! them by similarity.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::{Chunk, Document, ScoredChunk};
use crate::error::{QaError, Result};

/// A chunk persisted together with its embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredChunk {
    /// The chunk.
    pub chunk: Chunk,
    /// The embedding attached to the chunk at ingestion time.
    pub embedding: Vec<f32>,
}

/// A storage backend for documents, chunks, and their embeddings.
///
/// Stores own ingested documents. Retrieval is nearest-neighbor by cosine
/// similarity; a linear scan is acceptable at this scale, and an
/// approximate index can replace it behind the same contract without any
/// caller-visible change.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Add a document together with its chunks and their embeddings.
    ///
    /// The operation is atomic per document: concurrent readers observe
    /// either all of the document's chunks or none of them. A document
    /// with no chunks is registered with nothing searchable; its ID is
    /// still occupied and deletable.
    ///
    /// # Errors
    ///
    /// - [`QaError::DuplicateIdError`] if the document ID already exists.
    /// - [`QaError::VectorStoreError`] if `chunks` and `embeddings` differ
    ///   in length, an embedding's dimension is inconsistent with the
    ///   store's existing content, or persistence fails.
    async fn add(
        &self,
        document: Document,
        chunks: Vec<Chunk>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<()>;

    /// Return the `k` stored chunks closest to `embedding` by cosine
    /// similarity.
    ///
    /// Results are ordered by descending score; equal scores keep
    /// insertion order. If fewer than `k` chunks exist, all of them are
    /// returned, and an empty store yields an empty result.
    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<ScoredChunk>>;

    /// Remove a document and all its chunks.
    ///
    /// Idempotent: deleting an unknown ID is a no-op.
    async fn delete(&self, document_id: &str) -> Result<()>;

    /// Return whether a document with the given ID has been ingested.
    async fn contains(&self, document_id: &str) -> Result<bool>;
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if the vectors differ in length or either has zero
/// magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Score every stored chunk against `embedding` and keep the best `k`.
///
/// The sort is stable, so equal scores keep their insertion order.
pub(crate) fn rank_chunks(chunks: &[StoredChunk], embedding: &[f32], k: usize) -> Vec<ScoredChunk> {
    let mut scored: Vec<ScoredChunk> = chunks
        .iter()
        .map(|stored| ScoredChunk {
            chunk: stored.chunk.clone(),
            score: cosine_similarity(&stored.embedding, embedding),
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(k);
    scored
}

/// Documents plus their chunks in insertion order, shared by the built-in
/// store backends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct StoreState {
    pub(crate) documents: HashMap<String, Document>,
    pub(crate) chunks: Vec<StoredChunk>,
}

impl StoreState {
    /// Validate and apply an `add`: duplicate-ID rejection, chunk/embedding
    /// arity, and embedding-dimension consistency.
    pub(crate) fn insert_document(
        &mut self,
        backend: &str,
        document: Document,
        chunks: Vec<Chunk>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<()> {
        if self.documents.contains_key(&document.id) {
            return Err(QaError::DuplicateIdError(document.id));
        }
        if chunks.len() != embeddings.len() {
            return Err(QaError::VectorStoreError {
                backend: backend.to_string(),
                message: format!(
                    "{} chunks with {} embeddings for document '{}'",
                    chunks.len(),
                    embeddings.len(),
                    document.id
                ),
            });
        }

        let expected_dim = self
            .chunks
            .first()
            .map(|stored| stored.embedding.len())
            .or_else(|| embeddings.first().map(Vec::len));
        if let Some(dim) = expected_dim {
            if let Some(bad) = embeddings.iter().find(|e| e.len() != dim) {
                return Err(QaError::VectorStoreError {
                    backend: backend.to_string(),
                    message: format!(
                        "embedding dimension {} does not match store dimension {dim}",
                        bad.len()
                    ),
                });
            }
        }

        self.documents.insert(document.id.clone(), document);
        self.chunks.extend(
            chunks
                .into_iter()
                .zip(embeddings)
                .map(|(chunk, embedding)| StoredChunk { chunk, embedding }),
        );
        Ok(())
    }

    /// Remove a document and every chunk belonging to it.
    pub(crate) fn remove_document(&mut self, document_id: &str) {
        self.documents.remove(document_id);
        self.chunks.retain(|stored| stored.chunk.document_id != document_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_have_similarity_one() {
        let v = [0.6f32, 0.8, 0.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthogonal_vectors_have_similarity_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_opposite_vectors_have_similarity_negative_one() {
        assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mismatched_lengths_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_zero_magnitude_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_ranking_is_stable_for_tied_scores() {
        let stored: Vec<StoredChunk> = (0..3)
            .map(|i| StoredChunk {
                chunk: Chunk {
                    document_id: format!("doc-{i}"),
                    index: 0,
                    text: "text".to_string(),
                    start: 0,
                    end: 4,
                },
                embedding: vec![1.0, 0.0],
            })
            .collect();

        let ranked = rank_chunks(&stored, &[1.0, 0.0], 3);

        let order: Vec<&str> = ranked.iter().map(|r| r.chunk.document_id.as_str()).collect();
        assert_eq!(order, ["doc-0", "doc-1", "doc-2"]);
    }
}
