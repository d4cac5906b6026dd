//! In-memory vector store using cosine similarity.
//!
//! This module provides [`InMemoryVectorStore`], a vector store with no
//! persistence, backed by a `tokio::sync::RwLock`. It is suitable for
//! development and tests; state is lost on process exit.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Chunk, Document, ScoredChunk};
use crate::error::Result;
use crate::vectorstore::{StoreState, VectorStore, rank_chunks};

const BACKEND: &str = "InMemory";

/// An in-memory [`VectorStore`] using cosine similarity for retrieval.
///
/// Chunks are held in insertion order behind a `tokio::sync::RwLock`, so
/// queries run concurrently while writes are exclusive, and a query never
/// observes a partially added document.
///
/// # Example
///
/// ```rust,ignore
/// use pdf_qa::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.add(document, chunks, embeddings).await?;
/// let results = store.query(&query_embedding, 5).await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    state: RwLock<StoreState>,
}

impl InMemoryVectorStore {
    /// Create a new empty in-memory vector store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(
        &self,
        document: Document,
        chunks: Vec<Chunk>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        state.insert_document(BACKEND, document, chunks, embeddings)
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let state = self.state.read().await;
        Ok(rank_chunks(&state.chunks, embedding, k))
    }

    async fn delete(&self, document_id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        state.remove_document(document_id);
        Ok(())
    }

    async fn contains(&self, document_id: &str) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state.documents.contains_key(document_id))
    }
}
