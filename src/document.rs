//! Data types for documents, chunks, and retrieval results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A source document ingested from a PDF.
///
/// Documents are immutable once added to a vector store. Re-uploading the
/// same file produces a new document with a fresh ID rather than mutating
/// the existing one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The original filename of the uploaded PDF.
    pub filename: String,
    /// When the document was ingested.
    pub uploaded_at: DateTime<Utc>,
    /// The full extracted text, pages in document order separated by newlines.
    pub text: String,
}

impl Document {
    /// Create a new document with a generated UUID and the current time.
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            filename: filename.into(),
            uploaded_at: Utc::now(),
            text: text.into(),
        }
    }
}

/// A contiguous slice of a [`Document`]'s text.
///
/// Chunks are the unit of embedding and retrieval. Sequence indices are
/// contiguous within a document starting at 0; `start..end` is the byte
/// span of `text` within the parent document's text, always on `char`
/// boundaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// The ID of the parent [`Document`].
    pub document_id: String,
    /// Zero-based position of this chunk within its document.
    pub index: usize,
    /// The text content of the chunk.
    pub text: String,
    /// Byte offset of the chunk's first character in the document text.
    pub start: usize,
    /// Byte offset one past the chunk's last character in the document text.
    pub end: usize,
}

impl Chunk {
    /// Return the chunk's identifier, `{document_id}_{index}`.
    pub fn chunk_id(&self) -> String {
        format!("{}_{}", self.document_id, self.index)
    }
}

/// A retrieved [`Chunk`] paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The cosine similarity score (higher is more relevant).
    pub score: f32,
}
