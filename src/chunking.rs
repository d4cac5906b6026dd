//! Document chunking.

use crate::document::{Chunk, Document};
use crate::error::{QaError, Result};

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s with contiguous indices starting at
/// 0. Embeddings are attached later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document has empty text.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits text into fixed-size chunks by character count with overlap.
///
/// The unit is Unicode scalar values (`char`s), not bytes, so multi-byte
/// text never splits inside a code point. Chunk `i` covers the characters
/// `[i * (size - overlap), i * (size - overlap) + size)`, and chunking
/// stops with the first chunk that reaches the end of the text. Every
/// consecutive pair of chunks therefore overlaps by exactly `overlap`
/// characters, and dropping the first `overlap` characters of each chunk
/// after the first reconstructs the input exactly.
///
/// Chunks may split mid-word. Word boundaries are deliberately ignored:
/// they would break the exact-reconstruction property above.
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size`: maximum number of characters per chunk
    /// * `chunk_overlap`: number of overlapping characters between consecutive chunks
    ///
    /// # Errors
    ///
    /// Returns [`QaError::ConfigError`] if `chunk_size` is zero or
    /// `chunk_overlap >= chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(QaError::ConfigError("chunk_size must be greater than zero".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(QaError::ConfigError(format!(
                "chunk_overlap ({chunk_overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        let text = &document.text;
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every char boundary, plus the end of the text,
        // so slicing below can never land inside a code point.
        let mut boundaries: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
        boundaries.push(text.len());
        let char_count = boundaries.len() - 1;

        let step = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();
        let mut start_char = 0;
        let mut index = 0;

        while start_char < char_count {
            let end_char = (start_char + self.chunk_size).min(char_count);
            let start = boundaries[start_char];
            let end = boundaries[end_char];

            chunks.push(Chunk {
                document_id: document.id.clone(),
                index,
                text: text[start..end].to_string(),
                start,
                end,
            });

            if end_char == char_count {
                break;
            }
            index += 1;
            start_char += step;
        }

        chunks
    }
}
