//! # pdf-qa
//!
//! Retrieval-augmented question answering over PDF documents.
//!
//! ## Overview
//!
//! This crate turns a collection of PDF files into something you can ask
//! questions of. Ingestion extracts text from each PDF, splits it into
//! overlapping fixed-size chunks, embeds every chunk in one batch, and
//! stores the vectors. Asking a question embeds it, retrieves the most
//! similar chunks by cosine similarity, assembles them into a grounded
//! prompt, and hands that prompt to a text generator.
//!
//! The building blocks:
//!
//! - [`QaPipeline`] - the ingest / ask / delete orchestrator
//! - [`TextExtractor`] / [`PdfTextExtractor`] - PDF text extraction
//! - [`Chunker`] / [`FixedSizeChunker`] - overlapping fixed-size chunking
//! - [`EmbeddingProvider`] - text-to-vector embedding
//! - [`VectorStore`] - chunk storage and cosine-similarity retrieval
//!   ([`InMemoryVectorStore`], [`DiskVectorStore`])
//! - [`Generator`] - grounded answer generation
//!
//! Every seam is a trait, so any stage can be swapped for a custom
//! implementation (or a mock in tests).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use pdf_qa::{GeminiEmbeddingProvider, GeminiGenerator, InMemoryVectorStore, QaPipeline};
//!
//! # async fn run() -> pdf_qa::Result<()> {
//! let pipeline = QaPipeline::builder()
//!     .embedding_provider(Arc::new(GeminiEmbeddingProvider::from_env()?))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .generator(Arc::new(GeminiGenerator::from_env()?))
//!     .build()?;
//!
//! let pdf_bytes = std::fs::read("report.pdf").expect("readable file");
//! let document_id = pipeline.ingest("report.pdf", pdf_bytes).await?;
//! let answer = pipeline.ask("What does the report conclude?", 3).await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `gemini` (default) - REST clients for the Gemini embedding and
//!   generation APIs. Disable it to bring your own [`EmbeddingProvider`]
//!   and [`Generator`] without pulling in an HTTP stack.

pub mod chunking;
pub mod config;
pub mod disk;
pub mod document;
pub mod embedding;
pub mod error;
pub mod extract;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod generation;
pub mod inmemory;
pub mod pipeline;
pub mod prompt;
pub mod vectorstore;

pub use chunking::{Chunker, FixedSizeChunker};
pub use config::{QaConfig, QaConfigBuilder};
pub use disk::DiskVectorStore;
pub use document::{Chunk, Document, ScoredChunk};
pub use embedding::EmbeddingProvider;
pub use error::{QaError, Result};
pub use extract::{PdfTextExtractor, TextExtractor};
#[cfg(feature = "gemini")]
pub use gemini::{GeminiEmbeddingProvider, GeminiGenerator};
pub use generation::Generator;
pub use inmemory::InMemoryVectorStore;
pub use pipeline::{QaPipeline, QaPipelineBuilder};
pub use prompt::{NO_CONTEXT_ANSWER, PASSAGE_SEPARATOR, build_grounded_prompt};
pub use vectorstore::{StoredChunk, VectorStore, cosine_similarity};
