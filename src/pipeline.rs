//! Question-answering pipeline orchestrator.
//!
//! The [`QaPipeline`] coordinates the full document-to-answer workflow by
//! composing a [`TextExtractor`], a [`Chunker`], an [`EmbeddingProvider`],
//! a [`VectorStore`], and a [`Generator`].
//!
//! # Example
//!
//! ```rust,ignore
//! use pdf_qa::{QaPipeline, InMemoryVectorStore};
//!
//! let pipeline = QaPipeline::builder()
//!     .embedding_provider(Arc::new(my_embedder))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .generator(Arc::new(my_generator))
//!     .build()?;
//!
//! let document_id = pipeline.ingest("report.pdf", pdf_bytes).await?;
//! let answer = pipeline.ask("What does the report conclude?", 3).await?;
//! ```

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::chunking::{Chunker, FixedSizeChunker};
use crate::config::QaConfig;
use crate::document::Document;
use crate::embedding::EmbeddingProvider;
use crate::error::{QaError, Result};
use crate::extract::{PdfTextExtractor, TextExtractor};
use crate::generation::Generator;
use crate::prompt::{NO_CONTEXT_ANSWER, build_grounded_prompt};
use crate::vectorstore::VectorStore;

/// The question-answering pipeline orchestrator.
///
/// Coordinates document ingestion (extract → chunk → embed → store) and
/// question answering (embed → retrieve → prompt → generate). Construct one
/// via [`QaPipeline::builder()`].
pub struct QaPipeline {
    config: QaConfig,
    extractor: Arc<dyn TextExtractor>,
    chunker: Arc<dyn Chunker>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    generator: Arc<dyn Generator>,
}

impl QaPipeline {
    /// Create a new [`QaPipelineBuilder`].
    pub fn builder() -> QaPipelineBuilder {
        QaPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &QaConfig {
        &self.config
    }

    /// Return a reference to the embedding provider.
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedding_provider
    }

    /// Return a reference to the vector store.
    pub fn vector_store(&self) -> &Arc<dyn VectorStore> {
        &self.vector_store
    }

    /// Ingest a PDF document: extract → chunk → embed → store.
    ///
    /// Returns the generated document ID. A document from which no text can
    /// be extracted (scanned images, empty pages) is still registered under
    /// its ID so it can be deleted later, but contributes nothing to
    /// retrieval.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::ExtractionError`] if the bytes are not a readable
    /// PDF, [`QaError::EmbeddingError`] if embedding fails, or
    /// [`QaError::VectorStoreError`] / [`QaError::DuplicateIdError`] if the
    /// store rejects the document. On any error nothing is stored.
    pub async fn ingest(&self, filename: &str, pdf_bytes: Vec<u8>) -> Result<String> {
        info!(filename, byte_count = pdf_bytes.len(), "ingesting PDF document");

        // 1. Extract text (CPU-bound, so off the async runtime)
        let extractor = Arc::clone(&self.extractor);
        let text = tokio::task::spawn_blocking(move || extractor.extract(&pdf_bytes))
            .await
            .map_err(|e| QaError::ExtractionError(format!("extraction task failed: {e}")))?
            .inspect_err(|e| error!(filename, error = %e, "text extraction failed"))?;

        // 2. Register the document
        let document = Document::new(filename, text);
        let document_id = document.id.clone();

        if document.text.trim().is_empty() {
            warn!(document_id = %document_id, filename, "document contains no extractable text");
            self.vector_store.add(document, Vec::new(), Vec::new()).await?;
            return Ok(document_id);
        }

        // 3. Chunk the text
        let chunks = self.chunker.chunk(&document);

        // 4. Embed all chunks in one batch
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self
            .embedding_provider
            .embed_batch(&texts)
            .await
            .inspect_err(|e| error!(document_id = %document_id, error = %e, "embedding failed during ingestion"))?;

        // 5. Store document, chunks, and embeddings together
        let chunk_count = chunks.len();
        self.vector_store
            .add(document, chunks, embeddings)
            .await
            .inspect_err(|e| error!(document_id = %document_id, error = %e, "vector store rejected document"))?;

        info!(document_id = %document_id, chunk_count, "document ingested");

        Ok(document_id)
    }

    /// Answer a question from the ingested documents: embed → retrieve →
    /// prompt → generate.
    ///
    /// `k` is the number of passages to retrieve and must lie within the
    /// configured bounds. When the store holds no chunks at all, the
    /// deterministic [`NO_CONTEXT_ANSWER`] is returned without calling the
    /// generator. The generator's reply is returned verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::InvalidParameterError`] if the question is empty
    /// or `k` is out of bounds (checked before any embedding work),
    /// [`QaError::EmbeddingError`] if the question cannot be embedded, or
    /// [`QaError::GenerationError`] if the generator fails.
    pub async fn ask(&self, question: &str, k: usize) -> Result<String> {
        if question.trim().is_empty() {
            warn!("rejecting empty question");
            return Err(QaError::InvalidParameterError("question must not be empty".to_string()));
        }
        self.config
            .validate_k(k)
            .inspect_err(|e| warn!(k, error = %e, "rejecting out-of-range passage count"))?;

        info!(question, k, "answering question");

        // 1. Embed the question
        let query_embedding = self
            .embedding_provider
            .embed(question)
            .await
            .inspect_err(|e| error!(error = %e, "question embedding failed"))?;

        // 2. Retrieve the most similar chunks
        let results = self.vector_store.query(&query_embedding, k).await?;
        if results.is_empty() {
            warn!(question, "no passages available to ground an answer");
            return Ok(NO_CONTEXT_ANSWER.to_string());
        }

        // 3. Assemble the grounded prompt
        let passages: Vec<&str> = results.iter().map(|r| r.chunk.text.as_str()).collect();
        let prompt = build_grounded_prompt(&passages, question);

        // 4. Generate the answer
        let answer = self
            .generator
            .generate(&prompt)
            .await
            .inspect_err(|e| error!(error = %e, "answer generation failed"))?;

        info!(passage_count = results.len(), "question answered");

        Ok(answer)
    }

    /// Remove a document and all of its chunks from the vector store.
    ///
    /// Deleting an unknown ID is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::VectorStoreError`] if the store operation fails.
    pub async fn delete_document(&self, document_id: &str) -> Result<()> {
        self.vector_store.delete(document_id).await?;
        info!(document_id, "document deleted");
        Ok(())
    }
}

/// Builder for constructing a [`QaPipeline`].
///
/// The embedding provider, vector store, and generator are required; the
/// configuration, extractor, and chunker fall back to defaults. Call
/// [`build()`](QaPipelineBuilder::build) to validate and produce the
/// pipeline.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = QaPipeline::builder()
///     .config(QaConfig::default())
///     .embedding_provider(Arc::new(embedder))
///     .vector_store(Arc::new(store))
///     .generator(Arc::new(generator))
///     .build()?;
/// ```
#[derive(Default)]
pub struct QaPipelineBuilder {
    config: Option<QaConfig>,
    extractor: Option<Arc<dyn TextExtractor>>,
    chunker: Option<Arc<dyn Chunker>>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    generator: Option<Arc<dyn Generator>>,
}

impl QaPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: QaConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the text extractor. Defaults to [`PdfTextExtractor`].
    pub fn extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Set the document chunker. Defaults to a [`FixedSizeChunker`] sized
    /// from the configuration.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the vector store backend.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.vector_store = Some(store);
        self
    }

    /// Set the answer generator.
    pub fn generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the [`QaPipeline`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::ConfigError`] if a required component is missing.
    pub fn build(self) -> Result<QaPipeline> {
        let config = self.config.unwrap_or_default();
        let extractor: Arc<dyn TextExtractor> = match self.extractor {
            Some(extractor) => extractor,
            None => Arc::new(PdfTextExtractor::new()),
        };
        let chunker: Arc<dyn Chunker> = match self.chunker {
            Some(chunker) => chunker,
            None => Arc::new(FixedSizeChunker::new(config.chunk_size, config.chunk_overlap)?),
        };
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| QaError::ConfigError("embedding_provider is required".to_string()))?;
        let vector_store = self
            .vector_store
            .ok_or_else(|| QaError::ConfigError("vector_store is required".to_string()))?;
        let generator = self
            .generator
            .ok_or_else(|| QaError::ConfigError("generator is required".to_string()))?;

        Ok(QaPipeline {
            config,
            extractor,
            chunker,
            embedding_provider,
            vector_store,
            generator,
        })
    }
}
