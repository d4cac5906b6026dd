//! Shared fixtures and test doubles for the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use pdf_qa::{Chunk, Document, EmbeddingProvider, Generator, QaError, Result, TextExtractor};

/// Build a minimal single-font PDF with one content stream per page.
///
/// Page text must be ASCII (the fixture uses WinAnsi-encoded literal
/// strings). An empty page string produces a page with an empty content
/// stream, like a scanned image with no text layer.
pub fn fixture_pdf(pages: &[&str]) -> Vec<u8> {
    let mut objects: Vec<Vec<u8>> = Vec::new();

    let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 4 + 2 * i)).collect();
    objects.push(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_vec());
    objects.push(
        format!(
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids.join(" "),
            pages.len()
        )
        .into_bytes(),
    );
    let widths = vec!["500"; 95].join(" ");
    objects.push(
        format!(
            "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
             /FirstChar 32 /LastChar 126 /Widths [{widths}] \
             /Encoding /WinAnsiEncoding >>\nendobj\n"
        )
        .into_bytes(),
    );

    for (i, page) in pages.iter().enumerate() {
        let page_id = 4 + 2 * i;
        let content_id = page_id + 1;
        objects.push(
            format!(
                "{page_id} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {content_id} 0 R >>\nendobj\n"
            )
            .into_bytes(),
        );
        let stream = if page.is_empty() {
            String::new()
        } else {
            format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", escape_pdf_text(page))
        };
        objects.push(
            format!(
                "{content_id} 0 obj\n<< /Length {} >>\nstream\n{stream}\nendstream\nendobj\n",
                stream.len()
            )
            .into_bytes(),
        );
    }

    let mut buf: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for object in &objects {
        offsets.push(buf.len());
        buf.extend_from_slice(object);
    }

    // Cross-reference table: one 20-byte entry per object, in id order.
    let xref_offset = buf.len();
    let entry_count = objects.len() + 1;
    buf.extend_from_slice(format!("xref\n0 {entry_count}\n").as_bytes());
    buf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        buf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    buf.extend_from_slice(
        format!("trailer\n<< /Size {entry_count} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n")
            .as_bytes(),
    );
    buf
}

fn escape_pdf_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Extractor that returns a canned string regardless of the input bytes,
/// for tests that need precise control over the text being chunked.
pub struct FixedTextExtractor {
    text: String,
}

impl FixedTextExtractor {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextExtractor for FixedTextExtractor {
    fn extract(&self, _data: &[u8]) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// Deterministic embedding provider: hashes the text into a normalized
/// vector. Identical texts always embed identically; distinct texts almost
/// always differ. Counts every individual embed call.
pub struct MockEmbeddingProvider {
    dimensions: usize,
    calls: AtomicUsize,
}

impl MockEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, calls: AtomicUsize::new(0) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        // Mirrors the real providers: only truly empty input is refused.
        if text.is_empty() {
            return Err(QaError::EmbeddingError {
                provider: "mock".to_string(),
                message: "cannot embed empty text".to_string(),
            });
        }
        let hash = text
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
        let mut embedding: Vec<f32> =
            (0..self.dimensions).map(|i| (hash.wrapping_add(i as u64) as f32).sin()).collect();
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        for value in &mut embedding {
            *value /= norm;
        }
        Ok(embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.embed_text(text)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Generator that returns the prompt it was given, so tests can inspect
/// exactly what would be sent to a real model.
#[derive(Default)]
pub struct EchoGenerator {
    calls: AtomicUsize,
}

impl EchoGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for EchoGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(prompt.to_string())
    }
}

/// Generator that always fails.
pub struct FailingGenerator;

#[async_trait]
impl Generator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(QaError::GenerationError {
            provider: "mock".to_string(),
            message: "model unavailable".to_string(),
        })
    }
}

/// Document with a fixed id, for store-level tests.
pub fn doc(id: &str, text: &str) -> Document {
    Document {
        id: id.to_string(),
        filename: format!("{id}.pdf"),
        uploaded_at: Utc::now(),
        text: text.to_string(),
    }
}

/// Chunk with a fixed document id and index.
pub fn chunk(document_id: &str, index: usize, text: &str) -> Chunk {
    Chunk {
        document_id: document_id.to_string(),
        index,
        text: text.to_string(),
        start: 0,
        end: text.len(),
    }
}
