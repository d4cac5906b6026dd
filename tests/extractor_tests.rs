//! Tests for PDF text extraction.

mod common;

use common::fixture_pdf;
use pdf_qa::{PdfTextExtractor, QaError, TextExtractor};

#[test]
fn extracts_text_from_a_single_page() {
    let pdf = fixture_pdf(&["The capital of Testland is Exampleville."]);
    let extractor = PdfTextExtractor::new();

    let text = extractor.extract(&pdf).unwrap();

    assert!(text.contains("Exampleville"), "extracted text was: {text:?}");
}

#[test]
fn preserves_page_order_with_a_boundary_between_pages() {
    let pdf = fixture_pdf(&["Alpha", "Beta"]);
    let extractor = PdfTextExtractor::new();

    let text = extractor.extract(&pdf).unwrap();

    let alpha = text.find("Alpha").expect("first page text missing");
    let beta = text.find("Beta").expect("second page text missing");
    assert!(alpha < beta, "pages out of order: {text:?}");
    assert!(text[alpha..beta].contains('\n'), "no boundary between pages: {text:?}");
}

#[test]
fn a_page_without_text_contributes_nothing() {
    let pdf = fixture_pdf(&["Alpha", ""]);
    let extractor = PdfTextExtractor::new();

    let text = extractor.extract(&pdf).unwrap();

    let non_whitespace: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    assert_eq!(non_whitespace, "Alpha");
}

#[test]
fn corrupt_bytes_fail_with_an_extraction_error() {
    let extractor = PdfTextExtractor::new();

    let result = extractor.extract(b"definitely not a pdf");

    assert!(matches!(result, Err(QaError::ExtractionError(_))), "got: {result:?}");
}
