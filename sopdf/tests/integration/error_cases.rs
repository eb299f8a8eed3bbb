//! Integration tests for error handling and edge cases.

use sopdf::config::OverwriteMode;
use sopdf::io::PdfReader;
use sopdf::organize::Organizer;
use sopdf::validation::{Validator, is_pdf_file};
use sopdf::{ErrorCategory, SoPdfError};
use tempfile::TempDir;

use crate::common::{write_empty_pdf, write_pdf, write_text_file};

#[tokio::test]
async fn test_error_nonexistent_input() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.pdf");

    let err = PdfReader::new().load(&missing).await.unwrap_err();
    assert!(matches!(err, SoPdfError::FileNotFound { .. }));
    assert_eq!(err.category(), ErrorCategory::InvalidDocument);
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_error_directory_input() {
    let dir = TempDir::new().unwrap();

    let err = PdfReader::new().load(dir.path()).await.unwrap_err();
    assert!(matches!(err, SoPdfError::NotAFile { .. }));
}

#[tokio::test]
async fn test_error_not_a_pdf() {
    let dir = TempDir::new().unwrap();
    let text = write_text_file(dir.path(), "notes.pdf");

    assert!(!is_pdf_file(&text));
    let err = PdfReader::new().load(&text).await.unwrap_err();
    assert!(matches!(err, SoPdfError::FailedToLoadPdf { .. }));
    assert_eq!(err.category(), ErrorCategory::InvalidDocument);
}

#[tokio::test]
async fn test_error_pdf_without_pages() {
    let dir = TempDir::new().unwrap();
    let empty = write_empty_pdf(dir.path(), "empty.pdf");

    assert!(is_pdf_file(&empty));
    let err = Organizer::new().open(&empty).await.unwrap_err();
    assert!(matches!(err, SoPdfError::EmptyDocument { .. }));

    // The file itself parses; only the missing pages are rejected.
    assert!(lopdf::Document::load(&empty).unwrap().get_pages().is_empty());
}

#[tokio::test]
async fn test_validate_output_modes() {
    let dir = TempDir::new().unwrap();
    let existing = write_pdf(dir.path(), "existing.pdf", 1);
    let validator = Validator::new();

    let err = validator
        .validate_output(&existing, OverwriteMode::NoClobber)
        .await
        .unwrap_err();
    assert!(matches!(err, SoPdfError::OutputExists { .. }));
    assert_eq!(err.category(), ErrorCategory::InvalidState);

    for mode in [OverwriteMode::Prompt, OverwriteMode::Force] {
        assert!(validator.validate_output(&existing, mode).await.is_ok());
    }

    let nowhere = dir.path().join("no").join("such").join("out.pdf");
    assert!(
        validator
            .validate_output(&nowhere, OverwriteMode::Force)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_inspect_reports_document_facts() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(dir.path(), "doc.pdf", 4);

    let result = Validator::new().validate_file(&path).await.unwrap();
    assert_eq!(result.page_count, 4);
    assert_eq!(result.version, Some((1, 5)));
    assert_eq!(result.page_dimensions, Some((200.0, 300.0)));
    assert!(!result.has_outline);
}
