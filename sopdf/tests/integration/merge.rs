//! Integration tests for merging.

use lopdf::Document;
use rstest::rstest;
use sopdf::SoPdfError;
use sopdf::io::PdfWriter;
use sopdf::merge::{MergeList, Merger};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{page_widths, write_nested_pdf, write_pdf, write_text_file};

#[tokio::test]
async fn test_merge_two_single_page_pdfs() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 1);
    let b = write_pdf(dir.path(), "b.pdf", 1);
    let output = dir.path().join("merged.pdf");

    let result = Merger::new().merge(&[a.clone(), b.clone()]).await.unwrap();
    assert_eq!(result.statistics.files_merged, 2);
    assert_eq!(result.statistics.total_pages, 2);
    assert_eq!(result.merged_files, vec![a, b]);

    PdfWriter::new().save(&result.document, &output).await.unwrap();
    assert_eq!(Document::load(&output).unwrap().get_pages().len(), 2);
}

#[tokio::test]
async fn test_merge_preserves_input_order() {
    let dir = TempDir::new().unwrap();
    let short = write_pdf(dir.path(), "short.pdf", 1);
    let long = write_pdf(dir.path(), "long.pdf", 3);
    let output = dir.path().join("merged.pdf");

    let result = Merger::new().merge(&[long, short]).await.unwrap();
    PdfWriter::new().save(&result.document, &output).await.unwrap();

    assert_eq!(page_widths(&output), vec![200, 201, 202, 200]);
}

#[tokio::test]
async fn test_merge_list_after_reordering() {
    let dir = TempDir::new().unwrap();
    let one = write_pdf(dir.path(), "one.pdf", 1);
    let two = write_pdf(dir.path(), "two.pdf", 2);
    let three = write_pdf(dir.path(), "three.pdf", 3);
    let output = dir.path().join("merged.pdf");

    let mut list = MergeList::new();
    assert!(list.add(&one));
    assert!(list.add(&two));
    assert!(list.add(&three));
    assert!(!list.add(&one));
    assert!(list.move_up(2));

    let result = Merger::new().merge_list(&list).await.unwrap();
    PdfWriter::new().save(&result.document, &output).await.unwrap();

    assert_eq!(page_widths(&output), vec![200, 200, 201, 202, 200, 201]);
}

#[tokio::test]
async fn test_merge_keeps_inherited_page_attributes() {
    let dir = TempDir::new().unwrap();
    let flat = write_pdf(dir.path(), "flat.pdf", 2);
    let nested = write_nested_pdf(dir.path(), "nested.pdf", 2);
    let output = dir.path().join("merged.pdf");

    let result = Merger::new().merge(&[flat, nested]).await.unwrap();
    PdfWriter::new().save(&result.document, &output).await.unwrap();

    assert_eq!(page_widths(&output), vec![200, 201, 200, 200]);
}

#[rstest]
#[case(0)]
#[case(1)]
#[tokio::test]
async fn test_merge_needs_two_files(#[case] count: usize) {
    let dir = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = (0..count)
        .map(|index| write_pdf(dir.path(), &format!("{index}.pdf"), 1))
        .collect();

    let result = Merger::new().merge(&paths).await;
    assert!(matches!(result, Err(SoPdfError::NotEnoughFiles { count: c }) if c == count));
}

#[tokio::test]
async fn test_merge_fails_on_first_bad_input() {
    let dir = TempDir::new().unwrap();
    let good = write_pdf(dir.path(), "good.pdf", 1);
    let bad = write_text_file(dir.path(), "bad.pdf");

    let err = Merger::new().merge(&[good, bad.clone()]).await.unwrap_err();
    match err {
        SoPdfError::FailedToLoadPdf { path, .. } => assert_eq!(path, bad),
        other => panic!("unexpected error: {other}"),
    }
}
