//! Integration tests for splitting.

use rstest::rstest;
use sopdf::SoPdfError;
use sopdf::split::Splitter;
use tempfile::TempDir;

use crate::common::{page_widths, write_pdf};

#[tokio::test]
async fn test_split_ten_pages_at_four() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(dir.path(), "report.pdf", 10);

    let outcome = Splitter::new().split_file(&source, 4, None).await.unwrap();

    assert_eq!(outcome.part1, dir.path().join("report_part1.pdf"));
    assert_eq!(outcome.part2, dir.path().join("report_part2.pdf"));
    assert_eq!((outcome.part1_pages, outcome.part2_pages), (4, 6));
    assert_eq!(page_widths(&outcome.part1), vec![200, 201, 202, 203]);
    assert_eq!(
        page_widths(&outcome.part2),
        vec![204, 205, 206, 207, 208, 209]
    );
}

#[tokio::test]
async fn test_split_into_output_dir() {
    let dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let source = write_pdf(dir.path(), "doc.pdf", 2);

    let outcome = Splitter::new()
        .split_file(&source, 1, Some(out_dir.path()))
        .await
        .unwrap();

    assert_eq!(outcome.part1, out_dir.path().join("doc_part1.pdf"));
    assert_eq!(page_widths(&outcome.part1), vec![200]);
    assert_eq!(page_widths(&outcome.part2), vec![201]);
    assert!(!dir.path().join("doc_part1.pdf").exists());
}

#[rstest]
#[case(0)]
#[case(10)]
#[case(11)]
#[tokio::test]
async fn test_split_point_out_of_range(#[case] split_at: usize) {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(dir.path(), "doc.pdf", 10);

    let result = Splitter::new().split_file(&source, split_at, None).await;

    assert!(matches!(
        result,
        Err(SoPdfError::InvalidSplitPoint { split, page_count: 10 }) if split == split_at
    ));
    assert!(!dir.path().join("doc_part1.pdf").exists());
    assert!(!dir.path().join("doc_part2.pdf").exists());
}

#[tokio::test]
async fn test_failed_second_part_removes_first_part() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(dir.path(), "doc.pdf", 4);
    // A non-empty directory where the second part should go.
    let blocked = dir.path().join("doc_part2.pdf");
    std::fs::create_dir(&blocked).unwrap();
    std::fs::write(blocked.join("inner"), b"x").unwrap();

    let result = Splitter::new().split_file(&source, 2, None).await;

    assert!(matches!(result, Err(SoPdfError::FailedToWrite { .. })));
    assert!(!dir.path().join("doc_part1.pdf").exists());
    assert!(blocked.join("inner").exists());
}

#[tokio::test]
async fn test_single_page_cannot_be_split() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(dir.path(), "one.pdf", 1);

    let result = Splitter::new().split_file(&source, 1, None).await;
    assert!(matches!(
        result,
        Err(SoPdfError::TooFewPagesToSplit { page_count: 1, .. })
    ));
}
