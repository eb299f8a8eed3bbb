//! Integration tests for the organize workflow.

use lopdf::{Document, Object};
use sopdf::SoPdfError;
use sopdf::organize::{AutoConfirm, Confirm, Organizer};
use sopdf::view::PageView;
use tempfile::TempDir;

use crate::common::{page_widths, write_nested_pdf, write_pdf};

/// Records every prompt and answers with a fixed value.
struct Recorder {
    answer: bool,
    prompts: Vec<(String, String)>,
}

impl Confirm for Recorder {
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        self.prompts.push((title.to_string(), message.to_string()));
        self.answer
    }
}

#[tokio::test]
async fn test_reorder_remove_restore_scenario() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(dir.path(), "five.pdf", 5);

    let mut organizer = Organizer::new();
    organizer.open(&source).await.unwrap();

    assert!(organizer.move_page(4, 0).unwrap());
    assert_eq!(organizer.session().unwrap().order().order(), &[4, 0, 1, 2, 3]);

    assert!(organizer.remove(2, &mut AutoConfirm(true)).unwrap());
    let order = organizer.session().unwrap().order();
    assert_eq!(order.active_sequence(), vec![4, 0, 1, 3]);
    assert_eq!(order.removed().iter().copied().collect::<Vec<_>>(), vec![2]);

    assert!(organizer.restore(2).unwrap());
    assert_eq!(
        organizer.session().unwrap().order().active_sequence(),
        vec![4, 0, 1, 2, 3]
    );
}

#[tokio::test]
async fn test_save_writes_active_sequence() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(dir.path(), "five.pdf", 5);

    let mut organizer = Organizer::new();
    organizer.open(&source).await.unwrap();
    organizer.move_page(4, 0).unwrap();
    organizer.remove(2, &mut AutoConfirm(true)).unwrap();

    let summary = organizer.save(None).await.unwrap();

    assert_eq!(summary.output, dir.path().join("five_organized.pdf"));
    assert_eq!(summary.original_pages, 5);
    assert_eq!(summary.final_pages, 4);
    assert_eq!(summary.removed_pages, 1);
    assert!(summary.reordered);
    assert_eq!(page_widths(&summary.output), vec![204, 200, 201, 203]);
    // The source is never touched.
    assert_eq!(page_widths(&source), vec![200, 201, 202, 203, 204]);
}

#[tokio::test]
async fn test_save_with_every_page_removed_is_refused() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(dir.path(), "two.pdf", 2);
    let output = dir.path().join("out.pdf");

    let mut organizer = Organizer::new();
    organizer.open(&source).await.unwrap();
    organizer.remove(0, &mut AutoConfirm(true)).unwrap();
    organizer.remove(1, &mut AutoConfirm(true)).unwrap();

    let result = organizer.save(Some(&output)).await;
    assert!(matches!(result, Err(SoPdfError::NoActivePages)));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_remove_prompt_names_both_positions() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(dir.path(), "three.pdf", 3);

    let mut organizer = Organizer::new();
    organizer.open(&source).await.unwrap();
    organizer.move_page(2, 0).unwrap();

    let mut recorder = Recorder {
        answer: false,
        prompts: Vec::new(),
    };
    assert!(!organizer.remove(0, &mut recorder).unwrap());
    assert!(!organizer.session().unwrap().order().is_removed(0));

    let (title, message) = &recorder.prompts[0];
    assert_eq!(title, "Remove Page");
    assert!(message.starts_with("Remove page 2 (originally page 1)?"));
}

#[tokio::test]
async fn test_reset_needs_confirmation() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(dir.path(), "four.pdf", 4);

    let mut organizer = Organizer::new();
    organizer.open(&source).await.unwrap();
    organizer.move_page(3, 0).unwrap();
    organizer.remove(1, &mut AutoConfirm(true)).unwrap();

    assert!(!organizer.reset(&mut AutoConfirm(false)).unwrap());
    assert!(organizer.session().unwrap().order().is_reordered());

    assert!(organizer.reset(&mut AutoConfirm(true)).unwrap());
    let order = organizer.session().unwrap().order();
    assert_eq!(order.order(), &[0, 1, 2, 3]);
    assert!(order.removed().is_empty());
}

#[tokio::test]
async fn test_views_follow_every_mutation() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(dir.path(), "three.pdf", 3);

    let mut organizer = Organizer::new();
    organizer.open(&source).await.unwrap();
    organizer.move_page(2, 0).unwrap();
    organizer.remove(1, &mut AutoConfirm(true)).unwrap();

    assert_eq!(
        organizer.views().list().lines(),
        &[
            "Page 1 (OG: 3)".to_string(),
            "Page 2 (OG: 1)".to_string(),
            String::new(),
            "--- REMOVED PAGES ---".to_string(),
            "❌ REMOVED: Page 2".to_string(),
        ]
    );
    assert_eq!(organizer.status(), "2/3 pages • 1 removed • Reordered");

    organizer.clear();
    assert!(organizer.views().list().lines().is_empty());
    assert_eq!(organizer.status(), "No file loaded");
}

#[tokio::test]
async fn test_failed_open_keeps_current_document() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(dir.path(), "good.pdf", 2);

    let mut organizer = Organizer::new();
    organizer.open(&source).await.unwrap();
    organizer.move_page(1, 0).unwrap();

    let result = organizer.open(&dir.path().join("missing.pdf")).await;
    assert!(matches!(result, Err(SoPdfError::FileNotFound { .. })));

    let session = organizer.session().unwrap();
    assert_eq!(session.path(), source.as_path());
    assert_eq!(session.order().order(), &[1, 0]);
}

#[tokio::test]
async fn test_mutations_without_document_are_rejected() {
    let mut organizer = Organizer::new();

    assert!(matches!(
        organizer.move_page(1, 0),
        Err(SoPdfError::NoDocumentLoaded)
    ));
    assert!(matches!(
        organizer.remove(0, &mut AutoConfirm(true)),
        Err(SoPdfError::NoDocumentLoaded)
    ));
    assert!(matches!(
        organizer.save(None).await,
        Err(SoPdfError::NoDocumentLoaded)
    ));
}

#[tokio::test]
async fn test_saved_pages_keep_inherited_attributes() {
    let dir = TempDir::new().unwrap();
    let source = write_nested_pdf(dir.path(), "nested.pdf", 3);
    let output = dir.path().join("flat.pdf");

    let mut organizer = Organizer::new();
    organizer.open(&source).await.unwrap();
    organizer.move_page(2, 0).unwrap();
    organizer.save(Some(&output)).await.unwrap();

    let doc = Document::load(&output).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 3);
    for page_id in pages.into_values() {
        let page = doc.get_dictionary(page_id).unwrap();
        assert!(page.has(b"MediaBox"));
        assert_eq!(page.get(b"Rotate").and_then(Object::as_i64).unwrap(), 90);
    }
}
