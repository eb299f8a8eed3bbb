//! Test PDFs whose page `i` is `200 + i` points wide.

use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};

pub fn write_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..pages)
        .map(|index| {
            let content = doc.add_object(Stream::new(dictionary! {}, b"0 0 m".to_vec()));
            let page = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), (200 + index as i64).into(), 300.into()],
                "Contents" => content,
            });
            Object::Reference(page)
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog);

    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

pub fn page_widths(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .into_values()
        .map(|id| {
            let media_box = doc.get_dictionary(id).unwrap().get(b"MediaBox").unwrap();
            media_box.as_array().unwrap()[2].as_i64().unwrap()
        })
        .collect()
}
