use lopdf::{Dictionary, Document, Object, Stream};
use pdf_handout::*;

/// Build a document whose pages draw a comment naming them, e.g. `% index 0`
fn create_test_pdf(tag: &str, num_pages: usize, width: i64, height: i64) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    // Create pages array
    let mut kids = Vec::new();
    for i in 0..num_pages {
        let content = format!("% {} {}\nq Q", tag, i);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    // MediaBox lives on the tree root and is inherited by every page
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width),
                Object::Integer(height),
            ]),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

fn page_tags(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .values()
        .map(|&id| {
            let content = doc.get_page_content(id).unwrap();
            let content = String::from_utf8_lossy(&content);
            content.lines().next().unwrap_or_default().to_string()
        })
        .collect()
}

fn page_sizes(doc: &Document) -> Vec<(f32, f32)> {
    doc.get_pages()
        .values()
        .map(|&id| render::get_page_dimensions(doc, id).unwrap())
        .collect()
}

async fn write(doc: &Document, path: &std::path::Path) {
    save_pdf(doc.clone(), path).await.unwrap();
}

#[test]
fn test_merge_index_first() {
    let index = create_test_pdf("index", 2, 842, 595);
    let content = create_test_pdf("content", 3, 842, 595);

    let merged = merge(&index, &content).unwrap();
    assert_eq!(
        page_tags(&merged),
        vec![
            "% index 0",
            "% index 1",
            "% content 0",
            "% content 1",
            "% content 2"
        ]
    );
}

#[test]
fn test_merge_is_not_commutative() {
    let index = create_test_pdf("index", 1, 842, 595);
    let content = create_test_pdf("content", 2, 842, 595);

    let forward = page_tags(&merge(&index, &content).unwrap());
    let backward = page_tags(&merge(&content, &index).unwrap());
    assert_ne!(forward, backward);
    assert_eq!(backward[0], "% content 0");
    assert_eq!(backward[2], "% index 0");
}

#[test]
fn test_merge_preserves_page_geometry() {
    let index = create_test_pdf("index", 1, 595, 842);
    let content = create_test_pdf("content", 1, 842, 595);

    let merged = merge(&index, &content).unwrap();
    assert_eq!(page_sizes(&merged), vec![(595.0, 842.0), (842.0, 595.0)]);

    // Inherited MediaBox is written onto the copied page itself
    let first = *merged.get_pages().values().next().unwrap();
    assert!(merged.get_dictionary(first).unwrap().has(b"MediaBox"));
}

#[test]
fn test_merge_composed_content() {
    let slides: Vec<SlideImage> = (0..5)
        .map(|_| SlideImage::placeholder(32, 18).unwrap())
        .collect();
    let config = LayoutConfig::default();
    let plan = plan_for_slides(&slides, &config);
    let content = compose(&slides, &plan, &config, &ProgressReporter::silent())
        .unwrap()
        .document;

    let index = create_test_pdf("index", 1, 842, 595);
    let merged = merge(&index, &content).unwrap();
    assert_eq!(merged.get_pages().len(), 1 + plan.pages_needed);

    // Images and fonts travel with the pages
    let last = *merged.get_pages().values().last().unwrap();
    let page = merged.get_dictionary(last).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    for (_, reference) in xobjects.iter() {
        let id = reference.as_reference().unwrap();
        let image = merged.get_object(id).unwrap().as_stream().unwrap();
        assert_eq!(image.dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Image");
    }
    assert!(resources.has(b"Font"));
}

#[test]
fn test_probe_landscape_content() {
    let slides: Vec<SlideImage> = (0..3)
        .map(|_| SlideImage::placeholder(32, 18).unwrap())
        .collect();
    let config = LayoutConfig::default();
    let plan = plan_for_slides(&slides, &config);
    let content = compose(&slides, &plan, &config, &ProgressReporter::silent())
        .unwrap()
        .document;

    let geometry = probe_geometry(&content).unwrap();
    assert_eq!(geometry.orientation, Orientation::Landscape);
    assert!((geometry.width_mm - 297.0).abs() < 0.01);
    assert!((geometry.height_mm - 210.0).abs() < 0.01);
}

#[test]
fn test_probe_derives_orientation_from_page() {
    // A portrait page, whatever the caller's settings claimed
    let doc = create_test_pdf("content", 2, 595, 842);
    let geometry = probe_geometry(&doc).unwrap();
    assert_eq!(geometry.orientation, Orientation::Portrait);
    assert!((geometry.width_mm - 209.9).abs() < 0.1);
}

#[test]
fn test_probe_empty_document_fails() {
    let doc = create_test_pdf("content", 0, 595, 842);
    assert!(matches!(probe_geometry(&doc), Err(HandoutError::Probe(_))));
}

#[tokio::test]
async fn test_probe_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = probe_file(dir.path().join("missing.pdf")).await;
    assert!(matches!(result, Err(HandoutError::Probe(_))));
}

#[tokio::test]
async fn test_merge_files() {
    let dir = tempfile::tempdir().unwrap();
    let index_path = dir.path().join("index.pdf");
    let content_path = dir.path().join("content.pdf");
    let output_path = dir.path().join("out").join("final.pdf");

    write(&create_test_pdf("index", 2, 842, 595), &index_path).await;
    write(&create_test_pdf("content", 4, 842, 595), &content_path).await;

    let pages = merge_files(&index_path, &content_path, &output_path)
        .await
        .unwrap();
    assert_eq!(pages, 6);

    let loaded = load_pdf(&output_path).await.unwrap();
    let tags = page_tags(&loaded);
    assert_eq!(tags.first().unwrap(), "% index 0");
    assert_eq!(tags.last().unwrap(), "% content 3");
}

#[tokio::test]
async fn test_merge_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let content_path = dir.path().join("content.pdf");
    write(&create_test_pdf("content", 1, 842, 595), &content_path).await;

    let result = merge_files(
        dir.path().join("missing.pdf"),
        &content_path,
        dir.path().join("final.pdf"),
    )
    .await;
    match result {
        Err(HandoutError::Merge { role, .. }) => assert_eq!(role, DocumentRole::Index),
        other => panic!("Expected Merge error, got {:?}", other),
    }

    let result = merge_files(
        &content_path,
        dir.path().join("not-a.pdf"),
        dir.path().join("final.pdf"),
    )
    .await;
    match result {
        Err(HandoutError::Merge { role, .. }) => assert_eq!(role, DocumentRole::Content),
        other => panic!("Expected Merge error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_merge_unparseable_source() {
    let dir = tempfile::tempdir().unwrap();
    let garbage = dir.path().join("garbage.pdf");
    std::fs::write(&garbage, b"this is not a pdf").unwrap();
    let content_path = dir.path().join("content.pdf");
    write(&create_test_pdf("content", 1, 842, 595), &content_path).await;

    let result = merge_files(&garbage, &content_path, dir.path().join("final.pdf")).await;
    assert!(matches!(
        result,
        Err(HandoutError::Merge {
            role: DocumentRole::Index,
            ..
        })
    ));
}

#[tokio::test]
async fn test_merge_unwritable_output() {
    let dir = tempfile::tempdir().unwrap();
    let index_path = dir.path().join("index.pdf");
    let content_path = dir.path().join("content.pdf");
    write(&create_test_pdf("index", 1, 842, 595), &index_path).await;
    write(&create_test_pdf("content", 1, 842, 595), &content_path).await;

    // The index file stands where a directory would be needed
    let output = index_path.join("final.pdf");
    let result = merge_files(&index_path, &content_path, &output).await;
    assert!(matches!(
        result,
        Err(HandoutError::Merge {
            role: DocumentRole::Output,
            ..
        })
    ));
}
