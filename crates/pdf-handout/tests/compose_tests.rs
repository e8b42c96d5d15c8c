use lopdf::{Document, Object};
use pdf_handout::*;
use tokio::sync::mpsc;

fn slides(count: usize) -> Vec<SlideImage> {
    (0..count)
        .map(|_| SlideImage::placeholder(40, 30).unwrap())
        .collect()
}

fn portrait_two_columns() -> LayoutConfig {
    LayoutConfig {
        columns: 2,
        orientation: Orientation::Portrait,
        ..Default::default()
    }
}

/// Text drawn with `Tj` on each page, in content-stream order
fn stamped_text(doc: &Document) -> Vec<Vec<String>> {
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let content = doc.get_page_content(page_id).unwrap();
            let content = String::from_utf8_lossy(&content);
            content
                .split(") Tj")
                .filter_map(|chunk| chunk.rfind('(').map(|start| chunk[start + 1..].to_string()))
                .collect()
        })
        .collect()
}

fn image_count(doc: &Document, page_id: lopdf::ObjectId) -> usize {
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    resources.get(b"XObject").unwrap().as_dict().unwrap().len()
}

#[test]
fn test_compose_page_count_and_size() {
    let slides = slides(14);
    let config = portrait_two_columns();
    let plan = plan_for_slides(&slides, &config);
    assert_eq!(plan.pages_needed, 3);

    let output = compose(&slides, &plan, &config, &ProgressReporter::silent()).unwrap();
    assert_eq!(output.report.pages_written, 3);
    assert_eq!(output.report.items_placed, 14);
    assert_eq!(output.report.skipped, 0);

    let pages = output.document.get_pages();
    assert_eq!(pages.len(), 3);

    let counts: Vec<usize> = pages
        .values()
        .map(|&id| image_count(&output.document, id))
        .collect();
    assert_eq!(counts, vec![6, 6, 2]);

    let first = output.document.get_dictionary(pages[&1]).unwrap();
    let media_box = first.get(b"MediaBox").unwrap().as_array().unwrap();
    let width = match media_box[2] {
        Object::Real(w) => w,
        ref other => panic!("unexpected width {:?}", other),
    };
    assert!((width - constants::mm_to_pt(210.0)).abs() < 0.01);
}

#[test]
fn test_locator_labels_in_document_order() {
    let slides = slides(9);
    let config = LayoutConfig {
        show_page_number: false,
        ..portrait_two_columns()
    };
    let plan = plan_for_slides(&slides, &config);

    let output = compose(&slides, &plan, &config, &ProgressReporter::silent()).unwrap();
    let labels: Vec<String> = stamped_text(&output.document).into_iter().flatten().collect();

    let expected: Vec<String> = (0..9).map(|i| plan.position(i).unwrap().locator()).collect();
    assert_eq!(labels, expected);
    assert_eq!(&labels[..7], &["1-1", "1-2", "1-3", "1-4", "1-5", "1-6", "2-1"]);
}

#[test]
fn test_page_numbers_stamped_per_page() {
    let slides = slides(7);
    let config = LayoutConfig {
        show_item_locator: false,
        ..portrait_two_columns()
    };
    let plan = plan_for_slides(&slides, &config);

    let output = compose(&slides, &plan, &config, &ProgressReporter::silent()).unwrap();
    let text = stamped_text(&output.document);
    assert_eq!(text, vec![vec!["1".to_string()], vec!["2".to_string()]]);
}

#[test]
fn test_no_stamps_no_font() {
    let slides = slides(2);
    let config = LayoutConfig {
        show_item_locator: false,
        show_page_number: false,
        ..Default::default()
    };
    let plan = plan_for_slides(&slides, &config);

    let output = compose(&slides, &plan, &config, &ProgressReporter::silent()).unwrap();
    let doc = &output.document;
    let page_id = *doc.get_pages().values().next().unwrap();
    let resources = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Resources")
        .unwrap()
        .as_dict()
        .unwrap();
    assert!(!resources.has(b"Font"));
    assert!(stamped_text(doc)[0].is_empty());
}

#[test]
fn test_bad_slide_is_skipped() {
    let mut slides = slides(5);
    slides[2] = SlideImage::new(b"definitely not a png".to_vec(), 40, 30);
    let config = LayoutConfig {
        show_page_number: false,
        ..portrait_two_columns()
    };
    let plan = plan_for_slides(&slides, &config);

    let output = compose(&slides, &plan, &config, &ProgressReporter::silent()).unwrap();
    assert_eq!(output.report.items_placed, 4);
    assert_eq!(output.report.skipped, 1);
    assert_eq!(output.report.pages_written, 1);

    let page_id = *output.document.get_pages().values().next().unwrap();
    assert_eq!(image_count(&output.document, page_id), 4);

    // The blank cell keeps its slot; later slides do not shift
    let labels = &stamped_text(&output.document)[0];
    assert_eq!(labels, &["1-1", "1-2", "1-4", "1-5"]);
}

#[test]
fn test_invalid_config_rejected() {
    let slides = slides(1);
    let config = LayoutConfig {
        h_spacing_mm: -3.0,
        ..Default::default()
    };
    let plan = plan_for_slides(&slides, &config);
    let result = compose(&slides, &plan, &config, &ProgressReporter::silent());
    assert!(matches!(result, Err(HandoutError::Config(_))));
}

#[test]
fn test_degenerate_plan_renders() {
    let slides = slides(3);
    let config = LayoutConfig {
        columns: 40,
        h_spacing_mm: 10.0,
        ..Default::default()
    };
    let plan = plan_for_slides(&slides, &config);
    assert!(plan.is_degenerate());

    let output = compose(&slides, &plan, &config, &ProgressReporter::silent()).unwrap();
    assert_eq!(output.report.pages_written, 1);
}

#[test]
fn test_progress_reported_at_boundaries() {
    let slides = slides(14);
    let config = portrait_two_columns();
    let plan = plan_for_slides(&slides, &config);

    let (tx, mut rx) = mpsc::unbounded_channel();
    compose(&slides, &plan, &config, &ProgressReporter::new(tx)).unwrap();

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    let steps: Vec<(usize, usize)> = events.iter().map(|p| (p.current, p.total)).collect();
    assert_eq!(steps, vec![(0, 3), (1, 3), (2, 3), (3, 3)]);
    assert!(events.last().unwrap().message.contains("14 slides placed"));
}

#[test]
fn test_progress_receiver_dropped() {
    let slides = slides(3);
    let config = LayoutConfig::default();
    let plan = plan_for_slides(&slides, &config);

    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);
    let output = compose(&slides, &plan, &config, &ProgressReporter::new(tx)).unwrap();
    assert_eq!(output.report.items_placed, 3);
}

#[test]
fn test_empty_compose() {
    let config = LayoutConfig::default();
    let plan = plan_for_slides(&[], &config);
    let output = compose(&[], &plan, &config, &ProgressReporter::silent()).unwrap();
    assert_eq!(output.report.pages_written, 0);
    assert!(output.document.get_pages().is_empty());
}

#[tokio::test]
async fn test_render_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("handout.pdf");

    let slides = slides(5);
    let config = LayoutConfig::default();
    let plan = plan_for_slides(&slides, &config);

    // 4:3 slides, two across a landscape page, one row
    assert_eq!(plan.items_per_page, 2);

    let report = render_to_file(&slides, &plan, &config, &path, ProgressReporter::silent())
        .await
        .unwrap();
    assert_eq!(report.pages_written, 3);

    let loaded = load_pdf(&path).await.unwrap();
    assert_eq!(loaded.get_pages().len(), 3);
}

#[tokio::test]
async fn test_render_empty_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.pdf");

    let config = LayoutConfig::default();
    let plan = plan_for_slides(&[], &config);
    let report = render_to_file(&[], &plan, &config, &path, ProgressReporter::silent())
        .await
        .unwrap();

    assert_eq!(report, RenderReport::default());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_render_unwritable_path_fails() {
    let blocker = tempfile::NamedTempFile::new().unwrap();
    // A regular file cannot be used as a directory
    let path = blocker.path().join("handout.pdf");

    let slides = slides(2);
    let config = LayoutConfig::default();
    let plan = plan_for_slides(&slides, &config);

    let result = render_to_file(&slides, &plan, &config, &path, ProgressReporter::silent()).await;
    assert!(matches!(result, Err(HandoutError::Io(_))));
}
