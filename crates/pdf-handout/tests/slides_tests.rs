use pdf_handout::*;
use std::path::Path;

/// Write a placeholder slide whose width identifies it
fn write_slide(dir: &Path, name: &str, width_px: u32) {
    let slide = SlideImage::placeholder(width_px, 9).unwrap();
    std::fs::write(dir.join(name), slide.data()).unwrap();
}

#[tokio::test]
async fn test_load_slide_dir_natural_order() {
    let dir = tempfile::tempdir().unwrap();
    write_slide(dir.path(), "Slide10.png", 110);
    write_slide(dir.path(), "Slide2.PNG", 102);
    write_slide(dir.path(), "Slide1.png", 101);
    write_slide(dir.path(), "Slide9.png", 109);
    std::fs::write(dir.path().join("notes.txt"), b"speaker notes").unwrap();

    let slides = load_slide_dir(dir.path()).await.unwrap();
    let widths: Vec<u32> = slides.iter().map(SlideImage::width_px).collect();
    assert_eq!(widths, vec![101, 102, 109, 110]);
}

#[tokio::test]
async fn test_load_slide_dir_skips_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    write_slide(dir.path(), "a1.png", 16);
    std::fs::write(dir.path().join("a2.png"), b"not an image").unwrap();
    write_slide(dir.path(), "a3.png", 32);

    let slides = load_slide_dir(dir.path()).await.unwrap();
    assert_eq!(slides.len(), 2);
    assert_eq!(slides[1].width_px(), 32);
}

#[tokio::test]
async fn test_load_slide_dir_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("readme.md"), b"# deck").unwrap();

    let result = load_slide_dir(dir.path()).await;
    assert!(matches!(result, Err(HandoutError::NoSlides)));
}

#[tokio::test]
async fn test_load_slide_dir_missing() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_slide_dir(dir.path().join("nope")).await;
    assert!(matches!(result, Err(HandoutError::Io(_))));
}

#[tokio::test]
async fn test_loaded_slides_drive_layout() {
    let dir = tempfile::tempdir().unwrap();
    for i in 1..=7 {
        write_slide(dir.path(), &format!("s{}.png", i), 16);
    }

    let slides = load_slide_dir(dir.path()).await.unwrap();
    let config = LayoutConfig::default();
    let plan = plan_for_slides(&slides, &config);
    assert_eq!(plan.item_count, 7);
    assert!((plan.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
}
