use pdf_handout::*;

#[test]
fn test_default_config() {
    let config = LayoutConfig::default();
    assert_eq!(config.columns, 2);
    assert_eq!(config.paper_size, PaperSize::A4);
    assert_eq!(config.orientation, Orientation::Landscape);
    assert_eq!(config.margins, Margins::uniform(10.0));
    assert_eq!(config.h_spacing_mm, 5.0);
    assert_eq!(config.v_spacing_mm, 5.0);
    assert!(config.show_item_locator);
    assert!(config.show_page_number);
    assert_eq!(config.page_dimensions_mm(), (297.0, 210.0));
    assert!(config.validate().is_ok());
}

#[test]
fn test_validation_zero_columns() {
    let config = LayoutConfig {
        columns: 0,
        ..Default::default()
    };
    match config.validate() {
        Err(HandoutError::Config(msg)) => assert!(msg.contains("column")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_validation_negative_values() {
    let mut config = LayoutConfig::default();
    config.h_spacing_mm = -1.0;
    assert!(config.validate().is_err());

    let mut config = LayoutConfig::default();
    config.v_spacing_mm = f32::NAN;
    assert!(config.validate().is_err());

    let mut config = LayoutConfig::default();
    config.margins.left_mm = -0.5;
    assert!(config.validate().is_err());

    let mut config = LayoutConfig::default();
    config.paper_size = PaperSize::Custom {
        width_mm: 0.0,
        height_mm: 100.0,
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_degenerate_config_still_validates() {
    // Zero usable area is a degenerate plan, not a configuration error
    let config = LayoutConfig {
        columns: 50,
        h_spacing_mm: 10.0,
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_paper_size_dimensions() {
    assert_eq!(PaperSize::A4.dimensions_mm(), (210.0, 297.0));
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Landscape),
        (297.0, 210.0)
    );
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Portrait),
        (210.0, 297.0)
    );
    assert_eq!(PaperSize::Letter.dimensions_mm(), (215.9, 279.4));
}

#[test]
fn test_orientation_from_dimensions() {
    assert_eq!(Orientation::from_dimensions(297.0, 210.0), Orientation::Landscape);
    assert_eq!(Orientation::from_dimensions(210.0, 297.0), Orientation::Portrait);
    // Square pages are not wider than tall
    assert_eq!(Orientation::from_dimensions(200.0, 200.0), Orientation::Portrait);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_config() {
    use tempfile::NamedTempFile;

    let config = LayoutConfig {
        columns: 3,
        paper_size: PaperSize::Custom {
            width_mm: 250.0,
            height_mm: 180.0,
        },
        orientation: Orientation::Portrait,
        margins: Margins {
            top_mm: 12.0,
            bottom_mm: 8.0,
            left_mm: 6.0,
            right_mm: 4.0,
        },
        h_spacing_mm: 3.0,
        v_spacing_mm: 7.5,
        show_item_locator: false,
        show_page_number: true,
    };

    let temp_file = NamedTempFile::new().unwrap();
    config.save(temp_file.path()).await.unwrap();
    let loaded = LayoutConfig::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded, config);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_partial_config_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{ "columns": 4 }"#).unwrap();

    let loaded = LayoutConfig::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.columns, 4);
    assert_eq!(loaded.orientation, Orientation::Landscape);
    assert!(loaded.show_page_number);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_malformed_config() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "columns = 4").unwrap();

    match LayoutConfig::load(temp_file.path()).await {
        Err(HandoutError::Config(msg)) => assert!(msg.contains("parse")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
