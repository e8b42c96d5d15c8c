use pdf_handout::*;

fn config(columns: usize, orientation: Orientation) -> LayoutConfig {
    LayoutConfig {
        columns,
        orientation,
        ..Default::default()
    }
}

#[test]
fn test_rows_and_aspect_for_many_configurations() {
    for orientation in [Orientation::Landscape, Orientation::Portrait] {
        for columns in 1..=8 {
            for spacing in [0.0_f32, 2.5, 5.0, 12.0] {
                for margin in [0.0_f32, 5.0, 15.0] {
                    let config = LayoutConfig {
                        h_spacing_mm: spacing,
                        v_spacing_mm: spacing,
                        margins: Margins::uniform(margin),
                        ..config(columns, orientation)
                    };
                    let plan = compute_layout(20, 16.0 / 9.0, &config);
                    assert!(plan.rows >= 1, "{:?}", config);
                    assert!(
                        (plan.item_height - plan.item_width / plan.aspect_ratio).abs() < 1e-3,
                        "{:?}",
                        config
                    );
                }
            }
        }
    }
}

#[test]
fn test_pages_needed_is_ceiling() {
    let config = config(3, Orientation::Portrait);
    for count in 0..100 {
        let plan = compute_layout(count, 4.0 / 3.0, &config);
        if count == 0 {
            assert_eq!(plan.pages_needed, 0);
        } else {
            assert!(plan.pages_needed > 0);
            assert_eq!(plan.pages_needed, count.div_ceil(plan.rows * plan.columns));
        }
    }
}

#[test]
fn test_fourteen_slides_three_rows_two_columns() {
    let plan = compute_layout(14, 4.0 / 3.0, &config(2, Orientation::Portrait));
    assert_eq!(plan.rows, 3);
    assert_eq!(plan.columns, 2);
    assert_eq!(plan.items_per_page, 6);
    assert_eq!(plan.pages_needed, 3);

    let pos = plan.position(13).unwrap();
    assert_eq!((pos.page, pos.slot, pos.row, pos.col), (2, 1, 0, 1));
}

#[test]
fn test_position_mapping_covers_every_cell_once() {
    let plan = compute_layout(25, 16.0 / 9.0, &LayoutConfig::default());
    let positions: Vec<PagePosition> = plan.positions().collect();
    assert_eq!(positions.len(), 25);

    for (i, pos) in positions.iter().enumerate() {
        assert_eq!(plan.index_of(*pos), i);
        assert_eq!(pos.slot, pos.row * plan.columns + pos.col);
    }

    let last = positions.last().unwrap();
    assert_eq!(last.page, plan.pages_needed - 1);
}

#[test]
fn test_position_of_two_per_page() {
    let pos = position_of(24, 2, 2).unwrap();
    assert_eq!((pos.page, pos.slot, pos.row, pos.col), (12, 0, 0, 0));
    assert_eq!(pos.locator(), "13-1");
}

#[test]
fn test_empty_sequence_plan() {
    let plan = plan_for_slides(&[], &LayoutConfig::default());
    assert_eq!(plan.rows, 0);
    assert_eq!(plan.pages_needed, 0);
    assert_eq!(plan.columns, 2);
    assert_eq!(plan.orientation, Orientation::Landscape);
    assert_eq!(plan.summary(), "No slides to lay out");
}

#[test]
fn test_plan_samples_first_slide_only() {
    let wide = SlideImage::placeholder(32, 18).unwrap();
    let square = SlideImage::placeholder(20, 20).unwrap();
    let plan = plan_for_slides(&[wide, square], &LayoutConfig::default());
    assert!((plan.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    assert_eq!(plan.item_count, 2);
}

#[test]
fn test_single_row_overflow_is_planned() {
    let config = LayoutConfig {
        columns: 1,
        margins: Margins::uniform(0.0),
        ..config(1, Orientation::Landscape)
    };
    // 297mm wide cell at 1:1 is taller than the 210mm page
    let plan = compute_layout(2, 1.0, &config);
    assert!(plan.item_height > plan.page_height);
    assert_eq!(plan.rows, 1);
    assert_eq!(plan.pages_needed, 2);
}

#[test]
fn test_summary_mentions_grid() {
    let plan = compute_layout(10, 16.0 / 9.0, &LayoutConfig::default());
    let summary = plan.summary();
    assert!(summary.starts_with("10 slides, 2x2 per page"));
    assert!(summary.contains("3 pages"));
}
