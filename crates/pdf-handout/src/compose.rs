//! Page composition: slides onto a paginated content document
//!
//! Slides are consumed in order. Page breaks come solely from the plan's
//! `items_per_page`; nothing is measured while placing. A slide that cannot
//! be embedded leaves its cell blank and composition carries on.

use crate::constants::*;
use crate::io::write_pdf;
use crate::layout::{LayoutPlan, Rect};
use crate::options::LayoutConfig;
use crate::progress::ProgressReporter;
use crate::render::{
    PageContent, create_image_xobject, create_stamp_font, finish_page_tree,
};
use crate::slides::SlideImage;
use crate::types::*;
use lopdf::{Document, Object, ObjectId};
use std::path::Path;

/// In-memory result of composition
#[derive(Debug)]
pub struct RenderOutput {
    pub document: Document,
    pub report: RenderReport,
}

/// Compose slides into a new content document.
///
/// The configuration is validated first. Progress is reported at the start,
/// at every page boundary and on completion.
pub fn compose(
    slides: &[SlideImage],
    plan: &LayoutPlan,
    config: &LayoutConfig,
    progress: &ProgressReporter,
) -> Result<RenderOutput> {
    config.validate()?;

    let total_pages = plan.pages_needed;
    progress.emit(0, total_pages, format!("Composing {} slides", slides.len()));

    let mut output = Document::with_version(PDF_VERSION);
    let pages_tree_id = output.new_object_id();
    let stamps = config.show_item_locator || config.show_page_number;
    let font_id = stamps.then(|| create_stamp_font(&mut output));

    let page_width_pt = mm_to_pt(plan.page_width);
    let page_height_pt = mm_to_pt(plan.page_height);

    let mut page_refs = Vec::with_capacity(total_pages);
    let mut report = RenderReport::default();
    let mut current: Option<(usize, PageContent)> = None;

    for (index, slide) in slides.iter().enumerate() {
        let Some(pos) = plan.position(index) else {
            break;
        };

        if pos.slot == 0 {
            if let Some((page, content)) = current.take() {
                page_refs.push(close_page(
                    &mut output,
                    page,
                    content,
                    config,
                    page_width_pt,
                    page_height_pt,
                    pages_tree_id,
                    font_id,
                ));
                progress.emit(
                    page_refs.len(),
                    total_pages,
                    format!("Page {} of {} written", page_refs.len(), total_pages),
                );
            }
            log::debug!("Starting page {}", pos.page + 1);
            current = Some((pos.page, PageContent::new()));
        }

        let Some((_, content)) = current.as_mut() else {
            continue;
        };

        let cell = to_points(plan.cell_rect(pos, config));

        match create_image_xobject(&mut output, slide) {
            Ok(xobject_id) => {
                content.place_image(&format!("Im{}", pos.slot), xobject_id, &cell);
                if config.show_item_locator {
                    content.stamp_text(
                        &pos.locator(),
                        cell.x,
                        cell.y - LOCATOR_OFFSET,
                        LOCATOR_FONT_SIZE,
                    );
                }
                report.items_placed += 1;
            }
            Err(e) => {
                log::warn!("Skipping slide {}: {}", index + 1, e);
                report.skipped += 1;
            }
        }
    }

    if let Some((page, content)) = current.take() {
        page_refs.push(close_page(
            &mut output,
            page,
            content,
            config,
            page_width_pt,
            page_height_pt,
            pages_tree_id,
            font_id,
        ));
    }

    report.pages_written = page_refs.len();
    finish_page_tree(&mut output, pages_tree_id, page_refs);

    progress.emit(
        report.pages_written,
        total_pages,
        format!(
            "Composed {} pages ({} slides placed, {} skipped)",
            report.pages_written, report.items_placed, report.skipped
        ),
    );
    log::info!(
        "Composed {} pages, {} slides placed, {} skipped",
        report.pages_written,
        report.items_placed,
        report.skipped
    );

    Ok(RenderOutput {
        document: output,
        report,
    })
}

/// Compose slides and write the content document to `path`.
///
/// Missing parent directories are created. An empty slide sequence writes
/// nothing and reports zero pages. Failing to create or write the output is
/// a hard error; slides that cannot be embedded are only counted.
pub async fn render_to_file(
    slides: &[SlideImage],
    plan: &LayoutPlan,
    config: &LayoutConfig,
    path: impl AsRef<Path>,
    progress: ProgressReporter,
) -> Result<RenderReport> {
    let path = path.as_ref().to_owned();

    if plan.is_empty() || slides.is_empty() {
        log::info!("No slides to render, {} not written", path.display());
        return Ok(RenderReport::default());
    }

    let slides = slides.to_vec();
    let plan = plan.clone();
    let config = config.clone();

    // Composition is CPU-bound, spawn blocking
    let RenderOutput { document, report } = tokio::task::spawn_blocking(move || {
        compose(&slides, &plan, &config, &progress)
    })
    .await??;

    write_pdf(document, &path).await?;
    log::info!("Wrote {}", path.display());

    Ok(report)
}

#[allow(clippy::too_many_arguments)]
fn close_page(
    output: &mut Document,
    page: usize,
    mut content: PageContent,
    config: &LayoutConfig,
    page_width_pt: f32,
    page_height_pt: f32,
    pages_tree_id: ObjectId,
    font_id: Option<ObjectId>,
) -> Object {
    if config.show_page_number {
        let x = page_width_pt - mm_to_pt(config.margins.right_mm) - PAGE_NUMBER_INSET;
        let y = mm_to_pt(config.margins.bottom_mm);
        content.stamp_text(&(page + 1).to_string(), x, y, PAGE_NUMBER_FONT_SIZE);
    }
    log::debug!("Page {} holds {} slide(s)", page + 1, content.image_count());

    Object::Reference(content.finish(
        output,
        pages_tree_id,
        page_width_pt,
        page_height_pt,
        font_id,
    ))
}

fn to_points(rect: Rect) -> Rect {
    Rect::new(
        mm_to_pt(rect.x),
        mm_to_pt(rect.y),
        mm_to_pt(rect.width),
        mm_to_pt(rect.height),
    )
}
