use crate::font::TextFont;
use crate::markup::parse_markup;
use crate::text::paginate;
use crate::types::*;
use pdf_handout::constants::mm_to_pt;
use pdf_handout::render::media_box;
use printpdf::*;
use std::path::Path;

/// Page boxes rewritten with the exact geometry
const PAGE_BOXES: &[&[u8]] = &[b"MediaBox", b"CropBox", b"TrimBox"];

/// Lay out and serialize the pages with printpdf.
///
/// printpdf rounds page sizes to whole points, so the boxes in these bytes
/// are only approximately the requested geometry.
fn render_pages(markup: &str, options: &IndexOptions) -> Vec<u8> {
    let geometry = options.page_geometry();
    let width_pt = mm_to_pt(geometry.width_mm);
    let height_pt = mm_to_pt(geometry.height_mm);
    // Small pages keep at least half their extent for text
    let margin_pt = options
        .margin_pt
        .min(width_pt / 4.0)
        .min(height_pt / 4.0)
        .max(0.0);

    let mut doc = PdfDocument::new(&options.title);
    let font = TextFont::select(&mut doc, markup, options.font_path.as_deref());

    let blocks = parse_markup(markup);
    let laid_out = paginate(
        &blocks,
        width_pt,
        height_pt,
        margin_pt,
        font.bullet(),
        |text, style| font.measure(text, style),
    );
    log::debug!(
        "Index: {} blocks on {} page(s) of {:.1}x{:.1}mm",
        blocks.len(),
        laid_out.len(),
        geometry.width_mm,
        geometry.height_mm
    );

    let mut pages = Vec::with_capacity(laid_out.len());
    for lines in &laid_out {
        let mut ops = Vec::new();
        for line in lines {
            font.write_line(&mut ops, line);
        }
        pages.push(PdfPage::new(
            Mm(geometry.width_mm),
            Mm(geometry.height_mm),
            ops,
        ));
    }

    doc.pages = pages;

    let mut warnings = Vec::new();
    doc.save(&PdfSaveOptions::default(), &mut warnings)
}

/// Build the index document, ready to be merged in front of the content.
///
/// Every page gets the options' geometry verbatim. Empty or irregular
/// markup still yields a document with at least one page.
pub fn build_index(markup: &str, options: &IndexOptions) -> Result<lopdf::Document> {
    let geometry = options.page_geometry();
    let width_pt = mm_to_pt(geometry.width_mm);
    let height_pt = mm_to_pt(geometry.height_mm);

    let mut doc = lopdf::Document::load_mem(&render_pages(markup, options))?;
    let page_ids: Vec<_> = doc.get_pages().into_values().collect();
    for page_id in page_ids {
        let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
        for &key in PAGE_BOXES {
            if key == b"MediaBox" || page.has(key) {
                page.set(key, media_box(width_pt, height_pt));
            }
        }
    }
    Ok(doc)
}

/// Build the index document as PDF bytes
pub fn build_index_bytes(markup: &str, options: &IndexOptions) -> Result<Vec<u8>> {
    let mut doc = build_index(markup, options)?;
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// Build the index document and write it to `output_path`, returning the
/// number of pages.
pub async fn generate_index(
    markup: &str,
    options: &IndexOptions,
    output_path: impl AsRef<Path>,
) -> Result<usize> {
    let markup = markup.to_owned();
    let options = options.clone();
    let output_path = output_path.as_ref().to_owned();

    // Text layout and font parsing are CPU-bound, spawn blocking
    let (bytes, pages) = tokio::task::spawn_blocking(move || {
        let mut doc = build_index(&markup, &options)?;
        let pages = doc.get_pages().len();
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok::<_, IndexError>((bytes, pages))
    })
    .await??;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&output_path, bytes).await?;

    log::info!("Wrote {} index page(s) to {}", pages, output_path.display());
    Ok(pages)
}
