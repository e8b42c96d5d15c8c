//! Page geometry probing
//!
//! Reads the first page of an existing document so another document can be
//! built with the same page size. Orientation is derived from the measured
//! page, never taken from the caller's settings.

use crate::constants::pt_to_mm;
use crate::io::load_pdf;
use crate::render::get_page_dimensions;
use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Geometry of the document's first page
pub fn probe_geometry(doc: &Document) -> Result<PageGeometry> {
    let first_page = doc
        .get_pages()
        .values()
        .next()
        .copied()
        .ok_or_else(|| HandoutError::Probe("document has no pages".to_string()))?;

    let (width_pt, height_pt) = get_page_dimensions(doc, first_page)?;
    if !(width_pt > 0.0 && height_pt > 0.0) {
        return Err(HandoutError::Probe(format!(
            "first page has no area ({}x{}pt)",
            width_pt, height_pt
        )));
    }

    let geometry = PageGeometry::from_dimensions_mm(pt_to_mm(width_pt), pt_to_mm(height_pt));
    log::debug!(
        "Probed {:.1}x{:.1}mm {:?}",
        geometry.width_mm,
        geometry.height_mm,
        geometry.orientation
    );
    Ok(geometry)
}

/// Load a document and probe its first page
pub async fn probe_file(path: impl AsRef<Path>) -> Result<PageGeometry> {
    let path = path.as_ref();
    let doc = load_pdf(path)
        .await
        .map_err(|e| HandoutError::Probe(format!("{}: {}", path.display(), e)))?;
    probe_geometry(&doc)
}
