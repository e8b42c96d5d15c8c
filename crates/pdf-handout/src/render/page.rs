//! Output page rendering
//!
//! Pages are assembled from raw content-stream operators. Coordinates are
//! PDF points with the origin at the bottom-left corner and y increasing
//! upward.

use crate::constants::STAMP_FONT_NAME;
use crate::layout::Rect;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

// =============================================================================
// Page Content
// =============================================================================

/// Content stream and resources of one output page under construction
#[derive(Debug, Default)]
pub struct PageContent {
    ops: Vec<String>,
    xobjects: Dictionary,
    uses_font: bool,
}

impl PageContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw an image XObject scaled to exactly fill `rect` (points)
    pub fn place_image(&mut self, name: &str, xobject_id: ObjectId, rect: &Rect) {
        self.xobjects
            .set(name.as_bytes(), Object::Reference(xobject_id));
        self.ops.push(generate_placement_command(name, rect));
    }

    /// Write `text` with its baseline starting at (x, y) in points
    pub fn stamp_text(&mut self, text: &str, x: f32, y: f32, font_size: f32) {
        self.uses_font = true;
        self.ops.push(format!(
            "BT /{} {} Tf {} {} Td ({}) Tj ET\n",
            STAMP_FONT_NAME,
            font_size,
            x,
            y,
            escape_text(text)
        ));
    }

    /// Number of images placed so far
    pub fn image_count(&self) -> usize {
        self.xobjects.len()
    }

    /// Add the finished page to `output` and return its object ID.
    ///
    /// `font_id` must be supplied when any text was stamped.
    pub fn finish(
        self,
        output: &mut Document,
        parent_pages_id: ObjectId,
        width_pt: f32,
        height_pt: f32,
        font_id: Option<ObjectId>,
    ) -> ObjectId {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(parent_pages_id));
        page_dict.set("MediaBox", media_box(width_pt, height_pt));

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(self.xobjects));
        if let (true, Some(font_id)) = (self.uses_font, font_id) {
            let mut fonts = Dictionary::new();
            fonts.set(STAMP_FONT_NAME, Object::Reference(font_id));
            resources.set("Font", Object::Dictionary(fonts));
        }

        let content = self.ops.join("");
        let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        output.add_object(page_dict)
    }
}

// =============================================================================
// Document Structure
// =============================================================================

/// Add the standard Helvetica font used for stamps
pub fn create_stamp_font(output: &mut Document) -> ObjectId {
    let mut font_dict = Dictionary::new();
    font_dict.set("Type", Object::Name(b"Font".to_vec()));
    font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    output.add_object(font_dict)
}

/// Write the page tree and catalog, making `page_refs` the document's pages
/// in order.
pub fn finish_page_tree(output: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}

/// `[0 0 width height]`
pub fn media_box(width_pt: f32, height_pt: f32) -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(width_pt),
        Object::Real(height_pt),
    ])
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Generate the content stream command that draws an XObject into `rect`.
fn generate_placement_command(xobject_name: &str, rect: &Rect) -> String {
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        rect.width, rect.height, rect.x, rect.y, xobject_name
    )
}

/// Escape a string for use inside a PDF literal string
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}
