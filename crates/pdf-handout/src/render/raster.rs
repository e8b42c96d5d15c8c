//! Image XObject creation
//!
//! Slides are decoded, flattened to 8-bit RGB and embedded as
//! Flate-compressed image XObjects. The decoded buffer lives only for the
//! duration of one call.

use crate::slides::SlideImage;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Embed a slide as an image XObject and return its object ID.
///
/// Fails when the slide's raster data cannot be decoded; nothing is added
/// to the document in that case.
pub fn create_image_xobject(output: &mut Document, slide: &SlideImage) -> Result<ObjectId> {
    let rgb = slide.decode()?.into_rgb8();
    let (width, height) = rgb.dimensions();

    let dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(width as i64)),
        ("Height", Object::Integer(height as i64)),
        ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
    ]);

    let mut stream = Stream::new(dict, rgb.into_raw());
    // An uncompressed stream is still valid
    if let Err(e) = stream.compress() {
        log::debug!("Image stream left uncompressed: {}", e);
    }

    Ok(output.add_object(stream))
}
