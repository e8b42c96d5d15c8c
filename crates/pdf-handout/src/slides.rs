//! Slide images handed over by the external slide renderer

use crate::constants::SLIDE_EXTENSIONS;
use crate::types::*;
use image::{DynamicImage, ImageFormat, ImageReader, Rgb, RgbImage};
use std::cmp::Ordering;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// One rendered slide: encoded raster bytes plus pixel dimensions.
///
/// The bytes are shared, so cloning a slide sequence is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideImage {
    data: Arc<[u8]>,
    width_px: u32,
    height_px: u32,
}

impl SlideImage {
    /// Wrap encoded bytes whose dimensions are already known
    pub fn new(data: impl Into<Arc<[u8]>>, width_px: u32, height_px: u32) -> Self {
        Self {
            data: data.into(),
            width_px,
            height_px,
        }
    }

    /// Wrap encoded bytes, reading the dimensions from the image header
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let (width_px, height_px) = ImageReader::new(Cursor::new(&data))
            .with_guessed_format()?
            .into_dimensions()?;
        Ok(Self::new(data, width_px, height_px))
    }

    /// Encode a decoded image as PNG
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let mut data = Vec::new();
        image.write_to(&mut Cursor::new(&mut data), ImageFormat::Png)?;
        Ok(Self::new(data, image.width(), image.height()))
    }

    /// A blank white slide with a black frame, standing in for a slide that
    /// could not be rendered
    pub fn placeholder(width_px: u32, height_px: u32) -> Result<Self> {
        let border = (width_px.min(height_px) / 64).max(1);
        let img = RgbImage::from_fn(width_px, height_px, |x, y| {
            let on_frame = x < border
                || y < border
                || x + border >= width_px
                || y + border >= height_px;
            if on_frame {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        Self::from_image(&DynamicImage::ImageRgb8(img))
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    /// Encoded bytes as received
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Width / height
    pub fn aspect_ratio(&self) -> f32 {
        if self.height_px == 0 {
            return 0.0;
        }
        self.width_px as f32 / self.height_px as f32
    }

    /// Decode the raster data
    pub fn decode(&self) -> Result<DynamicImage> {
        Ok(image::load_from_memory(&self.data)?)
    }
}

/// Load every slide image in a directory, in natural file-name order.
///
/// Exported decks name their images `Slide1.png`, `Slide2.png`, ...,
/// `Slide10.png`; natural ordering keeps `Slide10` after `Slide9`. Files
/// whose header cannot be read are skipped with a warning.
pub async fn load_slide_dir(dir: impl AsRef<Path>) -> Result<Vec<SlideImage>> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if is_slide_file(&path) && entry.file_type().await?.is_file() {
            paths.push(path);
        }
    }

    paths.sort_by(|a, b| natural_cmp(&file_name(a), &file_name(b)));

    let mut slides = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(&path).await?;
        match SlideImage::from_bytes(bytes) {
            Ok(slide) => slides.push(slide),
            Err(e) => log::warn!("Skipping unreadable slide {}: {}", path.display(), e),
        }
    }

    if slides.is_empty() {
        return Err(HandoutError::NoSlides);
    }

    log::info!("Loaded {} slides from {}", slides.len(), dir.display());
    Ok(slides)
}

fn is_slide_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SLIDE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Compare strings treating digit runs as numbers and letters
/// case-insensitively.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = chunks(a);
    let mut right = chunks(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = match (l, r) {
                    (Chunk::Number(x), Chunk::Number(y)) => {
                        let x = x.trim_start_matches('0');
                        let y = y.trim_start_matches('0');
                        x.len().cmp(&y.len()).then_with(|| x.cmp(y))
                    }
                    (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
                    (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
                    (Chunk::Text(x), Chunk::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

enum Chunk<'a> {
    Number(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> impl Iterator<Item = Chunk<'_>> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(end);
        rest = tail;
        Some(if digits {
            Chunk::Number(head)
        } else {
            Chunk::Text(head)
        })
    })
}
