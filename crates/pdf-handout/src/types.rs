use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandoutError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Cannot read page geometry: {0}")]
    Probe(String),
    #[error("Cannot merge {role} document: {source}")]
    Merge {
        role: DocumentRole,
        #[source]
        source: Box<HandoutError>,
    },
    #[error("No slide images found")]
    NoSlides,
}

pub type Result<T> = std::result::Result<T, HandoutError>;

/// Which input of a merge failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Index,
    Content,
    Output,
}

impl std::fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DocumentRole::Index => "index",
            DocumentRole::Content => "content",
            DocumentRole::Output => "output",
        })
    }
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Landscape: width is the long edge (default for slide handouts)
    #[default]
    Landscape,
    /// Portrait: height is the long edge
    Portrait,
}

impl Orientation {
    /// Infer orientation from page dimensions; wider than tall is landscape
    pub fn from_dimensions(width: f32, height: f32) -> Self {
        if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied.
    ///
    /// Landscape puts the long edge horizontally, portrait puts it vertically,
    /// regardless of how a custom size was entered.
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        let (short, long) = if w <= h { (w, h) } else { (h, w) };
        match orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }
}

/// Page margins in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    pub top_mm: f32,
    pub bottom_mm: f32,
    pub left_mm: f32,
    pub right_mm: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(10.0)
    }
}

impl Margins {
    /// Create uniform margins on all sides
    pub fn uniform(margin_mm: f32) -> Self {
        Self {
            top_mm: margin_mm,
            bottom_mm: margin_mm,
            left_mm: margin_mm,
            right_mm: margin_mm,
        }
    }

    fn values(&self) -> [f32; 4] {
        [self.top_mm, self.bottom_mm, self.left_mm, self.right_mm]
    }

    pub(crate) fn all_valid(&self) -> bool {
        self.values().iter().all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Page geometry of a paginated document (millimeters)
///
/// Produced by probing an existing document so a second document can be
/// built with matching pages.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub orientation: Orientation,
}

impl PageGeometry {
    /// Geometry from a paper size and orientation
    pub fn from_paper(paper: PaperSize, orientation: Orientation) -> Self {
        let (width_mm, height_mm) = paper.dimensions_with_orientation(orientation);
        Self {
            width_mm,
            height_mm,
            orientation,
        }
    }

    /// Geometry from raw dimensions; orientation follows the dimensions
    pub fn from_dimensions_mm(width_mm: f32, height_mm: f32) -> Self {
        Self {
            width_mm,
            height_mm,
            orientation: Orientation::from_dimensions(width_mm, height_mm),
        }
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::from_paper(PaperSize::A4, Orientation::Portrait)
    }
}

/// Result of writing a content document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderReport {
    /// Pages written to the output
    pub pages_written: usize,
    /// Slides placed into their cells
    pub items_placed: usize,
    /// Slides whose raster data could not be embedded (cell left blank)
    pub skipped: usize,
}
