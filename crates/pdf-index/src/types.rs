use pdf_handout::PageGeometry;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, IndexError>;

/// Options for building an index document
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Page geometry applied to every page; A4 portrait when `None`
    pub geometry: Option<PageGeometry>,
    /// Margin on all four sides in points
    pub margin_pt: f32,
    /// Font file tried before the system font candidates
    pub font_path: Option<PathBuf>,
    /// Document title written to the PDF info dictionary
    pub title: String,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            geometry: None,
            margin_pt: 72.0,
            font_path: None,
            title: "Index".to_string(),
        }
    }
}

impl IndexOptions {
    pub fn with_geometry(geometry: PageGeometry) -> Self {
        Self {
            geometry: Some(geometry),
            ..Self::default()
        }
    }

    /// The geometry pages are built with
    pub fn page_geometry(&self) -> PageGeometry {
        self.geometry.unwrap_or_default()
    }
}
