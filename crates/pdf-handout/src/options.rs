use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Layout configuration for a slide handout.
///
/// Immutable per computation: callers that edit settings interactively
/// build a fresh value and call [`crate::compute_layout`] again.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    // Grid
    pub columns: usize,

    // Paper
    pub paper_size: PaperSize,
    pub orientation: Orientation,

    // Spacing
    pub margins: Margins,
    pub h_spacing_mm: f32,
    pub v_spacing_mm: f32,

    // Stamps
    pub show_item_locator: bool,
    pub show_page_number: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: 2,
            paper_size: PaperSize::A4,
            orientation: Orientation::Landscape,
            margins: Margins::default(),
            h_spacing_mm: 5.0,
            v_spacing_mm: 5.0,
            show_item_locator: true,
            show_page_number: true,
        }
    }
}

impl LayoutConfig {
    /// Page size in millimeters with orientation applied
    pub fn page_dimensions_mm(&self) -> (f32, f32) {
        self.paper_size.dimensions_with_orientation(self.orientation)
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config = serde_json::from_slice(&bytes)
            .map_err(|e| HandoutError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| HandoutError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options.
    ///
    /// Only rejects values that make the grid meaningless. A configuration
    /// whose cells end up with no usable area still passes; the plan is
    /// degenerate but renders without failing.
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(HandoutError::Config(
                "At least one column is required".to_string(),
            ));
        }

        if !self.margins.all_valid() {
            return Err(HandoutError::Config(
                "Margins must be non-negative".to_string(),
            ));
        }

        for (name, value) in [
            ("Horizontal spacing", self.h_spacing_mm),
            ("Vertical spacing", self.v_spacing_mm),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(HandoutError::Config(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        let (w, h) = self.paper_size.dimensions_mm();
        if !(w > 0.0 && h > 0.0) {
            return Err(HandoutError::Config(format!(
                "Paper size must be positive, got {}x{}mm",
                w, h
            )));
        }

        Ok(())
    }
}
