use std::path::PathBuf;

mod handlers;
mod worker;

// Re-export types from library crates
pub use pdf_handout::{LayoutConfig, LayoutPlan, RenderReport, SlideImage};
pub use worker::{spawn_worker, worker_task};

/// Commands sent from the caller to the worker
#[derive(Debug)]
pub enum HandoutCommand {
    LoadSlides {
        dir: PathBuf,
    },
    LoadConfig {
        path: PathBuf,
    },
    /// Recompute the layout plan; queued recalculations collapse into the
    /// newest one
    CalculateLayout {
        item_count: usize,
        aspect_ratio: f32,
        config: LayoutConfig,
    },
    Render {
        slides: Vec<SlideImage>,
        config: LayoutConfig,
        output_path: PathBuf,
    },
    IndexPrompt {
        item_count: usize,
        aspect_ratio: f32,
        config: LayoutConfig,
    },
    /// Build an index matching the content document's pages and write
    /// index followed by content to `output_path`
    BuildIndexed {
        markup: String,
        content_path: PathBuf,
        output_path: PathBuf,
        font_path: Option<PathBuf>,
    },
}

/// Updates sent from the worker to the caller
#[derive(Debug, Clone)]
pub enum HandoutUpdate {
    Progress {
        stage: Stage,
        current: usize,
        total: usize,
        message: String,
    },
    SlidesLoaded {
        slides: Vec<SlideImage>,
    },
    ConfigLoaded {
        config: LayoutConfig,
    },
    LayoutCalculated {
        plan: LayoutPlan,
    },
    RenderComplete {
        path: PathBuf,
        report: RenderReport,
    },
    IndexPromptReady {
        prompt: String,
    },
    IndexedComplete {
        path: PathBuf,
        index_pages: usize,
        total_pages: usize,
    },
    Error {
        stage: Stage,
        message: String,
    },
}

/// Pipeline stage a progress event or failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Layout,
    Render,
    Index,
    Merge,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Stage::Load => "load",
            Stage::Layout => "layout",
            Stage::Render => "render",
            Stage::Index => "index",
            Stage::Merge => "merge",
        })
    }
}
