//! Slide handout layout
//!
//! Packs a sequence of slide images onto a paper grid, composes the
//! paginated content PDF and merges it with a separately built index
//! document.

pub mod constants;
pub mod layout;
pub mod render;

mod compose;
mod io;
mod merge;
mod options;
mod probe;
mod progress;
mod prompt;
mod slides;
mod types;

pub use compose::{RenderOutput, compose, render_to_file};
pub use io::{load_pdf, save_pdf};
pub use layout::{
    LayoutPlan, PagePosition, Rect, compute_layout, locate, plan_for_slides, position_of,
};
pub use merge::{merge, merge_and_write, merge_documents, merge_files};
pub use options::*;
pub use probe::{probe_file, probe_geometry};
pub use progress::{Progress, ProgressReporter};
pub use prompt::index_prompt;
pub use slides::{SlideImage, load_slide_dir, natural_cmp};
pub use types::*;
