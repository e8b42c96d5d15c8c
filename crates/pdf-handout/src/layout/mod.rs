//! Layout calculation modules for slide handouts
//!
//! This module handles all the geometric calculations for packing slides:
//! - Packing plan (rows, cell size, pages needed)
//! - Slot mapping (which page, row and column a slide lands in)
//! - Cell geometry shared by the composer and any preview

mod calculator;
mod position;
mod types;

pub use calculator::*;
pub use position::*;
pub use types::*;
