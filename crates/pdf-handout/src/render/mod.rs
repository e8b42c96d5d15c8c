//! PDF rendering modules for slide handouts
//!
//! This module handles all PDF-specific operations:
//! - Embedding slide rasters as image XObjects
//! - Building output pages and their stamps
//! - Deep copying page objects between documents

mod copy;
mod page;
mod raster;

pub use copy::{
    INHERITABLE_ATTRIBUTES, copy_object_deep, get_page_dimensions, inherited_attribute,
};
pub use page::*;
pub use raster::create_image_xobject;
