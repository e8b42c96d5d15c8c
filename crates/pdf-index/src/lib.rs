//! Index document builder
//!
//! Turns a small markdown subset into a paginated PDF whose pages match the
//! geometry of an existing content document, ready to be merged in front of
//! it.

mod builder;
mod font;
mod markup;
mod text;
mod types;

pub use builder::{build_index, build_index_bytes, generate_index};
pub use markup::{Block, BulletItem, parse_markup};
pub use text::{PlacedLine, TextStyle, paginate};
pub use types::*;
