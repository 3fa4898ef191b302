//! Layout calculation modules for booklet generation
//!
//! This module handles all the geometric calculations:
//! - Grid layout (cell dimensions and positions on a sheet side)
//! - Content placement (fitting, alignment and 180° turns)

mod grid;
mod placement;
mod types;

pub use grid::*;
pub use placement::*;
pub use types::*;
