//! PDF rendering modules for booklet generation
//!
//! This module handles all PDF-specific operations:
//! - Creating XObjects from source pages
//! - Building output pages from placements
//! - Reading inherited page attributes
//! - Deep copying PDF objects

mod page;
mod xobject;

pub use page::*;
pub use xobject::{
    XObjectCache, copy_object_deep, create_page_xobject, displayed_size, page_box, page_content,
    page_rotation,
};
pub(crate) use xobject::{extract_number, page_resources, rect_to_array};
