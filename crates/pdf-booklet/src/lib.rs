//! Duplex booklet imposition
//!
//! A source PDF is cropped to its content, folded into saddle-stitch spreads,
//! and the spreads are tiled N-up onto sheets. Front and back sheets are
//! interleaved so a duplex printer produces stacks ready to cut and fold.

pub mod booklet;
pub mod constants;
pub mod interleave;
pub mod layout;
mod options;
pub mod render;
pub mod slots;
mod stats;
mod types;

pub use booklet::{Booklet, generate_booklet, load_pdf, save_pdf};
pub use interleave::{SheetRef, final_order, interleave_sheets};
pub use options::*;
pub use slots::{PageCount, Slot, SlotPlan, SlotSequence, build_back_slots, build_front_slots};
pub use stats::calculate_statistics;
pub use types::*;
