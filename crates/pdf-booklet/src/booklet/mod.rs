//! Booklet generation
//!
//! This module orchestrates the whole run:
//! 1. Crop each source page to its inked area
//! 2. Fold the pages into saddle-stitch spreads (book order)
//! 3. Plan the front and back slot sequences
//! 4. Render each side onto N-up sheets
//! 5. Interleave front and back sheets for duplex printing

mod assemble;
mod crop;
mod fold;
mod io;
mod sheets;

pub use crop::{InkBounds, ink_bounds};
pub use fold::{padded_page_count, spread_count, spread_order, spread_size};
pub use io::{load_pdf, save_pdf};

use crate::interleave::interleave_sheets;
use crate::options::BookletOptions;
use crate::render::XObjectCache;
use crate::slots::SlotPlan;
use crate::types::*;
use lopdf::{Document, ObjectId};

/// The result of a booklet run
#[derive(Debug, Clone)]
pub struct Booklet {
    /// Imposed sheets in duplex order
    pub document: Document,
    /// Intermediate book-order spreads
    pub book: Document,
    /// Slot sequences used for the sheets
    pub plan: SlotPlan,
}

/// Generate a printable booklet from `document`.
pub async fn generate_booklet(document: &Document, options: &BookletOptions) -> Result<Booklet> {
    options.validate()?;

    let document = document.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || generate_booklet_sync(document, &options)).await?
}

fn generate_booklet_sync(mut source: Document, options: &BookletOptions) -> Result<Booklet> {
    let source_pages = source.get_pages().len();
    if source_pages == 0 {
        return Err(BookletError::NoPages);
    }
    log::info!("Generating booklet from {} source pages", source_pages);

    if options.crop.enabled {
        let cropped = crop::crop_pages(&mut source, options.crop.padding_pt)?;
        log::info!("Cropped {} of {} pages", cropped, source_pages);
    }

    let book = fold::fold_book(&source, &options.spread_margins, options.short_edge)?;
    let book_page_ids: Vec<ObjectId> = book.get_pages().values().copied().collect();
    log::info!("Folded into {} book pages", book_page_ids.len());

    let plan = SlotPlan::new(book_page_ids.len(), options.grid)?;
    log::debug!("Front slots: {}", plan.front());
    log::debug!("Back slots: {}", plan.back());

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut cache = XObjectCache::new();

    let front = sheets::render_side(
        &mut output,
        &book,
        &book_page_ids,
        plan.front(),
        options,
        pages_tree_id,
        &mut cache,
    )?;
    let back = sheets::render_side(
        &mut output,
        &book,
        &book_page_ids,
        plan.back(),
        options,
        pages_tree_id,
        &mut cache,
    )?;
    log::info!(
        "Rendered {} front and {} back sheets",
        front.len(),
        back.len()
    );

    let order = interleave_sheets(front, back)?;
    assemble::assemble(&mut output, pages_tree_id, &order);
    log::info!("Booklet has {} pages", order.len());

    Ok(Booklet {
        document: output,
        book,
        plan,
    })
}
