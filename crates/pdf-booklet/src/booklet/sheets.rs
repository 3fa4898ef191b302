//! N-up sheet rendering

use crate::layout::{HorizontalAlign, Rect, cell_bounds, cell_position, create_grid_layout, place_page};
use crate::options::BookletOptions;
use crate::render::{PageSpec, XObjectCache, displayed_size, render_page};
use crate::slots::{Slot, SlotSequence};
use crate::types::*;
use lopdf::{Document, ObjectId};

/// Render one side's slot sequence onto sheets, returning the sheet page ids.
///
/// `book_page_ids` holds the book-order spreads; slot `n` refers to
/// `book_page_ids[n - 1]`.
pub(crate) fn render_side(
    output: &mut Document,
    book: &Document,
    book_page_ids: &[ObjectId],
    sequence: &SlotSequence,
    options: &BookletOptions,
    pages_tree_id: ObjectId,
    cache: &mut XObjectCache,
) -> Result<Vec<ObjectId>> {
    sequence.check_bounds(book_page_ids.len())?;

    let (width, height) = options.sheet_dimensions_pt();
    let layout = create_grid_layout(options.grid, Rect::new(0.0, 0.0, width, height));

    // Blank slots are outlined at the size of the first spread
    let blank_size = book_page_ids.first().map(|&id| displayed_size(book, id));

    let mut sheet_ids = Vec::with_capacity(sequence.sheet_count(options.grid));
    for (sheet, cells) in sequence.sheets(options.grid).enumerate() {
        let mut placements = Vec::with_capacity(cells.len());
        let mut frames = Vec::new();

        for (cell, slot) in cells.iter().enumerate() {
            let area = cell_bounds(&layout, cell_position(&layout, cell));
            match *slot {
                Slot::Page(n) => {
                    let (page_width, page_height) = displayed_size(book, book_page_ids[n - 1]);
                    let mut placement =
                        place_page(&area, page_width, page_height, HorizontalAlign::Center);
                    placement.source_page = Some(n - 1);
                    if options.frame {
                        frames.push(placement.content_rect);
                    }
                    placements.push(placement);
                }
                Slot::Blank => {
                    if let Some((w, h)) = blank_size.filter(|_| options.frame) {
                        frames.push(place_page(&area, w, h, HorizontalAlign::Center).content_rect);
                    }
                }
            }
        }

        log::debug!(
            "{:?} sheet {}: {} spreads, {} blank",
            sequence.side(),
            sheet + 1,
            placements.len(),
            cells.len() - placements.len()
        );

        let spec = PageSpec {
            size: (width, height),
            placements: &placements,
            frames: &frames,
        };
        sheet_ids.push(render_page(output, book, book_page_ids, &spec, pages_tree_id, cache)?);
    }

    Ok(sheet_ids)
}
