use crate::booklet::{padded_page_count, spread_count};
use crate::options::BookletOptions;
use crate::slots::SlotPlan;
use crate::types::*;
use lopdf::Document;

/// Calculate statistics for a booklet run without rendering anything
pub fn calculate_statistics(
    document: &Document,
    options: &BookletOptions,
) -> Result<BookletStatistics> {
    let source_pages = document.get_pages().len();
    if source_pages == 0 {
        return Err(BookletError::NoPages);
    }

    let book_pages = spread_count(source_pages);
    let plan = SlotPlan::new(book_pages, options.grid)?;
    let front_sheets = plan.front_sheet_count();
    let back_sheets = plan.back_sheet_count();

    // An unbalanced plan produces no output
    let output_pages = if front_sheets == back_sheets {
        front_sheets + back_sheets
    } else {
        0
    };

    Ok(BookletStatistics {
        source_pages,
        blank_pages_added: padded_page_count(source_pages) - source_pages,
        book_pages,
        front_slots: plan.front().len(),
        back_slots: plan.back().len(),
        blank_slots: plan.front().blank_count() + plan.back().blank_count(),
        front_sheets,
        back_sheets,
        output_pages,
    })
}
