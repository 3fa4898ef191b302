//! Saddle-stitch book folding
//!
//! Source pages are paired onto landscape spreads in saddle-stitch order:
//! folding the printed spreads in half and nesting them reads in page order.
//! Pages are pushed toward the spine, so the inner margin appears on both
//! sides of the fold.

use super::assemble::assemble;
use crate::constants::{PAGES_PER_FOLDED_SHEET, PAGES_PER_SPREAD};
use crate::layout::{HorizontalAlign, PagePlacement, Rect, place_page};
use crate::render::{PageSpec, XObjectCache, displayed_size, render_page};
use crate::types::*;
use lopdf::{Document, ObjectId};

/// Source pages after padding to whole folded sheets
pub fn padded_page_count(source_pages: usize) -> usize {
    source_pages.div_ceil(PAGES_PER_FOLDED_SHEET) * PAGES_PER_FOLDED_SHEET
}

/// Spread count produced for `source_pages` pages
pub fn spread_count(source_pages: usize) -> usize {
    padded_page_count(source_pages) / PAGES_PER_SPREAD
}

/// 0-based `[left, right]` source pages of each spread, in book order.
///
/// Padding pages are `None`.
pub fn spread_order(source_pages: usize) -> Vec<[Option<usize>; 2]> {
    let padded = padded_page_count(source_pages);
    let page = |index: usize| (index < source_pages).then_some(index);

    let mut spreads = Vec::with_capacity(padded / PAGES_PER_SPREAD);
    for sheet in 0..padded / PAGES_PER_FOLDED_SHEET {
        let first = 2 * sheet;
        let last = padded - 1 - 2 * sheet;
        // Outside of the folded sheet, then inside
        spreads.push([page(last), page(first)]);
        spreads.push([page(first + 1), page(last - 1)]);
    }
    spreads
}

/// Spread width and height for pages up to `page_size`
pub fn spread_size(page_size: (f32, f32), margins: &SpreadMargins) -> (f32, f32) {
    let (pw, ph) = page_size;
    (
        2.0 * pw + 2.0 * margins.inner_pt + 2.0 * margins.outer_pt,
        ph + margins.top_pt + margins.bottom_pt,
    )
}

/// Fold `source` into a standalone document of spreads.
pub(crate) fn fold_book(
    source: &Document,
    margins: &SpreadMargins,
    short_edge: bool,
) -> Result<Document> {
    let page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();
    if page_ids.is_empty() {
        return Err(BookletError::NoPages);
    }

    // Pages are laid out as displayed, after any /Rotate
    let sizes: Vec<(f32, f32)> = page_ids
        .iter()
        .map(|&id| displayed_size(source, id))
        .collect();
    let page_size = sizes
        .iter()
        .fold((0.0f32, 0.0f32), |(w, h), &(pw, ph)| (w.max(pw), h.max(ph)));
    let (width, height) = spread_size(page_size, margins);

    let left_area = Rect::new(margins.outer_pt, margins.bottom_pt, page_size.0, page_size.1);
    let right_area = Rect::new(
        margins.outer_pt + page_size.0 + 2.0 * margins.inner_pt,
        margins.bottom_pt,
        page_size.0,
        page_size.1,
    );

    let spreads = spread_order(page_ids.len());
    log::debug!(
        "Folding {} pages into {} spreads of {:.1}x{:.1}pt",
        page_ids.len(),
        spreads.len(),
        width,
        height
    );

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut cache = XObjectCache::new();
    let mut spread_ids = Vec::with_capacity(spreads.len());

    for (index, [left, right]) in spreads.into_iter().enumerate() {
        let inside = index % 2 == 1;
        let mut placements = Vec::with_capacity(PAGES_PER_SPREAD);

        for (page, area, align) in [
            (left, &left_area, HorizontalAlign::Right),
            (right, &right_area, HorizontalAlign::Left),
        ] {
            let Some(page) = page else { continue };
            let (page_width, page_height) = sizes[page];
            let mut placement = PagePlacement {
                source_page: Some(page),
                ..place_page(area, page_width, page_height, align)
            };
            if inside && !short_edge {
                placement = placement.rotate_within(width, height);
            }
            placements.push(placement);
        }

        let spec = PageSpec {
            size: (width, height),
            placements: &placements,
            frames: &[],
        };
        spread_ids.push(render_page(
            &mut output,
            source,
            &page_ids,
            &spec,
            pages_tree_id,
            &mut cache,
        )?);
    }

    assemble(&mut output, pages_tree_id, &spread_ids);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding() {
        assert_eq!(padded_page_count(1), 4);
        assert_eq!(padded_page_count(4), 4);
        assert_eq!(padded_page_count(10), 12);
        assert_eq!(spread_count(10), 6);
    }

    #[test]
    fn test_eight_page_order() {
        let order = spread_order(8);
        assert_eq!(
            order,
            vec![
                [Some(7), Some(0)],
                [Some(1), Some(6)],
                [Some(5), Some(2)],
                [Some(3), Some(4)],
            ]
        );
    }

    #[test]
    fn test_padding_pages_are_blank() {
        let order = spread_order(3);
        assert_eq!(order, vec![[None, Some(0)], [Some(1), Some(2)]]);
    }

    #[test]
    fn test_every_page_appears_once() {
        for pages in 1..=40 {
            let mut seen: Vec<usize> = spread_order(pages)
                .into_iter()
                .flatten()
                .flatten()
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..pages).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_spread_size() {
        let size = spread_size((100.0, 200.0), &SpreadMargins::default());
        assert_eq!(size, (480.0, 260.0));
    }
}
