use lopdf::{Dictionary, Document, Object};
use pdf_booklet::*;

fn document_with_pages(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..num_pages)
        .map(|_| {
            Object::Reference(doc.add_object(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
            ])))
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(num_pages as i64)),
        ])),
    );
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);
    doc
}

#[test]
fn test_stats_ten_pages() {
    let stats =
        calculate_statistics(&document_with_pages(10), &BookletOptions::default()).unwrap();

    assert_eq!(stats.source_pages, 10);
    assert_eq!(stats.blank_pages_added, 2);
    assert_eq!(stats.book_pages, 6);
    assert_eq!(stats.front_slots, 3);
    assert_eq!(stats.back_slots, 4);
    assert_eq!(stats.blank_slots, 1);
    assert_eq!(stats.front_sheets, 1);
    assert_eq!(stats.back_sheets, 1);
    assert_eq!(stats.output_pages, 2);
    assert!(stats.is_balanced());
}

#[test]
fn test_stats_forty_pages() {
    let stats =
        calculate_statistics(&document_with_pages(40), &BookletOptions::default()).unwrap();

    assert_eq!(stats.blank_pages_added, 0);
    assert_eq!(stats.book_pages, 20);
    assert_eq!(stats.front_sheets, 2);
    assert_eq!(stats.back_sheets, 2);
    assert_eq!(stats.output_pages, 4);
    assert_eq!(stats.blank_slots, 0);
}

#[test]
fn test_stats_book_pages_formula() {
    for pages in 1..=50 {
        let stats =
            calculate_statistics(&document_with_pages(pages), &BookletOptions::default()).unwrap();
        assert_eq!(stats.book_pages, pages.div_ceil(4) * 2, "P={}", pages);
        assert_eq!(
            stats.output_pages,
            stats.front_sheets + stats.back_sheets,
            "P={}",
            pages
        );
    }
}

#[test]
fn test_stats_unbalanced_grid() {
    let mut options = BookletOptions::default();
    options.grid = SheetGrid::new(1, 3);

    // Six book pages: three fronts on one sheet, four backs on two
    let stats = calculate_statistics(&document_with_pages(12), &options).unwrap();
    assert_eq!(stats.front_sheets, 1);
    assert_eq!(stats.back_sheets, 2);
    assert!(!stats.is_balanced());
    assert_eq!(stats.output_pages, 0);
}

#[test]
fn test_stats_empty_document() {
    let result = calculate_statistics(&document_with_pages(0), &BookletOptions::default());
    assert!(matches!(result, Err(BookletError::NoPages)));
}
