use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdf_booklet::booklet::{InkBounds, ink_bounds};
use pdf_booklet::layout::Rect;
use pdf_booklet::render::{page_box, page_content};
use pdf_booklet::*;

/// Letter-sized pages, each filling a 200x300pt rectangle at (100, 150)
fn create_test_pdf(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            b"q 0 0 0 rg 100 150 200 300 re f Q".to_vec(),
        ));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

fn rotate_pages(doc: &mut Document, degrees: i64) {
    for id in page_ids(doc) {
        doc.get_dictionary_mut(id)
            .unwrap()
            .set("Rotate", Object::Integer(degrees));
    }
}

fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

fn content_string(doc: &Document, page_id: ObjectId) -> String {
    String::from_utf8(page_content(doc, page_id).unwrap()).unwrap()
}

#[test]
fn test_ink_bounds_of_filled_rect() {
    let doc = create_test_pdf(1);
    let bounds = ink_bounds(&doc, page_ids(&doc)[0]).unwrap();
    assert_eq!(bounds, InkBounds::Area(Rect::new(100.0, 150.0, 200.0, 300.0)));
}

#[tokio::test]
async fn test_output_is_interleaved_a4_sheets() {
    let doc = create_test_pdf(10);
    let options = BookletOptions::default();

    let booklet = generate_booklet(&doc, &options).await.unwrap();

    // 10 pages pad to 12, folding into 6 book pages: one front and one back sheet
    assert_eq!(booklet.book.get_pages().len(), 6);
    assert_eq!(booklet.plan.page_count(), 6);

    let sheets = page_ids(&booklet.document);
    assert_eq!(sheets.len(), 2);

    let (a4_width, a4_height) = options.sheet_dimensions_pt();
    for id in sheets {
        let media = page_box(&booklet.document, id);
        assert!((media.width - a4_width).abs() < 0.01);
        assert!((media.height - a4_height).abs() < 0.01);
    }
}

#[tokio::test]
async fn test_cropped_pages_size_the_spreads() {
    let doc = create_test_pdf(4);
    let booklet = generate_booklet(&doc, &BookletOptions::default())
        .await
        .unwrap();

    // Two 200x300 pages, 100pt inner and 40pt outer on each, 30pt top and bottom
    for id in page_ids(&booklet.book) {
        let spread = page_box(&booklet.book, id);
        assert_eq!((spread.width, spread.height), (680.0, 360.0));
    }
}

#[tokio::test]
async fn test_uncropped_pages_keep_their_size() {
    let doc = create_test_pdf(4);
    let mut options = BookletOptions::default();
    options.crop.enabled = false;

    let booklet = generate_booklet(&doc, &options).await.unwrap();
    let spread = page_box(&booklet.book, page_ids(&booklet.book)[0]);
    assert_eq!((spread.width, spread.height), (1504.0, 852.0));
}

#[tokio::test]
async fn test_rotated_pages_fold_as_displayed() {
    let mut doc = create_test_pdf(4);
    rotate_pages(&mut doc, 90);

    let mut options = BookletOptions::default();
    options.crop.enabled = false;
    options.spread_margins = SpreadMargins {
        inner_pt: 0.0,
        outer_pt: 0.0,
        top_pt: 0.0,
        bottom_pt: 0.0,
    };

    let booklet = generate_booklet(&doc, &options).await.unwrap();
    let spreads = page_ids(&booklet.book);
    let spread = page_box(&booklet.book, spreads[0]);
    assert_eq!((spread.width, spread.height), (1584.0, 612.0));

    // Each 612x792 page is turned a quarter clockwise into its 792x612 half
    let content = content_string(&booklet.book, spreads[0]);
    assert!(content.starts_with("q 0 -1 1 0 0 612 cm "), "{}", content);
    assert!(content.contains("q 0 -1 1 0 792 612 cm "), "{}", content);
}

#[tokio::test]
async fn test_long_edge_turns_inside_spreads() {
    let doc = create_test_pdf(4);

    let booklet = generate_booklet(&doc, &BookletOptions::default())
        .await
        .unwrap();
    let spreads = page_ids(&booklet.book);
    assert!(content_string(&booklet.book, spreads[1]).starts_with("q 1 0 0 1 "));

    let mut options = BookletOptions::default();
    options.short_edge = false;
    let booklet = generate_booklet(&doc, &options).await.unwrap();
    let spreads = page_ids(&booklet.book);
    assert!(content_string(&booklet.book, spreads[0]).starts_with("q 1 0 0 1 "));
    assert!(content_string(&booklet.book, spreads[1]).starts_with("q -1 0 0 -1 "));
}

#[tokio::test]
async fn test_blank_slots_are_framed() {
    let doc = create_test_pdf(10);
    let booklet = generate_booklet(&doc, &BookletOptions::default())
        .await
        .unwrap();

    // Back side is 4,2,{},6: three spreads and one blank cell
    let sheets = page_ids(&booklet.document);
    let front = content_string(&booklet.document, sheets[0]);
    let back = content_string(&booklet.document, sheets[1]);
    assert_eq!(front.matches("re S").count(), 3);
    assert_eq!(front.matches(" Do Q").count(), 3);
    assert_eq!(back.matches("re S").count(), 4);
    assert_eq!(back.matches(" Do Q").count(), 3);
}

#[tokio::test]
async fn test_no_frames_when_disabled() {
    let doc = create_test_pdf(10);
    let mut options = BookletOptions::default();
    options.frame = false;

    let booklet = generate_booklet(&doc, &options).await.unwrap();
    for id in page_ids(&booklet.document) {
        assert!(!content_string(&booklet.document, id).contains("re S"));
    }
}

#[tokio::test]
async fn test_unbalanced_grid_fails() {
    let doc = create_test_pdf(12);
    let mut options = BookletOptions::default();
    options.grid = SheetGrid::new(1, 3);

    let result = generate_booklet(&doc, &options).await;
    assert!(matches!(
        result,
        Err(BookletError::MismatchedSheetCounts { front: 1, back: 2 })
    ));
}

#[tokio::test]
async fn test_empty_document() {
    let doc = create_test_pdf(0);
    let result = generate_booklet(&doc, &BookletOptions::default()).await;
    assert!(matches!(result, Err(BookletError::NoPages)));
}

#[tokio::test]
async fn test_invalid_options_rejected() {
    let doc = create_test_pdf(4);
    let mut options = BookletOptions::default();
    options.grid = SheetGrid::new(0, 0);

    let result = generate_booklet(&doc, &options).await;
    assert!(matches!(result, Err(BookletError::Config(_))));
}

#[tokio::test]
async fn test_save_and_load_booklet() {
    use tempfile::NamedTempFile;

    let doc = create_test_pdf(8);
    let booklet = generate_booklet(&doc, &BookletOptions::default())
        .await
        .unwrap();

    let temp = NamedTempFile::new().unwrap();
    save_pdf(booklet.document, temp.path()).await.unwrap();

    let loaded = load_pdf(temp.path()).await.unwrap();
    assert_eq!(loaded.get_pages().len(), 2);
}
