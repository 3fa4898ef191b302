//! Final document assembly

use lopdf::{Dictionary, Document, Object, ObjectId};

/// Install the page tree and catalog, with `/Kids` in `page_ids` order.
///
/// Every page must already name `pages_tree_id` as its `/Parent`.
pub(crate) fn assemble(output: &mut Document, pages_tree_id: ObjectId, page_ids: &[ObjectId]) {
    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(page_ids.len() as i64)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));
    output.trailer.set("Root", catalog_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kids_follow_given_order() {
        let mut doc = Document::with_version("1.7");
        let pages_tree_id = doc.new_object_id();
        let a = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_tree_id)),
        ]));
        let b = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_tree_id)),
        ]));

        assemble(&mut doc, pages_tree_id, &[b, a]);

        let pages: Vec<ObjectId> = doc.get_pages().values().copied().collect();
        assert_eq!(pages, vec![b, a]);
    }
}
