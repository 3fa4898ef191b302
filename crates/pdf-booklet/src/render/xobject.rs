//! XObject creation
//!
//! This module handles creating Form XObjects from source PDF pages,
//! which are then placed onto output pages with transformations.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::layout::Rect;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Objects already copied into an output document.
///
/// One cache should be shared by every page rendered into the same output
/// so fonts and images referenced from several pages are copied once.
#[derive(Debug, Default)]
pub struct XObjectCache {
    /// Source object id -> copied object id
    objects: HashMap<ObjectId, ObjectId>,
    /// Source page id -> form XObject id
    pages: HashMap<ObjectId, ObjectId>,
}

impl XObjectCache {
    pub fn new() -> Self {
        Self::default()
    }
}

// =============================================================================
// XObject Creation
// =============================================================================

/// Create an XObject from a source page.
///
/// The XObject can then be placed multiple times on output pages
/// with different transformations. Its `BBox` is the page's visible box,
/// so a cropped page draws only its cropped area.
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut XObjectCache,
) -> Result<ObjectId> {
    if let Some(&xobject_id) = cache.pages.get(&page_id) {
        return Ok(xobject_id);
    }

    let bounds = page_box(source, page_id);
    let content_data = page_content(source, page_id)?;

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("BBox", rect_to_array(&bounds));
    xobject_dict.set("FormType", Object::Integer(1));

    if let Some(resources) = inherited_attribute(source, page_id, b"Resources") {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, &resources, &mut cache.objects)?,
        );
    }

    let xobject_id = output.add_object(Stream::new(xobject_dict, content_data));
    cache.pages.insert(page_id, xobject_id);
    Ok(xobject_id)
}

/// Encode a rect as a PDF box array `[llx lly urx ury]`
pub(crate) fn rect_to_array(rect: &Rect) -> Object {
    Object::Array(vec![
        Object::Real(rect.x),
        Object::Real(rect.y),
        Object::Real(rect.right()),
        Object::Real(rect.top()),
    ])
}

// =============================================================================
// Page Attributes
// =============================================================================

/// Look up a page attribute, following the `Parent` chain for inherited keys.
fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = doc.get_dictionary(page_id).ok()?;
    // Page trees are shallow; the bound only guards against malformed cycles
    for _ in 0..32 {
        if let Ok(value) = current.get(key) {
            return Some(value.clone());
        }
        let parent_id = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = doc.get_dictionary(parent_id).ok()?;
    }
    None
}

/// Read a page box attribute as a rect
fn box_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Rect> {
    let value = match inherited_attribute(doc, page_id, key)? {
        Object::Reference(id) => doc.get_object(id).ok()?.clone(),
        other => other,
    };
    let arr = value.as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }
    Some(Rect::from_corners(
        extract_number(&arr[0])?,
        extract_number(&arr[1])?,
        extract_number(&arr[2])?,
        extract_number(&arr[3])?,
    ))
}

/// Visible page box: CropBox, then MediaBox, then US Letter.
pub fn page_box(doc: &Document, page_id: ObjectId) -> Rect {
    box_attribute(doc, page_id, b"CropBox")
        .or_else(|| box_attribute(doc, page_id, b"MediaBox"))
        .filter(|rect| !rect.is_empty())
        .unwrap_or_else(|| Rect::new(0.0, 0.0, DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1))
}

/// Clockwise display rotation from `/Rotate`: 0, 90, 180 or 270.
///
/// Values that are not a multiple of 90 are ignored.
pub fn page_rotation(doc: &Document, page_id: ObjectId) -> u16 {
    let value = match inherited_attribute(doc, page_id, b"Rotate") {
        Some(Object::Reference(id)) => doc.get_object(id).ok().cloned(),
        other => other,
    };
    match value.as_ref().and_then(extract_number) {
        Some(degrees) if degrees.fract() == 0.0 && degrees as i64 % 90 == 0 => {
            (degrees as i64).rem_euclid(360) as u16
        }
        _ => 0,
    }
}

/// Width and height of the page as displayed, after `/Rotate`
pub fn displayed_size(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let bounds = page_box(doc, page_id);
    match page_rotation(doc, page_id) {
        90 | 270 => (bounds.height, bounds.width),
        _ => (bounds.width, bounds.height),
    }
}

/// Page resources dictionary, resolved through references and inheritance
pub(crate) fn page_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    match inherited_attribute(doc, page_id, b"Resources")? {
        Object::Dictionary(dict) => Some(dict),
        Object::Reference(id) => doc.get_dictionary(id).ok().cloned(),
        _ => None,
    }
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Get the decoded content stream data of a page.
pub fn page_content(doc: &Document, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc.get_dictionary(page_id)?;
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()), // No content = blank page
    };

    match contents {
        Object::Reference(id) => get_single_content_stream(doc, *id),
        Object::Array(arr) => get_concatenated_content_streams(doc, arr),
        _ => Ok(Vec::new()),
    }
}

/// Get content from a single content stream reference
fn get_single_content_stream(doc: &Document, id: ObjectId) -> Result<Vec<u8>> {
    match doc.get_object(id)? {
        Object::Stream(stream) => Ok(stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone())),
        // Some writers put the stream array behind a reference
        Object::Array(arr) => get_concatenated_content_streams(doc, arr),
        _ => Ok(Vec::new()),
    }
}

/// Concatenate multiple content streams
fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for obj in refs {
        if let Object::Reference(id) = obj {
            if let Ok(stream) = doc.get_object(*id)?.as_stream() {
                let content = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                result.extend_from_slice(&content);
                result.push(b'\n');
            }
        }
    }

    Ok(result)
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// Uses a cache to avoid copying the same object multiple times. The new id
/// is cached before the referenced object is copied, so reference cycles
/// terminate.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Dictionary(new_dict))
        }
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in stream.dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Stream(Stream {
                dict: new_dict,
                content: stream.content.clone(),
                allows_compression: stream.allows_compression,
                start_position: None,
            }))
        }
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}

/// Extract numeric value from a PDF object
pub(crate) fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
