//! Output page rendering
//!
//! Places source pages as XObjects on a new page and draws cell frames.

use crate::constants::FRAME_LINE_WIDTH;
use crate::layout::{PagePlacement, Rect};
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::xobject::{XObjectCache, create_page_xobject, page_box, page_rotation};

/// One output page to be rendered
pub struct PageSpec<'a> {
    /// Page width and height in points
    pub size: (f32, f32),
    /// Source pages to place
    pub placements: &'a [PagePlacement],
    /// Rectangles to outline
    pub frames: &'a [Rect],
}

/// Render a page into `output` and return its object id.
///
/// The page points at `parent_pages_id` but is not added to its `Kids`;
/// that happens when the final page order is assembled.
pub fn render_page(
    output: &mut Document,
    source: &Document,
    source_page_ids: &[ObjectId],
    spec: &PageSpec<'_>,
    parent_pages_id: ObjectId,
    cache: &mut XObjectCache,
) -> Result<ObjectId> {
    let (width, height) = spec.size;

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width),
            Object::Real(height),
        ]),
    );

    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();

    for (idx, placement) in spec.placements.iter().enumerate() {
        let Some(source_page_id) = placement
            .source_page
            .and_then(|i| source_page_ids.get(i).copied())
        else {
            continue;
        };

        let xobject_name = format!("P{}", idx);
        let xobject_id = create_page_xobject(output, source, source_page_id, cache)?;
        xobjects.set(xobject_name.as_bytes(), Object::Reference(xobject_id));

        let origin = page_box(source, source_page_id);
        content_ops.push(generate_placement_command(
            &xobject_name,
            placement,
            (origin.x, origin.y),
            page_rotation(source, source_page_id),
        ));
    }

    if !spec.frames.is_empty() {
        content_ops.push(generate_frames(spec.frames));
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Generate the content stream command that places a page.
///
/// `origin` is the lower-left corner of the source page box, which may not
/// be at (0, 0) for cropped pages. `page_rotation` is the source page's
/// clockwise `/Rotate`; it is combined with the placement's own turn so the
/// page lands upright as displayed.
fn generate_placement_command(
    xobject_name: &str,
    placement: &PagePlacement,
    origin: (f32, f32),
    page_rotation: u16,
) -> String {
    let rect = &placement.content_rect;
    let s = placement.scale;
    let (ox, oy) = origin;

    let turn = placement.rotation_degrees.round() as i32;
    let [a, b, c, d, e, f] = match (i32::from(page_rotation) + turn).rem_euclid(360) {
        // Box bottom-left lands at the top-left corner
        90 => [0.0, -s, s, 0.0, rect.x - s * oy, rect.top() + s * ox],
        // Box bottom-left lands at the top-right corner
        180 => [-s, 0.0, 0.0, -s, rect.right() + s * ox, rect.top() + s * oy],
        // Box bottom-left lands at the bottom-right corner
        270 => [0.0, s, -s, 0.0, rect.right() + s * oy, rect.y - s * ox],
        _ => [s, 0.0, 0.0, s, rect.x - s * ox, rect.y - s * oy],
    };

    format!(
        "q {} {} {} {} {} {} cm /{} Do Q\n",
        a, b, c, d, e, f, xobject_name
    )
}

/// Outline each rect with a thin solid line
fn generate_frames(frames: &[Rect]) -> String {
    let mut ops = String::new();
    ops.push_str("q\n");
    ops.push_str("0 0 0 RG\n");
    ops.push_str(&format!("{} w\n", FRAME_LINE_WIDTH));
    ops.push_str("[] 0 d\n");
    for rect in frames {
        ops.push_str(&format!(
            "{} {} {} {} re S\n",
            rect.x, rect.y, rect.width, rect.height
        ));
    }
    ops.push_str("Q\n");
    ops
}
