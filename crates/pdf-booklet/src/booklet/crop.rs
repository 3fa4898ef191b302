//! Margin cropping
//!
//! Each page's content stream is scanned for painted marks: stroked or
//! filled paths, shown text, images and form XObjects. The union of their
//! device-space extents becomes the new page box. Text extents are estimated
//! from string length and font size since glyph metrics are not loaded.

use crate::constants::{GLYPH_DESCENT_RATIO, HELVETICA_CHAR_WIDTH_RATIO};
use crate::layout::Rect;
use crate::render::{page_box, page_content};
use crate::render::{extract_number, page_resources, rect_to_array};
use crate::types::*;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Inked area of a page
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InkBounds {
    /// Nothing is painted
    Empty,
    /// Something paints without a known extent (shading fills)
    Unbounded,
    /// Union of everything painted, in default user space
    Area(Rect),
}

/// Crop every page of `doc` to its inked area grown by `padding_pt`.
///
/// Blank pages and pages with unbounded content keep their boxes.
/// Returns the number of pages cropped.
pub(crate) fn crop_pages(doc: &mut Document, padding_pt: f32) -> Result<usize> {
    let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    let mut cropped = 0;

    for (number, page_id) in page_ids.into_iter().enumerate() {
        let current = page_box(doc, page_id);
        let area = match ink_bounds(doc, page_id)? {
            InkBounds::Area(area) => area,
            InkBounds::Empty => {
                log::debug!("Page {} is blank, leaving uncropped", number + 1);
                continue;
            }
            InkBounds::Unbounded => {
                log::debug!("Page {} has unbounded content, leaving uncropped", number + 1);
                continue;
            }
        };

        let Some(target) = area.expand(padding_pt).intersect(&current) else {
            log::debug!("Page {} draws outside its page box, leaving uncropped", number + 1);
            continue;
        };

        let page = doc.get_dictionary_mut(page_id)?;
        page.set("MediaBox", rect_to_array(&target));
        page.set("CropBox", rect_to_array(&target));
        cropped += 1;
    }

    Ok(cropped)
}

/// Compute the inked area of a page.
pub fn ink_bounds(doc: &Document, page_id: ObjectId) -> Result<InkBounds> {
    let data = page_content(doc, page_id)?;
    let content = match Content::decode(&data) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("Could not parse page content, leaving uncropped: {}", e);
            return Ok(InkBounds::Unbounded);
        }
    };

    let resources = page_resources(doc, page_id);
    let mut scanner = InkScanner::new(doc, resources.as_ref());
    scanner.scan(&content.operations);
    Ok(scanner.finish())
}

// =============================================================================
// Matrices
// =============================================================================

/// PDF transformation matrix `[a b c d e f]`
type Matrix = [f32; 6];

const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// `m` applied first, then `n`
fn multiply(m: &Matrix, n: &Matrix) -> Matrix {
    [
        m[0] * n[0] + m[1] * n[2],
        m[0] * n[1] + m[1] * n[3],
        m[2] * n[0] + m[3] * n[2],
        m[2] * n[1] + m[3] * n[3],
        m[4] * n[0] + m[5] * n[2] + n[4],
        m[4] * n[1] + m[5] * n[3] + n[5],
    ]
}

fn transform(m: &Matrix, x: f32, y: f32) -> (f32, f32) {
    (x * m[0] + y * m[2] + m[4], x * m[1] + y * m[3] + m[5])
}

/// Largest length a unit vector can take under `m`, ignoring translation
fn matrix_scale(m: &Matrix) -> f32 {
    m[0].hypot(m[1]).max(m[2].hypot(m[3]))
}

fn translation(tx: f32, ty: f32) -> Matrix {
    [1.0, 0.0, 0.0, 1.0, tx, ty]
}

// =============================================================================
// Scanner
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Extent {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Extent {
    fn point(x: f32, y: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(&mut self, x: f32, y: f32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

/// Graphics state entries saved by `q` and restored by `Q`
#[derive(Clone, Copy)]
struct GraphicsState {
    ctm: Matrix,
    line_width: f32,
    font_size: f32,
    leading: f32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: IDENTITY,
            line_width: 1.0,
            font_size: 0.0,
            leading: 0.0,
        }
    }
}

/// Text and line matrices, reset by `BT`
struct TextState {
    matrix: Matrix,
    line_matrix: Matrix,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: IDENTITY,
            line_matrix: IDENTITY,
        }
    }
}

struct InkScanner<'a> {
    doc: &'a Document,
    resources: Option<&'a Dictionary>,
    state: GraphicsState,
    stack: Vec<GraphicsState>,
    /// Device-space points of the path under construction
    path: Vec<(f32, f32)>,
    text: TextState,
    extent: Option<Extent>,
    unbounded: bool,
}

impl<'a> InkScanner<'a> {
    fn new(doc: &'a Document, resources: Option<&'a Dictionary>) -> Self {
        Self {
            doc,
            resources,
            state: GraphicsState::default(),
            stack: Vec::new(),
            path: Vec::new(),
            text: TextState::default(),
            extent: None,
            unbounded: false,
        }
    }

    fn finish(self) -> InkBounds {
        if self.unbounded {
            return InkBounds::Unbounded;
        }
        match self.extent {
            Some(e) => InkBounds::Area(Rect::from_corners(e.min_x, e.min_y, e.max_x, e.max_y)),
            None => InkBounds::Empty,
        }
    }

    fn scan(&mut self, operations: &[Operation]) {
        for op in operations {
            self.apply(op);
        }
    }

    fn include_device(&mut self, x: f32, y: f32) {
        match &mut self.extent {
            Some(extent) => extent.include(x, y),
            None => self.extent = Some(Extent::point(x, y)),
        }
    }

    /// Include a rectangle given in the coordinate space of `m`
    fn include_rect(&mut self, m: &Matrix, x0: f32, y0: f32, x1: f32, y1: f32) {
        for (x, y) in [(x0, y0), (x1, y0), (x0, y1), (x1, y1)] {
            let (dx, dy) = transform(m, x, y);
            self.include_device(dx, dy);
        }
    }

    fn path_point(&mut self, x: f32, y: f32) {
        let point = transform(&self.state.ctm, x, y);
        self.path.push(point);
    }

    /// Include the current path, grown by half the line width when stroked
    fn paint_path(&mut self, stroked: bool) {
        let points = std::mem::take(&mut self.path);
        let half = if stroked {
            self.state.line_width / 2.0 * matrix_scale(&self.state.ctm)
        } else {
            0.0
        };
        for (x, y) in points {
            self.include_device(x - half, y - half);
            self.include_device(x + half, y + half);
        }
    }

    fn apply(&mut self, op: &Operation) {
        let nums: Vec<f32> = op.operands.iter().filter_map(extract_number).collect();

        match op.operator.as_str() {
            // Graphics state
            "q" => self.stack.push(self.state),
            "Q" => {
                if let Some(state) = self.stack.pop() {
                    self.state = state;
                }
            }
            "cm" if nums.len() == 6 => {
                let m = [nums[0], nums[1], nums[2], nums[3], nums[4], nums[5]];
                self.state.ctm = multiply(&m, &self.state.ctm);
            }
            "w" if nums.len() == 1 => self.state.line_width = nums[0].abs(),

            // Path construction
            "m" | "l" if nums.len() == 2 => self.path_point(nums[0], nums[1]),
            "c" if nums.len() == 6 => {
                for pair in nums.chunks_exact(2) {
                    self.path_point(pair[0], pair[1]);
                }
            }
            "v" | "y" if nums.len() == 4 => {
                for pair in nums.chunks_exact(2) {
                    self.path_point(pair[0], pair[1]);
                }
            }
            "re" if nums.len() == 4 => {
                let (x, y, w, h) = (nums[0], nums[1], nums[2], nums[3]);
                self.path_point(x, y);
                self.path_point(x + w, y);
                self.path_point(x, y + h);
                self.path_point(x + w, y + h);
            }

            // Path painting
            "S" | "s" | "B" | "B*" | "b" | "b*" => self.paint_path(true),
            "f" | "F" | "f*" => self.paint_path(false),
            "n" => self.path.clear(),
            "sh" => self.unbounded = true,

            // Text objects and positioning
            "BT" => {
                self.text.matrix = IDENTITY;
                self.text.line_matrix = IDENTITY;
            }
            "Tf" if !nums.is_empty() => self.state.font_size = nums[nums.len() - 1],
            "TL" if nums.len() == 1 => self.state.leading = nums[0],
            "Td" if nums.len() == 2 => self.move_line(nums[0], nums[1]),
            "TD" if nums.len() == 2 => {
                self.state.leading = -nums[1];
                self.move_line(nums[0], nums[1]);
            }
            "Tm" if nums.len() == 6 => {
                let m = [nums[0], nums[1], nums[2], nums[3], nums[4], nums[5]];
                self.text.matrix = m;
                self.text.line_matrix = m;
            }
            "T*" => self.next_line(),

            // Text showing
            "Tj" => {
                if let Some(len) = op.operands.first().and_then(string_len) {
                    self.show_text(len);
                }
            }
            "'" => {
                self.next_line();
                if let Some(len) = op.operands.first().and_then(string_len) {
                    self.show_text(len);
                }
            }
            "\"" => {
                self.next_line();
                if let Some(len) = op.operands.get(2).and_then(string_len) {
                    self.show_text(len);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    for item in items {
                        if let Some(len) = string_len(item) {
                            self.show_text(len);
                        } else if let Some(adjust) = extract_number(item) {
                            let dx = -adjust / 1000.0 * self.state.font_size;
                            self.advance_text(dx);
                        }
                    }
                }
            }

            // External and inline images, forms
            "Do" => {
                if let Some(Object::Name(name)) = op.operands.first() {
                    self.paint_xobject(name);
                }
            }
            "BI" | "EI" => {
                let ctm = self.state.ctm;
                self.include_rect(&ctm, 0.0, 0.0, 1.0, 1.0);
            }

            _ => {}
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.text.line_matrix = multiply(&translation(tx, ty), &self.text.line_matrix);
        self.text.matrix = self.text.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = self.state.leading;
        self.move_line(0.0, -leading);
    }

    fn advance_text(&mut self, dx: f32) {
        self.text.matrix = multiply(&translation(dx, 0.0), &self.text.matrix);
    }

    /// Include the estimated box of `chars` glyphs and advance past them
    fn show_text(&mut self, chars: usize) {
        let size = self.state.font_size.abs();
        let width = chars as f32 * size * HELVETICA_CHAR_WIDTH_RATIO;
        if width > 0.0 {
            let m = multiply(&self.text.matrix, &self.state.ctm);
            self.include_rect(&m, 0.0, -GLYPH_DESCENT_RATIO * size, width, size);
        }
        self.advance_text(width);
    }

    fn paint_xobject(&mut self, name: &[u8]) {
        let ctm = self.state.ctm;
        let Some(stream_dict) = self.lookup_xobject(name) else {
            // Unknown XObjects are assumed to fill the unit square, like images
            self.include_rect(&ctm, 0.0, 0.0, 1.0, 1.0);
            return;
        };

        let is_form = matches!(stream_dict.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Form");
        if !is_form {
            self.include_rect(&ctm, 0.0, 0.0, 1.0, 1.0);
            return;
        }

        let bbox = stream_dict
            .get(b"BBox")
            .and_then(|o| o.as_array())
            .ok()
            .filter(|a| a.len() == 4)
            .and_then(|a| {
                Some((
                    extract_number(&a[0])?,
                    extract_number(&a[1])?,
                    extract_number(&a[2])?,
                    extract_number(&a[3])?,
                ))
            });
        let form_matrix = stream_dict
            .get(b"Matrix")
            .and_then(|o| o.as_array())
            .ok()
            .filter(|a| a.len() == 6)
            .and_then(|a| {
                let values: Option<Vec<f32>> = a.iter().map(extract_number).collect();
                values.map(|v| [v[0], v[1], v[2], v[3], v[4], v[5]])
            })
            .unwrap_or(IDENTITY);

        match bbox {
            Some((x0, y0, x1, y1)) => {
                let m = multiply(&form_matrix, &ctm);
                self.include_rect(&m, x0, y0, x1, y1);
            }
            None => self.unbounded = true,
        }
    }

    /// Resolve a named XObject's stream dictionary from the page resources
    fn lookup_xobject(&self, name: &[u8]) -> Option<&'a Dictionary> {
        let doc = self.doc;
        let xobjects = match self.resources?.get(b"XObject").ok()? {
            Object::Dictionary(dict) => dict,
            Object::Reference(id) => doc.get_dictionary(*id).ok()?,
            _ => return None,
        };
        let id = xobjects.get(name).ok()?.as_reference().ok()?;
        match doc.get_object(id).ok()? {
            Object::Stream(stream) => Some(&stream.dict),
            _ => None,
        }
    }
}

fn string_len(obj: &Object) -> Option<usize> {
    match obj {
        Object::String(bytes, _) => Some(bytes.len()),
        _ => None,
    }
}
