//! Geometry engine.
//!
//! Pure functions over the element tree: container-relative offsets across
//! nested, independently scrolled offset parents, mapping of drag positions
//! into container space, and locating a pointer inside an element's box.

use crate::dom::{Document, ElementId};
use crate::pointer::PointerEvent;
use crate::profile_scope;
use crate::types::{Offset, Point, Rect, Size};

/// Offset of `element` relative to `container`.
///
/// Walks the offset-parent chain, adding each ancestor's own offset and
/// subtracting the scroll of every scrolled ancestor other than `body`. The
/// walk stops below `container` unless `relative_to_root` is set, in which
/// case it runs to the top of the tree and `container` is ignored.
///
/// If the container itself is scrolled, its scroll is subtracted once more,
/// unless the element or its offset parent is absolute/fixed positioned.
pub fn compute_offset(
    doc: &Document,
    element: ElementId,
    container: Option<ElementId>,
    relative_to_root: bool,
) -> Offset {
    profile_scope!("compute_offset");

    let mut out = doc.offset(element);
    let own_parent = doc.offset_parent(element);

    let starts_walk = relative_to_root
        || container.is_some_and(|c| element != c && own_parent != Some(c));
    let mut op = if starts_walk { own_parent } else { None };

    while let Some(ancestor) = op {
        out += doc.offset(ancestor);
        if ancestor != doc.body() && doc.is_scrolled(ancestor) {
            out -= doc.scroll(ancestor);
        }
        let next = doc.offset_parent(ancestor);
        op = if !relative_to_root && next == container { None } else { next };
    }

    if let Some(c) = container.filter(|&c| !relative_to_root && doc.is_scrolled(c)) {
        let parent_kind = own_parent.map(|p| doc.position_kind(p)).unwrap_or_default();
        let kind = doc.position_kind(element);
        if !kind.is_out_of_flow() && !parent_kind.is_out_of_flow() {
            out -= doc.scroll(c);
        }
    }

    out
}

/// Measured size of an element (`offsetWidth`/`offsetHeight`).
#[inline]
pub fn size(doc: &Document, element: ElementId) -> Size {
    doc.size(element)
}

/// Map a drag position into container space.
///
/// `pos` is relative to the element's offset parent, which is what the drag
/// session writes. For nested draggables the offset parent is not the
/// container, so its own container-relative offset is added. Returns `None`
/// when the element has no offset parent: its position is indeterminate and
/// callers must not move it.
pub fn ui_position(doc: &Document, element: ElementId, pos: Offset, container: Option<ElementId>) -> Option<Offset> {
    let offset_parent = doc.offset_parent(element)?;
    let mut p = pos;
    if Some(offset_parent) != container {
        p += compute_offset(doc, offset_parent, container, false);
    }
    Some(p)
}

/// Page location of an event. Touch events use the first point of the first
/// non-empty touch list; no event at all reads as the origin.
pub fn page_location(event: Option<&PointerEvent>) -> Point {
    let Some(event) = event else {
        return Point::ORIGIN;
    };
    match event.touch_list() {
        Some(touches) => touches.first().copied().unwrap_or(event.page),
        None => event.page,
    }
}

/// Viewport-relative box of an element (`getBoundingClientRect`).
pub fn bounding_client_rect(doc: &Document, element: ElementId) -> Rect {
    if !doc.is_connected(element) {
        return Rect::default();
    }
    let page = compute_offset(doc, element, None, true);
    Rect::new(page - doc.window_scroll(), doc.size(element))
}

/// Page-space box of an element.
pub fn page_rect(doc: &Document, element: ElementId) -> Rect {
    let rect = bounding_client_rect(doc, element);
    let origin = Offset::new(rect.left, rect.top) + doc.window_scroll() - doc.client_origin();
    Rect::new(origin, Size::new(rect.width, rect.height))
}

/// Fractional position of the pointer inside `element`'s box, roughly in
/// `[0, 1] x [0, 1]`.
///
/// When the measured box width (or height) is zero, `offset size * zoom` is
/// used instead. A box that is zero-sized both ways yields non-finite values;
/// callers must guard against them.
pub fn position_within_element(doc: &Document, event: &PointerEvent, element: ElementId, zoom: f64) -> (f64, f64) {
    let box_ = page_rect(doc, element);
    let size = doc.size(element);
    let cl = page_location(Some(event));

    let w = if box_.width != 0.0 { box_.width } else { size.width * zoom };
    let h = if box_.height != 0.0 { box_.height } else { size.height * zoom };

    ((cl.x - box_.left) / w, (cl.y - box_.top) / h)
}
