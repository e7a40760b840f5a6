//! Element tree model.
//!
//! An arena-backed stand-in for the browser DOM. The rendering layer creates
//! elements here and writes their measured layout (offset within the offset
//! parent, size, scroll). The interactive layer reads that layout, matches
//! selectors against it and writes positions back.
//!
//! Element ids are never reused, so a stale id held across a removal is
//! detected by [`Document::contains`] instead of aliasing a new element.

use crate::constants::ATTRIBUTE_ID;
use crate::selector::{Matchable, Selector};
use crate::types::{Offset, PositionKind, Size};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;

/// Opaque handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Measured box of an element, relative to its offset parent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Layout {
    pub offset: Offset,
    pub size: Size,
    pub scroll: Offset,
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: IndexMap<String, String>,
    classes: Vec<String>,
    style: IndexMap<String, String>,
    position: PositionKind,
    hidden: bool,
    layout: Layout,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            parent: None,
            children: Vec::new(),
            attributes: IndexMap::new(),
            classes: Vec::new(),
            style: IndexMap::new(),
            position: PositionKind::Static,
            hidden: false,
            layout: Layout::default(),
        }
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn position(&self) -> PositionKind {
        self.position
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Space separated class list, as `className` would report it.
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }
}

impl Matchable for Element {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// The element tree. `body` is the document root; elements not reachable
/// from it are detached and have no offset parent.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: HashMap<ElementId, Element>,
    next_id: u64,
    body: ElementId,
    /// Page scroll of the viewport (`pageXOffset`/`pageYOffset`).
    window_scroll: Offset,
    /// Border of the root element (`clientLeft`/`clientTop`).
    client_origin: Offset,
    revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: HashMap::new(),
            next_id: 0,
            body: ElementId(0),
            window_scroll: Offset::ZERO,
            client_origin: Offset::ZERO,
            revision: 0,
        };
        doc.body = doc.create_element("body");
        doc
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Bumped on every structural or layout change; used to invalidate caches.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(&id)
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.touch();
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ------------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Element::new(tag));
        self.touch();
        id
    }

    /// Append `child` as the last child of `parent`, detaching it from its
    /// current parent first. Returns false for unknown ids or if the move
    /// would create a cycle.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if !self.contains(parent) || !self.contains(child) || parent == child {
            return false;
        }
        if self.ancestors(parent).any(|a| a == child) {
            return false;
        }
        self.detach(child);
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
        true
    }

    /// Remove `id` from its parent without deleting it.
    pub fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.get(id).and_then(Element::parent) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != id);
        }
        if let Some(el) = self.get_mut(id) {
            el.parent = None;
        }
    }

    /// Delete `id` and its whole subtree. Returns the removed ids, root first.
    pub fn remove(&mut self, id: ElementId) -> Vec<ElementId> {
        if !self.contains(id) || id == self.body {
            return Vec::new();
        }
        self.detach(id);
        let removed = self.subtree(id);
        for r in &removed {
            self.nodes.remove(r);
        }
        self.touch();
        removed
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(Element::parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(Element::children).unwrap_or(&[])
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// `id` and its descendants in document order.
    pub fn subtree(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if !self.contains(next) {
                continue;
            }
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// True if `id` is `ancestor` or one of its descendants.
    pub fn is_inclusive_descendant(&self, id: ElementId, ancestor: ElementId) -> bool {
        id == ancestor || self.ancestors(id).any(|a| a == ancestor)
    }

    /// Whether the element is reachable from `body`.
    pub fn is_connected(&self, id: ElementId) -> bool {
        self.contains(id) && self.is_inclusive_descendant(id, self.body)
    }

    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    /// The nearest positioned ancestor, falling back to `body`. `None` for
    /// `body` itself, detached or hidden elements, and fixed elements.
    pub fn offset_parent(&self, id: ElementId) -> Option<ElementId> {
        let el = self.get(id)?;
        if id == self.body || el.hidden || el.position == PositionKind::Fixed || !self.is_connected(id) {
            return None;
        }
        for ancestor in self.ancestors(id) {
            if ancestor == self.body {
                return Some(ancestor);
            }
            if self.get(ancestor).is_some_and(|a| a.position.is_positioned()) {
                return Some(ancestor);
            }
        }
        None
    }

    /// Position within the offset parent (`offsetLeft`/`offsetTop`).
    pub fn offset(&self, id: ElementId) -> Offset {
        self.get(id).map(|e| e.layout.offset).unwrap_or_default()
    }

    pub fn set_offset(&mut self, id: ElementId, offset: Offset) {
        if let Some(el) = self.get_mut(id) {
            el.layout.offset = offset;
        }
    }

    pub fn size(&self, id: ElementId) -> Size {
        self.get(id).map(|e| e.layout.size).unwrap_or_default()
    }

    pub fn set_size(&mut self, id: ElementId, size: Size) {
        if let Some(el) = self.get_mut(id) {
            el.layout.size = size;
        }
    }

    /// Scroll position (`scrollLeft`/`scrollTop`).
    pub fn scroll(&self, id: ElementId) -> Offset {
        self.get(id).map(|e| e.layout.scroll).unwrap_or_default()
    }

    pub fn set_scroll(&mut self, id: ElementId, scroll: Offset) {
        if let Some(el) = self.get_mut(id) {
            el.layout.scroll = scroll;
        }
    }

    pub fn is_scrolled(&self, id: ElementId) -> bool {
        let s = self.scroll(id);
        s.top > 0.0 || s.left > 0.0
    }

    pub fn position_kind(&self, id: ElementId) -> PositionKind {
        self.get(id).map(Element::position).unwrap_or_default()
    }

    pub fn set_position_kind(&mut self, id: ElementId, position: PositionKind) {
        if let Some(el) = self.get_mut(id) {
            el.position = position;
        }
    }

    pub fn set_hidden(&mut self, id: ElementId, hidden: bool) {
        if let Some(el) = self.get_mut(id) {
            el.hidden = hidden;
        }
    }

    pub fn window_scroll(&self) -> Offset {
        self.window_scroll
    }

    pub fn set_window_scroll(&mut self, scroll: Offset) {
        self.window_scroll = scroll;
        self.touch();
    }

    pub fn client_origin(&self) -> Offset {
        self.client_origin
    }

    pub fn set_client_origin(&mut self, origin: Offset) {
        self.client_origin = origin;
        self.touch();
    }

    // ------------------------------------------------------------------------
    // Attributes, classes, style
    // ------------------------------------------------------------------------

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id).and_then(|e| e.attribute(name))
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.get_mut(id) {
            el.attributes.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attribute(&mut self, id: ElementId, name: &str) -> Option<String> {
        self.get_mut(id).and_then(|el| el.attributes.shift_remove(name))
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).is_some_and(|e| e.has_class(class))
    }

    pub fn class_name(&self, id: ElementId) -> String {
        self.get(id).map(Element::class_name).unwrap_or_default()
    }

    /// Add each whitespace separated class that is not already present.
    pub fn add_class(&mut self, id: ElementId, classes: &str) {
        if let Some(el) = self.get_mut(id) {
            for class in classes.split_whitespace() {
                if !el.classes.iter().any(|c| c == class) {
                    el.classes.push(class.to_string());
                }
            }
        }
    }

    pub fn remove_class(&mut self, id: ElementId, classes: &str) {
        if let Some(el) = self.get_mut(id) {
            for class in classes.split_whitespace() {
                el.classes.retain(|c| c != class);
            }
        }
    }

    pub fn toggle_class(&mut self, id: ElementId, classes: &str) {
        for class in classes.split_whitespace() {
            if self.has_class(id, class) {
                self.remove_class(id, class);
            } else {
                self.add_class(id, class);
            }
        }
    }

    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.get(id)
            .and_then(|e| e.style.get(property))
            .map(String::as_str)
    }

    pub fn set_style(&mut self, id: ElementId, property: &str, value: impl Into<String>) {
        if let Some(el) = self.get_mut(id) {
            el.style.insert(property.to_string(), value.into());
        }
    }

    pub fn remove_style(&mut self, id: ElementId, property: &str) -> Option<String> {
        self.get_mut(id).and_then(|el| el.style.shift_remove(property))
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn element_by_id(&self, dom_id: &str) -> Option<ElementId> {
        self.subtree(self.body)
            .into_iter()
            .find(|&e| self.attribute(e, ATTRIBUTE_ID) == Some(dom_id))
    }

    pub fn matches(&self, id: ElementId, selector: &Selector) -> bool {
        self.get(id).is_some_and(|e| selector.matches(e))
    }

    /// Descendants of `root` (excluding `root`) matching `selector`, in document order.
    pub fn query_selector_all(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.subtree(root)
            .into_iter()
            .skip(1)
            .filter(|&e| self.matches(e, selector))
            .collect()
    }

    /// Nearest inclusive ancestor of `from` matching `selector`, never
    /// looking at `stop` or above it.
    pub fn find_parent(&self, from: ElementId, selector: &Selector, stop: Option<ElementId>) -> Option<ElementId> {
        std::iter::once(from)
            .chain(self.ancestors(from))
            .take_while(|&e| Some(e) != stop)
            .find(|&e| self.matches(e, selector))
    }
}
