//! Public operations on managed elements: draggability, selection, posses,
//! back-references, attributes and geometry.

use super::Instance;
use crate::constants::{ATTRIBUTE_MANAGED, ATTRIBUTE_NOT_DRAGGABLE, CLASS_DRAG_SELECTED};
use crate::dom::ElementId;
use crate::drag::{self, DragSession};
use crate::error::{Error, Result};
use crate::geometry;
use crate::pointer::PointerEvent;
use crate::posse::PosseSpec;
use crate::renderer::{BackRef, ConnectionId, EndpointId, OverlayId};
use crate::types::{Offset, Size};
use tracing::debug;
use uuid::Uuid;

impl Instance {
    // ------------------------------------------------------------------------
    // Managed elements
    // ------------------------------------------------------------------------

    /// Mark an element as managed so the element handler drags it. Returns
    /// its managed id, which is kept if the element was already managed.
    pub fn manage(&mut self, element: ElementId) -> Result<String> {
        self.ensure_live()?;
        if !self.doc.contains(element) {
            return Err(Error::UnknownElement(element));
        }
        if let Some(id) = self.doc.attribute(element, ATTRIBUTE_MANAGED) {
            return Ok(id.to_string());
        }
        let id = Uuid::new_v4().simple().to_string();
        self.doc.set_attribute(element, ATTRIBUTE_MANAGED, id.as_str());
        debug!(%element, managed = %id, "manage");
        Ok(id)
    }

    /// Stop managing an element: it leaves the selection and its posse.
    pub fn unmanage(&mut self, element: ElementId) {
        self.remove_from_drag_selection(&[element]);
        self.posses.remove(&[element]);
        self.doc.remove_attribute(element, ATTRIBUTE_MANAGED);
    }

    pub fn is_managed(&self, element: ElementId) -> bool {
        self.doc.attribute(element, ATTRIBUTE_MANAGED).is_some()
    }

    // ------------------------------------------------------------------------
    // Draggability
    // ------------------------------------------------------------------------

    pub fn set_draggable(&mut self, element: ElementId, draggable: bool) {
        if draggable {
            self.doc.remove_attribute(element, ATTRIBUTE_NOT_DRAGGABLE);
        } else {
            self.doc.set_attribute(element, ATTRIBUTE_NOT_DRAGGABLE, "true");
        }
    }

    pub fn is_draggable(&self, element: ElementId) -> bool {
        drag::is_draggable(&self.doc, element)
    }

    /// Flip draggability; returns the new state.
    pub fn toggle_draggable(&mut self, element: ElementId) -> bool {
        let draggable = !self.is_draggable(element);
        self.set_draggable(element, draggable);
        draggable
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    // ------------------------------------------------------------------------
    // Drag selection
    // ------------------------------------------------------------------------

    pub fn add_to_drag_selection(&mut self, elements: &[ElementId]) {
        for &el in elements {
            if self.doc.contains(el) && self.selection.add(el) {
                self.doc.add_class(el, CLASS_DRAG_SELECTED);
            }
        }
    }

    pub fn remove_from_drag_selection(&mut self, elements: &[ElementId]) {
        for &el in elements {
            if self.selection.remove(el) {
                self.doc.remove_class(el, CLASS_DRAG_SELECTED);
            }
        }
    }

    pub fn toggle_drag_selection(&mut self, elements: &[ElementId]) {
        for &el in elements {
            if self.selection.contains(el) {
                self.remove_from_drag_selection(&[el]);
            } else {
                self.add_to_drag_selection(&[el]);
            }
        }
    }

    pub fn clear_drag_selection(&mut self) {
        for el in self.selection.get() {
            self.doc.remove_class(el, CLASS_DRAG_SELECTED);
        }
        self.selection.clear();
    }

    pub fn get_drag_selection(&self) -> Vec<ElementId> {
        self.selection.get()
    }

    // ------------------------------------------------------------------------
    // Posses
    // ------------------------------------------------------------------------

    /// Add elements to a posse. A plain id joins as an active member.
    pub fn add_to_posse(&mut self, spec: impl Into<PosseSpec>, elements: &[ElementId]) {
        let spec = spec.into();
        let known: Vec<ElementId> = elements.iter().copied().filter(|&el| self.doc.contains(el)).collect();
        self.posses.add(&spec, &known);
    }

    pub fn remove_from_posse(&mut self, elements: &[ElementId]) {
        self.posses.remove(elements);
    }

    pub fn set_posse_state(&mut self, active: bool, elements: &[ElementId]) {
        self.posses.set_state(active, elements);
    }

    pub fn posse_of(&self, element: ElementId) -> Option<&str> {
        self.posses.posse_of(element)
    }

    /// Members of a posse with their active flag, in join order.
    pub fn posse_members(&self, id: &str) -> Vec<(ElementId, bool)> {
        self.posses
            .get(id)
            .map(|posse| posse.members().collect())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Back-references
    // ------------------------------------------------------------------------

    pub fn register_connector(&mut self, element: ElementId, connection: ConnectionId) {
        self.back_refs.insert(element, BackRef::Connector(connection));
    }

    pub fn register_endpoint(&mut self, element: ElementId, endpoint: EndpointId) {
        self.back_refs.insert(element, BackRef::Endpoint(endpoint));
    }

    pub fn register_overlay(&mut self, element: ElementId, overlay: OverlayId) {
        self.back_refs.insert(element, BackRef::Overlay(overlay));
    }

    pub fn back_ref(&self, element: ElementId) -> Option<BackRef> {
        self.back_refs.get(element)
    }

    // ------------------------------------------------------------------------
    // Attributes and classes
    // ------------------------------------------------------------------------

    pub fn get_element(&self, dom_id: &str) -> Option<ElementId> {
        self.doc.element_by_id(dom_id)
    }

    /// Like [`Instance::get_element`], for callers that treat a missing id as an error.
    pub fn require_element(&self, dom_id: &str) -> Result<ElementId> {
        self.get_element(dom_id).ok_or_else(|| Error::UnknownId(dom_id.to_string()))
    }

    pub fn get_attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.doc.attribute(element, name)
    }

    pub fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        self.doc.set_attribute(element, name, value);
    }

    pub fn set_attributes<'a>(&mut self, element: ElementId, attributes: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (name, value) in attributes {
            self.doc.set_attribute(element, name, value);
        }
    }

    pub fn remove_attribute(&mut self, element: ElementId, name: &str) {
        self.doc.remove_attribute(element, name);
    }

    pub fn get_class(&self, element: ElementId) -> String {
        self.doc.class_name(element)
    }

    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.doc.has_class(element, class)
    }

    pub fn add_class(&mut self, element: ElementId, classes: &str) {
        self.doc.add_class(element, classes);
    }

    pub fn remove_class(&mut self, element: ElementId, classes: &str) {
        self.doc.remove_class(element, classes);
    }

    pub fn toggle_class(&mut self, element: ElementId, classes: &str) {
        self.doc.toggle_class(element, classes);
    }

    // ------------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------------

    /// Offset of `element` relative to the container, or to the top of the
    /// tree if `relative_to_root` is set.
    pub fn get_offset(&self, element: ElementId, relative_to_root: bool) -> Offset {
        geometry::compute_offset(&self.doc, element, self.container, relative_to_root)
    }

    /// Offset of `element` relative to an explicit ancestor.
    pub fn get_offset_relative_to(&self, element: ElementId, ancestor: ElementId) -> Offset {
        geometry::compute_offset(&self.doc, element, Some(ancestor), false)
    }

    pub fn get_size(&self, element: ElementId) -> Size {
        geometry::size(&self.doc, element)
    }

    /// Container-relative position for an offset-parent-relative `pos`.
    pub fn get_ui_position(&self, element: ElementId, pos: Offset) -> Option<Offset> {
        geometry::ui_position(&self.doc, element, pos, self.container)
    }

    /// Fractional pointer position inside `element`, at the current zoom.
    pub fn get_position_on_element(&self, event: &PointerEvent, element: ElementId) -> (f64, f64) {
        geometry::position_within_element(&self.doc, event, element, self.settings.zoom)
    }

    /// Set an element's position within its offset parent.
    pub fn set_position(&mut self, element: ElementId, pos: Offset) {
        self.doc.set_offset(element, pos);
    }

    /// Computed style value. `position` reports the element's position kind.
    pub fn get_style(&self, element: ElementId, property: &str) -> Option<String> {
        if !self.doc.contains(element) {
            return None;
        }
        match property {
            "position" => Some(self.doc.position_kind(element).as_str().to_string()),
            _ => self.doc.style(element, property).map(str::to_string),
        }
    }
}
