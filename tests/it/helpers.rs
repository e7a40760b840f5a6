//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestTreeBuilder` - builds a document with a container and named elements
//! - `Fixture` - the resulting instance plus recorded notifications
//! - `positioned()` for ad hoc elements in geometry tests

#![allow(dead_code)]

use plumbline::constants::{ATTRIBUTE_GROUP, CLASS_CONNECTOR, CLASS_ENDPOINT, CLASS_OVERLAY};
use plumbline::{
    Document, ElementId, EventKind, Instance, Notification, Offset, Point, PointerEvent, PositionKind, Settings,
    Size,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Append an element with the given position kind and offset.
pub fn positioned(doc: &mut Document, parent: ElementId, kind: PositionKind, left: f64, top: f64) -> ElementId {
    let el = doc.create_element("div");
    doc.append_child(parent, el);
    doc.set_position_kind(el, kind);
    doc.set_offset(el, Offset::new(left, top));
    el
}

enum Entry {
    Node { parent: Option<&'static str>, pos: (f64, f64) },
    Group { pos: (f64, f64) },
    Endpoint { parent: Option<&'static str>, pos: (f64, f64) },
    Connector,
    Overlay { parent: &'static str },
}

// ============================================================================
// TestTreeBuilder - Builder pattern for creating test trees
// ============================================================================

/// Builder for a document with one container and named elements in it.
///
/// The container sits at (0, 0) in the body, is relatively positioned and
/// 800x600. Nodes are absolutely positioned and 50x50.
///
/// # Example
/// ```ignore
/// let fx = TestTreeBuilder::new()
///     .with_node("a", (10.0, 10.0))
///     .with_node("b", (100.0, 10.0))
///     .with_zoom(2.0)
///     .build();
/// ```
pub struct TestTreeBuilder {
    elements: Vec<(&'static str, Entry)>,
    settings: Settings,
}

impl Default for TestTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTreeBuilder {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            settings: Settings::default(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.settings.zoom = zoom;
        self
    }

    /// A managed node directly in the container.
    pub fn with_node(mut self, name: &'static str, pos: (f64, f64)) -> Self {
        self.elements.push((name, Entry::Node { parent: None, pos }));
        self
    }

    /// A managed node inside another named element.
    pub fn with_child_node(mut self, name: &'static str, parent: &'static str, pos: (f64, f64)) -> Self {
        self.elements.push((
            name,
            Entry::Node {
                parent: Some(parent),
                pos,
            },
        ));
        self
    }

    /// A managed group element directly in the container.
    pub fn with_group(mut self, name: &'static str, pos: (f64, f64)) -> Self {
        self.elements.push((name, Entry::Group { pos }));
        self
    }

    /// An endpoint, in the container or inside a named element.
    pub fn with_endpoint(mut self, name: &'static str, parent: Option<&'static str>, pos: (f64, f64)) -> Self {
        self.elements.push((name, Entry::Endpoint { parent, pos }));
        self
    }

    pub fn with_connector(mut self, name: &'static str) -> Self {
        self.elements.push((name, Entry::Connector));
        self
    }

    pub fn with_overlay(mut self, name: &'static str, parent: &'static str) -> Self {
        self.elements.push((name, Entry::Overlay { parent }));
        self
    }

    pub fn build(self) -> Fixture {
        plumbline::logging::init_for_tests();

        let mut doc = Document::new();
        let body = doc.body();
        let container = positioned(&mut doc, body, PositionKind::Relative, 0.0, 0.0);
        doc.set_size(container, Size::new(800.0, 600.0));

        let mut ids: HashMap<&'static str, ElementId> = HashMap::new();
        let mut managed = Vec::new();
        for (name, entry) in self.elements {
            let parent_of = |parent: Option<&'static str>| parent.map_or(container, |p| ids[p]);
            let el = match entry {
                Entry::Node { parent, pos } => {
                    let el = positioned(&mut doc, parent_of(parent), PositionKind::Absolute, pos.0, pos.1);
                    doc.set_size(el, Size::new(50.0, 50.0));
                    managed.push(el);
                    el
                }
                Entry::Group { pos } => {
                    let el = positioned(&mut doc, container, PositionKind::Absolute, pos.0, pos.1);
                    doc.set_size(el, Size::new(200.0, 200.0));
                    doc.set_attribute(el, ATTRIBUTE_GROUP, name);
                    managed.push(el);
                    el
                }
                Entry::Endpoint { parent, pos } => {
                    let el = positioned(&mut doc, parent_of(parent), PositionKind::Absolute, pos.0, pos.1);
                    doc.set_size(el, Size::new(10.0, 10.0));
                    doc.add_class(el, CLASS_ENDPOINT);
                    el
                }
                Entry::Connector => {
                    let el = positioned(&mut doc, container, PositionKind::Absolute, 0.0, 0.0);
                    doc.add_class(el, CLASS_CONNECTOR);
                    el
                }
                Entry::Overlay { parent } => {
                    let el = positioned(&mut doc, ids[parent], PositionKind::Absolute, 0.0, 0.0);
                    doc.add_class(el, CLASS_OVERLAY);
                    el
                }
            };
            doc.set_attribute(el, "id", name);
            ids.insert(name, el);
        }

        let mut instance = Instance::new(doc, container, self.settings).expect("valid instance");
        for el in managed {
            instance.manage(el).expect("element exists");
        }

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        instance.bind(move |n: &Notification| sink.borrow_mut().push(n.clone()));

        Fixture {
            instance,
            container,
            ids,
            events,
        }
    }
}

// ============================================================================
// Fixture
// ============================================================================

pub struct Fixture {
    pub instance: Instance,
    pub container: ElementId,
    pub ids: HashMap<&'static str, ElementId>,
    pub events: Rc<RefCell<Vec<Notification>>>,
}

impl Fixture {
    pub fn id(&self, name: &str) -> ElementId {
        self.ids[name]
    }

    pub fn offset(&self, name: &str) -> Offset {
        self.instance.document().offset(self.id(name))
    }

    /// Names of the notifications received so far.
    pub fn names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(Notification::name).collect()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn down(&mut self, name: &str, x: f64, y: f64) -> PointerEvent {
        let target = self.id(name);
        self.instance
            .handle_pointer(PointerEvent::at(EventKind::PointerDown, target, Point::new(x, y)))
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> PointerEvent {
        let target = self.container;
        self.instance
            .handle_pointer(PointerEvent::at(EventKind::PointerMove, target, Point::new(x, y)))
    }

    pub fn up(&mut self, x: f64, y: f64) -> PointerEvent {
        let target = self.container;
        self.instance
            .handle_pointer(PointerEvent::at(EventKind::PointerUp, target, Point::new(x, y)))
    }

    /// Full gesture on a named element: down at `from`, one move, up at `to`.
    pub fn drag(&mut self, name: &str, from: (f64, f64), to: (f64, f64)) {
        self.down(name, from.0, from.1);
        self.move_to(to.0, to.1);
        self.up(to.0, to.1);
    }

    pub fn click(&mut self, name: &str) -> PointerEvent {
        let target = self.id(name);
        self.instance
            .handle_pointer(PointerEvent::at(EventKind::Click, target, Point::ORIGIN))
    }
}

/// A renderer that records every hook call.
#[derive(Default, Clone)]
pub struct RecordingRenderer {
    pub calls: Rc<RefCell<Vec<String>>>,
}

impl plumbline::Renderer for RecordingRenderer {
    fn set_connector_hover(&mut self, connection: plumbline::ConnectionId, hover: bool) {
        self.calls.borrow_mut().push(format!("connector {connection} hover={hover}"));
    }

    fn set_endpoint_hover(&mut self, endpoint: plumbline::EndpointId, hover: bool) {
        self.calls.borrow_mut().push(format!("endpoint {endpoint} hover={hover}"));
    }

    fn set_overlay_hover(&mut self, overlay: plumbline::OverlayId, hover: bool) {
        self.calls.borrow_mut().push(format!("overlay {overlay} hover={hover}"));
    }

    fn overlay_event(
        &mut self,
        overlay: plumbline::OverlayId,
        action: plumbline::renderer::OverlayAction,
        _event: &PointerEvent,
    ) {
        self.calls.borrow_mut().push(format!("overlay {overlay} {action:?}"));
    }
}
