//! Rendering layer seam.
//!
//! Connectors, endpoints and overlays are drawn by an external renderer,
//! which tags each element it creates with a back-reference to its domain
//! object. Back-references live in a side map rather than on the element: the
//! map is a lookup convenience, the renderer owns the objects.

use crate::dom::ElementId;
use crate::pointer::PointerEvent;
use std::collections::HashMap;
use std::fmt;

macro_rules! domain_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

domain_id!(
    /// A connection owned by the rendering layer.
    ConnectionId,
    "con_"
);
domain_id!(
    /// An endpoint owned by the rendering layer.
    EndpointId,
    "ep_"
);
domain_id!(
    /// An overlay (label, arrow, ...) owned by the rendering layer.
    OverlayId,
    "ov_"
);

/// The domain object an element stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackRef {
    Connector(ConnectionId),
    Endpoint(EndpointId),
    Overlay(OverlayId),
}

/// Element → domain object lookup.
#[derive(Debug, Default, Clone)]
pub struct BackRefs {
    map: HashMap<ElementId, BackRef>,
}

impl BackRefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, element: ElementId, back_ref: BackRef) -> Option<BackRef> {
        self.map.insert(element, back_ref)
    }

    pub fn remove(&mut self, element: ElementId) -> Option<BackRef> {
        self.map.remove(&element)
    }

    pub fn get(&self, element: ElementId) -> Option<BackRef> {
        self.map.get(&element).copied()
    }

    pub fn connection(&self, element: ElementId) -> Option<ConnectionId> {
        match self.get(element)? {
            BackRef::Connector(c) => Some(c),
            _ => None,
        }
    }

    pub fn endpoint(&self, element: ElementId) -> Option<EndpointId> {
        match self.get(element)? {
            BackRef::Endpoint(e) => Some(e),
            _ => None,
        }
    }

    pub fn overlay(&self, element: ElementId) -> Option<OverlayId> {
        match self.get(element)? {
            BackRef::Overlay(o) => Some(o),
            _ => None,
        }
    }

    /// Drop entries for elements that no longer exist.
    pub fn prune(&mut self, removed: &[ElementId]) {
        self.map.retain(|el, _| !removed.contains(el));
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Which overlay method a delegated click maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    Click,
    DblClick,
}

/// Hooks the interactive layer calls back into the renderer with.
pub trait Renderer {
    fn set_connector_hover(&mut self, connection: ConnectionId, hover: bool);
    fn set_endpoint_hover(&mut self, endpoint: EndpointId, hover: bool);
    fn set_overlay_hover(&mut self, overlay: OverlayId, hover: bool);

    /// Forward a click on an overlay to the overlay object.
    fn overlay_event(&mut self, overlay: OverlayId, action: OverlayAction, event: &PointerEvent) {
        let _ = (overlay, action, event);
    }
}

/// A renderer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn set_connector_hover(&mut self, _: ConnectionId, _: bool) {}
    fn set_endpoint_hover(&mut self, _: EndpointId, _: bool) {}
    fn set_overlay_hover(&mut self, _: OverlayId, _: bool) {}
}
