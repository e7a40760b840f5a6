//! Pointer events as delivered by the host's pointer/touch source.
//!
//! The source is an external collaborator: it reports a page-space point per
//! event (plus touch lists on touch devices) and, when it knows it, the
//! element under the pointer.

use crate::dom::ElementId;
use crate::types::Point;
use std::fmt;
use std::str::FromStr;

/// Kind of interaction an event represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    Click,
    DblClick,
    MouseOver,
    MouseOut,
    /// Anything else, e.g. events synthesised through `trigger`.
    Custom(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::PointerDown => "mousedown",
            EventKind::PointerMove => "mousemove",
            EventKind::PointerUp => "mouseup",
            EventKind::Click => "click",
            EventKind::DblClick => "dblclick",
            EventKind::MouseOver => "mouseover",
            EventKind::MouseOut => "mouseout",
            EventKind::Custom(name) => name,
        }
    }
}

impl FromStr for EventKind {
    type Err = std::convert::Infallible;

    /// Mouse, pointer and touch spellings all normalize to the same kind.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "mousedown" | "pointerdown" | "touchstart" => EventKind::PointerDown,
            "mousemove" | "pointermove" | "touchmove" => EventKind::PointerMove,
            "mouseup" | "pointerup" | "touchend" => EventKind::PointerUp,
            "click" | "tap" => EventKind::Click,
            "dblclick" | "dbltap" => EventKind::DblClick,
            "mouseover" | "mouseenter" => EventKind::MouseOver,
            "mouseout" | "mouseleave" => EventKind::MouseOut,
            other => EventKind::Custom(other.to_string()),
        })
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single pointer or touch event.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: EventKind,
    /// Element under the pointer, if the source knows it. Resolved by hit
    /// testing otherwise.
    pub target: Option<ElementId>,
    /// Page coordinates of the event itself.
    pub page: Point,
    /// Active touches (`touches`).
    pub touches: Vec<Point>,
    /// Touches that changed in this event (`changedTouches`).
    pub changed_touches: Vec<Point>,
    /// Touches that started on the target (`targetTouches`).
    pub target_touches: Vec<Point>,
    /// Optional payload carried by synthesised events.
    pub payload: Option<serde_json::Value>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl PointerEvent {
    pub fn new(kind: impl Into<EventKind>, page: Point) -> Self {
        Self {
            kind: kind.into(),
            target: None,
            page,
            touches: Vec::new(),
            changed_touches: Vec::new(),
            target_touches: Vec::new(),
            payload: None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn at(kind: impl Into<EventKind>, target: ElementId, page: Point) -> Self {
        Self::new(kind, page).with_target(target)
    }

    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_touches(mut self, touches: Vec<Point>) -> Self {
        self.touches = touches;
        self
    }

    pub fn with_changed_touches(mut self, touches: Vec<Point>) -> Self {
        self.changed_touches = touches;
        self
    }

    pub fn with_target_touches(mut self, touches: Vec<Point>) -> Self {
        self.target_touches = touches;
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// The touch list to read positions from: active touches, then changed
    /// touches, then target touches; `None` means the event is a single point.
    pub fn touch_list(&self) -> Option<&[Point]> {
        [&self.touches, &self.changed_touches, &self.target_touches]
            .into_iter()
            .find(|list| !list.is_empty())
            .map(Vec::as_slice)
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Stop propagation and, unless asked not to, prevent the default action.
    pub fn consume(&mut self, do_not_prevent_default: bool) {
        if !do_not_prevent_default {
            self.prevent_default();
        }
        self.stop_propagation();
    }
}
