//! Pointer input - the single entry point for events from the pointer source.
//!
//! Every event is first delivered through the event bus (user listeners and
//! the container delegates), then drag-phase events go to the drag manager.
//! A pointer-down whose default was prevented by a listener starts no drag.

use super::Instance;
use crate::dom::ElementId;
use crate::error::{Error, Result};
use crate::events::{Delegated, EventBus, ListenerId};
use crate::geometry;
use crate::pointer::{EventKind, PointerEvent};
use crate::profile_scope;
use crate::types::Point;
use serde_json::Value;
use tracing::trace;

impl Instance {
    /// Handle one event from the pointer source. Returns the event as the
    /// listeners left it.
    pub fn handle_pointer(&mut self, mut event: PointerEvent) -> PointerEvent {
        profile_scope!("handle_pointer");

        if self.destroyed {
            return event;
        }
        if event.target.is_none() {
            event.target = self.element_from_point(geometry::page_location(Some(&event)));
        }

        let resolved = self.bus.resolve(&self.doc, &event);
        let invoked = EventBus::dispatch(self, resolved, &mut event);
        trace!(event = %event.kind, target = ?event.target, invoked, "dispatched");

        match event.kind {
            EventKind::PointerDown if !event.is_default_prevented() => {
                self.with_drag_context(|drag, ctx| drag.pointer_down(ctx, &event));
            }
            EventKind::PointerMove => {
                self.with_drag_context(|drag, ctx| drag.pointer_move(ctx, &event));
            }
            EventKind::PointerUp => {
                self.with_drag_context(|drag, ctx| drag.pointer_up(ctx, &event));
            }
            _ => {}
        }

        self.flush();
        event
    }

    /// Synthesise an event on `element` and handle it as if it came from the
    /// pointer source. The page position is taken from `original` if given.
    pub fn trigger(
        &mut self,
        element: ElementId,
        kind: impl Into<EventKind>,
        original: Option<&PointerEvent>,
        payload: Option<Value>,
    ) -> Result<PointerEvent> {
        self.ensure_live()?;
        if !self.doc.contains(element) {
            return Err(Error::UnknownElement(element));
        }
        let mut event = PointerEvent::at(kind, element, geometry::page_location(original));
        if let Some(original) = original {
            event.touches = original.touches.clone();
            event.changed_touches = original.changed_touches.clone();
            event.target_touches = original.target_touches.clone();
        }
        event.payload = payload;
        Ok(self.handle_pointer(event))
    }

    /// Bind a delegated listener: fires for events below `element` whose
    /// target has an inclusive ancestor matching `selector`.
    pub fn on(
        &mut self,
        element: ElementId,
        kind: impl Into<EventKind>,
        selector: &str,
        listener: impl Fn(&mut Instance, &mut Delegated<'_>) + 'static,
    ) -> Result<ListenerId> {
        self.ensure_live()?;
        self.bus.on(element, kind, selector, listener)
    }

    /// Bind a listener on `element` itself.
    pub fn on_direct(
        &mut self,
        element: ElementId,
        kind: impl Into<EventKind>,
        listener: impl Fn(&mut Instance, &mut Delegated<'_>) + 'static,
    ) -> Result<ListenerId> {
        self.ensure_live()?;
        Ok(self.bus.on_direct(element, kind, listener))
    }

    pub fn off(&mut self, element: ElementId, kind: impl Into<EventKind>, id: ListenerId) -> bool {
        self.bus.off(element, &kind.into(), id)
    }

    /// Stop an event from bubbling further and, unless told otherwise,
    /// prevent its default action.
    pub fn consume(event: &mut PointerEvent, do_not_prevent_default: bool) {
        event.consume(do_not_prevent_default);
    }

    /// Topmost visible element under a page position.
    pub fn element_from_point(&mut self, page: Point) -> Option<ElementId> {
        let body = self.doc.body();
        self.hit_index.refresh(&self.doc, body);
        self.hit_index.query_point(page).first().copied()
    }
}
