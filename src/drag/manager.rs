//! Drag manager - owns the handlers and at most one drag session.
//!
//! ## Performance Notes
//!
//! Pointer move arrives at display rate during a drag. Each tick is timed and
//! recorded; ticks over one frame are logged.

use super::element::ElementDragHandler;
use super::endpoint::EndpointDragHandler;
use super::group::GroupDragHandler;
use super::handler::{DragContext, DragHandler, HandlerKind};
use super::is_draggable;
use super::session::DragSession;
use crate::dom::ElementId;
use crate::geometry;
use crate::notification::Notification;
use crate::perf::{self, OperationStats};
use crate::pointer::PointerEvent;
use tracing::{debug, warn};

#[derive(Debug, Default)]
enum DragState {
    /// No gesture in progress
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Default)]
pub struct DragManager {
    handlers: Vec<Box<dyn DragHandler>>,
    container: Option<ElementId>,
    state: DragState,
    tick_stats: OperationStats,
}

impl DragManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to `container` and register the built-in handlers in their
    /// fixed order.
    pub fn with_default_handlers(container: ElementId) -> Self {
        let mut manager = Self::new();
        manager.attach(container);
        manager.add_handler(Box::new(EndpointDragHandler::new()));
        manager.add_handler(Box::new(GroupDragHandler::new()));
        manager.add_handler(Box::new(ElementDragHandler::new()));
        manager
    }

    pub fn add_handler(&mut self, handler: Box<dyn DragHandler>) {
        debug!(kind = %handler.kind(), index = self.handlers.len(), "register drag handler");
        self.handlers.push(handler);
    }

    pub fn handler_kinds(&self) -> Vec<HandlerKind> {
        self.handlers.iter().map(|h| h.kind()).collect()
    }

    pub fn attach(&mut self, container: ElementId) {
        self.container = Some(container);
    }

    pub fn container(&self) -> Option<ElementId> {
        self.container
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn tick_stats(&self) -> &OperationStats {
        &self.tick_stats
    }

    /// Walk from `target` up to (not including) the container; the nearest
    /// draggable element some handler claims wins, and among handlers
    /// claiming the same element the first registered one.
    fn claim(&self, ctx: &DragContext<'_>, target: ElementId) -> Option<(usize, ElementId)> {
        let container = self.container?;
        if target == container || !ctx.doc.is_inclusive_descendant(target, container) {
            return None;
        }
        std::iter::once(target)
            .chain(ctx.doc.ancestors(target))
            .take_while(|&el| el != container)
            .filter(|&el| is_draggable(&*ctx.doc, el))
            .find_map(|el| {
                self.handlers
                    .iter()
                    .position(|handler| handler.can_handle(ctx, el))
                    .map(|index| (index, el))
            })
    }

    /// Start a session if a handler claims the event target. A pointer-down
    /// while a session is running is ignored.
    pub fn pointer_down(&mut self, ctx: &mut DragContext<'_>, event: &PointerEvent) -> bool {
        if let Some(session) = self.session() {
            debug!(primary = %session.primary, "pointer down during drag ignored");
            return false;
        }
        let Some(target) = event.target else {
            return false;
        };
        let Some((index, primary)) = self.claim(ctx, target) else {
            return false;
        };
        let Some(handler) = self.handlers.get_mut(index) else {
            return false;
        };

        let kind = handler.kind();
        let mut session = DragSession::new(primary, index, kind, geometry::page_location(Some(event)));
        session.set_members(&*ctx.doc, [primary]);
        handler.on_start(ctx, &mut session);
        session.apply_drag_styles(ctx.doc, ctx.options);

        debug!(%primary, %kind, members = session.members().len(), "drag session start");
        self.state = DragState::Dragging(session);
        true
    }

    /// Feed one pointer move to the session owner.
    pub fn pointer_move(&mut self, ctx: &mut DragContext<'_>, event: &PointerEvent) -> bool {
        crate::profile_scope!("drag_pointer_move");

        let DragState::Dragging(session) = &mut self.state else {
            return false;
        };
        if !ctx.doc.is_connected(session.primary) {
            self.abort(ctx);
            return false;
        }

        let handler = self.handlers.get_mut(session.handler);
        let ((), elapsed_ms) = perf::measure(|| {
            session.pointer = geometry::page_location(Some(event));
            if let Some(handler) = handler {
                handler.on_drag(ctx, session);
            }
        });
        perf::record_tick(&mut self.tick_stats, "drag_tick", elapsed_ms);
        true
    }

    /// End the session normally. A release away from the last pointer
    /// position is applied as one final tick before the stop.
    pub fn pointer_up(&mut self, ctx: &mut DragContext<'_>, event: &PointerEvent) -> bool {
        let DragState::Dragging(mut session) = std::mem::take(&mut self.state) else {
            return false;
        };
        if !ctx.doc.is_connected(session.primary) {
            self.abort_session(ctx, session);
            return false;
        }

        let release = geometry::page_location(Some(event));
        if let Some(handler) = self.handlers.get_mut(session.handler) {
            if release != session.pointer {
                session.pointer = release;
                handler.on_drag(ctx, &mut session);
            }
            handler.on_stop(ctx, &mut session);
        }
        session.restore_drag_styles(ctx.doc);
        debug!(primary = %session.primary, kind = %session.kind, delta = ?session.delta, "drag session stop");
        true
    }

    /// Discard the running session, if any. Returns whether one was running.
    pub fn abort(&mut self, ctx: &mut DragContext<'_>) -> bool {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                self.abort_session(ctx, session);
                true
            }
            DragState::Idle => false,
        }
    }

    fn abort_session(&mut self, ctx: &mut DragContext<'_>, mut session: DragSession) {
        warn!(primary = %session.primary, kind = %session.kind, "drag session aborted");
        session.revert(ctx.doc);
        session.restore_drag_styles(ctx.doc);
        if let Some(handler) = self.handlers.get_mut(session.handler) {
            handler.on_abort(ctx, &mut session);
        }
        ctx.notify(Notification::DragAborted {
            element: session.primary,
            handler: session.kind,
        });
    }

    /// Abort any session, drop every handler and detach from the container.
    pub fn reset(&mut self, ctx: &mut DragContext<'_>) {
        self.abort(ctx);
        self.handlers.clear();
        self.container = None;
        self.tick_stats.reset();
    }
}
