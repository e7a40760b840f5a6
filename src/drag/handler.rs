use super::session::DragSession;
use crate::dom::{Document, ElementId};
use crate::geometry;
use crate::notification::Notification;
use crate::posse::PosseRegistry;
use crate::renderer::BackRefs;
use crate::selection::SelectionSet;
use crate::settings::DragOptions;
use crate::spatial_index::SpatialIndex;
use crate::types::Offset;
use std::fmt;

/// The built-in handler variants, in the order they are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Endpoint,
    Group,
    Element,
}

impl HandlerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HandlerKind::Endpoint => "endpoint",
            HandlerKind::Group => "group",
            HandlerKind::Element => "element",
        }
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-instance state a handler works against, borrowed from the instance
/// for the duration of one pointer event.
pub struct DragContext<'a> {
    pub doc: &'a mut Document,
    pub container: ElementId,
    pub selection: &'a SelectionSet,
    pub posses: &'a PosseRegistry,
    pub back_refs: &'a BackRefs,
    pub options: &'a DragOptions,
    pub zoom: f64,
    pub hit_index: &'a mut SpatialIndex,
    pub notifications: &'a mut Vec<Notification>,
}

impl DragContext<'_> {
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Container-relative position of an element at its current offset.
    pub fn ui_position(&self, element: ElementId) -> Option<Offset> {
        geometry::ui_position(&*self.doc, element, self.doc.offset(element), Some(self.container))
    }

    /// Container-relative position, falling back to the raw offset for
    /// elements with no offset parent.
    pub fn ui_position_or_offset(&self, element: ElementId) -> Offset {
        self.ui_position(element).unwrap_or_else(|| self.doc.offset(element))
    }
}

/// A drag behavior for one category of element.
///
/// The manager offers each pointer-down to its handlers in registration
/// order; the first one that claims an element on the path from the target
/// to the container owns the session.
pub trait DragHandler {
    fn kind(&self) -> HandlerKind;

    /// Whether this handler drags `element`. Draggability has already been
    /// checked by the manager.
    fn can_handle(&self, ctx: &DragContext<'_>, element: ElementId) -> bool;

    /// Session created. Set the move set here; it defaults to the primary alone.
    fn on_start(&mut self, ctx: &mut DragContext<'_>, session: &mut DragSession);

    /// One pointer move. `session.pointer` holds the new page position.
    fn on_drag(&mut self, ctx: &mut DragContext<'_>, session: &mut DragSession);

    /// Pointer released.
    fn on_stop(&mut self, ctx: &mut DragContext<'_>, session: &mut DragSession);

    /// Session discarded. Positions are already reverted.
    fn on_abort(&mut self, ctx: &mut DragContext<'_>, session: &mut DragSession) {
        let _ = (ctx, session);
    }
}
