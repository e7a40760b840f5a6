//! Drag coordination.
//!
//! ## Session lifecycle
//!
//! ```text
//! Idle -> Dragging     (pointer down on a draggable element a handler claims)
//! Dragging -> Dragging (pointer move: handler applies the delta)
//! Dragging -> Idle     (pointer up: on_stop, positions kept)
//! Dragging -> Idle     (abort: positions reverted, DragAborted fired)
//! ```
//!
//! Handlers are consulted in registration order: endpoint, group, element.

mod element;
mod endpoint;
mod group;
mod handler;
mod manager;
mod session;

pub use element::{ElementDragHandler, resolve_move_set};
pub use endpoint::EndpointDragHandler;
pub use group::GroupDragHandler;
pub use handler::{DragContext, DragHandler, HandlerKind};
pub use manager::DragManager;
pub use session::{DragSession, SessionMember};

use crate::constants::ATTRIBUTE_NOT_DRAGGABLE;
use crate::dom::{Document, ElementId};

/// An element is draggable unless it carries `jtk-not-draggable` with any
/// value other than `"false"`.
pub fn is_draggable(doc: &Document, element: ElementId) -> bool {
    doc.contains(element) && doc.attribute(element, ATTRIBUTE_NOT_DRAGGABLE).is_none_or(|v| v == "false")
}
