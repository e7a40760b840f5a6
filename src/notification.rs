//! Domain events fired by an instance to listeners registered with `bind`.

use crate::dom::ElementId;
use crate::drag::HandlerKind;
use crate::renderer::{ConnectionId, EndpointId};
use crate::types::Offset;

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A managed element started moving. `pos` is container-relative.
    DragStart { element: ElementId, pos: Offset },
    /// One drag tick for the primary element (managed element or group).
    Drag { element: ElementId, pos: Offset },
    /// Drag finished; final container-relative offsets of every moved element.
    DragStop {
        element: ElementId,
        moved: Vec<(ElementId, Offset)>,
    },
    GroupDragStart { group: ElementId, pos: Offset },
    GroupDragStop { group: ElementId, pos: Offset },
    ConnectionDragStart {
        element: ElementId,
        endpoint: Option<EndpointId>,
    },
    ConnectionDrag {
        element: ElementId,
        endpoint: Option<EndpointId>,
        pos: Offset,
    },
    /// The endpoint was released; `drop_target` is the topmost endpoint or
    /// managed element under the pointer, if any.
    ConnectionDragStop {
        element: ElementId,
        endpoint: Option<EndpointId>,
        drop_target: Option<ElementId>,
    },
    /// A session was discarded and its positions reverted.
    DragAborted { element: ElementId, handler: HandlerKind },
    ConnectionClick {
        connection: ConnectionId,
        element: ElementId,
        double: bool,
    },
    EndpointClick {
        endpoint: EndpointId,
        element: ElementId,
        double: bool,
    },
    ContainerChange {
        container: ElementId,
        previous: Option<ElementId>,
    },
}

impl Notification {
    /// Stable event name, as listeners see it.
    pub fn name(&self) -> &'static str {
        match self {
            Notification::DragStart { .. } => "drag:start",
            Notification::Drag { .. } => "drag:move",
            Notification::DragStop { .. } => "drag:stop",
            Notification::GroupDragStart { .. } => "group:drag:start",
            Notification::GroupDragStop { .. } => "group:drag:stop",
            Notification::ConnectionDragStart { .. } => "connection:drag:start",
            Notification::ConnectionDrag { .. } => "connection:drag",
            Notification::ConnectionDragStop { .. } => "connection:drag:stop",
            Notification::DragAborted { .. } => "drag:abort",
            Notification::ConnectionClick { double: false, .. } => "connection:click",
            Notification::ConnectionClick { double: true, .. } => "connection:dblclick",
            Notification::EndpointClick { double: false, .. } => "endpoint:click",
            Notification::EndpointClick { double: true, .. } => "endpoint:dblclick",
            Notification::ContainerChange { .. } => "container:change",
        }
    }
}
