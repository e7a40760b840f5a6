//! Plumbline - the interactive layer of a diagramming toolkit.
//!
//! Coordinates dragging of managed elements, groups and connection endpoints
//! inside a container, keeps a drag selection and posses of elements that
//! move together, and delegates click and hover events on connectors,
//! endpoints and overlays back to a rendering layer.
//!
//! The element tree is modelled by [`dom::Document`]; an [`Instance`] owns one
//! and is fed events through [`Instance::handle_pointer`].

pub mod constants;
pub mod dom;
pub mod drag;
pub mod error;
pub mod events;
pub mod geometry;
pub mod instance;
pub mod logging;
pub mod notification;
pub mod perf;
pub mod pointer;
pub mod posse;
pub mod renderer;
pub mod selection;
pub mod selector;
pub mod settings;
pub mod spatial_index;
pub mod types;

pub use dom::{Document, ElementId};
pub use error::{Error, Result};
pub use events::{Delegated, ListenerId};
pub use instance::{Instance, SubscriptionId};
pub use notification::Notification;
pub use pointer::{EventKind, PointerEvent};
pub use posse::PosseSpec;
pub use renderer::{BackRef, ConnectionId, EndpointId, NullRenderer, OverlayId, Renderer};
pub use settings::{DragOptions, Settings};
pub use types::{Offset, Point, PositionKind, Rect, Size};
