//! The instance facade.
//!
//! One `Instance` owns a document, a container inside it and all per-instance
//! interaction state: drag manager, selection, posses, back-references, event
//! bus and domain listeners. Nothing is global; instances are independent.
//!
//! ## Module Organization
//!
//! - `lifecycle` - construction, container swaps, reset, destroy, element removal
//! - `delegates` - container-level listeners for connectors, endpoints, overlays
//! - `input` - pointer entry point, event bus access, hit testing
//! - `api` - draggability, selection, posses, attributes, geometry

mod api;
mod delegates;
mod input;
mod lifecycle;

use crate::constants::{SELECTOR_CONTAINER_CONTENT, SELECTOR_RESET_CONTENT};
use crate::dom::{Document, ElementId};
use crate::drag::DragManager;
use crate::error::Result;
use crate::events::{EventBus, ListenerId};
use crate::notification::Notification;
use crate::pointer::EventKind;
use crate::posse::PosseRegistry;
use crate::renderer::{BackRefs, Renderer};
use crate::selection::SelectionSet;
use crate::selector::Selector;
use crate::settings::Settings;
use crate::spatial_index::SpatialIndex;
use std::rc::Rc;

/// Listener for domain events registered with [`Instance::bind`].
pub type Subscriber = Rc<dyn Fn(&Notification)>;

/// Handle returned by [`Instance::bind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Selectors parsed once per instance.
struct Selectors {
    container_content: Selector,
    reset_content: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            container_content: Selector::parse(SELECTOR_CONTAINER_CONTENT)?,
            reset_content: Selector::parse(SELECTOR_RESET_CONTENT)?,
        })
    }
}

pub struct Instance {
    doc: Document,
    container: Option<ElementId>,
    settings: Settings,
    selectors: Selectors,

    bus: EventBus<Instance>,
    /// Listeners the instance itself attached to the container
    delegates: Vec<(ElementId, EventKind, ListenerId)>,

    drag: DragManager,
    selection: SelectionSet,
    posses: PosseRegistry,
    back_refs: BackRefs,
    renderer: Box<dyn Renderer>,
    hit_index: SpatialIndex,

    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    /// Notifications raised while handling the current event
    pending: Vec<Notification>,

    destroyed: bool,
}
