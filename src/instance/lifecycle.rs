//! Instance lifecycle - construction, container swaps, reset and teardown.

use super::{Instance, Selectors, Subscriber, SubscriptionId};
use crate::constants::ATTRIBUTE_CONTAINER;
use crate::dom::{Document, ElementId};
use crate::drag::{DragContext, DragManager};
use crate::error::{Error, Result};
use crate::events::EventBus;
use crate::notification::Notification;
use crate::posse::PosseRegistry;
use crate::renderer::{BackRefs, NullRenderer, Renderer};
use crate::selection::SelectionSet;
use crate::settings::Settings;
use crate::spatial_index::SpatialIndex;
use std::rc::Rc;
use tracing::{debug, info, warn};
use uuid::Uuid;

impl Instance {
    /// Create an instance over `doc`, using `container` as coordinate origin
    /// and delegation root.
    pub fn new(doc: Document, container: ElementId, settings: Settings) -> Result<Self> {
        settings.validate()?;
        let mut instance = Self {
            doc,
            container: None,
            settings,
            selectors: Selectors::new()?,
            bus: EventBus::new(),
            delegates: Vec::new(),
            drag: DragManager::new(),
            selection: SelectionSet::new(),
            posses: PosseRegistry::new(),
            back_refs: BackRefs::new(),
            renderer: Box::new(NullRenderer),
            hit_index: SpatialIndex::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
            pending: Vec::new(),
            destroyed: false,
        };
        instance.set_container(container)?;
        Ok(instance)
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderer = renderer;
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable access to the tree, for inserting and laying out elements.
    /// Use [`Instance::remove_element`] to remove them so that listeners and
    /// interaction state are cleaned up too.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Result<()> {
        let settings = Settings { zoom, ..self.settings.clone() };
        self.set_settings(settings)
    }

    pub fn container(&self) -> Option<ElementId> {
        self.container
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub(crate) fn ensure_live(&self) -> Result<()> {
        if self.destroyed { Err(Error::Destroyed) } else { Ok(()) }
    }

    /// Replace the container.
    ///
    /// Any running drag is aborted and the selection cleared; posses are
    /// kept. The new container is marked with a fresh id, interactive content
    /// of the old container is moved across, and delegated listeners and drag
    /// handlers are rebuilt against the new container.
    pub fn set_container(&mut self, container: ElementId) -> Result<()> {
        self.ensure_live()?;
        if !self.doc.contains(container) {
            return Err(Error::UnknownElement(container));
        }
        let previous = self.container;

        self.reset_drag();
        self.detach_delegates();
        self.clear_drag_selection();

        let marker = Uuid::new_v4().simple().to_string();
        self.doc.set_attribute(container, ATTRIBUTE_CONTAINER, marker.as_str());
        if let Some(old) = previous.filter(|&old| old != container) {
            self.doc.remove_attribute(old, ATTRIBUTE_CONTAINER);
            self.move_container_content(old, container);
        }

        self.container = Some(container);
        self.attach_delegates(container)?;
        self.drag = DragManager::with_default_handlers(container);
        self.hit_index.clear();

        info!(%container, previous = ?previous, marker = %marker, "container set");
        self.pending.push(Notification::ContainerChange { container, previous });
        self.flush();
        Ok(())
    }

    /// Move the topmost interactive elements of `from` into `to`.
    fn move_container_content(&mut self, from: ElementId, to: ElementId) {
        let matches = self.doc.query_selector_all(from, &self.selectors.container_content);
        let topmost: Vec<ElementId> = matches
            .iter()
            .copied()
            .filter(|&el| {
                !self
                    .doc
                    .ancestors(el)
                    .take_while(|&a| a != from)
                    .any(|a| matches.contains(&a))
            })
            .collect();

        debug!(%from, %to, count = topmost.len(), "moving container content");
        for el in topmost {
            if !self.doc.append_child(to, el) {
                warn!(element = %el, container = %to, "cannot move element into new container");
            }
        }
    }

    /// Remove every interactive element from the container and abort any drag.
    /// The container and its listeners stay in place.
    pub fn reset(&mut self) {
        if self.destroyed {
            return;
        }
        self.with_drag_context(|drag, ctx| drag.abort(ctx));
        self.clear_drag_selection();

        if let Some(container) = self.container {
            let matches = self.doc.query_selector_all(container, &self.selectors.reset_content);
            let mut removed = 0;
            for el in matches {
                // Already gone with an ancestor that matched.
                if self.doc.contains(el) {
                    removed += self.remove_element(el).len();
                }
            }
            debug!(%container, removed, "instance reset");
        }
        self.flush();
    }

    /// Tear the instance down. Every later call is a no-op or returns
    /// [`Error::Destroyed`].
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.reset_drag();
        self.detach_delegates();
        self.flush();

        self.clear_drag_selection();
        self.posses.clear();
        self.back_refs = BackRefs::new();
        self.subscribers.clear();
        self.hit_index.clear();
        info!(container = ?self.container, "instance destroyed");
        self.container = None;
        self.destroyed = true;
    }

    /// Remove an element and its subtree from the document, together with
    /// every listener, selection entry, posse membership and back-reference
    /// that pointed at them. Returns the removed ids.
    pub fn remove_element(&mut self, element: ElementId) -> Vec<ElementId> {
        let removed = self.doc.remove(element);
        if !removed.is_empty() {
            self.forget_elements(&removed);
        }
        self.flush();
        removed
    }

    fn forget_elements(&mut self, removed: &[ElementId]) {
        self.bus.forget(removed);
        self.selection.prune(removed);
        self.posses.prune(removed);
        self.back_refs.prune(removed);

        if let Some(container) = self.container.filter(|c| removed.contains(c)) {
            warn!(%container, "container removed from document");
            self.delegates.clear();
            self.reset_drag();
            self.container = None;
        }
    }

    /// Abort any session and drop the handlers.
    fn reset_drag(&mut self) {
        if self.with_drag_context(|drag, ctx| drag.reset(ctx)).is_none() {
            self.drag = DragManager::new();
        }
    }

    /// Borrow the drag manager together with the state its handlers work on.
    /// `None` without a container.
    pub(crate) fn with_drag_context<R>(
        &mut self,
        f: impl FnOnce(&mut DragManager, &mut DragContext<'_>) -> R,
    ) -> Option<R> {
        let container = self.container?;
        let mut ctx = DragContext {
            doc: &mut self.doc,
            container,
            selection: &self.selection,
            posses: &self.posses,
            back_refs: &self.back_refs,
            options: &self.settings.drag,
            zoom: self.settings.zoom,
            hit_index: &mut self.hit_index,
            notifications: &mut self.pending,
        };
        Some(f(&mut self.drag, &mut ctx))
    }

    // ------------------------------------------------------------------------
    // Domain events
    // ------------------------------------------------------------------------

    /// Register a listener for domain events.
    pub fn bind(&mut self, subscriber: impl Fn(&Notification) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Rc::new(subscriber)));
        id
    }

    pub fn unbind(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Deliver pending notifications to every subscriber.
    pub(crate) fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending);
        let subscribers: Vec<Subscriber> = self.subscribers.iter().map(|(_, s)| Rc::clone(s)).collect();
        for notification in &pending {
            debug!(event = notification.name(), "notify");
            for subscriber in &subscribers {
                subscriber(notification);
            }
        }
    }
}
