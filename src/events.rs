//! Delegated event bus.
//!
//! Listeners are bound on a stable element (usually the container), either
//! directly or with a selector. A delegated binding fires for events whose
//! target lies below the bound element and has an inclusive ancestor matching
//! the selector, with that matching element as `current`. Connectors,
//! endpoints and overlays can come and go without touching the bindings.
//!
//! Dispatch bubbles from the target to the root. Listeners are invoked with
//! `&mut C` (the owning context) after the registry has been snapshotted, so
//! a listener may bind, unbind or remove elements while it runs.

use crate::dom::{Document, ElementId};
use crate::error::Result;
use crate::pointer::{EventKind, PointerEvent};
use crate::selector::Selector;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::trace;

/// Handle returned by [`EventBus::on`], used to unbind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// What a listener receives besides the context.
#[derive(Debug)]
pub struct Delegated<'e> {
    /// The element the binding resolved to: the selector match for delegated
    /// bindings, the bound element for direct ones.
    pub current: ElementId,
    /// The element the binding is attached to.
    pub bound: ElementId,
    pub event: &'e mut PointerEvent,
}

pub type Listener<C> = Rc<dyn Fn(&mut C, &mut Delegated<'_>)>;

struct Binding<C> {
    id: ListenerId,
    selector: Option<Selector>,
    listener: Listener<C>,
}

impl<C> Clone for Binding<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            selector: self.selector.clone(),
            listener: Rc::clone(&self.listener),
        }
    }
}

/// A resolved invocation, produced by [`EventBus::resolve`].
pub struct Invocation<C> {
    pub listener: Listener<C>,
    pub current: ElementId,
    pub bound: ElementId,
}

pub struct EventBus<C> {
    bindings: HashMap<(ElementId, EventKind), Vec<Binding<C>>>,
    next_id: u64,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        Self::default()
    }

    fn bind(&mut self, element: ElementId, kind: EventKind, selector: Option<Selector>, listener: Listener<C>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        trace!(%element, event = %kind, selector = ?selector.as_ref().map(Selector::as_str), "bind listener");
        self.bindings
            .entry((element, kind))
            .or_default()
            .push(Binding { id, selector, listener });
        id
    }

    /// Bind a delegated listener: it fires for events on descendants of
    /// `element` matching `selector`.
    pub fn on(
        &mut self,
        element: ElementId,
        kind: impl Into<EventKind>,
        selector: &str,
        listener: impl Fn(&mut C, &mut Delegated<'_>) + 'static,
    ) -> Result<ListenerId> {
        let selector = Selector::parse(selector)?;
        Ok(self.bind(element, kind.into(), Some(selector), Rc::new(listener)))
    }

    /// Bind a listener on `element` itself (fires for events on it or bubbling through it).
    pub fn on_direct(
        &mut self,
        element: ElementId,
        kind: impl Into<EventKind>,
        listener: impl Fn(&mut C, &mut Delegated<'_>) + 'static,
    ) -> ListenerId {
        self.bind(element, kind.into(), None, Rc::new(listener))
    }

    /// Unbind one listener. Returns false if it was not bound there.
    pub fn off(&mut self, element: ElementId, kind: &EventKind, id: ListenerId) -> bool {
        let key = (element, kind.clone());
        let Some(list) = self.bindings.get_mut(&key) else {
            return false;
        };
        let before = list.len();
        list.retain(|b| b.id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.bindings.remove(&key);
        }
        removed
    }

    /// Drop every binding attached to any of `elements`.
    pub fn forget(&mut self, elements: &[ElementId]) {
        self.bindings.retain(|(el, _), _| !elements.contains(el));
    }

    /// Number of bindings attached to `element`, across all event kinds.
    pub fn binding_count(&self, element: ElementId) -> usize {
        self.bindings
            .iter()
            .filter(|((el, _), _)| *el == element)
            .map(|(_, list)| list.len())
            .sum()
    }

    /// Snapshot the bindings an event reaches while bubbling from its target,
    /// grouped per bound element, nearest first.
    pub fn resolve(&self, doc: &Document, event: &PointerEvent) -> Vec<Vec<Invocation<C>>> {
        let Some(target) = event.target.filter(|&t| doc.contains(t)) else {
            return Vec::new();
        };

        std::iter::once(target)
            .chain(doc.ancestors(target))
            .filter_map(|bound| {
                let list = self.bindings.get(&(bound, event.kind.clone()))?;
                let invocations: Vec<Invocation<C>> = list
                    .iter()
                    .filter_map(|binding| {
                        let current = match &binding.selector {
                            None => bound,
                            Some(selector) => {
                                if target == bound {
                                    return None;
                                }
                                doc.find_parent(target, selector, Some(bound))?
                            }
                        };
                        Some(Invocation {
                            listener: Rc::clone(&binding.listener),
                            current,
                            bound,
                        })
                    })
                    .collect();
                (!invocations.is_empty()).then_some(invocations)
            })
            .collect()
    }

    /// Resolve and invoke in one go. Stops bubbling to further elements once a
    /// listener stops propagation; the remaining listeners on the same element
    /// still run. Returns the number of listeners invoked.
    pub fn dispatch(ctx: &mut C, resolved: Vec<Vec<Invocation<C>>>, event: &mut PointerEvent) -> usize {
        let mut invoked = 0;
        for group in resolved {
            for inv in group {
                let mut delegated = Delegated {
                    current: inv.current,
                    bound: inv.bound,
                    event: &mut *event,
                };
                (inv.listener)(ctx, &mut delegated);
                invoked += 1;
            }
            if event.is_propagation_stopped() {
                break;
            }
        }
        invoked
    }
}
