//! Drag selection: elements that move together when any of them is dragged.

use crate::dom::ElementId;
use indexmap::IndexSet;

/// Insertion-ordered set of selected elements. All operations are
/// idempotent over element identity.
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    items: IndexSet<ElementId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the element was not already selected.
    pub fn add(&mut self, element: ElementId) -> bool {
        self.items.insert(element)
    }

    /// Returns true if the element was selected.
    pub fn remove(&mut self, element: ElementId) -> bool {
        self.items.shift_remove(&element)
    }

    /// Flip membership; returns the new state.
    pub fn toggle(&mut self, element: ElementId) -> bool {
        if self.remove(element) {
            false
        } else {
            self.add(element)
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.items.contains(&element)
    }

    /// Selected elements in selection order.
    pub fn get(&self) -> Vec<ElementId> {
        self.items.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop elements that no longer exist.
    pub fn prune(&mut self, removed: &[ElementId]) {
        self.items.retain(|el| !removed.contains(el));
    }
}
