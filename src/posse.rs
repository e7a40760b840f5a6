//! Posses: named groups of elements that are dragged together.
//!
//! Each member carries an active flag. Dragging an active member drags every
//! member of its posse; a passive member only moves when an active member is
//! dragged. An element belongs to at most one posse at a time.

use crate::dom::ElementId;
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::debug;

/// Which posse to join, and in which role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosseSpec {
    /// Join as an active member.
    Id(String),
    WithState { id: String, active: bool },
}

impl PosseSpec {
    pub fn passive(id: impl Into<String>) -> Self {
        PosseSpec::WithState {
            id: id.into(),
            active: false,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            PosseSpec::Id(id) | PosseSpec::WithState { id, .. } => id,
        }
    }

    pub fn active(&self) -> bool {
        match self {
            PosseSpec::Id(_) => true,
            PosseSpec::WithState { active, .. } => *active,
        }
    }
}

impl From<&str> for PosseSpec {
    fn from(id: &str) -> Self {
        PosseSpec::Id(id.to_string())
    }
}

impl From<String> for PosseSpec {
    fn from(id: String) -> Self {
        PosseSpec::Id(id)
    }
}

impl From<(&str, bool)> for PosseSpec {
    fn from((id, active): (&str, bool)) -> Self {
        PosseSpec::WithState {
            id: id.to_string(),
            active,
        }
    }
}

/// One posse: members with their active flag, in join order.
#[derive(Debug, Clone, Default)]
pub struct Posse {
    members: IndexMap<ElementId, bool>,
}

impl Posse {
    pub fn members(&self) -> impl Iterator<Item = (ElementId, bool)> + '_ {
        self.members.iter().map(|(&el, &active)| (el, active))
    }

    pub fn elements(&self) -> Vec<ElementId> {
        self.members.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Debug, Default, Clone)]
pub struct PosseRegistry {
    posses: IndexMap<String, Posse>,
    membership: HashMap<ElementId, String>,
}

impl PosseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add elements to a posse, moving them out of any other posse first.
    /// Re-adding a member in the same role does nothing.
    pub fn add(&mut self, spec: &PosseSpec, elements: &[ElementId]) {
        let (id, active) = (spec.id(), spec.active());
        for &el in elements {
            if self.posse_of(el) == Some(id) && self.is_active(el) == Some(active) {
                continue;
            }
            if self.posse_of(el).is_some_and(|current| current != id) {
                self.remove(&[el]);
            }
            debug!(element = %el, posse = id, active, "join posse");
            self.posses.entry(id.to_string()).or_default().members.insert(el, active);
            self.membership.insert(el, id.to_string());
        }
    }

    /// Remove elements from whatever posse they are in. Posses left empty are dropped.
    pub fn remove(&mut self, elements: &[ElementId]) {
        for el in elements {
            let Some(id) = self.membership.remove(el) else {
                continue;
            };
            if let Some(posse) = self.posses.get_mut(&id) {
                posse.members.shift_remove(el);
                if posse.is_empty() {
                    self.posses.shift_remove(&id);
                }
            }
        }
    }

    /// Flip the active flag of elements that are in a posse; others are ignored.
    pub fn set_state(&mut self, active: bool, elements: &[ElementId]) {
        for el in elements {
            let Some(id) = self.membership.get(el) else {
                continue;
            };
            if let Some(flag) = self.posses.get_mut(id).and_then(|p| p.members.get_mut(el)) {
                *flag = active;
            }
        }
    }

    pub fn posse_of(&self, element: ElementId) -> Option<&str> {
        self.membership.get(&element).map(String::as_str)
    }

    /// The element's flag, or `None` if it is in no posse.
    pub fn is_active(&self, element: ElementId) -> Option<bool> {
        let id = self.membership.get(&element)?;
        self.posses.get(id)?.members.get(&element).copied()
    }

    pub fn get(&self, id: &str) -> Option<&Posse> {
        self.posses.get(id)
    }

    /// Elements that must move when `element` is dragged: every member of
    /// its posse if it is an active member, nothing otherwise.
    pub fn companions(&self, element: ElementId) -> Vec<ElementId> {
        match self.is_active(element) {
            Some(true) => self
                .posse_of(element)
                .and_then(|id| self.posses.get(id))
                .map(Posse::elements)
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.posses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posses.is_empty()
    }

    /// Drop elements that no longer exist.
    pub fn prune(&mut self, removed: &[ElementId]) {
        let gone: Vec<ElementId> = removed
            .iter()
            .copied()
            .filter(|el| self.membership.contains_key(el))
            .collect();
        self.remove(&gone);
    }

    pub fn clear(&mut self) {
        self.posses.clear();
        self.membership.clear();
    }
}
