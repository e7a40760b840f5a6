//! Spatial Index Module
//!
//! R-tree over element page boxes for pointer hit testing. Used to resolve
//! pointer events that arrive without a target element and to find the drop
//! target under a dragged connection endpoint.

use crate::dom::{Document, ElementId};
use crate::geometry;
use crate::types::{Point, Rect};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// An element's page box plus its paint order.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub element: ElementId,
    /// Position in document order; later elements paint on top.
    pub order: usize,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SpatialEntry {
    pub fn new(element: ElementId, order: usize, rect: Rect) -> Self {
        Self {
            element,
            order,
            min_x: rect.left,
            min_y: rect.top,
            max_x: rect.right(),
            max_y: rect.bottom(),
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

/// Hit-testing index for one document, rebuilt lazily when the document
/// revision changes.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<ElementId, SpatialEntry>,
    revision: Option<u64>,
    root: Option<ElementId>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every connected, visible, non-empty element under `root`.
    pub fn build(doc: &Document, root: ElementId) -> Self {
        let mut index = Self::new();
        index.rebuild(doc, root);
        index
    }

    pub fn rebuild(&mut self, doc: &Document, root: ElementId) {
        let entries: Vec<SpatialEntry> = doc
            .subtree(root)
            .into_iter()
            .enumerate()
            .filter(|&(_, el)| doc.get(el).is_some_and(|e| !e.is_hidden()) && !doc.size(el).is_empty())
            .map(|(order, el)| SpatialEntry::new(el, order, geometry::page_rect(doc, el)))
            .collect();

        self.entries = entries.iter().map(|e| (e.element, *e)).collect();
        self.tree = RTree::bulk_load(entries);
        self.revision = Some(doc.revision());
        self.root = Some(root);
    }

    /// Rebuild only if the document changed, or a different root is asked
    /// for, since the last build.
    pub fn refresh(&mut self, doc: &Document, root: ElementId) {
        if self.revision != Some(doc.revision()) || self.root != Some(root) {
            self.rebuild(doc, root);
        }
    }

    /// All elements whose page box contains the point, topmost first.
    pub fn query_point(&self, point: Point) -> Vec<ElementId> {
        let envelope = AABB::from_point([point.x, point.y]);
        let mut hits: Vec<&SpatialEntry> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.contains_point(point.x, point.y))
            .collect();
        hits.sort_by(|a, b| b.order.cmp(&a.order));
        hits.into_iter().map(|entry| entry.element).collect()
    }

    /// Topmost element at the point for which `accept` returns true.
    pub fn topmost(&self, point: Point, mut accept: impl FnMut(ElementId) -> bool) -> Option<ElementId> {
        self.query_point(point).into_iter().find(|&el| accept(el))
    }

    pub fn get(&self, element: ElementId) -> Option<&SpatialEntry> {
        self.entries.get(&element)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
        self.revision = None;
        self.root = None;
    }
}
