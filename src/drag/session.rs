use super::handler::{DragContext, HandlerKind};
use crate::constants::CLASS_DRAG_ACTIVE;
use crate::dom::{Document, ElementId};
use crate::geometry;
use crate::settings::DragOptions;
use crate::types::{Offset, Point};

/// An element moved by a session, with its offset when the session began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionMember {
    pub element: ElementId,
    pub start: Offset,
    /// Moves with an ancestor that is also in the move set; its own offset
    /// is never written.
    pub carried: bool,
}

/// One in-progress drag gesture.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// The element the gesture started on
    pub primary: ElementId,
    /// Index of the owning handler in the manager
    pub handler: usize,
    pub kind: HandlerKind,
    /// Page position of the pointer at pointer-down
    pub origin: Point,
    /// Latest page position of the pointer
    pub pointer: Point,
    /// Delta applied on the last tick, in container space
    pub delta: Point,
    members: Vec<SessionMember>,
    saved_styles: Vec<(&'static str, Option<String>)>,
}

impl DragSession {
    pub fn new(primary: ElementId, handler: usize, kind: HandlerKind, origin: Point) -> Self {
        Self {
            primary,
            handler,
            kind,
            origin,
            pointer: origin,
            delta: Point::ORIGIN,
            members: Vec::new(),
            saved_styles: Vec::new(),
        }
    }

    /// Members in move order, primary first.
    pub fn members(&self) -> &[SessionMember] {
        &self.members
    }

    pub fn elements(&self) -> Vec<ElementId> {
        self.members.iter().map(|m| m.element).collect()
    }

    pub fn start_of(&self, element: ElementId) -> Option<Offset> {
        self.members.iter().find(|m| m.element == element).map(|m| m.start)
    }

    pub fn has_moved(&self) -> bool {
        self.delta != Point::ORIGIN
    }

    /// Record the move set and every member's start offset. The primary is
    /// always first. Members nested inside another member already move with
    /// it and are dropped, except the primary, which is kept as carried so
    /// its start stays available.
    pub fn set_members(&mut self, doc: &Document, elements: impl IntoIterator<Item = ElementId>) {
        let primary = self.primary;
        let mut set: Vec<ElementId> = vec![primary];
        for el in elements {
            if doc.contains(el) && !set.contains(&el) {
                set.push(el);
            }
        }
        let nested = |el: ElementId| doc.ancestors(el).any(|a| set.contains(&a));
        self.members = set
            .iter()
            .copied()
            .filter_map(|element| {
                let carried = nested(element);
                (element == primary || !carried).then(|| SessionMember {
                    element,
                    start: doc.offset(element),
                    carried,
                })
            })
            .collect();
    }

    /// Pointer travel since pointer-down, scaled into container space.
    pub fn raw_delta(&self, zoom: f64) -> Point {
        (self.pointer - self.origin).unzoomed(zoom)
    }

    /// Apply the grid and containment options to a raw delta. Both are
    /// computed on the primary and the result is applied to every member.
    pub fn constrain(&self, ctx: &DragContext<'_>, raw: Point) -> Point {
        let Some(start) = self.start_of(self.primary) else {
            return raw;
        };
        let mut delta = raw;

        if let Some([gx, gy]) = ctx.options.grid {
            let target = start.translated(delta);
            delta = Point::new(
                (target.left / gx).round() * gx - start.left,
                (target.top / gy).round() * gy - start.top,
            );
        }

        if ctx.options.containment {
            // A carried primary's ancestors have already moved by the last delta.
            let carried = self.members.first().is_some_and(|m| m.carried);
            let start_ui = geometry::ui_position(&*ctx.doc, self.primary, start, Some(ctx.container))
                .map(|p| if carried { p.translated(Point::ORIGIN - self.delta) } else { p });
            if let Some(start_ui) = start_ui {
                let bounds = ctx.doc.size(ctx.container);
                let own = ctx.doc.size(self.primary);
                let clamp = |v: f64, extent: f64, own: f64| {
                    let v = v.max(0.0);
                    if extent > 0.0 { v.min((extent - own).max(0.0)) } else { v }
                };
                delta = Point::new(
                    clamp(start_ui.left + delta.x, bounds.width, own.width) - start_ui.left,
                    clamp(start_ui.top + delta.y, bounds.height, own.height) - start_ui.top,
                );
            }
        }

        delta
    }

    /// Move every member to `start + delta`. Carried members, and members
    /// that vanished or have no offset parent, are left where they are.
    pub fn apply(&mut self, ctx: &mut DragContext<'_>, delta: Point) {
        crate::profile_scope!("drag_apply");
        for member in self.members.iter().filter(|m| !m.carried) {
            let target = member.start.translated(delta);
            if geometry::ui_position(ctx.doc, member.element, target, Some(ctx.container)).is_none() {
                continue;
            }
            ctx.doc.set_offset(member.element, target);
        }
        self.delta = delta;
    }

    /// Put every member back where it started.
    pub fn revert(&mut self, doc: &mut Document) {
        for member in self.members.iter().filter(|m| !m.carried) {
            doc.set_offset(member.element, member.start);
        }
        self.delta = Point::ORIGIN;
    }

    pub(crate) fn apply_drag_styles(&mut self, doc: &mut Document, options: &DragOptions) {
        let overrides = [
            ("cursor", options.cursor.clone()),
            ("z-index", options.z_index.map(|z| z.to_string())),
        ];
        for (property, value) in overrides {
            if let Some(value) = value {
                self.saved_styles
                    .push((property, doc.style(self.primary, property).map(str::to_string)));
                doc.set_style(self.primary, property, value);
            }
        }
        for member in &self.members {
            doc.add_class(member.element, CLASS_DRAG_ACTIVE);
        }
    }

    pub(crate) fn restore_drag_styles(&mut self, doc: &mut Document) {
        for (property, previous) in self.saved_styles.drain(..) {
            match previous {
                Some(value) => doc.set_style(self.primary, property, value),
                None => {
                    doc.remove_style(self.primary, property);
                }
            }
        }
        for member in &self.members {
            doc.remove_class(member.element, CLASS_DRAG_ACTIVE);
        }
    }
}
