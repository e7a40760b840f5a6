//! Managed element drags, including the selection and posses they pull in.

use super::handler::{DragContext, DragHandler, HandlerKind};
use super::session::DragSession;
use crate::constants::{ATTRIBUTE_GROUP, ATTRIBUTE_MANAGED};
use crate::dom::ElementId;
use crate::notification::Notification;
use crate::posse::PosseRegistry;
use crate::selection::SelectionSet;
use indexmap::IndexSet;
use tracing::debug;

/// The elements that move when `primary` is dragged.
///
/// Starts from the whole selection if the primary is selected, otherwise the
/// primary alone. Every active posse member in the set then pulls in its
/// posse, until nothing new is added. Passive members never pull anything in.
pub fn resolve_move_set(primary: ElementId, selection: &SelectionSet, posses: &PosseRegistry) -> Vec<ElementId> {
    let mut set: IndexSet<ElementId> = IndexSet::new();
    set.insert(primary);
    if selection.contains(primary) {
        set.extend(selection.iter());
    }

    let mut i = 0;
    while let Some(&el) = set.get_index(i) {
        set.extend(posses.companions(el));
        i += 1;
    }

    set.into_iter().collect()
}

#[derive(Debug, Default)]
pub struct ElementDragHandler;

impl ElementDragHandler {
    pub fn new() -> Self {
        Self
    }
}

impl DragHandler for ElementDragHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Element
    }

    fn can_handle(&self, ctx: &DragContext<'_>, element: ElementId) -> bool {
        ctx.doc.attribute(element, ATTRIBUTE_MANAGED).is_some() && ctx.doc.attribute(element, ATTRIBUTE_GROUP).is_none()
    }

    fn on_start(&mut self, ctx: &mut DragContext<'_>, session: &mut DragSession) {
        let move_set = resolve_move_set(session.primary, ctx.selection, ctx.posses);
        debug!(primary = %session.primary, members = move_set.len(), "element drag start");
        session.set_members(&*ctx.doc, move_set);

        let pos = ctx.ui_position_or_offset(session.primary);
        ctx.notify(Notification::DragStart {
            element: session.primary,
            pos,
        });
    }

    fn on_drag(&mut self, ctx: &mut DragContext<'_>, session: &mut DragSession) {
        let delta = session.constrain(ctx, session.raw_delta(ctx.zoom));
        session.apply(ctx, delta);
        if let Some(pos) = ctx.ui_position(session.primary) {
            ctx.notify(Notification::Drag {
                element: session.primary,
                pos,
            });
        }
    }

    fn on_stop(&mut self, ctx: &mut DragContext<'_>, session: &mut DragSession) {
        let moved = session
            .elements()
            .into_iter()
            .filter(|&el| ctx.doc.contains(el))
            .map(|el| (el, ctx.ui_position_or_offset(el)))
            .collect();
        ctx.notify(Notification::DragStop {
            element: session.primary,
            moved,
        });
    }
}
