use super::handler::{DragContext, DragHandler, HandlerKind};
use super::session::DragSession;
use crate::constants::ATTRIBUTE_GROUP;
use crate::dom::ElementId;
use crate::notification::Notification;

/// Drags group elements. Members are children of the group element, so they
/// follow it without being moved individually.
#[derive(Debug, Default)]
pub struct GroupDragHandler;

impl GroupDragHandler {
    pub fn new() -> Self {
        Self
    }
}

impl DragHandler for GroupDragHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Group
    }

    fn can_handle(&self, ctx: &DragContext<'_>, element: ElementId) -> bool {
        ctx.doc.attribute(element, ATTRIBUTE_GROUP).is_some()
    }

    fn on_start(&mut self, ctx: &mut DragContext<'_>, session: &mut DragSession) {
        let pos = ctx.ui_position_or_offset(session.primary);
        ctx.notify(Notification::GroupDragStart {
            group: session.primary,
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
        let pos = ctx.ui_position_or_offset(session.primary);
        ctx.notify(Notification::GroupDragStop {
            group: session.primary,
            pos,
        });
    }
}
