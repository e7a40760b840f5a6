use super::handler::{DragContext, DragHandler, HandlerKind};
use super::session::DragSession;
use crate::constants::{ATTRIBUTE_MANAGED, CLASS_ENDPOINT};
use crate::dom::ElementId;
use crate::geometry;
use crate::notification::Notification;
use crate::types::Offset;
use tracing::debug;

/// Drags endpoints to make or move connections.
///
/// The endpoint element follows the pointer while dragging. On release the
/// drop target is hit-tested and the endpoint goes back to where it started:
/// placing endpoints is up to the rendering layer.
#[derive(Debug, Default)]
pub struct EndpointDragHandler;

impl EndpointDragHandler {
    pub fn new() -> Self {
        Self
    }

    fn drop_target(ctx: &mut DragContext<'_>, session: &DragSession) -> Option<ElementId> {
        let doc = &*ctx.doc;
        ctx.hit_index.refresh(doc, ctx.container);
        let point = session.pointer;
        ctx.hit_index.topmost(point, |el| {
            !doc.is_inclusive_descendant(el, session.primary)
                && (doc.has_class(el, CLASS_ENDPOINT) || doc.attribute(el, ATTRIBUTE_MANAGED).is_some())
        })
    }
}

impl DragHandler for EndpointDragHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Endpoint
    }

    fn can_handle(&self, ctx: &DragContext<'_>, element: ElementId) -> bool {
        ctx.doc.has_class(element, CLASS_ENDPOINT)
    }

    fn on_start(&mut self, ctx: &mut DragContext<'_>, session: &mut DragSession) {
        let endpoint = ctx.back_refs.endpoint(session.primary);
        ctx.notify(Notification::ConnectionDragStart {
            element: session.primary,
            endpoint,
        });
    }

    fn on_drag(&mut self, ctx: &mut DragContext<'_>, session: &mut DragSession) {
        let delta = session.raw_delta(ctx.zoom);
        session.apply(ctx, delta);
        let pos = ctx.ui_position(session.primary).unwrap_or(Offset::ZERO);
        let endpoint = ctx.back_refs.endpoint(session.primary);
        ctx.notify(Notification::ConnectionDrag {
            element: session.primary,
            endpoint,
            pos,
        });
    }

    fn on_stop(&mut self, ctx: &mut DragContext<'_>, session: &mut DragSession) {
        let drop_target = Self::drop_target(ctx, session);
        debug!(
            endpoint = %session.primary,
            drop_target = ?drop_target,
            at = ?geometry::ui_position(&*ctx.doc, session.primary, ctx.doc.offset(session.primary), Some(ctx.container)),
            "endpoint released"
        );
        session.revert(ctx.doc);

        let endpoint = ctx.back_refs.endpoint(session.primary);
        ctx.notify(Notification::ConnectionDragStop {
            element: session.primary,
            endpoint,
            drop_target,
        });
    }
}
