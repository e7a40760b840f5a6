//! Container-level delegated listeners for connectors, endpoints and overlays.
//!
//! These are bound once per container with a selector, so elements created
//! by the rendering layer after the fact are covered without rebinding.

use super::Instance;
use crate::constants::{SELECTOR_CONNECTOR, SELECTOR_ENDPOINT, SELECTOR_OVERLAY};
use crate::dom::ElementId;
use crate::error::Result;
use crate::events::Delegated;
use crate::notification::Notification;
use crate::pointer::EventKind;
use crate::renderer::{BackRef, OverlayAction};
use tracing::trace;

impl Instance {
    pub(crate) fn attach_delegates(&mut self, container: ElementId) -> Result<()> {
        for double in [false, true] {
            let kind = if double { EventKind::DblClick } else { EventKind::Click };
            // Overlays first: a consumed overlay click must not reach the
            // connector or endpoint delegates.
            self.delegate(container, kind.clone(), SELECTOR_OVERLAY, move |inst, d| {
                inst.overlay_clicked(d, double)
            })?;
            self.delegate(container, kind.clone(), SELECTOR_CONNECTOR, move |inst, d| {
                inst.connector_clicked(d, double)
            })?;
            self.delegate(container, kind, SELECTOR_ENDPOINT, move |inst, d| {
                inst.endpoint_clicked(d, double)
            })?;
        }

        for hover in [true, false] {
            let kind = if hover { EventKind::MouseOver } else { EventKind::MouseOut };
            for selector in [SELECTOR_CONNECTOR, SELECTOR_ENDPOINT, SELECTOR_OVERLAY] {
                self.delegate(container, kind.clone(), selector, move |inst, d| inst.hovered(d.current, hover))?;
            }
        }

        trace!(%container, count = self.delegates.len(), "delegates attached");
        Ok(())
    }

    fn delegate(
        &mut self,
        container: ElementId,
        kind: EventKind,
        selector: &str,
        listener: impl Fn(&mut Instance, &mut Delegated<'_>) + 'static,
    ) -> Result<()> {
        let id = self.bus.on(container, kind.clone(), selector, listener)?;
        self.delegates.push((container, kind, id));
        Ok(())
    }

    pub(crate) fn detach_delegates(&mut self) {
        for (element, kind, id) in self.delegates.drain(..) {
            self.bus.off(element, &kind, id);
        }
    }

    fn overlay_clicked(&mut self, d: &mut Delegated<'_>, double: bool) {
        d.event.consume(false);
        if let Some(overlay) = self.back_refs.overlay(d.current) {
            let action = if double { OverlayAction::DblClick } else { OverlayAction::Click };
            self.renderer.overlay_event(overlay, action, &*d.event);
        }
    }

    fn connector_clicked(&mut self, d: &mut Delegated<'_>, double: bool) {
        if d.event.is_default_prevented() {
            return;
        }
        if let Some(connection) = self.back_refs.connection(d.current) {
            self.pending.push(Notification::ConnectionClick {
                connection,
                element: d.current,
                double,
            });
        }
    }

    fn endpoint_clicked(&mut self, d: &mut Delegated<'_>, double: bool) {
        if d.event.is_default_prevented() {
            return;
        }
        if let Some(endpoint) = self.back_refs.endpoint(d.current) {
            self.pending.push(Notification::EndpointClick {
                endpoint,
                element: d.current,
                double,
            });
        }
    }

    fn hovered(&mut self, element: ElementId, hover: bool) {
        if let Some(class) = self.settings.hover_class.clone() {
            if hover {
                self.doc.add_class(element, &class);
            } else {
                self.doc.remove_class(element, &class);
            }
        }
        match self.back_refs.get(element) {
            Some(BackRef::Connector(c)) => self.renderer.set_connector_hover(c, hover),
            Some(BackRef::Endpoint(e)) => self.renderer.set_endpoint_hover(e, hover),
            Some(BackRef::Overlay(o)) => self.renderer.set_overlay_hover(o, hover),
            None => {}
        }
    }
}
