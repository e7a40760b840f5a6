//! Delegated click and hover handling, user listeners and synthesised events.

use crate::helpers::{RecordingRenderer, TestTreeBuilder};
use plumbline::constants::CLASS_CONNECTOR;
use plumbline::{
    ConnectionId, EndpointId, EventKind, Instance, Notification, OverlayId, Point, PointerEvent, Settings,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_click_on_connector_added_after_construction() {
    let mut fx = TestTreeBuilder::new().build();
    let container = fx.container;

    let doc = fx.instance.document_mut();
    let connector = doc.create_element("svg");
    doc.append_child(container, connector);
    doc.add_class(connector, CLASS_CONNECTOR);
    let path = doc.create_element("path");
    doc.append_child(connector, path);
    fx.instance.register_connector(connector, ConnectionId(3));
    fx.clear_events();

    fx.instance
        .handle_pointer(PointerEvent::at(EventKind::Click, path, Point::ORIGIN));
    fx.instance
        .handle_pointer(PointerEvent::at(EventKind::DblClick, path, Point::ORIGIN));

    assert_eq!(
        *fx.events.borrow(),
        vec![
            Notification::ConnectionClick {
                connection: ConnectionId(3),
                element: connector,
                double: false,
            },
            Notification::ConnectionClick {
                connection: ConnectionId(3),
                element: connector,
                double: true,
            },
        ]
    );
}

#[test]
fn test_unregistered_connector_click_is_silent() {
    let mut fx = TestTreeBuilder::new().with_connector("c").build();
    fx.clear_events();
    fx.click("c");
    assert!(fx.names().is_empty());
}

#[test]
fn test_endpoint_click() {
    let mut fx = TestTreeBuilder::new()
        .with_endpoint("ep", None, (100.0, 100.0))
        .build();
    let ep = fx.id("ep");
    fx.instance.register_endpoint(ep, EndpointId(1));
    fx.clear_events();

    fx.click("ep");
    assert_eq!(
        fx.events.borrow().last(),
        Some(&Notification::EndpointClick {
            endpoint: EndpointId(1),
            element: ep,
            double: false,
        })
    );
}

#[test]
fn test_overlay_click_is_consumed() {
    let mut fx = TestTreeBuilder::new()
        .with_connector("c")
        .with_overlay("label", "c")
        .build();
    let (c, label) = (fx.id("c"), fx.id("label"));
    fx.instance.register_connector(c, ConnectionId(1));
    fx.instance.register_overlay(label, OverlayId(2));
    let renderer = RecordingRenderer::default();
    fx.instance.set_renderer(Box::new(renderer.clone()));

    let bubbled = Rc::new(RefCell::new(0));
    let seen = Rc::clone(&bubbled);
    let body = fx.instance.document().body();
    fx.instance
        .on_direct(body, "click", move |_, _| *seen.borrow_mut() += 1)
        .unwrap();
    fx.clear_events();

    let ev = fx.click("label");

    assert!(ev.is_default_prevented());
    assert!(ev.is_propagation_stopped());
    assert!(fx.names().is_empty());
    assert_eq!(*bubbled.borrow(), 0);
    assert_eq!(*renderer.calls.borrow(), vec!["overlay ov_2 Click".to_string()]);
}

#[test]
fn test_hover_hooks_and_class() {
    let settings = Settings {
        hover_class: Some("hover".into()),
        ..Settings::default()
    };
    let mut fx = TestTreeBuilder::new()
        .with_settings(settings)
        .with_connector("c")
        .with_endpoint("ep", None, (0.0, 0.0))
        .build();
    let (c, ep) = (fx.id("c"), fx.id("ep"));
    fx.instance.register_connector(c, ConnectionId(5));
    fx.instance.register_endpoint(ep, EndpointId(6));
    let renderer = RecordingRenderer::default();
    fx.instance.set_renderer(Box::new(renderer.clone()));

    fx.instance
        .handle_pointer(PointerEvent::at("mouseover", c, Point::ORIGIN));
    assert!(fx.instance.has_class(c, "hover"));
    fx.instance
        .handle_pointer(PointerEvent::at("mouseout", c, Point::ORIGIN));
    assert!(!fx.instance.has_class(c, "hover"));
    fx.instance
        .handle_pointer(PointerEvent::at("mouseenter", ep, Point::ORIGIN));

    insta::assert_debug_snapshot!(renderer.calls.borrow(), @r###"
    [
        "connector con_5 hover=true",
        "connector con_5 hover=false",
        "endpoint ep_6 hover=true",
    ]
    "###);
}

#[test]
fn test_user_listener_on_and_off() {
    let mut fx = TestTreeBuilder::new().with_node("a", (0.0, 0.0)).build();
    let container = fx.container;
    let hits = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&hits);
    let id = fx
        .instance
        .on(container, "click", "[jtk-managed]", move |inst: &mut Instance, d| {
            let name = inst.get_attribute(d.current, "id").unwrap_or_default().to_string();
            sink.borrow_mut().push(name);
        })
        .unwrap();

    fx.click("a");
    assert!(fx.instance.off(container, "click", id));
    fx.click("a");
    assert!(!fx.instance.off(container, "click", id));

    assert_eq!(*hits.borrow(), vec!["a".to_string()]);
}

#[test]
fn test_invalid_selector_is_rejected() {
    let mut fx = TestTreeBuilder::new().build();
    let container = fx.container;
    assert!(fx.instance.on(container, "click", "[unterminated", |_, _| {}).is_err());
}

#[test]
fn test_trigger_carries_position_and_payload() {
    let mut fx = TestTreeBuilder::new().with_node("a", (0.0, 0.0)).build();
    let a = fx.id("a");
    let received = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&received);
    fx.instance
        .on_direct(a, "connection:moved", move |_, d| {
            *sink.borrow_mut() = Some((d.event.page, d.event.payload.clone()));
        })
        .unwrap();

    let original = PointerEvent::new(EventKind::PointerMove, Point::new(12.0, 34.0));
    let ev = fx
        .instance
        .trigger(a, "connection:moved", Some(&original), Some(json!({"id": 7})))
        .unwrap();

    assert_eq!(ev.kind, EventKind::Custom("connection:moved".into()));
    assert_eq!(*received.borrow(), Some((Point::new(12.0, 34.0), Some(json!({"id": 7})))));
}

#[test]
fn test_triggered_pointer_down_starts_drag() {
    let mut fx = TestTreeBuilder::new().with_node("a", (0.0, 0.0)).build();
    let a = fx.id("a");
    let down = PointerEvent::new(EventKind::PointerDown, Point::new(10.0, 10.0));
    fx.instance.trigger(a, "mousedown", Some(&down), None).unwrap();
    assert!(fx.instance.is_dragging());
    assert_eq!(fx.instance.drag_session().map(|s| s.primary), Some(a));
}

#[test]
fn test_missing_target_is_hit_tested() {
    let mut fx = TestTreeBuilder::new()
        .with_node("a", (10.0, 10.0))
        .with_node("b", (30.0, 30.0))
        .build();
    let b = fx.id("b");

    // (40, 40) lies in both nodes; b comes later in document order.
    fx.instance
        .handle_pointer(PointerEvent::new(EventKind::PointerDown, Point::new(40.0, 40.0)));
    assert_eq!(fx.instance.drag_session().map(|s| s.primary), Some(b));
}

#[test]
fn test_hidden_element_is_not_hit() {
    let mut fx = TestTreeBuilder::new().with_node("a", (10.0, 10.0)).build();
    let a = fx.id("a");
    fx.instance.document_mut().set_hidden(a, true);

    let ev = fx
        .instance
        .handle_pointer(PointerEvent::new(EventKind::PointerDown, Point::new(20.0, 20.0)));
    assert_eq!(ev.target, Some(fx.container));
    assert!(!fx.instance.is_dragging());
}

#[test]
fn test_listener_may_remove_elements() {
    let mut fx = TestTreeBuilder::new().with_node("a", (0.0, 0.0)).build();
    let a = fx.id("a");
    fx.instance.add_to_drag_selection(&[a]);
    fx.instance
        .on_direct(a, "click", |inst, d| {
            inst.remove_element(d.current);
        })
        .unwrap();

    fx.click("a");
    assert!(!fx.instance.document().contains(a));
    assert!(fx.instance.get_drag_selection().is_empty());
}
