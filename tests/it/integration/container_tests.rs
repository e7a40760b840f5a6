//! Container swaps, reset and teardown.

use crate::helpers::{Fixture, TestTreeBuilder, positioned};
use plumbline::constants::{ATTRIBUTE_CONTAINER, CLASS_CONNECTOR};
use plumbline::{ConnectionId, ElementId, Error, EventKind, Notification, Offset, Point, PointerEvent, PositionKind};

fn new_container(fx: &mut Fixture) -> ElementId {
    let doc = fx.instance.document_mut();
    let body = doc.body();
    positioned(doc, body, PositionKind::Relative, 0.0, 700.0)
}

#[test]
fn test_swap_during_drag_aborts_session() {
    let mut fx = TestTreeBuilder::new().with_node("a", (10.0, 10.0)).build();
    let next = new_container(&mut fx);
    fx.clear_events();

    fx.down("a", 20.0, 20.0);
    fx.move_to(70.0, 20.0);
    assert_eq!(fx.offset("a"), Offset::new(60.0, 10.0));

    fx.instance.set_container(next).unwrap();

    insta::assert_debug_snapshot!(fx.names(), @r###"
    [
        "drag:start",
        "drag:move",
        "drag:abort",
        "container:change",
    ]
    "###);
    assert!(!fx.instance.is_dragging());
    assert_eq!(fx.offset("a"), Offset::new(10.0, 10.0));
    assert_eq!(
        fx.events.borrow().last(),
        Some(&Notification::ContainerChange {
            container: next,
            previous: Some(fx.container),
        })
    );
}

#[test]
fn test_swap_keeps_posses_and_clears_selection() {
    let mut fx = TestTreeBuilder::new()
        .with_node("a", (0.0, 0.0))
        .with_node("b", (100.0, 0.0))
        .build();
    let (a, b) = (fx.id("a"), fx.id("b"));
    fx.instance.add_to_posse("p", &[a, b]);
    fx.instance.add_to_drag_selection(&[a]);
    let next = new_container(&mut fx);

    fx.instance.set_container(next).unwrap();

    assert!(fx.instance.get_drag_selection().is_empty());
    assert!(!fx.instance.has_class(a, "jtk-drag-selected"));
    assert_eq!(fx.instance.posse_of(a), Some("p"));
    assert_eq!(fx.instance.posse_members("p"), vec![(a, true), (b, true)]);
}

#[test]
fn test_swap_moves_topmost_content_and_marker() {
    let mut fx = TestTreeBuilder::new()
        .with_node("a", (0.0, 0.0))
        .with_endpoint("ep", Some("a"), (5.0, 5.0))
        .with_connector("c")
        .with_overlay("label", "c")
        .build();
    let old = fx.container;
    let plain = {
        let doc = fx.instance.document_mut();
        positioned(doc, old, PositionKind::Static, 0.0, 0.0)
    };
    let next = new_container(&mut fx);

    fx.instance.set_container(next).unwrap();

    let doc = fx.instance.document();
    assert_eq!(doc.children(next), &[fx.id("a"), fx.id("c")]);
    assert_eq!(doc.parent(fx.id("ep")), Some(fx.id("a")));
    assert_eq!(doc.parent(fx.id("label")), Some(fx.id("c")));
    assert_eq!(doc.parent(plain), Some(old));

    assert_eq!(doc.attribute(old, ATTRIBUTE_CONTAINER), None);
    let marker = doc.attribute(next, ATTRIBUTE_CONTAINER).unwrap();
    assert_eq!(marker.len(), 32);
    assert!(marker.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(fx.instance.container(), Some(next));
}

#[test]
fn test_drag_after_swap_uses_new_container() {
    let mut fx = TestTreeBuilder::new().with_node("a", (0.0, 0.0)).build();
    let next = new_container(&mut fx);
    fx.instance.set_container(next).unwrap();
    fx.clear_events();

    // `a` now sits at (0, 700) on the page.
    fx.down("a", 10.0, 710.0);
    fx.move_to(30.0, 720.0);
    fx.up(30.0, 720.0);

    assert_eq!(fx.offset("a"), Offset::new(20.0, 10.0));
    assert_eq!(fx.names().last(), Some(&"drag:stop"));
}

#[test]
fn test_delegates_follow_the_container() {
    let mut fx = TestTreeBuilder::new().with_connector("c").build();
    let c = fx.id("c");
    fx.instance.register_connector(c, ConnectionId(1));
    let next = new_container(&mut fx);
    fx.instance.set_container(next).unwrap();
    fx.clear_events();

    fx.click("c");
    assert_eq!(fx.names(), vec!["connection:click"]);
}

#[test]
fn test_swap_to_same_container_refreshes_marker() {
    let mut fx = TestTreeBuilder::new().with_node("a", (0.0, 0.0)).build();
    let container = fx.container;
    let before = fx
        .instance
        .get_attribute(container, ATTRIBUTE_CONTAINER)
        .map(str::to_string);

    fx.instance.set_container(container).unwrap();

    let after = fx.instance.get_attribute(container, ATTRIBUTE_CONTAINER).map(str::to_string);
    assert!(after.is_some());
    assert_ne!(before, after);
    assert_eq!(fx.instance.document().parent(fx.id("a")), Some(container));
}

#[test]
fn test_unknown_container_is_rejected() {
    let mut fx = TestTreeBuilder::new().build();
    let gone = {
        let doc = fx.instance.document_mut();
        let el = doc.create_element("div");
        doc.remove(el);
        el
    };
    assert!(matches!(fx.instance.set_container(gone), Err(Error::UnknownElement(el)) if el == gone));
    assert_eq!(fx.instance.container(), Some(fx.container));
}

#[test]
fn test_reset_removes_content_and_keeps_container() {
    let mut fx = TestTreeBuilder::new()
        .with_node("a", (0.0, 0.0))
        .with_endpoint("ep", Some("a"), (5.0, 5.0))
        .with_connector("c")
        .build();
    let (a, c) = (fx.id("a"), fx.id("c"));
    fx.instance.add_to_posse("p", &[a]);
    fx.instance.add_to_drag_selection(&[a]);
    fx.down("a", 10.0, 10.0);

    fx.instance.reset();

    let doc = fx.instance.document();
    assert!(!doc.contains(a));
    assert!(!doc.contains(fx.id("ep")));
    assert!(!doc.contains(c));
    assert!(doc.children(fx.container).is_empty());
    assert!(!fx.instance.is_dragging());
    assert!(fx.instance.get_drag_selection().is_empty());
    assert_eq!(fx.instance.posse_of(a), None);
    assert_eq!(fx.instance.container(), Some(fx.container));

    // Delegated listeners survive the reset.
    let container = fx.container;
    let doc = fx.instance.document_mut();
    let connector = doc.create_element("path");
    doc.append_child(container, connector);
    doc.add_class(connector, CLASS_CONNECTOR);
    fx.instance.register_connector(connector, ConnectionId(2));
    fx.clear_events();
    fx.instance
        .handle_pointer(PointerEvent::at(EventKind::Click, connector, Point::ORIGIN));
    assert_eq!(fx.names(), vec!["connection:click"]);
}

#[test]
fn test_destroy_makes_instance_inert() {
    let mut fx = TestTreeBuilder::new().with_node("a", (0.0, 0.0)).build();
    let (a, container) = (fx.id("a"), fx.container);
    fx.down("a", 10.0, 10.0);
    fx.clear_events();

    fx.instance.destroy();

    assert!(fx.instance.is_destroyed());
    assert_eq!(fx.instance.container(), None);
    assert_eq!(fx.names(), vec!["drag:abort"]);
    assert!(matches!(fx.instance.manage(a), Err(Error::Destroyed)));
    assert!(matches!(fx.instance.set_container(container), Err(Error::Destroyed)));
    assert!(matches!(fx.instance.on_direct(a, "click", |_, _| {}), Err(Error::Destroyed)));
    assert!(matches!(fx.instance.trigger(a, "click", None, None), Err(Error::Destroyed)));

    // Events are ignored; subscribers were dropped.
    fx.down("a", 10.0, 10.0);
    assert!(!fx.instance.is_dragging());
    assert_eq!(fx.names(), vec!["drag:abort"]);

    fx.instance.destroy();
}

#[test]
fn test_removing_the_container_detaches() {
    let mut fx = TestTreeBuilder::new().with_node("a", (0.0, 0.0)).build();
    let (a, container) = (fx.id("a"), fx.container);
    fx.down("a", 10.0, 10.0);
    fx.clear_events();

    let removed = fx.instance.remove_element(container);

    assert_eq!(removed.first(), Some(&container));
    assert!(removed.contains(&a));
    assert_eq!(fx.instance.container(), None);
    assert!(!fx.instance.is_dragging());
    assert_eq!(fx.names(), vec!["drag:abort"]);

    let body = fx.instance.document().body();
    let ev = fx
        .instance
        .handle_pointer(PointerEvent::at(EventKind::PointerDown, body, Point::ORIGIN));
    assert_eq!(ev.target, Some(body));
    assert!(!fx.instance.is_dragging());
}
