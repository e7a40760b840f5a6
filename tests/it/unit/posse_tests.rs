//! Posse membership through the instance API.

use crate::helpers::TestTreeBuilder;
use plumbline::PosseSpec;

#[test]
fn test_joining_second_posse_leaves_first() {
    let mut fx = TestTreeBuilder::new()
        .with_node("a", (0.0, 0.0))
        .with_node("b", (100.0, 0.0))
        .build();
    let (a, b) = (fx.id("a"), fx.id("b"));

    fx.instance.add_to_posse("g1", &[a, b]);
    fx.instance.add_to_posse("g2", &[a]);

    assert_eq!(fx.instance.posse_of(a), Some("g2"));
    assert_eq!(fx.instance.posse_members("g1"), vec![(b, true)]);
    assert_eq!(fx.instance.posse_members("g2"), vec![(a, true)]);
}

#[test]
fn test_readding_same_role_is_noop() {
    let mut fx = TestTreeBuilder::new()
        .with_node("a", (0.0, 0.0))
        .with_node("b", (100.0, 0.0))
        .build();
    let (a, b) = (fx.id("a"), fx.id("b"));

    fx.instance.add_to_posse(PosseSpec::passive("g"), &[a]);
    fx.instance.add_to_posse("g", &[b]);
    let before = fx.instance.posse_members("g");
    fx.instance.add_to_posse(PosseSpec::passive("g"), &[a]);
    assert_eq!(fx.instance.posse_members("g"), before);
}

#[test]
fn test_set_posse_state_flips_flag_only() {
    let mut fx = TestTreeBuilder::new()
        .with_node("a", (0.0, 0.0))
        .with_node("b", (100.0, 0.0))
        .build();
    let (a, b) = (fx.id("a"), fx.id("b"));

    fx.instance.add_to_posse("g", &[a, b]);
    fx.instance.set_posse_state(false, &[b]);
    assert_eq!(fx.instance.posse_members("g"), vec![(a, true), (b, false)]);
}

#[test]
fn test_remove_from_posse_drops_empty_posse() {
    let mut fx = TestTreeBuilder::new().with_node("a", (0.0, 0.0)).build();
    let a = fx.id("a");

    fx.instance.add_to_posse("g", &[a]);
    fx.instance.remove_from_posse(&[a]);
    assert_eq!(fx.instance.posse_of(a), None);
    assert!(fx.instance.posse_members("g").is_empty());
}

#[test]
fn test_unmanage_leaves_posse() {
    let mut fx = TestTreeBuilder::new().with_node("a", (0.0, 0.0)).build();
    let a = fx.id("a");

    fx.instance.add_to_posse("g", &[a]);
    fx.instance.unmanage(a);
    assert_eq!(fx.instance.posse_of(a), None);
    assert!(!fx.instance.is_managed(a));
}
