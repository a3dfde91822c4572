//! End-to-end scenarios driving the engine through its public API against
//! the in-memory surface.

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use flowbox::geometry::{Edges, Size};
use flowbox::modal::ENTER_DELAY;
use flowbox::testing::TestSurface;
use flowbox::{
    AttrKey, Engine, ModalContent, ModalOptions, NodeData, NodeId, NodeKind, Prop,
};

fn set(engine: &mut Engine, surface: &mut TestSurface, node: NodeId, pairs: &[(AttrKey, &str)]) {
    for (key, value) in pairs {
        engine.set_attr(surface, node, *key, Some(value)).unwrap();
    }
}

// ── Geometry through the engine ──────────────────────────────────────

#[test]
fn percent_width_in_a_row_gets_margin_box_semantics() {
    let mut engine = Engine::new();
    let mut surface = TestSurface::new(800.0, 600.0);
    let root = engine.insert_root(NodeData::new(NodeKind::Linear));
    set(&mut engine, &mut surface, root, &[(AttrKey::Orientation, "horizontal")]);
    let child = engine
        .insert_child(&mut surface, root, NodeData::new(NodeKind::View))
        .unwrap();

    set(&mut engine, &mut surface, child, &[
        (AttrKey::Margin, "2%"),
        (AttrKey::Width, "50%"),
    ]);

    assert_eq!(surface.style(child, Prop::Width), Some("calc(50% - 2% - 2%)"));
    // Percent-sized children stay flexible on the main axis.
    assert_eq!(surface.style(child, Prop::FlexShrink), None);

    insta::assert_snapshot!(surface.dump(child), @r"
    box-sizing: border-box
    margin-bottom: 2%
    margin-left: 2%
    margin-right: 2%
    margin-top: 2%
    width: calc(50% - 2% - 2%)
    ");
}

#[test]
fn fixed_width_sibling_is_pinned_against_shrinking() {
    let mut engine = Engine::new();
    let mut surface = TestSurface::new(800.0, 600.0);
    let root = engine.insert_root(NodeData::new(NodeKind::Linear));
    set(&mut engine, &mut surface, root, &[(AttrKey::Orientation, "horizontal")]);
    let child = engine
        .insert_child(&mut surface, root, NodeData::new(NodeKind::View))
        .unwrap();

    set(&mut engine, &mut surface, child, &[(AttrKey::Width, "120px")]);
    assert_eq!(surface.style(child, Prop::Width), Some("120px"));
    assert_eq!(surface.style(child, Prop::FlexShrink), Some("0"));
}

#[test]
fn attribute_application_is_idempotent() {
    let mut engine = Engine::new();
    let mut surface = TestSurface::new(800.0, 600.0);
    let root = engine.insert_root(NodeData::new(NodeKind::Linear));
    let child = engine
        .insert_child(&mut surface, root, NodeData::new(NodeKind::View))
        .unwrap();

    let attrs = [
        (AttrKey::Width, "50%"),
        (AttrKey::Margin, "2%"),
        (AttrKey::Corner, "5px"),
        (AttrKey::Elevation, "true"),
    ];
    set(&mut engine, &mut surface, child, &attrs);
    let first = surface.dump(child);
    set(&mut engine, &mut surface, child, &attrs);
    assert_eq!(surface.dump(child), first);
}

#[test]
fn unparseable_values_reach_the_surface_verbatim() {
    let mut engine = Engine::new();
    let mut surface = TestSurface::new(800.0, 600.0);
    let root = engine.insert_root(NodeData::new(NodeKind::Linear));
    let child = engine
        .insert_child(&mut surface, root, NodeData::new(NodeKind::View))
        .unwrap();

    set(&mut engine, &mut surface, child, &[(AttrKey::Width, "calc(100vw - 3em)")]);
    assert_eq!(surface.style(child, Prop::Width), Some("calc(100vw - 3em)"));
}

// ── Visibility across viewport changes ───────────────────────────────

#[test]
fn viewport_threshold_hides_and_restores() {
    let mut engine = Engine::new();
    let mut surface = TestSurface::new(800.0, 600.0);
    let root = engine.insert_root(NodeData::new(NodeKind::Linear));
    let sidebar = engine
        .insert_child(&mut surface, root, NodeData::new(NodeKind::View))
        .unwrap();
    set(&mut engine, &mut surface, sidebar, &[(AttrKey::MinWindowWidth, "600px")]);
    assert_eq!(surface.style(sidebar, Prop::Display), None);

    surface.set_viewport(500.0, 600.0);
    engine.on_viewport_resize(&mut surface);
    assert_eq!(surface.style(sidebar, Prop::Display), Some("none"));

    surface.set_viewport(800.0, 600.0);
    engine.on_viewport_resize(&mut surface);
    assert_eq!(surface.style(sidebar, Prop::Display), Some("block"));
}

// ── Free placement ───────────────────────────────────────────────────

#[test]
fn pixel_anchors_mirror_around_the_parent_midpoint() {
    let mut engine = Engine::new();
    let mut surface = TestSurface::new(800.0, 600.0);
    let root = engine.insert_root(NodeData::new(NodeKind::Free));
    surface.set_measured(root, Size::new(200.0, 100.0));

    let near = engine
        .insert_child(&mut surface, root, NodeData::new(NodeKind::View))
        .unwrap();
    let far = engine
        .insert_child(&mut surface, root, NodeData::new(NodeKind::View))
        .unwrap();
    surface.set_measured(near, Size::new(50.0, 20.0));
    surface.set_measured(far, Size::new(50.0, 20.0));

    set(&mut engine, &mut surface, near, &[(AttrKey::LayoutGravityHorizontal, "20px")]);
    set(&mut engine, &mut surface, far, &[(AttrKey::LayoutGravityHorizontal, "180px")]);
    engine.request_layout(&mut surface, root);

    assert_eq!(surface.style(near, Prop::Left), Some("20px"));
    assert_eq!(surface.style(near, Prop::Right), None);
    assert_eq!(surface.style(far, Prop::Right), Some("20px"));
    assert_eq!(surface.style(far, Prop::Left), None);
}

#[test]
fn the_midpoint_itself_anchors_trailing() {
    let mut engine = Engine::new();
    let mut surface = TestSurface::new(800.0, 600.0);
    let root = engine.insert_root(NodeData::new(NodeKind::Free));
    surface.set_measured(root, Size::new(200.0, 100.0));
    let child = engine
        .insert_child(&mut surface, root, NodeData::new(NodeKind::View))
        .unwrap();
    surface.set_measured(child, Size::new(50.0, 20.0));

    set(&mut engine, &mut surface, child, &[(AttrKey::LayoutGravityHorizontal, "100px")]);
    engine.request_layout(&mut surface, root);
    assert_eq!(surface.style(child, Prop::Right), Some("100px"));
    assert_eq!(surface.style(child, Prop::Left), None);
}

#[test]
fn anchored_children_never_escape_the_parent() {
    let mut engine = Engine::new();
    let mut surface = TestSurface::new(800.0, 600.0);
    let root = engine.insert_root(NodeData::new(NodeKind::Free));
    surface.set_measured(root, Size::new(200.0, 100.0));
    let child = engine
        .insert_child(&mut surface, root, NodeData::new(NodeKind::View))
        .unwrap();
    surface.set_measured(child, Size::new(150.0, 20.0));
    surface.set_computed_margin(child, Edges::new(0.0, 10.0, 0.0, 10.0));

    set(&mut engine, &mut surface, child, &[(AttrKey::LayoutGravityHorizontal, "90px")]);
    engine.request_layout(&mut surface, root);
    // Only 200 - 150 - 10 - 10 = 30px of room remains.
    assert_eq!(surface.style(child, Prop::Left), Some("30px"));
}

// ── Modal stack ──────────────────────────────────────────────────────

fn modal_host() -> (Engine, NodeId, TestSurface, Instant) {
    let mut engine = Engine::new();
    let container = engine.insert_root(NodeData::new(NodeKind::Modal));
    (engine, container, TestSurface::new(800.0, 600.0), Instant::now())
}

fn show(
    engine: &mut Engine,
    surface: &mut TestSurface,
    container: NodeId,
    id: &str,
    now: Instant,
) {
    engine
        .show_modal(
            surface,
            container,
            id,
            ModalContent::Markup(format!("<p>{id}</p>")),
            ModalOptions::default(),
            now,
        )
        .unwrap();
}

#[test]
fn showing_an_identity_twice_is_absorbed() {
    let (mut engine, container, mut surface, now) = modal_host();
    show(&mut engine, &mut surface, container, "settings", now);
    show(&mut engine, &mut surface, container, "settings", now);
    assert_eq!(engine.tree().children(container).len(), 1);
}

#[test]
fn dismissal_cascades_upward_from_the_target() {
    let (mut engine, container, mut surface, now) = modal_host();
    show(&mut engine, &mut surface, container, "a", now);
    show(&mut engine, &mut surface, container, "b", now);
    show(&mut engine, &mut surface, container, "c", now);
    engine.fire_due(&mut surface, now + ENTER_DELAY);

    engine.dismiss_modal(&mut surface, container, "b", now).unwrap();
    engine.fire_due(&mut surface, now + Duration::from_millis(300));

    let stacked: Vec<String> = engine
        .tree()
        .children(container)
        .iter()
        .filter_map(|&entry| engine.tree().get(entry).and_then(|d| d.modal_id.clone()))
        .collect();
    assert_eq!(stacked, vec!["a".to_owned()]);
}

#[tokio::test(start_paused = true)]
async fn backdrop_click_dismisses_a_cancelable_modal() {
    let (mut engine, container, mut surface, now) = modal_host();
    show(&mut engine, &mut surface, container, "settings", now);
    engine.run_until_idle(&mut surface).await;

    let backdrop = engine.tree().children(container)[0];
    assert_eq!(surface.style(backdrop, Prop::Opacity), Some("1"));

    engine.click(&mut surface, backdrop, Instant::now()).unwrap();
    assert_eq!(surface.style(backdrop, Prop::Opacity), Some("0"));
    engine.run_until_idle(&mut surface).await;

    assert!(engine.tree().children(container).is_empty());
    assert_eq!(surface.style(container, Prop::PointerEvents), Some("none"));
}

#[test]
fn non_cancelable_backdrops_ignore_clicks() {
    let (mut engine, container, mut surface, now) = modal_host();
    engine
        .show_modal(
            &mut surface,
            container,
            "blocking",
            ModalContent::Markup(String::new()),
            ModalOptions { cancelable: false, ..Default::default() },
            now,
        )
        .unwrap();
    engine.fire_due(&mut surface, now + ENTER_DELAY);

    let backdrop = engine.tree().children(container)[0];
    engine.click(&mut surface, backdrop, now).unwrap();
    assert_eq!(surface.style(backdrop, Prop::Opacity), Some("1"));
    assert_eq!(engine.tree().children(container).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn dismiss_all_empties_the_stack() {
    let (mut engine, container, mut surface, now) = modal_host();
    show(&mut engine, &mut surface, container, "a", now);
    show(&mut engine, &mut surface, container, "b", now);
    engine.run_until_idle(&mut surface).await;

    engine
        .dismiss_all_modals(&mut surface, container, Instant::now())
        .unwrap();
    assert_eq!(surface.style(container, Prop::PointerEvents), Some("none"));
    engine.run_until_idle(&mut surface).await;
    assert!(engine.tree().children(container).is_empty());
}
