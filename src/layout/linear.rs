//! The linear container strategy: a flex row or column with gravity.
//!
//! The main axis comes from `orientation`; gravity attributes map onto the
//! flex alignment properties. Children with a fixed or content-sized main
//! extent are pinned against shrinking so the declared size holds even when
//! the row overflows; percentage children stay flexible.

use crate::attr::config::{NodeConfig, Orientation};
use crate::attr::value::{Gravity, Value};
use crate::geometry::Axis;
use crate::layout::visibility::{self, Visibility};
use crate::layout::{apply_scroll, prepare_children};
use crate::surface::{Prop, Surface};
use crate::tree::node::NodeId;
use crate::tree::Tree;

/// Map a gravity keyword to `justify-content` for a row. The host layer has
/// always used the legacy directional keywords on the horizontal axis; they
/// do not work on columns.
fn row_justify_keyword(gravity: Option<Gravity>) -> &'static str {
    match gravity {
        Some(Gravity::End) => "right",
        Some(Gravity::Center) => "center",
        _ => "left",
    }
}

/// Map a gravity keyword to the standard flex keywords, used for
/// `align-items` on both orientations and `justify-content` on columns.
fn flex_keyword(gravity: Option<Gravity>) -> &'static str {
    match gravity {
        Some(Gravity::End) => "end",
        Some(Gravity::Center) => "center",
        _ => "start",
    }
}

/// Whether a child's declared main-axis extent exempts it from shrinking.
///
/// Percentage extents are already parent-relative and may flex; everything
/// else (fixed, auto, raw, undeclared) keeps its natural size.
fn pins_main_extent(extent: &Option<Value>) -> bool {
    !matches!(extent, Some(Value::Percent(_)))
}

fn apply_sticky(tree: &mut Tree, surface: &mut dyn Surface, child: NodeId, config: &NodeConfig) {
    if config.sticky == Some(true) {
        let needs_cache = tree
            .get(child)
            .map(|data| data.cached_position.is_none())
            .unwrap_or(false);
        if needs_cache {
            let current = surface.computed_position(child);
            if let Some(data) = tree.get_mut(child) {
                data.cached_position = Some(current);
            }
        }
        surface.set(child, Prop::Position, "sticky");
        surface.set(child, Prop::Top, "0");
        surface.set(child, Prop::Left, "0");
        surface.set(child, Prop::ZIndex, "1");
    } else if let Some(previous) = tree.get_mut(child).and_then(|data| data.cached_position.take())
    {
        if previous.is_empty() || previous == "sticky" {
            surface.clear(child, Prop::Position);
        } else {
            surface.set(child, Prop::Position, &previous);
        }
        surface.clear(child, Prop::Top);
        surface.clear(child, Prop::Left);
        surface.clear(child, Prop::ZIndex);
    }
}

/// Run the linear strategy for `container`.
pub fn layout(tree: &mut Tree, surface: &mut dyn Surface, container: NodeId) {
    let config = match tree.get(container) {
        Some(data) => data.config.clone(),
        None => return,
    };

    // The container gates itself: a hidden row stashes its own flex display
    // so a later show brings the strategy back intact.
    if visibility::evaluate(&config, surface.viewport()) == Visibility::Hidden {
        let needs_cache = tree
            .get(container)
            .map(|data| data.cached_display.is_none())
            .unwrap_or(false);
        if needs_cache {
            if let Some(data) = tree.get_mut(container) {
                data.cached_display = Some("flex".to_owned());
            }
        }
        surface.set(container, Prop::Display, "none");
        return;
    }
    if let Some(data) = tree.get_mut(container) {
        data.cached_display = None;
    }

    surface.set(container, Prop::Display, "flex");
    surface.set(
        container,
        Prop::FlexWrap,
        if config.auto_wrap == Some(true) { "wrap" } else { "nowrap" },
    );

    let orientation = config.orientation.unwrap_or(Orientation::Vertical);
    let gravity_h = config.effective_gravity_h();
    let gravity_v = config.effective_gravity_v();
    match orientation {
        Orientation::Horizontal => {
            surface.set(container, Prop::FlexDirection, "row");
            surface.set(container, Prop::JustifyContent, row_justify_keyword(gravity_h));
            surface.set(container, Prop::AlignItems, flex_keyword(gravity_v));
        }
        Orientation::Vertical => {
            surface.set(container, Prop::FlexDirection, "column");
            surface.set(container, Prop::JustifyContent, flex_keyword(gravity_v));
            surface.set(container, Prop::AlignItems, flex_keyword(gravity_h));
        }
    }
    apply_scroll(surface, container, &config);

    let main_axis = orientation.axis();
    for child in prepare_children(tree, surface, container) {
        let child_config = match tree.get(child) {
            Some(data) => data.config.clone(),
            None => continue,
        };

        apply_sticky(tree, surface, child, &child_config);

        let main_extent = match main_axis {
            Axis::Horizontal => &child_config.width,
            Axis::Vertical => &child_config.height,
        };
        if pins_main_extent(main_extent) {
            surface.set(child, Prop::FlexShrink, "0");
        } else {
            surface.clear(child, Prop::FlexShrink);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
