//! The free container strategy: per-axis absolute anchoring.
//!
//! Children opt into a keyword (`start`, `center`, `end`) or a pixel anchor
//! per axis through the layout-gravity attributes. Pixel anchors are
//! direction-aware: an anchor in the leading half of the parent pins the
//! leading edge, one in the trailing half pins the trailing edge, so a child
//! anchored near a border stays attached to that border as the parent
//! resizes. Offsets clamp so the child never escapes the parent.

use crate::attr::value::Gravity;
use crate::geometry::Axis;
use crate::layout::{autosize_to_children, prepare_children};
use crate::surface::{Prop, Surface};
use crate::tree::node::NodeId;
use crate::tree::Tree;

/// Surface properties for one axis of absolute placement.
struct AxisProps {
    leading: Prop,
    trailing: Prop,
}

const HORIZONTAL: AxisProps = AxisProps { leading: Prop::Left, trailing: Prop::Right };

const VERTICAL: AxisProps = AxisProps { leading: Prop::Top, trailing: Prop::Bottom };

fn place_axis(
    surface: &mut dyn Surface,
    child: NodeId,
    props: &AxisProps,
    gravity: Gravity,
    parent_extent: f32,
    child_extent: f32,
    margin_leading: f32,
    margin_trailing: f32,
) {
    match gravity {
        Gravity::Start => {
            surface.set(child, props.leading, "0");
            surface.clear(child, props.trailing);
        }
        Gravity::End => {
            surface.set(child, props.trailing, "0");
            surface.clear(child, props.leading);
        }
        Gravity::Center => {
            let offset = parent_extent / 2.0 - child_extent / 2.0 - margin_leading;
            surface.set(child, props.leading, &format!("{}px", fmt_px(offset)));
            surface.clear(child, props.trailing);
        }
        Gravity::Anchor(anchor) => {
            // Largest offset that keeps the child and its margins inside.
            let limit =
                (parent_extent - child_extent - margin_leading - margin_trailing).max(0.0);
            if anchor < parent_extent / 2.0 {
                let offset = anchor.clamp(0.0, limit);
                surface.set(child, props.leading, &format!("{}px", fmt_px(offset)));
                surface.clear(child, props.trailing);
            } else {
                let offset = (parent_extent - anchor).clamp(0.0, limit);
                surface.set(child, props.trailing, &format!("{}px", fmt_px(offset)));
                surface.clear(child, props.leading);
            }
        }
    }
}

fn fmt_px(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Run the free strategy for `container`.
pub fn layout(tree: &mut Tree, surface: &mut dyn Surface, container: NodeId) {
    surface.set(container, Prop::OverflowX, "hidden");
    surface.set(container, Prop::OverflowY, "hidden");

    let container_config = match tree.get(container) {
        Some(data) => data.config.clone(),
        None => return,
    };
    let parent = surface.measured(container);

    for child in prepare_children(tree, surface, container) {
        let config = match tree.get(child) {
            Some(data) => data.config.clone(),
            None => continue,
        };
        surface.set(child, Prop::Position, "absolute");

        let measured = surface.measured(child);
        let margin = surface.computed_margin(child);

        // The child may not outgrow the parent minus its own margins; a
        // declared minimum caps lower still.
        let avail_w = (parent.width - margin.sum(Axis::Horizontal)).max(0.0);
        let avail_h = (parent.height - margin.sum(Axis::Vertical)).max(0.0);
        match &config.min_width {
            Some(min) => surface.set(
                child,
                Prop::MaxWidth,
                &format!("min({}px, {min})", fmt_px(avail_w)),
            ),
            None => surface.set(child, Prop::MaxWidth, &format!("{}px", fmt_px(avail_w))),
        }
        match &config.min_height {
            Some(min) => surface.set(
                child,
                Prop::MaxHeight,
                &format!("min({}px, {min})", fmt_px(avail_h)),
            ),
            None => surface.set(child, Prop::MaxHeight, &format!("{}px", fmt_px(avail_h))),
        }

        let gravity_h = config.effective_layout_gravity_h().unwrap_or(Gravity::Start);
        let gravity_v = config.effective_layout_gravity_v().unwrap_or(Gravity::Start);
        place_axis(
            surface,
            child,
            &HORIZONTAL,
            gravity_h,
            parent.width,
            measured.width,
            margin.left,
            margin.right,
        );
        place_axis(
            surface,
            child,
            &VERTICAL,
            gravity_v,
            parent.height,
            measured.height,
            margin.top,
            margin.bottom,
        );
    }

    autosize_to_children(tree, surface, container, &container_config);
}

// ===========================================================================
// Tests
// ===========================================================================
