//! The host rendering-surface abstraction.
//!
//! The engine never touches a real DOM, terminal, or scene graph directly.
//! Everything it needs from the host is behind [`Surface`]: measured
//! geometry and computed style reads on one side, style property patches on
//! the other. Tests drive the engine against the in-memory surface in
//! [`crate::testing`]; real hosts implement this trait over their own
//! rendering layer.

use crate::geometry::{Edges, Size};
use crate::tree::node::NodeId;

// ---------------------------------------------------------------------------
// Prop
// ---------------------------------------------------------------------------

/// A style property the engine writes. The closed set keeps every surface
/// write auditable; the string values follow stylesheet syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prop {
    Width,
    Height,
    MinWidth,
    MinHeight,
    MaxWidth,
    MaxHeight,

    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,

    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,

    BorderTopLeftRadius,
    BorderTopRightRadius,
    BorderBottomLeftRadius,
    BorderBottomRightRadius,

    BoxSizing,
    BoxShadow,
    BackgroundColor,
    BackdropFilter,

    Display,
    Position,
    Top,
    Left,
    Right,
    Bottom,
    ZIndex,

    OverflowX,
    OverflowY,

    FlexDirection,
    FlexWrap,
    FlexShrink,
    JustifyContent,
    AlignItems,

    Opacity,
    PointerEvents,
    Transition,
    UserSelect,
    Cursor,
}

impl Prop {
    /// The stylesheet name of this property.
    pub fn name(self) -> &'static str {
        use Prop::*;
        match self {
            Width => "width",
            Height => "height",
            MinWidth => "min-width",
            MinHeight => "min-height",
            MaxWidth => "max-width",
            MaxHeight => "max-height",

            PaddingTop => "padding-top",
            PaddingRight => "padding-right",
            PaddingBottom => "padding-bottom",
            PaddingLeft => "padding-left",

            MarginTop => "margin-top",
            MarginRight => "margin-right",
            MarginBottom => "margin-bottom",
            MarginLeft => "margin-left",

            BorderTopLeftRadius => "border-top-left-radius",
            BorderTopRightRadius => "border-top-right-radius",
            BorderBottomLeftRadius => "border-bottom-left-radius",
            BorderBottomRightRadius => "border-bottom-right-radius",

            BoxSizing => "box-sizing",
            BoxShadow => "box-shadow",
            BackgroundColor => "background-color",
            BackdropFilter => "backdrop-filter",

            Display => "display",
            Position => "position",
            Top => "top",
            Left => "left",
            Right => "right",
            Bottom => "bottom",
            ZIndex => "z-index",

            OverflowX => "overflow-x",
            OverflowY => "overflow-y",

            FlexDirection => "flex-direction",
            FlexWrap => "flex-wrap",
            FlexShrink => "flex-shrink",
            JustifyContent => "justify-content",
            AlignItems => "align-items",

            Opacity => "opacity",
            PointerEvents => "pointer-events",
            Transition => "transition",
            UserSelect => "user-select",
            Cursor => "cursor",
        }
    }
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// Host rendering surface the engine computes against.
///
/// Reads reflect the host's current rendered state (post-layout), writes
/// patch per-node inline style. Implementations are expected to tolerate
/// writes to nodes they have not rendered yet.
pub trait Surface {
    /// Current viewport extent in pixels.
    fn viewport(&self) -> Size;

    /// The rendered extent of a node, including padding, excluding margins.
    fn measured(&self, node: NodeId) -> Size;

    /// The computed `display` of a node as the host resolved it.
    fn computed_display(&self, node: NodeId) -> String;

    /// The computed `position` of a node as the host resolved it.
    fn computed_position(&self, node: NodeId) -> String;

    /// The computed margins of a node in pixels.
    fn computed_margin(&self, node: NodeId) -> Edges;

    /// Set one style property on a node.
    fn set(&mut self, node: NodeId, prop: Prop, value: &str);

    /// Remove one style property from a node.
    fn clear(&mut self, node: NodeId, prop: Prop);

    /// Replace a node's rendered content with host markup.
    fn set_markup(&mut self, node: NodeId, markup: &str);

    /// Point a content node at an external source, or detach it.
    fn load_content(&mut self, node: NodeId, src: Option<&str>);
}

// ===========================================================================
// Tests
// ===========================================================================
