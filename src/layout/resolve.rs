//! Geometry resolution: from the typed attribute record to concrete box
//! properties.
//!
//! Resolution is where shorthand precedence collapses into per-side values
//! and where percentage widths pick up margin-box semantics: a percentage
//! extent is declared relative to the parent's full extent, so the resolved
//! width subtracts both margins on that axis via a `calc()` expression.

use std::fmt;

use crate::attr::config::NodeConfig;
use crate::attr::value::Value;
use crate::surface::{Prop, Surface};
use crate::tree::node::NodeId;

/// Shadow preset applied to elevated nodes.
pub const ELEVATION_SHADOW: &str =
    "0 10px 16px 0 #00000033,0 6px 20px 0 #00000033";

// ---------------------------------------------------------------------------
// Resolved value groups
// ---------------------------------------------------------------------------

/// Per-side values after shorthand precedence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sides {
    pub top: Option<Value>,
    pub right: Option<Value>,
    pub bottom: Option<Value>,
    pub left: Option<Value>,
}

/// Per-corner radii after shorthand precedence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corners {
    pub top_left: Option<Value>,
    pub top_right: Option<Value>,
    pub bottom_left: Option<Value>,
    pub bottom_right: Option<Value>,
}

/// A resolved extent along one axis.
#[derive(Debug, Clone, PartialEq)]
pub enum Extent {
    /// Direct value, written to the surface as-is.
    Plain(Value),
    /// Percentage of the parent minus this node's own margins on the axis,
    /// emitted as a `calc()` expression.
    Inset {
        pct: f32,
        leading: Value,
        trailing: Value,
    },
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extent::Plain(value) => write!(f, "{value}"),
            Extent::Inset { pct, leading, trailing } => {
                write!(f, "calc({} - {leading} - {trailing})", Value::Percent(*pct))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ResolvedBox
// ---------------------------------------------------------------------------

/// The full set of box properties resolution produces for one node.
#[derive(Debug, Clone, Default)]
pub struct ResolvedBox {
    pub width: Option<Extent>,
    pub height: Option<Extent>,
    pub min_width: Option<Value>,
    pub min_height: Option<Value>,
    pub max_width: Option<Value>,
    pub max_height: Option<Value>,
    pub padding: Sides,
    pub margin: Sides,
    pub corners: Corners,
    pub background: Option<String>,
    pub elevated: bool,
}

/// Fold a declared extent with the margins on its axis.
///
/// Percentages get the margin-box treatment only when at least one margin on
/// the axis was declared; with no margins in play the plain percentage is
/// equivalent and keeps the emitted style readable.
fn resolve_extent(
    declared: &Option<Value>,
    leading: &Option<Value>,
    trailing: &Option<Value>,
) -> Option<Extent> {
    let declared = declared.as_ref()?;
    if let Value::Percent(pct) = declared {
        if leading.is_some() || trailing.is_some() {
            return Some(Extent::Inset {
                pct: *pct,
                leading: leading.clone().unwrap_or(Value::Px(0.0)),
                trailing: trailing.clone().unwrap_or(Value::Px(0.0)),
            });
        }
    }
    Some(Extent::Plain(declared.clone()))
}

/// Resolve a node's attribute record into concrete box properties.
pub fn resolve(config: &NodeConfig) -> ResolvedBox {
    let margin = Sides {
        top: config.margin.resolved_top(),
        right: config.margin.resolved_right(),
        bottom: config.margin.resolved_bottom(),
        left: config.margin.resolved_left(),
    };

    ResolvedBox {
        width: resolve_extent(&config.width, &margin.left, &margin.right),
        height: resolve_extent(&config.height, &margin.top, &margin.bottom),
        min_width: config.min_width.clone(),
        min_height: config.min_height.clone(),
        max_width: config.max_width.clone(),
        max_height: config.max_height.clone(),
        padding: Sides {
            top: config.padding.resolved_top(),
            right: config.padding.resolved_right(),
            bottom: config.padding.resolved_bottom(),
            left: config.padding.resolved_left(),
        },
        margin,
        corners: Corners {
            top_left: config.corner.resolved_top_left(),
            top_right: config.corner.resolved_top_right(),
            bottom_left: config.corner.resolved_bottom_left(),
            bottom_right: config.corner.resolved_bottom_right(),
        },
        background: config.background.clone(),
        elevated: config.elevation == Some(true),
    }
}

fn set_or_clear(surface: &mut dyn Surface, node: NodeId, prop: Prop, value: &Option<Value>) {
    match value {
        Some(v) => surface.set(node, prop, &v.to_string()),
        None => surface.clear(node, prop),
    }
}

impl ResolvedBox {
    /// Write the resolved box onto the surface. Unset properties are
    /// cleared, so resolution is idempotent against stale style.
    pub fn apply_to(&self, surface: &mut dyn Surface, node: NodeId) {
        surface.set(node, Prop::BoxSizing, "border-box");

        match &self.width {
            Some(extent) => surface.set(node, Prop::Width, &extent.to_string()),
            None => surface.clear(node, Prop::Width),
        }
        match &self.height {
            Some(extent) => surface.set(node, Prop::Height, &extent.to_string()),
            None => surface.clear(node, Prop::Height),
        }

        set_or_clear(surface, node, Prop::MinWidth, &self.min_width);
        set_or_clear(surface, node, Prop::MinHeight, &self.min_height);
        set_or_clear(surface, node, Prop::MaxWidth, &self.max_width);
        set_or_clear(surface, node, Prop::MaxHeight, &self.max_height);

        set_or_clear(surface, node, Prop::PaddingTop, &self.padding.top);
        set_or_clear(surface, node, Prop::PaddingRight, &self.padding.right);
        set_or_clear(surface, node, Prop::PaddingBottom, &self.padding.bottom);
        set_or_clear(surface, node, Prop::PaddingLeft, &self.padding.left);

        set_or_clear(surface, node, Prop::MarginTop, &self.margin.top);
        set_or_clear(surface, node, Prop::MarginRight, &self.margin.right);
        set_or_clear(surface, node, Prop::MarginBottom, &self.margin.bottom);
        set_or_clear(surface, node, Prop::MarginLeft, &self.margin.left);

        set_or_clear(surface, node, Prop::BorderTopLeftRadius, &self.corners.top_left);
        set_or_clear(surface, node, Prop::BorderTopRightRadius, &self.corners.top_right);
        set_or_clear(surface, node, Prop::BorderBottomLeftRadius, &self.corners.bottom_left);
        set_or_clear(surface, node, Prop::BorderBottomRightRadius, &self.corners.bottom_right);

        match &self.background {
            Some(color) => surface.set(node, Prop::BackgroundColor, color),
            None => surface.clear(node, Prop::BackgroundColor),
        }

        if self.elevated {
            surface.set(node, Prop::BoxShadow, ELEVATION_SHADOW);
        } else {
            surface.clear(node, Prop::BoxShadow);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
