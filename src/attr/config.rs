//! The typed per-node configuration record and its attribute reducer.
//!
//! Raw attribute writes funnel through [`NodeConfig::apply`], which parses
//! the string into the right typed field. The record is the single source of
//! truth the geometry resolver and the container strategies read from; the
//! rendering surface never sees raw attributes.

use crate::attr::key::AttrKey;
use crate::attr::value::{Gravity, Value};

// ---------------------------------------------------------------------------
// Keyword enums
// ---------------------------------------------------------------------------

/// How a node participates in focus and text selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    /// Not selectable, not interactive.
    None,
    /// Text is selectable.
    Select,
    /// Interactive, pointer cursor.
    Button,
}

impl FocusMode {
    pub fn parse(input: &str) -> Option<FocusMode> {
        match input.trim() {
            "none" => Some(FocusMode::None),
            "select" => Some(FocusMode::Select),
            "button" => Some(FocusMode::Button),
            _ => None,
        }
    }
}

/// Main axis of a linear container. Anything other than `horizontal` means
/// vertical, matching how the markup layer has always treated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn parse(input: &str) -> Orientation {
        if input.trim() == "horizontal" {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    pub fn axis(self) -> crate::geometry::Axis {
        match self {
            Orientation::Horizontal => crate::geometry::Axis::Horizontal,
            Orientation::Vertical => crate::geometry::Axis::Vertical,
        }
    }
}

/// Which axes of a container scroll. The unqualified attribute value means
/// vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    Vertical,
    Horizontal,
    Both,
    None,
}

impl ScrollMode {
    pub fn parse(input: &str) -> ScrollMode {
        match input.trim() {
            "horizontal" => ScrollMode::Horizontal,
            "both" => ScrollMode::Both,
            "none" => ScrollMode::None,
            _ => ScrollMode::Vertical,
        }
    }
}

/// Backdrop treatment behind a modal stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackdropMode {
    /// Frosted-glass blur over the content beneath.
    Blur,
    /// Translucent dark scrim.
    Dim,
    /// Fully transparent backdrop.
    None,
}

impl BackdropMode {
    pub fn parse(input: &str) -> Option<BackdropMode> {
        match input.trim() {
            "blur" => Some(BackdropMode::Blur),
            "dim" => Some(BackdropMode::Dim),
            "none" => Some(BackdropMode::None),
            _ => None,
        }
    }
}

/// Flag attributes: any value other than `"false"` turns the flag on.
fn parse_flag(input: &str) -> bool {
    input.trim() != "false"
}

/// Presence attributes: any non-empty value turns them on, even `"false"`.
/// Writing an empty value is the only in-place off switch.
fn parse_presence(input: &str) -> bool {
    !input.trim().is_empty()
}

// ---------------------------------------------------------------------------
// Shorthand groups
// ---------------------------------------------------------------------------

/// Raw spacing attributes at all three precedence tiers. Per-side beats the
/// axis shorthand, which beats the all-sides shorthand; precedence is applied
/// at resolve time, not here, so late writes at a weaker tier never clobber
/// a stronger one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpacingAttrs {
    pub all: Option<Value>,
    pub horizontal: Option<Value>,
    pub vertical: Option<Value>,
    pub left: Option<Value>,
    pub right: Option<Value>,
    pub top: Option<Value>,
    pub bottom: Option<Value>,
}

impl SpacingAttrs {
    /// Resolve one side through the precedence tiers.
    pub fn side(
        &self,
        per_side: &Option<Value>,
        per_axis: &Option<Value>,
    ) -> Option<Value> {
        per_side
            .clone()
            .or_else(|| per_axis.clone())
            .or_else(|| self.all.clone())
    }

    pub fn resolved_left(&self) -> Option<Value> {
        self.side(&self.left, &self.horizontal)
    }
    pub fn resolved_right(&self) -> Option<Value> {
        self.side(&self.right, &self.horizontal)
    }
    pub fn resolved_top(&self) -> Option<Value> {
        self.side(&self.top, &self.vertical)
    }
    pub fn resolved_bottom(&self) -> Option<Value> {
        self.side(&self.bottom, &self.vertical)
    }
}

/// Raw corner-radius attributes. Same tiering as [`SpacingAttrs`], with
/// per-corner on top, then the side pairs, then the all-corners shorthand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CornerAttrs {
    pub all: Option<Value>,
    pub top: Option<Value>,
    pub bottom: Option<Value>,
    pub left: Option<Value>,
    pub right: Option<Value>,
    pub top_left: Option<Value>,
    pub top_right: Option<Value>,
    pub bottom_left: Option<Value>,
    pub bottom_right: Option<Value>,
}

impl CornerAttrs {
    fn corner(
        &self,
        per_corner: &Option<Value>,
        pair_a: &Option<Value>,
        pair_b: &Option<Value>,
    ) -> Option<Value> {
        per_corner
            .clone()
            .or_else(|| pair_a.clone())
            .or_else(|| pair_b.clone())
            .or_else(|| self.all.clone())
    }

    pub fn resolved_top_left(&self) -> Option<Value> {
        self.corner(&self.top_left, &self.top, &self.left)
    }
    pub fn resolved_top_right(&self) -> Option<Value> {
        self.corner(&self.top_right, &self.top, &self.right)
    }
    pub fn resolved_bottom_left(&self) -> Option<Value> {
        self.corner(&self.bottom_left, &self.bottom, &self.left)
    }
    pub fn resolved_bottom_right(&self) -> Option<Value> {
        self.corner(&self.bottom_right, &self.bottom, &self.right)
    }
}

// ---------------------------------------------------------------------------
// NodeConfig
// ---------------------------------------------------------------------------

/// The complete typed configuration of one node.
///
/// Every field mirrors one attribute (or shorthand group). `None` means the
/// attribute was never written or was removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeConfig {
    // Sizing
    pub width: Option<Value>,
    pub height: Option<Value>,
    pub min_width: Option<Value>,
    pub min_height: Option<Value>,
    pub max_width: Option<Value>,
    pub max_height: Option<Value>,

    // Viewport thresholds for the visibility gate
    pub min_window_width: Option<Value>,
    pub min_window_height: Option<Value>,

    // Box spacing
    pub padding: SpacingAttrs,
    pub margin: SpacingAttrs,
    pub corner: CornerAttrs,

    // Appearance
    pub background: Option<String>,
    /// On for any declared non-empty value, regardless of what it says.
    pub elevation: Option<bool>,
    pub visible: Option<bool>,
    pub focus_mode: Option<FocusMode>,

    // Placement inside the parent (free containers)
    pub layout_gravity: Option<Gravity>,
    pub layout_gravity_h: Option<Gravity>,
    pub layout_gravity_v: Option<Gravity>,

    // Container behavior (linear containers)
    pub orientation: Option<Orientation>,
    pub gravity: Option<Gravity>,
    pub gravity_h: Option<Gravity>,
    pub gravity_v: Option<Gravity>,
    pub scroll: Option<ScrollMode>,
    pub sticky: Option<bool>,
    pub auto_wrap: Option<bool>,

    // Modal container configuration
    pub modal_corner: Option<Value>,
    pub modal_background: Option<String>,
    pub modal_elevation: Option<bool>,
    pub backdrop_mode: Option<BackdropMode>,
    pub transition_duration: Option<String>,

    // Content
    pub src: Option<String>,
}

impl NodeConfig {
    /// Fold one attribute write into the record. `None` removes the
    /// attribute; `Some` parses it into the typed field. Returns the updated
    /// record, leaving `self` untouched.
    pub fn apply(&self, key: AttrKey, value: Option<&str>) -> NodeConfig {
        let mut next = self.clone();
        let val = || value.map(Value::parse);
        let text = || value.map(str::to_owned);
        let grav = || value.and_then(Gravity::parse);
        let flag = || value.map(parse_flag);

        match key {
            AttrKey::Width => next.width = val(),
            AttrKey::Height => next.height = val(),
            AttrKey::MinWidth => next.min_width = val(),
            AttrKey::MinHeight => next.min_height = val(),
            AttrKey::MaxWidth => next.max_width = val(),
            AttrKey::MaxHeight => next.max_height = val(),

            AttrKey::MinWindowWidth => next.min_window_width = val(),
            AttrKey::MinWindowHeight => next.min_window_height = val(),

            AttrKey::PaddingLeft => next.padding.left = val(),
            AttrKey::PaddingRight => next.padding.right = val(),
            AttrKey::PaddingTop => next.padding.top = val(),
            AttrKey::PaddingBottom => next.padding.bottom = val(),
            AttrKey::PaddingHorizontal => next.padding.horizontal = val(),
            AttrKey::PaddingVertical => next.padding.vertical = val(),
            AttrKey::Padding => next.padding.all = val(),

            AttrKey::MarginLeft => next.margin.left = val(),
            AttrKey::MarginRight => next.margin.right = val(),
            AttrKey::MarginTop => next.margin.top = val(),
            AttrKey::MarginBottom => next.margin.bottom = val(),
            AttrKey::MarginHorizontal => next.margin.horizontal = val(),
            AttrKey::MarginVertical => next.margin.vertical = val(),
            AttrKey::Margin => next.margin.all = val(),

            AttrKey::CornerTopLeft => next.corner.top_left = val(),
            AttrKey::CornerTopRight => next.corner.top_right = val(),
            AttrKey::CornerBottomLeft => next.corner.bottom_left = val(),
            AttrKey::CornerBottomRight => next.corner.bottom_right = val(),
            AttrKey::CornerTop => next.corner.top = val(),
            AttrKey::CornerBottom => next.corner.bottom = val(),
            AttrKey::CornerLeft => next.corner.left = val(),
            AttrKey::CornerRight => next.corner.right = val(),
            AttrKey::Corner => next.corner.all = val(),

            AttrKey::Background => next.background = text(),
            AttrKey::Elevation => next.elevation = value.map(parse_presence),
            AttrKey::Visible => next.visible = flag(),
            AttrKey::FocusMode => next.focus_mode = value.and_then(FocusMode::parse),

            AttrKey::LayoutGravityHorizontal => next.layout_gravity_h = grav(),
            AttrKey::LayoutGravityVertical => next.layout_gravity_v = grav(),
            AttrKey::LayoutGravity => next.layout_gravity = grav(),

            AttrKey::Orientation => next.orientation = value.map(Orientation::parse),
            AttrKey::GravityHorizontal => next.gravity_h = grav(),
            AttrKey::GravityVertical => next.gravity_v = grav(),
            AttrKey::Gravity => next.gravity = grav(),
            AttrKey::Scroll => next.scroll = value.map(ScrollMode::parse),
            AttrKey::Sticky => next.sticky = flag(),
            AttrKey::AutoWrap => next.auto_wrap = flag(),

            AttrKey::ModalCorner => next.modal_corner = val(),
            AttrKey::ModalBackground => next.modal_background = text(),
            AttrKey::ModalElevation => next.modal_elevation = value.map(parse_presence),
            AttrKey::BackdropMode => {
                next.backdrop_mode = value.and_then(BackdropMode::parse)
            }
            AttrKey::TransitionDuration => next.transition_duration = text(),

            AttrKey::Src => next.src = text(),
        }
        next
    }

    /// Whether the node is declared hidden outright (`visible="false"`).
    pub fn declared_hidden(&self) -> bool {
        self.visible == Some(false)
    }

    /// Horizontal content gravity with the unqualified shorthand as fallback.
    pub fn effective_gravity_h(&self) -> Option<Gravity> {
        self.gravity_h.or(self.gravity)
    }

    /// Vertical content gravity with the unqualified shorthand as fallback.
    pub fn effective_gravity_v(&self) -> Option<Gravity> {
        self.gravity_v.or(self.gravity)
    }

    /// Horizontal placement gravity with the unqualified shorthand as
    /// fallback.
    pub fn effective_layout_gravity_h(&self) -> Option<Gravity> {
        self.layout_gravity_h.or(self.layout_gravity)
    }

    /// Vertical placement gravity with the unqualified shorthand as fallback.
    pub fn effective_layout_gravity_v(&self) -> Option<Gravity> {
        self.layout_gravity_v.or(self.layout_gravity)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn applied(pairs: &[(AttrKey, &str)]) -> NodeConfig {
        pairs
            .iter()
            .fold(NodeConfig::default(), |cfg, (key, value)| {
                cfg.apply(*key, Some(value))
            })
    }

    // ── Reducer basics ───────────────────────────────────────────────

    #[test]
    fn apply_parses_sizing() {
        let cfg = applied(&[(AttrKey::Width, "50%"), (AttrKey::Height, "auto")]);
        assert_eq!(cfg.width, Some(Value::Percent(50.0)));
        assert_eq!(cfg.height, Some(Value::Auto));
    }

    #[test]
    fn apply_none_removes() {
        let cfg = applied(&[(AttrKey::Width, "50%")]);
        let cfg = cfg.apply(AttrKey::Width, None);
        assert_eq!(cfg.width, None);
    }

    #[test]
    fn apply_is_functional() {
        let base = NodeConfig::default();
        let _next = base.apply(AttrKey::Width, Some("10px"));
        assert_eq!(base.width, None);
    }

    #[test]
    fn flags_default_to_true_unless_false() {
        let cfg = applied(&[(AttrKey::Visible, "false")]);
        assert_eq!(cfg.visible, Some(false));
        assert!(cfg.declared_hidden());

        let cfg = applied(&[(AttrKey::Visible, "anything")]);
        assert_eq!(cfg.visible, Some(true));
        assert!(!cfg.declared_hidden());

        let cfg = applied(&[(AttrKey::Sticky, "true"), (AttrKey::AutoWrap, "1")]);
        assert_eq!(cfg.sticky, Some(true));
        assert_eq!(cfg.auto_wrap, Some(true));
    }

    #[test]
    fn elevation_follows_presence_not_the_value() {
        let cfg = applied(&[(AttrKey::Elevation, "false")]);
        assert_eq!(cfg.elevation, Some(true));

        let cfg = applied(&[(AttrKey::Elevation, "")]);
        assert_eq!(cfg.elevation, Some(false));

        let cfg = applied(&[(AttrKey::ModalElevation, "false")]);
        assert_eq!(cfg.modal_elevation, Some(true));
    }

    // ── Spacing precedence ───────────────────────────────────────────

    #[test]
    fn per_side_beats_axis_beats_all() {
        let cfg = applied(&[
            (AttrKey::Padding, "4px"),
            (AttrKey::PaddingHorizontal, "8px"),
            (AttrKey::PaddingLeft, "16px"),
        ]);
        assert_eq!(cfg.padding.resolved_left(), Some(Value::Px(16.0)));
        assert_eq!(cfg.padding.resolved_right(), Some(Value::Px(8.0)));
        assert_eq!(cfg.padding.resolved_top(), Some(Value::Px(4.0)));
        assert_eq!(cfg.padding.resolved_bottom(), Some(Value::Px(4.0)));
    }

    #[test]
    fn write_order_does_not_matter_for_precedence() {
        let a = applied(&[(AttrKey::MarginLeft, "2px"), (AttrKey::Margin, "9px")]);
        let b = applied(&[(AttrKey::Margin, "9px"), (AttrKey::MarginLeft, "2px")]);
        assert_eq!(a.margin.resolved_left(), b.margin.resolved_left());
        assert_eq!(a.margin.resolved_left(), Some(Value::Px(2.0)));
    }

    // ── Corner precedence ────────────────────────────────────────────

    #[test]
    fn corner_tiers() {
        let cfg = applied(&[
            (AttrKey::Corner, "2px"),
            (AttrKey::CornerTop, "4px"),
            (AttrKey::CornerTopLeft, "8px"),
        ]);
        assert_eq!(cfg.corner.resolved_top_left(), Some(Value::Px(8.0)));
        assert_eq!(cfg.corner.resolved_top_right(), Some(Value::Px(4.0)));
        assert_eq!(cfg.corner.resolved_bottom_left(), Some(Value::Px(2.0)));
        assert_eq!(cfg.corner.resolved_bottom_right(), Some(Value::Px(2.0)));
    }

    #[test]
    fn corner_side_pairs_cover_both_corners() {
        let cfg = applied(&[(AttrKey::CornerLeft, "6px")]);
        assert_eq!(cfg.corner.resolved_top_left(), Some(Value::Px(6.0)));
        assert_eq!(cfg.corner.resolved_bottom_left(), Some(Value::Px(6.0)));
        assert_eq!(cfg.corner.resolved_top_right(), None);
    }

    // ── Keyword parsing ──────────────────────────────────────────────

    #[test]
    fn orientation_defaults_to_vertical() {
        assert_eq!(Orientation::parse("horizontal"), Orientation::Horizontal);
        assert_eq!(Orientation::parse("vertical"), Orientation::Vertical);
        assert_eq!(Orientation::parse("sideways"), Orientation::Vertical);
    }

    #[test]
    fn scroll_mode_defaults_to_vertical() {
        assert_eq!(ScrollMode::parse("horizontal"), ScrollMode::Horizontal);
        assert_eq!(ScrollMode::parse("both"), ScrollMode::Both);
        assert_eq!(ScrollMode::parse("none"), ScrollMode::None);
        assert_eq!(ScrollMode::parse("true"), ScrollMode::Vertical);
    }

    #[test]
    fn focus_and_backdrop_keywords() {
        assert_eq!(FocusMode::parse("button"), Some(FocusMode::Button));
        assert_eq!(FocusMode::parse("bogus"), None);
        assert_eq!(BackdropMode::parse("blur"), Some(BackdropMode::Blur));
        assert_eq!(BackdropMode::parse("dim"), Some(BackdropMode::Dim));
        assert_eq!(BackdropMode::parse("opaque"), None);
    }

    // ── Gravity fallbacks ────────────────────────────────────────────

    #[test]
    fn gravity_shorthand_fallback() {
        let cfg = applied(&[(AttrKey::Gravity, "center"), (AttrKey::GravityVertical, "end")]);
        assert_eq!(cfg.effective_gravity_h(), Some(Gravity::Center));
        assert_eq!(cfg.effective_gravity_v(), Some(Gravity::End));
    }

    #[test]
    fn layout_gravity_shorthand_fallback() {
        let cfg = applied(&[(AttrKey::LayoutGravity, "end")]);
        assert_eq!(cfg.effective_layout_gravity_h(), Some(Gravity::End));
        assert_eq!(cfg.effective_layout_gravity_v(), Some(Gravity::End));
    }
}
