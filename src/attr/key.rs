//! The closed set of attribute names the engine reacts to.
//!
//! Markup-facing names are short and hyphenated (`w`, `l-p`, `h-grav`).
//! [`AttrKey::from_name`] is the single entry point from the hosting layer;
//! unknown names return `None` and are ignored upstream.

/// An attribute key the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrKey {
    // ── Sizing ──
    Width,
    Height,
    MaxWidth,
    MaxHeight,
    MinWidth,
    MinHeight,

    // ── Viewport thresholds ──
    MinWindowWidth,
    MinWindowHeight,

    // ── Padding ──
    PaddingLeft,
    PaddingRight,
    PaddingTop,
    PaddingBottom,
    PaddingHorizontal,
    PaddingVertical,
    Padding,

    // ── Margins ──
    MarginLeft,
    MarginRight,
    MarginTop,
    MarginBottom,
    MarginHorizontal,
    MarginVertical,
    Margin,

    // ── Corner radii ──
    CornerTopLeft,
    CornerTopRight,
    CornerBottomLeft,
    CornerBottomRight,
    CornerTop,
    CornerBottom,
    CornerLeft,
    CornerRight,
    Corner,

    // ── Appearance ──
    Background,
    Elevation,
    Visible,
    FocusMode,

    // ── Placement inside the parent ──
    LayoutGravityHorizontal,
    LayoutGravityVertical,
    LayoutGravity,

    // ── Container behavior ──
    Orientation,
    GravityHorizontal,
    GravityVertical,
    Gravity,
    Scroll,
    Sticky,
    AutoWrap,

    // ── Modal container configuration ──
    ModalCorner,
    ModalBackground,
    ModalElevation,
    BackdropMode,
    TransitionDuration,

    // ── Content ──
    Src,
}

impl AttrKey {
    /// Resolve a markup attribute name. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<AttrKey> {
        use AttrKey::*;
        let key = match name {
            "w" => Width,
            "h" => Height,
            "max-w" => MaxWidth,
            "max-h" => MaxHeight,
            "min-w" => MinWidth,
            "min-h" => MinHeight,

            "min-win-w" => MinWindowWidth,
            "min-win-h" => MinWindowHeight,

            "l-p" => PaddingLeft,
            "r-p" => PaddingRight,
            "t-p" => PaddingTop,
            // Historical markup name for bottom padding.
            "b-t" => PaddingBottom,
            "h-p" => PaddingHorizontal,
            "v-p" => PaddingVertical,
            "p" => Padding,

            "l-m" => MarginLeft,
            "r-m" => MarginRight,
            "t-m" => MarginTop,
            "b-m" => MarginBottom,
            "h-m" => MarginHorizontal,
            "v-m" => MarginVertical,
            "m" => Margin,

            "tl-cr" => CornerTopLeft,
            "tr-cr" => CornerTopRight,
            "bl-cr" => CornerBottomLeft,
            "br-cr" => CornerBottomRight,
            "t-cr" => CornerTop,
            "b-cr" => CornerBottom,
            "l-cr" => CornerLeft,
            "r-cr" => CornerRight,
            "cr" => Corner,

            "bg" => Background,
            "elev" => Elevation,
            "visible" => Visible,
            "f-mode" => FocusMode,

            "h-l-grav" => LayoutGravityHorizontal,
            "v-l-grav" => LayoutGravityVertical,
            "l-grav" => LayoutGravity,

            "orientation" => Orientation,
            "h-grav" => GravityHorizontal,
            "v-grav" => GravityVertical,
            "grav" => Gravity,
            "scroll" => Scroll,
            "sticky" => Sticky,
            "auto-wrap" => AutoWrap,

            "modal-cr" => ModalCorner,
            "modal-bg" => ModalBackground,
            "modal-elev" => ModalElevation,
            "cont-bg-mode" => BackdropMode,
            "cont-transition-duration" => TransitionDuration,

            "src" => Src,

            _ => return None,
        };
        Some(key)
    }

    /// The markup-facing name for this key.
    pub fn name(self) -> &'static str {
        use AttrKey::*;
        match self {
            Width => "w",
            Height => "h",
            MaxWidth => "max-w",
            MaxHeight => "max-h",
            MinWidth => "min-w",
            MinHeight => "min-h",

            MinWindowWidth => "min-win-w",
            MinWindowHeight => "min-win-h",

            PaddingLeft => "l-p",
            PaddingRight => "r-p",
            PaddingTop => "t-p",
            PaddingBottom => "b-t",
            PaddingHorizontal => "h-p",
            PaddingVertical => "v-p",
            Padding => "p",

            MarginLeft => "l-m",
            MarginRight => "r-m",
            MarginTop => "t-m",
            MarginBottom => "b-m",
            MarginHorizontal => "h-m",
            MarginVertical => "v-m",
            Margin => "m",

            CornerTopLeft => "tl-cr",
            CornerTopRight => "tr-cr",
            CornerBottomLeft => "bl-cr",
            CornerBottomRight => "br-cr",
            CornerTop => "t-cr",
            CornerBottom => "b-cr",
            CornerLeft => "l-cr",
            CornerRight => "r-cr",
            Corner => "cr",

            Background => "bg",
            Elevation => "elev",
            Visible => "visible",
            FocusMode => "f-mode",

            LayoutGravityHorizontal => "h-l-grav",
            LayoutGravityVertical => "v-l-grav",
            LayoutGravity => "l-grav",

            Orientation => "orientation",
            GravityHorizontal => "h-grav",
            GravityVertical => "v-grav",
            Gravity => "grav",
            Scroll => "scroll",
            Sticky => "sticky",
            AutoWrap => "auto-wrap",

            ModalCorner => "modal-cr",
            ModalBackground => "modal-bg",
            ModalElevation => "modal-elev",
            BackdropMode => "cont-bg-mode",
            TransitionDuration => "cont-transition-duration",

            Src => "src",
        }
    }

    /// Every key, in a stable order. Used by the engine when replaying a
    /// full attribute set onto a fresh node.
    pub const ALL: [AttrKey; 51] = {
        use AttrKey::*;
        [
            Width, Height, MaxWidth, MaxHeight, MinWidth, MinHeight,
            MinWindowWidth, MinWindowHeight,
            PaddingLeft, PaddingRight, PaddingTop, PaddingBottom,
            PaddingHorizontal, PaddingVertical, Padding,
            MarginLeft, MarginRight, MarginTop, MarginBottom,
            MarginHorizontal, MarginVertical, Margin,
            CornerTopLeft, CornerTopRight, CornerBottomLeft, CornerBottomRight,
            CornerTop, CornerBottom, CornerLeft, CornerRight, Corner,
            Background, Elevation, Visible, FocusMode,
            LayoutGravityHorizontal, LayoutGravityVertical, LayoutGravity,
            Orientation, GravityHorizontal, GravityVertical, Gravity,
            Scroll, Sticky, AutoWrap,
            ModalCorner, ModalBackground, ModalElevation, BackdropMode,
            TransitionDuration,
            Src,
        ]
    };
}

// ===========================================================================
// Tests
// ===========================================================================
