//! Unit-tagged attribute values: Value (px, %, auto, raw) and Gravity.
//!
//! Attribute values arrive as strings from the hosting markup layer. The
//! lexer recognizes the unit forms the engine computes with; anything else
//! degrades to a verbatim [`Value::Raw`] passthrough that the rendering
//! surface is expected to accept or ignore on its own terms. Parsing never
//! fails.

use std::fmt;

use logos::Logos;

/// Token over a single attribute value.
///
/// Longest match wins, so `20px` lexes as [`ValueToken::PxDim`] rather than
/// a bare number followed by an identifier.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t]+")]
enum ValueToken {
    /// Pixel dimension: `20px`, `-3.5px`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?px")]
    PxDim,

    /// Percentage dimension: `50%`, `4.5%`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?%")]
    PercentDim,

    /// Bare number, treated as pixels.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    /// The `auto` keyword.
    #[token("auto")]
    Auto,
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A unit-tagged scalar attribute value.
///
/// `Raw` carries input the unit lexer does not recognize; it is passed
/// through to the rendering surface verbatim and never interpreted
/// numerically by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Pixel length.
    Px(f32),
    /// Percentage of the parent dimension.
    Percent(f32),
    /// Content-based sizing.
    Auto,
    /// Verbatim passthrough for anything else.
    Raw(String),
}

impl Value {
    /// Parse an attribute value string. Never fails: unrecognized input
    /// becomes [`Value::Raw`].
    pub fn parse(input: &str) -> Value {
        let trimmed = input.trim();
        let mut lexer = ValueToken::lexer(trimmed);
        let first = lexer.next();
        // Exactly one token must cover the whole input, otherwise the value
        // is something the engine does not understand (calc, keywords, ...).
        if let (Some(Ok(token)), None) = (first, lexer.clone().next()) {
            if lexer.span().end == trimmed.len() {
                return match token {
                    ValueToken::Auto => Value::Auto,
                    ValueToken::PxDim => {
                        let digits = &trimmed[..trimmed.len() - 2];
                        match digits.parse::<f32>() {
                            Ok(n) => Value::Px(n),
                            Err(_) => Value::Raw(trimmed.to_owned()),
                        }
                    }
                    ValueToken::PercentDim => {
                        let digits = &trimmed[..trimmed.len() - 1];
                        match digits.parse::<f32>() {
                            Ok(n) => Value::Percent(n),
                            Err(_) => Value::Raw(trimmed.to_owned()),
                        }
                    }
                    ValueToken::Number => match trimmed.parse::<f32>() {
                        Ok(n) => Value::Px(n),
                        Err(_) => Value::Raw(trimmed.to_owned()),
                    },
                };
            }
        }
        Value::Raw(trimmed.to_owned())
    }

    /// Returns `true` for the `auto` keyword.
    pub fn is_auto(&self) -> bool {
        matches!(self, Value::Auto)
    }

    /// Returns `true` for percentage values.
    pub fn is_percent(&self) -> bool {
        matches!(self, Value::Percent(_))
    }

    /// The pixel magnitude, if this value is pixel-denominated.
    pub fn as_px(&self) -> Option<f32> {
        match self {
            Value::Px(n) => Some(*n),
            _ => None,
        }
    }
}

/// Format a float the way stylesheets do: no trailing `.0` on whole numbers.
fn fmt_number(f: &mut fmt::Formatter<'_>, value: f32) -> fmt::Result {
    if value.fract() == 0.0 {
        write!(f, "{}", value as i64)
    } else {
        write!(f, "{value}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Px(n) => {
                fmt_number(f, *n)?;
                write!(f, "px")
            }
            Value::Percent(n) => {
                fmt_number(f, *n)?;
                write!(f, "%")
            }
            Value::Auto => write!(f, "auto"),
            Value::Raw(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Gravity
// ---------------------------------------------------------------------------

/// Alignment along one axis: a keyword, or a pixel anchor measured from the
/// parent's leading edge (free placement only).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gravity {
    Start,
    Center,
    End,
    /// Anchor to the given pixel offset inside the parent.
    Anchor(f32),
}

impl Gravity {
    /// Parse a gravity attribute value. Pixel values become anchors;
    /// anything unrecognized returns `None` (treated as unset).
    pub fn parse(input: &str) -> Option<Gravity> {
        match input.trim() {
            "start" => Some(Gravity::Start),
            "center" => Some(Gravity::Center),
            "end" => Some(Gravity::End),
            other => match Value::parse(other) {
                Value::Px(n) => Some(Gravity::Anchor(n)),
                _ => None,
            },
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
