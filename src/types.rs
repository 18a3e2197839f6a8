//! Core types for spark-flex3d.
//!
//! These are the flex vocabulary shared by the property record, the solver
//! binding and the solver backend. Every enum parses from its CSS spelling so
//! string-keyed configuration (`"row-reverse"`, `"space-between"`) round-trips.

use std::fmt;
use std::str::FromStr;

use crate::error::FlexError;

// =============================================================================
// Keyword parsing
// =============================================================================

/// Implements `FromStr`, `as_str` and `Display` for a keyword enum.
///
/// Underscores are accepted in place of dashes and matching is
/// case-insensitive, so `"ROW_REVERSE"` parses like `"row-reverse"`.
macro_rules! css_keywords {
    ($ty:ident, $property:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// CSS spelling of this value.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = FlexError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
                match normalized.as_str() {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(FlexError::InvalidValue {
                        property: $property.to_string(),
                        value: value.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// =============================================================================
// Dimension
// =============================================================================

/// A length in logical (world) units, a percentage of the parent, or auto.
///
/// Logical units are scaled by the container's scale factor only when they
/// reach the solver.
///
/// ```
/// use spark_flex3d::types::Dimension;
///
/// let width: Dimension = "50%".parse().unwrap();
/// assert_eq!(width, Dimension::Percent(50.0));
/// assert_eq!("auto".parse::<Dimension>().unwrap(), Dimension::Auto);
/// assert_eq!("0.5px".parse::<Dimension>().unwrap(), Dimension::Units(0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Sized by content or by the flex algorithm.
    #[default]
    Auto,
    /// Absolute length in logical units.
    Units(f32),
    /// Percentage of the parent size (0-100).
    Percent(f32),
}

impl Dimension {
    /// The literal length, if this is an absolute dimension.
    pub fn units(&self) -> Option<f32> {
        match self {
            Self::Units(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f32> for Dimension {
    fn from(value: f32) -> Self {
        Self::Units(value)
    }
}

impl FromStr for Dimension {
    type Err = FlexError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let invalid = || FlexError::InvalidValue {
            property: "dimension".to_string(),
            value: value.to_string(),
        };

        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        if let Some(percent) = trimmed.strip_suffix('%') {
            return percent.trim().parse().map(Self::Percent).map_err(|_| invalid());
        }
        // "px" carries no extra meaning: pixels are logical units scaled at the solver.
        let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
        number.trim().parse().map(Self::Units).map_err(|_| invalid())
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Units(v) => write!(f, "{v}"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

// =============================================================================
// Flex Container Enums
// =============================================================================

/// Main axis direction of a flex container.
///
/// Defaults to `Column`, matching the solver's own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FlexDirection {
    #[default]
    Column,
    ColumnReverse,
    Row,
    RowReverse,
}

css_keywords!(FlexDirection, "flexDirection", {
    Column => "column",
    ColumnReverse => "column-reverse",
    Row => "row",
    RowReverse => "row-reverse",
});

impl FlexDirection {
    /// Check if this is a row direction.
    pub const fn is_row(&self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }
}

/// Flex wrap behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

css_keywords!(FlexWrap, "flexWrap", {
    NoWrap => "no-wrap",
    Wrap => "wrap",
    WrapReverse => "wrap-reverse",
});

/// Main axis distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

css_keywords!(JustifyContent, "justifyContent", {
    FlexStart => "flex-start",
    FlexEnd => "flex-end",
    Center => "center",
    SpaceBetween => "space-between",
    SpaceAround => "space-around",
    SpaceEvenly => "space-evenly",
});

/// Cross axis alignment, shared by align-content, align-items and align-self.
///
/// Not every value is meaningful for every property (`Auto` only applies to
/// align-self, the space distributions only to align-content). The solver
/// backend reports combinations it cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Align {
    #[default]
    Auto,
    Stretch,
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
    SpaceBetween,
    SpaceAround,
}

css_keywords!(Align, "align", {
    Auto => "auto",
    Stretch => "stretch",
    FlexStart => "flex-start",
    FlexEnd => "flex-end",
    Center => "center",
    Baseline => "baseline",
    SpaceBetween => "space-between",
    SpaceAround => "space-around",
});

/// Box edge for margin and padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    All,
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// The four concrete edges, in CSS order.
    pub const SIDES: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Inline direction passed to the layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

css_keywords!(LayoutDirection, "direction", {
    Ltr => "ltr",
    Rtl => "rtl",
});
