//! FlexProperties - Sparse flex style record for containers and items.
//!
//! Every field is optional. Only fields that are `Some` reach the solver, so
//! an item that never mentions `flex_shrink` keeps the solver's default
//! rather than having it reset on each update.
//!
//! Properties can be built as a struct literal, with the `with_*` helpers,
//! or from string keys (`"flexDirection"`, `"dir"`, `"mt"`, ...) for hosts
//! that forward untyped configuration.
//!
//! # Example
//!
//! ```
//! use spark_flex3d::engine::FlexProperties;
//! use spark_flex3d::types::{Dimension, FlexDirection};
//!
//! let props = FlexProperties {
//!     flex_direction: Some(FlexDirection::Row),
//!     ..Default::default()
//! }
//! .with_grow(1.0)
//! .with_width(2.0);
//!
//! assert_eq!(props.width, Some(Dimension::Units(2.0)));
//! ```

use bitflags::bitflags;

use crate::error::{FlexError, Result};
use crate::layout::MeasureFunc;
use crate::types::{Align, Dimension, Edge, FlexDirection, FlexWrap, JustifyContent};

// =============================================================================
// Spacing
// =============================================================================

/// Margin or padding: an all-edges value plus per-edge overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spacing {
    pub all: Option<Dimension>,
    pub top: Option<Dimension>,
    pub right: Option<Dimension>,
    pub bottom: Option<Dimension>,
    pub left: Option<Dimension>,
}

impl Spacing {
    /// Same value on every edge.
    pub fn all(value: Dimension) -> Self {
        Self {
            all: Some(value),
            ..Default::default()
        }
    }

    pub fn get(&self, edge: Edge) -> Option<Dimension> {
        match edge {
            Edge::All => self.all,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    pub fn set(&mut self, edge: Edge, value: Dimension) {
        let slot = match edge {
            Edge::All => &mut self.all,
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
            Edge::Left => &mut self.left,
        };
        *slot = Some(value);
    }

    /// Present edges in application order: the all-edges value first so
    /// per-edge values override it.
    pub fn entries(&self) -> impl Iterator<Item = (Edge, Dimension)> + '_ {
        std::iter::once(Edge::All)
            .chain(Edge::SIDES)
            .filter_map(|edge| self.get(edge).map(|value| (edge, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

// =============================================================================
// FlexProperties
// =============================================================================

/// Flex style of one node. `None` means "leave the solver's value alone".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlexProperties {
    // =========================================================================
    // CONTAINER PROPERTIES
    // =========================================================================
    pub flex_direction: Option<FlexDirection>,
    pub flex_wrap: Option<FlexWrap>,
    pub justify_content: Option<JustifyContent>,
    pub align_items: Option<Align>,
    pub align_content: Option<Align>,

    // =========================================================================
    // ITEM PROPERTIES
    // =========================================================================
    pub align_self: Option<Align>,
    /// Initial main size before grow/shrink.
    pub flex_basis: Option<Dimension>,
    pub flex_grow: Option<f32>,
    pub flex_shrink: Option<f32>,

    // =========================================================================
    // DIMENSIONS
    // =========================================================================
    /// An absolute width here is also what the item reports after reflow,
    /// regardless of what the solver computed.
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub min_width: Option<Dimension>,
    pub max_width: Option<Dimension>,
    pub min_height: Option<Dimension>,
    pub max_height: Option<Dimension>,

    // =========================================================================
    // SPACING
    // =========================================================================
    pub margin: Spacing,
    pub padding: Spacing,

    // =========================================================================
    // INTRINSIC SIZE
    // =========================================================================
    /// Measure callback in logical units.
    pub measure: Option<MeasureFunc>,
    /// Width divided by height.
    pub aspect_ratio: Option<f32>,
}

impl FlexProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direction(mut self, direction: FlexDirection) -> Self {
        self.flex_direction = Some(direction);
        self
    }

    pub fn with_grow(mut self, grow: f32) -> Self {
        self.flex_grow = Some(grow);
        self
    }

    pub fn with_shrink(mut self, shrink: f32) -> Self {
        self.flex_shrink = Some(shrink);
        self
    }

    pub fn with_width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn with_height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn with_margin(mut self, edge: Edge, value: impl Into<Dimension>) -> Self {
        self.margin.set(edge, value.into());
        self
    }

    pub fn with_padding(mut self, edge: Edge, value: impl Into<Dimension>) -> Self {
        self.padding.set(edge, value.into());
        self
    }

    pub fn with_measure(mut self, measure: MeasureFunc) -> Self {
        self.measure = Some(measure);
        self
    }

    /// Explicit absolute width and height in logical units, if authored.
    pub fn explicit_size(&self) -> (Option<f32>, Option<f32>) {
        (
            self.width.and_then(|w| w.units()),
            self.height.and_then(|h| h.units()),
        )
    }

    /// Which property groups differ between `old` and `self`.
    pub fn changes_since(&self, old: &FlexProperties) -> PropertyChanges {
        diff(old, self)
    }

    // =========================================================================
    // String-keyed configuration
    // =========================================================================

    /// Set a property by name.
    ///
    /// Accepts camelCase names and their shorthands (`dir`, `align`, `justify`,
    /// `wrap`, `basis`, `grow`, `shrink`, `m`, `mt`, `p`, `pl`, ...).
    pub fn insert(&mut self, key: &str, value: impl Into<PropertyValue>) -> Result<()> {
        let value = value.into();
        match key {
            "flexDirection" | "flexDir" | "dir" => {
                self.flex_direction = Some(value.keyword(key)?);
            }
            "flexWrap" | "wrap" => self.flex_wrap = Some(value.keyword(key)?),
            "justifyContent" | "justify" => self.justify_content = Some(value.keyword(key)?),
            "alignItems" | "align" => self.align_items = Some(value.keyword(key)?),
            "alignContent" => self.align_content = Some(value.keyword(key)?),
            "alignSelf" => self.align_self = Some(value.keyword(key)?),

            "flexBasis" | "basis" => self.flex_basis = Some(value.dimension(key)?),
            "flexGrow" | "grow" => self.flex_grow = Some(value.number(key)?),
            "flexShrink" | "shrink" => self.flex_shrink = Some(value.number(key)?),
            "aspectRatio" => self.aspect_ratio = Some(value.number(key)?),

            "width" => self.width = Some(value.dimension(key)?),
            "height" => self.height = Some(value.dimension(key)?),
            "minWidth" => self.min_width = Some(value.dimension(key)?),
            "maxWidth" => self.max_width = Some(value.dimension(key)?),
            "minHeight" => self.min_height = Some(value.dimension(key)?),
            "maxHeight" => self.max_height = Some(value.dimension(key)?),

            _ => {
                if let Some((is_margin, edge)) = spacing_key(key) {
                    let dimension = value.dimension(key)?;
                    let spacing = if is_margin { &mut self.margin } else { &mut self.padding };
                    spacing.set(edge, dimension);
                } else {
                    return Err(FlexError::UnmappedProperty(key.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Build from string-keyed entries, dropping anything that does not map.
    ///
    /// Unknown keys and unparsable values are logged and skipped so newer
    /// hosts can pass properties this version does not understand.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: AsRef<str>,
        V: Into<PropertyValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut props = Self::default();
        for (key, value) in entries {
            if let Err(err) = props.insert(key.as_ref(), value) {
                log::warn!("dropping flex property: {err}");
            }
        }
        props
    }
}

/// Map a margin/padding key to (is_margin, edge).
fn spacing_key(key: &str) -> Option<(bool, Edge)> {
    Some(match key {
        "margin" | "m" => (true, Edge::All),
        "marginTop" | "mt" => (true, Edge::Top),
        "marginRight" | "mr" => (true, Edge::Right),
        "marginBottom" | "mb" => (true, Edge::Bottom),
        "marginLeft" | "ml" => (true, Edge::Left),
        "padding" | "p" => (false, Edge::All),
        "paddingTop" | "pt" => (false, Edge::Top),
        "paddingRight" | "pr" => (false, Edge::Right),
        "paddingBottom" | "pb" => (false, Edge::Bottom),
        "paddingLeft" | "pl" => (false, Edge::Left),
        _ => return None,
    })
}

// =============================================================================
// PropertyValue
// =============================================================================

/// Untyped property value: a number or a string such as `"50%"` or `"row"`.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Number(f32),
    Text(String),
}

impl PropertyValue {
    fn invalid(&self, key: &str) -> FlexError {
        let value = match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        };
        FlexError::InvalidValue {
            property: key.to_string(),
            value,
        }
    }

    fn keyword<T: std::str::FromStr>(&self, key: &str) -> Result<T> {
        match self {
            Self::Text(s) => s.parse().map_err(|_| self.invalid(key)),
            Self::Number(_) => Err(self.invalid(key)),
        }
    }

    fn number(&self, key: &str) -> Result<f32> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s.trim().parse().map_err(|_| self.invalid(key)),
        }
    }

    fn dimension(&self, key: &str) -> Result<Dimension> {
        match self {
            Self::Number(n) => Ok(Dimension::Units(*n)),
            Self::Text(s) => s.parse().map_err(|_| self.invalid(key)),
        }
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

// =============================================================================
// Diffing
// =============================================================================

bitflags! {
    /// Property groups that changed between two records.
    ///
    /// Empty means the solver node is already up to date.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PropertyChanges: u16 {
        const DIRECTION = 1 << 0;
        const WRAP = 1 << 1;
        const JUSTIFY = 1 << 2;
        const ALIGN = 1 << 3;
        const FLEX = 1 << 4;
        const SIZE = 1 << 5;
        const MARGIN = 1 << 6;
        const PADDING = 1 << 7;
        const MEASURE = 1 << 8;
        const ASPECT_RATIO = 1 << 9;
    }
}

/// Compare two property records group by group.
pub fn diff(old: &FlexProperties, new: &FlexProperties) -> PropertyChanges {
    let mut changes = PropertyChanges::empty();

    changes.set(PropertyChanges::DIRECTION, old.flex_direction != new.flex_direction);
    changes.set(PropertyChanges::WRAP, old.flex_wrap != new.flex_wrap);
    changes.set(PropertyChanges::JUSTIFY, old.justify_content != new.justify_content);
    changes.set(
        PropertyChanges::ALIGN,
        old.align_items != new.align_items
            || old.align_content != new.align_content
            || old.align_self != new.align_self,
    );
    changes.set(
        PropertyChanges::FLEX,
        old.flex_basis != new.flex_basis
            || old.flex_grow != new.flex_grow
            || old.flex_shrink != new.flex_shrink,
    );
    changes.set(
        PropertyChanges::SIZE,
        old.width != new.width
            || old.height != new.height
            || old.min_width != new.min_width
            || old.max_width != new.max_width
            || old.min_height != new.min_height
            || old.max_height != new.max_height,
    );
    changes.set(PropertyChanges::MARGIN, old.margin != new.margin);
    changes.set(PropertyChanges::PADDING, old.padding != new.padding);
    changes.set(PropertyChanges::MEASURE, old.measure != new.measure);
    changes.set(PropertyChanges::ASPECT_RATIO, old.aspect_ratio != new.aspect_ratio);

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MeasuredSize;

    #[test]
    fn test_default_is_sparse() {
        let props = FlexProperties::new();
        assert_eq!(props.flex_direction, None);
        assert_eq!(props.width, None);
        assert!(props.margin.is_empty());
        assert!(props.measure.is_none());
    }

    #[test]
    fn test_insert_aliases() {
        let mut props = FlexProperties::new();
        props.insert("dir", "row").unwrap();
        props.insert("justify", "space-between").unwrap();
        props.insert("align", "center").unwrap();
        props.insert("wrap", "wrap-reverse").unwrap();
        props.insert("grow", 2.0).unwrap();
        props.insert("shrink", "0.5").unwrap();
        props.insert("basis", "25%").unwrap();

        assert_eq!(props.flex_direction, Some(FlexDirection::Row));
        assert_eq!(props.justify_content, Some(JustifyContent::SpaceBetween));
        assert_eq!(props.align_items, Some(Align::Center));
        assert_eq!(props.flex_wrap, Some(FlexWrap::WrapReverse));
        assert_eq!(props.flex_grow, Some(2.0));
        assert_eq!(props.flex_shrink, Some(0.5));
        assert_eq!(props.flex_basis, Some(Dimension::Percent(25.0)));
    }

    #[test]
    fn test_insert_spacing() {
        let mut props = FlexProperties::new();
        props.insert("m", 1.0).unwrap();
        props.insert("mt", "2px").unwrap();
        props.insert("paddingLeft", "10%").unwrap();
        props.insert("p", "auto").unwrap();

        assert_eq!(props.margin.all, Some(Dimension::Units(1.0)));
        assert_eq!(props.margin.top, Some(Dimension::Units(2.0)));
        assert_eq!(props.padding.left, Some(Dimension::Percent(10.0)));
        assert_eq!(props.padding.all, Some(Dimension::Auto));
    }

    #[test]
    fn test_insert_errors() {
        let mut props = FlexProperties::new();

        assert_eq!(
            props.insert("gridArea", "a"),
            Err(FlexError::UnmappedProperty("gridArea".to_string()))
        );
        assert!(matches!(
            props.insert("flexDirection", 1.0),
            Err(FlexError::InvalidValue { .. })
        ));
        assert!(matches!(
            props.insert("width", "wide"),
            Err(FlexError::InvalidValue { .. })
        ));
        assert_eq!(props, FlexProperties::new());
    }

    #[test]
    fn test_from_entries_drops_unknown() {
        let props = FlexProperties::from_entries([
            ("flexDirection", PropertyValue::from("column-reverse")),
            ("hologram", PropertyValue::from("yes")),
            ("height", PropertyValue::from(3.0)),
        ]);

        assert_eq!(props.flex_direction, Some(FlexDirection::ColumnReverse));
        assert_eq!(props.height, Some(Dimension::Units(3.0)));
    }

    #[test]
    fn test_spacing_entries_order() {
        let spacing = Spacing {
            left: Some(Dimension::Units(4.0)),
            all: Some(Dimension::Units(1.0)),
            ..Default::default()
        };
        let entries: Vec<_> = spacing.entries().collect();
        assert_eq!(
            entries,
            vec![(Edge::All, Dimension::Units(1.0)), (Edge::Left, Dimension::Units(4.0))]
        );
    }

    #[test]
    fn test_explicit_size() {
        let props = FlexProperties::new().with_width(2.0).with_height("50%".parse::<Dimension>().unwrap());
        assert_eq!(props.explicit_size(), (Some(2.0), None));
    }

    #[test]
    fn test_diff() {
        let old = FlexProperties::new().with_grow(1.0).with_width(2.0);

        assert!(diff(&old, &old.clone()).is_empty());

        let new = old.clone().with_width(3.0).with_margin(Edge::Top, 1.0);
        let changes = diff(&old, &new);
        assert_eq!(changes, PropertyChanges::SIZE | PropertyChanges::MARGIN);
        assert_eq!(new.changes_since(&old), changes);
    }

    #[test]
    fn test_diff_measure_identity() {
        let f = MeasureFunc::new(|_| MeasuredSize::default());
        let old = FlexProperties::new().with_measure(f.clone());

        assert!(diff(&old, &FlexProperties::new().with_measure(f)).is_empty());
        let other = MeasureFunc::new(|_| MeasuredSize::default());
        assert_eq!(
            diff(&old, &FlexProperties::new().with_measure(other)),
            PropertyChanges::MEASURE
        );
    }
}
