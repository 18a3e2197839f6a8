//! Solver - the box-model engine behind every container.
//!
//! The layout core never computes flexbox itself. It drives an implementation
//! of [`Solver`] through per-node style setters, tree edits and a layout
//! pass, then reads computed boxes back. [`TaffySolver`](super::TaffySolver)
//! is the bundled backend; tests use a scripted one.

use crate::error::Result;
use crate::types::{Align, Edge, FlexDirection, FlexWrap, JustifyContent, LayoutDirection};

use super::types::{ComputedBox, MeasureFunc};

/// Handle to a node owned by a solver.
///
/// Handles are only meaningful to the solver that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutNode(u64);

impl LayoutNode {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

/// A length as the solver understands it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverLength {
    /// Absolute length in solver units (logical units times scale factor).
    Points(f32),
    /// Percentage of the parent (0-100).
    Percent(f32),
    Auto,
}

/// One style setter call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleProperty {
    FlexDirection(FlexDirection),
    FlexWrap(FlexWrap),
    JustifyContent(JustifyContent),
    AlignContent(Align),
    AlignItems(Align),
    AlignSelf(Align),
    FlexBasis(SolverLength),
    FlexGrow(f32),
    FlexShrink(f32),
    Width(SolverLength),
    Height(SolverLength),
    MinWidth(SolverLength),
    MinHeight(SolverLength),
    MaxWidth(SolverLength),
    MaxHeight(SolverLength),
    Margin(Edge, SolverLength),
    Padding(Edge, SolverLength),
    AspectRatio(f32),
}

impl StyleProperty {
    /// Name of the setter, for diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FlexDirection(_) => "flexDirection",
            Self::FlexWrap(_) => "flexWrap",
            Self::JustifyContent(_) => "justifyContent",
            Self::AlignContent(_) => "alignContent",
            Self::AlignItems(_) => "alignItems",
            Self::AlignSelf(_) => "alignSelf",
            Self::FlexBasis(_) => "flexBasis",
            Self::FlexGrow(_) => "flexGrow",
            Self::FlexShrink(_) => "flexShrink",
            Self::Width(_) => "width",
            Self::Height(_) => "height",
            Self::MinWidth(_) => "minWidth",
            Self::MinHeight(_) => "minHeight",
            Self::MaxWidth(_) => "maxWidth",
            Self::MaxHeight(_) => "maxHeight",
            Self::Margin(..) => "margin",
            Self::Padding(..) => "padding",
            Self::AspectRatio(_) => "aspectRatio",
        }
    }
}

/// Per-node style and tree operations consumed by the layout core.
///
/// Implementations own their node arena. Nodes start detached with the
/// solver's default style; setters only touch the property they name.
pub trait Solver {
    /// Create a detached node with default style.
    fn create_node(&mut self) -> Result<LayoutNode>;

    /// Free a node. It is detached from its parent and its children are
    /// left parentless.
    fn remove_node(&mut self, node: LayoutNode) -> Result<()>;

    /// Apply one style setter.
    fn set_style(&mut self, node: LayoutNode, property: StyleProperty) -> Result<()>;

    /// Install or clear the intrinsic size callback. Sizes are solver units.
    fn set_measure_func(&mut self, node: LayoutNode, measure: Option<MeasureFunc>) -> Result<()>;

    /// Insert `child` into `parent` at `index` (clamped to the child count).
    fn insert_child(&mut self, parent: LayoutNode, child: LayoutNode, index: usize) -> Result<()>;

    /// Detach `child` from `parent`.
    fn remove_child(&mut self, parent: LayoutNode, child: LayoutNode) -> Result<()>;

    /// Children of `parent` in layout order.
    fn children(&self, parent: LayoutNode) -> Result<Vec<LayoutNode>>;

    /// Parent of `node`, if attached.
    fn parent(&self, node: LayoutNode) -> Option<LayoutNode>;

    /// Run a layout pass rooted at `root` with the given available size.
    fn calculate_layout(
        &mut self,
        root: LayoutNode,
        width: f32,
        height: f32,
        direction: LayoutDirection,
    ) -> Result<()>;

    /// Box computed by the last layout pass, relative to the parent.
    fn computed_layout(&self, node: LayoutNode) -> Result<ComputedBox>;

    /// Number of children under `parent`.
    fn child_count(&self, parent: LayoutNode) -> Result<usize> {
        self.children(parent).map(|children| children.len())
    }
}
