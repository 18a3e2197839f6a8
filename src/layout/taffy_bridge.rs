//! Taffy Bridge - [`Solver`] backed by the Taffy layout engine.
//!
//! Converts style setter calls into Taffy styles, keeps a persistent
//! `TaffyTree` whose shape mirrors the registry, dispatches measure callbacks
//! stored as node context, and reads computed boxes back.
//!
//! Nodes start from the solver defaults the layout core expects: column
//! direction, no shrinking and flex-start content alignment. Anything the
//! core never sets keeps those values.

use std::collections::HashSet;
use std::fmt;

use taffy::{
    AlignContent as TaffyAlignContent, AlignItems as TaffyAlignItems,
    AlignSelf as TaffyAlignSelf, AvailableSpace, Dimension as TaffyDimension, Display,
    FlexDirection as TaffyFlexDirection, FlexWrap as TaffyFlexWrap,
    JustifyContent as TaffyJustifyContent, LengthPercentage, LengthPercentageAuto, NodeId, Rect,
    Size, Style, TaffyTree,
};

use crate::error::{FlexError, Result};
use crate::types::{Align, Edge, FlexDirection, FlexWrap, JustifyContent, LayoutDirection};

use super::solver::{LayoutNode, Solver, SolverLength, StyleProperty};
use super::types::{ComputedBox, MeasureFunc, MeasureMode, MeasureRequest};

// =============================================================================
// DIMENSION CONVERSION
// =============================================================================

/// Convert a solver length to Taffy's Dimension.
fn to_taffy_dimension(len: SolverLength) -> TaffyDimension {
    match len {
        SolverLength::Auto => TaffyDimension::Auto,
        SolverLength::Points(n) => TaffyDimension::Length(n),
        SolverLength::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

/// Convert a solver length to Taffy's LengthPercentageAuto.
fn to_taffy_lpa(len: SolverLength) -> LengthPercentageAuto {
    match len {
        SolverLength::Auto => LengthPercentageAuto::Auto,
        SolverLength::Points(n) => LengthPercentageAuto::Length(n),
        SolverLength::Percent(p) => LengthPercentageAuto::Percent(p / 100.0),
    }
}

/// Convert a solver length to Taffy's LengthPercentage (no auto).
fn to_taffy_lp(len: SolverLength) -> Result<LengthPercentage> {
    match len {
        SolverLength::Auto => Err(FlexError::UnsupportedStyle {
            property: "padding",
            reason: "auto is not a valid padding".to_string(),
        }),
        SolverLength::Points(n) => Ok(LengthPercentage::Length(n)),
        SolverLength::Percent(p) => Ok(LengthPercentage::Percent(p / 100.0)),
    }
}

// =============================================================================
// ENUM CONVERSIONS
// =============================================================================

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
    }
}

fn to_taffy_flex_wrap(wrap: FlexWrap) -> TaffyFlexWrap {
    match wrap {
        FlexWrap::NoWrap => TaffyFlexWrap::NoWrap,
        FlexWrap::Wrap => TaffyFlexWrap::Wrap,
        FlexWrap::WrapReverse => TaffyFlexWrap::WrapReverse,
    }
}

fn to_taffy_justify_content(justify: JustifyContent) -> TaffyJustifyContent {
    match justify {
        JustifyContent::FlexStart => TaffyJustifyContent::FlexStart,
        JustifyContent::Center => TaffyJustifyContent::Center,
        JustifyContent::FlexEnd => TaffyJustifyContent::FlexEnd,
        JustifyContent::SpaceBetween => TaffyJustifyContent::SpaceBetween,
        JustifyContent::SpaceAround => TaffyJustifyContent::SpaceAround,
        JustifyContent::SpaceEvenly => TaffyJustifyContent::SpaceEvenly,
    }
}

fn unsupported(property: &'static str, align: Align) -> FlexError {
    FlexError::UnsupportedStyle {
        property,
        reason: format!("`{align}` is not a valid value"),
    }
}

/// `Auto` maps to `None`, which lets Taffy fall back to its own default.
fn to_taffy_align_items(align: Align) -> Result<Option<TaffyAlignItems>> {
    Ok(Some(match align {
        Align::Auto => return Ok(None),
        Align::Stretch => TaffyAlignItems::Stretch,
        Align::FlexStart => TaffyAlignItems::FlexStart,
        Align::Center => TaffyAlignItems::Center,
        Align::FlexEnd => TaffyAlignItems::FlexEnd,
        Align::Baseline => TaffyAlignItems::Baseline,
        Align::SpaceBetween | Align::SpaceAround => {
            return Err(unsupported("alignItems", align));
        }
    }))
}

fn to_taffy_align_self(align: Align) -> Result<Option<TaffyAlignSelf>> {
    match align {
        // inherit from parent
        Align::Auto => Ok(None),
        Align::SpaceBetween | Align::SpaceAround => Err(unsupported("alignSelf", align)),
        other => to_taffy_align_items(other),
    }
}

fn to_taffy_align_content(align: Align) -> Result<Option<TaffyAlignContent>> {
    Ok(Some(match align {
        Align::Auto => return Ok(None),
        Align::Stretch => TaffyAlignContent::Stretch,
        Align::FlexStart => TaffyAlignContent::FlexStart,
        Align::Center => TaffyAlignContent::Center,
        Align::FlexEnd => TaffyAlignContent::FlexEnd,
        Align::SpaceBetween => TaffyAlignContent::SpaceBetween,
        Align::SpaceAround => TaffyAlignContent::SpaceAround,
        Align::Baseline => return Err(unsupported("alignContent", align)),
    }))
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// Style every new node starts from.
fn default_style() -> Style {
    Style {
        display: Display::Flex,
        flex_direction: TaffyFlexDirection::Column,
        flex_shrink: 0.0,
        align_content: Some(TaffyAlignContent::FlexStart),
        ..Default::default()
    }
}

fn set_edge<T: Copy>(rect: &mut Rect<T>, edge: Edge, value: T) {
    match edge {
        Edge::All => {
            rect.top = value;
            rect.right = value;
            rect.bottom = value;
            rect.left = value;
        }
        Edge::Top => rect.top = value,
        Edge::Right => rect.right = value,
        Edge::Bottom => rect.bottom = value,
        Edge::Left => rect.left = value,
    }
}

/// Write one setter into a Taffy style.
fn apply_style_property(style: &mut Style, property: StyleProperty) -> Result<()> {
    match property {
        StyleProperty::FlexDirection(dir) => style.flex_direction = to_taffy_flex_direction(dir),
        StyleProperty::FlexWrap(wrap) => style.flex_wrap = to_taffy_flex_wrap(wrap),
        StyleProperty::JustifyContent(justify) => {
            style.justify_content = Some(to_taffy_justify_content(justify));
        }
        StyleProperty::AlignContent(align) => style.align_content = to_taffy_align_content(align)?,
        StyleProperty::AlignItems(align) => style.align_items = to_taffy_align_items(align)?,
        StyleProperty::AlignSelf(align) => style.align_self = to_taffy_align_self(align)?,
        StyleProperty::FlexBasis(len) => style.flex_basis = to_taffy_dimension(len),
        StyleProperty::FlexGrow(grow) => style.flex_grow = grow,
        StyleProperty::FlexShrink(shrink) => style.flex_shrink = shrink,
        StyleProperty::Width(len) => style.size.width = to_taffy_dimension(len),
        StyleProperty::Height(len) => style.size.height = to_taffy_dimension(len),
        StyleProperty::MinWidth(len) => style.min_size.width = to_taffy_dimension(len),
        StyleProperty::MinHeight(len) => style.min_size.height = to_taffy_dimension(len),
        StyleProperty::MaxWidth(len) => style.max_size.width = to_taffy_dimension(len),
        StyleProperty::MaxHeight(len) => style.max_size.height = to_taffy_dimension(len),
        StyleProperty::Margin(edge, len) => set_edge(&mut style.margin, edge, to_taffy_lpa(len)),
        StyleProperty::Padding(edge, len) => set_edge(&mut style.padding, edge, to_taffy_lp(len)?),
        StyleProperty::AspectRatio(ratio) => style.aspect_ratio = Some(ratio),
    }
    Ok(())
}

// =============================================================================
// MEASUREMENT
// =============================================================================

/// Translate one axis of a Taffy measure call into a value and mode.
fn measure_axis(known: Option<f32>, available: AvailableSpace) -> (f32, MeasureMode) {
    if let Some(value) = known {
        return (value, MeasureMode::Exactly);
    }
    match available {
        AvailableSpace::Definite(value) => (value, MeasureMode::AtMost),
        AvailableSpace::MinContent => (0.0, MeasureMode::AtMost),
        AvailableSpace::MaxContent => (f32::NAN, MeasureMode::Undefined),
    }
}

fn measure_node(
    measure: &MeasureFunc,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Size<f32> {
    let (width, width_mode) = measure_axis(known_dimensions.width, available_space.width);
    let (height, height_mode) = measure_axis(known_dimensions.height, available_space.height);

    let measured = measure.call(MeasureRequest {
        width,
        width_mode,
        height,
        height_mode,
    });

    Size {
        width: known_dimensions.width.unwrap_or(measured.width.unwrap_or(0.0)),
        height: known_dimensions.height.unwrap_or(measured.height.unwrap_or(0.0)),
    }
}

// =============================================================================
// SOLVER
// =============================================================================

/// [`Solver`] implementation on a persistent `TaffyTree`.
pub struct TaffySolver {
    tree: TaffyTree<MeasureFunc>,
    live: HashSet<NodeId>,
    direction: LayoutDirection,
}

impl TaffySolver {
    pub fn new() -> Self {
        Self {
            tree: TaffyTree::new(),
            live: HashSet::new(),
            direction: LayoutDirection::Ltr,
        }
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.live.len()
    }

    /// Swap left and right margins and padding on every node.
    ///
    /// Rtl is computed as a mirrored ltr layout; swapping the physical
    /// edges first keeps each one on its own side after mirroring.
    fn swap_horizontal_edges(&mut self) -> Result<()> {
        for &id in &self.live {
            let mut style = self.tree.style(id)?.clone();
            std::mem::swap(&mut style.margin.left, &mut style.margin.right);
            std::mem::swap(&mut style.padding.left, &mut style.padding.right);
            self.tree.set_style(id, style)?;
        }
        Ok(())
    }

    fn compute_sized(&mut self, root_id: NodeId, width: f32, height: f32) -> Result<()> {
        // An auto-sized root takes the whole available size, so flex items
        // can grow into it. The authored style is restored afterwards.
        let authored = self.tree.style(root_id)?.clone();
        let mut sized = authored.clone();
        if sized.size.width == TaffyDimension::Auto {
            sized.size.width = TaffyDimension::Length(width);
        }
        if sized.size.height == TaffyDimension::Auto {
            sized.size.height = TaffyDimension::Length(height);
        }
        self.tree.set_style(root_id, sized)?;

        let available = Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::Definite(height),
        };
        let computed = self.tree.compute_layout_with_measure(
            root_id,
            available,
            |known_dimensions, available_space, _node_id, context, _style| match context {
                Some(measure) => measure_node(measure, known_dimensions, available_space),
                None => Size::ZERO,
            },
        );

        self.tree.set_style(root_id, authored)?;
        computed?;
        Ok(())
    }

    /// Resolve a handle, rejecting nodes this solver does not own.
    ///
    /// Taffy indexes its arena directly, so a stale id must never reach it.
    fn node_id(&self, node: LayoutNode) -> Result<NodeId> {
        let id = NodeId::from(node.to_raw());
        if self.live.contains(&id) {
            Ok(id)
        } else {
            Err(FlexError::UnknownNode(node))
        }
    }
}

impl Default for TaffySolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TaffySolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaffySolver")
            .field("nodes", &self.live.len())
            .field("direction", &self.direction)
            .finish()
    }
}

fn to_layout_node(id: NodeId) -> LayoutNode {
    LayoutNode::from_raw(u64::from(id))
}

impl Solver for TaffySolver {
    fn create_node(&mut self) -> Result<LayoutNode> {
        let id = self.tree.new_leaf(default_style())?;
        self.live.insert(id);
        Ok(to_layout_node(id))
    }

    fn remove_node(&mut self, node: LayoutNode) -> Result<()> {
        let id = self.node_id(node)?;
        self.tree.remove(id)?;
        self.live.remove(&id);
        Ok(())
    }

    fn set_style(&mut self, node: LayoutNode, property: StyleProperty) -> Result<()> {
        let id = self.node_id(node)?;
        let mut style = self.tree.style(id)?.clone();
        apply_style_property(&mut style, property)?;
        self.tree.set_style(id, style)?;
        Ok(())
    }

    fn set_measure_func(&mut self, node: LayoutNode, measure: Option<MeasureFunc>) -> Result<()> {
        let id = self.node_id(node)?;
        self.tree.set_node_context(id, measure)?;
        Ok(())
    }

    fn insert_child(&mut self, parent: LayoutNode, child: LayoutNode, index: usize) -> Result<()> {
        let parent_id = self.node_id(parent)?;
        let child_id = self.node_id(child)?;
        let count = self.tree.children(parent_id)?.len();
        self.tree.insert_child_at_index(parent_id, index.min(count), child_id)?;
        Ok(())
    }

    fn remove_child(&mut self, parent: LayoutNode, child: LayoutNode) -> Result<()> {
        let parent_id = self.node_id(parent)?;
        let child_id = self.node_id(child)?;
        if self.tree.parent(child_id) != Some(parent_id) {
            return Err(FlexError::Solver(format!("{child:?} is not a child of {parent:?}")));
        }
        self.tree.remove_child(parent_id, child_id)?;
        Ok(())
    }

    fn children(&self, parent: LayoutNode) -> Result<Vec<LayoutNode>> {
        let parent_id = self.node_id(parent)?;
        Ok(self.tree.children(parent_id)?.into_iter().map(to_layout_node).collect())
    }

    fn parent(&self, node: LayoutNode) -> Option<LayoutNode> {
        let id = self.node_id(node).ok()?;
        self.tree.parent(id).map(to_layout_node)
    }

    fn calculate_layout(
        &mut self,
        root: LayoutNode,
        width: f32,
        height: f32,
        direction: LayoutDirection,
    ) -> Result<()> {
        let root_id = self.node_id(root)?;

        let rtl = direction == LayoutDirection::Rtl;
        if rtl {
            self.swap_horizontal_edges()?;
        }
        let computed = self.compute_sized(root_id, width, height);
        if rtl {
            self.swap_horizontal_edges()?;
        }
        computed?;
        self.direction = direction;
        Ok(())
    }

    fn computed_layout(&self, node: LayoutNode) -> Result<ComputedBox> {
        let id = self.node_id(node)?;
        let layout = self.tree.layout(id)?;
        let mut left = layout.location.x;

        // Taffy lays out left-to-right only; mirror inside the parent for rtl.
        if self.direction == LayoutDirection::Rtl {
            if let Some(parent) = self.tree.parent(id) {
                let parent_width = self.tree.layout(parent)?.size.width;
                left = parent_width - left - layout.size.width;
            }
        }

        Ok(ComputedBox::new(left, layout.location.y, layout.size.width, layout.size.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::MeasuredSize;

    fn setup() -> (TaffySolver, LayoutNode) {
        let mut solver = TaffySolver::new();
        let root = solver.create_node().unwrap();
        (solver, root)
    }

    fn child(solver: &mut TaffySolver, parent: LayoutNode, props: &[StyleProperty]) -> LayoutNode {
        let node = solver.create_node().unwrap();
        for prop in props {
            solver.set_style(node, *prop).unwrap();
        }
        let count = solver.child_count(parent).unwrap();
        solver.insert_child(parent, node, count).unwrap();
        node
    }

    #[test]
    fn test_compute_layout_single_root() {
        let (mut solver, root) = setup();
        solver.set_style(root, StyleProperty::Width(SolverLength::Points(40.0))).unwrap();
        solver.set_style(root, StyleProperty::Height(SolverLength::Points(10.0))).unwrap();

        solver.calculate_layout(root, 80.0, 24.0, LayoutDirection::Ltr).unwrap();

        let layout = solver.computed_layout(root).unwrap();
        assert_eq!(layout, ComputedBox::new(0.0, 0.0, 40.0, 10.0));
    }

    #[test]
    fn test_auto_root_fills_available_space() {
        let (mut solver, root) = setup();

        solver.calculate_layout(root, 80.0, 24.0, LayoutDirection::Ltr).unwrap();

        let layout = solver.computed_layout(root).unwrap();
        assert_eq!(layout.width, 80.0);
        assert_eq!(layout.height, 24.0);
        // authored style is untouched
        solver.calculate_layout(root, 50.0, 10.0, LayoutDirection::Ltr).unwrap();
        assert_eq!(solver.computed_layout(root).unwrap().width, 50.0);
    }

    #[test]
    fn test_default_direction_is_column() {
        let (mut solver, root) = setup();
        let size = [
            StyleProperty::Width(SolverLength::Points(10.0)),
            StyleProperty::Height(SolverLength::Points(5.0)),
        ];
        let a = child(&mut solver, root, &size);
        let b = child(&mut solver, root, &size);

        solver.calculate_layout(root, 100.0, 100.0, LayoutDirection::Ltr).unwrap();

        assert_eq!(solver.computed_layout(a).unwrap().top, 0.0);
        assert_eq!(solver.computed_layout(b).unwrap().top, 5.0);
        assert_eq!(solver.computed_layout(b).unwrap().left, 0.0);
    }

    #[test]
    fn test_flex_row() {
        let (mut solver, root) = setup();
        solver.set_style(root, StyleProperty::FlexDirection(FlexDirection::Row)).unwrap();
        let size = [
            StyleProperty::Width(SolverLength::Points(10.0)),
            StyleProperty::Height(SolverLength::Points(5.0)),
        ];
        let a = child(&mut solver, root, &size);
        let b = child(&mut solver, root, &size);

        solver.calculate_layout(root, 40.0, 10.0, LayoutDirection::Ltr).unwrap();

        assert_eq!(solver.computed_layout(a).unwrap().left, 0.0);
        assert_eq!(solver.computed_layout(b).unwrap().left, 10.0);
    }

    #[test]
    fn test_flex_grow() {
        let (mut solver, root) = setup();
        solver.set_style(root, StyleProperty::FlexDirection(FlexDirection::Row)).unwrap();
        let node = child(&mut solver, root, &[StyleProperty::FlexGrow(1.0)]);

        solver.calculate_layout(root, 100.0, 10.0, LayoutDirection::Ltr).unwrap();

        assert_eq!(solver.computed_layout(node).unwrap().width, 100.0);
    }

    #[test]
    fn test_padding_and_margin() {
        let (mut solver, root) = setup();
        solver
            .set_style(root, StyleProperty::Padding(Edge::All, SolverLength::Points(2.0)))
            .unwrap();
        solver
            .set_style(root, StyleProperty::Padding(Edge::Top, SolverLength::Points(1.0)))
            .unwrap();
        let node = child(
            &mut solver,
            root,
            &[
                StyleProperty::Width(SolverLength::Points(10.0)),
                StyleProperty::Height(SolverLength::Points(5.0)),
                StyleProperty::Margin(Edge::Left, SolverLength::Points(3.0)),
            ],
        );

        solver.calculate_layout(root, 40.0, 20.0, LayoutDirection::Ltr).unwrap();

        let layout = solver.computed_layout(node).unwrap();
        assert_eq!(layout.left, 5.0); // 2 padding + 3 margin
        assert_eq!(layout.top, 1.0);
    }

    #[test]
    fn test_justify_content_center() {
        let (mut solver, root) = setup();
        solver.set_style(root, StyleProperty::FlexDirection(FlexDirection::Row)).unwrap();
        solver
            .set_style(root, StyleProperty::JustifyContent(JustifyContent::Center))
            .unwrap();
        let node = child(
            &mut solver,
            root,
            &[
                StyleProperty::Width(SolverLength::Points(20.0)),
                StyleProperty::Height(SolverLength::Points(5.0)),
            ],
        );

        solver.calculate_layout(root, 100.0, 10.0, LayoutDirection::Ltr).unwrap();

        // (100 - 20) / 2 = 40
        assert_eq!(solver.computed_layout(node).unwrap().left, 40.0);
    }

    #[test]
    fn test_percent_width() {
        let (mut solver, root) = setup();
        let node = child(
            &mut solver,
            root,
            &[
                StyleProperty::Width(SolverLength::Percent(50.0)),
                StyleProperty::Height(SolverLength::Points(5.0)),
            ],
        );

        solver.calculate_layout(root, 80.0, 10.0, LayoutDirection::Ltr).unwrap();

        assert_eq!(solver.computed_layout(node).unwrap().width, 40.0);
    }

    #[test]
    fn test_rtl_mirrors_left() {
        let (mut solver, root) = setup();
        solver.set_style(root, StyleProperty::FlexDirection(FlexDirection::Row)).unwrap();
        let size = [
            StyleProperty::Width(SolverLength::Points(10.0)),
            StyleProperty::Height(SolverLength::Points(5.0)),
        ];
        let a = child(&mut solver, root, &size);
        let b = child(&mut solver, root, &size);

        solver.calculate_layout(root, 100.0, 10.0, LayoutDirection::Rtl).unwrap();

        assert_eq!(solver.computed_layout(a).unwrap().left, 90.0);
        assert_eq!(solver.computed_layout(b).unwrap().left, 80.0);
        assert_eq!(solver.computed_layout(root).unwrap().left, 0.0);
    }

    #[test]
    fn test_rtl_keeps_physical_edges() {
        let (mut solver, root) = setup();
        solver.set_style(root, StyleProperty::FlexDirection(FlexDirection::Row)).unwrap();
        solver
            .set_style(root, StyleProperty::Padding(Edge::Left, SolverLength::Points(10.0)))
            .unwrap();
        let size = [
            StyleProperty::Width(SolverLength::Points(10.0)),
            StyleProperty::Height(SolverLength::Points(10.0)),
        ];
        let node = child(&mut solver, root, &size);

        solver.calculate_layout(root, 100.0, 10.0, LayoutDirection::Rtl).unwrap();
        assert_eq!(solver.computed_layout(node).unwrap().left, 90.0);

        // edges are restored for the next ltr pass
        solver.calculate_layout(root, 100.0, 10.0, LayoutDirection::Ltr).unwrap();
        assert_eq!(solver.computed_layout(node).unwrap().left, 10.0);
    }

    #[test]
    fn test_rtl_right_margin_stays_right() {
        let (mut solver, root) = setup();
        solver.set_style(root, StyleProperty::FlexDirection(FlexDirection::Row)).unwrap();
        let node = child(
            &mut solver,
            root,
            &[
                StyleProperty::Width(SolverLength::Points(10.0)),
                StyleProperty::Height(SolverLength::Points(10.0)),
                StyleProperty::Margin(Edge::Right, SolverLength::Points(5.0)),
            ],
        );

        solver.calculate_layout(root, 100.0, 10.0, LayoutDirection::Rtl).unwrap();

        assert_eq!(solver.computed_layout(node).unwrap().left, 85.0);
    }

    #[test]
    fn test_measure_func() {
        let (mut solver, root) = setup();
        solver.set_style(root, StyleProperty::AlignItems(Align::FlexStart)).unwrap();
        let node = child(&mut solver, root, &[]);
        solver
            .set_measure_func(
                node,
                Some(MeasureFunc::new(|_| MeasuredSize {
                    width: Some(12.0),
                    height: Some(7.0),
                })),
            )
            .unwrap();

        solver.calculate_layout(root, 100.0, 100.0, LayoutDirection::Ltr).unwrap();

        let layout = solver.computed_layout(node).unwrap();
        assert_eq!(layout.width, 12.0);
        assert_eq!(layout.height, 7.0);
    }

    #[test]
    fn test_aspect_ratio() {
        let (mut solver, root) = setup();
        solver.set_style(root, StyleProperty::AlignItems(Align::FlexStart)).unwrap();
        let node = child(
            &mut solver,
            root,
            &[
                StyleProperty::Width(SolverLength::Points(20.0)),
                StyleProperty::AspectRatio(2.0),
            ],
        );

        solver.calculate_layout(root, 100.0, 100.0, LayoutDirection::Ltr).unwrap();

        assert_eq!(solver.computed_layout(node).unwrap().height, 10.0);
    }

    #[test]
    fn test_unsupported_values() {
        let (mut solver, root) = setup();

        let err = solver
            .set_style(root, StyleProperty::AlignItems(Align::SpaceBetween))
            .unwrap_err();
        assert!(matches!(err, FlexError::UnsupportedStyle { property: "alignItems", .. }));

        let err = solver
            .set_style(root, StyleProperty::Padding(Edge::Left, SolverLength::Auto))
            .unwrap_err();
        assert!(matches!(err, FlexError::UnsupportedStyle { property: "padding", .. }));
    }

    #[test]
    fn test_children_order_and_removal() {
        let (mut solver, root) = setup();
        let a = child(&mut solver, root, &[]);
        let b = child(&mut solver, root, &[]);
        let c = solver.create_node().unwrap();
        solver.insert_child(root, c, 0).unwrap();

        assert_eq!(solver.children(root).unwrap(), vec![c, a, b]);
        assert_eq!(solver.parent(a), Some(root));

        solver.remove_child(root, a).unwrap();
        assert_eq!(solver.children(root).unwrap(), vec![c, b]);
        assert_eq!(solver.parent(a), None);

        // out of range index appends
        solver.insert_child(root, a, 99).unwrap();
        assert_eq!(solver.children(root).unwrap(), vec![c, b, a]);
    }

    #[test]
    fn test_unknown_node() {
        let (mut solver, root) = setup();
        let node = child(&mut solver, root, &[]);
        solver.remove_node(node).unwrap();

        assert_eq!(solver.node_count(), 1);
        assert_eq!(
            solver.set_style(node, StyleProperty::FlexGrow(1.0)),
            Err(FlexError::UnknownNode(node))
        );
        assert!(solver.computed_layout(node).is_err());
        assert!(solver.children(root).unwrap().is_empty());
    }

    #[test]
    fn test_dimension_conversion() {
        assert!(matches!(to_taffy_dimension(SolverLength::Auto), TaffyDimension::Auto));
        assert!(matches!(
            to_taffy_dimension(SolverLength::Points(50.0)),
            TaffyDimension::Length(50.0)
        ));
        // Percent: 50% → 0.5
        if let TaffyDimension::Percent(p) = to_taffy_dimension(SolverLength::Percent(50.0)) {
            assert!((p - 0.5).abs() < 0.001);
        } else {
            panic!("Expected Percent variant");
        }
    }
}
