//! Solver Binding - FlexProperties → solver setter calls.
//!
//! Lengths are multiplied by the container's scale factor on the way in;
//! grow, shrink and aspect ratio are ratios and pass through untouched.
//! Only present properties are applied. A setter the solver rejects is
//! logged and skipped so the remaining properties still land.

use crate::engine::FlexProperties;
use crate::types::Dimension;

use super::solver::{LayoutNode, Solver, SolverLength, StyleProperty};
use super::types::{MeasureFunc, MeasuredSize};

/// Convert a logical dimension into a solver length.
pub fn to_solver_length(dimension: Dimension, scale_factor: f32) -> SolverLength {
    match dimension {
        Dimension::Auto => SolverLength::Auto,
        Dimension::Units(v) => SolverLength::Points(v * scale_factor),
        Dimension::Percent(p) => SolverLength::Percent(p),
    }
}

/// Setter calls for every present property, in application order.
pub fn style_properties(props: &FlexProperties, scale_factor: f32) -> Vec<StyleProperty> {
    let len = |d: Dimension| to_solver_length(d, scale_factor);
    let mut out = Vec::new();

    if let Some(dir) = props.flex_direction {
        out.push(StyleProperty::FlexDirection(dir));
    }
    if let Some(wrap) = props.flex_wrap {
        out.push(StyleProperty::FlexWrap(wrap));
    }
    if let Some(justify) = props.justify_content {
        out.push(StyleProperty::JustifyContent(justify));
    }
    if let Some(align) = props.align_items {
        out.push(StyleProperty::AlignItems(align));
    }
    if let Some(align) = props.align_content {
        out.push(StyleProperty::AlignContent(align));
    }
    if let Some(align) = props.align_self {
        out.push(StyleProperty::AlignSelf(align));
    }

    if let Some(basis) = props.flex_basis {
        out.push(StyleProperty::FlexBasis(len(basis)));
    }
    if let Some(grow) = props.flex_grow {
        out.push(StyleProperty::FlexGrow(grow));
    }
    if let Some(shrink) = props.flex_shrink {
        out.push(StyleProperty::FlexShrink(shrink));
    }

    let sizes = [
        (props.width, StyleProperty::Width as fn(SolverLength) -> StyleProperty),
        (props.height, StyleProperty::Height),
        (props.min_width, StyleProperty::MinWidth),
        (props.max_width, StyleProperty::MaxWidth),
        (props.min_height, StyleProperty::MinHeight),
        (props.max_height, StyleProperty::MaxHeight),
    ];
    for (value, setter) in sizes {
        if let Some(value) = value {
            out.push(setter(len(value)));
        }
    }

    out.extend(props.margin.entries().map(|(edge, v)| StyleProperty::Margin(edge, len(v))));
    out.extend(props.padding.entries().map(|(edge, v)| StyleProperty::Padding(edge, len(v))));

    if let Some(ratio) = props.aspect_ratio {
        out.push(StyleProperty::AspectRatio(ratio));
    }

    out
}

/// Wrap a logical-unit measure callback so it speaks solver units.
pub fn scaled_measure(measure: &MeasureFunc, scale_factor: f32) -> MeasureFunc {
    let inner = measure.clone();
    MeasureFunc::new(move |mut request| {
        request.width /= scale_factor;
        request.height /= scale_factor;
        let measured = inner.call(request);
        MeasuredSize {
            width: measured.width.map(|w| w * scale_factor),
            height: measured.height.map(|h| h * scale_factor),
        }
    })
}

/// Apply every present property of `props` to `node`.
///
/// Returns the number of setters the solver accepted.
pub fn apply_properties(
    solver: &mut dyn Solver,
    node: LayoutNode,
    props: &FlexProperties,
    scale_factor: f32,
) -> usize {
    let mut applied = 0;

    for property in style_properties(props, scale_factor) {
        match solver.set_style(node, property) {
            Ok(()) => applied += 1,
            Err(err) => log::warn!("dropping {} on {node:?}: {err}", property.name()),
        }
    }

    if let Some(measure) = &props.measure {
        match solver.set_measure_func(node, Some(scaled_measure(measure, scale_factor))) {
            Ok(()) => applied += 1,
            Err(err) => log::warn!("dropping measure function on {node:?}: {err}"),
        }
    }

    applied
}

/// Write an explicit size straight to the node, bypassing the property record.
///
/// `None` leaves that axis untouched.
pub fn apply_size(
    solver: &mut dyn Solver,
    node: LayoutNode,
    width: Option<f32>,
    height: Option<f32>,
    scale_factor: f32,
) {
    let width = width.map(|w| StyleProperty::Width(SolverLength::Points(w * scale_factor)));
    let height = height.map(|h| StyleProperty::Height(SolverLength::Points(h * scale_factor)));
    for property in width.into_iter().chain(height) {
        if let Err(err) = solver.set_style(node, property) {
            log::warn!("dropping {} on {node:?}: {err}", property.name());
        }
    }
}
