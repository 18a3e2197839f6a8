//! Reflow Pass - one synchronous layout of a whole container.
//!
//! 1. re-resolve child order under dirty parents
//! 2. run the solver at `flex size * scale`
//! 3. read every registered box back, letting explicit widths/heights win
//! 4. map each box onto the container plane, in logical units
//! 5. track the bounding extent of all boxes
//!
//! Callbacks are not invoked here. The pass returns the updates so the
//! caller can run them after releasing its own state.

use std::collections::HashMap;

use crate::engine::LayoutRegistry;
use crate::error::Result;
use crate::layout::mapper::{box_position, compose};
use crate::layout::{BoxTransform, ComputedBox, LayoutNode, Plane, Solver, TransformCallback};
use crate::types::LayoutDirection;

/// Container-wide inputs of a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflowParams {
    pub root: LayoutNode,
    pub plane: Plane,
    pub scale_factor: f32,
    /// Container extent projected on the plane, logical units.
    pub flex_size: (f32, f32),
    pub direction: LayoutDirection,
    /// Shift top-level items so the container's center sits at the origin.
    pub center_anchor: bool,
}

/// Result for one item.
pub struct ReflowUpdate {
    pub node: LayoutNode,
    pub transform: BoxTransform,
    pub callback: Option<TransformCallback>,
}

/// Everything a pass produced.
#[derive(Default)]
pub struct ReflowOutcome {
    pub updates: Vec<ReflowUpdate>,
    /// Bounding extent of all boxes, logical units.
    pub total_width: f32,
    pub total_height: f32,
}

#[derive(Debug, Default, Clone, Copy)]
struct Extent {
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
}

impl Extent {
    fn include(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.min_x = self.min_x.min(left);
        self.min_y = self.min_y.min(top);
        self.max_x = self.max_x.max(left + width);
        self.max_y = self.max_y.max(top + height);
    }
}

/// Run one pass over every item reachable from `params.root`.
pub fn run_pass(
    solver: &mut dyn Solver,
    registry: &mut LayoutRegistry,
    params: &ReflowParams,
) -> Result<ReflowOutcome> {
    let scale = params.scale_factor;
    let moves = registry.resolve(solver);

    let (flex_width, flex_height) = params.flex_size;
    solver.calculate_layout(params.root, flex_width * scale, flex_height * scale, params.direction)?;

    let root_shift = if params.center_anchor {
        compose(params.plane, -flex_width / 2.0, flex_height / 2.0, 0.0)
    } else {
        glam::Vec3::ZERO
    };

    let mut origins: HashMap<LayoutNode, (f32, f32)> = HashMap::new();
    origins.insert(params.root, (0.0, 0.0));
    let mut extent = Extent::default();
    let mut outcome = ReflowOutcome::default();

    for (node, parent) in registry.traversal(params.root) {
        let computed = match solver.computed_layout(node) {
            Ok(computed) => computed,
            Err(err) => {
                log::warn!("no layout for {node:?}: {err}");
                continue;
            }
        };
        let Some(entry) = registry.get_mut(node) else { continue };

        let (explicit_width, explicit_height) = entry.props.explicit_size();
        let layout = ComputedBox {
            width: explicit_width.map_or(computed.width, |w| w * scale),
            height: explicit_height.map_or(computed.height, |h| h * scale),
            ..computed
        };

        let mut position = box_position(&layout, params.plane, scale, entry.center_anchor);
        if parent == params.root {
            position += root_shift;
        }

        let transform = BoxTransform {
            x: position.x,
            y: position.y,
            z: position.z,
            width: layout.width / scale,
            height: layout.height / scale,
        }
        .sanitized();
        entry.last = Some(transform);

        let (origin_x, origin_y) = origins.get(&parent).copied().unwrap_or_default();
        let (abs_left, abs_top) = (origin_x + layout.left, origin_y + layout.top);
        origins.insert(node, (abs_left, abs_top));
        extent.include(abs_left, abs_top, layout.width, layout.height);

        outcome.updates.push(ReflowUpdate {
            node,
            transform,
            callback: entry.on_update.clone(),
        });
    }

    let fix = |v: f32| if v.is_nan() { 0.0 } else { v };
    outcome.total_width = fix((extent.max_x - extent.min_x) / scale);
    outcome.total_height = fix((extent.max_y - extent.min_y) / scale);

    log::debug!(
        "reflow: {} items, {moves} moves, extent {}x{}",
        outcome.updates.len(),
        outcome.total_width,
        outcome.total_height
    );
    Ok(outcome)
}
