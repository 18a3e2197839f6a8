//! Flex Container - root of a layout in 3D space.
//!
//! Owns the solver, the item registry and the reflow scheduler. Items reach
//! it through a [`FlexContext`], a weak handle that turns into a logged
//! no-op once the container is gone.
//!
//! # Example
//!
//! ```ignore
//! use spark_flex3d::prelude::*;
//!
//! let container = FlexContainer::new(
//!     Box::new(TaffySolver::new()),
//!     ContainerConfig::new()
//!         .with_size([9.0, 1.0, 1.0])
//!         .with_props(FlexProperties::new().with_direction(FlexDirection::Row)),
//! )?;
//!
//! let item = FlexItem::mount(
//!     &container.handle(),
//!     ItemConfig::new(FlexProperties::new().with_grow(1.0))
//!         .on_transform_update(|t| println!("{} {} {}x{}", t.x, t.y, t.width, t.height)),
//! );
//!
//! // From the host's frame loop:
//! container.tick();
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use glam::Vec3;

use crate::engine::{diff, FlexProperties, LayoutRegistry};
use crate::error::{FlexError, Result};
use crate::layout::binding::{apply_properties, apply_size};
use crate::layout::mapper::flex_2d_size;
use crate::layout::{BoxTransform, LayoutNode, Plane, Solver, TransformCallback};
use crate::pipeline::{run_pass, Clock, ReflowParams, ReflowScheduler, SystemClock};
use crate::types::LayoutDirection;

use super::types::{ContainerConfig, ReflowCallback, DEFAULT_SCALE_FACTOR};

/// Fall back to the default for zero, negative or non-finite factors.
fn checked_scale_factor(scale_factor: f32) -> f32 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        log::warn!("invalid scale factor {scale_factor}, using {DEFAULT_SCALE_FACTOR}");
        DEFAULT_SCALE_FACTOR
    }
}

// =============================================================================
// Container State
// =============================================================================

pub(crate) struct ContainerState {
    solver: Box<dyn Solver>,
    registry: LayoutRegistry,
    scheduler: ReflowScheduler,
    root: LayoutNode,
    size: Vec3,
    plane: Plane,
    direction: LayoutDirection,
    scale_factor: f32,
    center_anchor: bool,
    props: FlexProperties,
    on_reflow_complete: Option<ReflowCallback>,
}

impl ContainerState {
    fn params(&self) -> ReflowParams {
        ReflowParams {
            root: self.root,
            plane: self.plane,
            scale_factor: self.scale_factor,
            flex_size: flex_2d_size(self.size, self.plane),
            direction: self.direction,
            center_anchor: self.center_anchor,
        }
    }

    fn request_reflow(&mut self) {
        if self.scheduler.request() {
            log::trace!("reflow requested");
        }
    }
}

// =============================================================================
// Context
// =============================================================================

/// Weak handle to a container, shared by everything mounted in it.
#[derive(Clone)]
pub struct FlexContext {
    state: Weak<RefCell<ContainerState>>,
}

impl FlexContext {
    /// Whether the container is still alive.
    pub fn is_alive(&self) -> bool {
        self.state.strong_count() > 0
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ContainerState) -> Result<R>) -> Result<R> {
        let state = self.state.upgrade().ok_or(FlexError::ContainerUnmounted)?;
        let mut state = state.borrow_mut();
        f(&mut state)
    }

    /// Schedule a pass. Without a live container this only logs.
    pub fn request_reflow(&self) {
        if let Err(err) = self.with_state(|s| {
            s.request_reflow();
            Ok(())
        }) {
            log::warn!("reflow request ignored: {err}");
        }
    }

    /// Append `node` under `parent` and schedule a pass.
    pub fn register_box(&self, node: LayoutNode, parent: LayoutNode) -> Result<()> {
        self.with_state(|s| {
            s.registry.register(s.solver.as_mut(), node, parent)?;
            s.request_reflow();
            Ok(())
        })
    }

    /// Update ordering key, callback and anchoring of `node`, and schedule a
    /// pass.
    pub fn update_box(
        &self,
        node: LayoutNode,
        index: Option<i32>,
        on_update: Option<TransformCallback>,
        center_anchor: bool,
    ) -> Result<()> {
        self.with_state(|s| {
            s.registry.update(node, index, on_update, center_anchor)?;
            s.request_reflow();
            Ok(())
        })
    }

    /// Forget `node`, free it and schedule a pass.
    pub fn unregister_box(&self, node: LayoutNode) -> Result<()> {
        self.with_state(|s| {
            s.registry.unregister(s.solver.as_mut(), node)?;
            s.request_reflow();
            Ok(())
        })
    }

    pub fn scale_factor(&self) -> Result<f32> {
        self.with_state(|s| Ok(s.scale_factor))
    }

    pub fn plane(&self) -> Result<Plane> {
        self.with_state(|s| Ok(s.plane))
    }

    pub(crate) fn create_node(&self) -> Result<LayoutNode> {
        self.with_state(|s| s.solver.create_node())
    }

    /// Free a node that never made it into the registry.
    pub(crate) fn discard_node(&self, node: LayoutNode) -> Result<()> {
        self.with_state(|s| s.solver.remove_node(node))
    }

    /// Push properties to the solver node and record them for readback.
    pub(crate) fn apply_properties(&self, node: LayoutNode, props: &FlexProperties) -> Result<()> {
        self.with_state(|s| {
            apply_properties(s.solver.as_mut(), node, props, s.scale_factor);
            s.registry.set_properties(node, props.clone())
        })
    }

    pub(crate) fn clear_measure(&self, node: LayoutNode) -> Result<()> {
        self.with_state(|s| s.solver.set_measure_func(node, None))
    }

    pub(crate) fn apply_size(&self, node: LayoutNode, width: Option<f32>, height: Option<f32>) -> Result<()> {
        self.with_state(|s| {
            s.registry.set_size(node, width, height)?;
            apply_size(s.solver.as_mut(), node, width, height, s.scale_factor);
            s.request_reflow();
            Ok(())
        })
    }

    pub(crate) fn last_transform(&self, node: LayoutNode) -> Result<Option<BoxTransform>> {
        self.with_state(|s| Ok(s.registry.get(node).and_then(|e| e.last)))
    }
}

impl fmt::Debug for FlexContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlexContext").field("alive", &self.is_alive()).finish()
    }
}

/// Where a new item attaches: a container's root or another item.
#[derive(Debug, Clone)]
pub struct ParentHandle {
    pub(crate) context: FlexContext,
    pub(crate) node: LayoutNode,
}

impl ParentHandle {
    pub fn context(&self) -> &FlexContext {
        &self.context
    }

    pub fn node(&self) -> LayoutNode {
        self.node
    }
}

// =============================================================================
// Container
// =============================================================================

pub struct FlexContainer {
    state: Rc<RefCell<ContainerState>>,
}

impl FlexContainer {
    /// Create a container on the wall clock.
    pub fn new(solver: Box<dyn Solver>, config: ContainerConfig) -> Result<Self> {
        Self::with_clock(solver, config, Rc::new(SystemClock::new()))
    }

    /// Create a container whose scheduler reads `clock`.
    pub fn with_clock(mut solver: Box<dyn Solver>, config: ContainerConfig, clock: Rc<dyn Clock>) -> Result<Self> {
        let scale_factor = checked_scale_factor(config.scale_factor);
        let root = solver.create_node()?;
        apply_properties(solver.as_mut(), root, &config.props, scale_factor);

        let mut scheduler = ReflowScheduler::new(clock, config.max_updates_per_second);
        scheduler.request();

        log::debug!(
            "container mounted: size {:?} on {} at scale {}",
            config.size,
            config.plane,
            scale_factor
        );

        Ok(Self {
            state: Rc::new(RefCell::new(ContainerState {
                solver,
                registry: LayoutRegistry::new(),
                scheduler,
                root,
                size: config.size,
                plane: config.plane,
                direction: config.direction,
                scale_factor,
                center_anchor: config.center_anchor,
                props: config.props,
                on_reflow_complete: config.on_reflow_complete,
            })),
        })
    }

    pub fn context(&self) -> FlexContext {
        FlexContext {
            state: Rc::downgrade(&self.state),
        }
    }

    /// Handle for mounting top-level items.
    pub fn handle(&self) -> ParentHandle {
        ParentHandle {
            context: self.context(),
            node: self.root(),
        }
    }

    pub fn root(&self) -> LayoutNode {
        self.state.borrow().root
    }

    // =========================================================================
    // Driving
    // =========================================================================

    /// Run the pending pass if its deadline has passed. Returns whether a
    /// pass ran.
    pub fn tick(&self) -> bool {
        let due = self.state.borrow_mut().scheduler.take_due();
        if due {
            self.reflow();
        }
        due
    }

    /// Run the pending pass now, ignoring its deadline.
    pub fn flush(&self) -> bool {
        let pending = self.state.borrow_mut().scheduler.take_pending();
        if pending {
            self.reflow();
        }
        pending
    }

    pub fn request_reflow(&self) {
        self.state.borrow_mut().request_reflow();
    }

    pub fn is_reflow_pending(&self) -> bool {
        self.state.borrow().scheduler.is_pending()
    }

    /// Passes run so far.
    pub fn passes(&self) -> u64 {
        self.state.borrow().scheduler.passes()
    }

    fn reflow(&self) {
        let (outcome, on_complete) = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            let params = state.params();
            match run_pass(state.solver.as_mut(), &mut state.registry, &params) {
                Ok(outcome) => (outcome, state.on_reflow_complete.clone()),
                Err(err) => {
                    log::warn!("reflow failed: {err}");
                    return;
                }
            }
        };

        for update in outcome.updates {
            let Some(callback) = update.callback else { continue };
            // An earlier callback may have unmounted this item.
            if !self.state.borrow().registry.contains(update.node) {
                continue;
            }
            callback(&update.transform);
        }

        if let Some(on_complete) = on_complete {
            on_complete(outcome.total_width, outcome.total_height);
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn size(&self) -> Vec3 {
        self.state.borrow().size
    }

    pub fn set_size(&self, size: impl Into<Vec3>) {
        let size = size.into();
        let mut state = self.state.borrow_mut();
        if state.size != size {
            state.size = size;
            state.request_reflow();
        }
    }

    pub fn plane(&self) -> Plane {
        self.state.borrow().plane
    }

    pub fn set_plane(&self, plane: Plane) {
        let mut state = self.state.borrow_mut();
        if state.plane != plane {
            state.plane = plane;
            state.request_reflow();
        }
    }

    pub fn direction(&self) -> LayoutDirection {
        self.state.borrow().direction
    }

    pub fn set_direction(&self, direction: LayoutDirection) {
        let mut state = self.state.borrow_mut();
        if state.direction != direction {
            state.direction = direction;
            state.request_reflow();
        }
    }

    pub fn scale_factor(&self) -> f32 {
        self.state.borrow().scale_factor
    }

    /// Change the scale factor. Every node's lengths, explicit sizes
    /// included, are re-applied at the new scale.
    pub fn set_scale_factor(&self, scale_factor: f32) {
        let scale_factor = checked_scale_factor(scale_factor);
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        if state.scale_factor == scale_factor {
            return;
        }
        state.scale_factor = scale_factor;

        apply_properties(state.solver.as_mut(), state.root, &state.props, scale_factor);
        for (node, _) in state.registry.traversal(state.root) {
            if let Some(entry) = state.registry.get(node) {
                apply_properties(state.solver.as_mut(), node, &entry.props, scale_factor);
                let (width, height) = entry.size;
                apply_size(state.solver.as_mut(), node, width, height, scale_factor);
            }
        }
        state.request_reflow();
    }

    pub fn set_max_updates_per_second(&self, max_updates_per_second: f32) {
        self.state
            .borrow_mut()
            .scheduler
            .set_max_updates_per_second(max_updates_per_second);
    }

    pub fn set_center_anchor(&self, center_anchor: bool) {
        let mut state = self.state.borrow_mut();
        if state.center_anchor != center_anchor {
            state.center_anchor = center_anchor;
            state.request_reflow();
        }
    }

    /// Replace the root's flex style. Nothing happens if it is unchanged.
    pub fn set_props(&self, props: FlexProperties) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        if diff(&state.props, &props).is_empty() {
            return;
        }
        apply_properties(state.solver.as_mut(), state.root, &props, state.scale_factor);
        state.props = props;
        state.request_reflow();
    }

    pub fn props(&self) -> FlexProperties {
        self.state.borrow().props.clone()
    }

    pub fn set_on_reflow_complete(&self, callback: Option<ReflowCallback>) {
        self.state.borrow_mut().on_reflow_complete = callback;
    }

    /// Number of registered items, nested ones included.
    pub fn item_count(&self) -> usize {
        self.state.borrow().registry.len()
    }

    /// Tear the container down. Pending work is cancelled and every context
    /// handed out turns into a no-op.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for FlexContainer {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.scheduler.cancel();
            state.registry.clear();
        }
        log::debug!("container unmounted");
    }
}

impl fmt::Debug for FlexContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("FlexContainer")
            .field("root", &state.root)
            .field("size", &state.size)
            .field("plane", &state.plane)
            .field("direction", &state.direction)
            .field("scale_factor", &state.scale_factor)
            .field("items", &state.registry.len())
            .field("scheduler", &state.scheduler)
            .finish_non_exhaustive()
    }
}
