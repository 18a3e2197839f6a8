//! Flex Item - a box positioned by its container.
//!
//! An item owns one solver node under an explicit parent (the container's
//! root or another item). Property changes are diffed against the last
//! applied set so unchanged updates cost nothing; any real change is pushed
//! to the solver and schedules a pass. Results arrive through the
//! `on_transform_update` callback after each pass.
//!
//! Dropping an item unregisters it.

use std::fmt;

use glam::Mat4;

use crate::engine::{diff, FlexProperties, PropertyChanges};
use crate::error::Result;
use crate::layout::mapper::flex_2d_size;
use crate::layout::{BoxTransform, LayoutNode, TransformCallback};
use crate::types::Dimension;

use super::container::{FlexContext, ParentHandle};
use super::measure::{obb_extent, uniform_world_scale, Aabb};
use super::types::ItemConfig;

pub struct FlexItem {
    context: FlexContext,
    /// `None` when mounted without a live container.
    node: Option<LayoutNode>,
    props: FlexProperties,
    index: Option<i32>,
    center_anchor: bool,
    on_transform_update: Option<TransformCallback>,
}

impl FlexItem {
    /// Create the item's node under `parent` and register it.
    ///
    /// Without a live container the item is inert: every operation logs and
    /// does nothing.
    pub fn mount(parent: &ParentHandle, config: ItemConfig) -> Self {
        let context = parent.context.clone();
        let node = match Self::attach(&context, parent.node, &config.props) {
            Ok(node) => Some(node),
            Err(err) => {
                log::warn!("flex item not mounted: {err}");
                None
            }
        };

        let item = Self {
            context,
            node,
            props: config.props,
            index: config.index,
            center_anchor: config.center_anchor,
            on_transform_update: config.on_transform_update,
        };
        item.sync_entry();
        item
    }

    fn attach(context: &FlexContext, parent: LayoutNode, props: &FlexProperties) -> Result<LayoutNode> {
        let node = context.create_node()?;
        if let Err(err) = context.register_box(node, parent) {
            if let Err(discard) = context.discard_node(node) {
                log::warn!("failed to free unregistered {node:?}: {discard}");
            }
            return Err(err);
        }
        context.apply_properties(node, props)?;
        Ok(node)
    }

    /// Push ordering key, callback and anchoring to the registry.
    fn sync_entry(&self) {
        let Some(node) = self.node else { return };
        if let Err(err) = self.context.update_box(
            node,
            self.index,
            self.on_transform_update.clone(),
            self.center_anchor,
        ) {
            log::warn!("flex item update dropped: {err}");
        }
    }

    fn live_node(&self) -> Option<LayoutNode> {
        if self.node.is_none() {
            log::warn!("operation on a flex item without a container");
        }
        self.node
    }

    /// Handle for mounting children under this item.
    pub fn handle(&self) -> Option<ParentHandle> {
        self.node.map(|node| ParentHandle {
            context: self.context.clone(),
            node,
        })
    }

    pub fn node(&self) -> Option<LayoutNode> {
        self.node
    }

    pub fn props(&self) -> &FlexProperties {
        &self.props
    }

    /// Replace the item's flex style.
    ///
    /// Returns which property groups changed; an empty set means nothing
    /// was re-applied. Keys dropped from the new set keep their last solver
    /// value, except the measure function which is cleared.
    pub fn set_properties(&mut self, props: FlexProperties) -> PropertyChanges {
        let changes = diff(&self.props, &props);
        if changes.is_empty() {
            return changes;
        }
        let Some(node) = self.live_node() else { return changes };

        if self.props.measure.is_some() && props.measure.is_none() {
            if let Err(err) = self.context.clear_measure(node) {
                log::warn!("failed to clear measure function: {err}");
            }
        }
        if let Err(err) = self.context.apply_properties(node, &props) {
            log::warn!("flex properties dropped: {err}");
        }
        self.props = props;
        self.sync_entry();
        changes
    }

    pub fn set_index(&mut self, index: Option<i32>) {
        if self.index != index {
            self.index = index;
            self.sync_entry();
        }
    }

    pub fn set_center_anchor(&mut self, center_anchor: bool) {
        if self.center_anchor != center_anchor {
            self.center_anchor = center_anchor;
            self.sync_entry();
        }
    }

    pub fn set_on_transform_update(&mut self, callback: Option<TransformCallback>) {
        self.on_transform_update = callback;
        self.sync_entry();
    }

    /// Write width and height (logical units) straight to the node and
    /// schedule a pass.
    pub fn set_size(&self, width: f32, height: f32) {
        self.write_size(Some(width), Some(height));
    }

    fn write_size(&self, width: Option<f32>, height: Option<f32>) {
        let Some(node) = self.live_node() else { return };
        if let Err(err) = self.context.apply_size(node, width, height) {
            log::warn!("size update dropped: {err}");
        }
    }

    /// Size the node from geometry bounds (local space) under a uniformly
    /// scaled world transform.
    pub fn sync_geometry_size(&self, bounds: &Aabb, world: &Mat4) -> Result<(f32, f32)> {
        let scale = uniform_world_scale(world)?;
        let plane = self.context.plane()?;
        let (width, height) = flex_2d_size(bounds.size() * scale, plane);
        self.set_size(width, height);
        Ok((width, height))
    }

    /// Size the node from its content's bounds as seen from `reference_world`.
    ///
    /// Axes with an authored width/height (anything but auto) are left
    /// alone. Returns the measured size along the container plane.
    pub fn measure_content(
        &self,
        bounds: &Aabb,
        content_world: &Mat4,
        reference_world: &Mat4,
    ) -> Result<(f32, f32)> {
        let plane = self.context.plane()?;
        let (width, height) = flex_2d_size(obb_extent(bounds, content_world, reference_world), plane);

        let authored = |d: Option<Dimension>| d.is_some_and(|d| d != Dimension::Auto);
        let width_free = !authored(self.props.width);
        let height_free = !authored(self.props.height);

        if width_free || height_free {
            self.write_size(width_free.then_some(width), height_free.then_some(height));
        }
        Ok((width, height))
    }

    /// Transform reported by the most recent pass.
    pub fn transform(&self) -> Option<BoxTransform> {
        let node = self.node?;
        self.context.last_transform(node).ok().flatten()
    }

    /// Width and height reported by the most recent pass, zero before any.
    pub fn size(&self) -> (f32, f32) {
        self.transform().map_or((0.0, 0.0), |t| (t.width, t.height))
    }

    /// Unregister now instead of on drop.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for FlexItem {
    fn drop(&mut self) {
        let Some(node) = self.node.take() else { return };
        if let Err(err) = self.context.unregister_box(node) {
            log::debug!("flex item dropped after its container: {err}");
        }
    }
}

impl fmt::Debug for FlexItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlexItem")
            .field("node", &self.node)
            .field("index", &self.index)
            .field("center_anchor", &self.center_anchor)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}
