//! Primitive types - container and item configuration.
//!
//! Both configs are plain structs with `Default` values, so callers can
//! write `ContainerConfig { plane: Plane::Yz, ..Default::default() }` or
//! chain the `with_*` helpers.

use std::fmt;
use std::rc::Rc;

use glam::Vec3;

use crate::engine::FlexProperties;
use crate::layout::{BoxTransform, Plane};
use crate::pipeline::DEFAULT_MAX_UPDATES_PER_SECOND;
use crate::types::LayoutDirection;

pub use crate::layout::{ReflowCallback, TransformCallback};

pub const DEFAULT_SCALE_FACTOR: f32 = 100.0;

// =============================================================================
// Container Config
// =============================================================================

#[derive(Clone)]
pub struct ContainerConfig {
    /// Extent of the container in world units. Two of the three components
    /// are used, picked by `plane`.
    pub size: Vec3,
    pub plane: Plane,
    pub direction: LayoutDirection,
    /// Solver units per logical unit.
    pub scale_factor: f32,
    pub max_updates_per_second: f32,
    /// Report positions relative to the container's center instead of its
    /// top-left corner.
    pub center_anchor: bool,
    /// Flex style of the root node.
    pub props: FlexProperties,
    /// Called after every pass with the total extent in logical units.
    pub on_reflow_complete: Option<ReflowCallback>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            size: Vec3::ONE,
            plane: Plane::Xy,
            direction: LayoutDirection::Ltr,
            scale_factor: DEFAULT_SCALE_FACTOR,
            max_updates_per_second: DEFAULT_MAX_UPDATES_PER_SECOND,
            center_anchor: false,
            props: FlexProperties::default(),
            on_reflow_complete: None,
        }
    }
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: impl Into<Vec3>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_plane(mut self, plane: Plane) -> Self {
        self.plane = plane;
        self
    }

    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_max_updates_per_second(mut self, max_updates_per_second: f32) -> Self {
        self.max_updates_per_second = max_updates_per_second;
        self
    }

    pub fn with_center_anchor(mut self, center_anchor: bool) -> Self {
        self.center_anchor = center_anchor;
        self
    }

    pub fn with_props(mut self, props: FlexProperties) -> Self {
        self.props = props;
        self
    }

    pub fn on_reflow_complete(mut self, callback: impl Fn(f32, f32) + 'static) -> Self {
        self.on_reflow_complete = Some(Rc::new(callback));
        self
    }
}

impl fmt::Debug for ContainerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerConfig")
            .field("size", &self.size)
            .field("plane", &self.plane)
            .field("direction", &self.direction)
            .field("scale_factor", &self.scale_factor)
            .field("max_updates_per_second", &self.max_updates_per_second)
            .field("center_anchor", &self.center_anchor)
            .field("props", &self.props)
            .field("on_reflow_complete", &self.on_reflow_complete.is_some())
            .finish()
    }
}

// =============================================================================
// Item Config
// =============================================================================

#[derive(Clone, Default)]
pub struct ItemConfig {
    pub props: FlexProperties,
    /// Report the box center instead of its top-left corner.
    pub center_anchor: bool,
    /// Explicit position among siblings.
    pub index: Option<i32>,
    pub on_transform_update: Option<TransformCallback>,
}

impl ItemConfig {
    pub fn new(props: FlexProperties) -> Self {
        Self { props, ..Default::default() }
    }

    pub fn with_center_anchor(mut self, center_anchor: bool) -> Self {
        self.center_anchor = center_anchor;
        self
    }

    pub fn with_index(mut self, index: i32) -> Self {
        self.index = Some(index);
        self
    }

    pub fn on_transform_update(mut self, callback: impl Fn(&BoxTransform) + 'static) -> Self {
        self.on_transform_update = Some(Rc::new(callback));
        self
    }
}

impl fmt::Debug for ItemConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemConfig")
            .field("props", &self.props)
            .field("center_anchor", &self.center_anchor)
            .field("index", &self.index)
            .field("on_transform_update", &self.on_transform_update.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_defaults() {
        let config = ContainerConfig::default();
        assert_eq!(config.size, Vec3::ONE);
        assert_eq!(config.plane, Plane::Xy);
        assert_eq!(config.direction, LayoutDirection::Ltr);
        assert_eq!(config.scale_factor, 100.0);
        assert_eq!(config.max_updates_per_second, 10.0);
        assert!(!config.center_anchor);
    }

    #[test]
    fn test_container_builders() {
        let config = ContainerConfig::new()
            .with_size([1.0, 5.0, 7.0])
            .with_plane(Plane::Yz)
            .on_reflow_complete(|_, _| {});

        assert_eq!(config.size, Vec3::new(1.0, 5.0, 7.0));
        assert_eq!(config.plane, Plane::Yz);
        assert!(config.on_reflow_complete.is_some());
    }

    #[test]
    fn test_item_builders() {
        let config = ItemConfig::default().with_index(2).with_center_anchor(true);
        assert_eq!(config.index, Some(2));
        assert!(config.center_anchor);
        assert!(config.on_transform_update.is_none());
    }
}
