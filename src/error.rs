//! Error type shared by the solver binding, registry and item measurement.

use thiserror::Error;

use crate::layout::LayoutNode;

/// Errors produced while building or measuring a flex layout.
///
/// Most of these are recovered from locally (logged and skipped). Only
/// [`FlexError::NonUniformScale`] is meant to stop the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlexError {
    /// The node is not known to the solver or registry.
    #[error("layout node {0:?} is not registered")]
    UnknownNode(LayoutNode),

    /// The solver backend rejected an operation.
    #[error("solver error: {0}")]
    Solver(String),

    /// The solver cannot express this style value.
    #[error("solver does not support {property}: {reason}")]
    UnsupportedStyle {
        property: &'static str,
        reason: String,
    },

    /// A string-keyed property has no mapping.
    #[error("unknown flex property `{0}`")]
    UnmappedProperty(String),

    /// A property value could not be parsed.
    #[error("invalid value `{value}` for {property}")]
    InvalidValue { property: String, value: String },

    /// Auto-measurement requires uniform world scale.
    #[error("object was not scaled uniformly (scale = [{x}, {y}, {z}])")]
    NonUniformScale { x: f32, y: f32, z: f32 },

    /// The container behind a handle has been dropped or unmounted.
    #[error("flex container is not mounted")]
    ContainerUnmounted,
}

impl From<taffy::TaffyError> for FlexError {
    fn from(err: taffy::TaffyError) -> Self {
        Self::Solver(err.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FlexError>;
