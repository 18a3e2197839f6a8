//! # spark-flex3d
//!
//! Flexbox layout for objects in 3D space.
//!
//! Built on [taffy](https://github.com/DioxusLabs/taffy) for the box model.
//!
//! ## Architecture
//!
//! A [`FlexContainer`] lays out [`FlexItem`]s on one of three planes (`xy`,
//! `yz`, `xz`). Items describe themselves with sparse [`FlexProperties`];
//! the container runs a solver over them and reports each item's position
//! and size back in world units:
//!
//! ```text
//! FlexItem props → Solver Binding → Solver → Coordinate Mapper → on_transform_update
//! ```
//!
//! Changes never lay out immediately. They arm a deadline on the container's
//! scheduler and the host runs the pass from its frame loop with
//! [`FlexContainer::tick`].
//!
//! ## Modules
//!
//! - [`types`] - Flex vocabulary (Dimension, FlexDirection, Align, etc.)
//! - [`engine`] - FlexProperties, item registry, sibling ordering
//! - [`layout`] - Solver trait, Taffy backend, binding, coordinate mapper
//! - [`pipeline`] - Reflow scheduler and the reflow pass
//! - [`primitives`] - FlexContainer, FlexItem, content measurement

pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod primitives;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{FlexError, Result};

pub use engine::{diff, FlexProperties, PropertyChanges, PropertyValue, Spacing};

pub use layout::{
    BoxTransform, ComputedBox, LayoutNode, MeasureFunc, MeasureMode, MeasureRequest, MeasuredSize,
    Plane, Solver, SolverLength, StyleProperty, TaffySolver,
};

pub use pipeline::{Clock, ManualClock, SystemClock};

pub use primitives::{
    Aabb, ContainerConfig, FlexContainer, FlexContext, FlexItem, ItemConfig, ParentHandle,
};

/// Everything needed to build a layout.
pub mod prelude {
    pub use crate::engine::FlexProperties;
    pub use crate::layout::{BoxTransform, Plane, Solver, TaffySolver};
    pub use crate::primitives::{ContainerConfig, FlexContainer, FlexItem, ItemConfig};
    pub use crate::types::{
        Align, Dimension, Edge, FlexDirection, FlexWrap, JustifyContent, LayoutDirection,
    };
}
