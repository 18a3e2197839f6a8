//! Primitives - containers and the items they position.
//!
//! This module provides the two building blocks a host scene works with:
//! - [`FlexContainer`] - root of a layout, owns the solver and the scheduler
//! - [`FlexItem`] - a box inside a container or inside another item
//!
//! # Architecture
//!
//! Items never reach for an ambient container. They attach through a
//! [`ParentHandle`], obtained from `container.handle()` or `item.handle()`:
//!
//! ```ignore
//! let row = FlexItem::mount(&container.handle(), ItemConfig::new(row_props));
//! let cell = FlexItem::mount(&row.handle().unwrap(), ItemConfig::new(cell_props));
//! ```
//!
//! Every change (item properties, container size, plane...) only schedules
//! a pass. Positions are delivered when the host calls `container.tick()`
//! after the scheduler period, or `container.flush()` to force it.

mod container;
mod item;
pub mod measure;
mod types;

pub use container::{FlexContainer, FlexContext, ParentHandle};
pub use item::FlexItem;
pub use measure::Aabb;
pub use types::*;
