//! Layout Module
//!
//! Everything between a container's property records and the solver.
//!
//! # Architecture
//!
//! The layout core never computes flexbox itself. The flow for one pass:
//!
//! 1. [`binding`] converts `FlexProperties` into solver setter calls, scaling
//!    lengths from logical units to solver units
//! 2. the [`Solver`] (by default [`TaffySolver`]) computes 2D boxes
//! 3. [`mapper`] turns each box back into a 3D position on the container's
//!    plane, in logical units
//!
//! # Example
//!
//! ```ignore
//! use spark_flex3d::layout::{Solver, TaffySolver, StyleProperty, SolverLength};
//! use spark_flex3d::types::LayoutDirection;
//!
//! let mut solver = TaffySolver::new();
//! let root = solver.create_node()?;
//! solver.set_style(root, StyleProperty::Width(SolverLength::Points(300.0)))?;
//! solver.calculate_layout(root, 300.0, 100.0, LayoutDirection::Ltr)?;
//! ```

pub mod binding;
pub mod mapper;
mod solver;
mod taffy_bridge;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use mapper::{Axis, Plane};
pub use solver::{LayoutNode, Solver, SolverLength, StyleProperty};
pub use taffy_bridge::TaffySolver;
pub use types::*;
