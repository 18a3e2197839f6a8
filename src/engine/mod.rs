//! Engine - property records and item bookkeeping.
//!
//! - FlexProperties: sparse flex style of one node, plus change detection
//! - LayoutRegistry: every registered item of a container
//! - ordering: stable sibling order with partial indices
//!
//! # Architecture
//!
//! Items are not solver nodes. Each item owns a [`LayoutNode`] handle and a
//! [`RegistryEntry`] keyed by it:
//!
//! ```text
//! node 3: parent=root, index=None, seq=0, center_anchor=false, props={grow: 1}
//! node 4: parent=root, index=0,    seq=1, center_anchor=true,  props={width: 2}
//! node 5: parent=4,    index=None, seq=2, ...
//! ```
//!
//! The solver tree is rearranged to match the registry only for parents
//! marked dirty since the last pass.
//!
//! [`LayoutNode`]: crate::layout::LayoutNode

mod flex_props;
pub mod ordering;
mod registry;

pub use flex_props::*;
pub use registry::*;
