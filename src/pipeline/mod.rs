//! Reflow Pipeline
//!
//! Connects property changes to results delivered to items.
//!
//! # Pipeline Architecture
//!
//! ```text
//! property change → request → ReflowScheduler → tick() → run_pass → callbacks
//! ```
//!
//! ## Data Flow
//!
//! 1. **scheduler** - Coalesces requests into at most one pass per period
//! 2. **reflow** - Resolves order, runs the solver, maps boxes to 3D
//! 3. **callbacks** - Invoked by the container once its state is released
//!
//! Time never advances on its own: the host drives it by calling `tick()`
//! on each container from its frame loop.

pub mod reflow;
pub mod scheduler;

pub use reflow::{run_pass, ReflowOutcome, ReflowParams, ReflowUpdate};
pub use scheduler::{
    Clock, ManualClock, ReflowScheduler, ReflowState, SystemClock, DEFAULT_MAX_UPDATES_PER_SECOND,
};
