//! Layout Types
//!
//! Values exchanged with the solver and handed to result callbacks.

use std::fmt;
use std::rc::Rc;

/// Box read back from the solver after a layout pass.
///
/// All values are in solver (scaled) units, relative to the parent node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComputedBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ComputedBox {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }
}

/// Transformation reported to an item after each reflow.
///
/// Position is the item's offset inside its parent, in logical units and
/// already mapped onto the container's plane. Width and height are logical
/// units along the plane's main and cross axes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxTransform {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub width: f32,
    pub height: f32,
}

impl BoxTransform {
    /// Position as a vector.
    pub fn position(&self) -> glam::Vec3 {
        glam::Vec3::new(self.x, self.y, self.z)
    }

    /// Replace NaN components with zero.
    pub fn sanitized(self) -> Self {
        let fix = |v: f32| if v.is_nan() { 0.0 } else { v };
        Self {
            x: fix(self.x),
            y: fix(self.y),
            z: fix(self.z),
            width: fix(self.width),
            height: fix(self.height),
        }
    }
}

/// Per-item result callback.
pub type TransformCallback = Rc<dyn Fn(&BoxTransform)>;

/// Container-level callback receiving the total extent in logical units.
pub type ReflowCallback = Rc<dyn Fn(f32, f32)>;

// =============================================================================
// Measure Functions
// =============================================================================

/// How a measure request constrains one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// No constraint; the value should be ignored.
    Undefined,
    /// The size must be exactly the given value.
    Exactly,
    /// The size may be at most the given value.
    AtMost,
}

/// Input to a measure function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureRequest {
    pub width: f32,
    pub width_mode: MeasureMode,
    pub height: f32,
    pub height_mode: MeasureMode,
}

/// Output of a measure function. `None` leaves the axis at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeasuredSize {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

/// Intrinsic size callback for leaf items.
///
/// Wrapped in `Rc` so the same callback can be shared between the property
/// record and the solver node, and compared by identity when diffing.
#[derive(Clone)]
pub struct MeasureFunc(Rc<dyn Fn(MeasureRequest) -> MeasuredSize>);

impl MeasureFunc {
    pub fn new(f: impl Fn(MeasureRequest) -> MeasuredSize + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, request: MeasureRequest) -> MeasuredSize {
        (self.0)(request)
    }

    /// Identity comparison: two handles are equal when they share a callback.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for MeasureFunc {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for MeasureFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MeasureFunc").field(&Rc::as_ptr(&self.0)).finish()
    }
}
