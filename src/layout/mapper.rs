//! Coordinate Mapper - 2D solver boxes ↔ 3D positions.
//!
//! A [`Plane`] names two world axes. The first carries the flex main axis
//! (solver `left` grows along it), the second carries the cross axis
//! (solver `top` grows downward, so it maps to the negative direction).
//! The remaining axis is depth and is always zero.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use crate::error::FlexError;

use super::types::ComputedBox;

/// A world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Component of `v` along this axis.
    pub fn component(self, v: Vec3) -> f32 {
        v[self.index()]
    }
}

/// The pair of world axes a container lays out on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Plane {
    #[default]
    Xy,
    Yz,
    Xz,
}

impl Plane {
    /// Axis carrying the solver's horizontal (main) direction.
    pub const fn main_axis(self) -> Axis {
        match self {
            Self::Xy | Self::Xz => Axis::X,
            Self::Yz => Axis::Y,
        }
    }

    /// Axis carrying the solver's vertical (cross) direction.
    pub const fn cross_axis(self) -> Axis {
        match self {
            Self::Xy => Axis::Y,
            Self::Yz | Self::Xz => Axis::Z,
        }
    }

    /// The axis left out of the plane.
    pub const fn depth_axis(self) -> Axis {
        match self {
            Self::Xy => Axis::Z,
            Self::Yz => Axis::X,
            Self::Xz => Axis::Y,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xy => "xy",
            Self::Yz => "yz",
            Self::Xz => "xz",
        }
    }
}

impl FromStr for Plane {
    type Err = FlexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xy" => Ok(Self::Xy),
            "yz" => Ok(Self::Yz),
            "xz" => Ok(Self::Xz),
            _ => Err(FlexError::InvalidValue {
                property: "plane".into(),
                value: s.into(),
            }),
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project a 3D extent onto the plane: (main extent, cross extent).
pub fn flex_2d_size(extent: Vec3, plane: Plane) -> (f32, f32) {
    (
        plane.main_axis().component(extent),
        plane.cross_axis().component(extent),
    )
}

/// Place a computed box in 3D.
///
/// `layout` is in solver units; the result is in logical units. With
/// `center_anchor` the position names the box's center instead of its
/// top-left corner.
pub fn box_position(layout: &ComputedBox, plane: Plane, scale_factor: f32, center_anchor: bool) -> Vec3 {
    let (mut main, mut cross) = (layout.left, layout.top);
    if center_anchor {
        main += layout.width / 2.0;
        cross += layout.height / 2.0;
    }
    compose(plane, main / scale_factor, -cross / scale_factor, 0.0)
}

/// Build a vector from main, cross and depth components.
pub fn compose(plane: Plane, main: f32, cross: f32, depth: f32) -> Vec3 {
    let mut out = Vec3::ZERO;
    out[plane.main_axis().index()] = main;
    out[plane.cross_axis().index()] = cross;
    out[plane.depth_axis().index()] = depth;
    out
}

/// Split a vector into its main and cross components.
pub fn decompose(plane: Plane, v: Vec3) -> (f32, f32) {
    flex_2d_size(v, plane)
}
