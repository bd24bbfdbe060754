//! Math helpers and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam) types so users don't need to
//! depend on it directly. On top of that: scalar clamping/remapping helpers,
//! decimal rounding and grid snapping for scalars and vectors (via the
//! [`Snap`] extension trait), the [`Transform`] component, and the UV
//! [`Rect`] used by the flipbook module.

use serde::{Deserialize, Serialize};

pub use glam::{Vec2, Vec3, Vec4};

/// Clamp a value to \[0, 1\].
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Map `v` from `[in_min, in_max]` to `[out_min, out_max]`, clamping to the
/// output range.
///
/// A degenerate input range (`in_min == in_max`) maps everything to `out_min`.
pub fn remap(v: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if in_min == in_max {
        return out_min;
    }
    let t = clamp01((v - in_min) / (in_max - in_min));
    out_min + (out_max - out_min) * t
}

/// Returns `true` if `a` and `b` differ by at most `eps`.
pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

/// Decimal rounding and grid snapping.
///
/// Implemented for `f32`, [`Vec2`], and [`Vec3`] (component-wise for
/// vectors). Typical uses: trimming float noise before display, and snapping
/// world positions to a pixel grid.
pub trait Snap {
    /// Round to `places` decimal places.
    fn round_places(self, places: u32) -> Self;

    /// Round to the nearest multiple of `step`. A non-positive `step` returns
    /// the value unchanged.
    fn snap_to_step(self, step: f32) -> Self;
}

impl Snap for f32 {
    fn round_places(self, places: u32) -> Self {
        let scale = 10f32.powi(places as i32);
        (self * scale).round() / scale
    }

    fn snap_to_step(self, step: f32) -> Self {
        if step <= 0.0 {
            return self;
        }
        (self / step).round() * step
    }
}

impl Snap for Vec2 {
    fn round_places(self, places: u32) -> Self {
        Vec2::new(self.x.round_places(places), self.y.round_places(places))
    }

    fn snap_to_step(self, step: f32) -> Self {
        Vec2::new(self.x.snap_to_step(step), self.y.snap_to_step(step))
    }
}

impl Snap for Vec3 {
    fn round_places(self, places: u32) -> Self {
        Vec3::new(
            self.x.round_places(places),
            self.y.round_places(places),
            self.z.round_places(places),
        )
    }

    fn snap_to_step(self, step: f32) -> Self {
        Vec3::new(
            self.x.snap_to_step(step),
            self.y.snap_to_step(step),
            self.z.snap_to_step(step),
        )
    }
}

/// A 2D transform: position, Z rotation, and scale.
///
/// Position carries a Z component for layer ordering; rotation is radians
/// around Z.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Transform {
    /// Identity transform (origin, no rotation, uniform scale of 1).
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    /// Create a transform at the given position.
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vec3::new(x, y, z),
            ..Self::IDENTITY
        }
    }

    /// Create a transform at the given 2D position (z = 0).
    pub fn from_xy(x: f32, y: f32) -> Self {
        Self::from_xyz(x, y, 0.0)
    }

    /// Return a copy with uniform scale applied.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec2::splat(scale);
        self
    }

    /// The XY part of the translation.
    pub fn xy(&self) -> Vec2 {
        Vec2::new(self.translation.x, self.translation.y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A normalized rectangle within a texture (UV space, 0.0–1.0).
///
/// Selects a sub-region of a texture — for example, a single frame from a
/// flipbook sheet. (0,0) is the top-left corner, (1,1) the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// The full texture (0,0) to (1,1).
    pub const FULL: Self = Self {
        min: Vec2::ZERO,
        max: Vec2::ONE,
    };

    /// Build from pixel coordinates and texture dimensions.
    pub fn from_pixels(x: f32, y: f32, w: f32, h: f32, tex_w: f32, tex_h: f32) -> Self {
        Self {
            min: Vec2::new(x / tex_w, y / tex_h),
            max: Vec2::new((x + w) / tex_w, (y + h) / tex_h),
        }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::FULL
    }
}
