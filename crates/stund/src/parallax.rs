//! Parallax scrolling layers driven by a camera.
//!
//! Mark the camera entity with [`ParallaxCamera`] and give each background
//! layer a [`ParallaxLayer`]. Every frame, [`update_parallax`] repositions
//! the layers from the camera's translation: a factor of 0 pins the layer to
//! the world, a factor of 1 makes it ride along with the camera (reading as
//! infinitely far away), values between scroll proportionally slower than
//! the action. Factors above 1 or below 0 are allowed for foreground
//! overshoot.

use serde::{Deserialize, Serialize};

use crate::ecs::World;
use crate::math::{Snap, Transform, Vec2};

/// Marker component for the camera the parallax layers follow.
///
/// Pair with a [`Transform`]. With `snap_step` set, layer positions are
/// snapped to that grid — typically one texel, to stop sub-pixel shimmer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallaxCamera {
    /// Optional grid step for snapping layer positions, in world units.
    pub snap_step: Option<f32>,
}

impl ParallaxCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snap layer positions to a grid (builder pattern).
    pub fn with_snap_step(mut self, step: f32) -> Self {
        self.snap_step = Some(step);
        self
    }
}

/// Component: scrolls an entity at a fraction of the camera's movement.
///
/// Layer position = `origin + camera_translation * factor`, per axis. The
/// entity's Z translation is left alone so depth ordering stays authored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParallaxLayer {
    /// Per-axis multiplier of the camera translation.
    pub factor: Vec2,
    /// World position of the layer when the camera sits at the origin.
    #[serde(default)]
    pub origin: Vec2,
}

impl ParallaxLayer {
    /// A layer with the same factor on both axes, anchored at the origin.
    pub fn new(factor: f32) -> Self {
        Self {
            factor: Vec2::splat(factor),
            origin: Vec2::ZERO,
        }
    }

    /// A layer with independent horizontal/vertical factors.
    pub fn from_factors(x: f32, y: f32) -> Self {
        Self {
            factor: Vec2::new(x, y),
            origin: Vec2::ZERO,
        }
    }

    /// Set the layer's anchor position (builder pattern).
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }
}

/// System: reposition every [`ParallaxLayer`] from the camera's translation.
///
/// Does nothing if no entity carries both [`ParallaxCamera`] and
/// [`Transform`]. With several cameras, the lowest-slot one wins and a
/// warning is logged.
pub fn update_parallax(world: &mut World) {
    let cameras = world.entities_with::<ParallaxCamera>();
    let Some((&camera_entity, rest)) = cameras.split_first() else {
        return;
    };
    if !rest.is_empty() {
        log::warn!(
            "update_parallax: {} ParallaxCamera entities, using {:?}",
            cameras.len(),
            camera_entity
        );
    }
    let Some(camera_pos) = world.get::<Transform>(camera_entity).map(|t| t.xy()) else {
        return;
    };
    let snap_step = world
        .get::<ParallaxCamera>(camera_entity)
        .and_then(|c| c.snap_step);

    world.each_pair::<ParallaxLayer, Transform>(|_entity, layer, transform| {
        let mut pos = layer.origin + camera_pos * layer.factor;
        if let Some(step) = snap_step {
            pos = pos.snap_to_step(step);
        }
        transform.translation.x = pos.x;
        transform.translation.y = pos.y;
    });
}
