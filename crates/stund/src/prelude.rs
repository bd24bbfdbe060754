//! Convenience re-exports — `use stund::prelude::*` for the common items.

pub use crate::ecs::{Children, Entity, EntityRef, Parent, RefPolicy, Relation, World, relation};
pub use crate::flipbook::{
    Flipbook, FlipbookClip, FlipbookSheet, Sprite, advance_flipbooks, load_clip_manifest,
};
pub use crate::math::{Rect, Snap, Transform, Vec2, Vec3, Vec4, clamp01, remap};
pub use crate::parallax::{ParallaxCamera, ParallaxLayer, update_parallax};
pub use crate::relay::{
    Contact, ContactEcho, ContactHub, ContactKind, ContactRelay, deliver_contacts,
};
pub use crate::time::{ClockMode, ClockSource, FrameClocks, ManualClock, TimeTool, ToolState};
