//! # Stund — Gameplay Timing & Utility Toolkit
//!
//! Frame-driven building blocks for games and tools: pluggable clock
//! sources with a stopwatch/countdown [`TimeTool`](time::TimeTool), sprite
//! flipbook playback, parallax layers, hierarchy-restricted entity
//! references, and a collider-event relay — all over a small component
//! store the host drives once per frame.
//!
//! The host application keeps its own loop, renderer, and physics; stund's
//! systems are plain functions over [`ecs::World`] plus an injected
//! [`time::ClockSource`].
//!
//! Start with `use stund::prelude::*`.

pub mod ecs;
pub mod flipbook;
pub mod math;
pub mod parallax;
pub mod prelude;
pub mod relay;
pub mod time;

#[cfg(feature = "editor")]
pub mod editor;
