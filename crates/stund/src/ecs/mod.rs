//! Minimal sparse-map component store.
//!
//! Just enough ECS for the toolkit's components and systems: generational
//! entity ids, typed component storage, singleton resources, and the
//! parent/child hierarchy the reference-restriction logic runs on. Hosts
//! with a real scene graph mirror the relevant entities in here; headless
//! tests use it directly.
//!
//! - [`entity`] — generational entity IDs
//! - [`world`] — entities, components, resources
//! - [`hierarchy`] — parent/child links, relations, restricted references

pub mod entity;
pub mod hierarchy;
pub mod world;

pub use entity::Entity;
pub use hierarchy::{Children, EntityRef, Parent, RefPolicy, Relation, relation};
pub use world::World;
