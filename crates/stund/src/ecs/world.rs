//! Sparse-map component store.
//!
//! The [`World`] owns entities, their components, and singleton resources.
//! Storage is a map of component type → map of entity slot → boxed value.
//! That is deliberately simpler than archetype storage: this crate's systems
//! touch dozens of entities per frame, not tens of thousands, and a sparse
//! map keeps insert/remove trivial.
//!
//! Iteration hands out `(Entity, &mut T)` pairs through closures. Two-column
//! iteration ([`each_pair`](World::each_pair)) temporarily removes the first
//! column from the store so both borrows can coexist — the same
//! extract/reinsert move used for resources during delivery systems.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::entity::{Entity, EntityAllocator};

type Column = HashMap<u32, Box<dyn Any + Send + Sync>>;

/// The container for all toolkit-side state.
pub struct World {
    allocator: EntityAllocator,
    columns: HashMap<TypeId, Column>,
    resources: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    names: HashMap<String, Entity>,
    names_reverse: HashMap<u32, String>,
}

impl World {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            columns: HashMap::new(),
            resources: HashMap::new(),
            names: HashMap::new(),
            names_reverse: HashMap::new(),
        }
    }

    // ── Spawn / despawn ──────────────────────────────────────────────

    /// Spawn an entity with no components.
    pub fn spawn(&mut self) -> Entity {
        self.allocator.allocate()
    }

    /// Spawn an entity with a single component.
    pub fn spawn_one<T: 'static + Send + Sync>(&mut self, component: T) -> Entity {
        let entity = self.spawn();
        self.insert(entity, component);
        entity
    }

    /// Despawn an entity, dropping its components and freeing its name.
    ///
    /// Returns `true` if the entity was alive. Children are not touched —
    /// use [`despawn_recursive`](World::despawn_recursive) for subtrees.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.allocator.deallocate(entity) {
            return false;
        }
        for column in self.columns.values_mut() {
            column.remove(&entity.index);
        }
        if let Some(name) = self.names_reverse.remove(&entity.index) {
            self.names.remove(&name);
        }
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.allocator.alive_count()
    }

    /// All live entities, in slot order.
    pub fn entities(&self) -> Vec<Entity> {
        self.allocator.alive()
    }

    // ── Components ───────────────────────────────────────────────────

    /// Add a component to an entity, replacing any existing one of the same
    /// type.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not alive.
    pub fn insert<T: 'static + Send + Sync>(&mut self, entity: Entity, component: T) {
        assert!(
            self.allocator.is_alive(entity),
            "Cannot insert component `{}` on dead entity {:?}",
            std::any::type_name::<T>(),
            entity
        );
        self.columns
            .entry(TypeId::of::<T>())
            .or_default()
            .insert(entity.index, Box::new(component));
    }

    /// Remove a component from an entity. Returns `true` if it was present.
    pub fn remove<T: 'static + Send + Sync>(&mut self, entity: Entity) -> bool {
        if !self.allocator.is_alive(entity) {
            return false;
        }
        self.columns
            .get_mut(&TypeId::of::<T>())
            .is_some_and(|column| column.remove(&entity.index).is_some())
    }

    /// Shared access to a component. `None` if the entity is dead or lacks it.
    pub fn get<T: 'static + Send + Sync>(&self, entity: Entity) -> Option<&T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.columns
            .get(&TypeId::of::<T>())?
            .get(&entity.index)?
            .downcast_ref::<T>()
    }

    /// Mutable access to a component. `None` if the entity is dead or lacks it.
    pub fn get_mut<T: 'static + Send + Sync>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.columns
            .get_mut(&TypeId::of::<T>())?
            .get_mut(&entity.index)?
            .downcast_mut::<T>()
    }

    /// All entities carrying a component of type `T`, in slot order.
    pub fn entities_with<T: 'static + Send + Sync>(&self) -> Vec<Entity> {
        let Some(column) = self.columns.get(&TypeId::of::<T>()) else {
            return Vec::new();
        };
        let mut out: Vec<Entity> = column.keys().map(|&i| self.allocator.handle(i)).collect();
        out.sort();
        out
    }

    // ── Iteration ────────────────────────────────────────────────────

    /// Visit every `(Entity, &mut T)`. Visit order is unspecified.
    pub fn each<T: 'static + Send + Sync>(&mut self, mut f: impl FnMut(Entity, &mut T)) {
        let Some(mut column) = self.columns.remove(&TypeId::of::<T>()) else {
            return;
        };
        for (&index, boxed) in column.iter_mut() {
            let entity = self.allocator.handle(index);
            f(entity, boxed.downcast_mut::<T>().unwrap());
        }
        self.columns.insert(TypeId::of::<T>(), column);
    }

    /// Visit every entity that has both `A` and `B`. Visit order is
    /// unspecified. `A` and `B` must be distinct types — with `A == B` the
    /// extracted column can't pair with itself and nothing is visited.
    pub fn each_pair<A, B>(&mut self, mut f: impl FnMut(Entity, &mut A, &mut B))
    where
        A: 'static + Send + Sync,
        B: 'static + Send + Sync,
    {
        let Some(mut a_column) = self.columns.remove(&TypeId::of::<A>()) else {
            return;
        };
        for (&index, a_boxed) in a_column.iter_mut() {
            let Some(b_boxed) = self
                .columns
                .get_mut(&TypeId::of::<B>())
                .and_then(|col| col.get_mut(&index))
            else {
                continue;
            };
            let entity = self.allocator.handle(index);
            f(
                entity,
                a_boxed.downcast_mut::<A>().unwrap(),
                b_boxed.downcast_mut::<B>().unwrap(),
            );
        }
        self.columns.insert(TypeId::of::<A>(), a_column);
    }

    // ── Resources ────────────────────────────────────────────────────

    /// Insert a resource (singleton value), replacing any existing one of
    /// the same type.
    pub fn insert_resource<T: 'static + Send + Sync>(&mut self, value: T) {
        self.resources.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a shared reference to a resource.
    ///
    /// # Panics
    ///
    /// Panics if the resource hasn't been inserted.
    pub fn resource<T: 'static + Send + Sync>(&self) -> &T {
        self.get_resource().unwrap_or_else(|| {
            panic!(
                "Resource `{}` not found. Did you forget to insert it?",
                std::any::type_name::<T>()
            )
        })
    }

    /// Get a mutable reference to a resource.
    ///
    /// # Panics
    ///
    /// Panics if the resource hasn't been inserted.
    pub fn resource_mut<T: 'static + Send + Sync>(&mut self) -> &mut T {
        self.get_resource_mut().unwrap_or_else(|| {
            panic!(
                "Resource `{}` not found. Did you forget to insert it?",
                std::any::type_name::<T>()
            )
        })
    }

    /// Try to get a shared reference to a resource.
    pub fn get_resource<T: 'static + Send + Sync>(&self) -> Option<&T> {
        self.resources
            .get(&TypeId::of::<T>())
            .and_then(|r| r.downcast_ref::<T>())
    }

    /// Try to get a mutable reference to a resource.
    pub fn get_resource_mut<T: 'static + Send + Sync>(&mut self) -> Option<&mut T> {
        self.resources
            .get_mut(&TypeId::of::<T>())
            .and_then(|r| r.downcast_mut::<T>())
    }

    /// Remove a resource, taking ownership.
    ///
    /// The extract half of the extract/reinsert pattern: take the resource
    /// out, mutate it alongside the world, put it back.
    pub fn resource_remove<T: 'static + Send + Sync>(&mut self) -> Option<T> {
        self.resources
            .remove(&TypeId::of::<T>())
            .and_then(|r| r.downcast::<T>().ok())
            .map(|b| *b)
    }

    // ── Named entities ───────────────────────────────────────────────

    /// Assign a display name to an entity.
    ///
    /// # Panics
    ///
    /// Panics if the name is already in use.
    pub fn name_entity(&mut self, entity: Entity, name: &str) {
        if let Some(&existing) = self.names.get(name) {
            panic!(
                "Name \"{}\" is already used by entity {:?} (tried to assign to {:?})",
                name, existing, entity
            );
        }
        self.names.insert(name.to_string(), entity);
        self.names_reverse.insert(entity.index, name.to_string());
    }

    /// Get the entity with the given name.
    ///
    /// # Panics
    ///
    /// Panics if no entity has that name.
    pub fn named(&self, name: &str) -> Entity {
        *self
            .names
            .get(name)
            .unwrap_or_else(|| panic!("No entity named \"{}\"", name))
    }

    /// Try to get the entity with the given name.
    pub fn try_named(&self, name: &str) -> Option<Entity> {
        self.names.get(name).copied()
    }

    /// The display name of an entity, if it has one.
    pub fn entity_name(&self, entity: Entity) -> Option<&str> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.names_reverse.get(&entity.index).map(String::as_str)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
