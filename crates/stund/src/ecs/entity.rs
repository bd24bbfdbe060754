//! Generational entity handles.
//!
//! An [`Entity`] is an index paired with a generation counter. When a slot is
//! recycled after a despawn, its generation bumps, so stale handles held by
//! gameplay code fail lookups instead of touching the wrong entity.

use std::fmt;

/// A lightweight handle to an entity in the [`World`](super::world::World).
///
/// Only valid for the world that created it, and only while its generation
/// matches the slot's.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Entity {
    /// Raw slot index. For display and diagnostics, not identity.
    pub fn index(self) -> u32 {
        self.index
    }

    /// Generation counter for this handle.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Allocates and recycles entity slots.
///
/// Spawning pops the free list if possible, otherwise grows. Despawning bumps
/// the slot's generation and pushes it onto the free list.
pub(crate) struct EntityAllocator {
    generations: Vec<u32>,
    free_list: Vec<u32>,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub fn allocate(&mut self) -> Entity {
        if let Some(index) = self.free_list.pop() {
            Entity {
                index,
                generation: self.generations[index as usize],
            }
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            Entity {
                index,
                generation: 0,
            }
        }
    }

    /// Returns `false` if the handle was already stale.
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.generations[entity.index as usize] += 1;
        self.free_list.push(entity.index);
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.generations
            .get(entity.index as usize)
            .is_some_and(|&g| g == entity.generation)
    }

    /// Rebuild the live handle for a slot known to be alive.
    ///
    /// Callers must only pass indices of live entities (component rows are
    /// removed on despawn, so iteration never sees dead slots).
    pub fn handle(&self, index: u32) -> Entity {
        Entity {
            index,
            generation: self.generations[index as usize],
        }
    }

    pub fn alive_count(&self) -> usize {
        self.generations.len() - self.free_list.len()
    }

    /// All live entities, in slot order.
    pub fn alive(&self) -> Vec<Entity> {
        let mut free = self.free_list.clone();
        free.sort_unstable();
        (0..self.generations.len() as u32)
            .filter(|i| free.binary_search(i).is_err())
            .map(|i| self.handle(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_sequential() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        let e1 = alloc.allocate();
        assert_eq!(e0.index, 0);
        assert_eq!(e1.index, 1);
        assert_eq!(e0.generation, 0);
    }

    #[test]
    fn recycle_bumps_generation() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        assert!(alloc.deallocate(e0));
        let reused = alloc.allocate();
        assert_eq!(reused.index, 0);
        assert_eq!(reused.generation, 1);
    }

    #[test]
    fn stale_handle_detected() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        alloc.deallocate(e0);
        assert!(!alloc.is_alive(e0));
        assert!(!alloc.deallocate(e0)); // double free
    }

    #[test]
    fn alive_lists_only_live_slots() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        let e1 = alloc.allocate();
        let e2 = alloc.allocate();
        alloc.deallocate(e1);

        assert_eq!(alloc.alive_count(), 2);
        assert_eq!(alloc.alive(), vec![e0, e2]);
    }
}
