//! Parent/child relationships and hierarchy-restricted entity references.
//!
//! [`Parent`] and [`Children`] express the scene-side hierarchy of toolkit
//! entities. On top of them, [`Relation`] classifies how two entities relate
//! through the parent chain, and [`EntityRef`] is a reference slot that only
//! accepts targets whose relation to the owning entity its [`RefPolicy`]
//! permits — the logic behind a "you can only drag a descendant in here"
//! editor field.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::world::World;

/// Marks an entity as a child of another entity.
#[derive(Debug, Clone, Copy)]
pub struct Parent(pub Entity);

/// The list of child entities for a parent.
#[derive(Debug, Clone, Default)]
pub struct Children(pub Vec<Entity>);

impl World {
    /// Spawn a child entity under a parent, wiring up [`Parent`] and the
    /// parent's [`Children`].
    ///
    /// # Panics
    ///
    /// Panics if the parent entity is not alive.
    pub fn spawn_child(&mut self, parent: Entity) -> Entity {
        assert!(
            self.is_alive(parent),
            "Cannot spawn child on dead parent {:?}",
            parent
        );
        let child = self.spawn();
        self.insert(child, Parent(parent));
        if let Some(children) = self.get_mut::<Children>(parent) {
            children.0.push(child);
        } else {
            self.insert(parent, Children(vec![child]));
        }
        child
    }

    /// Despawn an entity and all its descendants, unlinking it from its
    /// parent's [`Children`] list.
    ///
    /// Returns `true` if the entity was alive.
    pub fn despawn_recursive(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }

        if let Some(parent) = self.get::<Parent>(entity).map(|p| p.0) {
            if let Some(children) = self.get_mut::<Children>(parent) {
                children.0.retain(|&c| c != entity);
            }
        }

        // Collect the subtree breadth-first, then despawn.
        let mut subtree = vec![entity];
        let mut i = 0;
        while i < subtree.len() {
            if let Some(children) = self.get::<Children>(subtree[i]) {
                subtree.extend(children.0.iter().copied());
            }
            i += 1;
        }
        for e in subtree {
            self.despawn(e);
        }
        true
    }
}

// ── Relations ────────────────────────────────────────────────────────────

/// How `other` relates to a reference entity through the parent chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// The same entity.
    Same,
    /// `other` is somewhere above the reference entity.
    Ancestor,
    /// `other` is somewhere below the reference entity.
    Descendant,
    /// Neither — includes siblings and separate trees.
    Unrelated,
}

/// Classify how `other` relates to `reference`.
///
/// Walks parent chains; either entity being dead yields `Unrelated`.
pub fn relation(world: &World, reference: Entity, other: Entity) -> Relation {
    if !world.is_alive(reference) || !world.is_alive(other) {
        return Relation::Unrelated;
    }
    if reference == other {
        return Relation::Same;
    }
    if chain_contains(world, reference, other) {
        return Relation::Ancestor;
    }
    if chain_contains(world, other, reference) {
        return Relation::Descendant;
    }
    Relation::Unrelated
}

/// Whether `target` appears in the parent chain above `from`.
fn chain_contains(world: &World, from: Entity, target: Entity) -> bool {
    let mut cursor = from;
    while let Some(parent) = world.get::<Parent>(cursor).map(|p| p.0) {
        if parent == target {
            return true;
        }
        cursor = parent;
    }
    false
}

// ── Restricted references ────────────────────────────────────────────────

/// Which relations an [`EntityRef`] accepts, relative to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefPolicy {
    /// Any live entity.
    Anything,
    /// Only the owning entity itself.
    SameEntity,
    /// Only ancestors of the owner.
    AncestorOf,
    /// Only descendants of the owner.
    DescendantOf,
    /// The owner, its ancestors, or its descendants.
    Lineage,
}

impl RefPolicy {
    /// Whether a target with the given relation to the owner is acceptable.
    pub fn permits(self, rel: Relation) -> bool {
        match self {
            RefPolicy::Anything => true,
            RefPolicy::SameEntity => rel == Relation::Same,
            RefPolicy::AncestorOf => rel == Relation::Ancestor,
            RefPolicy::DescendantOf => rel == Relation::Descendant,
            RefPolicy::Lineage => rel != Relation::Unrelated,
        }
    }
}

/// A reference slot restricted by hierarchy relation.
///
/// Gameplay components hold one of these instead of a bare [`Entity`] when
/// the target must stand in a particular relation to the owner. Assignment
/// goes through [`set`](EntityRef::set), which silently rejects targets the
/// policy forbids — mirroring an editor field refusing a drop.
#[derive(Debug, Clone)]
pub struct EntityRef {
    policy: RefPolicy,
    target: Option<Entity>,
}

impl EntityRef {
    pub fn new(policy: RefPolicy) -> Self {
        Self {
            policy,
            target: None,
        }
    }

    pub fn policy(&self) -> RefPolicy {
        self.policy
    }

    /// The stored target, if any. May be stale — see
    /// [`is_valid`](EntityRef::is_valid).
    pub fn get(&self) -> Option<Entity> {
        self.target
    }

    pub fn clear(&mut self) {
        self.target = None;
    }

    /// Assign a target if the policy permits its relation to `owner`.
    ///
    /// Returns `true` on success. On rejection the stored target is left
    /// unchanged.
    pub fn set(&mut self, world: &World, owner: Entity, target: Entity) -> bool {
        let rel = relation(world, owner, target);
        if !world.is_alive(target) || !self.policy.permits(rel) {
            log::debug!(
                "EntityRef rejected {:?} for owner {:?}: relation {:?} not permitted by {:?}",
                target,
                owner,
                rel,
                self.policy
            );
            return false;
        }
        self.target = Some(target);
        true
    }

    /// Whether the stored target still exists and still satisfies the
    /// policy. An empty slot is valid.
    pub fn is_valid(&self, world: &World, owner: Entity) -> bool {
        match self.target {
            None => true,
            Some(target) => {
                world.is_alive(target) && self.policy.permits(relation(world, owner, target))
            }
        }
    }

    /// All live entities the policy would accept for `owner`, in slot order.
    /// What an editor picker should offer.
    pub fn candidates(&self, world: &World, owner: Entity) -> Vec<Entity> {
        world
            .entities()
            .into_iter()
            .filter(|&e| self.policy.permits(relation(world, owner, e)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root → mid → leaf, plus an unrelated sibling of mid.
    fn family(world: &mut World) -> (Entity, Entity, Entity, Entity) {
        let root = world.spawn();
        let mid = world.spawn_child(root);
        let leaf = world.spawn_child(mid);
        let sibling = world.spawn_child(root);
        (root, mid, leaf, sibling)
    }

    #[test]
    fn relation_classification() {
        let mut world = World::new();
        let (root, mid, leaf, sibling) = family(&mut world);

        assert_eq!(relation(&world, mid, mid), Relation::Same);
        assert_eq!(relation(&world, mid, root), Relation::Ancestor);
        assert_eq!(relation(&world, leaf, root), Relation::Ancestor);
        assert_eq!(relation(&world, mid, leaf), Relation::Descendant);
        assert_eq!(relation(&world, root, leaf), Relation::Descendant);
        assert_eq!(relation(&world, mid, sibling), Relation::Unrelated);
    }

    #[test]
    fn relation_with_dead_entity_is_unrelated() {
        let mut world = World::new();
        let (_, mid, leaf, _) = family(&mut world);
        world.despawn(leaf);
        assert_eq!(relation(&world, mid, leaf), Relation::Unrelated);
    }

    #[test]
    fn despawn_recursive_removes_subtree_and_parent_link() {
        let mut world = World::new();
        let (root, mid, leaf, sibling) = family(&mut world);

        assert!(world.despawn_recursive(mid));
        assert!(!world.is_alive(mid));
        assert!(!world.is_alive(leaf));
        assert!(world.is_alive(root));
        assert!(world.is_alive(sibling));
        assert_eq!(world.get::<Children>(root).unwrap().0, vec![sibling]);
    }

    #[test]
    fn ref_policy_permit_table() {
        assert!(RefPolicy::Anything.permits(Relation::Unrelated));
        assert!(RefPolicy::SameEntity.permits(Relation::Same));
        assert!(!RefPolicy::SameEntity.permits(Relation::Ancestor));
        assert!(RefPolicy::AncestorOf.permits(Relation::Ancestor));
        assert!(!RefPolicy::AncestorOf.permits(Relation::Descendant));
        assert!(RefPolicy::DescendantOf.permits(Relation::Descendant));
        assert!(RefPolicy::Lineage.permits(Relation::Same));
        assert!(RefPolicy::Lineage.permits(Relation::Ancestor));
        assert!(RefPolicy::Lineage.permits(Relation::Descendant));
        assert!(!RefPolicy::Lineage.permits(Relation::Unrelated));
    }

    #[test]
    fn entity_ref_accepts_permitted_target() {
        let mut world = World::new();
        let (root, mid, _, _) = family(&mut world);

        let mut anchor = EntityRef::new(RefPolicy::AncestorOf);
        assert!(anchor.set(&world, mid, root));
        assert_eq!(anchor.get(), Some(root));
    }

    #[test]
    fn entity_ref_rejects_forbidden_target_and_keeps_previous() {
        let mut world = World::new();
        let (root, mid, _, sibling) = family(&mut world);

        let mut anchor = EntityRef::new(RefPolicy::AncestorOf);
        anchor.set(&world, mid, root);
        assert!(!anchor.set(&world, mid, sibling));
        assert_eq!(anchor.get(), Some(root));
    }

    #[test]
    fn entity_ref_rejects_dead_target() {
        let mut world = World::new();
        let (root, mid, _, _) = family(&mut world);
        world.despawn_recursive(mid);

        let mut slot = EntityRef::new(RefPolicy::Anything);
        assert!(!slot.set(&world, root, mid));
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn entity_ref_invalidates_when_target_despawns() {
        let mut world = World::new();
        let (_, mid, leaf, _) = family(&mut world);

        let mut slot = EntityRef::new(RefPolicy::DescendantOf);
        assert!(slot.set(&world, mid, leaf));
        assert!(slot.is_valid(&world, mid));

        world.despawn(leaf);
        assert!(!slot.is_valid(&world, mid));
    }

    #[test]
    fn entity_ref_invalidates_when_hierarchy_changes() {
        let mut world = World::new();
        let root = world.spawn();
        let child = world.spawn_child(root);

        let mut slot = EntityRef::new(RefPolicy::DescendantOf);
        assert!(slot.set(&world, root, child));

        // Re-rooting the child breaks the descendant relation.
        world.get_mut::<Children>(root).unwrap().0.clear();
        world.remove::<Parent>(child);
        assert!(!slot.is_valid(&world, root));
    }

    #[test]
    fn candidates_match_policy() {
        let mut world = World::new();
        let (root, mid, leaf, sibling) = family(&mut world);

        let descendants = EntityRef::new(RefPolicy::DescendantOf);
        assert_eq!(descendants.candidates(&world, root), vec![mid, leaf, sibling]);
        assert_eq!(descendants.candidates(&world, mid), vec![leaf]);

        let lineage = EntityRef::new(RefPolicy::Lineage);
        assert_eq!(lineage.candidates(&world, mid), vec![root, mid, leaf]);
    }
}
