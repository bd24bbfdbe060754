//! Re-broadcasting collider events to interested entities.
//!
//! The host's physics engine detects contacts; this module only routes them.
//! Each frame the host pushes raw [`Contact`]s into the [`ContactHub`]
//! resource, then runs [`deliver_contacts`], which fans every contact out to
//! both endpoints' [`ContactRelay`] inboxes. Gameplay code drains an inbox
//! with [`ContactRelay::take`] whenever it gets around to it.
//!
//! Contacts whose endpoints have despawned between detection and delivery
//! are dropped silently — a relay never hands out dead handles.

use crate::ecs::{Entity, World};

/// Phase of a contact between two colliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// The colliders started touching this frame.
    Enter,
    /// The colliders are still touching.
    Stay,
    /// The colliders stopped touching this frame.
    Exit,
}

/// A raw contact as reported by the host physics engine.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub a: Entity,
    pub b: Entity,
    pub kind: ContactKind,
}

/// Resource: the frame's pending contacts, pushed by the host.
#[derive(Debug, Default)]
pub struct ContactHub {
    pending: Vec<Contact>,
}

impl ContactHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a contact for delivery.
    pub fn push(&mut self, contact: Contact) {
        self.pending.push(contact);
    }

    /// Number of contacts waiting for delivery.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// A contact as seen from one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEcho {
    /// The entity on the other side of the contact.
    pub other: Entity,
    pub kind: ContactKind,
}

/// Component: subscribes an entity to contacts it participates in.
#[derive(Debug, Default)]
pub struct ContactRelay {
    inbox: Vec<ContactEcho>,
}

impl ContactRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything delivered since the last call.
    pub fn take(&mut self) -> Vec<ContactEcho> {
        std::mem::take(&mut self.inbox)
    }

    pub fn len(&self) -> usize {
        self.inbox.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inbox.is_empty()
    }
}

/// System: drain the [`ContactHub`] and deliver each contact to both
/// endpoints' relays.
///
/// Endpoints without a [`ContactRelay`] are skipped; contacts with a dead
/// endpoint are dropped whole. Does nothing if the hub resource is absent.
pub fn deliver_contacts(world: &mut World) {
    let Some(mut hub) = world.resource_remove::<ContactHub>() else {
        return;
    };
    for contact in hub.pending.drain(..) {
        if !world.is_alive(contact.a) || !world.is_alive(contact.b) {
            log::trace!("dropping contact with dead endpoint: {:?}", contact);
            continue;
        }
        for (me, other) in [(contact.a, contact.b), (contact.b, contact.a)] {
            if let Some(relay) = world.get_mut::<ContactRelay>(me) {
                relay.inbox.push(ContactEcho {
                    other,
                    kind: contact.kind,
                });
                log::trace!("contact {:?} delivered to {:?} (other {:?})", contact.kind, me, other);
            }
        }
    }
    world.insert_resource(hub);
}
