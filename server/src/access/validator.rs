use log::debug;

use stash_shared::{EntityId, InventoryKey};

use crate::{
    access::policy::{AccessPolicy, AccessTarget, Avatar},
    participant::Participant,
    world::inventory_world::InventoryWorld,
};

/// Gatekeeper between untrusted client layouts and the world
pub struct AccessValidator<'p, P: AccessPolicy + ?Sized> {
    policy: &'p P,
}

impl<'p, P: AccessPolicy + ?Sized> AccessValidator<'p, P> {
    pub fn new(policy: &'p P) -> Self {
        Self { policy }
    }

    /// Resolves the participant's avatar, if it is spawned and is a character
    pub fn avatar<'w>(&self, world: &'w InventoryWorld, participant: &Participant) -> Option<Avatar<'w>> {
        let id = participant.avatar()?;
        let character = world.registry().character(id)?;
        Some(Avatar { id, character })
    }

    /// May the participant rearrange the slots of `key` at all?
    pub fn inventory_accessible(
        &self,
        world: &InventoryWorld,
        participant: &Participant,
        key: InventoryKey,
    ) -> bool {
        let Some(avatar) = self.avatar(world, participant) else {
            debug!("{} has no avatar, {} is inaccessible", participant.name(), key);
            return false;
        };
        let Some(inventory) = world.inventory(key) else {
            return false;
        };
        if avatar.character.incapacitated && !inventory.config().accessible_while_incapacitated {
            debug!("{} is incapacitated, {} is inaccessible", participant.name(), key);
            return false;
        }
        let Some(target) = AccessTarget::of(world, key) else {
            return false;
        };
        self.policy.can_access(world, &avatar, &target)
    }

    /// May the participant put `item` into `key`? Items already held by `key`
    /// may always stay or be shuffled around in it.
    pub fn item_visible(
        &self,
        world: &InventoryWorld,
        participant: &Participant,
        item: EntityId,
        key: InventoryKey,
    ) -> bool {
        if world.parent_of(item) == Some(key) {
            return true;
        }
        let Some(info) = world.registry().item(item) else {
            return false;
        };
        let Some(avatar) = self.avatar(world, participant) else {
            return false;
        };
        self.policy.can_take_item(world, &avatar, item, info)
    }

    /// Equipped, non-detachable items stay where they are
    pub fn detachable(&self, world: &InventoryWorld, item: EntityId) -> bool {
        world.is_detachable(item)
    }
}
