use stash_shared::{EntityId, InventoryKey};

use crate::world::{
    entity::{Character, Entity, ItemInfo, Structure},
    inventory_world::InventoryWorld,
};

/// The submitter's controlled character
#[derive(Clone, Copy, Debug)]
pub struct Avatar<'w> {
    pub id: EntityId,
    pub character: &'w Character,
}

/// Whatever owns an inventory, as seen by access rules
#[derive(Clone, Copy, Debug)]
pub enum AccessTarget<'w> {
    Character {
        id: EntityId,
        character: &'w Character,
    },
    Structure {
        id: EntityId,
        structure: &'w Structure,
    },
    /// A container item; reachable only if its own location is
    Item {
        id: EntityId,
        item: &'w ItemInfo,
        parent: Option<InventoryKey>,
    },
    /// No owner, or the owner is gone
    Unowned,
}

impl<'w> AccessTarget<'w> {
    pub fn of(world: &'w InventoryWorld, key: InventoryKey) -> Option<Self> {
        let inventory = world.inventory(key)?;
        let Some(owner) = inventory.owner() else {
            return Some(AccessTarget::Unowned);
        };
        let target = match world.registry().get(owner) {
            Some(Entity::Character(character)) => AccessTarget::Character {
                id: owner,
                character,
            },
            Some(Entity::Structure(structure)) => AccessTarget::Structure {
                id: owner,
                structure,
            },
            Some(Entity::Item(item)) => AccessTarget::Item {
                id: owner,
                item,
                parent: world.parent_of(owner),
            },
            None => AccessTarget::Unowned,
        };
        Some(target)
    }
}

/// Capability checks consulted by the access validator. Games plug their own
/// ownership, team and reach rules in here.
pub trait AccessPolicy {
    /// May `avatar` rearrange an inventory owned by `target`?
    fn can_access(&self, world: &InventoryWorld, avatar: &Avatar, target: &AccessTarget) -> bool;

    /// May `avatar` claim `item` from wherever it currently is?
    fn can_take_item(&self, world: &InventoryWorld, avatar: &Avatar, item: EntityId, info: &ItemInfo) -> bool;
}

/// Ownership and team based rules:
/// * your own character's inventories are always yours
/// * other characters can be looted only while incapacitated
/// * structures are open to their team, or to everyone when unaffiliated
/// * unowned inventories are open to everyone
/// * container items are as reachable as the place they sit in
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultAccessPolicy;

impl DefaultAccessPolicy {
    fn can_reach_inventory(&self, world: &InventoryWorld, avatar: &Avatar, key: InventoryKey, depth: usize) -> bool {
        let Some(target) = AccessTarget::of(world, key) else {
            return false;
        };
        self.can_access_at_depth(world, avatar, &target, depth)
    }

    fn can_access_at_depth(&self, world: &InventoryWorld, avatar: &Avatar, target: &AccessTarget, depth: usize) -> bool {
        match target {
            AccessTarget::Unowned => true,
            AccessTarget::Character { id, character } => *id == avatar.id || character.incapacitated,
            AccessTarget::Structure { structure, .. } => match structure.team {
                None => true,
                team => team == avatar.character.team,
            },
            AccessTarget::Item { parent, .. } => match parent {
                None => true,
                // nesting is acyclic, but a corrupt world must not recurse forever
                Some(_) if depth >= MAX_CONTAINER_DEPTH => false,
                Some(parent) => self.can_reach_inventory(world, avatar, *parent, depth + 1),
            },
        }
    }
}

const MAX_CONTAINER_DEPTH: usize = 16;

impl AccessPolicy for DefaultAccessPolicy {
    fn can_access(&self, world: &InventoryWorld, avatar: &Avatar, target: &AccessTarget) -> bool {
        self.can_access_at_depth(world, avatar, target, 0)
    }

    fn can_take_item(&self, world: &InventoryWorld, avatar: &Avatar, item: EntityId, info: &ItemInfo) -> bool {
        if info.hidden {
            return false;
        }
        match world.parent_of(item) {
            None => true,
            Some(parent) => self.can_reach_inventory(world, avatar, parent, 0),
        }
    }
}
