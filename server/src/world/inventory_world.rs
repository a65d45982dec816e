use std::collections::{HashMap, HashSet};

use log::{debug, info};

use stash_shared::{EntityId, InventoryKey, Position};

use crate::{
    world::{
        entity::Entity,
        inventory::{Inventory, InventoryConfig, InventoryKind},
        registry::EntityRegistry,
    },
    WorldError,
};

/// Authoritative store of every inventory, the item → parent relation and
/// the physical positions the sync protocol touches.
///
/// The item → parent relation is kept here, keyed by id, rather than on the
/// items themselves: slots and relation are only ever changed together by
/// the methods below, so destroying an item elsewhere can never leave a
/// dangling reference behind.
pub struct InventoryWorld {
    registry: EntityRegistry,
    inventories: HashMap<InventoryKey, Inventory>,
    owned_inventories: HashMap<EntityId, Vec<InventoryKey>>,
    item_parents: HashMap<EntityId, InventoryKey>,
    positions: HashMap<EntityId, Position>,
    next_inventory_key: u64,
}

impl InventoryWorld {
    pub fn new() -> Self {
        Self {
            registry: EntityRegistry::new(),
            inventories: HashMap::new(),
            owned_inventories: HashMap::new(),
            item_parents: HashMap::new(),
            positions: HashMap::new(),
            next_inventory_key: 1,
        }
    }

    // Entities

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn spawn(&mut self, entity: impl Into<Entity>) -> Result<EntityId, WorldError> {
        self.registry.insert(entity.into())
    }

    pub fn spawn_at(
        &mut self,
        entity: impl Into<Entity>,
        position: Position,
    ) -> Result<EntityId, WorldError> {
        let id = self.spawn(entity)?;
        self.positions.insert(id, position);
        Ok(id)
    }

    pub fn spawn_with_id(&mut self, id: EntityId, entity: impl Into<Entity>) -> Result<(), WorldError> {
        self.registry.insert_with_id(id, entity.into())
    }

    pub fn set_incapacitated(&mut self, id: EntityId, incapacitated: bool) -> Result<(), WorldError> {
        match self.registry.get_mut(id) {
            Some(Entity::Character(character)) => {
                character.incapacitated = incapacitated;
                Ok(())
            }
            Some(_) => Err(WorldError::NotACharacter { id }),
            None => Err(WorldError::EntityNotFound { id }),
        }
    }

    /// Removes an entity. Items are vacated from their slot; owners take
    /// their inventories with them and release whatever those held.
    pub fn despawn(&mut self, id: EntityId) -> Result<Entity, WorldError> {
        let entity = self
            .registry
            .remove(id)
            .ok_or(WorldError::EntityNotFound { id })?;

        if let Some(parent) = self.item_parents.remove(&id) {
            if let Some(inventory) = self.inventories.get_mut(&parent) {
                inventory.clear_item_except(id, None);
            }
        }

        if let Some(keys) = self.owned_inventories.remove(&id) {
            let owner_position = self.positions.get(&id).copied();
            for key in keys {
                let Some(inventory) = self.inventories.remove(&key) else {
                    continue;
                };
                for item in inventory.items() {
                    self.item_parents.remove(&item);
                    if let Some(position) = owner_position {
                        if let Some(item_position) = self.positions.get_mut(&item) {
                            *item_position = position;
                        }
                    }
                }
                debug!("Destroyed {} along with its owner {}", key, id);
            }
        }

        self.positions.remove(&id);
        info!("Despawned {} ({})", id, entity.name());
        Ok(entity)
    }

    // Positions

    pub fn position(&self, id: EntityId) -> Option<Position> {
        self.positions.get(&id).copied()
    }

    pub fn set_position(&mut self, id: EntityId, position: Position) {
        self.positions.insert(id, position);
    }

    pub fn clear_position(&mut self, id: EntityId) {
        self.positions.remove(&id);
    }

    // Inventories

    pub fn create_inventory(
        &mut self,
        owner: Option<EntityId>,
        config: InventoryConfig,
    ) -> Result<InventoryKey, WorldError> {
        if config.capacity == 0 {
            return Err(WorldError::ZeroCapacity);
        }
        if let Some(owner) = owner {
            if !self.registry.contains(owner) {
                return Err(WorldError::EntityNotFound { id: owner });
            }
        }

        let key = InventoryKey::from_u64(self.next_inventory_key);
        self.next_inventory_key += 1;

        self.inventories
            .insert(key, Inventory::new(key, owner, config));
        if let Some(owner) = owner {
            self.owned_inventories.entry(owner).or_default().push(key);
        }
        Ok(key)
    }

    pub fn inventory(&self, key: InventoryKey) -> Option<&Inventory> {
        self.inventories.get(&key)
    }

    pub fn inventories(&self) -> impl Iterator<Item = &Inventory> {
        self.inventories.values()
    }

    pub fn inventories_of(&self, owner: EntityId) -> &[InventoryKey] {
        self.owned_inventories
            .get(&owner)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Current parent inventory of an item, `None` when it lies in the world
    pub fn parent_of(&self, item: EntityId) -> Option<InventoryKey> {
        self.item_parents.get(&item).copied()
    }

    /// Server-side placement, e.g. when spawning loot. Applies the same rules
    /// as client-driven placement and reports a refusal as an error.
    pub fn put_item(&mut self, key: InventoryKey, slot: usize, item: EntityId) -> Result<(), WorldError> {
        let inventory = self
            .inventories
            .get(&key)
            .ok_or(WorldError::InventoryNotFound { key })?;
        if slot >= inventory.capacity() {
            return Err(WorldError::SlotOutOfRange {
                key,
                slot,
                capacity: inventory.capacity(),
            });
        }
        if self.registry.item(item).is_none() {
            return Err(WorldError::NotAnItem { id: item });
        }

        let previous = self.take_slot(key, slot);
        if !self.try_place(key, slot, item) {
            if let Some(previous) = previous {
                self.try_place(key, slot, previous);
            }
            return Err(WorldError::PlacementRefused { key, slot, item });
        }
        self.clear_stale(key, slot, item);
        Ok(())
    }

    /// Items equipped in a non-detachable way may not be moved by clients
    pub fn is_detachable(&self, item: EntityId) -> bool {
        let Some(info) = self.registry.item(item) else {
            return false;
        };
        if info.detachable {
            return true;
        }
        let equipped = self
            .parent_of(item)
            .and_then(|parent| self.inventory(parent))
            .is_some_and(|inventory| inventory.kind() == InventoryKind::Equipment);
        !equipped
    }

    /// True if `item` owns `key`, directly or through containers nested in it
    pub fn is_ancestor_of(&self, item: EntityId, key: InventoryKey) -> bool {
        let mut current = Some(key);
        // every step moves to a distinct inventory, so this bounds the walk
        for _ in 0..=self.inventories.len() {
            let Some(inventory) = current.and_then(|key| self.inventory(key)) else {
                return false;
            };
            let Some(owner) = inventory.owner() else {
                return false;
            };
            if owner == item {
                return true;
            }
            current = self.parent_of(owner);
        }
        false
    }

    // Mutation used by reconciliation

    /// Vacates a slot. The parent relation is dropped once the item no longer
    /// appears anywhere in the inventory.
    pub(crate) fn take_slot(&mut self, key: InventoryKey, slot: usize) -> Option<EntityId> {
        let inventory = self.inventories.get_mut(&key)?;
        if slot >= inventory.capacity() {
            return None;
        }
        let item = inventory.set_slot(slot, None)?;
        if !inventory.contains(item) && self.item_parents.get(&item) == Some(&key) {
            self.item_parents.remove(&item);
        }
        Some(item)
    }

    /// Places `item` into the empty `slot` if the inventory's rules allow it.
    /// The item leaves any other inventory first, so it is never held twice.
    pub(crate) fn try_place(&mut self, key: InventoryKey, slot: usize, item: EntityId) -> bool {
        let Some(info) = self.registry.item(item) else {
            return false;
        };
        let Some(inventory) = self.inventories.get(&key) else {
            return false;
        };
        if inventory.slot(slot).is_some() || !inventory.accepts(slot, info) {
            return false;
        }
        if self.is_ancestor_of(item, key) {
            debug!("Refusing to nest {} inside its own {}", item, key);
            return false;
        }

        if let Some(previous) = self.item_parents.get(&item).copied() {
            if previous != key {
                if let Some(previous_inventory) = self.inventories.get_mut(&previous) {
                    previous_inventory.clear_item_except(item, None);
                }
            }
        }

        let Some(inventory) = self.inventories.get_mut(&key) else {
            return false;
        };
        inventory.set_slot(slot, Some(item));
        self.item_parents.insert(item, key);
        true
    }

    /// Clears every other slot of `key` still referencing `item`
    pub(crate) fn clear_stale(&mut self, key: InventoryKey, keep: usize, item: EntityId) -> Vec<usize> {
        let Some(inventory) = self.inventories.get_mut(&key) else {
            return Vec::new();
        };
        let cleared = inventory.clear_item_except(item, Some(keep));
        if !cleared.is_empty() {
            debug!("Cleared stale references to {} in {} slots {:?}", item, key, cleared);
        }
        cleared
    }

    // Invariants

    /// Verifies that every slot reference is mirrored by the parent relation
    /// and that no item is held in two places.
    pub fn check_consistency(&self) -> Result<(), WorldError> {
        let mut seen: HashMap<EntityId, InventoryKey> = HashMap::new();

        let mut keys: Vec<&InventoryKey> = self.inventories.keys().collect();
        keys.sort();
        for key in keys {
            let inventory = &self.inventories[key];
            for item in inventory.items() {
                if self.registry.item(item).is_none() {
                    return Err(WorldError::UnregisteredSlotItem {
                        item,
                        inventory: *key,
                    });
                }
                if let Some(first) = seen.insert(item, *key) {
                    return Err(WorldError::DuplicateItem {
                        item,
                        first,
                        second: *key,
                    });
                }
                let recorded = self.parent_of(item);
                if recorded != Some(*key) {
                    return Err(WorldError::ParentMismatch {
                        item,
                        inventory: *key,
                        recorded,
                    });
                }
            }
        }

        for (item, parent) in &self.item_parents {
            if !seen.contains_key(item) {
                return Err(WorldError::DanglingParent {
                    item: *item,
                    inventory: *parent,
                });
            }
        }

        Ok(())
    }

    /// Ids held by every inventory, for tests and diagnostics
    pub fn held_items(&self) -> HashSet<EntityId> {
        self.inventories
            .values()
            .flat_map(|inventory| inventory.items())
            .collect()
    }
}

impl Default for InventoryWorld {
    fn default() -> Self {
        Self::new()
    }
}
