use std::collections::HashSet;

use stash_shared::{EntityId, InventoryKey};

use crate::world::entity::ItemInfo;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InventoryKind {
    /// Backpacks, crates, lockers
    Container,
    /// Worn or held slots; items here may refuse to be detached
    Equipment,
}

/// Creation-time settings of an inventory. Capacity never changes afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct InventoryConfig {
    pub capacity: usize,
    pub kind: InventoryKind,
    /// Lets an incapacitated avatar still use this inventory
    pub accessible_while_incapacitated: bool,
    /// Per-slot required item tag; `None` accepts anything
    pub slot_filters: Vec<Option<String>>,
}

impl InventoryConfig {
    pub fn container(capacity: usize) -> Self {
        Self {
            capacity,
            kind: InventoryKind::Container,
            accessible_while_incapacitated: false,
            slot_filters: Vec::new(),
        }
    }

    pub fn equipment(capacity: usize) -> Self {
        Self {
            kind: InventoryKind::Equipment,
            ..Self::container(capacity)
        }
    }

    pub fn accessible_while_incapacitated(mut self, accessible: bool) -> Self {
        self.accessible_while_incapacitated = accessible;
        self
    }

    pub fn with_slot_filter(mut self, slot: usize, tag: impl Into<String>) -> Self {
        if self.slot_filters.len() <= slot {
            self.slot_filters.resize(slot + 1, None);
        }
        self.slot_filters[slot] = Some(tag.into());
        self
    }

    pub fn slot_filter(&self, slot: usize) -> Option<&str> {
        self.slot_filters.get(slot).and_then(|filter| filter.as_deref())
    }
}

/// Fixed array of slots. Slots hold ids only; the items themselves belong to
/// the registry.
#[derive(Clone, Debug)]
pub struct Inventory {
    key: InventoryKey,
    owner: Option<EntityId>,
    config: InventoryConfig,
    slots: Vec<Option<EntityId>>,
}

impl Inventory {
    pub(crate) fn new(key: InventoryKey, owner: Option<EntityId>, config: InventoryConfig) -> Self {
        let slots = vec![None; config.capacity];
        Self {
            key,
            owner,
            config,
            slots,
        }
    }

    pub fn key(&self) -> InventoryKey {
        self.key
    }

    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn kind(&self) -> InventoryKind {
        self.config.kind
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Option<EntityId>] {
        &self.slots
    }

    pub fn slot(&self, slot: usize) -> Option<EntityId> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn contains(&self, item: EntityId) -> bool {
        self.slots.contains(&Some(item))
    }

    pub fn slot_of(&self, item: EntityId) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(item))
    }

    /// Occupied slots in slot order
    pub fn items(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn item_set(&self) -> HashSet<EntityId> {
        self.items().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Business rule check for putting `item` into `slot`, ignoring whatever
    /// currently occupies it
    pub fn accepts(&self, slot: usize, item: &ItemInfo) -> bool {
        if slot >= self.capacity() {
            return false;
        }
        match self.config.slot_filter(slot) {
            Some(tag) => item.has_tag(tag),
            None => true,
        }
    }

    pub(crate) fn set_slot(&mut self, slot: usize, item: Option<EntityId>) -> Option<EntityId> {
        std::mem::replace(&mut self.slots[slot], item)
    }

    /// Empties every slot holding `item` except `keep`, returning the cleared slots
    pub(crate) fn clear_item_except(&mut self, item: EntityId, keep: Option<usize>) -> Vec<usize> {
        let mut cleared = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if Some(index) != keep && *slot == Some(item) {
                *slot = None;
                cleared.push(index);
            }
        }
        cleared
    }
}
