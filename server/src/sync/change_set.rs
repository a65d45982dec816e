use std::collections::{HashMap, HashSet};

use log::debug;

use stash_shared::{EntityId, InventoryKey};

use crate::{
    access::{policy::AccessPolicy, validator::AccessValidator},
    participant::Participant,
    world::{inventory::Inventory, inventory_world::InventoryWorld},
};

/// Pre-call facts about an item named in the desired layout
#[derive(Clone, Copy, Debug)]
pub(crate) struct ItemState {
    pub visible: bool,
    pub detachable: bool,
}

/// Everything one reconciliation call needs to know about the state before
/// it starts mutating. Legality is judged against this snapshot only.
pub(crate) struct ChangeSet {
    desired: Vec<Option<EntityId>>,
    current: Vec<Option<EntityId>>,
    items: HashMap<EntityId, ItemState>,
    previous_parents: Vec<InventoryKey>,
}

impl ChangeSet {
    /// Resolves the raw desired ids. Unknown or non-item ids become empty,
    /// and an item named in several slots keeps only its lowest slot.
    /// Slots holding non-detachable equipment keep their occupant.
    pub fn resolve<P: AccessPolicy + ?Sized>(
        world: &InventoryWorld,
        validator: &AccessValidator<P>,
        participant: &Participant,
        inventory: &Inventory,
        raw_desired: &[Option<EntityId>],
    ) -> Self {
        let key = inventory.key();
        let capacity = inventory.capacity();
        let current = inventory.slots().to_vec();

        let mut desired = Vec::with_capacity(capacity);
        let mut items: HashMap<EntityId, ItemState> = HashMap::new();
        let mut previous_parents = Vec::new();
        let mut seen_parents = HashSet::new();

        // non-detachable equipment stays in its slot whatever was requested
        let pinned: HashSet<EntityId> = current
            .iter()
            .flatten()
            .copied()
            .filter(|item| !validator.detachable(world, *item))
            .collect();

        for slot in 0..capacity {
            if let Some(item) = current[slot].filter(|item| pinned.contains(item)) {
                if raw_desired.get(slot).copied().flatten() != Some(item) {
                    debug!("{} may not detach {} from {}", participant.name(), item, key);
                }
                items.insert(
                    item,
                    ItemState {
                        visible: true,
                        detachable: true,
                    },
                );
                desired.push(Some(item));
                continue;
            }

            let requested = raw_desired.get(slot).copied().flatten();
            let resolved = requested.filter(|id| world.registry().item(*id).is_some());
            let Some(item) = resolved else {
                desired.push(None);
                continue;
            };
            if items.contains_key(&item) || pinned.contains(&item) {
                debug!("{} named {} twice, ignoring slot {}", participant.name(), item, slot);
                desired.push(None);
                continue;
            }

            let previous_parent = world.parent_of(item);
            if let Some(parent) = previous_parent {
                if seen_parents.insert(parent) {
                    previous_parents.push(parent);
                }
            }
            items.insert(
                item,
                ItemState {
                    visible: validator.item_visible(world, participant, item, key),
                    // moving within the same inventory detaches nothing
                    detachable: previous_parent == Some(key) || validator.detachable(world, item),
                },
            );
            desired.push(Some(item));
        }

        Self {
            desired,
            current,
            items,
            previous_parents,
        }
    }

    /// Slots whose occupant has to change
    pub fn changed_slots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.current.len()).filter(|slot| self.desired[*slot] != self.current[*slot])
    }

    /// Slots that should receive a different, non-empty occupant
    pub fn placements(&self) -> impl Iterator<Item = (usize, EntityId)> + '_ {
        self.changed_slots()
            .filter_map(|slot| self.desired[slot].map(|item| (slot, item)))
    }

    pub fn item(&self, item: EntityId) -> Option<&ItemState> {
        self.items.get(&item)
    }

    /// Distinct pre-call parents of every named item, in first-seen order
    pub fn previous_parents(&self) -> &[InventoryKey] {
        &self.previous_parents
    }

    /// Occupants before the call, in slot order
    pub fn items_before(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.current.iter().flatten().copied()
    }
}
