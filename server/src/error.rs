use thiserror::Error;

use stash_shared::{EntityId, InventoryKey, InventoryMessageError};

/// Errors returned by the byte-level entry point of the sync server.
///
/// Both variants mean the inbound message could not be turned into a slot
/// layout at all; the caller should drop the connection. Anything that goes
/// wrong after decoding is corrected silently by re-broadcasting state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventorySyncError {
    #[error("Inventory sync message addressed unknown {key}")]
    UnknownInventory { key: InventoryKey },

    #[error("Malformed inventory sync message: {0}")]
    Message(#[from] InventoryMessageError),
}

/// Errors raised while building or inspecting an `InventoryWorld`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    // Registry

    #[error("Entity {id} already exists in the registry")]
    EntityAlreadyExists { id: EntityId },

    #[error("Entity {id} not found in the registry")]
    EntityNotFound { id: EntityId },

    #[error("No free entity ids left in the registry")]
    EntityIdsExhausted,

    #[error("Entity {id} is not an item")]
    NotAnItem { id: EntityId },

    #[error("Entity {id} is not a character")]
    NotACharacter { id: EntityId },

    // Inventories

    #[error("{key} not found")]
    InventoryNotFound { key: InventoryKey },

    #[error("Cannot create an inventory with zero capacity")]
    ZeroCapacity,

    #[error("Slot {slot} is out of range for {key} (capacity {capacity})")]
    SlotOutOfRange {
        key: InventoryKey,
        slot: usize,
        capacity: usize,
    },

    #[error("{key} refused item {item} in slot {slot}")]
    PlacementRefused {
        key: InventoryKey,
        slot: usize,
        item: EntityId,
    },

    // Consistency

    #[error("Item {item} occupies more than one slot (found in {first} and {second})")]
    DuplicateItem {
        item: EntityId,
        first: InventoryKey,
        second: InventoryKey,
    },

    #[error("Item {item} sits in {inventory} but its parent relation says {recorded:?}")]
    ParentMismatch {
        item: EntityId,
        inventory: InventoryKey,
        recorded: Option<InventoryKey>,
    },

    #[error("Item {item} records parent {inventory} which does not hold it")]
    DanglingParent { item: EntityId, inventory: InventoryKey },

    #[error("Slot of {inventory} references {item} which is not a registered item")]
    UnregisteredSlotItem { item: EntityId, inventory: InventoryKey },
}
