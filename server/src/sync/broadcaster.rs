use std::collections::HashSet;

use log::debug;

use stash_shared::{InventoryKey, InventorySyncMessage};

use crate::world::inventory_world::InventoryWorld;

/// Authoritative layout of one inventory, ready to be sent to every observer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryCorrection {
    pub inventory: InventoryKey,
    pub message: InventorySyncMessage,
}

impl InventoryCorrection {
    pub fn to_bytes(&self) -> Vec<u8> {
        self.message.to_bytes()
    }
}

/// Collects inventories whose observers need the true state re-asserted.
///
/// Scheduling is idempotent: an inventory scheduled any number of times
/// before the next `flush` produces exactly one correction.
#[derive(Default)]
pub struct Broadcaster {
    pending: Vec<InventoryKey>,
    scheduled: HashSet<InventoryKey>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the inventory was not already scheduled this tick
    pub fn schedule(&mut self, key: InventoryKey) -> bool {
        if !self.scheduled.insert(key) {
            return false;
        }
        self.pending.push(key);
        true
    }

    pub fn is_scheduled(&self, key: InventoryKey) -> bool {
        self.scheduled.contains(&key)
    }

    /// Scheduled inventories in the order they were first touched
    pub fn pending(&self) -> &[InventoryKey] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.scheduled.clear();
    }

    /// Snapshots every scheduled inventory and resets for the next tick.
    /// Inventories destroyed since scheduling are skipped.
    pub fn flush(&mut self, world: &InventoryWorld) -> Vec<InventoryCorrection> {
        self.scheduled.clear();
        let mut corrections = Vec::with_capacity(self.pending.len());
        for key in self.pending.drain(..) {
            let Some(inventory) = world.inventory(key) else {
                debug!("Skipping correction for destroyed {}", key);
                continue;
            };
            corrections.push(InventoryCorrection {
                inventory: key,
                message: InventorySyncMessage::new(inventory.slots().to_vec()),
            });
        }
        corrections
    }
}
