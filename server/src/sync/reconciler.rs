use std::collections::HashSet;

use log::{debug, warn};

use stash_shared::{EntityId, InventoryKey};

use crate::{
    access::{policy::AccessPolicy, validator::AccessValidator},
    participant::Participant,
    sync::{
        audit::{AuditAction, AuditLog, AuditRecord},
        broadcaster::Broadcaster,
        change_set::ChangeSet,
        report::ReconcileReport,
    },
    world::inventory_world::InventoryWorld,
    SyncConfig,
};

const WORLD_OWNER_NAME: &str = "the world";

/// One reconciliation call's view of the sync server. Borrowing the pieces
/// separately lets the world be mutated while the policy stays shared.
pub(crate) struct Reconciler<'s, P: AccessPolicy + ?Sized> {
    pub config: &'s SyncConfig,
    pub validator: AccessValidator<'s, P>,
    pub broadcaster: &'s mut Broadcaster,
    pub audit_log: &'s mut AuditLog,
}

impl<'s, P: AccessPolicy + ?Sized> Reconciler<'s, P> {
    pub fn reconcile(
        &mut self,
        world: &mut InventoryWorld,
        participant: &Participant,
        key: InventoryKey,
        desired: &[Option<EntityId>],
    ) -> ReconcileReport {
        let Some(inventory) = world.inventory(key) else {
            warn!(
                "{} submitted a layout for unknown {}",
                participant.name(),
                key
            );
            return ReconcileReport::denied(None);
        };

        // Gate
        if !self.validator.inventory_accessible(world, participant, key) {
            debug!("{} may not access {}, re-asserting state", participant.name(), key);
            self.deny(world, key, desired);
            return ReconcileReport::denied(Some(key));
        }

        let owner = inventory.owner();
        let change_set = ChangeSet::resolve(world, &self.validator, participant, inventory, desired);
        let mut report = ReconcileReport::new(key);

        // Removal pass: every changing slot is vacated before anything is
        // placed, so no item is ever referenced from two slots
        let changed: Vec<usize> = change_set.changed_slots().collect();
        for slot in changed {
            let Some(item) = world.take_slot(key, slot) else {
                continue;
            };
            if self.config.reset_dropped_item_position {
                reset_position_to_owner(world, item, owner);
            }
            report.removed.push((slot, item));
        }

        // Placement pass
        for (slot, item) in change_set.placements() {
            let already_placed = world
                .inventory(key)
                .is_some_and(|inventory| inventory.slot(slot) == Some(item));
            if already_placed {
                continue;
            }
            let legal = change_set
                .item(item)
                .is_some_and(|state| state.detachable && state.visible);
            if !legal {
                debug!("{} may not place {} in {} slot {}", participant.name(), item, key, slot);
                report.refused.push((slot, item));
                continue;
            }
            if !world.try_place(key, slot, item) {
                debug!("{} slot {} refused {}", key, slot, item);
                report.refused.push((slot, item));
                continue;
            }
            world.clear_stale(key, slot, item);
            report.placed.push((slot, item));
        }

        // Notify, even when nothing changed
        self.broadcaster.schedule(key);
        for parent in change_set.previous_parents() {
            if *parent != key {
                self.broadcaster.schedule(*parent);
            }
        }

        self.audit(world, participant, key, owner, &change_set);

        report
    }

    fn deny(&mut self, world: &InventoryWorld, key: InventoryKey, desired: &[Option<EntityId>]) {
        self.broadcaster.schedule(key);
        let capacity = world.inventory(key).map_or(0, |inventory| inventory.capacity());
        // the client may already show these as moved out of their real parent
        for item in desired.iter().take(capacity).flatten() {
            if world.registry().item(*item).is_none() {
                continue;
            }
            if let Some(parent) = world.parent_of(*item) {
                self.broadcaster.schedule(parent);
            }
        }
    }

    fn audit(
        &mut self,
        world: &InventoryWorld,
        participant: &Participant,
        key: InventoryKey,
        owner: Option<EntityId>,
        change_set: &ChangeSet,
    ) {
        let Some(inventory) = world.inventory(key) else {
            return;
        };
        let before: HashSet<EntityId> = change_set.items_before().collect();
        let after = inventory.item_set();

        let own_inventory = owner.is_some() && owner == participant.avatar();
        let owner_name = owner
            .and_then(|owner| world.registry().display_name(owner))
            .unwrap_or(WORLD_OWNER_NAME);

        for item in inventory.items().filter(|item| !before.contains(item)) {
            let action = if own_inventory {
                AuditAction::PickedUp
            } else {
                AuditAction::PlacedIn
            };
            self.audit_log
                .record(audit_record(world, participant, action, item, owner_name));
        }

        for item in change_set.items_before().filter(|item| !after.contains(item)) {
            let action = if own_inventory {
                AuditAction::Dropped
            } else {
                AuditAction::RemovedFrom
            };
            self.audit_log
                .record(audit_record(world, participant, action, item, owner_name));
        }
    }
}

fn reset_position_to_owner(world: &mut InventoryWorld, item: EntityId, owner: Option<EntityId>) {
    if world.position(item).is_none() {
        return;
    }
    let Some(owner_position) = owner.and_then(|owner| world.position(owner)) else {
        return;
    };
    world.set_position(item, owner_position);
}

fn audit_record(
    world: &InventoryWorld,
    participant: &Participant,
    action: AuditAction,
    item: EntityId,
    owner_name: &str,
) -> AuditRecord {
    let item_name = world
        .registry()
        .display_name(item)
        .map_or_else(|| item.to_string(), str::to_string);
    AuditRecord {
        participant: participant.name().to_string(),
        action,
        item: item_name,
        owner: owner_name.to_string(),
    }
}
