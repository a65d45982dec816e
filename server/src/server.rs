use log::warn;

use stash_shared::{BitReader, EntityId, InventoryKey, InventorySyncMessage};

use crate::{
    access::{
        policy::{AccessPolicy, DefaultAccessPolicy},
        validator::AccessValidator,
    },
    participant::Participant,
    sync::{
        audit::AuditLog,
        broadcaster::{Broadcaster, InventoryCorrection},
        reconciler::Reconciler,
        report::ReconcileReport,
    },
    world::inventory_world::InventoryWorld,
    InventorySyncError, SyncConfig,
};

/// Server side of the inventory sync protocol.
///
/// Clients submit the slot layout they would like an inventory to have; the
/// server applies only the legal parts to the `InventoryWorld` and schedules
/// the true layout to be re-sent to every observer. The caller is expected to
/// feed messages for one inventory one at a time, in receipt order, and to
/// call `take_corrections` once per tick.
pub struct InventorySyncServer<P: AccessPolicy = DefaultAccessPolicy> {
    config: SyncConfig,
    policy: P,
    broadcaster: Broadcaster,
    audit_log: AuditLog,
}

impl InventorySyncServer<DefaultAccessPolicy> {
    pub fn with_default_policy(config: SyncConfig) -> Self {
        Self::new(config, DefaultAccessPolicy)
    }
}

impl Default for InventorySyncServer<DefaultAccessPolicy> {
    fn default() -> Self {
        Self::with_default_policy(SyncConfig::default())
    }
}

impl<P: AccessPolicy> InventorySyncServer<P> {
    pub fn new(config: SyncConfig, policy: P) -> Self {
        let audit_log = AuditLog::new(config.audit_enabled, config.audit_log_capacity);
        Self {
            config,
            policy,
            broadcaster: Broadcaster::new(),
            audit_log,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Decodes a raw inventory sync payload for `key` and reconciles it.
    ///
    /// Errors mean the payload itself was unusable and the connection should
    /// be dropped. Once decoded, every anomaly is corrected silently.
    pub fn receive_message(
        &mut self,
        world: &mut InventoryWorld,
        participant: &Participant,
        key: InventoryKey,
        payload: &[u8],
    ) -> Result<ReconcileReport, InventorySyncError> {
        let Some(inventory) = world.inventory(key) else {
            warn!("{} addressed unknown {}", participant.name(), key);
            return Err(InventorySyncError::UnknownInventory { key });
        };
        let mut reader = BitReader::new(payload);
        let message = InventorySyncMessage::read(&mut reader, inventory.capacity())?;
        Ok(self.reconcile(world, participant, key, message.slots()))
    }

    /// Applies the legal parts of `desired` to the inventory `key`.
    /// Slots past the end of `desired` are treated as empty.
    pub fn reconcile(
        &mut self,
        world: &mut InventoryWorld,
        participant: &Participant,
        key: InventoryKey,
        desired: &[Option<EntityId>],
    ) -> ReconcileReport {
        let mut reconciler = Reconciler {
            config: &self.config,
            validator: AccessValidator::new(&self.policy),
            broadcaster: &mut self.broadcaster,
            audit_log: &mut self.audit_log,
        };
        reconciler.reconcile(world, participant, key, desired)
    }

    /// Re-asserts an inventory's state on the next flush, e.g. after a
    /// server-side change the clients have not seen yet
    pub fn schedule_sync(&mut self, key: InventoryKey) {
        self.broadcaster.schedule(key);
    }

    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    /// Drains this tick's scheduled corrections
    pub fn take_corrections(&mut self, world: &InventoryWorld) -> Vec<InventoryCorrection> {
        self.broadcaster.flush(world)
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit_log
    }

    pub fn audit_log_mut(&mut self) -> &mut AuditLog {
        &mut self.audit_log
    }
}
