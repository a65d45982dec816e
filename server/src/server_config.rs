use std::default::Default;

/// Contains Config properties which will be used by the `InventorySyncServer`
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// When an item is vacated from a slot and has a physical position, move it
    /// to the inventory owner's position so it reappears where it was dropped.
    pub reset_dropped_item_position: bool,
    /// Whether pickup / drop / transfer records are written to the audit log
    pub audit_enabled: bool,
    /// Number of audit records retained in memory. Older records are discarded
    /// once this is exceeded; they have already been emitted through `log`.
    pub audit_log_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            reset_dropped_item_position: true,
            audit_enabled: true,
            audit_log_capacity: 256,
        }
    }
}
