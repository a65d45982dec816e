use std::{collections::VecDeque, fmt};

use log::info;

/// Log target every audit record is emitted under
pub const AUDIT_LOG_TARGET: &str = "Inventory";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditAction {
    PickedUp,
    Dropped,
    PlacedIn,
    RemovedFrom,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditRecord {
    pub participant: String,
    pub action: AuditAction,
    pub item: String,
    pub owner: String,
}

impl fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            AuditAction::PickedUp => write!(f, "{} picked up {}", self.participant, self.item),
            AuditAction::Dropped => write!(f, "{} dropped {}", self.participant, self.item),
            AuditAction::PlacedIn => write!(
                f,
                "{} placed {} in {}",
                self.participant, self.item, self.owner
            ),
            AuditAction::RemovedFrom => write!(
                f,
                "{} removed {} from {}",
                self.participant, self.item, self.owner
            ),
        }
    }
}

/// Append-only record of who moved what. Writing to it can never fail and
/// never feeds back into reconciliation.
pub struct AuditLog {
    enabled: bool,
    capacity: usize,
    records: VecDeque<AuditRecord>,
}

impl AuditLog {
    pub fn new(enabled: bool, capacity: usize) -> Self {
        Self {
            enabled,
            capacity,
            records: VecDeque::new(),
        }
    }

    pub fn record(&mut self, record: AuditRecord) {
        if !self.enabled {
            return;
        }
        info!(target: AUDIT_LOG_TARGET, "{}", record);
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Retained records, oldest first
    pub fn records(&self) -> impl Iterator<Item = &AuditRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&AuditRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn drain(&mut self) -> Vec<AuditRecord> {
        self.records.drain(..).collect()
    }
}
