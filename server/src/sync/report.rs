use stash_shared::{EntityId, InventoryKey};

/// What a reconciliation call did. Nothing here is an error: refused slots
/// simply end up empty and get corrected on the client by the broadcast.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub inventory: Option<InventoryKey>,
    /// The submitter could not touch the inventory; nothing was changed
    pub denied: bool,
    /// Slots vacated by the removal pass, with what they held
    pub removed: Vec<(usize, EntityId)>,
    /// Slots filled by the placement pass
    pub placed: Vec<(usize, EntityId)>,
    /// Desired placements that were not legal or not accepted
    pub refused: Vec<(usize, EntityId)>,
}

impl ReconcileReport {
    pub(crate) fn new(inventory: InventoryKey) -> Self {
        Self {
            inventory: Some(inventory),
            ..Self::default()
        }
    }

    pub(crate) fn denied(inventory: Option<InventoryKey>) -> Self {
        Self {
            inventory,
            denied: true,
            ..Self::default()
        }
    }

    /// True when no slot changed
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.placed.is_empty()
    }
}
