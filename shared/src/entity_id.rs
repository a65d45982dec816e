use std::{fmt, num::NonZeroU16};

/// Registry-assigned entity identifier as it travels on the wire.
///
/// The raw value `0` is reserved for "empty slot", so an `EntityId` is never
/// zero and an empty slot is modelled as `Option::<EntityId>::None`.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct EntityId(NonZeroU16);

impl EntityId {
    /// Returns `None` for the reserved empty value `0`
    pub fn new(value: u16) -> Option<Self> {
        NonZeroU16::new(value).map(Self)
    }

    pub fn value(&self) -> u16 {
        self.0.get()
    }

    pub fn from_wire(value: u16) -> Option<Self> {
        Self::new(value)
    }

    pub fn to_wire(id: Option<Self>) -> u16 {
        id.map_or(0, |id| id.value())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to an inventory held by the server's inventory store
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct InventoryKey(u64);

impl InventoryKey {
    pub fn to_u64(&self) -> u64 {
        self.0
    }

    pub fn from_u64(value: u64) -> Self {
        InventoryKey(value)
    }
}

impl fmt::Display for InventoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inventory:{}", self.0)
    }
}
