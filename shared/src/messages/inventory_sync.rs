use stash_serde::{BitReader, BitWrite, BitWriter, ConstBitLength, Serde};

use crate::{EntityId, InventoryMessageError};

/// Full slot layout of one inventory.
///
/// On the wire this is exactly `capacity` unsigned 16-bit ids in slot order,
/// low byte first, with `0` meaning an empty slot. The capacity itself is not
/// transmitted: both sides know it from the inventory the message addresses.
/// Clients send it as their desired layout; the server sends it back as the
/// corrected, authoritative layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventorySyncMessage {
    slots: Vec<Option<EntityId>>,
}

impl InventorySyncMessage {
    pub fn new(slots: Vec<Option<EntityId>>) -> Self {
        Self { slots }
    }

    pub fn empty(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Option<EntityId>] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<Option<EntityId>> {
        self.slots
    }

    /// Reads exactly `capacity` slot ids. Anything after them belongs to the
    /// transport and is left unread.
    pub fn read(reader: &mut BitReader, capacity: usize) -> Result<Self, InventoryMessageError> {
        let mut slots = Vec::with_capacity(capacity);
        for read in 0..capacity {
            let Ok(raw) = u16::de(reader) else {
                return Err(InventoryMessageError::Truncated {
                    expected: capacity,
                    read,
                });
            };
            slots.push(EntityId::from_wire(raw));
        }
        Ok(Self { slots })
    }

    pub fn from_bytes(bytes: &[u8], capacity: usize) -> Result<Self, InventoryMessageError> {
        let mut reader = BitReader::new(bytes);
        Self::read(&mut reader, capacity)
    }

    pub fn write(&self, writer: &mut dyn BitWrite) {
        for slot in &self.slots {
            EntityId::to_wire(*slot).ser(writer);
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BitWriter::new();
        self.write(&mut writer);
        writer.to_bytes()
    }

    pub fn bit_length(&self) -> u32 {
        self.slots.len() as u32 * <u16 as ConstBitLength>::const_bit_length()
    }
}
