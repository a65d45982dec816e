//! # Stash Shared
//! Identifiers, plain value types and the inventory sync wire message shared
//! between the stash server and the clients talking to it.

#![deny(trivial_casts, trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use stash_serde::{
    BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr, UnsignedInteger,
};

mod entity_id;
mod error;
mod messages;
mod types;

pub use entity_id::{EntityId, InventoryKey};
pub use error::InventoryMessageError;
pub use messages::inventory_sync::InventorySyncMessage;
pub use types::{Position, Team};
