//! # Stash Server
//! Authoritative reconciliation of client-submitted inventory layouts.
//!
//! Clients mirror inventories locally and periodically send the layout they
//! want. The server treats that layout as untrusted: it checks access, moves
//! only the items the submitter may move, and re-broadcasts the true state of
//! every touched inventory so observers converge no matter what was sent.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use stash_shared::{
        BitReader, BitWrite, BitWriter, EntityId, InventoryKey, InventoryMessageError,
        InventorySyncMessage, Position, Serde, SerdeErr, Team,
    };
}

mod access;
mod error;
mod participant;
mod server;
mod server_config;
mod sync;
mod world;

pub use access::{
    policy::{AccessPolicy, AccessTarget, Avatar, DefaultAccessPolicy},
    validator::AccessValidator,
};
pub use error::{InventorySyncError, WorldError};
pub use participant::{Participant, ParticipantKey};
pub use server::InventorySyncServer;
pub use server_config::SyncConfig;
pub use sync::{
    audit::{AuditAction, AuditLog, AuditRecord, AUDIT_LOG_TARGET},
    broadcaster::{Broadcaster, InventoryCorrection},
    report::ReconcileReport,
};
pub use world::{
    entity::{Character, Entity, ItemInfo, Structure},
    inventory::{Inventory, InventoryConfig, InventoryKind},
    inventory_world::InventoryWorld,
    registry::EntityRegistry,
};
