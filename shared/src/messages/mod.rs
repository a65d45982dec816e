pub mod inventory_sync;
