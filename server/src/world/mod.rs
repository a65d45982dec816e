pub mod entity;
pub mod inventory;
pub mod inventory_world;
pub mod registry;
