use std::collections::HashMap;

use stash_shared::EntityId;

use crate::{
    world::entity::{Character, Entity, ItemInfo},
    WorldError,
};

/// Entity-by-id lookup. Reconciliation only ever reads from it.
pub struct EntityRegistry {
    entities: HashMap<EntityId, Entity>,
    next_id: u16,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn item(&self, id: EntityId) -> Option<&ItemInfo> {
        self.get(id).and_then(Entity::as_item)
    }

    pub fn character(&self, id: EntityId) -> Option<&Character> {
        self.get(id).and_then(Entity::as_character)
    }

    pub fn display_name(&self, id: EntityId) -> Option<&str> {
        self.get(id).map(Entity::name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub(crate) fn insert(&mut self, entity: Entity) -> Result<EntityId, WorldError> {
        let id = self.allocate_id()?;
        self.entities.insert(id, entity);
        Ok(id)
    }

    pub(crate) fn insert_with_id(&mut self, id: EntityId, entity: Entity) -> Result<(), WorldError> {
        if self.entities.contains_key(&id) {
            return Err(WorldError::EntityAlreadyExists { id });
        }
        self.entities.insert(id, entity);
        Ok(())
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub(crate) fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    fn allocate_id(&mut self) -> Result<EntityId, WorldError> {
        // ids are 16 bits on the wire and 0 is reserved
        for _ in 0..u16::MAX {
            let candidate = self.next_id;
            self.next_id = if self.next_id == u16::MAX {
                1
            } else {
                self.next_id + 1
            };
            let Some(id) = EntityId::new(candidate) else {
                continue;
            };
            if !self.entities.contains_key(&id) {
                return Ok(id);
            }
        }
        Err(WorldError::EntityIdsExhausted)
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
