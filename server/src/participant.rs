use stash_shared::EntityId;

/// Identifies a connected participant for the lifetime of its connection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantKey(u64);

impl ParticipantKey {
    pub fn to_u64(&self) -> u64 {
        self.0
    }

    pub fn from_u64(value: u64) -> Self {
        ParticipantKey(value)
    }
}

/// A connection plus the avatar it controls, if one is spawned
#[derive(Clone, Debug)]
pub struct Participant {
    key: ParticipantKey,
    name: String,
    avatar: Option<EntityId>,
}

impl Participant {
    pub fn new(key: ParticipantKey, name: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: EntityId) -> Self {
        self.avatar = Some(avatar);
        self
    }

    pub fn key(&self) -> ParticipantKey {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn avatar(&self) -> Option<EntityId> {
        self.avatar
    }

    pub fn set_avatar(&mut self, avatar: Option<EntityId>) {
        self.avatar = avatar;
    }
}
