use stash_shared::Team;

/// Everything the registry can hold. Inventories can be owned by any of
/// these, and access rules dispatch on the variant.
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    Character(Character),
    Structure(Structure),
    Item(ItemInfo),
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Entity::Character(character) => &character.name,
            Entity::Structure(structure) => &structure.name,
            Entity::Item(item) => &item.name,
        }
    }

    pub fn as_character(&self) -> Option<&Character> {
        match self {
            Entity::Character(character) => Some(character),
            _ => None,
        }
    }

    pub fn as_structure(&self) -> Option<&Structure> {
        match self {
            Entity::Structure(structure) => Some(structure),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&ItemInfo> {
        match self {
            Entity::Item(item) => Some(item),
            _ => None,
        }
    }
}

impl From<Character> for Entity {
    fn from(character: Character) -> Self {
        Entity::Character(character)
    }
}

impl From<Structure> for Entity {
    fn from(structure: Structure) -> Self {
        Entity::Structure(structure)
    }
}

impl From<ItemInfo> for Entity {
    fn from(item: ItemInfo) -> Self {
        Entity::Item(item)
    }
}

// Character
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    pub name: String,
    pub team: Option<Team>,
    /// Unconscious, stunned or dead
    pub incapacitated: bool,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team: None,
            incapacitated: false,
        }
    }

    pub fn with_team(mut self, team: Team) -> Self {
        self.team = Some(team);
        self
    }

    pub fn incapacitated(mut self) -> Self {
        self.incapacitated = true;
        self
    }
}

// Structure
#[derive(Clone, Debug, PartialEq)]
pub struct Structure {
    pub name: String,
    /// `None` means anyone may use it
    pub team: Option<Team>,
}

impl Structure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team: None,
        }
    }

    pub fn with_team(mut self, team: Team) -> Self {
        self.team = Some(team);
        self
    }
}

// ItemInfo
/// Static description of an item. Where the item currently is lives in the
/// `InventoryWorld`, not here.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemInfo {
    pub name: String,
    pub tags: Vec<String>,
    /// Equipped items that are not detachable stay put (e.g. handcuffs)
    pub detachable: bool,
    /// Hidden items can never be claimed by a client
    pub hidden: bool,
}

impl ItemInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            detachable: true,
            hidden: false,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn non_detachable(mut self) -> Self {
        self.detachable = false;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|own| own == tag)
    }
}
