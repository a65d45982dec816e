/// World-space position of a physical entity
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Team affiliation used by access rules
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Team(pub u8);
