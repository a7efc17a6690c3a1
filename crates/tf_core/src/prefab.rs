use serde::{Deserialize, Serialize};

/// Opaque handle to a prefab. Hosts decide what content an id refers to.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Debug, Serialize, Deserialize)]
pub struct PrefabId(pub u32);

/// Structural category a prefab pool belongs to.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum PrefabCategory {
    Wall,
    Window,
    Corner,
    Sign,
}

impl PrefabCategory {
    /// Get the display name for UI and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Wall => "Wall",
            Self::Window => "Window",
            Self::Corner => "Corner",
            Self::Sign => "Sign",
        }
    }

    /// Get all categories in order.
    pub fn all() -> &'static [PrefabCategory] {
        &[Self::Wall, Self::Window, Self::Corner, Self::Sign]
    }
}
