pub mod coords;
pub mod host;
pub mod prefab;
pub mod random;

pub use coords::{Footprint, GridCell};
pub use host::{MemoryHost, NodeId, SceneHost, SceneNode};
pub use prefab::{PrefabCategory, PrefabId};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
