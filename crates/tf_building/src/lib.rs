//! Procedural building placement.
//!
//! Policies map building settings to prefab placements; the session spawns
//! them through a [`tf_core::SceneHost`] and owns the result.

pub mod error;
pub mod placement;
pub mod session;
pub mod settings;
pub mod signs;

pub use error::SettingsError;
pub use placement::{classify_cell, plan_building, CellRole, Placement};
pub use session::{GenerationReport, GenerationSession};
pub use settings::{BuildingSettings, BuildingType, PrefabPool, SignSettings};
pub use signs::{plan_signs, sign_trial_count, SignWall};
