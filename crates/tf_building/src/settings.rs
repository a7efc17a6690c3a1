use serde::{Deserialize, Serialize};
use tf_core::{Footprint, PrefabCategory, PrefabId, RandomSource};

use crate::error::SettingsError;

/// Placement strategy for a building.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildingType {
    /// Corner columns only, one corner prefab per storey and corner.
    #[default]
    CornerWalls,
    /// Full perimeter, one wall prefab chosen per storey.
    HeightBasedPrefabs,
    /// Corners, wall rows every `window_interval` storeys, windows elsewhere.
    CornerWallsWithWindows,
}

impl BuildingType {
    /// Identifier used for anchor names and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CornerWalls => "Type1_CornerWalls",
            Self::HeightBasedPrefabs => "Type2_HeightBasedPrefabs",
            Self::CornerWallsWithWindows => "Type3_CornerWallsWithWindows",
        }
    }

    /// Short label for UI buttons.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CornerWalls => "Corner Walls",
            Self::HeightBasedPrefabs => "Height Based",
            Self::CornerWallsWithWindows => "Windows",
        }
    }

    /// One-line summary of how the type places prefabs.
    pub fn description(&self) -> &'static str {
        match self {
            Self::CornerWalls => {
                "Places corner prefabs at the four corners of every storey. \
                 Nothing is placed when the corner pool is empty."
            }
            Self::HeightBasedPrefabs => {
                "Picks one wall prefab per storey and repeats it around the whole perimeter."
            }
            Self::CornerWallsWithWindows => {
                "Corner prefabs at corners (walls as fallback), wall rows every window \
                 interval, windows everywhere else."
            }
        }
    }

    /// Get all building types in order.
    pub fn all() -> &'static [BuildingType] {
        &[
            Self::CornerWalls,
            Self::HeightBasedPrefabs,
            Self::CornerWallsWithWindows,
        ]
    }
}

/// Interchangeable prefabs for one structural category.
///
/// An empty pool is valid and means "skip this category".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefabPool {
    prefabs: Vec<PrefabId>,
}

impl PrefabPool {
    pub fn new(prefabs: Vec<PrefabId>) -> Self {
        Self { prefabs }
    }

    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prefabs.len()
    }

    pub fn prefabs(&self) -> &[PrefabId] {
        &self.prefabs
    }

    pub fn push(&mut self, prefab: PrefabId) {
        self.prefabs.push(prefab);
    }

    pub fn clear(&mut self) {
        self.prefabs.clear();
    }

    /// Uniform pick over the pool. Draws from `rng` only when the pool is non-empty.
    pub fn pick(&self, rng: &mut impl RandomSource) -> Option<PrefabId> {
        if self.prefabs.is_empty() {
            return None;
        }
        self.prefabs.get(rng.next_index(self.prefabs.len())).copied()
    }
}

/// Sign overlay parameters. Applies on top of any building type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignSettings {
    pub enabled: bool,
    /// Probability of a sign at each scanned wall position.
    pub spawn_chance: f32,
    /// Storeys between sign rows.
    pub height_interval: u32,
    /// First storey that can carry signs.
    pub start_height: u32,
    /// Distance from the wall surface.
    pub wall_offset: f32,
}

impl Default for SignSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            spawn_chance: 0.7,
            height_interval: 2,
            start_height: 1,
            wall_offset: 0.1,
        }
    }
}

/// Everything needed to generate one building.
///
/// This is the top-level serializable structure saved by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingSettings {
    pub building_type: BuildingType,
    pub width: u32,
    pub depth: u32,
    pub height: u32,
    pub wall_prefabs: PrefabPool,
    pub window_prefabs: PrefabPool,
    pub corner_prefabs: PrefabPool,
    pub sign_prefabs: PrefabPool,
    /// Storeys between wall rows in [`BuildingType::CornerWallsWithWindows`].
    pub window_interval: u32,
    pub signs: SignSettings,
}

impl Default for BuildingSettings {
    fn default() -> Self {
        Self {
            building_type: BuildingType::CornerWalls,
            width: 10,
            depth: 10,
            height: 5,
            wall_prefabs: PrefabPool::default(),
            window_prefabs: PrefabPool::default(),
            corner_prefabs: PrefabPool::default(),
            sign_prefabs: PrefabPool::default(),
            window_interval: 5,
            signs: SignSettings::default(),
        }
    }
}

impl BuildingSettings {
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.width, self.depth)
    }

    pub fn pool(&self, category: PrefabCategory) -> &PrefabPool {
        match category {
            PrefabCategory::Wall => &self.wall_prefabs,
            PrefabCategory::Window => &self.window_prefabs,
            PrefabCategory::Corner => &self.corner_prefabs,
            PrefabCategory::Sign => &self.sign_prefabs,
        }
    }

    pub fn pool_mut(&mut self, category: PrefabCategory) -> &mut PrefabPool {
        match category {
            PrefabCategory::Wall => &mut self.wall_prefabs,
            PrefabCategory::Window => &mut self.window_prefabs,
            PrefabCategory::Corner => &mut self.corner_prefabs,
            PrefabCategory::Sign => &mut self.sign_prefabs,
        }
    }

    /// Reject configurations that would make the grid scan ill-defined.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.window_interval == 0 {
            return Err(SettingsError::ZeroWindowInterval);
        }
        if self.signs.height_interval == 0 {
            return Err(SettingsError::ZeroSignHeightInterval);
        }
        if !(0.0..=1.0).contains(&self.signs.spawn_chance) {
            return Err(SettingsError::SpawnChanceOutOfRange(self.signs.spawn_chance));
        }
        let offset = self.signs.wall_offset;
        if !(offset > 0.0 && offset <= 1.0) {
            return Err(SettingsError::WallOffsetOutOfRange(offset));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_core::ScriptedRandom;

    #[test]
    fn building_types_are_described() {
        let descriptions: std::collections::HashSet<_> =
            BuildingType::all().iter().map(|t| t.description()).collect();
        assert_eq!(descriptions.len(), BuildingType::all().len());
        assert!(descriptions.iter().all(|d| !d.is_empty()));
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(BuildingSettings::default().validate(), Ok(()));
    }

    #[test]
    fn zero_intervals_rejected() {
        let mut settings = BuildingSettings::default();
        settings.window_interval = 0;
        assert_eq!(settings.validate(), Err(SettingsError::ZeroWindowInterval));

        let mut settings = BuildingSettings::default();
        settings.signs.height_interval = 0;
        assert_eq!(settings.validate(), Err(SettingsError::ZeroSignHeightInterval));
    }

    #[test]
    fn sign_ranges_checked() {
        let mut settings = BuildingSettings::default();
        settings.signs.spawn_chance = 1.5;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::SpawnChanceOutOfRange(_))
        ));

        let mut settings = BuildingSettings::default();
        settings.signs.wall_offset = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::WallOffsetOutOfRange(_))
        ));

        settings.signs.wall_offset = 1.0;
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn empty_pool_does_not_draw() {
        let mut rng = ScriptedRandom::constant(0.0);
        assert_eq!(PrefabPool::default().pick(&mut rng), None);
        assert_eq!(rng.index_draws(), 0);
    }

    #[test]
    fn pick_uses_drawn_index() {
        let pool = PrefabPool::new(vec![PrefabId(10), PrefabId(11), PrefabId(12)]);
        let mut rng = ScriptedRandom::new(vec![], vec![2, 1]);
        assert_eq!(pool.pick(&mut rng), Some(PrefabId(12)));
        assert_eq!(pool.pick(&mut rng), Some(PrefabId(11)));
    }

    #[test]
    fn pool_by_category() {
        let mut settings = BuildingSettings::default();
        settings.pool_mut(PrefabCategory::Sign).push(PrefabId(4));
        assert_eq!(settings.sign_prefabs.prefabs(), &[PrefabId(4)]);
        assert!(settings.pool(PrefabCategory::Wall).is_empty());
    }
}
