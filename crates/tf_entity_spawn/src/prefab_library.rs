use std::collections::BTreeMap;

use bevy::prelude::*;
use tf_building::BuildingSettings;
use tf_core::{PrefabCategory, PrefabId};

/// Renderable content behind a [`PrefabId`].
#[derive(Debug, Clone)]
pub struct PrefabAsset {
    pub name: String,
    pub category: PrefabCategory,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Registry mapping prefab ids to meshes and materials.
#[derive(Resource, Debug, Default)]
pub struct PrefabLibrary {
    prefabs: BTreeMap<PrefabId, PrefabAsset>,
    next_id: u32,
}

impl PrefabLibrary {
    /// Register a prefab and return its id.
    pub fn register(&mut self, asset: PrefabAsset) -> PrefabId {
        let id = PrefabId(self.next_id);
        self.next_id += 1;
        self.prefabs.insert(id, asset);
        id
    }

    pub fn get(&self, id: PrefabId) -> Option<&PrefabAsset> {
        self.prefabs.get(&id)
    }

    pub fn len(&self) -> usize {
        self.prefabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrefabId, &PrefabAsset)> {
        self.prefabs.iter().map(|(id, asset)| (*id, asset))
    }

    /// Ids registered under `category`, in registration order.
    pub fn ids_in(&self, category: PrefabCategory) -> Vec<PrefabId> {
        self.iter()
            .filter(|(_, asset)| asset.category == category)
            .map(|(id, _)| id)
            .collect()
    }

    /// Replace every pool in `settings` with the library's prefabs of that category.
    pub fn fill_pools(&self, settings: &mut BuildingSettings) {
        for &category in PrefabCategory::all() {
            let pool = settings.pool_mut(category);
            pool.clear();
            for id in self.ids_in(category) {
                pool.push(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, category: PrefabCategory) -> PrefabAsset {
        PrefabAsset {
            name: name.to_string(),
            category,
            mesh: Handle::default(),
            material: Handle::default(),
        }
    }

    #[test]
    fn register_assigns_sequential_ids() {
        let mut library = PrefabLibrary::default();
        let a = library.register(asset("brick", PrefabCategory::Wall));
        let b = library.register(asset("glass", PrefabCategory::Window));
        assert_eq!(a, PrefabId(0));
        assert_eq!(b, PrefabId(1));
        assert_eq!(library.get(b).map(|p| p.name.as_str()), Some("glass"));
    }

    #[test]
    fn fill_pools_by_category() {
        let mut library = PrefabLibrary::default();
        let wall = library.register(asset("brick", PrefabCategory::Wall));
        let sign = library.register(asset("neon", PrefabCategory::Sign));

        let mut settings = BuildingSettings::default();
        library.fill_pools(&mut settings);
        assert_eq!(settings.wall_prefabs.prefabs(), &[wall]);
        assert_eq!(settings.sign_prefabs.prefabs(), &[sign]);
        assert!(settings.corner_prefabs.is_empty());
    }
}
