use bevy::prelude::*;

pub mod generator;
pub mod gizmos;
pub mod prefab_library;
pub mod world_host;

pub use generator::{
    clear_building, generate_building, BuildingGenerator, BuildingRequest, GeneratorOptions,
};
pub use prefab_library::{PrefabAsset, PrefabLibrary};
pub use world_host::{BuildingAnchor, BuildingPart, WorldSceneHost};

/// Building spawn plugin for Towerforge.
/// Spawns generated building parts into the world and owns their lifecycle.
pub struct TfEntitySpawnPlugin;

impl Plugin for TfEntitySpawnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BuildingGenerator>()
            .init_resource::<PrefabLibrary>()
            .init_resource::<BuildingRequest>()
            .add_systems(Startup, generator::auto_generate_on_start)
            .add_systems(Update, generator::update_systems())
            .add_systems(Update, gizmos::draw_building_bounds);
    }
}
