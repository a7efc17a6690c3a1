use bevy::prelude::*;
use tf_core::{PrefabId, SceneHost};

use crate::prefab_library::PrefabLibrary;

/// Marker for the entity that parents a generated building.
#[derive(Component, Debug)]
pub struct BuildingAnchor;

/// Marker for a spawned building part.
#[derive(Component, Debug, Clone, Copy)]
pub struct BuildingPart {
    pub prefab: PrefabId,
}

/// [`SceneHost`] over a Bevy `World`.
///
/// Prefabs are looked up in the [`PrefabLibrary`] resource; ids it does not
/// know fail to spawn.
pub struct WorldSceneHost<'w> {
    world: &'w mut World,
    origin: Transform,
}

impl<'w> WorldSceneHost<'w> {
    /// Anchors are spawned at `origin`.
    pub fn new(world: &'w mut World, origin: Transform) -> Self {
        Self { world, origin }
    }
}

impl SceneHost for WorldSceneHost<'_> {
    type Handle = Entity;

    fn create_anchor(&mut self, name: &str) -> Entity {
        self.world
            .spawn((
                Name::new(name.to_string()),
                self.origin,
                Visibility::default(),
                BuildingAnchor,
            ))
            .id()
    }

    fn spawn(
        &mut self,
        prefab: PrefabId,
        local_position: Vec3,
        local_rotation: Quat,
        parent: Entity,
    ) -> Option<Entity> {
        if !self.world.entities().contains(parent) {
            return None;
        }
        let asset = self.world.get_resource::<PrefabLibrary>()?.get(prefab)?.clone();

        let child = self
            .world
            .spawn((
                Name::new(asset.name),
                Mesh3d(asset.mesh),
                MeshMaterial3d(asset.material),
                Transform::from_translation(local_position).with_rotation(local_rotation),
                BuildingPart { prefab },
            ))
            .id();
        self.world.entity_mut(parent).add_child(child);
        Some(child)
    }

    fn destroy(&mut self, handle: Entity) {
        if self.world.entities().contains(handle) {
            self.world.entity_mut(handle).despawn_recursive();
        }
    }
}
