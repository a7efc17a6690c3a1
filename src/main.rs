use bevy::prelude::*;
use tf_core::PrefabCategory;
use tf_editor::TfEditorPlugin;
use tf_entity_spawn::{BuildingGenerator, PrefabAsset, PrefabLibrary, TfEntitySpawnPlugin};
use tf_persistence::{load_settings, settings_path};

/// Settings file loaded at startup when present.
const STARTUP_SETTINGS: &str = "default";

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Towerforge - Building Generator".into(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((TfEntitySpawnPlugin, TfEditorPlugin))
        .add_systems(Startup, setup_scene)
        .add_systems(Startup, (load_startup_settings, setup_prefabs).chain())
        .run();
}

fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-14.0, 16.0, -14.0).looking_at(Vec3::new(5.0, 3.0, 5.0), Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(-4.0, 12.0, -8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Replace the default settings with `assets/buildings/default.ron` if it exists.
fn load_startup_settings(mut generator: ResMut<BuildingGenerator>) {
    let path = settings_path(STARTUP_SETTINGS);
    if !path.exists() {
        return;
    }

    match load_settings(&path) {
        Ok(settings) => {
            info!("Loaded building settings from {}", path.display());
            generator.settings = settings;
        }
        Err(e) => error!("Failed to load {}: {}", path.display(), e),
    }
}

/// Register a small set of coloured placeholder parts per category.
fn setup_prefabs(
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut library: ResMut<PrefabLibrary>,
    mut generator: ResMut<BuildingGenerator>,
) {
    let parts: [(&str, PrefabCategory, Vec3, Color); 8] = [
        ("Brick Wall", PrefabCategory::Wall, Vec3::new(0.95, 0.95, 0.95), Color::srgb(0.62, 0.32, 0.24)),
        ("Concrete Wall", PrefabCategory::Wall, Vec3::new(0.95, 0.95, 0.95), Color::srgb(0.6, 0.6, 0.58)),
        ("Plaster Wall", PrefabCategory::Wall, Vec3::new(0.95, 0.95, 0.95), Color::srgb(0.85, 0.8, 0.7)),
        ("Glass Window", PrefabCategory::Window, Vec3::new(0.9, 0.9, 0.9), Color::srgba(0.4, 0.7, 0.95, 0.6)),
        ("Framed Window", PrefabCategory::Window, Vec3::new(0.9, 0.9, 0.9), Color::srgb(0.25, 0.45, 0.6)),
        ("Stone Corner", PrefabCategory::Corner, Vec3::splat(1.0), Color::srgb(0.35, 0.35, 0.38)),
        ("Neon Sign", PrefabCategory::Sign, Vec3::new(0.6, 0.3, 0.05), Color::srgb(1.0, 0.2, 0.6)),
        ("Shop Sign", PrefabCategory::Sign, Vec3::new(0.7, 0.25, 0.05), Color::srgb(0.95, 0.85, 0.2)),
    ];

    for (name, category, size, color) in parts {
        let mut material = StandardMaterial::from(color);
        if color.alpha() < 1.0 {
            material.alpha_mode = AlphaMode::Blend;
        }

        library.register(PrefabAsset {
            name: name.to_string(),
            category,
            mesh: meshes.add(Cuboid::from_size(size)),
            material: materials.add(material),
        });
    }

    // Loaded settings keep their own pools
    let settings = &mut generator.settings;
    if PrefabCategory::all().iter().all(|c| settings.pool(*c).is_empty()) {
        library.fill_pools(settings);
    }
    info!("Registered {} prefabs", library.len());
}
