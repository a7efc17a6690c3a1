//! Placement policies for the three building types.
//!
//! Each policy scans the building grid and returns resolved placements:
//! the prefab has already been drawn from its pool, so the session only has
//! to hand them to the scene host. Empty pools produce no placements.

use bevy::log::{debug, warn};
use bevy::math::{Quat, Vec3};
use tf_core::{Footprint, GridCell, PrefabCategory, PrefabId, RandomSource};

use crate::settings::{BuildingSettings, BuildingType};

/// A prefab to spawn under the building anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub category: PrefabCategory,
    pub prefab: PrefabId,
    pub position: Vec3,
    pub rotation: Quat,
}

impl Placement {
    fn at_cell(category: PrefabCategory, prefab: PrefabId, cell: GridCell) -> Self {
        Self {
            category,
            prefab,
            position: cell.to_local(),
            rotation: Quat::IDENTITY,
        }
    }
}

/// Role of a perimeter cell in a windowed building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRole {
    Corner,
    WallRow,
    WindowFill,
}

/// Classify a perimeter cell for [`BuildingType::CornerWallsWithWindows`].
///
/// Storey 0 is never a wall row even though `0 % interval == 0`.
pub fn classify_cell(footprint: Footprint, window_interval: u32, x: u32, height: u32, z: u32) -> CellRole {
    if footprint.is_corner(x, z) {
        CellRole::Corner
    } else if height > 0 && height.checked_rem(window_interval) == Some(0) {
        CellRole::WallRow
    } else {
        CellRole::WindowFill
    }
}

/// Run the policy selected by `settings.building_type`.
pub fn plan_building(settings: &BuildingSettings, rng: &mut impl RandomSource) -> Vec<Placement> {
    match settings.building_type {
        BuildingType::CornerWalls => plan_corner_walls(settings, rng),
        BuildingType::HeightBasedPrefabs => plan_height_based(settings, rng),
        BuildingType::CornerWallsWithWindows => plan_corner_walls_with_windows(settings, rng),
    }
}

/// Corner columns only; a fresh corner prefab per storey and corner.
pub fn plan_corner_walls(settings: &BuildingSettings, rng: &mut impl RandomSource) -> Vec<Placement> {
    if settings.corner_prefabs.is_empty() {
        warn!("Corner-wall building has no corner prefabs assigned; no corners will be generated");
        return Vec::new();
    }

    let footprint = settings.footprint();
    let mut placements = Vec::with_capacity(settings.height as usize * 4);

    for y in 0..settings.height {
        for (x, z) in footprint.corners() {
            if let Some(prefab) = settings.corner_prefabs.pick(rng) {
                placements.push(Placement::at_cell(
                    PrefabCategory::Corner,
                    prefab,
                    GridCell::new(x, y, z),
                ));
            }
        }
    }

    placements
}

/// Full perimeter with one wall prefab per storey.
///
/// The draw happens once per storey and is reused for every cell of that
/// storey; this must not be folded into a per-cell loop.
pub fn plan_height_based(settings: &BuildingSettings, rng: &mut impl RandomSource) -> Vec<Placement> {
    let footprint = settings.footprint();
    let mut placements = Vec::with_capacity(settings.height as usize * footprint.perimeter_len());

    for y in 0..settings.height {
        let Some(prefab) = settings.wall_prefabs.pick(rng) else {
            debug!("No wall prefab for storey {}; skipping", y);
            continue;
        };

        for (x, z) in footprint.perimeter() {
            placements.push(Placement::at_cell(
                PrefabCategory::Wall,
                prefab,
                GridCell::new(x, y, z),
            ));
        }
    }

    placements
}

/// Corners, wall rows every `window_interval` storeys and window fill.
///
/// Every cell draws its own prefab. Corners fall back to the wall pool when
/// no corner prefabs are assigned.
pub fn plan_corner_walls_with_windows(
    settings: &BuildingSettings,
    rng: &mut impl RandomSource,
) -> Vec<Placement> {
    let footprint = settings.footprint();
    let mut placements = Vec::with_capacity(settings.height as usize * footprint.perimeter_len());

    for y in 0..settings.height {
        for (x, z) in footprint.perimeter() {
            let role = classify_cell(footprint, settings.window_interval, x, y, z);
            if let Some((category, prefab)) = resolve_role(settings, role, rng) {
                placements.push(Placement::at_cell(category, prefab, GridCell::new(x, y, z)));
            }
        }
    }

    placements
}

fn resolve_role(
    settings: &BuildingSettings,
    role: CellRole,
    rng: &mut impl RandomSource,
) -> Option<(PrefabCategory, PrefabId)> {
    match role {
        CellRole::Corner => settings
            .corner_prefabs
            .pick(rng)
            .map(|prefab| (PrefabCategory::Corner, prefab))
            .or_else(|| {
                settings
                    .wall_prefabs
                    .pick(rng)
                    .map(|prefab| (PrefabCategory::Wall, prefab))
            }),
        CellRole::WallRow => settings
            .wall_prefabs
            .pick(rng)
            .map(|prefab| (PrefabCategory::Wall, prefab)),
        CellRole::WindowFill => settings
            .window_prefabs
            .pick(rng)
            .map(|prefab| (PrefabCategory::Window, prefab)),
    }
}
