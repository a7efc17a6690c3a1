//! Sign overlay, applied after any building type.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::math::{Quat, Vec3};
use tf_core::{PrefabCategory, RandomSource};

use crate::placement::Placement;
use crate::settings::BuildingSettings;

/// Outer wall a sign is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignWall {
    /// Faces negative Z.
    Front,
    /// Faces positive Z.
    Back,
    /// Faces negative X.
    Left,
    /// Faces positive X.
    Right,
}

impl SignWall {
    /// Rotation about the vertical axis for a sign on this wall.
    pub fn rotation(&self) -> Quat {
        match self {
            Self::Front => Quat::IDENTITY,
            Self::Back => Quat::from_rotation_y(PI),
            Self::Left => Quat::from_rotation_y(FRAC_PI_2),
            Self::Right => Quat::from_rotation_y(-FRAC_PI_2),
        }
    }
}

/// Scan the interior columns of every wall and roll for a sign at each.
///
/// Every wall position gets its own trial. A successful trial with an empty
/// sign pool spawns nothing.
pub fn plan_signs(settings: &BuildingSettings, rng: &mut impl RandomSource) -> Vec<Placement> {
    let signs = &settings.signs;
    let mut placements = Vec::new();
    if signs.height_interval == 0 {
        return placements;
    }

    let width = settings.width as f32;
    let depth = settings.depth as f32;
    let offset = signs.wall_offset;

    for y in (signs.start_height..settings.height).step_by(signs.height_interval as usize) {
        let y = y as f32;

        for x in 1..settings.width {
            let x = x as f32;
            roll_sign(settings, rng, SignWall::Front, Vec3::new(x, y, -offset), &mut placements);
            roll_sign(settings, rng, SignWall::Back, Vec3::new(x, y, depth + offset), &mut placements);
        }

        for z in 1..settings.depth {
            let z = z as f32;
            roll_sign(settings, rng, SignWall::Left, Vec3::new(-offset, y, z), &mut placements);
            roll_sign(settings, rng, SignWall::Right, Vec3::new(width + offset, y, z), &mut placements);
        }
    }

    placements
}

fn roll_sign(
    settings: &BuildingSettings,
    rng: &mut impl RandomSource,
    wall: SignWall,
    position: Vec3,
    placements: &mut Vec<Placement>,
) {
    if rng.next_f32() >= settings.signs.spawn_chance {
        return;
    }
    if let Some(prefab) = settings.sign_prefabs.pick(rng) {
        placements.push(Placement {
            category: PrefabCategory::Sign,
            prefab,
            position,
            rotation: wall.rotation(),
        });
    }
}

/// Number of wall positions [`plan_signs`] rolls for.
pub fn sign_trial_count(settings: &BuildingSettings) -> usize {
    let signs = &settings.signs;
    if signs.height_interval == 0 {
        return 0;
    }
    let rows = (signs.start_height..settings.height)
        .step_by(signs.height_interval as usize)
        .count();
    let per_row = 2 * settings.width.saturating_sub(1) as usize
        + 2 * settings.depth.saturating_sub(1) as usize;
    rows * per_row
}
