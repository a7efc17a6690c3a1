use bevy::prelude::*;

use crate::generator::BuildingGenerator;

const VOLUME_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);
const BASE_COLOR: Color = Color::srgb(0.0, 1.0, 0.0);

/// Outline the building volume and its base.
pub fn draw_building_bounds(mut gizmos: Gizmos, generator: Res<BuildingGenerator>) {
    if !generator.options.show_gizmos {
        return;
    }

    let settings = &generator.settings;
    let size = Vec3::new(
        settings.width as f32,
        settings.height as f32,
        settings.depth as f32,
    );
    let origin = generator.origin.translation;

    gizmos.cuboid(
        Transform::from_translation(origin + size / 2.0).with_scale(size),
        VOLUME_COLOR,
    );

    let base_center = origin + Vec3::new(size.x / 2.0, 0.0, size.z / 2.0);
    gizmos.cuboid(
        Transform::from_translation(base_center).with_scale(Vec3::new(size.x, 0.1, size.z)),
        BASE_COLOR,
    );
}
