use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod building_panel;

pub use building_panel::BuildingEditorState;

/// Editor plugin for Towerforge.
/// Provides the egui panel that drives building generation.
pub struct TfEditorPlugin;

impl Plugin for TfEditorPlugin {
    fn build(&self, app: &mut App) {
        // Only add EguiPlugin if not already added
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin);
        }

        app.init_resource::<BuildingEditorState>()
            .add_systems(Update, building_panel::building_panel_system);
    }
}
