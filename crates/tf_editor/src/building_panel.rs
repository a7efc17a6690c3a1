use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use tf_building::{BuildingSettings, BuildingType};
use tf_core::PrefabCategory;
use tf_entity_spawn::{BuildingGenerator, BuildingRequest, PrefabLibrary};
use tf_persistence::{list_settings, load_settings, save_settings, settings_path, SETTINGS_DIR};

/// Resource for tracking UI state in the building panel.
#[derive(Resource)]
pub struct BuildingEditorState {
    /// Name used for the saved settings file.
    pub settings_name: String,
    /// Show load dialog.
    pub show_load_dialog: bool,
    /// Available settings files for loading.
    pub available_settings: Vec<PathBuf>,
    /// Status message to display.
    pub status_message: Option<String>,
}

impl Default for BuildingEditorState {
    fn default() -> Self {
        Self {
            settings_name: "default".to_string(),
            show_load_dialog: false,
            available_settings: Vec::new(),
            status_message: None,
        }
    }
}

/// System to render the building generator panel.
pub fn building_panel_system(
    mut contexts: EguiContexts,
    mut generator: ResMut<BuildingGenerator>,
    mut request: ResMut<BuildingRequest>,
    mut ui_state: ResMut<BuildingEditorState>,
    library: Res<PrefabLibrary>,
) {
    let generator = &mut *generator;

    egui::SidePanel::left("building_panel")
        .default_width(220.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Building Generator");
            ui.label("Unified system for all building generation types");
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Generate Building").clicked() {
                    request.generate = true;
                }
                if ui.button("Clear Building").clicked() {
                    request.clear = true;
                }
            });
            ui.add_space(8.0);

            // Quick type selection regenerates immediately
            ui.label("Building Type:");
            ui.horizontal(|ui| {
                for building_type in BuildingType::all() {
                    let selected = generator.settings.building_type == *building_type;
                    if ui.selectable_label(selected, building_type.label()).clicked() {
                        generator.settings.building_type = *building_type;
                        request.generate = true;
                    }
                }
            });
            ui.group(|ui| {
                ui.strong("Building Type Information:");
                ui.label(building_type_info(&generator.settings));
            });
            ui.add_space(8.0);

            ui.collapsing("Dimensions", |ui| {
                let settings = &mut generator.settings;
                ui.add(egui::Slider::new(&mut settings.width, 1..=40).text("Width"));
                ui.add(egui::Slider::new(&mut settings.depth, 1..=40).text("Depth"));
                ui.add(egui::Slider::new(&mut settings.height, 1..=60).text("Height"));
                ui.add(egui::Slider::new(&mut settings.window_interval, 1..=20).text("Window Interval"));
            });
            ui.add_space(8.0);

            // Sign overlay; toggling regenerates
            ui.group(|ui| {
                ui.label("Sign Generation (any type):");
                let signs = &mut generator.settings.signs;
                if ui.checkbox(&mut signs.enabled, "Enable Signs").changed() {
                    request.generate = true;
                }
                if signs.enabled {
                    ui.add(egui::Slider::new(&mut signs.spawn_chance, 0.0..=1.0).text("Spawn Chance"));
                    ui.add(egui::Slider::new(&mut signs.height_interval, 1..=10).text("Height Interval"));
                    ui.add(egui::Slider::new(&mut signs.start_height, 0..=20).text("Start Height"));
                    ui.add(egui::Slider::new(&mut signs.wall_offset, 0.01..=1.0).text("Wall Offset"));
                    if ui.button("Regenerate with Current Settings").clicked() {
                        request.generate = true;
                    }
                }
            });
            ui.add_space(8.0);

            ui.collapsing("Prefab Pools", |ui| {
                for category in PrefabCategory::all() {
                    let count = generator.settings.pool(*category).len();
                    ui.label(format!("{}: {} prefabs", category.name(), count));
                }
                if ui.button("Use Library Prefabs").clicked() {
                    library.fill_pools(&mut generator.settings);
                }
            });

            ui.collapsing("Options", |ui| {
                let options = &mut generator.options;
                ui.checkbox(&mut options.clear_previous, "Clear Previous Building");
                ui.checkbox(&mut options.show_gizmos, "Show Gizmos");
                ui.add(egui::Slider::new(&mut options.build_delay_secs, 0.0..=3.0).text("Build Delay (s)"));
            });
            ui.add_space(8.0);

            ui.separator();
            ui.label(format!("Objects: {}", generator.instance_count()));
            if generator.is_pending() {
                ui.label("Generation scheduled...");
            }
            if let Some(err) = generator.last_error() {
                ui.colored_label(egui::Color32::LIGHT_RED, err.to_string());
            }
            ui.separator();

            // Save/Load
            ui.label("Settings Name:");
            ui.text_edit_singleline(&mut ui_state.settings_name);

            if ui.button("Save Settings").clicked() {
                let path = settings_path(&ui_state.settings_name);
                match save_settings(&path, &generator.settings) {
                    Ok(()) => {
                        ui_state.status_message = Some(format!("Saved to {}", path.display()));
                        info!("Saved building settings to {}", path.display());
                    }
                    Err(e) => {
                        ui_state.status_message = Some(format!("Save failed: {}", e));
                        error!("Failed to save building settings: {}", e);
                    }
                }
            }

            if ui.button("Load Settings...").clicked() {
                ui_state.show_load_dialog = true;
                ui_state.available_settings = list_settings(Path::new(SETTINGS_DIR)).unwrap_or_default();
            }

            if let Some(msg) = &ui_state.status_message {
                ui.add_space(8.0);
                ui.label(msg);
            }
        });

    if ui_state.show_load_dialog {
        let mut close_dialog = false;
        let mut load_path: Option<PathBuf> = None;

        egui::Window::new("Load Building Settings")
            .collapsible(false)
            .resizable(true)
            .show(contexts.ctx_mut(), |ui| {
                egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                    for path in &ui_state.available_settings {
                        let name = path
                            .file_stem()
                            .and_then(|s| s.to_str())
                            .unwrap_or("Unknown");

                        if ui.selectable_label(false, name).clicked() {
                            load_path = Some(path.clone());
                            close_dialog = true;
                        }
                    }

                    if ui_state.available_settings.is_empty() {
                        ui.label("No saved buildings found.");
                    }
                });

                ui.separator();
                if ui.button("Cancel").clicked() {
                    close_dialog = true;
                }
            });

        if close_dialog {
            ui_state.show_load_dialog = false;
        }

        if let Some(path) = load_path {
            match load_settings(&path) {
                Ok(loaded) => {
                    generator.settings = loaded;
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        ui_state.settings_name = stem.to_string();
                    }
                    request.generate = true;
                    ui_state.status_message = Some(format!("Loaded {}", path.display()));
                    info!("Loaded building settings from {}", path.display());
                }
                Err(e) => {
                    ui_state.status_message = Some(format!("Load failed: {}", e));
                    error!("Failed to load building settings: {}", e);
                }
            }
        }
    }
}

/// Description of the selected building type, with a note when signs are on.
pub fn building_type_info(settings: &BuildingSettings) -> String {
    let mut info = settings.building_type.description().to_string();
    if settings.signs.enabled {
        info.push_str("\n\nSigns enabled: signs are placed on the walls using the sign settings.");
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_info_follows_selected_type() {
        let mut settings = BuildingSettings::default();
        for building_type in BuildingType::all() {
            settings.building_type = *building_type;
            assert_eq!(building_type_info(&settings), building_type.description());
        }
    }

    #[test]
    fn type_info_mentions_signs_when_enabled() {
        let mut settings = BuildingSettings::default();
        settings.signs.enabled = true;

        let info = building_type_info(&settings);
        assert!(info.starts_with(settings.building_type.description()));
        assert!(info.contains("Signs enabled"));
    }
}
