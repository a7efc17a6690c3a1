pub mod settings_io;

pub use settings_io::{
    list_settings, load_settings, save_settings, settings_filename, settings_path,
    SettingsIoError, SETTINGS_DIR,
};
