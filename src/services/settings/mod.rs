// Settings module
// Loading and saving the layout configuration file

mod service;

pub use service::{default_config_path, load_config_or_default, SettingsService};
