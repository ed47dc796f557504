mod main_config;
mod theme;

pub(crate) use common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

pub use main_config::{get_config_manager, Config, ClientConfigManager, DEFAULT_CONFIG_FILE};
pub use theme::ThemePreference;
