use common::config::Validate;
use common::games::snake::SnakeSettings;
use common::logger::LogLevel;
use serde::{Deserialize, Serialize};

use super::{ConfigManager, FileContentConfigProvider, ThemePreference, YamlConfigSerializer};

pub const DEFAULT_CONFIG_FILE: &str = "snake_widget_config.yaml";

pub type ClientConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

pub fn get_config_manager(path: &str) -> ClientConfigManager {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub game: SnakeSettings,
    pub theme: ThemePreference,
    pub log_level: LogLevel,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate().map_err(|e| format!("game: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_snake_widget_config_{}.yaml", random_number));
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let serialized_string = serializer.serialize(&default_config).unwrap();
        let deserialized_config: Config = serializer.deserialize(&serialized_string).unwrap();
        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_config_persists_through_manager() {
        let config = Config {
            theme: ThemePreference::Dracula,
            log_level: LogLevel::Debug,
            ..Config::default()
        };
        let file_path = get_temp_file_path();
        let manager = get_config_manager(&file_path);

        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);

        let reloaded = get_config_manager(&file_path);
        assert_eq!(reloaded.get_config().unwrap(), config);
        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_theme_update_only_touches_theme() {
        let file_path = get_temp_file_path();
        let manager = get_config_manager(&file_path);
        let updated = manager.update(|c| c.theme = ThemePreference::Forest).unwrap();
        assert_eq!(updated.theme, ThemePreference::Forest);
        assert_eq!(updated.game, SnakeSettings::default());

        let content = FileContentConfigProvider::new(file_path.as_str())
            .get_config_content()
            .unwrap()
            .unwrap();
        assert!(content.contains("theme: forest"));
        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager = get_config_manager("this_file_does_not_exist.yaml");
        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let file_path = get_temp_file_path();
        FileContentConfigProvider::new(file_path.as_str())
            .set_config_content("theme: retro\ngame:\n  initial_interval_ms: 200\n")
            .unwrap();
        let config = get_config_manager(&file_path).get_config().unwrap();
        assert_eq!(config.theme, ThemePreference::Retro);
        assert_eq!(config.game.initial_interval_ms, 200);
        assert_eq!(config.game.cell_size_px, 20);
        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let invalid_config_content = r#"
            game:
              canvas_width_px: 400
              canvas_height_px: 400
              cell_size_px: 20
              start_x: 40
              start_y: 8
            theme: dark
        "#;

        let file_path = get_temp_file_path();
        FileContentConfigProvider::new(file_path.as_str())
            .set_config_content(invalid_config_content)
            .unwrap();

        let get_result = get_config_manager(&file_path).get_config();
        assert!(get_result.is_err());
        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        let serializer = YamlConfigSerializer::new();
        let result: Result<Config, _> = serializer.deserialize("theme: neon\n");
        assert!(result.is_err());
    }
}
