use eframe::egui;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
    Dracula,
    Retro,
    Forest,
}

impl ThemePreference {
    pub const ALL: [ThemePreference; 5] = [
        ThemePreference::Light,
        ThemePreference::Dark,
        ThemePreference::Dracula,
        ThemePreference::Retro,
        ThemePreference::Forest,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::Dracula => "dracula",
            ThemePreference::Retro => "retro",
            ThemePreference::Forest => "forest",
        }
    }

    /// Label for menus. The configured default shows as "Default".
    pub fn label(&self) -> &'static str {
        if *self == ThemePreference::default() {
            "Default"
        } else {
            self.name()
        }
    }

    pub fn is_dark(&self) -> bool {
        !matches!(self, ThemePreference::Light | ThemePreference::Retro)
    }

    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = if self.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        match self {
            ThemePreference::Dracula => {
                visuals.panel_fill = egui::Color32::from_rgb(40, 42, 54);
                visuals.window_fill = egui::Color32::from_rgb(40, 42, 54);
            }
            ThemePreference::Retro => {
                visuals.panel_fill = egui::Color32::from_rgb(236, 227, 202);
                visuals.window_fill = egui::Color32::from_rgb(236, 227, 202);
            }
            ThemePreference::Forest => {
                visuals.panel_fill = egui::Color32::from_rgb(23, 18, 18);
                visuals.window_fill = egui::Color32::from_rgb(23, 18, 18);
            }
            ThemePreference::Light | ThemePreference::Dark => {}
        }
        visuals
    }
}
