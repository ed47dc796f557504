use eframe::egui::Color32;

use crate::config::ThemePreference;

/// Hue advance per tick for the food colour cycle.
const FOOD_HUE_STEP: u64 = 24;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Color32,
    pub body: Color32,
    pub head: Color32,
    pub outline: Color32,
    pub flash: Color32,
    pub food_saturation: f32,
    pub food_lightness: f32,
}

impl Palette {
    pub fn for_theme(theme: ThemePreference) -> Self {
        match theme {
            ThemePreference::Light => Self {
                background: Color32::from_rgb(0xF2, 0xF2, 0xF2),
                body: Color32::from_rgb(0x2E, 0x7D, 0x32),
                head: Color32::from_rgb(0x1B, 0x5E, 0x20),
                outline: Color32::from_rgb(0xFF, 0xFF, 0xFF),
                flash: Color32::from_rgb(0xFF, 0xD6, 0x00),
                food_saturation: 0.75,
                food_lightness: 0.5,
            },
            ThemePreference::Dark => Self {
                background: Color32::from_rgb(0x1D, 0x23, 0x2A),
                body: Color32::from_rgb(0x66, 0xBB, 0x6A),
                head: Color32::from_rgb(0xA5, 0xD6, 0xA7),
                outline: Color32::from_rgb(0x10, 0x14, 0x18),
                flash: Color32::from_rgb(0xFF, 0xEB, 0x3B),
                food_saturation: 0.7,
                food_lightness: 0.6,
            },
            ThemePreference::Dracula => Self {
                background: Color32::from_rgb(0x28, 0x2A, 0x36),
                body: Color32::from_rgb(0xBD, 0x93, 0xF9),
                head: Color32::from_rgb(0xFF, 0x79, 0xC6),
                outline: Color32::from_rgb(0x44, 0x47, 0x5A),
                flash: Color32::from_rgb(0xF1, 0xFA, 0x8C),
                food_saturation: 0.8,
                food_lightness: 0.65,
            },
            ThemePreference::Retro => Self {
                background: Color32::from_rgb(0xE4, 0xD8, 0xB4),
                body: Color32::from_rgb(0x7D, 0x91, 0x9B),
                head: Color32::from_rgb(0x28, 0x2C, 0x34),
                outline: Color32::from_rgb(0xEC, 0xE3, 0xCA),
                flash: Color32::from_rgb(0xEF, 0x9F, 0x9F),
                food_saturation: 0.55,
                food_lightness: 0.45,
            },
            ThemePreference::Forest => Self {
                background: Color32::from_rgb(0x17, 0x12, 0x12),
                body: Color32::from_rgb(0x1E, 0xB8, 0x54),
                head: Color32::from_rgb(0x1F, 0xD6, 0x5F),
                outline: Color32::from_rgb(0x0A, 0x08, 0x08),
                flash: Color32::from_rgb(0xFB, 0xBF, 0x24),
                food_saturation: 0.7,
                food_lightness: 0.55,
            },
        }
    }

    /// Food colour for a given tick, rotating around the hue wheel.
    pub fn food_color(&self, tick: u64) -> Color32 {
        let hue = ((tick.wrapping_mul(FOOD_HUE_STEP)) % 360) as f32;
        hsl_to_color(hue, self.food_saturation, self.food_lightness)
    }
}

pub fn hsl_to_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let c = (1.0_f32 - (2.0_f32 * lightness - 1.0_f32).abs()) * saturation;
    let x = c * (1.0_f32 - ((hue / 60.0_f32) % 2.0_f32 - 1.0_f32).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = if hue < 60.0 {
        (c, x, 0.0)
    } else if hue < 120.0 {
        (x, c, 0.0)
    } else if hue < 180.0 {
        (0.0, c, x)
    } else if hue < 240.0 {
        (0.0, x, c)
    } else if hue < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Color32::from_rgb(
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}
