use common::games::snake::{Point, SnakeGameState};
use eframe::egui;
use eframe::egui::Color32;

use crate::colors::Palette;

/// Minimal raster surface the game is drawn onto, in grid cells.
pub trait SnakeCanvas {
    fn clear(&mut self, color: Color32);
    fn fill_cell(&mut self, cell: Point, fill: Color32, outline: Color32);
}

/// Draws onto an egui painter whose rect covers the whole grid.
pub struct PainterCanvas<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
    cell_size: f32,
}

impl<'a> PainterCanvas<'a> {
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect, cell_size: f32) -> Self {
        Self {
            painter,
            rect,
            cell_size,
        }
    }
}

impl SnakeCanvas for PainterCanvas<'_> {
    fn clear(&mut self, color: Color32) {
        self.painter.rect_filled(self.rect, 0.0, color);
    }

    fn fill_cell(&mut self, cell: Point, fill: Color32, outline: Color32) {
        let min = egui::pos2(
            self.rect.min.x + cell.x as f32 * self.cell_size,
            self.rect.min.y + cell.y as f32 * self.cell_size,
        );
        let cell_rect = egui::Rect::from_min_size(min, egui::vec2(self.cell_size, self.cell_size));
        self.painter.rect(
            cell_rect,
            2.0,
            fill,
            egui::Stroke::new(1.0, outline),
            egui::StrokeKind::Inside,
        );
    }
}

pub struct FrameView<'a> {
    pub state: &'a SnakeGameState,
    pub flashing: Option<Point>,
}

/// Draws one frame. Returns false when there was no surface to draw on.
pub fn render_frame(view: &FrameView<'_>, palette: &Palette, canvas: Option<&mut dyn SnakeCanvas>) -> bool {
    let Some(canvas) = canvas else {
        return false;
    };

    canvas.clear(palette.background);

    for (index, segment) in view.state.snake().segments().enumerate() {
        let fill = if view.flashing == Some(*segment) {
            palette.flash
        } else if index == 0 {
            palette.head
        } else {
            palette.body
        };
        canvas.fill_cell(*segment, fill, palette.outline);
    }

    if let Some(food) = view.state.food() {
        canvas.fill_cell(food, palette.food_color(view.state.tick_count()), palette.outline);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemePreference;
    use common::games::snake::{Direction, SnakeSettings};

    #[derive(Default)]
    struct RecordingCanvas {
        cleared: Vec<Color32>,
        cells: Vec<(Point, Color32)>,
    }

    impl SnakeCanvas for RecordingCanvas {
        fn clear(&mut self, color: Color32) {
            self.cleared.push(color);
            self.cells.clear();
        }

        fn fill_cell(&mut self, cell: Point, fill: Color32, _outline: Color32) {
            self.cells.push((cell, fill));
        }
    }

    fn state() -> SnakeGameState {
        SnakeGameState::with_layout(
            &SnakeSettings::default(),
            &[Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)],
            Point::new(10, 10),
            Direction::Right,
        )
        .unwrap()
    }

    #[test]
    fn test_draws_head_body_then_food() {
        let palette = Palette::for_theme(ThemePreference::Light);
        let state = state();
        let mut canvas = RecordingCanvas::default();
        let view = FrameView { state: &state, flashing: None };

        assert!(render_frame(&view, &palette, Some(&mut canvas)));
        assert_eq!(canvas.cleared, vec![palette.background]);
        assert_eq!(
            canvas.cells,
            vec![
                (Point::new(5, 5), palette.head),
                (Point::new(4, 5), palette.body),
                (Point::new(3, 5), palette.body),
                (Point::new(10, 10), palette.food_color(0)),
            ]
        );
    }

    #[test]
    fn test_flashing_segment_uses_highlight() {
        let palette = Palette::for_theme(ThemePreference::Dark);
        let state = state();
        let mut canvas = RecordingCanvas::default();
        let view = FrameView { state: &state, flashing: Some(Point::new(4, 5)) };

        render_frame(&view, &palette, Some(&mut canvas));
        assert_eq!(canvas.cells[1], (Point::new(4, 5), palette.flash));
        assert_eq!(canvas.cells[0].1, palette.head);
    }

    #[test]
    fn test_redundant_renders_are_identical() {
        let palette = Palette::for_theme(ThemePreference::Retro);
        let state = state();
        let view = FrameView { state: &state, flashing: None };
        let mut canvas = RecordingCanvas::default();

        render_frame(&view, &palette, Some(&mut canvas));
        let first = canvas.cells.clone();
        render_frame(&view, &palette, Some(&mut canvas));
        assert_eq!(canvas.cells, first);
    }

    #[test]
    fn test_missing_surface_skips_frame() {
        let palette = Palette::for_theme(ThemePreference::Light);
        let state = state();
        let view = FrameView { state: &state, flashing: None };
        assert!(!render_frame(&view, &palette, None));
    }
}
