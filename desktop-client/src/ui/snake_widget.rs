use std::time::Instant;

use common::games::snake::{GameController, GamePhase, KeyInput};
use eframe::egui;

use super::render::{render_frame, FrameView, PainterCanvas, SnakeCanvas};
use crate::colors::Palette;

#[derive(Clone, Copy, Debug, PartialEq)]
enum WidgetInput {
    Key(KeyInput),
    TouchStart { id: u64, x: f32, y: f32 },
    TouchEnd { id: u64, x: f32, y: f32 },
    TouchCancel { id: u64 },
}

fn translate_key(key: egui::Key) -> Option<KeyInput> {
    match key {
        egui::Key::ArrowUp => Some(KeyInput::ArrowUp),
        egui::Key::ArrowDown => Some(KeyInput::ArrowDown),
        egui::Key::ArrowLeft => Some(KeyInput::ArrowLeft),
        egui::Key::ArrowRight => Some(KeyInput::ArrowRight),
        egui::Key::W => Some(KeyInput::Char('w')),
        egui::Key::A => Some(KeyInput::Char('a')),
        egui::Key::S => Some(KeyInput::Char('s')),
        egui::Key::D => Some(KeyInput::Char('d')),
        _ => None,
    }
}

/// Pulls steering events out of this frame's input.
///
/// Mapped keys and all touch events are removed from the queue so that no
/// other widget scrolls or zooms while the game owns the input.
fn take_input(ctx: &egui::Context) -> Vec<WidgetInput> {
    ctx.input_mut(|i| {
        let mut inputs = Vec::new();
        i.events.retain(|event| match event {
            egui::Event::Key { key, pressed, .. } => match translate_key(*key) {
                Some(mapped) => {
                    if *pressed {
                        inputs.push(WidgetInput::Key(mapped));
                    }
                    false
                }
                None => true,
            },
            egui::Event::Touch { id, phase, pos, .. } => {
                match phase {
                    egui::TouchPhase::Start => inputs.push(WidgetInput::TouchStart {
                        id: id.0,
                        x: pos.x,
                        y: pos.y,
                    }),
                    egui::TouchPhase::End => inputs.push(WidgetInput::TouchEnd {
                        id: id.0,
                        x: pos.x,
                        y: pos.y,
                    }),
                    egui::TouchPhase::Cancel => inputs.push(WidgetInput::TouchCancel { id: id.0 }),
                    egui::TouchPhase::Move => {}
                }
                false
            }
            _ => true,
        });
        inputs
    })
}

fn apply_input(controller: &mut GameController, inputs: &[WidgetInput]) {
    for input in inputs {
        match *input {
            WidgetInput::Key(key) => {
                controller.handle_key(key);
            }
            WidgetInput::TouchStart { id, x, y } => controller.touch_start(id, x, y),
            WidgetInput::TouchEnd { id, x, y } => {
                controller.touch_end(id, x, y);
            }
            WidgetInput::TouchCancel { id } => controller.touch_cancel(id),
        }
    }
}

/// Draws the game face: canvas, overlay and input handling.
pub fn show_game(ui: &mut egui::Ui, ctx: &egui::Context, controller: &mut GameController, palette: &Palette) {
    if controller.phase() == GamePhase::Running {
        let inputs = take_input(ctx);
        apply_input(controller, &inputs);
    }

    let settings = controller.settings();
    let cell_size = settings.cell_size_px as f32;
    let size = egui::vec2(settings.canvas_width_px as f32, settings.canvas_height_px as f32);

    let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
    let rect = response.rect;

    let now = Instant::now();
    let drawn = match controller.state() {
        Some(state) => {
            let view = FrameView {
                state,
                flashing: controller.flashing_cell(now),
            };
            let mut canvas = PainterCanvas::new(&painter, rect, cell_size);
            render_frame(&view, palette, Some(&mut canvas as &mut dyn SnakeCanvas))
        }
        None => false,
    };
    if !drawn {
        painter.rect_filled(rect, 0.0, palette.background);
    }

    if let Some(message) = overlay_message(controller) {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            message,
            egui::FontId::proportional(22.0),
            palette.head,
        );
        if response.clicked() {
            controller.start();
        }
    }

    if controller.flashing_cell(now).is_some() {
        ctx.request_repaint_after(controller.settings().flash_duration());
    }
}

fn overlay_message(controller: &GameController) -> Option<String> {
    match controller.phase() {
        GamePhase::NotStarted => Some("Click or press Enter to play".to_string()),
        GamePhase::GameOver => {
            let reason = controller
                .state()
                .and_then(|s| s.game_end_reason())
                .map_or_else(String::new, |r| format!("Snake {}. ", r));
            Some(format!("{}Score: {}. Click to retry", reason, controller.score()))
        }
        GamePhase::Running => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_key_covers_arrows_and_wasd() {
        assert_eq!(translate_key(egui::Key::ArrowUp), Some(KeyInput::ArrowUp));
        assert_eq!(translate_key(egui::Key::D), Some(KeyInput::Char('d')));
        assert_eq!(translate_key(egui::Key::Q), None);
        assert_eq!(translate_key(egui::Key::Enter), None);
    }

    fn key_event(key: egui::Key, pressed: bool) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn touch_event(id: u64, phase: egui::TouchPhase, x: f32, y: f32) -> egui::Event {
        egui::Event::Touch {
            device_id: egui::TouchDeviceId(0),
            id: egui::TouchId(id),
            phase,
            pos: egui::pos2(x, y),
            force: None,
        }
    }

    #[test]
    fn test_take_input_swallows_steering_events_only() {
        let ctx = egui::Context::default();
        let raw_input = egui::RawInput {
            events: vec![
                key_event(egui::Key::ArrowUp, true),
                key_event(egui::Key::ArrowUp, false),
                egui::Event::Text("x".to_string()),
                touch_event(1, egui::TouchPhase::Start, 10.0, 10.0),
                touch_event(1, egui::TouchPhase::Move, 40.0, 10.0),
                touch_event(1, egui::TouchPhase::End, 90.0, 12.0),
            ],
            ..Default::default()
        };

        let mut taken = Vec::new();
        let mut remaining = Vec::new();
        let _ = ctx.run(raw_input, |ctx| {
            taken = take_input(ctx);
            remaining = ctx.input(|i| i.events.clone());
        });

        assert_eq!(
            taken,
            vec![
                WidgetInput::Key(KeyInput::ArrowUp),
                WidgetInput::TouchStart { id: 1, x: 10.0, y: 10.0 },
                WidgetInput::TouchEnd { id: 1, x: 90.0, y: 12.0 },
            ]
        );
        assert!(remaining.contains(&egui::Event::Text("x".to_string())));
        assert!(
            !remaining
                .iter()
                .any(|e| matches!(e, egui::Event::Key { .. } | egui::Event::Touch { .. }))
        );
    }
}
