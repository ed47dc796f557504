mod code_view;
mod render;
mod snake_widget;

use common::games::snake::{GameController, GamePhase};
use common::{log, log_error};
use eframe::egui;
use egui::{Align, Layout};

use crate::colors::Palette;
use crate::config::{ClientConfigManager, ThemePreference};
use crate::run_log::RunLog;
use code_view::{show_code, SourceTab};
use snake_widget::show_game;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardFace {
    Game,
    Code,
}

pub struct SnakeWidgetApp {
    controller: GameController,
    config_manager: ClientConfigManager,
    theme: ThemePreference,
    palette: Palette,
    face: CardFace,
    source_tab: SourceTab,
    run_log: RunLog,
    last_phase: GamePhase,
}

impl SnakeWidgetApp {
    pub fn new(controller: GameController, config_manager: ClientConfigManager, theme: ThemePreference) -> Self {
        Self {
            last_phase: controller.phase(),
            controller,
            config_manager,
            theme,
            palette: Palette::for_theme(theme),
            face: CardFace::Game,
            source_tab: SourceTab::default(),
            run_log: RunLog::new(),
        }
    }

    fn record_finished_run(&mut self) {
        let phase = self.controller.phase();
        if self.last_phase == GamePhase::Running && phase == GamePhase::GameOver {
            let reason = self.controller.state().and_then(|s| s.game_end_reason());
            self.run_log.record(self.controller.score(), reason);
        }
        self.last_phase = phase;
    }

    fn set_theme(&mut self, ctx: &egui::Context, theme: ThemePreference) {
        if theme == self.theme {
            return;
        }
        self.theme = theme;
        self.palette = Palette::for_theme(theme);
        ctx.set_visuals(theme.visuals());
        match self.config_manager.update(|config| config.theme = theme) {
            Ok(_) => log!("Theme switched to {}", theme.name()),
            Err(e) => log_error!("Failed to save theme: {}", e),
        }
    }

    fn flip(&mut self) {
        self.face = match self.face {
            CardFace::Game => CardFace::Code,
            CardFace::Code => CardFace::Game,
        };
        self.controller.set_visible(self.face == CardFace::Game);
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(format!("Score: {}", self.controller.score())).strong());
            ui.label(format!("Best: {}", self.controller.best_score()));
            ui.separator();
            ui.label(status_text(self.controller.phase()));

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let mut theme = self.theme;
                egui::ComboBox::from_id_salt("theme_selector")
                    .selected_text(theme.label())
                    .show_ui(ui, |ui| {
                        for option in ThemePreference::ALL {
                            ui.selectable_value(&mut theme, option, option.label());
                        }
                    });
                self.set_theme(ctx, theme);

                let flip_label = match self.face {
                    CardFace::Game => "Show code",
                    CardFace::Code => "Show game",
                };
                if ui.button(flip_label).clicked() {
                    self.flip();
                }

                if self.face == CardFace::Game {
                    let start_label = match self.controller.phase() {
                        GamePhase::NotStarted => "Start",
                        GamePhase::Running | GamePhase::GameOver => "Restart",
                    };
                    if ui.button(start_label).clicked() {
                        self.controller.restart();
                    }
                }
            });
        });
    }

    fn render_run_log(&self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Recent runs").small().strong());
        if self.run_log.is_empty() {
            ui.label(egui::RichText::new("No finished runs yet").small().weak());
            return;
        }
        for run in self.run_log.latest_first() {
            ui.label(egui::RichText::new(run.describe()).small().monospace());
        }
    }
}

fn status_text(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::NotStarted => "Ready",
        GamePhase::Running => "Playing",
        GamePhase::GameOver => "Game over",
    }
}

impl eframe::App for SnakeWidgetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.pump();
        self.record_finished_run();

        if self.face == CardFace::Game
            && self.controller.phase() != GamePhase::Running
            && ctx.input(|i| i.key_pressed(egui::Key::Enter))
        {
            self.controller.start();
        }

        egui::TopBottomPanel::top("snake_top_bar").show(ctx, |ui| {
            self.render_top_bar(ui, ctx);
        });

        egui::TopBottomPanel::bottom("snake_run_log")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_run_log(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| match self.face {
            CardFace::Game => {
                ui.vertical_centered(|ui| {
                    show_game(ui, ctx, &mut self.controller, &self.palette);
                });
            }
            CardFace::Code => show_code(ui, &mut self.source_tab),
        });
    }
}
