use eframe::egui;

const CONTROLLER_SOURCE: &str = include_str!("../../../common/src/games/snake/controller.rs");
const STEP_SOURCE: &str = include_str!("../../../common/src/games/snake/game_state.rs");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SourceTab {
    #[default]
    Controller,
    Step,
}

impl SourceTab {
    fn source(&self) -> &'static str {
        match self {
            SourceTab::Controller => CONTROLLER_SOURCE,
            SourceTab::Step => STEP_SOURCE,
        }
    }
}

/// The back of the card: the widget's own source.
pub fn show_code(ui: &mut egui::Ui, tab: &mut SourceTab) {
    ui.horizontal(|ui| {
        ui.selectable_value(tab, SourceTab::Controller, "controller.rs");
        ui.selectable_value(tab, SourceTab::Step, "game_state.rs");
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("snake_code_view")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add(
                egui::Label::new(egui::RichText::new(tab.source()).monospace().size(12.0))
                    .wrap_mode(egui::TextWrapMode::Extend),
            );
        });
}
