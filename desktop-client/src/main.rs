mod colors;
mod config;
mod run_log;
mod ui;

use std::sync::Arc;

use clap::Parser;
use common::config::Validate;
use common::games::snake::GameController;
use common::games::SessionRng;
use common::log;
use common::logger::{self, LogLevel};
use eframe::egui;

use config::{get_config_manager, DEFAULT_CONFIG_FILE};
use ui::SnakeWidgetApp;

/// Space around the canvas for the top bar, the run log and panel margins.
const CHROME_WIDTH: f32 = 32.0;
const CHROME_HEIGHT: f32 = 260.0;

#[derive(Parser)]
#[command(name = "snake_widget_client")]
struct Args {
    /// Path to the YAML config file. Created on first save if missing.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Fixed seed for food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides the log level from the config file.
    #[arg(long)]
    log_level: Option<LogLevel>,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = get_config_manager(&args.config);
    let config = config_manager.get_config()?;
    config.validate()?;

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.log_level.unwrap_or(config.log_level));

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Starting snake widget with seed {}", rng.seed());

    let settings = config.game.clone();
    let theme = config.theme;
    let width = settings.canvas_width_px as f32 + CHROME_WIDTH;
    let height = settings.canvas_height_px as f32 + CHROME_HEIGHT;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([width, height])
            .with_title("Snake"),
        ..Default::default()
    };

    eframe::run_native(
        "Snake Widget",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(theme.visuals());
            let repaint_ctx = cc.egui_ctx.clone();
            let controller = GameController::new(settings, rng)
                .with_tick_hook(Arc::new(move || repaint_ctx.request_repaint()));
            Ok(Box::new(SnakeWidgetApp::new(controller, config_manager, theme)))
        }),
    )?;

    Ok(())
}
