use std::time::Instant;

use clap::Parser;

use common::config::{ConfigManager, FileContentConfigProvider};
use common::game::{GameSession, GridSize, SessionRng};
use common::logger::init_logger;
use common::{GameSettings, log};

mod app;
mod ui;

use app::SnakeArcadeApp;

const SETTINGS_FILE_NAME: &str = "snake_arcade_settings.yaml";

pub type SettingsManager = ConfigManager<FileContentConfigProvider, GameSettings>;

#[derive(Parser)]
#[command(name = "snake_arcade_client", about = "Desktop snake arcade game")]
struct Args {
    /// Settings file location. Defaults to a file next to the executable.
    #[arg(long)]
    config: Option<String>,

    /// Initial window width in pixels.
    #[arg(long, default_value_t = 800.0)]
    window_width: f32,

    /// Initial window height in pixels.
    #[arg(long, default_value_t = 660.0)]
    window_height: f32,
}

fn default_settings_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir
            .join(SETTINGS_FILE_NAME)
            .to_string_lossy()
            .into_owned();
    }
    SETTINGS_FILE_NAME.to_string()
}

fn main() -> eframe::Result<()> {
    init_logger();
    let args = Args::parse();

    let settings_path = args.config.unwrap_or_else(default_settings_path);
    let settings_manager = SettingsManager::from_yaml_file(&settings_path);
    let settings = match settings_manager.get_config() {
        Ok(settings) => settings,
        Err(e) => {
            log!("Falling back to default settings: {}", e);
            GameSettings::default()
        }
    };

    let session = GameSession::new(
        GridSize::default(),
        settings,
        SessionRng::from_random(),
        Instant::now(),
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.window_width, args.window_height])
            .with_title("Snake Arcade"),
        ..Default::default()
    };

    eframe::run_native(
        "Snake Arcade",
        native_options,
        Box::new(move |_cc| Ok(Box::new(SnakeArcadeApp::new(session, settings_manager)))),
    )
}
