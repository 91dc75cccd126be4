//! Tile Composer: build a combined tilesheet by painting tiles from palette
//! sheets onto a base image
//!
//! - Open a base image as the canvas (O)
//! - Add palette sheets (A), click a thumbnail, click an empty cell to place
//! - Drag existing tiles between cells, erase with X
//! - Save the combined sheet (S)

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod canvas;
mod config;
mod editor;
mod error;
mod export;
mod frontend;
mod io;
mod palette;
mod tile;

use std::path::PathBuf;

use clap::Parser;
use macroquad::prelude::*;

use config::{default_config_path, EditorConfig};
use editor::Editor;
use io::FsImageStore;

#[derive(Parser, Debug)]
#[command(name = "tile-composer", version, about = "Compose tilesheets from palette sheets")]
struct Args {
    /// Tile edge length in pixels (overrides the settings file)
    #[arg(short, long)]
    tile_size: Option<u32>,

    /// Thumbnail columns in the palette panel
    #[arg(long)]
    columns: Option<usize>,

    /// Settings file (default: <config dir>/tile-composer/config.ron)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base image to open at startup
    #[arg(short, long)]
    base: Option<PathBuf>,

    /// Palette sheet to load at startup (repeatable)
    #[arg(short, long)]
    sheet: Vec<PathBuf>,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_config: bool,

    /// Log filter, e.g. "debug" or "info,tile_composer=debug" (RUST_LOG wins)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Tile Composer v{}", VERSION),
        window_width: 800,
        window_height: 600,
        window_resizable: true,
        ..Default::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging(filter: &str) -> Option<flexi_logger::LoggerHandle> {
    let logger = match flexi_logger::Logger::try_with_env_or_str(filter) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Invalid log filter {:?}: {}", filter, e);
            return None;
        }
    };
    match logger.log_to_stderr().start() {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to start logger: {}", e);
            None
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let args = Args::parse();

    #[cfg(not(target_arch = "wasm32"))]
    let _logger = init_logging(&args.log_level);

    log::info!("Starting Tile Composer {}", VERSION);

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let config = match EditorConfig::load_or_default(&config_path).with_overrides(args.tile_size, args.columns) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    if args.save_config {
        match config.save(&config_path) {
            Ok(()) => log::info!("Wrote settings to {}", config_path.display()),
            Err(e) => log::warn!("{}", e),
        }
    }

    let store = FsImageStore::new();
    let mut editor = Editor::new(config);

    if let Some(base) = &args.base {
        let outcome = editor.open_base(base, &store);
        editor.report(outcome);
    }
    if !args.sheet.is_empty() {
        let effect = editor.add_sheets(&args.sheet, &store);
        editor.report(Ok(effect));
    }

    #[cfg(not(target_arch = "wasm32"))]
    let prompt = io::NativePrompt;
    #[cfg(target_arch = "wasm32")]
    let prompt = io::NoPrompt;

    frontend::run(editor, &store, &prompt).await;
}
