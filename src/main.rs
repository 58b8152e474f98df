use clap::Parser;
use env_logger::Env;

use wowapi_downloader::ui;

#[derive(Parser, Debug)]
#[command(
    name = "WowAPI Downloader",
    author,
    version,
    about = "Downloads and version-checks World of Warcraft API reference files"
)]
struct Cli {
    /// Print the application version and exit without starting the UI.
    #[arg(long)]
    version_only: bool,
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.version_only {
        println!("WowAPI Downloader {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_icon(app_icon())
            .with_inner_size(eframe::egui::vec2(880.0, 560.0)),
        ..Default::default()
    };
    eframe::run_native(
        "WowAPI Downloader",
        options,
        Box::new(|cc| Ok(Box::new(ui::DownloaderApp::new(cc)))),
    )
}

fn app_icon() -> eframe::egui::IconData {
    // Simple 2x2 icon: dark background with a gold accent.
    let rgba: Vec<u8> = vec![
        21, 26, 34, 255, 244, 196, 48, 255, //
        21, 26, 34, 255, 196, 150, 34, 255,
    ];
    eframe::egui::IconData {
        rgba,
        width: 2,
        height: 2,
    }
}
