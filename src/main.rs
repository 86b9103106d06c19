use clap::Parser;
use eframe::egui;

use film_panda::app::FilmPandaApp;
use film_panda::config::Config;

fn main() -> eframe::Result {
    env_logger::init();
    let config = Config::parse();
    log::info!("Starting with data file {}", config.data.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Film Panda – IMDb Top 250 Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(FilmPandaApp::new(&config)))),
    )
}
