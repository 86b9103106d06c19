use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::charts::WordCloud;
use crate::ui::{dashboard, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FilmPandaApp {
    pub state: AppState,
    word_cloud: WordCloud,
}

impl FilmPandaApp {
    pub fn new(config: &Config) -> Self {
        Self {
            state: AppState::new(config),
            word_cloud: WordCloud::default(),
        }
    }
}

impl eframe::App for FilmPandaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        if self.state.dataset.is_some() {
            egui::SidePanel::left("filter_panel")
                .default_width(240.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::central_panel(ui, &self.state, &mut self.word_cloud);
        });
    }
}
