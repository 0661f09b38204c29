use std::path::{
    Path,
    PathBuf,
};

use eframe::egui::{
    self,
    containers,
};

pub enum TopBarAction {
    OpenVocabulary(PathBuf),
    ReloadVocabulary,
    ClearBookmarks,
    OpenSettings,
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        vocabulary_label: &str,
        speech_program: Option<&Path>,
    ) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.menu_button("File", |ui| {
                    if ui.button("Open Vocabulary...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Vocabulary", &["json"])
                            .pick_file()
                        {
                            action = Some(TopBarAction::OpenVocabulary(path));
                        }
                    }
                    if ui.button("Reload Vocabulary").clicked() {
                        action = Some(TopBarAction::ReloadVocabulary);
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Bookmarks", |ui| {
                    if ui.button("Clear All Bookmarks").clicked() {
                        action = Some(TopBarAction::ClearBookmarks);
                    }
                });

                if ui.button("Settings").clicked() {
                    action = Some(TopBarAction::OpenSettings);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_status_indicators(ui, vocabulary_label, speech_program);
                });
            });
        });

        action
    }

    fn show_status_indicators(
        ui: &mut egui::Ui,
        vocabulary_label: &str,
        speech_program: Option<&Path>,
    ) {
        let (speech_color, speech_tooltip) = match speech_program {
            Some(path) => (
                egui::Color32::from_rgb(0, 200, 0),
                format!("Text-to-speech ready ({})", path.display()),
            ),
            None => (
                egui::Color32::from_rgb(200, 80, 80),
                "No text-to-speech program found".to_string(),
            ),
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small("Speech").on_hover_text(&speech_tooltip);
            ui.small(egui::RichText::new("●").color(speech_color)).on_hover_text(speech_tooltip);
        });

        ui.add_space(6.0);
        ui.small(vocabulary_label);
    }
}
