use eframe::egui;

use super::data::SettingsData;

pub struct SettingsModal {
    open: bool,
    draft: SettingsData,
    speech_command: String,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self { open: false, draft: SettingsData::default(), speech_command: String::new() }
    }

    pub fn open_settings(&mut self, current_settings: SettingsData) {
        self.speech_command = current_settings.speech_command.clone().unwrap_or_default();
        self.draft = current_settings;
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns the edited settings once the user saves.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsData> {
        if !self.open {
            return None;
        }

        let mut saved = None;

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(420.0);
            ui.heading("Settings");
            ui.add_space(8.0);

            egui::Grid::new("settings_grid").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
                ui.label("Vocabulary");
                ui.text_edit_singleline(&mut self.draft.vocabulary_source)
                    .on_hover_text("Path or http(s) URL of a vocabulary.json file");
                ui.end_row();

                ui.label("Word speed");
                ui.add(egui::Slider::new(&mut self.draft.word_rate, 0.3..=2.0));
                ui.end_row();

                ui.label("Explanation speed");
                ui.add(egui::Slider::new(&mut self.draft.explanation_rate, 0.3..=2.0));
                ui.end_row();

                ui.label("Speech program");
                ui.add(
                    egui::TextEdit::singleline(&mut self.speech_command)
                        .hint_text("auto-detect"),
                );
                ui.end_row();

                ui.label("Swipe distance");
                ui.add(egui::Slider::new(&mut self.draft.swipe_threshold, 10.0..=200.0).suffix(" px"));
                ui.end_row();

                ui.label("Double tap window");
                ui.add(egui::Slider::new(&mut self.draft.double_tap_ms, 100..=800).suffix(" ms"));
                ui.end_row();
            });

            ui.add_space(15.0);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Save").clicked() {
                        let mut settings = self.draft.clone();
                        settings.speech_command = Some(self.speech_command.clone());
                        saved = Some(settings.sanitized());
                        ui.close();
                    }
                    if ui.button("Cancel").clicked() {
                        ui.close();
                    }
                });
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        saved
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}
