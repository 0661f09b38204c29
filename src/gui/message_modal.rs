use eframe::egui;

#[derive(Default, Clone)]
pub struct MessageData {
    pub message: String,
    pub is_warning: bool,
}

/// A single-button notice, the desktop stand-in for a browser alert.
pub struct MessageModal {
    open: bool,
    data: MessageData,
}

impl MessageModal {
    pub fn new() -> Self {
        Self { open: false, data: MessageData::default() }
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.data = MessageData { message: message.into(), is_warning: false };
        self.open = true;
    }

    pub fn show_warning(&mut self, message: impl Into<String>) {
        self.data = MessageData { message: message.into(), is_warning: true };
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        let modal = egui::Modal::new(egui::Id::new("message_modal")).show(ctx, |ui| {
            ui.set_width(360.0);

            ui.add_space(10.0);

            ui.horizontal(|ui| {
                let (icon, icon_color) = if self.data.is_warning {
                    ("⚠", egui::Color32::YELLOW)
                } else {
                    ("ℹ", egui::Color32::LIGHT_BLUE)
                };

                ui.label(egui::RichText::new(icon).size(24.0).color(icon_color));
                ui.label(egui::RichText::new(&self.data.message).size(14.0));
            });

            ui.add_space(15.0);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        ui.close();
                    }
                });
            });
        });

        if modal.should_close() {
            self.open = false;
            self.data = MessageData::default();
        }
    }
}

impl Default for MessageModal {
    fn default() -> Self {
        Self::new()
    }
}
