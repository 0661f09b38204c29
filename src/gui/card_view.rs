use eframe::egui::{
    self,
    RichText,
};

use crate::{
    core::{
        gesture::{
            GestureTracker,
            SwipeNavigation,
        },
        CardView,
    },
    gui::theme::Theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Previous,
    Next,
    Shuffle,
    Reset,
    ToggleExplanation,
    ToggleBookmark,
    ToggleBookmarksView,
    SpeakWord,
    SpeakExplanation,
    /// Double tap on the card: word readback without a highlighted control.
    SpeakWordGesture,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpeakerHighlight {
    pub word: bool,
    pub explanation: bool,
}

/// Draws the card and its controls, and turns clicks and touches into
/// [`CardAction`]s for the app to apply.
pub struct CardPanel {
    gestures: GestureTracker,
    touch_on_card: bool,
}

impl CardPanel {
    pub fn new(gestures: GestureTracker) -> Self {
        Self { gestures, touch_on_card: false }
    }

    pub fn set_gestures(&mut self, gestures: GestureTracker) {
        self.gestures = gestures;
        self.touch_on_card = false;
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        view: Option<&CardView>,
        theme: &Theme,
        highlight: SpeakerHighlight,
    ) -> Vec<CardAction> {
        let mut actions = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);

                let Some(view) = view else {
                    ui.label(RichText::new("No terms to show").color(theme.muted(ctx)));
                    return;
                };

                let card = egui::Frame::group(ui.style())
                    .fill(theme.card_fill(ctx))
                    .corner_radius(10.0)
                    .inner_margin(egui::Margin::same(20))
                    .show(ui, |ui| {
                        ui.set_min_size(egui::vec2(ui.available_width().min(480.0), 220.0));
                        card_contents(ui, view, theme, highlight, &mut actions)
                    });

                self.track_gestures(ui, card.response.rect, card.inner, &mut actions);

                ui.add_space(10.0);
                ui.label(RichText::new(&view.counter).color(theme.muted(ctx)));
                ui.add_space(10.0);

                navigation_row(ui, view, &mut actions);
                ui.add_space(6.0);
                session_row(ui, view, &mut actions);
            });
        });

        actions
    }

    fn track_gestures(
        &mut self,
        ui: &egui::Ui,
        card_rect: egui::Rect,
        over_control: bool,
        actions: &mut Vec<CardAction>,
    ) {
        let surface = ui.interact(card_rect, ui.id().with("card_surface"), egui::Sense::hover());

        let (pressed, released, pos, time) = ui.ctx().input(|i| {
            (i.pointer.any_pressed(), i.pointer.any_released(), i.pointer.interact_pos(), i.time)
        });

        let Some(pos) = pos else {
            return;
        };
        if pressed {
            self.pointer_pressed(pos.x, surface.contains_pointer(), over_control);
        }
        if released {
            actions.extend(self.pointer_released(pos.x, time));
        }
    }

    /// Presses on the card's own buttons are clicks, not touches.
    fn pointer_pressed(&mut self, x: f32, on_card: bool, over_control: bool) {
        if on_card && !over_control {
            self.gestures.touch_start(x);
            self.touch_on_card = true;
        }
    }

    fn pointer_released(&mut self, x: f32, time: f64) -> Vec<CardAction> {
        if !std::mem::take(&mut self.touch_on_card) {
            return Vec::new();
        }

        let mut actions = Vec::new();
        let outcome = self.gestures.touch_end(x, time);
        match outcome.navigation {
            Some(SwipeNavigation::Next) => actions.push(CardAction::Next),
            Some(SwipeNavigation::Previous) => actions.push(CardAction::Previous),
            None => {}
        }
        if outcome.speak_word {
            actions.push(CardAction::SpeakWordGesture);
        }
        actions
    }
}

fn speaker_button(
    ui: &mut egui::Ui,
    label: &str,
    highlighted: bool,
    theme: &Theme,
) -> egui::Response {
    let color = if highlighted { theme.accent(ui.ctx()) } else { theme.muted(ui.ctx()) };
    ui.add(egui::Button::new(RichText::new(format!("🔊 {}", label)).color(color)))
        .on_hover_text("Read aloud, click again to stop")
}

/// Draws the card body. Returns whether the pointer is over one of its buttons.

fn card_contents(
    ui: &mut egui::Ui,
    view: &CardView,
    theme: &Theme,
    highlight: SpeakerHighlight,
    actions: &mut Vec<CardAction>,
) -> bool {
    let mut over_control = false;

    ui.horizontal(|ui| {
        let (star, color) = if view.bookmarked {
            ("★", theme.bookmark(ui.ctx()))
        } else {
            ("☆", theme.muted(ui.ctx()))
        };
        let bookmark = ui
            .add(egui::Button::new(RichText::new(star).size(22.0).color(color)).frame(false))
            .on_hover_text("Bookmark");
        over_control |= bookmark.contains_pointer();
        if bookmark.clicked() {
            actions.push(CardAction::ToggleBookmark);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let speak = speaker_button(ui, "Word", highlight.word, theme);
            over_control |= speak.contains_pointer();
            if speak.clicked() {
                actions.push(CardAction::SpeakWord);
            }
        });
    });

    ui.add_space(12.0);
    ui.label(theme.word(ui.ctx(), &view.title));
    ui.add_space(12.0);

    if view.explanation_visible {
        ui.separator();
        ui.label(RichText::new(&view.explanation).size(18.0));
        ui.add_space(6.0);
        let speak = speaker_button(ui, "Explanation", highlight.explanation, theme);
        over_control |= speak.contains_pointer();
        if speak.clicked() {
            actions.push(CardAction::SpeakExplanation);
        }
    }

    over_control
}

fn navigation_row(ui: &mut egui::Ui, view: &CardView, actions: &mut Vec<CardAction>) {
    ui.horizontal(|ui| {
        if ui.add_enabled(view.previous_enabled, egui::Button::new("◀ Previous")).clicked() {
            actions.push(CardAction::Previous);
        }
        if ui.button(view.toggle_explanation_label).clicked() {
            actions.push(CardAction::ToggleExplanation);
        }
        if ui.add_enabled(view.next_enabled, egui::Button::new("Next ▶")).clicked() {
            actions.push(CardAction::Next);
        }
    });
}

fn session_row(ui: &mut egui::Ui, view: &CardView, actions: &mut Vec<CardAction>) {
    ui.horizontal(|ui| {
        if ui.button("Shuffle").clicked() {
            actions.push(CardAction::Shuffle);
        }
        if ui.button("Reset").clicked() {
            actions.push(CardAction::Reset);
        }
        if ui.button(view.bookmarks_button_label).clicked() {
            actions.push(CardAction::ToggleBookmarksView);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_click_on_card_button_is_not_a_double_tap() {
        let mut panel = CardPanel::new(GestureTracker::default());

        panel.pointer_pressed(200.0, true, true);
        assert!(panel.pointer_released(200.0, 1.0).is_empty());
        panel.pointer_pressed(200.0, true, true);
        assert!(panel.pointer_released(200.0, 1.1).is_empty());
    }

    #[test]
    fn double_tap_on_card_speaks_word() {
        let mut panel = CardPanel::new(GestureTracker::default());

        panel.pointer_pressed(200.0, true, false);
        assert!(panel.pointer_released(200.0, 1.0).is_empty());
        panel.pointer_pressed(200.0, true, false);
        assert_eq!(panel.pointer_released(200.0, 1.1), vec![CardAction::SpeakWordGesture]);
    }

    #[test]
    fn swipe_on_card_navigates_and_presses_elsewhere_are_ignored() {
        let mut panel = CardPanel::new(GestureTracker::default());

        panel.pointer_pressed(300.0, true, false);
        assert_eq!(panel.pointer_released(200.0, 1.0), vec![CardAction::Next]);

        panel.pointer_pressed(300.0, false, false);
        assert!(panel.pointer_released(100.0, 2.0).is_empty());
    }
}
