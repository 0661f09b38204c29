use std::time::Duration;

use eframe::egui;

use super::{
    card_view::{
        CardAction,
        CardPanel,
        SpeakerHighlight,
    },
    message_modal::MessageModal,
    message_overlay::MessageOverlay,
    settings::{
        SettingsData,
        SettingsModal,
        SETTINGS_FILE,
    },
    theme::{
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
};
use crate::{
    core::{
        gesture::GestureTracker,
        tasks::{
            TaskManager,
            TaskResult,
        },
        vocabulary::LoadedVocabulary,
        BookmarkViewChange,
        CardView,
        StudySession,
    },
    persistence::{
        open_state_store,
        save_json,
        FileStore,
        StateStore,
    },
    speech::{
        CommandSpeech,
        SpeakOutcome,
        SpeakSource,
        SpeechAdapter,
    },
};

const SPEECH_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct FlashcardApp {
    // Configuration
    pub settings_data: SettingsData,

    // Session
    session: Option<StudySession<FileStore>>,
    pending_vocabulary: Option<u64>,
    vocabulary_label: String,

    // UI State
    pub theme: Theme,
    card_panel: CardPanel,
    message_overlay: MessageOverlay,
    message_modal: MessageModal,
    settings_modal: SettingsModal,

    // External Services
    speech: SpeechAdapter<CommandSpeech>,
    task_manager: TaskManager,
}

impl FlashcardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings_data: SettingsData) -> Self {
        let theme = Theme::study();
        set_theme(&cc.egui_ctx, &theme);
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);
        cc.egui_ctx.set_theme(if settings_data.dark_mode {
            egui::Theme::Dark
        } else {
            egui::Theme::Light
        });

        let speech =
            SpeechAdapter::new(CommandSpeech::detect(settings_data.speech_command.as_deref()));
        let card_panel = CardPanel::new(gesture_tracker(&settings_data));

        let mut app = Self {
            settings_data,
            session: None,
            pending_vocabulary: None,
            vocabulary_label: String::new(),
            theme,
            card_panel,
            message_overlay: MessageOverlay::new(),
            message_modal: MessageModal::new(),
            settings_modal: SettingsModal::new(),
            speech,
            task_manager: TaskManager::new(),
        };

        app.load_vocabulary();
        app
    }

    fn load_vocabulary(&mut self) {
        let source = self.settings_data.vocabulary_source();
        log::info!("Loading vocabulary from {}", source);

        self.message_overlay.set_message(format!("Loading {}...", source));
        self.pending_vocabulary = Some(self.task_manager.load_vocabulary(source));
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        log::debug!("Task result: {}", result.task_type());

        match result {
            TaskResult::LoadingMessage(message) => {
                if self.pending_vocabulary.is_some() {
                    self.message_overlay.set_message(message);
                }
            }
            TaskResult::VocabularyLoaded { request, loaded } => {
                if self.pending_vocabulary != Some(request) {
                    log::debug!("Dropping stale vocabulary result {}", request);
                    return;
                }
                self.pending_vocabulary = None;
                self.message_overlay.clear_message();
                self.start_session(loaded);
            }
        }
    }

    fn start_session(&mut self, loaded: LoadedVocabulary) {
        self.speech.stop();

        self.vocabulary_label = if loaded.used_fallback {
            format!("Built-in terms ({})", loaded.store.len())
        } else {
            format!("{} ({} terms)", loaded.source, loaded.store.len())
        };

        self.session =
            Some(StudySession::restore(loaded.store, StateStore::new(open_state_store())));
    }

    fn apply_card_action(&mut self, action: CardAction) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match action {
            CardAction::Previous => {
                session.show_previous();
            }
            CardAction::Next => {
                session.show_next();
            }
            CardAction::Shuffle => session.shuffle(),
            CardAction::Reset => session.reset(),
            CardAction::ToggleExplanation => {
                session.toggle_explanation();
            }
            CardAction::ToggleBookmark => {
                session.toggle_bookmark();
            }
            CardAction::ToggleBookmarksView => {
                if session.toggle_bookmarks_view() == BookmarkViewChange::NoBookmarks {
                    self.message_modal.show_info("You haven't bookmarked any terms yet!");
                }
            }
            CardAction::SpeakWord => self.speak_current(SpeakSource::Word),
            CardAction::SpeakExplanation => self.speak_current(SpeakSource::Explanation),
            CardAction::SpeakWordGesture => self.speak_current(SpeakSource::Gesture),
        }
    }

    fn speak_current(&mut self, source: SpeakSource) {
        let Some(term) = self.session.as_ref().and_then(|s| s.current_term()) else {
            return;
        };

        let (text, rate) = match source {
            SpeakSource::Explanation => {
                (term.explanation.clone(), self.settings_data.explanation_rate)
            }
            SpeakSource::Word | SpeakSource::Gesture => {
                (term.word.clone(), self.settings_data.word_rate)
            }
        };

        match self.speech.speak(&text, rate, source) {
            SpeakOutcome::Started | SpeakOutcome::Stopped => {}
            SpeakOutcome::Unavailable => {
                self.message_modal
                    .show_warning("Sorry, no text-to-speech program is available on this system!");
            }
            SpeakOutcome::Failed(e) => {
                self.message_modal.show_warning(format!("Could not read the term aloud: {}", e));
            }
        }
    }

    fn handle_top_bar_action(&mut self, action: TopBarAction) {
        match action {
            TopBarAction::OpenVocabulary(path) => {
                self.settings_data.vocabulary_source = path.display().to_string();
                self.save_settings();
                self.load_vocabulary();
            }
            TopBarAction::ReloadVocabulary => self.load_vocabulary(),
            TopBarAction::ClearBookmarks => {
                if let Some(session) = self.session.as_mut() {
                    session.clear_bookmarks();
                }
            }
            TopBarAction::OpenSettings => {
                self.settings_modal.open_settings(self.settings_data.clone());
            }
        }
    }

    fn apply_settings(&mut self, settings: SettingsData) {
        let source_changed = settings.vocabulary_source != self.settings_data.vocabulary_source;
        let speech_changed = settings.speech_command != self.settings_data.speech_command;

        self.settings_data = settings;
        self.card_panel.set_gestures(gesture_tracker(&self.settings_data));

        if speech_changed {
            let command = self.settings_data.speech_command.as_deref();
            self.speech = SpeechAdapter::new(CommandSpeech::detect(command));
        }

        self.save_settings();

        if source_changed {
            self.load_vocabulary();
        }
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings_data, SETTINGS_FILE) {
            log::error!("Failed to save settings: {}", e);
        }
    }

    fn keyboard_actions(&self, ctx: &egui::Context) -> Vec<CardAction> {
        if self.message_modal.is_open() || self.settings_modal.is_open() || ctx.wants_keyboard_input()
        {
            return Vec::new();
        }

        ctx.input(|i| {
            let mut actions = Vec::new();
            if i.key_pressed(egui::Key::ArrowLeft) {
                actions.push(CardAction::Previous);
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                actions.push(CardAction::Next);
            }
            if i.key_pressed(egui::Key::Space) {
                actions.push(CardAction::ToggleExplanation);
            }
            if i.key_pressed(egui::Key::B) {
                actions.push(CardAction::ToggleBookmark);
            }
            actions
        })
    }

    fn sync_dark_mode(&mut self, ctx: &egui::Context) {
        let dark_mode = ctx.style().visuals.dark_mode;
        if dark_mode != self.settings_data.dark_mode {
            self.settings_data.dark_mode = dark_mode;
            self.save_settings();
        }
    }
}

fn gesture_tracker(settings: &SettingsData) -> GestureTracker {
    GestureTracker::new(settings.swipe_threshold, settings.double_tap_window())
}

impl eframe::App for FlashcardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }
        if self.pending_vocabulary.is_some() {
            ctx.request_repaint_after(SPEECH_POLL_INTERVAL);
        }

        self.speech.poll();
        if self.speech.is_speaking() {
            ctx.request_repaint_after(SPEECH_POLL_INTERVAL);
        }

        if let Some(action) =
            TopBar::show(ctx, &self.vocabulary_label, self.speech.engine().program_path())
        {
            self.handle_top_bar_action(action);
        }
        self.sync_dark_mode(ctx);

        let view = self.session.as_ref().and_then(CardView::project);
        let highlight = SpeakerHighlight {
            word: self.speech.is_highlighted(SpeakSource::Word),
            explanation: self.speech.is_highlighted(SpeakSource::Explanation),
        };

        let mut actions = self.card_panel.show(ctx, view.as_ref(), &self.theme, highlight);
        actions.extend(self.keyboard_actions(ctx));
        for action in actions {
            self.apply_card_action(action);
        }

        self.message_overlay.show(ctx, &self.theme);
        self.message_modal.show(ctx);

        if let Some(settings) = self.settings_modal.show(ctx) {
            self.apply_settings(settings);
        }
    }
}
