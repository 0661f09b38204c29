use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::{
        gesture::{
            DOUBLE_TAP_WINDOW,
            SWIPE_THRESHOLD,
        },
        vocabulary::{
            VocabularySource,
            DEFAULT_VOCABULARY,
        },
    },
    speech::{
        EXPLANATION_RATE,
        WORD_RATE,
    },
};

pub const SETTINGS_FILE: &str = "settings.json";

const RATE_RANGE: (f32, f32) = (0.3, 2.0);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    /// File path or http(s) URL of the vocabulary list.
    pub vocabulary_source: String,
    pub word_rate: f32,
    pub explanation_rate: f32,
    /// Overrides text-to-speech program detection.
    pub speech_command: Option<String>,
    pub swipe_threshold: f32,
    pub double_tap_ms: u64,
    pub dark_mode: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            vocabulary_source: DEFAULT_VOCABULARY.to_string(),
            word_rate: WORD_RATE,
            explanation_rate: EXPLANATION_RATE,
            speech_command: None,
            swipe_threshold: SWIPE_THRESHOLD,
            double_tap_ms: (DOUBLE_TAP_WINDOW * 1000.0).round() as u64,
            dark_mode: true,
        }
    }
}

impl SettingsData {
    pub fn vocabulary_source(&self) -> VocabularySource {
        VocabularySource::parse(&self.vocabulary_source)
    }

    pub fn double_tap_window(&self) -> f64 {
        self.double_tap_ms as f64 / 1000.0
    }

    /// Pulls hand-edited values back into usable ranges.
    pub fn sanitized(mut self) -> Self {
        let (min_rate, max_rate) = RATE_RANGE;
        if !self.word_rate.is_finite() {
            self.word_rate = WORD_RATE;
        }
        if !self.explanation_rate.is_finite() {
            self.explanation_rate = EXPLANATION_RATE;
        }
        self.word_rate = self.word_rate.clamp(min_rate, max_rate);
        self.explanation_rate = self.explanation_rate.clamp(min_rate, max_rate);

        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 1.0 {
            self.swipe_threshold = SWIPE_THRESHOLD;
        }
        if self.double_tap_ms == 0 {
            self.double_tap_ms = (DOUBLE_TAP_WINDOW * 1000.0).round() as u64;
        }
        if self.vocabulary_source.trim().is_empty() {
            self.vocabulary_source = DEFAULT_VOCABULARY.to_string();
        }
        if self.speech_command.as_deref().is_some_and(|c| c.trim().is_empty()) {
            self.speech_command = None;
        }
        self
    }
}
