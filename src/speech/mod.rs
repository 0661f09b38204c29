pub mod command;

pub use command::CommandSpeech;

use crate::core::FlashcardError;

pub const WORD_RATE: f32 = 0.9;
pub const EXPLANATION_RATE: f32 = 0.7;

/// A text-to-speech backend that plays at most one utterance.
pub trait SpeechEngine {
    fn is_available(&self) -> bool;
    /// Starts speaking `text`; `rate` is relative, 1.0 being normal speed.
    fn speak(&mut self, text: &str, rate: f32) -> Result<(), FlashcardError>;
    fn cancel(&mut self);
    /// `false` once the last utterance has finished or was cancelled.
    fn is_speaking(&mut self) -> bool;
}

/// The control that started an utterance, used for icon highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakSource {
    Word,
    Explanation,
    Gesture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechState {
    Idle,
    Speaking(SpeakSource),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeakOutcome {
    Started,
    /// A previous utterance was playing; it was cancelled and nothing new started.
    Stopped,
    Unavailable,
    Failed(String),
}

/// Single-flight wrapper: speaking while an utterance plays acts as stop.
pub struct SpeechAdapter<E: SpeechEngine> {
    engine: E,
    state: SpeechState,
}

impl<E: SpeechEngine> SpeechAdapter<E> {
    pub fn new(engine: E) -> Self {
        Self { engine, state: SpeechState::Idle }
    }

    pub fn state(&self) -> SpeechState {
        self.state
    }

    pub fn is_speaking(&self) -> bool {
        matches!(self.state, SpeechState::Speaking(_))
    }

    pub fn is_highlighted(&self, source: SpeakSource) -> bool {
        self.state == SpeechState::Speaking(source)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn speak(&mut self, text: &str, rate: f32, source: SpeakSource) -> SpeakOutcome {
        if !self.engine.is_available() {
            return SpeakOutcome::Unavailable;
        }

        if self.is_speaking() {
            self.engine.cancel();
            self.state = SpeechState::Idle;
            return SpeakOutcome::Stopped;
        }

        self.engine.cancel();

        match self.engine.speak(text, rate) {
            Ok(()) => {
                self.state = SpeechState::Speaking(source);
                SpeakOutcome::Started
            }
            Err(e) => {
                log::warn!("Speech failed: {}", e);
                SpeakOutcome::Failed(e.to_string())
            }
        }
    }

    /// Returns to idle once the engine reports the utterance finished.
    /// Returns `true` on that transition.
    pub fn poll(&mut self) -> bool {
        if self.is_speaking() && !self.engine.is_speaking() {
            self.state = SpeechState::Idle;
            return true;
        }
        false
    }

    pub fn stop(&mut self) {
        if self.is_speaking() {
            self.engine.cancel();
            self.state = SpeechState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeEngine {
        unavailable: bool,
        fail: bool,
        playing: bool,
        spoken: Vec<(String, f32)>,
        cancels: usize,
    }

    impl SpeechEngine for FakeEngine {
        fn is_available(&self) -> bool {
            !self.unavailable
        }

        fn speak(&mut self, text: &str, rate: f32) -> Result<(), FlashcardError> {
            if self.fail {
                return Err(FlashcardError::Speech("no audio device".to_string()));
            }
            self.spoken.push((text.to_string(), rate));
            self.playing = true;
            Ok(())
        }

        fn cancel(&mut self) {
            self.cancels += 1;
            self.playing = false;
        }

        fn is_speaking(&mut self) -> bool {
            self.playing
        }
    }

    #[test]
    fn speaking_while_idle_starts_and_highlights() {
        let mut speech = SpeechAdapter::new(FakeEngine::default());

        assert_eq!(speech.speak("Oath", WORD_RATE, SpeakSource::Word), SpeakOutcome::Started);
        assert!(speech.is_speaking());
        assert!(speech.is_highlighted(SpeakSource::Word));
        assert!(!speech.is_highlighted(SpeakSource::Explanation));
        assert_eq!(speech.engine().spoken, vec![("Oath".to_string(), WORD_RATE)]);
    }

    #[test]
    fn speaking_while_speaking_only_stops() {
        let mut speech = SpeechAdapter::new(FakeEngine::default());
        speech.speak("Oath", WORD_RATE, SpeakSource::Word);
        let cancels = speech.engine().cancels;

        let outcome = speech.speak("A formal promise", EXPLANATION_RATE, SpeakSource::Explanation);
        assert_eq!(outcome, SpeakOutcome::Stopped);
        assert_eq!(speech.engine().cancels, cancels + 1);
        assert!(!speech.engine().playing);
        assert_eq!(speech.state(), SpeechState::Idle);
        assert!(!speech.is_highlighted(SpeakSource::Word));
        assert_eq!(speech.engine().spoken.len(), 1);
    }

    #[test]
    fn natural_completion_returns_to_idle() {
        let mut speech = SpeechAdapter::new(FakeEngine::default());
        speech.speak("Oath", WORD_RATE, SpeakSource::Gesture);
        assert!(!speech.poll());

        speech.engine.playing = false;
        assert!(speech.poll());
        assert!(!speech.is_speaking());
        assert!(!speech.poll());
    }

    #[test]
    fn stop_cancels_the_engine() {
        let mut speech = SpeechAdapter::new(FakeEngine::default());
        speech.speak("Oath", WORD_RATE, SpeakSource::Word);
        let cancels = speech.engine().cancels;

        speech.stop();
        assert_eq!(speech.engine().cancels, cancels + 1);
        assert!(!speech.engine().playing);
        assert!(!speech.is_highlighted(SpeakSource::Word));

        speech.stop();
        assert_eq!(speech.engine().cancels, cancels + 1);
    }

    #[test]
    fn unavailable_engine_does_nothing() {
        let mut speech = SpeechAdapter::new(FakeEngine { unavailable: true, ..Default::default() });

        assert_eq!(speech.speak("Oath", WORD_RATE, SpeakSource::Word), SpeakOutcome::Unavailable);
        assert!(!speech.is_speaking());
        assert_eq!(speech.engine().cancels, 0);
    }

    #[test]
    fn engine_failure_stays_idle() {
        let mut speech = SpeechAdapter::new(FakeEngine { fail: true, ..Default::default() });

        let outcome = speech.speak("Oath", WORD_RATE, SpeakSource::Word);
        assert!(matches!(outcome, SpeakOutcome::Failed(_)));
        assert!(!speech.is_speaking());
    }
}
