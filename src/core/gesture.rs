/// Minimum horizontal travel, in logical pixels, for a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Two touch-ends closer than this (in seconds) form a double tap.
pub const DOUBLE_TAP_WINDOW: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeNavigation {
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureOutcome {
    pub navigation: Option<SwipeNavigation>,
    pub speak_word: bool,
}

/// Turns touch-start / touch-end positions on the card into swipes and
/// double taps. Only the horizontal coordinate is tracked.
///
/// Swipe and double-tap detection both look at every touch-end, so a quick
/// second swipe can navigate and speak in the same event.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    swipe_threshold: f32,
    double_tap_window: f64,
    touch_start_x: Option<f32>,
    last_tap: Option<f64>,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD, DOUBLE_TAP_WINDOW)
    }
}

impl GestureTracker {
    pub fn new(swipe_threshold: f32, double_tap_window: f64) -> Self {
        Self { swipe_threshold, double_tap_window, touch_start_x: None, last_tap: None }
    }

    pub fn touch_start(&mut self, x: f32) {
        self.touch_start_x = Some(x);
    }

    /// `time` is in seconds on any monotonic clock.
    pub fn touch_end(&mut self, x: f32, time: f64) -> GestureOutcome {
        let mut outcome = GestureOutcome::default();

        if let Some(start) = self.touch_start_x.take() {
            if x < start - self.swipe_threshold {
                outcome.navigation = Some(SwipeNavigation::Next);
            } else if x > start + self.swipe_threshold {
                outcome.navigation = Some(SwipeNavigation::Previous);
            }
        }

        if let Some(last) = self.last_tap {
            let tap_length = time - last;
            if tap_length > 0.0 && tap_length < self.double_tap_window {
                outcome.speak_word = true;
            }
        }
        self.last_tap = Some(time);

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_left_goes_next_and_right_goes_previous() {
        let mut tracker = GestureTracker::default();

        tracker.touch_start(300.0);
        assert_eq!(tracker.touch_end(200.0, 1.0).navigation, Some(SwipeNavigation::Next));

        tracker.touch_start(100.0);
        assert_eq!(tracker.touch_end(180.0, 2.0).navigation, Some(SwipeNavigation::Previous));
    }

    #[test]
    fn short_moves_are_not_swipes() {
        let mut tracker = GestureTracker::default();
        tracker.touch_start(100.0);
        assert_eq!(tracker.touch_end(140.0, 1.0), GestureOutcome::default());

        tracker.touch_start(100.0);
        assert_eq!(tracker.touch_end(50.0, 2.0).navigation, None);
    }

    #[test]
    fn double_tap_speaks_within_window_only() {
        let mut tracker = GestureTracker::default();

        assert!(!tracker.touch_end(10.0, 1.0).speak_word);
        assert!(tracker.touch_end(10.0, 1.2).speak_word);

        assert!(!tracker.touch_end(10.0, 2.0).speak_word);
        assert!(!tracker.touch_end(10.0, 2.0).speak_word);
    }

    #[test]
    fn quick_swipes_can_navigate_and_speak_together() {
        let mut tracker = GestureTracker::default();
        tracker.touch_start(300.0);
        tracker.touch_end(200.0, 1.0);

        tracker.touch_start(300.0);
        let outcome = tracker.touch_end(200.0, 1.1);
        assert_eq!(outcome.navigation, Some(SwipeNavigation::Next));
        assert!(outcome.speak_word);
    }
}
