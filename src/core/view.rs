use super::StudySession;
use crate::persistence::KeyValueStore;

/// Everything the card screen shows, derived from the session in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub explanation: String,
    pub explanation_visible: bool,
    pub counter: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub bookmarked: bool,
    pub bookmarks_button_label: &'static str,
    pub toggle_explanation_label: &'static str,
}

impl CardView {
    /// `None` when the active view has no terms.
    pub fn project<S: KeyValueStore>(session: &StudySession<S>) -> Option<Self> {
        let term = session.current_term()?;
        let state = session.state();
        let position = state.current_index + 1;

        Some(Self {
            title: format!("{}. {}", position, term.word),
            explanation: term.explanation.clone(),
            explanation_visible: state.explanation_visible,
            counter: format!("{} / {}", position, session.len()),
            previous_enabled: session.has_previous(),
            next_enabled: session.has_next(),
            bookmarked: session.is_current_bookmarked(),
            bookmarks_button_label: if state.showing_bookmarks_only {
                "Show All Terms"
            } else {
                "Show Bookmarks"
            },
            toggle_explanation_label: if state.explanation_visible {
                "Hide Explanation"
            } else {
                "Show Explanation"
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            TermRecord,
            TermStore,
        },
        persistence::{
            MemoryStore,
            StateStore,
        },
    };

    fn session() -> StudySession<MemoryStore> {
        let store = TermStore::from_records(vec![
            TermRecord::new("Oath", "A formal promise"),
            TermRecord::new("Claim", "To say something without proof"),
        ]);
        StudySession::restore(store, StateStore::new(MemoryStore::new()))
    }

    #[test]
    fn first_card_projection() {
        let view = CardView::project(&session()).unwrap();

        assert_eq!(view.title, "1. Oath");
        assert_eq!(view.counter, "1 / 2");
        assert!(!view.previous_enabled);
        assert!(view.next_enabled);
        assert!(!view.bookmarked);
        assert!(!view.explanation_visible);
        assert_eq!(view.toggle_explanation_label, "Show Explanation");
        assert_eq!(view.bookmarks_button_label, "Show Bookmarks");
    }

    #[test]
    fn projection_tracks_bookmark_and_filter() {
        let mut session = session();
        session.show_next();
        session.toggle_bookmark();
        session.toggle_explanation();

        let view = CardView::project(&session).unwrap();
        assert_eq!(view.title, "2. Claim");
        assert!(view.bookmarked);
        assert!(view.previous_enabled);
        assert!(!view.next_enabled);
        assert_eq!(view.toggle_explanation_label, "Hide Explanation");

        session.toggle_bookmarks_view();
        let view = CardView::project(&session).unwrap();
        assert_eq!(view.counter, "1 / 1");
        assert_eq!(view.bookmarks_button_label, "Show All Terms");
    }

    #[test]
    fn empty_session_has_no_view() {
        let session =
            StudySession::restore(TermStore::default(), StateStore::new(MemoryStore::new()));
        assert!(CardView::project(&session).is_none());
    }
}
