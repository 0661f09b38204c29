use std::collections::BTreeSet;

use rand::Rng;

use super::{
    Term,
    TermId,
    TermStore,
};
use crate::persistence::{
    KeyValueStore,
    StateStore,
};

/// Outcome of [`StudySession::toggle_bookmarks_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkViewChange {
    ShowingBookmarks,
    ShowingAll,
    /// The bookmark set was empty, so the filtered view was not entered.
    NoBookmarks,
}

/// The mutable view over a [`TermStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub terms: Vec<TermId>,
    pub current_index: usize,
    pub is_shuffled: bool,
    pub showing_bookmarks_only: bool,
    pub bookmarks: BTreeSet<TermId>,
    pub explanation_visible: bool,
}

/// Owns the term store, the session state and the persistence adapter.
/// Every mutating method persists its change before returning.
pub struct StudySession<S: KeyValueStore> {
    store: TermStore,
    state: SessionState,
    persistence: StateStore<S>,
}

impl<S: KeyValueStore> StudySession<S> {
    /// Restores the previous session for `store`, falling back to the full
    /// store at position 0 when the saved state does not fit.
    pub fn restore(store: TermStore, persistence: StateStore<S>) -> Self {
        if store.is_empty() {
            log::warn!("Starting a session with no terms");
        }

        let restored = persistence.load(&store);

        let mut terms = restored.terms;
        if terms.is_empty() {
            terms = store.ids();
        }

        let mut current_index = restored.current_index;
        if current_index >= terms.len() {
            current_index = 0;
        }

        let state = SessionState {
            terms,
            current_index,
            is_shuffled: restored.is_shuffled,
            showing_bookmarks_only: false,
            bookmarks: persistence.get_bookmarks(),
            explanation_visible: false,
        };

        log::info!(
            "Restored session: {} terms, index {}, shuffled {}, {} bookmarks",
            state.terms.len(),
            state.current_index,
            state.is_shuffled,
            state.bookmarks.len()
        );

        let mut session = Self { store, state, persistence };
        session.persist();
        session
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn persistence(&self) -> &StateStore<S> {
        &self.persistence
    }

    pub fn len(&self) -> usize {
        self.state.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.terms.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// Terms of the active view, in browsing order.
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.state.terms.iter().filter_map(|&id| self.store.get(id))
    }

    pub fn current_term(&self) -> Option<&Term> {
        self.state.terms.get(self.state.current_index).and_then(|&id| self.store.get(id))
    }

    pub fn has_previous(&self) -> bool {
        self.state.current_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.state.current_index + 1 < self.state.terms.len()
    }

    pub fn show_previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.state.current_index -= 1;
        self.card_changed();
        true
    }

    pub fn show_next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.state.current_index += 1;
        self.card_changed();
        true
    }

    pub fn toggle_explanation(&mut self) -> bool {
        self.state.explanation_visible = !self.state.explanation_visible;
        self.state.explanation_visible
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    pub fn shuffle_with<R: Rng>(&mut self, rng: &mut R) {
        let mut terms = self.store.ids();
        fisher_yates(&mut terms, rng);

        self.state.terms = terms;
        self.state.current_index = 0;
        self.state.is_shuffled = true;
        self.state.showing_bookmarks_only = false;
        log::debug!("Shuffled {} terms", self.state.terms.len());
        self.card_changed();
    }

    pub fn reset(&mut self) {
        self.state.terms = self.store.ids();
        self.state.current_index = 0;
        self.state.is_shuffled = false;
        self.state.showing_bookmarks_only = false;
        self.card_changed();

        if let Err(e) = self.persistence.clear_state() {
            log::warn!("Failed to clear saved navigation state: {}", e);
        }
    }

    pub fn toggle_bookmarks_view(&mut self) -> BookmarkViewChange {
        self.toggle_bookmarks_view_with(&mut rand::rng())
    }

    /// Switches between the bookmarked subset and the full store. The switch
    /// itself is not persisted.
    pub fn toggle_bookmarks_view_with<R: Rng>(&mut self, rng: &mut R) -> BookmarkViewChange {
        self.state.showing_bookmarks_only = !self.state.showing_bookmarks_only;

        let change = if self.state.showing_bookmarks_only {
            let filtered: Vec<TermId> = self
                .store
                .ids()
                .into_iter()
                .filter(|id| self.state.bookmarks.contains(id))
                .collect();

            if filtered.is_empty() {
                self.state.showing_bookmarks_only = false;
                BookmarkViewChange::NoBookmarks
            } else {
                self.state.terms = filtered;
                BookmarkViewChange::ShowingBookmarks
            }
        } else {
            let mut terms = self.store.ids();
            if self.state.is_shuffled {
                fisher_yates(&mut terms, rng);
            }
            self.state.terms = terms;
            BookmarkViewChange::ShowingAll
        };

        self.state.current_index = 0;
        self.state.explanation_visible = false;
        change
    }

    /// Flips the bookmark on the current term. Returns the new state, or
    /// `None` when there is no current term.
    pub fn toggle_bookmark(&mut self) -> Option<bool> {
        let id = self.current_term()?.id;

        let bookmarked = !self.state.bookmarks.contains(&id);
        if bookmarked {
            self.state.bookmarks.insert(id);
        } else {
            self.state.bookmarks.remove(&id);
        }

        if let Err(e) = self.persistence.save_bookmark(id, bookmarked) {
            log::warn!("Failed to save bookmark {}: {}", id, e);
        }

        Some(bookmarked)
    }

    pub fn is_current_bookmarked(&self) -> bool {
        self.current_term().is_some_and(|term| self.state.bookmarks.contains(&term.id))
    }

    pub fn clear_bookmarks(&mut self) {
        self.state.bookmarks.clear();
        if let Err(e) = self.persistence.clear_bookmarks() {
            log::warn!("Failed to clear bookmarks: {}", e);
        }

        if self.state.showing_bookmarks_only {
            self.toggle_bookmarks_view();
        }
    }

    fn card_changed(&mut self) {
        self.state.explanation_visible = false;
        self.persist();
    }

    // The bookmark subset is never written as the stored order.
    fn persist(&mut self) {
        let result = if self.state.showing_bookmarks_only {
            self.persistence.save_position(self.state.current_index, self.state.is_shuffled)
        } else {
            self.persistence.save(
                self.state.current_index,
                &self.state.terms,
                self.state.is_shuffled,
            )
        };

        if let Err(e) = result {
            log::warn!("Failed to save session state: {}", e);
        }
    }
}

/// In-place Fisher–Yates: each position from the back swaps with a uniformly
/// chosen position at or before it.
pub fn fisher_yates<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;
    use crate::{
        core::TermRecord,
        persistence::{
            state_store::{
                CURRENT_INDEX_KEY,
                IS_SHUFFLED_KEY,
                TERMS_ORDER_KEY,
            },
            MemoryStore,
        },
    };

    fn abc() -> TermStore {
        TermStore::from_records(vec![
            TermRecord::new("A", "first"),
            TermRecord::new("B", "second"),
            TermRecord::new("C", "third"),
        ])
    }

    fn session() -> StudySession<MemoryStore> {
        StudySession::restore(abc(), StateStore::new(MemoryStore::new()))
    }

    fn words(session: &StudySession<MemoryStore>) -> Vec<String> {
        session.terms().map(|t| t.word.clone()).collect()
    }

    fn sorted(mut ids: Vec<TermId>) -> Vec<TermId> {
        ids.sort_unstable();
        ids
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            if rng.random_bool(0.5) {
                session.show_next();
            } else {
                session.show_previous();
            }
            assert!(session.current_index() < session.len());
        }
    }

    #[test]
    fn walk_to_end_then_shuffle_then_reset() {
        let mut session = session();
        assert!(!session.has_previous());

        assert!(session.show_next());
        assert!(session.show_next());
        assert_eq!(session.current_index(), 2);
        assert!(!session.has_next());
        assert!(session.has_previous());
        assert!(!session.show_next());
        assert_eq!(session.current_index(), 2);

        session.shuffle_with(&mut StdRng::seed_from_u64(3));
        assert_eq!(session.current_index(), 0);
        assert!(session.state().is_shuffled);
        assert_eq!(sorted(session.state().terms.clone()), vec![0, 1, 2]);

        session.reset();
        assert_eq!(words(&session), vec!["A", "B", "C"]);
        assert_eq!(session.current_index(), 0);
        assert!(!session.state().is_shuffled);

        let kv = session.persistence().kv();
        assert!(!kv.contains_key(CURRENT_INDEX_KEY));
        assert!(!kv.contains_key(TERMS_ORDER_KEY));
        assert!(!kv.contains_key(IS_SHUFFLED_KEY));
    }

    #[test]
    fn moving_hides_the_explanation() {
        let mut session = session();
        assert!(session.toggle_explanation());
        session.show_next();
        assert!(!session.state().explanation_visible);
    }

    #[test]
    fn bookmark_view_filters_and_restores() {
        let mut session = session();
        session.show_next();
        assert_eq!(session.toggle_bookmark(), Some(true));
        assert!(session.is_current_bookmarked());

        assert_eq!(session.toggle_bookmarks_view(), BookmarkViewChange::ShowingBookmarks);
        assert_eq!(words(&session), vec!["B"]);
        assert_eq!(session.current_index(), 0);

        assert_eq!(session.toggle_bookmarks_view(), BookmarkViewChange::ShowingAll);
        assert_eq!(words(&session), vec!["A", "B", "C"]);
        assert!(!session.state().showing_bookmarks_only);
    }

    #[test]
    fn leaving_bookmark_view_reshuffles_when_shuffled() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(11);
        session.shuffle_with(&mut rng);
        session.toggle_bookmark();

        session.toggle_bookmarks_view_with(&mut rng);
        assert_eq!(session.len(), 1);

        session.toggle_bookmarks_view_with(&mut rng);
        assert_eq!(session.len(), 3);
        assert!(session.state().is_shuffled);
        assert_eq!(sorted(session.state().terms.clone()), vec![0, 1, 2]);
    }

    #[test]
    fn empty_bookmark_view_is_reverted() {
        let mut session = session();
        session.shuffle_with(&mut StdRng::seed_from_u64(5));
        session.show_next();
        let before = session.state().terms.clone();

        assert_eq!(session.toggle_bookmarks_view(), BookmarkViewChange::NoBookmarks);
        assert_eq!(session.state().terms, before);
        assert!(!session.state().showing_bookmarks_only);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn toggling_bookmark_twice_is_idempotent() {
        let mut session = session();
        session.show_next();
        session.show_next();
        let before = session.state().bookmarks.clone();

        assert_eq!(session.toggle_bookmark(), Some(true));
        assert_eq!(session.toggle_bookmark(), Some(false));
        assert_eq!(session.state().bookmarks, before);
        assert!(session.persistence().get_bookmarks().is_empty());
    }

    #[test]
    fn duplicate_text_terms_bookmark_independently() {
        let store = TermStore::from_records(vec![
            TermRecord::new("Claim", "same"),
            TermRecord::new("Claim", "same"),
        ]);
        let mut session = StudySession::restore(store, StateStore::new(MemoryStore::new()));

        session.show_next();
        session.toggle_bookmark();

        assert_eq!(session.state().bookmarks.iter().copied().collect::<Vec<_>>(), vec![1]);
        session.show_previous();
        assert!(!session.is_current_bookmarked());
    }

    #[test]
    fn restore_picks_up_saved_shuffle_and_bookmarks() {
        let mut first = session();
        first.shuffle_with(&mut StdRng::seed_from_u64(9));
        first.show_next();
        first.toggle_bookmark();
        let order = first.state().terms.clone();
        let bookmarks = first.state().bookmarks.clone();

        let kv = first.persistence().kv().clone();
        let second = StudySession::restore(abc(), StateStore::new(kv));

        assert_eq!(second.state().terms, order);
        assert_eq!(second.current_index(), 1);
        assert!(second.state().is_shuffled);
        assert_eq!(second.state().bookmarks, bookmarks);
        assert!(!second.state().showing_bookmarks_only);
    }

    #[test]
    fn restore_clamps_out_of_range_index() {
        let mut kv = MemoryStore::new();
        kv.set(CURRENT_INDEX_KEY, "42").unwrap();

        let session = StudySession::restore(abc(), StateStore::new(kv));
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.current_term().map(|t| t.word.as_str()), Some("A"));
    }

    #[test]
    fn bookmark_view_navigation_saves_position_only() {
        let mut session = session();
        session.toggle_bookmark();
        session.show_next();
        session.toggle_bookmark();

        session.toggle_bookmarks_view();
        assert!(session.show_next());

        let kv = session.persistence().kv();
        assert_eq!(kv.get(CURRENT_INDEX_KEY).as_deref(), Some("1"));
        assert_eq!(kv.get(IS_SHUFFLED_KEY).as_deref(), Some("false"));
        assert_eq!(kv.get(TERMS_ORDER_KEY), None);
    }

    #[test]
    fn shuffled_bookmark_view_keeps_saved_order() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(3);
        session.shuffle_with(&mut rng);
        let saved_order = session.persistence().kv().get(TERMS_ORDER_KEY);
        assert!(saved_order.is_some());

        session.toggle_bookmark();
        session.show_next();
        session.toggle_bookmark();
        session.toggle_bookmarks_view_with(&mut rng);
        assert!(session.show_next());

        let kv = session.persistence().kv();
        assert_eq!(kv.get(CURRENT_INDEX_KEY).as_deref(), Some("1"));
        assert_eq!(kv.get(TERMS_ORDER_KEY), saved_order);
    }

    #[test]
    fn empty_store_is_inert() {
        let mut session =
            StudySession::restore(TermStore::default(), StateStore::new(MemoryStore::new()));

        assert!(!session.show_next());
        assert!(!session.show_previous());
        assert_eq!(session.toggle_bookmark(), None);
        assert!(session.current_term().is_none());
    }

    #[test]
    fn clear_bookmarks_leaves_filtered_view() {
        let mut session = session();
        session.toggle_bookmark();
        session.toggle_bookmarks_view();

        session.clear_bookmarks();
        assert!(session.state().bookmarks.is_empty());
        assert!(!session.state().showing_bookmarks_only);
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn fisher_yates_is_a_permutation() {
        let mut items: Vec<u32> = (0..50).collect();
        fisher_yates(&mut items, &mut StdRng::seed_from_u64(1));

        let mut check = items.clone();
        check.sort_unstable();
        assert_eq!(check, (0..50).collect::<Vec<_>>());
    }
}
