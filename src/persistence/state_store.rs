use std::collections::BTreeSet;

use super::KeyValueStore;
use crate::core::{
    FlashcardError,
    TermId,
    TermStore,
};

pub const CURRENT_INDEX_KEY: &str = "flashcards-currentIndex";
pub const TERMS_ORDER_KEY: &str = "flashcards-termsOrder";
pub const IS_SHUFFLED_KEY: &str = "flashcards-isShuffled";
pub const BOOKMARKS_KEY: &str = "flashcards-bookmarks";

/// Navigation state as read back from storage, before clamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredState {
    pub current_index: usize,
    pub terms: Vec<TermId>,
    pub is_shuffled: bool,
}

/// Maps session state onto the `flashcards-*` keys of a [`KeyValueStore`].
pub struct StateStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> StateStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn save(
        &mut self,
        current_index: usize,
        terms: &[TermId],
        is_shuffled: bool,
    ) -> Result<(), FlashcardError> {
        self.save_position(current_index, is_shuffled)?;

        if is_shuffled {
            let order = serde_json::to_string(terms)?;
            self.kv.set(TERMS_ORDER_KEY, &order)
        } else {
            self.kv.remove(TERMS_ORDER_KEY)
        }
    }

    /// Stores the index and shuffle flag, leaving any saved order as it is.
    pub fn save_position(
        &mut self,
        current_index: usize,
        is_shuffled: bool,
    ) -> Result<(), FlashcardError> {
        self.kv.set(CURRENT_INDEX_KEY, &current_index.to_string())?;
        self.kv.set(IS_SHUFFLED_KEY, if is_shuffled { "true" } else { "false" })
    }

    pub fn load(&self, store: &TermStore) -> RestoredState {
        let current_index = self
            .kv
            .get(CURRENT_INDEX_KEY)
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        let is_shuffled = self.kv.get(IS_SHUFFLED_KEY).as_deref() == Some("true");

        let mut terms = Vec::new();
        if is_shuffled {
            terms = self
                .read_index_list(TERMS_ORDER_KEY)
                .into_iter()
                .filter(|&id| store.contains(id))
                .collect();
        }
        if terms.is_empty() {
            terms = store.ids();
        }

        RestoredState { current_index, terms, is_shuffled }
    }

    pub fn save_bookmark(
        &mut self,
        index: TermId,
        is_bookmarked: bool,
    ) -> Result<(), FlashcardError> {
        let mut bookmarks = self.get_bookmarks();

        if is_bookmarked {
            bookmarks.insert(index);
        } else {
            bookmarks.remove(&index);
        }

        let json = serde_json::to_string(&bookmarks)?;
        self.kv.set(BOOKMARKS_KEY, &json)
    }

    pub fn get_bookmarks(&self) -> BTreeSet<TermId> {
        self.read_index_list(BOOKMARKS_KEY).into_iter().collect()
    }

    pub fn clear_state(&mut self) -> Result<(), FlashcardError> {
        self.kv.remove(CURRENT_INDEX_KEY)?;
        self.kv.remove(TERMS_ORDER_KEY)?;
        self.kv.remove(IS_SHUFFLED_KEY)
    }

    pub fn clear_bookmarks(&mut self) -> Result<(), FlashcardError> {
        self.kv.remove(BOOKMARKS_KEY)
    }

    fn read_index_list(&self, key: &str) -> Vec<TermId> {
        let Some(json) = self.kv.get(key) else {
            return Vec::new();
        };

        match serde_json::from_str::<Vec<TermId>>(&json) {
            Ok(indices) => indices,
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", key, e);
                Vec::new()
            }
        }
    }
}
