use serde::{
    Deserialize,
    Serialize,
};

/// Index of a term inside its [`TermStore`]. Assigned once at load time.
pub type TermId = usize;

/// Wire form of a vocabulary entry, as found in `vocabulary.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    pub word: String,
    pub explanation: String,
}

impl TermRecord {
    pub fn new(word: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self { word: word.into(), explanation: explanation.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub id: TermId,
    pub word: String,
    pub explanation: String,
}

/// The full, order-stable list of terms for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermStore {
    terms: Vec<Term>,
}

impl TermStore {
    pub fn from_records(records: Vec<TermRecord>) -> Self {
        let terms = records
            .into_iter()
            .enumerate()
            .map(|(id, record)| Term { id, word: record.word, explanation: record.explanation })
            .collect();

        Self { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn get(&self, id: TermId) -> Option<&Term> {
        self.terms.get(id)
    }

    pub fn contains(&self, id: TermId) -> bool {
        id < self.terms.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter()
    }

    /// Ids of every term in store order.
    pub fn ids(&self) -> Vec<TermId> {
        self.iter().map(|term| term.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_load_order_even_for_duplicate_text() {
        let store = TermStore::from_records(vec![
            TermRecord::new("Claim", "To say something without proof"),
            TermRecord::new("Claim", "To say something without proof"),
            TermRecord::new("Oath", "A formal promise"),
        ]);

        assert_eq!(store.len(), 3);
        assert!(!store.is_empty());
        assert!(TermStore::default().is_empty());
        assert_eq!(store.ids(), vec![0, 1, 2]);
        assert_eq!(store.get(1).map(|t| t.id), Some(1));
        assert_eq!(store.get(2).map(|t| t.word.as_str()), Some("Oath"));
        assert!(store.get(3).is_none());
        assert!(!store.contains(3));
    }

    #[test]
    fn records_deserialize_from_vocabulary_json() {
        let json = r#"[{"word": "Claim", "explanation": "To say something"}]"#;
        let records: Vec<TermRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records, vec![TermRecord::new("Claim", "To say something")]);
    }
}
