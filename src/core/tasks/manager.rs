use std::{
    sync::mpsc,
    thread,
};

use super::TaskResult;
use crate::core::vocabulary::{
    load_vocabulary,
    VocabularySource,
};

/// Runs blocking work off the UI thread. Results are collected once per
/// frame with [`TaskManager::poll_results`].
pub struct TaskManager {
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    next_request: u64,
}

impl TaskManager {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();

        Self { receiver, sender, next_request: 0 }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    /// Starts loading `source` and returns the request id the result will carry.
    pub fn load_vocabulary(&mut self, source: VocabularySource) -> u64 {
        self.next_request += 1;
        let request = self.next_request;
        let sender = self.sender.clone();

        thread::spawn(move || {
            let _ = sender.send(TaskResult::LoadingMessage(format!("Loading {}...", source)));
            let loaded = load_vocabulary(source);
            let _ = sender.send(TaskResult::VocabularyLoaded { request, loaded });
        });

        request
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        time::{
            Duration,
            Instant,
        },
    };

    use super::*;

    #[test]
    fn vocabulary_result_arrives_with_its_request_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocabulary.json");
        fs::write(&path, r#"[{"word": "Oath", "explanation": "A formal promise"}]"#).unwrap();

        let mut manager = TaskManager::new();
        let request = manager.load_vocabulary(VocabularySource::File(path));

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut loaded = None;
        while loaded.is_none() && Instant::now() < deadline {
            for result in manager.poll_results() {
                if let TaskResult::VocabularyLoaded { request: id, loaded: vocabulary } = result {
                    loaded = Some((id, vocabulary));
                }
            }
            thread::sleep(Duration::from_millis(10));
        }

        let (id, vocabulary) = loaded.expect("vocabulary task did not finish");
        assert_eq!(id, request);
        assert!(!vocabulary.used_fallback);
        assert_eq!(vocabulary.store.len(), 1);
    }
}
