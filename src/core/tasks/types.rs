use crate::core::vocabulary::LoadedVocabulary;

#[derive(Debug, Clone)]
pub enum TaskResult {
    LoadingMessage(String),
    /// `request` matches the id returned by `TaskManager::load_vocabulary`.
    VocabularyLoaded { request: u64, loaded: LoadedVocabulary },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::LoadingMessage(_) => "loading_message",
            TaskResult::VocabularyLoaded { .. } => "vocabulary_loaded",
        }
    }
}
