pub mod kv;
pub mod state_store;

use std::{
    fs,
    path::PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

pub use kv::{
    FileStore,
    KeyValueStore,
    MemoryStore,
};
pub use state_store::{
    RestoredState,
    StateStore,
};

use crate::core::FlashcardError;

const APP_NAME: &str = "flashcards";

pub const STATE_FILE: &str = "state.json";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), FlashcardError> {
    let file_path = get_data_file_path(filename);
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&file_path, json)?;
    log::debug!("Data saved to: {}", file_path.display());
    Ok(())
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(
    filename: &str,
) -> Result<T, FlashcardError> {
    let file_path = get_data_file_path(filename);

    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(&file_path)?;
    let data: T = serde_json::from_str(&json)?;
    log::debug!("Data loaded from: {}", file_path.display());
    Ok(data)
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> T {
    match load_json::<T>(filename) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}

/// Opens the key-value file that backs session state and bookmarks.
pub fn open_state_store() -> FileStore {
    let store = FileStore::open(get_data_file_path(STATE_FILE));
    log::debug!("Session state file: {}", store.path().display());
    store
}
