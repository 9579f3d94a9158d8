//! Application state that outlives a single page.

mod preferences;
mod ui_store;

pub use preferences::{JsonFileStorage, MemoryStorage, PREFERENCES_FILE, PreferenceStorage};
pub use ui_store::{Theme, UI_STORAGE_KEY, UiChange, UiStore};
