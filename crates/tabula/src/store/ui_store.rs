//! Shell UI state: sidebar, dialog, theme.
//!
//! Only the sidebar's collapsed flag survives restarts. It is stored under
//! [`UI_STORAGE_KEY`] as `{"state": {"isSidebarCollapsed": bool}, "version": 0}`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tabula_core::{Property, Signal};

use super::preferences::PreferenceStorage;
use crate::error::StoreError;

/// Key of the persisted UI record.
pub const UI_STORAGE_KEY: &str = "ui-storage";

const UI_STORAGE_VERSION: u32 = 0;

/// Color theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Which part of the UI state changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiChange {
    SidebarOpen(bool),
    SidebarCollapsed(bool),
    Dialog(Option<String>),
    Theme(Theme),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    is_sidebar_collapsed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedRecord {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

/// Owned, injectable UI state container.
pub struct UiStore {
    sidebar_open: Property<bool>,
    sidebar_collapsed: Property<bool>,
    dialog: Property<Option<String>>,
    theme: Property<Theme>,
    storage: Arc<dyn PreferenceStorage>,
    changed: Signal<UiChange>,
}

impl UiStore {
    /// Create a store with default state, restoring persisted fields from
    /// `storage`. An unreadable record is logged and ignored.
    pub fn new(storage: Arc<dyn PreferenceStorage>) -> Self {
        let store = Self {
            sidebar_open: Property::new(true),
            sidebar_collapsed: Property::new(false),
            dialog: Property::new(None),
            theme: Property::new(Theme::default()),
            storage,
            changed: Signal::new(),
        };

        match store.restore() {
            Ok(true) => {
                tracing::debug!(target: "tabula::store", collapsed = store.is_sidebar_collapsed(), "restored ui state");
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(target: "tabula::store", error = %e, "ignoring unreadable ui state");
            }
        }
        store
    }

    /// Emitted after each effective change.
    pub fn changed(&self) -> &Signal<UiChange> {
        &self.changed
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open.get()
    }

    pub fn is_sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed.get()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog.with(Option::is_some)
    }

    pub fn dialog_content(&self) -> Option<String> {
        self.dialog.get()
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn toggle_sidebar(&self) {
        self.set_sidebar_open(!self.is_sidebar_open());
    }

    pub fn set_sidebar_open(&self, open: bool) {
        if self.sidebar_open.set(open) {
            self.changed.emit(UiChange::SidebarOpen(open));
        }
    }

    pub fn toggle_sidebar_collapse(&self) {
        self.set_sidebar_collapsed(!self.is_sidebar_collapsed());
    }

    /// Set the collapsed flag and persist it.
    pub fn set_sidebar_collapsed(&self, collapsed: bool) {
        if self.sidebar_collapsed.set(collapsed) {
            if let Err(e) = self.persist() {
                tracing::warn!(target: "tabula::store", error = %e, "failed to persist ui state");
            }
            self.changed.emit(UiChange::SidebarCollapsed(collapsed));
        }
    }

    pub fn open_dialog(&self, content: impl Into<String>) {
        let content = Some(content.into());
        if self.dialog.set(content.clone()) {
            self.changed.emit(UiChange::Dialog(content));
        }
    }

    pub fn close_dialog(&self) {
        if self.dialog.set(None) {
            self.changed.emit(UiChange::Dialog(None));
        }
    }

    pub fn toggle_theme(&self) {
        self.set_theme(self.theme().toggled());
    }

    pub fn set_theme(&self, theme: Theme) {
        if self.theme.set(theme) {
            self.changed.emit(UiChange::Theme(theme));
        }
    }

    /// Write the persistent fields to storage.
    pub fn persist(&self) -> Result<(), StoreError> {
        let record = PersistedRecord {
            state: PersistedState {
                is_sidebar_collapsed: self.is_sidebar_collapsed(),
            },
            version: UI_STORAGE_VERSION,
        };
        let value = serde_json::to_value(&record).map_err(|source| StoreError::Serialization {
            key: UI_STORAGE_KEY.to_string(),
            source,
        })?;
        self.storage.save(UI_STORAGE_KEY, &value)
    }

    fn restore(&self) -> Result<bool, StoreError> {
        let Some(value) = self.storage.load(UI_STORAGE_KEY)? else {
            return Ok(false);
        };
        let record: PersistedRecord =
            serde_json::from_value(value).map_err(|source| StoreError::Serialization {
                key: UI_STORAGE_KEY.to_string(),
                source,
            })?;
        self.sidebar_collapsed
            .set_silent(record.state.is_sidebar_collapsed);
        Ok(true)
    }
}

impl std::fmt::Debug for UiStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiStore")
            .field("sidebar_open", &self.sidebar_open)
            .field("sidebar_collapsed", &self.sidebar_collapsed)
            .field("dialog", &self.dialog)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}
