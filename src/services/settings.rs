//! Persisted settings with change subscriptions
//!
//! A small key-value store over the JSON config file. The app reads keys
//! synchronously, writes them through `set`, and observes them through
//! `on`: each subscription gets a channel that receives every subsequent
//! value written to its key. Subscriptions are scoped guards; dropping
//! one (or calling `unregister`) detaches its listener.
//!
//! The store is handed to the app as a value, never reached through a
//! global, so tests run against an in-memory instance.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, Weak};

/// Key gating the advanced editing affordances.
pub const ADVANCED_MODE: &str = "advanced_mode";

/// On-disk shape of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub advanced_mode: bool,
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".filter-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }
}

struct Listener {
    id: u64,
    key: String,
    tx: Sender<bool>,
}

struct State {
    config: Config,
    path: Option<PathBuf>,
    listeners: Vec<Listener>,
    next_id: u64,
}

struct Inner {
    state: Mutex<State>,
}

/// Shared handle to the settings store.
#[derive(Clone)]
pub struct SettingsStore {
    inner: Arc<Inner>,
}

impl SettingsStore {
    fn with_state(config: Config, path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    config,
                    path,
                    listeners: Vec::new(),
                    next_id: 0,
                }),
            }),
        }
    }

    /// Store backed by the given file; missing or unparsable files fall
    /// back to defaults and are created on the first write.
    pub fn load_from(path: PathBuf) -> Self {
        let config = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default();
        Self::with_state(config, Some(path))
    }

    /// Store backed by the user config file, or in-memory when no home
    /// directory can be determined.
    pub fn load_or_default() -> Self {
        match Config::config_path() {
            Some(path) => Self::load_from(path),
            None => Self::in_memory(Config::default()),
        }
    }

    /// Unpersisted store, for tests and exotic environments.
    pub fn in_memory(config: Config) -> Self {
        Self::with_state(config, None)
    }

    /// Synchronous read of a key's current value. Unknown keys read as
    /// false.
    pub fn get(&self, key: &str) -> bool {
        let state = self.inner.state.lock().unwrap();
        match key {
            ADVANCED_MODE => state.config.advanced_mode,
            _ => false,
        }
    }

    /// Write a key, persist, and notify every live subscriber of it.
    pub fn set(&self, key: &str, value: bool) {
        let mut state = self.inner.state.lock().unwrap();
        match key {
            ADVANCED_MODE => state.config.advanced_mode = value,
            _ => return,
        }

        if let Some(path) = state.path.clone() {
            let _ = Self::persist(&state.config, &path);
        }

        // Drop listeners whose receiving end is gone.
        state
            .listeners
            .retain(|listener| listener.key != key || listener.tx.send(value).is_ok());
    }

    fn persist(config: &Config, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(config)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Subscribe to changes of a key. The returned guard detaches the
    /// listener when unregistered or dropped.
    pub fn on(&self, key: &str) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let mut state = self.inner.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.push(Listener {
            id,
            key: key.to_string(),
            tx,
        });

        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
            rx,
            registered: true,
        }
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.inner.state.lock().unwrap().listeners.len()
    }
}

/// Scoped handle to a key subscription.
pub struct Subscription {
    id: u64,
    store: Weak<Inner>,
    rx: Receiver<bool>,
    registered: bool,
}

impl Subscription {
    /// Drain pending notifications, returning the most recent value.
    pub fn try_recv(&self) -> Option<bool> {
        let mut latest = None;
        while let Ok(value) = self.rx.try_recv() {
            latest = Some(value);
        }
        latest
    }

    /// Detach the listener. Safe to call more than once.
    pub fn unregister(&mut self) {
        if !self.registered {
            return;
        }
        self.registered = false;
        if let Some(inner) = self.store.upgrade() {
            let mut state = inner.state.lock().unwrap();
            state.listeners.retain(|listener| listener.id != self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unregister();
    }
}
