//! RON file loading and directory watching.
//!
//! Settings and item definitions are plain RON files on disk. This module
//! reads every `.ron` file in a directory into a typed `Vec`, and provides a
//! small `notify`-backed watcher resource whose shared flag flips to `true`
//! when a watched file changes. Loader systems poll that flag once per frame
//! to hot-reload configuration during development.

use bevy::prelude::Resource;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// File-watcher resource for RON hot-reload.
#[derive(Resource)]
pub struct RonWatcher {
    pub changed: Arc<Mutex<bool>>, // Shared flag set to `true` when watched files change.
    _watcher: Option<RecommendedWatcher>, // Watcher handle kept alive to avoid immediate drop.
}

impl RonWatcher {
    /// A `RonWatcher` without an active OS watcher. Used as a fallback when
    /// watcher creation fails (e.g. unsupported platform or missing dir);
    /// the `changed` flag simply never flips.
    #[must_use]
    pub fn stub() -> Self {
        RonWatcher {
            changed: Arc::new(Mutex::new(false)),
            _watcher: None,
        }
    }

    /// Check-and-clear the changed flag. Recovers from a poisoned mutex so a
    /// panicked watcher callback cannot wedge hot-reload.
    pub fn take_changed(&self) -> bool {
        let mut flag = match self.changed.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                eprintln!("warning: RON watcher mutex poisoned - recovering");
                poisoned.into_inner()
            }
        };
        let was = *flag;
        *flag = false;
        was
    }
}

/// Load every `.ron` file in `path` and deserialize each into `T`.
///
/// Files that fail to parse are skipped with a message on stderr so one bad
/// edit does not take out the rest of the directory.
#[must_use]
pub fn load_ron_files<T: DeserializeOwned>(path: &str) -> Vec<T> {
    let mut items = Vec::new();

    if let Ok(entries) = std::fs::read_dir(path) {
        for entry in entries.flatten() {
            let is_ron = entry.metadata().map(|m| m.is_file()).unwrap_or(false)
                && entry.path().extension().is_some_and(|ext| ext == "ron");
            if !is_ron {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(entry.path()) else {
                continue;
            };
            match ron::from_str::<T>(&content) {
                Ok(item) => items.push(item),
                Err(e) => {
                    eprintln!("Failed to parse {}: {e:?}", entry.path().display());
                }
            }
        }
    }

    items
}

/// Create a `RonWatcher` for a directory.
///
/// The returned watcher's `changed` flag is set when a create or modify
/// event under `path` is observed. Events for unrelated paths are filtered
/// out by comparing canonicalized prefixes.
///
/// # Errors
/// Returns a `notify::Error` if the underlying OS watcher cannot be created
/// or registered for `path`.
pub fn setup_ron_watcher(path: &str) -> Result<RonWatcher, notify::Error> {
    let changed = Arc::new(Mutex::new(false));
    let changed_clone = changed.clone();
    let watched_path: PathBuf =
        std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(
                    event.kind,
                    notify::EventKind::Modify(_) | notify::EventKind::Create(_)
                ) {
                    let relevant = event.paths.iter().any(|p| {
                        std::fs::canonicalize(p)
                            .unwrap_or_else(|_| p.clone())
                            .starts_with(&watched_path)
                    });
                    if relevant {
                        if let Ok(mut flag) = changed_clone.lock() {
                            *flag = true;
                        }
                    }
                }
            }
            Err(e) => eprintln!("Watch error: {e:?}"),
        },
        Config::default(),
    )?;

    watcher.watch(Path::new(path), RecursiveMode::NonRecursive)?;
    Ok(RonWatcher {
        changed,
        _watcher: Some(watcher),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_watcher_reports_no_changes() {
        let w = RonWatcher::stub();
        assert!(!w.take_changed());
    }

    #[test]
    fn take_changed_clears_flag() {
        let w = RonWatcher::stub();
        *w.changed.lock().unwrap() = true;
        assert!(w.take_changed());
        assert!(!w.take_changed());
    }

    #[test]
    fn missing_directory_yields_empty_vec() {
        let items: Vec<u32> = load_ron_files("does/not/exist");
        assert!(items.is_empty());
    }
}
