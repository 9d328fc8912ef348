//! Watches the settings file for changes.
//!
//! The watcher observes the file's directory (editors often replace files
//! rather than write them in place) and reports events for the settings
//! file only. Events are collected on notify's thread and drained with
//! `poll` from the simulation thread.

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, channel};
use tracing::{debug, warn};

pub use crate::settings::default_settings_path;

#[derive(Debug)]
pub enum SettingsEvent {
    Modified,
    Created,
    Deleted,
    Error(String),
}

pub struct SettingsWatcher {
    path: PathBuf,
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<notify::Event>>,
}

impl SettingsWatcher {
    pub fn new(path: PathBuf) -> notify::Result<Self> {
        let (tx, rx) = channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            let _ = tx.send(res);
        })?;
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "watching settings");
        Ok(Self {
            path,
            _watcher: watcher,
            rx,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next event concerning the settings file, if any is pending.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        while let Ok(res) = self.rx.try_recv() {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    warn!(error = %e, "settings watcher error");
                    return Some(SettingsEvent::Error(e.to_string()));
                }
            };
            if !event.paths.iter().any(|p| self.is_settings_file(p)) {
                continue;
            }
            match event.kind {
                EventKind::Modify(_) => return Some(SettingsEvent::Modified),
                EventKind::Create(_) => return Some(SettingsEvent::Created),
                EventKind::Remove(_) => return Some(SettingsEvent::Deleted),
                _ => {}
            }
        }
        None
    }

    fn is_settings_file(&self, p: &Path) -> bool {
        p == self.path || (p.file_name().is_some() && p.file_name() == self.path.file_name())
    }
}
