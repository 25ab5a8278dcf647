//! Hot reload of the config file.
//!
//! The parent directory is watched rather than the file itself, so editors
//! that save by renaming a temp file over the original keep triggering
//! reloads. Only valid configurations reach the receiver, and a reload that
//! produces the configuration already delivered is dropped.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::parse_config;
use crate::config::schema::RouterConfig;

const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Turns changes to one config file into validated [`RouterConfig`] updates.
pub struct ConfigWatcher {
    path: PathBuf,
    updates: mpsc::UnboundedSender<RouterConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end of its update channel.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RouterConfig>) {
        let (updates, rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            updates,
        };
        (watcher, rx)
    }

    /// Start watching. Dropping the returned handle stops the watch.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let file_name = self
            .path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| notify::Error::generic("config path has no file name"))?;
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let path = self.path;
        let updates = self.updates;
        let mut delivered: Option<RouterConfig> = None;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::error!(error = %e, "Config watch error");
                        return;
                    }
                };
                if !(event.kind.is_modify() || event.kind.is_create()) {
                    return;
                }
                if !event.paths.iter().any(|p| p.file_name() == Some(&*file_name)) {
                    return;
                }
                let Some(config) = reload(&path) else {
                    return;
                };
                if delivered.as_ref() == Some(&config) {
                    tracing::debug!(path = ?path, "Config file touched, contents unchanged");
                    return;
                }
                tracing::info!(path = ?path, "Config file changed, reloaded");
                delivered = Some(config.clone());
                let _ = updates.send(config);
            },
            Config::default().with_poll_interval(POLL_INTERVAL),
        )?;

        watcher.watch(&directory, RecursiveMode::NonRecursive)?;
        tracing::info!(directory = ?directory, "Config watcher started");
        Ok(watcher)
    }
}

/// Read and validate the file. `None` keeps the running configuration.
///
/// An empty file is treated as a write still in progress.
fn reload(path: &Path) -> Option<RouterConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "Config file unreadable, keeping current");
            return None;
        }
    };
    if content.trim().is_empty() {
        return None;
    }
    match parse_config(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::error!(path = ?path, error = %e, "Rejected config reload, keeping current");
            None
        }
    }
}
