//! Live-reload file watching for the preview.
//!
//! Site generators rewrite output pages on every rebuild; the watcher
//! notices and lets the TUI rescan without restarting.

use notify::{
    Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
    event::{AccessKind, AccessMode, ModifyKind},
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

const DEBOUNCE: Duration = Duration::from_millis(100);

/// Watches the previewed page for external changes.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    receiver: Receiver<Result<Event, notify::Error>>,
    current_path: Option<PathBuf>,
    last_reload: Instant,
}

impl FileWatcher {
    pub fn new() -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let watcher = notify::recommended_watcher(tx)?;

        Ok(Self {
            watcher,
            receiver: rx,
            current_path: None,
            last_reload: Instant::now(),
        })
    }

    /// Watch a page, replacing any previously watched one.
    pub fn watch(&mut self, path: &Path) -> Result<(), notify::Error> {
        if let Some(ref old_path) = self.current_path {
            let _ = self.watcher.unwatch(old_path);
        }

        self.watcher.watch(path, RecursiveMode::NonRecursive)?;
        self.current_path = Some(path.to_path_buf());
        self.last_reload = Instant::now();
        Ok(())
    }

    /// Drain pending events; true when a debounced reload is due.
    pub fn check_for_changes(&mut self) -> bool {
        let mut should_reload = false;

        loop {
            match self.receiver.try_recv() {
                Ok(Ok(event)) => {
                    if self.is_relevant_event(&event) {
                        should_reload = true;
                    }
                }
                Ok(Err(_)) => {}
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if should_reload {
            let now = Instant::now();
            if now.duration_since(self.last_reload) >= DEBOUNCE {
                self.last_reload = now;
                return true;
            }
        }

        false
    }

    fn is_relevant_event(&self, event: &Event) -> bool {
        let Some(ref watched_path) = self.current_path else {
            return false;
        };
        if !event.paths.iter().any(|p| p == watched_path) {
            return false;
        }

        // Site builds replace files wholesale, so creations count too
        matches!(
            event.kind,
            EventKind::Modify(ModifyKind::Data(_))
                | EventKind::Modify(ModifyKind::Any)
                | EventKind::Access(AccessKind::Close(AccessMode::Write))
                | EventKind::Create(_)
        )
    }
}
