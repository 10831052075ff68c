//! In-process navigator that records redirects.

use std::sync::Mutex;

use tracing::debug;

use warden_core::traits::Navigator;

/// Records every navigation instead of rendering anything.
///
/// The CLI reports the last redirect from it; tests assert on the history.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Creates a navigator with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every path navigated to, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The most recent path navigated to.
    pub fn last(&self) -> Option<String> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    /// Forgets the history.
    pub fn clear(&self) {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, commands: &[&str]) {
        let path = join_commands(commands);
        debug!(path = %path, "Navigating");
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path);
    }
}

/// Joins path segments into one absolute path.
pub fn join_commands(commands: &[&str]) -> String {
    let joined = commands
        .iter()
        .map(|c| c.trim_matches('/'))
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    format!("/{joined}")
}
