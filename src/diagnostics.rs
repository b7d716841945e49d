use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::Local;
use log::{info, warn};

/// Append-only troubleshooting log shown to the user, most recent entry first.
///
/// Every entry is mirrored to the `log` facade.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Mutex<VecDeque<String>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self, message: impl AsRef<str>) {
        info!("{}", message.as_ref());
        self.push(message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        warn!("{}", message.as_ref());
        self.push(message.as_ref());
    }

    fn push(&self, message: &str) {
        let entry = format!("[{}] {}", Local::now().format("%H:%M:%S"), message);
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_front(entry);
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn render(&self) -> String {
        self.entries().join("\n")
    }
}
