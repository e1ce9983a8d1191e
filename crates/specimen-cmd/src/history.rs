//! Shell command history

use std::collections::VecDeque;

const DEFAULT_MAX_HISTORY: usize = 500;

/// Bounded list of executed command lines with cursor navigation
#[derive(Debug)]
pub struct CommandHistory {
    /// Most recent at back
    entries: VecDeque<String>,
    max_size: usize,
    /// Navigation cursor; `None` sits past the newest entry
    cursor: Option<usize>,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_HISTORY)
    }
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size: max_size.max(1),
            cursor: None,
        }
    }

    /// Record a line; blank lines and repeats of the newest entry are dropped
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        self.cursor = None;
        if line.trim().is_empty() || self.entries.back() == Some(&line) {
            return;
        }
        if self.entries.len() == self.max_size {
            self.entries.pop_front();
        }
        self.entries.push_back(line);
    }

    /// Step back towards older entries, stopping at the oldest
    pub fn previous(&mut self) -> Option<&str> {
        let pos = match self.cursor {
            None => self.entries.len().checked_sub(1)?,
            Some(p) => p.saturating_sub(1),
        };
        self.cursor = Some(pos);
        self.entries.get(pos).map(String::as_str)
    }

    /// Step forward; returns `None` once past the newest entry
    pub fn next(&mut self) -> Option<&str> {
        let pos = self.cursor? + 1;
        if pos >= self.entries.len() {
            self.cursor = None;
            return None;
        }
        self.cursor = Some(pos);
        self.entries.get(pos).map(String::as_str)
    }

    /// Newest entry starting with `prefix`
    pub fn search(&self, prefix: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|line| line.starts_with(prefix))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}
