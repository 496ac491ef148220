//! Command history with navigation and pattern search.
//!
//! Fixed-capacity ring of owned lines, oldest first. A cursor marks the entry
//! currently shown in the editor; `cursor == len()` means the user is on the
//! fresh (scratch) line rather than editing a history entry.

use alloc::string::String;

/// Search direction through history.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Towards older entries
    Backward,

    /// Towards newer entries
    Forward,
}

/// Command history storage.
#[derive(Debug)]
pub struct HistoryRing<const N: usize> {
    buffer: heapless::Vec<String, N>,
    position: usize,
    unique: bool,
}

impl<const N: usize> HistoryRing<N> {
    /// Create new command history that skips consecutive duplicates.
    pub fn new() -> Self {
        Self {
            buffer: heapless::Vec::new(),
            position: 0,
            unique: true,
        }
    }

    /// Choose whether a line identical to the most recent entry is skipped.
    pub fn set_unique(&mut self, unique: bool) {
        self.unique = unique;
    }

    /// Add command to history.
    pub fn add(&mut self, cmd: &str) {
        if cmd.is_empty() || N == 0 {
            return;
        }

        if self.unique
            && let Some(last) = self.buffer.last()
            && last.as_str() == cmd
        {
            self.reset_position();
            return;
        }

        let mut entry = String::new();
        if entry.try_reserve_exact(cmd.len()).is_err() {
            log::warn!("history: no memory for a {}-byte entry", cmd.len());
            return;
        }
        entry.push_str(cmd);

        if self.buffer.is_full() {
            let evicted = self.buffer.remove(0);
            log::trace!("history: evicted {:?}", evicted);
        }
        let _ = self.buffer.push(entry);

        self.reset_position();
    }

    /// Step to the previous (older) command.
    ///
    /// Returns `None` when already at the oldest entry; the cursor stays put.
    pub fn previous_command(&mut self) -> Option<&str> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        self.buffer.get(self.position).map(String::as_str)
    }

    /// Step to the next (newer) command.
    ///
    /// Stepping past the newest entry lands on the scratch line and yields
    /// `""`. Returns `None` when already on the scratch line.
    pub fn next_command(&mut self) -> Option<&str> {
        if self.position >= self.buffer.len() {
            return None;
        }
        self.position += 1;
        Some(self.buffer.get(self.position).map_or("", String::as_str))
    }

    /// Jump to the oldest command.
    pub fn first_command(&mut self) -> Option<&str> {
        if self.buffer.is_empty() {
            return None;
        }
        self.position = 0;
        self.buffer.first().map(String::as_str)
    }

    /// Jump to the newest command.
    pub fn last_command(&mut self) -> Option<&str> {
        if self.buffer.is_empty() {
            return None;
        }
        self.position = self.buffer.len() - 1;
        self.buffer.last().map(String::as_str)
    }

    /// Walk from the cursor in `direction` to the first entry matching `pattern`.
    ///
    /// A leading `^` anchors the rest of the pattern at the start of the entry;
    /// otherwise any substring matches. On success the cursor rests on the
    /// match. On failure the cursor is restored and `None` returned.
    pub fn search(&mut self, pattern: &str, direction: Direction) -> Option<&str> {
        let saved = self.position;
        loop {
            let stepped = match direction {
                Direction::Backward => self.position.checked_sub(1),
                Direction::Forward => {
                    Some(self.position + 1).filter(|&p| p < self.buffer.len())
                }
            };
            let Some(pos) = stepped else {
                self.position = saved;
                log::trace!("history: no match for {:?}", pattern);
                return None;
            };
            self.position = pos;
            if matches(&self.buffer[pos], pattern) {
                log::trace!("history: {:?} matched entry {}", pattern, pos);
                return Some(self.buffer[pos].as_str());
            }
        }
    }

    /// Entry under the cursor; `""` on the scratch line.
    pub fn current(&self) -> &str {
        self.buffer.get(self.position).map_or("", String::as_str)
    }

    /// Most recent entry, without moving the cursor.
    pub fn newest(&self) -> Option<&str> {
        self.buffer.last().map(String::as_str)
    }

    /// Put the cursor back on the scratch line.
    pub fn reset_position(&mut self) {
        self.position = self.buffer.len();
    }

    /// Current cursor; equals `len()` when not browsing history.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.buffer.iter().map(String::as_str)
    }
}

impl<const N: usize> Default for HistoryRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Anchored-prefix (`^pat`) or substring match.
fn matches(entry: &str, pattern: &str) -> bool {
    match pattern.strip_prefix('^') {
        Some(prefix) => entry.starts_with(prefix),
        None if pattern.is_empty() => entry.is_empty(),
        None => entry.contains(pattern),
    }
}
