//! Key dispatcher driving one line edit.
//!
//! `Editor::read_line()` prints a prompt, then reads bytes one at a time and
//! maps each to an edit operation on a fresh [`LineBuffer`] until the line is
//! accepted, input ends, or an interrupt/quit key arrives. Bytes are checked
//! against the configured special bytes first, then the primary keymap; ESC
//! (or a high-bit byte in meta mode) reads one more byte from the meta keymap,
//! which also decodes VT100 arrow keys and numeric repeat counts.
//!
//! History, the kill register and the last search pattern live in the editor
//! and outlive individual lines.

use super::history::{Direction, HistoryRing};
use super::keymap::{self, Action};
use super::line::{Case, LineBuffer, Outcome, Signal, is_meta, unmeta};
use super::output::OutputBuffer;
use super::parser::argify_with;
use crate::config::{DEL, DefaultConfig, ShellConfig, ctl};
use crate::io::ByteIo;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

/// Result of [`Editor::read_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadLine {
    /// Accepted line (may be empty)
    Line(String),

    /// End of input
    Eof,

    /// Interrupt or quit key; the partial line is discarded
    Signal(Signal),
}

/// Line editor with history.
///
/// Generic over:
/// - `C`: ShellConfig (special bytes, growth steps, history policy)
/// - `N`: history capacity
pub struct Editor<C: ShellConfig = DefaultConfig, const N: usize = 20> {
    history: HistoryRing<N>,
    screen: OutputBuffer,
    kill: Vec<u8>,
    search_pattern: String,
    searching: bool,
    meta_chars: bool,
    _config: PhantomData<C>,
}

impl<C: ShellConfig, const N: usize> fmt::Debug for Editor<C, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("history", &self.history)
            .field("pending_output", &self.screen.len())
            .field("kill", &self.kill)
            .field("search_pattern", &self.search_pattern)
            .field("meta_chars", &self.meta_chars)
            .finish()
    }
}

impl<C: ShellConfig, const N: usize> Default for Editor<C, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ShellConfig, const N: usize> Editor<C, N> {
    /// Create an editor with empty history.
    pub fn new() -> Self {
        let mut history = HistoryRing::new();
        history.set_unique(C::UNIQUE_HISTORY);
        Self {
            history,
            screen: OutputBuffer::new(C::SCREEN_INCREMENT),
            kill: Vec::new(),
            search_pattern: String::new(),
            searching: false,
            meta_chars: C::META_CHARS,
            _config: PhantomData,
        }
    }

    /// Enable or disable meta-character handling at runtime.
    pub fn set_meta_chars(&mut self, enabled: bool) {
        self.meta_chars = enabled;
    }

    /// Command history.
    pub fn history(&self) -> &HistoryRing<N> {
        &self.history
    }

    /// Mutable command history.
    pub fn history_mut(&mut self) -> &mut HistoryRing<N> {
        &mut self.history
    }

    /// Add a line to history.
    pub fn add_history(&mut self, line: &str) {
        self.history.add(line);
    }

    /// Output waiting to be flushed; command output may be queued here too.
    pub fn output(&mut self) -> &mut OutputBuffer {
        &mut self.screen
    }

    /// Kill register left over from previous lines.
    pub fn kill_register(&self) -> &[u8] {
        &self.kill
    }

    /// Read one line with full editing.
    ///
    /// Returns the accepted line, `Eof` at end of input (or the EOF key on an
    /// empty line), or `Signal` when interrupt or quit was typed. Only I/O
    /// errors are reported as `Err`.
    pub fn read_line<IO: ByteIo>(
        &mut self,
        io: &mut IO,
        prompt: &str,
    ) -> Result<ReadLine, IO::Error> {
        let mut line = LineBuffer::new(prompt, self.meta_chars, C::LINE_INCREMENT)
            .with_kill(core::mem::take(&mut self.kill));

        self.screen.put_str(prompt);
        self.history.reset_position();
        let outcome = self.edit_input(io, &mut line);
        self.kill = line.take_kill();

        let result = match outcome? {
            Outcome::Done => {
                self.screen.put_str("\r\n");
                ReadLine::Line(line.text())
            }
            Outcome::Signal(signal) => {
                self.screen.put_str("\r\n");
                log::debug!("editor: {:?} with {} bytes discarded", signal, line.len());
                ReadLine::Signal(signal)
            }
            _ => ReadLine::Eof,
        };
        self.screen.flush(io)?;
        Ok(result)
    }

    /// Next input byte: the pushed-back one, else flush and read.
    fn get_byte<IO: ByteIo>(
        &mut self,
        io: &mut IO,
        line: &mut LineBuffer,
    ) -> Result<Option<u8>, IO::Error> {
        if let Some(c) = line.take_pushback() {
            return Ok(Some(c));
        }
        self.screen.flush(io)?;
        io.read_byte()
    }

    fn edit_input<IO: ByteIo>(
        &mut self,
        io: &mut IO,
        line: &mut LineBuffer,
    ) -> Result<Outcome, IO::Error> {
        loop {
            let Some(c) = self.get_byte(io, line)? else {
                return Ok(Outcome::Eof);
            };

            let outcome = match self.special(line, c) {
                Some(outcome) => outcome,
                None => self.emacs(io, line, c)?,
            };

            // A pushed-back byte still belongs to the command that set the count
            if !line.has_pushback() {
                line.set_repeat(None);
            }

            match outcome {
                Outcome::Stay => {}
                Outcome::Moved => line.reposition(&mut self.screen),
                terminal => return Ok(terminal),
            }
        }
    }

    /// Configured special bytes; `None` when `c` is not one.
    fn special(&mut self, line: &mut LineBuffer, c: u8) -> Option<Outcome> {
        let out = &mut self.screen;
        if c == C::ERASE || c == DEL {
            return Some(line.backward_delete_char(out));
        }
        if c == C::KILL {
            if line.point() != 0 {
                line.beginning_of_line();
                line.reposition(out);
            }
            line.set_repeat(None);
            return Some(line.kill_line(out));
        }
        if c == C::EOF && line.is_empty() {
            return Some(Outcome::Eof);
        }
        if c == C::INTERRUPT {
            return Some(Outcome::Signal(Signal::Interrupt));
        }
        if c == C::QUIT {
            return Some(Outcome::Signal(Signal::Quit));
        }
        None
    }

    /// Primary keymap, falling back to insertion.
    fn emacs<IO: ByteIo>(
        &mut self,
        io: &mut IO,
        line: &mut LineBuffer,
        c: u8,
    ) -> Result<Outcome, IO::Error> {
        if self.meta_chars && is_meta(c) {
            line.push_back(unmeta(c));
            return self.meta(io, line);
        }
        match keymap::lookup(keymap::PRIMARY, c) {
            Some(action) => self.perform(io, line, action),
            None => Ok(line.insert_repeated(&mut self.screen, c)),
        }
    }

    /// Byte after a meta prefix: arrow key, repeat count or meta binding.
    fn meta<IO: ByteIo>(
        &mut self,
        io: &mut IO,
        line: &mut LineBuffer,
    ) -> Result<Outcome, IO::Error> {
        let Some(c) = self.get_byte(io, line)? else {
            return Ok(Outcome::Eof);
        };

        if c == b'[' || c == b'O' {
            let Some(c) = self.get_byte(io, line)? else {
                return Ok(Outcome::Eof);
            };
            return match keymap::arrow(c) {
                Some(action) => self.perform(io, line, action),
                None => Ok(line.ring_bell(&mut self.screen)),
            };
        }

        if c.is_ascii_digit() {
            let mut count = usize::from(c - b'0');
            loop {
                let Some(c) = self.get_byte(io, line)? else {
                    return Ok(Outcome::Eof);
                };
                if !c.is_ascii_digit() {
                    line.push_back(c);
                    break;
                }
                count = count.saturating_mul(10).saturating_add(usize::from(c - b'0'));
            }
            line.set_repeat(Some(count));
            return Ok(Outcome::Stay);
        }

        match keymap::lookup(keymap::META, c) {
            Some(action) => self.perform(io, line, action),
            None => Ok(line.ring_bell(&mut self.screen)),
        }
    }

    fn perform<IO: ByteIo>(
        &mut self,
        io: &mut IO,
        line: &mut LineBuffer,
        action: Action,
    ) -> Result<Outcome, IO::Error> {
        line.begin_command();
        let outcome = match action {
            Action::Bell => line.ring_bell(&mut self.screen),
            Action::BeginningOfLine => line.beginning_of_line(),
            Action::EndOfLine => line.end_of_line(),
            Action::ForwardChar => line.forward_char(&mut self.screen),
            Action::BackwardChar => line.backward_char(&mut self.screen),
            Action::ForwardWord => line.forward_word(&mut self.screen, true),
            Action::BackwardWord => line.backward_word(&mut self.screen),
            Action::DeleteChar => line.delete_char(&mut self.screen),
            Action::BackwardDeleteChar => line.backward_delete_char(&mut self.screen),
            Action::KillWord => line.kill_word(&mut self.screen),
            Action::BackwardKillWord => line.backward_kill_word(&mut self.screen),
            Action::KillLine => line.kill_line(&mut self.screen),
            Action::KillRegion => line.kill_region(&mut self.screen),
            Action::CopyRegion => line.copy_region(&mut self.screen),
            Action::SetMark => line.set_mark(),
            Action::Yank => line.yank(&mut self.screen),
            Action::Transpose => line.transpose(&mut self.screen),
            Action::UpcaseWord => line.case_word(&mut self.screen, Case::Upper),
            Action::DowncaseWord => line.case_word(&mut self.screen, Case::Lower),
            Action::AcceptLine => Outcome::Done,
            Action::Redisplay => line.redisplay(&mut self.screen),
            Action::ExchangeMark => match self.get_byte(io, line)? {
                Some(c) if c == ctl(b'X') => line.exchange_point_and_mark(),
                Some(_) => line.ring_bell(&mut self.screen),
                None => Outcome::Eof,
            },
            Action::QuotedInsert => match self.get_byte(io, line)? {
                Some(c) => line.insert_repeated(&mut self.screen, c),
                None => Outcome::Eof,
            },
            Action::MoveToChar => match self.get_byte(io, line)? {
                Some(c) => line.move_to_char(c),
                None => Outcome::Eof,
            },
            Action::HistoryPrev => self.step_history(line, Direction::Backward),
            Action::HistoryNext => self.step_history(line, Direction::Forward),
            Action::HistoryFirst if self.history.first_command().is_some() => self.recall(line),
            Action::HistoryLast if self.history.last_command().is_some() => self.recall(line),
            Action::HistoryFirst | Action::HistoryLast => line.ring_bell(&mut self.screen),
            Action::LastArgument => self.last_argument(line),
            Action::HistorySearch => return self.search(io, line),
            Action::Meta => return self.meta(io, line),
        };
        Ok(outcome)
    }

    /// Replace the line with the history entry under the cursor.
    fn recall(&mut self, line: &mut LineBuffer) -> Outcome {
        let entry = self.history.current();
        line.replace(&mut self.screen, entry.as_bytes())
    }

    /// Move through history, repeat count steps; bell if any step fails.
    fn step_history(&mut self, line: &mut LineBuffer, direction: Direction) -> Outcome {
        let steps = line.repeat().unwrap_or(1).max(1);
        for _ in 0..steps {
            let stepped = match direction {
                Direction::Backward => self.history.previous_command().is_some(),
                Direction::Forward => self.history.next_command().is_some(),
            };
            if !stepped {
                return line.ring_bell(&mut self.screen);
            }
        }
        self.recall(line)
    }

    /// Insert a token of the most recent history line.
    ///
    /// The last token by default, or the token at index `n` given a repeat
    /// count of `n`.
    fn last_argument(&mut self, line: &mut LineBuffer) -> Outcome {
        let Some(newest) = self.history.newest() else {
            return line.ring_bell(&mut self.screen);
        };
        let Ok(argv) = argify_with(newest, C::ARGV_INCREMENT) else {
            return line.ring_bell(&mut self.screen);
        };
        let arg = match line.repeat() {
            Some(n) => match argv.get(n) {
                Some(arg) => *arg,
                None => return line.ring_bell(&mut self.screen),
            },
            None => match argv.last() {
                Some(arg) => *arg,
                None => return Outcome::Stay,
            },
        };
        line.insert(&mut self.screen, arg.as_bytes())
    }

    /// Incremental search: collect a pattern in a nested edit, then recall the match.
    ///
    /// Searches backward by default and forward when a repeat count is given.
    /// An empty pattern reuses the previous one. End of input while the
    /// pattern is being typed ends the whole line.
    fn search<IO: ByteIo>(
        &mut self,
        io: &mut IO,
        line: &mut LineBuffer,
    ) -> Result<Outcome, IO::Error> {
        if self.searching {
            return Ok(line.ring_bell(&mut self.screen));
        }
        let direction = match line.repeat() {
            None => Direction::Backward,
            Some(_) => Direction::Forward,
        };

        self.searching = true;
        line.clear_line(&mut self.screen);
        self.screen.put_str(C::SEARCH_PROMPT);

        let mut pattern = LineBuffer::new(C::SEARCH_PROMPT, self.meta_chars, C::LINE_INCREMENT);
        let outcome = self.edit_input(io, &mut pattern);
        self.searching = false;
        let outcome = outcome?;
        pattern.clear_line(&mut self.screen);

        match outcome {
            Outcome::Eof => return Ok(Outcome::Eof),
            Outcome::Signal(_) => {
                line.reposition(&mut self.screen);
                return Ok(Outcome::Stay);
            }
            _ => {}
        }

        let typed = pattern.text();
        if outcome == Outcome::Done && !typed.is_empty() {
            self.search_pattern = typed;
        }

        let found = !self.search_pattern.is_empty()
            && self
                .history
                .search(&self.search_pattern, direction)
                .is_some();
        if !found {
            log::debug!("editor: no history match for {:?}", self.search_pattern);
            self.screen.bell();
            line.reposition(&mut self.screen);
            return Ok(Outcome::Stay);
        }
        Ok(self.recall(line))
    }
}
