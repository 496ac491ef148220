//! Line buffer and edit primitives.
//!
//! A `LineBuffer` is the state of one edit session: the bytes typed so far,
//! the cursor ("point"), the mark, the pending repeat count, a pushed-back
//! input byte and the kill register. Every primitive keeps the buffer and the
//! physical terminal in step by echoing into an [`OutputBuffer`].
//!
//! Display rule: control bytes are shown as `^X`, and when meta characters
//! are enabled a high-bit byte is shown as `M-x`. Cursor motion and blanking
//! account for these wider forms.
//!
//! Invariant: `point <= len()` and `mark` may exceed `len()` only until the
//! next operation that checks it.

use super::output::OutputBuffer;
use crate::config::DEL;
use alloc::string::String;
use alloc::vec::Vec;

/// Interrupt condition raised from the keyboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Interrupt key (^C by default)
    Interrupt,

    /// Quit key (^\ by default)
    Quit,
}

/// Result of one edit operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Terminal is in sync, keep reading
    Stay,

    /// Cursor moved; prompt and line up to the cursor must be reprinted
    Moved,

    /// Line accepted
    Done,

    /// End of input
    Eof,

    /// Interrupt or quit
    Signal(Signal),
}

/// Case conversion applied by the word-case commands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Case {
    /// Upper-case
    Upper,

    /// Lower-case
    Lower,
}

/// Control byte (shown as `^X`).
pub fn is_ctl(c: u8) -> bool {
    c < b' ' || c == DEL
}

/// High-bit byte.
pub fn is_meta(c: u8) -> bool {
    c & 0x80 != 0
}

/// Strip the high bit.
pub fn unmeta(c: u8) -> u8 {
    c & 0x7f
}

fn is_word(c: u8) -> bool {
    c.is_ascii_alphanumeric()
}

/// Number of terminal columns `c` occupies when echoed.
pub fn display_width(c: u8, meta_chars: bool) -> usize {
    if is_ctl(c) {
        2
    } else if meta_chars && is_meta(c) {
        2 + display_width(unmeta(c), meta_chars)
    } else {
        1
    }
}

/// Echo one byte using the display rule.
pub fn show(out: &mut OutputBuffer, c: u8, meta_chars: bool) {
    if c == DEL {
        out.put_str("^?");
    } else if is_ctl(c) {
        out.put(b'^');
        out.put(c + 64);
    } else if meta_chars && is_meta(c) {
        out.put_str("M-");
        show(out, unmeta(c), meta_chars);
    } else {
        out.put(c);
    }
}

/// Edit session state.
#[derive(Debug)]
pub struct LineBuffer {
    buf: Vec<u8>,
    point: usize,
    mark: usize,
    old_point: usize,
    repeat: Option<usize>,
    pushback: Option<u8>,
    kill: Vec<u8>,
    prompt: String,
    meta_chars: bool,
    increment: usize,
}

impl LineBuffer {
    /// Create an empty session for `prompt`.
    pub fn new(prompt: &str, meta_chars: bool, increment: usize) -> Self {
        Self {
            buf: Vec::new(),
            point: 0,
            mark: 0,
            old_point: 0,
            repeat: None,
            pushback: None,
            kill: Vec::new(),
            prompt: String::from(prompt),
            meta_chars,
            increment: increment.max(1),
        }
    }

    /// Hand the kill register to this session.
    pub fn with_kill(mut self, kill: Vec<u8>) -> Self {
        self.kill = kill;
        self
    }

    /// Take the kill register back out of the session.
    pub fn take_kill(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.kill)
    }

    /// Line contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Line contents as text, invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }

    /// Line length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the line is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Cursor position.
    pub fn point(&self) -> usize {
        self.point
    }

    /// Mark position.
    pub fn mark(&self) -> usize {
        self.mark
    }

    /// Kill register contents.
    pub fn kill(&self) -> &[u8] {
        &self.kill
    }

    /// Prompt this session was opened with.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Pending repeat count, `None` when none was typed.
    pub fn repeat(&self) -> Option<usize> {
        self.repeat
    }

    /// Set or clear the pending repeat count.
    pub fn set_repeat(&mut self, repeat: Option<usize>) {
        self.repeat = repeat;
    }

    /// Push a byte back so the next read returns it.
    pub fn push_back(&mut self, c: u8) {
        self.pushback = Some(c);
    }

    /// Take the pushed-back byte, if any.
    pub fn take_pushback(&mut self) -> Option<u8> {
        self.pushback.take()
    }

    /// Check if a byte is waiting to be re-read.
    pub fn has_pushback(&self) -> bool {
        self.pushback.is_some()
    }

    /// Remember where the cursor was when a command started.
    pub fn begin_command(&mut self) {
        self.old_point = self.point;
    }

    /// Repeat count with the "no count" default of 1.
    fn count(&self) -> usize {
        self.repeat.unwrap_or(1)
    }

    /// Iterations for loop-style commands, which always run once.
    fn steps(&self) -> usize {
        self.count().max(1)
    }

    fn width_of(&self, bytes: &[u8]) -> usize {
        bytes
            .iter()
            .map(|&c| display_width(c, self.meta_chars))
            .sum()
    }

    fn show_range(&self, out: &mut OutputBuffer, from: usize, to: usize) {
        for &c in &self.buf[from..to] {
            show(out, c, self.meta_chars);
        }
    }

    // ========================================
    // Terminal cursor helpers
    // ========================================

    /// Ring the bell and change nothing.
    pub fn ring_bell(&self, out: &mut OutputBuffer) -> Outcome {
        out.bell();
        Outcome::Stay
    }

    /// Back the terminal over the byte left of the cursor; optionally move the cursor.
    fn left(&mut self, out: &mut OutputBuffer, mv: bool) {
        if self.point == 0 {
            return;
        }
        out.back_n(display_width(self.buf[self.point - 1], self.meta_chars));
        if mv {
            self.point -= 1;
        }
    }

    /// Echo the byte under the cursor; optionally move the cursor past it.
    fn right(&mut self, out: &mut OutputBuffer, mv: bool) {
        if self.point >= self.buf.len() {
            return;
        }
        show(out, self.buf[self.point], self.meta_chars);
        if mv {
            self.point += 1;
        }
    }

    /// Blank from the cursor to one column past the end, then return.
    fn clear_to_eol(&self, out: &mut OutputBuffer) {
        let cols = self.width_of(&self.buf[self.point..]) + 1;
        out.put_n(b' ', cols);
        out.back_n(cols);
    }

    /// Reprint prompt and the line up to the cursor.
    pub fn reposition(&self, out: &mut OutputBuffer) {
        out.put(b'\r');
        out.put_str(&self.prompt);
        self.show_range(out, 0, self.point);
    }

    /// Start a fresh row and print prompt and whole line.
    pub fn redisplay(&self, out: &mut OutputBuffer) -> Outcome {
        out.put_str("\r\n");
        out.put_str(&self.prompt);
        self.show_range(out, 0, self.buf.len());
        Outcome::Moved
    }

    /// Blank prompt and line on screen and empty the buffer.
    pub fn clear_line(&mut self, out: &mut OutputBuffer) {
        let cols = self.width_of(self.prompt.as_bytes()) + self.width_of(&self.buf) + 1;
        out.put(b'\r');
        out.put_n(b' ', cols);
        out.put(b'\r');
        self.buf.clear();
        self.point = 0;
    }

    // ========================================
    // Insertion and deletion
    // ========================================

    /// Insert `text` at the cursor and echo it.
    ///
    /// Returns `Moved` when text remains right of the cursor, since the echo
    /// left the terminal cursor at end of line.
    pub fn insert(&mut self, out: &mut OutputBuffer, text: &[u8]) -> Outcome {
        if text.is_empty() {
            return Outcome::Stay;
        }
        if self.buf.len() + text.len() >= self.buf.capacity()
            && self.buf.try_reserve(text.len() + self.increment).is_err()
        {
            log::warn!("line buffer: cannot grow by {} bytes", text.len());
            return self.ring_bell(out);
        }

        let at = self.point;
        self.buf.splice(at..at, text.iter().copied());
        self.show_range(out, at, self.buf.len());
        self.point += text.len();

        if self.point == self.buf.len() {
            Outcome::Stay
        } else {
            Outcome::Moved
        }
    }

    /// Insert `c`, repeated by the pending count.
    pub fn insert_repeated(&mut self, out: &mut OutputBuffer, c: u8) -> Outcome {
        let n = self.count();
        if n < 2 {
            return self.insert(out, &[c]);
        }
        let mut run = Vec::new();
        if run.try_reserve_exact(n).is_err() {
            log::warn!("line buffer: cannot build a run of {} bytes", n);
            return self.ring_bell(out);
        }
        run.resize(n, c);
        self.insert(out, &run)
    }

    /// Delete `count` bytes starting at the cursor.
    ///
    /// Rings the bell when `count` is zero or the cursor is at end of line.
    /// A multi-byte deletion is saved into the kill register.
    pub fn delete(&mut self, out: &mut OutputBuffer, count: usize) -> Outcome {
        let len = self.buf.len();
        if count == 0 || self.point == len {
            return self.ring_bell(out);
        }

        if count == 1 && self.point == len - 1 {
            // Last byte: blank it in place.
            let width = display_width(self.buf[self.point], self.meta_chars);
            self.buf.truncate(self.point);
            out.put_n(b' ', width);
            out.back_n(width);
            return Outcome::Stay;
        }

        let count = count.min(len - self.point);
        if count > 1 {
            self.save_kill(self.point, count);
        }
        self.clear_to_eol(out);
        self.buf.drain(self.point..self.point + count);
        self.show_range(out, self.point, self.buf.len());
        Outcome::Moved
    }

    /// Delete under the cursor, repeat count bytes.
    pub fn delete_char(&mut self, out: &mut OutputBuffer) -> Outcome {
        let count = self.count();
        self.delete(out, count)
    }

    /// Delete left of the cursor, repeat count bytes.
    pub fn backward_delete_char(&mut self, out: &mut OutputBuffer) -> Outcome {
        let mut moved = 0;
        while moved < self.steps() && self.point > 0 {
            self.left(out, true);
            moved += 1;
        }
        self.delete(out, moved)
    }

    fn save_kill(&mut self, begin: usize, n: usize) {
        self.kill.clear();
        if n == 0 {
            return;
        }
        if self.kill.try_reserve(n).is_err() {
            log::warn!("kill register: cannot hold {} bytes", n);
            return;
        }
        self.kill.extend_from_slice(&self.buf[begin..begin + n]);
    }

    /// Replace the whole line with `text` (history recall).
    pub fn replace(&mut self, out: &mut OutputBuffer, text: &[u8]) -> Outcome {
        self.point = 0;
        self.reposition(out);
        self.clear_to_eol(out);
        self.buf.clear();
        self.insert(out, text)
    }

    // ========================================
    // Cursor motion
    // ========================================

    /// Move to start of line.
    pub fn beginning_of_line(&mut self) -> Outcome {
        if self.point == 0 {
            return Outcome::Stay;
        }
        self.point = 0;
        Outcome::Moved
    }

    /// Move to end of line.
    pub fn end_of_line(&mut self) -> Outcome {
        if self.point == self.buf.len() {
            return Outcome::Stay;
        }
        self.point = self.buf.len();
        Outcome::Moved
    }

    /// Move right, repeat count bytes.
    pub fn forward_char(&mut self, out: &mut OutputBuffer) -> Outcome {
        for _ in 0..self.steps() {
            if self.point >= self.buf.len() {
                break;
            }
            self.right(out, true);
        }
        Outcome::Stay
    }

    /// Move left, repeat count bytes.
    pub fn backward_char(&mut self, out: &mut OutputBuffer) -> Outcome {
        for _ in 0..self.steps() {
            if self.point == 0 {
                break;
            }
            self.left(out, true);
        }
        Outcome::Stay
    }

    /// Move past the next word: non-alphanumerics, then alphanumerics.
    ///
    /// With `echo` unset the cursor moves but the terminal does not; callers
    /// that do this restore the cursor before returning.
    pub fn forward_word(&mut self, out: &mut OutputBuffer, echo: bool) -> Outcome {
        let steps = self.steps();
        let mut done = 0;
        loop {
            while self.point < self.buf.len() && !is_word(self.buf[self.point]) {
                self.step_right(out, echo);
            }
            while self.point < self.buf.len() && is_word(self.buf[self.point]) {
                self.step_right(out, echo);
            }
            done += 1;
            if self.point == self.buf.len() || done >= steps {
                break;
            }
        }
        Outcome::Stay
    }

    fn step_right(&mut self, out: &mut OutputBuffer, echo: bool) {
        if echo {
            self.right(out, true);
        } else {
            self.point += 1;
        }
    }

    /// Move back to the start of the previous word.
    pub fn backward_word(&mut self, out: &mut OutputBuffer) -> Outcome {
        let steps = self.steps();
        let mut done = 0;
        loop {
            while self.point > 0 && !is_word(self.buf[self.point - 1]) {
                self.left(out, true);
            }
            while self.point > 0 && is_word(self.buf[self.point - 1]) {
                self.left(out, true);
            }
            done += 1;
            if self.point == 0 || done >= steps {
                break;
            }
        }
        Outcome::Stay
    }

    /// Jump to the next occurrence of `c` after the cursor.
    pub fn move_to_char(&mut self, c: u8) -> Outcome {
        match self.buf[self.point..].iter().skip(1).position(|&b| b == c) {
            Some(offset) => {
                self.point += offset + 1;
                Outcome::Moved
            }
            None => Outcome::Stay,
        }
    }

    // ========================================
    // Word edits
    // ========================================

    /// Delete from the cursor to the end of the next word.
    pub fn kill_word(&mut self, out: &mut OutputBuffer) -> Outcome {
        self.forward_word(out, false);
        if self.point == self.old_point {
            return Outcome::Stay;
        }
        let n = self.point - self.old_point;
        self.point = self.old_point;
        self.delete(out, n)
    }

    /// Delete from the start of the previous word to the cursor.
    pub fn backward_kill_word(&mut self, out: &mut OutputBuffer) -> Outcome {
        self.backward_word(out);
        if self.point == self.old_point {
            return Outcome::Stay;
        }
        let n = self.old_point - self.point;
        self.delete(out, n)
    }

    /// Convert case from the cursor to the end of the next word.
    pub fn case_word(&mut self, out: &mut OutputBuffer, case: Case) -> Outcome {
        self.forward_word(out, false);
        if self.point == self.old_point {
            return Outcome::Stay;
        }
        let end = self.point.min(self.buf.len());
        self.point = self.old_point;
        while self.point < end {
            let c = &mut self.buf[self.point];
            match case {
                Case::Upper => c.make_ascii_uppercase(),
                Case::Lower => c.make_ascii_lowercase(),
            }
            self.right(out, true);
        }
        Outcome::Stay
    }

    /// Swap the two bytes around the cursor and step forward.
    ///
    /// At end of line the last two bytes are swapped.
    pub fn transpose(&mut self, out: &mut OutputBuffer) -> Outcome {
        if self.point == 0 {
            return Outcome::Stay;
        }
        if self.buf.len() < 2 {
            return self.ring_bell(out);
        }
        if self.point == self.buf.len() {
            self.left(out, true);
        }

        let c = self.buf[self.point - 1];
        self.left(out, false);
        self.buf[self.point - 1] = self.buf[self.point];
        show(out, self.buf[self.point - 1], self.meta_chars);
        self.buf[self.point] = c;
        show(out, c, self.meta_chars);
        self.point += 1;
        Outcome::Stay
    }

    // ========================================
    // Kill register and mark
    // ========================================

    /// Kill to end of line.
    ///
    /// With an explicit repeat count `n`, kills between the cursor and column
    /// `n` instead, in whichever direction that lies.
    pub fn kill_line(&mut self, out: &mut OutputBuffer) -> Outcome {
        if let Some(column) = self.repeat {
            if column < self.point {
                let end = self.point;
                self.point = column;
                self.reposition(out);
                self.delete(out, end - column);
            } else if column > self.point {
                let n = column - self.point;
                self.delete(out, n);
            }
            return Outcome::Moved;
        }

        self.save_kill(self.point, self.buf.len() - self.point);
        self.clear_to_eol(out);
        self.buf.truncate(self.point);
        Outcome::Stay
    }

    /// Kill between mark and cursor.
    pub fn kill_region(&mut self, out: &mut OutputBuffer) -> Outcome {
        if self.mark > self.buf.len() {
            return self.ring_bell(out);
        }
        if self.point > self.mark {
            core::mem::swap(&mut self.point, &mut self.mark);
            self.reposition(out);
        }
        let n = self.mark - self.point;
        self.delete(out, n)
    }

    /// Copy between mark and cursor into the kill register.
    pub fn copy_region(&mut self, out: &mut OutputBuffer) -> Outcome {
        if self.mark > self.buf.len() {
            return self.ring_bell(out);
        }
        let begin = self.point.min(self.mark);
        let n = self.point.abs_diff(self.mark);
        self.save_kill(begin, n);
        Outcome::Stay
    }

    /// Set the mark at the cursor.
    pub fn set_mark(&mut self) -> Outcome {
        self.mark = self.point;
        Outcome::Stay
    }

    /// Swap cursor and mark.
    pub fn exchange_point_and_mark(&mut self) -> Outcome {
        if self.mark > self.buf.len() {
            return Outcome::Stay;
        }
        core::mem::swap(&mut self.point, &mut self.mark);
        Outcome::Moved
    }

    /// Insert the kill register at the cursor.
    pub fn yank(&mut self, out: &mut OutputBuffer) -> Outcome {
        if self.kill.is_empty() {
            return Outcome::Stay;
        }
        let text = core::mem::take(&mut self.kill);
        let outcome = self.insert(out, &text);
        self.kill = text;
        outcome
    }
}
