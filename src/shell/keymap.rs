//! Key bindings for the editor.
//!
//! Two tables map a byte to an [`Action`]: the primary table for bytes read
//! directly, and the meta table for the byte following ESC (or a high-bit byte
//! when meta characters are enabled). Unbound primary bytes are inserted;
//! unbound meta bytes ring the bell.

use crate::config::{DEL, ctl};

/// Editing operation a key is bound to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Ring the bell, change nothing
    Bell,
    /// Move to start of line
    BeginningOfLine,
    /// Move to end of line
    EndOfLine,
    /// Move one character right (repeatable)
    ForwardChar,
    /// Move one character left (repeatable)
    BackwardChar,
    /// Move to the end of the next word (repeatable)
    ForwardWord,
    /// Move to the start of the previous word (repeatable)
    BackwardWord,
    /// Delete the character under the cursor (repeatable)
    DeleteChar,
    /// Delete the character left of the cursor (repeatable)
    BackwardDeleteChar,
    /// Delete to the end of the next word
    KillWord,
    /// Delete to the start of the previous word
    BackwardKillWord,
    /// Kill to end of line, or up to the column given as repeat count
    KillLine,
    /// Kill between mark and cursor
    KillRegion,
    /// Copy between mark and cursor into the kill register
    CopyRegion,
    /// Set the mark at the cursor
    SetMark,
    /// Swap cursor and mark (bound to the ^X prefix, needs a second ^X)
    ExchangeMark,
    /// Insert the kill register at the cursor
    Yank,
    /// Swap the characters around the cursor
    Transpose,
    /// Upper-case to the end of the next word
    UpcaseWord,
    /// Lower-case to the end of the next word
    DowncaseWord,
    /// Insert the next byte literally
    QuotedInsert,
    /// Jump forward to the next occurrence of the following byte
    MoveToChar,
    /// Accept the line
    AcceptLine,
    /// Redraw prompt and line on a fresh row
    Redisplay,
    /// Older history entry (repeatable)
    HistoryPrev,
    /// Newer history entry (repeatable)
    HistoryNext,
    /// Oldest history entry
    HistoryFirst,
    /// Newest history entry
    HistoryLast,
    /// Incremental history search
    HistorySearch,
    /// Insert an argument of the previous history line
    LastArgument,
    /// Read a meta-prefixed key
    Meta,
}

/// Bindings for bytes read directly.
pub const PRIMARY: &[(u8, Action)] = &[
    (ctl(b'@'), Action::Bell),
    (ctl(b'A'), Action::BeginningOfLine),
    (ctl(b'B'), Action::BackwardChar),
    (ctl(b'D'), Action::DeleteChar),
    (ctl(b'E'), Action::EndOfLine),
    (ctl(b'F'), Action::ForwardChar),
    (ctl(b'G'), Action::Bell),
    (ctl(b'H'), Action::BackwardDeleteChar),
    (ctl(b'J'), Action::AcceptLine),
    (ctl(b'K'), Action::KillLine),
    (ctl(b'L'), Action::Redisplay),
    (ctl(b'M'), Action::AcceptLine),
    (ctl(b'N'), Action::HistoryNext),
    (ctl(b'O'), Action::Bell),
    (ctl(b'P'), Action::HistoryPrev),
    (ctl(b'Q'), Action::Bell),
    (ctl(b'R'), Action::HistorySearch),
    (ctl(b'S'), Action::Bell),
    (ctl(b'T'), Action::Transpose),
    (ctl(b'U'), Action::Bell),
    (ctl(b'V'), Action::QuotedInsert),
    (ctl(b'W'), Action::KillRegion),
    (ctl(b'X'), Action::ExchangeMark),
    (ctl(b'Y'), Action::Yank),
    (ctl(b'Z'), Action::Bell),
    (ctl(b'['), Action::Meta),
    (ctl(b']'), Action::MoveToChar),
    (ctl(b'^'), Action::Bell),
    (ctl(b'_'), Action::Bell),
];

/// Bindings for the byte after a meta prefix.
pub const META: &[(u8, Action)] = &[
    (ctl(b'H'), Action::BackwardKillWord),
    (DEL, Action::BackwardKillWord),
    (b' ', Action::SetMark),
    (b'.', Action::LastArgument),
    (b'_', Action::LastArgument),
    (b'<', Action::HistoryFirst),
    (b'>', Action::HistoryLast),
    (b'?', Action::Bell),
    (b'b', Action::BackwardWord),
    (b'd', Action::KillWord),
    (b'f', Action::ForwardWord),
    (b'l', Action::DowncaseWord),
    (b'u', Action::UpcaseWord),
    (b'y', Action::Yank),
    (b'w', Action::CopyRegion),
];

/// Look a byte up in a binding table.
pub fn lookup(table: &[(u8, Action)], c: u8) -> Option<Action> {
    table
        .iter()
        .find(|&&(key, _)| key == c)
        .map(|&(_, action)| action)
}

/// Action for a VT100 arrow key final byte (`ESC [ x` or `ESC O x`).
pub fn arrow(c: u8) -> Option<Action> {
    match c {
        b'A' => Some(Action::HistoryPrev),
        b'B' => Some(Action::HistoryNext),
        b'C' => Some(Action::ForwardChar),
        b'D' => Some(Action::BackwardChar),
        _ => None,
    }
}
