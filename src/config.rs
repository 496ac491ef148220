//! Configuration traits and implementations for the editor and dispatcher.
//!
//! The `ShellConfig` trait allows compile-time configuration of buffer growth,
//! history policy and the terminal's special bytes without runtime overhead.

/// Shell configuration trait defining growth steps, policies and special keys.
///
/// All values are const (zero runtime cost). History capacity is not part of
/// this trait; it is a const generic on [`HistoryRing`](crate::shell::HistoryRing)
/// because associated consts cannot size arrays yet.
pub trait ShellConfig {
    /// Extra bytes reserved whenever the line buffer has to grow (default: 64)
    const LINE_INCREMENT: usize;

    /// Initial output buffer reservation; growth doubles from here (default: 256)
    const SCREEN_INCREMENT: usize;

    /// Initial token array capacity; growth doubles from here (default: 10)
    const ARGV_INCREMENT: usize;

    /// Skip a history entry identical to the most recent one (default: true)
    const UNIQUE_HISTORY: bool;

    /// Treat high-bit bytes as meta-prefixed keys and display them as `M-x` (default: false)
    const META_CHARS: bool;

    /// Erase-previous-character byte (default: DEL)
    const ERASE: u8;

    /// Kill-whole-line byte (default: ^U)
    const KILL: u8;

    /// End-of-input byte, honored only on an empty line (default: ^D)
    const EOF: u8;

    /// Interrupt byte (default: ^C)
    const INTERRUPT: u8;

    /// Quit byte (default: ^\)
    const QUIT: u8;

    /// Prompt shown while collecting an incremental search pattern
    const SEARCH_PROMPT: &'static str;
}

/// Map a letter to its control byte (`ctl(b'A') == 0x01`).
pub const fn ctl(c: u8) -> u8 {
    c & 0x1f
}

/// ASCII DEL.
pub const DEL: u8 = 0x7f;

/// Default configuration for typical embedded systems.
///
/// - LINE_INCREMENT: 64 bytes
/// - SCREEN_INCREMENT: 256 bytes
/// - ARGV_INCREMENT: 10 tokens
/// - unique history, meta characters off
/// - erase DEL, kill ^U, eof ^D, interrupt ^C, quit ^\
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl ShellConfig for DefaultConfig {
    const LINE_INCREMENT: usize = 64;
    const SCREEN_INCREMENT: usize = 256;
    const ARGV_INCREMENT: usize = 10;
    const UNIQUE_HISTORY: bool = true;
    const META_CHARS: bool = false;
    const ERASE: u8 = DEL;
    const KILL: u8 = ctl(b'U');
    const EOF: u8 = ctl(b'D');
    const INTERRUPT: u8 = ctl(b'C');
    const QUIT: u8 = ctl(b'\\');
    const SEARCH_PROMPT: &'static str = "Search: ";
}

/// Minimal configuration for resource-constrained systems.
///
/// Smaller growth steps so short command lines never over-reserve, and every
/// line is kept in history even when repeated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MinimalConfig;

impl ShellConfig for MinimalConfig {
    const LINE_INCREMENT: usize = 16;
    const SCREEN_INCREMENT: usize = 64;
    const ARGV_INCREMENT: usize = 4;
    const UNIQUE_HISTORY: bool = false;
    const META_CHARS: bool = false;
    const ERASE: u8 = DEL;
    const KILL: u8 = ctl(b'U');
    const EOF: u8 = ctl(b'D');
    const INTERRUPT: u8 = ctl(b'C');
    const QUIT: u8 = ctl(b'\\');
    const SEARCH_PROMPT: &'static str = "Search: ";
}
