//! # serial-shell
//!
//! Byte-at-a-time line editor and keyword command dispatcher for serial
//! consoles on embedded systems.
//!
//! **Key features:**
//! - **Emacs-style editing** - Cursor and word motion, kill/yank, mark, case
//!   conversion, transpose, numeric repeat counts, VT100 arrow keys
//! - **History** - Fixed-capacity ring with recall and incremental search
//! - **Keyword directories** - Static command tables resolved by name and
//!   argument count, with `?` help generated from the same tables
//! - **Subsystem contexts** - Handlers can switch to another directory with
//!   its own prompt and return with `exit`
//! - **Flexible I/O** - Platform-agnostic byte I/O trait
//!
//! This library is `no_std` compatible and needs only `alloc`. Buffers grow on
//! demand; a failed allocation rings the bell and leaves the line untouched.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(clippy::result_large_err)]

extern crate alloc;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod directory;
pub mod error;
pub mod io;
pub mod shell;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Core I/O
pub use io::ByteIo;

// Configuration
pub use config::{DefaultConfig, MinimalConfig, ShellConfig};

// Error types
pub use error::{ArgError, CliError};

// Keyword tables and dispatch
pub use directory::{Arity, CommandContext, Directory, Dispatcher, Handler, Keyword};

// Shell types
pub use shell::{Editor, HistoryRing, ReadLine, Shell, Signal};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
