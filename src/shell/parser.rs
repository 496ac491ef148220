//! Line tokenizer.
//!
//! Splits an accepted line into whitespace-separated tokens that borrow from
//! the line. There is no quoting or escaping: a token is simply a maximal run
//! of non-whitespace bytes.

use crate::config::{DefaultConfig, ShellConfig};
use crate::error::CliError;
use alloc::vec::Vec;

/// Split `line` into tokens using the default initial capacity.
pub fn argify(line: &str) -> Result<Vec<&str>, CliError> {
    argify_with(line, DefaultConfig::ARGV_INCREMENT)
}

/// Split `line` into tokens.
///
/// The token array starts at `increment` slots and doubles when full. An
/// allocation failure yields `CliError::OutOfMemory` and no tokens.
pub fn argify_with(line: &str, increment: usize) -> Result<Vec<&str>, CliError> {
    let mut argv = Vec::new();
    for word in line.split_ascii_whitespace() {
        if argv.len() == argv.capacity() {
            let extra = argv.capacity().max(increment.max(1));
            if argv.try_reserve_exact(extra).is_err() {
                log::warn!("tokenizer: cannot grow token array by {}", extra);
                return Err(CliError::OutOfMemory);
            }
        }
        argv.push(word);
    }
    Ok(argv)
}
