//! Shell orchestration: line editing feeding command dispatch.
//!
//! The `Shell` struct owns the transport, the editor, the dispatcher and the
//! application state handed to command handlers. Each call to
//! [`process_line`](Shell::process_line) reads one edited line, records it in
//! history, tokenizes it and runs the matching handler.

use crate::config::{DefaultConfig, ShellConfig};
use crate::directory::{Directory, Dispatcher};
use crate::error::CliError;
use crate::io::ByteIo;
use core::fmt::Write;

// Sub-modules
pub mod editor;
pub mod history;
pub mod keymap;
pub mod line;
pub mod output;
pub mod parser;

// Re-export key types
pub use editor::{Editor, ReadLine};
pub use history::{Direction, HistoryRing};
pub use line::{LineBuffer, Outcome, Signal};
pub use output::OutputBuffer;
pub use parser::{argify, argify_with};

/// Shell orchestration struct.
///
/// Generic over:
/// - `IO`: ByteIo implementation
/// - `X`: application state passed to handlers
/// - `C`: ShellConfig implementation
/// - `N`: history capacity
pub struct Shell<IO, X, C = DefaultConfig, const N: usize = 20>
where
    IO: ByteIo,
    X: 'static,
    C: ShellConfig,
{
    /// I/O interface
    io: IO,

    /// Line editor (history, kill register, output batching)
    editor: Editor<C, N>,

    /// Active directory and command resolution
    dispatcher: Dispatcher<X>,

    /// Application state
    state: X,
}

// ============================================================================
// Debug implementation
// ============================================================================

impl<IO, X, C, const N: usize> core::fmt::Debug for Shell<IO, X, C, N>
where
    IO: ByteIo,
    X: 'static,
    C: ShellConfig,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Shell")
            .field("editor", &self.editor)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Core methods
// ============================================================================

impl<IO, X, C, const N: usize> Shell<IO, X, C, N>
where
    IO: ByteIo,
    X: 'static,
    C: ShellConfig,
{
    /// Create a shell starting in `root` with `prompt`.
    pub fn new(root: &'static Directory<X>, prompt: &str, state: X, io: IO) -> Self {
        Self {
            io,
            editor: Editor::new(),
            dispatcher: Dispatcher::new(root, prompt),
            state,
        }
    }

    /// Read one edited line using the active directory's prompt.
    pub fn read_line(&mut self) -> Result<ReadLine, IO::Error> {
        self.editor.read_line(&mut self.io, self.dispatcher.prompt())
    }

    /// Tokenize and dispatch one line.
    ///
    /// A blank line does nothing and a bare `?` lists the active directory.
    /// Output is queued; call [`flush`](Self::flush) to send it.
    pub fn execute(&mut self, line: &str) -> Result<(), CliError> {
        let argv = argify_with(line, C::ARGV_INCREMENT)?;
        if argv.is_empty() {
            return Ok(());
        }

        let out = self.editor.output();
        if argv.len() == 1 && argv[0] == "?" {
            // Output sinks are best effort
            let _ = self.dispatcher.question(out);
            return Ok(());
        }
        self.dispatcher.dispatch(&mut self.state, &argv, out)
    }

    /// Read, record and execute one line.
    ///
    /// Returns `Ok(false)` at end of input. Interrupt and quit abandon the
    /// line and return `Ok(true)`; whether to stop is up to the caller.
    /// Command errors are printed as `Error: <message>`.
    pub fn process_line(&mut self) -> Result<bool, IO::Error> {
        match self.read_line()? {
            ReadLine::Eof => {
                log::debug!("shell: end of input");
                Ok(false)
            }
            ReadLine::Signal(signal) => {
                log::debug!("shell: line abandoned on {:?}", signal);
                Ok(true)
            }
            ReadLine::Line(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history(&line);
                }
                if let Err(e) = self.execute(&line) {
                    log::trace!("shell: {:?}", e);
                    let _ = write!(self.editor.output(), "Error: {}\r\n", e);
                }
                self.flush()?;
                Ok(true)
            }
        }
    }

    /// Process lines until end of input.
    pub fn run(&mut self) -> Result<(), IO::Error> {
        while self.process_line()? {}
        Ok(())
    }

    /// Send queued output.
    pub fn flush(&mut self) -> Result<(), IO::Error> {
        self.editor.output().flush(&mut self.io)
    }

    /// Add a line to history.
    pub fn add_history(&mut self, line: &str) {
        self.editor.add_history(line);
    }

    /// Application state.
    pub fn state(&self) -> &X {
        &self.state
    }

    /// Mutable application state.
    pub fn state_mut(&mut self) -> &mut X {
        &mut self.state
    }

    /// Dispatcher (active directory, prompt, context).
    pub fn dispatcher(&self) -> &Dispatcher<X> {
        &self.dispatcher
    }

    /// Mutable dispatcher.
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<X> {
        &mut self.dispatcher
    }

    /// Line editor.
    pub fn editor(&self) -> &Editor<C, N> {
        &self.editor
    }

    /// Mutable line editor.
    pub fn editor_mut(&mut self) -> &mut Editor<C, N> {
        &mut self.editor
    }

    /// I/O interface.
    pub fn io(&self) -> &IO {
        &self.io
    }

    /// Mutable I/O interface.
    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }
}
