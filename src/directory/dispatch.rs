//! Command dispatch against the active directory.
//!
//! The dispatcher holds one active frame (directory, prompt label and an
//! opaque context value such as the selected interface number) and at most one
//! saved frame. Entering a subsystem saves the active frame; `exit` restores
//! it. Only a single level is remembered.

use super::{Directory, Keyword};
use crate::error::{CliError, token};
use core::fmt::{self, Write};

/// Prompt label of a directory frame.
pub type Label = heapless::String<32>;

/// Active or saved dispatch context.
struct Frame<X: 'static> {
    dir: &'static Directory<X>,
    prompt: Label,
    context: usize,
}

impl<X: 'static> Frame<X> {
    fn new(dir: &'static Directory<X>, prompt: &str, context: usize) -> Self {
        Self {
            dir,
            prompt: token(prompt),
            context,
        }
    }
}

/// What a handler gets to work with.
pub struct CommandContext<'a, X: 'static> {
    /// Application state
    pub state: &'a mut X,

    /// Dispatcher, for switching directories
    pub dispatcher: &'a mut Dispatcher<X>,

    /// Output sink
    pub out: &'a mut dyn Write,
}

impl<X: 'static> fmt::Debug for CommandContext<'_, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

/// Resolves token lists against the active directory.
pub struct Dispatcher<X: 'static> {
    active: Frame<X>,
    saved: Option<Frame<X>>,
}

impl<X: 'static> fmt::Debug for Dispatcher<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("directory", &self.active.dir.name)
            .field("prompt", &self.active.prompt)
            .field("context", &self.active.context)
            .field("saved", &self.saved.as_ref().map(|frame| frame.dir.name))
            .finish()
    }
}

impl<X: 'static> Dispatcher<X> {
    /// Start in `root` with `prompt`.
    pub fn new(root: &'static Directory<X>, prompt: &str) -> Self {
        Self {
            active: Frame::new(root, prompt, 0),
            saved: None,
        }
    }

    /// Switch to `dir`, remembering the current directory for [`exit`](Self::exit).
    ///
    /// Entering again from a subsystem overwrites the remembered directory.
    pub fn enter(&mut self, dir: &'static Directory<X>, prompt: &str, context: usize) {
        log::debug!(
            "dispatch: enter {} (context {}) from {}",
            dir.name,
            context,
            self.active.dir.name
        );
        let previous = core::mem::replace(&mut self.active, Frame::new(dir, prompt, context));
        self.saved = Some(previous);
    }

    /// Return to the remembered directory. Returns `false` if there is none.
    pub fn exit(&mut self) -> bool {
        match self.saved.take() {
            Some(frame) => {
                log::debug!("dispatch: exit {} to {}", self.active.dir.name, frame.dir.name);
                self.active = frame;
                true
            }
            None => false,
        }
    }

    /// Active directory.
    pub fn active(&self) -> &'static Directory<X> {
        self.active.dir
    }

    /// Check if `dir` is the active directory (pointer identity).
    pub fn is_active(&self, dir: &'static Directory<X>) -> bool {
        core::ptr::eq(self.active.dir, dir)
    }

    /// Remembered directory, if inside a subsystem.
    pub fn saved(&self) -> Option<&'static Directory<X>> {
        self.saved.as_ref().map(|frame| frame.dir)
    }

    /// Prompt label of the active directory.
    pub fn prompt(&self) -> &str {
        &self.active.prompt
    }

    /// Opaque context value of the active directory.
    pub fn context(&self) -> usize {
        self.active.context
    }

    /// Replace the context value of the active directory.
    pub fn set_context(&mut self, context: usize) {
        self.active.context = context;
    }

    /// Resolve `argv` against the active directory and run the handler.
    ///
    /// `name ?` prints the help text of every entry called `name`. Otherwise
    /// the first callable entry whose name and arity match runs, and its
    /// argument error (if any) is mapped to a [`CliError`]. A known name with
    /// no runnable entry for this count, display-only names included, is a
    /// wrong argument count.
    pub fn dispatch(
        &mut self,
        state: &mut X,
        argv: &[&str],
        out: &mut dyn Write,
    ) -> Result<(), CliError> {
        let Some(&name) = argv.first() else {
            return Ok(());
        };
        if argv.get(1) == Some(&"?") {
            return self.help(name, out);
        }

        let dir = self.active.dir;
        let received = argv.len() - 1;
        let mut name_matched = false;

        for keyword in dir.find(name) {
            name_matched = true;
            let Some(handler) = keyword.handler else {
                continue;
            };
            if !keyword.arity.accepts(received) {
                continue;
            }

            log::debug!("dispatch: {} {:?} in {}", name, keyword.arity, dir.name);
            let mut ctx = CommandContext {
                state: &mut *state,
                dispatcher: &mut *self,
                out: &mut *out,
            };
            // Directory may change inside the handler
            return handler(&mut ctx, argv).map_err(|e| e.into_cli_error(argv));
        }

        if name_matched {
            log::trace!("dispatch: {} has no entry taking {} arguments", name, received);
            Err(CliError::WrongArgumentCount {
                name: token(name),
                received,
            })
        } else {
            log::trace!("dispatch: {} not in {}", name, dir.name);
            Err(CliError::CommandNotFound { name: token(name) })
        }
    }

    /// Print the help text of every entry called `name`.
    pub fn help(&self, name: &str, out: &mut dyn Write) -> Result<(), CliError> {
        let mut found = false;
        for keyword in self.active.dir.find(name) {
            found = true;
            if let Some(help) = keyword.help {
                // Output sinks are best effort
                let _ = write!(out, "{}\r\n", help);
            }
        }
        if found {
            Ok(())
        } else {
            Err(CliError::CommandNotFound { name: token(name) })
        }
    }

    /// List the active directory: one line per distinct name.
    pub fn question(&self, out: &mut dyn Write) -> fmt::Result {
        for keyword in self.active.dir.listing() {
            list_entry(out, keyword)?;
        }
        Ok(())
    }
}

fn list_entry<X: 'static>(out: &mut dyn Write, keyword: &Keyword<X>) -> fmt::Result {
    write!(out, "  {:<10} - {}\r\n", keyword.name, keyword.summary())
}

/// Ready-made handler: leave the current subsystem.
pub fn exit<X: 'static>(
    ctx: &mut CommandContext<'_, X>,
    _argv: &[&str],
) -> Result<(), crate::error::ArgError> {
    ctx.dispatcher.exit();
    Ok(())
}
