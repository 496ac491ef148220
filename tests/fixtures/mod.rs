//! Test fixtures and utilities for serial-shell testing.
//!
//! Provides:
//! - `MockIo`: Test implementation of the ByteIo trait
//! - `Board`: Application state the test handlers record into
//! - `ROOT` / `UART`: Keyword directories exercising overloads, display-only
//!   entries and a subsystem context
//! - Helper constructors for scripted input

#![allow(dead_code)]

use serial_shell::{ArgError, Arity, ByteIo, CommandContext, Directory, Keyword};
use std::collections::VecDeque;

// ============================================================================
// MockIo - Test I/O Implementation
// ============================================================================

/// Mock I/O for testing.
///
/// Provides in-memory byte I/O with an input queue and output capture.
/// Reading past the queued input reports end of input.
#[derive(Debug, Default)]
pub struct MockIo {
    /// Input queue (simulates user typing)
    input: VecDeque<u8>,

    /// Output capture (collects all output)
    output: Vec<u8>,

    /// Number of `write_bytes` calls
    writes: usize,
}

impl MockIo {
    /// Create new MockIo with empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create MockIo with pre-loaded input bytes.
    pub fn with_input(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Add input to queue (simulates user typing).
    pub fn push_input(&mut self, s: &str) {
        self.push_bytes(s.as_bytes());
    }

    /// Add raw bytes to the input queue.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// Get captured output as string.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Get captured output as bytes.
    pub fn output_bytes(&self) -> &[u8] {
        &self.output
    }

    /// Clear output buffer.
    pub fn clear_output(&mut self) {
        self.output.clear();
        self.writes = 0;
    }

    /// Check if input queue is empty.
    pub fn input_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Number of write batches since the last clear.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl ByteIo for MockIo {
    type Error = ();

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        Ok(self.input.pop_front())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.output.extend_from_slice(bytes);
        self.writes += 1;
        Ok(())
    }
}

/// MockIo preloaded with one line and its carriage return.
pub fn io_with_command(cmd: &str) -> MockIo {
    let mut io = MockIo::new();
    io.push_input(cmd);
    io.push_input("\r");
    io
}

/// MockIo preloaded with several lines.
pub fn io_with_commands(cmds: &[&str]) -> MockIo {
    let mut io = MockIo::new();
    for cmd in cmds {
        io.push_input(cmd);
        io.push_input("\r");
    }
    io
}

// ============================================================================
// Board - Application State for Testing
// ============================================================================

/// Number of UART units the test board has.
pub const UART_COUNT: usize = 3;

/// Application state handed to handlers.
#[derive(Debug, Default)]
pub struct Board {
    /// Every handler invocation, as "name args..."
    pub calls: Vec<String>,

    /// Pin directions set through `pin NUM out|in`
    pub outputs: Vec<(u8, bool)>,

    /// Baud rate per UART unit
    pub baud: [u32; UART_COUNT],
}

fn record(ctx: &mut CommandContext<'_, Board>, argv: &[&str]) {
    ctx.state.calls.push(argv.join(" "));
}

// ============================================================================
// ROOT - Root Directory Handlers
// ============================================================================

fn echo(ctx: &mut CommandContext<'_, Board>, argv: &[&str]) -> Result<(), ArgError> {
    record(ctx, argv);
    let _ = write!(ctx.out, "{}\r\n", argv[1..].join(" "));
    Ok(())
}

fn tone_stop(ctx: &mut CommandContext<'_, Board>, argv: &[&str]) -> Result<(), ArgError> {
    argv[1].parse::<u8>().map_err(|_| ArgError::Invalid(1))?;
    ctx.state.calls.push(String::from("tone/1"));
    Ok(())
}

fn tone_start(ctx: &mut CommandContext<'_, Board>, argv: &[&str]) -> Result<(), ArgError> {
    argv[2].parse::<u32>().map_err(|_| ArgError::Invalid(2))?;
    ctx.state.calls.push(String::from("tone/2"));
    Ok(())
}

fn tone_beep(ctx: &mut CommandContext<'_, Board>, _argv: &[&str]) -> Result<(), ArgError> {
    ctx.state.calls.push(String::from("tone/3"));
    Ok(())
}

fn pin(ctx: &mut CommandContext<'_, Board>, argv: &[&str]) -> Result<(), ArgError> {
    let num: u8 = argv
        .get(1)
        .ok_or(ArgError::Missing)?
        .parse()
        .map_err(|_| ArgError::Invalid(1))?;
    match argv.get(2) {
        None => {
            let _ = write!(ctx.out, "pin {} is input\r\n", num);
        }
        Some(&"out") => ctx.state.outputs.push((num, true)),
        Some(&"in") => ctx.state.outputs.push((num, false)),
        Some(_) => return Err(ArgError::Invalid(2)),
    }
    record(ctx, argv);
    Ok(())
}

fn uart(ctx: &mut CommandContext<'_, Board>, argv: &[&str]) -> Result<(), ArgError> {
    let unit: usize = argv[1].parse().map_err(|_| ArgError::Invalid(1))?;
    if unit >= UART_COUNT {
        return Err(ArgError::Invalid(1));
    }
    let prompt = format!("uart{}> ", unit);
    ctx.dispatcher.enter(&UART, &prompt, unit);
    Ok(())
}

/// Root directory.
pub static ROOT: Directory<Board> = Directory {
    name: "root",
    keywords: &[
        Keyword::new("echo", echo, Arity::Any, "echo TEXT... - print text"),
        Keyword::new("tone", tone_beep, Arity::Exact(3), "tone PIN FREQ MS - beep for MS")
            .with_brief("Tone generator"),
        Keyword::new("tone", tone_start, Arity::Exact(2), "tone PIN FREQ - start tone"),
        Keyword::new("tone", tone_stop, Arity::Exact(1), "tone PIN - stop tone"),
        Keyword::new("pin", pin, Arity::Any, "pin NUM [in|out] - show or set direction")
            .with_brief("GPIO"),
        Keyword::display_only("reboot", "reboot - restart the board"),
        Keyword::new("uart", uart, Arity::Exact(1), "uart NUM - select a UART"),
    ],
};

// ============================================================================
// UART - Subsystem Directory Handlers
// ============================================================================

fn uart_write(ctx: &mut CommandContext<'_, Board>, argv: &[&str]) -> Result<(), ArgError> {
    if argv.len() < 2 {
        return Err(ArgError::Missing);
    }
    let unit = ctx.dispatcher.context();
    ctx.state.calls.push(format!("uart{} {}", unit, argv[1..].join(" ")));
    Ok(())
}

fn uart_baud(ctx: &mut CommandContext<'_, Board>, argv: &[&str]) -> Result<(), ArgError> {
    let rate: u32 = argv[1].parse().map_err(|_| ArgError::Invalid(1))?;
    // Context token must still name a real unit
    let unit = ctx.dispatcher.context();
    let slot = ctx.state.baud.get_mut(unit).ok_or(ArgError::Missing)?;
    *slot = rate;
    Ok(())
}

/// UART subsystem directory.
pub static UART: Directory<Board> = Directory {
    name: "uart",
    keywords: &[
        Keyword::new("write", uart_write, Arity::Any, "write TEXT... - send text"),
        Keyword::new("baud", uart_baud, Arity::Exact(1), "baud RATE - set baud rate"),
        Keyword::new("exit", serial_shell::directory::exit, Arity::Exact(0), "exit - back to root"),
    ],
};
