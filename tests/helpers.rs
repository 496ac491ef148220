//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
mod fixtures;

pub use fixtures::{Board, MockIo, ROOT, UART, UART_COUNT};
use serial_shell::Shell;

/// Shell type used across the integration tests.
pub type TestShell = Shell<MockIo, Board>;

/// Root prompt.
pub const PROMPT: &str = "esp32> ";

// ============================================================================
// Shell Creation Helpers
// ============================================================================

/// Create a shell in the root directory, ready for testing.
pub fn create_test_shell() -> TestShell {
    Shell::new(&ROOT, PROMPT, Board::default(), MockIo::new())
}

// ============================================================================
// Command Execution Helpers
// ============================================================================

/// Type a line, press enter, process it and return the output.
pub fn execute_command(shell: &mut TestShell, cmd: &str) -> String {
    shell.io_mut().clear_output();
    shell.io_mut().push_input(cmd);
    shell.io_mut().push_input("\r");
    assert!(shell.process_line().unwrap());
    shell.io().output()
}

/// Feed raw keystrokes, process one line and return the output.
pub fn type_input(shell: &mut TestShell, keys: &[u8]) -> String {
    shell.io_mut().clear_output();
    shell.io_mut().push_bytes(keys);
    shell.process_line().unwrap();
    shell.io().output()
}

/// Feed raw keystrokes and process lines until input runs out.
pub fn run_input(shell: &mut TestShell, keys: &[u8]) -> String {
    shell.io_mut().clear_output();
    shell.io_mut().push_bytes(keys);
    shell.run().unwrap();
    shell.io().output()
}

/// Last handler call recorded on the board.
pub fn last_call(shell: &TestShell) -> Option<&str> {
    shell.state().calls.last().map(String::as_str)
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert output contains a control sequence (printed escaped on failure).
pub fn assert_contains_ansi(output: &str, sequence: &str) {
    assert!(
        output.contains(sequence),
        "Expected sequence {:?} in output: {:?}",
        sequence,
        output
    );
}

/// Assert output contains all expected strings.
pub fn assert_contains_all(output: &str, expected: &[&str]) {
    for s in expected {
        assert!(
            output.contains(s),
            "Expected '{}' in output: {:?}",
            s,
            output
        );
    }
}

/// Assert output contains none of the forbidden strings.
pub fn assert_contains_none(output: &str, forbidden: &[&str]) {
    for s in forbidden {
        assert!(
            !output.contains(s),
            "Did not expect '{}' in output: {:?}",
            s,
            output
        );
    }
}
