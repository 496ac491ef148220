//! Line editing behavior through the shell.
//!
//! Each test types raw keystrokes (control bytes, escape sequences) and checks
//! both the command that finally ran and the terminal output it produced.

#[allow(clippy::duplicate_mod)]
#[path = "helpers.rs"]
mod helpers;

use helpers::{last_call, type_input};

// ============================================================================
// Echo and basic editing
// ============================================================================

#[test]
fn test_typed_line_is_echoed_and_executed() {
    let mut shell = helpers::create_test_shell();

    let output = helpers::execute_command(&mut shell, "echo hi");

    assert_eq!(output, "esp32> echo hi\r\nhi\r\n");
    assert_eq!(last_call(&shell), Some("echo hi"));
}

#[test]
fn test_empty_command_does_nothing() {
    let mut shell = helpers::create_test_shell();

    let output = helpers::execute_command(&mut shell, "");

    assert_eq!(output, "esp32> \r\n");
    assert!(shell.state().calls.is_empty());
    helpers::assert_contains_none(&output, &["Error"]);
}

#[test]
fn test_backspace_sequence() {
    let mut shell = helpers::create_test_shell();

    let output = type_input(&mut shell, b"echo hix\x7f\r");

    // Back over the byte, blank it, back again
    helpers::assert_contains_ansi(&output, "\x08 \x08");
    assert_eq!(last_call(&shell), Some("echo hi"));
}

#[test]
fn test_ctrl_h_deletes_backward() {
    let mut shell = helpers::create_test_shell();
    type_input(&mut shell, b"echo abc\x08\x08\r");
    assert_eq!(last_call(&shell), Some("echo a"));
}

#[test]
fn test_kill_key_clears_line() {
    let mut shell = helpers::create_test_shell();
    type_input(&mut shell, b"garbage\x15echo ok\r");
    assert_eq!(last_call(&shell), Some("echo ok"));
}

#[test]
fn test_insert_in_middle_repaints() {
    let mut shell = helpers::create_test_shell();

    // ^A, ^F, then insert the missing letter
    let output = type_input(&mut shell, b"eho ok\x01\x06c\r");

    helpers::assert_contains_ansi(&output, "\resp32> ec");
    assert_eq!(last_call(&shell), Some("echo ok"));
}

#[test]
fn test_arrow_keys_move_cursor() {
    let mut shell = helpers::create_test_shell();
    type_input(&mut shell, b"echo ac\x1b[Db\r");
    assert_eq!(last_call(&shell), Some("echo abc"));

    type_input(&mut shell, b"echo ac\x1bOD\x1bOCd\r");
    assert_eq!(last_call(&shell), Some("echo acd"));
}

#[test]
fn test_unknown_escape_rings_bell() {
    let mut shell = helpers::create_test_shell();
    let output = type_input(&mut shell, b"echo x\x1b[Z\r");
    helpers::assert_contains_ansi(&output, "\x07");
    assert_eq!(last_call(&shell), Some("echo x"));
}

// ============================================================================
// Words, kill register and repeat counts
// ============================================================================

#[test]
fn test_word_kill_and_yank() {
    let mut shell = helpers::create_test_shell();
    type_input(&mut shell, b"echo one two\x1b\x7f\x19\x19\r");
    assert_eq!(last_call(&shell), Some("echo one twotwo"));
}

#[test]
fn test_kill_register_survives_lines() {
    let mut shell = helpers::create_test_shell();

    // Kill the whole line, submit the empty line
    type_input(&mut shell, b"echo keep\x01\x0b\r");
    assert!(shell.state().calls.is_empty());

    // Yank it back on the next line
    type_input(&mut shell, b"\x19\r");
    assert_eq!(last_call(&shell), Some("echo keep"));
}

#[test]
fn test_transpose_fixes_typo() {
    let mut shell = helpers::create_test_shell();
    type_input(&mut shell, b"ehco\x01\x06\x06\x14\x05 fixed\r");
    assert_eq!(last_call(&shell), Some("echo fixed"));
}

#[test]
fn test_case_word() {
    let mut shell = helpers::create_test_shell();
    type_input(&mut shell, b"echo shout\x1bb\x1bu\r");
    assert_eq!(last_call(&shell), Some("echo SHOUT"));

    type_input(&mut shell, b"echo QUIET\x1bb\x1bl\r");
    assert_eq!(last_call(&shell), Some("echo quiet"));
}

#[test]
fn test_repeat_count_insert() {
    let mut shell = helpers::create_test_shell();
    type_input(&mut shell, b"echo \x1b3z\r");
    assert_eq!(last_call(&shell), Some("echo zzz"));
}

#[test]
fn test_repeat_count_delete_backward() {
    let mut shell = helpers::create_test_shell();
    type_input(&mut shell, b"echo abcdef\x1b3\x08\r");
    assert_eq!(last_call(&shell), Some("echo abc"));
}

#[test]
fn test_mark_and_kill_region() {
    let mut shell = helpers::create_test_shell();

    // Mark after "echo ", go to end, kill back to the mark
    type_input(&mut shell, b"echo abc def\x01\x1b5\x06\x1b \x05\x17\r");
    assert_eq!(last_call(&shell), Some("echo"));
}

#[test]
fn test_exchange_point_and_mark() {
    let mut shell = helpers::create_test_shell();
    type_input(&mut shell, b"echo \x1b tail\x18\x18head\r");
    assert_eq!(last_call(&shell), Some("echo headtail"));
}

#[test]
fn test_move_to_char() {
    let mut shell = helpers::create_test_shell();
    type_input(&mut shell, b"echo a-b\x01\x1d-X\r");
    assert_eq!(last_call(&shell), Some("echo aX-b"));
}

// ============================================================================
// Display
// ============================================================================

#[test]
fn test_quoted_control_byte_shows_caret() {
    let mut shell = helpers::create_test_shell();

    let output = type_input(&mut shell, b"echo a\x16\x07b\r");

    helpers::assert_contains_ansi(&output, "a^Gb");
    assert_eq!(last_call(&shell), Some("echo a\x07b"));
}

#[test]
fn test_redisplay() {
    let mut shell = helpers::create_test_shell();
    let output = type_input(&mut shell, b"echo r\x0c\r");
    helpers::assert_contains_ansi(&output, "\r\nesp32> echo r");
}

#[test]
fn test_meta_chars_mode() {
    let mut shell = helpers::create_test_shell();
    shell.editor_mut().set_meta_chars(true);

    // 0xe2 is M-b
    type_input(&mut shell, b"echo abc\xe2X\r");
    assert_eq!(last_call(&shell), Some("echo Xabc"));
}

// ============================================================================
// End of input and signals
// ============================================================================

#[test]
fn test_interrupt_discards_line() {
    let mut shell = helpers::create_test_shell();

    let output = type_input(&mut shell, b"echo lost\x03");

    assert!(shell.state().calls.is_empty());
    assert!(output.ends_with("\r\n"));

    helpers::execute_command(&mut shell, "echo next");
    assert_eq!(last_call(&shell), Some("echo next"));
}

#[test]
fn test_quit_key_discards_line() {
    let mut shell = helpers::create_test_shell();
    type_input(&mut shell, b"echo lost\x1c");
    assert!(shell.state().calls.is_empty());
}

#[test]
fn test_eof_key_on_empty_line_ends_run() {
    let mut shell = helpers::create_test_shell();

    helpers::run_input(&mut shell, b"echo a\r\x04echo never\r");

    assert_eq!(shell.state().calls, ["echo a"]);
    assert!(!shell.io().input_empty());
}

#[test]
fn test_eof_key_mid_line_deletes() {
    let mut shell = helpers::create_test_shell();
    type_input(&mut shell, b"echo abc\x02\x04\r");
    assert_eq!(last_call(&shell), Some("echo ab"));
}
