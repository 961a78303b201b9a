use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_buffer_handler_captures_lines() {
    let handler = buffer_handler();
    handler.println("one");
    handler.println("two");
    assert_eq!(handler.get_output(), "one\ntwo\n");
}

#[test]
fn test_buffer_handler_clear() {
    let handler = buffer_handler();
    handler.println("gone");
    handler.clear();
    assert_eq!(handler.get_output(), "");
    handler.println("kept");
    assert_eq!(handler.get_output(), "kept\n");
}

#[test]
fn test_silent_and_stdout_capture_nothing() {
    let silent = silent_handler();
    silent.println("dropped");
    assert_eq!(silent.get_output(), "");
    silent.clear();

    assert_eq!(stdout_handler().get_output(), "");
}

#[test]
fn test_shared_handler_sees_writes_from_clones() {
    let handler = buffer_handler();
    let clone = SharedPrintHandler::clone(&handler);
    clone.println("via clone");
    assert_eq!(handler.get_output(), "via clone\n");
}
