#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use std::rc::Rc;

use lox_ir::{SourceMap, Span};
use pretty_assertions::assert_eq;

use super::*;
use crate::errors::{division_by_zero, EvalErrorKind};

fn frame(name: &str, start: u32, end: u32) -> CallFrame {
    CallFrame {
        name: Rc::from(name),
        call_span: Span::new(start, end),
    }
}

#[test]
fn test_push_respects_limit() {
    let mut stack = CallStack::new(2);
    stack.push(frame("a", 0, 1)).unwrap();
    stack.push(frame("b", 0, 1)).unwrap();
    let err = stack.push(frame("c", 0, 1)).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { depth: 2 });
    assert_eq!(stack.depth(), 2);

    stack.pop();
    assert_eq!(stack.depth(), 1);
    stack.clear();
    assert!(stack.is_empty());
}

#[test]
fn test_capture_pairs_spans_with_callers() {
    let mut stack = CallStack::new(10);
    stack.push(frame("outer", 50, 57)).unwrap();
    stack.push(frame("inner", 30, 37)).unwrap();

    let trace = stack.capture(Some(Span::new(10, 20)));
    let functions: Vec<_> = trace
        .frames()
        .iter()
        .map(|f| (f.function.as_deref().map(str::to_string), f.span))
        .collect();
    assert_eq!(
        functions,
        vec![
            (Some("inner".to_string()), Span::new(10, 20)),
            (Some("outer".to_string()), Span::new(30, 37)),
            (None, Span::new(50, 57)),
        ]
    );
}

#[test]
fn test_unwind_into_without_frames_leaves_error_alone() {
    let mut stack = CallStack::new(10);
    let err = stack.unwind_into(division_by_zero().with_span(Span::new(0, 1)));
    assert!(err.backtrace.is_none());
}

#[test]
fn test_unwind_into_attaches_and_clears() {
    let mut stack = CallStack::new(10);
    stack.push(frame("f", 4, 7)).unwrap();
    let err = stack.unwind_into(division_by_zero().with_span(Span::new(0, 1)));
    assert!(stack.is_empty());
    let trace = err.backtrace.unwrap();
    assert_eq!(trace.frames().len(), 2);
    assert!(!trace.is_empty());
}

#[test]
fn test_render_aligns_columns() {
    let source = "fun f() {\n    1 / 0;\n}\nf();";
    let mut map = SourceMap::new();
    map.add_file("main.lox", source);

    let mut stack = CallStack::new(10);
    stack.push(frame("f", 23, 27)).unwrap();
    let trace = stack.capture(Some(Span::new(14, 19)));
    assert_eq!(
        trace.render(&map),
        "Stack Trace (most recent call first):\n  main.lox:2:5 in f 1 / 0;\n  main.lox:4:1      f();"
    );
}

#[test]
fn test_render_truncates_long_traces() {
    let source = "fun r() { r(); }\nr();";
    let mut map = SourceMap::new();
    map.add_file("deep.lox", source);

    let mut stack = CallStack::new(100);
    stack.push(frame("r", 17, 20)).unwrap();
    for _ in 0..39 {
        stack.push(frame("r", 10, 13)).unwrap();
    }
    let trace = stack.capture(Some(Span::new(10, 13)));
    assert_eq!(trace.frames().len(), 41);

    let rendered = trace.render(&map);
    assert_eq!(rendered.lines().count(), 1 + RENDERED_FRAME_LIMIT + 1);
    assert!(rendered.ends_with("\n  ... 9 more frames"));
}

#[test]
fn test_render_unknown_location() {
    let trace = CallStack::new(1).capture(Some(Span::new(500, 501)));
    assert_eq!(
        trace.render(&SourceMap::new()),
        "Stack Trace (most recent call first):\n  <unknown>  "
    );
}
