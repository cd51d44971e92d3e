//! The statement executor: dispatches a whole segment by its
//! leading (non-whitespace) byte.

use crate::cursor::{is_binop_char, is_primary_starter, is_var_letter, Cursor};
use crate::eval::{eval_expr, parse_primary};
use crate::host::Host;
use crate::ops;
use crate::value::Value;
use crate::Engine;

/// `true` if `segment` opens with a digit or variable letter immediately
/// followed by `@` — the array-write statement's lead token is restricted
/// to exactly one of those two primary shapes.
fn looks_like_array_write(segment: &str) -> bool {
    let bytes = segment.trim_start().as_bytes();
    let mut i = 0;
    if i < bytes.len() && bytes[i].is_ascii_digit() {
        while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
            i += 1;
        }
    } else if i < bytes.len() && is_var_letter(bytes[i]) {
        i += 1;
    } else {
        return false;
    }
    bytes.get(i) == Some(&b'@')
}

/// Executes one segment's worth of statement. Meta-commands (a segment
/// starting with `:`) are a REPL/CLI-layer concern, not a program-store
/// concern — the engine treats them as a no-op, since the REPL never
/// stores them in the program in the first place.
pub(crate) fn execute_segment<H: Host>(engine: &mut Engine<H>, segment: &str) {
    let trimmed = segment.trim_start();
    if trimmed.is_empty() {
        return;
    }
    let lead = trimmed.as_bytes()[0];

    if lead == b':' {
        return;
    }

    if lead == b'?' {
        exec_print(engine, trimmed);
        return;
    }

    if looks_like_array_write(trimmed) {
        exec_array_write(engine, trimmed);
        return;
    }

    if lead == b'#' {
        exec_jump(engine, trimmed);
        return;
    }

    if is_var_letter(lead) {
        exec_assignment(engine, trimmed);
        return;
    }

    // Bare expression: evaluated for any side effects, result discarded.
    let mut cur = Cursor::new(trimmed);
    eval_expr(engine, &mut cur);
}

fn exec_print<H: Host>(engine: &mut Engine<H>, segment: &str) {
    let mut cur = Cursor::new(segment);
    cur.advance(); // '?'
    cur.skip_ws();
    if cur.peek() == Some(b'=') {
        cur.advance();
    }
    let value = eval_expr(engine, &mut cur);
    let bytes = value.to_bytes();
    engine.last_was_newline = bytes.last() == Some(&b'\n');
    engine.host_mut().putch(&bytes);
}

fn exec_array_write<H: Host>(engine: &mut Engine<H>, segment: &str) {
    let mut cur = Cursor::new(segment);
    let _base = parse_primary(engine, &mut cur); // discarded; side effects (if any) still happen
    cur.skip_ws();
    if cur.peek() == Some(b'@') {
        cur.advance();
    }
    let index = parse_primary(engine, &mut cur).to_number() as i64;
    cur.skip_ws();
    if cur.peek() == Some(b'=') {
        cur.advance();
    }
    let value = eval_expr(engine, &mut cur);
    engine.write_array(index, value.to_number());
}

fn exec_jump<H: Host>(engine: &mut Engine<H>, segment: &str) {
    let mut cur = Cursor::new(segment);
    cur.advance(); // '#'
    cur.skip_ws();
    if cur.peek() == Some(b'=') {
        cur.advance();
    }
    let target = eval_expr(engine, &mut cur);
    engine.set_cursor_line(target.to_number() as i64);
}

fn exec_assignment<H: Host>(engine: &mut Engine<H>, segment: &str) {
    let mut cur = Cursor::new(segment);
    let letter = cur.advance().unwrap() as char;
    cur.skip_ws();
    match cur.peek() {
        None => engine.write_var(letter, Value::Undefined),
        Some(b'=') => {
            cur.advance();
            let v = eval_expr(engine, &mut cur);
            engine.write_var(letter, v);
        }
        Some(op) if is_binop_char(op) => {
            cur.advance();
            let rhs = eval_expr(engine, &mut cur);
            let lhs = engine.read_var(letter);
            let result = ops::apply(op, &lhs, &rhs);
            engine.write_var(letter, result);
        }
        Some(c) if is_primary_starter(c) => {
            let v = eval_expr(engine, &mut cur);
            engine.write_var(letter, v);
        }
        _ => engine.write_var(letter, Value::Undefined),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubHost;

    fn run(engine: &mut Engine<StubHost>, segment: &str) {
        execute_segment(engine, segment);
    }

    #[test]
    fn bare_variable_clears_it() {
        let mut engine = Engine::new(StubHost::default());
        engine.vars.set('A', Value::Number(5.0));
        run(&mut engine, "A");
        assert!(engine.vars.get('A').is_undefined());
    }

    #[test]
    fn explicit_assignment_sets_variable() {
        let mut engine = Engine::new(StubHost::default());
        run(&mut engine, "A=3+4");
        assert_eq!(*engine.vars.get('A'), Value::Number(7.0));
    }

    #[test]
    fn self_referential_statement_rewrites_as_assignment() {
        let mut engine = Engine::new(StubHost::default());
        engine.vars.set('A', Value::Number(2.0));
        run(&mut engine, "A+3");
        assert_eq!(*engine.vars.get('A'), Value::Number(5.0));
    }

    #[test]
    fn implicit_assignment_statement() {
        let mut engine = Engine::new(StubHost::default());
        run(&mut engine, "A 9");
        assert_eq!(*engine.vars.get('A'), Value::Number(9.0));
    }

    #[test]
    fn array_write_statement() {
        let mut engine = Engine::new(StubHost::default());
        run(&mut engine, "K@2=11");
        assert_eq!(engine.array.get(2), 11.0);
    }

    #[test]
    fn array_write_without_equals() {
        let mut engine = Engine::new(StubHost::default());
        run(&mut engine, "0@1 22");
        assert_eq!(engine.array.get(1), 22.0);
    }

    #[test]
    fn jump_sets_cursor() {
        let mut engine = Engine::new(StubHost::default());
        engine.load("A=1;B=2;C=3");
        run(&mut engine, "#=2");
        assert_eq!(engine.cursor_line(), 2);
    }

    #[test]
    fn print_writes_through_host() {
        let mut engine = Engine::new(StubHost::default());
        run(&mut engine, "?\"hi\"");
        assert_eq!(engine.host().output, b"hi");
    }

    #[test]
    fn print_accepts_optional_leading_equals() {
        let mut engine = Engine::new(StubHost::default());
        run(&mut engine, "?=5");
        assert_eq!(engine.host().output, b"5");
    }

    #[test]
    fn top_level_equality_is_numeric_not_byte_aware() {
        let mut engine = Engine::new(StubHost::default());
        run(&mut engine, "?\"5.0\"=5");
        assert_eq!(engine.host().output, b"1");
    }

    #[test]
    fn meta_command_segment_is_a_no_op() {
        let mut engine = Engine::new(StubHost::default());
        run(&mut engine, ":vars");
        assert!(engine.host().output.is_empty());
    }
}
