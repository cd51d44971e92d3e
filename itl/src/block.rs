//! The paren-block's dual grammar: inside `(...)`, each
//! `;`/`,`-separated item is one of four shapes, classified by what
//! immediately follows a leading variable letter. The block's value is
//! that of its last item.
//!
//! ```text
//! V=expr   followed by a separator -> assignment, item value is expr
//! V=expr   last item (no separator) -> comparison against V, V unchanged
//! Vopexpr  (op one of + - * / % ^ & | < >) -> self-referential: V op expr,
//!          assigned back to V if a separator follows, otherwise V unchanged
//! Vexpr    (expr starting with any other value-starter) -> implicit
//!          assignment, always stored
//! anything else                      -> plain expression, V (if any) unchanged
//! ```

use crate::cursor::{is_binop_char, is_var_letter, Cursor};
use crate::definitions::blocks::MAX_DEPTH;
use crate::error::Diagnostic;
use crate::eval::eval_expr;
use crate::host::Host;
use crate::ops;
use crate::value::Value;
use crate::Engine;

pub(crate) fn eval_paren_block<H: Host>(engine: &mut Engine<H>, cur: &mut Cursor) -> Value {
    cur.advance(); // '('
    if engine.paren_depth >= MAX_DEPTH {
        Diagnostic::NestingTooDeep.emit();
        skip_to_matching_close(cur);
        return Value::Number(0.0);
    }
    engine.paren_depth += 1;
    let mut last = Value::Number(0.0);
    loop {
        cur.skip_ws();
        if cur.peek() == Some(b')') {
            cur.advance();
            break;
        }
        if cur.eof() {
            break;
        }
        last = eval_item(engine, cur);
        cur.skip_ws();
        if cur.peek() == Some(b')') {
            cur.advance();
            break;
        }
    }
    engine.paren_depth -= 1;
    last
}

/// Consumes up to and including the `)` matching the opening paren already
/// advanced past, so a block abandoned for excessive nesting still leaves
/// the cursor past its own closing bracket rather than desynchronising the
/// rest of the segment's parse. Tracks nested parens and skips over quoted
/// strings so a stray `(` or `)` inside a string literal isn't miscounted.
fn skip_to_matching_close(cur: &mut Cursor) {
    let mut depth: i32 = 1;
    let mut in_string = false;
    let mut escaped = false;
    while let Some(b) = cur.advance() {
        if escaped {
            escaped = false;
            continue;
        }
        if in_string {
            match b {
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
    }
}

fn eval_item<H: Host>(engine: &mut Engine<H>, cur: &mut Cursor) -> Value {
    if let Some(letter_byte) = cur.peek() {
        if is_var_letter(letter_byte) {
            match cur.peek_at(1) {
                Some(b'=') => return eval_explicit(engine, cur),
                Some(op) if is_binop_char(op) => return eval_self_referential(engine, cur, op),
                Some(c) if crate::cursor::is_primary_starter(c) => {
                    return eval_implicit_assignment(engine, cur);
                }
                _ => {}
            }
        }
    }
    eval_plain(engine, cur)
}

/// `V=expr`: assignment if a separator follows, otherwise an equality
/// comparison against `V`'s current value (`V` is left unchanged either
/// way when it is a comparison). The comparison is byte-aware — string
/// equality when either side is a string, numeric equality otherwise — per
/// this construct's own rule, distinct from plain top-level `=`'s pure
/// numeric coercion (see [`crate::ops::apply`]).
fn eval_explicit<H: Host>(engine: &mut Engine<H>, cur: &mut Cursor) -> Value {
    let letter = cur.advance().unwrap() as char;
    cur.advance(); // '='
    let rhs = eval_expr(engine, cur);
    cur.skip_ws();
    if cur.skip_separator() {
        engine.write_var(letter, rhs.clone());
        rhs
    } else {
        let current = engine.read_var(letter);
        Value::Number(if current.loose_eq(&rhs) { 1.0 } else { 0.0 })
    }
}

/// `Vopexpr`: computes `V op expr`; the result is stored back into `V` when
/// a separator follows, otherwise `V` is left untouched and the computed
/// value is simply the item's value.
fn eval_self_referential<H: Host>(engine: &mut Engine<H>, cur: &mut Cursor, op: u8) -> Value {
    let letter = cur.advance().unwrap() as char;
    cur.advance(); // the operator byte
    let rhs = eval_expr(engine, cur);
    let lhs = engine.read_var(letter);
    let result = ops::apply(op, &lhs, &rhs);
    cur.skip_ws();
    if cur.skip_separator() {
        engine.write_var(letter, result.clone());
    }
    result
}

/// `Vexpr`: always an assignment, regardless of separator.
fn eval_implicit_assignment<H: Host>(engine: &mut Engine<H>, cur: &mut Cursor) -> Value {
    let letter = cur.advance().unwrap() as char;
    let rhs = eval_expr(engine, cur);
    engine.write_var(letter, rhs.clone());
    cur.skip_ws();
    cur.skip_separator();
    rhs
}

fn eval_plain<H: Host>(engine: &mut Engine<H>, cur: &mut Cursor) -> Value {
    let v = eval_expr(engine, cur);
    cur.skip_ws();
    cur.skip_separator();
    v
}
