//! The expression evaluator: primaries chained left to right
//! by binary operators, with no precedence climbing and no short-circuit
//! evaluation. The paren-block's dual assignment/comparison grammar lives
//! in [`crate::block`].

use crate::builtins;
use crate::cursor::{is_binop_char, is_primary_starter, is_var_letter, Cursor};
use crate::definitions::builtins::MAX_ARGS;
use crate::error::Diagnostic;
use crate::host::Host;
use crate::ops;
use crate::value::Value;
use crate::{block, Engine};

/// Parses and evaluates one expression starting at the cursor's current
/// position, stopping at `)`, `;`, `,`, or end of input.
pub(crate) fn eval_expr<H: Host>(engine: &mut Engine<H>, cur: &mut Cursor) -> Value {
    cur.skip_ws();
    let mut left = parse_primary(engine, cur);
    loop {
        cur.skip_ws();
        match cur.peek() {
            Some(op) if is_binop_char(op) => {
                cur.advance();
                cur.skip_ws();
                let right = parse_primary(engine, cur);
                left = ops::apply(op, &left, &right);
            }
            _ => break,
        }
    }
    left
}

pub(crate) fn parse_primary<H: Host>(engine: &mut Engine<H>, cur: &mut Cursor) -> Value {
    cur.skip_ws();
    match cur.peek() {
        None => Value::Number(0.0),
        Some(b'-') => {
            if cur.peek_at(1).map_or(false, is_primary_starter) {
                cur.advance();
                let operand = parse_primary(engine, cur);
                Value::Number(-operand.to_number())
            } else {
                cur.advance();
                Value::Number(0.0)
            }
        }
        Some(b'!') => {
            cur.advance();
            let operand = parse_primary(engine, cur);
            Value::Number(if operand.to_number() == 0.0 { 1.0 } else { 0.0 })
        }
        Some(b'$') => {
            cur.advance();
            if cur.peek().map_or(false, is_var_letter) {
                let letter = cur.advance().unwrap() as char;
                engine.read_var(letter).type_flip()
            } else {
                Value::Number(0.0)
            }
        }
        Some(b'(') => block::eval_paren_block(engine, cur),
        Some(b'"') => parse_string_literal(cur),
        Some(b'\'') => {
            cur.advance();
            if cur.peek().map_or(false, is_primary_starter) {
                let seed = parse_primary(engine, cur);
                engine.seed_rng(seed.to_number() as u64);
                Value::Number(0.0)
            } else {
                Value::Number(engine.rng.next_uniform())
            }
        }
        Some(b':') => {
            cur.advance();
            Value::Number(engine.host_mut().poll_key() as f64)
        }
        Some(b'?') => {
            cur.advance();
            Value::String(engine.host_mut().read_line())
        }
        Some(b'#') => {
            cur.advance();
            Value::Number(engine.cursor_line() as f64)
        }
        Some(b'@') => {
            cur.advance();
            let index = parse_primary(engine, cur).to_number() as i64;
            Value::Number(engine.array().get(index))
        }
        Some(c) if c.is_ascii_lowercase() => parse_builtin_call(engine, cur),
        Some(c) if is_var_letter(c) => {
            let letter = cur.advance().unwrap() as char;
            engine.read_var(letter)
        }
        Some(c) if c.is_ascii_digit() || c == b'.' => parse_number_literal(cur),
        Some(_) => {
            let offset = cur.pos();
            cur.advance();
            Diagnostic::MalformedPrimary(offset).emit();
            Value::Number(0.0)
        }
    }
}

fn parse_string_literal(cur: &mut Cursor) -> Value {
    cur.advance(); // opening quote
    let mut bytes = Vec::new();
    loop {
        match cur.advance() {
            None => break,
            Some(b'"') => break,
            Some(b'\\') => match cur.advance() {
                Some(b'n') => bytes.push(b'\n'),
                Some(b't') => bytes.push(b'\t'),
                Some(b'r') => bytes.push(b'\r'),
                Some(b'\\') => bytes.push(b'\\'),
                Some(b'"') => bytes.push(b'"'),
                Some(d) if d.is_ascii_digit() => {
                    let mut n = (d - b'0') as u32;
                    for _ in 0..2 {
                        match cur.peek() {
                            Some(d2) if d2.is_ascii_digit() => {
                                n = n * 8 + (d2 - b'0') as u32;
                                cur.advance();
                            }
                            _ => break,
                        }
                    }
                    bytes.push((n & 0xFF) as u8);
                }
                Some(other) => bytes.push(other),
                None => break,
            },
            Some(b) => bytes.push(b),
        }
    }
    Value::String(bytes)
}

fn parse_number_literal(cur: &mut Cursor) -> Value {
    let mut text = String::new();
    while let Some(c) = cur.peek() {
        if c.is_ascii_digit() || c == b'.' {
            text.push(c as char);
            cur.advance();
        } else {
            break;
        }
    }
    if matches!(cur.peek(), Some(b'e') | Some(b'E')) {
        let mut lookahead = 1;
        if matches!(cur.peek_at(1), Some(b'+') | Some(b'-')) {
            lookahead += 1;
        }
        if cur.peek_at(lookahead).map_or(false, |b| b.is_ascii_digit()) {
            text.push(cur.advance().unwrap() as char);
            if matches!(cur.peek(), Some(b'+') | Some(b'-')) {
                text.push(cur.advance().unwrap() as char);
            }
            while let Some(d) = cur.peek() {
                if d.is_ascii_digit() {
                    text.push(d as char);
                    cur.advance();
                } else {
                    break;
                }
            }
        }
    }
    Value::Number(text.parse::<f64>().unwrap_or(0.0))
}

fn parse_builtin_call<H: Host>(engine: &mut Engine<H>, cur: &mut Cursor) -> Value {
    let mut name = String::new();
    while let Some(c) = cur.peek() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            name.push(c as char);
            cur.advance();
        } else {
            break;
        }
    }
    let mut args = Vec::new();
    if cur.peek() == Some(b'(') {
        cur.advance();
        cur.skip_ws();
        if cur.peek() != Some(b')') {
            loop {
                if args.len() < MAX_ARGS {
                    args.push(eval_expr(engine, cur));
                } else {
                    eval_expr(engine, cur);
                }
                cur.skip_ws();
                if cur.peek() == Some(b',') {
                    cur.advance();
                    continue;
                }
                break;
            }
        }
        cur.skip_ws();
        if cur.peek() == Some(b')') {
            cur.advance();
        }
    }
    builtins::call(engine, &name, &args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubHost;

    fn eval_str(engine: &mut Engine<StubHost>, source: &str) -> Value {
        let mut cur = Cursor::new(source);
        eval_expr(engine, &mut cur)
    }

    #[test]
    fn left_to_right_no_precedence() {
        let mut engine = Engine::new(StubHost::default());
        assert_eq!(eval_str(&mut engine, "2+3*4"), Value::Number(20.0));
    }

    #[test]
    fn unary_minus_negates_primary_only() {
        let mut engine = Engine::new(StubHost::default());
        assert_eq!(eval_str(&mut engine, "-5+2"), Value::Number(-3.0));
    }

    #[test]
    fn not_operator_inverts_truthiness() {
        let mut engine = Engine::new(StubHost::default());
        assert_eq!(eval_str(&mut engine, "!0"), Value::Number(1.0));
        assert_eq!(eval_str(&mut engine, "!5"), Value::Number(0.0));
    }

    #[test]
    fn string_literal_decodes_escapes() {
        let mut engine = Engine::new(StubHost::default());
        assert_eq!(eval_str(&mut engine, "\"a\\nb\""), Value::String(b"a\nb".to_vec()));
    }

    #[test]
    fn type_flip_round_trips_through_dollar() {
        let mut engine = Engine::new(StubHost::default());
        engine.vars.set('A', Value::Number(7.0));
        assert_eq!(eval_str(&mut engine, "$A"), Value::String(b"7".to_vec()));
    }

    #[test]
    fn array_read_primary() {
        let mut engine = Engine::new(StubHost::default());
        engine.array.set(3, 9.0);
        assert_eq!(eval_str(&mut engine, "@3"), Value::Number(9.0));
    }

    #[test]
    fn builtin_call_dispatches_with_args() {
        let mut engine = Engine::new(StubHost::default());
        assert_eq!(eval_str(&mut engine, "max(3,7)"), Value::Number(7.0));
    }

    #[test]
    fn unknown_variable_reads_as_undefined() {
        let mut engine = Engine::new(StubHost::default());
        assert_eq!(eval_str(&mut engine, "Z"), Value::Undefined);
    }

    #[test]
    fn malformed_primary_falls_back_to_zero_and_keeps_running() {
        let mut engine = Engine::new(StubHost::default());
        // `~` starts none of the recognised primaries; the catch-all
        // consumes it, logs a diagnostic, and yields 0 without aborting.
        assert_eq!(eval_str(&mut engine, "~"), Value::Number(0.0));
        assert_eq!(eval_str(&mut engine, "1+~+2"), Value::Number(3.0));
    }
}
