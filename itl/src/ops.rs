//! Binary operator semantics: evaluated eagerly and
//! left-to-right, with no precedence and no short-circuiting.

use crate::error::Diagnostic;
use crate::value::Value;

/// Applies the binary operator named by `op` to two already-evaluated
/// operands. `op` is one of `+ - * / % ^ & | < > =`.
///
/// `=` here is always plain numeric equality — both operands coerce to
/// numbers first. The byte-aware comparison a paren-block's trailing
/// `V = expr` performs (string equality when either side is a string) is a
/// distinct rule scoped to that one construct; see
/// [`crate::block::eval_explicit`], which calls [`Value::loose_eq`]
/// directly instead of going through this function.
pub fn apply(op: u8, lhs: &Value, rhs: &Value) -> Value {
    match op {
        b'+' => {
            if matches!(lhs, Value::String(_)) || matches!(rhs, Value::String(_)) {
                let mut bytes = lhs.to_bytes();
                bytes.extend(rhs.to_bytes());
                Value::String(bytes)
            } else {
                Value::Number(lhs.to_number() + rhs.to_number())
            }
        }
        b'-' => Value::Number(lhs.to_number() - rhs.to_number()),
        b'*' => Value::Number(lhs.to_number() * rhs.to_number()),
        b'/' => {
            let divisor = rhs.to_number();
            if divisor == 0.0 {
                Diagnostic::DivideByZero.emit();
                Value::Number(0.0)
            } else {
                Value::Number(lhs.to_number() / divisor)
            }
        }
        b'%' => {
            let divisor = rhs.to_number();
            if divisor == 0.0 {
                Diagnostic::ModuloByZero.emit();
                Value::Number(0.0)
            } else {
                Value::Number(lhs.to_number() % divisor)
            }
        }
        b'^' => Value::Number(lhs.to_number().powf(rhs.to_number())),
        b'&' => Value::Number(bool_num(lhs.is_truthy() && rhs.is_truthy())),
        b'|' => Value::Number(bool_num(lhs.is_truthy() || rhs.is_truthy())),
        b'<' => Value::Number(bool_num(lhs.to_number() < rhs.to_number())),
        b'>' => Value::Number(bool_num(lhs.to_number() > rhs.to_number())),
        b'=' => Value::Number(bool_num(lhs.to_number() == rhs.to_number())),
        _ => Value::Number(0.0),
    }
}

fn bool_num(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_plus_number_concatenates() {
        let v = apply(b'+', &Value::string("x="), &Value::Number(5.0));
        assert_eq!(v, Value::String(b"x=5".to_vec()));
    }

    #[test]
    fn number_plus_number_adds() {
        assert_eq!(apply(b'+', &Value::Number(2.0), &Value::Number(3.0)), Value::Number(5.0));
    }

    #[test]
    fn divide_by_zero_yields_zero_not_panic() {
        assert_eq!(apply(b'/', &Value::Number(4.0), &Value::Number(0.0)), Value::Number(0.0));
    }

    #[test]
    fn logical_and_or_are_zero_one() {
        assert_eq!(apply(b'&', &Value::Number(1.0), &Value::Number(0.0)), Value::Number(0.0));
        assert_eq!(apply(b'|', &Value::Number(0.0), &Value::Number(2.0)), Value::Number(1.0));
    }

    #[test]
    fn top_level_equality_coerces_both_sides_to_numbers() {
        // "5.0" and 5 are numerically equal even though their byte forms
        // differ — top-level `=` never compares bytes.
        assert_eq!(apply(b'=', &Value::string("5"), &Value::Number(5.0)), Value::Number(1.0));
        assert_eq!(apply(b'=', &Value::string("5.0"), &Value::Number(5.0)), Value::Number(1.0));
        assert_eq!(apply(b'=', &Value::string("abc"), &Value::Number(0.0)), Value::Number(1.0));
    }
}
