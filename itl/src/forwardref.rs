//! Forward-reference resolution: reading an undefined
//! variable scans the remaining program for the first segment that assigns
//! it and runs that segment early, then resumes where it left off.

use crate::engine::Engine;
use crate::exec;
use crate::host::Host;
use crate::value::Value;

/// `true` if `segment`'s first non-whitespace character is `letter` and it
/// is not the *only* character in the segment — i.e. it looks like an
/// assignment to `letter` rather than a bare read of it.
fn looks_like_assignment_to(segment: &str, letter: char) -> bool {
    let trimmed = segment.trim_start();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(c) if c == letter => chars.next().is_some(),
        _ => false,
    }
}

/// Resolves a read of `letter` that found it undefined. Guarded against
/// reentrancy: a segment executed here that itself reads another undefined
/// variable may recurse once more, but a cycle back to a letter already
/// being resolved returns `Undefined` immediately instead of looping
/// forever ( "at most one resolution in flight").
pub(crate) fn resolve<H: Host>(engine: &mut Engine<H>, letter: char) -> Value {
    if engine.forward_ref_active {
        return Value::Undefined;
    }
    engine.forward_ref_active = true;
    let result = resolve_inner(engine, letter);
    engine.forward_ref_active = false;
    result
}

/// Does the scan-and-run. Kept separate from `resolve` so the guard's
/// set/clear pair is visibly the only thing wrapping it, with no early
/// return between them.
fn resolve_inner<H: Host>(engine: &mut Engine<H>, letter: char) -> Value {
    let saved_cursor = engine.cursor_line();
    let last_line = engine.program().len() as i64;
    let mut line = saved_cursor.max(1);

    while line <= last_line {
        let candidate = engine.program().get(line).map(|s| s.to_string());
        match candidate {
            Some(segment) if looks_like_assignment_to(&segment, letter) => {
                engine.set_cursor_line(line);
                exec::execute_segment(engine, &segment);
                break;
            }
            _ => line += 1,
        }
    }

    engine.set_cursor_line(saved_cursor);
    engine.vars().get(letter).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_assignment_lead() {
        assert!(looks_like_assignment_to("A=1", 'A'));
        assert!(looks_like_assignment_to("  A 1+2", 'A'));
        assert!(!looks_like_assignment_to("A", 'A'));
        assert!(!looks_like_assignment_to("B=1", 'A'));
        assert!(!looks_like_assignment_to("", 'A'));
    }
}
