//! ITL — a minimalist, line-oriented interpreted language engine.
//!
//! This crate is the language engine only: it owns the value model, the
//! variable/array/RNG environment, the program store, the expression
//! evaluator, the statement executor, forward-reference resolution, and the
//! control driver that walks segments. It knows nothing about terminals,
//! files, or a REPL — those live on the other side of the [`Host`] trait,
//! implemented by the `itl-cli` binary crate.

mod block;
mod builtins;
mod cursor;
mod definitions;
mod engine;
mod env;
mod error;
mod eval;
mod exec;
mod forwardref;
mod host;
mod ops;
mod program;
mod runner;
mod splitter;
mod value;

#[cfg(test)]
mod test_support;

pub use definitions::EngineLimits;
pub use engine::{Engine, Notice};
pub use env::{Array, Variables};
pub use error::{Diagnostic, LoadError};
pub use host::{Attr, Color, Host};
pub use program::{LineCursor, Program};
pub use runner::{run, step, RunOutcome, StepOutcome};
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubHost;

    #[test]
    fn end_to_end_fibonacci_like_program() {
        let mut engine = Engine::new(StubHost::default());
        engine.load("A=0;B=1;C=A+B;A=B;B=C;#=(C<10)*3");
        let outcome = run(&mut engine);
        assert_eq!(outcome, RunOutcome::Terminated);
        assert!(engine.vars().get('C').to_number() >= 10.0);
    }

    #[test]
    fn repl_style_accumulation_runs_newly_appended_lines() {
        let mut engine = Engine::new(StubHost::default());
        let added = engine.append("A=1");
        for line in added {
            engine.set_cursor_line(line);
            step(&mut engine);
        }
        assert_eq!(engine.vars().get('A').to_number(), 1.0);

        let added = engine.append("B=A+1");
        for line in added {
            engine.set_cursor_line(line);
            step(&mut engine);
        }
        assert_eq!(engine.vars().get('B').to_number(), 2.0);
    }
}
