//! The control driver: walks the program store from the
//! cursor, re-reading it after each segment so a jump (`#=...`) takes
//! effect instead of being overwritten by auto-advance.

use crate::exec;
use crate::host::Host;
use crate::Engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Executed,
    Terminated,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Terminated,
    Interrupted,
}

/// Runs exactly one segment at the current cursor, then advances the
/// cursor unless the segment itself moved it (a jump).
pub fn step<H: Host>(engine: &mut Engine<H>) -> StepOutcome {
    if engine.host().interrupted() {
        return StepOutcome::Interrupted;
    }
    if engine.is_terminated() {
        return StepOutcome::Terminated;
    }

    let line = engine.cursor_line();
    let segment = engine.program().get(line).unwrap_or("").to_string();
    let before = engine.cursor_line();

    exec::execute_segment(engine, &segment);

    if engine.cursor_line() == before {
        engine.set_cursor_line(before + 1);
    }
    StepOutcome::Executed
}

/// Runs to completion: until the cursor leaves the program's bounds or the
/// host reports an interrupt.
pub fn run<H: Host>(engine: &mut Engine<H>) -> RunOutcome {
    loop {
        match step(engine) {
            StepOutcome::Executed => continue,
            StepOutcome::Terminated => return RunOutcome::Terminated,
            StepOutcome::Interrupted => return RunOutcome::Interrupted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubHost;
    use crate::value::Value;

    #[test]
    fn runs_straight_line_program_to_completion() {
        let mut engine = Engine::new(StubHost::default());
        engine.load("A=1;B=2;C=A+B");
        assert_eq!(run(&mut engine), RunOutcome::Terminated);
        assert_eq!(*engine.vars().get('C'), Value::Number(3.0));
    }

    #[test]
    fn jump_redirects_the_next_step() {
        let mut engine = Engine::new(StubHost::default());
        engine.load("#=3;A=99;A=1");
        assert_eq!(run(&mut engine), RunOutcome::Terminated);
        assert_eq!(*engine.vars().get('A'), Value::Number(1.0));
    }

    #[test]
    fn interrupt_stops_the_run() {
        let mut host = StubHost::default();
        host.interrupted = true;
        let mut engine = Engine::new(host);
        engine.load("A=1");
        assert_eq!(run(&mut engine), RunOutcome::Interrupted);
        assert!(engine.vars().get('A').is_undefined());
    }

    #[test]
    fn conditional_backward_jump_loops_then_falls_off() {
        let mut engine = Engine::new(StubHost::default());
        // Counts A up to 3, looping back to line 2 while A<3; the jump
        // target collapses to 0 (out of bounds) once the loop exits.
        engine.load("A=0;A=A+1;#=2*(A<3)");
        assert_eq!(run(&mut engine), RunOutcome::Terminated);
        assert_eq!(*engine.vars().get('A'), Value::Number(3.0));
    }
}
