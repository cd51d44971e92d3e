//! The engine: owns the variable environment, the program store, the line
//! cursor, and the host handle, and ties them together in a single owning
//! struct rather than a public/internal handle split, since nothing here
//! needs to cross a thread boundary.

use crate::definitions::EngineLimits;
use crate::env::{Array, Rng, Variables};
use crate::error::Diagnostic;
use crate::forwardref;
use crate::host::Host;
use crate::program::{LineCursor, Program};
use crate::value::Value;

/// Emitted whenever a variable or array cell is written, so a host (the
/// REPL, specifically) can echo it without the engine knowing anything
/// about prompts or formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    VarAssigned { letter: char, value: Value },
    ArrayAssigned { index: i64, value: f64 },
}

pub struct Engine<H: Host> {
    pub(crate) vars: Variables,
    pub(crate) array: Array,
    pub(crate) rng: Rng,
    pub(crate) program: Program,
    pub(crate) cursor: LineCursor,
    pub(crate) host: H,
    pub(crate) limits: EngineLimits,
    pub(crate) forward_ref_active: bool,
    pub(crate) last_was_newline: bool,
    pub(crate) paren_depth: u32,
    notices: Vec<Notice>,
}

impl<H: Host> Engine<H> {
    pub fn new(host: H) -> Self {
        Self::with_limits(host, EngineLimits::default())
    }

    pub fn with_limits(host: H, limits: EngineLimits) -> Self {
        Self {
            vars: Variables::new(),
            array: Array::new(limits.array_cap),
            rng: Rng::from_entropy(),
            program: Program::new(),
            cursor: LineCursor::start(),
            host,
            limits,
            forward_ref_active: false,
            last_was_newline: true,
            paren_depth: 0,
            notices: Vec::new(),
        }
    }

    /// Seeds the RNG deterministically — used by the CLI's `--seed` flag.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = Rng::from_seed(seed);
    }

    /// Replaces the program store wholesale and resets the cursor to line 1
    /// (file-mode load).
    pub fn load(&mut self, source: &str) {
        self.program.load(source);
        self.cursor = LineCursor::start();
    }

    /// Appends more source text to the store without disturbing the cursor
    /// (REPL-mode accumulation). Returns the 1-based range of newly added
    /// line numbers so the caller can drive them.
    pub fn append(&mut self, source: &str) -> std::ops::RangeInclusive<i64> {
        let start = self.program.len() as i64 + 1;
        self.program.append(source);
        let end = self.program.len() as i64;
        start..=end
    }

    /// `:reset` — clears variables, the array, the program store, and
    /// rewinds the cursor.
    pub fn reset(&mut self) {
        self.vars.clear_all();
        self.array.clear();
        self.program.clear();
        self.cursor = LineCursor::start();
        self.notices.clear();
    }

    /// `:clear` — clears variables and the array, keeps the program store
    /// and cursor position.
    pub fn clear_state(&mut self) {
        self.vars.clear_all();
        self.array.clear();
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn vars(&self) -> &Variables {
        &self.vars
    }

    pub fn array(&self) -> &Array {
        &self.array
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn cursor_line(&self) -> i64 {
        self.cursor.0
    }

    pub fn set_cursor_line(&mut self, line: i64) {
        self.cursor.jump_to(line);
    }

    pub fn is_terminated(&self) -> bool {
        !self.cursor.is_in_bounds(self.program.len())
    }

    /// Whether the last byte written by a print statement was a newline —
    /// the REPL uses this to decide whether its next prompt needs a
    /// leading newline of its own.
    pub fn last_was_newline(&self) -> bool {
        self.last_was_newline
    }

    /// Drains the notices accumulated since the last call — the REPL polls
    /// this after each step to print assignment echoes; file mode ignores
    /// it entirely.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Reads a variable, resolving a forward reference if it is currently
    /// undefined.
    pub(crate) fn read_var(&mut self, letter: char) -> Value {
        let current = self.vars.get(letter).clone();
        if !current.is_undefined() {
            return current;
        }
        forwardref::resolve(self, letter)
    }

    /// Writes a variable, capping string values at `limits.string_cap` and
    /// recording a [`Notice`].
    pub(crate) fn write_var(&mut self, letter: char, value: Value) {
        let value = self.cap_string(value);
        self.vars.set(letter, value.clone());
        self.notices.push(Notice::VarAssigned { letter, value });
    }

    /// Writes an array cell, recording a [`Notice`] and emitting a
    /// diagnostic if the cap was hit.
    pub(crate) fn write_array(&mut self, index: i64, value: f64) {
        if let Some(diag) = self.array.set(index, value) {
            diag.emit();
        }
        self.notices.push(Notice::ArrayAssigned { index, value });
    }

    fn cap_string(&self, value: Value) -> Value {
        if let Value::String(bytes) = &value {
            if bytes.len() > self.limits.string_cap {
                Diagnostic::StringCapExceeded {
                    cap: self.limits.string_cap,
                }
                .emit();
                let mut truncated = bytes.clone();
                truncated.truncate(self.limits.string_cap);
                return Value::String(truncated);
            }
        }
        value
    }
}
