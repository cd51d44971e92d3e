//! Diagnostic kinds. These never unwind execution — they are
//! logged via the `log` facade and the offending operation falls back to
//! its documented default (`0`, undefined, or a no-op).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Diagnostic {
    #[error("unknown builtin '{0}'")]
    UnknownBuiltin(String),
    #[error("division by zero")]
    DivideByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("malformed primary at byte offset {0}")]
    MalformedPrimary(usize),
    #[error("stack overflow in paren-block nesting")]
    NestingTooDeep,
    #[error("array index clamped to the implementation cap {cap}")]
    ArrayCapExceeded { cap: usize },
    #[error("string value truncated to the implementation cap {cap}")]
    StringCapExceeded { cap: usize },
}

impl Diagnostic {
    /// Logs the diagnostic at `warn` level, matching the ambient logging
    /// conventions of the crate.
    pub fn emit(self) {
        log::warn!("{}", self);
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open source: {0}")]
    Io(#[from] std::io::Error),
}
