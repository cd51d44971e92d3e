//! The program store: an ordered, 1-based list of segments, and the line
//! cursor that walks it.

use crate::splitter;

/// An ordered list of segments. Indexing is 1-based in the public API to
/// match the `#` variable's semantics; blank segments are retained and
/// execute as no-ops.
#[derive(Debug, Clone, Default)]
pub struct Program {
    segments: Vec<String>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a full source text, replacing the store entirely.
    pub fn load(&mut self, source: &str) {
        self.segments = splitter::split(source);
    }

    /// Accumulates more source text (REPL mode): the new text is segmented
    /// on its own and appended.
    pub fn append(&mut self, source: &str) {
        self.segments.extend(splitter::split(source));
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segment at 1-based `line`, or `None` if out of range.
    pub fn get(&self, line: i64) -> Option<&str> {
        if line < 1 {
            return None;
        }
        self.segments.get((line - 1) as usize).map(|s| s.as_str())
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

/// The 1-based line cursor — the value of the implicit `#` variable. A
/// program terminates once the cursor leaves `[1, N]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCursor(pub i64);

impl LineCursor {
    pub fn start() -> Self {
        LineCursor(1)
    }

    pub fn is_in_bounds(&self, program_len: usize) -> bool {
        self.0 >= 1 && self.0 <= program_len as i64
    }

    pub fn advance(&mut self) {
        self.0 += 1;
    }

    pub fn jump_to(&mut self, target: i64) {
        self.0 = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_replaces_store() {
        let mut p = Program::new();
        p.load("A=1;B=2");
        assert_eq!(p.len(), 2);
        p.load("C=3");
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn cursor_bounds_terminate_program() {
        let cursor = LineCursor(0);
        assert!(!cursor.is_in_bounds(5));
        let cursor = LineCursor(6);
        assert!(!cursor.is_in_bounds(5));
        let cursor = LineCursor(5);
        assert!(cursor.is_in_bounds(5));
    }
}
