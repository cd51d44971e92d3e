//! The narrow capability set the engine consumes for terminal output,
//! keyboard polling, and screen/graphics/mouse/timer queries.
//!
//! The engine is generic over `Host` rather than tied to a concrete
//! terminal/graphics library, so a test can substitute a recording/mock
//! host while the binary crate supplies the real terminal plus a headless
//! graphics adapter.

/// Colors accepted by `setfore`/`setback`: `0..7`.
pub type Color = i64;

/// Attributes accepted by `setattr`: `0` = normal, `1` = bold, `2` = reverse.
pub type Attr = i64;

pub trait Host {
    // -- Terminal grid -----------------------------------------------
    /// Moves the cursor to 0-based `(x, y)`. Returns `0` on success, `-1`
    /// if out of range.
    fn goto(&mut self, x: i64, y: i64) -> i64;
    /// Returns the character code at the cursor, or `0` if none.
    fn getch(&self) -> i64;
    /// Writes bytes at the cursor, advancing it. Returns the count written.
    fn putch(&mut self, bytes: &[u8]) -> i64;
    fn setfore(&mut self, color: Color) -> i64;
    fn setback(&mut self, color: Color) -> i64;
    fn setattr(&mut self, attr: Attr) -> i64;
    fn width(&self) -> i64;
    fn height(&self) -> i64;
    fn clear_grid(&mut self);

    // -- Keyboard ------------------------------------------------------
    /// Blocking line read; returns the typed line without a trailing
    /// newline.
    fn read_line(&mut self) -> Vec<u8>;
    /// Non-blocking poll; returns the next queued key code, or `0` if
    /// empty.
    fn poll_key(&mut self) -> i64;

    // -- Pixel surface ---------------------------------------------------
    fn gopen(&mut self, w: i64, h: i64) -> i64;
    fn gpen(&mut self, r: i64, g: i64, b: i64) -> i64;
    fn gbrush(&mut self, r: i64, g: i64, b: i64) -> i64;
    fn gclear(&mut self);
    fn gpixel(&mut self, x: i64, y: i64) -> i64;
    fn gline(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) -> i64;
    fn grect(&mut self, x: i64, y: i64, w: i64, h: i64) -> i64;
    fn gfillrect(&mut self, x: i64, y: i64, w: i64, h: i64) -> i64;
    fn gcircle(&mut self, x: i64, y: i64, r: i64) -> i64;
    fn gfillcircle(&mut self, x: i64, y: i64, r: i64) -> i64;
    fn gtext(&mut self, x: i64, y: i64, text: &[u8]) -> i64;
    fn grefresh(&mut self);

    // -- Pointer (pixel coordinates) ------------------------------------
    fn mouse_x(&self) -> i64;
    fn mouse_y(&self) -> i64;
    fn mouse_buttons(&self) -> i64;
    /// One-shot: consumed on read.
    fn mouse_click(&mut self) -> i64;
    fn mouse_drag(&self) -> i64;

    // -- Cell pointer (character-cell coordinates) ----------------------
    fn cell_mouse_x(&self) -> i64;
    fn cell_mouse_y(&self) -> i64;
    fn cell_mouse_click(&mut self) -> i64;
    fn cell_mouse_drag(&self) -> i64;

    // -- Timer -----------------------------------------------------------
    fn time_secs(&self) -> i64;
    fn ticks_ms(&self) -> i64;
    /// Self-resetting: monotonic ms since the last call to this method.
    fn elapsed_ms(&mut self) -> i64;

    // -- Interrupt --------------------------------------------------------
    fn interrupted(&self) -> bool;

    /// Drains any pending host-side events (keyboard, mouse, signals) so
    /// that state the engine reads synchronously — `interrupted`, the cell
    /// pointer — reflects the latest host activity even on a segment that
    /// never calls `:`/`?`/a mouse builtin itself. Most hosts (and every
    /// test double) have nothing to pump and can rely on this default.
    fn pump(&mut self) {}
}
