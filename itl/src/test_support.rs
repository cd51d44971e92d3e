//! An in-memory [`Host`] used only by this crate's own unit tests,
//! implemented by hand rather than via `mockall::automock` since most of
//! these tests drive many calls across a scripted sequence rather than
//! asserting a handful of expectations.

use crate::host::Host;

#[derive(Default)]
pub(crate) struct StubHost {
    pub(crate) grid_w: i64,
    pub(crate) grid_h: i64,
    pub(crate) keys: Vec<i64>,
    pub(crate) lines: Vec<Vec<u8>>,
    pub(crate) output: Vec<u8>,
    pub(crate) interrupted: bool,
}

impl Host for StubHost {
    fn goto(&mut self, _x: i64, _y: i64) -> i64 {
        0
    }
    fn getch(&self) -> i64 {
        0
    }
    fn putch(&mut self, bytes: &[u8]) -> i64 {
        self.output.extend_from_slice(bytes);
        bytes.len() as i64
    }
    fn setfore(&mut self, _color: i64) -> i64 {
        0
    }
    fn setback(&mut self, _color: i64) -> i64 {
        0
    }
    fn setattr(&mut self, _attr: i64) -> i64 {
        0
    }
    fn width(&self) -> i64 {
        self.grid_w
    }
    fn height(&self) -> i64 {
        self.grid_h
    }
    fn clear_grid(&mut self) {}

    fn read_line(&mut self) -> Vec<u8> {
        if self.lines.is_empty() {
            Vec::new()
        } else {
            self.lines.remove(0)
        }
    }
    fn poll_key(&mut self) -> i64 {
        if self.keys.is_empty() {
            0
        } else {
            self.keys.remove(0)
        }
    }

    fn gopen(&mut self, _w: i64, _h: i64) -> i64 {
        0
    }
    fn gpen(&mut self, _r: i64, _g: i64, _b: i64) -> i64 {
        0
    }
    fn gbrush(&mut self, _r: i64, _g: i64, _b: i64) -> i64 {
        0
    }
    fn gclear(&mut self) {}
    fn gpixel(&mut self, _x: i64, _y: i64) -> i64 {
        0
    }
    fn gline(&mut self, _x0: i64, _y0: i64, _x1: i64, _y1: i64) -> i64 {
        0
    }
    fn grect(&mut self, _x: i64, _y: i64, _w: i64, _h: i64) -> i64 {
        0
    }
    fn gfillrect(&mut self, _x: i64, _y: i64, _w: i64, _h: i64) -> i64 {
        0
    }
    fn gcircle(&mut self, _x: i64, _y: i64, _r: i64) -> i64 {
        0
    }
    fn gfillcircle(&mut self, _x: i64, _y: i64, _r: i64) -> i64 {
        0
    }
    fn gtext(&mut self, _x: i64, _y: i64, _text: &[u8]) -> i64 {
        0
    }
    fn grefresh(&mut self) {}

    fn mouse_x(&self) -> i64 {
        0
    }
    fn mouse_y(&self) -> i64 {
        0
    }
    fn mouse_buttons(&self) -> i64 {
        0
    }
    fn mouse_click(&mut self) -> i64 {
        0
    }
    fn mouse_drag(&self) -> i64 {
        0
    }

    fn cell_mouse_x(&self) -> i64 {
        0
    }
    fn cell_mouse_y(&self) -> i64 {
        0
    }
    fn cell_mouse_click(&mut self) -> i64 {
        0
    }
    fn cell_mouse_drag(&self) -> i64 {
        0
    }

    fn time_secs(&self) -> i64 {
        0
    }
    fn ticks_ms(&self) -> i64 {
        0
    }
    fn elapsed_ms(&mut self) -> i64 {
        0
    }

    fn interrupted(&self) -> bool {
        self.interrupted
    }
}
