//! A `mockall`-generated [`itl::Host`] double for this crate's own tests.
//! `itl`'s own test suite hand-rolls a stub (see its `test_support`)
//! because most of its tests drive long scripted sequences; here the tests
//! are a handful of call-count/argument assertions on the REPL/CLI glue, a
//! better fit for `mockall`'s expectation style.

#![cfg(test)]

use itl::Host;

mockall::mock! {
    pub RecordingHost {}

    impl Host for RecordingHost {
        fn goto(&mut self, x: i64, y: i64) -> i64;
        fn getch(&self) -> i64;
        fn putch(&mut self, bytes: &[u8]) -> i64;
        fn setfore(&mut self, color: i64) -> i64;
        fn setback(&mut self, color: i64) -> i64;
        fn setattr(&mut self, attr: i64) -> i64;
        fn width(&self) -> i64;
        fn height(&self) -> i64;
        fn clear_grid(&mut self);

        fn read_line(&mut self) -> Vec<u8>;
        fn poll_key(&mut self) -> i64;

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

        fn mouse_x(&self) -> i64;
        fn mouse_y(&self) -> i64;
        fn mouse_buttons(&self) -> i64;
        fn mouse_click(&mut self) -> i64;
        fn mouse_drag(&self) -> i64;

        fn cell_mouse_x(&self) -> i64;
        fn cell_mouse_y(&self) -> i64;
        fn cell_mouse_click(&mut self) -> i64;
        fn cell_mouse_drag(&self) -> i64;

        fn time_secs(&self) -> i64;
        fn ticks_ms(&self) -> i64;
        fn elapsed_ms(&mut self) -> i64;

        fn interrupted(&self) -> bool;
    }
}
