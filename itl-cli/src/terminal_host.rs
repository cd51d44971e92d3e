//! The default [`itl::Host`] implementation: a real character-grid terminal
//! and non-blocking keyboard backed by `crossterm`, plus a headless (no-op,
//! logged) pixel surface, pointer and cell-pointer — the language engine
//! never draws pixels or tracks a mouse itself, but a complete binary still
//! has to answer every call in the host capability table, so it answers
//! "nothing to show" for those.

use std::io::{self, Write};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent};
use crossterm::style::{self, Attribute, Color as CColor};
use crossterm::terminal::{self, ClearType};
use crossterm::{execute, queue};

use itl::{Attr, Color, Host};

/// One-shot wall-clock source for `time()`; `Instant::now()` for `ticks()`
/// and the self-resetting `elapsed()`.
pub struct TerminalHost {
    width: i64,
    height: i64,
    cursor_x: i64,
    cursor_y: i64,
    grid: Vec<u8>,
    raw_mode: bool,
    start: Instant,
    last_elapsed: Instant,
    interrupted: bool,
    mouse_x: i64,
    mouse_y: i64,
    mouse_buttons: i64,
    mouse_click: i64,
    mouse_drag: i64,
    cell_mouse_x: i64,
    cell_mouse_y: i64,
    cell_mouse_click: i64,
    cell_mouse_drag: i64,
    gopen: bool,
}

impl TerminalHost {
    pub fn new() -> Self {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        let raw_mode = terminal::enable_raw_mode().is_ok();
        if raw_mode {
            let _ = execute!(io::stdout(), event::EnableMouseCapture);
        }
        let now = Instant::now();
        Self {
            width: w as i64,
            height: h as i64,
            cursor_x: 0,
            cursor_y: 0,
            grid: vec![0; (w as usize) * (h as usize)],
            raw_mode,
            start: now,
            last_elapsed: now,
            interrupted: false,
            mouse_x: 0,
            mouse_y: 0,
            mouse_buttons: 0,
            mouse_click: 0,
            mouse_drag: 0,
            cell_mouse_x: 0,
            cell_mouse_y: 0,
            cell_mouse_click: 0,
            cell_mouse_drag: 0,
            gopen: false,
        }
    }

    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn grid_index(&self, x: i64, y: i64) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    fn resize_grid_if_needed(&mut self) {
        let needed = (self.width.max(0) as usize) * (self.height.max(0) as usize);
        if self.grid.len() != needed {
            self.grid = vec![0; needed];
        }
    }

    /// Drains every pending crossterm event without blocking. Keyboard
    /// events update the cell-pointer and the interrupt flag (`Ctrl+C` is
    /// delivered as a keystroke rather than a signal while in raw mode);
    /// mouse events update both pointer families. Called from [`Host::pump`]
    /// and from [`Host::poll_key`], so the cell pointer reflects the latest
    /// keyboard activity even when nothing else reads it.
    fn drain_events(&mut self) -> Option<i64> {
        let mut first_key = None;
        while self.raw_mode && event::poll(std::time::Duration::from_secs(0)).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
                    {
                        self.interrupted = true;
                        continue;
                    }
                    let code = key_code_to_i64(key.code);
                    if first_key.is_none() && code != 0 {
                        first_key = Some(code);
                    }
                }
                Ok(Event::Mouse(mouse)) => self.apply_mouse_event(mouse),
                Ok(Event::Resize(w, h)) => {
                    self.width = w as i64;
                    self.height = h as i64;
                    self.resize_grid_if_needed();
                }
                Err(_) => break,
            }
        }
        first_key
    }

    fn apply_mouse_event(&mut self, mouse: MouseEvent) {
        let button_mask = |b: MouseButton| match b {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 4,
        };
        match mouse {
            MouseEvent::Down(button, x, y, _) => {
                self.mouse_x = x as i64;
                self.mouse_y = y as i64;
                self.mouse_buttons |= button_mask(button);
                self.mouse_click = button_mask(button);
                self.cell_mouse_x = x as i64;
                self.cell_mouse_y = y as i64;
                self.cell_mouse_click = button_mask(button);
            }
            MouseEvent::Up(button, x, y, _) => {
                self.mouse_x = x as i64;
                self.mouse_y = y as i64;
                self.mouse_buttons &= !button_mask(button);
                self.cell_mouse_x = x as i64;
                self.cell_mouse_y = y as i64;
            }
            MouseEvent::Drag(button, x, y, _) => {
                self.mouse_x = x as i64;
                self.mouse_y = y as i64;
                self.mouse_drag = button_mask(button);
                self.cell_mouse_x = x as i64;
                self.cell_mouse_y = y as i64;
                self.cell_mouse_drag = button_mask(button);
            }
            MouseEvent::ScrollDown(x, y, _) | MouseEvent::ScrollUp(x, y, _) => {
                self.mouse_x = x as i64;
                self.mouse_y = y as i64;
            }
        }
    }
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = execute!(io::stdout(), event::DisableMouseCapture);
            let _ = terminal::disable_raw_mode();
        }
    }
}

fn key_code_to_i64(code: KeyCode) -> i64 {
    match code {
        KeyCode::Char(c) => c as i64,
        KeyCode::Enter => 13,
        KeyCode::Tab => 9,
        KeyCode::Backspace => 8,
        KeyCode::Esc => 27,
        KeyCode::Left => 0x1_00,
        KeyCode::Right => 0x1_01,
        KeyCode::Up => 0x1_02,
        KeyCode::Down => 0x1_03,
        _ => 0,
    }
}

fn color_of(color: Color) -> Option<CColor> {
    match color {
        0 => Some(CColor::Black),
        1 => Some(CColor::DarkRed),
        2 => Some(CColor::DarkGreen),
        3 => Some(CColor::DarkYellow),
        4 => Some(CColor::DarkBlue),
        5 => Some(CColor::DarkMagenta),
        6 => Some(CColor::DarkCyan),
        7 => Some(CColor::Grey),
        _ => None,
    }
}

impl Host for TerminalHost {
    fn goto(&mut self, x: i64, y: i64) -> i64 {
        if !self.in_bounds(x, y) {
            return -1;
        }
        self.cursor_x = x;
        self.cursor_y = y;
        let _ = execute!(io::stdout(), cursor::MoveTo(x as u16, y as u16));
        0
    }

    fn getch(&self) -> i64 {
        match self.grid_index(self.cursor_x, self.cursor_y) {
            Some(i) => self.grid[i] as i64,
            None => 0,
        }
    }

    fn putch(&mut self, bytes: &[u8]) -> i64 {
        let mut out = io::stdout();
        for &b in bytes {
            if b == b'\n' {
                self.cursor_x = 0;
                self.cursor_y += 1;
                let _ = queue!(out, style::Print('\n'));
                continue;
            }
            if let Some(i) = self.grid_index(self.cursor_x, self.cursor_y) {
                self.grid[i] = b;
            }
            let _ = queue!(out, style::Print(b as char));
            self.cursor_x += 1;
            if self.cursor_x >= self.width {
                self.cursor_x = 0;
                self.cursor_y += 1;
            }
        }
        let _ = out.flush();
        bytes.len() as i64
    }

    fn setfore(&mut self, color: Color) -> i64 {
        match color_of(color) {
            Some(c) => {
                let _ = execute!(io::stdout(), style::SetForegroundColor(c));
                0
            }
            None => -1,
        }
    }

    fn setback(&mut self, color: Color) -> i64 {
        match color_of(color) {
            Some(c) => {
                let _ = execute!(io::stdout(), style::SetBackgroundColor(c));
                0
            }
            None => -1,
        }
    }

    fn setattr(&mut self, attr: Attr) -> i64 {
        let a = match attr {
            0 => Attribute::Reset,
            1 => Attribute::Bold,
            2 => Attribute::Reverse,
            _ => return -1,
        };
        let _ = execute!(io::stdout(), style::SetAttribute(a));
        0
    }

    fn width(&self) -> i64 {
        self.width
    }

    fn height(&self) -> i64 {
        self.height
    }

    fn clear_grid(&mut self) {
        self.grid.iter_mut().for_each(|b| *b = 0);
        self.cursor_x = 0;
        self.cursor_y = 0;
        let _ = execute!(
            io::stdout(),
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        );
    }

    fn read_line(&mut self) -> Vec<u8> {
        let mut line = Vec::new();
        if !self.raw_mode {
            let mut text = String::new();
            if io::stdin().read_line(&mut text).is_ok() {
                line = text.trim_end_matches(['\n', '\r']).as_bytes().to_vec();
            }
            return line;
        }
        loop {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
                    {
                        self.interrupted = true;
                        return Vec::new();
                    }
                    match key.code {
                        KeyCode::Enter => {
                            let _ = self.putch(b"\n");
                            break;
                        }
                        KeyCode::Backspace => {
                            if line.pop().is_some() {
                                let _ = execute!(
                                    io::stdout(),
                                    cursor::MoveLeft(1),
                                    style::Print(' '),
                                    cursor::MoveLeft(1)
                                );
                            }
                        }
                        KeyCode::Char(c) => {
                            let mut buf = [0u8; 4];
                            let bytes = c.encode_utf8(&mut buf).as_bytes();
                            line.extend_from_slice(bytes);
                            let _ = self.putch(bytes);
                        }
                        _ => {}
                    }
                }
                Ok(Event::Mouse(mouse)) => self.apply_mouse_event(mouse),
                Ok(Event::Resize(w, h)) => {
                    self.width = w as i64;
                    self.height = h as i64;
                    self.resize_grid_if_needed();
                }
                Err(_) => break,
            }
        }
        line
    }

    fn poll_key(&mut self) -> i64 {
        self.drain_events().unwrap_or(0)
    }

    fn gopen(&mut self, w: i64, h: i64) -> i64 {
        if w <= 0 || h <= 0 {
            return -1;
        }
        log::debug!("gopen({w}, {h}) — no pixel surface in this build, recorded only");
        self.gopen = true;
        0
    }
    fn gpen(&mut self, r: i64, g: i64, b: i64) -> i64 {
        log::debug!("gpen({r}, {g}, {b})");
        0
    }
    fn gbrush(&mut self, r: i64, g: i64, b: i64) -> i64 {
        log::debug!("gbr({r}, {g}, {b})");
        0
    }
    fn gclear(&mut self) {
        log::debug!("gclear()");
    }
    fn gpixel(&mut self, x: i64, y: i64) -> i64 {
        log::debug!("gpixel({x}, {y})");
        if self.gopen {
            0
        } else {
            -1
        }
    }
    fn gline(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) -> i64 {
        log::debug!("gline({x0}, {y0}, {x1}, {y1})");
        0
    }
    fn grect(&mut self, x: i64, y: i64, w: i64, h: i64) -> i64 {
        log::debug!("grect({x}, {y}, {w}, {h})");
        0
    }
    fn gfillrect(&mut self, x: i64, y: i64, w: i64, h: i64) -> i64 {
        log::debug!("gfillrect({x}, {y}, {w}, {h})");
        0
    }
    fn gcircle(&mut self, x: i64, y: i64, r: i64) -> i64 {
        log::debug!("gcircle({x}, {y}, {r})");
        0
    }
    fn gfillcircle(&mut self, x: i64, y: i64, r: i64) -> i64 {
        log::debug!("gfillcircle({x}, {y}, {r})");
        0
    }
    fn gtext(&mut self, x: i64, y: i64, text: &[u8]) -> i64 {
        log::debug!("gtext({x}, {y}, {:?})", String::from_utf8_lossy(text));
        0
    }
    fn grefresh(&mut self) {
        log::debug!("grefresh()");
    }

    fn mouse_x(&self) -> i64 {
        self.mouse_x
    }
    fn mouse_y(&self) -> i64 {
        self.mouse_y
    }
    fn mouse_buttons(&self) -> i64 {
        self.mouse_buttons
    }
    fn mouse_click(&mut self) -> i64 {
        std::mem::take(&mut self.mouse_click)
    }
    fn mouse_drag(&self) -> i64 {
        self.mouse_drag
    }

    fn cell_mouse_x(&self) -> i64 {
        self.cell_mouse_x
    }
    fn cell_mouse_y(&self) -> i64 {
        self.cell_mouse_y
    }
    fn cell_mouse_click(&mut self) -> i64 {
        std::mem::take(&mut self.cell_mouse_click)
    }
    fn cell_mouse_drag(&self) -> i64 {
        self.cell_mouse_drag
    }

    fn time_secs(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
    fn ticks_ms(&self) -> i64 {
        self.start.elapsed().as_millis() as i64
    }
    fn elapsed_ms(&mut self) -> i64 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_elapsed).as_millis() as i64;
        self.last_elapsed = now;
        delta
    }

    fn interrupted(&self) -> bool {
        self.interrupted
    }

    fn pump(&mut self) {
        self.drain_events();
    }
}
