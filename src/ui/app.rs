use crate::store::{QueryPhase, QueryState};
use crate::ui::binder::QueryBinder;
use std::cell::Cell;
use std::sync::Arc;

/// Lines moved by PageUp / PageDown.
pub const PAGE_SCROLL: u16 = 10;

pub struct App {
    should_quit: bool,
    binder: QueryBinder,
    /// Question being edited. Kept after submit so it can be refined.
    input: String,
    /// Cursor position in chars, not bytes.
    cursor: usize,
    scroll: u16,
    /// Upper bound for `scroll`, refreshed on every draw.
    scroll_limit: Cell<u16>,
    spinner_frame: usize,
}

impl App {
    pub fn new(binder: QueryBinder) -> Self {
        Self {
            should_quit: false,
            binder,
            input: String::new(),
            cursor: 0,
            scroll: 0,
            scroll_limit: Cell::new(u16::MAX),
            spinner_frame: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn binder_mut(&mut self) -> &mut QueryBinder {
        &mut self.binder
    }

    pub fn state(&self) -> Arc<QueryState> {
        self.binder.state()
    }

    pub fn phase(&self) -> QueryPhase {
        self.binder.phase()
    }

    pub fn is_loading(&self) -> bool {
        self.binder.state().loading
    }

    // -- question editing --------------------------------------------------

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The question is read-only while a request is in flight.
    fn locked(&self) -> bool {
        self.is_loading()
    }

    pub fn insert_char(&mut self, ch: char) {
        if self.locked() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.input.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert pasted text. Line breaks become spaces; the question is one line.
    pub fn on_paste(&mut self, text: &str) {
        if self.locked() {
            return;
        }
        for ch in text.chars() {
            match ch {
                '\r' => {}
                '\n' | '\t' => self.insert_char(' '),
                ch if ch.is_control() => {}
                ch => self.insert_char(ch),
            }
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 || self.locked() {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.input.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.input.chars().count() || self.locked() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.input.remove(at);
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.chars().count());
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    pub fn clear_input(&mut self) {
        if self.locked() {
            return;
        }
        self.input.clear();
        self.cursor = 0;
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len())
    }

    // -- query actions -----------------------------------------------------

    /// Submit the current question. Ignored while a request is in flight.
    pub fn submit(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        let submitted = self.binder.trigger_submit(&self.input);
        if submitted {
            self.scroll = 0;
            self.spinner_frame = 0;
        }
        submitted
    }

    pub fn clear(&mut self) {
        self.binder.trigger_clear();
        self.scroll = 0;
    }

    // -- answer scrolling --------------------------------------------------

    pub fn scroll(&self) -> u16 {
        self.scroll.min(self.scroll_limit.get())
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll().saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll().saturating_add(lines).min(self.scroll_limit.get());
    }

    /// Called by the renderer once it knows how tall the answer is.
    pub fn set_scroll_limit(&self, limit: u16) {
        self.scroll_limit.set(limit);
    }

    // -- ticks -------------------------------------------------------------

    pub fn on_tick(&mut self) {
        if self.is_loading() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }
}
