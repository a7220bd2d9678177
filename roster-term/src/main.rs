//! Terminal host for the roster table engine.
//!
//! Keys: arrows/PgUp/PgDn/Home/End move, space toggles the focused row, `a`
//! toggles every row, `c` clears, `d` deletes the focused row, `r` drops
//! selections of deleted rows, `s`/`h`/`t` cycle the name/hours/department
//! sort, `l` and `e` flip the loading and empty states, `q` quits. The mouse
//! wheel scrolls; clicking a row opens it, clicking its gutter selects it, and
//! clicking a header cell sorts.

mod data;
mod terminal;

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::{
    cursor::MoveTo,
    event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use log::{debug, info, trace};
use roster::text::truncate_to_width;
use roster::{
    AggregateState, Frame, LineKind, ScrollRequest, TableConfig, VirtualizedTable,
    config::SELECTION_GUTTER,
};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::data::Attendance;
use crate::terminal::TerminalGuard;

const DEFAULT_ROWS: usize = 100_000;
const WHEEL_STEP: i64 = 3;
const TICK: Duration = Duration::from_millis(250);

fn main() -> io::Result<()> {
    let log_path = env::var("ROSTER_LOG").unwrap_or_else(|_| "roster.log".to_string());
    let log_file = File::create(&log_path)?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let rows = env::var("ROSTER_ROWS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_ROWS);
    info!("Starting roster-term with {} rows", rows);

    let mut term = TerminalGuard::new()?;
    let mut app = App::new(data::generate(rows), term.size()?)?;
    app.run(&mut term)
}

/// What the last batch of events requires before the next paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Redraw {
    None,
    /// Only selection indicators changed.
    Selection,
    Full,
}

struct App {
    data: Vec<Attendance>,
    table: VirtualizedTable<Attendance, u32>,
    frame: Frame<u32>,
    loading: bool,
    empty: bool,
    cursor: usize,
    status: Arc<Mutex<String>>,
    width: u16,
    height: u16,
}

impl App {
    fn new(data: Vec<Attendance>, (width, height): (u16, u16)) -> io::Result<Self> {
        let status = Arc::new(Mutex::new(String::from("Ready")));
        let click_status = Arc::clone(&status);
        let sort_status = Arc::clone(&status);

        let config = TableConfig::new(1)
            .viewport_height(body_height(height))
            .empty_message("No attendance records");
        let table = VirtualizedTable::new(
            config,
            data::columns(),
            table_width(width),
            |a: &Attendance, _| a.id,
        )
        .map_err(io::Error::other)?
        .on_click(move |a: &Attendance, index| {
            info!("Opened #{} at row {}", a.id, index);
            set_status(&click_status, format!("Opened #{} {} ({})", a.id, a.name, a.department));
        })
        .on_select(|a: &Attendance, index, selected| {
            trace!("Row {} (#{}) selected={}", index, a.id, selected);
        })
        .on_sort(move |sort| {
            let message = match sort {
                Some(sort) => format!("Sorted by {} {}", sort.key, sort.direction.indicator()),
                None => "Unsorted".to_string(),
            };
            set_status(&sort_status, message);
        });

        Ok(Self {
            data,
            table,
            frame: Frame::default(),
            loading: false,
            empty: false,
            cursor: 0,
            status,
            width,
            height,
        })
    }

    fn run(&mut self, term: &mut TerminalGuard) -> io::Result<()> {
        self.render();
        self.paint(term)?;

        loop {
            let events = term.poll(TICK)?;
            if events.is_empty() {
                continue;
            }

            let mut redraw = Redraw::None;
            for event in events {
                match self.handle_event(event) {
                    Some(r) => redraw = redraw.max(r),
                    None => return Ok(()),
                }
            }

            match redraw {
                Redraw::None => continue,
                Redraw::Selection => {
                    let data: &[Attendance] = if self.empty { &[] } else { &self.data };
                    let changed = self.table.refresh_selection(&mut self.frame, data);
                    trace!("Refreshed selection indicators on rows {:?}", changed);
                }
                Redraw::Full => self.render(),
            }
            self.paint(term)?;
        }
    }

    fn render(&mut self) {
        let data: &[Attendance] = if self.empty { &[] } else { &self.data };
        terminal::with_caught_panics(|| {
            self.table.render_into(data, self.loading, &mut self.frame);
        });
    }

    fn visible(&self) -> &[Attendance] {
        if self.empty { &[] } else { &self.data }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Returns `None` when the app should quit.
    fn handle_event(&mut self, event: Event) -> Option<Redraw> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => Some(self.handle_mouse(mouse)),
            Event::Resize(width, height) => {
                debug!("Resize to {}x{}", width, height);
                self.width = width;
                self.height = height;
                self.table.resize(body_height(height), table_width(width));
                Some(Redraw::Full)
            }
            _ => Some(Redraw::None),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Redraw> {
        let count = self.visible().len();
        let page = body_height(self.height) as usize;

        let redraw = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return None,
            KeyCode::Up => self.move_cursor(self.cursor.saturating_sub(1)),
            KeyCode::Down => self.move_cursor(self.cursor.saturating_add(1)),
            KeyCode::PageUp => {
                self.table.apply_scroll(ScrollRequest::PageUp, count);
                self.move_cursor(self.cursor.saturating_sub(page))
            }
            KeyCode::PageDown => {
                self.table.apply_scroll(ScrollRequest::PageDown, count);
                self.move_cursor(self.cursor.saturating_add(page))
            }
            KeyCode::Home => {
                self.table.apply_scroll(ScrollRequest::Home, count);
                self.move_cursor(0)
            }
            KeyCode::End => {
                self.table.apply_scroll(ScrollRequest::End, count);
                self.move_cursor(count.saturating_sub(1))
            }
            KeyCode::Char(' ') => {
                let data: &[Attendance] = if self.empty { &[] } else { &self.data };
                self.table.toggle_row(data, self.cursor);
                Redraw::Selection
            }
            KeyCode::Char('a') => {
                let data: &[Attendance] = if self.empty { &[] } else { &self.data };
                let delta = self.table.toggle_all(data);
                self.set_status(format!(
                    "Selected {} / deselected {}",
                    delta.added.len(),
                    delta.removed.len()
                ));
                Redraw::Selection
            }
            KeyCode::Char('c') => {
                let data: &[Attendance] = if self.empty { &[] } else { &self.data };
                let delta = self.table.clear_selection(data);
                self.set_status(format!("Cleared {} selections", delta.removed.len()));
                Redraw::Selection
            }
            KeyCode::Char('d') => self.delete_focused(),
            KeyCode::Char('r') => {
                let data: &[Attendance] = if self.empty { &[] } else { &self.data };
                let delta = self.table.reconcile_selection(data);
                self.set_status(format!("Dropped {} stale selections", delta.removed.len()));
                Redraw::Full
            }
            KeyCode::Char('s') => self.sort("name"),
            KeyCode::Char('h') => self.sort("hours"),
            KeyCode::Char('t') => self.sort("department"),
            KeyCode::Char('l') => {
                self.loading = !self.loading;
                Redraw::Full
            }
            KeyCode::Char('e') => {
                self.empty = !self.empty;
                Redraw::Full
            }
            _ => Redraw::None,
        };
        Some(redraw)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Redraw {
        let count = self.visible().len();
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.table.scroll_by(-WHEEL_STEP, count);
                Redraw::Full
            }
            MouseEventKind::ScrollDown => {
                self.table.scroll_by(WHEEL_STEP, count);
                Redraw::Full
            }
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
            _ => Redraw::None,
        }
    }

    fn click(&mut self, x: u16, y: u16) -> Redraw {
        let gutter = if self.table.is_selectable() {
            SELECTION_GUTTER
        } else {
            0
        };
        let data: &[Attendance] = if self.empty { &[] } else { &self.data };

        if y == 0 {
            if x < gutter {
                self.table.toggle_all(data);
                return Redraw::Selection;
            }
            let mut left = gutter;
            let key = self.table.layout().columns().iter().find_map(|col| {
                let right = left.saturating_add(col.width);
                let hit = (left..right).contains(&x);
                left = right;
                hit.then(|| col.key.clone())
            });
            return match key {
                Some(key) => self.sort(&key),
                None => Redraw::None,
            };
        }

        if !self.frame.state.is_populated() || u32::from(y) > body_height(self.height) {
            return Redraw::None;
        }
        let item_height = u64::from(self.table.config().item_height);
        let content_y = u64::from(self.table.scroll().offset) + u64::from(y - 1);
        let Ok(index) = usize::try_from(content_y / item_height) else {
            return Redraw::None;
        };
        if index >= data.len() {
            return Redraw::None;
        }

        if x < gutter {
            self.table.toggle_row(data, index);
            return Redraw::Selection;
        }
        self.cursor = index;
        self.table.click_row(data, index);
        Redraw::Full
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    fn move_cursor(&mut self, target: usize) -> Redraw {
        let count = self.visible().len();
        if count == 0 {
            return Redraw::None;
        }
        self.cursor = target.min(count - 1);
        self.table.scroll_into_view(self.cursor, count);
        Redraw::Full
    }

    /// Remove the focused record from the dataset. Its selection, if any, is
    /// left in place until reconciled.
    fn delete_focused(&mut self) -> Redraw {
        if self.empty || self.cursor >= self.data.len() {
            return Redraw::None;
        }
        let removed = self.data.remove(self.cursor);
        self.cursor = self.cursor.min(self.data.len().saturating_sub(1));
        self.set_status(format!("Deleted #{} {}", removed.id, removed.name));
        Redraw::Full
    }

    fn sort(&mut self, key: &str) -> Redraw {
        match self.table.toggle_sort(key).map(|sort| sort.cloned()) {
            Ok(sort) => {
                data::apply_sort(&mut self.data, sort.as_ref());
                Redraw::Full
            }
            Err(e) => {
                self.set_status(e.to_string());
                Redraw::Full
            }
        }
    }

    fn set_status(&self, message: String) {
        set_status(&self.status, message);
    }

    // -------------------------------------------------------------------------
    // Painting
    // -------------------------------------------------------------------------

    fn paint(&mut self, term: &mut TerminalGuard) -> io::Result<()> {
        let status = self.status_line();
        let width = table_width(self.width) as usize;
        let body_rows = body_height(self.height);
        let header_rows = u16::from(self.frame.header.is_some());
        let thumb = self
            .table
            .scroll()
            .thumb(u16::try_from(body_rows).unwrap_or(u16::MAX));
        let lines = self.frame.lines();
        let out = term.stdout();

        for (y, line) in lines.iter().enumerate() {
            let y = u16::try_from(y).unwrap_or(u16::MAX);
            queue!(out, MoveTo(0, y))?;
            match line.kind {
                LineKind::Header => {
                    queue!(out, SetAttribute(Attribute::Bold), SetAttribute(Attribute::Underlined))?
                }
                LineKind::Row { index, selected } => {
                    if index == self.cursor {
                        queue!(out, SetAttribute(Attribute::Reverse))?;
                    }
                    if selected == Some(true) {
                        queue!(out, SetForegroundColor(Color::Cyan))?;
                    }
                }
                LineKind::Fault { index } => {
                    if index == self.cursor {
                        queue!(out, SetAttribute(Attribute::Reverse))?;
                    }
                    queue!(out, SetForegroundColor(Color::Red))?;
                }
                LineKind::Skeleton => queue!(out, SetForegroundColor(Color::DarkGrey))?,
                LineKind::Message => queue!(out, SetForegroundColor(Color::Yellow))?,
            }
            queue!(
                out,
                Print(truncate_to_width(&line.text, width)),
                SetAttribute(Attribute::Reset),
                ResetColor,
                Clear(ClearType::UntilNewLine)
            )?;
        }
        let painted = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        for y in painted..self.height.saturating_sub(1) {
            queue!(out, MoveTo(0, y), Clear(ClearType::CurrentLine))?;
        }

        if let Some((start, len)) = thumb {
            for row in 0..u16::try_from(body_rows).unwrap_or(u16::MAX) {
                let glyph = if (start..start + len).contains(&row) {
                    '█'
                } else {
                    '│'
                };
                queue!(
                    out,
                    MoveTo(self.width.saturating_sub(1), header_rows + row),
                    SetForegroundColor(Color::DarkGrey),
                    Print(glyph),
                    ResetColor
                )?;
            }
        }

        queue!(
            out,
            MoveTo(0, self.height.saturating_sub(1)),
            SetAttribute(Attribute::Reverse),
            Print(truncate_to_width(&status, self.width as usize)),
            Clear(ClearType::UntilNewLine),
            SetAttribute(Attribute::Reset)
        )?;

        out.flush()
    }

    fn status_line(&mut self) -> String {
        let data: &[Attendance] = if self.empty { &[] } else { &self.data };
        let aggregate = match self.table.select_all_state(data) {
            AggregateState::None => "none",
            AggregateState::Some => "some",
            AggregateState::All => "all",
        };
        let stale = self.table.stale_count(data);
        let range = self.frame.range();
        let message = self
            .status
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default();
        format!(
            " {} rows | {} selected ({}) | {} stale | rows {}..{} | {} faults | {}",
            data.len(),
            self.table.selection().len(),
            aggregate,
            stale,
            range.start,
            range.end,
            self.frame.faults().count(),
            message
        )
    }
}

fn set_status(status: &Mutex<String>, message: String) {
    if let Ok(mut status) = status.lock() {
        *status = message;
    }
}

/// Body rows available below the header and above the status line.
fn body_height(height: u16) -> u32 {
    u32::from(height.saturating_sub(2))
}

/// Columns available to the table; the last column holds the scrollbar.
fn table_width(width: u16) -> u16 {
    width.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn left_click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_gutter_click_refreshes_selection_only() {
        let mut app = App::new(data::generate(50), (80, 12)).unwrap();
        app.render();

        assert_eq!(app.handle_mouse(left_click(1, 3)), Redraw::Selection);
        assert!(app.table.selection().is_selected(&2));
        assert_eq!(app.cursor, 0);

        assert_eq!(app.handle_mouse(left_click(20, 3)), Redraw::Full);
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_status_line_counts_stale_selection() {
        let mut app = App::new(data::generate(50), (120, 12)).unwrap();
        app.render();
        app.handle_mouse(left_click(1, 1));
        app.cursor = 0;
        app.delete_focused();

        let status = app.status_line();
        assert!(status.contains("49 rows"));
        assert!(status.contains("1 selected (none)"));
        assert!(status.contains("1 stale"));
    }
}
