use crate::calendar::{Calendar, CalendarView, PromotionRange, MAIN_WIDTH};
use crate::fetch::{Fetcher, Loadable, Query, Reply};
use crate::help::Help;
use crate::promo::{ListView, Promotion, PromotionPane};
use crate::selection::Selection;
use crate::share::{open_url, share_link};
use crate::theme::BASE_STYLE;
use crossterm::event::{poll, read, KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::time::Duration;
use time::Date;

/// How long to wait for input before checking for fetched data
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub(crate) struct App {
    calendar: CalendarView,
    selection: Selection,
    ranges: Loadable<Vec<PromotionRange>>,
    list: ListView,
    fetcher: Fetcher,
    share_fallback: String,
    state: AppState,
}

impl App {
    /// Creates the app and starts fetching both the promotion ranges and the
    /// promotions for the initial selection
    pub(crate) fn new(calendar: CalendarView, fetcher: Fetcher, share_fallback: String) -> App {
        let mut app = App {
            calendar,
            selection: Selection::default(),
            ranges: Loadable::default(),
            list: ListView::new(),
            fetcher,
            share_fallback,
            state: AppState::Calendar,
        };
        app.load_ranges();
        app.grid_computed();
        app
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
            self.drain_replies();
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if !poll(POLL_INTERVAL)? {
            return Ok(());
        }
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    fn drain_replies(&mut self) {
        while let Some(reply) = self.fetcher.try_recv() {
            self.handle_reply(reply);
        }
    }

    fn handle_reply(&mut self, reply: Reply) {
        match reply.query {
            Query::All => {
                let ranges = reply
                    .result
                    .map(|promos| promos.iter().map(Promotion::range).collect::<Vec<_>>());
                if self.ranges.resolve(reply.ticket, ranges) {
                    if let Some(ranges) = self.ranges.ready() {
                        info!("Loaded {} promotion ranges", ranges.len());
                        self.calendar.set_ranges(ranges.clone());
                        debug!(
                            "{} of {} days shown are covered",
                            self.calendar.days().iter().filter(|d| d.is_covered()).count(),
                            self.calendar.days().iter().filter(|d| !d.is_filler()).count()
                        );
                    } else {
                        // Coverage from an earlier load is no longer current
                        self.calendar.set_ranges(Vec::new());
                    }
                    self.grid_computed();
                }
            }
            Query::ActiveOn(date) => {
                if self.list.resolve(reply.ticket, reply.result) {
                    debug!("Promotion list for {date} updated");
                }
            }
        }
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.calendar.move_left().is_ok(),
                KeyCode::Char('l') | KeyCode::Right => self.calendar.move_right().is_ok(),
                KeyCode::Char('k') | KeyCode::Up => self.calendar.move_up().is_ok(),
                KeyCode::Char('j') | KeyCode::Down => self.calendar.move_down().is_ok(),
                KeyCode::Enter | KeyCode::Char(' ') => self.choose_day(),
                KeyCode::Char('e') | KeyCode::Tab => {
                    self.calendar.toggle_mode(self.selection.date());
                    self.grid_computed();
                    true
                }
                KeyCode::Char('n') => self.list.focus_next(),
                KeyCode::Char('p') => self.list.focus_prev(),
                KeyCode::Char('f') => self.list.toggle_liked(),
                KeyCode::Char('r') => self.list.toggle_reminder(),
                KeyCode::Char('o') => open(self.open_target()),
                KeyCode::Char('s') => open(self.share_target()),
                KeyCode::Char('R') => {
                    self.reload();
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    /// Selects the day under the cursor.  Returns `false` on filler cells.
    fn choose_day(&mut self) -> bool {
        let day = self.calendar.cursor_day();
        if day.is_filler() {
            return false;
        }
        if let Some(date) = self.selection.on_day_chosen(&day) {
            self.load_list(date);
        }
        true
    }

    fn grid_computed(&mut self) {
        if let Some(date) = self.selection.on_grid_computed(self.calendar.today()) {
            self.load_list(date);
        }
    }

    fn load_ranges(&mut self) {
        let ticket = self.fetcher.submit(Query::All);
        self.ranges = Loadable::Loading(ticket);
    }

    fn load_list(&mut self, date: Date) {
        let ticket = self.fetcher.submit(Query::ActiveOn(date));
        self.list.request(date, ticket);
    }

    fn reload(&mut self) {
        info!("Reloading promotions");
        self.load_ranges();
        if let Some(date) = self.selection.date() {
            self.load_list(date);
        }
    }

    fn open_target(&self) -> Option<String> {
        self.list
            .focused()
            .map(|p| p.source_url.clone())
            .filter(|url| !url.is_empty())
    }

    fn share_target(&self) -> Option<String> {
        self.list
            .focused()
            .map(|p| share_link(p, &self.share_fallback))
    }
}

/// Returns `false` if there was nothing to open
fn open(url: Option<String>) -> bool {
    if let Some(url) = url {
        open_url(&url);
        true
    } else {
        false
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [column] = Layout::horizontal([MAIN_WIDTH.min(area.width)])
            .flex(Flex::Center)
            .areas(area);
        let [cal_area, list_area] = Layout::vertical([
            Constraint::Length(Calendar::height(self.calendar.rows())),
            Constraint::Min(0),
        ])
        .areas(column);
        Calendar::new(self.selection.date()).render(cal_area, buf, &mut self.calendar);
        PromotionPane.render(list_area, buf, &mut self.list);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}
