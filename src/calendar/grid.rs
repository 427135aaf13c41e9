use std::iter::successors;
use time::{Date, Duration};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Whether the grid shows the reference date's week or its whole month
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum ViewMode {
    #[default]
    Week,
    Month,
}

impl ViewMode {
    pub(crate) fn toggled(self) -> ViewMode {
        match self {
            ViewMode::Week => ViewMode::Month,
            ViewMode::Month => ViewMode::Week,
        }
    }

    pub(crate) fn is_expanded(self) -> bool {
        self == ViewMode::Month
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Cell {
    /// Padding that completes a grid row; never selectable
    Filler,
    Day(Date),
}

impl Cell {
    pub(crate) fn date(&self) -> Option<Date> {
        match self {
            Cell::Filler => None,
            Cell::Day(date) => Some(*date),
        }
    }

    /// Day of month, or 0 for filler cells
    pub(crate) fn day_number(&self) -> u8 {
        self.date().map_or(0, |d| d.day())
    }
}

/// Lays out the cells of a Monday-first, seven-column grid around
/// `reference`.  Week mode always yields exactly seven cells; month mode
/// yields a whole number of weeks.
pub(crate) fn build_grid(reference: Date, mode: ViewMode) -> Vec<Cell> {
    match mode {
        ViewMode::Week => week_cells(reference),
        ViewMode::Month => month_cells(reference),
    }
}

fn week_cells(reference: Date) -> Vec<Cell> {
    let lead = i64::from(reference.weekday().number_days_from_monday());
    (0..7i64)
        .map(|i| {
            // Only the first or last week of time can run off the end
            reference
                .checked_add(Duration::days(i - lead))
                .map_or(Cell::Filler, Cell::Day)
        })
        .collect()
}

fn month_cells(reference: Date) -> Vec<Cell> {
    let first = month_start(reference);
    let lead = usize::from(first.weekday().number_days_from_monday());
    let mut cells = vec![Cell::Filler; lead];
    cells.extend(iter_days_from(first).take_while(|d| d.month() == first.month()).map(Cell::Day));
    let total = cells.len().div_ceil(DAYS_IN_WEEK) * DAYS_IN_WEEK;
    cells.resize(total, Cell::Filler);
    cells
}

fn month_start(date: Date) -> Date {
    // Every month has a day 1, so this cannot fail
    date.replace_day(1).unwrap_or(date)
}

fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}
