use super::grid::Cell;
use time::Date;

/// Inclusive span of dates during which a promotion runs.  A range whose
/// start falls after its end covers nothing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct PromotionRange {
    start: Date,
    end: Date,
}

impl PromotionRange {
    pub(crate) fn new(start: Date, end: Date) -> PromotionRange {
        PromotionRange { start, end }
    }

    pub(crate) fn start(&self) -> Date {
        self.start
    }

    pub(crate) fn end(&self) -> Date {
        self.end
    }

    pub(crate) fn covers(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum DisplayState {
    /// Covered by a promotion, today or later
    CoveredActive,
    /// Covered by a promotion, strictly before today
    CoveredExpired,
    Uncovered,
}

impl DisplayState {
    pub(crate) fn for_date(date: Date, covered: bool, today: Date) -> DisplayState {
        match (covered, date < today) {
            (true, false) => DisplayState::CoveredActive,
            (true, true) => DisplayState::CoveredExpired,
            (false, _) => DisplayState::Uncovered,
        }
    }
}

/// A grid cell annotated with its promotion coverage
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct CalendarDay {
    cell: Cell,
    is_today: bool,
    is_covered: bool,
    state: DisplayState,
}

impl CalendarDay {
    pub(crate) fn filler() -> CalendarDay {
        CalendarDay {
            cell: Cell::Filler,
            is_today: false,
            is_covered: false,
            state: DisplayState::Uncovered,
        }
    }

    pub(crate) fn date(&self) -> Option<Date> {
        self.cell.date()
    }

    pub(crate) fn day_number(&self) -> u8 {
        self.cell.day_number()
    }

    pub(crate) fn is_filler(&self) -> bool {
        self.cell == Cell::Filler
    }

    pub(crate) fn is_today(&self) -> bool {
        self.is_today
    }

    pub(crate) fn is_covered(&self) -> bool {
        self.is_covered
    }

    pub(crate) fn state(&self) -> DisplayState {
        self.state
    }
}

pub(crate) fn is_covered(date: Date, ranges: &[PromotionRange]) -> bool {
    ranges.iter().any(|r| r.covers(date))
}

pub(crate) fn annotate_cell(cell: Cell, ranges: &[PromotionRange], today: Date) -> CalendarDay {
    let Some(date) = cell.date() else {
        return CalendarDay::filler();
    };
    let is_covered = is_covered(date, ranges);
    CalendarDay {
        cell,
        is_today: date == today,
        is_covered,
        state: DisplayState::for_date(date, is_covered, today),
    }
}

pub(crate) fn annotate(cells: &[Cell], ranges: &[PromotionRange], today: Date) -> Vec<CalendarDay> {
    cells
        .iter()
        .map(|&c| annotate_cell(c, ranges, today))
        .collect()
}
