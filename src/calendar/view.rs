use super::coverage::{annotate, CalendarDay, PromotionRange};
use super::grid::{build_grid, ViewMode, DAYS_IN_WEEK};
use thiserror::Error;
use time::Date;

/// The calendar pane's derived state: the annotated grid for the reference
/// date and view mode, plus a cursor over its cells.  The grid is rebuilt
/// wholesale whenever the mode or the promotion ranges change.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarView {
    today: Date,
    reference: Date,
    mode: ViewMode,
    ranges: Vec<PromotionRange>,
    days: Vec<CalendarDay>,
    cursor: usize,
}

impl CalendarView {
    pub(crate) fn new(today: Date, reference: Date) -> CalendarView {
        let mut view = CalendarView {
            today,
            reference,
            mode: ViewMode::default(),
            ranges: Vec::new(),
            days: Vec::new(),
            cursor: 0,
        };
        view.rebuild(&[]);
        view
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    pub(crate) fn reference(&self) -> Date {
        self.reference
    }

    pub(crate) fn mode(&self) -> ViewMode {
        self.mode
    }

    pub(crate) fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub(crate) fn rows(&self) -> usize {
        self.days.len() / DAYS_IN_WEEK
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn cursor_day(&self) -> CalendarDay {
        self.days
            .get(self.cursor)
            .copied()
            .unwrap_or_else(CalendarDay::filler)
    }

    pub(crate) fn set_ranges(&mut self, ranges: Vec<PromotionRange>) {
        self.ranges = ranges;
        self.rebuild(&[self.cursor_day().date()]);
    }

    /// Switches between week and month views, keeping the cursor on the same
    /// date when that date is still shown, else on `fallback`
    pub(crate) fn toggle_mode(&mut self, fallback: Option<Date>) {
        let keep = self.cursor_day().date();
        self.mode = self.mode.toggled();
        self.rebuild(&[keep, fallback]);
    }

    pub(crate) fn move_left(&mut self) -> Result<(), OutOfGridError> {
        self.move_to(self.cursor.checked_sub(1))
    }

    pub(crate) fn move_right(&mut self) -> Result<(), OutOfGridError> {
        self.move_to(self.cursor.checked_add(1))
    }

    pub(crate) fn move_up(&mut self) -> Result<(), OutOfGridError> {
        self.move_to(self.cursor.checked_sub(DAYS_IN_WEEK))
    }

    pub(crate) fn move_down(&mut self) -> Result<(), OutOfGridError> {
        self.move_to(self.cursor.checked_add(DAYS_IN_WEEK))
    }

    fn move_to(&mut self, target: Option<usize>) -> Result<(), OutOfGridError> {
        match target {
            Some(i) if i < self.days.len() => {
                self.cursor = i;
                Ok(())
            }
            _ => Err(OutOfGridError),
        }
    }

    fn position(&self, date: Date) -> Option<usize> {
        self.days.iter().position(|d| d.date() == Some(date))
    }

    /// Recomputes the grid and puts the cursor on the first of `focus` that
    /// the new grid shows, else on today or the reference date
    fn rebuild(&mut self, focus: &[Option<Date>]) {
        let cells = build_grid(self.reference, self.mode);
        self.days = annotate(&cells, &self.ranges, self.today);
        self.cursor = focus
            .iter()
            .flatten()
            .chain([self.today, self.reference].iter())
            .find_map(|&d| self.position(d))
            .unwrap_or(0);
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("cursor would leave the calendar grid")]
pub(crate) struct OutOfGridError;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DisplayState;
    use time::macros::date;

    #[test]
    fn test_starts_on_today_in_week_view() {
        let view = CalendarView::new(date!(2024 - 03 - 15), date!(2024 - 03 - 15));
        assert_eq!(view.mode(), ViewMode::Week);
        assert_eq!(view.days().len(), 7);
        assert_eq!(view.rows(), 1);
        assert_eq!(view.cursor(), 4);
        assert_eq!(view.cursor_day().date(), Some(date!(2024 - 03 - 15)));
    }

    #[test]
    fn test_cursor_starts_on_reference_when_today_is_elsewhere() {
        let view = CalendarView::new(date!(2024 - 03 - 15), date!(2024 - 06 - 05));
        assert_eq!(view.cursor_day().date(), Some(date!(2024 - 06 - 05)));
        assert!(view.days().iter().all(|d| !d.is_today()));
    }

    #[test]
    fn test_toggle_keeps_cursor_date() {
        let mut view = CalendarView::new(date!(2024 - 03 - 15), date!(2024 - 03 - 15));
        view.move_left().unwrap();
        view.toggle_mode(None);
        assert_eq!(view.mode(), ViewMode::Month);
        assert_eq!(view.days().len(), 35);
        assert_eq!(view.rows(), 5);
        assert_eq!(view.cursor_day().date(), Some(date!(2024 - 03 - 14)));
        view.toggle_mode(None);
        assert_eq!(view.mode(), ViewMode::Week);
        assert_eq!(view.cursor_day().date(), Some(date!(2024 - 03 - 14)));
    }

    #[test]
    fn test_collapse_moves_cursor_to_fallback() {
        let mut view = CalendarView::new(date!(2024 - 03 - 15), date!(2024 - 03 - 15));
        view.toggle_mode(None);
        view.move_up().unwrap();
        view.move_up().unwrap();
        assert_eq!(view.cursor_day().date(), Some(date!(2024 - 03 - 01)));
        view.toggle_mode(Some(date!(2024 - 03 - 16)));
        assert_eq!(view.mode(), ViewMode::Week);
        assert_eq!(view.cursor_day().date(), Some(date!(2024 - 03 - 16)));
    }

    #[test]
    fn test_collapse_prefers_cursor_date_over_fallback() {
        let mut view = CalendarView::new(date!(2024 - 03 - 15), date!(2024 - 03 - 15));
        view.toggle_mode(None);
        view.move_left().unwrap();
        view.toggle_mode(Some(date!(2024 - 03 - 16)));
        assert_eq!(view.cursor_day().date(), Some(date!(2024 - 03 - 14)));
    }

    #[test]
    fn test_collapse_from_filler_uses_fallback() {
        let mut view = CalendarView::new(date!(2024 - 03 - 15), date!(2024 - 03 - 15));
        view.toggle_mode(None);
        view.move_up().unwrap();
        view.move_up().unwrap();
        view.move_left().unwrap();
        assert!(view.cursor_day().is_filler());
        view.toggle_mode(Some(date!(2024 - 03 - 12)));
        view.toggle_mode(Some(date!(2024 - 03 - 12)));
        assert_eq!(view.cursor_day().date(), Some(date!(2024 - 03 - 12)));
    }

    #[test]
    fn test_collapse_without_fallback_returns_to_today() {
        let mut view = CalendarView::new(date!(2024 - 03 - 15), date!(2024 - 03 - 15));
        view.toggle_mode(None);
        view.move_up().unwrap();
        view.move_up().unwrap();
        view.toggle_mode(None);
        assert_eq!(view.cursor_day().date(), Some(date!(2024 - 03 - 15)));
    }

    #[test]
    fn test_cursor_can_rest_on_filler() {
        let mut view = CalendarView::new(date!(2024 - 03 - 15), date!(2024 - 03 - 15));
        view.toggle_mode(None);
        // 2024-03-01 is in column 4 of the first row
        view.move_up().unwrap();
        view.move_up().unwrap();
        view.move_left().unwrap();
        assert!(view.cursor_day().is_filler());
    }

    #[test]
    fn test_cursor_stops_at_grid_edges() {
        let mut view = CalendarView::new(date!(2024 - 03 - 11), date!(2024 - 03 - 11));
        assert_eq!(view.cursor(), 0);
        assert_eq!(view.move_left(), Err(OutOfGridError));
        assert_eq!(view.move_up(), Err(OutOfGridError));
        assert_eq!(view.move_down(), Err(OutOfGridError));
        for _ in 0..6 {
            view.move_right().unwrap();
        }
        assert_eq!(view.move_right(), Err(OutOfGridError));
        assert_eq!(view.cursor_day().date(), Some(date!(2024 - 03 - 17)));
    }

    #[test]
    fn test_set_ranges_reannotates() {
        let mut view = CalendarView::new(date!(2024 - 03 - 15), date!(2024 - 03 - 15));
        assert!(view.days().iter().all(|d| !d.is_covered()));
        view.set_ranges(vec![PromotionRange::new(
            date!(2024 - 03 - 01),
            date!(2024 - 03 - 20),
        )]);
        let states = view.days().iter().map(|d| d.state()).collect::<Vec<_>>();
        assert_eq!(
            states,
            [
                DisplayState::CoveredExpired,
                DisplayState::CoveredExpired,
                DisplayState::CoveredExpired,
                DisplayState::CoveredExpired,
                DisplayState::CoveredActive,
                DisplayState::CoveredActive,
                DisplayState::CoveredActive,
            ]
        );
        assert_eq!(view.cursor_day().date(), Some(date!(2024 - 03 - 15)));
    }
}
