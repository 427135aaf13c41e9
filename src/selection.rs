use crate::calendar::CalendarDay;
use time::Date;

/// The day whose promotions are listed.  Only one day is selected at a time,
/// and switching between week and month views never changes it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Selection {
    #[default]
    Unset,
    Set(Date),
}

impl Selection {
    pub(crate) fn date(&self) -> Option<Date> {
        match self {
            Selection::Unset => None,
            Selection::Set(date) => Some(*date),
        }
    }

    /// To be called after each grid computation.  Selects `today` if nothing
    /// has been selected yet, returning the new selection for the promotion
    /// list to follow.
    pub(crate) fn on_grid_computed(&mut self, today: Date) -> Option<Date> {
        match self {
            Selection::Unset => {
                *self = Selection::Set(today);
                Some(today)
            }
            Selection::Set(_) => None,
        }
    }

    /// Handles the user choosing a grid cell.  Filler cells are ignored.
    /// Returns the new selection if it changed.
    pub(crate) fn on_day_chosen(&mut self, day: &CalendarDay) -> Option<Date> {
        let date = day.date()?;
        if self.date() == Some(date) {
            return None;
        }
        *self = Selection::Set(date);
        Some(date)
    }
}
