use super::Promotion;
use crate::fetch::{Loadable, Ticket};
use crate::source::SourceError;
use std::collections::HashMap;
use time::Date;

/// Keeps the promotions running on `date`, preserving their order
pub(crate) fn active_on(mut promotions: Vec<Promotion>, date: Date) -> Vec<Promotion> {
    promotions.retain(|p| p.covers(date));
    promotions
}

/// Per-promotion toggles set from the list.  They live only as long as the
/// app and have no effect on which promotions are listed.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct ItemMarks {
    pub(crate) liked: bool,
    pub(crate) reminder: bool,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Marks(HashMap<String, ItemMarks>);

impl Marks {
    pub(crate) fn get(&self, id: &str) -> ItemMarks {
        self.0.get(id).copied().unwrap_or_default()
    }

    /// Returns the new state of the flag
    pub(crate) fn toggle_liked(&mut self, id: &str) -> bool {
        let marks = self.0.entry(id.to_owned()).or_default();
        marks.liked = !marks.liked;
        marks.liked
    }

    /// Returns the new state of the flag
    pub(crate) fn toggle_reminder(&mut self, id: &str) -> bool {
        let marks = self.0.entry(id.to_owned()).or_default();
        marks.reminder = !marks.reminder;
        marks.reminder
    }
}

/// State of the promotion list pane: the promotions running on the selected
/// date, a cursor over them, and the user's marks
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ListView {
    date: Option<Date>,
    promotions: Loadable<Vec<Promotion>>,
    cursor: usize,
    marks: Marks,
}

impl ListView {
    pub(crate) fn new() -> ListView {
        ListView::default()
    }

    pub(crate) fn promotions(&self) -> &Loadable<Vec<Promotion>> {
        &self.promotions
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn marks(&self) -> &Marks {
        &self.marks
    }

    /// Starts waiting for the promotions of `date`, dropping whatever was
    /// listed before.  The cursor is kept when `date` is already the listed
    /// date.
    pub(crate) fn request(&mut self, date: Date, ticket: Ticket) {
        if self.date != Some(date) {
            self.cursor = 0;
        }
        self.date = Some(date);
        self.promotions = Loadable::Loading(ticket);
    }

    /// Returns `false` if the reply was stale and ignored
    pub(crate) fn resolve(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Promotion>, SourceError>,
    ) -> bool {
        let Some(date) = self.date else {
            return false;
        };
        let applied = self
            .promotions
            .resolve(ticket, result.map(|promos| active_on(promos, date)));
        if let Some(promos) = self.promotions.ready() {
            self.cursor = self.cursor.min(promos.len().saturating_sub(1));
        }
        applied
    }

    pub(crate) fn focused(&self) -> Option<&Promotion> {
        self.promotions.ready()?.get(self.cursor)
    }

    pub(crate) fn focus_next(&mut self) -> bool {
        let len = self.promotions.ready().map_or(0, Vec::len);
        if self.cursor + 1 < len {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn focus_prev(&mut self) -> bool {
        if self.focused().is_some() && self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Returns `false` if no promotion is focused
    pub(crate) fn toggle_liked(&mut self) -> bool {
        let Some(id) = self.focused().map(|p| p.id.clone()) else {
            return false;
        };
        self.marks.toggle_liked(&id);
        true
    }

    /// Returns `false` if no promotion is focused
    pub(crate) fn toggle_reminder(&mut self) -> bool {
        let Some(id) = self.focused().map(|p| p.id.clone()) else {
            return false;
        };
        self.marks.toggle_reminder(&id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promo::sample;
    use crate::source::{PromotionSource, StaticSource};
    use time::macros::date;

    fn promos() -> Vec<Promotion> {
        vec![
            sample("a", date!(2024 - 03 - 01), date!(2024 - 03 - 20)),
            sample("b", date!(2024 - 03 - 14), date!(2024 - 03 - 14)),
            sample("c", date!(2024 - 03 - 15), date!(2024 - 03 - 31)),
            sample("d", date!(2024 - 03 - 10), date!(2024 - 03 - 01)),
        ]
    }

    fn ids(promos: &[Promotion]) -> Vec<&str> {
        promos.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_active_on() {
        assert_eq!(ids(&active_on(promos(), date!(2024 - 03 - 14))), ["a", "b"]);
        assert_eq!(ids(&active_on(promos(), date!(2024 - 03 - 15))), ["a", "c"]);
        assert_eq!(ids(&active_on(promos(), date!(2024 - 03 - 05))), ["a"]);
        assert!(active_on(promos(), date!(2024 - 04 - 01)).is_empty());
        assert!(active_on(Vec::new(), date!(2024 - 03 - 14)).is_empty());
    }

    #[test]
    fn test_marks() {
        let mut marks = Marks::default();
        assert_eq!(marks.get("a"), ItemMarks::default());
        assert!(marks.toggle_liked("a"));
        assert!(marks.toggle_reminder("b"));
        assert_eq!(
            marks.get("a"),
            ItemMarks {
                liked: true,
                reminder: false
            }
        );
        assert!(!marks.toggle_liked("a"));
        assert_eq!(marks.get("a"), ItemMarks::default());
        assert!(marks.get("b").reminder);
    }

    #[test]
    fn test_list_follows_selected_date() {
        let source = StaticSource(promos());
        let mut list = ListView::new();
        assert!(list.promotions().is_pending());
        list.request(date!(2024 - 03 - 14), Ticket(1));
        // A source that ignores the date is still filtered
        assert!(list.resolve(Ticket(1), source.fetch_all()));
        assert_eq!(ids(list.promotions().ready().unwrap()), ["a", "b"]);
        assert_eq!(list.focused().map(|p| p.id.as_str()), Some("a"));
    }

    #[test]
    fn test_empty_list_is_ready() {
        let mut list = ListView::new();
        list.request(date!(2024 - 05 - 01), Ticket(1));
        assert!(list.resolve(Ticket(1), StaticSource(promos()).fetch_all()));
        assert_eq!(list.promotions(), &Loadable::Ready(Vec::new()));
        assert_eq!(list.focused(), None);
        assert!(!list.focus_next());
        assert!(!list.focus_prev());
        assert!(!list.toggle_liked());
    }

    #[test]
    fn test_cursor_and_marks_survive_reselection() {
        let source = StaticSource(promos());
        let mut list = ListView::new();
        list.request(date!(2024 - 03 - 14), Ticket(1));
        list.resolve(Ticket(1), source.fetch_active_on(date!(2024 - 03 - 14)));
        assert!(list.focus_next());
        assert_eq!(list.cursor(), 1);
        assert!(!list.focus_next());
        assert!(list.toggle_reminder());
        assert!(list.focus_prev());
        assert!(list.toggle_liked());
        list.request(date!(2024 - 03 - 15), Ticket(2));
        assert_eq!(list.cursor(), 0);
        assert!(list.resolve(Ticket(2), source.fetch_active_on(date!(2024 - 03 - 15))));
        assert!(list.marks().get("a").liked);
        assert!(list.marks().get("b").reminder);
        assert!(!list.marks().get("c").liked);
    }

    #[test]
    fn test_refetching_same_date_keeps_cursor() {
        let mut list = ListView::new();
        list.request(date!(2024 - 03 - 14), Ticket(1));
        assert!(list.resolve(Ticket(1), StaticSource(promos()).fetch_all()));
        assert!(list.focus_next());
        list.request(date!(2024 - 03 - 14), Ticket(2));
        assert_eq!(list.cursor(), 1);
        assert!(list.resolve(Ticket(2), StaticSource(promos()).fetch_all()));
        assert_eq!(list.focused().map(|p| p.id.as_str()), Some("b"));
        // A shorter list pulls the cursor back onto the last entry
        list.request(date!(2024 - 03 - 14), Ticket(3));
        assert!(list.resolve(Ticket(3), Ok(promos().into_iter().take(1).collect())));
        assert_eq!(list.cursor(), 0);
        assert_eq!(list.focused().map(|p| p.id.as_str()), Some("a"));
    }

    #[test]
    fn test_stale_reply_is_ignored() {
        let source = StaticSource(promos());
        let mut list = ListView::new();
        list.request(date!(2024 - 03 - 14), Ticket(1));
        list.request(date!(2024 - 03 - 15), Ticket(2));
        assert!(!list.resolve(Ticket(1), source.fetch_active_on(date!(2024 - 03 - 14))));
        assert_eq!(list.promotions(), &Loadable::Loading(Ticket(2)));
        assert!(list.resolve(Ticket(2), source.fetch_active_on(date!(2024 - 03 - 15))));
        assert_eq!(ids(list.promotions().ready().unwrap()), ["a", "c"]);
    }
}
