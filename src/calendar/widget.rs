use super::coverage::CalendarDay;
use super::grid::DAYS_IN_WEEK;
use super::view::CalendarView;
use crate::theme::{day_style, CURSOR_MODIFIER, TITLE_STYLE, WEEKDAY_STYLE};
use ratatui::{prelude::*, widgets::*};
use time::Date;

static HEADER: &str = " Mo     Tu     We     Th     Fr     Sa     Su ";

/// Width of the calendar in columns
pub(crate) const MAIN_WIDTH: u16 = 46;

/// Number of lines taken up by the title, the weekday header, and its rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the calendar
const WEEK_LINES: u16 = 2;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 7;

const ACS_HLINE: char = '─';

const COLLAPSED_MARK: &str = "▼";
const EXPANDED_MARK: &str = "▲";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Calendar {
    selected: Option<Date>,
}

impl Calendar {
    pub(crate) fn new(selected: Option<Date>) -> Calendar {
        Calendar { selected }
    }

    /// Number of lines needed to draw a grid with `rows` weeks
    pub(crate) fn height(rows: usize) -> u16 {
        let rows = u16::try_from(rows).unwrap_or(u16::MAX);
        HEADER_LINES.saturating_add(rows.saturating_mul(WEEK_LINES))
    }
}

impl StatefulWidget for Calendar {
    type State = CalendarView;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let [_, area, _] = Layout::horizontal([
            Constraint::Length(left),
            Constraint::Length(MAIN_WIDTH.min(area.width)),
            Constraint::Min(0),
        ])
        .areas(area);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(state.reference(), state.mode().is_expanded());
        canvas.draw_header();
        let cursor = state.cursor();
        for (i, row) in std::iter::zip(0u16.., state.days().chunks(DAYS_IN_WEEK)) {
            for (j, day) in std::iter::zip(0u16.., row) {
                if day.is_filler() {
                    continue;
                }
                let selected = self.selected.is_some() && day.date() == self.selected;
                let mut style = day_style(day, selected);
                if usize::from(i) * DAYS_IN_WEEK + usize::from(j) == cursor {
                    style = style.add_modifier(CURSOR_MODIFIER);
                }
                canvas.draw_day(i, j, show(day), style);
            }
        }
    }
}

fn show(day: &CalendarDay) -> String {
    if day.is_today() {
        format!("[{:2}]", day.day_number())
    } else {
        format!(" {:2} ", day.day_number())
    }
}

fn format_title(date: Date) -> String {
    format!("{}/{}/{}", date.year(), u8::from(date.month()), date.day())
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, reference: Date, expanded: bool) {
        self.mvprint(0, 0, format_title(reference), Some(TITLE_STYLE));
        let mark = if expanded {
            EXPANDED_MARK
        } else {
            COLLAPSED_MARK
        };
        self.mvprint(0, MAIN_WIDTH - 1, mark, None);
    }

    fn draw_header(&mut self) {
        self.mvprint(1, 0, HEADER, Some(WEEKDAY_STYLE));
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, column: u16, s: String, style: Style) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            DAY_WIDTH * column,
            s,
            Some(style),
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::PromotionRange;
    use crate::theme::{
        COVERED_ACTIVE_STYLE, COVERED_EXPIRED_STYLE, SELECTED_STYLE, TODAY_STYLE, UNCOVERED_STYLE,
    };
    use time::macros::date;

    fn march_view() -> CalendarView {
        let mut view = CalendarView::new(date!(2024 - 03 - 15), date!(2024 - 03 - 15));
        view.set_ranges(vec![PromotionRange::new(
            date!(2024 - 03 - 01),
            date!(2024 - 03 - 20),
        )]);
        view
    }

    #[test]
    fn test_week_view() {
        let mut view = march_view();
        let area = Rect::new(0, 0, MAIN_WIDTH, 5);
        let mut buffer = Buffer::empty(area);
        Calendar::new(Some(date!(2024 - 03 - 14))).render(area, &mut buffer, &mut view);
        let mut expected = Buffer::with_lines([
            "2024/3/15                                    ▼",
            " Mo     Tu     We     Th     Fr     Sa     Su ",
            "──────────────────────────────────────────────",
            " 11     12     13     14    [15]    16     17 ",
            "                                              ",
        ]);
        expected.set_style(Rect::new(0, 0, 9, 1), TITLE_STYLE);
        expected.set_style(Rect::new(0, 1, 46, 1), WEEKDAY_STYLE);
        expected.set_style(Rect::new(0, 3, 4, 1), COVERED_EXPIRED_STYLE);
        expected.set_style(Rect::new(7, 3, 4, 1), COVERED_EXPIRED_STYLE);
        expected.set_style(Rect::new(14, 3, 4, 1), COVERED_EXPIRED_STYLE);
        expected.set_style(Rect::new(21, 3, 4, 1), SELECTED_STYLE);
        expected.set_style(
            Rect::new(28, 3, 4, 1),
            TODAY_STYLE.add_modifier(CURSOR_MODIFIER),
        );
        expected.set_style(Rect::new(35, 3, 4, 1), COVERED_ACTIVE_STYLE);
        expected.set_style(Rect::new(42, 3, 4, 1), COVERED_ACTIVE_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_month_view_skips_fillers() {
        let mut view = march_view();
        view.toggle_mode(None);
        let area = Rect::new(0, 0, MAIN_WIDTH, Calendar::height(view.rows()));
        assert_eq!(area.height, 13);
        let mut buffer = Buffer::empty(area);
        Calendar::new(None).render(area, &mut buffer, &mut view);
        let mut expected = Buffer::with_lines([
            "2024/3/15                                    ▲",
            " Mo     Tu     We     Th     Fr     Sa     Su ",
            "──────────────────────────────────────────────",
            "                              1      2      3 ",
            "                                              ",
            "  4      5      6      7      8      9     10 ",
            "                                              ",
            " 11     12     13     14    [15]    16     17 ",
            "                                              ",
            " 18     19     20     21     22     23     24 ",
            "                                              ",
            " 25     26     27     28     29     30     31 ",
            "                                              ",
        ]);
        expected.set_style(Rect::new(0, 0, 9, 1), TITLE_STYLE);
        expected.set_style(Rect::new(0, 1, 46, 1), WEEKDAY_STYLE);
        for (y, first, last) in [(3, 4, 6), (5, 0, 6), (7, 0, 3)] {
            for x in first..=last {
                expected.set_style(Rect::new(x * 7, y, 4, 1), COVERED_EXPIRED_STYLE);
            }
        }
        expected.set_style(
            Rect::new(28, 7, 4, 1),
            TODAY_STYLE.add_modifier(CURSOR_MODIFIER),
        );
        expected.set_style(Rect::new(35, 7, 4, 1), COVERED_ACTIVE_STYLE);
        expected.set_style(Rect::new(42, 7, 4, 1), COVERED_ACTIVE_STYLE);
        for x in 0..3 {
            expected.set_style(Rect::new(x * 7, 9, 4, 1), COVERED_ACTIVE_STYLE);
        }
        for x in 3..7 {
            expected.set_style(Rect::new(x * 7, 9, 4, 1), UNCOVERED_STYLE);
        }
        for x in 0..7 {
            expected.set_style(Rect::new(x * 7, 11, 4, 1), UNCOVERED_STYLE);
        }
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_narrow_area_truncates() {
        let mut view = march_view();
        let area = Rect::new(0, 0, 20, 5);
        let mut buffer = Buffer::empty(area);
        Calendar::new(None).render(area, &mut buffer, &mut view);
        assert_eq!(buffer.area, area);
    }

    #[test]
    fn test_title_format() {
        assert_eq!(format_title(date!(2024 - 03 - 05)), "2024/3/5");
        assert_eq!(format_title(date!(2024 - 12 - 25)), "2024/12/25");
    }
}
