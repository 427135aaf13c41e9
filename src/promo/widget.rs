use super::list::{ItemMarks, ListView};
use super::Promotion;
use crate::fetch::Loadable;
use crate::strings::{FETCH_FAILED, LIKED_MARK, LOADING, NO_PROMOTIONS, REMINDER_MARK};
use crate::theme::list::{
    DETAIL_STYLE, ERROR_STYLE, FOCUSED_TITLE_STYLE, LIKED_STYLE, MUTED_STYLE, REMINDER_STYLE,
    TITLE_STYLE,
};
use ratatui::{prelude::*, widgets::*};

/// Number of lines taken up by each promotion, including the blank line
/// after it
const ENTRY_LINES: usize = 5;

const FOCUS_MARK: &str = "▸ ";
const INDENT: &str = "  ";

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct PromotionPane;

impl StatefulWidget for PromotionPane {
    type State = ListView;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let promos = match state.promotions() {
            Loadable::Ready(promos) if !promos.is_empty() => promos,
            other => {
                let (text, style) = if other.is_pending() {
                    (LOADING, MUTED_STYLE)
                } else if *other == Loadable::Failed {
                    (FETCH_FAILED, ERROR_STYLE)
                } else {
                    (NO_PROMOTIONS, MUTED_STYLE)
                };
                Paragraph::new(vec![Line::default(), Line::styled(text, style)])
                    .alignment(Alignment::Center)
                    .render(area, buf);
                return;
            }
        };
        let visible = (usize::from(area.height) / ENTRY_LINES).max(1);
        let cursor = state.cursor();
        let first = (cursor + 1).saturating_sub(visible);
        let lines = promos
            .iter()
            .enumerate()
            .skip(first)
            .take(visible + 1)
            .flat_map(|(i, p)| entry_lines(p, i == cursor, state.marks().get(&p.id)))
            .collect::<Vec<_>>();
        Paragraph::new(lines).render(area, buf);
    }
}

fn entry_lines(promo: &Promotion, focused: bool, marks: ItemMarks) -> [Line<'_>; ENTRY_LINES] {
    let mut heading = if focused {
        vec![
            Span::styled(FOCUS_MARK, FOCUSED_TITLE_STYLE),
            Span::styled(promo.title.as_str(), FOCUSED_TITLE_STYLE),
        ]
    } else {
        vec![
            Span::styled(INDENT, TITLE_STYLE),
            Span::styled(promo.title.as_str(), TITLE_STYLE),
        ]
    };
    if marks.liked {
        heading.push(Span::raw(" "));
        heading.push(Span::styled(LIKED_MARK, LIKED_STYLE));
    }
    if marks.reminder {
        heading.push(Span::raw(" "));
        heading.push(Span::styled(REMINDER_MARK, REMINDER_STYLE));
    }
    [
        Line::from(heading),
        Line::from(vec![
            Span::raw(INDENT),
            Span::styled(promo.description.as_str(), DETAIL_STYLE),
        ]),
        Line::from(vec![
            Span::raw(INDENT),
            Span::styled(promo.period_text(), DETAIL_STYLE),
        ]),
        Line::from(vec![
            Span::raw(INDENT),
            Span::styled(promo.icon_url.as_str(), MUTED_STYLE),
        ]),
        Line::default(),
    ]
}
