use ratatui::{layout::Flex, prelude::*, widgets::*};

static KEYS: &[(&str, &str)] = &[
    ("h, LEFT", "Previous day"),
    ("l, RIGHT", "Next day"),
    ("k, UP", "Previous week"),
    ("j, DOWN", "Next week"),
    ("ENTER, SPACE", "List promotions for the day"),
    ("e, TAB", "Toggle week/month view"),
    ("n, p", "Next/previous promotion"),
    ("f", "Like promotion"),
    ("r", "Toggle reminder"),
    ("o", "Open promotion page"),
    ("s", "Share promotion on LINE"),
    ("R", "Reload promotions"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

static DISMISS: &str = "Press any key to dismiss.";

/// Space between the key column and the descriptions
const GUTTER: usize = 4;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text() -> Text<'static> {
        let key_width = KEYS.iter().map(|(k, _)| k.len()).max().unwrap_or(0) + GUTTER;
        let mut lines = KEYS
            .iter()
            .map(|(keys, desc)| Line::raw(format!("{keys:<key_width$}{desc}")))
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.push(Line::raw(DISMISS));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        // Text plus a one-column margin and the border on each side
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.width);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let popup = centered(area, width, height);
        Clear.render(popup, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Keys ")
                    .title_alignment(Alignment::Center)
                    .padding(Padding::horizontal(1)),
            )
            .style(self.0)
            .render(popup, buf);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
    let [area] = Layout::vertical([height]).flex(Flex::Center).areas(area);
    area
}
