use crate::calendar::{CalendarDay, DisplayState};
use ratatui::style::{Color, Modifier, Style};

pub(crate) const ACCENT: Color = Color::Rgb(0xFF, 0xAB, 0x35);

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const COVERED_ACTIVE_STYLE: Style = Style::new().fg(ACCENT);

pub(crate) const COVERED_EXPIRED_STYLE: Style = Style::new().fg(Color::Rgb(0x66, 0x66, 0x66));

pub(crate) const UNCOVERED_STYLE: Style = Style::new().fg(Color::Rgb(0x99, 0x99, 0x99));

pub(crate) const TODAY_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::White)
    .add_modifier(Modifier::BOLD);

pub(crate) const SELECTED_STYLE: Style = Style::new().fg(Color::White).bg(ACCENT);

pub(crate) const CURSOR_MODIFIER: Modifier = Modifier::UNDERLINED;

/// Today outranks the selection, which outranks the coverage colour
pub(crate) fn day_style(day: &CalendarDay, selected: bool) -> Style {
    if day.is_today() {
        TODAY_STYLE
    } else if selected {
        SELECTED_STYLE
    } else {
        match day.state() {
            DisplayState::CoveredActive => COVERED_ACTIVE_STYLE,
            DisplayState::CoveredExpired => COVERED_EXPIRED_STYLE,
            DisplayState::Uncovered => UNCOVERED_STYLE,
        }
    }
}

pub(crate) mod list {
    use super::*;

    pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const FOCUSED_TITLE_STYLE: Style = Style::new()
        .fg(ACCENT)
        .bg(Color::Black)
        .add_modifier(Modifier::BOLD);

    pub(crate) const DETAIL_STYLE: Style = BASE_STYLE;

    pub(crate) const MUTED_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const LIKED_STYLE: Style = Style::new().fg(Color::Red).bg(Color::Black);

    pub(crate) const REMINDER_STYLE: Style = Style::new().fg(ACCENT).bg(Color::Black);

    pub(crate) const ERROR_STYLE: Style = Style::new().fg(Color::Red).bg(Color::Black);
}
