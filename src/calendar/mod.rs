mod coverage;
mod grid;
mod view;
mod widget;
pub(crate) use self::coverage::{CalendarDay, DisplayState, PromotionRange};
pub(crate) use self::view::CalendarView;
pub(crate) use self::widget::{Calendar, MAIN_WIDTH};
