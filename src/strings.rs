//! User-visible text

pub(crate) const APP_TITLE: &str = "優惠日曆";

pub(crate) const LOADING: &str = "載入中...";

pub(crate) const NO_PROMOTIONS: &str = "今日無優惠活動";

pub(crate) const FETCH_FAILED: &str = "Failed to load promotions";

pub(crate) const PERIOD_LABEL: &str = "活動期間：";

pub(crate) const LIKED_MARK: &str = "♥";

pub(crate) const REMINDER_MARK: &str = "●";
