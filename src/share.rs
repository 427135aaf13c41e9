use crate::promo::Promotion;
use crate::strings::PERIOD_LABEL;
use log::{debug, warn};
use std::thread;

const LINE_SHARE_PREFIX: &str = "https://line.me/R/msg/text/?";

/// The message posted when sharing a promotion
pub(crate) fn share_text(promo: &Promotion) -> String {
    format!(
        "{}\n{PERIOD_LABEL}{}\n{}",
        promo.title,
        promo.period_text(),
        promo.description
    )
}

/// A LINE "share text" link for the promotion.  The promotion's source URL
/// is appended after the message, or `fallback` if it has none.
pub(crate) fn share_link(promo: &Promotion, fallback: &str) -> String {
    let text = urlencoding::encode(&share_text(promo)).into_owned();
    let url = if promo.source_url.is_empty() {
        fallback
    } else {
        promo.source_url.as_str()
    };
    if url.is_empty() {
        format!("{LINE_SHARE_PREFIX}{text}")
    } else {
        format!("{LINE_SHARE_PREFIX}{text}\n{}", urlencoding::encode(url))
    }
}

/// Opens `url` in the user's web browser.  The browser is launched in the
/// background; failures are logged and otherwise ignored.
pub(crate) fn open_url(url: &str) {
    if url.is_empty() {
        debug!("Nothing to open");
        return;
    }
    debug!("Opening {url}");
    let url = url.to_owned();
    thread::spawn(move || {
        if let Err(e) = webbrowser::open(&url) {
            warn!("Failed to open {url} in a browser: {e}");
        }
    });
}
