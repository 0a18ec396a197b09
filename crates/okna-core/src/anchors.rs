//! In-page anchor links that scroll smoothly and clear the fixed header.

use crate::ui::{Control, EventFlow, EventKind, SharedUiState, Subscription, UiState};

pub struct AnchorLink<C> {
    pub control: C,
    /// Raw `href` attribute, e.g. `#faq`.
    pub href: String,
}

/// Section id an `href` points at. A bare `#` points nowhere.
pub fn target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll to the link target. `false` leaves the click to the browser.
pub fn navigate(ui: &UiState, href: &str) -> bool {
    target_id(href).is_some_and(|id| ui.scroll_to_section(id))
}

pub fn attach<C: Control>(links: Vec<AnchorLink<C>>, ui: SharedUiState) -> Subscription {
    links
        .into_iter()
        .map(|link| {
            let ui = ui.clone();
            let href = link.href;
            link.control.listen(
                EventKind::Click,
                Box::new(move |_| {
                    if navigate(&ui.borrow(), &href) {
                        EventFlow::PreventDefault
                    } else {
                        EventFlow::Continue
                    }
                }),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeControl, FakePage};

    #[test]
    fn test_target_id() {
        assert_eq!(target_id("#faq"), Some("faq"));
        assert_eq!(target_id("#"), None);
        assert_eq!(target_id("/about"), None);
    }

    #[test]
    fn test_click_scrolls_below_header() {
        let page = FakePage::new();
        page.set_header_height(72.0);
        page.set_scroll_y(100.0);
        page.add_element("faq", 900.0);
        let ui = UiState::shared(page.clone());

        let faq = FakeControl::new();
        let bare = FakeControl::new();
        let missing = FakeControl::new();
        let _sub = attach(
            vec![
                AnchorLink {
                    control: faq.clone(),
                    href: "#faq".into(),
                },
                AnchorLink {
                    control: bare.clone(),
                    href: "#".into(),
                },
                AnchorLink {
                    control: missing.clone(),
                    href: "#nowhere".into(),
                },
            ],
            ui,
        );

        assert_eq!(faq.click(), EventFlow::PreventDefault);
        assert_eq!(page.scrolls(), vec![928.0]);

        assert_eq!(bare.click(), EventFlow::Continue);
        assert_eq!(missing.click(), EventFlow::Continue);
        assert_eq!(page.scrolls().len(), 1);
    }
}
