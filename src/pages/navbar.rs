use crate::data_types::Page;

/// One line of navigation, the active page in brackets.
pub fn navbar_to_msg(active: Page) -> String {
    Page::ALL
        .iter()
        .map(|page| {
            if *page == active {
                format!("[{}]", page.label())
            } else {
                page.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn page_for_route(route: &str) -> Option<Page> {
    let route = match route.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    Page::ALL.into_iter().find(|page| page.route() == route)
}

/// The navbar keeps no state of its own, the owner of the active page is told about the switch.
pub fn select_page(route: &str, on_page_change: impl FnOnce(Page)) -> Option<Page> {
    let page = page_for_route(route)?;
    on_page_change(page);
    Some(page)
}
