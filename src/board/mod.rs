mod detail;
mod discover;

pub use detail::extract_detail;
pub use discover::discover_references;

use lazy_regex::regex;
use scraper::ElementRef;

pub const ORIGIN: &str = "https://www.zhipin.com";

/// Marker that the rendered listing container is present. Its absence is a
/// soft failure; discovery still runs against whatever markup is there.
pub const LISTING_MARKER: &str = "job-list-box";

/// Hrefs without this marker are navigation links, not detail pages.
pub const JOB_PATH_MARKER: &str = "/job";

pub fn listing_url(keyword: &str, city: &str) -> String {
    let mut url = reqwest::Url::parse(ORIGIN).expect("Invalid origin");
    url.set_path("/web/geek/job");
    url.query_pairs_mut()
        .append_pair("query", keyword)
        .append_pair("city", city);
    url.to_string()
}

pub(crate) fn absolute_url(href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", ORIGIN, href)
    }
}

pub(crate) fn element_text(el: ElementRef) -> String {
    let text = el.text().collect::<Vec<_>>().join(" ");
    regex!(r"\s+").replace_all(text.trim(), " ").to_string()
}
