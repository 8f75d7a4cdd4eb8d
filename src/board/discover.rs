use super::{absolute_url, element_text, JOB_PATH_MARKER};
use crate::job::CandidateReference;
use itertools::Itertools;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

const E: &str = "Invalid selector";
lazy_static! {
    // Ordered strategies, card containers first, bare-anchor fallbacks last.
    // The listing markup shifts between variants; trying all of them and
    // deduplicating by url keeps recall high without double-counting.
    static ref STRATEGIES: Vec<Selector> = vec![
        Selector::parse(".job-card-wrapper").expect(E),
        Selector::parse(".job-card-box").expect(E),
        Selector::parse(".job-list-box a").expect(E),
        Selector::parse(r#"a[href*="/job_detail/"]"#).expect(E),
    ];
    static ref DETAIL_ANCHOR: Selector =
        Selector::parse(r#"a[href*="/job_detail/"], a[href*="/job/"]"#).expect(E);
    static ref CARD_TITLE: Selector = Selector::parse(".job-name, .job-title").expect(E);
}

/// Collects candidate detail references from a rendered listing document.
/// References are unique by resolved absolute url, first occurrence wins,
/// discovery order is preserved. An empty result is a valid outcome.
pub fn discover_references(doc: &Html) -> Vec<CandidateReference> {
    let mut raw = vec![];
    for strategy in STRATEGIES.iter() {
        for card in doc.select(strategy) {
            let Some(anchor) = resolve_anchor(card) else {
                continue;
            };
            let Some(href) = anchor.value().attr("href").map(str::trim) else {
                continue;
            };
            if !href.contains(JOB_PATH_MARKER) {
                continue;
            }
            let title = resolve_title(card);
            if title.is_empty() {
                continue;
            }
            raw.push((title, absolute_url(href)));
        }
    }

    raw.into_iter()
        .unique_by(|(_, url)| url.clone())
        .enumerate()
        .map(|(position, (title, url))| CandidateReference { title, url, position })
        .collect()
}

fn resolve_anchor(card: ElementRef) -> Option<ElementRef> {
    if card.value().name() == "a" {
        Some(card)
    } else {
        card.select(&DETAIL_ANCHOR).next()
    }
}

fn resolve_title(card: ElementRef) -> String {
    let dedicated = card
        .select(&CARD_TITLE)
        .next()
        .map(element_text)
        .unwrap_or_default();
    if dedicated.is_empty() {
        element_text(card)
    } else {
        dedicated
    }
}
