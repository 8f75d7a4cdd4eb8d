use super::element_text;
use crate::job::{JobPosting, Salary, Source};
use lazy_static::lazy_static;
use scraper::{Html, Selector};

const E: &str = "Invalid selector";
lazy_static! {
    // One ordered fallback chain per field. The first element with
    // non-empty trimmed text wins; supporting a new markup variant is a
    // matter of appending a selector here.
    static ref TITLE: Vec<Selector> = vec![
        Selector::parse(".job-name").expect(E),
        Selector::parse(".job-primary .name").expect(E),
        Selector::parse("h1").expect(E),
    ];
    static ref COMPANY: Vec<Selector> = vec![
        Selector::parse(".company-name").expect(E),
        Selector::parse(".job-primary .company .name").expect(E),
    ];
    static ref SALARY: Vec<Selector> = vec![
        Selector::parse(".job-primary .salary").expect(E),
        Selector::parse(".salary").expect(E),
    ];
    static ref LOCATION: Vec<Selector> = vec![
        Selector::parse(".job-primary .area").expect(E),
        Selector::parse(".job-area").expect(E),
    ];
    static ref EXPERIENCE: Vec<Selector> = vec![
        Selector::parse(".job-primary .tag-list").expect(E),
        Selector::parse(".tag-list .tag").expect(E),
    ];
    static ref EDUCATION: Vec<Selector> = vec![
        Selector::parse(".job-primary .tag-list .tag:nth-child(2)").expect(E),
    ];
    static ref DESCRIPTION: Vec<Selector> = vec![
        Selector::parse(".job-segment-text, .job-detail").expect(E),
        Selector::parse(".job-primary .job-detail, .detail").expect(E),
    ];
}

/// Extracts a normalized posting from a rendered detail document. Never
/// fails; a field whose whole chain comes up empty stays an empty string.
/// Skill tagging is the caller's job, not this extractor's.
pub fn extract_detail(doc: &Html) -> JobPosting {
    JobPosting {
        title: first_text(doc, &TITLE),
        company: first_text(doc, &COMPANY),
        salary: Salary::Text(first_text(doc, &SALARY)),
        location: first_text(doc, &LOCATION),
        experience: first_text(doc, &EXPERIENCE),
        education: first_text(doc, &EDUCATION),
        description: first_text(doc, &DESCRIPTION),
        skills: vec![],
        source: Source::Board,
    }
}

fn first_text(doc: &Html, chain: &[Selector]) -> String {
    for selector in chain {
        for el in doc.select(selector) {
            let text = element_text(el);
            if !text.is_empty() {
                return text;
            }
        }
    }
    String::new()
}
