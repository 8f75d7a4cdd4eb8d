use crate::board::{self, LISTING_MARKER};
use crate::error::CrawlerError;
use crate::job::{CandidateReference, JobPosting};
use crate::skills::SkillCatalog;
use crate::stats::skill_frequencies;
use scraper::Html;
use tokio::time::{Duration, Instant};
use tracing::{debug, info, warn};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const NAV_TIMEOUT: Duration = Duration::from_secs(60);

/// Navigation abstraction. Production uses [`HttpBrowser`]; tests substitute
/// a fake that serves canned documents and injected failures.
#[async_trait::async_trait]
pub trait Browse {
    async fn fetch_rendered(&self, url: &str) -> Result<String, CrawlerError>;
}

pub struct HttpBrowser {
    client: reqwest::Client,
}

impl HttpBrowser {
    pub fn new() -> Result<HttpBrowser, CrawlerError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(NAV_TIMEOUT)
            .build()?;
        Ok(HttpBrowser { client })
    }
}

#[async_trait::async_trait]
impl Browse for HttpBrowser {
    async fn fetch_rendered(&self, url: &str) -> Result<String, CrawlerError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(CrawlerError::PageLoad(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }
        Ok(response.text().await?)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CrawlLimits {
    /// Cap on detail visits per run, `min(discovered, cap)`.
    pub max_detail_fetches: usize,
    /// Bounded re-poll window for the listing-container marker. Running out
    /// of it is a warning, not a failure.
    pub marker_timeout: Duration,
    pub marker_poll: Duration,
    /// Settle buffers after navigation, last-resort allowance for
    /// client-side rendering.
    pub listing_settle: Duration,
    pub detail_settle: Duration,
    /// Courtesy pause between detail visits.
    pub item_delay: Duration,
}

impl Default for CrawlLimits {
    fn default() -> CrawlLimits {
        CrawlLimits {
            max_detail_fetches: 10,
            marker_timeout: Duration::from_secs(10),
            marker_poll: Duration::from_secs(1),
            listing_settle: Duration::from_secs(3),
            detail_settle: Duration::from_secs(2),
            item_delay: Duration::from_secs(1),
        }
    }
}

/// Drives one run against the board source: load the listing, discover
/// references, visit each one sequentially, tag skills, and hand back the
/// batch in discovery order.
///
/// Failure policy: a listing that cannot load is fatal; a missing listing
/// marker is a logged warning; any error while visiting one reference is
/// absorbed into a degraded posting and never aborts the run.
pub struct BoardCrawler<B> {
    browser: B,
    catalog: SkillCatalog,
    listing_url: String,
    limits: CrawlLimits,
}

impl<B: Browse> BoardCrawler<B> {
    pub fn new(browser: B, catalog: SkillCatalog, listing_url: String) -> BoardCrawler<B> {
        BoardCrawler {
            browser,
            catalog,
            listing_url,
            limits: CrawlLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: CrawlLimits) -> BoardCrawler<B> {
        self.limits = limits;
        self
    }

    pub async fn run(&self) -> Result<Vec<JobPosting>, CrawlerError> {
        let body = self.load_listing().await?;

        let references = {
            let doc = Html::parse_document(&body);
            board::discover_references(&doc)
        };
        if references.is_empty() {
            info!("No references discovered, skipping the detail phase");
            return Ok(vec![]);
        }

        let cap = references.len().min(self.limits.max_detail_fetches);
        info!("Discovered {} references, visiting {}", references.len(), cap);

        let mut batch = Vec::with_capacity(cap);
        for reference in references.into_iter().take(cap) {
            info!("[{}/{}] Visit {}", reference.position + 1, cap, reference.title);
            match self.visit(&reference).await {
                Ok(posting) => {
                    debug!(
                        "Extracted skills: {}",
                        posting.skills.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
                    );
                    batch.push(posting);
                }
                Err(err) => {
                    warn!("Detail visit failed for {}: {}", reference.url, err);
                    batch.push(JobPosting::degraded(&reference.title));
                }
            }
            tokio::time::sleep(self.limits.item_delay).await;
        }

        info!("Extracted {} postings", batch.len());
        for (skill, count) in skill_frequencies(&batch) {
            info!("  {}: {}", skill, count);
        }

        Ok(batch)
    }

    /// Loads the listing page, re-polling until the listing-container
    /// marker shows up or the bounded window runs out. Absence of the
    /// marker is non-fatal; only the initial navigation error escapes.
    async fn load_listing(&self) -> Result<String, CrawlerError> {
        debug!("Visit {}", self.listing_url);
        let mut body = self.browser.fetch_rendered(&self.listing_url).await?;

        let deadline = Instant::now() + self.limits.marker_timeout;
        while !body.contains(LISTING_MARKER) && Instant::now() < deadline {
            tokio::time::sleep(self.limits.marker_poll).await;
            match self.browser.fetch_rendered(&self.listing_url).await {
                Ok(b) => body = b,
                Err(err) => {
                    warn!("Listing re-poll failed: {}", err);
                    break;
                }
            }
        }
        if !body.contains(LISTING_MARKER) {
            warn!("Listing container marker not found, discovering from what is present");
        }

        tokio::time::sleep(self.limits.listing_settle).await;
        Ok(body)
    }

    async fn visit(&self, reference: &CandidateReference) -> Result<JobPosting, CrawlerError> {
        let body = self.browser.fetch_rendered(&reference.url).await?;
        tokio::time::sleep(self.limits.detail_settle).await;

        let mut posting = {
            let doc = Html::parse_document(&body);
            board::extract_detail(&doc)
        };
        let skills = {
            let subject = if posting.description.is_empty() {
                &posting.title
            } else {
                &posting.description
            };
            self.catalog.extract(subject)
        };
        posting.skills = skills;
        Ok(posting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::Salary;
    use pretty_assertions::assert_eq;
    use std::collections::{HashMap, HashSet};

    const LISTING_URL: &str = "https://www.zhipin.com/web/geek/job?query=test&city=101010100";

    struct FakeBrowser {
        pages: HashMap<String, String>,
        failing: HashSet<String>,
    }

    impl FakeBrowser {
        fn new() -> FakeBrowser {
            FakeBrowser {
                pages: HashMap::new(),
                failing: HashSet::new(),
            }
        }

        fn with_page(mut self, url: &str, body: String) -> FakeBrowser {
            self.pages.insert(url.to_string(), body);
            self
        }

        fn with_failure(mut self, url: &str) -> FakeBrowser {
            self.failing.insert(url.to_string());
            self
        }
    }

    #[async_trait::async_trait]
    impl Browse for FakeBrowser {
        async fn fetch_rendered(&self, url: &str) -> Result<String, CrawlerError> {
            if self.failing.contains(url) {
                return Err(CrawlerError::PageLoad(format!("injected failure: {}", url)));
            }
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| CrawlerError::PageLoad(format!("no page at {}", url)))
        }
    }

    fn instant_limits() -> CrawlLimits {
        CrawlLimits {
            max_detail_fetches: 10,
            marker_timeout: Duration::ZERO,
            marker_poll: Duration::from_millis(1),
            listing_settle: Duration::ZERO,
            detail_settle: Duration::ZERO,
            item_delay: Duration::ZERO,
        }
    }

    fn listing_of(n: usize) -> String {
        let mut cards = String::new();
        for i in 0..n {
            cards.push_str(&format!(
                r#"<a href="/job_detail/j{i}.html"><span class="job-name">Job {i}</span></a>"#,
            ));
        }
        format!(r#"<html><body><div class="job-list-box">{}</div></body></html>"#, cards)
    }

    fn detail_url(i: usize) -> String {
        format!("https://www.zhipin.com/job_detail/j{}.html", i)
    }

    fn detail_page(title: &str, description: &str) -> String {
        format!(
            r#"<html><body>
                 <div class="job-primary"><h1 class="job-name">{}</h1></div>
                 <div class="job-segment-text">{}</div>
               </body></html>"#,
            title, description
        )
    }

    fn crawler(browser: FakeBrowser) -> BoardCrawler<FakeBrowser> {
        BoardCrawler::new(browser, SkillCatalog::default(), LISTING_URL.to_string())
            .with_limits(instant_limits())
    }

    #[tokio::test]
    async fn iteration_is_capped_at_max_detail_fetches() {
        let mut browser = FakeBrowser::new().with_page(LISTING_URL, listing_of(25));
        for i in 0..10 {
            browser = browser.with_page(&detail_url(i), detail_page(&format!("Job {}", i), "x"));
        }

        let batch = crawler(browser).run().await.unwrap();
        assert_eq!(batch.len(), 10);
        assert_eq!(batch[0].title, "Job 0");
        assert_eq!(batch[9].title, "Job 9");
    }

    #[tokio::test]
    async fn one_failing_item_degrades_without_aborting_the_run() {
        let mut browser = FakeBrowser::new().with_page(LISTING_URL, listing_of(5));
        for i in 0..5 {
            if i == 2 {
                browser = browser.with_failure(&detail_url(i));
            } else {
                browser = browser.with_page(
                    &detail_url(i),
                    detail_page(&format!("Job {}", i), "熟悉 React 与 MySQL"),
                );
            }
        }

        let batch = crawler(browser).run().await.unwrap();
        assert_eq!(batch.len(), 5);

        // Reference #3 degraded to its discovery-time title, nothing else.
        assert_eq!(batch[2], JobPosting::degraded("Job 2"));
        assert_eq!(batch[2].company, "");
        assert_eq!(batch[2].salary, Salary::Text(String::new()));
        assert!(batch[2].skills.is_empty());

        for i in [0usize, 1, 3, 4] {
            assert_eq!(batch[i].title, format!("Job {}", i));
            assert_eq!(batch[i].skills, vec!["React", "MySQL"]);
        }
    }

    #[tokio::test]
    async fn zero_discovery_skips_the_detail_phase() {
        let browser = FakeBrowser::new().with_page(
            LISTING_URL,
            r#"<html><body><div class="job-list-box"><p>暂无职位</p></div></body></html>"#.to_string(),
        );
        let batch = crawler(browser).run().await.unwrap();
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn missing_listing_marker_is_not_fatal() {
        let browser = FakeBrowser::new().with_page(
            LISTING_URL,
            r#"<html><body><a href="/job_detail/j0.html"><span class="job-name">Job 0</span></a></body></html>"#
                .to_string(),
        )
        .with_page(&detail_url(0), detail_page("Job 0", "Docker"));

        let batch = crawler(browser).run().await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].skills, vec!["Docker"]);
    }

    #[tokio::test]
    async fn listing_that_cannot_load_is_fatal() {
        let browser = FakeBrowser::new().with_failure(LISTING_URL);
        let result = crawler(browser).run().await;
        assert!(matches!(result, Err(CrawlerError::PageLoad(_))));
    }

    #[tokio::test]
    async fn skills_fall_back_to_the_title_when_description_is_empty() {
        let browser = FakeBrowser::new()
            .with_page(LISTING_URL, listing_of(1))
            .with_page(
                &detail_url(0),
                r#"<html><body><div class="job-primary"><h1 class="job-name">React 前端工程师</h1></div></body></html>"#
                    .to_string(),
            );

        let batch = crawler(browser).run().await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].description, "");
        assert_eq!(batch[0].skills, vec!["React"]);
    }

    #[tokio::test]
    async fn batch_preserves_discovery_order_and_drops_duplicates() {
        let listing = r#"<html><body><div class="job-list-box">
                 <a href="/job_detail/j0.html"><span class="job-name">Job 0</span></a>
                 <a href="/job_detail/j1.html"><span class="job-name">Job 1</span></a>
                 <a href="/job_detail/j2.html"><span class="job-name">Job 2</span></a>
                 <a href="/job_detail/j0.html"><span class="job-name">Job 0 again</span></a>
               </div></body></html>"#
            .to_string();
        let mut browser = FakeBrowser::new().with_page(LISTING_URL, listing);
        for i in 0..3 {
            browser = browser.with_page(
                &detail_url(i),
                detail_page(&format!("Job {}", i), "React 和 MySQL 经验"),
            );
        }

        let batch = crawler(browser).run().await.unwrap();
        assert_eq!(batch.len(), 3);
        for (i, posting) in batch.iter().enumerate() {
            assert_eq!(posting.title, format!("Job {}", i));
            assert_eq!(posting.skills, vec!["React", "MySQL"]);
        }
    }
}
