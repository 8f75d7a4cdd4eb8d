pub mod adzuna;
pub mod board;
pub mod crawl;
pub mod error;
pub mod job;
pub mod persistent;
pub mod skills;
pub mod stats;

pub use crawl::{BoardCrawler, Browse, CrawlLimits, HttpBrowser};
pub use error::CrawlerError;
pub use job::{CandidateReference, JobPosting, Salary, Source};
pub use skills::SkillCatalog;
