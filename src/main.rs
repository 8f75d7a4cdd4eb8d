use job_market_crawler::board;
use job_market_crawler::crawl::{BoardCrawler, HttpBrowser};
use job_market_crawler::error::CrawlerError;
use job_market_crawler::persistent::Persistent;
use job_market_crawler::skills::SkillCatalog;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

const KEYWORD: &str = "前端开发";
const CITY: &str = "101010100";

async fn scrape_and_store(store: &Persistent) -> Result<(), CrawlerError> {
    let browser = HttpBrowser::new()?;
    let crawler = BoardCrawler::new(
        browser,
        SkillCatalog::default(),
        board::listing_url(KEYWORD, CITY),
    );

    let batch = crawler.run().await?;
    if batch.is_empty() {
        info!("Nothing to persist");
        return Ok(());
    }

    store.insert_jobs(&batch).await?;
    info!(
        "Wrote {} postings, store now holds {}",
        batch.len(),
        store.jobs_count().await?
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info,sqlx=warn".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let store = Persistent::new("jobs").await?;

    // Teardown runs whether the run succeeded or not.
    let result = scrape_and_store(&store).await;
    store.close().await;
    result?;

    Ok(())
}
