use job_market_crawler::adzuna::{AdzunaClient, AdzunaCredentials};
use job_market_crawler::error::CrawlerError;
use job_market_crawler::persistent::Persistent;
use job_market_crawler::skills::SkillCatalog;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

const APP_ID: &str = "f6c83606";
const APP_KEY: &str = "754fb06e1abb0219006c8cb0a86cd0e0";
const COUNTRY: &str = "gb";
const QUERY: &str = "developer";

async fn fetch_and_store(store: &Persistent) -> Result<(), CrawlerError> {
    let client = AdzunaClient::new(AdzunaCredentials {
        app_id: APP_ID.to_string(),
        app_key: APP_KEY.to_string(),
    })?;

    let catalog = SkillCatalog::default();
    let batch = client.search(COUNTRY, QUERY, &catalog).await?;
    if batch.is_empty() {
        info!("Nothing to persist");
        return Ok(());
    }

    store.insert_jobs(&batch).await?;
    info!("Wrote {} postings", batch.len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,hyper=warn,reqwest=info,sqlx=warn".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let store = Persistent::new("jobs").await?;

    let result = fetch_and_store(&store).await;
    store.close().await;
    result?;

    Ok(())
}
