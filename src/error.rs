#[derive(Debug, thiserror::Error)]
pub enum CrawlerError {
    #[error("Database error")]
    Database(#[from] sqlx::error::Error),

    #[error("Request error")]
    Http(#[from] reqwest::Error),

    #[error("Page failed to load: {0}")]
    PageLoad(String),
}
