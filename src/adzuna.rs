use crate::error::CrawlerError;
use crate::job::{JobPosting, Salary, Source};
use crate::skills::SkillCatalog;
use serde::Deserialize;
use tracing::{debug, info};

const BASE_URL: &str = "https://api.adzuna.com";

#[derive(Debug, Clone)]
pub struct AdzunaCredentials {
    pub app_id: String,
    pub app_key: String,
}

/// Client for the Adzuna-shaped search endpoint. This source skips the
/// discovery/detail phases entirely; one response page maps straight into
/// skill-tagged postings with numeric salary bounds.
pub struct AdzunaClient {
    client: reqwest::Client,
    base_url: String,
    credentials: AdzunaCredentials,
}

impl AdzunaClient {
    pub fn new(credentials: AdzunaCredentials) -> Result<AdzunaClient, CrawlerError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(AdzunaClient {
            client,
            base_url: BASE_URL.to_string(),
            credentials,
        })
    }

    pub async fn search(
        &self,
        country: &str,
        query: &str,
        catalog: &SkillCatalog,
    ) -> Result<Vec<JobPosting>, CrawlerError> {
        let url = format!("{}/v1/api/jobs/{}/search/1", self.base_url, country);
        debug!("Visit {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("app_id", self.credentials.app_id.as_str()),
                ("app_key", self.credentials.app_key.as_str()),
                ("what", query),
                ("content-type", "application/json"),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CrawlerError::PageLoad(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        let page: SearchResponse = response.json().await?;
        info!("API returned {} results", page.results.len());

        Ok(page
            .results
            .into_iter()
            .map(|result| result.into_posting(catalog))
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ApiResult>,
}

#[derive(Debug, Deserialize)]
struct ApiResult {
    #[serde(default)]
    title: String,
    company: Option<DisplayName>,
    location: Option<DisplayName>,
    #[serde(default)]
    description: String,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DisplayName {
    #[serde(default)]
    display_name: String,
}

impl ApiResult {
    fn into_posting(self, catalog: &SkillCatalog) -> JobPosting {
        let skills = catalog.extract(&self.description);
        JobPosting {
            title: self.title,
            company: self.company.map(|c| c.display_name).unwrap_or_default(),
            salary: Salary::Range {
                min: self.salary_min,
                max: self.salary_max,
            },
            location: self.location.map(|l| l.display_name).unwrap_or_default(),
            experience: String::new(),
            education: String::new(),
            description: self.description,
            skills,
            source: Source::Api,
        }
    }
}
