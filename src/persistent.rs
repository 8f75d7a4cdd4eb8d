use crate::error::CrawlerError;
use crate::job::JobPosting;
use chrono::{DateTime, FixedOffset};
use futures::TryStreamExt;
use sqlx::{sqlite::SqliteConnectOptions, sqlite::SqlitePoolOptions, Row, SqlitePool};
use tracing::debug;

const DB_FILE: &str = "jobs.sqlite3";

/// Append-only posting store. One run writes one batch in one transaction;
/// there is no update path.
pub struct Persistent {
    pub name: String,
    table: String,
    pool: SqlitePool,
}

impl Persistent {
    pub async fn new(name: &str) -> Result<Persistent, CrawlerError> {
        let opt = SqliteConnectOptions::new()
            .filename(DB_FILE)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(opt).await?;
        Persistent::with_pool(name, pool).await
    }

    /// In-memory store, for tests. Single connection so every query sees
    /// the same database.
    pub async fn in_memory(name: &str) -> Result<Persistent, CrawlerError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(SqliteConnectOptions::new())
            .await?;
        Persistent::with_pool(name, pool).await
    }

    async fn with_pool(name: &str, pool: SqlitePool) -> Result<Persistent, CrawlerError> {
        let p = Persistent {
            name: name.to_string(),
            table: format!("{}_postings", name),
            pool,
        };
        if !p.is_table_exists().await? {
            p.create_table().await?;
        }
        Ok(p)
    }

    async fn is_table_exists(&self) -> Result<bool, CrawlerError> {
        Ok(
            sqlx::query("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
                .bind(&self.table)
                .fetch_optional(&self.pool)
                .await?
                .is_some(),
        )
    }

    async fn create_table(&self) -> Result<(), CrawlerError> {
        let query = format!(
            r#"
                CREATE TABLE {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    created_at DATETIME,
                    source TEXT,
                    title TEXT,
                    company TEXT,
                    salary TEXT,
                    salary_min REAL,
                    salary_max REAL,
                    location TEXT,
                    experience TEXT,
                    education TEXT,
                    description TEXT,
                    skills TEXT
                )
            "#,
            self.table
        );
        sqlx::query(query.as_str()).execute(&self.pool).await?;
        debug!("Created {}", self.table);
        Ok(())
    }

    /// The bulk insert: the whole batch goes in as one transaction.
    pub async fn insert_jobs(&self, jobs: &[JobPosting]) -> Result<(), CrawlerError> {
        let query = format!(
            r#"INSERT INTO {} (
                created_at,
                source,
                title,
                company,
                salary,
                salary_min,
                salary_max,
                location,
                experience,
                education,
                description,
                skills) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
            self.table
        );

        let mut tx = self.pool.begin().await?;
        for job in jobs {
            let (salary_min, salary_max) = job.salary.bounds();
            sqlx::query(&query)
                .bind(get_now())
                .bind(job.source.as_str())
                .bind(&job.title)
                .bind(&job.company)
                .bind(job.salary.as_text())
                .bind(salary_min)
                .bind(salary_max)
                .bind(&job.location)
                .bind(&job.experience)
                .bind(&job.education)
                .bind(&job.description)
                .bind(job.skills.join("|"))
                .execute(&mut tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn jobs_count(&self) -> Result<u32, CrawlerError> {
        let query = format!("SELECT COUNT(*) FROM {}", self.table);
        Ok(sqlx::query(&query)
            .fetch_one(&self.pool)
            .await?
            .try_get(0)?)
    }

    /// Most recently inserted titles, newest first. Diagnostic read only.
    pub async fn recent_titles(&self, limit: u32) -> Result<Vec<String>, CrawlerError> {
        let query = format!("SELECT title FROM {} ORDER BY id DESC LIMIT ?", self.table);
        let mut titles = vec![];
        let mut rows = sqlx::query(&query).bind(limit).fetch(&self.pool);
        while let Some(row) = rows.try_next().await? {
            titles.push(row.try_get("title")?);
        }
        Ok(titles)
    }

    /// Releases the connection pool. Safe to call more than once.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn get_now() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(
        &chrono::offset::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    )
    .expect("Local time is valid rfc3339")
}
