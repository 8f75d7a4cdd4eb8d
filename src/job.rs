use std::fmt;

/// Where a posting came from. Board postings carry free-text salaries,
/// API postings carry numeric bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    Board,
    Api,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Board => "board",
            Source::Api => "api",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Salary {
    Text(String),
    Range { min: Option<f64>, max: Option<f64> },
}

impl Default for Salary {
    fn default() -> Self {
        Salary::Text(String::new())
    }
}

impl Salary {
    /// Free-text rendering; ranges are rendered from their numeric bounds.
    pub fn as_text(&self) -> String {
        match self {
            Salary::Text(s) => s.clone(),
            Salary::Range { min: None, max: None } => String::new(),
            Salary::Range { min: Some(min), max: None } => format!("{}+", min),
            Salary::Range { min: None, max: Some(max) } => format!("up to {}", max),
            Salary::Range {
                min: Some(min),
                max: Some(max),
            } => format!("{} - {}", min, max),
        }
    }

    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self {
            Salary::Text(_) => (None, None),
            Salary::Range { min, max } => (*min, *max),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub salary: Salary,
    pub location: String,
    pub experience: String,
    pub education: String,
    pub description: String,
    pub skills: Vec<String>,
    pub source: Source,
}

impl JobPosting {
    /// Fallback record for a detail page that could not be visited.
    /// Only the discovery-time title survives.
    pub fn degraded(title: &str) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            ..JobPosting::default()
        }
    }
}

impl fmt::Display for JobPosting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title       : {}", self.title)?;
        writeln!(f, "Company     : {}", self.company)?;
        writeln!(f, "Salary      : {}", self.salary.as_text())?;
        writeln!(f, "Location    : {}", self.location)?;
        writeln!(f, "Experience  : {}", self.experience)?;
        writeln!(f, "Education   : {}", self.education)?;
        writeln!(f, "Skills      : {}", self.skills.join(", "))?;
        writeln!(f, "Description : {}", self.description)?;
        Ok(())
    }
}

/// A discovered (title, url) pair pointing at a detail page that has not
/// been visited yet. Unique by url within one discovery pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateReference {
    pub title: String,
    pub url: String,
    pub position: usize,
}
