use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Active,
    Archived,
}

impl JobStatus {
    pub fn toggled(self) -> Self {
        match self {
            JobStatus::Active => JobStatus::Archived,
            JobStatus::Archived => JobStatus::Active,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Remote,
    Contract,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Remote,
        JobType::Contract,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Remote => "Remote",
            JobType::Contract => "Contract",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub status: JobStatus,
    pub job_type: JobType,
    pub location: String,
    pub salary: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Persisted ordinal. Dense (`0..n`) across the whole table.
    pub order: i64,
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Case-insensitive match on title or any tag.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

/// Fields a client may send when creating a job. The server assigns the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    pub title: String,
    #[serde(default)]
    pub location: String,
    pub job_type: JobType,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: JobStatus,
}

/// Partial update body for `PATCH /jobs/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

impl JobPatch {
    pub fn apply_to(self, job: &mut Job) {
        if let Some(title) = self.title {
            job.slug = slugify(&title);
            job.title = title;
        }
        if let Some(location) = self.location {
            job.location = location;
        }
        if let Some(job_type) = self.job_type {
            job.job_type = job_type;
        }
        if let Some(salary) = self.salary {
            job.salary = salary;
        }
        if let Some(description) = self.description {
            job.description = description;
        }
        if let Some(requirements) = self.requirements {
            job.requirements = requirements;
        }
        if let Some(tags) = self.tags {
            job.tags = tags;
        }
        if let Some(status) = self.status {
            job.status = status;
        }
    }
}

/// Body of `PATCH /jobs/:id/reorder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderBody {
    pub from_order: i64,
    pub to_order: i64,
}

/// Lowercased title with every whitespace run collapsed to a single `-`.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slugify_collapses_whitespace() {
        assert_eq!(slugify("Senior  Rust Engineer"), "senior-rust-engineer");
        assert_eq!(slugify("  QA "), "qa");
    }

    #[test]
    fn test_job_type_uses_display_names_on_the_wire() {
        assert_eq!(serde_json::to_value(JobType::FullTime).unwrap(), json!("Full-time"));
        let parsed: JobType = serde_json::from_value(json!("Part-time")).unwrap();
        assert_eq!(parsed, JobType::PartTime);
    }

    #[test]
    fn test_patch_retitles_and_reslugs() {
        let mut job = Job {
            id: "job-1".to_string(),
            title: "Old".to_string(),
            slug: "old".to_string(),
            status: JobStatus::Active,
            job_type: JobType::Remote,
            location: String::new(),
            salary: String::new(),
            description: String::new(),
            requirements: vec![],
            tags: vec!["rust".to_string()],
            order: 0,
            created_at: Utc::now(),
        };
        JobPatch {
            title: Some("Staff Engineer".to_string()),
            status: Some(JobStatus::Archived),
            ..Default::default()
        }
        .apply_to(&mut job);

        assert_eq!(job.slug, "staff-engineer");
        assert_eq!(job.status, JobStatus::Archived);
        assert_eq!(job.tags, vec!["rust".to_string()]);
    }

    #[test]
    fn test_reorder_body_is_camel_case() {
        let body: ReorderBody = serde_json::from_value(json!({"fromOrder": 0, "toOrder": 2})).unwrap();
        assert_eq!(body, ReorderBody { from_order: 0, to_order: 2 });
    }
}
