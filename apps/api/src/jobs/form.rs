use crate::forms::{split_list, FormErrors};
use crate::models::job::{slugify, Job, JobInput, JobPatch, JobStatus, JobType};

/// Create/edit form for a job. `requirements` is one per line, `tags` comma separated.
#[derive(Debug, Clone, PartialEq)]
pub struct JobForm {
    pub title: String,
    pub location: String,
    pub job_type: JobType,
    pub salary: String,
    pub description: String,
    pub requirements: String,
    pub tags: String,
    pub status: JobStatus,
}

impl Default for JobForm {
    fn default() -> Self {
        JobForm {
            title: String::new(),
            location: String::new(),
            job_type: JobType::FullTime,
            salary: String::new(),
            description: String::new(),
            requirements: String::new(),
            tags: String::new(),
            status: JobStatus::Active,
        }
    }
}

impl JobForm {
    /// Prefills the form for editing.
    pub fn from_job(job: &Job) -> Self {
        JobForm {
            title: job.title.clone(),
            location: job.location.clone(),
            job_type: job.job_type,
            salary: job.salary.clone(),
            description: job.description.clone(),
            requirements: job.requirements.join("\n"),
            tags: job.tags.join(", "),
            status: job.status,
        }
    }

    /// Field checks. `existing` is the full job list and is only consulted
    /// when creating, for slug uniqueness.
    pub fn validate(&self, existing: Option<&[Job]>) -> FormErrors {
        let mut errors = FormErrors::default();

        if self.title.trim().is_empty() {
            errors.insert("title", "Job title is required");
        }
        if self.description.trim().is_empty() {
            errors.insert("description", "Job description is required");
        }

        if let Some(jobs) = existing {
            let slug = slugify(&self.title);
            if !slug.is_empty() && jobs.iter().any(|j| j.slug == slug) {
                errors.insert("title", "A job with this title already exists");
            }
        }

        errors
    }

    pub fn to_input(&self) -> JobInput {
        JobInput {
            title: self.title.trim().to_string(),
            location: self.location.trim().to_string(),
            job_type: self.job_type,
            salary: self.salary.trim().to_string(),
            description: self.description.trim().to_string(),
            requirements: split_list(&self.requirements, '\n'),
            tags: split_list(&self.tags, ','),
            status: self.status,
        }
    }

    pub fn to_patch(&self) -> JobPatch {
        let input = self.to_input();
        JobPatch {
            title: Some(input.title),
            location: Some(input.location),
            job_type: Some(input.job_type),
            salary: Some(input.salary),
            description: Some(input.description),
            requirements: Some(input.requirements),
            tags: Some(input.tags),
            status: Some(input.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::job;

    fn filled() -> JobForm {
        JobForm {
            title: "Backend Engineer".to_string(),
            description: "Own the API".to_string(),
            requirements: "Rust\n\nSQL\n".to_string(),
            tags: "rust, sql,".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_fields() {
        let errors = JobForm::default().validate(None);
        assert_eq!(errors.get("title"), Some("Job title is required"));
        assert_eq!(errors.get("description"), Some("Job description is required"));
    }

    #[test]
    fn test_duplicate_slug_rejected_on_create() {
        let mut existing = job("x", 0);
        existing.slug = "backend-engineer".to_string();

        let errors = filled().validate(Some(&[existing]));
        assert_eq!(errors.get("title"), Some("A job with this title already exists"));
        assert!(filled().validate(None).is_empty());
    }

    #[test]
    fn test_to_input_splits_lists() {
        let input = filled().to_input();
        assert_eq!(input.requirements, vec!["Rust".to_string(), "SQL".to_string()]);
        assert_eq!(input.tags, vec!["rust".to_string(), "sql".to_string()]);
    }

    #[test]
    fn test_from_job_round_trips_lists() {
        let mut source = job("x", 0);
        source.requirements = vec!["A".to_string(), "B".to_string()];
        source.tags = vec!["t1".to_string(), "t2".to_string()];
        let form = JobForm::from_job(&source);
        assert_eq!(form.requirements, "A\nB");
        assert_eq!(form.tags, "t1, t2");
        assert_eq!(form.to_input().tags, source.tags);
    }
}
