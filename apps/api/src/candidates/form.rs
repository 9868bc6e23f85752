use crate::forms::{looks_like_email, split_list, FormErrors};
use crate::models::candidate::ApplicationInput;

/// Candidate-facing application form for one job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: String,
    pub experience: String,
    pub education: String,
    /// Comma separated.
    pub skills: String,
}

impl ApplicationForm {
    /// Message for a single field, or `None` when it is valid. Used for
    /// on-blur checks as well as the full-form pass.
    pub fn check_field(&self, field: &str) -> Option<&'static str> {
        match field {
            "name" if self.name.trim().is_empty() => Some("Name is required"),
            "email" if self.email.trim().is_empty() => Some("Email is required"),
            "email" if !looks_like_email(self.email.trim()) => Some("Invalid email format"),
            "phone" if self.phone.trim().is_empty() => Some("Phone number is required"),
            "coverLetter" if self.cover_letter.trim().is_empty() => {
                Some("Cover letter is required")
            }
            _ => None,
        }
    }

    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        for field in ["name", "email", "phone", "coverLetter"] {
            if let Some(message) = self.check_field(field) {
                errors.insert(field, message);
            }
        }
        errors
    }

    pub fn to_input(&self, job_id: &str) -> ApplicationInput {
        ApplicationInput {
            job_id: job_id.to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            resume: String::new(),
            cover_letter: self.cover_letter.trim().to_string(),
            experience: self.experience.trim().to_string(),
            education: self.education.trim().to_string(),
            skills: split_list(&self.skills, ','),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ApplicationForm {
        ApplicationForm {
            name: "Maya Okafor".to_string(),
            email: "maya@example.com".to_string(),
            phone: "+1-555-0100".to_string(),
            cover_letter: "Hello".to_string(),
            skills: "rust, sql, ".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_form_is_valid() {
        assert!(complete().validate().is_empty());
    }

    #[test]
    fn test_every_required_field_reported() {
        let errors = ApplicationForm::default().validate();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("coverLetter"), Some("Cover letter is required"));
    }

    #[test]
    fn test_bad_email_shape() {
        let form = ApplicationForm {
            email: "maya-at-example".to_string(),
            ..complete()
        };
        assert_eq!(form.check_field("email"), Some("Invalid email format"));
        assert_eq!(form.check_field("experience"), None);
    }

    #[test]
    fn test_to_input_splits_skills() {
        let input = complete().to_input("job-3");
        assert_eq!(input.job_id, "job-3");
        assert_eq!(input.skills, vec!["rust".to_string(), "sql".to_string()]);
    }
}
