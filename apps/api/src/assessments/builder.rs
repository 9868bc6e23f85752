//! Assessment builder: edits sections and questions locally, then saves the
//! whole assessment in one request.

use chrono::{DateTime, Utc};
use tracing::error;
use uuid::Uuid;

use crate::forms::{FormErrors, SubmitError};
use crate::models::assessment::{Assessment, Question, QuestionType, Section};
use crate::notify::{Notifier, Toast};
use crate::transport::MockTransport;

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentBuilder {
    /// Set when editing an existing assessment.
    id: Option<String>,
    created_at: Option<DateTime<Utc>>,
    pub job_id: String,
    pub title: String,
    pub description: String,
    sections: Vec<Section>,
}

impl Default for AssessmentBuilder {
    fn default() -> Self {
        AssessmentBuilder {
            id: None,
            created_at: None,
            job_id: String::new(),
            title: String::new(),
            description: String::new(),
            sections: vec![empty_section()],
        }
    }
}

fn empty_section() -> Section {
    Section {
        id: format!("section-{}", Uuid::new_v4()),
        title: String::new(),
        questions: Vec::new(),
    }
}

impl AssessmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit mode. An assessment without sections starts with one empty section.
    pub fn from_assessment(assessment: &Assessment) -> Self {
        let sections = if assessment.sections.is_empty() {
            vec![empty_section()]
        } else {
            assessment.sections.clone()
        };
        AssessmentBuilder {
            id: Some(assessment.id.clone()),
            created_at: Some(assessment.created_at),
            job_id: assessment.job_id.clone(),
            title: assessment.title.clone(),
            description: assessment.description.clone(),
            sections,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn add_section(&mut self) -> usize {
        self.sections.push(empty_section());
        self.sections.len() - 1
    }

    pub fn remove_section(&mut self, index: usize) -> bool {
        if index >= self.sections.len() {
            return false;
        }
        self.sections.remove(index);
        true
    }

    pub fn set_section_title(&mut self, index: usize, title: impl Into<String>) -> bool {
        match self.sections.get_mut(index) {
            Some(section) => {
                section.title = title.into();
                true
            }
            None => false,
        }
    }

    /// Next unused `q-{section}-{n}` id. Looks across every section, since
    /// indices shift when sections are removed.
    fn next_question_id(&self, section: usize) -> String {
        let prefix = format!("q-{section}-");
        let next = self
            .sections
            .iter()
            .flat_map(|s| &s.questions)
            .filter_map(|q| q.id.strip_prefix(&prefix)?.parse::<usize>().ok())
            .max()
            .map_or(0, |n| n + 1);
        format!("{prefix}{next}")
    }

    /// Appends a required single-choice question with two blank options.
    pub fn add_question(&mut self, section: usize) -> Option<&mut Question> {
        let id = self.next_question_id(section);
        let questions = &mut self.sections.get_mut(section)?.questions;
        questions.push(Question {
            id,
            kind: QuestionType::SingleChoice,
            question: String::new(),
            options: vec![String::new(), String::new()],
            required: true,
        });
        questions.last_mut()
    }

    pub fn remove_question(&mut self, section: usize, question: usize) -> bool {
        let Some(questions) = self.sections.get_mut(section).map(|s| &mut s.questions) else {
            return false;
        };
        if question >= questions.len() {
            return false;
        }
        questions.remove(question);
        true
    }

    pub fn question_mut(&mut self, section: usize, question: usize) -> Option<&mut Question> {
        self.sections.get_mut(section)?.questions.get_mut(question)
    }

    /// Changes the type, giving choice questions two blank options and
    /// clearing options from every other type.
    pub fn set_question_type(&mut self, section: usize, question: usize, kind: QuestionType) -> bool {
        let Some(q) = self.question_mut(section, question) else {
            return false;
        };
        q.kind = kind;
        if kind.has_options() {
            if q.options.is_empty() {
                q.options = vec![String::new(), String::new()];
            }
        } else {
            q.options.clear();
        }
        true
    }

    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        if self.job_id.trim().is_empty() {
            errors.insert("jobId", "Please select a job");
        }
        if self.title.trim().is_empty() {
            errors.insert("title", "Assessment title is required");
        }
        errors
    }

    /// The assessment as it will be saved. Sections without a title or
    /// without questions are dropped.
    pub fn build(&self) -> Assessment {
        Assessment {
            id: self
                .id
                .clone()
                .unwrap_or_else(|| format!("assessment-{}", Uuid::new_v4())),
            job_id: self.job_id.clone(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            sections: self
                .sections
                .iter()
                .filter(|s| !s.title.trim().is_empty() && !s.questions.is_empty())
                .cloned()
                .collect(),
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }

    /// POST for a new assessment, PUT for an edited one.
    pub async fn save(
        &self,
        transport: &MockTransport,
        notifier: &dyn Notifier,
    ) -> Result<Assessment, SubmitError> {
        let errors = self.validate();
        if !errors.is_empty() {
            notifier.notify(Toast::error("Please fill in all required fields"));
            return Err(SubmitError::Invalid(errors));
        }

        let assessment = self.build();
        let result = match &self.id {
            Some(id) => {
                transport
                    .put::<_, Assessment>(&format!("/assessments/{id}"), &assessment)
                    .await
            }
            None => transport.post::<_, Assessment>("/assessments", &assessment).await,
        };

        match result {
            Ok(saved) => {
                notifier.notify(Toast::success(if self.is_edit() {
                    "Assessment updated successfully!"
                } else {
                    "Assessment created successfully!"
                }));
                Ok(saved)
            }
            Err(e) => {
                error!("Error saving assessment: {e}");
                notifier.notify(Toast::error("Failed to save assessment"));
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastLog;
    use crate::store::seed::seed_if_empty;
    use crate::store::tests::memory_store;
    use crate::transport::latency::Latency;
    use crate::transport::tests::transport_for;

    fn one_question_builder() -> AssessmentBuilder {
        let mut builder = AssessmentBuilder::new();
        builder.job_id = "job-4".to_string();
        builder.title = "Analyst Screen".to_string();
        builder.set_section_title(0, "Basics");
        builder.add_question(0).unwrap().question = "SQL or spreadsheets?".to_string();
        builder
    }

    #[test]
    fn test_new_builder_has_one_empty_section() {
        let builder = AssessmentBuilder::new();
        assert_eq!(builder.sections().len(), 1);
        assert!(!builder.is_edit());
    }

    #[test]
    fn test_added_questions_default_to_single_choice() {
        let mut builder = AssessmentBuilder::new();
        let q = builder.add_question(0).unwrap();
        assert_eq!(q.id, "q-0-0");
        assert_eq!(q.kind, QuestionType::SingleChoice);
        assert_eq!(q.options.len(), 2);
        assert!(q.required);
        assert_eq!(builder.add_question(0).unwrap().id, "q-0-1");
        assert!(builder.add_question(5).is_none());
    }

    #[test]
    fn test_question_ids_stay_unique_after_removal() {
        let mut builder = AssessmentBuilder::new();
        builder.add_question(0);
        builder.add_question(0);
        assert!(builder.remove_question(0, 0));
        builder.add_question(0);

        let ids: Vec<&str> = builder.sections()[0]
            .questions
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(ids, vec!["q-0-1", "q-0-2"]);
    }

    #[test]
    fn test_question_ids_skip_ids_left_by_removed_section() {
        let mut builder = AssessmentBuilder::new();
        builder.add_section();
        builder.add_question(1);
        builder.add_question(0);
        assert!(builder.remove_section(0));
        // The old section 1 is now section 0 and still holds "q-1-0".
        assert!(builder.add_question(1).is_none());
        builder.add_section();
        assert_eq!(builder.add_question(1).map(|q| q.id.clone()), Some("q-1-1".to_string()));
    }

    #[test]
    fn test_type_change_manages_options() {
        let mut builder = one_question_builder();
        assert!(builder.set_question_type(0, 0, QuestionType::Numeric));
        assert!(builder.question_mut(0, 0).unwrap().options.is_empty());
        assert!(builder.set_question_type(0, 0, QuestionType::MultiChoice));
        assert_eq!(builder.question_mut(0, 0).unwrap().options.len(), 2);
        assert!(!builder.set_question_type(0, 9, QuestionType::Numeric));
    }

    #[test]
    fn test_build_drops_incomplete_sections() {
        let mut builder = one_question_builder();
        let untitled = builder.add_section();
        builder.add_question(untitled);
        let titled_empty = builder.add_section();
        builder.set_section_title(titled_empty, "Nothing here");

        let assessment = builder.build();
        assert_eq!(assessment.sections.len(), 1);
        assert_eq!(assessment.sections[0].title, "Basics");
        assert!(assessment.id.starts_with("assessment-"));
    }

    #[test]
    fn test_remove_section_and_question() {
        let mut builder = one_question_builder();
        assert!(builder.remove_question(0, 0));
        assert!(!builder.remove_question(0, 0));
        assert!(builder.remove_section(0));
        assert!(!builder.remove_section(0));
        assert!(builder.sections().is_empty());
    }

    #[test]
    fn test_validation_requires_job_and_title() {
        let errors = AssessmentBuilder::new().validate();
        assert_eq!(errors.get("jobId"), Some("Please select a job"));
        assert_eq!(errors.get("title"), Some("Assessment title is required"));
    }

    #[tokio::test]
    async fn test_create_then_edit_round_trip() {
        let store = memory_store().await;
        seed_if_empty(&store).await.unwrap();
        let transport = transport_for(store.clone(), Latency::instant());
        let log = ToastLog::default();

        let created = one_question_builder().save(&transport, &log).await.unwrap();
        assert_eq!(log.last(), Some(Toast::success("Assessment created successfully!")));
        assert_eq!(store.assessments.count().await.unwrap(), 4);

        let mut editor = AssessmentBuilder::from_assessment(&created);
        assert!(editor.is_edit());
        editor.description = "Updated".to_string();
        let updated = editor.save(&transport, &log).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(store.assessments.count().await.unwrap(), 4);
        assert_eq!(log.last(), Some(Toast::success("Assessment updated successfully!")));
    }

    #[tokio::test]
    async fn test_invalid_builder_sends_nothing() {
        let store = memory_store().await;
        let transport = transport_for(store.clone(), Latency::instant());
        let log = ToastLog::default();

        let err = AssessmentBuilder::new().save(&transport, &log).await.unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert_eq!(store.assessments.count().await.unwrap(), 0);
    }
}
