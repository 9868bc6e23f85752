use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    SingleChoice,
    MultiChoice,
    ShortText,
    LongText,
    Numeric,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "single-choice",
            QuestionType::MultiChoice => "multi-choice",
            QuestionType::ShortText => "short-text",
            QuestionType::LongText => "long-text",
            QuestionType::Numeric => "numeric",
        }
    }

    pub fn has_options(self) -> bool {
        matches!(self, QuestionType::SingleChoice | QuestionType::MultiChoice)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub job_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    pub created_at: DateTime<Utc>,
}

impl Assessment {
    pub fn total_questions(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}

/// A candidate's answers to the assessment attached to a job, keyed by job id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub job_id: String,
    pub responses: BTreeMap<String, Value>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentStats {
    pub total_assessments: usize,
    pub completed_assessments: usize,
    pub pending_assessments: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_type_field_is_named_type() {
        let q: Question = serde_json::from_value(json!({
            "id": "q-0-0",
            "type": "multi-choice",
            "question": "Pick all that apply",
            "options": ["a", "b"],
            "required": true
        }))
        .unwrap();
        assert_eq!(q.kind, QuestionType::MultiChoice);
        assert!(q.kind.has_options());
    }

    #[test]
    fn test_options_default_to_empty() {
        let q: Question = serde_json::from_value(json!({
            "id": "q-0-1",
            "type": "numeric",
            "question": "Years of experience?"
        }))
        .unwrap();
        assert!(q.options.is_empty());
        assert!(!q.required);
    }
}
