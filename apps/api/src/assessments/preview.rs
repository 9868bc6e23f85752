//! Read-only preview of an assessment and the answer checks a candidate's
//! responses go through before they are submitted.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::models::assessment::{Assessment, Question, QuestionType};

#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    Radio(Vec<String>),
    Checkbox(Vec<String>),
    Text { multiline: bool },
    Number,
}

impl InputKind {
    fn for_question(question: &Question) -> Self {
        match question.kind {
            QuestionType::SingleChoice => InputKind::Radio(question.options.clone()),
            QuestionType::MultiChoice => InputKind::Checkbox(question.options.clone()),
            QuestionType::ShortText => InputKind::Text { multiline: false },
            QuestionType::LongText => InputKind::Text { multiline: true },
            QuestionType::Numeric => InputKind::Number,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewQuestion {
    /// 1-based within its section.
    pub number: usize,
    pub id: String,
    pub text: String,
    pub kind: QuestionType,
    pub required: bool,
    pub input: InputKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSection {
    pub number: usize,
    pub title: String,
    pub questions: Vec<PreviewQuestion>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentPreview {
    pub title: String,
    pub description: String,
    pub sections: Vec<PreviewSection>,
}

impl AssessmentPreview {
    pub fn new(assessment: &Assessment) -> Self {
        let sections = assessment
            .sections
            .iter()
            .enumerate()
            .map(|(si, section)| PreviewSection {
                number: si + 1,
                title: section.title.clone(),
                questions: section
                    .questions
                    .iter()
                    .enumerate()
                    .map(|(qi, q)| PreviewQuestion {
                        number: qi + 1,
                        id: q.id.clone(),
                        text: q.question.clone(),
                        kind: q.kind,
                        required: q.required,
                        input: InputKind::for_question(q),
                    })
                    .collect(),
            })
            .collect();

        AssessmentPreview {
            title: assessment.title.clone(),
            description: assessment.description.clone(),
            sections,
        }
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}

impl fmt::Display for AssessmentPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }
        writeln!(
            f,
            "{} Sections, {} Questions",
            self.section_count(),
            self.question_count()
        )?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}. {}", section.number, section.title)?;
            for q in &section.questions {
                let marker = if q.required { " *" } else { "" };
                writeln!(f, "  {}. {}{} [{}]", q.number, q.text, marker, q.kind.as_str())?;
                match &q.input {
                    InputKind::Radio(options) => {
                        for option in options {
                            writeln!(f, "     ( ) {option}")?;
                        }
                    }
                    InputKind::Checkbox(options) => {
                        for option in options {
                            writeln!(f, "     [ ] {option}")?;
                        }
                    }
                    InputKind::Text { .. } => writeln!(f, "     Answer will be entered here...")?,
                    InputKind::Number => writeln!(f, "     Enter number...")?,
                }
            }
        }
        Ok(())
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

fn check_answer(question: &Question, answer: &Value) -> Option<&'static str> {
    let in_options = |v: &Value| v.as_str().is_some_and(|s| question.options.iter().any(|o| o == s));
    match question.kind {
        QuestionType::SingleChoice if !in_options(answer) => {
            Some("Please choose one of the listed options")
        }
        QuestionType::MultiChoice => match answer.as_array() {
            Some(picked) if picked.iter().all(in_options) => None,
            _ => Some("Please choose from the listed options"),
        },
        QuestionType::ShortText | QuestionType::LongText if !answer.is_string() => {
            Some("Please enter a text answer")
        }
        QuestionType::Numeric => {
            let numeric = answer.is_number()
                || answer
                    .as_str()
                    .is_some_and(|s| s.trim().parse::<f64>().is_ok_and(f64::is_finite));
            (!numeric).then_some("Please enter a number")
        }
        _ => None,
    }
}

/// Checks `responses` (keyed by question id) against every question.
/// Returns one message per failing question id; empty means submittable.
/// Blank optional answers are skipped.
pub fn check_responses(
    assessment: &Assessment,
    responses: &BTreeMap<String, Value>,
) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    for question in assessment.sections.iter().flat_map(|s| &s.questions) {
        let answer = responses.get(&question.id);
        let message = if is_blank(answer) {
            question.required.then_some("This question is required")
        } else {
            answer.and_then(|a| check_answer(question, a))
        };
        if let Some(message) = message {
            errors.insert(question.id.clone(), message.to_string());
        }
    }
    errors
}
