use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::transport::ClientError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

/// Field name → message, collected before anything is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(FormErrors),

    #[error(transparent)]
    Transport(#[from] ClientError),
}

/// Splits on `sep`, trims, and drops empty entries.
pub fn split_list(raw: &str, sep: char) -> Vec<String> {
    raw.split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loose `\S+@\S+\.\S+` shape check, matched anywhere in the value.
pub fn looks_like_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_trims_and_drops_empty() {
        assert_eq!(
            split_list(" rust, , go ,", ','),
            vec!["rust".to_string(), "go".to_string()]
        );
        assert_eq!(
            split_list("one\n\n two\n", '\n'),
            vec!["one".to_string(), "two".to_string()]
        );
    }

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("maya@example.com"));
        assert!(looks_like_email("a@b.c"));
        assert!(!looks_like_email("maya@example"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("maya @example.com"));
        assert!(!looks_like_email("maya@.com"));
        assert!(!looks_like_email(""));
        // Unanchored, so any matching run of non-space characters counts.
        assert!(looks_like_email("@x@y.z"));
        assert!(looks_like_email("first last@example.com"));
        assert!(!looks_like_email("a@b."));
    }
}
