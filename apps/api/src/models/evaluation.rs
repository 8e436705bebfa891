use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document uploaded alongside the case form. Read once, fully, into memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// One form submission: the case, the candidate, and the candidate's document.
#[derive(Debug, Clone, Default)]
pub struct CaseInput {
    pub case_id: String,
    pub client: String,
    pub project: String,
    /// The BP (business partner) supplying the candidate.
    pub partner: String,
    pub candidate_info: String,
    pub document: Option<UploadedFile>,
}

impl CaseInput {
    /// Names of the required fields that are empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("case_id", &self.case_id),
            ("client", &self.client),
            ("project", &self.project),
            ("partner", &self.partner),
            ("candidate_info", &self.candidate_info),
        ] {
            if value.is_empty() {
                missing.push(name);
            }
        }
        if self.document.as_ref().map_or(true, |doc| doc.name.is_empty()) {
            missing.push("document");
        }
        missing
    }
}

/// The three fields recovered from the model's reply.
///
/// `score` is `None` when no line carried the score label; that is a partial
/// result, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: Option<String>,
    pub comment: String,
    pub proposal: String,
}

/// What a successful submission hands to the display layer.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub evaluation_id: Uuid,
    pub case_id: String,
    pub evaluated_at: DateTime<Utc>,
    pub result: EvaluationResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_input() -> CaseInput {
        CaseInput {
            case_id: "A-100".to_string(),
            client: "ACME".to_string(),
            project: "Billing migration".to_string(),
            partner: "Partner KK".to_string(),
            candidate_info: "Java 10 years".to_string(),
            document: Some(UploadedFile::new("resume.txt", "text")),
        }
    }

    #[test]
    fn test_complete_input_has_no_missing_fields() {
        assert!(complete_input().missing_fields().is_empty());
    }

    #[test]
    fn test_missing_fields_reported_in_form_order() {
        let input = CaseInput {
            client: String::new(),
            candidate_info: String::new(),
            document: None,
            ..complete_input()
        };
        assert_eq!(
            input.missing_fields(),
            vec!["client", "candidate_info", "document"]
        );
    }

    #[test]
    fn test_document_with_empty_name_counts_as_missing() {
        let input = CaseInput {
            document: Some(UploadedFile::new("", Bytes::new())),
            ..complete_input()
        };
        assert_eq!(input.missing_fields(), vec!["document"]);
    }

    #[test]
    fn test_whitespace_only_field_is_not_missing() {
        let input = CaseInput {
            partner: " ".to_string(),
            ..complete_input()
        };
        assert!(input.missing_fields().is_empty());
    }

    #[test]
    fn test_absent_score_serializes_as_null() {
        let result = EvaluationResult::default();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["score"].is_null());
        assert_eq!(json["comment"], "");
    }
}
