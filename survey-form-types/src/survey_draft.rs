use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EmailAddress, Question};

/// The payload submitted when a survey is created or updated.
///
/// A draft is a snapshot: the editor builds a fresh one for every submission
/// and never mutates it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDraft {
    /// Survey name as typed by the author.
    pub name: String,

    /// Last day on which participants may answer.
    pub expire_date: Option<NaiveDate>,

    /// Questions in presentation order.
    pub questions: Vec<Question>,

    /// Participants who receive the survey link.
    pub participants: Vec<EmailAddress>,
}

impl SurveyDraft {
    /// Check if the draft has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnswerType;

    #[test]
    fn serializes_camel_case_with_iso_date() {
        let draft = SurveyDraft {
            name: "Team pulse".to_string(),
            expire_date: NaiveDate::from_ymd_opt(2026, 12, 31),
            questions: vec![Question::new("How satisfied?", AnswerType::Likert).unwrap()],
            participants: vec![EmailAddress::parse("x@y.com").unwrap()],
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Team pulse",
                "expireDate": "2026-12-31",
                "questions": [{ "text": "How satisfied?", "answerType": "LIKERT" }],
                "participants": ["x@y.com"],
            })
        );
    }

    #[test]
    fn unset_expiry_is_null() {
        let json = serde_json::to_value(SurveyDraft::default()).unwrap();
        assert_eq!(json["expireDate"], serde_json::Value::Null);
    }
}
