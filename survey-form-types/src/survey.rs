use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EmailAddress, Question, SurveyId};

/// Lifecycle state of a persisted survey.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurveyStatus {
    #[default]
    Draft,
    Sent,
    Completed,
    Expired,
}

impl SurveyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Sent => "SENT",
            Self::Completed => "COMPLETED",
            Self::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A survey as returned by the persistence or public response service.
///
/// Listings may omit questions and participants and only report a count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: SurveyId,

    pub name: String,

    #[serde(default)]
    pub expire_date: Option<NaiveDate>,

    #[serde(default)]
    pub status: SurveyStatus,

    #[serde(default)]
    pub questions: Vec<Question>,

    #[serde(default)]
    pub participants: Vec<EmailAddress>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_count: Option<u32>,
}

impl Survey {
    /// Only drafts may be edited or sent.
    pub fn is_draft(&self) -> bool {
        self.status == SurveyStatus::Draft
    }

    /// Participant count as reported by the server, or the length of the
    /// participant list when no count was sent.
    pub fn participant_total(&self) -> usize {
        self.participant_count
            .map(|n| n as usize)
            .unwrap_or(self.participants.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_listing_entry() {
        let survey: Survey = serde_json::from_str(
            r#"{"id":3,"name":"Pulse","expireDate":"2026-01-31","status":"SENT","participantCount":12}"#,
        )
        .unwrap();

        assert_eq!(survey.id.as_str(), "3");
        assert_eq!(survey.status, SurveyStatus::Sent);
        assert_eq!(survey.expire_date, NaiveDate::from_ymd_opt(2026, 1, 31));
        assert!(survey.questions.is_empty());
        assert_eq!(survey.participant_total(), 12);
        assert!(!survey.is_draft());
    }

    #[test]
    fn missing_status_defaults_to_draft() {
        let survey: Survey = serde_json::from_str(r#"{"id":"a","name":"x"}"#).unwrap();
        assert!(survey.is_draft());
        assert_eq!(survey.expire_date, None);
        assert_eq!(survey.participant_total(), 0);
    }
}
