use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AnswerType, QuestionId};

/// Aggregated answers for one survey, as computed by the persistence service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    #[serde(default)]
    pub total_responses: u64,

    #[serde(default)]
    pub questions: Vec<QuestionResult>,
}

/// Aggregated answers for a single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<QuestionId>,

    pub text: String,

    pub answer_type: AnswerType,

    #[serde(default)]
    pub likert_average: Option<f64>,

    /// Scale point (1-5) to number of participants who chose it.
    #[serde(default)]
    pub likert_distribution: BTreeMap<u8, u64>,

    #[serde(default)]
    pub free_text_responses: Vec<String>,
}

impl QuestionResult {
    /// Number of participants who chose `value`.
    pub fn count_for(&self, value: u8) -> u64 {
        self.likert_distribution.get(&value).copied().unwrap_or(0)
    }

    /// Share of `total` participants who chose `value`, in percent.
    pub fn distribution_share(&self, value: u8, total: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        self.count_for(value) as f64 / total as f64 * 100.0
    }
}

impl ResultsSummary {
    pub fn likert_questions(&self) -> impl Iterator<Item = &QuestionResult> {
        self.questions
            .iter()
            .filter(|q| q.answer_type == AnswerType::Likert)
    }

    pub fn free_text_questions(&self) -> impl Iterator<Item = &QuestionResult> {
        self.questions
            .iter()
            .filter(|q| q.answer_type == AnswerType::FreeText)
    }

    /// Mean of the per-question likert averages.
    ///
    /// A question without an average counts as 0. Returns `None` when there are
    /// no likert questions or nothing has been answered yet.
    pub fn overall_likert_average(&self) -> Option<f64> {
        let averages: Vec<f64> = self
            .likert_questions()
            .map(|q| q.likert_average.unwrap_or(0.0))
            .collect();
        if averages.is_empty() {
            return None;
        }
        let mean = averages.iter().sum::<f64>() / averages.len() as f64;
        (mean > 0.0).then_some(mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn likert(average: Option<f64>) -> QuestionResult {
        QuestionResult {
            question_id: None,
            text: "Q".to_string(),
            answer_type: AnswerType::Likert,
            likert_average: average,
            likert_distribution: BTreeMap::new(),
            free_text_responses: Vec::new(),
        }
    }

    #[test]
    fn overall_average_counts_missing_as_zero() {
        let summary = ResultsSummary {
            total_responses: 4,
            questions: vec![likert(Some(4.0)), likert(None)],
        };
        assert_eq!(summary.overall_likert_average(), Some(2.0));
    }

    #[test]
    fn overall_average_without_likert_questions() {
        let mut free = likert(None);
        free.answer_type = AnswerType::FreeText;
        let summary = ResultsSummary {
            total_responses: 1,
            questions: vec![free],
        };
        assert_eq!(summary.overall_likert_average(), None);
        assert_eq!(summary.free_text_questions().count(), 1);
    }

    #[test]
    fn parses_service_payload() {
        let summary: ResultsSummary = serde_json::from_str(
            r#"{
                "totalResponses": 2,
                "questions": [
                    {"questionId": 1, "text": "Happy?", "answerType": "LIKERT",
                     "likertAverage": 4.5, "likertDistribution": {"4": 1, "5": 1}},
                    {"questionId": 2, "text": "Why?", "answerType": "FREE_TEXT",
                     "freeTextResponses": ["pay", "team"]}
                ]
            }"#,
        )
        .unwrap();

        let happy = &summary.questions[0];
        assert_eq!(happy.count_for(5), 1);
        assert_eq!(happy.count_for(1), 0);
        assert_eq!(happy.distribution_share(4, summary.total_responses), 50.0);
        assert_eq!(summary.questions[1].free_text_responses.len(), 2);
    }

    #[test]
    fn share_with_no_responses_is_zero() {
        assert_eq!(likert(None).distribution_share(3, 0), 0.0);
    }
}
