use survey_form_types::{
    AnswerType, LikertValue, ParticipantToken, PublicSurveyService, Question, ResponseEntry,
    ResponseValue, Survey,
};

use crate::ResponseError;
use crate::editor::InFlight;

/// A participant working through a survey one question at a time.
#[derive(Debug, Clone)]
pub struct ResponseSession {
    survey: Survey,
    answers: Vec<Option<ResponseValue>>,
    position: usize,
    in_flight: bool,
    submitted: bool,
}

impl ResponseSession {
    /// Start at the first question of `survey`.
    pub fn new(survey: Survey) -> Result<Self, ResponseError> {
        if survey.questions.is_empty() {
            return Err(ResponseError::EmptySurvey);
        }
        Ok(Self {
            answers: vec![None; survey.questions.len()],
            survey,
            position: 0,
            in_flight: false,
            submitted: false,
        })
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    pub fn current(&self) -> &Question {
        &self.survey.questions[self.position]
    }

    /// Zero-based index of the current question.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.survey.questions.len()
    }

    /// Always false; empty surveys are refused on construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Fraction of the survey reached, counting the current question.
    pub fn progress(&self) -> f64 {
        (self.position + 1) as f64 / self.len() as f64
    }

    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    pub fn is_last(&self) -> bool {
        self.position + 1 == self.len()
    }

    pub fn answer(&self, position: usize) -> Option<&ResponseValue> {
        self.answers.get(position)?.as_ref()
    }

    pub fn current_answer(&self) -> Option<&ResponseValue> {
        self.answer(self.position)
    }

    /// Answer the current Likert question.
    pub fn answer_likert(&mut self, value: u8) -> Result<(), ResponseError> {
        self.expect_type(AnswerType::Likert)?;
        let value = LikertValue::new(value)?;
        self.answers[self.position] = Some(value.into());
        Ok(())
    }

    /// Answer the current free-text question. Empty text counts as unanswered.
    pub fn answer_text(&mut self, text: impl Into<String>) -> Result<(), ResponseError> {
        self.expect_type(AnswerType::FreeText)?;
        self.answers[self.position] = Some(ResponseValue::Text(text.into()));
        Ok(())
    }

    fn expect_type(&self, expected: AnswerType) -> Result<(), ResponseError> {
        if self.current().answer_type() == expected {
            Ok(())
        } else {
            Err(ResponseError::AnswerTypeMismatch {
                expected: self.current().answer_type(),
            })
        }
    }

    /// Move to the next question. Returns whether the position changed.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.position += 1;
        true
    }

    pub fn back(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Move on without answering.
    pub fn skip(&mut self) -> bool {
        self.next()
    }

    /// Positions of questions still lacking an answer.
    pub fn unanswered(&self) -> Vec<usize> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, answer)| answer.as_ref().is_none_or(ResponseValue::is_blank))
            .map(|(position, _)| position)
            .collect()
    }

    /// Build one entry per question, in question order.
    pub fn build_submission(&self) -> Result<Vec<ResponseEntry>, ResponseError> {
        let unanswered = self.unanswered();
        if !unanswered.is_empty() {
            return Err(ResponseError::Unanswered {
                positions: unanswered,
            });
        }
        self.survey
            .questions
            .iter()
            .zip(&self.answers)
            .enumerate()
            .map(|(position, (question, answer))| {
                let question_id = question
                    .id()
                    .cloned()
                    .ok_or(ResponseError::MissingQuestionId { position })?;
                let value = answer
                    .clone()
                    .ok_or(ResponseError::Unanswered {
                        positions: vec![position],
                    })?;
                Ok(ResponseEntry { question_id, value })
            })
            .collect()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Submit the answers. On failure the answers are kept for a retry.
    pub async fn submit<S>(
        &mut self,
        service: &S,
        token: &ParticipantToken,
    ) -> Result<(), ResponseError>
    where
        S: PublicSurveyService + ?Sized,
    {
        if self.submitted {
            return Err(ResponseError::AlreadySubmitted);
        }
        if self.in_flight {
            return Err(ResponseError::SubmitInFlight);
        }
        let entries = self.build_submission()?;

        self.in_flight = true;
        let result = {
            let _flag = InFlight(&mut self.in_flight);
            service.submit_responses(token, &entries).await
        };

        match result {
            Ok(()) => {
                tracing::info!(survey = %self.survey.id, answers = entries.len(), "submitted responses");
                self.submitted = true;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(survey = %self.survey.id, error = %err, "submitting responses failed");
                Err(err.into())
            }
        }
    }
}
