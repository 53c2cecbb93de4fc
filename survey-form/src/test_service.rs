//! In-memory services for testing the editor and response flows without a server.
//!
//! `TestService` implements both [`SurveyService`] and [`PublicSurveyService`].
//! It assigns ids, tracks survey status and records every submission so tests
//! can assert on what a front-end sent.
//!
//! # Example
//!
//! ```rust,ignore
//! use survey_form::{AnswerType, DraftEditor, QuestionForm, TestService};
//!
//! let service = TestService::new();
//! let mut editor = DraftEditor::new();
//! editor.set_name("Pulse");
//! editor.open_question_modal();
//! editor.save_question_as(QuestionForm::new("How satisfied?", AnswerType::Likert))?;
//!
//! let saved = editor.submit(&service).await?;
//! assert_eq!(service.surveys().len(), 1);
//! assert_eq!(saved.questions.len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use survey_form_types::{
    ParticipantToken, PublicSurveyService, Question, QuestionResult, ResponseEntry,
    ResultsSummary, ServiceError, Survey, SurveyDraft, SurveyId, SurveyService, SurveyStatus,
};

/// In-memory persistence and public response service.
#[derive(Debug, Default)]
pub struct TestService {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    surveys: Vec<Survey>,
    next_id: u64,
    results: HashMap<SurveyId, ResultsSummary>,
    links: HashMap<ParticipantToken, SurveyId>,
    submissions: Vec<(ParticipantToken, Vec<ResponseEntry>)>,
    fail_next: Option<(Option<u16>, String)>,
    requests: usize,
}

impl State {
    fn begin(&mut self) -> Result<(), ServiceError> {
        self.requests += 1;
        match self.fail_next.take() {
            Some((status, message)) => Err(ServiceError::rejected(status, message)),
            None => Ok(()),
        }
    }

    fn fresh_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn position(&self, id: &SurveyId) -> Result<usize, ServiceError> {
        self.surveys
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| ServiceError::rejected(Some(404), "Survey not found"))
    }

    fn assign_question_ids(&mut self, questions: &[Question]) -> Vec<Question> {
        questions
            .iter()
            .map(|q| match q.id() {
                Some(_) => q.clone(),
                None => q.clone().with_id(format!("q{}", self.fresh_id())),
            })
            .collect()
    }
}

impl TestService {
    /// Create an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing survey.
    pub fn with_survey(self, survey: Survey) -> Self {
        self.lock().surveys.push(survey);
        self
    }

    /// Seed the summary returned by `results` for `id`.
    pub fn with_results(self, id: impl Into<SurveyId>, summary: ResultsSummary) -> Self {
        self.lock().results.insert(id.into(), summary);
        self
    }

    /// Make `token` resolve to the survey `id` on the public service.
    pub fn with_link(self, token: impl Into<String>, id: impl Into<SurveyId>) -> Self {
        self.lock()
            .links
            .insert(ParticipantToken::new(token), id.into());
        self
    }

    /// Make the next request fail with the given status and message.
    pub fn fail_next(&self, status: Option<u16>, message: impl Into<String>) {
        self.lock().fail_next = Some((status, message.into()));
    }

    /// All stored surveys in creation order.
    pub fn surveys(&self) -> Vec<Survey> {
        self.lock().surveys.clone()
    }

    /// Every submission received, in order.
    pub fn submissions(&self) -> Vec<(ParticipantToken, Vec<ResponseEntry>)> {
        self.lock().submissions.clone()
    }

    /// Number of requests issued, including failed ones.
    pub fn request_count(&self) -> usize {
        self.lock().requests
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic while holding the lock can only come from a failing test.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SurveyService for TestService {
    async fn create(&self, draft: &SurveyDraft) -> Result<Survey, ServiceError> {
        let mut state = self.lock();
        state.begin()?;
        let id = SurveyId::new(state.fresh_id().to_string());
        let survey = Survey {
            id,
            name: draft.name.clone(),
            expire_date: draft.expire_date,
            status: SurveyStatus::Draft,
            questions: state.assign_question_ids(&draft.questions),
            participants: draft.participants.clone(),
            participant_count: None,
        };
        state.surveys.push(survey.clone());
        Ok(survey)
    }

    async fn update(&self, id: &SurveyId, draft: &SurveyDraft) -> Result<Survey, ServiceError> {
        let mut state = self.lock();
        state.begin()?;
        let index = state.position(id)?;
        if !state.surveys[index].is_draft() {
            return Err(ServiceError::rejected(
                Some(409),
                "Only draft surveys can be edited",
            ));
        }
        let questions = state.assign_question_ids(&draft.questions);
        let survey = &mut state.surveys[index];
        survey.name = draft.name.clone();
        survey.expire_date = draft.expire_date;
        survey.questions = questions;
        survey.participants = draft.participants.clone();
        Ok(survey.clone())
    }

    async fn list(&self) -> Result<Vec<Survey>, ServiceError> {
        let mut state = self.lock();
        state.begin()?;
        Ok(state.surveys.clone())
    }

    async fn get(&self, id: &SurveyId) -> Result<Survey, ServiceError> {
        let mut state = self.lock();
        state.begin()?;
        let index = state.position(id)?;
        Ok(state.surveys[index].clone())
    }

    async fn delete(&self, id: &SurveyId) -> Result<(), ServiceError> {
        let mut state = self.lock();
        state.begin()?;
        let index = state.position(id)?;
        state.surveys.remove(index);
        Ok(())
    }

    async fn copy(&self, id: &SurveyId) -> Result<Survey, ServiceError> {
        let mut state = self.lock();
        state.begin()?;
        let index = state.position(id)?;
        let source = state.surveys[index].clone();
        let unassigned: Vec<Question> = source.questions.iter().map(Question::duplicate).collect();
        let copy = Survey {
            id: SurveyId::new(state.fresh_id().to_string()),
            status: SurveyStatus::Draft,
            questions: state.assign_question_ids(&unassigned),
            ..source
        };
        state.surveys.push(copy.clone());
        Ok(copy)
    }

    async fn send(&self, id: &SurveyId) -> Result<(), ServiceError> {
        let mut state = self.lock();
        state.begin()?;
        let index = state.position(id)?;
        let survey = &mut state.surveys[index];
        if !survey.is_draft() {
            return Err(ServiceError::rejected(
                Some(409),
                "Only draft surveys can be sent",
            ));
        }
        survey.status = SurveyStatus::Sent;
        Ok(())
    }

    async fn results(&self, id: &SurveyId) -> Result<ResultsSummary, ServiceError> {
        let mut state = self.lock();
        state.begin()?;
        if let Some(summary) = state.results.get(id) {
            return Ok(summary.clone());
        }
        let index = state.position(id)?;
        let questions = state.surveys[index]
            .questions
            .iter()
            .map(|q| QuestionResult {
                question_id: q.id().cloned(),
                text: q.text().to_string(),
                answer_type: q.answer_type(),
                likert_average: None,
                likert_distribution: Default::default(),
                free_text_responses: Vec::new(),
            })
            .collect();
        Ok(ResultsSummary {
            total_responses: 0,
            questions,
        })
    }
}

#[async_trait]
impl PublicSurveyService for TestService {
    async fn get_by_token(&self, token: &ParticipantToken) -> Result<Survey, ServiceError> {
        let mut state = self.lock();
        state.begin()?;
        let id = state
            .links
            .get(token)
            .cloned()
            .ok_or_else(|| ServiceError::rejected(Some(404), "Survey not found or expired"))?;
        let index = state.position(&id)?;
        Ok(state.surveys[index].clone())
    }

    async fn submit_responses(
        &self,
        token: &ParticipantToken,
        responses: &[ResponseEntry],
    ) -> Result<(), ServiceError> {
        let mut state = self.lock();
        state.begin()?;
        if !state.links.contains_key(token) {
            return Err(ServiceError::rejected(
                Some(404),
                "Survey not found or expired",
            ));
        }
        state
            .submissions
            .push((token.clone(), responses.to_vec()));
        Ok(())
    }
}
