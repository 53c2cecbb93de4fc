use chrono::NaiveDate;
use survey_form_types::{
    AnswerType, Question, Survey, SurveyDraft, SurveyId, SurveyService, ValidationError,
};

use crate::{
    DragState, EditMode, EditorError, ParticipantList, ParticipantsModal, QuestionForm,
    QuestionModal, QuestionStore,
};

/// Where a draft came from, which decides between create and update on save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorOrigin {
    #[default]
    New,
    Existing(SurveyId),
}

/// Single owner of all draft state.
///
/// Every mutation goes through a method on this type; views read through the
/// accessors and re-render.
#[derive(Debug, Clone, Default)]
pub struct DraftEditor {
    origin: EditorOrigin,
    name: String,
    expire_date: Option<NaiveDate>,
    questions: QuestionStore,
    participants: ParticipantList,
    question_modal: Option<QuestionModal>,
    participants_modal: Option<ParticipantsModal>,
    drag: DragState,
    in_flight: bool,
}

impl DraftEditor {
    /// Create an empty draft for a new survey.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an existing survey for editing. Saving issues an update.
    pub fn for_survey(survey: &Survey) -> Self {
        tracing::debug!(survey = %survey.id, "loading survey into editor");
        Self {
            origin: EditorOrigin::Existing(survey.id.clone()),
            name: survey.name.clone(),
            expire_date: survey.expire_date,
            questions: QuestionStore::from_questions(survey.questions.clone()),
            participants: survey.participants.iter().cloned().collect(),
            ..Self::default()
        }
    }

    /// Discard everything and start a fresh draft.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn origin(&self) -> &EditorOrigin {
        &self.origin
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn expire_date(&self) -> Option<NaiveDate> {
        self.expire_date
    }

    /// Set the expiry from `YYYY-MM-DD`. Blank input clears it.
    pub fn set_expire_date(&mut self, raw: &str) -> Result<(), EditorError> {
        let raw = raw.trim();
        if raw.is_empty() {
            self.expire_date = None;
            return Ok(());
        }
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidExpireDate(raw.to_string()))?;
        self.expire_date = Some(date);
        Ok(())
    }

    pub fn clear_expire_date(&mut self) {
        self.expire_date = None;
    }

    pub fn questions(&self) -> &QuestionStore {
        &self.questions
    }

    pub fn participants(&self) -> &ParticipantList {
        &self.participants
    }

    // --- question list ---

    /// Remove the question at `index`. A pending drag is dropped since its
    /// source index no longer names the same question.
    pub fn delete_question(&mut self, index: usize) -> Result<Question, EditorError> {
        let removed = self.questions.delete(index)?;
        self.drag.cancel();
        tracing::debug!(index, remaining = self.questions.len(), "deleted question");
        Ok(removed)
    }

    pub fn duplicate_question(&mut self, index: usize) -> Result<(), EditorError> {
        self.questions.duplicate(index)?;
        self.drag.cancel();
        tracing::debug!(index, "duplicated question");
        Ok(())
    }

    pub fn reorder_questions(&mut self, from: usize, to: usize) -> bool {
        let moved = self.questions.reorder(from, to);
        if moved {
            self.drag.cancel();
            tracing::debug!(from, to, "reordered questions");
        }
        moved
    }

    // --- drag ---

    pub fn begin_drag(&mut self, index: usize) {
        self.drag.begin(index);
    }

    /// Drop the dragged question onto `target` and apply the move.
    pub fn complete_drag(&mut self, target: usize) -> bool {
        match self.drag.complete(target) {
            Some((from, to)) => self.reorder_questions(from, to),
            None => false,
        }
    }

    pub fn end_drag(&mut self) {
        self.drag.cancel();
    }

    pub fn dragged_index(&self) -> Option<usize> {
        self.drag.source()
    }

    // --- question modal ---

    /// Open the modal for a new question.
    pub fn open_question_modal(&mut self) {
        self.question_modal = Some(QuestionModal::adding());
    }

    /// Open the modal pre-populated with the question at `index`.
    pub fn edit_question(&mut self, index: usize) -> Result<(), EditorError> {
        let question = self
            .questions
            .get(index)
            .ok_or(EditorError::IndexOutOfRange {
                index,
                len: self.questions.len(),
            })?;
        self.question_modal = Some(QuestionModal::editing(index, question));
        Ok(())
    }

    /// Close the modal and discard its form.
    pub fn close_question_modal(&mut self) {
        self.question_modal = None;
    }

    pub fn question_modal(&self) -> Option<&QuestionModal> {
        self.question_modal.as_ref()
    }

    pub fn is_question_modal_open(&self) -> bool {
        self.question_modal.is_some()
    }

    /// Index of the question being edited, if the modal is editing.
    pub fn editing_index(&self) -> Option<usize> {
        match self.question_modal.as_ref()?.mode() {
            EditMode::Editing(index) => Some(index),
            EditMode::Adding => None,
        }
    }

    /// The stored question the modal was opened for.
    pub fn editing_question(&self) -> Option<&Question> {
        self.questions.get(self.editing_index()?)
    }

    pub fn set_form_text(&mut self, text: impl Into<String>) -> Result<(), EditorError> {
        self.form_mut()?.text = text.into();
        Ok(())
    }

    pub fn set_form_answer_type(&mut self, answer_type: AnswerType) -> Result<(), EditorError> {
        self.form_mut()?.answer_type = answer_type;
        Ok(())
    }

    pub fn toggle_form_answer_type(&mut self) -> Result<(), EditorError> {
        let form = self.form_mut()?;
        form.answer_type = form.answer_type.toggled();
        Ok(())
    }

    /// Replace the held form and save it.
    pub fn save_question_as(&mut self, form: QuestionForm) -> Result<(), EditorError> {
        *self.form_mut()? = form;
        self.save_question()
    }

    /// Save the held form: append when adding, merge when editing.
    ///
    /// Blank text is refused and the modal stays open with its input intact.
    pub fn save_question(&mut self) -> Result<(), EditorError> {
        let modal = self
            .question_modal
            .as_ref()
            .ok_or(EditorError::QuestionModalClosed)?;
        let question = modal.form.to_question()?;
        match modal.mode() {
            EditMode::Adding => {
                self.questions.add(question);
                tracing::debug!(count = self.questions.len(), "added question");
            }
            EditMode::Editing(index) => {
                self.questions.update(index, question.into())?;
                tracing::debug!(index, "updated question");
            }
        }
        self.question_modal = None;
        Ok(())
    }

    fn form_mut(&mut self) -> Result<&mut QuestionForm, EditorError> {
        self.question_modal
            .as_mut()
            .map(|modal| &mut modal.form)
            .ok_or(EditorError::QuestionModalClosed)
    }

    // --- participants modal ---

    /// Open the participants modal on a working copy of the current list.
    pub fn open_participants_modal(&mut self) {
        self.participants_modal = Some(ParticipantsModal::new(&self.participants));
    }

    pub fn participants_modal(&self) -> Option<&ParticipantsModal> {
        self.participants_modal.as_ref()
    }

    pub fn participants_modal_mut(&mut self) -> Option<&mut ParticipantsModal> {
        self.participants_modal.as_mut()
    }

    /// Replace the participant list with the working copy and close.
    pub fn save_participants(&mut self) -> Result<(), EditorError> {
        let modal = self
            .participants_modal
            .take()
            .ok_or(EditorError::ParticipantsModalClosed)?;
        self.participants = modal.into_participants();
        tracing::debug!(count = self.participants.len(), "saved participants");
        Ok(())
    }

    /// Discard the working copy.
    pub fn close_participants_modal(&mut self) {
        self.participants_modal = None;
    }

    // --- persistence ---

    /// Snapshot the draft in the persistence payload shape.
    ///
    /// Pure; calling it twice without mutation gives equal values.
    pub fn project(&self) -> SurveyDraft {
        SurveyDraft {
            name: self.name.clone(),
            expire_date: self.expire_date,
            questions: self.questions.questions().to_vec(),
            participants: self.participants.to_vec(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Mark a save as started and return the payload to send.
    ///
    /// For front-ends that drive the request themselves; pair with
    /// [`DraftEditor::finish_submit`].
    pub fn begin_submit(&mut self) -> Result<SurveyDraft, EditorError> {
        if self.in_flight {
            return Err(EditorError::SubmitInFlight);
        }
        self.in_flight = true;
        Ok(self.project())
    }

    /// Clear the in-flight flag and apply the outcome of a save.
    ///
    /// Success resets the draft. Failure leaves it untouched.
    pub fn finish_submit<T, E>(&mut self, result: Result<T, E>) -> Result<T, EditorError>
    where
        E: Into<EditorError>,
    {
        self.in_flight = false;
        match result {
            Ok(saved) => {
                self.reset();
                Ok(saved)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Persist the draft through `service`.
    ///
    /// Dropping the returned future before it completes clears the in-flight
    /// flag and leaves the draft as it was.
    pub async fn submit<S>(&mut self, service: &S) -> Result<Survey, EditorError>
    where
        S: SurveyService + ?Sized,
    {
        let draft = self.begin_submit()?;
        let origin = self.origin.clone();
        let result = {
            let _flag = InFlight(&mut self.in_flight);
            match &origin {
                EditorOrigin::New => service.create(&draft).await,
                EditorOrigin::Existing(id) => service.update(id, &draft).await,
            }
        };
        match &result {
            Ok(survey) => tracing::info!(survey = %survey.id, "saved survey"),
            Err(err) => tracing::warn!(error = %err, "saving survey failed"),
        }
        self.finish_submit(result)
    }
}

/// Clears an in-flight flag when dropped, including when the request future
/// is cancelled mid-await.
pub(crate) struct InFlight<'a>(pub(crate) &'a mut bool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
