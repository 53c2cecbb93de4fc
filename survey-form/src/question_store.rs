use survey_form_types::{Question, QuestionPatch};

use crate::EditorError;

/// The ordered question list of a draft.
///
/// Indices are always contiguous; removal shifts later questions down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionStore {
    questions: Vec<Question>,
}

impl QuestionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
        }
    }

    /// Create a store holding `questions` in the given order.
    pub fn from_questions(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Append a question. Identifiers are assigned by the persistence service.
    pub fn add(&mut self, question: Question) {
        self.questions.push(question);
    }

    /// Merge `patch` into the question at `index`.
    pub fn update(&mut self, index: usize, patch: QuestionPatch) -> Result<(), EditorError> {
        let len = self.questions.len();
        let question = self
            .questions
            .get_mut(index)
            .ok_or(EditorError::IndexOutOfRange { index, len })?;
        question.apply(patch)?;
        Ok(())
    }

    /// Remove and return the question at `index`.
    pub fn delete(&mut self, index: usize) -> Result<Question, EditorError> {
        self.check_index(index)?;
        Ok(self.questions.remove(index))
    }

    /// Insert a copy of the question at `index` right after it. The copy has no id.
    pub fn duplicate(&mut self, index: usize) -> Result<(), EditorError> {
        self.check_index(index)?;
        let copy = self.questions[index].duplicate();
        self.questions.insert(index + 1, copy);
        Ok(())
    }

    /// Move the question at `from` so that it ends up at `to`.
    ///
    /// The question is removed first and then inserted at `to` in the shortened
    /// list, so questions in between shift by one; this is not a swap.
    /// Out-of-range indices and `from == to` are ignored. Returns whether
    /// anything moved.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.questions.len();
        if from == to || from >= len || to >= len {
            return false;
        }
        let question = self.questions.remove(from);
        self.questions.insert(to, question);
        true
    }

    /// Replace the whole sequence, e.g. when loading a survey for editing.
    pub fn replace_all(&mut self, questions: Vec<Question>) {
        self.questions = questions;
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Get the questions in order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Check if the store has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn into_vec(self) -> Vec<Question> {
        self.questions
    }

    fn check_index(&self, index: usize) -> Result<(), EditorError> {
        if index < self.questions.len() {
            Ok(())
        } else {
            Err(EditorError::IndexOutOfRange {
                index,
                len: self.questions.len(),
            })
        }
    }
}

impl<'a> IntoIterator for &'a QuestionStore {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
