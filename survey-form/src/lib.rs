//! # survey-form
//!
//! Survey authoring and response collection. Presentation-agnostic.
//!
//! This crate owns the state behind the survey editor: an ordered question
//! list edited through a modal, drag-to-reorder, a validated participant list,
//! and the projection of all of it into the payload a persistence service
//! accepts. It also drives the participant side, one question at a time.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use survey_form::{AnswerType, DraftEditor, QuestionForm};
//!
//! let mut editor = DraftEditor::new();
//! editor.set_name("Team pulse");
//!
//! editor.open_question_modal();
//! editor.save_question_as(QuestionForm::new("How satisfied?", AnswerType::Likert))?;
//! editor.open_question_modal();
//! editor.save_question_as(QuestionForm::new("Comments?", AnswerType::FreeText))?;
//!
//! // Move "Comments?" to the top
//! editor.reorder_questions(1, 0);
//!
//! editor.open_participants_modal();
//! if let Some(modal) = editor.participants_modal_mut() {
//!     modal.input = "alice@example.com".into();
//!     modal.add_input()?;
//! }
//! editor.save_participants()?;
//!
//! let survey = editor.submit(&service).await?;
//! ```
//!
//! ## Front-ends
//!
//! Front-ends are separate crates that drive `DraftEditor` and `ResponseSession`:
//! - `survey-form-http` - `SurveyService` over the REST API
//! - `survey-form-ratatui` - TUI editor and response wizard

// Re-export all types from survey-form-types
pub use survey_form_types::*;

mod error;
pub use error::{EditorError, ResponseError};

mod question_store;
pub use question_store::QuestionStore;

mod participants;
pub use participants::ParticipantList;

mod drag;
pub use drag::DragState;

mod session;
pub use session::{EditMode, ParticipantsModal, QuestionForm, QuestionModal};

mod editor;
pub use editor::{DraftEditor, EditorOrigin};

mod respond;
pub use respond::ResponseSession;

mod credentials;
pub use credentials::MemoryCredentials;

// In-memory services for testing front-ends without a server
mod test_service;
pub use test_service::TestService;
