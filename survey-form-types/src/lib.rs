//! Core types for the survey-form crates.
//!
//! This crate provides the presentation-agnostic building blocks:
//! - `Question`, `AnswerType` and `QuestionPatch` - the editable question model
//! - `SurveyDraft` - the payload submitted on create/update
//! - `Survey`, `SurveyStatus` and `ResultsSummary` - what the services return
//! - `ResponseEntry` and `LikertValue` - participant answers
//! - `SurveyService`, `PublicSurveyService` and `CredentialStore` traits

mod id;
pub use id::{QuestionId, SurveyId};

mod question;
pub use question::{AnswerType, Question, QuestionPatch};

mod participant;
pub use participant::EmailAddress;

mod survey_draft;
pub use survey_draft::SurveyDraft;

mod survey;
pub use survey::{Survey, SurveyStatus};

mod response;
pub use response::{LikertValue, ResponseEntry, ResponseValue, likert_label};

mod results;
pub use results::{QuestionResult, ResultsSummary};

mod token;
pub use token::{AccessToken, ParticipantToken};

mod error;
pub use error::{ParticipantError, ServiceError, ValidationError};

mod traits;
pub use traits::{CredentialStore, PublicSurveyService, SurveyService};
