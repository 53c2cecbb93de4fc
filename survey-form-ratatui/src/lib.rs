//! # survey-form-ratatui
//!
//! Terminal front-ends for survey-form.
//!
//! - `RatatuiEditor` edits a `DraftEditor`: numbered question list, modals for
//!   questions and participants, keyboard drag-to-reorder.
//! - `RatatuiWizard` walks a participant through a `ResponseSession` one
//!   question at a time with a progress bar.
//!
//! Both return an outcome instead of talking to a service, so the caller
//! decides when to save or submit.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use survey_form::DraftEditor;
//! use survey_form_ratatui::{EditorOutcome, RatatuiEditor};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut editor = DraftEditor::new();
//!     if RatatuiEditor::new().run(&mut editor)? == EditorOutcome::Save {
//!         println!("{:#?}", editor.project());
//!     }
//!     Ok(())
//! }
//! ```

mod terminal;
pub use terminal::{RatatuiError, Theme};

mod editor;
pub use editor::{EditorOutcome, EditorScreen, RatatuiEditor};

mod wizard;
pub use wizard::{RatatuiWizard, WizardOutcome, WizardScreen};
