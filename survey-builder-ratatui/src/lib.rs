//! # survey-builder-ratatui
//!
//! Terminal front end for survey-builder.
//!
//! The whole survey is shown as one scrollable form: the title, every
//! question with its answer or options, a question type selector and the
//! submit button. Questions can be moved by "dragging" them with Ctrl+↑/↓.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use survey_builder::{FileExporter, SurveyDocumentStore};
//! use survey_builder_ratatui::SurveyEditor;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut store = SurveyDocumentStore::new();
//!     let mut exporter = FileExporter::new(".");
//!     let submitted = SurveyEditor::new()
//!         .with_heading("Team Survey")
//!         .run(&mut store, &mut exporter)?;
//!     println!("{} survey(s) exported", submitted.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Keys
//!
//! - Tab/Shift+Tab, ↑/↓ - move between fields
//! - ←/→ - move the cursor, or change the type on "Add a Question"
//! - Enter - add a question / add an option / next field
//! - Ctrl+↑/↓ - pick up the focused question; ↑/↓ choose the spot, Enter drops, Esc cancels
//! - F10 or Ctrl+S - submit
//! - Esc - quit

mod draw;
mod editor;
pub mod form;

pub use draw::{Theme, draw_form};
pub use editor::{EditorError, SurveyEditor};
pub use form::FormState;
