//! # survey-builder
//!
//! Compose surveys from an ordered list of questions and export them as JSON.
//!
//! A [`SurveyDocumentStore`] owns the draft being edited. Views (a terminal
//! form, a GUI, a script) call its operations in response to user input and
//! re-read [`SurveyDocumentStore::document`] afterwards.
//!
//! ## Usage
//!
//! ```rust
//! use survey_builder::{
//!     QuestionField, QuestionKind, ReorderIntent, SequentialIds, SurveyDocumentStore,
//! };
//!
//! let mut store = SurveyDocumentStore::with_id_source(SequentialIds::new());
//! store.set_title("Team lunch");
//!
//! let place = store.add_question(QuestionKind::SingleChoice)?;
//! store.update_question_field(place, QuestionField::Prompt, "Where should we go?")?;
//! store.set_option(place, 0, "Pizza")?;
//! store.add_option(place)?;
//! store.set_option(place, 1, "Sushi")?;
//!
//! let name = store.add_question(QuestionKind::Text)?;
//! store.update_question_field(name, QuestionField::Prompt, "Your name?")?;
//!
//! // Drag the name question to the top.
//! store.apply_reorder(ReorderIntent::dropped(1, 0))?;
//!
//! let snapshot = store.submit();
//! assert_eq!(snapshot.document().questions()[0].id(), name);
//! println!("{}", snapshot.to_json()?);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Question kinds
//!
//! - `text` - free-text question with an answer field
//! - `radio` - single choice; starts with one empty option
//! - `checkbox` - multiple choice; starts with one empty option
//!
//! ## Exporters
//!
//! Submitted surveys go to a [`SurveyExporter`]:
//! - [`FileExporter`] - writes `survey-form.json` into a directory
//! - [`ConsoleExporter`] - prints the JSON
//! - [`MemoryExporter`] - keeps snapshots in memory, for tests

// Re-export all types from survey-builder-types
pub use survey_builder_types::*;

mod id_source;
pub use id_source::{IdSource, SequentialIds, TimestampIds};

mod reorder;
pub use reorder::ReorderIntent;

mod store;
pub use store::SurveyDocumentStore;

mod exporter;
pub use exporter::{ConsoleExporter, ExportError, FileExporter, MemoryExporter, SurveyExporter};
