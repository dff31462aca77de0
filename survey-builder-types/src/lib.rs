//! Core types for the survey-builder crate.
//!
//! This crate provides the foundational types for composing surveys:
//! - `SurveyDocument` - The draft being edited: title, ordered questions, pending type
//! - `Question`, `QuestionBody` and `QuestionKind` - Individual questions and their types
//! - `SurveySnapshot` and the `Exported*` types - The submitted survey and its JSON form
//! - `SurveyError` - What can go wrong when a document is edited

mod question_id;
pub use question_id::QuestionId;

mod question;
pub use question::{Question, QuestionBody, QuestionField, QuestionKind};

mod survey_document;
pub use survey_document::SurveyDocument;

mod export;
pub use export::{
    EXPORT_FILE_NAME, ExportedQuestion, ExportedSurvey, ImportError, SurveySnapshot,
};

mod error;
pub use error::SurveyError;
