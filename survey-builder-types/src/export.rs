//! The exported survey file.
//!
//! A submitted survey is written as pretty-printed JSON:
//!
//! ```json
//! {
//!   "surveyTitle": "Team lunch",
//!   "questions": [
//!     {
//!       "id": 1718035200123,
//!       "type": "radio",
//!       "text": "Where should we go?",
//!       "answer": "",
//!       "options": ["Pizza", "Sushi"]
//!     }
//!   ],
//!   "selectedQuestionType": "radio"
//! }
//! ```
//!
//! Every question carries both `answer` and `options`. The one a kind does
//! not use is written empty (`""` or `[]`) and ignored when read back.

use serde::{Deserialize, Serialize};

use crate::{Question, QuestionBody, QuestionId, QuestionKind, SurveyDocument, SurveyError};

/// File name used when a survey is exported to disk.
pub const EXPORT_FILE_NAME: &str = "survey-form.json";

/// Error type for reading an exported survey back in.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Malformed survey file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Inconsistent survey file: {0}")]
    Document(#[from] SurveyError),
}

/// An immutable copy of a survey document, taken at submit time.
///
/// The snapshot owns its data, so resetting or editing the live document
/// afterwards never affects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveySnapshot {
    document: SurveyDocument,
}

impl SurveySnapshot {
    pub fn new(document: SurveyDocument) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &SurveyDocument {
        &self.document
    }

    pub fn into_document(self) -> SurveyDocument {
        self.document
    }

    /// Convert to the wire representation.
    pub fn to_exported(&self) -> ExportedSurvey {
        ExportedSurvey::from(&self.document)
    }

    /// Serialize as UTF-8 JSON with 2-space indentation.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_exported())
    }

    /// Parse a previously exported survey.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let exported: ExportedSurvey = serde_json::from_str(json)?;
        Ok(Self::new(exported.try_into()?))
    }
}

/// Wire representation of a survey document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedSurvey {
    pub survey_title: String,
    pub questions: Vec<ExportedQuestion>,
    #[serde(default)]
    pub selected_question_type: QuestionKind,
}

/// Wire representation of a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedQuestion {
    pub id: QuestionId,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub text: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl From<&Question> for ExportedQuestion {
    fn from(question: &Question) -> Self {
        let (answer, options) = match question.body() {
            QuestionBody::Text { answer } => (answer.clone(), Vec::new()),
            QuestionBody::Choice { options, .. } => (String::new(), options.clone()),
        };
        Self {
            id: question.id(),
            kind: question.kind(),
            text: question.prompt().to_string(),
            answer,
            options,
        }
    }
}

impl From<ExportedQuestion> for Question {
    fn from(exported: ExportedQuestion) -> Self {
        match exported.kind {
            QuestionKind::Text => Question::text(exported.id, exported.text, exported.answer),
            kind => Question::choice(
                exported.id,
                kind == QuestionKind::MultiChoice,
                exported.text,
                exported.options,
            ),
        }
    }
}

impl From<&SurveyDocument> for ExportedSurvey {
    fn from(document: &SurveyDocument) -> Self {
        Self {
            survey_title: document.title().to_string(),
            questions: document.questions().iter().map(Into::into).collect(),
            selected_question_type: document.pending_kind(),
        }
    }
}

impl TryFrom<ExportedSurvey> for SurveyDocument {
    type Error = SurveyError;

    fn try_from(exported: ExportedSurvey) -> Result<Self, Self::Error> {
        let mut document = SurveyDocument::new();
        document.set_title(exported.survey_title);
        document.set_pending_kind(exported.selected_question_type);
        for question in exported.questions {
            document.push_question(question.into())?;
        }
        Ok(document)
    }
}
