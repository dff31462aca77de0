use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{QuestionId, SurveyError};

/// A single question in a survey document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Unique within the document, assigned at creation.
    id: QuestionId,

    /// The question text shown to respondents.
    prompt: String,

    /// Kind-specific data. The kind is derived from this and cannot change.
    body: QuestionBody,
}

/// The kind-specific part of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionBody {
    /// Free-text question with an example answer.
    Text { answer: String },

    /// Single- or multi-choice question. `options` is never empty.
    Choice { multi: bool, options: Vec<String> },
}

impl Question {
    /// Create a blank question of the given kind.
    ///
    /// Choice questions start with a single empty option.
    pub fn new(id: QuestionId, kind: QuestionKind) -> Self {
        let body = match kind {
            QuestionKind::Text => QuestionBody::Text {
                answer: String::new(),
            },
            QuestionKind::SingleChoice | QuestionKind::MultiChoice => QuestionBody::Choice {
                multi: kind == QuestionKind::MultiChoice,
                options: vec![String::new()],
            },
        };
        Self {
            id,
            prompt: String::new(),
            body,
        }
    }

    /// Create a free-text question with prompt and answer already filled in.
    pub fn text(id: QuestionId, prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            body: QuestionBody::Text {
                answer: answer.into(),
            },
        }
    }

    /// Create a choice question with prompt and options already filled in.
    ///
    /// An empty option list is replaced by a single empty option.
    pub fn choice(
        id: QuestionId,
        multi: bool,
        prompt: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        let options = if options.is_empty() {
            vec![String::new()]
        } else {
            options
        };
        Self {
            id,
            prompt: prompt.into(),
            body: QuestionBody::Choice { multi, options },
        }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn kind(&self) -> QuestionKind {
        match &self.body {
            QuestionBody::Text { .. } => QuestionKind::Text,
            QuestionBody::Choice { multi: false, .. } => QuestionKind::SingleChoice,
            QuestionBody::Choice { multi: true, .. } => QuestionKind::MultiChoice,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn body(&self) -> &QuestionBody {
        &self.body
    }

    /// The answer of a free-text question, `None` for choice questions.
    pub fn answer(&self) -> Option<&str> {
        match &self.body {
            QuestionBody::Text { answer } => Some(answer),
            QuestionBody::Choice { .. } => None,
        }
    }

    /// The options of a choice question, empty for free-text questions.
    pub fn options(&self) -> &[String] {
        match &self.body {
            QuestionBody::Text { .. } => &[],
            QuestionBody::Choice { options, .. } => options,
        }
    }

    /// Replace the prompt text.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Replace the answer of a free-text question.
    pub fn set_answer(&mut self, answer: impl Into<String>) -> Result<(), SurveyError> {
        match &mut self.body {
            QuestionBody::Text { answer: current } => {
                *current = answer.into();
                Ok(())
            }
            QuestionBody::Choice { .. } => Err(SurveyError::FieldNotApplicable {
                id: self.id,
                field: QuestionField::Answer,
            }),
        }
    }

    /// Replace a field by name.
    pub fn set_field(
        &mut self,
        field: QuestionField,
        value: impl Into<String>,
    ) -> Result<(), SurveyError> {
        match field {
            QuestionField::Prompt => {
                self.set_prompt(value);
                Ok(())
            }
            QuestionField::Answer => self.set_answer(value),
        }
    }

    /// Append an empty option to a choice question.
    pub fn push_option(&mut self) -> Result<(), SurveyError> {
        self.options_mut()?.push(String::new());
        Ok(())
    }

    /// Replace the option at `index`.
    pub fn set_option(&mut self, index: usize, value: impl Into<String>) -> Result<(), SurveyError> {
        let options = self.options_mut()?;
        let len = options.len();
        let slot = options
            .get_mut(index)
            .ok_or(SurveyError::IndexOutOfRange { index, len })?;
        *slot = value.into();
        Ok(())
    }

    fn options_mut(&mut self) -> Result<&mut Vec<String>, SurveyError> {
        match &mut self.body {
            QuestionBody::Choice { options, .. } => Ok(options),
            QuestionBody::Text { .. } => Err(SurveyError::NotAChoiceQuestion(self.id)),
        }
    }
}

/// The kind of question, determining which fields are active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    /// Free-text question with an answer field.
    #[default]
    #[serde(rename = "text")]
    Text,

    /// Pick exactly one option (radio buttons).
    #[serde(rename = "radio")]
    SingleChoice,

    /// Pick any number of options (checkboxes).
    #[serde(rename = "checkbox")]
    MultiChoice,
}

impl QuestionKind {
    /// All kinds, in the order the question type selector lists them.
    pub const ALL: [QuestionKind; 3] = [Self::Text, Self::SingleChoice, Self::MultiChoice];

    /// The name used in the exported file.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::SingleChoice => "radio",
            Self::MultiChoice => "checkbox",
        }
    }

    /// Human-readable label for the type selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Text Input",
            Self::SingleChoice => "Radio Buttons",
            Self::MultiChoice => "Checkboxes",
        }
    }

    /// Check if questions of this kind carry an option list.
    pub fn is_choice(self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultiChoice)
    }

    /// The kind after this one in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Text => Self::SingleChoice,
            Self::SingleChoice => Self::MultiChoice,
            Self::MultiChoice => Self::Text,
        }
    }

    /// The kind before this one in selector order, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Self::Text => Self::MultiChoice,
            Self::SingleChoice => Self::Text,
            Self::MultiChoice => Self::SingleChoice,
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// An editable scalar field of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionField {
    /// The question text.
    Prompt,
    /// The answer of a free-text question.
    Answer,
}

impl fmt::Display for QuestionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prompt => f.write_str("prompt"),
            Self::Answer => f.write_str("answer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: i64) -> QuestionId {
        QuestionId::new(raw)
    }

    #[test]
    fn new_text_question_has_no_options() {
        let q = Question::new(id(1), QuestionKind::Text);
        assert_eq!(q.kind(), QuestionKind::Text);
        assert_eq!(q.answer(), Some(""));
        assert!(q.options().is_empty());
    }

    #[test]
    fn new_choice_questions_start_with_one_empty_option() {
        for kind in [QuestionKind::SingleChoice, QuestionKind::MultiChoice] {
            let q = Question::new(id(1), kind);
            assert_eq!(q.kind(), kind);
            assert_eq!(q.options(), [String::new()]);
            assert_eq!(q.answer(), None);
        }
    }

    #[test]
    fn choice_constructor_never_leaves_options_empty() {
        let q = Question::choice(id(1), false, "Pick", Vec::new());
        assert_eq!(q.options().len(), 1);
    }

    #[test]
    fn answer_on_choice_question_is_rejected() {
        let mut q = Question::new(id(4), QuestionKind::SingleChoice);
        let err = q.set_answer("Blue").unwrap_err();
        assert_eq!(
            err,
            SurveyError::FieldNotApplicable {
                id: id(4),
                field: QuestionField::Answer
            }
        );
    }

    #[test]
    fn option_edits() {
        let mut q = Question::new(id(2), QuestionKind::MultiChoice);
        q.push_option().unwrap();
        q.set_option(1, "Green").unwrap();
        assert_eq!(q.options(), ["", "Green"]);

        let err = q.set_option(2, "Red").unwrap_err();
        assert_eq!(err, SurveyError::IndexOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn options_on_text_question_are_rejected() {
        let mut q = Question::new(id(3), QuestionKind::Text);
        assert_eq!(q.push_option(), Err(SurveyError::NotAChoiceQuestion(id(3))));
        assert_eq!(
            q.set_option(0, "x"),
            Err(SurveyError::NotAChoiceQuestion(id(3)))
        );
        assert!(q.options().is_empty());
    }

    #[test]
    fn kind_wire_names() {
        assert_eq!(QuestionKind::SingleChoice.to_string(), "radio");
        assert_eq!(QuestionKind::MultiChoice.to_string(), "checkbox");
        assert_eq!(
            serde_json::from_str::<QuestionKind>(r#""radio""#).unwrap(),
            QuestionKind::SingleChoice
        );
    }

    #[test]
    fn kind_cycles_in_selector_order() {
        for kind in QuestionKind::ALL {
            assert_eq!(kind.next().prev(), kind);
        }
        assert_eq!(QuestionKind::MultiChoice.next(), QuestionKind::Text);
    }
}
