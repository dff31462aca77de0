use crate::{QuestionField, QuestionId};

/// Error type for survey document operations.
///
/// Apart from `IdSpaceExhausted`, every variant describes a malformed call: the
/// editor only ever refers to questions and indices it has just read from the
/// document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurveyError {
    /// No question with this id exists in the document.
    #[error("No question with id {0}")]
    NotFound(QuestionId),

    /// An option or reorder index is outside the valid range.
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Options were addressed on a free-text question.
    #[error("Question {0} is not a choice question")]
    NotAChoiceQuestion(QuestionId),

    /// A field was edited that the question's kind does not carry.
    #[error("Field '{field}' does not apply to question {id}")]
    FieldNotApplicable { id: QuestionId, field: QuestionField },

    /// A question with this id is already part of the document.
    #[error("Duplicate question id {0}")]
    DuplicateId(QuestionId),

    /// Every id above the largest one in use has been taken.
    #[error("No question ids left; the survey already uses the largest possible id")]
    IdSpaceExhausted,
}

impl SurveyError {
    /// Check if this error can only come from a caller bug.
    ///
    /// Running out of ids depends on the loaded data, so it is the one case a
    /// view should report and survive.
    pub fn is_programmer_error(&self) -> bool {
        !matches!(self, Self::IdSpaceExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = SurveyError::IndexOutOfRange { index: 3, len: 3 };
        assert_eq!(err.to_string(), "Index 3 out of range for length 3");

        let err = SurveyError::FieldNotApplicable {
            id: QuestionId::new(5),
            field: QuestionField::Answer,
        };
        assert_eq!(err.to_string(), "Field 'answer' does not apply to question 5");
    }

    #[test]
    fn exhausted_ids_are_not_a_programmer_error() {
        assert!(!SurveyError::IdSpaceExhausted.is_programmer_error());
        assert!(SurveyError::NotFound(QuestionId::new(1)).is_programmer_error());
    }
}
