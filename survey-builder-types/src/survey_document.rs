use crate::{Question, QuestionId, QuestionKind, SurveyError};

/// The complete in-memory draft of a survey: title, ordered questions and
/// the question type the selector currently shows.
///
/// The order of `questions` is the render and export order. There is no
/// separate sort key; reordering moves the questions themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyDocument {
    title: String,
    questions: Vec<Question>,
    pending_kind: QuestionKind,
}

impl SurveyDocument {
    /// Create the empty document a fresh form starts with.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The questions in display order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question type that "add question" uses next.
    pub fn pending_kind(&self) -> QuestionKind {
        self.pending_kind
    }

    /// Look up a question by id.
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Position of a question in display order.
    pub fn position(&self, id: QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id() == id)
    }

    /// Check if the document has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_pending_kind(&mut self, kind: QuestionKind) {
        self.pending_kind = kind;
    }

    /// Append a question at the end.
    ///
    /// Fails if a question with the same id is already present.
    pub fn push_question(&mut self, question: Question) -> Result<(), SurveyError> {
        if self.question(question.id()).is_some() {
            return Err(SurveyError::DuplicateId(question.id()));
        }
        self.questions.push(question);
        Ok(())
    }

    /// Get a mutable reference to a question by id.
    pub fn question_mut(&mut self, id: QuestionId) -> Result<&mut Question, SurveyError> {
        self.questions
            .iter_mut()
            .find(|q| q.id() == id)
            .ok_or(SurveyError::NotFound(id))
    }

    /// Move the question at `from` so that it ends up at `to`.
    ///
    /// The question is removed first, so `to` indexes the sequence without it.
    /// Both indices must be in `0..len`.
    pub fn move_question(&mut self, from: usize, to: usize) -> Result<(), SurveyError> {
        let len = self.questions.len();
        for index in [from, to] {
            if index >= len {
                return Err(SurveyError::IndexOutOfRange { index, len });
            }
        }
        let question = self.questions.remove(from);
        self.questions.insert(to, question);
        Ok(())
    }
}
