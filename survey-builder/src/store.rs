//! The mutable survey draft behind the editor.

use std::mem;

use tracing::{debug, info, warn};

use crate::{
    IdSource, Question, QuestionField, QuestionId, QuestionKind, ReorderIntent, SurveyDocument,
    SurveyError, SurveyExporter, SurveySnapshot, TimestampIds,
};

/// Holds the survey document being edited and applies user edits to it.
///
/// The store is the only writer of its document. Views read the whole
/// document through [`document`](Self::document) after every operation and
/// re-render; there are no partial updates.
///
/// All lookups are by question id, except reordering, which works on display
/// positions because that is what a drag-and-drop gesture reports.
#[derive(Debug, Clone)]
pub struct SurveyDocumentStore<I = TimestampIds> {
    document: SurveyDocument,
    ids: I,
}

impl Default for SurveyDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveyDocumentStore {
    /// Create a store with an empty document and timestamp ids.
    pub fn new() -> Self {
        Self::with_id_source(TimestampIds::new())
    }
}

impl<I: IdSource> SurveyDocumentStore<I> {
    /// Create a store with an empty document and the given id source.
    pub fn with_id_source(ids: I) -> Self {
        Self {
            document: SurveyDocument::new(),
            ids,
        }
    }

    /// Read-only view of the current document.
    pub fn document(&self) -> &SurveyDocument {
        &self.document
    }

    /// Replace the survey title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.document.set_title(title);
        debug!(title = self.document.title(), "title set");
    }

    /// Choose the question type the selector shows.
    pub fn set_pending_kind(&mut self, kind: QuestionKind) {
        self.document.set_pending_kind(kind);
        debug!(%kind, "pending question type set");
    }

    /// Append a blank question of `kind` and make `kind` the pending type.
    ///
    /// Returns the id of the new question, which is always last. Fails with
    /// `IdSpaceExhausted` when the id source has run out, leaving the document
    /// as it was.
    pub fn add_question(&mut self, kind: QuestionKind) -> Result<QuestionId, SurveyError> {
        let id = self
            .fresh_id()
            .inspect_err(|err| warn!(%kind, error = %err, "cannot add question"))?;
        // `fresh_id` never returns an id that is already in the document.
        self.document
            .push_question(Question::new(id, kind))
            .unwrap_or_else(|err| unreachable!("{err}"));
        self.document.set_pending_kind(kind);
        debug!(%id, %kind, count = self.document.len(), "question added");
        Ok(id)
    }

    /// Replace the prompt or answer of a question.
    ///
    /// Other questions are left untouched.
    pub fn update_question_field(
        &mut self,
        id: QuestionId,
        field: QuestionField,
        value: impl Into<String>,
    ) -> Result<(), SurveyError> {
        self.document.question_mut(id)?.set_field(field, value)?;
        debug!(%id, %field, "question field updated");
        Ok(())
    }

    /// Append an empty option to a choice question.
    pub fn add_option(&mut self, id: QuestionId) -> Result<(), SurveyError> {
        let question = self.document.question_mut(id)?;
        question.push_option()?;
        debug!(%id, options = question.options().len(), "option added");
        Ok(())
    }

    /// Replace the option at `index` of a choice question.
    pub fn set_option(
        &mut self,
        id: QuestionId,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), SurveyError> {
        self.document.question_mut(id)?.set_option(index, value)?;
        debug!(%id, index, "option updated");
        Ok(())
    }

    /// Move the question at `from` to position `to`.
    ///
    /// The question is removed before it is reinserted, so `to` is a position
    /// in the list without it. Both indices must be below the question count.
    pub fn reorder_questions(&mut self, from: usize, to: usize) -> Result<(), SurveyError> {
        self.document.move_question(from, to)?;
        debug!(from, to, "question moved");
        Ok(())
    }

    /// Apply the result of a drag-and-drop gesture.
    ///
    /// A cancelled gesture changes nothing. Returns whether a move happened.
    pub fn apply_reorder(&mut self, intent: ReorderIntent) -> Result<bool, SurveyError> {
        match intent.destination {
            Some(destination) => {
                self.reorder_questions(intent.source, destination)?;
                Ok(true)
            }
            None => {
                debug!(source = intent.source, "drag cancelled");
                Ok(false)
            }
        }
    }

    /// Take the finished survey and start over with an empty document.
    ///
    /// The id source is kept, so questions created afterwards never reuse an
    /// id from the submitted survey.
    pub fn submit(&mut self) -> SurveySnapshot {
        let document = mem::take(&mut self.document);
        info!(
            title = document.title(),
            questions = document.len(),
            "survey submitted"
        );
        SurveySnapshot::new(document)
    }

    /// Export the survey, then start over with an empty document.
    ///
    /// If the exporter fails the document is kept so nothing is lost.
    pub fn submit_with<E: SurveyExporter>(
        &mut self,
        exporter: &mut E,
    ) -> Result<SurveySnapshot, anyhow::Error> {
        let snapshot = SurveySnapshot::new(self.document.clone());
        if let Err(err) = exporter.export(&snapshot) {
            let err: anyhow::Error = err.into();
            warn!(error = %err, "export failed, keeping draft");
            return Err(err);
        }
        Ok(self.submit())
    }

    /// Replace the current draft with a previously exported survey.
    ///
    /// The id source learns the loaded ids so new questions stay unique.
    pub fn load(&mut self, snapshot: SurveySnapshot) {
        let document = snapshot.into_document();
        for question in document.questions() {
            self.ids.observe(question.id());
        }
        info!(
            title = document.title(),
            questions = document.len(),
            "survey loaded"
        );
        self.document = document;
    }

    fn fresh_id(&mut self) -> Result<QuestionId, SurveyError> {
        loop {
            let id = self.ids.next_id().ok_or(SurveyError::IdSpaceExhausted)?;
            if self.document.question(id).is_none() {
                return Ok(id);
            }
            self.ids.observe(id);
        }
    }
}
