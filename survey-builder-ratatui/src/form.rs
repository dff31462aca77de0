//! Form state and keyboard handling, independent of the terminal.
//!
//! The form owns nothing but UI state (focus, cursor, drag, errors). Every
//! edit is forwarded to the `SurveyDocumentStore`, and the rows are rebuilt
//! from the store's document after each key.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use survey_builder::{
    IdSource, QuestionField, QuestionId, QuestionKind, ReorderIntent, SurveyDocument,
    SurveyDocumentStore, SurveyError, SurveyExporter, SurveySnapshot,
};
use tracing::{info, warn};

/// A focusable row of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Row {
    Title,
    Prompt(QuestionId),
    Answer(QuestionId),
    Option(QuestionId, usize),
    AddOption(QuestionId),
    KindSelector,
    Submit,
}

impl Row {
    /// The question this row belongs to, if any.
    pub fn question(self) -> Option<QuestionId> {
        match self {
            Row::Prompt(id) | Row::Answer(id) | Row::Option(id, _) | Row::AddOption(id) => {
                Some(id)
            }
            Row::Title | Row::KindSelector | Row::Submit => None,
        }
    }

    /// Check if this row holds editable text.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Row::Title | Row::Prompt(_) | Row::Answer(_) | Row::Option(..)
        )
    }
}

/// All focusable rows for a document, top to bottom.
pub fn rows(document: &SurveyDocument) -> Vec<Row> {
    let mut rows = vec![Row::Title];
    for question in document.questions() {
        let id = question.id();
        rows.push(Row::Prompt(id));
        if question.kind().is_choice() {
            rows.extend((0..question.options().len()).map(|i| Row::Option(id, i)));
            rows.push(Row::AddOption(id));
        } else {
            rows.push(Row::Answer(id));
        }
    }
    rows.push(Row::KindSelector);
    rows.push(Row::Submit);
    rows
}

/// The current text of a text row.
pub fn row_text(document: &SurveyDocument, row: Row) -> Option<&str> {
    match row {
        Row::Title => Some(document.title()),
        Row::Prompt(id) => document.question(id).map(|q| q.prompt()),
        Row::Answer(id) => document.question(id).and_then(|q| q.answer()),
        Row::Option(id, index) => document
            .question(id)
            .and_then(|q| q.options().get(index))
            .map(String::as_str),
        Row::AddOption(_) | Row::KindSelector | Row::Submit => None,
    }
}

/// Required-field check run before a survey may be submitted.
///
/// The title, every prompt, every text answer and every single-choice option
/// must be filled in. Multi-choice options may stay blank.
pub fn validate_required(document: &SurveyDocument) -> Vec<(Row, String)> {
    let mut errors = Vec::new();
    if document.title().trim().is_empty() {
        errors.push((Row::Title, "Please enter a survey title".to_string()));
    }
    for question in document.questions() {
        let id = question.id();
        if question.prompt().trim().is_empty() {
            errors.push((Row::Prompt(id), "Please enter the question".to_string()));
        }
        match question.kind() {
            QuestionKind::Text => {
                if question.answer().is_none_or(|a| a.trim().is_empty()) {
                    errors.push((Row::Answer(id), "Please enter an answer".to_string()));
                }
            }
            QuestionKind::SingleChoice => {
                for (index, option) in question.options().iter().enumerate() {
                    if option.trim().is_empty() {
                        errors.push((
                            Row::Option(id, index),
                            "Please fill in this option".to_string(),
                        ));
                    }
                }
            }
            QuestionKind::MultiChoice => {}
        }
    }
    errors
}

/// A question being dragged to a new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drag {
    pub question: QuestionId,
    pub source: usize,
    pub target: usize,
}

/// Message shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// UI state of the form.
#[derive(Debug, Default)]
pub struct FormState {
    focus: usize,
    /// Cursor position in characters within the focused text row.
    cursor: usize,
    drag: Option<Drag>,
    errors: HashMap<Row, String>,
    status: Option<Status>,
    submitted: Vec<SurveySnapshot>,
    quit: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The focused row of `document`.
    pub fn focused_row(&self, document: &SurveyDocument) -> Row {
        let rows = rows(document);
        rows[self.focus.min(rows.len() - 1)]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn drag(&self) -> Option<Drag> {
        self.drag
    }

    pub fn error(&self, row: Row) -> Option<&str> {
        self.errors.get(&row).map(String::as_str)
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Surveys submitted during this session, oldest first.
    pub fn submitted(&self) -> &[SurveySnapshot] {
        &self.submitted
    }

    pub fn into_submitted(self) -> Vec<SurveySnapshot> {
        self.submitted
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply one key press.
    ///
    /// Errors that come from the document's data, such as running out of
    /// question ids, are shown in the status line. Any other store error means
    /// the form addressed something that is not in the document and is
    /// returned to the caller.
    pub fn handle_key<I: IdSource, E: SurveyExporter>(
        &mut self,
        key: KeyEvent,
        store: &mut SurveyDocumentStore<I>,
        exporter: &mut E,
    ) -> Result<(), SurveyError> {
        match self.dispatch_key(key, store, exporter) {
            Err(err) if !err.is_programmer_error() => {
                warn!(error = %err, "edit rejected");
                self.status = Some(Status::Error(err.to_string()));
                Ok(())
            }
            result => result,
        }
    }

    fn dispatch_key<I: IdSource, E: SurveyExporter>(
        &mut self,
        key: KeyEvent,
        store: &mut SurveyDocumentStore<I>,
        exporter: &mut E,
    ) -> Result<(), SurveyError> {
        if self.drag.is_some() {
            return self.handle_drag_key(key, store);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let row = self.focused_row(store.document());
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::F(10) => self.submit(store, exporter),
            KeyCode::Char('s') if ctrl => self.submit(store, exporter),
            KeyCode::Up | KeyCode::Down if ctrl => {
                if let Some(id) = row.question() {
                    self.start_drag(store.document(), id);
                    self.handle_drag_key(KeyEvent::from(key.code), store)?;
                }
            }
            KeyCode::BackTab | KeyCode::Up => self.move_focus(store.document(), -1),
            KeyCode::Tab | KeyCode::Down => self.move_focus(store.document(), 1),
            KeyCode::PageUp => self.move_focus(store.document(), -5),
            KeyCode::PageDown => self.move_focus(store.document(), 5),
            KeyCode::Left if row == Row::KindSelector => {
                store.set_pending_kind(store.document().pending_kind().prev());
            }
            KeyCode::Right if row == Row::KindSelector => {
                store.set_pending_kind(store.document().pending_kind().next());
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                let len = text_len(store.document(), row);
                self.cursor = (self.cursor + 1).min(len);
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = text_len(store.document(), row),
            KeyCode::Enter => self.activate(row, store, exporter)?,
            KeyCode::Backspace if row.is_text() && self.cursor > 0 => {
                self.cursor -= 1;
                self.edit_text(row, store, |text, at| {
                    remove_char(text, at);
                })?;
            }
            KeyCode::Delete if row.is_text() && self.cursor < text_len(store.document(), row) => {
                self.edit_text(row, store, |text, at| {
                    remove_char(text, at);
                })?;
            }
            KeyCode::Char(c) if row.is_text() && !ctrl => {
                self.edit_text(row, store, |text, at| {
                    insert_char(text, at, c);
                })?;
                self.cursor += 1;
            }
            _ => {}
        }
        Ok(())
    }

    fn activate<I: IdSource, E: SurveyExporter>(
        &mut self,
        row: Row,
        store: &mut SurveyDocumentStore<I>,
        exporter: &mut E,
    ) -> Result<(), SurveyError> {
        match row {
            Row::AddOption(id) => {
                store.add_option(id)?;
                let count = store
                    .document()
                    .question(id)
                    .map_or(0, |q| q.options().len());
                self.focus_row(store.document(), Row::Option(id, count - 1));
            }
            Row::KindSelector => {
                let id = store.add_question(store.document().pending_kind())?;
                self.focus_row(store.document(), Row::Prompt(id));
            }
            Row::Submit => self.submit(store, exporter),
            Row::Title | Row::Prompt(_) | Row::Answer(_) | Row::Option(..) => {
                self.move_focus(store.document(), 1);
            }
        }
        Ok(())
    }

    fn submit<I: IdSource, E: SurveyExporter>(
        &mut self,
        store: &mut SurveyDocumentStore<I>,
        exporter: &mut E,
    ) {
        let errors = validate_required(store.document());
        if let Some((first, _)) = errors.first() {
            let first = *first;
            warn!(count = errors.len(), "survey has missing required fields");
            self.errors = errors.into_iter().collect();
            self.status = Some(Status::Error("Please fill in all required fields".to_string()));
            self.focus_row(store.document(), first);
            return;
        }
        self.errors.clear();

        match store.submit_with(exporter) {
            Ok(snapshot) => {
                info!(questions = snapshot.document().len(), "survey downloaded");
                self.submitted.push(snapshot);
                self.status = Some(Status::Info("Survey Form Downloaded!".to_string()));
                self.focus = 0;
                self.cursor = 0;
            }
            Err(err) => {
                warn!(error = %err, "survey export failed");
                self.status = Some(Status::Error(format!("Export failed: {err:#}")));
            }
        }
    }

    fn start_drag(&mut self, document: &SurveyDocument, id: QuestionId) {
        if let Some(position) = document.position(id) {
            self.drag = Some(Drag {
                question: id,
                source: position,
                target: position,
            });
            self.status = Some(Status::Info(
                "Moving question: ↑/↓ choose position, Enter drop, Esc cancel".to_string(),
            ));
        }
    }

    fn handle_drag_key<I: IdSource>(
        &mut self,
        key: KeyEvent,
        store: &mut SurveyDocumentStore<I>,
    ) -> Result<(), SurveyError> {
        let Some(drag) = self.drag.as_mut() else {
            return Ok(());
        };
        let last = store.document().len().saturating_sub(1);
        match key.code {
            KeyCode::Up => drag.target = drag.target.saturating_sub(1),
            KeyCode::Down => drag.target = (drag.target + 1).min(last),
            KeyCode::Enter => self.finish_drag(store, true)?,
            KeyCode::Esc => self.finish_drag(store, false)?,
            _ => {}
        }
        Ok(())
    }

    fn finish_drag<I: IdSource>(
        &mut self,
        store: &mut SurveyDocumentStore<I>,
        dropped: bool,
    ) -> Result<(), SurveyError> {
        let Some(drag) = self.drag.take() else {
            return Ok(());
        };
        let intent = if dropped {
            ReorderIntent::dropped(drag.source, drag.target)
        } else {
            ReorderIntent::cancelled(drag.source)
        };
        store.apply_reorder(intent)?;
        self.status = None;
        self.focus_row(store.document(), Row::Prompt(drag.question));
        Ok(())
    }

    fn edit_text<I: IdSource>(
        &mut self,
        row: Row,
        store: &mut SurveyDocumentStore<I>,
        edit: impl FnOnce(&mut String, usize),
    ) -> Result<(), SurveyError> {
        let mut text = row_text(store.document(), row).unwrap_or_default().to_string();
        edit(&mut text, self.cursor);
        self.errors.remove(&row);
        match row {
            Row::Title => store.set_title(text),
            Row::Prompt(id) => store.update_question_field(id, QuestionField::Prompt, text)?,
            Row::Answer(id) => store.update_question_field(id, QuestionField::Answer, text)?,
            Row::Option(id, index) => store.set_option(id, index, text)?,
            Row::AddOption(_) | Row::KindSelector | Row::Submit => {}
        }
        Ok(())
    }

    fn move_focus(&mut self, document: &SurveyDocument, delta: isize) {
        let last = rows(document).len() - 1;
        self.focus = self.focus.saturating_add_signed(delta).min(last);
        self.cursor = text_len(document, self.focused_row(document));
    }

    fn focus_row(&mut self, document: &SurveyDocument, row: Row) {
        if let Some(index) = rows(document).iter().position(|r| *r == row) {
            self.focus = index;
            self.cursor = text_len(document, row);
        }
    }
}

fn text_len(document: &SurveyDocument, row: Row) -> usize {
    row_text(document, row).map_or(0, |t| t.chars().count())
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(offset, _)| offset)
}

fn insert_char(text: &mut String, at: usize, c: char) {
    let offset = byte_offset(text, at);
    text.insert(offset, c);
}

fn remove_char(text: &mut String, at: usize) {
    let offset = byte_offset(text, at);
    if offset < text.len() {
        text.remove(offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_builder::{MemoryExporter, Question, SequentialIds};

    struct Harness {
        form: FormState,
        store: SurveyDocumentStore<SequentialIds>,
        exporter: MemoryExporter,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                form: FormState::new(),
                store: SurveyDocumentStore::with_id_source(SequentialIds::new()),
                exporter: MemoryExporter::new(),
            }
        }

        fn press(&mut self, code: KeyCode) {
            self.key(KeyEvent::from(code));
        }

        fn ctrl(&mut self, code: KeyCode) {
            self.key(KeyEvent::new(code, KeyModifiers::CONTROL));
        }

        fn key(&mut self, key: KeyEvent) {
            self.form
                .handle_key(key, &mut self.store, &mut self.exporter)
                .unwrap();
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.press(KeyCode::Char(c));
            }
        }

        fn focused(&self) -> Row {
            self.form.focused_row(self.store.document())
        }

        fn focus(&mut self, row: Row) {
            self.form.focus_row(self.store.document(), row);
        }

        fn prompts(&self) -> Vec<&str> {
            self.store
                .document()
                .questions()
                .iter()
                .map(|q| q.prompt())
                .collect()
        }

        fn add(&mut self, kind: QuestionKind, prompt: &str) -> QuestionId {
            self.store.set_pending_kind(kind);
            self.focus(Row::KindSelector);
            self.press(KeyCode::Enter);
            self.type_text(prompt);
            match self.focused() {
                Row::Prompt(id) => id,
                other => panic!("expected prompt row, got {other:?}"),
            }
        }
    }

    #[test]
    fn rows_follow_question_kinds() {
        let mut store = SurveyDocumentStore::with_id_source(SequentialIds::new());
        let text = store.add_question(QuestionKind::Text).unwrap();
        let radio = store.add_question(QuestionKind::SingleChoice).unwrap();
        assert_eq!(
            rows(store.document()),
            [
                Row::Title,
                Row::Prompt(text),
                Row::Answer(text),
                Row::Prompt(radio),
                Row::Option(radio, 0),
                Row::AddOption(radio),
                Row::KindSelector,
                Row::Submit,
            ]
        );
    }

    #[test]
    fn typing_edits_the_title() {
        let mut h = Harness::new();
        h.type_text("Lunch");
        h.press(KeyCode::Left);
        h.press(KeyCode::Left);
        h.press(KeyCode::Backspace);
        h.type_text("ü");
        assert_eq!(h.store.document().title(), "Luüch");
        h.press(KeyCode::Home);
        h.press(KeyCode::Delete);
        assert_eq!(h.store.document().title(), "uüch");
    }

    #[test]
    fn selector_cycles_and_adds_questions() {
        let mut h = Harness::new();
        h.focus(Row::KindSelector);
        h.press(KeyCode::Right);
        assert_eq!(h.store.document().pending_kind(), QuestionKind::SingleChoice);
        h.press(KeyCode::Left);
        h.press(KeyCode::Left);
        assert_eq!(h.store.document().pending_kind(), QuestionKind::MultiChoice);

        h.press(KeyCode::Enter);
        let doc = h.store.document();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.questions()[0].kind(), QuestionKind::MultiChoice);
        assert_eq!(h.focused(), Row::Prompt(doc.questions()[0].id()));
    }

    #[test]
    fn add_option_focuses_the_new_option() {
        let mut h = Harness::new();
        let id = h.add(QuestionKind::SingleChoice, "Where?");
        h.focus(Row::AddOption(id));
        h.press(KeyCode::Enter);
        assert_eq!(h.focused(), Row::Option(id, 1));
        h.type_text("Sushi");
        assert_eq!(
            h.store.document().question(id).unwrap().options(),
            ["", "Sushi"]
        );
    }

    #[test]
    fn drag_moves_question_on_drop() {
        let mut h = Harness::new();
        h.add(QuestionKind::Text, "a");
        h.add(QuestionKind::Text, "b");
        let c = h.add(QuestionKind::Text, "c");

        h.focus(Row::Prompt(c));
        h.ctrl(KeyCode::Up);
        h.press(KeyCode::Up);
        assert_eq!(h.form.drag().map(|d| d.target), Some(0));
        h.press(KeyCode::Enter);

        assert_eq!(h.prompts(), ["c", "a", "b"]);
        assert!(h.form.drag().is_none());
        assert_eq!(h.focused(), Row::Prompt(c));
    }

    #[test]
    fn cancelled_drag_keeps_order() {
        let mut h = Harness::new();
        let a = h.add(QuestionKind::Text, "a");
        h.add(QuestionKind::Text, "b");

        h.focus(Row::Prompt(a));
        h.ctrl(KeyCode::Down);
        h.press(KeyCode::Esc);

        assert_eq!(h.prompts(), ["a", "b"]);
        assert!(!h.form.should_quit());
    }

    #[test]
    fn drag_target_is_clamped() {
        let mut h = Harness::new();
        let a = h.add(QuestionKind::Text, "a");
        h.add(QuestionKind::Text, "b");

        h.focus(Row::Prompt(a));
        h.ctrl(KeyCode::Down);
        h.press(KeyCode::Down);
        h.press(KeyCode::Down);
        assert_eq!(h.form.drag().map(|d| d.target), Some(1));
        h.press(KeyCode::Enter);
        assert_eq!(h.prompts(), ["b", "a"]);
    }

    #[test]
    fn submit_requires_filled_fields() {
        let mut h = Harness::new();
        let id = h.add(QuestionKind::Text, "Favorite color?");
        h.ctrl(KeyCode::Char('s'));

        assert!(h.exporter.exports().is_empty());
        assert_eq!(h.focused(), Row::Title);
        assert!(h.form.error(Row::Title).is_some());
        assert!(h.form.error(Row::Answer(id)).is_some());
        assert!(matches!(h.form.status(), Some(Status::Error(_))));

        h.type_text("Colors");
        assert!(h.form.error(Row::Title).is_none());
    }

    #[test]
    fn submit_exports_and_resets() {
        let mut h = Harness::new();
        h.type_text("Colors");
        let id = h.add(QuestionKind::Text, "Favorite color?");
        h.focus(Row::Answer(id));
        h.type_text("Blue");
        let multi = h.add(QuestionKind::MultiChoice, "Pets?");

        h.press(KeyCode::F(10));

        let exported = h.exporter.last().unwrap().document();
        assert_eq!(exported.title(), "Colors");
        assert_eq!(exported.questions()[0].answer(), Some("Blue"));
        assert_eq!(exported.question(multi).unwrap().options(), [""]);
        assert!(h.store.document().is_empty());
        assert_eq!(h.form.submitted().len(), 1);
        assert_eq!(
            h.form.status(),
            Some(&Status::Info("Survey Form Downloaded!".to_string()))
        );
        assert_eq!(h.focused(), Row::Title);
    }

    #[test]
    fn failed_export_keeps_draft_and_reports() {
        let mut h = Harness::new();
        h.exporter = MemoryExporter::failing("disk full");
        h.type_text("Colors");
        h.press(KeyCode::F(10));

        assert_eq!(h.store.document().title(), "Colors");
        assert!(
            matches!(h.form.status(), Some(Status::Error(msg)) if msg.contains("disk full"))
        );
    }

    #[test]
    fn running_out_of_ids_is_reported() {
        let mut h = Harness::new();
        let mut doc = SurveyDocument::new();
        doc.push_question(Question::text(QuestionId::new(i64::MAX), "Name?", "Ada"))
            .unwrap();
        h.store.load(SurveySnapshot::new(doc));

        h.focus(Row::KindSelector);
        h.press(KeyCode::Enter);

        assert_eq!(h.store.document().len(), 1);
        assert_eq!(h.focused(), Row::KindSelector);
        assert!(
            matches!(h.form.status(), Some(Status::Error(msg)) if msg.contains("ids left"))
        );
    }

    #[test]
    fn escape_quits() {
        let mut h = Harness::new();
        h.press(KeyCode::Esc);
        assert!(h.form.should_quit());
    }

    #[test]
    fn validation_skips_multi_choice_options() {
        let mut store = SurveyDocumentStore::with_id_source(SequentialIds::new());
        store.set_title("t");
        let radio = store.add_question(QuestionKind::SingleChoice).unwrap();
        let check = store.add_question(QuestionKind::MultiChoice).unwrap();
        store
            .update_question_field(radio, QuestionField::Prompt, "r")
            .unwrap();
        store
            .update_question_field(check, QuestionField::Prompt, "c")
            .unwrap();

        let errors = validate_required(store.document());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, Row::Option(radio, 0));
    }
}
