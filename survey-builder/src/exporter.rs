//! Destinations for submitted surveys.
//!
//! A submitted survey is handed to a `SurveyExporter`, which decides where the
//! JSON ends up: a `survey-form.json` file, the console, or memory (for tests).
//!
//! # Example
//!
//! ```rust
//! use survey_builder::{MemoryExporter, QuestionKind, SequentialIds, SurveyDocumentStore};
//!
//! let mut store = SurveyDocumentStore::with_id_source(SequentialIds::new());
//! store.set_title("Lunch");
//! store.add_question(QuestionKind::Text).unwrap();
//!
//! let mut exporter = MemoryExporter::new();
//! store.submit_with(&mut exporter).unwrap();
//!
//! assert_eq!(exporter.exports().len(), 1);
//! assert!(store.document().is_empty());
//! ```

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use tracing::{debug, info};

use crate::{EXPORT_FILE_NAME, SurveySnapshot};

/// Error type for the built-in exporters.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to serialize survey: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write survey to {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write survey: {0}")]
    Write(#[source] io::Error),
}

/// Trait for destinations that receive submitted surveys.
pub trait SurveyExporter {
    /// The error type for this exporter.
    type Error: Into<anyhow::Error>;

    /// Deliver a submitted survey.
    ///
    /// The store only resets its document once this returns `Ok`.
    fn export(&mut self, snapshot: &SurveySnapshot) -> Result<(), Self::Error>;
}

/// Writes the survey as `survey-form.json` into a directory.
#[derive(Debug, Clone)]
pub struct FileExporter {
    dir: PathBuf,
    file_name: String,
}

impl Default for FileExporter {
    fn default() -> Self {
        Self::new(".")
    }
}

impl FileExporter {
    /// Export into `dir`, which must exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            file_name: EXPORT_FILE_NAME.to_string(),
        }
    }

    /// Use a different file name than `survey-form.json`.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// The path the next export is written to.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

impl SurveyExporter for FileExporter {
    type Error = ExportError;

    fn export(&mut self, snapshot: &SurveySnapshot) -> Result<(), Self::Error> {
        let json = snapshot.to_json()?;
        let path = self.path();
        fs::write(&path, json).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), questions = snapshot.document().len(), "survey exported");
        Ok(())
    }
}

/// Writes the survey JSON to a writer, stdout by default.
#[derive(Debug)]
pub struct ConsoleExporter<W: Write = io::Stdout> {
    out: W,
}

impl ConsoleExporter {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for ConsoleExporter {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> ConsoleExporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SurveyExporter for ConsoleExporter<W> {
    type Error = ExportError;

    fn export(&mut self, snapshot: &SurveySnapshot) -> Result<(), Self::Error> {
        let json = snapshot.to_json()?;
        writeln!(self.out, "{json}").map_err(ExportError::Write)?;
        self.out.flush().map_err(ExportError::Write)?;
        debug!(bytes = json.len(), "survey written to console");
        Ok(())
    }
}

/// Keeps every exported survey in memory.
///
/// Useful for testing code that submits surveys without touching the
/// filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryExporter {
    exports: Vec<SurveySnapshot>,
    fail_with: Option<String>,
}

impl MemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every export fail with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            exports: Vec::new(),
            fail_with: Some(message.into()),
        }
    }

    /// All surveys exported so far, oldest first.
    pub fn exports(&self) -> &[SurveySnapshot] {
        &self.exports
    }

    /// The most recent export.
    pub fn last(&self) -> Option<&SurveySnapshot> {
        self.exports.last()
    }
}

impl SurveyExporter for MemoryExporter {
    type Error = anyhow::Error;

    fn export(&mut self, snapshot: &SurveySnapshot) -> Result<(), Self::Error> {
        if let Some(message) = &self.fail_with {
            anyhow::bail!("{message}");
        }
        self.exports.push(snapshot.clone());
        Ok(())
    }
}
