use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a question within a survey document, e.g. `1718035200123`.
///
/// Ids are handed out by the store's id source when a question is created.
/// They are never reused and never renumbered, so a question keeps its id
/// across edits and reorders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(i64);

impl QuestionId {
    /// Create an id from its raw value.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for QuestionId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}
