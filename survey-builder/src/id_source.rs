//! Sources of fresh question ids.

use chrono::Utc;

use crate::QuestionId;

/// Hands out question ids that are never reused.
///
/// Every id returned by `next_id` must be strictly greater than every id
/// returned or observed before it.
pub trait IdSource {
    /// Produce a fresh id, or `None` once no greater id is left.
    fn next_id(&mut self) -> Option<QuestionId>;

    /// Record an id that entered the document from elsewhere (e.g. a loaded
    /// file), so later ids do not collide with it.
    fn observe(&mut self, id: QuestionId);
}

/// Ids taken from the creation time in milliseconds since the Unix epoch.
///
/// Two questions created within the same millisecond (or after the clock
/// stepped backwards) get the last id plus one instead.
#[derive(Debug, Clone, Default)]
pub struct TimestampIds {
    last: Option<i64>,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for TimestampIds {
    fn next_id(&mut self) -> Option<QuestionId> {
        let now = Utc::now().timestamp_millis();
        let raw = match self.last {
            Some(last) if now <= last => last.checked_add(1)?,
            _ => now,
        };
        self.last = Some(raw);
        Some(QuestionId::new(raw))
    }

    fn observe(&mut self, id: QuestionId) {
        self.last = self.last.max(Some(id.get()));
    }
}

/// Ids counting up from 1. Deterministic, for tests and scripted use.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    last: i64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> Option<QuestionId> {
        self.last = self.last.checked_add(1)?;
        Some(QuestionId::new(self.last))
    }

    fn observe(&mut self, id: QuestionId) {
        self.last = self.last.max(id.get());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_ids_strictly_increase() {
        let mut ids = TimestampIds::new();
        let generated: Vec<_> = (0..1000).map(|_| ids.next_id().unwrap()).collect();
        assert!(generated.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn timestamp_ids_skip_past_observed() {
        let mut ids = TimestampIds::new();
        let far_future = QuestionId::new(i64::MAX / 2);
        ids.observe(far_future);
        assert_eq!(ids.next_id(), Some(QuestionId::new(i64::MAX / 2 + 1)));
    }

    #[test]
    fn timestamp_ids_run_out_at_max() {
        let mut ids = TimestampIds::new();
        ids.observe(QuestionId::new(i64::MAX - 1));
        assert_eq!(ids.next_id(), Some(QuestionId::new(i64::MAX)));
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.next_id(), None);
    }

    #[test]
    fn sequential_ids() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(), Some(QuestionId::new(1)));
        assert_eq!(ids.next_id(), Some(QuestionId::new(2)));

        ids.observe(QuestionId::new(10));
        assert_eq!(ids.next_id(), Some(QuestionId::new(11)));

        ids.observe(QuestionId::new(3));
        assert_eq!(ids.next_id(), Some(QuestionId::new(12)));
    }

    #[test]
    fn sequential_ids_run_out_at_max() {
        let mut ids = SequentialIds::new();
        ids.observe(QuestionId::new(i64::MAX));
        assert_eq!(ids.next_id(), None);
    }
}
