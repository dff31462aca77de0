/// The outcome of a drag-and-drop gesture on the question list.
///
/// `destination` is `None` when the gesture was cancelled (dropped outside
/// the list, or aborted), in which case nothing moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderIntent {
    pub source: usize,
    pub destination: Option<usize>,
}

impl ReorderIntent {
    /// A completed drag from `source` to `destination`.
    pub fn dropped(source: usize, destination: usize) -> Self {
        Self {
            source,
            destination: Some(destination),
        }
    }

    /// A drag that ended without a drop target.
    pub fn cancelled(source: usize) -> Self {
        Self {
            source,
            destination: None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.destination.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        assert_eq!(
            ReorderIntent::dropped(2, 0),
            ReorderIntent {
                source: 2,
                destination: Some(0)
            }
        );
        assert!(ReorderIntent::cancelled(1).is_cancelled());
        assert!(!ReorderIntent::dropped(1, 1).is_cancelled());
    }
}
