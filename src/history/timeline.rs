use serde::Serialize;

use crate::ledger::SnapshotVersion;

use super::tracked::TrackedValue;

/// A sub-field value and the snapshot version it was first observed at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint<T> {
    pub version: SnapshotVersion,
    pub value: T,
}

/// Deduplicated, version-ordered sequence of one sub-field's values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldTimeline<T> {
    points: Vec<TimelinePoint<T>>,
}

impl<T> Default for FieldTimeline<T> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}

impl<T: TrackedValue> FieldTimeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` if it opens the timeline or changed from the last
    /// point. Returns whether it was appended.
    pub fn observe(&mut self, version: SnapshotVersion, value: T) -> bool {
        let append = match self.points.last() {
            None => value.opens_timeline(),
            Some(last) => value.changed_from(&last.value),
        };
        if append {
            self.points.push(TimelinePoint { version, value });
        }
        append
    }
}

impl<T> FieldTimeline<T> {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[TimelinePoint<T>] {
        &self.points
    }

    pub fn last(&self) -> Option<&TimelinePoint<T>> {
        self.points.last()
    }

    pub fn values(&self) -> Vec<&T> {
        self.points.iter().map(|point| &point.value).collect()
    }

    pub fn into_values(self) -> Vec<T> {
        self.points.into_iter().map(|point| point.value).collect()
    }
}

impl<T> IntoIterator for FieldTimeline<T> {
    type Item = TimelinePoint<T>;
    type IntoIter = std::vec::IntoIter<TimelinePoint<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
