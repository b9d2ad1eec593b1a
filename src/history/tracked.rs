use crate::record::{BloodPressureReading, HeartRateReading, Policy, Prescription};

/// Change detection for one kind of sub-field value.
///
/// Each sub-record type defines its comparison exactly once here; the
/// reconstructor only ever asks these two questions.
pub trait TrackedValue: Clone {
    /// Whether this value may open an empty timeline.
    fn opens_timeline(&self) -> bool {
        true
    }

    /// Whether this value is a new observation relative to the last one kept.
    fn changed_from(&self, last: &Self) -> bool;
}

impl TrackedValue for HeartRateReading {
    // Equal timestamps mean the same reading.
    fn changed_from(&self, last: &Self) -> bool {
        self.timestamp != last.timestamp
    }
}

impl TrackedValue for BloodPressureReading {
    fn changed_from(&self, last: &Self) -> bool {
        self.timestamp != last.timestamp
    }
}

impl TrackedValue for Policy {
    fn changed_from(&self, last: &Self) -> bool {
        self != last
    }
}

/// Position-sensitive: reordering items without changing them still counts
/// as a change.
impl TrackedValue for Vec<Prescription> {
    fn opens_timeline(&self) -> bool {
        !self.is_empty()
    }

    fn changed_from(&self, last: &Self) -> bool {
        self.len() != last.len() || self.iter().zip(last).any(|(current, prior)| current != prior)
    }
}
