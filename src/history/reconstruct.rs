use tracing::{debug, warn};

use crate::codec::Codec;
use crate::error::{LedgerError, Result};
use crate::ledger::History;
use crate::record::Record;

use super::selector::FieldSelector;
use super::timeline::FieldTimeline;

/// Rebuild the timeline of one sub-field from a key's snapshot history.
///
/// `history` must be oldest-first. Deleted and empty versions contribute
/// nothing. The
/// first live snapshot defines the aggregate, so failing to decode it is an
/// error; later snapshots that fail to decode are logged and skipped. A key
/// with no history at all is `NotFound`.
///
/// The stream is consumed once and dropped on every return path.
pub fn reconstruct<R, S>(
    key: &str,
    history: History<'_>,
    codec: Codec,
    selector: &S,
) -> Result<FieldTimeline<S::Value>>
where
    R: Record,
    S: FieldSelector<R>,
{
    let mut timeline = FieldTimeline::new();
    let mut versions_seen = 0usize;
    let mut defined = false;
    let mut skipped = 0usize;

    for entry in history {
        let entry = entry?;
        versions_seen += 1;
        if entry.is_delete || entry.value.is_empty() {
            continue;
        }

        let record: R = match codec.decode(&entry.value) {
            Ok(record) => record,
            Err(reason) if !defined => {
                return Err(LedgerError::CorruptVersion {
                    key: key.to_string(),
                    version: entry.version,
                    reason,
                });
            }
            Err(reason) => {
                warn!(
                    key,
                    version = %entry.version,
                    field = selector.name(),
                    %reason,
                    "skipping undecodable snapshot"
                );
                skipped += 1;
                continue;
            }
        };
        defined = true;

        if let Some(value) = selector.extract(&record) {
            timeline.observe(entry.version, value);
        }
    }

    if versions_seen == 0 {
        return Err(LedgerError::not_found(R::KIND, key));
    }

    debug!(
        key,
        field = selector.name(),
        versions = versions_seen,
        skipped,
        points = timeline.len(),
        "reconstructed field timeline"
    );
    Ok(timeline)
}
