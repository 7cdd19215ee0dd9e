use time::{Duration, OffsetDateTime};

use crate::models::TrackPoint;

/// Timestamp column with a fixed signed hour offset applied.
///
/// A pure per-sample relabeling: the output has the same length and order
/// as the input even when the shift crosses a day boundary. The offset is
/// applied arithmetically without range checks, and `None` is the
/// identity.
pub fn adjusted_timestamps(
    points: &[TrackPoint],
    offset_hours: Option<i32>,
) -> Vec<OffsetDateTime> {
    let shift = match offset_hours {
        Some(hours) => Duration::hours(i64::from(hours)),
        None => Duration::ZERO,
    };

    points.iter().map(|point| point.timestamp + shift).collect()
}
