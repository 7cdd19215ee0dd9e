use time::OffsetDateTime;

use crate::buckets;
use crate::distance::DistanceMark;
use crate::models::{DerivedRecord, FEET_PER_METER, TrackPoint};
use crate::options::SeriesOptions;

/// Join raw samples, adjusted timestamps and distance marks into the
/// derived record sequence, in original order.
///
/// This is the single place where canonical meters become the configured
/// display unit. Missing elevation stays missing in both elevation fields;
/// defaulting it to zero would silently corrupt an elevation profile.
pub(crate) fn build_records(
    points: Vec<TrackPoint>,
    adjusted: Vec<OffsetDateTime>,
    marks: Vec<DistanceMark>,
    options: &SeriesOptions,
) -> Vec<DerivedRecord> {
    let start = match points.first() {
        Some(point) => point.timestamp,
        None => return Vec::new(),
    };

    points
        .into_iter()
        .zip(adjusted)
        .zip(marks)
        .map(|((point, adjusted_timestamp), mark)| {
            let cumulative_distance = mark.cumulative.in_unit(options.unit);

            DerivedRecord {
                latitude: point.latitude,
                longitude: point.longitude,
                elevation_meters: point.elevation,
                elevation_feet: point.elevation.map(|meters| meters * FEET_PER_METER),
                timestamp: point.timestamp,
                adjusted_timestamp,
                elapsed: point.timestamp - start,
                incremental_distance: mark.incremental.in_unit(options.unit),
                cumulative_distance,
                bucket: buckets::bucket_index(cumulative_distance, options.bucket_width),
            }
        })
        .collect()
}
