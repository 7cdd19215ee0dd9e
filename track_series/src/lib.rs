//! Derived series over a recorded GPS track.
//!
//! A track arrives as an ordered sequence of samples (latitude, longitude,
//! optional elevation, timestamp), already parsed from whatever file format
//! the recorder produced. This crate turns it into an equally ordered table
//! of derived rows: geodesic distance from the previous sample, running
//! total distance, elevation in meters and feet, timestamps with an
//! optional fixed hour correction, and a fixed-width distance bucket per
//! row. It also aggregates the sparse bucket membership counts used to
//! judge sampling density per unit of distance.
//!
//! File parsing and chart or map rendering live upstream and downstream of
//! this crate. Everything here is a pure, single-threaded transformation
//! over the owned sample sequence, recomputed in full on every call.

mod buckets;
mod distance;
mod error;
mod models;
mod options;
mod series;
mod timeshift;

pub use self::buckets::{bucket_counts, bucket_index};
pub use self::distance::{DistanceMark, accumulate, leg_distances};
pub use self::error::TrackError;
pub use self::models::*;
pub use self::options::SeriesOptions;
pub use self::timeshift::adjusted_timestamps;

/// Run the full transformation over one track.
///
/// Stages run strictly in recording order: timestamp adjustment, distance
/// accumulation, record assembly, bucket aggregation. Configuration is
/// checked before any computation and the input before any output; a
/// failure aborts the run with no partial result.
pub fn derive_series(
    points: impl IntoIterator<Item = TrackPoint>,
    options: &SeriesOptions,
) -> Result<TrackSeries, TrackError> {
    options.validate()?;

    let points = points.into_iter().collect::<Vec<_>>();
    validate_track(&points)?;

    let adjusted = timeshift::adjusted_timestamps(&points, options.utc_offset);
    let marks = distance::accumulate(&points);
    let records = series::build_records(points, adjusted, marks, options);
    let buckets = buckets::bucket_counts(&records);

    Ok(TrackSeries {
        unit: options.unit,
        records,
        buckets,
    })
}

fn validate_track(points: &[TrackPoint]) -> Result<(), TrackError> {
    if points.is_empty() {
        return Err(TrackError::EmptyTrack);
    }

    for (index, point) in points.iter().enumerate() {
        if !point.latitude.is_finite() || point.latitude.abs() > 90.0 {
            return Err(TrackError::LatitudeOutOfRange {
                index,
                value: point.latitude,
            });
        }

        if !point.longitude.is_finite() || point.longitude.abs() > 180.0 {
            return Err(TrackError::LongitudeOutOfRange {
                index,
                value: point.longitude,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime, macros::datetime};

    use super::*;

    fn point(latitude: f64, longitude: f64, second: i64) -> TrackPoint {
        TrackPoint {
            latitude,
            longitude,
            elevation: None,
            timestamp: datetime!(2024-06-01 10:00:00 UTC) + Duration::seconds(second),
        }
    }

    fn equator_track() -> Vec<TrackPoint> {
        vec![
            point(0.0, 0.0, 0),
            point(0.0, 0.001, 30),
            point(0.0, 0.002, 60),
        ]
    }

    #[test]
    fn empty_track_is_rejected() {
        let result = derive_series(Vec::new(), &SeriesOptions::new());

        assert_eq!(result, Err(TrackError::EmptyTrack));
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        let result = derive_series(
            vec![point(47.0, 8.0, 0), point(95.0, 8.0, 30)],
            &SeriesOptions::new(),
        );
        assert_eq!(
            result,
            Err(TrackError::LatitudeOutOfRange {
                index: 1,
                value: 95.0
            })
        );

        let result = derive_series(
            vec![point(47.0, -200.0, 0)],
            &SeriesOptions::new(),
        );
        assert_eq!(
            result,
            Err(TrackError::LongitudeOutOfRange {
                index: 0,
                value: -200.0
            })
        );

        let result = derive_series(vec![point(f64::NAN, 8.0, 0)], &SeriesOptions::new());
        assert!(matches!(
            result,
            Err(TrackError::LatitudeOutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn configuration_is_checked_before_the_input() {
        let result = derive_series(Vec::new(), &SeriesOptions::new().set_bucket_width(0.0));

        assert_eq!(result, Err(TrackError::BucketWidthNotPositive(0.0)));
    }

    #[test]
    fn single_sample_track() {
        let series = derive_series(vec![point(47.3769, 8.5417, 0)], &SeriesOptions::new())
            .expect("single sample is a valid track");

        assert_eq!(series.len(), 1);
        assert_eq!(series.records[0].incremental_distance, 0.0);
        assert_eq!(series.records[0].cumulative_distance, 0.0);
        assert_eq!(series.records[0].bucket, 0);
        assert_eq!(series.buckets.get(&0), Some(&1));
        assert_eq!(series.buckets.len(), 1);
        assert_eq!(series.total_distance(), 0.0);
    }

    #[test]
    fn equator_track_distances_and_buckets() {
        let options = SeriesOptions::new().set_bucket_width(0.1);
        let series = derive_series(equator_track(), &options).expect("valid track");

        // One millidegree of longitude at the equator is about 0.0692 mi.
        let cumulative = series
            .records
            .iter()
            .map(|record| record.cumulative_distance)
            .collect::<Vec<_>>();

        assert_eq!(cumulative[0], 0.0);
        assert!((cumulative[1] - 0.06917).abs() < 1e-4);
        assert!((cumulative[2] - 0.13834).abs() < 2e-4);

        assert_eq!(series.buckets.get(&0), Some(&2));
        assert_eq!(series.buckets.get(&1), Some(&1));
        assert_eq!(series.buckets.len(), 2);
    }

    #[test]
    fn unit_choice_only_relabels_distances() {
        let miles = derive_series(equator_track(), &SeriesOptions::new()).expect("valid track");
        let kilometers = derive_series(
            equator_track(),
            &SeriesOptions::new().set_unit(DistanceUnit::Kilometers),
        )
        .expect("valid track");

        let total_miles = miles.total_distance();
        let total_kilometers = kilometers.total_distance();

        let relative = (total_miles * 1.609344 - total_kilometers).abs() / total_kilometers;
        assert!(relative < 1e-9);
    }

    #[test]
    fn hour_offset_does_not_touch_distances_or_buckets() {
        let plain = derive_series(equator_track(), &SeriesOptions::new()).expect("valid track");
        let shifted = derive_series(
            equator_track(),
            &SeriesOptions::new().set_utc_offset(7),
        )
        .expect("valid track");

        assert_eq!(plain.buckets, shifted.buckets);

        for (a, b) in plain.records.iter().zip(&shifted.records) {
            assert_eq!(a.incremental_distance, b.incremental_distance);
            assert_eq!(a.cumulative_distance, b.cumulative_distance);
            assert_eq!(a.timestamp, b.timestamp);
            assert_eq!(b.adjusted_timestamp - b.timestamp, Duration::hours(7));
        }
    }

    // A short recorded run, with the elevation column missing for two
    // samples, the way consumer recorders drop it under tree cover.
    const RUN_CSV: &str = "\
latitude,longitude,elevation,timestamp
47.36670,8.54980,408.1,2024-06-01T06:00:00Z
47.36701,8.54903,408.9,2024-06-01T06:00:30Z
47.36745,8.54821,,2024-06-01T06:01:00Z
47.36802,8.54760,410.2,2024-06-01T06:01:30Z
47.36860,8.54713,,2024-06-01T06:02:00Z
47.36931,8.54662,411.8,2024-06-01T06:02:30Z
47.36995,8.54601,412.5,2024-06-01T06:03:00Z
47.37058,8.54544,413.0,2024-06-01T06:03:30Z
47.37110,8.54470,413.4,2024-06-01T06:04:00Z
47.37161,8.54398,414.1,2024-06-01T06:04:30Z
";

    #[derive(Debug, serde::Deserialize)]
    struct SampleRow {
        latitude: f64,
        longitude: f64,
        elevation: Option<f64>,
        #[serde(with = "time::serde::rfc3339")]
        timestamp: OffsetDateTime,
    }

    fn recorded_run() -> Vec<TrackPoint> {
        csv::Reader::from_reader(RUN_CSV.as_bytes())
            .deserialize()
            .map(|row| {
                let SampleRow {
                    latitude,
                    longitude,
                    elevation,
                    timestamp,
                } = row.expect("fixture rows are well formed");

                TrackPoint {
                    latitude,
                    longitude,
                    elevation,
                    timestamp,
                }
            })
            .collect()
    }

    #[test]
    fn recorded_run_invariants() {
        let track = recorded_run();
        let samples = track.len();
        let series = derive_series(track, &SeriesOptions::new()).expect("valid track");

        assert_eq!(series.len(), samples);
        assert_eq!(series.records[0].incremental_distance, 0.0);
        assert_eq!(series.records[0].cumulative_distance, 0.0);
        assert_eq!(series.records[0].elapsed, Duration::ZERO);

        for pair in series.records.windows(2) {
            assert!(pair[1].cumulative_distance >= pair[0].cumulative_distance);
            assert!(pair[1].elapsed >= pair[0].elapsed);

            let rebuilt = pair[0].cumulative_distance + pair[1].incremental_distance;
            let tolerance = 1e-9 * pair[1].cumulative_distance.max(1.0);
            assert!((pair[1].cumulative_distance - rebuilt).abs() <= tolerance);
        }

        let counted = series.buckets.values().sum::<usize>();
        assert_eq!(counted, samples);

        assert_eq!(series.elevation_profile().len(), samples);
        assert_eq!(series.route().len(), samples);

        // Rows 2 and 4 of the fixture have no elevation.
        assert_eq!(series.records[2].elevation_meters, None);
        assert_eq!(series.records[2].elevation_feet, None);
        assert_eq!(series.elevation_profile()[4].1, None);
        assert!(series.records[3].elevation_feet.is_some());
    }
}
