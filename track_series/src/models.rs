use std::collections::BTreeMap;

use time::{Duration, OffsetDateTime};

/// Meters per international mile.
pub const METERS_PER_MILE: f64 = 1609.344;
/// Meters per kilometer.
pub const METERS_PER_KILOMETER: f64 = 1000.0;
/// Feet per meter.
pub const FEET_PER_METER: f64 = 3.28084;

/// One raw GPS sample, as produced by an upstream file parser.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackPoint {
    /// Latitude in signed degrees.
    pub latitude: f64,
    /// Longitude in signed degrees.
    pub longitude: f64,
    /// Elevation in meters, when the recorder provided one.
    pub elevation: Option<f64>,
    /// Recording time. Assumed non-decreasing within a track.
    pub timestamp: OffsetDateTime,
}

/// A length in the pipeline's canonical internal unit (meters).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Distance(f64);

impl Distance {
    pub const ZERO: Self = Self(0.0);

    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub const fn as_meters(self) -> f64 {
        self.0
    }

    pub const fn as_kilometers(self) -> f64 {
        self.0 / METERS_PER_KILOMETER
    }

    pub const fn as_miles(self) -> f64 {
        self.0 / METERS_PER_MILE
    }

    pub const fn in_unit(self, unit: DistanceUnit) -> f64 {
        match unit {
            DistanceUnit::Miles => self.as_miles(),
            DistanceUnit::Kilometers => self.as_kilometers(),
        }
    }
}

/// Unit used for the distance fields of the derived series.
///
/// Selecting a unit never changes the underlying geodesic computation,
/// which always runs in meters and is converted once on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DistanceUnit {
    #[default]
    Miles,
    Kilometers,
}

/// One row of the derived series. Same ordinal position as the sample it
/// was built from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_meters: Option<f64>,
    /// Absent whenever `elevation_meters` is absent.
    pub elevation_feet: Option<f64>,
    /// Timestamp as recorded.
    pub timestamp: OffsetDateTime,
    /// Timestamp with the configured hour offset applied. Equals
    /// `timestamp` when no offset is configured.
    pub adjusted_timestamp: OffsetDateTime,
    /// Time since the first sample of the track.
    pub elapsed: Duration,
    /// Distance from the previous record, in the configured unit. Zero for
    /// the first record, which has no predecessor.
    pub incremental_distance: f64,
    /// Running total distance, in the configured unit.
    pub cumulative_distance: f64,
    /// Index of the distance bucket this record falls in.
    pub bucket: u64,
}

/// Result of one derivation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackSeries {
    pub unit: DistanceUnit,
    /// Derived rows, one per input sample, in recording order.
    pub records: Vec<DerivedRecord>,
    /// Sparse bucket membership counts, keyed by bucket index. Buckets no
    /// record falls in are absent.
    pub buckets: BTreeMap<u64, usize>,
}

impl TrackSeries {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total distance covered by the track, in the configured unit.
    pub fn total_distance(&self) -> f64 {
        self.records
            .last()
            .map_or(0.0, |record| record.cumulative_distance)
    }

    /// Ordered (cumulative distance, elevation in meters) pairs for an
    /// elevation profile. Same length and order as `records`; elevation
    /// stays absent where the recorder omitted it.
    pub fn elevation_profile(&self) -> Vec<(f64, Option<f64>)> {
        self.records
            .iter()
            .map(|record| (record.cumulative_distance, record.elevation_meters))
            .collect()
    }

    /// Ordered (latitude, longitude) pairs for a route overlay. Same length
    /// and order as `records`.
    pub fn route(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .map(|record| (record.latitude, record.longitude))
            .collect()
    }
}
