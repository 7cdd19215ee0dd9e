//! Distance between consecutive track samples.
//!
//! GPS coordinates are angular, so legs are measured on the WGS84
//! ellipsoid with a geodesic solver rather than on a flat plane. A planar
//! approximation drifts badly at higher latitudes and around direction
//! changes. The solver works in meters; accumulation stays in meters at
//! full precision and only the output records carry a display unit.

use geo::{GeodesicDistance, point};

use crate::models::{Distance, TrackPoint};

const WINDOW_SIZE: usize = 2;

/// Incremental and running distance for one sample, in canonical meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMark {
    /// Distance from the previous sample. Zero for the first sample.
    pub incremental: Distance,
    /// Running total from the start of the track.
    pub cumulative: Distance,
}

/// Leg distance between each sample and its predecessor.
///
/// Element 0 is exactly zero: the first sample has no predecessor. An
/// empty or single-sample track yields an empty or single-zero sequence.
/// Consecutive identical coordinates yield a zero leg, never NaN.
pub fn leg_distances(points: &[TrackPoint]) -> Vec<Distance> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut legs = Vec::with_capacity(points.len());
    legs.push(Distance::ZERO);

    legs.extend(points.windows(WINDOW_SIZE).map(|pair| {
        // x is longitude, y is latitude. Swapping them ruins the distances.
        let from = point!(x: pair[0].longitude, y: pair[0].latitude);
        let to = point!(x: pair[1].longitude, y: pair[1].latitude);

        Distance::from_meters(from.geodesic_distance(&to))
    }));

    legs
}

/// Leg distances joined with their running sum, one mark per sample.
///
/// The sum is accumulated in meters end to end; converting or rounding
/// inside the loop would compound over thousands of samples.
pub fn accumulate(points: &[TrackPoint]) -> Vec<DistanceMark> {
    let mut total = 0.0;

    leg_distances(points)
        .into_iter()
        .map(|incremental| {
            total += incremental.as_meters();

            DistanceMark {
                incremental,
                cumulative: Distance::from_meters(total),
            }
        })
        .collect()
}
