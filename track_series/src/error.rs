/// Failures surfaced before any derived output is produced.
///
/// Input problems and configuration problems abort the whole run; there is
/// no partial output. A missing elevation is not an error and propagates
/// through the derived record as an absent value instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackError {
    #[error("track contains no points")]
    EmptyTrack,
    #[error("latitude {value}° at sample {index} is outside [-90°, 90°]")]
    LatitudeOutOfRange { index: usize, value: f64 },
    #[error("longitude {value}° at sample {index} is outside [-180°, 180°]")]
    LongitudeOutOfRange { index: usize, value: f64 },
    #[error("bucket width must be positive and finite, got {0}")]
    BucketWidthNotPositive(f64),
}
