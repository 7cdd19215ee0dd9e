use crate::error::TrackError;
use crate::models::DistanceUnit;

const DEFAULT_BUCKET_WIDTH: f64 = 0.25;

/// Options for one derivation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesOptions {
    /// Signed hour offset applied to every timestamp, e.g. `-4` for a
    /// recorder that stamped UTC during EDT. Identity when absent. The
    /// value is an opaque correction factor and is not range-checked.
    pub utc_offset: Option<i32>,
    /// Unit for the distance fields of the output.
    pub unit: DistanceUnit,
    /// Width of one distance bucket, in the configured unit. Quarter-unit
    /// segmentation by default; `1.0` gives whole-unit segmentation.
    pub bucket_width: f64,
}

impl SeriesOptions {
    pub const fn new() -> Self {
        Self {
            utc_offset: None,
            unit: DistanceUnit::Miles,
            bucket_width: DEFAULT_BUCKET_WIDTH,
        }
    }

    pub const fn set_utc_offset(mut self, hours: i32) -> Self {
        self.utc_offset = Some(hours);
        self
    }

    pub const fn set_unit(mut self, unit: DistanceUnit) -> Self {
        self.unit = unit;
        self
    }

    pub const fn set_bucket_width(mut self, width: f64) -> Self {
        self.bucket_width = width;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), TrackError> {
        if !self.bucket_width.is_finite() || self.bucket_width <= 0.0 {
            return Err(TrackError::BucketWidthNotPositive(self.bucket_width));
        }

        Ok(())
    }
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self::new()
    }
}
