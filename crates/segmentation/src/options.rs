use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum OptionsError {
    #[error("time_gap_hours must be positive, got {0}")]
    NonPositiveTimeGap(f64),
    #[error("distance_gap_km must be positive, got {0}")]
    NonPositiveDistanceGap(f64),
    #[error("min_event_size must be at least 1, got {0}")]
    ZeroMinEventSize(usize),
}

/// The tunables controlling event segmentation.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct SegmentOptions {
    /// Max elapsed time between consecutive same-event photos, in hours.
    pub time_gap_hours: f64,
    /// Max great-circle distance between consecutive same-event photos, in km.
    pub distance_gap_km: f64,
    /// Minimum member count for a run to be emitted as an event.
    pub min_event_size: usize,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            time_gap_hours: 6.0,
            distance_gap_km: 80.0,
            min_event_size: 3,
        }
    }
}

impl SegmentOptions {
    /// Rejects invalid thresholds up front so the pass itself never fails.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.time_gap_hours.is_finite() || self.time_gap_hours <= 0.0 {
            return Err(OptionsError::NonPositiveTimeGap(self.time_gap_hours));
        }
        if !self.distance_gap_km.is_finite() || self.distance_gap_km <= 0.0 {
            return Err(OptionsError::NonPositiveDistanceGap(self.distance_gap_km));
        }
        if self.min_event_size == 0 {
            return Err(OptionsError::ZeroMinEventSize(self.min_event_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SegmentOptions::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_time_gap() {
        let options = SegmentOptions {
            time_gap_hours: 0.0,
            ..SegmentOptions::default()
        };
        assert_eq!(options.validate(), Err(OptionsError::NonPositiveTimeGap(0.0)));
    }

    #[test]
    fn rejects_nan_time_gap() {
        let options = SegmentOptions {
            time_gap_hours: f64::NAN,
            ..SegmentOptions::default()
        };
        assert!(matches!(options.validate(), Err(OptionsError::NonPositiveTimeGap(_))));
    }

    #[test]
    fn rejects_negative_distance_gap() {
        let options = SegmentOptions {
            distance_gap_km: -1.0,
            ..SegmentOptions::default()
        };
        assert_eq!(
            options.validate(),
            Err(OptionsError::NonPositiveDistanceGap(-1.0))
        );
    }

    #[test]
    fn rejects_zero_min_event_size() {
        let options = SegmentOptions {
            min_event_size: 0,
            ..SegmentOptions::default()
        };
        assert_eq!(options.validate(), Err(OptionsError::ZeroMinEventSize(0)));
    }
}
