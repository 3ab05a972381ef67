//! Heart-rate effort zones via the Karvonen (heart-rate reserve) method.
//!
//! Zone boundaries are derived from an athlete's maximum and resting heart
//! rate: `hrr = max_hr - resting_hr`, and each of the five zones covers a
//! fixed band of HRR intensity. Classification feeds directly into chart
//! rendering, so every function here is total: absent or degenerate input
//! yields a defined fallback, never a panic.

use crate::models::WorkoutRecord;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Effort zone for a heart-rate sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Recovery (50-60% HRR)
    Z1,
    /// Aerobic base (60-70% HRR)
    Z2,
    /// Tempo (70-80% HRR)
    Z3,
    /// Threshold (80-90% HRR)
    Z4,
    /// VO2 max (90-100% HRR)
    Z5,
    /// No usable heart-rate sample
    Unknown,
}

impl Zone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Z1 => "Z1",
            Zone::Z2 => "Z2",
            Zone::Z3 => "Z3",
            Zone::Z4 => "Z4",
            Zone::Z5 => "Z5",
            Zone::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// HRR intensity fractions for the five zones, lowest first.
///
/// Kept as a data table so the literal band edges stay independently
/// testable.
pub const ZONE_FRACTIONS: [(Zone, Decimal, Decimal); 5] = [
    (Zone::Z1, dec!(0.50), dec!(0.60)),
    (Zone::Z2, dec!(0.60), dec!(0.70)),
    (Zone::Z3, dec!(0.70), dec!(0.80)),
    (Zone::Z4, dec!(0.80), dec!(0.90)),
    (Zone::Z5, dec!(0.90), dec!(1.00)),
];

/// One zone's band, both as an HRR fraction and in absolute bpm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneBoundary {
    pub zone: Zone,
    pub fraction_min: Decimal,
    pub fraction_max: Decimal,
    pub bpm_min: u16,
    pub bpm_max: u16,
}

/// Five ordered, contiguous zone bands derived from `(max_hr, resting_hr)`.
///
/// Invariant: `zones[i].bpm_max == zones[i + 1].bpm_min`. When
/// `max_hr <= resting_hr` the reserve collapses to zero and every band is
/// zero-width at `resting_hr`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneBoundaries {
    pub max_hr: u16,
    pub resting_hr: u16,
    pub zones: [ZoneBoundary; 5],
}

impl ZoneBoundaries {
    /// Heart-rate reserve in bpm; zero for degenerate input
    pub fn hrr(&self) -> u16 {
        self.max_hr.saturating_sub(self.resting_hr)
    }
}

/// Zone boundary derivation and sample classification
pub struct ZoneCalculator;

impl ZoneCalculator {
    /// Derive the five zone bands from max and resting heart rate.
    ///
    /// `bpm = round(fraction * hrr + resting_hr)` per band edge. Inputs
    /// violating `max_hr > resting_hr` produce zero-width bands rather
    /// than an error.
    pub fn boundaries(max_hr: u16, resting_hr: u16) -> ZoneBoundaries {
        let hrr = max_hr.saturating_sub(resting_hr);
        if hrr == 0 {
            tracing::debug!(max_hr, resting_hr, "degenerate heart-rate reserve");
        }

        let hrr_dec = Decimal::from(hrr);
        let resting_dec = Decimal::from(resting_hr);

        let zones = ZONE_FRACTIONS.map(|(zone, fraction_min, fraction_max)| ZoneBoundary {
            zone,
            fraction_min,
            fraction_max,
            bpm_min: Self::to_bpm(fraction_min * hrr_dec + resting_dec, resting_hr),
            bpm_max: Self::to_bpm(fraction_max * hrr_dec + resting_dec, resting_hr),
        });

        ZoneBoundaries {
            max_hr,
            resting_hr,
            zones,
        }
    }

    /// Classify a heart-rate sample into a zone.
    ///
    /// Absent or zero samples classify as `Unknown`, as do samples against
    /// degenerate (zero-width) boundaries. Intensities at or above 1.00 map
    /// to `Z5`; band membership is `[fraction_min, fraction_max)`, so a
    /// sample exactly on a shared edge lands in the upper zone. Samples
    /// below the Z1 floor also report `Z1`; aggregate displays treat
    /// everything under 50% HRR as the lowest defined effort.
    pub fn classify(hr: Option<u16>, boundaries: &ZoneBoundaries) -> Zone {
        let hr = match hr {
            Some(hr) if hr > 0 => hr,
            _ => return Zone::Unknown,
        };

        let hrr = boundaries.hrr();
        if hrr == 0 {
            return Zone::Unknown;
        }

        let intensity = (Decimal::from(hr as i32) - Decimal::from(boundaries.resting_hr as i32))
            / Decimal::from(hrr);

        if intensity >= dec!(1.00) {
            return Zone::Z5;
        }
        for boundary in &boundaries.zones {
            if intensity >= boundary.fraction_min && intensity < boundary.fraction_max {
                return boundary.zone;
            }
        }

        // Below the Z1 floor
        Zone::Z1
    }

    /// Classify a workout by its average heart rate
    pub fn classify_workout(workout: &WorkoutRecord, boundaries: &ZoneBoundaries) -> Zone {
        Self::classify(workout.avg_heart_rate, boundaries)
    }

    fn to_bpm(value: Decimal, fallback: u16) -> u16 {
        value
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u16()
            .unwrap_or(fallback)
    }
}

/// Per-zone workout counts over a record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDistribution {
    /// Workout counts for Z1..Z5
    pub zone_counts: [u32; 5],

    /// Workouts with no usable heart-rate sample
    pub unknown_count: u32,

    /// Total workouts classified
    pub total_workouts: u32,
}

impl ZoneDistribution {
    /// Share of classified (non-unknown) workouts in the given zone
    pub fn percent(&self, zone: Zone) -> Decimal {
        let classified: u32 = self.zone_counts.iter().sum();
        if classified == 0 {
            return Decimal::ZERO;
        }
        let count = match zone {
            Zone::Z1 => self.zone_counts[0],
            Zone::Z2 => self.zone_counts[1],
            Zone::Z3 => self.zone_counts[2],
            Zone::Z4 => self.zone_counts[3],
            Zone::Z5 => self.zone_counts[4],
            Zone::Unknown => return Decimal::ZERO,
        };
        Decimal::from(count) / Decimal::from(classified) * dec!(100)
    }
}

/// Zone distribution analysis over workout sets
pub struct ZoneAnalyzer;

impl ZoneAnalyzer {
    /// Count workouts per zone by classifying each record's average heart
    /// rate. Records without a usable sample count toward `unknown_count`.
    pub fn distribution(workouts: &[WorkoutRecord], boundaries: &ZoneBoundaries) -> ZoneDistribution {
        let mut zone_counts = [0u32; 5];
        let mut unknown_count = 0u32;

        for workout in workouts {
            match ZoneCalculator::classify_workout(workout, boundaries) {
                Zone::Z1 => zone_counts[0] += 1,
                Zone::Z2 => zone_counts[1] += 1,
                Zone::Z3 => zone_counts[2] += 1,
                Zone::Z4 => zone_counts[3] += 1,
                Zone::Z5 => zone_counts[4] += 1,
                Zone::Unknown => unknown_count += 1,
            }
        }

        ZoneDistribution {
            zone_counts,
            unknown_count,
            total_workouts: workouts.len() as u32,
        }
    }
}
