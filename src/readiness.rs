//! Daily readiness scoring from physiological signals.
//!
//! Combines a day's health signals (body battery, sleep, HRV, stress) into
//! a single 0-100 readiness score with a per-factor breakdown and a
//! qualitative training recommendation.
//!
//! Each factor is optional and only present factors participate: the
//! nominal weights are renormalized over the present subset via explicit
//! `(sub_score * weight, weight)` accumulation. Treating a missing factor
//! as zero would falsely tank the score on days with partial data.

use crate::models::HealthSample;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contributing factors, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessFactor {
    BodyBattery,
    Sleep,
    Hrv,
    Stress,
}

impl ReadinessFactor {
    /// All factors in the fixed presentation order
    pub const ALL: [ReadinessFactor; 4] = [
        ReadinessFactor::BodyBattery,
        ReadinessFactor::Sleep,
        ReadinessFactor::Hrv,
        ReadinessFactor::Stress,
    ];

    /// Display label used by the dashboard breakdown
    pub fn label(&self) -> &'static str {
        match self {
            ReadinessFactor::BodyBattery => "Body Battery",
            ReadinessFactor::Sleep => "Sleep",
            ReadinessFactor::Hrv => "HRV",
            ReadinessFactor::Stress => "Stress",
        }
    }
}

impl fmt::Display for ReadinessFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One present factor's rounded sub-score (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: ReadinessFactor,
    pub score: u8,
}

/// Computed readiness for a single day.
///
/// Recomputed fresh per request from one `HealthSample`; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessResult {
    /// Composite readiness (0-100); 0 when no factor is present
    pub score: u8,

    /// Present factors with rounded sub-scores, in presentation order
    pub factors: Vec<FactorScore>,

    /// Qualitative recommendation for the day
    pub recommendation: String,
}

/// Recommendation bands, highest threshold first
pub const RECOMMENDATION_BANDS: [(u8, &str); 3] = [
    (75, "ready for hard training"),
    (60, "moderate training, listen to your body"),
    (0, "prioritize recovery"),
];

/// Readiness scoring weights and sentinels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessConfig {
    /// Nominal body battery weight (default: 0.40)
    pub body_battery_weight: f64,

    /// Nominal sleep weight (default: 0.35)
    pub sleep_weight: f64,

    /// Nominal HRV weight (default: 0.15)
    pub hrv_weight: f64,

    /// Nominal stress weight (default: 0.10)
    pub stress_weight: f64,

    /// Body battery readings at or below this are a sensor-invalid
    /// sentinel and excluded entirely (default: 5)
    pub body_battery_invalid_max: u8,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        ReadinessConfig {
            body_battery_weight: 0.40,
            sleep_weight: 0.35,
            hrv_weight: 0.15,
            stress_weight: 0.10,
            body_battery_invalid_max: 5,
        }
    }
}

/// Composite readiness scorer
pub struct ReadinessScorer {
    config: ReadinessConfig,
}

impl Default for ReadinessScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessScorer {
    /// Scorer with the standard weights
    pub fn new() -> Self {
        ReadinessScorer {
            config: ReadinessConfig::default(),
        }
    }

    /// Scorer with custom weights
    pub fn with_config(config: ReadinessConfig) -> Self {
        ReadinessScorer { config }
    }

    /// Score one day's sample.
    ///
    /// Never fails: all-absent input yields score 0 with an empty factor
    /// list, not an error.
    pub fn score(&self, sample: &HealthSample) -> ReadinessResult {
        let mut factors = Vec::new();
        let mut weighted_sum = 0.0;
        let mut weight_sum = 0.0;

        for factor in ReadinessFactor::ALL {
            if let Some(sub_score) = self.sub_score(factor, sample) {
                let weight = self.weight(factor);
                weighted_sum += sub_score * weight;
                weight_sum += weight;
                factors.push(FactorScore {
                    factor,
                    score: sub_score.round() as u8,
                });
            }
        }

        let score = if weight_sum > 0.0 {
            (weighted_sum / weight_sum).round() as u8
        } else {
            0
        };

        tracing::debug!(
            date = %sample.date,
            score,
            present_factors = factors.len(),
            "readiness scored"
        );

        ReadinessResult {
            score,
            factors,
            recommendation: Self::recommendation(score).to_string(),
        }
    }

    /// Recommendation text for a readiness score
    pub fn recommendation(score: u8) -> &'static str {
        RECOMMENDATION_BANDS
            .iter()
            .find(|(min_score, _)| score >= *min_score)
            .map(|(_, text)| *text)
            .unwrap_or(RECOMMENDATION_BANDS[RECOMMENDATION_BANDS.len() - 1].1)
    }

    fn weight(&self, factor: ReadinessFactor) -> f64 {
        match factor {
            ReadinessFactor::BodyBattery => self.config.body_battery_weight,
            ReadinessFactor::Sleep => self.config.sleep_weight,
            ReadinessFactor::Hrv => self.config.hrv_weight,
            ReadinessFactor::Stress => self.config.stress_weight,
        }
    }

    /// Sub-score for one factor, `None` when the factor is absent
    fn sub_score(&self, factor: ReadinessFactor, sample: &HealthSample) -> Option<f64> {
        match factor {
            ReadinessFactor::BodyBattery => self.body_battery_score(sample),
            ReadinessFactor::Sleep => Self::sleep_score(sample),
            ReadinessFactor::Hrv => Self::hrv_score(sample),
            ReadinessFactor::Stress => Self::stress_score(sample),
        }
    }

    fn body_battery_score(&self, sample: &HealthSample) -> Option<f64> {
        sample.body_battery.and_then(|value| {
            if value <= self.config.body_battery_invalid_max {
                None
            } else {
                Some(f64::from(value))
            }
        })
    }

    /// Prefer the device-computed score; fall back to duration in hours:
    /// `h >= 7 -> min(100, h * 12)`, else `h * 10`.
    fn sleep_score(sample: &HealthSample) -> Option<f64> {
        if let Some(score) = sample.sleep_score {
            return Some(f64::from(score));
        }
        sample.sleep_duration_minutes.map(|minutes| {
            let hours = f64::from(minutes) / 60.0;
            if hours >= 7.0 {
                (hours * 12.0).min(100.0)
            } else {
                hours * 10.0
            }
        })
    }

    /// Ratio-to-baseline when a usable baseline exists, absolute bands
    /// otherwise. A non-positive baseline counts as no baseline.
    fn hrv_score(sample: &HealthSample) -> Option<f64> {
        let hrv = sample.hrv_ms?;
        match sample.hrv_baseline_ms.filter(|b| *b > 0.0) {
            Some(baseline) => {
                let ratio = hrv / baseline;
                Some((50.0 + (ratio - 1.0) * 50.0).clamp(0.0, 100.0))
            }
            None => Some(if hrv < 20.0 {
                30.0
            } else if hrv < 40.0 {
                60.0
            } else if hrv < 60.0 {
                80.0
            } else {
                95.0
            }),
        }
    }

    fn stress_score(sample: &HealthSample) -> Option<f64> {
        sample
            .stress_level
            .map(|stress| (100.0 - f64::from(stress)).clamp(0.0, 100.0))
    }
}
