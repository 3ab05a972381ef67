//! Workout aggregation: period summaries, trend deltas, milestones, streaks.
//!
//! Folds raw workout records into the derived records the dashboard charts
//! consume. All functions are pure folds over in-memory slices; the only
//! environmental input, "today", comes through an injectable [`Clock`] so
//! results are reproducible under test.

use crate::models::WorkoutRecord;
use crate::zones::{ZoneAnalyzer, ZoneBoundaries, ZoneDistribution};
use chrono::{Days, Duration, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Source of "today" for period anchoring
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock dates (UTC)
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Fixed date, for deterministic tests and replays
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Period length for grouped summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    Day,
    Week,
}

/// Aggregated view over one contiguous time window.
///
/// Windows with zero workouts keep all-zero numeric fields instead of
/// being omitted: consumers render fixed-width historical charts that
/// need positional continuity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Display label derived from the period start
    pub label: String,

    /// Total distance over the window in kilometers
    pub total_distance_km: Decimal,

    /// Number of workouts in the window
    pub workout_count: u32,

    /// Total workout time over the window in seconds
    pub total_duration_seconds: u64,

    /// Mean pace over workouts that report one, sec/km
    pub avg_pace_sec_per_km: Decimal,

    /// Mean heart rate over workouts that report one, bpm
    pub avg_heart_rate: Decimal,
}

impl PeriodSummary {
    fn empty(label: String) -> Self {
        PeriodSummary {
            label,
            total_distance_km: Decimal::ZERO,
            workout_count: 0,
            total_duration_seconds: 0,
            avg_pace_sec_per_km: Decimal::ZERO,
            avg_heart_rate: Decimal::ZERO,
        }
    }
}

/// Direction of a period-over-period delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
        };
        write!(f, "{}", s)
    }
}

/// Period-over-period delta with direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    pub pct_change: Decimal,
}

/// Lifetime achievement categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MilestoneKind {
    WorkoutCount,
    Distance,
    Pace,
}

/// One crossed lifetime threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub kind: MilestoneKind,
    pub threshold: Decimal,
    pub description: String,
}

/// Lifetime workout-count thresholds
pub const COUNT_MILESTONES: [u32; 3] = [10, 50, 100];

/// Lifetime distance thresholds in kilometers
pub const DISTANCE_MILESTONES_KM: [u32; 3] = [50, 100, 500];

/// Lifetime average pace thresholds in sec/km (crossed when faster)
pub const PACE_MILESTONES_SEC_PER_KM: [u32; 2] = [360, 300];

/// Aggregation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Trend dead-band in percent (default: 2). Deltas within the band
    /// report `Stable`, suppressing trend-reversal flicker on near-flat
    /// series.
    pub trend_dead_band_pct: Decimal,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        AggregationConfig {
            trend_dead_band_pct: dec!(2),
        }
    }
}

/// Workout record aggregation engine
pub struct TrainingAggregator {
    clock: Box<dyn Clock>,
    config: AggregationConfig,
}

impl Default for TrainingAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingAggregator {
    /// Aggregator anchored to the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Aggregator with an injected clock
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        TrainingAggregator {
            clock: Box::new(clock),
            config: AggregationConfig::default(),
        }
    }

    /// Aggregator with custom tuning
    pub fn with_config(clock: impl Clock + 'static, config: AggregationConfig) -> Self {
        TrainingAggregator {
            clock: Box::new(clock),
            config,
        }
    }

    /// Partition workouts into `window_count` contiguous trailing periods,
    /// oldest first.
    ///
    /// The newest period is the one containing today (weeks start Monday).
    /// A workout belongs to the period whose `[start, end)` date range
    /// contains its start date.
    pub fn group_by_period(
        &self,
        workouts: &[WorkoutRecord],
        granularity: Granularity,
        window_count: usize,
    ) -> Vec<PeriodSummary> {
        let today = self.clock.today();
        let current_start = match granularity {
            Granularity::Day => today,
            Granularity::Week => today.week(Weekday::Mon).first_day(),
        };
        let period_days = match granularity {
            Granularity::Day => 1u64,
            Granularity::Week => 7u64,
        };

        let mut summaries = Vec::with_capacity(window_count);
        for offset in (0..window_count).rev() {
            let start = current_start
                .checked_sub_days(Days::new(offset as u64 * period_days))
                .unwrap_or(current_start);
            let end = start
                .checked_add_days(Days::new(period_days))
                .unwrap_or(start);

            let in_period: Vec<&WorkoutRecord> = workouts
                .iter()
                .filter(|w| {
                    let date = w.start_date();
                    date >= start && date < end
                })
                .collect();

            summaries.push(Self::summarize(
                Self::period_label(granularity, start),
                &in_period,
            ));
        }

        tracing::debug!(
            periods = summaries.len(),
            workouts = workouts.len(),
            "grouped workouts into periods"
        );
        summaries
    }

    /// Classify each workout's average heart rate and count per zone
    pub fn zone_distribution(
        &self,
        workouts: &[WorkoutRecord],
        boundaries: &ZoneBoundaries,
    ) -> ZoneDistribution {
        ZoneAnalyzer::distribution(workouts, boundaries)
    }

    /// Period-over-period delta.
    ///
    /// `pct_change` is 0 when the previous value is not positive. The
    /// dead-band keeps near-flat series reporting `Stable`.
    pub fn trend(&self, current: Decimal, previous: Decimal) -> Trend {
        let pct_change = if previous > Decimal::ZERO {
            (current - previous) / previous * dec!(100)
        } else {
            Decimal::ZERO
        };

        let direction = if pct_change > self.config.trend_dead_band_pct {
            TrendDirection::Up
        } else if pct_change < -self.config.trend_dead_band_pct {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        };

        Trend {
            direction,
            pct_change,
        }
    }

    /// Emit one milestone per lifetime threshold crossed.
    ///
    /// Every crossed threshold is returned, not just the highest: the
    /// dashboard renders them as a badge collection rather than a single
    /// current tier.
    pub fn detect_milestones(&self, workouts: &[WorkoutRecord]) -> Vec<Milestone> {
        let count = workouts.len() as u32;
        let total_km: Decimal = workouts.iter().map(|w| w.distance_km()).sum();
        let avg_pace = Self::mean(workouts.iter().filter_map(|w| w.avg_pace_sec_per_km));

        let mut milestones = Vec::new();

        for &threshold in &COUNT_MILESTONES {
            if count >= threshold {
                milestones.push(Milestone {
                    kind: MilestoneKind::WorkoutCount,
                    threshold: Decimal::from(threshold),
                    description: format!("{} workouts completed", threshold),
                });
            }
        }

        for &threshold in &DISTANCE_MILESTONES_KM {
            if total_km >= Decimal::from(threshold) {
                milestones.push(Milestone {
                    kind: MilestoneKind::Distance,
                    threshold: Decimal::from(threshold),
                    description: format!("{} km covered", threshold),
                });
            }
        }

        if let Some(pace) = avg_pace {
            for &threshold in &PACE_MILESTONES_SEC_PER_KM {
                if pace < Decimal::from(threshold) {
                    milestones.push(Milestone {
                        kind: MilestoneKind::Pace,
                        threshold: Decimal::from(threshold),
                        description: format!(
                            "average pace under {}:{:02} min/km",
                            threshold / 60,
                            threshold % 60
                        ),
                    });
                }
            }
        }

        milestones
    }

    /// Count consecutive calendar days with at least one workout, ending
    /// at the most recent workout day. The run stops at the first gap
    /// larger than one day. Empty input yields 0.
    pub fn detect_streak(&self, workouts: &[WorkoutRecord]) -> u32 {
        let days: BTreeSet<NaiveDate> = workouts.iter().map(|w| w.start_date()).collect();

        let mut streak = 0u32;
        let mut prev: Option<NaiveDate> = None;
        for &day in days.iter().rev() {
            match prev {
                None => streak = 1,
                Some(p) if p - day == Duration::days(1) => streak += 1,
                Some(_) => break,
            }
            prev = Some(day);
        }
        streak
    }

    fn period_label(granularity: Granularity, start: NaiveDate) -> String {
        match granularity {
            Granularity::Day => start.format("%b %d").to_string(),
            Granularity::Week => format!("Week of {}", start.format("%b %d")),
        }
    }

    fn summarize(label: String, workouts: &[&WorkoutRecord]) -> PeriodSummary {
        if workouts.is_empty() {
            return PeriodSummary::empty(label);
        }

        let total_distance_km = workouts.iter().map(|w| w.distance_km()).sum();
        let total_duration_seconds = workouts.iter().map(|w| u64::from(w.duration_seconds)).sum();

        // Workouts missing pace or HR are excluded from that mean but
        // still count toward distance, duration, and count.
        let avg_pace_sec_per_km =
            Self::mean(workouts.iter().filter_map(|w| w.avg_pace_sec_per_km))
                .unwrap_or(Decimal::ZERO);
        let avg_heart_rate = Self::mean(
            workouts
                .iter()
                .filter_map(|w| w.avg_heart_rate.map(Decimal::from)),
        )
        .unwrap_or(Decimal::ZERO);

        PeriodSummary {
            label,
            total_distance_km,
            workout_count: workouts.len() as u32,
            total_duration_seconds,
            avg_pace_sec_per_km,
            avg_heart_rate,
        }
    }

    fn mean(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
        let mut sum = Decimal::ZERO;
        let mut count = 0u32;
        for value in values {
            sum += value;
            count += 1;
        }
        if count == 0 {
            None
        } else {
            Some(sum / Decimal::from(count))
        }
    }
}
