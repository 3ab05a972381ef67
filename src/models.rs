use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sport types reported by the workout data service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    Running,
    Cycling,
    Swimming,
    Strength,
    Other,
}

/// One calendar day's physiological snapshot.
///
/// Every numeric field is independently optional: the upstream service
/// reports whatever the athlete's devices happened to record that day.
/// Absence is `None`, never a sentinel value, with one documented
/// exception: body battery readings at or below 5 are a sensor-invalid
/// sentinel and are discarded by the readiness scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSample {
    /// Calendar day the sample describes
    pub date: NaiveDate,

    /// Body battery level (0-100)
    pub body_battery: Option<u8>,

    /// Device-computed sleep score (0-100)
    pub sleep_score: Option<u8>,

    /// Total sleep duration in minutes, for devices that report no score
    pub sleep_duration_minutes: Option<u16>,

    /// Overnight HRV (RMSSD) in milliseconds
    pub hrv_ms: Option<f64>,

    /// Personal HRV baseline in milliseconds (rolling average)
    pub hrv_baseline_ms: Option<f64>,

    /// Stress level (0-100, higher is more stressed)
    pub stress_level: Option<u8>,
}

impl HealthSample {
    /// Sample for a day with no recorded signals
    pub fn blank(date: NaiveDate) -> Self {
        HealthSample {
            date,
            body_battery: None,
            sleep_score: None,
            sleep_duration_minutes: None,
            hrv_ms: None,
            hrv_baseline_ms: None,
            stress_level: None,
        }
    }
}

/// One completed workout session as delivered by the data service.
///
/// Records arrive in no particular order; consumers establish ordering by
/// `start_time` themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Opaque identifier assigned by the data service
    pub id: String,

    /// Session start timestamp
    pub start_time: DateTime<Utc>,

    /// Sport/activity type
    pub sport: Sport,

    /// Distance covered in meters
    pub distance_meters: Decimal,

    /// Session duration in seconds
    pub duration_seconds: u32,

    /// Average heart rate in bpm
    pub avg_heart_rate: Option<u16>,

    /// Average pace in seconds per kilometer
    pub avg_pace_sec_per_km: Option<Decimal>,

    /// Maximum heart rate reached in bpm
    pub max_heart_rate: Option<u16>,
}

impl WorkoutRecord {
    /// Calendar day the session started on (UTC)
    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    /// Distance in kilometers
    pub fn distance_km(&self) -> Decimal {
        self.distance_meters / Decimal::from(1000)
    }
}
