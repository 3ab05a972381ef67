// Training-analytics core for fitness dashboards.
//
// Three independent, pure-computation components: readiness scoring,
// heart-rate zone classification, and workout aggregation. Inputs are
// plain data records supplied by an external data-fetching collaborator;
// outputs are plain computed records for rendering collaborators.

pub mod aggregation;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod readiness;
pub mod zones;

// Re-export commonly used types for convenience
pub use models::*;
pub use aggregation::{
    AggregationConfig, Clock, FixedClock, Granularity, Milestone, MilestoneKind, PeriodSummary,
    SystemClock, TrainingAggregator, Trend, TrendDirection,
};
pub use config::AnalyticsConfig;
pub use error::{CoreError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use readiness::{
    FactorScore, ReadinessConfig, ReadinessFactor, ReadinessResult, ReadinessScorer,
};
pub use zones::{Zone, ZoneAnalyzer, ZoneBoundaries, ZoneCalculator, ZoneDistribution};
