use chrono::{Days, NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use traincore::aggregation::FixedClock;
use traincore::{
    AnalyticsConfig, Granularity, HealthSample, ReadinessScorer, Sport, TrainingAggregator,
    TrendDirection, WorkoutRecord, Zone, ZoneCalculator,
};

/// Integration tests covering the complete dashboard data flows

fn anchor_date() -> NaiveDate {
    // A Wednesday; its week starts Monday 2024-06-17
    NaiveDate::from_ymd_opt(2024, 6, 19).unwrap()
}

fn create_workout(
    id: &str,
    date: NaiveDate,
    distance_m: rust_decimal::Decimal,
    pace: Option<rust_decimal::Decimal>,
    avg_hr: Option<u16>,
) -> WorkoutRecord {
    WorkoutRecord {
        id: id.to_string(),
        start_time: Utc.from_utc_datetime(&date.and_hms_opt(7, 0, 0).unwrap()),
        sport: Sport::Running,
        distance_meters: distance_m,
        duration_seconds: 3000,
        avg_heart_rate: avg_hr,
        avg_pace_sec_per_km: pace,
        max_heart_rate: avg_hr.map(|hr| hr + 20),
    }
}

/// Two weeks of training summarized, trended, and zone-classified the way
/// the dashboard's weekly view consumes them.
#[test]
fn test_weekly_dashboard_workflow() {
    let today = anchor_date();
    let workouts = vec![
        // Current week: 10 km + 12 km
        create_workout("cur-1", today, dec!(10000), Some(dec!(350)), Some(145)),
        create_workout(
            "cur-2",
            today.checked_sub_days(Days::new(1)).unwrap(),
            dec!(12000),
            Some(dec!(370)),
            Some(152),
        ),
        // Previous week: 8 km + 12 km
        create_workout(
            "prev-1",
            NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
            dec!(8000),
            Some(dec!(380)),
            Some(138),
        ),
        create_workout(
            "prev-2",
            NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
            dec!(12000),
            None,
            None,
        ),
    ];

    let aggregator = TrainingAggregator::with_clock(FixedClock(today));
    let summaries = aggregator.group_by_period(&workouts, Granularity::Week, 2);

    assert_eq!(summaries.len(), 2);
    let previous = &summaries[0];
    let current = &summaries[1];

    assert_eq!(previous.total_distance_km, dec!(20));
    assert_eq!(previous.workout_count, 2);
    assert_eq!(previous.avg_pace_sec_per_km, dec!(380));

    assert_eq!(current.total_distance_km, dec!(22));
    assert_eq!(current.avg_pace_sec_per_km, dec!(360));

    // Distance went 20 -> 22 km: +10%, over the dead-band
    let trend = aggregator.trend(current.total_distance_km, previous.total_distance_km);
    assert_eq!(trend.direction, TrendDirection::Up);
    assert_eq!(trend.pct_change, dec!(10));

    // Zone distribution over the same record set
    let boundaries = ZoneCalculator::boundaries(190, 50);
    let distribution = aggregator.zone_distribution(&workouts, &boundaries);
    assert_eq!(distribution.total_workouts, 4);
    assert_eq!(distribution.unknown_count, 1);
    assert_eq!(
        distribution.zone_counts.iter().sum::<u32>() + distribution.unknown_count,
        distribution.total_workouts
    );
}

/// Milestones and streaks over a growing training history behave as a
/// badge collection: once crossed, always reported.
#[test]
fn test_milestones_and_streak_workflow() {
    let today = anchor_date();
    let aggregator = TrainingAggregator::with_clock(FixedClock(today));

    let mut workouts: Vec<WorkoutRecord> = (0..11)
        .map(|i| {
            create_workout(
                &format!("w{}", i),
                today.checked_sub_days(Days::new(i)).unwrap(),
                dec!(5000),
                Some(dec!(340)),
                Some(150),
            )
        })
        .collect();

    let milestones = aggregator.detect_milestones(&workouts);
    let descriptions: Vec<&str> = milestones.iter().map(|m| m.description.as_str()).collect();
    assert!(descriptions.contains(&"10 workouts completed"));
    assert!(descriptions.contains(&"50 km covered"));
    assert!(descriptions.contains(&"average pace under 6:00 min/km"));

    assert_eq!(aggregator.detect_streak(&workouts), 11);

    // More history never removes a crossed milestone
    workouts.extend((11..60).map(|i| {
        create_workout(
            &format!("w{}", i),
            today.checked_sub_days(Days::new(i + 5)).unwrap(),
            dec!(5000),
            Some(dec!(340)),
            Some(150),
        )
    }));
    let grown = aggregator.detect_milestones(&workouts);
    for milestone in &milestones {
        assert!(grown.contains(milestone));
    }
}

/// Readiness scoring end to end, including the documented worked example
/// and graceful degradation on sparse days.
#[test]
fn test_readiness_dashboard_workflow() {
    let scorer = ReadinessScorer::new();

    let full_day = HealthSample {
        date: anchor_date(),
        body_battery: Some(80),
        sleep_score: Some(90),
        sleep_duration_minutes: None,
        hrv_ms: Some(50.0),
        hrv_baseline_ms: Some(50.0),
        stress_level: Some(20),
    };
    let result = scorer.score(&full_day);
    assert_eq!(result.score, 79);
    assert_eq!(result.recommendation, "ready for hard training");
    assert_eq!(result.factors.len(), 4);

    // A watch-off day: only sleep duration synced
    let sparse_day = HealthSample {
        sleep_duration_minutes: Some(450),
        ..HealthSample::blank(anchor_date())
    };
    let result = scorer.score(&sparse_day);
    assert_eq!(result.factors.len(), 1);
    assert_eq!(result.score, 90); // 7.5h * 12

    // Nothing synced at all
    let result = scorer.score(&HealthSample::blank(anchor_date()));
    assert_eq!(result.score, 0);
    assert_eq!(result.recommendation, "prioritize recovery");
}

/// The configuration file round-trips and drives the scorer and
/// aggregator it configures.
#[test]
fn test_config_driven_components() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = AnalyticsConfig::default();
    config.aggregation.trend_dead_band_pct = dec!(12);
    config.save(&path).unwrap();

    let loaded = AnalyticsConfig::load(&path).unwrap();
    let aggregator =
        TrainingAggregator::with_config(FixedClock(anchor_date()), loaded.aggregation);

    // +10% falls inside the widened dead-band
    let trend = aggregator.trend(dec!(110), dec!(100));
    assert_eq!(trend.direction, TrendDirection::Stable);

    let scorer = ReadinessScorer::with_config(loaded.readiness);
    let mut sample = HealthSample::blank(anchor_date());
    sample.body_battery = Some(64);
    assert_eq!(scorer.score(&sample).score, 64);
}

/// Derived records cross the rendering boundary as plain serializable data.
#[test]
fn test_output_records_serialize() {
    let today = anchor_date();
    let aggregator = TrainingAggregator::with_clock(FixedClock(today));
    let workouts = vec![create_workout(
        "w1",
        today,
        dec!(10000),
        Some(dec!(355)),
        Some(160),
    )];

    let summaries = aggregator.group_by_period(&workouts, Granularity::Week, 4);
    let json = serde_json::to_string(&summaries).unwrap();
    let parsed: Vec<traincore::PeriodSummary> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, summaries);

    let result = ReadinessScorer::new().score(&HealthSample::blank(today));
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"recommendation\""));

    let boundaries = ZoneCalculator::boundaries(185, 55);
    let json = serde_json::to_string(&boundaries).unwrap();
    let parsed: traincore::ZoneBoundaries = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, boundaries);

    let trend = aggregator.trend(dec!(103), dec!(100));
    let json = serde_json::to_string(&trend).unwrap();
    assert!(json.contains("\"up\""));
}

/// Every sampled heart rate lands in a defined zone; the rendering path
/// never sees a crash from a missing sample.
#[test]
fn test_classification_is_total_across_inputs() {
    let boundaries = ZoneCalculator::boundaries(190, 50);

    for hr in [None, Some(0), Some(30), Some(120), Some(190), Some(240)] {
        let zone = ZoneCalculator::classify(hr, &boundaries);
        match hr {
            None | Some(0) => assert_eq!(zone, Zone::Unknown),
            _ => assert_ne!(zone, Zone::Unknown),
        }
    }

    // Degenerate athlete data degrades to Unknown, not a panic
    let degenerate = ZoneCalculator::boundaries(60, 80);
    assert_eq!(ZoneCalculator::classify(Some(120), &degenerate), Zone::Unknown);
}
