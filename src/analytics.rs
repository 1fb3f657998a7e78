//! Windowed progress analytics
//!
//! Derives volume trends, weekly frequency, muscle-group distribution, and
//! record progression from an athlete's workout history. The aggregation
//! core is a pure function over fetched rows; `ProgressAnalyzer` wraps it
//! with the storage reads.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::debug;

use crate::database::{Database, DatabaseError};
use crate::metrics::set_volume;
use crate::models::{Exercise, MuscleGroup, PersonalRecord, RecordKind, Workout};

/// Analysis window when the caller does not specify one
pub const DEFAULT_WINDOW_DAYS: u32 = 90;

/// Muscle-group distribution is truncated to this many entries
pub const TOP_GROUP_LIMIT: usize = 8;

/// Analytics errors
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Unknown athlete: {0}")]
    UnknownAthlete(String),
    #[error("Analysis window must be at least one day, got {0}")]
    InvalidWindow(u32),
    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),
}

/// One point in the per-workout volume trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub date: NaiveDate,

    /// Sum of set volumes over the workout's qualifying entries; 0 when the
    /// workout had none
    pub total_volume: Decimal,

    pub label: Option<String>,
}

/// Workout count for one Sunday-aligned calendar week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyFrequency {
    pub week_start: NaiveDate,
    pub workout_count: u32,
}

/// Summed volume for one muscle group across the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleGroupVolume {
    pub group: MuscleGroup,
    pub volume: Decimal,
}

/// One max-load record achievement in the progression series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPoint {
    pub date: NaiveDate,
    pub load_kg: Decimal,
}

/// Headline totals for the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total_workouts: u32,
    pub total_sets: u32,
    pub total_volume: Decimal,

    /// Mean over workouts that report a duration; 0 when none do
    pub avg_duration_minutes: Decimal,

    pub avg_workouts_per_week: Decimal,
}

/// Structured analytics report for one athlete and window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub athlete_id: String,
    pub window_days: u32,
    pub summary: ProgressSummary,
    pub volume_progression: Vec<VolumePoint>,

    /// Weeks with zero workouts are omitted, not zero-filled
    pub frequency: Vec<WeeklyFrequency>,

    pub muscle_group_distribution: Vec<MuscleGroupVolume>,

    /// Per-exercise max-load series, keyed by exercise name
    pub record_progression: BTreeMap<String, Vec<RecordPoint>>,
}

/// Computes windowed progress reports
pub struct ProgressAnalyzer;

impl ProgressAnalyzer {
    /// Build the report for `athlete_id` over the trailing window
    /// (`DEFAULT_WINDOW_DAYS` when unspecified).
    ///
    /// An empty window is not an error: every series degrades to an empty
    /// list and the summary counts to zero.
    pub fn analyze(
        db: &Database,
        athlete_id: &str,
        window_days: Option<u32>,
    ) -> Result<ProgressReport, AnalyticsError> {
        let window_days = window_days.unwrap_or(DEFAULT_WINDOW_DAYS);
        if window_days == 0 {
            return Err(AnalyticsError::InvalidWindow(window_days));
        }
        if db.get_athlete(athlete_id)?.is_none() {
            return Err(AnalyticsError::UnknownAthlete(athlete_id.to_string()));
        }

        let window_start = Utc::now() - Duration::days(window_days as i64);
        let workouts = db.workouts_since(athlete_id, window_start)?;
        let exercises = db.list_exercises()?;
        let records = db.records_for_athlete(athlete_id)?;

        debug!(
            athlete_id,
            window_days,
            workouts = workouts.len(),
            "Building progress report"
        );

        Ok(build_report(
            athlete_id,
            &workouts,
            &exercises,
            &records,
            window_days,
            window_start,
        ))
    }
}

/// Sunday on/before the date: the frequency series' week key.
///
/// Weekly goals use Monday-aligned weeks (`habits::week_bounds`); the
/// divergence is inherited behavior, kept on purpose.
fn sunday_week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Pure aggregation over already-fetched rows
pub fn build_report(
    athlete_id: &str,
    workouts: &[Workout],
    exercises: &[Exercise],
    records: &[PersonalRecord],
    window_days: u32,
    window_start: DateTime<Utc>,
) -> ProgressReport {
    let groups_by_exercise: HashMap<&str, &[MuscleGroup]> = exercises
        .iter()
        .map(|e| (e.id.as_str(), e.muscle_groups.as_slice()))
        .collect();
    let names_by_exercise: HashMap<&str, &str> = exercises
        .iter()
        .map(|e| (e.id.as_str(), e.name.as_str()))
        .collect();

    let mut volume_progression = Vec::with_capacity(workouts.len());
    let mut weekly_counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    let mut group_volumes: BTreeMap<MuscleGroup, Decimal> = BTreeMap::new();
    let mut total_volume = Decimal::ZERO;
    let mut total_sets: u32 = 0;
    let mut duration_seconds_total: u64 = 0;
    let mut workouts_with_duration: u32 = 0;

    for workout in workouts {
        let date = workout.completed_at.date_naive();
        let mut workout_volume = Decimal::ZERO;

        for entry in &workout.entries {
            total_sets += 1;
            if let Some((reps, load_kg)) = entry.qualifying() {
                let volume = set_volume(reps, load_kg);
                workout_volume += volume;

                // An entry contributes to every group its exercise targets
                if let Some(groups) = groups_by_exercise.get(entry.exercise_id.as_str()) {
                    for group in *groups {
                        *group_volumes.entry(*group).or_insert(Decimal::ZERO) += volume;
                    }
                }
            }
        }

        volume_progression.push(VolumePoint {
            date,
            total_volume: workout_volume,
            label: workout.label.clone(),
        });
        total_volume += workout_volume;
        *weekly_counts.entry(sunday_week_start(date)).or_insert(0) += 1;

        if let Some(seconds) = workout.duration_seconds {
            duration_seconds_total += seconds as u64;
            workouts_with_duration += 1;
        }
    }

    let frequency = weekly_counts
        .into_iter()
        .map(|(week_start, workout_count)| WeeklyFrequency {
            week_start,
            workout_count,
        })
        .collect();

    // Descending by volume; the stable sort keeps the BTreeMap's bucket
    // order for ties at the cutoff
    let mut muscle_group_distribution: Vec<MuscleGroupVolume> = group_volumes
        .into_iter()
        .map(|(group, volume)| MuscleGroupVolume { group, volume })
        .collect();
    muscle_group_distribution.sort_by(|a, b| b.volume.cmp(&a.volume));
    muscle_group_distribution.truncate(TOP_GROUP_LIMIT);

    let mut record_progression: BTreeMap<String, Vec<RecordPoint>> = BTreeMap::new();
    for record in records {
        if record.kind != RecordKind::MaxLoad || record.achieved_at < window_start {
            continue;
        }
        let name = names_by_exercise
            .get(record.exercise_id.as_str())
            .copied()
            .unwrap_or(record.exercise_id.as_str());
        record_progression
            .entry(name.to_string())
            .or_default()
            .push(RecordPoint {
                date: record.achieved_at.date_naive(),
                load_kg: record.value,
            });
    }
    for points in record_progression.values_mut() {
        points.sort_by_key(|p| p.date);
    }

    let total_workouts = workouts.len() as u32;

    // Denominator floored to 1: no duration-reporting workouts yields a
    // safe average of 0 rather than a division failure
    let duration_denominator = workouts_with_duration.max(1);
    let avg_duration_minutes = (Decimal::from(duration_seconds_total)
        / Decimal::from(60)
        / Decimal::from(duration_denominator))
    .round_dp(1);

    let avg_workouts_per_week = (Decimal::from(total_workouts)
        / (Decimal::from(window_days) / Decimal::from(7)))
    .round_dp(2);

    ProgressReport {
        athlete_id: athlete_id.to_string(),
        window_days,
        summary: ProgressSummary {
            total_workouts,
            total_sets,
            total_volume,
            avg_duration_minutes,
            avg_workouts_per_week,
        },
        volume_progression,
        frequency,
        muscle_group_distribution,
        record_progression,
    }
}
