use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Muscle groups an exercise can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Quads,
    Hamstrings,
    Glutes,
    Calves,
    Core,
    FullBody,
}

impl MuscleGroup {
    /// Canonical string used for storage and CLI input
    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Biceps => "biceps",
            MuscleGroup::Triceps => "triceps",
            MuscleGroup::Quads => "quads",
            MuscleGroup::Hamstrings => "hamstrings",
            MuscleGroup::Glutes => "glutes",
            MuscleGroup::Calves => "calves",
            MuscleGroup::Core => "core",
            MuscleGroup::FullBody => "full-body",
        }
    }
}

impl std::str::FromStr for MuscleGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chest" => Ok(MuscleGroup::Chest),
            "back" => Ok(MuscleGroup::Back),
            "shoulders" | "shoulder" | "delts" => Ok(MuscleGroup::Shoulders),
            "biceps" => Ok(MuscleGroup::Biceps),
            "triceps" => Ok(MuscleGroup::Triceps),
            "quads" | "quadriceps" => Ok(MuscleGroup::Quads),
            "hamstrings" | "hams" => Ok(MuscleGroup::Hamstrings),
            "glutes" => Ok(MuscleGroup::Glutes),
            "calves" => Ok(MuscleGroup::Calves),
            "core" | "abs" => Ok(MuscleGroup::Core),
            "full-body" | "fullbody" | "full_body" => Ok(MuscleGroup::FullBody),
            _ => Err(format!("Unknown muscle group: {}", s)),
        }
    }
}

impl std::fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Personal record dimensions tracked independently per (athlete, exercise)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// Heaviest single-set load in kg
    MaxLoad,
    /// Highest repetition count in a single set
    MaxReps,
    /// Highest single-set volume (reps × load)
    MaxVolume,
    /// Highest estimated one-rep max (Brzycki extrapolation)
    EstimatedOneRepMax,
}

impl RecordKind {
    /// All record kinds, in evaluation order
    pub const ALL: [RecordKind; 4] = [
        RecordKind::MaxLoad,
        RecordKind::MaxReps,
        RecordKind::MaxVolume,
        RecordKind::EstimatedOneRepMax,
    ];

    /// Canonical string used for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::MaxLoad => "max_load",
            RecordKind::MaxReps => "max_reps",
            RecordKind::MaxVolume => "max_volume",
            RecordKind::EstimatedOneRepMax => "estimated_1rm",
        }
    }

    /// Human-readable label for terminal output
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::MaxLoad => "Max load",
            RecordKind::MaxReps => "Max reps",
            RecordKind::MaxVolume => "Max volume",
            RecordKind::EstimatedOneRepMax => "Estimated 1RM",
        }
    }
}

impl std::str::FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max_load" => Ok(RecordKind::MaxLoad),
            "max_reps" => Ok(RecordKind::MaxReps),
            "max_volume" => Ok(RecordKind::MaxVolume),
            "estimated_1rm" => Ok(RecordKind::EstimatedOneRepMax),
            _ => Err(format!("Unknown record kind: {}", s)),
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A registered athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    /// Unique identifier (UUID string)
    pub id: String,

    /// Display name
    pub name: String,

    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

/// A registered exercise with its muscle-group mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier (UUID string)
    pub id: String,

    /// Exercise name (unique per database)
    pub name: String,

    /// Muscle groups this exercise targets (at least one)
    pub muscle_groups: Vec<MuscleGroup>,
}

/// One recorded set: the sole input to record evaluation and analytics.
///
/// Immutable once stored. A set qualifies for record evaluation only when
/// both `reps` and `load_kg` are present and positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    /// Unique identifier (UUID string)
    pub id: String,

    /// Parent workout reference
    pub workout_id: String,

    /// Owning athlete
    pub athlete_id: String,

    /// Exercise performed
    pub exercise_id: String,

    /// Repetitions completed (None for untracked sets)
    pub reps: Option<u32>,

    /// Load in kilograms (None for bodyweight/untracked sets)
    pub load_kg: Option<Decimal>,

    /// When the set was performed
    pub recorded_at: DateTime<Utc>,
}

impl SetEntry {
    /// Returns `(reps, load_kg)` when the entry qualifies for record
    /// evaluation: both values present and strictly positive.
    pub fn qualifying(&self) -> Option<(u32, Decimal)> {
        match (self.reps, self.load_kg) {
            (Some(reps), Some(load)) if reps > 0 && load > Decimal::ZERO => Some((reps, load)),
            _ => None,
        }
    }
}

/// A completed workout with its child set entries.
///
/// Read-only to the engine: consumed by analytics, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier (UUID string)
    pub id: String,

    /// Owning athlete
    pub athlete_id: String,

    /// Completion timestamp
    pub completed_at: DateTime<Utc>,

    /// Duration in seconds, if tracked
    pub duration_seconds: Option<u32>,

    /// Optional label (e.g. "Push day")
    pub label: Option<String>,

    /// Free-form notes
    pub notes: Option<String>,

    /// Child set entries
    pub entries: Vec<SetEntry>,
}

/// Current best for an (athlete, exercise, kind) triple.
///
/// At most one exists per triple; its value is monotonically non-decreasing
/// across its lifetime. Replaced on strict improvement, untouched on ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub athlete_id: String,
    pub exercise_id: String,
    pub kind: RecordKind,

    /// Record value: kg for max load and estimates, a count for max reps,
    /// kg-reps for max volume
    pub value: Decimal,

    /// When the record-setting set was performed
    pub achieved_at: DateTime<Utc>,

    /// The set entry that set this record
    pub source_entry_id: String,
}

/// Emitted when a set newly sets or improves a personal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEvent {
    pub exercise_id: String,
    pub kind: RecordKind,

    /// Value the record held before this set (None on first record)
    pub previous_value: Option<Decimal>,

    pub new_value: Decimal,
    pub achieved_at: DateTime<Utc>,
}

/// Consecutive-day activity streak for one athlete.
///
/// Invariant: `longest_length >= current_length`. Mutated at most once per
/// calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakState {
    pub athlete_id: String,
    pub current_length: u32,
    pub longest_length: u32,

    /// Calendar day of the last counted event (time-of-day discarded)
    pub last_active_date: NaiveDate,
}

/// Weekly goal tracking for one (athlete, Monday-aligned week).
///
/// `actual_count` is always recomputed as a full recount of completed plan
/// items within the week, never incremented, so it self-heals against
/// out-of-order or duplicate events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyGoalState {
    pub athlete_id: String,

    /// Monday on/before the event date
    pub week_start: NaiveDate,

    pub target_count: u32,
    pub actual_count: u32,
    pub achieved: bool,
}

/// Per-(athlete, plan item) completion progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanProgress {
    pub athlete_id: String,
    pub plan_item_id: String,
    pub completed: bool,

    /// Calendar day of completion (None when not completed)
    pub completed_on: Option<NaiveDate>,

    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(reps: Option<u32>, load: Option<Decimal>) -> SetEntry {
        SetEntry {
            id: "e1".to_string(),
            workout_id: "w1".to_string(),
            athlete_id: "a1".to_string(),
            exercise_id: "x1".to_string(),
            reps,
            load_kg: load,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_qualifying_requires_both_fields_positive() {
        assert_eq!(
            entry(Some(5), Some(dec!(100))).qualifying(),
            Some((5, dec!(100)))
        );
        assert_eq!(entry(None, Some(dec!(100))).qualifying(), None);
        assert_eq!(entry(Some(5), None).qualifying(), None);
        assert_eq!(entry(Some(0), Some(dec!(100))).qualifying(), None);
        assert_eq!(entry(Some(5), Some(dec!(0))).qualifying(), None);
        assert_eq!(entry(Some(5), Some(dec!(-20))).qualifying(), None);
    }

    #[test]
    fn test_record_kind_round_trip() {
        for kind in RecordKind::ALL {
            assert_eq!(kind.as_str().parse::<RecordKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_muscle_group_round_trip() {
        let groups = [
            MuscleGroup::Chest,
            MuscleGroup::Hamstrings,
            MuscleGroup::FullBody,
        ];
        for group in groups {
            assert_eq!(group.as_str().parse::<MuscleGroup>().unwrap(), group);
        }
    }
}
