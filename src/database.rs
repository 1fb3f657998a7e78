//! SQLite persistence layer
//!
//! Implements the point-read / point-write / range-read contract the engine
//! needs. Every read-modify-write (record upsert, streak advance, weekly-goal
//! refresh) runs inside a single IMMEDIATE transaction so concurrent writers
//! serialize on the database write lock instead of racing a stale read.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::{
    Athlete, Exercise, MuscleGroup, PersonalRecord, PlanProgress, RecordKind, SetEntry,
    StreakState, WeeklyGoalState, Workout,
};

/// Database error types
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Stored value could not be decoded: {0}")]
    InvalidValue(String),
    #[error("Data not found: {0}")]
    NotFound(String),
    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

/// Outcome of an atomic replace-if-greater record write
#[derive(Debug, Clone, PartialEq)]
pub enum RecordWrite {
    /// The candidate beat the stored value (or none existed) and was written
    Improved { previous: Option<Decimal> },
    /// The stored value was equal or greater; nothing was written
    Unchanged,
}

/// Database connection and schema management
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create or open a database at the specified path
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, DatabaseError> {
        let conn = Connection::open(db_path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Open an in-memory database (tests and benchmarks)
    pub fn in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize schema, indexes, and connection pragmas
    fn init_schema(&self) -> Result<(), DatabaseError> {
        // WAL mode for concurrent readers while a writer holds the lock
        self.conn.pragma_update(None, "journal_mode", "WAL")?;
        self.conn.pragma_update(None, "synchronous", "NORMAL")?;
        self.conn.pragma_update(None, "foreign_keys", "ON")?;

        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS athletes (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                created_at DATETIME NOT NULL
            );

            CREATE TABLE IF NOT EXISTS exercises (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS exercise_muscle_groups (
                exercise_id TEXT NOT NULL REFERENCES exercises(id),
                muscle_group TEXT NOT NULL,
                PRIMARY KEY (exercise_id, muscle_group)
            );

            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                athlete_id TEXT NOT NULL REFERENCES athletes(id),
                completed_at DATETIME NOT NULL,
                duration_seconds INTEGER,
                label TEXT,
                notes TEXT
            );

            CREATE TABLE IF NOT EXISTS set_entries (
                id TEXT PRIMARY KEY,
                workout_id TEXT NOT NULL REFERENCES workouts(id),
                athlete_id TEXT NOT NULL REFERENCES athletes(id),
                exercise_id TEXT NOT NULL REFERENCES exercises(id),
                reps INTEGER,
                load_kg TEXT,
                recorded_at DATETIME NOT NULL
            );

            CREATE TABLE IF NOT EXISTS personal_records (
                athlete_id TEXT NOT NULL,
                exercise_id TEXT NOT NULL,
                kind TEXT NOT NULL,
                value TEXT NOT NULL,
                achieved_at DATETIME NOT NULL,
                source_entry_id TEXT NOT NULL,
                PRIMARY KEY (athlete_id, exercise_id, kind)
            );

            CREATE TABLE IF NOT EXISTS streaks (
                athlete_id TEXT PRIMARY KEY,
                current_length INTEGER NOT NULL,
                longest_length INTEGER NOT NULL,
                last_active_date DATE NOT NULL
            );

            CREATE TABLE IF NOT EXISTS weekly_goals (
                athlete_id TEXT NOT NULL,
                week_start DATE NOT NULL,
                target_count INTEGER NOT NULL,
                actual_count INTEGER NOT NULL,
                achieved INTEGER NOT NULL,
                PRIMARY KEY (athlete_id, week_start)
            );

            CREATE TABLE IF NOT EXISTS plan_progress (
                athlete_id TEXT NOT NULL,
                plan_item_id TEXT NOT NULL,
                completed INTEGER NOT NULL,
                completed_on DATE,
                updated_at DATETIME NOT NULL,
                PRIMARY KEY (athlete_id, plan_item_id)
            );

            CREATE INDEX IF NOT EXISTS idx_workouts_athlete_completed
                ON workouts(athlete_id, completed_at);
            CREATE INDEX IF NOT EXISTS idx_set_entries_workout
                ON set_entries(workout_id);
            CREATE INDEX IF NOT EXISTS idx_plan_progress_completed
                ON plan_progress(athlete_id, completed_on);
            "#,
        )?;

        Ok(())
    }

    // ========== Athletes ==========

    pub fn add_athlete(&self, name: &str) -> Result<Athlete, DatabaseError> {
        let athlete = Athlete {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO athletes (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![athlete.id, athlete.name, athlete.created_at],
        )?;
        Ok(athlete)
    }

    pub fn get_athlete(&self, athlete_id: &str) -> Result<Option<Athlete>, DatabaseError> {
        let athlete = self
            .conn
            .query_row(
                "SELECT id, name, created_at FROM athletes WHERE id = ?1",
                params![athlete_id],
                |row| {
                    Ok(Athlete {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(athlete)
    }

    pub fn list_athletes(&self) -> Result<Vec<Athlete>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, created_at FROM athletes ORDER BY created_at")?;
        let athletes = stmt
            .query_map([], |row| {
                Ok(Athlete {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(athletes)
    }

    // ========== Exercises ==========

    pub fn add_exercise(
        &mut self,
        name: &str,
        muscle_groups: &[MuscleGroup],
    ) -> Result<Exercise, DatabaseError> {
        if self.find_exercise_by_name(name)?.is_some() {
            return Err(DatabaseError::Duplicate(format!("exercise '{}'", name)));
        }

        let exercise = Exercise {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            muscle_groups: muscle_groups.to_vec(),
        };

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO exercises (id, name) VALUES (?1, ?2)",
            params![exercise.id, exercise.name],
        )?;
        for group in &exercise.muscle_groups {
            tx.execute(
                "INSERT OR IGNORE INTO exercise_muscle_groups (exercise_id, muscle_group)
                 VALUES (?1, ?2)",
                params![exercise.id, group.as_str()],
            )?;
        }
        tx.commit()?;
        Ok(exercise)
    }

    pub fn get_exercise(&self, exercise_id: &str) -> Result<Option<Exercise>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name FROM exercises WHERE id = ?1",
                params![exercise_id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        match row {
            Some((id, name)) => {
                let muscle_groups = self.muscle_groups_for(&id)?;
                Ok(Some(Exercise {
                    id,
                    name,
                    muscle_groups,
                }))
            }
            None => Ok(None),
        }
    }

    pub fn find_exercise_by_name(&self, name: &str) -> Result<Option<Exercise>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name FROM exercises WHERE name = ?1 COLLATE NOCASE",
                params![name],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        match row {
            Some((id, name)) => {
                let muscle_groups = self.muscle_groups_for(&id)?;
                Ok(Some(Exercise {
                    id,
                    name,
                    muscle_groups,
                }))
            }
            None => Ok(None),
        }
    }

    pub fn list_exercises(&self) -> Result<Vec<Exercise>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM exercises ORDER BY name")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut exercises = Vec::with_capacity(rows.len());
        for (id, name) in rows {
            let muscle_groups = self.muscle_groups_for(&id)?;
            exercises.push(Exercise {
                id,
                name,
                muscle_groups,
            });
        }
        Ok(exercises)
    }

    fn muscle_groups_for(&self, exercise_id: &str) -> Result<Vec<MuscleGroup>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT muscle_group FROM exercise_muscle_groups
             WHERE exercise_id = ?1 ORDER BY muscle_group",
        )?;
        let raw = stmt
            .query_map(params![exercise_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        raw.iter()
            .map(|s| {
                MuscleGroup::from_str(s)
                    .map_err(|e| DatabaseError::InvalidValue(format!("muscle group: {}", e)))
            })
            .collect()
    }

    // ========== Workouts & set entries ==========

    /// Store a completed workout and its child set entries atomically
    pub fn store_workout(&mut self, workout: &Workout) -> Result<(), DatabaseError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO workouts (id, athlete_id, completed_at, duration_seconds, label, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                workout.id,
                workout.athlete_id,
                workout.completed_at,
                workout.duration_seconds,
                workout.label,
                workout.notes,
            ],
        )?;
        for entry in &workout.entries {
            tx.execute(
                "INSERT INTO set_entries
                     (id, workout_id, athlete_id, exercise_id, reps, load_kg, recorded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    entry.id,
                    entry.workout_id,
                    entry.athlete_id,
                    entry.exercise_id,
                    entry.reps,
                    entry.load_kg.map(|l| l.to_string()),
                    entry.recorded_at,
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Duplicate check for history import: same athlete, completion time, label
    pub fn workout_exists(
        &self,
        athlete_id: &str,
        completed_at: DateTime<Utc>,
        label: Option<&str>,
    ) -> Result<bool, DatabaseError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM workouts
             WHERE athlete_id = ?1 AND completed_at = ?2 AND label IS ?3",
            params![athlete_id, completed_at, label],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Range read: completed workouts (with entries) since the cutoff,
    /// ascending by completion time
    pub fn workouts_since(
        &self,
        athlete_id: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Workout>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, athlete_id, completed_at, duration_seconds, label, notes
             FROM workouts
             WHERE athlete_id = ?1 AND completed_at >= ?2
             ORDER BY completed_at ASC",
        )?;
        let mut workouts = stmt
            .query_map(params![athlete_id, cutoff], |row| {
                Ok(Workout {
                    id: row.get(0)?,
                    athlete_id: row.get(1)?,
                    completed_at: row.get(2)?,
                    duration_seconds: row.get(3)?,
                    label: row.get(4)?,
                    notes: row.get(5)?,
                    entries: Vec::new(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        for workout in &mut workouts {
            workout.entries = self.entries_for_workout(&workout.id)?;
        }
        Ok(workouts)
    }

    fn entries_for_workout(&self, workout_id: &str) -> Result<Vec<SetEntry>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, workout_id, athlete_id, exercise_id, reps, load_kg, recorded_at
             FROM set_entries WHERE workout_id = ?1 ORDER BY recorded_at ASC",
        )?;
        let raw = stmt
            .query_map(params![workout_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<u32>>(4)?,
                    row.get::<_, Option<String>>(5)?,
                    row.get::<_, DateTime<Utc>>(6)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(
                |(id, workout_id, athlete_id, exercise_id, reps, load_raw, recorded_at)| {
                    let load_kg = load_raw.map(|s| parse_decimal(&s)).transpose()?;
                    Ok(SetEntry {
                        id,
                        workout_id,
                        athlete_id,
                        exercise_id,
                        reps,
                        load_kg,
                        recorded_at,
                    })
                },
            )
            .collect()
    }

    // ========== Personal records ==========

    pub fn get_record(
        &self,
        athlete_id: &str,
        exercise_id: &str,
        kind: RecordKind,
    ) -> Result<Option<PersonalRecord>, DatabaseError> {
        let raw = self
            .conn
            .query_row(
                "SELECT value, achieved_at, source_entry_id FROM personal_records
                 WHERE athlete_id = ?1 AND exercise_id = ?2 AND kind = ?3",
                params![athlete_id, exercise_id, kind.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, DateTime<Utc>>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        match raw {
            Some((value, achieved_at, source_entry_id)) => Ok(Some(PersonalRecord {
                athlete_id: athlete_id.to_string(),
                exercise_id: exercise_id.to_string(),
                kind,
                value: parse_decimal(&value)?,
                achieved_at,
                source_entry_id,
            })),
            None => Ok(None),
        }
    }

    /// All current records for an athlete, ascending by achievement time
    pub fn records_for_athlete(
        &self,
        athlete_id: &str,
    ) -> Result<Vec<PersonalRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT exercise_id, kind, value, achieved_at, source_entry_id
             FROM personal_records WHERE athlete_id = ?1
             ORDER BY achieved_at ASC",
        )?;
        let raw = stmt
            .query_map(params![athlete_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, DateTime<Utc>>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|(exercise_id, kind, value, achieved_at, source_entry_id)| {
                Ok(PersonalRecord {
                    athlete_id: athlete_id.to_string(),
                    exercise_id,
                    kind: RecordKind::from_str(&kind)
                        .map_err(DatabaseError::InvalidValue)?,
                    value: parse_decimal(&value)?,
                    achieved_at,
                    source_entry_id,
                })
            })
            .collect()
    }

    /// Atomic replace-if-greater write for one record kind.
    ///
    /// The comparison and the write happen inside one IMMEDIATE transaction,
    /// so two concurrent candidates for the same (athlete, exercise, kind)
    /// triple cannot both win with stale reads. Ties leave the stored row
    /// untouched, including its `achieved_at`.
    pub fn record_if_better(
        &mut self,
        athlete_id: &str,
        exercise_id: &str,
        kind: RecordKind,
        candidate: Decimal,
        achieved_at: DateTime<Utc>,
        source_entry_id: &str,
    ) -> Result<RecordWrite, DatabaseError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let previous_raw = tx
            .query_row(
                "SELECT value FROM personal_records
                 WHERE athlete_id = ?1 AND exercise_id = ?2 AND kind = ?3",
                params![athlete_id, exercise_id, kind.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        let previous = previous_raw.map(|s| parse_decimal(&s)).transpose()?;

        if let Some(stored) = previous {
            if candidate <= stored {
                tx.commit()?;
                return Ok(RecordWrite::Unchanged);
            }
        }

        tx.execute(
            "INSERT OR REPLACE INTO personal_records
                 (athlete_id, exercise_id, kind, value, achieved_at, source_entry_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                athlete_id,
                exercise_id,
                kind.as_str(),
                candidate.to_string(),
                achieved_at,
                source_entry_id,
            ],
        )?;
        tx.commit()?;
        Ok(RecordWrite::Improved { previous })
    }

    // ========== Streaks ==========

    pub fn get_streak(&self, athlete_id: &str) -> Result<Option<StreakState>, DatabaseError> {
        let state = self
            .conn
            .query_row(
                "SELECT current_length, longest_length, last_active_date
                 FROM streaks WHERE athlete_id = ?1",
                params![athlete_id],
                |row| {
                    Ok(StreakState {
                        athlete_id: athlete_id.to_string(),
                        current_length: row.get(0)?,
                        longest_length: row.get(1)?,
                        last_active_date: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(state)
    }

    /// Advance the athlete's streak for a qualifying event on `event_date`.
    ///
    /// Read, transition, and write run in one IMMEDIATE transaction so two
    /// events racing on the same day cannot both extend the streak.
    pub fn advance_streak(
        &mut self,
        athlete_id: &str,
        event_date: NaiveDate,
    ) -> Result<StreakState, DatabaseError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = tx
            .query_row(
                "SELECT current_length, longest_length, last_active_date
                 FROM streaks WHERE athlete_id = ?1",
                params![athlete_id],
                |row| {
                    Ok(StreakState {
                        athlete_id: athlete_id.to_string(),
                        current_length: row.get(0)?,
                        longest_length: row.get(1)?,
                        last_active_date: row.get(2)?,
                    })
                },
            )
            .optional()?;

        let state = match existing {
            None => StreakState::started(athlete_id, event_date),
            Some(mut state) => {
                state.advance(event_date);
                state
            }
        };

        tx.execute(
            "INSERT OR REPLACE INTO streaks
                 (athlete_id, current_length, longest_length, last_active_date)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                state.athlete_id,
                state.current_length,
                state.longest_length,
                state.last_active_date,
            ],
        )?;
        tx.commit()?;
        Ok(state)
    }

    // ========== Weekly goals ==========

    pub fn get_weekly_goal(
        &self,
        athlete_id: &str,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklyGoalState>, DatabaseError> {
        let state = self
            .conn
            .query_row(
                "SELECT target_count, actual_count, achieved FROM weekly_goals
                 WHERE athlete_id = ?1 AND week_start = ?2",
                params![athlete_id, week_start],
                |row| {
                    Ok(WeeklyGoalState {
                        athlete_id: athlete_id.to_string(),
                        week_start,
                        target_count: row.get(0)?,
                        actual_count: row.get(1)?,
                        achieved: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(state)
    }

    /// Get-or-create the week's goal row and recompute its actual count as a
    /// full recount of completed plan items within [week_start, week_end].
    ///
    /// Recount-not-increment keeps the counter idempotent under retries and
    /// out-of-order events; running it inside an IMMEDIATE transaction keeps
    /// it consistent under concurrent writers.
    pub fn refresh_weekly_goal(
        &mut self,
        athlete_id: &str,
        week_start: NaiveDate,
        week_end: NaiveDate,
        default_target: u32,
    ) -> Result<WeeklyGoalState, DatabaseError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let target: u32 = tx
            .query_row(
                "SELECT target_count FROM weekly_goals
                 WHERE athlete_id = ?1 AND week_start = ?2",
                params![athlete_id, week_start],
                |row| row.get(0),
            )
            .optional()?
            .unwrap_or(default_target);

        let actual: u32 = tx.query_row(
            "SELECT COUNT(*) FROM plan_progress
             WHERE athlete_id = ?1 AND completed = 1
               AND completed_on BETWEEN ?2 AND ?3",
            params![athlete_id, week_start, week_end],
            |row| row.get(0),
        )?;

        let state = WeeklyGoalState {
            athlete_id: athlete_id.to_string(),
            week_start,
            target_count: target,
            actual_count: actual,
            achieved: actual >= target,
        };

        tx.execute(
            "INSERT OR REPLACE INTO weekly_goals
                 (athlete_id, week_start, target_count, actual_count, achieved)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                state.athlete_id,
                state.week_start,
                state.target_count,
                state.actual_count,
                state.achieved,
            ],
        )?;
        tx.commit()?;
        Ok(state)
    }

    // ========== Plan progress ==========

    pub fn upsert_plan_progress(
        &self,
        athlete_id: &str,
        plan_item_id: &str,
        completed: bool,
        event_date: NaiveDate,
    ) -> Result<PlanProgress, DatabaseError> {
        let progress = PlanProgress {
            athlete_id: athlete_id.to_string(),
            plan_item_id: plan_item_id.to_string(),
            completed,
            completed_on: completed.then_some(event_date),
            updated_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT OR REPLACE INTO plan_progress
                 (athlete_id, plan_item_id, completed, completed_on, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                progress.athlete_id,
                progress.plan_item_id,
                progress.completed,
                progress.completed_on,
                progress.updated_at,
            ],
        )?;
        Ok(progress)
    }

    pub fn get_plan_progress(
        &self,
        athlete_id: &str,
        plan_item_id: &str,
    ) -> Result<Option<PlanProgress>, DatabaseError> {
        let progress = self
            .conn
            .query_row(
                "SELECT completed, completed_on, updated_at FROM plan_progress
                 WHERE athlete_id = ?1 AND plan_item_id = ?2",
                params![athlete_id, plan_item_id],
                |row| {
                    Ok(PlanProgress {
                        athlete_id: athlete_id.to_string(),
                        plan_item_id: plan_item_id.to_string(),
                        completed: row.get(0)?,
                        completed_on: row.get(1)?,
                        updated_at: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(progress)
    }

    /// Count completed plan items within a date range (inclusive)
    pub fn count_completed_between(
        &self,
        athlete_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u32, DatabaseError> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM plan_progress
             WHERE athlete_id = ?1 AND completed = 1
               AND completed_on BETWEEN ?2 AND ?3",
            params![athlete_id, start, end],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal, DatabaseError> {
    Decimal::from_str(raw)
        .map_err(|e| DatabaseError::InvalidValue(format!("decimal '{}': {}", raw, e)))
}
