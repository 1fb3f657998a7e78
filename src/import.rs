//! CSV workout-history import
//!
//! Imports historical set entries from CSV with flexible column naming,
//! multi-format date parsing, per-row validation with skip-and-report, and
//! duplicate workout detection. Qualifying entries are fed through the
//! record evaluator so personal records backfill from history.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use csv::ReaderBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::database::{Database, DatabaseError};
use crate::models::{Exercise, SetEntry, Workout};
use crate::records::{RecordError, RecordEvaluator};

/// Import errors
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Unknown athlete: {0}")]
    UnknownAthlete(String),
    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),
    #[error("Record evaluation error: {0}")]
    Record(#[from] RecordError),
}

/// A row that failed validation and was skipped
#[derive(Debug, Clone)]
pub struct RowSkip {
    /// 1-based line number in the source file (header is line 1)
    pub line: u64,
    pub reason: String,
}

/// Outcome of one import run
#[derive(Debug, Default)]
pub struct ImportReport {
    pub workouts_imported: u32,
    pub sets_imported: u32,
    pub duplicates_skipped: u32,
    pub rows_skipped: Vec<RowSkip>,

    /// Personal records set or improved while replaying history
    pub records_set: u32,
}

struct ParsedRow {
    completed_at: DateTime<Utc>,
    exercise_id: String,
    reps: Option<u32>,
    load_kg: Option<Decimal>,
    label: Option<String>,
    duration_minutes: Option<u32>,
    notes: Option<String>,
}

/// CSV importer with flexible column mapping
pub struct HistoryImporter {
    column_mapping: HashMap<String, String>,
}

impl Default for HistoryImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryImporter {
    pub fn new() -> Self {
        let mut column_mapping = HashMap::new();

        Self::add_mapping(&mut column_mapping, "date", &["date", "day", "workout_date"]);
        Self::add_mapping(
            &mut column_mapping,
            "exercise",
            &["exercise", "exercise_name", "movement", "lift"],
        );
        Self::add_mapping(&mut column_mapping, "reps", &["reps", "repetitions", "rep_count"]);
        Self::add_mapping(
            &mut column_mapping,
            "load_kg",
            &["load_kg", "load", "weight", "weight_kg", "kg"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "label",
            &["label", "workout", "workout_label", "session"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "duration_minutes",
            &["duration_minutes", "duration", "minutes"],
        );
        Self::add_mapping(&mut column_mapping, "notes", &["notes", "note", "comment"]);

        Self { column_mapping }
    }

    fn add_mapping(mapping: &mut HashMap<String, String>, standard: &str, variations: &[&str]) {
        for variation in variations {
            mapping.insert(variation.to_lowercase(), standard.to_string());
        }
    }

    /// Import a CSV history file for one athlete.
    ///
    /// Rows that fail validation are skipped and reported, never fatal;
    /// workouts that already exist (same athlete, completion time, label)
    /// are skipped as duplicates.
    pub fn import_file<P: AsRef<Path>>(
        &self,
        db: &mut Database,
        athlete_id: &str,
        path: P,
    ) -> Result<ImportReport, ImportError> {
        if db.get_athlete(athlete_id)?.is_none() {
            return Err(ImportError::UnknownAthlete(athlete_id.to_string()));
        }

        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path.as_ref())?;

        // Map the file's headers onto canonical column names
        let headers = reader.headers()?.clone();
        let mut columns: HashMap<String, usize> = HashMap::new();
        for (idx, header) in headers.iter().enumerate() {
            if let Some(standard) = self.column_mapping.get(&header.to_lowercase()) {
                columns.entry(standard.clone()).or_insert(idx);
            }
        }
        for required in ["date", "exercise"] {
            if !columns.contains_key(required) {
                return Err(ImportError::MissingColumn(required.to_string()));
            }
        }

        let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
        let exercises_by_name: HashMap<String, Exercise> = db
            .list_exercises()?
            .into_iter()
            .map(|e| (e.name.to_lowercase(), e))
            .collect();

        let bar = ProgressBar::new(rows.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} rows ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut report = ImportReport::default();
        let mut parsed: Vec<ParsedRow> = Vec::with_capacity(rows.len());

        for (i, row) in rows.iter().enumerate() {
            bar.inc(1);
            let line = i as u64 + 2; // header is line 1
            match self.parse_row(row, &columns, &exercises_by_name) {
                Ok(parsed_row) => parsed.push(parsed_row),
                Err(reason) => {
                    warn!(line, %reason, "Skipping history row");
                    report.rows_skipped.push(RowSkip { line, reason });
                }
            }
        }
        bar.finish_and_clear();

        // Group rows into workouts by (completion time, label), in file order
        let mut grouped: BTreeMap<(DateTime<Utc>, Option<String>), Vec<ParsedRow>> =
            BTreeMap::new();
        for row in parsed {
            grouped
                .entry((row.completed_at, row.label.clone()))
                .or_default()
                .push(row);
        }

        for ((completed_at, label), group) in grouped {
            if db.workout_exists(athlete_id, completed_at, label.as_deref())? {
                report.duplicates_skipped += 1;
                continue;
            }

            let workout_id = Uuid::new_v4().to_string();
            let duration_seconds = group
                .iter()
                .filter_map(|r| r.duration_minutes)
                .max()
                .map(|m| m * 60);
            let notes = group.iter().find_map(|r| r.notes.clone());

            let entries: Vec<SetEntry> = group
                .iter()
                .map(|row| SetEntry {
                    id: Uuid::new_v4().to_string(),
                    workout_id: workout_id.clone(),
                    athlete_id: athlete_id.to_string(),
                    exercise_id: row.exercise_id.clone(),
                    reps: row.reps,
                    load_kg: row.load_kg,
                    recorded_at: row.completed_at,
                })
                .collect();

            let workout = Workout {
                id: workout_id,
                athlete_id: athlete_id.to_string(),
                completed_at,
                duration_seconds,
                label,
                notes,
                entries,
            };
            db.store_workout(&workout)?;
            report.workouts_imported += 1;
            report.sets_imported += workout.entries.len() as u32;

            for entry in &workout.entries {
                let events = RecordEvaluator::evaluate(db, entry)?;
                report.records_set += events.len() as u32;
            }
        }

        info!(
            workouts = report.workouts_imported,
            sets = report.sets_imported,
            duplicates = report.duplicates_skipped,
            skipped = report.rows_skipped.len(),
            records = report.records_set,
            "History import finished"
        );
        Ok(report)
    }

    fn parse_row(
        &self,
        row: &csv::StringRecord,
        columns: &HashMap<String, usize>,
        exercises_by_name: &HashMap<String, Exercise>,
    ) -> Result<ParsedRow, String> {
        let field = |name: &str| -> Option<&str> {
            columns
                .get(name)
                .and_then(|&idx| row.get(idx))
                .filter(|v| !v.is_empty())
        };

        let raw_date = field("date").ok_or("Missing date")?;
        let completed_at = parse_timestamp(raw_date)
            .ok_or_else(|| format!("Unparseable date '{}'", raw_date))?;

        let raw_exercise = field("exercise").ok_or("Missing exercise")?;
        let exercise = exercises_by_name
            .get(&raw_exercise.to_lowercase())
            .ok_or_else(|| format!("Unknown exercise '{}'", raw_exercise))?;

        let reps = field("reps")
            .map(|v| v.parse::<u32>().map_err(|_| format!("Invalid reps '{}'", v)))
            .transpose()?;
        let load_kg = field("load_kg")
            .map(|v| Decimal::from_str(v).map_err(|_| format!("Invalid load '{}'", v)))
            .transpose()?;
        let duration_minutes = field("duration_minutes")
            .map(|v| {
                v.parse::<u32>()
                    .map_err(|_| format!("Invalid duration '{}'", v))
            })
            .transpose()?;

        Ok(ParsedRow {
            completed_at,
            exercise_id: exercise.id.clone(),
            reps,
            load_kg,
            label: field("label").map(str::to_string),
            duration_minutes,
            notes: field("notes").map(str::to_string),
        })
    }
}

/// Parse a timestamp or bare date in the common export formats
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc());
        }
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.and_time(NaiveTime::MIN).and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MuscleGroup;
    use std::io::Write;

    fn setup() -> (Database, String) {
        let mut db = Database::in_memory().unwrap();
        let athlete = db.add_athlete("Importer").unwrap();
        db.add_exercise("Bench Press", &[MuscleGroup::Chest])
            .unwrap();
        db.add_exercise("Squat", &[MuscleGroup::Quads]).unwrap();
        (db, athlete.id)
    }

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_import_groups_rows_into_workouts() {
        let (mut db, athlete_id) = setup();
        let file = write_csv(
            "date,exercise,reps,weight,session,duration\n\
             2024-09-02,Bench Press,5,100,Push day,60\n\
             2024-09-02,Bench Press,5,95,Push day,60\n\
             2024-09-04,Squat,5,140,Leg day,45\n",
        );

        let report = HistoryImporter::new()
            .import_file(&mut db, &athlete_id, file.path())
            .unwrap();

        assert_eq!(report.workouts_imported, 2);
        assert_eq!(report.sets_imported, 3);
        assert!(report.rows_skipped.is_empty());
        // Bench sets a full record slate; the lighter second set adds none;
        // the squat sets another slate
        assert_eq!(report.records_set, 8);

        let cutoff = parse_timestamp("2024-01-01").unwrap();
        let workouts = db.workouts_since(&athlete_id, cutoff).unwrap();
        assert_eq!(workouts.len(), 2);
        assert_eq!(workouts[0].entries.len(), 2);
        assert_eq!(workouts[0].duration_seconds, Some(3600));
        assert_eq!(workouts[0].label.as_deref(), Some("Push day"));
    }

    #[test]
    fn test_reimport_skips_duplicates() {
        let (mut db, athlete_id) = setup();
        let file = write_csv(
            "date,exercise,reps,load_kg\n\
             2024-09-02,Bench Press,5,100\n",
        );

        let importer = HistoryImporter::new();
        importer
            .import_file(&mut db, &athlete_id, file.path())
            .unwrap();
        let second = importer
            .import_file(&mut db, &athlete_id, file.path())
            .unwrap();

        assert_eq!(second.workouts_imported, 0);
        assert_eq!(second.duplicates_skipped, 1);
        assert_eq!(second.records_set, 0);
    }

    #[test]
    fn test_bad_rows_are_skipped_and_reported() {
        let (mut db, athlete_id) = setup();
        let file = write_csv(
            "date,exercise,reps,load_kg\n\
             2024-09-02,Bench Press,5,100\n\
             not-a-date,Bench Press,5,100\n\
             2024-09-03,Cable Fly,12,20\n\
             2024-09-04,Squat,five,140\n",
        );

        let report = HistoryImporter::new()
            .import_file(&mut db, &athlete_id, file.path())
            .unwrap();

        assert_eq!(report.workouts_imported, 1);
        assert_eq!(report.rows_skipped.len(), 3);
        assert!(report.rows_skipped[0].reason.contains("Unparseable date"));
        assert!(report.rows_skipped[1].reason.contains("Unknown exercise"));
        assert!(report.rows_skipped[2].reason.contains("Invalid reps"));
    }

    #[test]
    fn test_missing_required_column_fails() {
        let (mut db, athlete_id) = setup();
        let file = write_csv("exercise,reps,load_kg\nBench Press,5,100\n");
        let err = HistoryImporter::new()
            .import_file(&mut db, &athlete_id, file.path())
            .unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn(c) if c == "date"));
    }

    #[test]
    fn test_timestamp_formats() {
        assert!(parse_timestamp("2024-09-02").is_some());
        assert!(parse_timestamp("09/02/2024").is_some());
        assert!(parse_timestamp("02.09.2024").is_some());
        assert!(parse_timestamp("2024-09-02 18:30:00").is_some());
        assert!(parse_timestamp("2024-09-02T18:30:00").is_some());
        assert!(parse_timestamp("2024-09-02T18:30:00+02:00").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
