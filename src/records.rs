//! Personal record detection
//!
//! Evaluates one set entry against the four record kinds for its
//! (athlete, exercise) pair and commits strict improvements through the
//! storage layer's atomic replace-if-greater write.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::database::{Database, DatabaseError, RecordWrite};
use crate::metrics::{estimated_one_rep_max, set_volume};
use crate::models::{RecordEvent, RecordKind, SetEntry};

/// Estimated-1RM extrapolation is only trusted at low rep counts; sets above
/// this cutoff are never evaluated for that kind, even if they would
/// numerically beat the stored estimate.
pub const E1RM_REP_CUTOFF: u32 = 10;

/// Record evaluation errors
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Storage error while updating {kind} record: {source}")]
    Storage {
        kind: RecordKind,
        #[source]
        source: DatabaseError,
    },
}

/// Evaluates set entries for new personal records
pub struct RecordEvaluator;

impl RecordEvaluator {
    /// Evaluate one set entry against every record kind.
    ///
    /// Returns one event per kind that was newly set or improved; an empty
    /// list when the entry does not qualify or beats nothing. The four kinds
    /// are independent read-then-conditional-write attempts, not one
    /// transaction: a storage failure on one kind does not stop the others,
    /// and the first failure is returned after all kinds were attempted.
    pub fn evaluate(
        db: &mut Database,
        entry: &SetEntry,
    ) -> Result<Vec<RecordEvent>, RecordError> {
        let Some((reps, load_kg)) = entry.qualifying() else {
            debug!(entry_id = %entry.id, "Set entry does not qualify for record evaluation");
            return Ok(Vec::new());
        };

        let mut candidates: Vec<(RecordKind, Decimal)> = vec![
            (RecordKind::MaxLoad, load_kg),
            (RecordKind::MaxReps, Decimal::from(reps)),
            (RecordKind::MaxVolume, set_volume(reps, load_kg)),
        ];
        if reps <= E1RM_REP_CUTOFF {
            candidates.push((
                RecordKind::EstimatedOneRepMax,
                estimated_one_rep_max(load_kg, reps),
            ));
        }

        let mut events = Vec::new();
        let mut first_error: Option<RecordError> = None;

        for (kind, candidate) in candidates {
            match db.record_if_better(
                &entry.athlete_id,
                &entry.exercise_id,
                kind,
                candidate,
                entry.recorded_at,
                &entry.id,
            ) {
                Ok(RecordWrite::Improved { previous }) => {
                    debug!(
                        entry_id = %entry.id,
                        kind = kind.as_str(),
                        %candidate,
                        "New personal record"
                    );
                    events.push(RecordEvent {
                        exercise_id: entry.exercise_id.clone(),
                        kind,
                        previous_value: previous,
                        new_value: candidate,
                        achieved_at: entry.recorded_at,
                    });
                }
                Ok(RecordWrite::Unchanged) => {}
                Err(source) => {
                    warn!(
                        entry_id = %entry.id,
                        kind = kind.as_str(),
                        error = %source,
                        "Record update failed; continuing with remaining kinds"
                    );
                    if first_error.is_none() {
                        first_error = Some(RecordError::Storage { kind, source });
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(events),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MuscleGroup;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn setup() -> (Database, String, String) {
        let mut db = Database::in_memory().unwrap();
        let athlete = db.add_athlete("Tester").unwrap();
        let exercise = db
            .add_exercise("Bench Press", &[MuscleGroup::Chest])
            .unwrap();
        (db, athlete.id, exercise.id)
    }

    fn entry(athlete_id: &str, exercise_id: &str, reps: Option<u32>, load: Option<Decimal>) -> SetEntry {
        SetEntry {
            id: uuid::Uuid::new_v4().to_string(),
            workout_id: "w1".to_string(),
            athlete_id: athlete_id.to_string(),
            exercise_id: exercise_id.to_string(),
            reps,
            load_kg: load,
            recorded_at: Utc::now(),
        }
    }

    fn event_value(events: &[RecordEvent], kind: RecordKind) -> Option<Decimal> {
        events.iter().find(|e| e.kind == kind).map(|e| e.new_value)
    }

    #[test]
    fn test_first_qualifying_entry_sets_all_four_records() {
        let (mut db, athlete, exercise) = setup();
        let events =
            RecordEvaluator::evaluate(&mut db, &entry(&athlete, &exercise, Some(5), Some(dec!(100))))
                .unwrap();

        assert_eq!(events.len(), 4);
        assert_eq!(event_value(&events, RecordKind::MaxLoad), Some(dec!(100)));
        assert_eq!(event_value(&events, RecordKind::MaxReps), Some(dec!(5)));
        assert_eq!(event_value(&events, RecordKind::MaxVolume), Some(dec!(500)));
        assert_eq!(
            event_value(&events, RecordKind::EstimatedOneRepMax),
            Some(dec!(112.5))
        );
        assert!(events.iter().all(|e| e.previous_value.is_none()));
    }

    #[test]
    fn test_non_qualifying_entries_are_skipped() {
        let (mut db, athlete, exercise) = setup();
        for (reps, load) in [
            (None, Some(dec!(100))),
            (Some(5), None),
            (Some(0), Some(dec!(100))),
            (Some(5), Some(dec!(0))),
        ] {
            let events =
                RecordEvaluator::evaluate(&mut db, &entry(&athlete, &exercise, reps, load)).unwrap();
            assert!(events.is_empty());
        }
        assert!(db
            .get_record(&athlete, &exercise, RecordKind::MaxLoad)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_tie_on_one_kind_still_improves_others() {
        let (mut db, athlete, exercise) = setup();
        RecordEvaluator::evaluate(&mut db, &entry(&athlete, &exercise, Some(1), Some(dec!(100))))
            .unwrap();

        // Same load (tie on max load), more reps and volume
        let events =
            RecordEvaluator::evaluate(&mut db, &entry(&athlete, &exercise, Some(3), Some(dec!(100))))
                .unwrap();

        assert!(event_value(&events, RecordKind::MaxLoad).is_none());
        assert_eq!(event_value(&events, RecordKind::MaxReps), Some(dec!(3)));
        assert_eq!(event_value(&events, RecordKind::MaxVolume), Some(dec!(300)));
        // 100 × 36/34 beats the stored estimate of 100
        assert!(event_value(&events, RecordKind::EstimatedOneRepMax).unwrap() > dec!(100));

        let max_reps = events
            .iter()
            .find(|e| e.kind == RecordKind::MaxReps)
            .unwrap();
        assert_eq!(max_reps.previous_value, Some(dec!(1)));
    }

    #[test]
    fn test_high_rep_sets_never_produce_estimate_events() {
        let (mut db, athlete, exercise) = setup();

        // 11 reps at 100 kg would extrapolate well past any stored estimate,
        // but sits above the accuracy cutoff
        let events =
            RecordEvaluator::evaluate(&mut db, &entry(&athlete, &exercise, Some(11), Some(dec!(100))))
                .unwrap();
        assert_eq!(events.len(), 3);
        assert!(event_value(&events, RecordKind::EstimatedOneRepMax).is_none());
        assert!(db
            .get_record(&athlete, &exercise, RecordKind::EstimatedOneRepMax)
            .unwrap()
            .is_none());

        // The cutoff itself is inclusive
        let events =
            RecordEvaluator::evaluate(&mut db, &entry(&athlete, &exercise, Some(10), Some(dec!(50))))
                .unwrap();
        assert!(event_value(&events, RecordKind::EstimatedOneRepMax).is_some());
    }

    #[test]
    fn test_stored_values_non_decreasing_over_entry_sequence() {
        let (mut db, athlete, exercise) = setup();
        let loads = [100u32, 80, 120, 120, 90, 125];
        let mut last = Decimal::ZERO;

        for load in loads {
            RecordEvaluator::evaluate(
                &mut db,
                &entry(&athlete, &exercise, Some(5), Some(Decimal::from(load))),
            )
            .unwrap();
            let stored = db
                .get_record(&athlete, &exercise, RecordKind::MaxLoad)
                .unwrap()
                .unwrap();
            assert!(stored.value >= last);
            last = stored.value;
        }
        assert_eq!(last, dec!(125));
    }
}
