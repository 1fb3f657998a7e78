use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use liftrs::database::Database;
use liftrs::metrics::estimated_one_rep_max;
use liftrs::models::{MuscleGroup, RecordKind, SetEntry};
use liftrs::records::RecordEvaluator;

/// Property tests for the record engine invariants

fn seeded_db() -> (Database, String, String) {
    let mut db = Database::in_memory().unwrap();
    let athlete = db.add_athlete("Prop Athlete").unwrap();
    let exercise = db.add_exercise("Deadlift", &[MuscleGroup::Back]).unwrap();
    (db, athlete.id, exercise.id)
}

fn entry(athlete_id: &str, exercise_id: &str, reps: u32, load: Decimal) -> SetEntry {
    SetEntry {
        id: Uuid::new_v4().to_string(),
        workout_id: "w".to_string(),
        athlete_id: athlete_id.to_string(),
        exercise_id: exercise_id.to_string(),
        reps: Some(reps),
        load_kg: Some(load),
        recorded_at: Utc::now(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn one_rep_max_is_identity_at_single_rep(load in 1u32..1000) {
        let load = Decimal::from(load);
        prop_assert_eq!(estimated_one_rep_max(load, 1), load);
    }

    #[test]
    fn one_rep_max_never_below_load_in_trusted_range(load in 1u32..1000, reps in 1u32..=10) {
        let load = Decimal::from(load);
        prop_assert!(estimated_one_rep_max(load, reps) >= load);
    }

    #[test]
    fn stored_records_are_non_decreasing(
        sets in prop::collection::vec((1u32..=15, 1u32..500), 1..25)
    ) {
        let (mut db, athlete_id, exercise_id) = seeded_db();
        let mut last_seen: Option<Decimal> = None;

        for (reps, load) in sets {
            RecordEvaluator::evaluate(
                &mut db,
                &entry(&athlete_id, &exercise_id, reps, Decimal::from(load)),
            )
            .unwrap();

            let stored = db
                .get_record(&athlete_id, &exercise_id, RecordKind::MaxLoad)
                .unwrap()
                .unwrap()
                .value;
            if let Some(previous) = last_seen {
                prop_assert!(stored >= previous);
            }
            last_seen = Some(stored);
        }
    }

    #[test]
    fn events_report_the_exact_previous_value(
        loads in prop::collection::vec(1u32..500, 2..20)
    ) {
        let (mut db, athlete_id, exercise_id) = seeded_db();
        let mut current: Option<Decimal> = None;

        for load in loads {
            let events = RecordEvaluator::evaluate(
                &mut db,
                &entry(&athlete_id, &exercise_id, 5, Decimal::from(load)),
            )
            .unwrap();

            if let Some(event) = events.iter().find(|e| e.kind == RecordKind::MaxLoad) {
                prop_assert_eq!(event.previous_value, current);
                current = Some(event.new_value);
            } else if let Some(best) = current {
                // No event means the candidate did not strictly beat the best
                prop_assert!(Decimal::from(load) <= best);
            }
        }
    }

    #[test]
    fn high_rep_sets_never_touch_the_estimate(reps in 11u32..30, load in 1u32..500) {
        let (mut db, athlete_id, exercise_id) = seeded_db();
        let events = RecordEvaluator::evaluate(
            &mut db,
            &entry(&athlete_id, &exercise_id, reps, Decimal::from(load)),
        )
        .unwrap();

        prop_assert!(events.iter().all(|e| e.kind != RecordKind::EstimatedOneRepMax));
        prop_assert!(db
            .get_record(&athlete_id, &exercise_id, RecordKind::EstimatedOneRepMax)
            .unwrap()
            .is_none());
    }
}
