use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use uuid::Uuid;

use liftrs::analytics::build_report;
use liftrs::database::Database;
use liftrs::models::{Exercise, MuscleGroup, SetEntry, Workout};
use liftrs::records::RecordEvaluator;

fn bench_record_evaluation(c: &mut Criterion) {
    let mut db = Database::in_memory().unwrap();
    let athlete = db.add_athlete("Bench Athlete").unwrap();
    let exercise = db
        .add_exercise("Bench Press", &[MuscleGroup::Chest])
        .unwrap();

    let entries: Vec<SetEntry> = (0..200u32)
        .map(|i| SetEntry {
            id: Uuid::new_v4().to_string(),
            workout_id: "w".to_string(),
            athlete_id: athlete.id.clone(),
            exercise_id: exercise.id.clone(),
            reps: Some(1 + i % 10),
            load_kg: Some(Decimal::from(60 + (i * 7) % 80)),
            recorded_at: Utc::now(),
        })
        .collect();

    c.bench_function("record_evaluate_200_entries", |b| {
        b.iter(|| {
            for entry in &entries {
                let events = RecordEvaluator::evaluate(&mut db, black_box(entry)).unwrap();
                black_box(events);
            }
        })
    });
}

fn bench_report_aggregation(c: &mut Criterion) {
    let exercises: Vec<Exercise> = [
        ("bench", "Bench Press", vec![MuscleGroup::Chest, MuscleGroup::Triceps]),
        ("squat", "Squat", vec![MuscleGroup::Quads, MuscleGroup::Glutes]),
        ("row", "Barbell Row", vec![MuscleGroup::Back, MuscleGroup::Biceps]),
    ]
    .into_iter()
    .map(|(id, name, muscle_groups)| Exercise {
        id: id.to_string(),
        name: name.to_string(),
        muscle_groups,
    })
    .collect();

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let workouts: Vec<Workout> = (0..365u32)
        .map(|day| {
            let completed_at = (start + Duration::days(day as i64))
                .and_time(NaiveTime::MIN)
                .and_utc();
            let entries = (0..12u32)
                .map(|i| SetEntry {
                    id: format!("w{}-s{}", day, i),
                    workout_id: format!("w{}", day),
                    athlete_id: "a1".to_string(),
                    exercise_id: exercises[(i % 3) as usize].id.clone(),
                    reps: Some(3 + i % 8),
                    load_kg: Some(Decimal::from(50 + (day + i * 5) % 100)),
                    recorded_at: completed_at,
                })
                .collect();
            Workout {
                id: format!("w{}", day),
                athlete_id: "a1".to_string(),
                completed_at,
                duration_seconds: Some(3000 + day * 3),
                label: None,
                notes: None,
                entries,
            }
        })
        .collect();

    let window_start = start.and_time(NaiveTime::MIN).and_utc();

    c.bench_function("build_report_365_workouts", |b| {
        b.iter(|| {
            let report = build_report(
                black_box("a1"),
                black_box(&workouts),
                black_box(&exercises),
                &[],
                365,
                window_start,
            );
            black_box(report)
        })
    });
}

criterion_group!(benches, bench_record_evaluation, bench_report_aggregation);
criterion_main!(benches);
