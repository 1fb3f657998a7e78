//! Habit tracking: consecutive-day streaks and weekly goals
//!
//! Driven by discrete plan-item completion events. The streak transition is
//! a pure state machine over calendar days; the weekly goal is a recount
//! over the Monday-aligned week of the event, never an increment.

use chrono::{Datelike, Duration, NaiveDate};
use thiserror::Error;
use tracing::debug;

use crate::database::{Database, DatabaseError};
use crate::models::{PlanProgress, StreakState, WeeklyGoalState};

/// Weekly goal target used when an athlete has no configured override
pub const DEFAULT_WEEKLY_TARGET: u32 = 3;

/// Habit tracking errors
#[derive(Debug, Error)]
pub enum HabitError {
    #[error("Unknown athlete: {0}")]
    UnknownAthlete(String),
    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),
}

/// How a completion event changed the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// First ever qualifying event
    Started,
    /// Event on the day after the last counted day
    Extended,
    /// Gap of more than one day; streak restarted at 1
    Reset,
    /// Same day as the last counted event, or backdated; nothing changed
    Unchanged,
}

impl StreakState {
    /// Initial state for an athlete's first qualifying event
    pub fn started(athlete_id: &str, event_date: NaiveDate) -> Self {
        Self {
            athlete_id: athlete_id.to_string(),
            current_length: 1,
            longest_length: 1,
            last_active_date: event_date,
        }
    }

    /// Apply one qualifying event dated `event_date`.
    ///
    /// Same-day events are no-ops; the exact next calendar day extends the
    /// streak; a gap resets it to 1. Backdated events (before the last
    /// counted day) are ignored rather than rewinding state.
    pub fn advance(&mut self, event_date: NaiveDate) -> StreakChange {
        let day_difference = (event_date - self.last_active_date).num_days();
        match day_difference {
            0 => StreakChange::Unchanged,
            1 => {
                self.current_length += 1;
                self.longest_length = self.longest_length.max(self.current_length);
                self.last_active_date = event_date;
                StreakChange::Extended
            }
            d if d > 1 => {
                self.current_length = 1;
                self.longest_length = self.longest_length.max(1);
                self.last_active_date = event_date;
                StreakChange::Reset
            }
            _ => StreakChange::Unchanged,
        }
    }
}

/// Monday on/before the date, and the following Sunday.
///
/// Weekly goals bucket by Monday-aligned weeks; the analytics frequency
/// series buckets by Sunday-aligned weeks. The divergence is inherited
/// behavior and deliberately not unified.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let week_start = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    (week_start, week_start + Duration::days(6))
}

/// Maintains per-athlete consecutive-day streaks
pub struct StreakTracker;

impl StreakTracker {
    /// Record a qualifying event; creates the streak on first use
    pub fn record_activity(
        db: &mut Database,
        athlete_id: &str,
        event_date: NaiveDate,
    ) -> Result<StreakState, HabitError> {
        let state = db.advance_streak(athlete_id, event_date)?;
        debug!(
            athlete_id,
            current = state.current_length,
            longest = state.longest_length,
            "Streak advanced"
        );
        Ok(state)
    }
}

/// Maintains per-athlete, per-week goal counters
pub struct WeeklyGoalTracker;

impl WeeklyGoalTracker {
    /// Record a qualifying event: get-or-create the week's goal row and
    /// recompute its actual count from the stored completions
    pub fn record_activity(
        db: &mut Database,
        athlete_id: &str,
        event_date: NaiveDate,
        default_target: u32,
    ) -> Result<WeeklyGoalState, HabitError> {
        let (week_start, week_end) = week_bounds(event_date);
        let state = db.refresh_weekly_goal(athlete_id, week_start, week_end, default_target)?;
        debug!(
            athlete_id,
            week_start = %state.week_start,
            actual = state.actual_count,
            target = state.target_count,
            "Weekly goal refreshed"
        );
        Ok(state)
    }
}

/// Result of processing one completion event
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOutcome {
    pub progress: PlanProgress,

    /// Updated streak; None when the event was an un-completion
    pub streak: Option<StreakState>,

    /// Updated weekly goal; None when the event was an un-completion
    pub weekly_goal: Option<WeeklyGoalState>,
}

/// Entry point for plan-item completion events
pub struct HabitTracker;

impl HabitTracker {
    /// Upsert the plan-item progress row and, when `completed` is true,
    /// advance the streak and refresh the weekly goal.
    ///
    /// The progress row is written before the weekly recount so the recount
    /// sees the event it is reacting to.
    pub fn record_completion(
        db: &mut Database,
        athlete_id: &str,
        plan_item_id: &str,
        completed: bool,
        event_date: NaiveDate,
        default_target: u32,
    ) -> Result<CompletionOutcome, HabitError> {
        if db.get_athlete(athlete_id)?.is_none() {
            return Err(HabitError::UnknownAthlete(athlete_id.to_string()));
        }

        let progress = db.upsert_plan_progress(athlete_id, plan_item_id, completed, event_date)?;

        if !completed {
            return Ok(CompletionOutcome {
                progress,
                streak: None,
                weekly_goal: None,
            });
        }

        let streak = StreakTracker::record_activity(db, athlete_id, event_date)?;
        let weekly_goal =
            WeeklyGoalTracker::record_activity(db, athlete_id, event_date, default_target)?;

        Ok(CompletionOutcome {
            progress,
            streak: Some(streak),
            weekly_goal: Some(weekly_goal),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    #[test]
    fn test_streak_same_day_is_noop() {
        let mut state = StreakState::started("a1", day(10));
        assert_eq!(state.advance(day(10)), StreakChange::Unchanged);
        assert_eq!(state.current_length, 1);
        assert_eq!(state.last_active_date, day(10));
    }

    #[test]
    fn test_streak_next_day_extends() {
        let mut state = StreakState::started("a1", day(10));
        assert_eq!(state.advance(day(11)), StreakChange::Extended);
        assert_eq!(state.current_length, 2);
        assert_eq!(state.longest_length, 2);
        assert_eq!(state.last_active_date, day(11));
    }

    #[test]
    fn test_streak_gap_resets_but_keeps_longest() {
        let mut state = StreakState::started("a1", day(10));
        state.advance(day(11));
        state.advance(day(12));
        assert_eq!(state.advance(day(15)), StreakChange::Reset);
        assert_eq!(state.current_length, 1);
        assert_eq!(state.longest_length, 3);
        assert_eq!(state.last_active_date, day(15));
    }

    #[test]
    fn test_streak_backdated_event_is_ignored() {
        let mut state = StreakState::started("a1", day(10));
        state.advance(day(11));
        assert_eq!(state.advance(day(9)), StreakChange::Unchanged);
        assert_eq!(state.current_length, 2);
        assert_eq!(state.last_active_date, day(11));
    }

    #[test]
    fn test_longest_never_below_current() {
        let mut state = StreakState::started("a1", day(1));
        for d in [2, 3, 4, 8, 9, 9, 10, 20, 21] {
            state.advance(day(d));
            assert!(state.longest_length >= state.current_length);
        }
        assert_eq!(state.longest_length, 4);
        assert_eq!(state.current_length, 2);
    }

    #[test]
    fn test_week_bounds_monday_aligned() {
        // 2024-09-25 is a Wednesday
        let (start, end) = week_bounds(day(25));
        assert_eq!(start, day(23));
        assert_eq!(end, day(29));

        // A Monday is its own week start
        let (start, end) = week_bounds(day(23));
        assert_eq!(start, day(23));
        assert_eq!(end, day(29));

        // A Sunday belongs to the week started the previous Monday
        let (start, _) = week_bounds(day(29));
        assert_eq!(start, day(23));
    }

    #[test]
    fn test_record_completion_end_to_end() {
        let mut db = Database::in_memory().unwrap();
        let athlete = db.add_athlete("Tester").unwrap();

        let outcome =
            HabitTracker::record_completion(&mut db, &athlete.id, "item-1", true, day(23), 2)
                .unwrap();
        assert!(outcome.progress.completed);
        assert_eq!(outcome.streak.as_ref().unwrap().current_length, 1);
        let goal = outcome.weekly_goal.unwrap();
        assert_eq!(goal.actual_count, 1);
        assert!(!goal.achieved);

        let outcome =
            HabitTracker::record_completion(&mut db, &athlete.id, "item-2", true, day(24), 2)
                .unwrap();
        assert_eq!(outcome.streak.as_ref().unwrap().current_length, 2);
        let goal = outcome.weekly_goal.unwrap();
        assert_eq!(goal.actual_count, 2);
        assert!(goal.achieved);
    }

    #[test]
    fn test_uncompletion_touches_neither_streak_nor_goal() {
        let mut db = Database::in_memory().unwrap();
        let athlete = db.add_athlete("Tester").unwrap();

        HabitTracker::record_completion(&mut db, &athlete.id, "item-1", true, day(23), 3).unwrap();
        let outcome =
            HabitTracker::record_completion(&mut db, &athlete.id, "item-1", false, day(23), 3)
                .unwrap();
        assert!(!outcome.progress.completed);
        assert!(outcome.streak.is_none());
        assert!(outcome.weekly_goal.is_none());

        // The recount self-heals on the next completion in the week
        let outcome =
            HabitTracker::record_completion(&mut db, &athlete.id, "item-2", true, day(23), 3)
                .unwrap();
        assert_eq!(outcome.weekly_goal.unwrap().actual_count, 1);
    }

    #[test]
    fn test_unknown_athlete_is_a_failure() {
        let mut db = Database::in_memory().unwrap();
        let err = HabitTracker::record_completion(&mut db, "nobody", "item-1", true, day(23), 3)
            .unwrap_err();
        assert!(matches!(err, HabitError::UnknownAthlete(_)));
    }
}
