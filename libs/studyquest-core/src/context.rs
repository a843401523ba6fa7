//! Evaluation context for the achievement pass.
//!
//! [`SessionContext`] carries the facts the engine cannot derive itself
//! (wall-clock position, social/calendar activity, power-up usage). Every
//! field defaults to zero or absent, so hosts without those signals wired
//! up just omit them. [`EvaluationContext`] is the normalized snapshot the
//! achievement rules actually read, built from profile + ledger + history
//! + session in one place.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::{QuizAttempt, QuizKind, TopicReviewRecord, UserProgress};

/// Session facts supplied by the caller. Calendar fields are optional:
/// a host that doesn't know the wall-clock position omits them and the
/// time-of-day achievement conditions simply never hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionContext {
    /// Local hour of day, 0-23.
    pub hour_of_day: Option<u32>,
    pub weekday: Option<Weekday>,
    /// Calendar day of month, 1-31.
    pub day_of_month: Option<u32>,
    pub lectures_uploaded: u32,
    /// Consecutive days with a completed daily quiz, tracked by the host.
    pub daily_quiz_streak: u32,
    pub social_shares: u32,
    pub calendar_exports: u32,
    pub power_ups_used: u32,
}

/// Normalized snapshot the achievement rules evaluate against.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationContext {
    pub reference_date: NaiveDate,

    // Profile
    pub total_xp: u64,
    pub level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub mastered_topics: u32,
    pub unlocked_achievements: u32,

    // Ledger
    pub best_topic_streak: u32,
    pub all_due_cleared: bool,

    // History (chronological)
    pub quizzes_completed: u32,
    pub daily_quizzes_completed: u32,
    pub perfect_scores: u32,
    pub questions_answered: u32,
    pub consecutive_perfects: u32,
    /// Largest score gain between consecutive attempts on one lecture.
    pub best_improvement: u32,
    /// Best score achieved on the attempt right after a sub-50 one.
    pub best_recovery: u8,
    pub distinct_weekdays_studied: u32,

    // Session
    pub hour_of_day: Option<u32>,
    pub weekday: Option<Weekday>,
    pub day_of_month: Option<u32>,
    pub lectures_uploaded: u32,
    pub daily_quiz_streak: u32,
    pub social_shares: u32,
    pub calendar_exports: u32,
    pub power_ups_used: u32,
}

impl EvaluationContext {
    /// Normalize the full per-user snapshot.
    ///
    /// History is explicitly sorted by completion timestamp before any
    /// adjacency comparison, so a persistence layer that reorders entries
    /// cannot degrade the improvement/recovery signals.
    pub fn build(
        profile: &UserProgress,
        ledger: &[TopicReviewRecord],
        history: &[QuizAttempt],
        session: &SessionContext,
        today: NaiveDate,
    ) -> Self {
        let mut chronological: Vec<&QuizAttempt> = history.iter().collect();
        chronological.sort_by_key(|attempt| attempt.completed_at);

        let perfect_scores = chronological
            .iter()
            .filter(|a| a.total_questions > 0 && a.correct_count == a.total_questions)
            .count() as u32;

        let consecutive_perfects = chronological
            .iter()
            .rev()
            .take_while(|a| a.total_questions > 0 && a.correct_count == a.total_questions)
            .count() as u32;

        let (best_improvement, best_recovery) = improvement_signals(&chronological);

        let distinct_weekdays_studied = chronological
            .iter()
            .map(|a| a.completed_at.date_naive().weekday().num_days_from_monday())
            .collect::<BTreeSet<_>>()
            .len() as u32;

        Self {
            reference_date: today,
            total_xp: profile.total_xp,
            level: profile.level,
            current_streak: profile.current_streak,
            longest_streak: profile.longest_streak,
            mastered_topics: profile.mastered_topics.len() as u32,
            unlocked_achievements: profile
                .achievements
                .iter()
                .filter(|a| a.unlocked)
                .count() as u32,
            best_topic_streak: ledger.iter().map(|r| r.streak).max().unwrap_or(0),
            all_due_cleared: !ledger.is_empty() && ledger.iter().all(|r| !r.is_due(today)),
            quizzes_completed: chronological.len() as u32,
            daily_quizzes_completed: chronological
                .iter()
                .filter(|a| a.kind == QuizKind::Daily)
                .count() as u32,
            perfect_scores,
            questions_answered: chronological.iter().map(|a| a.total_questions).sum(),
            consecutive_perfects,
            best_improvement,
            best_recovery,
            distinct_weekdays_studied,
            hour_of_day: session.hour_of_day,
            weekday: session.weekday,
            day_of_month: session.day_of_month,
            lectures_uploaded: session.lectures_uploaded,
            daily_quiz_streak: session.daily_quiz_streak,
            social_shares: session.social_shares,
            calendar_exports: session.calendar_exports,
            power_ups_used: session.power_ups_used,
        }
    }
}

/// Walk consecutive attempts per lecture: the biggest score gain, and the
/// best score that directly followed a sub-50 attempt.
fn improvement_signals(chronological: &[&QuizAttempt]) -> (u32, u8) {
    let mut best_improvement = 0u32;
    let mut best_recovery = 0u8;

    let lectures: BTreeSet<&str> = chronological
        .iter()
        .map(|a| a.lecture_id.as_str())
        .collect();

    for lecture in lectures {
        let attempts: Vec<&&QuizAttempt> = chronological
            .iter()
            .filter(|a| a.lecture_id == lecture)
            .collect();
        for pair in attempts.windows(2) {
            let (previous, current) = (pair[0], pair[1]);
            if current.score > previous.score {
                best_improvement = best_improvement.max(u32::from(current.score - previous.score));
            }
            if previous.score < 50 {
                best_recovery = best_recovery.max(current.score);
            }
        }
    }

    (best_improvement, best_recovery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn attempt(lecture: &str, score: u8, correct: u32, total: u32, day: u32, hour: u32) -> QuizAttempt {
        QuizAttempt {
            lecture_id: lecture.to_string(),
            kind: QuizKind::Lecture,
            score,
            correct_count: correct,
            total_questions: total,
            completed_at: Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn session_context_defaults_to_absent_signals() {
        let session = SessionContext::default();
        assert_eq!(session.social_shares, 0);
        assert_eq!(session.calendar_exports, 0);
        assert_eq!(session.weekday, None);
        assert_eq!(session.hour_of_day, None);
    }

    #[test]
    fn session_context_deserializes_sparse_json() {
        // Hosts send only the fields they have.
        let session: SessionContext =
            serde_json::from_str(r#"{"hour_of_day": 6, "social_shares": 2}"#).unwrap();
        assert_eq!(session.hour_of_day, Some(6));
        assert_eq!(session.social_shares, 2);
        assert_eq!(session.weekday, None);
        assert_eq!(session.power_ups_used, 0);
    }

    #[test]
    fn history_is_sorted_before_adjacency_comparison() {
        // Stored out of order: the 35 -> 90 recovery only shows up after
        // sorting by timestamp.
        let history = vec![
            attempt("lec-1", 90, 9, 10, 2, 9),
            attempt("lec-1", 35, 3, 10, 1, 9),
        ];
        let ctx = EvaluationContext::build(
            &UserProgress::default(),
            &[],
            &history,
            &SessionContext::default(),
            date(2024, 3, 3),
        );
        assert_eq!(ctx.best_improvement, 55);
        assert_eq!(ctx.best_recovery, 90);
    }

    #[test]
    fn improvement_ignores_other_lectures() {
        let history = vec![
            attempt("lec-1", 40, 4, 10, 1, 9),
            attempt("lec-2", 100, 10, 10, 2, 9),
            attempt("lec-1", 60, 6, 10, 3, 9),
        ];
        let ctx = EvaluationContext::build(
            &UserProgress::default(),
            &[],
            &history,
            &SessionContext::default(),
            date(2024, 3, 4),
        );
        assert_eq!(ctx.best_improvement, 20);
        assert_eq!(ctx.best_recovery, 60);
    }

    #[test]
    fn trailing_perfects_counted_from_the_end() {
        let history = vec![
            attempt("lec-1", 100, 10, 10, 1, 9),
            attempt("lec-1", 70, 7, 10, 2, 9),
            attempt("lec-1", 100, 10, 10, 3, 9),
            attempt("lec-2", 100, 5, 5, 4, 9),
        ];
        let ctx = EvaluationContext::build(
            &UserProgress::default(),
            &[],
            &history,
            &SessionContext::default(),
            date(2024, 3, 5),
        );
        assert_eq!(ctx.perfect_scores, 3);
        assert_eq!(ctx.consecutive_perfects, 2);
        assert_eq!(ctx.questions_answered, 35);
        assert_eq!(ctx.distinct_weekdays_studied, 4);
    }

    #[test]
    fn due_cleared_requires_a_nonempty_ledger() {
        let today = date(2024, 3, 10);
        let ctx = EvaluationContext::build(
            &UserProgress::default(),
            &[],
            &[],
            &SessionContext::default(),
            today,
        );
        assert!(!ctx.all_due_cleared);

        let record = TopicReviewRecord {
            topic: "osmosis".to_string(),
            source_lecture_id: "lec-1".to_string(),
            source_lecture_title: "Cell Biology".to_string(),
            last_reviewed_on: Some(today),
            last_score: 90,
            review_count: 1,
            ease_factor: 2.5,
            interval_days: 3,
            next_due_on: date(2024, 3, 13),
            streak: 1,
        };
        let ctx = EvaluationContext::build(
            &UserProgress::default(),
            &[record],
            &[],
            &SessionContext::default(),
            today,
        );
        assert!(ctx.all_due_cleared);
        assert_eq!(ctx.best_topic_streak, 1);
    }
}
