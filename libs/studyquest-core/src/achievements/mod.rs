//! Achievement definitions and the unlock evaluator.
//!
//! Every achievement pairs static metadata with a tagged [`Rule`]
//! evaluated against the normalized [`EvaluationContext`]. The catalog in
//! [`catalog`] is the source of truth; per-user state is just
//! (unlocked, unlocked_on, progress) keyed by id.

pub mod catalog;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::context::EvaluationContext;
use crate::types::AchievementState;

/// Display grouping for an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Milestone,
    Perfection,
    Streak,
    Mastery,
    Calendar,
    Improvement,
    Social,
    Meta,
}

/// Unlock condition, evaluated against the context snapshot.
///
/// Threshold variants report the underlying signal as progress;
/// condition variants (time bands, calendar matches) report 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    QuizzesCompleted(u32),
    DailyQuizzesCompleted(u32),
    PerfectScores(u32),
    QuestionsAnswered(u32),
    LecturesUploaded(u32),
    TotalXp(u64),
    LevelReached(u32),
    StudyStreak(u32),
    LongestStudyStreak(u32),
    ConsecutivePerfects(u32),
    DailyQuizStreak(u32),
    TopicStreak(u32),
    MasteredTopics(u32),
    AllDueCleared,
    /// Hour band [start, end); wraps past midnight when start > end.
    StudyBetween { start_hour: u32, end_hour: u32 },
    StudyOnWeekend,
    DayOfMonth(u32),
    DistinctWeekdays(u32),
    ScoreImprovement(u32),
    RecoveryTo(u8),
    SocialShares(u32),
    CalendarExports(u32),
    PowerUpsUsed(u32),
    AchievementsUnlocked(u32),
}

impl Rule {
    /// Current raw signal value, before clamping to max progress.
    pub fn progress(&self, ctx: &EvaluationContext) -> u32 {
        match *self {
            Rule::QuizzesCompleted(_) => ctx.quizzes_completed,
            Rule::DailyQuizzesCompleted(_) => ctx.daily_quizzes_completed,
            Rule::PerfectScores(_) => ctx.perfect_scores,
            Rule::QuestionsAnswered(_) => ctx.questions_answered,
            Rule::LecturesUploaded(_) => ctx.lectures_uploaded,
            Rule::TotalXp(_) => ctx.total_xp.min(u64::from(u32::MAX)) as u32,
            Rule::LevelReached(_) => ctx.level,
            Rule::StudyStreak(_) => ctx.current_streak,
            Rule::LongestStudyStreak(_) => ctx.longest_streak,
            Rule::ConsecutivePerfects(_) => ctx.consecutive_perfects,
            Rule::DailyQuizStreak(_) => ctx.daily_quiz_streak,
            Rule::TopicStreak(_) => ctx.best_topic_streak,
            Rule::MasteredTopics(_) => ctx.mastered_topics,
            Rule::ScoreImprovement(_) => ctx.best_improvement,
            Rule::RecoveryTo(_) => u32::from(ctx.best_recovery),
            Rule::SocialShares(_) => ctx.social_shares,
            Rule::CalendarExports(_) => ctx.calendar_exports,
            Rule::PowerUpsUsed(_) => ctx.power_ups_used,
            Rule::AchievementsUnlocked(_) => ctx.unlocked_achievements,
            Rule::DistinctWeekdays(_) => ctx.distinct_weekdays_studied,
            Rule::AllDueCleared
            | Rule::StudyBetween { .. }
            | Rule::StudyOnWeekend
            | Rule::DayOfMonth(_) => u32::from(self.satisfied(ctx)),
        }
    }

    /// Whether the unlock condition currently holds.
    pub fn satisfied(&self, ctx: &EvaluationContext) -> bool {
        match *self {
            Rule::QuizzesCompleted(n) => ctx.quizzes_completed >= n,
            Rule::DailyQuizzesCompleted(n) => ctx.daily_quizzes_completed >= n,
            Rule::PerfectScores(n) => ctx.perfect_scores >= n,
            Rule::QuestionsAnswered(n) => ctx.questions_answered >= n,
            Rule::LecturesUploaded(n) => ctx.lectures_uploaded >= n,
            Rule::TotalXp(n) => ctx.total_xp >= n,
            Rule::LevelReached(n) => ctx.level >= n,
            Rule::StudyStreak(n) => ctx.current_streak >= n,
            Rule::LongestStudyStreak(n) => ctx.longest_streak >= n,
            Rule::ConsecutivePerfects(n) => ctx.consecutive_perfects >= n,
            Rule::DailyQuizStreak(n) => ctx.daily_quiz_streak >= n,
            Rule::TopicStreak(n) => ctx.best_topic_streak >= n,
            Rule::MasteredTopics(n) => ctx.mastered_topics >= n,
            Rule::AllDueCleared => ctx.all_due_cleared,
            // Absent wall-clock signals mean the condition is not met,
            // never an error.
            Rule::StudyBetween { start_hour, end_hour } => match ctx.hour_of_day {
                Some(hour) if start_hour <= end_hour => hour >= start_hour && hour < end_hour,
                Some(hour) => hour >= start_hour || hour < end_hour,
                None => false,
            },
            Rule::StudyOnWeekend => matches!(
                ctx.weekday,
                Some(chrono::Weekday::Sat) | Some(chrono::Weekday::Sun)
            ),
            Rule::DayOfMonth(day) => ctx.day_of_month == Some(day),
            Rule::DistinctWeekdays(n) => ctx.distinct_weekdays_studied >= n,
            Rule::ScoreImprovement(delta) => ctx.best_improvement >= delta,
            Rule::RecoveryTo(score) => ctx.best_recovery > 0 && ctx.best_recovery >= score,
            Rule::SocialShares(n) => ctx.social_shares >= n,
            Rule::CalendarExports(n) => ctx.calendar_exports >= n,
            Rule::PowerUpsUsed(n) => ctx.power_ups_used >= n,
            Rule::AchievementsUnlocked(n) => ctx.unlocked_achievements >= n,
        }
    }
}

/// Static achievement definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub xp_reward: u64,
    pub max_progress: u32,
    pub rule: Rule,
}

/// Result of one evaluation pass.
#[derive(Debug, Clone)]
pub struct EvaluationOutcome {
    /// Full updated state list: catalog order, then any stored entries
    /// with ids the catalog no longer knows, untouched.
    pub states: Vec<AchievementState>,
    pub newly_unlocked: Vec<&'static AchievementDef>,
    /// Sum of XP rewards for this pass's unlocks.
    pub xp_awarded: u64,
}

/// Evaluate every catalog achievement against the context.
///
/// Already-unlocked achievements are skipped entirely, so re-running with
/// unchanged inputs unlocks nothing and rewinds nothing. Locked
/// achievements get their progress recomputed and clamped to
/// `[0, max_progress]`; stored states with unknown ids pass through
/// unchanged. Never fails: absent signals read as zero/false.
pub fn evaluate(ctx: &EvaluationContext, states: &[AchievementState]) -> EvaluationOutcome {
    let existing: HashMap<&str, &AchievementState> =
        states.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut updated = Vec::with_capacity(catalog::CATALOG.len());
    let mut newly_unlocked = Vec::new();
    let mut xp_awarded = 0;

    for def in catalog::CATALOG {
        let state = existing
            .get(def.id)
            .map(|s| (*s).clone())
            .unwrap_or_else(|| AchievementState::locked(def.id));

        if state.unlocked {
            updated.push(state);
            continue;
        }

        let mut state = state;
        if def.rule.satisfied(ctx) {
            state.unlocked = true;
            state.unlocked_on = Some(ctx.reference_date);
            state.progress = def.max_progress;
            xp_awarded += def.xp_reward;
            tracing::debug!(id = def.id, "achievement unlocked");
            newly_unlocked.push(def);
        } else {
            state.progress = def.rule.progress(ctx).min(def.max_progress);
        }
        updated.push(state);
    }

    // Ids the catalog doesn't know are carried through untouched.
    let known: HashSet<&str> = catalog::CATALOG.iter().map(|d| d.id).collect();
    for state in states {
        if !known.contains(state.id.as_str()) {
            updated.push(state.clone());
        }
    }

    EvaluationOutcome {
        states: updated,
        newly_unlocked,
        xp_awarded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn ctx() -> EvaluationContext {
        EvaluationContext {
            reference_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            total_xp: 0,
            level: 1,
            current_streak: 0,
            longest_streak: 0,
            mastered_topics: 0,
            unlocked_achievements: 0,
            best_topic_streak: 0,
            all_due_cleared: false,
            quizzes_completed: 0,
            daily_quizzes_completed: 0,
            perfect_scores: 0,
            questions_answered: 0,
            consecutive_perfects: 0,
            best_improvement: 0,
            best_recovery: 0,
            distinct_weekdays_studied: 0,
            hour_of_day: Some(12),
            weekday: Some(chrono::Weekday::Wed),
            day_of_month: Some(10),
            lectures_uploaded: 0,
            daily_quiz_streak: 0,
            social_shares: 0,
            calendar_exports: 0,
            power_ups_used: 0,
        }
    }

    fn state_of<'a>(outcome: &'a EvaluationOutcome, id: &str) -> &'a AchievementState {
        outcome.states.iter().find(|s| s.id == id).unwrap()
    }

    #[test]
    fn week_streak_unlocks_exactly_once() {
        let mut context = ctx();
        context.current_streak = 7;

        let first = evaluate(&context, &[]);
        assert!(first.newly_unlocked.iter().any(|d| d.id == "streak_7"));
        let unlocked = state_of(&first, "streak_7");
        assert!(unlocked.unlocked);
        assert_eq!(unlocked.unlocked_on, Some(context.reference_date));
        assert_eq!(unlocked.progress, 7);

        // Re-running with a longer streak must not re-fire or rewind.
        context.current_streak = 10;
        let second = evaluate(&context, &first.states);
        assert!(second.newly_unlocked.is_empty() || second
            .newly_unlocked
            .iter()
            .all(|d| d.id != "streak_7"));
        assert_eq!(state_of(&second, "streak_7").progress, 7);
    }

    #[test]
    fn identical_inputs_unlock_nothing_the_second_time() {
        let mut context = ctx();
        context.quizzes_completed = 1;
        context.perfect_scores = 1;

        let first = evaluate(&context, &[]);
        assert!(!first.newly_unlocked.is_empty());

        let second = evaluate(&context, &first.states);
        assert!(second.newly_unlocked.is_empty());
        assert_eq!(second.xp_awarded, 0);
    }

    #[test]
    fn locked_progress_recomputes_and_clamps() {
        let mut context = ctx();
        context.quizzes_completed = 7;
        let outcome = evaluate(&context, &[]);
        assert_eq!(state_of(&outcome, "quiz_10").progress, 7);

        // Signals can move backwards while locked; progress follows.
        context.quizzes_completed = 4;
        let outcome = evaluate(&context, &outcome.states);
        assert_eq!(state_of(&outcome, "quiz_10").progress, 4);

        context.quizzes_completed = 5_000;
        let outcome = evaluate(&context, &outcome.states);
        let state = state_of(&outcome, "quiz_500");
        assert!(state.unlocked);
        assert_eq!(state.progress, 500);
    }

    #[test]
    fn unknown_ids_pass_through_untouched() {
        let stale = AchievementState {
            id: "retired_badge".to_string(),
            unlocked: true,
            unlocked_on: Some(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()),
            progress: 3,
        };
        let outcome = evaluate(&ctx(), &[stale.clone()]);
        assert_eq!(state_of(&outcome, "retired_badge"), &stale);
        assert!(outcome.newly_unlocked.is_empty());
    }

    #[test]
    fn night_owl_band_wraps_midnight() {
        let night = Rule::StudyBetween { start_hour: 23, end_hour: 4 };
        let mut context = ctx();

        context.hour_of_day = Some(23);
        assert!(night.satisfied(&context));
        context.hour_of_day = Some(2);
        assert!(night.satisfied(&context));
        context.hour_of_day = Some(4);
        assert!(!night.satisfied(&context));
        context.hour_of_day = None;
        assert!(!night.satisfied(&context));
    }

    #[test]
    fn recovery_requires_an_actual_lapse() {
        let rule = Rule::RecoveryTo(80);
        let mut context = ctx();
        assert!(!rule.satisfied(&context));
        context.best_recovery = 85;
        assert!(rule.satisfied(&context));
    }

    #[test]
    fn unlock_rewards_are_summed() {
        let mut context = ctx();
        context.quizzes_completed = 1;
        context.lectures_uploaded = 1;
        let outcome = evaluate(&context, &[]);

        let expected: u64 = outcome.newly_unlocked.iter().map(|d| d.xp_reward).sum();
        assert_eq!(outcome.xp_awarded, expected);
        assert!(expected > 0);
    }
}
