//! XP, levels, and study-day streaks.
//!
//! `level` is a pure function of `total_xp`; every write path goes
//! through [`apply_xp`] so a stored level can never drift from its
//! derivation.

use chrono::{Duration, NaiveDate};

use crate::error::{EngineError, Result};
use crate::types::UserProgress;

/// XP needed to hold level `L` is `L^2 * 100`.
const XP_PER_LEVEL_STEP: u64 = 100;

/// Multiplier tiers for long study streaks.
const STREAK_DOUBLE_AT: u32 = 30;
const STREAK_BOOST_AT: u32 = 7;

/// Derive the level for a total XP amount. Never below 1.
pub fn level_for_xp(total_xp: u64) -> u32 {
    let level = ((total_xp / XP_PER_LEVEL_STEP) as f64).sqrt().floor() as u32;
    level.max(1)
}

/// Total XP required to hold `level`.
pub fn xp_threshold(level: u32) -> u64 {
    u64::from(level) * u64::from(level) * XP_PER_LEVEL_STEP
}

/// XP accumulated past the current level's threshold.
pub fn xp_into_level(total_xp: u64) -> u64 {
    total_xp - xp_threshold(level_for_xp(total_xp))
}

/// XP still needed to reach the next level.
pub fn xp_for_next_level(total_xp: u64) -> u64 {
    xp_threshold(level_for_xp(total_xp) + 1) - total_xp
}

/// Display rank for a level.
pub fn level_title(level: u32) -> &'static str {
    match level {
        0..=2 => "Novice",
        3..=5 => "Apprentice",
        6..=9 => "Scholar",
        10..=14 => "Adept",
        15..=19 => "Expert",
        20..=29 => "Master",
        _ => "Grandmaster",
    }
}

/// Inputs to the quiz XP formula.
#[derive(Debug, Clone, Default)]
pub struct QuizXpInput {
    pub correct_count: u32,
    pub total_questions: u32,
    /// Self-reported confidence, 0-5. Values above 5 clamp down.
    pub confidence_rating: Option<u8>,
    /// Current accuracy beat the previous attempt on the same material.
    pub is_improvement: bool,
    /// Consecutive study days at submission time.
    pub current_streak: u32,
    pub double_xp_active: bool,
}

/// XP award for a completed quiz.
///
/// Additive bonuses first, then the streak multiplier, then double-XP:
/// the multipliers apply sequentially to the running total.
pub fn quiz_xp(input: &QuizXpInput) -> Result<u64> {
    if input.total_questions == 0 {
        return Err(EngineError::EmptyQuiz);
    }
    if input.correct_count > input.total_questions {
        return Err(EngineError::ImpossibleQuizResult {
            correct: input.correct_count,
            total: input.total_questions,
        });
    }

    let is_perfect = input.correct_count == input.total_questions;
    let confidence = u32::from(input.confidence_rating.unwrap_or(0).min(5));

    let mut xp = 50.0
        + f64::from(input.correct_count) * 10.0
        + if is_perfect { 50.0 } else { 0.0 }
        + f64::from(confidence) * 5.0
        + if input.is_improvement { 20.0 } else { 0.0 }
        + f64::from(input.current_streak) * 5.0;

    if input.current_streak >= STREAK_DOUBLE_AT {
        xp *= 2.0;
    } else if input.current_streak >= STREAK_BOOST_AT {
        xp *= 1.5;
    }
    if input.double_xp_active {
        xp *= 2.0;
    }

    Ok(xp.floor() as u64)
}

/// XP for submitting a confidence rating, decoupled from quiz scoring.
pub fn confidence_xp(rating: u8) -> u64 {
    u64::from(rating.min(5)) * 5
}

/// Result of adding XP to a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpApplied {
    pub total_xp: u64,
    pub old_level: u32,
    pub new_level: u32,
}

impl XpApplied {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.old_level
    }

    pub fn levels_gained(&self) -> u32 {
        self.new_level - self.old_level
    }
}

/// Add XP and re-derive the level. The only sanctioned way to change
/// `total_xp`.
pub fn apply_xp(progress: &mut UserProgress, amount: u64) -> XpApplied {
    let old_level = level_for_xp(progress.total_xp);
    progress.total_xp += amount;
    progress.level = level_for_xp(progress.total_xp);
    if progress.level > old_level {
        tracing::debug!(from = old_level, to = progress.level, "level up");
    }
    XpApplied {
        total_xp: progress.total_xp,
        old_level,
        new_level: progress.level,
    }
}

/// Record a study day and maintain the consecutive-day streak.
///
/// Same day twice is a no-op; exactly one day after the last study day
/// extends the streak; any larger gap restarts it at 1. The longest
/// streak is raised in the same update.
pub fn record_study_day(progress: &mut UserProgress, today: NaiveDate) {
    match progress.last_study_date {
        Some(last) if last == today => return,
        Some(last) if today - last == Duration::days(1) => {
            progress.current_streak += 1;
        }
        _ => progress.current_streak = 1,
    }
    progress.longest_streak = progress.longest_streak.max(progress.current_streak);
    progress.last_study_date = Some(today);
}

/// The study date a wall-clock moment belongs to. Before the daily reset
/// hour, the study day is still "yesterday", so late-night sessions count
/// toward the day the user stayed up through.
pub fn adjusted_study_date(today: NaiveDate, current_hour: u32, daily_reset_hour: u32) -> NaiveDate {
    if current_hour < daily_reset_hour {
        today - Duration::days(1)
    } else {
        today
    }
}
