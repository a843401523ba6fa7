//! Core types for the progression engine.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Per-topic review history and scheduling state. One per (user, topic).
///
/// Created on the first scored review of a topic, updated only by the
/// scheduler, deleted only on full profile reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicReviewRecord {
    /// Human-readable topic identifier, unique within a user's scope.
    pub topic: String,
    /// Lecture that first introduced the topic (reporting only).
    pub source_lecture_id: String,
    pub source_lecture_title: String,
    pub last_reviewed_on: Option<NaiveDate>,
    /// Most recent percentage score, 0-100.
    pub last_score: u8,
    pub review_count: u32,
    /// SM-2 ease factor, never below 1.3.
    pub ease_factor: f64,
    /// Days until the next due date. 0 only before the first scored review.
    pub interval_days: u32,
    /// The record is due once today >= this date.
    pub next_due_on: NaiveDate,
    /// Consecutive reviews scoring >= 70; resets to 0 on failure.
    pub streak: u32,
}

impl TopicReviewRecord {
    /// Whether the topic is due for review on `today`.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        today >= self.next_due_on
    }

    /// Whole days past the due date; negative while not yet due.
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        (today - self.next_due_on).num_days()
    }
}

/// Consumable boosts a user can hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUps {
    pub second_chances: u32,
    pub hints: u32,
    pub double_xp_active: bool,
}

impl PowerUps {
    /// Spend one second-chance charge. Returns false if none remain.
    pub fn spend_second_chance(&mut self) -> bool {
        if self.second_chances == 0 {
            return false;
        }
        self.second_chances -= 1;
        true
    }

    /// Spend one hint charge. Returns false if none remain.
    pub fn spend_hint(&mut self) -> bool {
        if self.hints == 0 {
            return false;
        }
        self.hints -= 1;
        true
    }
}

/// Per-user mutable achievement state, joined against the static catalog
/// by id. Unlocking is monotonic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementState {
    pub id: String,
    pub unlocked: bool,
    pub unlocked_on: Option<NaiveDate>,
    pub progress: u32,
}

impl AchievementState {
    /// Fresh locked state for a catalog entry.
    pub fn locked(id: &str) -> Self {
        Self {
            id: id.to_string(),
            unlocked: false,
            unlocked_on: None,
            progress: 0,
        }
    }
}

/// A user's gamification profile.
///
/// `level` is always derivable from `total_xp`; writes go through
/// [`crate::progression::apply_xp`] so the two never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    pub level: u32,
    pub total_xp: u64,
    /// Consecutive study days, current and best-ever.
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_study_date: Option<NaiveDate>,
    /// Disjoint by construction: a topic is never in both sets.
    pub mastered_topics: BTreeSet<String>,
    pub needs_practice: BTreeSet<String>,
    pub power_ups: PowerUps,
    pub achievements: Vec<AchievementState>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            level: 1,
            total_xp: 0,
            current_streak: 0,
            longest_streak: 0,
            last_study_date: None,
            mastered_topics: BTreeSet::new(),
            needs_practice: BTreeSet::new(),
            power_ups: PowerUps::default(),
            achievements: Vec::new(),
        }
    }
}

/// Kind of quiz a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizKind {
    /// Quiz generated from a single lecture's material.
    Lecture,
    /// Cross-topic daily review quiz.
    Daily,
}

/// One completed quiz, as stored in the user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub lecture_id: String,
    pub kind: QuizKind,
    /// Percentage score, 0-100.
    pub score: u8,
    pub correct_count: u32,
    pub total_questions: u32,
    pub completed_at: DateTime<Utc>,
}

/// One entry of a generated daily quiz plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub topic: String,
    pub source_lecture_id: String,
    pub priority_score: f64,
    /// Why the topic was picked, for display ("3 days overdue", ...).
    pub reason: String,
}

/// Ephemeral plan for the next daily review quiz. At most one
/// uncompleted plan per user at a time (caller's contract).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyQuizPlan {
    pub id: Uuid,
    pub generated_on: NaiveDate,
    pub entries: Vec<PlanEntry>,
    pub completed: bool,
    pub completed_on: Option<NaiveDate>,
    pub score: Option<u8>,
}
