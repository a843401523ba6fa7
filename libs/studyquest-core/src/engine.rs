//! Quiz-submission orchestration.
//!
//! One pure entry point per user action: the caller reads the user's
//! state, hands it in, and persists whatever comes back. Nothing in here
//! reads the clock or touches storage.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::achievements;
use crate::context::{EvaluationContext, SessionContext};
use crate::error::Result;
use crate::progression::{self, QuizXpInput, XpApplied};
use crate::scheduler::Scheduler;
use crate::types::{QuizAttempt, QuizKind, TopicReviewRecord, UserProgress};

/// Score at or above which a streaky topic counts as mastered.
const MASTERY_SCORE: u8 = 85;
/// Topic streak required alongside the score for mastery.
const MASTERY_STREAK: u32 = 2;
/// Score below which a topic needs practice.
const PRACTICE_SCORE: u8 = 60;
/// A mastered topic scoring below this is demoted.
const DEMOTION_SCORE: u8 = 70;

/// Per-topic score inside a quiz submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicScore {
    pub topic: String,
    /// Percentage score for this topic's questions, 0-100.
    pub score: u8,
}

/// Everything the caller knows about one finished quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSubmission {
    pub lecture_id: String,
    pub lecture_title: String,
    pub kind: QuizKind,
    pub topic_scores: Vec<TopicScore>,
    pub correct_count: u32,
    pub total_questions: u32,
    /// Self-reported confidence, 0-5.
    pub confidence_rating: Option<u8>,
    /// Accuracy beat the previous attempt on the same material.
    pub is_improvement: bool,
    pub completed_at: DateTime<Utc>,
}

/// Notable transitions produced by a state update, in the order they
/// happened. For the host's celebratory UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum EngineEvent {
    LevelUp { from: u32, to: u32 },
    AchievementUnlocked { id: String },
}

/// The persistable result of a quiz submission.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizOutcome {
    pub profile: UserProgress,
    /// Records created or updated by this quiz; untouched ledger entries
    /// are not repeated here.
    pub records: Vec<TopicReviewRecord>,
    /// History entry to append.
    pub attempt: QuizAttempt,
    /// Quiz XP plus any achievement rewards.
    pub xp_awarded: u64,
    pub events: Vec<EngineEvent>,
}

/// Apply a completed quiz: XP and streak first, then per-topic
/// scheduling, then the achievement pass over the updated snapshot.
pub fn apply_quiz(
    scheduler: &Scheduler,
    profile: &UserProgress,
    ledger: &[TopicReviewRecord],
    history: &[QuizAttempt],
    submission: &QuizSubmission,
    session: &SessionContext,
    today: NaiveDate,
) -> Result<QuizOutcome> {
    let mut profile = profile.clone();
    let mut events = Vec::new();

    // Today's quiz counts toward today's streak before the XP formula
    // reads it.
    progression::record_study_day(&mut profile, today);

    let double_xp = profile.power_ups.double_xp_active;
    let quiz_xp = progression::quiz_xp(&QuizXpInput {
        correct_count: submission.correct_count,
        total_questions: submission.total_questions,
        confidence_rating: submission.confidence_rating,
        is_improvement: submission.is_improvement,
        current_streak: profile.current_streak,
        double_xp_active: double_xp,
    })?;
    if double_xp {
        // The charge is consumed by this award.
        profile.power_ups.double_xp_active = false;
    }
    push_level_event(&mut events, progression::apply_xp(&mut profile, quiz_xp));

    let mut touched = Vec::with_capacity(submission.topic_scores.len());
    for topic_score in &submission.topic_scores {
        let existing = ledger.iter().find(|r| r.topic == topic_score.topic);
        let base = match existing {
            Some(record) => record.clone(),
            None => scheduler.initial_record(
                &topic_score.topic,
                &submission.lecture_id,
                &submission.lecture_title,
                today,
            ),
        };
        let updated = scheduler.schedule(&base, topic_score.score, today)?;
        update_mastery_sets(&mut profile, &updated);
        touched.push(updated);
    }

    let overall_score = percentage(submission.correct_count, submission.total_questions);
    let attempt = QuizAttempt {
        lecture_id: submission.lecture_id.clone(),
        kind: submission.kind,
        score: overall_score,
        correct_count: submission.correct_count,
        total_questions: submission.total_questions,
        completed_at: submission.completed_at,
    };

    // Achievement pass sees the post-quiz snapshot.
    let merged_ledger = merge_ledger(ledger, &touched);
    let mut full_history = history.to_vec();
    full_history.push(attempt.clone());
    let ctx = EvaluationContext::build(&profile, &merged_ledger, &full_history, session, today);
    let outcome = achievements::evaluate(&ctx, &profile.achievements);
    profile.achievements = outcome.states;
    for def in &outcome.newly_unlocked {
        events.push(EngineEvent::AchievementUnlocked {
            id: def.id.to_string(),
        });
    }
    if outcome.xp_awarded > 0 {
        push_level_event(
            &mut events,
            progression::apply_xp(&mut profile, outcome.xp_awarded),
        );
    }

    Ok(QuizOutcome {
        profile,
        records: touched,
        attempt,
        xp_awarded: quiz_xp + outcome.xp_awarded,
        events,
    })
}

/// Apply a standalone confidence-rating submission (`rating x 5` XP,
/// decoupled from quiz scoring).
pub fn apply_confidence(profile: &UserProgress, rating: u8) -> (UserProgress, XpApplied) {
    let mut profile = profile.clone();
    let applied = progression::apply_xp(&mut profile, progression::confidence_xp(rating));
    (profile, applied)
}

fn push_level_event(events: &mut Vec<EngineEvent>, applied: XpApplied) {
    if applied.leveled_up() {
        events.push(EngineEvent::LevelUp {
            from: applied.old_level,
            to: applied.new_level,
        });
    }
}

/// Move a topic between the mastered and needs-practice sets. The sets
/// stay disjoint on every transition.
fn update_mastery_sets(profile: &mut UserProgress, record: &TopicReviewRecord) {
    let topic = &record.topic;
    if record.last_score >= MASTERY_SCORE && record.streak >= MASTERY_STREAK {
        profile.needs_practice.remove(topic);
        profile.mastered_topics.insert(topic.clone());
    } else if record.last_score < PRACTICE_SCORE {
        profile.mastered_topics.remove(topic);
        profile.needs_practice.insert(topic.clone());
    } else if record.last_score < DEMOTION_SCORE {
        profile.mastered_topics.remove(topic);
    }
}

fn merge_ledger(
    ledger: &[TopicReviewRecord],
    touched: &[TopicReviewRecord],
) -> Vec<TopicReviewRecord> {
    let mut merged: Vec<TopicReviewRecord> = ledger
        .iter()
        .filter(|r| touched.iter().all(|t| t.topic != r.topic))
        .cloned()
        .collect();
    merged.extend(touched.iter().cloned());
    merged
}

fn percentage(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    ((f64::from(correct) / f64::from(total)) * 100.0).round() as u8
}
