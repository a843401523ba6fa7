//! Topic priority ranking for the daily review quiz.
//!
//! Scores every ledger record by urgency (overdue-ness, recent weakness,
//! difficulty, unproven streak), selects the topics worth reviewing, and
//! wraps them in a [`DailyQuizPlan`] the caller persists.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::types::{DailyQuizPlan, PlanEntry, TopicReviewRecord};

/// Default number of topics in a daily quiz plan.
pub const DEFAULT_DAILY_LIMIT: usize = 10;

/// Priority below which a not-yet-due topic is left alone.
const EARLY_REVIEW_THRESHOLD: f64 = 50.0;

/// A ledger record paired with its computed urgency.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTopic {
    pub record: TopicReviewRecord,
    pub priority: f64,
    pub reason: String,
}

/// Urgency score for one record. Higher is more urgent; overdue topics
/// dominate everything else.
pub fn priority_score(record: &TopicReviewRecord, today: NaiveDate) -> f64 {
    let days_overdue = record.days_overdue(today);
    let mut score = 0.0;

    if days_overdue > 0 {
        score += 100.0 + days_overdue as f64 * 10.0;
    } else if days_overdue == 0 {
        score += 80.0;
    }
    score += (50.0 - f64::from(record.last_score) / 2.0).max(0.0);
    score += ((2.5 - record.ease_factor) * 20.0).max(0.0);
    score += ((5.0 - f64::from(record.streak)) * 5.0).max(0.0);

    score
}

/// Rank the ledger for review on `today`, highest priority first.
///
/// Includes every due record, plus not-yet-due records whose priority
/// exceeds the early-review threshold (weak topics caught before they
/// lapse). Ties keep ledger order, so repeated calls on the same
/// snapshot return the same list.
pub fn rank_due(
    ledger: &[TopicReviewRecord],
    today: NaiveDate,
    limit: usize,
) -> Vec<RankedTopic> {
    let mut ranked: Vec<RankedTopic> = ledger
        .iter()
        .filter_map(|record| {
            let priority = priority_score(record, today);
            let due = record.is_due(today);
            if !due && priority <= EARLY_REVIEW_THRESHOLD {
                return None;
            }
            Some(RankedTopic {
                reason: selection_reason(record, today, due),
                record: record.clone(),
                priority,
            })
        })
        .collect();

    // Stable sort keeps insertion order on equal priorities.
    ranked.sort_by(|a, b| {
        b.priority
            .partial_cmp(&a.priority)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}

/// Build the next daily quiz plan from the ledger.
pub fn build_daily_plan(
    ledger: &[TopicReviewRecord],
    today: NaiveDate,
    limit: usize,
) -> DailyQuizPlan {
    let entries = rank_due(ledger, today, limit)
        .into_iter()
        .map(|ranked| PlanEntry {
            topic: ranked.record.topic,
            source_lecture_id: ranked.record.source_lecture_id,
            priority_score: ranked.priority,
            reason: ranked.reason,
        })
        .collect();

    DailyQuizPlan {
        id: Uuid::new_v4(),
        generated_on: today,
        entries,
        completed: false,
        completed_on: None,
        score: None,
    }
}

/// Finalize a plan with its quiz score. Completing an already-completed
/// plan is a no-op; the first completion wins.
pub fn complete_plan(plan: &DailyQuizPlan, score: u8, today: NaiveDate) -> DailyQuizPlan {
    if plan.completed {
        return plan.clone();
    }
    DailyQuizPlan {
        completed: true,
        completed_on: Some(today),
        score: Some(score.min(100)),
        ..plan.clone()
    }
}

fn selection_reason(record: &TopicReviewRecord, today: NaiveDate, due: bool) -> String {
    let days_overdue = record.days_overdue(today);
    if days_overdue > 0 {
        let unit = if days_overdue == 1 { "day" } else { "days" };
        return format!("{days_overdue} {unit} overdue");
    }
    if due {
        return "due today".to_string();
    }
    if record.last_score < 70 {
        return "recent score was weak".to_string();
    }
    "needs reinforcement".to_string()
}
