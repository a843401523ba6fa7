//! SM-2 derived spaced-repetition scheduling for topic reviews.
//!
//! Works on percentage scores (0-100) instead of discrete ratings: the
//! score maps onto the 0-5 SuperMemo quality scale, which drives the
//! ease-factor update, while the pass threshold drives the topic streak.

use chrono::{Duration, NaiveDate};

use crate::error::{EngineError, Result};
use crate::types::TopicReviewRecord;

/// Base review intervals in days, indexed by topic streak.
const INTERVAL_LADDER: [u32; 7] = [1, 3, 7, 14, 30, 60, 90];

/// Scheduler with configurable parameters.
#[derive(Debug, Clone)]
pub struct Scheduler {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    /// Score (0-100) at or above which a review extends the topic streak.
    pub pass_score: u8,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            pass_score: 70,
        }
    }
}

impl Scheduler {
    /// State for a topic that has never been reviewed. Due immediately;
    /// the first call to [`Scheduler::schedule`] brings it onto the ladder.
    pub fn initial_record(
        &self,
        topic: &str,
        source_lecture_id: &str,
        source_lecture_title: &str,
        today: NaiveDate,
    ) -> TopicReviewRecord {
        TopicReviewRecord {
            topic: topic.to_string(),
            source_lecture_id: source_lecture_id.to_string(),
            source_lecture_title: source_lecture_title.to_string(),
            last_reviewed_on: None,
            last_score: 0,
            review_count: 0,
            ease_factor: self.initial_ease,
            interval_days: 0,
            next_due_on: today,
            streak: 0,
        }
    }

    /// Compute the record after a scored review. Pure: same inputs, same
    /// output.
    pub fn schedule(
        &self,
        record: &TopicReviewRecord,
        score: u8,
        today: NaiveDate,
    ) -> Result<TopicReviewRecord> {
        if score > 100 {
            return Err(EngineError::ScoreOutOfRange {
                value: score as u32,
            });
        }

        let quality = f64::from(score) / 20.0;
        let ease = self.next_ease(record.ease_factor, quality);
        let streak = if score >= self.pass_score {
            record.streak + 1
        } else {
            0
        };
        let interval = self.next_interval(quality, streak, ease);

        Ok(TopicReviewRecord {
            topic: record.topic.clone(),
            source_lecture_id: record.source_lecture_id.clone(),
            source_lecture_title: record.source_lecture_title.clone(),
            last_reviewed_on: Some(today),
            last_score: score,
            review_count: record.review_count + 1,
            ease_factor: ease,
            interval_days: interval,
            next_due_on: today + Duration::days(i64::from(interval)),
            streak,
        })
    }

    /// Standard SM-2 ease update on the 0-5 quality scale, floored at
    /// `minimum_ease`.
    fn next_ease(&self, ease: f64, quality: f64) -> f64 {
        let miss = 5.0 - quality;
        (ease + (0.1 - miss * (0.08 + miss * 0.02))).max(self.minimum_ease)
    }

    /// Interval selection. A failed review (quality < 3) resets to one day
    /// regardless of prior streak; early streaks use fixed intervals; from
    /// the second consecutive pass onward the ladder is scaled by ease.
    fn next_interval(&self, quality: f64, streak: u32, ease: f64) -> u32 {
        if quality < 3.0 || streak == 0 {
            return 1;
        }
        if streak == 1 {
            return 3;
        }
        let idx = (streak as usize).min(INTERVAL_LADDER.len() - 1);
        let scaled = (f64::from(INTERVAL_LADDER[idx]) * ease).round() as u32;
        scaled.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reviewed_record(ease: f64, interval: u32, streak: u32) -> TopicReviewRecord {
        TopicReviewRecord {
            topic: "mitosis".to_string(),
            source_lecture_id: "lec-1".to_string(),
            source_lecture_title: "Cell Biology".to_string(),
            last_reviewed_on: Some(date(2024, 3, 1)),
            last_score: 80,
            review_count: 3,
            ease_factor: ease,
            interval_days: interval,
            next_due_on: date(2024, 3, 8),
            streak,
        }
    }

    #[test]
    fn first_review_scoring_90() {
        let scheduler = Scheduler::default();
        let fresh = scheduler.initial_record("mitosis", "lec-1", "Cell Biology", date(2024, 3, 1));
        let next = scheduler.schedule(&fresh, 90, date(2024, 3, 1)).unwrap();

        // quality 4.5 -> ease 2.5 + 0.055
        assert!((next.ease_factor - 2.555).abs() < 1e-9);
        assert_eq!(next.streak, 1);
        assert_eq!(next.interval_days, 3);
        assert_eq!(next.next_due_on, date(2024, 3, 4));
        assert_eq!(next.review_count, 1);
        assert_eq!(next.last_score, 90);
    }

    #[test]
    fn failure_resets_interval_and_streak() {
        let scheduler = Scheduler::default();
        let record = reviewed_record(2.5, 7, 3);
        let next = scheduler.schedule(&record, 40, date(2024, 3, 8)).unwrap();

        assert_eq!(next.streak, 0);
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.next_due_on, date(2024, 3, 9));
    }

    #[test]
    fn barely_passing_quality_without_streak_stays_short() {
        // 60-69 passes the quality gate but not the streak threshold.
        let scheduler = Scheduler::default();
        let record = reviewed_record(2.5, 7, 3);
        let next = scheduler.schedule(&record, 65, date(2024, 3, 8)).unwrap();

        assert_eq!(next.streak, 0);
        assert_eq!(next.interval_days, 1);
    }

    #[test]
    fn second_pass_uses_scaled_ladder() {
        let scheduler = Scheduler::default();
        let record = reviewed_record(2.5, 3, 1);
        let next = scheduler.schedule(&record, 100, date(2024, 3, 4)).unwrap();

        // streak 2 -> ladder[2] = 7, scaled by ease 2.6 -> 18
        assert_eq!(next.streak, 2);
        assert!((next.ease_factor - 2.6).abs() < 1e-9);
        assert_eq!(next.interval_days, 18);
    }

    #[test]
    fn ladder_index_caps_at_last_rung() {
        let scheduler = Scheduler::default();
        let record = reviewed_record(2.0, 90, 11);
        let next = scheduler.schedule(&record, 80, date(2024, 6, 1)).unwrap();

        // streak 12 clamps to ladder[6] = 90 days, scaled by the new ease
        let expected = (90.0 * next.ease_factor).round() as u32;
        assert_eq!(next.interval_days, expected);
    }

    #[test]
    fn ease_never_drops_below_minimum() {
        let scheduler = Scheduler::default();
        let record = reviewed_record(1.32, 7, 2);
        let next = scheduler.schedule(&record, 0, date(2024, 3, 8)).unwrap();
        assert_eq!(next.ease_factor, scheduler.minimum_ease);
    }

    #[test]
    fn ease_strictly_increases_with_score_when_passing() {
        let scheduler = Scheduler::default();
        let record = reviewed_record(2.5, 7, 2);
        let mut previous = f64::MIN;
        for score in 60..=100 {
            let next = scheduler.schedule(&record, score, date(2024, 3, 8)).unwrap();
            assert!(next.ease_factor > previous, "score {score} did not raise ease");
            previous = next.ease_factor;
        }
    }

    #[test]
    fn interval_non_decreasing_in_streak_for_passing_scores() {
        let scheduler = Scheduler::default();
        let mut previous = 0;
        for streak in 0..10 {
            let record = reviewed_record(2.5, 7, streak);
            let next = scheduler.schedule(&record, 85, date(2024, 3, 8)).unwrap();
            assert!(next.interval_days >= previous);
            previous = next.interval_days;
        }
    }

    #[test]
    fn out_of_range_score_rejected() {
        let scheduler = Scheduler::default();
        let record = reviewed_record(2.5, 7, 2);
        let err = scheduler.schedule(&record, 101, date(2024, 3, 8)).unwrap_err();
        assert_eq!(err, EngineError::ScoreOutOfRange { value: 101 });
    }
}
