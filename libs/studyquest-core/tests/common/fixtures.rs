//! Factory functions for engine test data.

use chrono::NaiveDate;

use studyquest_core::{QuizKind, QuizSubmission, TopicReviewRecord, TopicScore};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A lecture-quiz submission with one score per topic.
pub fn lecture_submission(
    lecture_id: &str,
    correct: u32,
    total: u32,
    topics: &[(&str, u8)],
    on: NaiveDate,
) -> QuizSubmission {
    QuizSubmission {
        lecture_id: lecture_id.to_string(),
        lecture_title: format!("Lecture {lecture_id}"),
        kind: QuizKind::Lecture,
        topic_scores: topics
            .iter()
            .map(|(topic, score)| TopicScore {
                topic: topic.to_string(),
                score: *score,
            })
            .collect(),
        correct_count: correct,
        total_questions: total,
        confidence_rating: None,
        is_improvement: false,
        completed_at: on.and_hms_opt(14, 0, 0).unwrap().and_utc(),
    }
}

/// A ledger record in a given scheduling state.
pub fn review_record(
    topic: &str,
    last_score: u8,
    ease: f64,
    interval: u32,
    streak: u32,
    next_due: NaiveDate,
) -> TopicReviewRecord {
    TopicReviewRecord {
        topic: topic.to_string(),
        source_lecture_id: "lec-1".to_string(),
        source_lecture_title: "Lecture lec-1".to_string(),
        last_reviewed_on: None,
        last_score,
        review_count: streak,
        ease_factor: ease,
        interval_days: interval,
        next_due_on: next_due,
        streak,
    }
}
