//! Progression engine for the StudyQuest study app.
//!
//! Provides:
//! - SM-2 derived spaced-repetition scheduling over per-topic review records
//! - Priority ranking of topics into a daily review quiz plan
//! - XP, level, and study-streak progression
//! - Achievement catalog and unlock evaluation
//!
//! Everything is a synchronous pure function of its inputs plus a
//! caller-supplied date: no I/O, no clock reads, no interior state. The
//! host reads per-user state, calls in, and persists what comes back.

pub mod achievements;
pub mod context;
pub mod engine;
pub mod error;
pub mod progression;
pub mod ranker;
pub mod scheduler;
pub mod types;

pub use achievements::{evaluate, AchievementDef, Category, EvaluationOutcome, Rule};
pub use context::{EvaluationContext, SessionContext};
pub use engine::{apply_confidence, apply_quiz, EngineEvent, QuizOutcome, QuizSubmission, TopicScore};
pub use error::{EngineError, Result};
pub use progression::{
    apply_xp, confidence_xp, level_for_xp, level_title, quiz_xp, record_study_day, QuizXpInput,
    XpApplied,
};
pub use ranker::{build_daily_plan, complete_plan, priority_score, rank_due, RankedTopic};
pub use scheduler::Scheduler;
pub use types::{
    AchievementState, DailyQuizPlan, PlanEntry, PowerUps, QuizAttempt, QuizKind,
    TopicReviewRecord, UserProgress,
};
