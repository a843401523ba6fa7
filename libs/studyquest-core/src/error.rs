//! Error types for studyquest-core.

use thiserror::Error;

/// Result type alias using EngineError.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Invalid-input errors. The engine performs no I/O, so this is the
/// whole taxonomy; expected absences (missing context fields) are
/// defaults, not errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("score {value} out of range 0-100")]
    ScoreOutOfRange { value: u32 },

    #[error("quiz reports {correct} correct answers out of {total} questions")]
    ImpossibleQuizResult { correct: u32, total: u32 },

    #[error("quiz has no questions")]
    EmptyQuiz,
}
