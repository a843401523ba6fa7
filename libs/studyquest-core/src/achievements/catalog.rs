//! The static achievement catalog.
//!
//! Definitions are immutable and loaded once; per-user state references
//! them by id. Ids are stable across versions — renaming one orphans the
//! stored state (which the evaluator then carries through untouched).

use super::{AchievementDef, Category, Rule};

/// Every achievement the app ships with.
pub static CATALOG: &[AchievementDef] = &[
    // Milestones
    AchievementDef {
        id: "first_quiz",
        name: "First Steps",
        description: "Complete your first quiz.",
        category: Category::Milestone,
        xp_reward: 25,
        max_progress: 1,
        rule: Rule::QuizzesCompleted(1),
    },
    AchievementDef {
        id: "quiz_10",
        name: "Getting the Hang of It",
        description: "Complete 10 quizzes.",
        category: Category::Milestone,
        xp_reward: 50,
        max_progress: 10,
        rule: Rule::QuizzesCompleted(10),
    },
    AchievementDef {
        id: "quiz_50",
        name: "Quiz Enthusiast",
        description: "Complete 50 quizzes.",
        category: Category::Milestone,
        xp_reward: 150,
        max_progress: 50,
        rule: Rule::QuizzesCompleted(50),
    },
    AchievementDef {
        id: "quiz_100",
        name: "Century",
        description: "Complete 100 quizzes.",
        category: Category::Milestone,
        xp_reward: 300,
        max_progress: 100,
        rule: Rule::QuizzesCompleted(100),
    },
    AchievementDef {
        id: "quiz_500",
        name: "Quiz Machine",
        description: "Complete 500 quizzes.",
        category: Category::Milestone,
        xp_reward: 1000,
        max_progress: 500,
        rule: Rule::QuizzesCompleted(500),
    },
    AchievementDef {
        id: "first_lecture",
        name: "Curious Mind",
        description: "Upload your first lecture.",
        category: Category::Milestone,
        xp_reward: 25,
        max_progress: 1,
        rule: Rule::LecturesUploaded(1),
    },
    AchievementDef {
        id: "lectures_10",
        name: "Collector",
        description: "Upload 10 lectures.",
        category: Category::Milestone,
        xp_reward: 100,
        max_progress: 10,
        rule: Rule::LecturesUploaded(10),
    },
    AchievementDef {
        id: "lectures_25",
        name: "Librarian",
        description: "Upload 25 lectures.",
        category: Category::Milestone,
        xp_reward: 250,
        max_progress: 25,
        rule: Rule::LecturesUploaded(25),
    },
    AchievementDef {
        id: "questions_100",
        name: "Hundred Answers",
        description: "Answer 100 quiz questions.",
        category: Category::Milestone,
        xp_reward: 75,
        max_progress: 100,
        rule: Rule::QuestionsAnswered(100),
    },
    AchievementDef {
        id: "questions_1000",
        name: "Thousand Answers",
        description: "Answer 1,000 quiz questions.",
        category: Category::Milestone,
        xp_reward: 400,
        max_progress: 1000,
        rule: Rule::QuestionsAnswered(1000),
    },
    AchievementDef {
        id: "daily_10",
        name: "Daily Devotee",
        description: "Complete 10 daily review quizzes.",
        category: Category::Milestone,
        xp_reward: 100,
        max_progress: 10,
        rule: Rule::DailyQuizzesCompleted(10),
    },
    AchievementDef {
        id: "daily_50",
        name: "Review Regular",
        description: "Complete 50 daily review quizzes.",
        category: Category::Milestone,
        xp_reward: 300,
        max_progress: 50,
        rule: Rule::DailyQuizzesCompleted(50),
    },
    AchievementDef {
        id: "xp_1000",
        name: "Getting Somewhere",
        description: "Earn 1,000 total XP.",
        category: Category::Milestone,
        xp_reward: 50,
        max_progress: 1000,
        rule: Rule::TotalXp(1000),
    },
    AchievementDef {
        id: "xp_10000",
        name: "Seasoned Scholar",
        description: "Earn 10,000 total XP.",
        category: Category::Milestone,
        xp_reward: 200,
        max_progress: 10_000,
        rule: Rule::TotalXp(10_000),
    },
    AchievementDef {
        id: "xp_50000",
        name: "XP Legend",
        description: "Earn 50,000 total XP.",
        category: Category::Milestone,
        xp_reward: 500,
        max_progress: 50_000,
        rule: Rule::TotalXp(50_000),
    },
    AchievementDef {
        id: "level_5",
        name: "Moving Up",
        description: "Reach level 5.",
        category: Category::Milestone,
        xp_reward: 100,
        max_progress: 5,
        rule: Rule::LevelReached(5),
    },
    AchievementDef {
        id: "level_10",
        name: "Double Digits",
        description: "Reach level 10.",
        category: Category::Milestone,
        xp_reward: 250,
        max_progress: 10,
        rule: Rule::LevelReached(10),
    },
    AchievementDef {
        id: "level_20",
        name: "Dean's List",
        description: "Reach level 20.",
        category: Category::Milestone,
        xp_reward: 500,
        max_progress: 20,
        rule: Rule::LevelReached(20),
    },
    // Perfection
    AchievementDef {
        id: "first_perfect",
        name: "Flawless",
        description: "Score 100% on a quiz.",
        category: Category::Perfection,
        xp_reward: 50,
        max_progress: 1,
        rule: Rule::PerfectScores(1),
    },
    AchievementDef {
        id: "perfect_10",
        name: "Perfectionist",
        description: "Score 100% on 10 quizzes.",
        category: Category::Perfection,
        xp_reward: 200,
        max_progress: 10,
        rule: Rule::PerfectScores(10),
    },
    AchievementDef {
        id: "perfect_25",
        name: "Untouchable",
        description: "Score 100% on 25 quizzes.",
        category: Category::Perfection,
        xp_reward: 400,
        max_progress: 25,
        rule: Rule::PerfectScores(25),
    },
    AchievementDef {
        id: "perfect_streak_3",
        name: "Hat Trick",
        description: "Score 100% on three quizzes in a row.",
        category: Category::Perfection,
        xp_reward: 150,
        max_progress: 3,
        rule: Rule::ConsecutivePerfects(3),
    },
    AchievementDef {
        id: "perfect_streak_5",
        name: "On Fire",
        description: "Score 100% on five quizzes in a row.",
        category: Category::Perfection,
        xp_reward: 300,
        max_progress: 5,
        rule: Rule::ConsecutivePerfects(5),
    },
    // Streaks
    AchievementDef {
        id: "streak_3",
        name: "Warming Up",
        description: "Study three days in a row.",
        category: Category::Streak,
        xp_reward: 50,
        max_progress: 3,
        rule: Rule::StudyStreak(3),
    },
    AchievementDef {
        id: "streak_7",
        name: "Week One",
        description: "Study seven days in a row.",
        category: Category::Streak,
        xp_reward: 100,
        max_progress: 7,
        rule: Rule::StudyStreak(7),
    },
    AchievementDef {
        id: "streak_14",
        name: "Fortnight Focus",
        description: "Study fourteen days in a row.",
        category: Category::Streak,
        xp_reward: 200,
        max_progress: 14,
        rule: Rule::StudyStreak(14),
    },
    AchievementDef {
        id: "streak_30",
        name: "Month of Momentum",
        description: "Study thirty days in a row.",
        category: Category::Streak,
        xp_reward: 500,
        max_progress: 30,
        rule: Rule::StudyStreak(30),
    },
    AchievementDef {
        id: "streak_100",
        name: "Unstoppable",
        description: "Study one hundred days in a row.",
        category: Category::Streak,
        xp_reward: 1500,
        max_progress: 100,
        rule: Rule::StudyStreak(100),
    },
    AchievementDef {
        id: "longest_streak_30",
        name: "Marathon Mind",
        description: "Hold a best-ever streak of thirty days.",
        category: Category::Streak,
        xp_reward: 250,
        max_progress: 30,
        rule: Rule::LongestStudyStreak(30),
    },
    AchievementDef {
        id: "daily_streak_7",
        name: "Daily Ritual",
        description: "Complete the daily quiz seven days in a row.",
        category: Category::Streak,
        xp_reward: 150,
        max_progress: 7,
        rule: Rule::DailyQuizStreak(7),
    },
    AchievementDef {
        id: "daily_streak_30",
        name: "Clockwork",
        description: "Complete the daily quiz thirty days in a row.",
        category: Category::Streak,
        xp_reward: 600,
        max_progress: 30,
        rule: Rule::DailyQuizStreak(30),
    },
    // Mastery
    AchievementDef {
        id: "first_mastered",
        name: "Mastered It",
        description: "Master your first topic.",
        category: Category::Mastery,
        xp_reward: 75,
        max_progress: 1,
        rule: Rule::MasteredTopics(1),
    },
    AchievementDef {
        id: "mastered_5",
        name: "Subject Savvy",
        description: "Master five topics.",
        category: Category::Mastery,
        xp_reward: 200,
        max_progress: 5,
        rule: Rule::MasteredTopics(5),
    },
    AchievementDef {
        id: "mastered_20",
        name: "Polymath",
        description: "Master twenty topics.",
        category: Category::Mastery,
        xp_reward: 600,
        max_progress: 20,
        rule: Rule::MasteredTopics(20),
    },
    AchievementDef {
        id: "topic_streak_5",
        name: "Locked In",
        description: "Pass five consecutive reviews of one topic.",
        category: Category::Mastery,
        xp_reward: 150,
        max_progress: 5,
        rule: Rule::TopicStreak(5),
    },
    AchievementDef {
        id: "clean_slate",
        name: "Clean Slate",
        description: "Clear every due review.",
        category: Category::Mastery,
        xp_reward: 100,
        max_progress: 1,
        rule: Rule::AllDueCleared,
    },
    // Calendar
    AchievementDef {
        id: "early_bird",
        name: "Early Bird",
        description: "Study between 5am and 8am.",
        category: Category::Calendar,
        xp_reward: 75,
        max_progress: 1,
        rule: Rule::StudyBetween { start_hour: 5, end_hour: 8 },
    },
    AchievementDef {
        id: "night_owl",
        name: "Night Owl",
        description: "Study between 11pm and 4am.",
        category: Category::Calendar,
        xp_reward: 75,
        max_progress: 1,
        rule: Rule::StudyBetween { start_hour: 23, end_hour: 4 },
    },
    AchievementDef {
        id: "weekend_warrior",
        name: "Weekend Warrior",
        description: "Study on a Saturday or Sunday.",
        category: Category::Calendar,
        xp_reward: 75,
        max_progress: 1,
        rule: Rule::StudyOnWeekend,
    },
    AchievementDef {
        id: "fresh_start",
        name: "Fresh Start",
        description: "Study on the first day of the month.",
        category: Category::Calendar,
        xp_reward: 50,
        max_progress: 1,
        rule: Rule::DayOfMonth(1),
    },
    AchievementDef {
        id: "well_rounded",
        name: "Well Rounded",
        description: "Study on all seven days of the week.",
        category: Category::Calendar,
        xp_reward: 200,
        max_progress: 7,
        rule: Rule::DistinctWeekdays(7),
    },
    // Improvement
    AchievementDef {
        id: "trending_up",
        name: "Trending Up",
        description: "Improve a quiz score by 20 points.",
        category: Category::Improvement,
        xp_reward: 100,
        max_progress: 20,
        rule: Rule::ScoreImprovement(20),
    },
    AchievementDef {
        id: "quantum_leap",
        name: "Quantum Leap",
        description: "Improve a quiz score by 40 points.",
        category: Category::Improvement,
        xp_reward: 200,
        max_progress: 40,
        rule: Rule::ScoreImprovement(40),
    },
    AchievementDef {
        id: "bounce_back",
        name: "Bounce Back",
        description: "Follow a sub-50% quiz with an 80% or better.",
        category: Category::Improvement,
        xp_reward: 150,
        max_progress: 1,
        rule: Rule::RecoveryTo(80),
    },
    AchievementDef {
        id: "phoenix",
        name: "Phoenix",
        description: "Follow a sub-50% quiz with a perfect score.",
        category: Category::Improvement,
        xp_reward: 300,
        max_progress: 1,
        rule: Rule::RecoveryTo(100),
    },
    // Social & power-ups
    AchievementDef {
        id: "show_and_tell",
        name: "Show and Tell",
        description: "Share your progress for the first time.",
        category: Category::Social,
        xp_reward: 50,
        max_progress: 1,
        rule: Rule::SocialShares(1),
    },
    AchievementDef {
        id: "social_5",
        name: "Study Influencer",
        description: "Share your progress five times.",
        category: Category::Social,
        xp_reward: 150,
        max_progress: 5,
        rule: Rule::SocialShares(5),
    },
    AchievementDef {
        id: "planner",
        name: "Planner",
        description: "Export a study session to your calendar.",
        category: Category::Social,
        xp_reward: 50,
        max_progress: 1,
        rule: Rule::CalendarExports(1),
    },
    AchievementDef {
        id: "boosted",
        name: "Boosted",
        description: "Use your first power-up.",
        category: Category::Social,
        xp_reward: 25,
        max_progress: 1,
        rule: Rule::PowerUpsUsed(1),
    },
    AchievementDef {
        id: "power_player",
        name: "Power Player",
        description: "Use five power-ups.",
        category: Category::Social,
        xp_reward: 100,
        max_progress: 5,
        rule: Rule::PowerUpsUsed(5),
    },
    // Meta
    AchievementDef {
        id: "badge_collector",
        name: "Badge Collector",
        description: "Unlock ten achievements.",
        category: Category::Meta,
        xp_reward: 200,
        max_progress: 10,
        rule: Rule::AchievementsUnlocked(10),
    },
    AchievementDef {
        id: "completionist",
        name: "Completionist",
        description: "Unlock twenty-five achievements.",
        category: Category::Meta,
        xp_reward: 500,
        max_progress: 25,
        rule: Rule::AchievementsUnlocked(25),
    },
];

/// Look up a definition by id.
pub fn find(id: &str) -> Option<&'static AchievementDef> {
    CATALOG.iter().find(|def| def.id == id)
}
