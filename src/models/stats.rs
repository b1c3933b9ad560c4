//! Aggregate statistics derived from a question collection.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{Difficulty, Question};

/// Maximum number of entries in [`UserStats::recent_activity`].
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Per-user progress summary across all companies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total: usize,
    pub solved: usize,
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
    pub easy_solved: usize,
    pub medium_solved: usize,
    pub hard_solved: usize,
    /// Number of distinct companies
    pub companies: usize,
    /// Solved share in whole percent
    pub success_rate: u32,
    /// Most recently attempted questions, newest first
    pub recent_activity: Vec<Question>,
}

impl UserStats {
    pub fn from_questions(questions: &[Question]) -> Self {
        let count = |difficulty: Difficulty, solved_only: bool| {
            questions
                .iter()
                .filter(|q| q.is(difficulty) && (!solved_only || q.solved))
                .count()
        };

        let total = questions.len();
        let solved = questions.iter().filter(|q| q.solved).count();
        let companies = questions
            .iter()
            .map(|q| q.company.as_str())
            .collect::<HashSet<_>>()
            .len();

        let mut recent_activity: Vec<Question> = questions
            .iter()
            .filter(|q| q.last_attempt.is_some())
            .cloned()
            .collect();
        // stable sort keeps input order for equal timestamps
        recent_activity.sort_by(|a, b| b.last_attempt.cmp(&a.last_attempt));
        recent_activity.truncate(RECENT_ACTIVITY_LIMIT);

        Self {
            total,
            solved,
            easy: count(Difficulty::Easy, false),
            medium: count(Difficulty::Medium, false),
            hard: count(Difficulty::Hard, false),
            easy_solved: count(Difficulty::Easy, true),
            medium_solved: count(Difficulty::Medium, true),
            hard_solved: count(Difficulty::Hard, true),
            companies,
            success_rate: percent(solved, total),
            recent_activity,
        }
    }
}

/// Dashboard card for a single company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub name: String,
    pub total: usize,
    pub solved: usize,
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
    /// Solved share in whole percent
    pub progress: u32,
}

impl CompanySummary {
    /// Summarize the questions belonging to one company.
    ///
    /// The caller is responsible for passing only that company's questions.
    pub fn from_questions<'a>(
        name: impl Into<String>,
        questions: impl IntoIterator<Item = &'a Question>,
    ) -> Self {
        let mut summary = Self {
            name: name.into(),
            ..Self::default()
        };
        for q in questions {
            summary.total += 1;
            if q.solved {
                summary.solved += 1;
            }
            if q.is(Difficulty::Easy) {
                summary.easy += 1;
            } else if q.is(Difficulty::Medium) {
                summary.medium += 1;
            } else if q.is(Difficulty::Hard) {
                summary.hard += 1;
            }
        }
        summary.progress = percent(summary.solved, summary.total);
        summary
    }

    /// Group a collection by company name, sorted by name.
    pub fn group(questions: &[Question]) -> Vec<Self> {
        let mut by_company: BTreeMap<&str, Vec<&Question>> = BTreeMap::new();
        for q in questions {
            by_company.entry(q.company.as_str()).or_default().push(q);
        }
        by_company
            .into_iter()
            .map(|(name, qs)| Self::from_questions(name, qs))
            .collect()
    }
}

/// Whole-number percentage, rounded half away from zero; 0 for an empty total.
fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}
