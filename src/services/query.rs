// src/services/query.rs

//! In-memory filtering and free-text search over question collections.
//!
//! Everything here is pure: inputs are borrowed, matching questions are
//! cloned into a new collection.

use crate::models::Question;

/// Filter criteria. Every set criterion must match (AND).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    /// Case-insensitive exact company name
    pub company: Option<String>,
    /// Case-insensitive exact difficulty
    pub difficulty: Option<String>,
    pub solved: Option<bool>,
    /// Any of these must be a case-insensitive substring of any question tag
    pub tags: Vec<String>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    pub fn solved(mut self, solved: bool) -> Self {
        self.solved = Some(solved);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.company.is_none() && self.difficulty.is_none() && self.solved.is_none() && self.tags.is_empty()
    }

    /// Check a single question against every set criterion.
    pub fn matches(&self, question: &Question) -> bool {
        if let Some(company) = &self.company {
            if !eq_ignore_case(&question.company, company) {
                return false;
            }
        }
        if let Some(difficulty) = &self.difficulty {
            if !eq_ignore_case(&question.difficulty, difficulty) {
                return false;
            }
        }
        if let Some(solved) = self.solved {
            if question.solved != solved {
                return false;
            }
        }
        if !self.tags.is_empty() {
            let wanted: Vec<String> = self.tags.iter().map(|t| t.to_lowercase()).collect();
            let hit = wanted.iter().any(|tag| {
                question
                    .tags
                    .iter()
                    .any(|q_tag| q_tag.to_lowercase().contains(tag.as_str()))
            });
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Return the questions matching every criterion in `filter`.
pub fn filter(questions: &[Question], filter: &QueryFilter) -> Vec<Question> {
    questions
        .iter()
        .filter(|q| filter.matches(q))
        .cloned()
        .collect()
}

/// Free-text search across title, company, tags and description.
///
/// A blank query returns the collection unchanged. Otherwise a question is
/// kept if the trimmed, lowercased query is a substring of any one field.
pub fn search(questions: &[Question], query: &str) -> Vec<Question> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return questions.to_vec();
    }
    questions
        .iter()
        .filter(|q| matches_term(q, &term))
        .cloned()
        .collect()
}

/// `term` must already be lowercased.
fn matches_term(question: &Question, term: &str) -> bool {
    question.title.to_lowercase().contains(term)
        || question.company.to_lowercase().contains(term)
        || question
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(term))
        || question.description.to_lowercase().contains(term)
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::sample_questions;

    fn titles(questions: &[Question]) -> Vec<&str> {
        questions.iter().map(|q| q.title.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let all = sample_questions();
        assert!(QueryFilter::new().is_empty());
        assert_eq!(filter(&all, &QueryFilter::new()), all);
    }

    #[test]
    fn test_company_is_case_insensitive_exact() {
        let all = sample_questions();
        let google = filter(&all, &QueryFilter::new().company("gOOgle"));
        assert_eq!(titles(&google), vec!["Two Sum"]);

        // substring of a company name is not enough
        assert!(filter(&all, &QueryFilter::new().company("Goo")).is_empty());
    }

    #[test]
    fn test_difficulty_and_solved() {
        let all = sample_questions();
        let medium = filter(&all, &QueryFilter::new().difficulty("MEDIUM"));
        assert_eq!(medium.len(), 2);

        let solved_medium = filter(&all, &QueryFilter::new().difficulty("medium").solved(true));
        assert_eq!(titles(&solved_medium), vec!["Add Two Numbers"]);

        let unsolved = filter(&all, &QueryFilter::new().solved(false));
        assert_eq!(unsolved.len(), 3);
    }

    #[test]
    fn test_tags_match_any_substring() {
        let all = sample_questions();
        let hits = filter(&all, &QueryFilter::new().tag("stack").tag("linked"));
        assert_eq!(titles(&hits), vec!["Add Two Numbers", "Valid Parentheses"]);

        let hash = filter(&all, &QueryFilter::new().tag("HASH"));
        assert_eq!(hash.len(), 2);
    }

    #[test]
    fn test_criteria_compose_in_any_order() {
        let all = sample_questions();
        let by_company = QueryFilter::new().company("amazon");
        let by_difficulty = QueryFilter::new().difficulty("medium");
        let both = QueryFilter::new().company("amazon").difficulty("medium");

        let chained = filter(&filter(&all, &by_company), &by_difficulty);
        let reversed = filter(&filter(&all, &by_difficulty), &by_company);
        let combined = filter(&all, &both);

        assert_eq!(chained, combined);
        assert_eq!(reversed, combined);
        assert_eq!(titles(&combined), vec!["Add Two Numbers"]);
    }

    #[test]
    fn test_blank_search_returns_input() {
        let all = sample_questions();
        assert_eq!(search(&all, ""), all);
        assert_eq!(search(&all, "   \t"), all);
    }

    #[test]
    fn test_search_matches_any_field() {
        let all = sample_questions();

        // title
        assert_eq!(titles(&search(&all, "parenth")), vec!["Valid Parentheses"]);
        // company
        assert_eq!(titles(&search(&all, "  MICROSOFT ")), vec!["Median of Two Sorted Arrays"]);
        // tag
        assert_eq!(
            titles(&search(&all, "sliding")),
            vec!["Longest Substring Without Repeating Characters"]
        );
        // description
        assert_eq!(titles(&search(&all, "linked lists")), vec!["Add Two Numbers"]);
    }

    #[test]
    fn test_search_results_are_subset_and_match() {
        let all = sample_questions();
        for query in ["two", "array", "o", "string", "zzz"] {
            let found = search(&all, query);
            for q in &found {
                assert!(all.contains(q));
                assert!(matches_term(q, &query.to_lowercase()));
            }
        }
        assert!(search(&all, "zzz").is_empty());
    }
}
