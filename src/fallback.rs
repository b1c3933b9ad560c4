// src/fallback.rs

//! Embedded sample questions.
//!
//! Served in place of API data when a read cannot reach the server. The set
//! is fixed: five questions across all three difficulties and five
//! companies, two of them solved.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Question, QuestionId};

/// Build the sample question collection.
pub fn sample_questions() -> Vec<Question> {
    vec![
        Question {
            id: QuestionId::Number(1),
            title: "Two Sum".into(),
            company: "Google".into(),
            difficulty: "easy".into(),
            link: "https://leetcode.com/problems/two-sum/".into(),
            tags: tags(&["Array", "Hash Table"]),
            description: "Given an array of integers nums and an integer target, return indices \
                          of the two numbers such that they add up to target."
                .into(),
            solved: false,
            attempts: 0,
            last_attempt: None,
            notes: String::new(),
            time_complexity: "O(n)".into(),
            space_complexity: "O(n)".into(),
        },
        Question {
            id: QuestionId::Number(2),
            title: "Add Two Numbers".into(),
            company: "Amazon".into(),
            difficulty: "medium".into(),
            link: "https://leetcode.com/problems/add-two-numbers/".into(),
            tags: tags(&["Linked List", "Math", "Recursion"]),
            description: "You are given two non-empty linked lists representing two \
                          non-negative integers."
                .into(),
            solved: true,
            attempts: 3,
            last_attempt: at(2024, 1, 15, 10, 30),
            notes: "Remember to handle carry properly".into(),
            time_complexity: "O(max(m,n))".into(),
            space_complexity: "O(max(m,n))".into(),
        },
        Question {
            id: QuestionId::Number(3),
            title: "Longest Substring Without Repeating Characters".into(),
            company: "Meta".into(),
            difficulty: "medium".into(),
            link: "https://leetcode.com/problems/longest-substring-without-repeating-characters/"
                .into(),
            tags: tags(&["Hash Table", "String", "Sliding Window"]),
            description: "Given a string s, find the length of the longest substring without \
                          repeating characters."
                .into(),
            solved: false,
            attempts: 1,
            last_attempt: at(2024, 1, 14, 15, 45),
            notes: "Try sliding window approach".into(),
            time_complexity: "O(n)".into(),
            space_complexity: "O(min(m,n))".into(),
        },
        Question {
            id: QuestionId::Number(4),
            title: "Median of Two Sorted Arrays".into(),
            company: "Microsoft".into(),
            difficulty: "hard".into(),
            link: "https://leetcode.com/problems/median-of-two-sorted-arrays/".into(),
            tags: tags(&["Array", "Binary Search", "Divide and Conquer"]),
            description: "Given two sorted arrays nums1 and nums2 of size m and n respectively, \
                          return the median of the two sorted arrays."
                .into(),
            solved: false,
            attempts: 0,
            last_attempt: None,
            notes: String::new(),
            time_complexity: "O(log(min(m,n)))".into(),
            space_complexity: "O(1)".into(),
        },
        Question {
            id: QuestionId::Number(5),
            title: "Valid Parentheses".into(),
            company: "Apple".into(),
            difficulty: "easy".into(),
            link: "https://leetcode.com/problems/valid-parentheses/".into(),
            tags: tags(&["String", "Stack"]),
            description: "Given a string s containing just the characters '(', ')', '{', '}', \
                          '[' and ']', determine if the input string is valid."
                .into(),
            solved: true,
            attempts: 1,
            last_attempt: at(2024, 1, 13, 9, 20),
            notes: "Simple stack problem".into(),
            time_complexity: "O(n)".into(),
            space_complexity: "O(n)".into(),
        },
    ]
}

fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0).single()
}
