use std::collections::BTreeSet;

use super::schema::{RawOption, RawQuestion};
use crate::services::text_ops::random_token;

const DEFAULT_ID_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuestionType {
    #[default]
    Radio,
    Checkbox,
    Other(String),
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            other => Self::Other(other.to_string()),
        }
    }
}

/// One selectable answer. `value` is both the submitted answer and the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
}

impl QuestionOption {
    pub fn from_raw(raw: &RawOption) -> Self {
        Self {
            value: raw.value.clone(),
            label: raw.label.clone(),
        }
    }

    pub fn to_raw(&self) -> RawOption {
        RawOption {
            value: self.value.clone(),
            label: self.label.clone(),
        }
    }
}

impl Default for QuestionOption {
    fn default() -> Self {
        Self {
            value: random_token(DEFAULT_ID_LEN),
            label: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub kind: QuestionType,
    pub id: String,
    pub content: String,
    /// Comma separated list of correct option values.
    pub solution: String,
    pub options: Vec<QuestionOption>,
}

impl Default for Question {
    fn default() -> Self {
        Self {
            kind: QuestionType::Radio,
            id: random_token(DEFAULT_ID_LEN),
            content: String::new(),
            solution: String::new(),
            options: vec![QuestionOption::default()],
        }
    }
}

impl Question {
    pub fn from_raw(raw: &RawQuestion) -> Self {
        Self {
            kind: QuestionType::parse(&raw.kind),
            id: raw.id.clone(),
            content: raw.content.clone(),
            solution: raw.solution.clone(),
            options: raw.options.iter().map(QuestionOption::from_raw).collect(),
        }
    }

    pub fn to_raw(&self) -> RawQuestion {
        RawQuestion {
            kind: self.kind.as_str().to_string(),
            id: self.id.clone(),
            content: self.content.clone(),
            solution: self.solution.clone(),
            options: self.options.iter().map(QuestionOption::to_raw).collect(),
        }
    }

    /// Correct values: split on commas, trimmed, empties dropped, lower-cased.
    pub fn solution_set(&self) -> BTreeSet<String> {
        self.solution
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    /// Score submitted answers against the solution.
    ///
    /// Each answer adds `1/n` when it is in the solution set and subtracts
    /// `1/n` otherwise, where `n` is the size of the set. Duplicates count
    /// every time and the total is not clamped. Answers are matched verbatim.
    /// Absent answers and an empty solution set both score 0.
    pub fn score<S: AsRef<str>>(&self, answers: Option<&[S]>) -> f64 {
        let Some(answers) = answers else {
            return 0.0;
        };
        let solutions = self.solution_set();
        if solutions.is_empty() {
            return 0.0;
        }

        let weight = 1.0 / solutions.len() as f64;
        answers.iter().fold(0.0, |sum, answer| {
            if solutions.contains(answer.as_ref()) {
                sum + weight
            } else {
                sum - weight
            }
        })
    }

    /// True only when the computed score is exactly `1.0`.
    #[allow(clippy::float_cmp)]
    pub fn is_correct<S: AsRef<str>>(&self, answers: Option<&[S]>) -> bool {
        self.score(answers) == 1.0
    }

    pub fn option(&self, value: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(solution: &str) -> Question {
        Question {
            kind: QuestionType::Checkbox,
            id: "q1".to_string(),
            content: "Pick".to_string(),
            solution: solution.to_string(),
            options: ["a", "b", "c"]
                .iter()
                .map(|v| QuestionOption {
                    value: v.to_string(),
                    label: v.to_uppercase(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_solution_set_normalizes() {
        let q = question(" A, b ,,C ");
        let set: Vec<String> = q.solution_set().into_iter().collect();
        assert_eq!(set, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_score_absent_answers() {
        assert_eq!(question("a,b").score::<&str>(None), 0.0);
        assert!(!question("a,b").is_correct::<&str>(None));
    }

    #[test]
    fn test_score_two_part_solution() {
        let q = question("a,b");
        assert_eq!(q.score(Some(&["a", "b"][..])), 1.0);
        assert!(q.is_correct(Some(&["a", "b"][..])));

        assert_eq!(q.score(Some(&["a"][..])), 0.5);
        assert!(!q.is_correct(Some(&["a"][..])));

        assert_eq!(q.score(Some(&["a", "c"][..])), 0.0);
        assert!(!q.is_correct(Some(&["a", "c"][..])));
    }

    #[test]
    fn test_score_is_not_clamped() {
        let q = question("a,b");
        assert_eq!(q.score(Some(&["a", "a", "b"][..])), 1.5);
        assert_eq!(q.score(Some(&["c", "c", "c"][..])), -1.5);
    }

    #[test]
    fn test_score_matches_answers_verbatim() {
        let q = question("A");
        assert_eq!(q.score(Some(&["a"][..])), 1.0);
        assert_eq!(q.score(Some(&["A"][..])), -1.0);
    }

    #[test]
    fn test_empty_solution_scores_zero() {
        let q = question(" , ");
        assert!(q.solution_set().is_empty());
        assert_eq!(q.score(Some(&["a"][..])), 0.0);
        assert!(!q.is_correct(Some(&["a"][..])));
    }

    #[test]
    fn test_is_correct_uses_exact_equality() {
        // 1/10 summed ten times is 0.9999999999999999 in binary floating point.
        let values: Vec<String> = (0..10).map(|i| format!("v{i}")).collect();
        let q = question(&values.join(","));
        let score = q.score(Some(values.as_slice()));
        assert_ne!(score, 1.0);
        assert!((score - 1.0).abs() < 1e-9);
        assert!(!q.is_correct(Some(values.as_slice())));
    }

    #[test]
    fn test_default_question() {
        let q = Question::default();
        assert_eq!(q.kind, QuestionType::Radio);
        assert!(!q.id.is_empty());
        assert!(q.solution.is_empty());
        assert_eq!(q.options.len(), 1);
        assert!(q.options[0].label.is_empty());
    }

    #[test]
    fn test_raw_round_trip() {
        let q = question("a");
        assert_eq!(Question::from_raw(&q.to_raw()), q);
    }

    #[test]
    fn test_option_lookup() {
        let q = question("a");
        assert_eq!(q.option("b").unwrap().label, "B");
        assert!(q.option("z").is_none());
    }
}
