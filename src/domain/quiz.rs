//! Quiz questions as stored in a quiz document, plus scoring.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Options are labelled `A`, `B`, ... in document order.
const FIRST_OPTION_LABEL: u8 = b'A';
const OPTION_LABEL_COUNT: usize = 26;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    /// Prompt text; may contain pipe or truth-table layouts.
    pub question: String,
    pub options: Vec<String>,
    /// Correct option letters. Only the first entry is used.
    #[serde(default)]
    pub correct: Vec<String>,
    /// Submitted option letters. Only the first entry is used.
    #[serde(default)]
    pub user_answer: Vec<String>,
    /// Explanation body for a wrong answer, in the small markdown dialect.
    #[serde(default, alias = "ai_explanation")]
    pub explanation: Option<String>,
}

impl Question {
    /// The correct option letter, or an empty string when the document has none.
    pub fn correct_answer(&self) -> &str {
        self.correct.first().map(String::as_str).unwrap_or("")
    }

    pub fn user_answer(&self) -> Option<&str> {
        self.user_answer.first().map(String::as_str)
    }

    /// Text of the correct option, when the letter maps onto an option.
    pub fn correct_text(&self) -> Option<&str> {
        let index = option_index(self.correct_answer())?;
        self.options.get(index).map(String::as_str)
    }

    pub fn is_answered_correctly(&self) -> bool {
        self.user_answer()
            .is_some_and(|answer| answer == self.correct_answer())
    }
}

/// Letter for the option at `index`.
pub fn option_label(index: usize) -> Option<char> {
    (index < OPTION_LABEL_COUNT).then(|| char::from(FIRST_OPTION_LABEL + index as u8))
}

/// Index of the option a single uppercase letter refers to.
pub fn option_index(label: &str) -> Option<usize> {
    let mut chars = label.chars();
    let letter = chars.next()?;
    if chars.next().is_some() || !letter.is_ascii_uppercase() {
        return None;
    }
    Some(usize::from(letter as u8 - FIRST_OPTION_LABEL))
}

/// A validated quiz: unique question ids, every question has options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDocument {
    questions: Vec<Question>,
}

impl QuizDocument {
    pub fn new(questions: Vec<Question>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id) {
                return Err(DomainError::validation(format!(
                    "duplicate question id {}",
                    question.id
                )));
            }
            if question.options.is_empty() {
                return Err(DomainError::validation(format!(
                    "question {} has no options",
                    question.id
                )));
            }
            if question.options.len() > OPTION_LABEL_COUNT {
                return Err(DomainError::validation(format!(
                    "question {} has more than {OPTION_LABEL_COUNT} options",
                    question.id
                )));
            }
        }
        Ok(Self { questions })
    }

    /// Parse a document: a JSON array of questions.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn score(&self) -> QuizScore {
        QuizScore::compute(&self.questions)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionOutcome {
    pub id: u32,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    /// Set only for answers that were given and wrong.
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizScore {
    pub total_questions: usize,
    pub correct_answers: usize,
    /// Share of correct answers in percent, rounded to two decimals.
    pub percentage: f64,
    pub outcomes: Vec<QuestionOutcome>,
}

impl QuizScore {
    pub fn compute(questions: &[Question]) -> Self {
        let outcomes: Vec<QuestionOutcome> = questions.iter().map(outcome_for).collect();
        let total_questions = outcomes.len();
        let correct_answers = outcomes.iter().filter(|outcome| outcome.is_correct).count();

        let percentage = if total_questions == 0 {
            0.0
        } else {
            let raw = correct_answers as f64 / total_questions as f64 * 100.0;
            (raw * 100.0).round() / 100.0
        };

        Self {
            total_questions,
            correct_answers,
            percentage,
            outcomes,
        }
    }
}

fn outcome_for(question: &Question) -> QuestionOutcome {
    let is_correct = question.is_answered_correctly();
    let user_answer = question.user_answer().map(str::to_string);
    let correct_answer = question.correct_answer().to_string();

    let explanation = match user_answer.as_deref() {
        Some(given) if !is_correct => Some(
            question
                .explanation
                .clone()
                .unwrap_or_else(|| fallback_explanation(given, &correct_answer)),
        ),
        _ => None,
    };

    QuestionOutcome {
        id: question.id,
        user_answer,
        correct_answer,
        is_correct,
        explanation,
    }
}

/// Explanation used when the document carries none for a wrong answer.
pub fn fallback_explanation(user_answer: &str, correct_answer: &str) -> String {
    format!(
        "**Your answer:** {user_answer} \u{274C}\n\
         **Correct answer:** {correct_answer} \u{2705}\n\
         \n\
         \u{1F4A1} **Tip:** review the study material on this topic."
    )
}
