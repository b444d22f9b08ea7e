//! Multiple-choice quiz questions and their validation rules.

use serde::{Deserialize, Serialize};

/// Number of answer options every question must carry.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Number of questions the generation prompt asks for.
pub const QUESTIONS_PER_QUIZ: usize = 5;

/// Question difficulty. The expected quiz mix is 2 easy / 2 medium /
/// 1 hard, but the mix is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    /// Exactly [`OPTIONS_PER_QUESTION`] choices, in display order.
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_answer: usize,
    pub explanation: String,
    pub difficulty: Difficulty,
}

/// Structural problems in a generated quiz.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("Quiz is empty")]
    Empty,

    #[error("Question {id}: expected {OPTIONS_PER_QUESTION} options, got {got}")]
    WrongOptionCount { id: String, got: usize },

    #[error("Question {id}: correctAnswer {answer} is out of range for {options} options")]
    AnswerOutOfRange {
        id: String,
        answer: usize,
        options: usize,
    },
}

/// Validate the structural invariants of a generated quiz: non-empty,
/// four options per question, and `0 <= correct_answer < options.len()`.
///
/// The question count and difficulty mix are expectations of the prompt,
/// not invariants, so they are not checked here (DESIGN.md).
pub fn validate_quiz(questions: &[QuizQuestion]) -> Result<(), QuizError> {
    if questions.is_empty() {
        return Err(QuizError::Empty);
    }

    for q in questions {
        if q.options.len() != OPTIONS_PER_QUESTION {
            return Err(QuizError::WrongOptionCount {
                id: q.id.clone(),
                got: q.options.len(),
            });
        }
        if q.correct_answer >= q.options.len() {
            return Err(QuizError::AnswerOutOfRange {
                id: q.id.clone(),
                answer: q.correct_answer,
                options: q.options.len(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, options: usize, correct: usize) -> QuizQuestion {
        QuizQuestion {
            id: id.into(),
            question: "What is tested here?".into(),
            options: (0..options).map(|i| format!("Option {i}")).collect(),
            correct_answer: correct,
            explanation: "Because.".into(),
            difficulty: Difficulty::Easy,
        }
    }

    #[test]
    fn valid_quiz_passes() {
        let quiz: Vec<_> = (1..=5).map(|i| question(&i.to_string(), 4, 0)).collect();
        assert!(validate_quiz(&quiz).is_ok());
    }

    #[test]
    fn empty_quiz_is_rejected() {
        assert!(matches!(validate_quiz(&[]), Err(QuizError::Empty)));
    }

    #[test]
    fn wrong_option_count_is_rejected() {
        let quiz = vec![question("1", 3, 0)];
        assert!(matches!(
            validate_quiz(&quiz),
            Err(QuizError::WrongOptionCount { got: 3, .. })
        ));
    }

    #[test]
    fn answer_out_of_range_is_rejected() {
        let quiz = vec![question("1", 4, 4)];
        assert!(matches!(
            validate_quiz(&quiz),
            Err(QuizError::AnswerOutOfRange { answer: 4, .. })
        ));
    }

    #[test]
    fn every_in_range_answer_is_accepted() {
        for correct in 0..4 {
            let quiz = vec![question("1", 4, correct)];
            assert!(validate_quiz(&quiz).is_ok());
        }
    }

    #[test]
    fn difficulty_round_trips_lowercase() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let parsed: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
    }

    #[test]
    fn question_parses_camel_case_wire_shape() {
        let json = r#"{
            "id": "1",
            "question": "Which process moves water across a membrane?",
            "options": ["Osmosis", "Mitosis", "Glycolysis", "Fission"],
            "correctAnswer": 0,
            "explanation": "Osmosis is passive water transport.",
            "difficulty": "easy"
        }"#;
        let q: QuizQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct_answer, 0);
        assert_eq!(q.options.len(), 4);
    }
}
