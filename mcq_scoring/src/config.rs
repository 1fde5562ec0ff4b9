// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The marking weights applied to each question of a graded response.
///
/// The `wrong` weight is a deduction magnitude: a wrong answer subtracts
/// `wrong` points from the total. Unattempted questions contribute
/// `unattempted` points (zero under the default scheme).
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct MarkingScheme {
    pub correct: i64,
    pub wrong: i64,
    pub unattempted: i64,
}

impl MarkingScheme {
    pub const DEFAULT_SCHEME: MarkingScheme = MarkingScheme {
        correct: 5,
        wrong: 1,
        unattempted: 0,
    };
}

// ******** Output data structures *********

/// The graded state of a single question in a response.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum AnswerVerdict {
    /// The submitted answer matches the key exactly.
    Correct,
    /// An answer was submitted and does not match the key.
    Wrong,
    /// No answer was submitted for this question.
    Unattempted,
}

/// The complete grading result for one response.
///
/// Count fields always sum to the key length for a scored response.
/// An absent outcome (no response row for a roster entry) carries
/// all-zero counts and an empty verdict list.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Outcome {
    pub right: u32,
    pub wrong: u32,
    pub unattempted: u32,
    /// Net score under negative marking. May be negative.
    pub total: i64,
    pub max: i64,
    /// One verdict per question, in key order. Empty for absent outcomes.
    pub verdicts: Vec<AnswerVerdict>,
}

impl Outcome {
    /// Compact count summary in the form `[right,wrong,unattempted]`.
    pub fn status_string(&self) -> String {
        format!("[{},{},{}]", self.right, self.wrong, self.unattempted)
    }

    /// The final score in the form `total/max`.
    pub fn score_string(&self) -> String {
        format!("{}/{}", self.total, self.max)
    }
}

/// Errors that prevent a response from being graded.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScoringError {
    /// The answer key has no questions.
    EmptyKey,
    /// The response holds a different number of answers than the key.
    AnswerCountMismatch { expected: usize, actual: usize },
    /// The verdict counts do not add up to the question count.
    /// Checked on every scored response, never expected to occur.
    InconsistentCounts {
        right: u32,
        wrong: u32,
        unattempted: u32,
        questions: usize,
    },
}

impl Error for ScoringError {}

impl Display for ScoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringError::EmptyKey => write!(f, "the answer key contains no questions"),
            ScoringError::AnswerCountMismatch { expected, actual } => write!(
                f,
                "expected {} answers to match the key, got {}",
                expected, actual
            ),
            ScoringError::InconsistentCounts {
                right,
                wrong,
                unattempted,
                questions,
            } => write!(
                f,
                "verdict counts {}+{}+{} do not sum to the question count {}",
                right, wrong, unattempted, questions
            ),
        }
    }
}
