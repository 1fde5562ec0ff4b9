mod config;
pub mod quick_start;

use log::{debug, info};

pub use crate::config::*;

/// Normalizes one raw answer cell into an explicit optional answer.
///
/// Surrounding whitespace is dropped; a blank cell becomes `None`, which
/// marks the question as unattempted. Anything else is kept verbatim and
/// compared to the key with exact string equality.
pub fn normalize_answer(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Grades responses against a fixed answer key under negative marking.
///
/// The grader is built once per run from the key and the marking scheme,
/// and every response of the cohort is scored through it.
///
/// ```
/// pub use mcq_scoring::{Grader, MarkingScheme};
/// # use mcq_scoring::ScoringError;
///
/// let key: Vec<String> = vec!["A".into(), "B".into(), "C".into(), "D".into()];
/// let grader = Grader::new(&key, &MarkingScheme::DEFAULT_SCHEME)?;
///
/// let outcome = grader.score(&[
///     Some("A".to_string()),
///     Some("B".to_string()),
///     Some("X".to_string()),
///     None,
/// ])?;
/// assert_eq!(outcome.score_string(), "9/20");
///
/// # Ok::<(), ScoringError>(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Grader {
    scheme: MarkingScheme,
    key: Vec<String>,
    max: i64,
}

impl Grader {
    /// Builds a grader for the given key.
    ///
    /// The key must hold at least one question; every entry is the exact
    /// expected answer for that question index.
    pub fn new(key: &[String], scheme: &MarkingScheme) -> Result<Grader, ScoringError> {
        if key.is_empty() {
            return Err(ScoringError::EmptyKey);
        }
        let max = (key.len() as i64) * scheme.correct;
        info!(
            "Grading over {} questions, marking scheme: {:?}",
            key.len(),
            scheme
        );
        Ok(Grader {
            scheme: *scheme,
            key: key.to_vec(),
            max,
        })
    }

    pub fn question_count(&self) -> usize {
        self.key.len()
    }

    pub fn max_score(&self) -> i64 {
        self.max
    }

    pub fn key(&self) -> &[String] {
        &self.key
    }

    /// Scores one response against the key.
    ///
    /// The response must hold exactly one optional answer per question
    /// (`None` for unattempted). The verdict counts are re-checked against
    /// the question count before the outcome is returned.
    pub fn score(&self, answers: &[Option<String>]) -> Result<Outcome, ScoringError> {
        if answers.len() != self.key.len() {
            return Err(ScoringError::AnswerCountMismatch {
                expected: self.key.len(),
                actual: answers.len(),
            });
        }
        let verdicts: Vec<AnswerVerdict> = self
            .key
            .iter()
            .zip(answers.iter())
            .map(|(expected, submitted)| match submitted {
                None => AnswerVerdict::Unattempted,
                Some(answer) if answer == expected => AnswerVerdict::Correct,
                Some(_) => AnswerVerdict::Wrong,
            })
            .collect();

        let mut right: u32 = 0;
        let mut wrong: u32 = 0;
        let mut unattempted: u32 = 0;
        for verdict in verdicts.iter() {
            match verdict {
                AnswerVerdict::Correct => right += 1,
                AnswerVerdict::Wrong => wrong += 1,
                AnswerVerdict::Unattempted => unattempted += 1,
            }
        }
        let questions = self.key.len();
        if (right + wrong + unattempted) as usize != questions {
            return Err(ScoringError::InconsistentCounts {
                right,
                wrong,
                unattempted,
                questions,
            });
        }

        let total = (right as i64) * self.scheme.correct - (wrong as i64) * self.scheme.wrong
            + (unattempted as i64) * self.scheme.unattempted;
        debug!(
            "score: right={} wrong={} unattempted={} total={}/{}",
            right, wrong, unattempted, total, self.max
        );
        Ok(Outcome {
            right,
            wrong,
            unattempted,
            total,
            max: self.max,
            verdicts,
        })
    }

    /// The outcome assigned to a roster entry with no response row.
    ///
    /// All counts are zero and the verdict list is empty; the maximum
    /// score is still that of the cohort's key.
    pub fn absent(&self) -> Outcome {
        Outcome {
            right: 0,
            wrong: 0,
            unattempted: 0,
            total: 0,
            max: self.max,
            verdicts: Vec::new(),
        }
    }
}
