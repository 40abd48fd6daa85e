use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{CHALLENGE_OPERAND_MAX, CHALLENGE_OPERAND_MIN};
use crate::errors::{GateError, Result};

/// A two-operand addition challenge, issued when a confirmation dialog
/// opens and checked when the user submits.
///
/// This is an "are you sure" friction device, not security: there is no
/// retry limit, and each attempt gets a fresh challenge from the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub question: String,
    correct_answer: i64,
}

impl Challenge {
    /// Issues a fresh challenge with operands drawn uniformly from the
    /// configured range (1..=10).
    pub fn issue() -> Self {
        let mut rng = rand::thread_rng();
        let a = rng.gen_range(CHALLENGE_OPERAND_MIN..=CHALLENGE_OPERAND_MAX);
        let b = rng.gen_range(CHALLENGE_OPERAND_MIN..=CHALLENGE_OPERAND_MAX);
        Self::with_operands(a, b)
    }

    /// Builds a challenge from fixed operands. Lets tests and embedders
    /// construct deterministic gates.
    pub fn with_operands(a: i64, b: i64) -> Self {
        Challenge {
            question: format!("{a} + {b}"),
            correct_answer: a + b,
        }
    }

    /// Checks an answer by exact integer equality.
    pub fn verify(&self, answer: i64) -> Result<()> {
        if answer == self.correct_answer {
            Ok(())
        } else {
            Err(GateError::WrongAnswer.into())
        }
    }
}
