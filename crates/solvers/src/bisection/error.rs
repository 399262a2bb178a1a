use std::error::Error as StdError;

use thiserror::Error;

use super::bracket::BracketError;

/// Why a bisection solve produced no [`Solution`](super::Solution).
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid bracket: {0}")]
    InvalidBracket(#[from] BracketError),

    #[error("residual at x = {x} is {residual}")]
    NonFiniteResidual { x: f64, residual: f64 },

    #[error("every evaluation failed or was overridden by the observer")]
    NoSuccessfulEvaluation,

    #[error("residual could not be evaluated at x = {x}")]
    Equation {
        x: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}
