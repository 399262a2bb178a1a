use crate::Equation;

use super::Bracket;

/// Event emitted by the bisection solver for each evaluation.
pub enum Event<'a, E: Equation> {
    /// Left bracket endpoint evaluation.
    Left {
        /// The x value that was evaluated.
        x: f64,
        /// The residual, or the equation's error.
        result: &'a Result<f64, E::Error>,
    },

    /// Right bracket endpoint evaluation.
    Right {
        /// The x value that was evaluated.
        x: f64,
        /// The residual, or the equation's error.
        result: &'a Result<f64, E::Error>,
    },

    /// Midpoint evaluation inside a validated bracket.
    Midpoint {
        /// The x value that was evaluated.
        x: f64,
        /// Search bracket the midpoint was taken from.
        bracket: &'a Bracket,
        /// The residual, or the equation's error.
        result: &'a Result<f64, E::Error>,
    },
}

impl<'a, E: Equation> Event<'a, E> {
    /// Returns the evaluated x value.
    #[must_use]
    pub fn x(&self) -> f64 {
        match self {
            Event::Left { x, .. } | Event::Right { x, .. } | Event::Midpoint { x, .. } => *x,
        }
    }

    /// Returns the evaluation result.
    #[must_use]
    pub fn result(&self) -> &'a Result<f64, E::Error> {
        match self {
            Event::Left { result, .. }
            | Event::Right { result, .. }
            | Event::Midpoint { result, .. } => *result,
        }
    }

    /// Returns the residual, or `f64::NAN` if the evaluation failed.
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.result().as_ref().copied().unwrap_or(f64::NAN)
    }
}
