use super::{Error, Solution, Status};

/// Tracks the evaluation with the smallest residual magnitude seen so far.
///
/// Empty until the first successful evaluation.
#[derive(Debug, Default)]
pub(super) struct Best {
    point: Option<(f64, f64)>,
}

impl Best {
    /// Records `(x, residual)` if it improves on the current best.
    pub(super) fn update(&mut self, x: f64, residual: f64) {
        match self.point {
            Some((_, best)) if residual.abs() >= best.abs() => {}
            _ => self.point = Some((x, residual)),
        }
    }

    /// Returns true if the best residual meets the tolerance.
    pub(super) fn is_residual_converged(&self, residual_tol: f64) -> bool {
        self.point
            .is_some_and(|(_, residual)| residual.abs() <= residual_tol)
    }

    /// Finalizes the solve using the best evaluation.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoSuccessfulEvaluation` if nothing was recorded.
    pub(super) fn finish(self, status: Status, iters: usize) -> Result<Solution, Error> {
        let (x, residual) = self.point.ok_or(Error::NoSuccessfulEvaluation)?;
        Ok(Solution {
            status,
            x,
            residual,
            iters,
        })
    }
}
