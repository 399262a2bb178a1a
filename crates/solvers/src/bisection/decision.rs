use super::{Action, Error, Sign};

/// Control flow outcome for a single evaluation.
#[derive(Debug)]
pub(super) enum Decision {
    Continue(Sign),
    StopEarly,
    Error(Error),
}

impl Decision {
    /// Combines the observer's action with the evaluation outcome.
    ///
    /// A stop request wins over a failed evaluation.
    pub(super) fn new(action: Option<Action>, residual: Result<f64, Error>) -> Self {
        match action {
            Some(Action::StopEarly) => Decision::StopEarly,
            None => match residual {
                Ok(value) => Decision::Continue(Sign::of(value)),
                Err(error) => Decision::Error(error),
            },
        }
    }
}
