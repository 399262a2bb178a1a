//! Bisection root finding on a sign-changing bracket.
//!
//! # Algorithm
//!
//! Both endpoints are evaluated first. If their residuals share a sign the
//! bracket cannot contain a root and the solve fails with
//! [`BracketError::NoSignChange`]; no iteration is attempted. Otherwise the
//! solver repeatedly evaluates the midpoint and keeps the half whose ends
//! still have opposite signs, so each iteration halves the bracket width.
//!
//! The reported root is the evaluation with the smallest residual magnitude.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per evaluation: [`Event::Left`] and
//! [`Event::Right`] for the endpoints, then [`Event::Midpoint`] for every
//! iteration. Observers can return [`Action::StopEarly`] to halt immediately.

mod action;
mod best;
mod bracket;
mod config;
mod decision;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use bracket::{Bracket, BracketError, Sign};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use crate::{Equation, Observer};

use best::Best;
use bracket::Bounds;
use decision::Decision;

/// Finds a root of the equation using the bisection method.
///
/// The observer sees every evaluation; see the [module docs](self).
///
/// # Errors
///
/// Returns an error if the bracket is invalid or has no sign change, or if an
/// evaluation fails or yields a non-finite residual before the observer
/// stops the solve.
pub fn solve<E, Obs>(
    equation: &E,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    E: Equation,
    Obs: for<'a> Observer<Event<'a, E>, Action>,
{
    let bounds = Bounds::new(bracket)?;
    let mut best = Best::default();

    let left_sign = match probe(equation, &mut observer, bounds.left(), Probe::Left, &mut best) {
        Decision::Continue(sign) => sign,
        Decision::StopEarly => return best.finish(Status::StoppedByObserver, 0),
        Decision::Error(error) => return Err(error),
    };
    if best.is_residual_converged(config.residual_tol()) {
        return best.finish(Status::Converged, 0);
    }

    let right_sign = match probe(equation, &mut observer, bounds.right(), Probe::Right, &mut best)
    {
        Decision::Continue(sign) => sign,
        Decision::StopEarly => return best.finish(Status::StoppedByObserver, 0),
        Decision::Error(error) => return Err(error),
    };
    if best.is_residual_converged(config.residual_tol()) {
        return best.finish(Status::Converged, 0);
    }

    let mut bracket = Bracket::new(bounds, left_sign, right_sign)?;

    for iter in 1..=config.max_iters() {
        let mid = bracket.midpoint();
        match probe(equation, &mut observer, mid, Probe::Midpoint(&bracket), &mut best) {
            Decision::Continue(sign) => bracket.shrink(mid, sign),
            Decision::StopEarly => return best.finish(Status::StoppedByObserver, iter),
            Decision::Error(error) => return Err(error),
        }

        if best.is_residual_converged(config.residual_tol())
            || bracket.is_x_converged(config.x_abs_tol(), config.x_rel_tol())
        {
            return best.finish(Status::Converged, iter);
        }
    }

    best.finish(Status::MaxIters, config.max_iters())
}

/// Finds a root of the equation without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<E: Equation>(
    equation: &E,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution, Error> {
    solve(equation, bracket, config, ())
}

/// Which evaluation is being made, for building the observer event.
enum Probe<'b> {
    Left,
    Right,
    Midpoint(&'b Bracket),
}

/// Evaluates at `x`, notifies the observer, and records successful residuals.
fn probe<E, Obs>(
    equation: &E,
    observer: &mut Obs,
    x: f64,
    probe: Probe<'_>,
    best: &mut Best,
) -> Decision
where
    E: Equation,
    Obs: for<'a> Observer<Event<'a, E>, Action>,
{
    let result = equation.residual(x);
    let event = match probe {
        Probe::Left => Event::Left { x, result: &result },
        Probe::Right => Event::Right { x, result: &result },
        Probe::Midpoint(bracket) => Event::Midpoint {
            x,
            bracket,
            result: &result,
        },
    };
    let action = observer.observe(&event);

    let residual = match result {
        Ok(residual) if residual.is_finite() => Ok(residual),
        Ok(residual) => Err(Error::NonFiniteResidual { x, residual }),
        Err(source) => Err(Error::Equation {
            x,
            source: Box::new(source),
        }),
    };

    if action.is_none() {
        if let Ok(residual) = residual {
            best.update(x, residual);
        }
    }

    Decision::new(action, residual)
}
