use thiserror::Error;

use slabguide_solvers::bisection;

use crate::{equation::DomainViolation, mode::Polarization};

/// Errors produced by the waveguide engine.
///
/// Every variant is deterministic for a given input; none of them are
/// transient or worth retrying.
#[derive(Debug, Error)]
pub enum WaveguideError {
    /// The waveguide parameters cannot guide light.
    ///
    /// Raised before any solve is attempted.
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: &'static str },

    /// The mode's residual has no sign change in its search bracket.
    ///
    /// The requested mode is beyond cutoff for this geometry.
    #[error(
        "{polarization} mode {mode} is not supported: no root in [{:.6}, {:.6}]",
        .bracket[0],
        .bracket[1]
    )]
    NoRootInBracket {
        polarization: Polarization,
        mode: u32,
        bracket: [f64; 2],
    },

    /// The bisection budget ran out before the mode converged.
    #[error("{polarization} mode {mode} did not converge after {iters} iterations")]
    NotConverged {
        polarization: Polarization,
        mode: u32,
        iters: usize,
    },

    /// A transcendental function was evaluated outside its domain.
    #[error(transparent)]
    DomainViolation(#[from] DomainViolation),

    /// Identical propagation constants or full coupling (`F = 1`).
    ///
    /// Either case leaves the coupling coefficient undefined.
    #[error("degenerate coupling: delta = {delta}, F = {ratio}")]
    DegenerateCoupling { delta: f64, ratio: f64 },

    /// The coupling ratio is outside `(0, 1]`.
    #[error("coupling ratio must be in (0, 1], got {value}")]
    InvalidCouplingRatio { value: f64 },

    /// An effective index is not a finite positive number.
    #[error("effective index must be finite and positive, got {value}")]
    InvalidEffectiveIndex { value: f64 },

    /// Any other failure reported by the root solver.
    #[error("root solver failed")]
    Solver(#[source] bisection::Error),
}
