//! Scalar root-finding solvers for the slabguide mode engine.
//!
//! This crate defines the small set of abstractions the mode solver builds on:
//!
//! - [`Equation`]: a scalar residual function whose zero is sought
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`bisection`]: guaranteed convergence on a sign-changing bracket

mod equation;
mod observer;

pub mod bisection;

pub use equation::Equation;
pub use observer::Observer;
