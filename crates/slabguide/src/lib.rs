//! Guided modes of symmetric planar dielectric waveguides.
//!
//! A [`Waveguide`] is a core of index `n_co` and thickness `h` between two
//! claddings of index `n_cl`, illuminated at wavelength `λ`. This crate finds
//! its guided modes and what follows from them:
//!
//! - [`ModeSolver`] locates each mode by bisection on a transverse resonance
//!   condition, using either ray optics or the wave equation ([`Method`]).
//! - [`ModeTable`] collects TE and TM solutions for a set of mode indices.
//! - [`FieldProfile`] gives the closed-form transverse fields of a mode.
//! - [`CoupledPair`] models power exchange between two parallel guides.
//!
//! Lengths cross the API as [`uom`] quantities; angles are reported as
//! [`uom::si::f64::Angle`] with degree helpers for tabulation.
//!
//! # Example
//!
//! ```
//! use slabguide::{Method, Polarization, Waveguide, solve_modes};
//! use uom::si::{f64::Length, length::micrometer};
//!
//! let guide = Waveguide::new(
//!     1.5,
//!     1.0,
//!     Length::new::<micrometer>(1.0),
//!     Length::new::<micrometer>(1.0),
//! )
//! .unwrap();
//!
//! let table = solve_modes(&guide, 0..3, Method::Wave).unwrap();
//! let te0 = table.get(Polarization::Te, 0).unwrap();
//! assert!((te0.angle_degrees() - 75.03).abs() < 0.01);
//! ```

mod coupling;
mod error;
mod field;
mod mode;
mod sampling;
mod solver;
mod table;
mod waveguide;

pub mod equation;

pub use coupling::{
    CoupledPair, CouplingParams, CouplingRatio, PowerSample, PowerTransfer,
    STANDARD_COUPLING_RATIOS, coupling_params, power_curves,
};
pub use error::WaveguideError;
pub use field::{
    DEFAULT_SAMPLE_POINTS, FieldComponent, FieldFunction, FieldProfile, FieldSample, Region, Role,
    core_wavenumber, field_profile,
};
pub use mode::{Method, ModeFamily, ModeRequest, Parity, Polarization};
pub use sampling::linspace;
pub use solver::{ModeSolution, ModeSolver};
pub use table::{ModeTable, effective_index, solve_modes};
pub use waveguide::Waveguide;

pub use equation::DomainViolation;
pub use slabguide_solvers::{Equation, bisection::Config as SolverConfig};
