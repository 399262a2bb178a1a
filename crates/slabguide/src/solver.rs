use std::f64::consts::PI;

use slabguide_solvers::bisection::{self, Action, BracketError, Config, Event, Status};
use tracing::{debug, trace, warn};
use uom::si::{
    angle::{degree, radian},
    f64::Angle,
};

use crate::{
    Waveguide, WaveguideError,
    equation::{DomainViolation, TransverseEquation},
    mode::{Method, ModeRequest, Polarization},
};

/// A solved guided mode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeSolution {
    request: ModeRequest,
    angle: Angle,
    root: f64,
    effective_index: f64,
    iters: usize,
}

impl ModeSolution {
    #[must_use]
    pub fn request(&self) -> ModeRequest {
        self.request
    }

    #[must_use]
    pub fn polarization(&self) -> Polarization {
        self.request.polarization
    }

    #[must_use]
    pub fn mode(&self) -> u32 {
        self.request.mode
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.request.method
    }

    /// Ray angle measured from the core boundary normal.
    #[must_use]
    pub fn angle(&self) -> Angle {
        self.angle
    }

    #[must_use]
    pub fn angle_degrees(&self) -> f64 {
        self.angle.get::<degree>()
    }

    /// The root the solver located: `U = κh/2` for the wave model, `θ` in
    /// radians for the ray model.
    #[must_use]
    pub fn root(&self) -> f64 {
        self.root
    }

    /// `n_eff = n_co·sin θ`.
    #[must_use]
    pub fn effective_index(&self) -> f64 {
        self.effective_index
    }

    /// Bisection iterations spent on this mode.
    #[must_use]
    pub fn iters(&self) -> usize {
        self.iters
    }
}

/// Locates guided modes by bisection on their transverse equations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModeSolver {
    config: Config,
}

impl ModeSolver {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Solves a single mode.
    ///
    /// # Errors
    ///
    /// - [`WaveguideError::NoRootInBracket`] if the mode is beyond cutoff.
    /// - [`WaveguideError::DomainViolation`] if the residual or the angle
    ///   conversion leaves its domain.
    /// - [`WaveguideError::NotConverged`] if the iteration budget runs out.
    pub fn solve(
        &self,
        guide: &Waveguide,
        request: ModeRequest,
    ) -> Result<ModeSolution, WaveguideError> {
        let equation = TransverseEquation::build(guide, request);
        let bracket = equation.bracket();

        let observer = |event: &Event<'_, TransverseEquation>| -> Option<Action> {
            if let Event::Midpoint { bracket, .. } = event {
                trace!(
                    polarization = %request.polarization,
                    mode = request.mode,
                    x = event.x(),
                    residual = event.residual(),
                    width = bracket.width(),
                    "bisection midpoint"
                );
            }
            None
        };

        let solution = bisection::solve(&equation, bracket, &self.config, observer)
            .map_err(|error| classify(error, request, bracket))?;

        if solution.status != Status::Converged {
            return Err(WaveguideError::NotConverged {
                polarization: request.polarization,
                mode: request.mode,
                iters: solution.iters,
            });
        }

        let theta = match request.method {
            Method::Ray => solution.x,
            Method::Wave => angle_from_transverse(guide, solution.x)?,
        };
        let effective_index = guide.core_index() * theta.sin();

        debug!(
            polarization = %request.polarization,
            mode = request.mode,
            method = ?request.method,
            angle_deg = theta.to_degrees(),
            effective_index,
            iters = solution.iters,
            "solved mode"
        );

        Ok(ModeSolution {
            request,
            angle: Angle::new::<radian>(theta),
            root: solution.x,
            effective_index,
            iters: solution.iters,
        })
    }
}

/// Converts a wave-model root `U = κh/2` to the ray angle.
///
/// `U = (π·n_co·h/λ)·cos θ`.
fn angle_from_transverse(guide: &Waveguide, u: f64) -> Result<f64, DomainViolation> {
    let cos_theta = u * guide.wavelength_m() / (PI * guide.core_index() * guide.thickness_m());

    if !(-1.0..=1.0).contains(&cos_theta) {
        return Err(DomainViolation {
            function: "arccos",
            x: u,
            argument: cos_theta,
        });
    }

    Ok(cos_theta.acos())
}

/// Maps a bisection failure onto the waveguide error taxonomy.
fn classify(error: bisection::Error, request: ModeRequest, bracket: [f64; 2]) -> WaveguideError {
    match error {
        bisection::Error::InvalidBracket(BracketError::NoSignChange) => {
            warn!(
                polarization = %request.polarization,
                mode = request.mode,
                method = ?request.method,
                "mode not supported: no root in bracket"
            );
            WaveguideError::NoRootInBracket {
                polarization: request.polarization,
                mode: request.mode,
                bracket,
            }
        }
        bisection::Error::Equation { x, source } => match source.downcast::<DomainViolation>() {
            Ok(violation) => WaveguideError::DomainViolation(*violation),
            Err(source) => WaveguideError::Solver(bisection::Error::Equation { x, source }),
        },
        other => WaveguideError::Solver(other),
    }
}
