//! Transcendental equations whose roots are the allowed modes.
//!
//! Each mode request maps to one scalar residual:
//!
//! - [`WaveEquation`], in the core transverse wavenumber `U = κh/2`:
//!   `z(U) = U² + W(U)² − V²`, with `W` from [`ModeFamily::cladding_decay`].
//! - [`RayEquation`], in the ray angle `θ`:
//!   `z(θ) = 2·n_co·k₀·h·cos θ − 4·Φ(θ) − 2mπ`, with `Φ` from [`phase_shift`].
//!
//! Residuals report a [`DomainViolation`] rather than a NaN or infinite value
//! when evaluated outside the range where they are defined.

use std::f64::consts::{FRAC_PI_2, PI};

use slabguide_solvers::Equation;
use thiserror::Error;

use crate::{
    Waveguide,
    mode::{Method, ModeFamily, ModeRequest, Parity, Polarization},
};

/// Radicand rounding tolerated at the critical angle.
///
/// `(n_co/n_cl)²·sin²θ_c − 1` is zero analytically but may round below it.
const RADICAND_ROUNDING: f64 = 4.0 * f64::EPSILON;

/// A function was evaluated outside its domain.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{function} is undefined at x = {x} (offending argument {argument})")]
pub struct DomainViolation {
    /// The function that could not be evaluated.
    pub function: &'static str,
    /// The independent variable at which evaluation was attempted.
    pub x: f64,
    /// The value that fell outside the domain.
    pub argument: f64,
}

/// Total-internal-reflection phase shift `Φ(θ)` at the core boundary.
///
/// ```text
/// TE: Φ = atan[(n_cl / (n_co·cos θ))·√((n_co/n_cl)²·sin²θ − 1)]
/// TM: Φ = atan[(n_co / (n_cl·cos θ))·√((n_co/n_cl)²·sin²θ − 1)]
/// ```
///
/// # Errors
///
/// Returns a [`DomainViolation`] if `θ` is outside `[0, π/2]` or below the
/// critical angle.
pub fn phase_shift(
    polarization: Polarization,
    core_index: f64,
    cladding_index: f64,
    theta: f64,
) -> Result<f64, DomainViolation> {
    if !(0.0..=FRAC_PI_2).contains(&theta) {
        return Err(DomainViolation {
            function: "phase shift",
            x: theta,
            argument: theta,
        });
    }

    let index_ratio = core_index / cladding_index;
    let radicand = (index_ratio * theta.sin()).powi(2) - 1.0;
    if radicand < -RADICAND_ROUNDING {
        return Err(DomainViolation {
            function: "phase shift square root",
            x: theta,
            argument: radicand,
        });
    }

    let weight = match polarization {
        Polarization::Te => cladding_index / (core_index * theta.cos()),
        Polarization::Tm => core_index / (cladding_index * theta.cos()),
    };

    Ok((weight * radicand.max(0.0).sqrt()).atan())
}

/// Wave-model dispersion relation for one mode, in `U = κh/2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveEquation {
    guide: Waveguide,
    family: ModeFamily,
    mode: u32,
    v_squared: f64,
}

impl WaveEquation {
    #[must_use]
    pub fn new(guide: &Waveguide, polarization: Polarization, mode: u32) -> Self {
        Self {
            guide: *guide,
            family: ModeFamily::new(polarization, Parity::of_mode(mode)),
            mode,
            v_squared: guide.normalized_frequency().powi(2),
        }
    }

    #[must_use]
    pub fn family(&self) -> ModeFamily {
        self.family
    }

    /// `[mπ/2, (m+1)π/2]`: one branch of `W` per mode.
    #[must_use]
    pub fn bracket(&self) -> [f64; 2] {
        let m = f64::from(self.mode);
        [m * FRAC_PI_2, (m + 1.0) * FRAC_PI_2]
    }
}

impl Equation for WaveEquation {
    type Error = DomainViolation;

    fn residual(&self, u: f64) -> Result<f64, Self::Error> {
        if u.is_nan() || u < 0.0 {
            return Err(DomainViolation {
                function: "wave dispersion relation",
                x: u,
                argument: u,
            });
        }

        let w = self.family.cladding_decay(&self.guide, u);
        if !w.is_finite() {
            return Err(DomainViolation {
                function: "cladding decay",
                x: u,
                argument: w,
            });
        }

        Ok(u * u + w * w - self.v_squared)
    }
}

/// Ray-model transverse resonance condition for one mode, in `θ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayEquation {
    polarization: Polarization,
    mode: u32,
    core_index: f64,
    cladding_index: f64,
    round_trip_phase: f64,
    critical_angle: f64,
}

impl RayEquation {
    #[must_use]
    pub fn new(guide: &Waveguide, polarization: Polarization, mode: u32) -> Self {
        Self {
            polarization,
            mode,
            core_index: guide.core_index(),
            cladding_index: guide.cladding_index(),
            round_trip_phase: 2.0
                * guide.core_index()
                * guide.free_space_wavenumber()
                * guide.thickness_m(),
            critical_angle: (guide.cladding_index() / guide.core_index()).asin(),
        }
    }

    /// `[θ_c, π/2]` for every mode.
    ///
    /// The residual decreases strictly over this interval, and the `−2mπ`
    /// term shifts it down by a full cycle per mode, so each supported mode
    /// has exactly one distinct root here.
    #[must_use]
    pub fn bracket(&self) -> [f64; 2] {
        [self.critical_angle, FRAC_PI_2]
    }
}

impl Equation for RayEquation {
    type Error = DomainViolation;

    fn residual(&self, theta: f64) -> Result<f64, Self::Error> {
        let shift = phase_shift(
            self.polarization,
            self.core_index,
            self.cladding_index,
            theta,
        )?;

        Ok(self.round_trip_phase * theta.cos() - 4.0 * shift - 2.0 * f64::from(self.mode) * PI)
    }
}

/// The residual selected by a [`ModeRequest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransverseEquation {
    Ray(RayEquation),
    Wave(WaveEquation),
}

impl TransverseEquation {
    /// Builds the equation for `request` on `guide`.
    #[must_use]
    pub fn build(guide: &Waveguide, request: ModeRequest) -> Self {
        match request.method {
            Method::Ray => Self::Ray(RayEquation::new(guide, request.polarization, request.mode)),
            Method::Wave => {
                Self::Wave(WaveEquation::new(guide, request.polarization, request.mode))
            }
        }
    }

    /// The search bracket that isolates this mode's root.
    #[must_use]
    pub fn bracket(&self) -> [f64; 2] {
        match self {
            Self::Ray(equation) => equation.bracket(),
            Self::Wave(equation) => equation.bracket(),
        }
    }
}

impl Equation for TransverseEquation {
    type Error = DomainViolation;

    fn residual(&self, x: f64) -> Result<f64, Self::Error> {
        match self {
            Self::Ray(equation) => equation.residual(x),
            Self::Wave(equation) => equation.residual(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Length, length::micrometer};

    use crate::sampling::linspace;

    fn reference() -> Waveguide {
        Waveguide::new(
            1.5,
            1.0,
            Length::new::<micrometer>(1.0),
            Length::new::<micrometer>(1.0),
        )
        .expect("valid geometry")
    }

    #[test]
    fn te_wave_residual_matches_closed_form() {
        let guide = reference();
        let target = 1.25 * PI * PI;

        for mode in 0..3 {
            let equation = WaveEquation::new(&guide, Polarization::Te, mode);
            for u in linspace(0.001, FRAC_PI_2 - 0.001, 50) {
                let expected = if mode % 2 == 0 {
                    (u * u.tan()).powi(2) + u * u - target
                } else {
                    (u / u.tan()).powi(2) + u * u - target
                };
                let residual = equation.residual(u).expect("inside domain");
                assert_relative_eq!(residual, expected, epsilon = 1e-9, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn tm_wave_residual_matches_closed_form() {
        let guide = reference();
        let target = 1.25 * PI * PI;
        let ratio = (1.0_f64 / 1.5).powi(2);

        for mode in 0..3 {
            let equation = WaveEquation::new(&guide, Polarization::Tm, mode);
            for u in linspace(0.001, FRAC_PI_2 - 0.001, 50) {
                let expected = if mode % 2 == 0 {
                    (ratio * u * u.tan()).powi(2) + u * u - target
                } else {
                    (ratio * u / u.tan()).powi(2) + u * u - target
                };
                let residual = equation.residual(u).expect("inside domain");
                assert_relative_eq!(residual, expected, epsilon = 1e-9, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn ray_residual_matches_closed_form() {
        let guide = reference();
        let critical = (2.0_f64 / 3.0).asin();

        let te = |theta: f64, m: f64| {
            6.0 * PI * theta.cos()
                - 4.0 * ((2.25 * theta.sin().powi(2) - 1.0).sqrt() / (1.5 * theta.cos())).atan()
                - 2.0 * m * PI
        };
        let tm = |theta: f64, m: f64| {
            6.0 * PI * theta.cos()
                - 4.0 * (1.5 * (2.25 * theta.sin().powi(2) - 1.0).sqrt() / theta.cos()).atan()
                - 2.0 * m * PI
        };

        for mode in 0..3 {
            let te_equation = RayEquation::new(&guide, Polarization::Te, mode);
            let tm_equation = RayEquation::new(&guide, Polarization::Tm, mode);
            for theta in linspace(critical + 1e-9, FRAC_PI_2 - 1e-9, 50) {
                let m = f64::from(mode);
                assert_relative_eq!(
                    te_equation.residual(theta).expect("inside domain"),
                    te(theta, m),
                    epsilon = 1e-9
                );
                assert_relative_eq!(
                    tm_equation.residual(theta).expect("inside domain"),
                    tm(theta, m),
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn ray_residual_is_defined_on_the_whole_bracket() {
        let guide = reference();
        for mode in 0..3 {
            let equation = RayEquation::new(&guide, Polarization::Tm, mode);
            let [low, high] = equation.bracket();
            assert!(equation.residual(low).is_ok());
            assert!(equation.residual(high).is_ok());
        }
    }

    #[test]
    fn phase_shift_rejects_angles_below_critical() {
        let result = phase_shift(Polarization::Te, 1.5, 1.0, 0.2);
        assert!(matches!(
            result,
            Err(DomainViolation {
                function: "phase shift square root",
                ..
            })
        ));
    }

    #[test]
    fn phase_shift_rejects_angles_outside_quadrant() {
        assert!(phase_shift(Polarization::Tm, 1.5, 1.0, -0.1).is_err());
        assert!(phase_shift(Polarization::Tm, 1.5, 1.0, 2.0).is_err());
    }

    #[test]
    fn phase_shift_spans_zero_to_quarter_turn() {
        let critical = (1.0_f64 / 1.5).asin();
        for polarization in Polarization::ALL {
            let at_critical = phase_shift(polarization, 1.5, 1.0, critical).expect("defined");
            let at_grazing = phase_shift(polarization, 1.5, 1.0, FRAC_PI_2).expect("defined");
            assert_relative_eq!(at_critical, 0.0, epsilon = 1e-6);
            assert_relative_eq!(at_grazing, FRAC_PI_2, epsilon = 1e-9);
        }
    }

    #[test]
    fn tm_phase_shift_exceeds_te() {
        let theta = 1.2;
        let te = phase_shift(Polarization::Te, 1.5, 1.0, theta).expect("defined");
        let tm = phase_shift(Polarization::Tm, 1.5, 1.0, theta).expect("defined");
        assert!(tm > te);
    }

    #[test]
    fn wave_brackets_tile_the_positive_axis() {
        let guide = reference();
        let brackets: Vec<_> = (0..4)
            .map(|mode| WaveEquation::new(&guide, Polarization::Te, mode).bracket())
            .collect();

        assert_relative_eq!(brackets[0][0], 0.0);
        for pair in brackets.windows(2) {
            assert_relative_eq!(pair[0][1], pair[1][0]);
            assert_relative_eq!(pair[0][1] - pair[0][0], FRAC_PI_2);
        }
    }

    #[test]
    fn wave_residual_rejects_singularities_and_negative_input() {
        let guide = reference();
        let odd = WaveEquation::new(&guide, Polarization::Te, 1);

        assert!(matches!(
            odd.residual(0.0),
            Err(DomainViolation {
                function: "cladding decay",
                ..
            })
        ));
        assert!(odd.residual(-0.5).is_err());
        assert!(odd.residual(f64::NAN).is_err());
    }

    #[test]
    fn transverse_equation_dispatches_on_method() {
        let guide = reference();

        let request = |method| ModeRequest::new(Polarization::Te, 1, method);
        let ray = TransverseEquation::build(&guide, request(Method::Ray));
        let wave = TransverseEquation::build(&guide, request(Method::Wave));

        assert!(matches!(ray, TransverseEquation::Ray(_)));
        assert!(matches!(wave, TransverseEquation::Wave(_)));
        assert_relative_eq!(ray.bracket()[1], FRAC_PI_2);
        assert_relative_eq!(wave.bracket()[1], PI);
    }
}
