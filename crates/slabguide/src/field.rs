//! Transverse field profiles of solved modes.
//!
//! Each profile is a pair of [`FieldFunction`]s: the *primary* component,
//! which is `cos κx` (even) or `sin κx` (odd) inside the core, and its
//! *companion*, which carries the transverse derivative. TE modes use
//! `(E_y, H_z) = (primary, companion)`; TM modes swap the roles so that
//! `(E_z, H_y) = (companion, primary)`.
//!
//! Outside the core both components decay as `e^{−γ(|x| − h/2)}`, with the
//! amplitude `C₀` chosen so the component is continuous at `x = ±h/2`. The
//! core amplitude `C₁` is fixed at 1.

use std::fmt;

use tracing::debug;
use uom::si::{
    angle::radian,
    f64::{Angle, Length},
    length::meter,
};

use crate::{
    ModeSolver, Waveguide, WaveguideError,
    equation::DomainViolation,
    mode::{Method, ModeFamily, ModeRequest, Parity, Polarization},
    sampling::linspace,
};

/// Sample count used by presentation layers when none is given.
pub const DEFAULT_SAMPLE_POINTS: usize = 100;

/// Which of the two components a [`FieldFunction`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// `cos κx` or `sin κx` in the core.
    Primary,
    /// The transverse derivative of the primary component.
    Companion,
}

/// Spatial zone of a transverse position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// `x < −h/2`.
    LowerCladding,
    /// `|x| ≤ h/2`.
    Core,
    /// `x > h/2`.
    UpperCladding,
}

/// A piecewise analytic field component.
///
/// Wavenumbers are in `1/m` and positions in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldFunction {
    parity: Parity,
    role: Role,
    half_thickness: f64,
    kappa: f64,
    gamma: f64,
    c0: f64,
    c1: f64,
}

impl FieldFunction {
    /// Builds a component from the core wavenumber `κ` and cladding decay `γ`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainViolation`] if `κ` is not finite, or if `γ` is zero
    /// or not finite (the companion amplitude divides by `γ`).
    pub fn new(
        parity: Parity,
        role: Role,
        thickness: Length,
        kappa: f64,
        gamma: f64,
    ) -> Result<Self, DomainViolation> {
        if !kappa.is_finite() || !gamma.is_finite() || gamma == 0.0 {
            return Err(DomainViolation {
                function: "cladding decay",
                x: kappa,
                argument: gamma,
            });
        }

        let half_thickness = thickness.get::<meter>() / 2.0;
        let c1 = 1.0;
        let edge = kappa * half_thickness;
        let c0 = match (parity, role) {
            (Parity::Even, Role::Primary) => c1 * edge.cos(),
            (Parity::Even, Role::Companion) => (kappa / gamma) * c1 * edge.sin(),
            (Parity::Odd, Role::Primary) => c1 * edge.sin(),
            (Parity::Odd, Role::Companion) => -(kappa / gamma) * c1 * edge.cos(),
        };

        Ok(Self {
            parity,
            role,
            half_thickness,
            kappa,
            gamma,
            c0,
            c1,
        })
    }

    /// Field value at a transverse position.
    #[must_use]
    pub fn at(&self, x: Length) -> f64 {
        self.value(x.get::<meter>())
    }

    /// Field value at a transverse position in metres.
    #[must_use]
    pub fn value(&self, x: f64) -> f64 {
        let region = self.region(x);
        if region == Region::Core {
            return self.core(x);
        }

        let tail = self.c0 * (-self.gamma * (x.abs() - self.half_thickness)).exp();
        let side = if region == Region::LowerCladding {
            -1.0
        } else {
            1.0
        };

        match (self.parity, self.role) {
            (Parity::Even, Role::Primary) => tail,
            (Parity::Even, Role::Companion) => -side * self.gamma * tail,
            (Parity::Odd, Role::Primary) => side * tail,
            (Parity::Odd, Role::Companion) => -self.gamma * tail,
        }
    }

    /// The zone `x` (in metres) falls in. The core includes its boundaries.
    #[must_use]
    pub fn region(&self, x: f64) -> Region {
        if x < -self.half_thickness {
            Region::LowerCladding
        } else if x <= self.half_thickness {
            Region::Core
        } else {
            Region::UpperCladding
        }
    }

    fn core(&self, x: f64) -> f64 {
        let phase = self.kappa * x;
        match (self.parity, self.role) {
            (Parity::Even, Role::Primary) => self.c1 * phase.cos(),
            (Parity::Even, Role::Companion) => -self.c1 * self.kappa * phase.sin(),
            (Parity::Odd, Role::Primary) => self.c1 * phase.sin(),
            (Parity::Odd, Role::Companion) => self.c1 * self.kappa * phase.cos(),
        }
    }

    #[must_use]
    pub fn parity(&self) -> Parity {
        self.parity
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Core transverse wavenumber `κ`, in `1/m`.
    #[must_use]
    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    /// Cladding decay constant `γ`, in `1/m`.
    #[must_use]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Cladding amplitude.
    #[must_use]
    pub fn c0(&self) -> f64 {
        self.c0
    }

    /// Core amplitude.
    #[must_use]
    pub fn c1(&self) -> f64 {
        self.c1
    }
}

/// Name of a transverse field component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldComponent {
    Ey,
    Ez,
    Hy,
    Hz,
}

impl fmt::Display for FieldComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldComponent::Ey => f.write_str("E_y"),
            FieldComponent::Ez => f.write_str("E_z"),
            FieldComponent::Hy => f.write_str("H_y"),
            FieldComponent::Hz => f.write_str("H_z"),
        }
    }
}

/// One point of a sampled profile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldSample {
    pub x: Length,
    pub electric: f64,
    pub magnetic: f64,
}

/// The electric and magnetic transverse profiles of one mode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldProfile {
    family: ModeFamily,
    thickness: Length,
    electric: FieldFunction,
    magnetic: FieldFunction,
}

impl FieldProfile {
    /// Builds the profile of `family` for a core wavenumber `κ` in `1/m`.
    ///
    /// `γ = (2/h)·W(κh/2)`, with `W` given by [`ModeFamily::cladding_decay`].
    ///
    /// # Errors
    ///
    /// Returns [`WaveguideError::DomainViolation`] if `γ` is zero or not
    /// finite, which happens at the tan/cot singularities.
    pub fn from_core_wavenumber(
        guide: &Waveguide,
        family: ModeFamily,
        kappa: f64,
    ) -> Result<Self, WaveguideError> {
        let thickness = guide.thickness();
        let h = guide.thickness_m();
        let gamma = (2.0 / h) * family.cladding_decay(guide, kappa * h / 2.0);

        let parity = family.parity();
        let primary = FieldFunction::new(parity, Role::Primary, thickness, kappa, gamma)?;
        let companion = FieldFunction::new(parity, Role::Companion, thickness, kappa, gamma)?;

        let (electric, magnetic) = match family.polarization() {
            Polarization::Te => (primary, companion),
            Polarization::Tm => (companion, primary),
        };

        Ok(Self {
            family,
            thickness,
            electric,
            magnetic,
        })
    }

    #[must_use]
    pub fn family(&self) -> ModeFamily {
        self.family
    }

    #[must_use]
    pub fn electric(&self, x: Length) -> f64 {
        self.electric.at(x)
    }

    #[must_use]
    pub fn magnetic(&self, x: Length) -> f64 {
        self.magnetic.at(x)
    }

    #[must_use]
    pub fn electric_function(&self) -> &FieldFunction {
        &self.electric
    }

    #[must_use]
    pub fn magnetic_function(&self) -> &FieldFunction {
        &self.magnetic
    }

    /// Component names as `(electric, magnetic)`.
    #[must_use]
    pub fn labels(&self) -> (FieldComponent, FieldComponent) {
        match self.family.polarization() {
            Polarization::Te => (FieldComponent::Ey, FieldComponent::Hz),
            Polarization::Tm => (FieldComponent::Ez, FieldComponent::Hy),
        }
    }

    /// `[−2h, 2h]`: the core plus one and a half thicknesses of cladding per side.
    #[must_use]
    pub fn default_window(&self) -> [Length; 2] {
        [self.thickness * -2.0, self.thickness * 2.0]
    }

    /// Evaluates both components at evenly spaced positions across `window`.
    #[must_use]
    pub fn sample(&self, window: [Length; 2], points: usize) -> Vec<FieldSample> {
        linspace(window[0].get::<meter>(), window[1].get::<meter>(), points)
            .into_iter()
            .map(|x| FieldSample {
                x: Length::new::<meter>(x),
                electric: self.electric.value(x),
                magnetic: self.magnetic.value(x),
            })
            .collect()
    }
}

/// Core transverse wavenumber `κ = k₀·n_co·cos θ`, in `1/m`.
#[must_use]
pub fn core_wavenumber(guide: &Waveguide, angle: Angle) -> f64 {
    guide.free_space_wavenumber() * guide.core_index() * angle.get::<radian>().cos()
}

impl ModeSolver {
    /// Solves a mode with the wave model and synthesizes its field profile.
    ///
    /// `parity` overrides the natural parity of `mode` when given.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`ModeSolver::solve`] and
    /// [`FieldProfile::from_core_wavenumber`].
    pub fn field_profile(
        &self,
        guide: &Waveguide,
        polarization: Polarization,
        mode: u32,
        parity: Option<Parity>,
    ) -> Result<FieldProfile, WaveguideError> {
        let solution = self.solve(guide, ModeRequest::new(polarization, mode, Method::Wave))?;
        let family = ModeFamily::new(polarization, parity.unwrap_or(Parity::of_mode(mode)));
        let kappa = core_wavenumber(guide, solution.angle());

        let profile = FieldProfile::from_core_wavenumber(guide, family, kappa)?;
        debug!(
            %polarization,
            mode,
            parity = %family.parity(),
            kappa,
            gamma = profile.electric.gamma(),
            "synthesized field profile"
        );
        Ok(profile)
    }
}

/// Synthesizes a field profile with the default solver configuration.
///
/// # Errors
///
/// See [`ModeSolver::field_profile`].
pub fn field_profile(
    guide: &Waveguide,
    polarization: Polarization,
    mode: u32,
    parity: Option<Parity>,
) -> Result<FieldProfile, WaveguideError> {
    ModeSolver::default().field_profile(guide, polarization, mode, parity)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::micrometer;

    fn reference() -> Waveguide {
        Waveguide::new(
            1.5,
            1.0,
            Length::new::<micrometer>(1.0),
            Length::new::<micrometer>(1.0),
        )
        .expect("valid geometry")
    }

    /// Compares the core value at a boundary with the cladding value just past it.
    fn assert_continuous(function: &FieldFunction, edge: f64) {
        let inside = function.value(edge);
        let outside = function.value(edge * (1.0 + 1e-12));
        assert_eq!(function.region(edge), Region::Core);
        assert_ne!(function.region(edge * (1.0 + 1e-12)), Region::Core);

        let scale = inside.abs().max(outside.abs()).max(1.0);
        assert!(
            (inside - outside).abs() <= 1e-9 * scale,
            "discontinuous at {edge}: {inside} vs {outside}"
        );
    }

    #[test]
    fn solved_profiles_are_continuous_at_both_boundaries() {
        let guide = reference();
        let edge = guide.thickness_m() / 2.0;

        for polarization in Polarization::ALL {
            for mode in 0..3 {
                let profile =
                    field_profile(&guide, polarization, mode, None).expect("mode is guided");
                for function in [profile.electric_function(), profile.magnetic_function()] {
                    assert_continuous(function, edge);
                    assert_continuous(function, -edge);
                }
            }
        }
    }

    #[test]
    fn guided_fields_decay_into_the_cladding() {
        let guide = reference();
        let h = guide.thickness();

        for mode in 0..3 {
            let profile = field_profile(&guide, Polarization::Te, mode, None).expect("guided");
            assert!(profile.electric_function().gamma() > 0.0);

            let edge = profile.electric(h * 0.5).abs();
            assert!(profile.electric(h * 2.0).abs() < edge);
            assert!(profile.electric(h * -2.0).abs() < edge);
        }
    }

    #[test]
    fn parity_sets_the_symmetry_of_the_primary_component() {
        let guide = reference();
        let even = field_profile(&guide, Polarization::Te, 0, None).expect("guided");
        let odd = field_profile(&guide, Polarization::Te, 1, None).expect("guided");

        for x_um in [0.1, 0.4, 0.5, 0.8, 1.7] {
            let x = Length::new::<micrometer>(x_um);
            assert_relative_eq!(even.electric(x), even.electric(-x), max_relative = 1e-12);
            assert_relative_eq!(odd.electric(x), -odd.electric(-x), max_relative = 1e-12);
        }
    }

    #[test]
    fn polarization_selects_component_labels_and_roles() {
        let guide = reference();

        let te = field_profile(&guide, Polarization::Te, 0, None).expect("guided");
        assert_eq!(te.labels(), (FieldComponent::Ey, FieldComponent::Hz));
        assert_eq!(te.electric_function().role(), Role::Primary);

        let tm = field_profile(&guide, Polarization::Tm, 0, None).expect("guided");
        assert_eq!(tm.labels(), (FieldComponent::Ez, FieldComponent::Hy));
        assert_eq!(tm.magnetic_function().role(), Role::Primary);
        assert_eq!(tm.labels().0.to_string(), "E_z");
    }

    #[test]
    fn parity_can_be_overridden() {
        let guide = reference();
        let profile =
            field_profile(&guide, Polarization::Te, 0, Some(Parity::Odd)).expect("finite decay");

        assert_eq!(profile.family(), ModeFamily::TeOdd);
        assert_relative_eq!(profile.electric(Length::new::<micrometer>(0.0)), 0.0);
    }

    #[test]
    fn primary_core_amplitude_is_unity() {
        let guide = reference();
        let profile = field_profile(&guide, Polarization::Te, 0, None).expect("guided");

        assert_relative_eq!(profile.electric(Length::new::<micrometer>(0.0)), 1.0);
        assert_relative_eq!(profile.electric_function().c1(), 1.0);
    }

    #[test]
    fn zero_or_infinite_decay_is_rejected() {
        let h = Length::new::<micrometer>(1.0);
        for gamma in [0.0, f64::INFINITY, f64::NAN] {
            let result = FieldFunction::new(Parity::Even, Role::Companion, h, 1e6, gamma);
            assert!(matches!(
                result,
                Err(DomainViolation {
                    function: "cladding decay",
                    ..
                })
            ));
        }
    }

    #[test]
    fn default_sampling_spans_four_thicknesses() {
        let guide = reference();
        let profile = field_profile(&guide, Polarization::Tm, 1, None).expect("guided");

        let window = profile.default_window();
        let samples = profile.sample(window, DEFAULT_SAMPLE_POINTS);

        assert_eq!(samples.len(), 100);
        assert_relative_eq!(samples[0].x.get::<micrometer>(), -2.0, epsilon = 1e-12);
        assert_relative_eq!(samples[99].x.get::<micrometer>(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(
            samples[40].electric,
            profile.electric(samples[40].x),
            max_relative = 1e-12
        );
    }

    #[test]
    fn core_wavenumber_of_normal_incidence() {
        let guide = reference();
        let kappa = core_wavenumber(&guide, Angle::new::<radian>(0.0));
        assert_relative_eq!(
            kappa,
            guide.free_space_wavenumber() * 1.5,
            max_relative = 1e-15
        );
    }
}
