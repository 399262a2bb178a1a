//! Coupled-mode power exchange between two parallel waveguides.
//!
//! Two guides `a` and `b` with effective indices `n₁` and `n₂` have
//! propagation constants `βᵢ = k₀·nᵢ` and a phase mismatch
//! `δ = (β₁ − β₂)/2`. For a coupling ratio `F ∈ (0, 1)`:
//!
//! ```text
//! κ   = δ / √(1/F − 1)
//! ψ   = √(δ² + κ²)
//! L_c = π / (2ψ)
//! P_b(z) = F·sin²(ψz)
//! P_a(z) = 1 − P_b(z)
//! ```
//!
//! All power starts in guide `a`. Propagation constants are in `1/m`.

use std::f64::consts::PI;

use tracing::debug;
use uom::si::{f64::Length, length::meter};

use crate::{ModeSolution, Waveguide, WaveguideError, sampling::linspace};

/// Coupling ratios studied for each adjacent mode pair.
pub const STANDARD_COUPLING_RATIOS: [f64; 2] = [0.2, 0.5];

/// The fraction `F` of power that can be transferred, in `(0, 1]`.
///
/// # Examples
///
/// ```
/// use slabguide::CouplingRatio;
///
/// let ratio = CouplingRatio::new(0.5).unwrap();
/// assert_eq!(ratio.value(), 0.5);
///
/// assert!(CouplingRatio::new(0.0).is_err());
/// assert!(CouplingRatio::new(1.5).is_err());
/// assert!(CouplingRatio::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct CouplingRatio(f64);

impl CouplingRatio {
    /// # Errors
    ///
    /// Returns [`WaveguideError::InvalidCouplingRatio`] unless `0 < value ≤ 1`.
    pub fn new(value: f64) -> Result<Self, WaveguideError> {
        if value.is_nan() || value <= 0.0 || value > 1.0 {
            return Err(WaveguideError::InvalidCouplingRatio { value });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Two waveguides at a common wavelength, described by their modes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct CoupledPair {
    beta1: f64,
    beta2: f64,
    delta: f64,
}

impl CoupledPair {
    /// # Errors
    ///
    /// - [`WaveguideError::InvalidEffectiveIndex`] if either index is not
    ///   finite and positive.
    /// - [`WaveguideError::InvalidGeometry`] if the wavelength is not finite
    ///   and positive.
    pub fn new(
        effective_index1: f64,
        effective_index2: f64,
        wavelength: Length,
    ) -> Result<Self, WaveguideError> {
        for value in [effective_index1, effective_index2] {
            if !value.is_finite() || value <= 0.0 {
                return Err(WaveguideError::InvalidEffectiveIndex { value });
            }
        }

        let wavelength = wavelength.get::<meter>();
        if !wavelength.is_finite() || wavelength <= 0.0 {
            return Err(WaveguideError::InvalidGeometry {
                reason: "wavelength must be finite and positive",
            });
        }

        let k0 = 2.0 * PI / wavelength;
        let beta1 = k0 * effective_index1;
        let beta2 = k0 * effective_index2;

        Ok(Self {
            beta1,
            beta2,
            delta: (beta1 - beta2) / 2.0,
        })
    }

    /// Couples two solved modes of the same waveguide geometry.
    ///
    /// # Errors
    ///
    /// See [`CoupledPair::new`].
    pub fn from_modes(
        guide: &Waveguide,
        a: &ModeSolution,
        b: &ModeSolution,
    ) -> Result<Self, WaveguideError> {
        Self::new(a.effective_index(), b.effective_index(), guide.wavelength())
    }

    #[must_use]
    pub fn beta1(&self) -> f64 {
        self.beta1
    }

    #[must_use]
    pub fn beta2(&self) -> f64 {
        self.beta2
    }

    /// Half the propagation-constant mismatch, `(β₁ − β₂)/2`.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Derives the coupling coefficient and beat length for a ratio `F`.
    ///
    /// # Errors
    ///
    /// Returns [`WaveguideError::DegenerateCoupling`] if `δ = 0` or `F = 1`,
    /// where `κ` is undefined.
    #[allow(clippy::float_cmp)]
    pub fn params(&self, ratio: CouplingRatio) -> Result<CouplingParams, WaveguideError> {
        let f = ratio.value();
        if self.delta == 0.0 || f == 1.0 {
            return Err(WaveguideError::DegenerateCoupling {
                delta: self.delta,
                ratio: f,
            });
        }

        let kappa = self.delta / (1.0 / f - 1.0).sqrt();
        let psi = self.delta.hypot(kappa);
        let coupling_length = Length::new::<meter>(PI / (2.0 * psi));

        debug!(
            delta = self.delta,
            ratio = f,
            kappa,
            psi,
            coupling_length_m = coupling_length.get::<meter>(),
            "coupling parameters"
        );

        Ok(CouplingParams {
            pair: *self,
            ratio,
            kappa,
            psi,
            coupling_length,
        })
    }

    /// # Errors
    ///
    /// See [`CoupledPair::params`].
    pub fn power_transfer(&self, ratio: CouplingRatio) -> Result<PowerTransfer, WaveguideError> {
        self.params(ratio).map(|params| params.power_transfer())
    }
}

/// Coupled-mode parameters of a pair at one coupling ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct CouplingParams {
    pair: CoupledPair,
    ratio: CouplingRatio,
    kappa: f64,
    psi: f64,
    coupling_length: Length,
}

impl CouplingParams {
    #[must_use]
    pub fn beta1(&self) -> f64 {
        self.pair.beta1
    }

    #[must_use]
    pub fn beta2(&self) -> f64 {
        self.pair.beta2
    }

    #[must_use]
    pub fn delta(&self) -> f64 {
        self.pair.delta
    }

    #[must_use]
    pub fn ratio(&self) -> CouplingRatio {
        self.ratio
    }

    /// Coupling coefficient `κ`, in `1/m`.
    #[must_use]
    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    #[must_use]
    pub fn psi(&self) -> f64 {
        self.psi
    }

    /// Distance over which guide `b` first reaches its peak power `F`.
    #[must_use]
    pub fn coupling_length(&self) -> Length {
        self.coupling_length
    }

    #[must_use]
    pub fn power_transfer(&self) -> PowerTransfer {
        PowerTransfer {
            psi: self.psi,
            ratio: self.ratio.value(),
        }
    }
}

/// One point of sampled power curves.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerSample {
    pub z: Length,
    pub pa: f64,
    pub pb: f64,
}

/// Normalized power in each guide along the propagation axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerTransfer {
    psi: f64,
    ratio: f64,
}

impl PowerTransfer {
    /// Power remaining in guide `a`.
    #[must_use]
    pub fn pa(&self, z: Length) -> f64 {
        1.0 - self.pb(z)
    }

    /// Power transferred to guide `b`.
    #[must_use]
    pub fn pb(&self, z: Length) -> f64 {
        self.pb_at(z.get::<meter>())
    }

    /// `[0, 2π/ψ]`, which covers two full exchange periods.
    #[must_use]
    pub fn default_window(&self) -> [Length; 2] {
        [
            Length::new::<meter>(0.0),
            Length::new::<meter>(2.0 * PI / self.psi),
        ]
    }

    #[must_use]
    pub fn sample(&self, window: [Length; 2], points: usize) -> Vec<PowerSample> {
        linspace(window[0].get::<meter>(), window[1].get::<meter>(), points)
            .into_iter()
            .map(|z| {
                let pb = self.pb_at(z);
                PowerSample {
                    z: Length::new::<meter>(z),
                    pa: 1.0 - pb,
                    pb,
                }
            })
            .collect()
    }

    fn pb_at(&self, z: f64) -> f64 {
        self.ratio * (self.psi * z).sin().powi(2)
    }
}

/// Coupling parameters from two effective indices.
///
/// # Errors
///
/// Fails on invalid inputs (see [`CoupledPair::new`] and
/// [`CouplingRatio::new`]) or degenerate coupling.
pub fn coupling_params(
    effective_index1: f64,
    effective_index2: f64,
    wavelength: Length,
    ratio: f64,
) -> Result<CouplingParams, WaveguideError> {
    let ratio = CouplingRatio::new(ratio)?;
    CoupledPair::new(effective_index1, effective_index2, wavelength)?.params(ratio)
}

/// Power curves from two effective indices.
///
/// # Errors
///
/// See [`coupling_params`].
pub fn power_curves(
    effective_index1: f64,
    effective_index2: f64,
    wavelength: Length,
    ratio: f64,
) -> Result<PowerTransfer, WaveguideError> {
    coupling_params(effective_index1, effective_index2, wavelength, ratio)
        .map(|params| params.power_transfer())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::micrometer;

    fn um(value: f64) -> Length {
        Length::new::<micrometer>(value)
    }

    #[test]
    fn half_ratio_makes_kappa_equal_delta() {
        let params = coupling_params(1.45, 1.44, um(1.0), 0.5).expect("valid coupler");

        let delta = PI * 0.01 / 1e-6;
        assert_relative_eq!(params.delta(), delta, max_relative = 1e-9);
        assert_relative_eq!(params.kappa(), delta, max_relative = 1e-9);
        assert_relative_eq!(params.psi(), delta * 2.0_f64.sqrt(), max_relative = 1e-9);
        assert_relative_eq!(
            params.coupling_length().get::<micrometer>(),
            1e2 / (2.0 * 2.0_f64.sqrt()),
            max_relative = 1e-9
        );
    }

    #[test]
    fn propagation_constants_scale_with_wavenumber() {
        let pair = CoupledPair::new(1.5, 1.4, um(0.5)).expect("valid pair");
        let k0 = 2.0 * PI / 0.5e-6;
        assert_relative_eq!(pair.beta1(), 1.5 * k0, max_relative = 1e-12);
        assert_relative_eq!(pair.beta2(), 1.4 * k0, max_relative = 1e-12);
    }

    #[test]
    fn peak_transfer_is_reached_at_coupling_length() {
        for ratio in STANDARD_COUPLING_RATIOS {
            let params = coupling_params(1.47, 1.43, um(1.0), ratio).expect("valid coupler");
            let power = params.power_transfer();

            assert_relative_eq!(
                power.pb(params.coupling_length()),
                ratio,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn all_power_starts_in_guide_a() {
        let power = power_curves(1.47, 1.43, um(1.0), 0.2).expect("valid coupler");
        assert_eq!(power.pa(um(0.0)), 1.0);
        assert_eq!(power.pb(um(0.0)), 0.0);
    }

    #[test]
    fn power_is_conserved_along_the_window() {
        let power = power_curves(1.47, 1.43, um(1.0), 0.5).expect("valid coupler");
        let samples = power.sample(power.default_window(), 257);

        assert_eq!(samples.len(), 257);
        for sample in samples {
            assert_relative_eq!(sample.pa + sample.pb, 1.0, epsilon = 1e-12);
            assert!(sample.pb <= 0.5 + 1e-12);
        }
    }

    #[test]
    fn default_window_covers_two_exchange_periods() {
        let power = power_curves(1.47, 1.43, um(1.0), 0.5).expect("valid coupler");
        let [start, end] = power.default_window();

        assert_relative_eq!(start.get::<meter>(), 0.0);
        assert_relative_eq!(power.pb(end), 0.0, epsilon = 1e-12);
        assert_relative_eq!(power.pb(end * 0.25), 0.5, max_relative = 1e-12);
    }

    #[test]
    fn identical_indices_are_degenerate() {
        let result = coupling_params(1.46, 1.46, um(1.0), 0.5);
        assert!(matches!(
            result,
            Err(WaveguideError::DegenerateCoupling { delta, .. }) if delta == 0.0
        ));
    }

    #[test]
    fn full_coupling_ratio_is_degenerate() {
        let result = coupling_params(1.47, 1.43, um(1.0), 1.0);
        assert!(matches!(
            result,
            Err(WaveguideError::DegenerateCoupling { ratio, .. }) if ratio == 1.0
        ));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert!(matches!(
            coupling_params(1.47, 1.43, um(1.0), 0.0),
            Err(WaveguideError::InvalidCouplingRatio { .. })
        ));
        assert!(matches!(
            coupling_params(-1.0, 1.43, um(1.0), 0.5),
            Err(WaveguideError::InvalidEffectiveIndex { .. })
        ));
        assert!(matches!(
            coupling_params(1.47, f64::NAN, um(1.0), 0.5),
            Err(WaveguideError::InvalidEffectiveIndex { .. })
        ));
        assert!(matches!(
            coupling_params(1.47, 1.43, um(0.0), 0.5),
            Err(WaveguideError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn kappa_takes_the_sign_of_the_mismatch() {
        let params = coupling_params(1.43, 1.47, um(1.0), 0.2).expect("valid coupler");
        assert!(params.delta() < 0.0);
        assert!(params.kappa() < 0.0);
        assert!(params.psi() > 0.0);
    }
}
