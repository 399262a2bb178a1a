use std::f64::consts::PI;

use uom::si::{
    angle::radian,
    f64::{Angle, Length},
    length::meter,
};

use crate::WaveguideError;

/// A symmetric planar dielectric waveguide at a given wavelength.
///
/// The core of refractive index `n_co` and thickness `h` is surrounded on
/// both sides by cladding of index `n_cl`. Guided modes require
/// `n_co > n_cl`, which [`Waveguide::new`] enforces along with positive
/// lengths, so every solve downstream can assume a physical geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Waveguide {
    core_index: f64,
    cladding_index: f64,
    thickness: Length,
    wavelength: Length,
}

impl Waveguide {
    /// Creates a validated waveguide.
    ///
    /// # Errors
    ///
    /// Returns [`WaveguideError::InvalidGeometry`] if an index is not finite,
    /// `n_cl <= 0`, `n_co <= 1`, `n_co <= n_cl`, or either length is not
    /// finite and positive.
    pub fn new(
        core_index: f64,
        cladding_index: f64,
        thickness: Length,
        wavelength: Length,
    ) -> Result<Self, WaveguideError> {
        let invalid = |reason| Err(WaveguideError::InvalidGeometry { reason });

        if !core_index.is_finite() || !cladding_index.is_finite() {
            return invalid("refractive indices must be finite");
        }
        if cladding_index <= 0.0 {
            return invalid("cladding index must be positive");
        }
        if core_index <= 1.0 {
            return invalid("core index must be greater than 1");
        }
        if core_index <= cladding_index {
            return invalid("core index must be greater than cladding index");
        }
        if !is_positive_length(thickness) {
            return invalid("core thickness must be finite and positive");
        }
        if !is_positive_length(wavelength) {
            return invalid("wavelength must be finite and positive");
        }

        Ok(Self {
            core_index,
            cladding_index,
            thickness,
            wavelength,
        })
    }

    #[must_use]
    pub fn core_index(&self) -> f64 {
        self.core_index
    }

    #[must_use]
    pub fn cladding_index(&self) -> f64 {
        self.cladding_index
    }

    /// Core thickness `h`.
    #[must_use]
    pub fn thickness(&self) -> Length {
        self.thickness
    }

    /// Free-space wavelength `λ`.
    #[must_use]
    pub fn wavelength(&self) -> Length {
        self.wavelength
    }

    /// Free-space wavenumber `k₀ = 2π/λ`, in reciprocal metres.
    #[must_use]
    pub fn free_space_wavenumber(&self) -> f64 {
        2.0 * PI / self.wavelength.get::<meter>()
    }

    /// Angle of incidence above which total internal reflection occurs.
    #[must_use]
    pub fn critical_angle(&self) -> Angle {
        Angle::new::<radian>((self.cladding_index / self.core_index).asin())
    }

    /// Normalized frequency `V = (k₀h/2)·√(n_co² − n_cl²)`.
    ///
    /// Every transverse wavenumber `U = κh/2` of a guided mode satisfies
    /// `U² + W² = V²`.
    #[must_use]
    pub fn normalized_frequency(&self) -> f64 {
        let half_k0h = 0.5 * self.free_space_wavenumber() * self.thickness_m();
        half_k0h * (self.core_index.powi(2) - self.cladding_index.powi(2)).sqrt()
    }

    /// `(n_cl / n_co)²`, the TM boundary-condition weight.
    pub(crate) fn index_ratio_squared(&self) -> f64 {
        (self.cladding_index / self.core_index).powi(2)
    }

    pub(crate) fn thickness_m(&self) -> f64 {
        self.thickness.get::<meter>()
    }

    pub(crate) fn wavelength_m(&self) -> f64 {
        self.wavelength.get::<meter>()
    }
}

fn is_positive_length(length: Length) -> bool {
    let value = length.get::<meter>();
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{angle::degree, length::micrometer};

    fn um(value: f64) -> Length {
        Length::new::<micrometer>(value)
    }

    fn reference() -> Waveguide {
        Waveguide::new(1.5, 1.0, um(1.0), um(1.0)).expect("valid geometry")
    }

    #[test]
    fn rejects_cladding_above_core() {
        let result = Waveguide::new(1.0, 1.5, um(1.0), um(1.0));
        assert!(matches!(
            result,
            Err(WaveguideError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn rejects_equal_indices() {
        let result = Waveguide::new(1.5, 1.5, um(1.0), um(1.0));
        assert!(matches!(
            result,
            Err(WaveguideError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn rejects_non_physical_lengths() {
        for (thickness, wavelength) in [
            (um(0.0), um(1.0)),
            (um(-1.0), um(1.0)),
            (um(1.0), um(0.0)),
            (um(1.0), um(f64::NAN)),
        ] {
            let result = Waveguide::new(1.5, 1.0, thickness, wavelength);
            assert!(matches!(
                result,
                Err(WaveguideError::InvalidGeometry { .. })
            ));
        }
    }

    #[test]
    fn rejects_non_finite_or_sub_unity_indices() {
        assert!(Waveguide::new(f64::NAN, 1.0, um(1.0), um(1.0)).is_err());
        assert!(Waveguide::new(1.5, 0.0, um(1.0), um(1.0)).is_err());
        assert!(Waveguide::new(0.9, 0.5, um(1.0), um(1.0)).is_err());
    }

    #[test]
    fn critical_angle_of_reference_guide() {
        let guide = reference();
        assert_relative_eq!(
            guide.critical_angle().get::<degree>(),
            (2.0_f64 / 3.0).asin().to_degrees(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn normalized_frequency_of_reference_guide() {
        // (k0 h / 2)^2 (n_co^2 - n_cl^2) = 1.25 pi^2
        let guide = reference();
        assert_relative_eq!(
            guide.normalized_frequency().powi(2),
            1.25 * PI * PI,
            max_relative = 1e-12
        );
    }

    #[test]
    fn wavenumber_is_independent_of_unit_choice() {
        let in_um = reference();
        let in_nm = Waveguide::new(
            1.5,
            1.0,
            Length::new::<uom::si::length::nanometer>(1000.0),
            Length::new::<uom::si::length::nanometer>(1000.0),
        )
        .expect("valid geometry");

        assert_relative_eq!(
            in_um.free_space_wavenumber(),
            in_nm.free_space_wavenumber(),
            max_relative = 1e-12
        );
    }
}
