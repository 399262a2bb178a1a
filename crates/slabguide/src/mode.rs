//! Mode identity: polarization, parity, and the physical model used to solve.

use std::fmt;

use crate::Waveguide;

/// Polarization family of a guided mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarization {
    /// Transverse electric: the electric field has no component along propagation.
    Te,
    /// Transverse magnetic: the magnetic field has no component along propagation.
    Tm,
}

impl Polarization {
    /// Both polarizations, in table order.
    pub const ALL: [Polarization; 2] = [Polarization::Te, Polarization::Tm];
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarization::Te => f.write_str("TE"),
            Polarization::Tm => f.write_str("TM"),
        }
    }
}

/// Symmetry of the transverse field about the waveguide centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    /// The natural parity of mode `m`: even for even `m`, odd otherwise.
    #[must_use]
    pub fn of_mode(mode: u32) -> Self {
        if mode % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parity::Even => f.write_str("even"),
            Parity::Odd => f.write_str("odd"),
        }
    }
}

/// Physical model used to locate a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Ray optics: transverse resonance with the Goos–Hänchen phase shift.
    Ray,
    /// Wave equation: field matching at the core boundary.
    Wave,
}

/// One cell of the polarization × parity table.
///
/// The four cases select the boundary-matching relation between the core
/// transverse wavenumber and the cladding decay constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeFamily {
    TeEven,
    TeOdd,
    TmEven,
    TmOdd,
}

impl ModeFamily {
    #[must_use]
    pub fn new(polarization: Polarization, parity: Parity) -> Self {
        match (polarization, parity) {
            (Polarization::Te, Parity::Even) => ModeFamily::TeEven,
            (Polarization::Te, Parity::Odd) => ModeFamily::TeOdd,
            (Polarization::Tm, Parity::Even) => ModeFamily::TmEven,
            (Polarization::Tm, Parity::Odd) => ModeFamily::TmOdd,
        }
    }

    #[must_use]
    pub fn polarization(self) -> Polarization {
        match self {
            ModeFamily::TeEven | ModeFamily::TeOdd => Polarization::Te,
            ModeFamily::TmEven | ModeFamily::TmOdd => Polarization::Tm,
        }
    }

    #[must_use]
    pub fn parity(self) -> Parity {
        match self {
            ModeFamily::TeEven | ModeFamily::TmEven => Parity::Even,
            ModeFamily::TeOdd | ModeFamily::TmOdd => Parity::Odd,
        }
    }

    /// Normalized cladding decay `W = γh/2` as a function of `U = κh/2`.
    ///
    /// ```text
    /// TE even:  W =  U·tan U
    /// TE odd:   W = −U·cot U
    /// TM even:  W =  (n_cl/n_co)²·U·tan U
    /// TM odd:   W = −(n_cl/n_co)²·U·cot U
    /// ```
    ///
    /// Non-finite at the tan/cot singularities.
    #[must_use]
    pub fn cladding_decay(self, guide: &Waveguide, u: f64) -> f64 {
        let ratio = guide.index_ratio_squared();
        match self {
            ModeFamily::TeEven => u * u.tan(),
            ModeFamily::TeOdd => -u / u.tan(),
            ModeFamily::TmEven => ratio * u * u.tan(),
            ModeFamily::TmOdd => -ratio * u / u.tan(),
        }
    }
}

/// A request to solve one mode of one polarization with one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeRequest {
    pub polarization: Polarization,
    pub mode: u32,
    pub method: Method,
}

impl ModeRequest {
    #[must_use]
    pub fn new(polarization: Polarization, mode: u32, method: Method) -> Self {
        Self {
            polarization,
            mode,
            method,
        }
    }

    /// The family implied by the mode index's natural parity.
    #[must_use]
    pub fn family(&self) -> ModeFamily {
        ModeFamily::new(self.polarization, Parity::of_mode(self.mode))
    }
}
