use std::collections::BTreeMap;

use uom::si::{angle::radian, f64::Angle};

use crate::{
    ModeSolution, ModeSolver, Waveguide, WaveguideError,
    mode::{Method, ModeRequest, Polarization},
};

/// Solved modes of one waveguide, keyed by polarization then mode index.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeTable {
    method: Method,
    te: BTreeMap<u32, ModeSolution>,
    tm: BTreeMap<u32, ModeSolution>,
}

impl ModeTable {
    /// The model every entry was solved with.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn get(&self, polarization: Polarization, mode: u32) -> Option<&ModeSolution> {
        self.column(polarization).get(&mode)
    }

    /// Solutions of one polarization in increasing mode order.
    pub fn modes(&self, polarization: Polarization) -> impl Iterator<Item = &ModeSolution> {
        self.column(polarization).values()
    }

    /// Propagation angles in degrees, keyed by mode index.
    #[must_use]
    pub fn angles_degrees(&self, polarization: Polarization) -> BTreeMap<u32, f64> {
        self.map_column(polarization, ModeSolution::angle_degrees)
    }

    /// Propagation angles rounded to a tenth of a degree.
    #[must_use]
    pub fn rounded_angles(&self, polarization: Polarization) -> BTreeMap<u32, f64> {
        self.map_column(polarization, |solution| {
            (solution.angle_degrees() * 10.0).round() / 10.0
        })
    }

    #[must_use]
    pub fn effective_indices(&self, polarization: Polarization) -> BTreeMap<u32, f64> {
        self.map_column(polarization, ModeSolution::effective_index)
    }

    /// Largest angle disagreement, in degrees, over entries both tables hold.
    ///
    /// Returns `None` if the tables share no `(polarization, mode)` entry.
    #[must_use]
    pub fn max_angle_difference(&self, other: &ModeTable) -> Option<f64> {
        Polarization::ALL
            .into_iter()
            .flat_map(|polarization| {
                self.modes(polarization).filter_map(move |solution| {
                    other
                        .get(polarization, solution.mode())
                        .map(|theirs| (solution.angle_degrees() - theirs.angle_degrees()).abs())
                })
            })
            .reduce(f64::max)
    }

    /// Consecutive `(m, m + 1)` pairs of one polarization.
    ///
    /// These are the waveguide pairs studied for directional coupling.
    #[must_use]
    pub fn adjacent_pairs(&self, polarization: Polarization) -> Vec<(&ModeSolution, &ModeSolution)> {
        let column = self.column(polarization);
        column
            .iter()
            .filter_map(|(&mode, first)| {
                let next = mode.checked_add(1)?;
                column.get(&next).map(|second| (first, second))
            })
            .collect()
    }

    fn column(&self, polarization: Polarization) -> &BTreeMap<u32, ModeSolution> {
        match polarization {
            Polarization::Te => &self.te,
            Polarization::Tm => &self.tm,
        }
    }

    fn map_column(
        &self,
        polarization: Polarization,
        value: impl Fn(&ModeSolution) -> f64,
    ) -> BTreeMap<u32, f64> {
        self.column(polarization)
            .iter()
            .map(|(&mode, solution)| (mode, value(solution)))
            .collect()
    }
}

impl ModeSolver {
    /// Solves every requested mode index for both polarizations.
    ///
    /// Each `(polarization, m)` solve is independent. The first unsupported
    /// mode aborts the table.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`ModeSolver::solve`].
    pub fn solve_table(
        &self,
        guide: &Waveguide,
        modes: impl IntoIterator<Item = u32>,
        method: Method,
    ) -> Result<ModeTable, WaveguideError> {
        let mut table = ModeTable {
            method,
            te: BTreeMap::new(),
            tm: BTreeMap::new(),
        };

        for mode in modes {
            for polarization in Polarization::ALL {
                let solution = self.solve(guide, ModeRequest::new(polarization, mode, method))?;
                match polarization {
                    Polarization::Te => table.te.insert(mode, solution),
                    Polarization::Tm => table.tm.insert(mode, solution),
                };
            }
        }

        Ok(table)
    }
}

/// Solves the requested modes with the default solver configuration.
///
/// # Errors
///
/// See [`ModeSolver::solve_table`].
pub fn solve_modes(
    guide: &Waveguide,
    modes: impl IntoIterator<Item = u32>,
    method: Method,
) -> Result<ModeTable, WaveguideError> {
    ModeSolver::default().solve_table(guide, modes, method)
}

/// `n_eff = n_co·sin θ`.
#[must_use]
pub fn effective_index(core_index: f64, angle: Angle) -> f64 {
    core_index * angle.get::<radian>().sin()
}
