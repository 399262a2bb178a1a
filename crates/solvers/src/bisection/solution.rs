/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// A residual or bracket-width tolerance was met.
    Converged,

    /// `max_iters` midpoints were evaluated without meeting a tolerance.
    MaxIters,

    /// The observer returned [`Action::StopEarly`](super::Action::StopEarly).
    StoppedByObserver,
}

/// The best point found by a solve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pub status: Status,

    /// The evaluated `x` with the smallest residual magnitude.
    pub x: f64,

    pub residual: f64,

    /// Midpoints evaluated; endpoint evaluations are not counted.
    pub iters: usize,
}
