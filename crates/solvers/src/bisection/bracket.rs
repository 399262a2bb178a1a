use thiserror::Error;

/// Why a search interval cannot be bisected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    #[error("bracket endpoints must be finite")]
    NonFinite,

    #[error("bracket endpoints coincide")]
    ZeroWidth,

    /// The residual has the same sign at both ends.
    ///
    /// A continuous residual may still have an even number of roots inside,
    /// but bisection cannot isolate any of them.
    #[error("residual does not change sign across the bracket")]
    NoSignChange,
}

/// An interval `[left, right]` whose ends have residuals of opposite sign.
///
/// Only the sign at the left end is stored; the right end always has the
/// other one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    left: f64,
    right: f64,
    left_sign: Sign,
}

impl Bracket {
    /// # Errors
    ///
    /// Returns [`BracketError::NoSignChange`] if both signs agree.
    pub(super) fn new(
        bounds: Bounds,
        left_sign: Sign,
        right_sign: Sign,
    ) -> Result<Self, BracketError> {
        if left_sign == right_sign {
            return Err(BracketError::NoSignChange);
        }

        let Bounds { left, right } = bounds;
        Ok(Self {
            left,
            right,
            left_sign,
        })
    }

    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.left + 0.5 * self.width()
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Whether the interval is narrower than `x_abs_tol + x_rel_tol·|mid|`.
    #[must_use]
    pub fn is_x_converged(&self, x_abs_tol: f64, x_rel_tol: f64) -> bool {
        let tolerance = x_abs_tol + x_rel_tol * self.midpoint().abs();
        self.width() <= tolerance
    }

    /// Moves the end that shares `sign` in to `x`.
    pub(super) fn shrink(&mut self, x: f64, sign: Sign) {
        if sign == self.left_sign {
            self.left = x;
        } else {
            self.right = x;
        }
    }
}

/// Residual sign as seen by the bracket. Zero counts as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }
}

/// A finite, non-empty interval with its ends in increasing order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bounds {
    left: f64,
    right: f64,
}

impl Bounds {
    /// Accepts the ends in either order.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::NonFinite`] or [`BracketError::ZeroWidth`].
    pub(super) fn new([a, b]: [f64; 2]) -> Result<Self, BracketError> {
        if !(a.is_finite() && b.is_finite()) {
            return Err(BracketError::NonFinite);
        }

        match a.partial_cmp(&b) {
            Some(std::cmp::Ordering::Less) => Ok(Self { left: a, right: b }),
            Some(std::cmp::Ordering::Greater) => Ok(Self { left: b, right: a }),
            _ => Err(BracketError::ZeroWidth),
        }
    }

    pub(super) fn left(&self) -> f64 {
        self.left
    }

    pub(super) fn right(&self) -> f64 {
        self.right
    }
}
