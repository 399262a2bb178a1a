/// A scalar equation `f(x) = 0` evaluated through its residual.
///
/// Implementors return an error instead of a non-finite residual when `x`
/// lies outside the domain where the equation is defined, so solvers can
/// tell a failed evaluation apart from a genuine zero.
pub trait Equation {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the residual at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the residual is undefined at `x`.
    fn residual(&self, x: f64) -> Result<f64, Self::Error>;
}

impl<E: Equation + ?Sized> Equation for &E {
    type Error = E::Error;

    fn residual(&self, x: f64) -> Result<f64, Self::Error> {
        (**self).residual(x)
    }
}
