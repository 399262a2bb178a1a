/// Control actions an observer may request from the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver and return the best evaluation found so far.
    StopEarly,
}
