/// Watches a solver's evaluations and may stop it early.
///
/// A solver hands every evaluation to its observer as an event `E`. Returning
/// `Some(action)` asks the solver to act on it (for bisection, to stop);
/// returning `None` leaves the iteration untouched.
/// Observers are how callers attach logging without the solver knowing about
/// any particular logging backend.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` is the
/// observer that never intervenes.
pub trait Observer<E, A> {
    /// Observes one solver event.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
