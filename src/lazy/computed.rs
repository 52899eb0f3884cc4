//! Computed - the result universe of a lazy computation.
//!
//! A lazy container's wrapped computation may produce a plain value or a
//! simple container. [`Computed`] is that sum, and its two methods are the
//! unwrap rule applied at every step of every lazy pipeline:
//!
//! - [`Computed::flow`]: before a step's own transformation runs - a
//!   continuing simple container is unwrapped to its raw payload, a halting
//!   one short-circuits the step entirely, a plain value is fed through.
//! - [`Computed::normalize`]: after a step's transformation - a continuing
//!   simple container produced by the step is unwrapped once more before
//!   being stored, so it never nests.
//!
//! # Examples
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use monadic::lazy::Computed;
//! use monadic::simple::Outcome;
//!
//! let wrapped: Computed<String, i32> = Computed::Wrapped(Outcome::success(5));
//! assert!(matches!(wrapped.flow::<i32>(), ControlFlow::Continue(5)));
//!
//! let halted: Computed<String, i32> = Computed::Wrapped(Outcome::nothing());
//! assert!(matches!(halted.flow::<i32>(), ControlFlow::Break(_)));
//! ```

use std::ops::ControlFlow;

use crate::simple::Outcome;

/// The raw result of running a lazy container's computation.
///
/// `Plain` carries an ordinary value; `Wrapped` carries a simple container
/// produced inside the computation, which the lazy family recognizes and
/// flattens per the unwrap rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Computed<E, A> {
    /// An ordinary, non-container value.
    Plain(A),
    /// A simple container produced inside the computation.
    Wrapped(Outcome<E, A>),
}

impl<E, A> Computed<E, A> {
    /// Returns `true` if this is a plain, non-container result.
    #[inline]
    pub const fn is_plain(&self) -> bool {
        matches!(self, Self::Plain(_))
    }

    /// Returns `true` if this result is a simple container.
    #[inline]
    pub const fn is_wrapped(&self) -> bool {
        matches!(self, Self::Wrapped(_))
    }

    /// Applies the unwrap rule ahead of a step's transformation.
    ///
    /// A plain value and a continuing simple container both continue with
    /// the raw payload; a halting simple container breaks with itself,
    /// re-typed so it can stand in for the step's (never produced) result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::ops::ControlFlow;
    /// use monadic::lazy::Computed;
    /// use monadic::simple::Outcome;
    ///
    /// let plain: Computed<String, i32> = Computed::Plain(3);
    /// assert!(matches!(plain.flow::<i32>(), ControlFlow::Continue(3)));
    /// ```
    #[inline]
    pub fn flow<B>(self) -> ControlFlow<Outcome<E, B>, A> {
        match self {
            Self::Plain(value) => ControlFlow::Continue(value),
            Self::Wrapped(outcome) => outcome.branch(),
        }
    }

    /// Applies the one-more-unwrap rule after a step's transformation.
    ///
    /// A continuing simple container is unwrapped to a plain payload before
    /// being stored; plain values and halting containers are kept as they
    /// are. This is what keeps a stored result from ever nesting a
    /// continuing container.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::Computed;
    /// use monadic::simple::Outcome;
    ///
    /// let wrapped: Computed<String, i32> = Computed::Wrapped(Outcome::just(5));
    /// assert_eq!(wrapped.normalize(), Computed::Plain(5));
    /// ```
    #[inline]
    pub fn normalize(self) -> Self {
        match self.flow() {
            ControlFlow::Continue(value) => Self::Plain(value),
            ControlFlow::Break(halting) => Self::Wrapped(halting),
        }
    }

    /// Returns the plain or unwrapped continuing payload, or the given
    /// default for a halting result.
    #[inline]
    pub fn unwrap_or(self, default: A) -> A {
        match self.flow::<A>() {
            ControlFlow::Continue(value) => value,
            ControlFlow::Break(_) => default,
        }
    }
}

impl<E, A> From<Outcome<E, A>> for Computed<E, A> {
    /// Wraps a simple container as a computation result.
    #[inline]
    fn from(outcome: Outcome<E, A>) -> Self {
        Self::Wrapped(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_flow_feeds_plain_values_through() {
        let plain: Computed<String, i32> = Computed::Plain(3);
        assert!(matches!(plain.flow::<i32>(), ControlFlow::Continue(3)));
    }

    #[rstest]
    fn test_flow_unwraps_continuing_containers() {
        let success: Computed<String, i32> = Computed::Wrapped(Outcome::success(5));
        assert!(matches!(success.flow::<i32>(), ControlFlow::Continue(5)));

        let just: Computed<String, i32> = Computed::Wrapped(Outcome::just(5));
        assert!(matches!(just.flow::<i32>(), ControlFlow::Continue(5)));
    }

    #[rstest]
    fn test_flow_breaks_on_halting_containers() {
        let failed: Computed<&str, i32> = Computed::Wrapped(Outcome::fail("boom"));
        match failed.flow::<String>() {
            ControlFlow::Break(halting) => assert!(halting.is_fail()),
            ControlFlow::Continue(_) => panic!("halting result must break"),
        }
    }

    #[rstest]
    fn test_normalize_unwraps_continuing_once() {
        let wrapped: Computed<String, i32> = Computed::Wrapped(Outcome::success(5));
        assert_eq!(wrapped.normalize(), Computed::Plain(5));
    }

    #[rstest]
    fn test_normalize_keeps_plain_and_halting() {
        let plain: Computed<String, i32> = Computed::Plain(3);
        assert_eq!(plain.clone().normalize(), plain);

        let halted: Computed<String, i32> = Computed::Wrapped(Outcome::nothing());
        assert_eq!(halted.clone().normalize(), halted);
    }

    #[rstest]
    fn test_unwrap_or_on_each_shape() {
        let plain: Computed<String, i32> = Computed::Plain(3);
        assert_eq!(plain.unwrap_or(0), 3);

        let wrapped: Computed<String, i32> = Computed::Wrapped(Outcome::just(5));
        assert_eq!(wrapped.unwrap_or(0), 5);

        let halted: Computed<String, i32> = Computed::Wrapped(Outcome::nothing());
        assert_eq!(halted.unwrap_or(0), 0);
    }
}
