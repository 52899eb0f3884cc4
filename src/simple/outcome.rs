//! Outcome type - the unified simple container.
//!
//! This module provides the `Outcome<E, A>` type, the single value wrapper
//! behind both simple-container families:
//!
//! - The **Either** family: `Success(A)` / `Fail(E)` for recoverable failure
//! - The **Maybe** family: `Just(A)` / `Nothing(E)` for optional values
//!
//! `Success` and `Just` are structurally interchangeable continuing
//! variants; `Fail` and `Nothing` are structurally interchangeable halting
//! variants. Because all four share one type, a pipeline may freely mix
//! families: a `flat_map` step on a `Success` can return a `Just`, and every
//! variant answers every recovery hook (acting only when the hook matches
//! its own family's halting condition).
//!
//! # Examples
//!
//! ```rust
//! use monadic::simple::Outcome;
//!
//! // Mixing families in one pipeline
//! let mixed: Outcome<String, i32> = Outcome::success(5)
//!     .fmap(|x| x * 2)
//!     .flat_map(|x| Outcome::just(x + 1));
//! assert!(mixed.is_just());
//! assert_eq!(mixed.extract(), 11);
//!
//! // Halting short-circuits, recovery hooks reopen the pipeline
//! let recovered: Outcome<String, i32> = Outcome::fail("boom".to_string())
//!     .fmap(|x: i32| x * 2)
//!     .on_fail_map(|reason| reason.len() as i32);
//! assert_eq!(recovered.extract(), 4);
//! ```

use std::fmt;
use std::ops::ControlFlow;

use crate::container::{Container, Variant};
use crate::contract::ContractViolation;

/// A simple container: an immutable wrapper around a continuing payload `A`
/// or a halting payload `E`.
///
/// Continuing variants (`Success`, `Just`) carry a usable payload and
/// propagate through `fmap`/`flat_map`. Halting variants (`Fail`,
/// `Nothing`) short-circuit both operations and expose their payload only
/// through the family recovery hooks and `fold`.
///
/// # Type Parameters
///
/// * `E` - The halting payload type (a failure reason or absence reason)
/// * `A` - The continuing payload type
///
/// # Examples
///
/// ```rust
/// use monadic::simple::Outcome;
///
/// let success: Outcome<String, i32> = Outcome::success(42);
/// let doubled = success.fmap(|x| x * 2);
/// assert_eq!(doubled.extract(), 84);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome<E, A> {
    /// The continuing variant of the Either family.
    Success(A),
    /// The halting variant of the Either family, carrying the failure reason.
    Fail(E),
    /// The continuing variant of the Maybe family.
    Just(A),
    /// The halting variant of the Maybe family, carrying the absence reason.
    Nothing(E),
}

impl<E, A> Outcome<E, A> {
    // =========================================================================
    // Identification Predicates
    // =========================================================================

    /// Returns `true` for the continuing variants (`Success`, `Just`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let success: Outcome<String, i32> = Outcome::success(42);
    /// assert!(success.is_continuing());
    ///
    /// let nothing: Outcome<String, i32> = Outcome::nothing();
    /// assert!(!nothing.is_continuing());
    /// ```
    #[inline]
    pub const fn is_continuing(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Just(_))
    }

    /// Returns `true` for the halting variants (`Fail`, `Nothing`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let failed: Outcome<&str, i32> = Outcome::fail("boom");
    /// assert!(failed.is_halting());
    /// ```
    #[inline]
    pub const fn is_halting(&self) -> bool {
        !self.is_continuing()
    }

    /// Returns `true` if this is a `Success` value.
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` if this is a `Fail` value.
    #[inline]
    pub const fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    /// Returns `true` if this is a `Just` value.
    #[inline]
    pub const fn is_just(&self) -> bool {
        matches!(self, Self::Just(_))
    }

    /// Returns `true` if this is a `Nothing` value.
    #[inline]
    pub const fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing(_))
    }

    // =========================================================================
    // Value Extraction (Consuming)
    // =========================================================================

    /// Converts into an `Option` of the continuing payload.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let just: Outcome<String, i32> = Outcome::just(42);
    /// assert_eq!(just.continuing(), Some(42));
    ///
    /// let failed: Outcome<String, i32> = Outcome::fail("boom".to_string());
    /// assert_eq!(failed.continuing(), None);
    /// ```
    #[inline]
    pub fn continuing(self) -> Option<A> {
        match self {
            Self::Success(value) | Self::Just(value) => Some(value),
            Self::Fail(_) | Self::Nothing(_) => None,
        }
    }

    /// Converts into an `Option` of the halting payload.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let failed: Outcome<&str, i32> = Outcome::fail("boom");
    /// assert_eq!(failed.halting(), Some("boom"));
    /// ```
    #[inline]
    pub fn halting(self) -> Option<E> {
        match self {
            Self::Fail(reason) | Self::Nothing(reason) => Some(reason),
            Self::Success(_) | Self::Just(_) => None,
        }
    }

    /// Returns a reference to the continuing payload if present.
    #[inline]
    pub const fn continuing_ref(&self) -> Option<&A> {
        match self {
            Self::Success(value) | Self::Just(value) => Some(value),
            Self::Fail(_) | Self::Nothing(_) => None,
        }
    }

    /// Returns a reference to the halting payload if present.
    #[inline]
    pub const fn halting_ref(&self) -> Option<&E> {
        match self {
            Self::Fail(reason) | Self::Nothing(reason) => Some(reason),
            Self::Success(_) | Self::Just(_) => None,
        }
    }

    /// Returns the continuing payload, consuming the container.
    ///
    /// This is the primary accessor: it is only valid on the continuing
    /// variants. A halting container never exposes its payload this way.
    ///
    /// # Panics
    ///
    /// Raises a [`ContractViolation`] if this is a halting variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let success: Outcome<String, i32> = Outcome::success(42);
    /// assert_eq!(success.extract(), 42);
    /// ```
    #[inline]
    pub fn extract(self) -> A {
        match self.try_extract() {
            Ok(value) => value,
            Err(violation) => violation.raise(),
        }
    }

    /// Returns the continuing payload, or the violation as a value.
    ///
    /// # Errors
    ///
    /// Returns the [`ContractViolation`] that [`extract`](Self::extract)
    /// would raise if this is a halting variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let nothing: Outcome<String, i32> = Outcome::nothing();
    /// assert!(nothing.try_extract().is_err());
    /// ```
    #[inline]
    pub fn try_extract(self) -> Result<A, ContractViolation> {
        match self {
            Self::Success(value) | Self::Just(value) => Ok(value),
            Self::Fail(_) | Self::Nothing(_) => Err(ContractViolation {
                container: "Outcome",
                operation: "extract",
                violation: "cannot extract a value from a halting container",
            }),
        }
    }

    /// Returns the continuing payload, or the given default for halting
    /// variants.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let nothing: Outcome<String, i32> = Outcome::nothing();
    /// assert_eq!(nothing.unwrap_or(0), 0);
    /// ```
    #[inline]
    pub fn unwrap_or(self, default: A) -> A {
        match self {
            Self::Success(value) | Self::Just(value) => value,
            Self::Fail(_) | Self::Nothing(_) => default,
        }
    }

    // =========================================================================
    // Mapping Operations
    // =========================================================================

    /// Applies a function to the continuing payload, rewrapping the result
    /// in the same variant. Halting variants are returned unchanged and the
    /// function is never invoked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let just: Outcome<String, i32> = Outcome::just(21);
    /// assert_eq!(just.fmap(|x| x * 2), Outcome::just(42));
    ///
    /// let failed: Outcome<&str, i32> = Outcome::fail("boom");
    /// assert_eq!(failed.fmap(|x| x * 2), Outcome::fail("boom"));
    /// ```
    #[inline]
    pub fn fmap<B, F>(self, function: F) -> Outcome<E, B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Success(value) => Outcome::Success(function(value)),
            Self::Just(value) => Outcome::Just(function(value)),
            Self::Fail(reason) => Outcome::Fail(reason),
            Self::Nothing(reason) => Outcome::Nothing(reason),
        }
    }

    /// Applies a function returning another simple container to the
    /// continuing payload, and returns that container directly. The result
    /// may belong to either family. Halting variants are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// // A Success step may continue as a Just
    /// let mixed: Outcome<String, i32> = Outcome::success(5)
    ///     .flat_map(|x| Outcome::just(x + 1));
    /// assert!(mixed.is_just());
    /// ```
    #[inline]
    pub fn flat_map<B, F>(self, function: F) -> Outcome<E, B>
    where
        F: FnOnce(A) -> Outcome<E, B>,
    {
        match self {
            Self::Success(value) | Self::Just(value) => function(value),
            Self::Fail(reason) => Outcome::Fail(reason),
            Self::Nothing(reason) => Outcome::Nothing(reason),
        }
    }

    // =========================================================================
    // Fold Operation
    // =========================================================================

    /// Eliminates the container by applying one of two functions.
    ///
    /// The continuing handler receives the continuing payload, the halting
    /// handler receives the halting payload.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let success: Outcome<String, i32> = Outcome::success(42);
    /// let rendered = success.fold(|x| x.to_string(), |reason| reason);
    /// assert_eq!(rendered, "42");
    /// ```
    #[inline]
    pub fn fold<R, F, G>(self, on_continue: F, on_halt: G) -> R
    where
        F: FnOnce(A) -> R,
        G: FnOnce(E) -> R,
    {
        match self {
            Self::Success(value) | Self::Just(value) => on_continue(value),
            Self::Fail(reason) | Self::Nothing(reason) => on_halt(reason),
        }
    }

    // =========================================================================
    // Applicative Operation
    // =========================================================================

    /// Applies a wrapped function to another container's payload.
    ///
    /// The receiver's payload must be invocable. A halting receiver returns
    /// itself and ignores the argument; a halting argument is returned
    /// unchanged. Otherwise the result is wrapped using the *argument's*
    /// variant constructor, so the result's family is decided by the
    /// argument, not the receiver - this is what enables cross-family
    /// application.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let applied: Outcome<String, i32> =
    ///     Outcome::success(|x: i32| x + 1).ap(Outcome::just(5));
    /// assert_eq!(applied, Outcome::just(6));
    /// ```
    #[inline]
    pub fn ap<B, C>(self, other: Outcome<E, B>) -> Outcome<E, C>
    where
        A: FnOnce(B) -> C,
    {
        let function = match self {
            Self::Success(function) | Self::Just(function) => function,
            Self::Fail(reason) => return Outcome::Fail(reason),
            Self::Nothing(reason) => return Outcome::Nothing(reason),
        };
        match other {
            Outcome::Success(value) => Outcome::Success(function(value)),
            Outcome::Just(value) => Outcome::Just(function(value)),
            Outcome::Fail(reason) => Outcome::Fail(reason),
            Outcome::Nothing(reason) => Outcome::Nothing(reason),
        }
    }

    // =========================================================================
    // Branching (Interop Primitive)
    // =========================================================================

    /// Splits the container into the two flows a lazy-container step cares
    /// about: `Continue` with the unwrapped continuing payload, or `Break`
    /// with the halting container itself (re-typed for the next step).
    ///
    /// This is the classification half of the unwrap rule; see
    /// [`Computed`](crate::lazy::Computed) for the full rule.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::ops::ControlFlow;
    /// use monadic::simple::Outcome;
    ///
    /// let just: Outcome<String, i32> = Outcome::just(5);
    /// assert!(matches!(just.branch::<i32>(), ControlFlow::Continue(5)));
    ///
    /// let nothing: Outcome<String, i32> = Outcome::nothing();
    /// assert!(matches!(nothing.branch::<i32>(), ControlFlow::Break(_)));
    /// ```
    #[inline]
    pub fn branch<B>(self) -> ControlFlow<Outcome<E, B>, A> {
        match self {
            Self::Success(value) | Self::Just(value) => ControlFlow::Continue(value),
            Self::Fail(reason) => ControlFlow::Break(Outcome::Fail(reason)),
            Self::Nothing(reason) => ControlFlow::Break(Outcome::Nothing(reason)),
        }
    }
}

// =============================================================================
// Container Classification
// =============================================================================

impl<E, A> Container for Outcome<E, A> {
    #[inline]
    fn variant(&self) -> Variant {
        match self {
            Self::Success(_) => Variant::Success,
            Self::Fail(_) => Variant::Fail,
            Self::Just(_) => Variant::Just,
            Self::Nothing(_) => Variant::Nothing,
        }
    }
}

// =============================================================================
// Debug / Display Implementations
// =============================================================================

impl<E: fmt::Debug, A: fmt::Debug> fmt::Debug for Outcome<E, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(value) => formatter.debug_tuple("Success").field(value).finish(),
            Self::Fail(reason) => formatter.debug_tuple("Fail").field(reason).finish(),
            Self::Just(value) => formatter.debug_tuple("Just").field(value).finish(),
            Self::Nothing(reason) => formatter.debug_tuple("Nothing").field(reason).finish(),
        }
    }
}

impl<E: fmt::Display, A: fmt::Display> fmt::Display for Outcome<E, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(value) => write!(formatter, "Success({value})"),
            Self::Fail(reason) => write!(formatter, "Fail({reason})"),
            Self::Just(value) => write!(formatter, "Just({value})"),
            Self::Nothing(_) => write!(formatter, "Nothing"),
        }
    }
}

// =============================================================================
// From Implementations
// =============================================================================

impl<E, A> From<Result<A, E>> for Outcome<E, A> {
    /// Converts a `Result` into the Either family.
    ///
    /// `Ok(a)` becomes `Success(a)`, and `Err(e)` becomes `Fail(e)`.
    #[inline]
    fn from(result: Result<A, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Fail(error),
        }
    }
}

impl<E, A> From<Outcome<E, A>> for Result<A, E> {
    /// Converts any simple container into a `Result`.
    ///
    /// Continuing variants become `Ok`, halting variants become `Err`.
    #[inline]
    fn from(outcome: Outcome<E, A>) -> Self {
        outcome.fold(Ok, Err)
    }
}

impl<E: Default, A> From<Option<A>> for Outcome<E, A> {
    /// Converts an `Option` into the Maybe family.
    ///
    /// `Some(a)` becomes `Just(a)`, and `None` becomes `Nothing` with a
    /// default absence reason.
    #[inline]
    fn from(option: Option<A>) -> Self {
        match option {
            Some(value) => Self::Just(value),
            None => Self::Nothing(E::default()),
        }
    }
}

impl<E, A> From<Outcome<E, A>> for Option<A> {
    /// Converts any simple container into an `Option`, discarding the
    /// halting payload.
    #[inline]
    fn from(outcome: Outcome<E, A>) -> Self {
        outcome.continuing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Outcome<String, i32>: Clone, PartialEq, Eq, Send, Sync);

    #[rstest]
    fn test_predicates_are_exclusive() {
        let success: Outcome<String, i32> = Outcome::success(1);
        assert!(success.is_continuing());
        assert!(success.is_success());
        assert!(!success.is_fail());
        assert!(!success.is_just());
        assert!(!success.is_nothing());

        let nothing: Outcome<String, i32> = Outcome::nothing();
        assert!(nothing.is_halting());
        assert!(nothing.is_nothing());
        assert!(!nothing.is_fail());
        assert!(!nothing.is_success());
        assert!(!nothing.is_just());
    }

    #[rstest]
    fn test_fmap_rewraps_in_same_variant() {
        let success: Outcome<String, i32> = Outcome::success(21);
        assert_eq!(success.fmap(|x| x * 2), Outcome::success(42));

        let just: Outcome<String, i32> = Outcome::just(21);
        assert_eq!(just.fmap(|x| x * 2), Outcome::just(42));
    }

    #[rstest]
    fn test_fmap_never_invokes_on_halting() {
        let failed: Outcome<&str, i32> = Outcome::fail("boom");
        let mapped = failed.fmap(|_| unreachable!("halting variant must not invoke the function"));
        assert_eq!(mapped, Outcome::fail("boom"));
    }

    #[rstest]
    fn test_flat_map_crosses_families() {
        let mixed: Outcome<String, i32> = Outcome::success(5).flat_map(|x| Outcome::just(x + 1));
        assert_eq!(mixed, Outcome::just(6));

        let back: Outcome<String, i32> = Outcome::just(5).flat_map(|x| Outcome::success(x + 1));
        assert_eq!(back, Outcome::success(6));
    }

    #[rstest]
    fn test_flat_map_short_circuits_on_halting() {
        let nothing: Outcome<String, i32> = Outcome::nothing();
        let chained = nothing.flat_map(|x| Outcome::success(x + 1));
        assert!(chained.is_nothing());
    }

    #[rstest]
    fn test_fold_dispatches_on_branch() {
        let success: Outcome<String, i32> = Outcome::success(42);
        assert_eq!(success.fold(|x| x, |_| 0), 42);

        let failed: Outcome<String, i32> = Outcome::fail("boom".to_string());
        assert_eq!(failed.fold(|x| x, |reason| reason.len() as i32), 4);
    }

    #[rstest]
    fn test_extract_on_continuing() {
        let just: Outcome<String, i32> = Outcome::just(42);
        assert_eq!(just.extract(), 42);
    }

    #[rstest]
    fn test_extract_raises_contract_violation_on_halting() {
        let failed: Outcome<String, i32> = Outcome::fail("boom".to_string());
        let panicked = std::panic::catch_unwind(move || failed.extract()).unwrap_err();
        assert!(panicked.is::<ContractViolation>());
    }

    #[rstest]
    fn test_try_extract_reports_operation() {
        let nothing: Outcome<String, i32> = Outcome::nothing();
        let violation = nothing.try_extract().unwrap_err();
        assert_eq!(violation.operation, "extract");
    }

    #[rstest]
    fn test_unwrap_or_on_both_branches() {
        let success: Outcome<String, i32> = Outcome::success(42);
        assert_eq!(success.unwrap_or(0), 42);

        let nothing: Outcome<String, i32> = Outcome::nothing();
        assert_eq!(nothing.unwrap_or(7), 7);
    }

    #[rstest]
    fn test_ap_result_variant_follows_argument() {
        let applied: Outcome<String, i32> = Outcome::success(|x: i32| x + 1).ap(Outcome::just(5));
        assert_eq!(applied, Outcome::just(6));

        let applied: Outcome<String, i32> = Outcome::just(|x: i32| x + 1).ap(Outcome::success(5));
        assert_eq!(applied, Outcome::success(6));
    }

    #[rstest]
    fn test_ap_halting_argument_is_returned_unchanged() {
        let halted: Outcome<&str, i32> = Outcome::success(|x: i32| x + 1).ap(Outcome::fail("boom"));
        assert_eq!(halted, Outcome::fail("boom"));
    }

    #[rstest]
    fn test_ap_halting_receiver_ignores_argument() {
        let receiver: Outcome<&str, fn(i32) -> i32> = Outcome::nothing_with("empty");
        let halted: Outcome<&str, i32> = receiver.ap(Outcome::success(5));
        assert!(halted.is_nothing());
    }

    #[rstest]
    fn test_branch_unwraps_continuing() {
        let just: Outcome<String, i32> = Outcome::just(5);
        assert!(matches!(just.branch::<i32>(), ControlFlow::Continue(5)));
    }

    #[rstest]
    fn test_branch_preserves_halting_variant() {
        let failed: Outcome<&str, i32> = Outcome::fail("boom");
        match failed.branch::<String>() {
            ControlFlow::Break(halting) => assert!(halting.is_fail()),
            ControlFlow::Continue(_) => panic!("halting container must break"),
        }
    }

    #[rstest]
    fn test_variant_classification() {
        let success: Outcome<String, i32> = Outcome::success(1);
        assert_eq!(success.variant(), Variant::Success);
        let nothing: Outcome<String, i32> = Outcome::nothing();
        assert_eq!(nothing.variant(), Variant::Nothing);
    }

    #[rstest]
    fn test_result_conversion_roundtrip() {
        let ok: Result<i32, String> = Ok(42);
        let outcome: Outcome<String, i32> = ok.into();
        let result: Result<i32, String> = outcome.into();
        assert_eq!(result, Ok(42));

        let err: Result<i32, String> = Err("error".to_string());
        let outcome: Outcome<String, i32> = err.into();
        let result: Result<i32, String> = outcome.into();
        assert_eq!(result, Err("error".to_string()));
    }

    #[rstest]
    fn test_option_conversion() {
        let outcome: Outcome<String, i32> = Some(42).into();
        assert_eq!(outcome, Outcome::just(42));

        let outcome: Outcome<String, i32> = None.into();
        assert!(outcome.is_nothing());
        let option: Option<i32> = outcome.into();
        assert_eq!(option, None);
    }

    #[rstest]
    fn test_display_rendering() {
        let success: Outcome<String, i32> = Outcome::success(42);
        assert_eq!(format!("{success}"), "Success(42)");
        let nothing: Outcome<String, i32> = Outcome::nothing();
        assert_eq!(format!("{nothing}"), "Nothing");
    }
}
