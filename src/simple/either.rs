//! Either vocabulary - recoverable failure over [`Outcome`].
//!
//! Constructors and recovery hooks for the `Success`/`Fail` sub-family.
//! The hooks are total: every simple container answers them, but only a
//! `Fail` acts on them - `Success`, `Just` and `Nothing` return themselves
//! unchanged, which is what lets Either and Maybe mix in one pipeline.
//!
//! # Examples
//!
//! ```rust
//! use monadic::simple::Outcome;
//!
//! let parsed: Outcome<String, i32> = Outcome::attempt(|| "42".parse().unwrap());
//! assert_eq!(parsed.extract(), 42);
//!
//! let recovered: Outcome<String, i32> = Outcome::attempt(|| panic!("boom"))
//!     .on_fail_map(|reason| reason.len() as i32);
//! assert_eq!(recovered.extract(), 4);
//! ```

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::contract::{panic_message, rethrow_violation};
use crate::simple::Outcome;

impl<E, A> Outcome<E, A> {
    // =========================================================================
    // Either Constructors
    // =========================================================================

    /// Wraps a value in the continuing Either variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let success: Outcome<String, i32> = Outcome::success(42);
    /// assert!(success.is_success());
    /// ```
    #[inline]
    pub const fn success(value: A) -> Self {
        Self::Success(value)
    }

    /// Wraps a failure reason in the halting Either variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let failed: Outcome<&str, i32> = Outcome::fail("boom");
    /// assert!(failed.is_fail());
    /// ```
    #[inline]
    pub const fn fail(reason: E) -> Self {
        Self::Fail(reason)
    }

    // =========================================================================
    // Either Recovery Hooks
    // =========================================================================

    /// Recovers from a `Fail` by mapping its reason to a continuing payload,
    /// wrapped in `Success` (the continuing counterpart of the same family).
    ///
    /// Every other variant - including the Maybe family's `Nothing` - is
    /// returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let recovered: Outcome<String, usize> =
    ///     Outcome::fail("boom".to_string()).on_fail_map(|reason| reason.len());
    /// assert_eq!(recovered, Outcome::success(4));
    /// ```
    #[inline]
    pub fn on_fail_map<F>(self, recovery: F) -> Self
    where
        F: FnOnce(E) -> A,
    {
        match self {
            Self::Fail(reason) => Self::Success(recovery(reason)),
            other => other,
        }
    }

    /// Recovers from a `Fail` by chaining into another simple container,
    /// which is returned directly and may belong to either family.
    ///
    /// Every other variant is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let retried: Outcome<String, i32> =
    ///     Outcome::fail("boom".to_string()).on_fail_chain(|_| Outcome::just(0));
    /// assert_eq!(retried, Outcome::just(0));
    /// ```
    #[inline]
    pub fn on_fail_chain<F>(self, recovery: F) -> Self
    where
        F: FnOnce(E) -> Self,
    {
        match self {
            Self::Fail(reason) => recovery(reason),
            other => other,
        }
    }
}

impl<A> Outcome<String, A> {
    /// Runs a strictly synchronous computation, capturing an ordinary panic
    /// as a `Fail` of the panic message.
    ///
    /// A [`ContractViolation`](crate::contract::ContractViolation) raised
    /// inside the computation is a defect, not data: it is re-raised
    /// untouched, never wrapped into a `Fail`.
    ///
    /// A deferred value (e.g. a `Future`) returned by the computation is
    /// simply its return value - nothing here awaits it, so strict synchrony
    /// is structural.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// assert_eq!(Outcome::attempt(|| 5).extract(), 5);
    ///
    /// let failed = Outcome::attempt(|| -> i32 { panic!("x") });
    /// assert_eq!(failed, Outcome::fail("x".to_string()));
    /// ```
    pub fn attempt<F>(computation: F) -> Self
    where
        F: FnOnce() -> A,
    {
        match catch_unwind(AssertUnwindSafe(computation)) {
            Ok(value) => Self::Success(value),
            Err(payload) => {
                let payload = rethrow_violation(payload);
                Self::Fail(panic_message(payload.as_ref()))
            }
        }
    }
}
