//! Maybe vocabulary - optional values over [`Outcome`].
//!
//! Constructors and recovery hooks for the `Just`/`Nothing` sub-family.
//! As with the Either vocabulary, the hooks are total across all four
//! variants and only `Nothing` acts on them.
//!
//! # Examples
//!
//! ```rust
//! use monadic::simple::Outcome;
//!
//! let present: Outcome<String, i32> = Outcome::from_nullable(Some(0));
//! assert_eq!(present, Outcome::just(0));
//!
//! let absent: Outcome<String, i32> = Outcome::from_nullable(None);
//! assert!(absent.is_nothing());
//! ```

use crate::simple::Outcome;

impl<E, A> Outcome<E, A> {
    // =========================================================================
    // Maybe Constructors
    // =========================================================================

    /// Wraps a value in the continuing Maybe variant.
    #[inline]
    pub const fn just(value: A) -> Self {
        Self::Just(value)
    }

    /// The halting Maybe variant with an explicit absence reason.
    #[inline]
    pub const fn nothing_with(reason: E) -> Self {
        Self::Nothing(reason)
    }

    /// The halting Maybe variant with a default absence reason.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let absent: Outcome<String, i32> = Outcome::nothing();
    /// assert!(absent.is_nothing());
    /// ```
    #[inline]
    pub fn nothing() -> Self
    where
        E: Default,
    {
        Self::Nothing(E::default())
    }

    /// Classifies an `Option`: `None` becomes `Nothing` unconditionally,
    /// anything present becomes `Just`.
    ///
    /// Present-but-zero values are not empty: `Some(0)` and
    /// `Some(String::new())` are `Just`. Use
    /// [`from_nullable_filtered`](Self::from_nullable_filtered) to classify
    /// additional values as empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let zero: Outcome<String, i32> = Outcome::from_nullable(Some(0));
    /// assert_eq!(zero, Outcome::just(0));
    /// ```
    #[inline]
    pub fn from_nullable(value: Option<A>) -> Self
    where
        E: Default,
    {
        match value {
            Some(value) => Self::Just(value),
            None => Self::Nothing(E::default()),
        }
    }

    /// Classifies an `Option` with an additional emptiness predicate.
    ///
    /// `None` is `Nothing` unconditionally; a present value for which the
    /// predicate returns `true` is also classified as `Nothing`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let blank: Outcome<String, String> =
    ///     Outcome::from_nullable_filtered(Some(String::new()), |s| s.is_empty());
    /// assert!(blank.is_nothing());
    /// ```
    #[inline]
    pub fn from_nullable_filtered<P>(value: Option<A>, is_empty: P) -> Self
    where
        E: Default,
        P: FnOnce(&A) -> bool,
    {
        match value {
            Some(value) if !is_empty(&value) => Self::Just(value),
            _ => Self::Nothing(E::default()),
        }
    }

    // =========================================================================
    // Maybe Recovery Hooks
    // =========================================================================

    /// Recovers from a `Nothing` by mapping its absence reason to a
    /// continuing payload, wrapped in `Just` (the continuing counterpart of
    /// the same family).
    ///
    /// Every other variant - including the Either family's `Fail` - is
    /// returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::simple::Outcome;
    ///
    /// let recovered: Outcome<String, i32> = Outcome::nothing().on_nothing_map(|_| 0);
    /// assert_eq!(recovered, Outcome::just(0));
    /// ```
    #[inline]
    pub fn on_nothing_map<F>(self, recovery: F) -> Self
    where
        F: FnOnce(E) -> A,
    {
        match self {
            Self::Nothing(reason) => Self::Just(recovery(reason)),
            other => other,
        }
    }

    /// Recovers from a `Nothing` by chaining into another simple container,
    /// which is returned directly and may belong to either family.
    ///
    /// Every other variant is returned unchanged.
    #[inline]
    pub fn on_nothing_chain<F>(self, recovery: F) -> Self
    where
        F: FnOnce(E) -> Self,
    {
        match self {
            Self::Nothing(reason) => recovery(reason),
            other => other,
        }
    }
}
