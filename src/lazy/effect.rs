//! Effect - deferred computation with simple-container absorption.
//!
//! The `Effect` type represents a computation that is not executed at
//! construction. Execution happens only via [`Effect::run`], which should be
//! called at the program's "edge".
//!
//! # Absorbing simple containers
//!
//! Every step of an effect pipeline applies the unwrap rule before its own
//! transformation runs: a step whose predecessor produced a continuing
//! simple container receives the raw payload, and a halting simple
//! container is propagated as-is without invoking the step at all.
//!
//! # Examples
//!
//! ```rust
//! use monadic::lazy::{Computed, Effect};
//! use monadic::simple::Outcome;
//!
//! let effect: Effect<String, i32> = Effect::new_simple(|| Outcome::success(5))
//!     .fmap_simple(|x| Outcome::just(x + 3))
//!     .flat_map(|x| Effect::new(move || x * 2));
//! assert_eq!(effect.run(), Computed::Plain(16));
//! ```
//!
//! # Deferral
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use monadic::lazy::{Computed, Effect};
//!
//! let executed = Arc::new(AtomicBool::new(false));
//! let executed_clone = executed.clone();
//!
//! let effect: Effect<String, i32> = Effect::new(move || {
//!     executed_clone.store(true, Ordering::SeqCst);
//!     42
//! });
//!
//! // Not executed yet
//! assert!(!executed.load(Ordering::SeqCst));
//!
//! assert_eq!(effect.run(), Computed::Plain(42));
//! assert!(executed.load(Ordering::SeqCst));
//! ```

use std::ops::ControlFlow;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::container::{Container, Variant};
use crate::contract::{panic_message, rethrow_violation};
use crate::lazy::Computed;
use crate::simple::Outcome;

/// A lazy container wrapping a deferred, synchronous computation.
///
/// `Effect<E, A>` stores a zero-argument computation producing a
/// [`Computed<E, A>`] - a plain value or a simple container. Each
/// `fmap`/`flat_map` call produces a brand-new `Effect` wrapping a newly
/// composed computation; the predecessor is consumed, never mutated.
///
/// # Type Parameters
///
/// - `E`: The halting payload type of absorbed simple containers.
/// - `A`: The type of the value produced by the computation.
///
/// # Monad Laws
///
/// Over plain values, `Effect` satisfies the monad laws:
///
/// 1. **Left Identity**: `Effect::pure(a).flat_map(f) == f(a)`
/// 2. **Right Identity**: `m.flat_map(Effect::pure) == m`
/// 3. **Associativity**: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
pub struct Effect<E, A> {
    /// The wrapped computation. Invoking it is the only way to observe the
    /// effect.
    compute: Box<dyn FnOnce() -> Computed<E, A>>,
}

impl<E: 'static, A: 'static> Effect<E, A> {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a new effect from a plain computation.
    ///
    /// The closure will not be executed until [`run`](Self::run) is called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::{Computed, Effect};
    ///
    /// let effect: Effect<String, i32> = Effect::new(|| 10 + 20);
    /// assert_eq!(effect.run(), Computed::Plain(30));
    /// ```
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() -> A + 'static,
    {
        Self {
            compute: Box::new(move || Computed::Plain(action())),
        }
    }

    /// Creates a new effect from a computation producing a simple container.
    ///
    /// The container is absorbed by the next pipeline step per the unwrap
    /// rule: a continuing container feeds its payload onward, a halting one
    /// short-circuits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::{Computed, Effect};
    /// use monadic::simple::Outcome;
    ///
    /// let effect: Effect<String, i32> = Effect::new_simple(|| Outcome::success(5));
    /// assert_eq!(effect.run(), Computed::Wrapped(Outcome::success(5)));
    /// ```
    pub fn new_simple<F>(action: F) -> Self
    where
        F: FnOnce() -> Outcome<E, A> + 'static,
    {
        Self {
            compute: Box::new(move || Computed::Wrapped(action())),
        }
    }

    /// Wraps a pure value in an effect.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::{Computed, Effect};
    ///
    /// let effect: Effect<String, i32> = Effect::pure(42);
    /// assert_eq!(effect.run(), Computed::Plain(42));
    /// ```
    pub fn pure(value: A) -> Self {
        Self::new(move || value)
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Executes the wrapped computation and returns the raw result.
    ///
    /// This is the only way to observe the effect; it should be called at
    /// the program's "edge".
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::{Computed, Effect};
    ///
    /// let effect: Effect<String, i32> = Effect::pure(42);
    /// assert_eq!(effect.run(), Computed::Plain(42));
    /// ```
    pub fn run(self) -> Computed<E, A> {
        (self.compute)()
    }

    /// Executes the computation and dispatches on the shape of the raw
    /// result: an absorbed continuing container, an absorbed halting
    /// container, or a plain value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::Effect;
    /// use monadic::simple::Outcome;
    ///
    /// let effect: Effect<String, i32> = Effect::new_simple(|| Outcome::nothing());
    /// let rendered = effect.fold(
    ///     |value| format!("continuing {value}"),
    ///     |halting| format!("halted as {halting}"),
    ///     |value| format!("plain {value}"),
    /// );
    /// assert_eq!(rendered, "halted as Nothing");
    /// ```
    pub fn fold<R, F, G, H>(self, on_continue: F, on_halt: G, on_plain: H) -> R
    where
        F: FnOnce(A) -> R,
        G: FnOnce(Outcome<E, A>) -> R,
        H: FnOnce(A) -> R,
    {
        match self.run() {
            Computed::Plain(value) => on_plain(value),
            Computed::Wrapped(outcome) => match outcome.branch() {
                ControlFlow::Continue(value) => on_continue(value),
                ControlFlow::Break(halting) => on_halt(halting),
            },
        }
    }

    // =========================================================================
    // Transformation
    // =========================================================================

    /// Transforms the unwrapped result of this effect with a plain function.
    ///
    /// The unwrap rule runs first: a halting predecessor result is
    /// propagated as-is and `function` is never invoked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::{Computed, Effect};
    ///
    /// let effect: Effect<String, i32> = Effect::pure(21).fmap(|x| x * 2);
    /// assert_eq!(effect.run(), Computed::Plain(42));
    /// ```
    pub fn fmap<B, F>(self, function: F) -> Effect<E, B>
    where
        F: FnOnce(A) -> B + 'static,
        B: 'static,
    {
        Effect {
            compute: Box::new(move || match self.run().flow() {
                ControlFlow::Continue(value) => Computed::Plain(function(value)),
                ControlFlow::Break(halting) => Computed::Wrapped(halting),
            }),
        }
    }

    /// Transforms the unwrapped result with a function producing a simple
    /// container, which is absorbed: a continuing result is unwrapped once
    /// more before being stored, a halting result short-circuits the rest of
    /// the chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::{Computed, Effect};
    /// use monadic::simple::Outcome;
    ///
    /// let effect: Effect<String, i32> = Effect::pure(5).fmap_simple(|x| Outcome::just(x + 3));
    /// assert_eq!(effect.run(), Computed::Plain(8));
    /// ```
    pub fn fmap_simple<B, F>(self, function: F) -> Effect<E, B>
    where
        F: FnOnce(A) -> Outcome<E, B> + 'static,
        B: 'static,
    {
        Effect {
            compute: Box::new(move || match self.run().flow() {
                ControlFlow::Continue(value) => Computed::Wrapped(function(value)).normalize(),
                ControlFlow::Break(halting) => Computed::Wrapped(halting),
            }),
        }
    }

    /// Chains this effect with a function producing the next effect.
    ///
    /// The next effect's own computation is invoked immediately after the
    /// current one and its result is subjected to the same one-more-unwrap
    /// rule. A chain step can only return another `Effect` - returning a
    /// different lazy container does not type-check.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::{Computed, Effect};
    ///
    /// let effect: Effect<String, i32> =
    ///     Effect::pure(10).flat_map(|x| Effect::new(move || x * 2));
    /// assert_eq!(effect.run(), Computed::Plain(20));
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> Effect<E, B>
    where
        F: FnOnce(A) -> Effect<E, B> + 'static,
        B: 'static,
    {
        Effect {
            compute: Box::new(move || match self.run().flow() {
                ControlFlow::Continue(value) => function(value).run().normalize(),
                ControlFlow::Break(halting) => Computed::Wrapped(halting),
            }),
        }
    }

    /// Sequences two effects, discarding the result of the first.
    ///
    /// The first computation still runs (and may short-circuit the second).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::{Computed, Effect};
    ///
    /// let effect: Effect<String, i32> = Effect::pure(10).then(Effect::pure(20));
    /// assert_eq!(effect.run(), Computed::Plain(20));
    /// ```
    #[must_use]
    pub fn then<B>(self, next: Effect<E, B>) -> Effect<E, B>
    where
        B: 'static,
    {
        self.flat_map(move |_| next)
    }

    /// Combines two effects using a function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::{Computed, Effect};
    ///
    /// let combined: Effect<String, i32> =
    ///     Effect::pure(10).map2(Effect::pure(20), |a, b| a + b);
    /// assert_eq!(combined.run(), Computed::Plain(30));
    /// ```
    pub fn map2<B, C, F>(self, other: Effect<E, B>, function: F) -> Effect<E, C>
    where
        F: FnOnce(A, B) -> C + 'static,
        B: 'static,
        C: 'static,
    {
        self.flat_map(move |a| other.fmap(move |b| function(a, b)))
    }

    /// Combines two effects into a tuple.
    #[must_use]
    pub fn product<B>(self, other: Effect<E, B>) -> Effect<E, (A, B)>
    where
        B: 'static,
    {
        self.map2(other, |a, b| (a, b))
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Recovers from an ordinary panic raised by the wrapped computation.
    ///
    /// The handler receives the panic message and its return value becomes
    /// the effect's plain result. A
    /// [`ContractViolation`](crate::contract::ContractViolation) is a
    /// defect, not data: it is re-raised untouched and never reaches the
    /// handler.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::{Computed, Effect};
    ///
    /// let recovered: Effect<String, String> =
    ///     Effect::new(|| panic!("oops")).catch(|message| message);
    /// assert_eq!(recovered.run(), Computed::Plain("oops".to_string()));
    /// ```
    pub fn catch<F>(self, handler: F) -> Self
    where
        F: FnOnce(String) -> A + 'static,
    {
        Self {
            compute: Box::new(move || {
                match catch_unwind(AssertUnwindSafe(move || self.run())) {
                    Ok(computed) => computed,
                    Err(payload) => {
                        let payload = rethrow_violation(payload);
                        Computed::Plain(handler(panic_message(payload.as_ref())))
                    }
                }
            }),
        }
    }

    /// Recovers from an ordinary panic by chaining into another effect of
    /// the same kind, whose computation is invoked and used (normalized per
    /// the unwrap rule). Contract violations are re-raised untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::{Computed, Effect};
    /// use monadic::simple::Outcome;
    ///
    /// let recovered: Effect<String, i32> = Effect::new(|| panic!("oops"))
    ///     .catch_with(|_| Effect::new_simple(|| Outcome::success(0)));
    /// assert_eq!(recovered.run(), Computed::Plain(0));
    /// ```
    pub fn catch_with<F>(self, handler: F) -> Self
    where
        F: FnOnce(String) -> Self + 'static,
    {
        Self {
            compute: Box::new(move || {
                match catch_unwind(AssertUnwindSafe(move || self.run())) {
                    Ok(computed) => computed,
                    Err(payload) => {
                        let payload = rethrow_violation(payload);
                        handler(panic_message(payload.as_ref())).run().normalize()
                    }
                }
            }),
        }
    }
}

// =============================================================================
// Container Classification
// =============================================================================

impl<E, A> Container for Effect<E, A> {
    #[inline]
    fn variant(&self) -> Variant {
        Variant::Effect
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl<E, A> std::fmt::Display for Effect<E, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<Effect>")
    }
}
