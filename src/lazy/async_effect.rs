//! `AsyncEffect` - deferred asynchronous computation.
//!
//! The asynchronous track of [`Effect`](crate::lazy::Effect): the same
//! operations, with the wrapped computation producing a future that is
//! awaited at each step boundary. Execution happens only via
//! `run_async().await`; steps resume in the order they were chained.
//!
//! Because the synchronous and asynchronous tracks are separate types,
//! running an asynchronous computation on the synchronous track does not
//! type-check - the wrong-track misuse of the dynamic original is a compile
//! error here.
//!
//! # Examples
//!
//! ```rust,ignore
//! use monadic::lazy::{AsyncEffect, Computed};
//!
//! #[tokio::main]
//! async fn main() {
//!     let effect: AsyncEffect<String, i32> = AsyncEffect::pure(10)
//!         .fmap(|x| x * 2)
//!         .flat_map(|x| AsyncEffect::pure(x + 1));
//!     assert_eq!(effect.run_async().await, Computed::Plain(21));
//! }
//! ```

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;

use crate::container::{Container, Variant};
use crate::contract::{panic_message, rethrow_violation};
use crate::lazy::Computed;
use crate::simple::Outcome;

/// A lazy container wrapping a deferred, asynchronous computation.
///
/// `AsyncEffect<E, A>` stores a computation returning a future of a
/// [`Computed<E, A>`]. The unwrap rule of the synchronous track applies
/// identically at every step, after awaiting the computation.
///
/// # Type Parameters
///
/// - `E`: The halting payload type of absorbed simple containers.
/// - `A`: The type of the value produced by the computation.
pub struct AsyncEffect<E, A> {
    /// The wrapped async computation.
    compute: Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = Computed<E, A>> + Send>> + Send>,
}

impl<E: 'static, A: 'static> AsyncEffect<E, A> {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a new async effect from an async closure producing a plain
    /// value.
    ///
    /// The closure will not be invoked, and the future not polled, until
    /// [`run_async`](Self::run_async) is called.
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = A> + Send + 'static,
    {
        Self {
            compute: Box::new(move || Box::pin(async move { Computed::Plain(action().await) })),
        }
    }

    /// Creates a new async effect from an async closure producing a simple
    /// container, absorbed by the next step per the unwrap rule.
    pub fn new_simple<F, Fut>(action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Outcome<E, A>> + Send + 'static,
    {
        Self {
            compute: Box::new(move || Box::pin(async move { Computed::Wrapped(action().await) })),
        }
    }

    /// Creates an async effect from an existing future.
    ///
    /// The future should not have been polled yet.
    pub fn from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = A> + Send + 'static,
    {
        Self {
            compute: Box::new(move || Box::pin(async move { Computed::Plain(future.await) })),
        }
    }

    /// Executes the wrapped computation, awaiting it, and returns the raw
    /// result.
    pub async fn run_async(self) -> Computed<E, A> {
        (self.compute)().await
    }

    /// Executes the computation and dispatches on the shape of the awaited
    /// raw result, as [`Effect::fold`](crate::lazy::Effect::fold) does.
    pub async fn fold_async<R, F, G, H>(self, on_continue: F, on_halt: G, on_plain: H) -> R
    where
        F: FnOnce(A) -> R,
        G: FnOnce(Outcome<E, A>) -> R,
        H: FnOnce(A) -> R,
    {
        use std::ops::ControlFlow;

        match self.run_async().await {
            Computed::Plain(value) => on_plain(value),
            Computed::Wrapped(outcome) => match outcome.branch() {
                ControlFlow::Continue(value) => on_continue(value),
                ControlFlow::Break(halting) => on_halt(halting),
            },
        }
    }
}

impl<E: Send + 'static, A: Send + 'static> AsyncEffect<E, A> {
    /// Wraps a pure value in an async effect.
    pub fn pure(value: A) -> Self {
        Self {
            compute: Box::new(move || Box::pin(async move { Computed::Plain(value) })),
        }
    }

    // =========================================================================
    // Transformation
    // =========================================================================

    /// Transforms the unwrapped, awaited result with a plain function.
    ///
    /// The unwrap rule runs first: a halting predecessor result is
    /// propagated as-is and `function` is never invoked.
    pub fn fmap<B, F>(self, function: F) -> AsyncEffect<E, B>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: 'static,
    {
        use std::ops::ControlFlow;

        AsyncEffect {
            compute: Box::new(move || {
                Box::pin(async move {
                    match self.run_async().await.flow() {
                        ControlFlow::Continue(value) => Computed::Plain(function(value)),
                        ControlFlow::Break(halting) => Computed::Wrapped(halting),
                    }
                })
            }),
        }
    }

    /// Transforms the unwrapped, awaited result with a function producing a
    /// simple container, which is absorbed per the unwrap rule.
    pub fn fmap_simple<B, F>(self, function: F) -> AsyncEffect<E, B>
    where
        F: FnOnce(A) -> Outcome<E, B> + Send + 'static,
        B: 'static,
    {
        use std::ops::ControlFlow;

        AsyncEffect {
            compute: Box::new(move || {
                Box::pin(async move {
                    match self.run_async().await.flow() {
                        ControlFlow::Continue(value) => {
                            Computed::Wrapped(function(value)).normalize()
                        }
                        ControlFlow::Break(halting) => Computed::Wrapped(halting),
                    }
                })
            }),
        }
    }

    /// Chains this async effect with a function producing the next one,
    /// whose computation is awaited and normalized per the one-more-unwrap
    /// rule.
    pub fn flat_map<B, F>(self, function: F) -> AsyncEffect<E, B>
    where
        F: FnOnce(A) -> AsyncEffect<E, B> + Send + 'static,
        B: Send + 'static,
    {
        use std::ops::ControlFlow;

        AsyncEffect {
            compute: Box::new(move || {
                Box::pin(async move {
                    match self.run_async().await.flow() {
                        ControlFlow::Continue(value) => {
                            function(value).run_async().await.normalize()
                        }
                        ControlFlow::Break(halting) => Computed::Wrapped(halting),
                    }
                })
            }),
        }
    }

    /// Sequences two async effects, discarding the result of the first.
    #[must_use]
    pub fn then<B>(self, next: AsyncEffect<E, B>) -> AsyncEffect<E, B>
    where
        B: Send + 'static,
    {
        self.flat_map(move |_| next)
    }

    /// Combines two async effects using a function, awaiting them in order.
    pub fn map2<B, C, F>(self, other: AsyncEffect<E, B>, function: F) -> AsyncEffect<E, C>
    where
        F: FnOnce(A, B) -> C + Send + 'static,
        B: Send + 'static,
        C: Send + 'static,
    {
        self.flat_map(move |a| other.fmap(move |b| function(a, b)))
    }

    /// Combines two async effects into a tuple.
    #[must_use]
    pub fn product<B>(self, other: AsyncEffect<E, B>) -> AsyncEffect<E, (A, B)>
    where
        B: Send + 'static,
    {
        self.map2(other, |a, b| (a, b))
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Recovers from an ordinary panic raised while polling the wrapped
    /// computation. The handler receives the panic message; a
    /// [`ContractViolation`](crate::contract::ContractViolation) is
    /// re-raised untouched.
    pub fn catch<F>(self, handler: F) -> Self
    where
        F: FnOnce(String) -> A + Send + 'static,
    {
        use futures::FutureExt;

        Self {
            compute: Box::new(move || {
                Box::pin(async move {
                    let result = AssertUnwindSafe(self.run_async()).catch_unwind().await;
                    match result {
                        Ok(computed) => computed,
                        Err(payload) => {
                            let payload = rethrow_violation(payload);
                            Computed::Plain(handler(panic_message(payload.as_ref())))
                        }
                    }
                })
            }),
        }
    }

    /// Recovers from an ordinary panic by chaining into another async
    /// effect, whose computation is awaited and normalized. Contract
    /// violations are re-raised untouched.
    pub fn catch_with<F>(self, handler: F) -> Self
    where
        F: FnOnce(String) -> Self + Send + 'static,
    {
        use futures::FutureExt;

        Self {
            compute: Box::new(move || {
                Box::pin(async move {
                    let result = AssertUnwindSafe(self.run_async()).catch_unwind().await;
                    match result {
                        Ok(computed) => computed,
                        Err(payload) => {
                            let payload = rethrow_violation(payload);
                            handler(panic_message(payload.as_ref()))
                                .run_async()
                                .await
                                .normalize()
                        }
                    }
                })
            }),
        }
    }
}

// =============================================================================
// Container Classification
// =============================================================================

impl<E, A> Container for AsyncEffect<E, A> {
    #[inline]
    fn variant(&self) -> Variant {
        Variant::AsyncEffect
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl<E, A> std::fmt::Display for AsyncEffect<E, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<AsyncEffect>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn test_async_effect_pure_and_run() {
        let effect: AsyncEffect<String, i32> = AsyncEffect::pure(42);
        assert_eq!(effect.run_async().await, Computed::Plain(42));
    }

    #[rstest]
    #[tokio::test]
    async fn test_async_effect_defers_execution() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let executed = Arc::new(AtomicBool::new(false));
        let executed_clone = executed.clone();
        let effect: AsyncEffect<String, i32> = AsyncEffect::new(move || {
            let flag = executed_clone.clone();
            async move {
                flag.store(true, Ordering::SeqCst);
                42
            }
        });
        assert!(!executed.load(Ordering::SeqCst));
        assert_eq!(effect.run_async().await, Computed::Plain(42));
        assert!(executed.load(Ordering::SeqCst));
    }

    #[rstest]
    #[tokio::test]
    async fn test_async_fmap_unwraps_continuing_container() {
        let effect: AsyncEffect<String, i32> =
            AsyncEffect::new_simple(|| async { Outcome::success(21) }).fmap(|x| x * 2);
        assert_eq!(effect.run_async().await, Computed::Plain(42));
    }

    #[rstest]
    #[tokio::test]
    async fn test_async_halting_short_circuits() {
        let effect: AsyncEffect<String, i32> =
            AsyncEffect::new_simple(|| async { Outcome::nothing() })
                .fmap(|_: i32| unreachable!("halting result must not invoke the step"));
        assert_eq!(
            effect.run_async().await,
            Computed::Wrapped(Outcome::nothing())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_async_mixed_pipeline() {
        let effect: AsyncEffect<String, i32> =
            AsyncEffect::new_simple(|| async { Outcome::success(5) })
                .fmap_simple(|x| Outcome::just(x + 3))
                .flat_map(|x| AsyncEffect::new(move || async move { x * 2 }));
        assert_eq!(effect.run_async().await, Computed::Plain(16));
    }

    #[rstest]
    #[tokio::test]
    async fn test_async_from_future() {
        let effect: AsyncEffect<String, i32> = AsyncEffect::from_future(async { 7 });
        assert_eq!(effect.run_async().await, Computed::Plain(7));
    }

    fn boom<T>() -> T {
        panic!("oops")
    }

    #[rstest]
    #[tokio::test]
    async fn test_async_catch_recovers_ordinary_panic() {
        let recovered: AsyncEffect<String, String> =
            AsyncEffect::new(|| async { boom() }).catch(|message| message);
        assert_eq!(
            recovered.run_async().await,
            Computed::Plain("oops".to_string())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_async_catch_with_chains_into_recovery() {
        let recovered: AsyncEffect<String, i32> = AsyncEffect::new(|| async { boom() })
            .catch_with(|_| AsyncEffect::new_simple(|| async { Outcome::success(0) }));
        assert_eq!(recovered.run_async().await, Computed::Plain(0));
    }

    #[rstest]
    #[tokio::test]
    async fn test_async_catch_re_raises_contract_violations() {
        use crate::contract::ContractViolation;
        use futures::FutureExt;

        fn raise_violation() -> i32 {
            ContractViolation {
                container: "Outcome",
                operation: "extract",
                violation: "cannot extract a value from a halting container",
            }
            .raise()
        }

        let effect: AsyncEffect<String, i32> =
            AsyncEffect::new(|| async { raise_violation() }).catch(|_| 0);
        let panicked = AssertUnwindSafe(effect.run_async())
            .catch_unwind()
            .await
            .unwrap_err();
        assert!(panicked.is::<ContractViolation>());
    }

    #[rstest]
    #[tokio::test]
    async fn test_async_fold_dispatches_on_shape() {
        let halting: AsyncEffect<String, i32> =
            AsyncEffect::new_simple(|| async { Outcome::nothing() });
        let rendered = halting
            .fold_async(|_| "continuing", |_| "halting", |_| "plain")
            .await;
        assert_eq!(rendered, "halting");
    }

    #[rstest]
    #[tokio::test]
    async fn test_async_map2_and_product() {
        let combined: AsyncEffect<String, i32> =
            AsyncEffect::pure(10).map2(AsyncEffect::pure(20), |a, b| a + b);
        assert_eq!(combined.run_async().await, Computed::Plain(30));
    }
}
