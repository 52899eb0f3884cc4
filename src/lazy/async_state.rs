//! `AsyncState` - asynchronous state-threading computation.
//!
//! The asynchronous track of [`State`](crate::lazy::State): a one-argument
//! transition `S -> Future<(A, S)>`, awaited at each step boundary. Like the
//! synchronous track, `AsyncState` does not interoperate with the simple
//! family; state-thread values are always plain.
//!
//! There is no iterative batch mode on this track: the queue is a
//! stack-depth escape hatch for the synchronous recursive composition, and
//! the asynchronous track already yields at every boundary.
//!
//! # Examples
//!
//! ```rust,ignore
//! use monadic::lazy::AsyncState;
//!
//! #[tokio::main]
//! async fn main() {
//!     let state: AsyncState<i32, i32> = AsyncState::new(|s: i32| async move { (s * 2, s + 1) });
//!     assert_eq!(state.run_async(10).await, (20, 11));
//! }
//! ```

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;

use crate::container::{Container, Variant};
use crate::contract::{panic_message, rethrow_violation};

/// A lazy container threading a state value through an asynchronous
/// computation.
///
/// `AsyncState<S, A>` is one-shot: running it consumes the container, and
/// each `fmap`/`flat_map` call produces a brand-new `AsyncState` wrapping a
/// newly composed transition.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The result type
pub struct AsyncState<S, A> {
    /// The wrapped async state transition.
    transition: Box<dyn FnOnce(S) -> Pin<Box<dyn Future<Output = (A, S)> + Send>> + Send>,
}

impl<S, A> AsyncState<S, A>
where
    S: Send + 'static,
    A: Send + 'static,
{
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a new `AsyncState` from an async state transition function.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use monadic::lazy::AsyncState;
    ///
    /// let state: AsyncState<i32, i32> = AsyncState::new(|s: i32| async move { (s * 2, s + 1) });
    /// assert_eq!(state.run_async(10).await, (20, 11));
    /// ```
    pub fn new<F, Fut>(transition: F) -> Self
    where
        F: FnOnce(S) -> Fut + Send + 'static,
        Fut: Future<Output = (A, S)> + Send + 'static,
    {
        Self {
            transition: Box::new(move |state| Box::pin(transition(state))),
        }
    }

    /// Creates an `AsyncState` that returns a constant value without
    /// modifying the state.
    pub fn pure(value: A) -> Self {
        Self::new(move |state| async move { (value, state) })
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Runs the transition once with the given initial state, returning the
    /// result and the final state.
    pub async fn run_async(self, initial_state: S) -> (A, S) {
        (self.transition)(initial_state).await
    }

    /// Runs the transition and returns only the result.
    pub async fn eval_async(self, initial_state: S) -> A {
        let (result, _) = self.run_async(initial_state).await;
        result
    }

    /// Runs the transition and returns only the final state.
    pub async fn exec_async(self, initial_state: S) -> S {
        let (_, final_state) = self.run_async(initial_state).await;
        final_state
    }

    /// Alias of [`run_async`](Self::run_async), kept for interface parity
    /// with [`AsyncEffect::fold_async`](crate::lazy::AsyncEffect::fold_async).
    pub async fn fold_async(self, initial_state: S) -> (A, S) {
        self.run_async(initial_state).await
    }

    // =========================================================================
    // Transformation
    // =========================================================================

    /// Maps a function over the result, keeping the produced next-state
    /// unchanged.
    pub fn fmap<B, F>(self, function: F) -> AsyncState<S, B>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        AsyncState::new(move |state| async move {
            let (result, new_state) = self.run_async(state).await;
            (function(result), new_state)
        })
    }

    /// Chains this `AsyncState` with a function that produces another one,
    /// whose transition is awaited on the intermediate state.
    pub fn flat_map<B, F>(self, function: F) -> AsyncState<S, B>
    where
        F: FnOnce(A) -> AsyncState<S, B> + Send + 'static,
        B: Send + 'static,
    {
        AsyncState::new(move |state| async move {
            let (result, intermediate_state) = self.run_async(state).await;
            function(result).run_async(intermediate_state).await
        })
    }

    /// Sequences two `AsyncState`s, discarding the first result.
    #[must_use]
    pub fn then<B>(self, next: AsyncState<S, B>) -> AsyncState<S, B>
    where
        B: Send + 'static,
    {
        self.flat_map(move |_| next)
    }

    /// Combines two `AsyncState`s using a binary function.
    pub fn map2<B, C, F>(self, other: AsyncState<S, B>, function: F) -> AsyncState<S, C>
    where
        F: FnOnce(A, B) -> C + Send + 'static,
        B: Send + 'static,
        C: Send + 'static,
    {
        AsyncState::new(move |state| async move {
            let (result_a, intermediate_state) = self.run_async(state).await;
            let (result_b, final_state) = other.run_async(intermediate_state).await;
            (function(result_a, result_b), final_state)
        })
    }

    /// Combines two `AsyncState`s into a tuple.
    #[must_use]
    pub fn product<B>(self, other: AsyncState<S, B>) -> AsyncState<S, (A, B)>
    where
        B: Send + 'static,
    {
        self.map2(other, |a, b| (a, b))
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Recovers from an ordinary panic raised while polling the transition.
    ///
    /// The handler receives the panic message; the recovery value is paired
    /// with the *original* input state, snapshotted before the failing
    /// transition ran. A
    /// [`ContractViolation`](crate::contract::ContractViolation) is
    /// re-raised untouched.
    pub fn catch<F>(self, handler: F) -> Self
    where
        S: Clone,
        F: FnOnce(String) -> A + Send + 'static,
    {
        use futures::FutureExt;

        Self::new(move |state: S| async move {
            let snapshot = state.clone();
            let result = AssertUnwindSafe(self.run_async(state)).catch_unwind().await;
            match result {
                Ok(pair) => pair,
                Err(payload) => {
                    let payload = rethrow_violation(payload);
                    (handler(panic_message(payload.as_ref())), snapshot)
                }
            }
        })
    }

    /// Recovers from an ordinary panic by chaining into another
    /// `AsyncState`, whose transition is awaited with the original input
    /// state. Contract violations are re-raised untouched.
    pub fn catch_with<F>(self, handler: F) -> Self
    where
        S: Clone,
        F: FnOnce(String) -> Self + Send + 'static,
    {
        use futures::FutureExt;

        Self::new(move |state: S| async move {
            let snapshot = state.clone();
            let result = AssertUnwindSafe(self.run_async(state)).catch_unwind().await;
            match result {
                Ok(pair) => pair,
                Err(payload) => {
                    let payload = rethrow_violation(payload);
                    handler(panic_message(payload.as_ref()))
                        .run_async(snapshot)
                        .await
                }
            }
        })
    }
}

// =============================================================================
// AsyncState Operations (as inherent constructors)
// =============================================================================

impl<St> AsyncState<St, St>
where
    St: Clone + Send + 'static,
{
    /// Creates an `AsyncState` that returns the current state without
    /// modifying it.
    #[must_use]
    pub fn get() -> Self {
        Self::new(|state: St| async move { (state.clone(), state) })
    }
}

impl<S> AsyncState<S, ()>
where
    S: Send + 'static,
{
    /// Creates an `AsyncState` that replaces the current state with a new
    /// value.
    pub fn put(new_state: S) -> Self {
        Self::new(move |_| async move { ((), new_state) })
    }

    /// Creates an `AsyncState` that modifies the current state using a
    /// function.
    pub fn modify<F>(modifier: F) -> Self
    where
        F: FnOnce(S) -> S + Send + 'static,
    {
        Self::new(move |state| async move { ((), modifier(state)) })
    }
}

// =============================================================================
// Container Classification
// =============================================================================

impl<S, A> Container for AsyncState<S, A> {
    #[inline]
    fn variant(&self) -> Variant {
        Variant::AsyncState
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl<S, A> std::fmt::Display for AsyncState<S, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<AsyncState>")
    }
}
