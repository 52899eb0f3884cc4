//! State - stateful computation threaded through a pipeline.
//!
//! A `State<S, A>` encapsulates a transition function `S -> (A, S)`: it
//! takes the current state, produces a result, and returns a potentially
//! modified state. Nothing runs until [`State::run`] is called with an
//! initial state.
//!
//! State does not interoperate with the simple family the way
//! [`Effect`](crate::lazy::Effect) does: transformation functions return
//! plain values (or another `State` for `flat_map`), keeping state-thread
//! values always plain.
//!
//! # Laws
//!
//! State satisfies the Functor and Monad laws, plus the state-specific laws:
//!
//! - Get Put Law: `get().flat_map(|s| put(s))` leaves the state unchanged
//! - Put Get Law: `put(s).then(get())` returns `s`
//! - Put Put Law: `put(s1).then(put(s2)) == put(s2)`
//! - Modify Composition: `modify(f).then(modify(g)) == modify(|s| g(f(s)))`
//!
//! # Examples
//!
//! ```rust
//! use monadic::lazy::State;
//!
//! let state: State<i32, i32> = State::new(|s: i32| (s * 2, s + 1));
//! let (result, final_state) = state.run(10);
//! assert_eq!(result, 20);
//! assert_eq!(final_state, 11);
//! ```
//!
//! Counter pattern:
//!
//! ```rust
//! use monadic::lazy::State;
//!
//! fn increment() -> State<i32, ()> {
//!     State::modify(|count| count + 1)
//! }
//!
//! let computation = increment().then(increment()).then(State::get());
//! let (count, _) = computation.run(0);
//! assert_eq!(count, 2);
//! ```
//!
//! # Iterative batch mode
//!
//! Very long pipelines built through nested `fmap`/`flat_map` closures risk
//! exhausting call-stack depth when run. [`State::map_iter`] and
//! [`State::chain_iter`] queue value-preserving steps on the instance
//! itself, and [`State::run_iter`] applies them in a flat loop:
//!
//! ```rust
//! use monadic::lazy::State;
//!
//! let mut counter: State<i32, i32> = State::get();
//! for _ in 0..100_000 {
//!     counter.map_iter(|x| x + 1);
//! }
//! let (result, _) = counter.run_iter(0);
//! assert_eq!(result, 100_000);
//! ```

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use smallvec::SmallVec;

use crate::container::{Container, Variant};
use crate::contract::{panic_message, rethrow_violation};

/// A queued iterative step. Steps preserve the value type: the batch mode
/// exists for long same-shaped pipelines, and type-changing steps compose
/// through ordinary `fmap`/`flat_map`.
enum IterStep<S, A>
where
    S: 'static,
    A: 'static,
{
    Map(Box<dyn Fn(A) -> A>),
    Chain(Box<dyn Fn(A) -> State<S, A>>),
}

/// A lazy container threading a state value through a computation.
///
/// `State<S, A>` represents a computation that, given an initial state of
/// type `S`, produces a result of type `A` and a new state of type `S`.
///
/// Every `fmap`/`flat_map` call produces a brand-new `State`; the only
/// sanctioned mutation in the library is the private iteration queue
/// appended to by [`map_iter`](Self::map_iter)/[`chain_iter`](Self::chain_iter),
/// which is confined to the instance that owns it: it is excluded from
/// `Clone` and never observed by any derived `State`.
///
/// # Examples
///
/// ```rust
/// use monadic::lazy::State;
///
/// let computation: State<i32, i32> = State::get()
///     .flat_map(|current| State::put(current + 1).then(State::pure(current)));
///
/// let (result, final_state) = computation.run(10);
/// assert_eq!(result, 10);
/// assert_eq!(final_state, 11);
/// ```
pub struct State<S, A>
where
    S: 'static,
    A: 'static,
{
    /// The wrapped state transition function.
    /// Uses Rc to allow cloning of the State for `flat_map`.
    transition: Rc<dyn Fn(S) -> (A, S)>,
    /// Iterative batch steps queued on this instance only.
    queue: SmallVec<[IterStep<S, A>; 8]>,
}

impl<S, A> State<S, A>
where
    S: 'static,
    A: 'static,
{
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a new State from a state transition function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// let state: State<i32, i32> = State::new(|s: i32| (s * 2, s + 1));
    /// let (result, final_state) = state.run(10);
    /// assert_eq!(result, 20);
    /// assert_eq!(final_state, 11);
    /// ```
    pub fn new<F>(transition: F) -> Self
    where
        F: Fn(S) -> (A, S) + 'static,
    {
        Self {
            transition: Rc::new(transition),
            queue: SmallVec::new(),
        }
    }

    /// Creates a State that returns a constant value without modifying the
    /// state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// let state: State<i32, &str> = State::pure("constant");
    /// let (result, final_state) = state.run(42);
    /// assert_eq!(result, "constant");
    /// assert_eq!(final_state, 42);
    /// ```
    pub fn pure(value: A) -> Self
    where
        A: Clone,
    {
        Self::new(move |state| (value.clone(), state))
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Runs the computation with the given initial state, returning both
    /// the result and the final state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// let state: State<i32, i32> = State::new(|s: i32| (s + 1, s * 2));
    /// assert_eq!(state.run(10), (11, 20));
    /// ```
    pub fn run(&self, initial_state: S) -> (A, S) {
        (self.transition)(initial_state)
    }

    /// Runs the computation and returns only the result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// let state: State<i32, i32> = State::new(|s: i32| (s * 2, s + 1));
    /// assert_eq!(state.eval(10), 20);
    /// ```
    pub fn eval(&self, initial_state: S) -> A {
        let (result, _) = self.run(initial_state);
        result
    }

    /// Runs the computation and returns only the final state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// let state: State<i32, i32> = State::new(|s: i32| (s * 2, s + 1));
    /// assert_eq!(state.exec(10), 11);
    /// ```
    pub fn exec(&self, initial_state: S) -> S {
        let (_, final_state) = self.run(initial_state);
        final_state
    }

    /// Alias of [`run`](Self::run), kept for interface parity with
    /// [`Effect::fold`](crate::lazy::Effect::fold).
    pub fn fold(&self, initial_state: S) -> (A, S) {
        self.run(initial_state)
    }

    // =========================================================================
    // Transformation
    // =========================================================================

    /// Maps a function over the result of this State, keeping the produced
    /// next-state unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// let state: State<i32, i32> = State::new(|s: i32| (s, s));
    /// let mapped = state.fmap(|value| value * 2);
    /// assert_eq!(mapped.run(21), (42, 21));
    /// ```
    pub fn fmap<B, F>(self, function: F) -> State<S, B>
    where
        F: Fn(A) -> B + 'static,
        B: 'static,
    {
        let transition = self.transition;
        State::new(move |state| {
            let (result, new_state) = (transition)(state);
            (function(result), new_state)
        })
    }

    /// Chains this State with a function that produces another State, whose
    /// transition is invoked on the intermediate state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// let state: State<i32, i32> = State::new(|s: i32| (s, s + 1));
    /// let chained = state.flat_map(|value| State::new(move |s: i32| (value + s, s * 2)));
    /// let (result, final_state) = chained.run(10);
    /// // First: (10, 11), then with state 11: (10 + 11, 22)
    /// assert_eq!(result, 21);
    /// assert_eq!(final_state, 22);
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> State<S, B>
    where
        F: Fn(A) -> State<S, B> + 'static,
        B: 'static,
    {
        let transition = self.transition;
        State::new(move |state| {
            let (result, intermediate_state) = (transition)(state);
            let next = function(result);
            next.run(intermediate_state)
        })
    }

    /// Sequences two States, discarding the first result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// let first: State<i32, i32> = State::new(|s: i32| (s, s + 10));
    /// let sequenced = first.then(State::pure("result"));
    /// assert_eq!(sequenced.run(42), ("result", 52));
    /// ```
    #[must_use]
    pub fn then<B>(self, next: State<S, B>) -> State<S, B>
    where
        B: 'static,
    {
        self.flat_map(move |_| next.clone())
    }

    /// Combines two States using a binary function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// let first: State<i32, i32> = State::new(|s: i32| (s, s + 1));
    /// let second: State<i32, i32> = State::new(|s: i32| (s * 2, s + 1));
    /// let combined = first.map2(second, |a, b| a + b);
    /// // first: (10, 11), second with 11: (22, 12)
    /// assert_eq!(combined.run(10), (32, 12));
    /// ```
    pub fn map2<B, C, F>(self, other: State<S, B>, function: F) -> State<S, C>
    where
        F: Fn(A, B) -> C + 'static,
        B: 'static,
        C: 'static,
    {
        let self_transition = self.transition;
        let other_transition = other.transition;
        State::new(move |state| {
            let (result_a, intermediate_state) = (self_transition)(state);
            let (result_b, final_state) = (other_transition)(intermediate_state);
            (function(result_a, result_b), final_state)
        })
    }

    /// Combines two States into a tuple.
    #[must_use]
    pub fn product<B>(self, other: State<S, B>) -> State<S, (A, B)>
    where
        B: 'static,
    {
        self.map2(other, |a, b| (a, b))
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Recovers from an ordinary panic raised by the transition.
    ///
    /// The handler receives the panic message; the recovery value is paired
    /// with the *original* input state (snapshotted before the failing
    /// transition ran, never a partial one). A
    /// [`ContractViolation`](crate::contract::ContractViolation) is
    /// re-raised untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// let state: State<i32, i32> = State::new(|_: i32| panic!("boom"));
    /// let recovered = state.catch(|message| message.len() as i32);
    /// assert_eq!(recovered.run(7), (4, 7));
    /// ```
    pub fn catch<F>(self, handler: F) -> Self
    where
        S: Clone,
        F: Fn(String) -> A + 'static,
    {
        let transition = self.transition;
        Self::new(move |state: S| {
            let snapshot = state.clone();
            match catch_unwind(AssertUnwindSafe(|| (transition)(state))) {
                Ok(pair) => pair,
                Err(payload) => {
                    let payload = rethrow_violation(payload);
                    (handler(panic_message(payload.as_ref())), snapshot)
                }
            }
        })
    }

    /// Recovers from an ordinary panic by chaining into another State of the
    /// same kind, whose transition is invoked with the original input state.
    /// Contract violations are re-raised untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// let state: State<i32, i32> = State::new(|_: i32| panic!("boom"));
    /// let recovered = state.catch_with(|_| State::get());
    /// assert_eq!(recovered.run(7), (7, 7));
    /// ```
    pub fn catch_with<F>(self, handler: F) -> Self
    where
        S: Clone,
        F: Fn(String) -> Self + 'static,
    {
        let transition = self.transition;
        Self::new(move |state: S| {
            let snapshot = state.clone();
            match catch_unwind(AssertUnwindSafe(|| (transition)(state))) {
                Ok(pair) => pair,
                Err(payload) => {
                    let payload = rethrow_violation(payload);
                    handler(panic_message(payload.as_ref())).run(snapshot)
                }
            }
        })
    }

    // =========================================================================
    // Iterative Batch Mode
    // =========================================================================

    /// Queues a value transformation on this instance for
    /// [`run_iter`](Self::run_iter), returning the same instance.
    ///
    /// Unlike [`fmap`](Self::fmap), no new `State` is built; the step is
    /// appended to a private per-instance queue and applied in a flat loop
    /// at run time. Clones of this instance and States derived from it
    /// through `fmap`/`flat_map` never observe the queue.
    pub fn map_iter<F>(&mut self, function: F) -> &mut Self
    where
        F: Fn(A) -> A + 'static,
    {
        self.queue.push(IterStep::Map(Box::new(function)));
        self
    }

    /// Queues a chaining step on this instance for
    /// [`run_iter`](Self::run_iter), returning the same instance.
    ///
    /// The step has the same semantics as [`flat_map`](Self::flat_map): the
    /// produced State's transition is invoked on the current thread state.
    pub fn chain_iter<F>(&mut self, function: F) -> &mut Self
    where
        F: Fn(A) -> Self + 'static,
    {
        self.queue.push(IterStep::Chain(Box::new(function)));
        self
    }

    /// Runs the base transition, then applies the queued steps in order
    /// through a flat loop, draining the queue.
    ///
    /// After a draining run, a subsequent `run_iter` with no newly queued
    /// steps behaves as a plain [`run`](Self::run). Use
    /// [`run_iter_keep`](Self::run_iter_keep) to preserve the queue for
    /// re-running.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// let mut state: State<i32, i32> = State::get();
    /// state
    ///     .map_iter(|x| x + 1)
    ///     .chain_iter(|x| State::new(move |s: i32| (x * 2, s + 1)));
    /// assert_eq!(state.run_iter(10), (22, 11));
    /// // The queue is drained: this is now a plain run.
    /// assert_eq!(state.run_iter(10), (10, 10));
    /// ```
    pub fn run_iter(&mut self, initial_state: S) -> (A, S) {
        let (mut value, mut state) = self.run(initial_state);
        for step in self.queue.drain(..) {
            match step {
                IterStep::Map(function) => value = function(value),
                IterStep::Chain(function) => {
                    let (next_value, next_state) = function(value).run(state);
                    value = next_value;
                    state = next_state;
                }
            }
        }
        (value, state)
    }

    /// Like [`run_iter`](Self::run_iter), but preserves the queue so the
    /// same batch can be re-run.
    pub fn run_iter_keep(&self, initial_state: S) -> (A, S) {
        let (mut value, mut state) = self.run(initial_state);
        for step in &self.queue {
            match step {
                IterStep::Map(function) => value = function(value),
                IterStep::Chain(function) => {
                    let (next_value, next_state) = function(value).run(state);
                    value = next_value;
                    state = next_state;
                }
            }
        }
        (value, state)
    }
}

// =============================================================================
// State Operations (as inherent constructors)
// =============================================================================

impl<St> State<St, St>
where
    St: Clone + 'static,
{
    /// Creates a State that returns the current state without modifying it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// let state: State<i32, i32> = State::get();
    /// assert_eq!(state.run(42), (42, 42));
    /// ```
    #[must_use]
    pub fn get() -> Self {
        Self::new(|state: St| (state.clone(), state))
    }
}

impl<S> State<S, ()>
where
    S: 'static,
{
    /// Creates a State that replaces the current state with a new value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// let state: State<i32, ()> = State::put(100);
    /// assert_eq!(state.exec(42), 100);
    /// ```
    pub fn put(new_state: S) -> Self
    where
        S: Clone,
    {
        Self::new(move |_| ((), new_state.clone()))
    }

    /// Creates a State that modifies the current state using a function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// let state: State<i32, ()> = State::modify(|x| x * 2);
    /// assert_eq!(state.exec(21), 42);
    /// ```
    pub fn modify<F>(modifier: F) -> Self
    where
        F: Fn(S) -> S + 'static,
    {
        Self::new(move |state| ((), modifier(state)))
    }
}

impl<S, A> State<S, A>
where
    S: 'static,
    A: 'static,
{
    /// Creates a State that projects a value from the current state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::lazy::State;
    ///
    /// #[derive(Clone)]
    /// struct Config { port: u16 }
    ///
    /// let state: State<Config, u16> = State::gets(|c: &Config| c.port);
    /// assert_eq!(state.eval(Config { port: 8080 }), 8080);
    /// ```
    pub fn gets<F>(projection: F) -> Self
    where
        F: Fn(&S) -> A + 'static,
    {
        Self::new(move |state| {
            let result = projection(&state);
            (result, state)
        })
    }
}

// =============================================================================
// Container Classification
// =============================================================================

impl<S, A> Container for State<S, A>
where
    S: 'static,
    A: 'static,
{
    #[inline]
    fn variant(&self) -> Variant {
        Variant::State
    }
}

// =============================================================================
// Clone Implementation
// =============================================================================

impl<S, A> Clone for State<S, A>
where
    S: 'static,
    A: 'static,
{
    /// Clones the transition only. The iteration queue is confined to the
    /// instance that owns it: clones start with an empty queue.
    fn clone(&self) -> Self {
        Self {
            transition: self.transition.clone(),
            queue: SmallVec::new(),
        }
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl<S, A> std::fmt::Display for State<S, A>
where
    S: 'static,
    A: 'static,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<State>")
    }
}
