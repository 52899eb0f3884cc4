//! Lazy containers - deferred computations run on demand.
//!
//! This module provides the lazy-container family:
//!
//! - [`Effect`]: a deferred computation that transparently absorbs simple
//!   containers produced inside it (see [`Computed`] for the unwrap rule)
//! - [`State`]: a state-threading computation `S -> (A, S)`, with an
//!   opt-in iterative batch mode for very long pipelines
//! - [`AsyncEffect`] / [`AsyncState`]: the asynchronous track of each
//!   (requires the `async` feature)
//!
//! Nothing in this family does work eagerly: constructing or chaining a
//! lazy container only composes closures, and execution is deferred until
//! an explicit `run`/`run_async` call. Chaining is strictly sequential -
//! each step resumes after the previous one, in the order chained, with no
//! concurrent branches and no cancellation once a run starts; callers
//! design short-circuiting into the halting-container flow instead.
//!
//! The synchronous and asynchronous tracks are separate types sharing
//! method names. This makes the wrong-track misuse of a dynamically-typed
//! rendition - handing a pending computation to a synchronous `run` - a
//! compile error, checked uniformly at every entry point.
//!
//! # Examples
//!
//! ```rust
//! use monadic::lazy::{Computed, Effect};
//! use monadic::simple::Outcome;
//!
//! let pipeline: Effect<String, i32> = Effect::new_simple(|| Outcome::success(5))
//!     .fmap_simple(|x| Outcome::just(x + 3))
//!     .flat_map(|x| Effect::new(move || x * 2));
//! assert_eq!(pipeline.run(), Computed::Plain(16));
//! ```

mod computed;
mod effect;
mod state;

pub use computed::Computed;
pub use effect::Effect;
pub use state::State;

// =============================================================================
// Asynchronous track (requires the async feature)
// =============================================================================

#[cfg(feature = "async")]
mod async_effect;

#[cfg(feature = "async")]
mod async_state;

#[cfg(feature = "async")]
pub use async_effect::AsyncEffect;

#[cfg(feature = "async")]
pub use async_state::AsyncState;
