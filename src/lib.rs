//! # monadic
//!
//! Composable monadic containers for four orthogonal effect categories:
//! recoverable failure, optional values, deferred computation, and threaded
//! mutable state.
//!
//! ## Overview
//!
//! The library is built from two container families:
//!
//! - **Simple containers** ([`Outcome`](simple::Outcome)): immutable value
//!   wrappers with a continuing branch (`Success`, `Just`) and a halting
//!   branch (`Fail`, `Nothing`). The Either and Maybe vocabularies share one
//!   type, so both families mix freely in a single pipeline.
//! - **Lazy containers** ([`Effect`](lazy::Effect), [`State`](lazy::State)
//!   and their async twins): wrappers around a deferred computation that is
//!   only evaluated on an explicit run call. An `Effect` step that produces
//!   a simple container absorbs it transparently — continuing payloads are
//!   unwrapped, halting containers short-circuit the rest of the chain.
//!
//! Misuse of the API (extracting a payload from a halting container,
//! swallowing a defect in a recovery hook) raises a
//! [`ContractViolation`](contract::ContractViolation), which is never
//! treated as recoverable data.
//!
//! ## Feature Flags
//!
//! - `async`: the asynchronous lazy containers (`AsyncEffect`, `AsyncState`)
//! - `serde`: `Serialize`/`Deserialize` on the simple family and tags
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use monadic::prelude::*;
//!
//! let pipeline: Outcome<String, i32> = Outcome::success(40)
//!     .fmap(|x| x + 2)
//!     .flat_map(|x| Outcome::just(x));
//! assert_eq!(pipeline.extract(), 42);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use monadic::prelude::*;
/// ```
pub mod prelude {

    pub use crate::container::*;

    pub use crate::contract::*;

    pub use crate::lazy::*;

    pub use crate::simple::*;
}

pub mod container;

pub mod contract;

pub mod lazy;

pub mod simple;
