//! Simple containers - immutable value wrappers.
//!
//! This module provides the simple-container family:
//!
//! - [`Outcome`]: the unified container behind both vocabularies
//! - Either vocabulary: `success`/`fail`/`attempt`, `on_fail_map`/`on_fail_chain`
//! - Maybe vocabulary: `just`/`nothing`/`from_nullable`, `on_nothing_map`/`on_nothing_chain`
//!
//! Simple containers are eager, immutable value objects: constructing one
//! does no work beyond storing its payload, and every operation returns a
//! new value (halting variants return themselves unchanged through
//! `fmap`/`flat_map`).
//!
//! # Examples
//!
//! ```rust
//! use monadic::simple::Outcome;
//!
//! let pipeline: Outcome<String, i32> = Outcome::success(2)
//!     .fmap(|x| x + 3)
//!     .flat_map(|x| if x > 0 { Outcome::just(x) } else { Outcome::nothing() });
//! assert_eq!(pipeline.unwrap_or(0), 5);
//! ```

mod either;
mod maybe;
mod outcome;

pub use outcome::Outcome;
