//! Contract-violation signaling.
//!
//! This module provides the error type raised when the container API is
//! misused: extracting a payload from a halting container, or recovering a
//! defect as if it were domain data.
//!
//! Contract violations are defects, not data. They are raised as panics
//! carrying a [`ContractViolation`] payload and every recovery operation in
//! the library ([`Outcome::attempt`](crate::simple::Outcome::attempt),
//! [`Effect::catch`](crate::lazy::Effect::catch) and friends) re-raises them
//! unchanged instead of handing them to a recovery function.
//!
//! # Examples
//!
//! ```rust
//! use monadic::contract::ContractViolation;
//!
//! let violation = ContractViolation {
//!     container: "Outcome",
//!     operation: "extract",
//!     violation: "cannot extract a value from a halting container",
//! };
//! assert_eq!(
//!     format!("{}", violation),
//!     "Outcome::extract: cannot extract a value from a halting container"
//! );
//! ```

use std::any::Any;
use std::panic::resume_unwind;

/// The distinguished error raised on misuse of the container API.
///
/// A `ContractViolation` is distinguishable from every ordinary error a
/// user-supplied function may raise, so recovery operations can re-raise it
/// unconditionally instead of treating it as recoverable data. It propagates
/// all the way to the caller of `run`/`run_async`.
///
/// # Examples
///
/// ```rust
/// use monadic::prelude::*;
///
/// let halted: Outcome<String, i32> = Outcome::fail("boom".to_string());
/// let violation = halted.try_extract().unwrap_err();
/// assert_eq!(violation.container, "Outcome");
/// assert_eq!(violation.operation, "extract");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractViolation {
    /// The container type whose contract was violated.
    pub container: &'static str,
    /// The operation that detected the violation.
    pub operation: &'static str,
    /// A description of the violated rule.
    pub violation: &'static str,
}

impl ContractViolation {
    /// Raises this violation as a panic carrying the violation itself.
    ///
    /// The payload survives `catch_unwind` intact, which is how the
    /// library's recovery operations recognize and re-raise it.
    ///
    /// # Panics
    ///
    /// Always.
    pub fn raise(self) -> ! {
        std::panic::panic_any(self);
    }
}

impl std::fmt::Display for ContractViolation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}::{}: {}",
            self.container, self.operation, self.violation
        )
    }
}

impl std::error::Error for ContractViolation {}

/// Re-raises a caught panic payload if it is a [`ContractViolation`].
///
/// Recovery operations call this on the payload returned by `catch_unwind`
/// before invoking a user-supplied handler: violations pass through
/// untouched, anything else is returned for ordinary recovery.
pub(crate) fn rethrow_violation(payload: Box<dyn Any + Send>) -> Box<dyn Any + Send> {
    if payload.is::<ContractViolation>() {
        resume_unwind(payload);
    }
    payload
}

/// Extracts a human-readable message from an ordinary panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(string) = payload.downcast_ref::<&str>() {
        (*string).to_string()
    } else if let Some(string) = payload.downcast_ref::<String>() {
        string.clone()
    } else {
        "Unknown panic".to_string()
    }
}
