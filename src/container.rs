//! Base container abstraction - runtime classification of containers.
//!
//! Every container in this library carries two classification facts,
//! checkable at runtime without inspecting its concrete type: which family
//! it belongs to ([`Kind::Simple`] or [`Kind::Lazy`]) and which concrete
//! [`Variant`] it is. Simple variants additionally split into a continuing
//! branch (`Success`, `Just`) and a halting branch (`Fail`, `Nothing`).
//!
//! The classification is what lets the lazy family recognize simple
//! containers produced inside a wrapped computation and apply the unwrap
//! rule uniformly, regardless of which concrete variant turned up.
//!
//! # Examples
//!
//! ```rust
//! use monadic::prelude::*;
//!
//! let present: Outcome<String, i32> = Outcome::just(1);
//! assert_eq!(present.variant(), Variant::Just);
//! assert_eq!(present.variant().kind(), Kind::Simple);
//! assert!(!present.variant().is_halting());
//! assert_eq!(present.variant().family(), Some(Family::Maybe));
//! ```

/// The two container families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    /// Immutable value wrappers: `Success`, `Fail`, `Just`, `Nothing`.
    Simple,
    /// Deferred computations: `Effect`, `State` and their async twins.
    Lazy,
}

/// The sub-family of a simple container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Family {
    /// Recoverable failure: `Success` / `Fail`.
    Either,
    /// Optional values: `Just` / `Nothing`.
    Maybe,
}

/// The concrete variant of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    /// The continuing variant of the Either family.
    Success,
    /// The halting variant of the Either family.
    Fail,
    /// The continuing variant of the Maybe family.
    Just,
    /// The halting variant of the Maybe family.
    Nothing,
    /// The synchronous deferred computation.
    Effect,
    /// The asynchronous deferred computation.
    AsyncEffect,
    /// The synchronous state-threading computation.
    State,
    /// The asynchronous state-threading computation.
    AsyncState,
}

impl Variant {
    /// Returns the family kind of this variant.
    #[inline]
    pub const fn kind(self) -> Kind {
        match self {
            Self::Success | Self::Fail | Self::Just | Self::Nothing => Kind::Simple,
            Self::Effect | Self::AsyncEffect | Self::State | Self::AsyncState => Kind::Lazy,
        }
    }

    /// Returns `true` for the halting simple variants (`Fail`, `Nothing`).
    #[inline]
    pub const fn is_halting(self) -> bool {
        matches!(self, Self::Fail | Self::Nothing)
    }

    /// Returns `true` for the continuing simple variants (`Success`, `Just`).
    #[inline]
    pub const fn is_continuing(self) -> bool {
        matches!(self, Self::Success | Self::Just)
    }

    /// Returns the simple sub-family, or `None` for lazy variants.
    #[inline]
    pub const fn family(self) -> Option<Family> {
        match self {
            Self::Success | Self::Fail => Some(Family::Either),
            Self::Just | Self::Nothing => Some(Family::Maybe),
            Self::Effect | Self::AsyncEffect | Self::State | Self::AsyncState => None,
        }
    }
}

/// The minimal contract every container variant implements.
///
/// Construction (`new`/`pure`/variant constructors), chaining (`fmap`,
/// `flat_map`), elimination (`fold`) and string conversion are inherent to
/// each type because their signatures differ per family; the shared,
/// uniformly-typed part of the contract is classification.
pub trait Container {
    /// The concrete variant of this container instance.
    fn variant(&self) -> Variant;

    /// The family kind of this container instance.
    #[inline]
    fn kind(&self) -> Kind {
        self.variant().kind()
    }
}
