//! Core contracts of the filter engine
//!
//! This module contains the fundamental building blocks the engine is
//! wired from:
//!
//! - **Traits**: [`ValueBag`], [`FailureCollection`]
//! - **Errors**: [`FilterError`], [`FilterResult`]
//! - **Failure storage**: [`Failures`], [`Messages`], [`MessageMap`]
//!
//! # Architecture
//!
//! ## 1. Narrow collaborator seams
//!
//! The engine never commits to a concrete value-bag or failure-collection
//! type. It reads and mutates values through [`ValueBag`] and records
//! failures through [`FailureCollection`] — four capabilities in total:
//!
//! ```rust,ignore
//! fn add_messages_for_field(&mut self, field: &str, messages: Messages);
//! fn is_empty(&self) -> bool;
//! fn messages(&self) -> MessageMap;
//! fn messages_for_field(&self, field: &str) -> Vec<Cow<'static, str>>;
//! ```
//!
//! ## 2. Two error channels, never mixed
//!
//! A rule violation is data: it becomes a message in the failure
//! collection. A [`FilterError`] is a programmer error (missing field,
//! reading state before `apply`) and propagates as `Err` — the two never
//! fold into each other.
//!
//! ## 3. Order is meaning
//!
//! Registration order is evaluation order, and first-failure order is
//! reporting order, so insertion-ordered maps back both the registry and
//! the default collection.

// Module declarations
pub mod error;
pub mod failures;
pub mod traits;

// Re-export everything at the foundation level for convenience
pub use error::{FilterError, FilterResult};
pub use failures::{Failures, MessageMap, Messages};
pub use traits::{FailureCollection, ValueBag};

// ============================================================================
// PRELUDE
// ============================================================================

/// Common imports for working with the engine's core contracts.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldfilter::foundation::prelude::*;
///
/// let mut failures = Failures::new();
/// failures.add_messages_for_field("email", "already taken".into());
/// ```
pub mod prelude {
    pub use super::{
        FailureCollection, Failures, FilterError, FilterResult, MessageMap, Messages, ValueBag,
    };
}
