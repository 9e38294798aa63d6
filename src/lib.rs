//! # fieldfilter
//!
//! A per-field input filtering and sanitization engine.
//!
//! Rules are `(message, predicate)` pairs registered per field name. A
//! [`Filter`](filter::Filter) walks every rule of every field in
//! registration order against a mutable value bag, records the message of
//! each failed rule, and reports overall pass/fail. Failed rules never stop
//! the rules after them, so one pass surfaces every problem at once.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldfilter::prelude::*;
//! use std::collections::HashMap;
//!
//! let mut filter: Filter<HashMap<String, String>> = Filter::new();
//! filter.add_rule("username", "username must not be empty", |v: &String, _| !v.is_empty());
//! filter.add_rule("username", "username must be at most 20 chars", |v: &String, _| v.len() <= 20);
//!
//! let mut values = HashMap::from([("username".to_string(), "alice".to_string())]);
//! assert!(filter.apply(&mut values)?);
//! ```
//!
//! ## Sanitizing predicates
//!
//! A predicate receives writable access to the whole bag and may normalize
//! fields in place (trimming, casting); later rules observe the mutation:
//!
//! ```rust,ignore
//! filter.add_rule("email", "email must not be blank", |v: &String, values| {
//!     let trimmed = v.trim().to_string();
//!     if let Some(slot) = values.field_mut("email") {
//!         *slot = trimmed;
//!     }
//!     !v.trim().is_empty()
//! });
//! ```
//!
//! ## Failure reporting
//!
//! `apply` returns a plain boolean; diagnostics are opt-in through
//! [`Filter::messages`](filter::Filter::messages) and
//! [`Filter::failures`](filter::Filter::failures). The failure collection is
//! recreated on every `apply` call, so results never accumulate across runs.

// Rule predicates and the failure-collection factory are boxed trait
// objects; the resulting field types are inherent to the dynamically
// registered rule model.
#![allow(clippy::type_complexity)]

pub mod filter;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod rules;
