//! Prelude module for convenient imports.
//!
//! Provides a single `use fieldfilter::prelude::*;` import that brings in
//! the engine, the rule registry, and the failure-reporting contracts.
//!
//! The [`rules!`](crate::rules!) macro lives at the crate root
//! (`use fieldfilter::rules;`) as `#[macro_export]` macros do.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldfilter::prelude::*;
//! use std::collections::HashMap;
//!
//! let mut filter: Filter<HashMap<String, String>> = Filter::new();
//! filter.add_rule("name", "name is required", |v: &String, _| !v.is_empty());
//! ```

// ============================================================================
// ENGINE
// ============================================================================

pub use crate::filter::Filter;

// ============================================================================
// RULES: registry, rule, predicate seam
// ============================================================================

pub use crate::rules::{Predicate, Rule, RuleSet};

// ============================================================================
// FOUNDATION: collaborator traits, failure storage, errors
// ============================================================================

pub use crate::foundation::{
    FailureCollection, Failures, FilterError, FilterResult, MessageMap, Messages, ValueBag,
};
