//! The filter engine
//!
//! [`Filter`] walks its rule registry against a mutable value bag: every
//! rule of every field runs in registration order, each failed rule records
//! its message against its field, and the overall pass/fail is the
//! emptiness of the per-call failure collection.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldfilter::prelude::*;
//! use std::collections::HashMap;
//!
//! let mut filter: Filter<HashMap<String, String>> = Filter::new();
//! filter.add_rule("age", "age must be numeric", |v: &String, _| {
//!     v.parse::<u32>().is_ok()
//! });
//! filter.add_rule("age", "age must be >= 18", |v: &String, _| {
//!     v.parse::<u32>().is_ok_and(|age| age >= 18)
//! });
//!
//! let mut values = HashMap::from([("age".to_string(), "abc".to_string())]);
//! assert!(!filter.apply(&mut values)?);
//! assert_eq!(filter.messages_for("age")?.len(), 2);
//! ```

use std::borrow::Cow;
use std::fmt;

use tracing::{debug, trace};

use crate::foundation::{
    FailureCollection, Failures, FilterError, FilterResult, MessageMap, Messages, ValueBag,
};
use crate::rules::{Predicate, Rule, RuleSet};

// ============================================================================
// FILTER
// ============================================================================

/// The per-field filter engine.
///
/// Owns the rule registry, a failure-collection factory, and — after each
/// [`apply`](Self::apply) — the failure collection describing that pass.
/// The factory runs at the start of every `apply`, so a pass never sees the
/// failures of the pass before it.
///
/// The engine is synchronous and single-threaded: `apply` fully resolves
/// before returning, and nothing synchronizes concurrent calls on one
/// instance.
///
/// # Type Parameters
///
/// * `B` - The value-bag type the rules run against
pub struct Filter<B: ValueBag> {
    rules: RuleSet<B>,
    failures: Option<Box<dyn FailureCollection>>,
    failure_factory: Box<dyn Fn() -> Box<dyn FailureCollection> + Send + Sync>,
}

impl<B: ValueBag> Filter<B> {
    /// Creates a filter whose failure collections are the built-in
    /// [`Failures`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_failure_factory(Failures::new)
    }

    /// Creates a filter with a caller-supplied failure-collection factory.
    ///
    /// The factory is invoked fresh at the start of every
    /// [`apply`](Self::apply) call; the engine exclusively owns each
    /// per-call collection.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use fieldfilter::prelude::*;
    ///
    /// let filter: Filter<HashMap<String, String>> =
    ///     Filter::with_failure_factory(Failures::new);
    /// ```
    pub fn with_failure_factory<C, F>(factory: F) -> Self
    where
        C: FailureCollection + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        Self {
            rules: RuleSet::new(),
            failures: None,
            failure_factory: Box::new(move || Box::new(factory())),
        }
    }

    /// Discards any rules previously registered for `field`, then registers
    /// the given rule as the field's sole rule.
    pub fn set_rule(
        &mut self,
        field: impl Into<String>,
        message: impl Into<Cow<'static, str>>,
        predicate: impl Predicate<B> + 'static,
    ) {
        self.rules.set(field, Rule::new(message, predicate));
    }

    /// Appends a rule to the end of the field's sequence, creating the
    /// sequence if absent.
    ///
    /// The order of `add_rule` calls for one field is the evaluation order
    /// in [`apply`](Self::apply).
    pub fn add_rule(
        &mut self,
        field: impl Into<String>,
        message: impl Into<Cow<'static, str>>,
        predicate: impl Predicate<B> + 'static,
    ) {
        self.rules.add(field, Rule::new(message, predicate));
    }

    /// Read access to the rule registry.
    #[must_use]
    pub fn rules(&self) -> &RuleSet<B> {
        &self.rules
    }

    /// Filters (sanitizes and validates) the value bag.
    ///
    /// For each field in first-registration order, each rule runs in
    /// registration order: the field's current value is re-read from the
    /// bag, the predicate is invoked with `(value, &mut bag)`, and a
    /// `false` return records the rule's message against the field. There
    /// is no short-circuit — every rule runs even after earlier rules on
    /// the same field have failed, so one pass reports every problem.
    ///
    /// Predicates may rewrite the bag; because the value is re-read before
    /// every predicate call, later rules (on this field and on others) see
    /// the mutation.
    ///
    /// Returns `Ok(true)` iff no rule failed.
    ///
    /// # Errors
    ///
    /// [`FilterError::MissingField`] when the bag has no value for a
    /// registered field. The failures recorded up to that point are
    /// installed as current state before the error returns, so they remain
    /// inspectable.
    pub fn apply(&mut self, values: &mut B) -> FilterResult<bool> {
        let mut failures = (self.failure_factory)();

        for (field, rules) in self.rules.iter() {
            for rule in rules {
                // Re-read on every iteration: an earlier predicate may have
                // rewritten this or any other field.
                let Some(value) = values.field(field).cloned() else {
                    self.failures = Some(failures);
                    return Err(FilterError::missing_field(field));
                };
                if !rule.evaluate(&value, values) {
                    trace!(field, rule = rule.message(), "rule failed");
                    failures.add_messages_for_field(field, rule.message.clone().into());
                }
            }
        }

        let passed = failures.is_empty();
        debug!(passed, fields = self.rules.len(), "filter pass complete");
        self.failures = Some(failures);
        Ok(passed)
    }

    /// The failure collection from the most recent [`apply`](Self::apply).
    ///
    /// # Errors
    ///
    /// [`FilterError::NotApplied`] before the first `apply` call.
    pub fn failures(&self) -> FilterResult<&dyn FailureCollection> {
        self.failures.as_deref().ok_or(FilterError::NotApplied)
    }

    /// Every message from the most recent pass, keyed by field, in
    /// first-failure order.
    ///
    /// # Errors
    ///
    /// [`FilterError::NotApplied`] before the first `apply` call.
    pub fn messages(&self) -> FilterResult<MessageMap> {
        Ok(self.failures()?.messages())
    }

    /// The messages recorded for one field; empty when the field had no
    /// failures in the most recent pass.
    ///
    /// # Errors
    ///
    /// [`FilterError::NotApplied`] before the first `apply` call.
    pub fn messages_for(&self, field: &str) -> FilterResult<Vec<Cow<'static, str>>> {
        Ok(self.failures()?.messages_for_field(field))
    }

    /// Records messages against a field outside the rule-evaluation loop.
    ///
    /// Escape hatch for cross-field or externally-computed failures — say,
    /// a uniqueness check against a store. A pass that returned `Ok(true)`
    /// is no longer passing once a message lands here; re-check
    /// [`failures`](Self::failures) emptiness after using it.
    ///
    /// # Errors
    ///
    /// [`FilterError::NotApplied`] before the first `apply` call: there is
    /// no current failure collection to target.
    pub fn add_messages(
        &mut self,
        field: &str,
        messages: impl Into<Messages>,
    ) -> FilterResult<()> {
        let failures = self.failures.as_deref_mut().ok_or(FilterError::NotApplied)?;
        failures.add_messages_for_field(field, messages.into());
        Ok(())
    }
}

impl<B: ValueBag> Default for Filter<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ValueBag> fmt::Debug for Filter<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("rules", &self.rules)
            .field("applied", &self.failures.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
