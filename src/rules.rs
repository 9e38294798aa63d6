//! Rule registry
//!
//! A [`Rule`] is an immutable `(message, predicate)` pair; a [`RuleSet`]
//! maps field names to ordered rule sequences. The registry is
//! write-mostly: rules go in through [`set`](RuleSet::set) and
//! [`add`](RuleSet::add) and come back out only through the engine's apply
//! loop.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

use crate::foundation::ValueBag;

// ============================================================================
// PREDICATE
// ============================================================================

/// The executable check/sanitizer behind a rule.
///
/// `evaluate` receives the field's current value alongside writable access
/// to the whole bag, and returns whether the value is acceptable. The bag
/// handle may be used to normalize fields in place; every later rule
/// observes such mutations because the engine re-reads the bag before each
/// predicate call. Side effects must therefore be idempotent-safe across
/// repeated `apply` calls.
///
/// Closures with the matching signature implement this trait, so most
/// callers never name it:
///
/// ```rust,ignore
/// filter.add_rule("age", "must be >= 18", |v: &String, _| {
///     v.parse::<u32>().is_ok_and(|age| age >= 18)
/// });
/// ```
pub trait Predicate<B: ValueBag>: Send + Sync {
    /// Returns true when the rule is satisfied.
    fn evaluate(&self, value: &B::Value, values: &mut B) -> bool;
}

impl<B, F> Predicate<B> for F
where
    B: ValueBag,
    F: Fn(&B::Value, &mut B) -> bool + Send + Sync,
{
    fn evaluate(&self, value: &B::Value, values: &mut B) -> bool {
        self(value, values)
    }
}

// ============================================================================
// RULE
// ============================================================================

/// A `(message, predicate)` pair attached to one field.
///
/// The message is recorded against the field whenever the predicate returns
/// false.
pub struct Rule<B: ValueBag> {
    pub(crate) message: Cow<'static, str>,
    pub(crate) predicate: Box<dyn Predicate<B>>,
}

impl<B: ValueBag> Rule<B> {
    /// Creates a rule from a failure message and a predicate.
    pub fn new(
        message: impl Into<Cow<'static, str>>,
        predicate: impl Predicate<B> + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            predicate: Box::new(predicate),
        }
    }

    /// The message recorded when the predicate fails.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Runs the predicate against the current value and bag.
    pub fn evaluate(&self, value: &B::Value, values: &mut B) -> bool {
        self.predicate.evaluate(value, values)
    }
}

impl<B: ValueBag> fmt::Debug for Rule<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message)
            .field("predicate", &"<predicate>")
            .finish()
    }
}

// ============================================================================
// RULE SET
// ============================================================================

/// Ordered, per-field rule storage.
///
/// Whole-registry iteration follows first-registration order of fields,
/// never alphabetical; rules within a field iterate in registration order,
/// which is the evaluation order in
/// [`Filter::apply`](crate::filter::Filter::apply).
///
/// There are no removal operations: the registry is built once (or
/// incrementally) and then consumed read-only by repeated `apply` calls.
pub struct RuleSet<B: ValueBag> {
    rules: IndexMap<String, Vec<Rule<B>>>,
}

impl<B: ValueBag> RuleSet<B> {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Discards any rules previously registered for `field`, then registers
    /// `rule` as the field's sole rule.
    ///
    /// The field keeps its original position in registry order.
    pub fn set(&mut self, field: impl Into<String>, rule: Rule<B>) {
        self.rules.insert(field.into(), vec![rule]);
    }

    /// Appends `rule` to the end of the field's sequence, creating the
    /// sequence if absent.
    pub fn add(&mut self, field: impl Into<String>, rule: Rule<B>) {
        self.rules.entry(field.into()).or_default().push(rule);
    }

    /// Number of fields with at least one rule.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true while no rule has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules for one field, in evaluation order.
    ///
    /// Empty when the field has no rules.
    #[must_use]
    pub fn rules_for(&self, field: &str) -> &[Rule<B>] {
        self.rules.get(field).map_or(&[], Vec::as_slice)
    }

    /// `(field, rules)` pairs in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule<B>])> {
        self.rules
            .iter()
            .map(|(field, rules)| (field.as_str(), rules.as_slice()))
    }
}

impl<B: ValueBag> Default for RuleSet<B> {
    fn default() -> Self {
        Self::new()
    }
}

// Debug impl - manual because B might not implement Debug
impl<B: ValueBag> fmt::Debug for RuleSet<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.rules.iter()).finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
