//! Capability traits at the engine's seams
//!
//! Two collaborators are abstracted away from the engine: the value bag the
//! rules read and mutate, and the failure collection that aggregates rule
//! violations. The engine only ever touches them through the traits below.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::foundation::failures::{MessageMap, Messages};

// ============================================================================
// VALUE BAG
// ============================================================================

/// Named access to the values being filtered.
///
/// The engine reaches into the bag exclusively by field name: a read before
/// each predicate call, and writable access for predicates that sanitize in
/// place. Implement this for any struct-like container whose fields a
/// [`Filter`](crate::filter::Filter) should reach.
///
/// Implementations are provided for the standard string-keyed maps and,
/// behind the `json` feature, for `serde_json::Map`.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldfilter::foundation::ValueBag;
///
/// struct SignupForm {
///     username: String,
///     email: String,
/// }
///
/// impl ValueBag for SignupForm {
///     type Value = String;
///
///     fn field(&self, name: &str) -> Option<&String> {
///         match name {
///             "username" => Some(&self.username),
///             "email" => Some(&self.email),
///             _ => None,
///         }
///     }
///
///     fn field_mut(&mut self, name: &str) -> Option<&mut String> {
///         match name {
///             "username" => Some(&mut self.username),
///             "email" => Some(&mut self.email),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait ValueBag {
    /// The field value type.
    ///
    /// `Clone` because the engine snapshots the current value before each
    /// predicate call, then hands the predicate writable access to the bag
    /// itself.
    type Value: Clone;

    /// Returns the current value of the named field, if present.
    fn field(&self, name: &str) -> Option<&Self::Value>;

    /// Returns writable access to the named field, if present.
    fn field_mut(&mut self, name: &str) -> Option<&mut Self::Value>;
}

impl<V: Clone> ValueBag for HashMap<String, V> {
    type Value = V;

    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut V> {
        self.get_mut(name)
    }
}

impl<V: Clone> ValueBag for BTreeMap<String, V> {
    type Value = V;

    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut V> {
        self.get_mut(name)
    }
}

impl<V: Clone> ValueBag for IndexMap<String, V> {
    type Value = V;

    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut V> {
        self.get_mut(name)
    }
}

#[cfg(feature = "json")]
impl ValueBag for serde_json::Map<String, serde_json::Value> {
    type Value = serde_json::Value;

    fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.get(name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut serde_json::Value> {
        self.get_mut(name)
    }
}

// ============================================================================
// FAILURE COLLECTION
// ============================================================================

/// Aggregates failure messages keyed by field for one `apply` pass.
///
/// The engine needs exactly four capabilities from its collaborator: add
/// messages, check emptiness, read everything, read one field. Storage,
/// ordering and rendering belong to the implementor.
/// [`Failures`](crate::foundation::Failures) is the built-in implementation
/// used when the caller supplies nothing.
///
/// `Send + Sync` so a filter holding the collection can move across
/// threads.
pub trait FailureCollection: Send + Sync {
    /// Records one or more messages against the named field.
    ///
    /// A field accumulates messages across calls; recording never replaces
    /// what an earlier rule already reported.
    fn add_messages_for_field(&mut self, field: &str, messages: Messages);

    /// Returns true while no failure has been recorded.
    fn is_empty(&self) -> bool;

    /// Returns every recorded message, keyed by field, in first-failure
    /// order.
    fn messages(&self) -> MessageMap;

    /// Returns the messages recorded for one field, in recording order.
    ///
    /// Empty when the field has no failures.
    fn messages_for_field(&self, field: &str) -> Vec<Cow<'static, str>>;
}

// ============================================================================
// TESTS
// ============================================================================
