//! Failure message aggregation
//!
//! [`Messages`] is the "one message or many" input type accepted wherever
//! the engine records failures; [`Failures`] is the default
//! [`FailureCollection`] handed to every filter that is not given a custom
//! one.
//!
//! All message strings are `Cow<'static, str>` for zero-allocation in the
//! common case of messages known at compile time.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use smallvec::SmallVec;

use crate::foundation::traits::FailureCollection;

/// Messages recorded for all fields, keyed by field name.
///
/// Iteration order is first-failure order, never alphabetical.
pub type MessageMap = IndexMap<String, Vec<Cow<'static, str>>>;

// ============================================================================
// MESSAGES
// ============================================================================

/// One failure message or several, accepted by everything that records
/// failures.
///
/// One or two messages per call is the overwhelmingly common case, so the
/// backing store is a small vector that only spills to the heap beyond
/// that.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldfilter::foundation::Messages;
///
/// let one: Messages = "already taken".into();
/// let many: Messages = vec!["too short", "not alphanumeric"].into();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Messages(SmallVec<[Cow<'static, str>; 2]>);

impl Messages {
    /// Creates an empty message set.
    #[must_use]
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when there are no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a message.
    pub fn push(&mut self, message: impl Into<Cow<'static, str>>) {
        self.0.push(message.into());
    }

    /// Iterates the messages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|message| message.as_ref())
    }
}

impl From<&'static str> for Messages {
    fn from(message: &'static str) -> Self {
        Self(SmallVec::from_iter([Cow::Borrowed(message)]))
    }
}

impl From<String> for Messages {
    fn from(message: String) -> Self {
        Self(SmallVec::from_iter([Cow::Owned(message)]))
    }
}

impl From<Cow<'static, str>> for Messages {
    fn from(message: Cow<'static, str>) -> Self {
        Self(SmallVec::from_iter([message]))
    }
}

impl From<Vec<&'static str>> for Messages {
    fn from(messages: Vec<&'static str>) -> Self {
        messages.into_iter().map(Cow::Borrowed).collect()
    }
}

impl From<Vec<String>> for Messages {
    fn from(messages: Vec<String>) -> Self {
        messages.into_iter().map(Cow::Owned).collect()
    }
}

impl From<Vec<Cow<'static, str>>> for Messages {
    fn from(messages: Vec<Cow<'static, str>>) -> Self {
        Self(SmallVec::from_vec(messages))
    }
}

impl FromIterator<Cow<'static, str>> for Messages {
    fn from_iter<I: IntoIterator<Item = Cow<'static, str>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Messages {
    type Item = Cow<'static, str>;
    type IntoIter = smallvec::IntoIter<[Cow<'static, str>; 2]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// ============================================================================
// DEFAULT FAILURE COLLECTION
// ============================================================================

/// The built-in failure collection: message storage keyed by field.
///
/// Field order is first-failure order; message order within a field is
/// recording order. Serializes as a plain `{field: [messages]}` object so a
/// failure report can go straight into an API response.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldfilter::foundation::{FailureCollection, Failures};
///
/// let mut failures = Failures::new();
/// failures.add_messages_for_field("age", "must be numeric".into());
/// failures.add_messages_for_field("age", "must be >= 18".into());
///
/// assert!(!failures.is_empty());
/// assert_eq!(failures.messages_for_field("age").len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Failures {
    messages: MessageMap,
}

impl Failures {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: MessageMap::new(),
        }
    }

    /// Number of fields with at least one failure.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Field names in first-failure order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// `(field, messages)` pairs in first-failure order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Cow<'static, str>])> {
        self.messages
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl FailureCollection for Failures {
    fn add_messages_for_field(&mut self, field: &str, messages: Messages) {
        if messages.is_empty() {
            return;
        }
        if let Some(slot) = self.messages.get_mut(field) {
            slot.extend(messages);
        } else {
            self.messages.insert(field.to_owned(), messages.into_iter().collect());
        }
    }

    fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn messages(&self) -> MessageMap {
        self.messages.clone()
    }

    fn messages_for_field(&self, field: &str) -> Vec<Cow<'static, str>> {
        self.messages.get(field).cloned().unwrap_or_default()
    }
}

impl fmt::Display for Failures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.messages.is_empty() {
            return write!(f, "no failures");
        }
        for (i, (field, messages)) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{field}: {}", messages.join("; "))?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
