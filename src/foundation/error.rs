//! Usage-error taxonomy for the filter engine
//!
//! Rule violations are data: they are recorded as messages in the failure
//! collection and never surface as `Err`. The variants here are programmer
//! errors — misuse of the engine, or a value bag that does not match the
//! registry — and they fail loudly instead of being folded into the
//! collection.

// ============================================================================
// FILTER ERROR
// ============================================================================

/// Usage errors raised by [`Filter`](crate::filter::Filter).
///
/// # Examples
///
/// ```rust,ignore
/// use fieldfilter::prelude::*;
///
/// let filter: Filter<HashMap<String, String>> = Filter::new();
///
/// // Reading failure state before any `apply` call is a usage error.
/// assert_eq!(filter.messages(), Err(FilterError::NotApplied));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FilterError {
    /// A registered field was absent from the value bag during `apply`.
    ///
    /// The failure collection built up to that point is installed as the
    /// engine's current state before this error propagates, so earlier
    /// failures stay inspectable.
    #[error("field '{field}' is not present in the value bag")]
    MissingField {
        /// Name of the registered field the bag could not provide.
        field: String,
    },

    /// Failure state was accessed before any `apply` call.
    ///
    /// `failures`, `messages`, `messages_for` and `add_messages` all need a
    /// current failure collection, and one only exists once `apply` has run
    /// at least once in the engine's lifetime.
    #[error("no failure collection: `apply` has not been called on this filter")]
    NotApplied,
}

impl FilterError {
    /// Creates a [`MissingField`](Self::MissingField) error for the named
    /// field.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Returns the offending field name for [`MissingField`](Self::MissingField).
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field } => Some(field),
            Self::NotApplied => None,
        }
    }
}

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// A result whose error side is a [`FilterError`].
pub type FilterResult<T> = Result<T, FilterError>;

// ============================================================================
// TESTS
// ============================================================================
