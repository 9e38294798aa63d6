//! Macros for registering rules with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`rules!`](crate::rules!) — register several fields worth of rules
//!   against a filter in one block
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldfilter::{Filter, rules};
//! use std::collections::HashMap;
//!
//! let mut filter: Filter<HashMap<String, String>> = Filter::new();
//! rules! { filter,
//!     "username" => {
//!         "username must not be empty" => |v: &String, _| !v.is_empty(),
//!         "username must be at most 20 chars" => |v: &String, _| v.len() <= 20,
//!     },
//!     "age" => {
//!         "age must be numeric" => |v: &String, _| v.parse::<u32>().is_ok(),
//!     },
//! }
//! ```

// ============================================================================
// RULES MACRO
// ============================================================================

/// Registers several fields worth of rules against a filter in one block.
///
/// Pure sugar over [`Filter::add_rule`](crate::filter::Filter::add_rule):
/// fields and rules register in textual order, which is the evaluation
/// order in `apply`. Nothing is replaced — use
/// [`Filter::set_rule`](crate::filter::Filter::set_rule) directly when a
/// field's previous rules must be discarded.
///
/// # Examples
///
/// ```rust,ignore
/// rules! { filter,
///     "email" => {
///         "email must contain '@'" => |v: &String, _| v.contains('@'),
///     },
/// }
/// ```
#[macro_export]
macro_rules! rules {
    (
        $filter:expr,
        $( $field:expr => { $( $message:expr => $predicate:expr ),+ $(,)? } ),+ $(,)?
    ) => {
        $( $( $filter.add_rule($field, $message, $predicate); )+ )+
    };
}

// ============================================================================
// TESTS
// ============================================================================
