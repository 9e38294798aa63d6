//! Integration tests for the filter engine: registration semantics, the
//! apply loop, failure reporting, and the collaborator seams.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fieldfilter::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

type Bag = HashMap<String, String>;

fn bag(pairs: &[(&str, &str)]) -> Bag {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

// ============================================================================
// REGISTRATION SEMANTICS
// ============================================================================

#[test]
fn evaluation_order_equals_add_order() {
    let trace = Arc::new(Mutex::new(Vec::new()));
    let mut filter: Filter<Bag> = Filter::new();

    for label in ["first", "second", "third"] {
        let trace = Arc::clone(&trace);
        filter.add_rule("name", label, move |_: &String, _: &mut Bag| {
            trace.lock().unwrap().push(label);
            true
        });
    }

    let mut values = bag(&[("name", "alice")]);
    assert_eq!(filter.apply(&mut values), Ok(true));
    assert_eq!(*trace.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn field_order_is_first_registration_order() {
    let trace = Arc::new(Mutex::new(Vec::new()));
    let mut filter: Filter<Bag> = Filter::new();

    for field in ["zebra", "apple", "mango"] {
        let trace = Arc::clone(&trace);
        filter.add_rule(field, "x", move |_: &String, _: &mut Bag| {
            trace.lock().unwrap().push(field);
            true
        });
    }

    let mut values = bag(&[("zebra", "z"), ("apple", "a"), ("mango", "m")]);
    assert_eq!(filter.apply(&mut values), Ok(true));
    assert_eq!(*trace.lock().unwrap(), vec!["zebra", "apple", "mango"]);
}

#[test]
fn set_rule_discards_previous_rules() {
    let mut filter: Filter<Bag> = Filter::new();
    for i in 0..5 {
        filter.add_rule("name", format!("rule {i}"), |v: &String, _: &mut Bag| {
            v.is_empty()
        });
    }
    filter.set_rule("name", "only rule", |v: &String, _: &mut Bag| !v.is_empty());

    assert_eq!(filter.rules().rules_for("name").len(), 1);

    let mut values = bag(&[("name", "alice")]);
    assert_eq!(filter.apply(&mut values), Ok(true));
}

// ============================================================================
// APPLY: PASS/FAIL AND MESSAGE REPORTING
// ============================================================================

#[test]
fn all_passing_rules_yield_true_and_no_messages() {
    let mut filter: Filter<Bag> = Filter::new();
    filter.add_rule("name", "name must not be empty", |v: &String, _: &mut Bag| {
        !v.is_empty()
    });
    filter.add_rule("age", "age must be numeric", |v: &String, _: &mut Bag| {
        v.parse::<u32>().is_ok()
    });

    let mut values = bag(&[("name", "alice"), ("age", "30")]);
    assert_eq!(filter.apply(&mut values), Ok(true));
    assert_eq!(filter.messages().unwrap(), MessageMap::new());
}

#[test]
fn single_failure_reports_exactly_one_message() {
    let mut filter: Filter<Bag> = Filter::new();
    filter.add_rule("name", "required", |v: &String, _: &mut Bag| !v.is_empty());

    let mut values = bag(&[("name", "")]);
    assert_eq!(filter.apply(&mut values), Ok(false));
    assert_eq!(
        filter.messages_for("name").unwrap(),
        vec![Cow::Borrowed("required")]
    );
}

#[test]
fn failing_rules_do_not_short_circuit() {
    let mut filter: Filter<Bag> = Filter::new();
    filter.add_rule("age", "must be numeric", |v: &String, _: &mut Bag| {
        v.parse::<u32>().is_ok()
    });
    filter.add_rule("age", "must be >= 18", |v: &String, _: &mut Bag| {
        v.parse::<u32>().is_ok_and(|age| age >= 18)
    });

    let mut values = bag(&[("age", "abc")]);
    assert_eq!(filter.apply(&mut values), Ok(false));
    assert_eq!(
        filter.messages_for("age").unwrap(),
        vec![Cow::Borrowed("must be numeric"), Cow::Borrowed("must be >= 18")]
    );
}

#[test]
fn messages_for_clean_field_is_empty() {
    let mut filter: Filter<Bag> = Filter::new();
    filter.add_rule("name", "required", |v: &String, _: &mut Bag| !v.is_empty());
    filter.add_rule("age", "must be numeric", |v: &String, _: &mut Bag| {
        v.parse::<u32>().is_ok()
    });

    let mut values = bag(&[("name", ""), ("age", "30")]);
    assert_eq!(filter.apply(&mut values), Ok(false));
    assert!(filter.messages_for("age").unwrap().is_empty());
}

#[rstest]
#[case("alice", true)]
#[case("", false)]
#[case("this-username-is-way-too-long-to-accept", false)]
fn username_rules(#[case] input: &str, #[case] expected: bool) {
    let mut filter: Filter<Bag> = Filter::new();
    filter.add_rule("username", "must not be empty", |v: &String, _: &mut Bag| {
        !v.is_empty()
    });
    filter.add_rule("username", "at most 20 chars", |v: &String, _: &mut Bag| {
        v.len() <= 20
    });

    let mut values = bag(&[("username", input)]);
    assert_eq!(filter.apply(&mut values), Ok(expected));
}

// ============================================================================
// APPLY: FRESH FAILURE STATE PER PASS
// ============================================================================

#[test]
fn failures_never_leak_across_passes() {
    let mut filter: Filter<Bag> = Filter::new();
    filter.add_rule("name", "required", |v: &String, _: &mut Bag| !v.is_empty());

    let mut bad = bag(&[("name", "")]);
    assert_eq!(filter.apply(&mut bad), Ok(false));
    assert_eq!(filter.messages_for("name").unwrap().len(), 1);

    let mut good = bag(&[("name", "alice")]);
    assert_eq!(filter.apply(&mut good), Ok(true));
    assert!(filter.messages().unwrap().is_empty());
    assert!(filter.messages_for("name").unwrap().is_empty());
}

#[test]
fn repeated_failing_passes_do_not_accumulate() {
    let mut filter: Filter<Bag> = Filter::new();
    filter.add_rule("name", "required", |v: &String, _: &mut Bag| !v.is_empty());

    let mut values = bag(&[("name", "")]);
    assert_eq!(filter.apply(&mut values), Ok(false));
    assert_eq!(filter.apply(&mut values), Ok(false));
    assert_eq!(filter.messages_for("name").unwrap().len(), 1);
}

// ============================================================================
// SANITIZING PREDICATES
// ============================================================================

#[test]
fn bag_mutation_is_visible_to_later_rules() {
    let mut filter: Filter<Bag> = Filter::new();
    // Trims the field in place, then accepts unconditionally.
    filter.add_rule("email", "trim", |v: &String, values: &mut Bag| {
        let trimmed = v.trim().to_string();
        if let Some(slot) = values.field_mut("email") {
            *slot = trimmed;
        }
        true
    });
    filter.add_rule("email", "no surrounding whitespace", |v: &String, _: &mut Bag| {
        v.trim() == v
    });

    let mut values = bag(&[("email", "  alice@example.com  ")]);
    assert_eq!(filter.apply(&mut values), Ok(true));
    assert_eq!(values["email"], "alice@example.com");
}

#[test]
fn bag_mutation_is_visible_to_rules_on_other_fields() {
    let mut filter: Filter<Bag> = Filter::new();
    filter.add_rule("country", "normalize", |v: &String, values: &mut Bag| {
        let upper = v.to_uppercase();
        if let Some(slot) = values.field_mut("country") {
            *slot = upper;
        }
        true
    });
    filter.add_rule("zip", "US zips are 5 digits", |v: &String, values: &mut Bag| {
        values.field("country").map(String::as_str) != Some("US")
            || (v.len() == 5 && v.chars().all(|c| c.is_ascii_digit()))
    });

    let mut values = bag(&[("country", "us"), ("zip", "1234")]);
    assert_eq!(filter.apply(&mut values), Ok(false));
    assert_eq!(
        filter.messages_for("zip").unwrap(),
        vec![Cow::Borrowed("US zips are 5 digits")]
    );
}

// ============================================================================
// USAGE ERRORS
// ============================================================================

#[test]
fn missing_field_fails_loudly_and_keeps_partial_state() {
    let mut filter: Filter<Bag> = Filter::new();
    filter.add_rule("name", "required", |v: &String, _: &mut Bag| !v.is_empty());
    filter.add_rule("email", "required", |v: &String, _: &mut Bag| !v.is_empty());

    let mut values = bag(&[("name", "")]);
    let err = filter.apply(&mut values).unwrap_err();
    assert_eq!(err, FilterError::missing_field("email"));
    assert_eq!(err.field(), Some("email"));

    // Failures recorded before the error stay inspectable.
    assert_eq!(
        filter.messages_for("name").unwrap(),
        vec![Cow::Borrowed("required")]
    );
}

#[test]
fn state_reads_before_any_apply_are_errors() {
    let mut filter: Filter<Bag> = Filter::new();
    assert_eq!(filter.messages().unwrap_err(), FilterError::NotApplied);
    assert_eq!(filter.messages_for("name").unwrap_err(), FilterError::NotApplied);
    assert!(filter.failures().is_err());
    assert_eq!(
        filter.add_messages("name", "late").unwrap_err(),
        FilterError::NotApplied
    );
}

// ============================================================================
// MANUAL MESSAGE INJECTION
// ============================================================================

#[test]
fn add_messages_flips_a_passing_result() {
    let mut filter: Filter<Bag> = Filter::new();
    filter.add_rule("email", "must contain '@'", |v: &String, _: &mut Bag| {
        v.contains('@')
    });

    let mut values = bag(&[("email", "alice@example.com")]);
    assert_eq!(filter.apply(&mut values), Ok(true));

    // Externally-computed failure, e.g. a uniqueness check.
    filter.add_messages("email", "already taken").unwrap();

    assert!(!filter.failures().unwrap().is_empty());
    assert_eq!(
        filter.messages_for("email").unwrap(),
        vec![Cow::Borrowed("already taken")]
    );
}

#[test]
fn add_messages_accepts_one_or_many() {
    let mut filter: Filter<Bag> = Filter::new();
    filter.add_rule("name", "x", |_: &String, _: &mut Bag| true);

    let mut values = bag(&[("name", "alice")]);
    filter.apply(&mut values).unwrap();

    filter.add_messages("name", "first").unwrap();
    filter
        .add_messages("name", vec!["second", "third"])
        .unwrap();

    assert_eq!(filter.messages_for("name").unwrap().len(), 3);
}

// ============================================================================
// COLLABORATOR SEAM
// ============================================================================

/// A failure collection that also counts every recording call.
#[derive(Default)]
struct CountingFailures {
    inner: Failures,
    calls: usize,
}

impl FailureCollection for CountingFailures {
    fn add_messages_for_field(&mut self, field: &str, messages: Messages) {
        self.calls += 1;
        self.inner.add_messages_for_field(field, messages);
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn messages(&self) -> MessageMap {
        self.inner.messages()
    }

    fn messages_for_field(&self, field: &str) -> Vec<Cow<'static, str>> {
        self.inner.messages_for_field(field)
    }
}

#[test]
fn custom_failure_collection_receives_every_failure() {
    let mut filter: Filter<Bag> = Filter::with_failure_factory(CountingFailures::default);
    filter.add_rule("age", "must be numeric", |v: &String, _: &mut Bag| {
        v.parse::<u32>().is_ok()
    });
    filter.add_rule("age", "must be >= 18", |v: &String, _: &mut Bag| {
        v.parse::<u32>().is_ok_and(|age| age >= 18)
    });

    let mut values = bag(&[("age", "abc")]);
    assert_eq!(filter.apply(&mut values), Ok(false));
    assert_eq!(filter.messages_for("age").unwrap().len(), 2);
}

// ============================================================================
// JSON VALUE BAGS
// ============================================================================

#[cfg(feature = "json")]
#[test]
fn json_bag_end_to_end() {
    use serde_json::{Map, Value, json};

    let mut filter: Filter<Map<String, Value>> = Filter::new();
    filter.add_rule("age", "age must be a number", |v: &Value, _: &mut Map<String, Value>| {
        v.is_u64()
    });
    filter.add_rule("age", "age must be >= 18", |v: &Value, _: &mut Map<String, Value>| {
        v.as_u64().is_some_and(|age| age >= 18)
    });

    let Value::Object(mut values) = json!({"age": "abc"}) else {
        panic!("object literal");
    };
    assert_eq!(filter.apply(&mut values), Ok(false));
    assert_eq!(
        filter.messages_for("age").unwrap(),
        vec![
            Cow::Borrowed("age must be a number"),
            Cow::Borrowed("age must be >= 18")
        ]
    );

    // The message map serializes straight into an API error payload.
    let report = serde_json::to_value(filter.messages().unwrap()).unwrap();
    assert_eq!(
        report,
        json!({"age": ["age must be a number", "age must be >= 18"]})
    );
}
