//! Basic usage example for fieldfilter

use std::collections::HashMap;

use fieldfilter::prelude::*;

type Bag = HashMap<String, String>;

fn main() -> Result<(), FilterError> {
    let mut filter: Filter<Bag> = Filter::new();

    // Trim the username in place, then validate the trimmed value.
    filter.add_rule("username", "username must not be blank", |v: &String, values: &mut Bag| {
        let trimmed = v.trim().to_string();
        let blank = trimmed.is_empty();
        if let Some(slot) = values.field_mut("username") {
            *slot = trimmed;
        }
        !blank
    });
    filter.add_rule("username", "username must be at most 20 chars", |v: &String, _: &mut Bag| {
        v.trim().len() <= 20
    });

    filter.add_rule("age", "age must be numeric", |v: &String, _: &mut Bag| {
        v.parse::<u32>().is_ok()
    });
    filter.add_rule("age", "age must be >= 18", |v: &String, _: &mut Bag| {
        v.parse::<u32>().is_ok_and(|age| age >= 18)
    });

    // A bag that passes.
    let mut values = Bag::from([
        ("username".to_string(), "  alice  ".to_string()),
        ("age".to_string(), "30".to_string()),
    ]);
    if filter.apply(&mut values)? {
        println!("✓ bag accepted; username sanitized to {:?}", values["username"]);
    }

    // A bag that fails on every front.
    let mut values = Bag::from([
        ("username".to_string(), "   ".to_string()),
        ("age".to_string(), "abc".to_string()),
    ]);
    if !filter.apply(&mut values)? {
        println!("✗ bag rejected:");
        for (field, messages) in filter.messages()? {
            for message in messages {
                println!("    {field}: {message}");
            }
        }
    }

    // Failures computed outside the rule loop land in the same collection.
    filter.add_messages("username", "already taken")?;
    println!("after manual injection: {:?}", filter.messages_for("username")?);

    Ok(())
}
