//! Shared test helpers for schema tests.

#![allow(dead_code)]

use podrecord_types::{Term, Thing};

pub const URL: &str = "http://an.entity#one";
pub const P1: &str = "http://predicate.one";
pub const P2: &str = "http://predicate.two";
pub const P3: &str = "http://predicate.three";

/// Whether `thing` holds exactly `expected`, in any order.
pub fn has_exactly(thing: &Thing, expected: &[(&str, Term)]) -> bool {
    thing.len() == expected.len()
        && expected
            .iter()
            .all(|(p, v)| thing.values(p).iter().any(|t| t == v))
}

/// A thing at [`URL`] carrying the given statements.
pub fn thing_with(statements: &[(&str, Term)]) -> Thing {
    statements
        .iter()
        .cloned()
        .fold(Thing::at(URL), |thing, (p, v)| thing.add(p, v))
}
