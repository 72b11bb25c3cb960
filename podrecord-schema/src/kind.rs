use chrono::{DateTime, SecondsFormat, Utc};
use podrecord_types::{Literal, Term};
use serde_json::{Number, Value};
use std::fmt;

/// The kind of value a field stores.
///
/// Each kind knows how to turn a record value into a statement object and
/// back. Date-times travel as RFC 3339 strings on the record side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Boolean,
    Url,
    DateTime,
    Decimal,
    Integer,
}

impl ValueKind {
    /// Converts a record value into a statement object.
    ///
    /// Returns `None` when the value does not have the expected shape.
    pub fn to_term(self, value: &Value) -> Option<Term> {
        let literal = match (self, value) {
            (Self::String, Value::String(s)) => Literal::String(s.clone()),
            (Self::Url, Value::String(s)) => return Some(Term::Iri(s.clone())),
            (Self::Boolean, Value::Bool(b)) => Literal::Boolean(*b),
            (Self::Integer, Value::Number(n)) => Literal::Integer(n.as_i64()?),
            (Self::Decimal, Value::Number(n)) => Literal::Decimal(n.as_f64()?),
            (Self::DateTime, Value::String(s)) => Literal::DateTime(
                DateTime::parse_from_rfc3339(s).ok()?.with_timezone(&Utc),
            ),
            _ => return None,
        };
        Some(Term::Literal(literal))
    }

    /// Converts a statement object into a record value.
    ///
    /// Returns `None` for objects of another kind, so a predicate holding
    /// mixed values only yields the ones this kind understands.
    pub fn from_term(self, term: &Term) -> Option<Value> {
        match (self, term) {
            (Self::Url, Term::Iri(url)) => Some(Value::String(url.clone())),
            (Self::String, Term::Literal(Literal::String(s))) => Some(Value::String(s.clone())),
            (Self::Boolean, Term::Literal(Literal::Boolean(b))) => Some(Value::Bool(*b)),
            (Self::Integer, Term::Literal(Literal::Integer(i))) => Some(Value::from(*i)),
            (Self::Decimal, Term::Literal(Literal::Decimal(d))) => {
                Number::from_f64(*d).map(Value::Number)
            }
            (Self::DateTime, Term::Literal(Literal::DateTime(dt))) => Some(Value::String(
                dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            )),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Url => "url",
            Self::DateTime => "datetime",
            Self::Decimal => "decimal",
            Self::Integer => "integer",
        };
        f.write_str(name)
    }
}
