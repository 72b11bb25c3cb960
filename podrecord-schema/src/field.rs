//! Scalar and repeated value fields.

use crate::{SchemaError, SchemaResult, ValueKind};
use podrecord_types::{Term, Thing};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type Hook = Arc<dyn Fn(Option<Value>) -> Option<Value> + Send + Sync>;

/// Pair of transforms applied to a field value on its way to and from
/// statements. Repeated fields receive the whole list as a JSON array.
#[derive(Clone)]
pub struct Converter {
    serialize: Hook,
    deserialize: Hook,
}

impl Converter {
    pub fn new<S, D>(serialize: S, deserialize: D) -> Self
    where
        S: Fn(Option<Value>) -> Option<Value> + Send + Sync + 'static,
        D: Fn(Option<Value>) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            serialize: Arc::new(serialize),
            deserialize: Arc::new(deserialize),
        }
    }

    fn serialize(&self, value: Option<Value>) -> Option<Value> {
        (self.serialize)(value)
    }

    fn deserialize(&self, value: Option<Value>) -> Option<Value> {
        (self.deserialize)(value)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter").finish_non_exhaustive()
    }
}

fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

fn predicate_list<I, S>(predicates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    predicates.into_iter().map(Into::into).collect()
}

/// Reads and writes a single value.
///
/// Given several predicates, reading stops at the first one holding a value
/// of the field's kind and writing sets the same value on all of them.
#[derive(Debug, Clone)]
pub struct ScalarField {
    kind: ValueKind,
    predicates: Vec<String>,
    default: Option<Value>,
    converter: Option<Converter>,
}

impl ScalarField {
    pub fn new<I, S>(kind: ValueKind, predicates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            predicates: predicate_list(predicates),
            default: None,
            converter: None,
        }
    }

    /// Sets a default used when reading and writing an empty value.
    #[must_use]
    pub fn with_default(self, value: impl Into<Value>) -> Self {
        Self {
            default: present(Some(value.into())),
            ..self
        }
    }

    /// Registers transforms run when writing and reading this field.
    #[must_use]
    pub fn with_converter<S, D>(self, serialize: S, deserialize: D) -> Self
    where
        S: Fn(Option<Value>) -> Option<Value> + Send + Sync + 'static,
        D: Fn(Option<Value>) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            converter: Some(Converter::new(serialize, deserialize)),
            ..self
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    pub fn read(&self, thing: &Thing) -> Option<Value> {
        let found = self.predicates.iter().find_map(|predicate| {
            thing
                .values(predicate)
                .iter()
                .find_map(|term| self.kind.from_term(term))
        });
        let value = found.or_else(|| self.default.clone());

        match &self.converter {
            Some(converter) => converter.deserialize(value),
            None => value,
        }
    }

    pub fn write(&self, thing: Thing, value: Option<&Value>) -> SchemaResult<Thing> {
        let mut value = present(value.cloned()).or_else(|| self.default.clone());
        if let Some(converter) = &self.converter {
            value = converter.serialize(value);
        }

        let Some(value) = present(value) else {
            return Ok(self
                .predicates
                .iter()
                .fold(thing, |thing, predicate| thing.remove_all(predicate)));
        };

        let term = self
            .kind
            .to_term(&value)
            .ok_or(SchemaError::InvalidValue {
                kind: self.kind,
                value,
            })?;

        Ok(self
            .predicates
            .iter()
            .fold(thing, |thing, predicate| thing.set(predicate, term.clone())))
    }
}

/// Reads and writes an ordered list of values.
///
/// A predicate only counts as holding a value when its list is non-empty.
/// Writing replaces every value at every predicate; `null`, a missing value
/// and `[]` all mean "empty".
#[derive(Debug, Clone)]
pub struct RepeatedField {
    kind: ValueKind,
    predicates: Vec<String>,
    default: Option<Vec<Value>>,
    converter: Option<Converter>,
}

impl RepeatedField {
    pub fn new<I, S>(kind: ValueKind, predicates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            predicates: predicate_list(predicates),
            default: None,
            converter: None,
        }
    }

    /// Sets a default list used when reading and writing an empty value.
    #[must_use]
    pub fn with_default<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        Self {
            default: (!values.is_empty()).then_some(values),
            ..self
        }
    }

    /// Registers transforms run on the whole list when writing and reading.
    #[must_use]
    pub fn with_converter<S, D>(self, serialize: S, deserialize: D) -> Self
    where
        S: Fn(Option<Value>) -> Option<Value> + Send + Sync + 'static,
        D: Fn(Option<Value>) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            converter: Some(Converter::new(serialize, deserialize)),
            ..self
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    pub fn read(&self, thing: &Thing) -> Option<Value> {
        let found = self.predicates.iter().find_map(|predicate| {
            let values: Vec<Value> = thing
                .values(predicate)
                .iter()
                .filter_map(|term| self.kind.from_term(term))
                .collect();
            (!values.is_empty()).then_some(values)
        });
        let values = found.or_else(|| self.default.clone()).unwrap_or_default();
        let value = Some(Value::Array(values));

        match &self.converter {
            Some(converter) => converter.deserialize(value),
            None => value,
        }
    }

    pub fn write(&self, thing: Thing, value: Option<&Value>) -> SchemaResult<Thing> {
        let mut value = match value {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) if items.is_empty() => None,
            Some(other) => Some(other.clone()),
        }
        .or_else(|| self.default.clone().map(Value::Array));
        if let Some(converter) = &self.converter {
            value = converter.serialize(value);
        }

        let items = match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(SchemaError::InvalidValue {
                    kind: self.kind,
                    value: other,
                })
            }
        };
        let terms = items
            .into_iter()
            .map(|item| {
                self.kind
                    .to_term(&item)
                    .ok_or(SchemaError::InvalidValue {
                        kind: self.kind,
                        value: item,
                    })
            })
            .collect::<SchemaResult<Vec<Term>>>()?;

        Ok(self.predicates.iter().fold(thing, |thing, predicate| {
            terms
                .iter()
                .cloned()
                .fold(thing.remove_all(predicate), |thing, term| {
                    thing.add(predicate, term)
                })
        }))
    }
}
