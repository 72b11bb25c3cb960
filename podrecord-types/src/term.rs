//! Statement objects: IRIs, blank nodes and literals.

use crate::vocab::{rdf, xsd};
use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// The value position of a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Term {
    /// A reference to another resource.
    Iri(String),
    /// A blank node local to the document it was read from.
    Blank(String),
    /// A literal value.
    Literal(Literal),
}

impl Term {
    /// Shorthand for an IRI term.
    pub fn iri(url: impl Into<String>) -> Self {
        Self::Iri(url.into())
    }

    /// Shorthand for a plain string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Returns the IRI if this term is one.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(url) => Some(url),
            _ => None,
        }
    }

    /// Returns the literal if this term is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            _ => None,
        }
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

/// A typed literal.
///
/// Datatypes the schema engine understands get their own variant; anything
/// else is kept verbatim in [`Literal::Typed`] so a fetch/save cycle does not
/// lose statements the application does not map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    String(String),
    LangString { value: String, lang: String },
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    DateTime(DateTime<Utc>),
    Typed { value: String, datatype: String },
}

impl Literal {
    /// Builds a literal from its lexical form and datatype IRI.
    ///
    /// Known XSD datatypes are parsed; a lexical form that does not match its
    /// datatype is an error.
    pub fn from_lexical(value: &str, datatype: &str) -> Result<Self> {
        let invalid = || Error::InvalidLiteral {
            value: value.to_string(),
            datatype: datatype.to_string(),
        };

        Ok(match datatype {
            xsd::STRING => Self::String(value.to_string()),
            xsd::BOOLEAN => match value {
                "true" | "1" => Self::Boolean(true),
                "false" | "0" => Self::Boolean(false),
                _ => return Err(invalid()),
            },
            xsd::INTEGER => Self::Integer(value.parse().map_err(|_| invalid())?),
            xsd::DECIMAL | xsd::DOUBLE => Self::Decimal(value.parse().map_err(|_| invalid())?),
            xsd::DATE_TIME => Self::DateTime(
                DateTime::parse_from_rfc3339(value)
                    .map_err(|_| invalid())?
                    .with_timezone(&Utc),
            ),
            _ => Self::Typed {
                value: value.to_string(),
                datatype: datatype.to_string(),
            },
        })
    }

    /// Returns the datatype IRI of this literal.
    pub fn datatype(&self) -> &str {
        match self {
            Self::String(_) => xsd::STRING,
            Self::LangString { .. } => rdf::LANG_STRING,
            Self::Boolean(_) => xsd::BOOLEAN,
            Self::Integer(_) => xsd::INTEGER,
            Self::Decimal(_) => xsd::DECIMAL,
            Self::DateTime(_) => xsd::DATE_TIME,
            Self::Typed { datatype, .. } => datatype,
        }
    }

    /// Returns the lexical form of this literal.
    pub fn lexical(&self) -> String {
        match self {
            Self::String(value) | Self::LangString { value, .. } | Self::Typed { value, .. } => {
                value.clone()
            }
            Self::Boolean(value) => value.to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) => {
                // xsd:decimal has no exponent form and always carries a dot
                if value.fract() == 0.0 && value.is_finite() {
                    format!("{value:.1}")
                } else {
                    value.to_string()
                }
            }
            Self::DateTime(value) => value.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}
