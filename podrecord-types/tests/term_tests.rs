use chrono::{TimeZone, Utc};
use podrecord_types::vocab::{rdf, xsd};
use podrecord_types::{Error, Literal, Term};

// ── Parsing lexical forms ───────────────────────────────────────

#[test]
fn known_datatypes_are_parsed() {
    assert_eq!(
        Literal::from_lexical("true", xsd::BOOLEAN).unwrap(),
        Literal::Boolean(true)
    );
    assert_eq!(
        Literal::from_lexical("0", xsd::BOOLEAN).unwrap(),
        Literal::Boolean(false)
    );
    assert_eq!(
        Literal::from_lexical("42", xsd::INTEGER).unwrap(),
        Literal::Integer(42)
    );
    assert_eq!(
        Literal::from_lexical("133.7", xsd::DECIMAL).unwrap(),
        Literal::Decimal(133.7)
    );
    assert_eq!(
        Literal::from_lexical("2020-05-04T13:37:42Z", xsd::DATE_TIME).unwrap(),
        Literal::DateTime(Utc.with_ymd_and_hms(2020, 5, 4, 13, 37, 42).unwrap())
    );
}

#[test]
fn unknown_datatype_is_kept_verbatim() {
    let literal = Literal::from_lexical("P1D", "http://www.w3.org/2001/XMLSchema#duration").unwrap();
    assert_eq!(
        literal,
        Literal::Typed {
            value: "P1D".into(),
            datatype: "http://www.w3.org/2001/XMLSchema#duration".into(),
        }
    );
    assert_eq!(literal.lexical(), "P1D");
}

#[test]
fn malformed_lexical_form_is_rejected() {
    let err = Literal::from_lexical("forty-two", xsd::INTEGER).unwrap_err();
    assert!(matches!(err, Error::InvalidLiteral { .. }));
    assert!(err.to_string().contains("forty-two"));
}

// ── Lexical output ──────────────────────────────────────────────

#[test]
fn decimal_lexical_form_always_has_a_dot() {
    assert_eq!(Literal::Decimal(3.0).lexical(), "3.0");
    assert_eq!(Literal::Decimal(1.25).lexical(), "1.25");
}

#[test]
fn datetime_lexical_form_is_utc_rfc3339() {
    let dt = Utc.with_ymd_and_hms(2020, 6, 4, 13, 37, 42).unwrap();
    assert_eq!(Literal::DateTime(dt).lexical(), "2020-06-04T13:37:42Z");
}

#[test]
fn datatype_iris() {
    assert_eq!(Literal::String("a".into()).datatype(), xsd::STRING);
    assert_eq!(
        Literal::LangString {
            value: "a".into(),
            lang: "en".into()
        }
        .datatype(),
        rdf::LANG_STRING
    );
    assert_eq!(Literal::Integer(1).datatype(), xsd::INTEGER);
}

// ── Term accessors ──────────────────────────────────────────────

#[test]
fn term_accessors() {
    assert_eq!(Term::iri("http://a").as_iri(), Some("http://a"));
    assert_eq!(Term::string("x").as_iri(), None);
    assert_eq!(
        Term::string("x").as_literal(),
        Some(&Literal::String("x".into()))
    );
    assert_eq!(Term::Blank("b".into()).as_literal(), None);
}
