//! Turtle encoding of documents, backed by oxigraph's RDF I/O.

use crate::{StoreError, StoreResult};
use oxigraph::io::{RdfFormat, RdfParser, RdfSerializer};
use oxigraph::model::{BlankNode, Literal as RdfLiteral, NamedNode, Term as RdfTerm, Triple};
use podrecord_types::{Document, Literal, Subject, Term, Thing};
use std::collections::HashMap;

/// Parses a Turtle body into a document bound to `url`.
///
/// Relative IRIs resolve against `url`. Subjects keep the order of their
/// first statement.
pub(crate) fn parse(url: &str, body: &[u8]) -> StoreResult<Document> {
    let parse_error = |message: String| StoreError::Parse {
        url: url.to_string(),
        message,
    };
    let parser = RdfParser::from_format(RdfFormat::Turtle)
        .with_base_iri(url)
        .map_err(|e| parse_error(e.to_string()))?;

    let mut grouped: Vec<(Subject, Vec<(String, Term)>)> = Vec::new();
    let mut positions: HashMap<Subject, usize> = HashMap::new();
    for quad in parser.for_slice(body) {
        let quad = quad.map_err(|e| parse_error(e.to_string()))?;
        let subject = match RdfTerm::from(quad.subject) {
            RdfTerm::NamedNode(node) => Subject::Url(node.into_string()),
            RdfTerm::BlankNode(node) => Subject::Blank(node.as_str().to_string()),
            _ => continue,
        };
        let Some(object) = from_rdf(quad.object) else {
            continue;
        };
        let index = *positions.entry(subject.clone()).or_insert_with(|| {
            grouped.push((subject, Vec::new()));
            grouped.len() - 1
        });
        grouped[index]
            .1
            .push((quad.predicate.into_string(), object));
    }

    let things: Vec<Thing> = grouped
        .into_iter()
        .map(|(subject, statements)| {
            statements
                .into_iter()
                .fold(Thing::new(subject), |thing, (p, o)| thing.add(&p, o))
        })
        .collect();
    tracing::debug!(url, subjects = things.len(), "parsed turtle document");
    Ok(things.into_iter().collect::<Document>().persisted(url))
}

/// Serializes a document to Turtle.
///
/// Local subjects must already be resolved; see [`Document::persisted`].
pub(crate) fn serialize(document: &Document) -> StoreResult<Vec<u8>> {
    let mut serializer = RdfSerializer::from_format(RdfFormat::Turtle).for_writer(Vec::new());
    for thing in document.things() {
        for (predicate, value) in thing.statements() {
            let triple = to_triple(thing.subject(), document.url(), predicate, value)?;
            serializer
                .serialize_triple(&triple)
                .map_err(|e| StoreError::Serialize(e.to_string()))?;
        }
    }
    serializer
        .finish()
        .map_err(|e| StoreError::Serialize(e.to_string()))
}

fn from_rdf(term: RdfTerm) -> Option<Term> {
    match term {
        RdfTerm::NamedNode(node) => Some(Term::Iri(node.into_string())),
        RdfTerm::BlankNode(node) => Some(Term::Blank(node.as_str().to_string())),
        RdfTerm::Literal(literal) => Some(Term::Literal(from_rdf_literal(&literal))),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

fn from_rdf_literal(literal: &RdfLiteral) -> Literal {
    let value = literal.value();
    if let Some(lang) = literal.language() {
        return Literal::LangString {
            value: value.to_string(),
            lang: lang.to_string(),
        };
    }
    let datatype = literal.datatype().as_str();
    // ill-formed lexical forms stay as typed literals
    Literal::from_lexical(value, datatype).unwrap_or_else(|_| Literal::Typed {
        value: value.to_string(),
        datatype: datatype.to_string(),
    })
}

fn to_triple(
    subject: &Subject,
    base: Option<&str>,
    predicate: &str,
    value: &Term,
) -> StoreResult<Triple> {
    let predicate = named_node(predicate)?;
    let object = to_rdf(value)?;
    match subject {
        Subject::Blank(id) => Ok(Triple::new(blank_node(id)?, predicate, object)),
        other => {
            let url = other.resolve(base).ok_or_else(|| {
                StoreError::Serialize("local subject in an unbound document".to_string())
            })?;
            Ok(Triple::new(named_node(&url)?, predicate, object))
        }
    }
}

fn to_rdf(term: &Term) -> StoreResult<RdfTerm> {
    Ok(match term {
        Term::Iri(url) => named_node(url)?.into(),
        Term::Blank(id) => blank_node(id)?.into(),
        Term::Literal(Literal::String(value)) => RdfLiteral::new_simple_literal(value).into(),
        Term::Literal(Literal::LangString { value, lang }) => {
            RdfLiteral::new_language_tagged_literal(value, lang)
                .map_err(|e| StoreError::Serialize(e.to_string()))?
                .into()
        }
        Term::Literal(literal) => {
            RdfLiteral::new_typed_literal(literal.lexical(), named_node(literal.datatype())?)
                .into()
        }
    })
}

fn named_node(iri: &str) -> StoreResult<NamedNode> {
    NamedNode::new(iri).map_err(|e| StoreError::Serialize(format!("{iri}: {e}")))
}

fn blank_node(id: &str) -> StoreResult<BlankNode> {
    BlankNode::new(id).map_err(|e| StoreError::Serialize(format!("_:{id}: {e}")))
}
