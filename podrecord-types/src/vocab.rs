//! Vocabulary constants read and written by the core.

/// RDF core vocabulary.
pub mod rdf {
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// Solid terms used by profiles and type indexes.
pub mod solid {
    pub const FOR_CLASS: &str = "http://www.w3.org/ns/solid/terms#forClass";
    pub const INSTANCE: &str = "http://www.w3.org/ns/solid/terms#instance";
    pub const PUBLIC_TYPE_INDEX: &str = "http://www.w3.org/ns/solid/terms#publicTypeIndex";
    pub const PRIVATE_TYPE_INDEX: &str = "http://www.w3.org/ns/solid/terms#privateTypeIndex";
    pub const TYPE_REGISTRATION: &str = "http://www.w3.org/ns/solid/terms#TypeRegistration";
}

/// XML Schema datatypes used for typed literals.
pub mod xsd {
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
}
