// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Owned graph terms and statements.
//!
//! A `Statement` is built once and handed to the serializer by value. Nothing
//! is shared between statements, so building the statements of a record can
//! happen outside of the output lock.

use std::fmt;

pub mod ontology;
pub mod turtle;

pub use ontology::{Class, Datatype, Namespaces, Predicate, Prefix};

/// An IRI written in its prefixed form.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Iri {
    prefix: Prefix,
    local: String,
}

impl Iri {
    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    /// Derive a node IRI in another namespace, e.g. the position nodes of a
    /// variant call.
    pub fn derive(&self, prefix: Prefix, suffix: &str) -> Iri {
        Iri::new(prefix, format!("{}-{}", self.local, suffix))
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:", self.prefix.name())?;
        let last = self.local.chars().count().saturating_sub(1);
        for (i, c) in self.local.chars().enumerate() {
            // a local name may neither start with '-' nor end with '.'
            let safe = c.is_ascii_alphanumeric()
                || c == '_'
                || (i > 0 && (c == '-' || c == ':'))
                || (i > 0 && i < last && c == '.');
            if safe {
                write!(f, "{}", c)?;
            } else {
                let mut buf = [0; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    write!(f, "%{:02X}", byte)?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Iri(Iri),
    Literal { value: String, datatype: Datatype },
}

impl Term {
    pub fn iri(prefix: Prefix, local: impl Into<String>) -> Self {
        Term::Iri(Iri::new(prefix, local.into()))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: Datatype::String,
        }
    }

    pub fn integer(value: impl Into<i64>) -> Self {
        Term::Literal {
            value: value.into().to_string(),
            datatype: Datatype::Integer,
        }
    }

    pub fn float(value: f32) -> Self {
        let value = if value.is_nan() {
            "NaN".to_owned()
        } else if value == f32::INFINITY {
            "INF".to_owned()
        } else if value == f32::NEG_INFINITY {
            "-INF".to_owned()
        } else {
            value.to_string()
        };
        Term::Literal {
            value,
            datatype: Datatype::Float,
        }
    }

    pub fn boolean(value: bool) -> Self {
        Term::Literal {
            value: value.to_string(),
            datatype: Datatype::Boolean,
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<Class> for Term {
    fn from(class: Class) -> Self {
        Term::iri(class.prefix(), class.local())
    }
}

impl From<Predicate> for Term {
    fn from(predicate: Predicate) -> Self {
        Term::iri(predicate.prefix(), predicate.local())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Iri(iri) => iri.fmt(f),
            Term::Literal { value, datatype } => {
                write!(f, "\"")?;
                for c in value.chars() {
                    match c {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\r' => write!(f, "\\r")?,
                        '\t' => write!(f, "\\t")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                write!(f, "\"^^xsd:{}", datatype.local())
            }
        }
    }
}

/// A subject-predicate-object triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    subject: Term,
    predicate: Term,
    object: Term,
}

impl Statement {
    pub fn new(subject: impl Into<Term>, predicate: Predicate, object: impl Into<Term>) -> Self {
        Statement {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    pub fn subject(&self) -> &Term {
        &self.subject
    }

    pub fn predicate(&self) -> &Term {
        &self.predicate
    }

    pub fn object(&self) -> &Term {
        &self.object
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Collects the statements that share one subject.
pub(crate) struct Description<'a> {
    subject: Iri,
    statements: &'a mut Vec<Statement>,
}

impl<'a> Description<'a> {
    pub(crate) fn new(subject: Iri, statements: &'a mut Vec<Statement>) -> Self {
        Description {
            subject,
            statements,
        }
    }

    pub(crate) fn add(&mut self, predicate: Predicate, object: impl Into<Term>) -> &mut Self {
        self.statements
            .push(Statement::new(self.subject.clone(), predicate, object));
        self
    }

    pub(crate) fn add_opt<T: Into<Term>>(
        &mut self,
        predicate: Predicate,
        object: Option<T>,
    ) -> &mut Self {
        if let Some(object) = object {
            self.add(predicate, object);
        }
        self
    }

    pub(crate) fn class(&mut self, class: Class) -> &mut Self {
        self.add(Predicate::RdfType, class)
    }
}
