// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use rust_htslib::bcf::header::{HeaderRecord, HeaderView};

use crate::rdf::{Class, Description, Iri, Predicate, Prefix, Statement, Term};

/// Meta-information line of a VCF header.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderItem {
    Generic {
        key: String,
        value: String,
    },
    Info {
        id: String,
        number: Option<String>,
        kind: Option<String>,
        description: Option<String>,
    },
    Filter {
        id: String,
        description: Option<String>,
    },
    Alt {
        id: String,
        description: Option<String>,
    },
    Format {
        id: String,
        number: Option<String>,
        kind: Option<String>,
        description: Option<String>,
    },
    Contig {
        id: String,
        length: Option<u64>,
        assembly: Option<String>,
    },
}

impl HeaderItem {
    /// Convert a header record. Records of unknown kind and structured
    /// records without an ID are reported and yield `None`.
    pub fn from_record(record: &HeaderRecord) -> Option<Self> {
        macro_rules! field {
            ($values:expr, $name:expr) => {
                $values.get($name).cloned()
            };
        }
        macro_rules! id {
            ($key:expr, $values:expr) => {
                match $values.get("ID") {
                    Some(id) => id.clone(),
                    None => {
                        warn!("Ignoring ##{} header line without ID.", $key);
                        return None;
                    }
                }
            };
        }

        match record {
            HeaderRecord::Generic { key, value } => Some(HeaderItem::Generic {
                key: key.clone(),
                value: value.clone(),
            }),
            HeaderRecord::Info { key, values } => Some(HeaderItem::Info {
                id: id!(key, values),
                number: field!(values, "Number"),
                kind: field!(values, "Type"),
                description: field!(values, "Description"),
            }),
            HeaderRecord::Format { key, values } => Some(HeaderItem::Format {
                id: id!(key, values),
                number: field!(values, "Number"),
                kind: field!(values, "Type"),
                description: field!(values, "Description"),
            }),
            HeaderRecord::Filter { key, values } => Some(HeaderItem::Filter {
                id: id!(key, values),
                description: field!(values, "Description"),
            }),
            HeaderRecord::Contig { key, values } => Some(HeaderItem::Contig {
                id: id!(key, values),
                length: values.get("length").and_then(|length| length.parse().ok()),
                assembly: field!(values, "assembly"),
            }),
            HeaderRecord::Structured { key, values } if key == "ALT" => Some(HeaderItem::Alt {
                id: id!(key, values),
                description: field!(values, "Description"),
            }),
            HeaderRecord::Structured { key, .. } => {
                warn!("Encountered an unknown header item '{}'.", key);
                None
            }
        }
    }

    /// Subject of this item. Generic items are numbered by their position
    /// `n` in the header, all others are addressed by their ID.
    pub fn node(&self, n: usize, origin: &Iri) -> Iri {
        match self {
            HeaderItem::Generic { .. } => origin.derive(Prefix::Header, &n.to_string()),
            HeaderItem::Info { id, .. } => origin.derive(Prefix::Info, id),
            HeaderItem::Filter { id, .. } => origin.derive(Prefix::Filter, id),
            HeaderItem::Alt { id, .. } => origin.derive(Prefix::Alt, id),
            HeaderItem::Format { id, .. } => origin.derive(Prefix::Format, id),
            HeaderItem::Contig { id, .. } => origin.derive(Prefix::Contig, id),
        }
    }

    pub fn class(&self) -> Class {
        match self {
            HeaderItem::Generic { .. } => Class::HeaderItem,
            HeaderItem::Info { .. } => Class::HeaderInfoItem,
            HeaderItem::Filter { .. } => Class::HeaderFilterItem,
            HeaderItem::Alt { .. } => Class::HeaderAltItem,
            HeaderItem::Format { .. } => Class::HeaderFormatItem,
            HeaderItem::Contig { .. } => Class::HeaderContigItem,
        }
    }

    pub fn statements(&self, n: usize, origin: &Iri) -> Vec<Statement> {
        let mut statements = Vec::new();
        let mut description = Description::new(self.node(n, origin), &mut statements);
        description
            .class(self.class())
            .add(Predicate::OriginatedFrom, origin.clone());

        let string = |value: &Option<String>| value.clone().map(Term::string);
        match self {
            HeaderItem::Generic { key, value } => {
                description
                    .add(Predicate::Key, Term::string(key.clone()))
                    .add(Predicate::Value, Term::string(value.clone()));
            }
            HeaderItem::Info {
                id,
                number,
                kind,
                description: text,
            }
            | HeaderItem::Format {
                id,
                number,
                kind,
                description: text,
            } => {
                description
                    .add(Predicate::Id, Term::string(id.clone()))
                    .add_opt(Predicate::Number, string(number))
                    .add_opt(Predicate::Type, string(kind))
                    .add_opt(Predicate::Description, string(text));
            }
            HeaderItem::Filter {
                id,
                description: text,
            }
            | HeaderItem::Alt {
                id,
                description: text,
            } => {
                description
                    .add(Predicate::Id, Term::string(id.clone()))
                    .add_opt(Predicate::Description, string(text));
            }
            HeaderItem::Contig {
                id,
                length,
                assembly,
            } => {
                description
                    .add(Predicate::Id, Term::string(id.clone()))
                    .add_opt(Predicate::Length, length.map(|length| Term::integer(length as i64)))
                    .add_opt(Predicate::Assembly, string(assembly));
            }
        }
        statements
    }
}

/// All convertible items of `header`, in header order.
pub fn header_items(header: &HeaderView) -> Vec<HeaderItem> {
    header
        .header_records()
        .iter()
        .filter_map(HeaderItem::from_record)
        .collect()
}

pub fn sample_names(header: &HeaderView) -> Vec<String> {
    header
        .samples()
        .iter()
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .collect()
}

/// Declare the samples of the header, each found in `origin`.
pub fn sample_statements(samples: &[String], origin: &Iri) -> Vec<Statement> {
    let mut statements = Vec::new();
    for sample in samples {
        Description::new(Iri::new(Prefix::Sample, sample.clone()), &mut statements)
            .class(Class::Sample)
            .add(Predicate::FoundIn, origin.clone());
    }
    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Iri {
        Iri::new(Prefix::Origin, "o".to_owned())
    }

    fn lines(item: &HeaderItem, n: usize) -> Vec<String> {
        item.statements(n, &origin())
            .iter()
            .map(|stmt| stmt.to_string())
            .collect()
    }

    #[test]
    fn test_generic_item() {
        let item = HeaderItem::Generic {
            key: "source".to_owned(),
            value: "Manta".to_owned(),
        };
        assert_eq!(
            lines(&item, 2),
            vec![
                "hdr:o-2 rdf:type :VcfHeaderItem .",
                "hdr:o-2 :originatedFrom orig:o .",
                "hdr:o-2 :key \"source\"^^xsd:string .",
                "hdr:o-2 :value \"Manta\"^^xsd:string .",
            ]
        );
    }

    #[test]
    fn test_filter_item_matches_variant_filter_link() {
        let item = HeaderItem::Filter {
            id: "LowQual".to_owned(),
            description: None,
        };
        let lines = lines(&item, 7);
        assert_eq!(lines[0], "flt:o-LowQual rdf:type :VcfHeaderFilterItem .");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_contig_item() {
        let item = HeaderItem::Contig {
            id: "chr1".to_owned(),
            length: Some(248956422),
            assembly: None,
        };
        let lines = lines(&item, 0);
        assert!(lines.contains(&"ctg:o-chr1 :length \"248956422\"^^xsd:integer .".to_owned()));
        assert!(!lines.iter().any(|line| line.contains(":assembly")));
    }

    #[test]
    fn test_samples() {
        let lines: Vec<_> = sample_statements(&["tumor".to_owned()], &origin())
            .iter()
            .map(|stmt| stmt.to_string())
            .collect();
        assert_eq!(
            lines,
            vec![
                "sample:tumor rdf:type :Sample .",
                "sample:tumor :foundIn orig:o .",
            ]
        );
    }
}
