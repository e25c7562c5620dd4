// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use data_encoding::HEXLOWER;
use ring::digest;

use crate::config::Config;
use crate::rdf::{Class, Description, Iri, Predicate, Prefix, Statement, Term};

/// The converted file. All statements of a run link back to it.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct Origin {
    path: PathBuf,
    node: Iri,
}

impl Origin {
    pub fn from_input(input: &Path) -> Self {
        let path = absolute_path(input);
        let node = Iri::new(Prefix::Origin, identifier(&path));
        Origin { path, node }
    }

    pub fn statements(&self, config: &Config) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();
        Description::new(self.node.clone(), &mut statements)
            .class(Class::Origin)
            .add(Predicate::Filename, Term::string(self.path.to_string_lossy()))
            .add(Predicate::ConvertedBy, Term::string(env!("CARGO_PKG_NAME")))
            .add(Predicate::VersionInfo, Term::string(env!("CARGO_PKG_VERSION")))
            .add(
                Predicate::ConversionOptions,
                Term::string(serde_json::to_string(config)?),
            )
            .add_opt(
                Predicate::ReferenceGenome,
                config.reference().as_ref().map(|reference| Term::string(reference.to_string())),
            )
            .add_opt(
                Predicate::CalledBy,
                config.caller().clone().map(Term::string),
            );
        Ok(statements)
    }
}

/// Best effort absolute path: the canonical path if the file exists,
/// otherwise the path relative to the working directory.
fn absolute_path(input: &Path) -> PathBuf {
    input
        .canonicalize()
        .or_else(|_| env::current_dir().map(|cwd| cwd.join(input)))
        .unwrap_or_else(|_| input.to_owned())
}

fn identifier(path: &Path) -> String {
    let digest = digest::digest(&digest::SHA256, path.to_string_lossy().as_bytes());
    HEXLOWER.encode(digest.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigBuilder, ReferenceGenome};

    #[test]
    fn test_identifier() {
        assert_eq!(
            identifier(Path::new("/data/calls.vcf")),
            identifier(Path::new("/data/calls.vcf"))
        );
        assert_ne!(
            identifier(Path::new("/data/calls.vcf")),
            identifier(Path::new("/data/other.vcf"))
        );
        let id = identifier(Path::new("/data/calls.vcf"));
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_relative_path() {
        let origin = Origin::from_input(Path::new("does-not-exist.vcf"));
        assert!(origin.path().is_absolute());
        assert!(origin.path().ends_with("does-not-exist.vcf"));
    }

    #[test]
    fn test_statements() {
        let origin = Origin::from_input(Path::new("/data/calls.vcf"));
        let config = ConfigBuilder::default()
            .reference(ReferenceGenome::Grch37)
            .build()
            .unwrap();
        let lines: Vec<_> = origin
            .statements(&config)
            .unwrap()
            .iter()
            .map(|stmt| stmt.to_string())
            .collect();
        let node = origin.node().to_string();
        assert_eq!(lines[0], format!("{} rdf:type :Origin .", node));
        assert!(lines.contains(&format!(
            "{} :filename \"/data/calls.vcf\"^^xsd:string .",
            node
        )));
        assert!(lines.contains(&format!(
            "{} :referenceGenome \"grch37\"^^xsd:string .",
            node
        )));
        assert!(!lines.iter().any(|line| line.contains(":calledBy")));
    }
}
