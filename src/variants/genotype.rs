// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use itertools::Itertools;

use crate::rdf::{Class, Description, Iri, Predicate, Prefix, Statement, Term};
use crate::record::{SampleFields, SUPPORT_FORMAT_TAGS};

/// Allele index of the reference allele.
const REFERENCE_ALLELE: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Zygosity {
    Heterozygous,
    Multizygous,
    Nullizygous,
    Homozygous,
    HomozygousReference,
    HomozygousAlternative,
}

impl Zygosity {
    pub fn class(self) -> Class {
        match self {
            Zygosity::Heterozygous => Class::Heterozygous,
            Zygosity::Multizygous => Class::Multizygous,
            Zygosity::Nullizygous => Class::Nullizygous,
            Zygosity::Homozygous => Class::Homozygous,
            Zygosity::HomozygousReference => Class::HomozygousReference,
            Zygosity::HomozygousAlternative => Class::HomozygousAlternative,
        }
    }
}

/// Classify a genotype given as allele indices, `None` marking a missing
/// allele. The ploidy is the number of indices. Returns `None` if the record
/// carries no genotype at all.
///
/// Only a genotype without any called allele (e.g. `./.`) is nullizygous.
/// Diploid calls with a single missing allele count as heterozygous.
pub fn classify(alleles: &[Option<u32>]) -> Option<Zygosity> {
    if alleles.is_empty() {
        return None;
    }
    if alleles.iter().all(Option::is_none) {
        return Some(Zygosity::Nullizygous);
    }
    let zygosity = match alleles {
        [allele] => match allele {
            Some(REFERENCE_ALLELE) => Zygosity::HomozygousReference,
            _ => Zygosity::HomozygousAlternative,
        },
        [first, second] if first == second => match first {
            Some(REFERENCE_ALLELE) => Zygosity::HomozygousReference,
            _ => Zygosity::HomozygousAlternative,
        },
        [_, _] => Zygosity::Heterozygous,
        _ => Zygosity::Multizygous,
    };
    Some(zygosity)
}

/// Genotype of one sample at one variant call.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGenotype {
    pub sample: String,
    /// Empty if the record has no GT field.
    pub alleles: Vec<Option<u32>>,
    pub zygosity: Option<Zygosity>,
    /// Read support counters, indexed like `SUPPORT_FORMAT_TAGS`.
    pub support: [Option<i32>; 5],
}

impl SampleGenotype {
    pub fn new(sample: impl Into<String>, fields: &SampleFields) -> Self {
        SampleGenotype {
            sample: sample.into(),
            zygosity: classify(&fields.genotype),
            alleles: fields.genotype.clone(),
            support: fields.support,
        }
    }

    pub fn ploidy(&self) -> usize {
        self.alleles.len()
    }

    /// Alleles in VCF notation, e.g. `0/1` or `./.`.
    pub fn allele_string(&self) -> String {
        self.alleles
            .iter()
            .map(|allele| match allele {
                Some(index) => index.to_string(),
                None => ".".to_owned(),
            })
            .join("/")
    }

    pub fn statements(&self, node: &Iri, variant: &Iri, statements: &mut Vec<Statement>) {
        let mut description = Description::new(node.clone(), statements);
        if let Some(zygosity) = self.zygosity {
            description.class(zygosity.class());
        }
        description
            .add(Predicate::Genotype, variant.clone())
            .add(Predicate::Sample, Term::iri(Prefix::Sample, self.sample.clone()));
        if self.zygosity.is_some() {
            description
                .add(Predicate::Ploidy, Term::integer(self.ploidy() as i64))
                .add(Predicate::Alleles, Term::string(self.allele_string()));
        }
        for (tag, value) in SUPPORT_FORMAT_TAGS.iter().zip(self.support.iter()) {
            description.add_opt(support_predicate(tag), value.map(Term::integer));
        }
    }
}

fn support_predicate(tag: &str) -> Predicate {
    match tag {
        "RC" => Predicate::ReadCount,
        "DR" => Predicate::HqReferencePairs,
        "DV" => Predicate::HqVariantPairs,
        "RR" => Predicate::HqReferenceJunctionReads,
        _ => Predicate::HqVariantJunctionReads,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diploid() {
        assert_eq!(classify(&[Some(0), Some(0)]), Some(Zygosity::HomozygousReference));
        assert_eq!(classify(&[Some(1), Some(1)]), Some(Zygosity::HomozygousAlternative));
        assert_eq!(classify(&[Some(0), Some(1)]), Some(Zygosity::Heterozygous));
        assert_eq!(classify(&[Some(2), Some(1)]), Some(Zygosity::Heterozygous));
        assert_eq!(classify(&[None, Some(1)]), Some(Zygosity::Heterozygous));
    }

    #[test]
    fn test_haploid() {
        assert_eq!(classify(&[Some(0)]), Some(Zygosity::HomozygousReference));
        assert_eq!(classify(&[Some(3)]), Some(Zygosity::HomozygousAlternative));
    }

    #[test]
    fn test_missing() {
        assert_eq!(classify(&[None, None]), Some(Zygosity::Nullizygous));
        assert_eq!(classify(&[None]), Some(Zygosity::Nullizygous));
    }

    #[test]
    fn test_absent_genotype() {
        assert_eq!(classify(&[]), None);
    }

    #[test]
    fn test_polyploid() {
        assert_eq!(classify(&[Some(0), Some(0), Some(0)]), Some(Zygosity::Multizygous));
        assert_eq!(
            classify(&[Some(0), Some(1), None, Some(1)]),
            Some(Zygosity::Multizygous)
        );
    }

    #[test]
    fn test_statements() {
        let mut fields = SampleFields::default();
        fields.genotype = vec![Some(0), None];
        fields.support[2] = Some(7);
        let genotype = SampleGenotype::new("tumor", &fields);
        assert_eq!(genotype.allele_string(), "0/.");

        let node = Iri::new(Prefix::Genotype, "o-1-0".to_owned());
        let variant = Iri::new(Prefix::VariantCall, "o-1".to_owned());
        let mut statements = Vec::new();
        genotype.statements(&node, &variant, &mut statements);
        let lines: Vec<_> = statements.iter().map(|stmt| stmt.to_string()).collect();
        assert_eq!(lines[0], "gt:o-1-0 rdf:type :HeterozygousGenotype .");
        assert!(lines.contains(&"gt:o-1-0 :sample sample:tumor .".to_owned()));
        assert!(lines.contains(&"gt:o-1-0 :ploidy \"2\"^^xsd:integer .".to_owned()));
        assert!(lines.contains(&"gt:o-1-0 :variantPairs \"7\"^^xsd:integer .".to_owned()));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_statements_without_genotype() {
        let mut fields = SampleFields::default();
        fields.support[2] = Some(5);
        let genotype = SampleGenotype::new("normal", &fields);
        assert_eq!(genotype.zygosity, None);

        let node = Iri::new(Prefix::Genotype, "o-0-0".to_owned());
        let variant = Iri::new(Prefix::VariantCall, "o-0".to_owned());
        let mut statements = Vec::new();
        genotype.statements(&node, &variant, &mut statements);
        let lines: Vec<_> = statements.iter().map(|stmt| stmt.to_string()).collect();
        assert!(!lines.iter().any(|line| line.contains("rdf:type")));
        assert!(!lines.iter().any(|line| line.contains(":ploidy")));
        assert!(!lines.iter().any(|line| line.contains(":alleles")));
        assert!(lines.contains(&"gt:o-0-0 :sample sample:normal .".to_owned()));
        assert!(lines.contains(&"gt:o-0-0 :variantPairs \"5\"^^xsd:integer .".to_owned()));
        assert_eq!(lines.len(), 3);
    }
}
