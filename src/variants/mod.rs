// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

pub mod breakend;
pub mod confidence_interval;
pub mod genotype;
pub mod mapper;

use crate::positions::{ExactPosition, InBetweenPosition, Position, RangedPosition};
use crate::rdf::{Class, Description, Iri, Namespaces, Predicate, Prefix, Statement, Term};

pub use breakend::BreakendProperties;
pub use genotype::{SampleGenotype, Zygosity};
pub use mapper::{Mapped, Mapper, SkipReason};

/// One converted VCF record. Only the first alternative allele is kept.
#[derive(Clone, Debug, Builder, Getters)]
#[getset(get = "pub")]
pub struct VariantCall {
    node: Iri,
    origin: Iri,
    #[builder(default = "None")]
    variant_id: Option<String>,
    reference: String,
    alternative: String,
    #[builder(default = "None")]
    quality: Option<f32>,
    #[builder(default = "Vec::new()")]
    filters: Vec<String>,
    #[builder(default = "None")]
    svtype: Option<String>,
    start: ExactPosition,
    end: ExactPosition,
    length: u64,
    /// Set if the ALT allele is a breakend in valid bracket notation.
    #[builder(default = "None")]
    breakend: Option<BreakendProperties>,
    #[builder(default = "None")]
    cipos: Option<InBetweenPosition>,
    #[builder(default = "None")]
    ciend: Option<InBetweenPosition>,
    #[builder(default = "None")]
    mapping_quality: Option<i32>,
    #[builder(default = "None")]
    paired_end_support: Option<i32>,
    #[builder(default = "None")]
    split_read_support: Option<i32>,
    #[builder(default = "None")]
    split_read_quality: Option<f32>,
    #[builder(default = "Vec::new()")]
    genotypes: Vec<SampleGenotype>,
}

impl VariantCall {
    pub fn is_complex_rearrangement(&self) -> bool {
        self.breakend.is_some()
    }

    pub fn is_reversed(&self) -> bool {
        self.breakend.as_ref().map_or(false, |bnd| bnd.is_reversed)
    }

    pub fn is_left_of_ref(&self) -> bool {
        self.breakend.as_ref().map_or(false, |bnd| bnd.is_left_of_ref)
    }

    /// All statements of this call: the call itself, its location, its
    /// confidence intervals and the genotype of every sample.
    pub fn statements(&self, namespaces: &Namespaces) -> Vec<Statement> {
        let mut statements = Vec::new();

        let location = Iri::new(Prefix::RangedPosition, self.node.local().to_owned());
        let cipos = self.node.derive(Prefix::InBetweenPosition, "cipos");
        let ciend = self.node.derive(Prefix::InBetweenPosition, "ciend");

        let mut description = Description::new(self.node.clone(), &mut statements);
        description
            .class(Class::VariantCall)
            .add(Predicate::OriginatedFrom, self.origin.clone())
            .add_opt(Predicate::VariantId, self.variant_id.clone().map(Term::string))
            .add(Predicate::Ref, Term::string(self.reference.clone()))
            .add(Predicate::Alt, Term::string(self.alternative.clone()))
            .add_opt(Predicate::Qual, self.quality.map(Term::float));
        for filter in &self.filters {
            description.add(Predicate::Filter, self.origin.derive(Prefix::Filter, filter));
        }
        description
            .add_opt(
                Predicate::StructuralVariantType,
                self.svtype.clone().map(Term::string),
            )
            .add(Predicate::Length, Term::integer(self.length as i64))
            .add(Predicate::FaldoLocation, location.clone())
            .add_opt(Predicate::ConfidenceIntervalStart, self.cipos.as_ref().map(|_| cipos.clone()))
            .add_opt(Predicate::ConfidenceIntervalEnd, self.ciend.as_ref().map(|_| ciend.clone()));
        if self.is_complex_rearrangement() {
            description
                .add(Predicate::IsComplexRearrangement, Term::boolean(true))
                .add(Predicate::IsReversed, Term::boolean(self.is_reversed()))
                .add(Predicate::IsLeftOfReference, Term::boolean(self.is_left_of_ref()));
        }
        description
            .add_opt(Predicate::MappingQuality, self.mapping_quality.map(Term::integer))
            .add_opt(Predicate::PairedEndSupport, self.paired_end_support.map(Term::integer))
            .add_opt(Predicate::SplitReadSupport, self.split_read_support.map(Term::integer))
            .add_opt(Predicate::SplitReadQuality, self.split_read_quality.map(Term::float));

        let range = Position::from(RangedPosition::new(self.start.clone(), self.end.clone()));
        statements.extend(range.statements(&location, namespaces));
        if let Some(ref interval) = self.cipos {
            statements.extend(Position::from(interval.clone()).statements(&cipos, namespaces));
        }
        if let Some(ref interval) = self.ciend {
            statements.extend(Position::from(interval.clone()).statements(&ciend, namespaces));
        }

        for (i, genotype) in self.genotypes.iter().enumerate() {
            let node = self.node.derive(Prefix::Genotype, &i.to_string());
            genotype.statements(&node, &self.node, &mut statements);
        }

        statements
    }
}
