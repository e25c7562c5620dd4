// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use strum::IntoEnumIterator;

use crate::config::ReferenceGenome;

pub const URI_VOCABULARY: &str = "http://sparqling-genomics/vcf2rdf/";
pub const URI_MASTER: &str = "http://sparqling-genomics/";

/// Namespaces used in the output. Instance namespaces are placed below the
/// configured graph location, the vocabulary namespaces are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Prefix {
    Vocabulary,
    Rdf,
    Rdfs,
    Owl,
    Xsd,
    Faldo,
    Sample,
    Origin,
    Header,
    Info,
    Format,
    Filter,
    Alt,
    Contig,
    VariantCall,
    Genotype,
    ExactPosition,
    InBetweenPosition,
    RangedPosition,
    Grch37,
    Grch38,
}

impl Prefix {
    pub fn name(self) -> &'static str {
        match self {
            Prefix::Vocabulary => "",
            Prefix::Rdf => "rdf",
            Prefix::Rdfs => "rdfs",
            Prefix::Owl => "owl",
            Prefix::Xsd => "xsd",
            Prefix::Faldo => "faldo",
            Prefix::Sample => "sample",
            Prefix::Origin => "orig",
            Prefix::Header => "hdr",
            Prefix::Info => "info",
            Prefix::Format => "fmt",
            Prefix::Filter => "flt",
            Prefix::Alt => "alt",
            Prefix::Contig => "ctg",
            Prefix::VariantCall => "v",
            Prefix::Genotype => "gt",
            Prefix::ExactPosition => "ep",
            Prefix::InBetweenPosition => "ip",
            Prefix::RangedPosition => "rp",
            Prefix::Grch37 => "grch37",
            Prefix::Grch38 => "grch38",
        }
    }

    pub fn namespace(self, graph_location: &str) -> String {
        let instance = |path: &str| format!("{}{}/", graph_location, path);
        match self {
            Prefix::Vocabulary => URI_VOCABULARY.to_owned(),
            Prefix::Rdf => "http://www.w3.org/1999/02/22-rdf-syntax-ns#".to_owned(),
            Prefix::Rdfs => "http://www.w3.org/2000/01/rdf-schema#".to_owned(),
            Prefix::Owl => "http://www.w3.org/2002/07/owl#".to_owned(),
            Prefix::Xsd => "http://www.w3.org/2001/XMLSchema#".to_owned(),
            Prefix::Faldo => "http://biohackathon.org/resource/faldo#".to_owned(),
            Prefix::Sample => format!("{}Sample/", URI_MASTER),
            Prefix::Origin => instance("Origin"),
            Prefix::Header => instance("HeaderItem"),
            Prefix::Info => instance("InfoItem"),
            Prefix::Format => instance("FormatItem"),
            Prefix::Filter => instance("FilterItem"),
            Prefix::Alt => instance("AltItem"),
            Prefix::Contig => instance("ContigItem"),
            Prefix::VariantCall => instance("VariantCall"),
            Prefix::Genotype => instance("Genotype"),
            Prefix::ExactPosition => instance("ExactPosition"),
            Prefix::InBetweenPosition => instance("InBetweenPosition"),
            Prefix::RangedPosition => instance("RangedPosition"),
            // The GRCh37 release is only published on the Ensembl FTP server,
            // hence the different IRI layout.
            Prefix::Grch37 => {
                "http://rdf.ebi.ac.uk/resource/ensembl/83/chromosome:GRCh37:".to_owned()
            }
            Prefix::Grch38 => {
                "http://rdf.ebi.ac.uk/resource/ensembl/90/homo_sapiens/GRCh38/".to_owned()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum Class {
    Origin,
    #[strum(serialize = "VcfHeaderItem")]
    HeaderItem,
    #[strum(serialize = "VcfHeaderInfoItem")]
    HeaderInfoItem,
    #[strum(serialize = "VcfHeaderFormatItem")]
    HeaderFormatItem,
    #[strum(serialize = "VcfHeaderFilterItem")]
    HeaderFilterItem,
    #[strum(serialize = "VcfHeaderAltItem")]
    HeaderAltItem,
    #[strum(serialize = "VcfHeaderContigItem")]
    HeaderContigItem,
    Sample,
    VariantCall,
    #[strum(serialize = "HeterozygousGenotype")]
    Heterozygous,
    Multizygous,
    Nullizygous,
    #[strum(serialize = "HomozygousGenotype")]
    Homozygous,
    #[strum(serialize = "HomozygousReferenceGenotype")]
    HomozygousReference,
    #[strum(serialize = "HomozygousAlternativeGenotype")]
    HomozygousAlternative,
    ExactPosition,
    InBetweenPosition,
    #[strum(serialize = "Region")]
    RangedPosition,
}

impl Class {
    pub fn prefix(self) -> Prefix {
        match self {
            Class::ExactPosition | Class::InBetweenPosition | Class::RangedPosition => {
                Prefix::Faldo
            }
            _ => Prefix::Vocabulary,
        }
    }

    pub fn local(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum Predicate {
    #[strum(serialize = "type")]
    RdfType,
    #[strum(serialize = "versionInfo")]
    VersionInfo,
    Filename,
    ConvertedBy,
    ConversionOptions,
    ReferenceGenome,
    CalledBy,
    OriginatedFrom,
    FoundIn,
    Key,
    Value,
    Id,
    Number,
    Type,
    Description,
    Assembly,
    Sample,
    VariantId,
    Ref,
    Alt,
    Qual,
    Filter,
    #[strum(serialize = "svtype")]
    StructuralVariantType,
    Length,
    IsComplexRearrangement,
    IsReversed,
    IsLeftOfReference,
    #[strum(serialize = "cipos")]
    ConfidenceIntervalStart,
    #[strum(serialize = "ciend")]
    ConfidenceIntervalEnd,
    MappingQuality,
    PairedEndSupport,
    SplitReadSupport,
    #[strum(serialize = "splitReadConsensusQuality")]
    SplitReadQuality,
    Genotype,
    Ploidy,
    Alleles,
    ReadCount,
    #[strum(serialize = "referencePairs")]
    HqReferencePairs,
    #[strum(serialize = "variantPairs")]
    HqVariantPairs,
    #[strum(serialize = "referenceJunctionReads")]
    HqReferenceJunctionReads,
    #[strum(serialize = "variantJunctionReads")]
    HqVariantJunctionReads,
    #[strum(serialize = "location")]
    FaldoLocation,
    #[strum(serialize = "position")]
    FaldoPosition,
    #[strum(serialize = "reference")]
    FaldoReference,
    #[strum(serialize = "begin")]
    FaldoBegin,
    #[strum(serialize = "end")]
    FaldoEnd,
    #[strum(serialize = "before")]
    FaldoBefore,
    #[strum(serialize = "after")]
    FaldoAfter,
}

impl Predicate {
    pub fn prefix(self) -> Prefix {
        match self {
            Predicate::RdfType => Prefix::Rdf,
            Predicate::VersionInfo => Prefix::Owl,
            Predicate::FaldoLocation
            | Predicate::FaldoPosition
            | Predicate::FaldoReference
            | Predicate::FaldoBegin
            | Predicate::FaldoEnd
            | Predicate::FaldoBefore
            | Predicate::FaldoAfter => Prefix::Faldo,
            _ => Prefix::Vocabulary,
        }
    }

    pub fn local(self) -> &'static str {
        self.into()
    }
}

/// The four literal datatypes of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Datatype {
    String,
    Integer,
    Float,
    Boolean,
}

impl Datatype {
    pub fn local(self) -> &'static str {
        self.into()
    }
}

/// The prefixes declared for one conversion run.
#[derive(Debug, Clone, Getters)]
pub struct Namespaces {
    #[getset(get = "pub")]
    graph_location: String,
    reference: Option<Prefix>,
}

impl Namespaces {
    pub fn new(graph_location: &str, reference: Option<&ReferenceGenome>) -> Self {
        let mut graph_location = graph_location.to_owned();
        if !graph_location.ends_with('/') {
            graph_location.push('/');
        }
        let reference = match reference {
            Some(ReferenceGenome::Grch37) => Some(Prefix::Grch37),
            Some(ReferenceGenome::Grch38) => Some(Prefix::Grch38),
            _ => None,
        };
        Namespaces {
            graph_location,
            reference,
        }
    }

    /// Namespace in which chromosomes are addressed, if the reference genome
    /// is one with published chromosome IRIs.
    pub fn reference(&self) -> Option<Prefix> {
        self.reference
    }

    /// All (prefix, namespace IRI) pairs to declare, in declaration order.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        Prefix::iter()
            .filter(|prefix| match prefix {
                Prefix::Grch37 | Prefix::Grch38 => Some(*prefix) == self.reference,
                _ => true,
            })
            .map(|prefix| (prefix.name(), prefix.namespace(&self.graph_location)))
            .collect()
    }
}
