// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::Result;

use crate::config::Config;
use crate::positions::ExactPosition;
use crate::rdf::{Iri, Prefix};
use crate::record::VariantRecord;
use crate::variants::breakend::BreakendProperties;
use crate::variants::confidence_interval::{self, END_INTERVAL_TAG, START_INTERVAL_TAG};
use crate::variants::genotype::SampleGenotype;
use crate::variants::{VariantCall, VariantCallBuilder};

#[derive(Hash, PartialEq, Eq, Clone, Copy, EnumIter, Display, Debug)]
pub enum SkipReason {
    #[strum(serialize = "records without alternative allele")]
    MissingAlleles,
    #[strum(serialize = "records carrying the excluded filter")]
    ExcludedByFilter,
    #[strum(serialize = "records lacking the required filter")]
    MissingRequiredFilter,
}

#[derive(Debug, Clone)]
pub enum Mapped {
    Call(VariantCall),
    Skipped(SkipReason),
}

/// Turns decoded records into variant calls of one origin.
#[derive(Debug, Clone, new)]
pub struct Mapper {
    origin: Iri,
    samples: Vec<String>,
    /// Skip records carrying this filter.
    filter: Option<String>,
    /// Skip records not carrying this filter.
    keep: Option<String>,
}

impl Mapper {
    pub fn from_config(config: &Config, origin: Iri, samples: Vec<String>) -> Self {
        Mapper::new(origin, samples, config.filter().clone(), config.keep().clone())
    }

    pub fn map(&self, record: &VariantRecord) -> Result<Mapped> {
        if record.alleles.len() < 2 {
            warn!(
                "Skipping record {} at {}:{}: no alternative allele.",
                record.index, record.chrom, record.pos
            );
            return Ok(Mapped::Skipped(SkipReason::MissingAlleles));
        }
        if record.alleles.len() > 2 {
            debug!(
                "Record {} at {}:{} is multi-allelic, only the first alternative allele is converted.",
                record.index, record.chrom, record.pos
            );
        }

        if let Some(skip) = self.filter_policy(record) {
            debug!(
                "Skipping record {} at {}:{}: {}.",
                record.index, record.chrom, record.pos, skip
            );
            return Ok(Mapped::Skipped(skip));
        }

        let reference = &record.alleles[0];
        let alternative = &record.alleles[1];
        let svtype = record.info_string("SVTYPE");

        let breakend = if svtype == Some("BND") {
            match BreakendProperties::parse(alternative) {
                Ok(breakend) => Some(breakend),
                Err(e) => {
                    warn!(
                        "Could not parse complex rearrangement of record {} at {}:{} ({}), \
                         converting it without breakend information.",
                        record.index, record.chrom, record.pos, e
                    );
                    None
                }
            }
        } else {
            None
        };

        let start = ExactPosition::new(record.chrom.clone(), record.pos);
        let end = match breakend {
            Some(ref breakend) => ExactPosition::new(breakend.chromosome.clone(), breakend.position),
            None => ExactPosition::new(record.chrom.clone(), end_position(record)),
        };
        let length = if start.is_on_same_chromosome(&end) {
            if end.position() >= start.position() {
                end.position() - start.position()
            } else {
                start.position() - end.position()
            }
        } else {
            0
        };

        let cipos = confidence_interval::resolve(record, START_INTERVAL_TAG, &start);
        let ciend = confidence_interval::resolve(record, END_INTERVAL_TAG, &end);

        let genotypes = record
            .samples
            .iter()
            .enumerate()
            .map(|(i, fields)| {
                let name = self
                    .samples
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| i.to_string());
                SampleGenotype::new(name, fields)
            })
            .collect();

        let call = VariantCallBuilder::default()
            .node(self.origin.derive(Prefix::VariantCall, &record.index.to_string()))
            .origin(self.origin.clone())
            .variant_id(record.id.clone())
            .reference(reference.clone())
            .alternative(alternative.clone())
            .quality(record.qual)
            .filters(record.filters.clone())
            .svtype(svtype.map(|svtype| svtype.to_owned()))
            .start(start)
            .end(end)
            .length(length)
            .breakend(breakend)
            .cipos(cipos)
            .ciend(ciend)
            .mapping_quality(record.info_integer("MAPQ"))
            .paired_end_support(record.info_integer("PE"))
            .split_read_support(record.info_integer("SR"))
            .split_read_quality(record.info_float("SRQ"))
            .genotypes(genotypes)
            .build()?;

        Ok(Mapped::Call(call))
    }

    fn filter_policy(&self, record: &VariantRecord) -> Option<SkipReason> {
        if let Some(ref filter) = self.filter {
            if record.has_filter(filter) {
                return Some(SkipReason::ExcludedByFilter);
            }
        }
        if let Some(ref keep) = self.keep {
            if !record.has_filter(keep) {
                return Some(SkipReason::MissingRequiredFilter);
            }
        }
        None
    }
}

/// End of a variant on its own chromosome: END if given, otherwise the start
/// shifted by SVLEN, otherwise the last reference base.
fn end_position(record: &VariantRecord) -> u64 {
    if let Some(end) = record.info_integer("END") {
        return end.max(0) as u64;
    }
    if let Some(svlen) = record.info_integer("SVLEN") {
        return record.pos + svlen.unsigned_abs() as u64;
    }
    debug!(
        "Record {} at {}:{} has neither END nor SVLEN, ending it at the last reference base.",
        record.index, record.chrom, record.pos
    );
    record.pos + (record.alleles[0].len() as u64).saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{InfoValue, SampleFields};
    use crate::variants::Zygosity;

    fn mapper(filter: Option<&str>, keep: Option<&str>) -> Mapper {
        Mapper::new(
            Iri::new(Prefix::Origin, "o".to_owned()),
            vec!["normal".to_owned(), "tumor".to_owned()],
            filter.map(str::to_owned),
            keep.map(str::to_owned),
        )
    }

    fn record(alleles: &[&str]) -> VariantRecord {
        let mut record = VariantRecord::default();
        record.index = 4;
        record.chrom = "chr1".to_owned();
        record.pos = 1000;
        record.alleles = alleles.iter().map(|a| (*a).to_owned()).collect();
        record
    }

    fn call(mapped: Mapped) -> VariantCall {
        match mapped {
            Mapped::Call(call) => call,
            Mapped::Skipped(reason) => panic!("unexpected skip: {}", reason),
        }
    }

    fn skip(mapped: Mapped) -> SkipReason {
        match mapped {
            Mapped::Skipped(reason) => reason,
            Mapped::Call(_) => panic!("expected a skip"),
        }
    }

    #[test]
    fn test_missing_alleles() {
        let mapped = mapper(None, None).map(&record(&["A"])).unwrap();
        assert_eq!(skip(mapped), SkipReason::MissingAlleles);
    }

    #[test]
    fn test_filter_policy() {
        let mut rec = record(&["A", "T"]);
        rec.filters = vec!["LowQual".to_owned()];

        let mapped = mapper(Some("LowQual"), None).map(&rec).unwrap();
        assert_eq!(skip(mapped), SkipReason::ExcludedByFilter);

        let mapped = mapper(None, Some("PASS")).map(&rec).unwrap();
        assert_eq!(skip(mapped), SkipReason::MissingRequiredFilter);

        let mapped = mapper(Some("PASS"), Some("LowQual")).map(&rec).unwrap();
        assert_eq!(call(mapped).filters(), &vec!["LowQual".to_owned()]);
    }

    #[test]
    fn test_end_from_info() {
        let mut rec = record(&["A", "<DEL>"]);
        rec.info.insert("END".to_owned(), InfoValue::Integer(vec![Some(1200)]));
        rec.info
            .insert("SVTYPE".to_owned(), InfoValue::String(vec!["DEL".to_owned()]));
        let call = call(mapper(None, None).map(&rec).unwrap());
        assert_eq!(*call.length(), 200);
        assert_eq!(call.end(), &ExactPosition::new("chr1", 1200));
        assert_eq!(call.svtype().as_deref(), Some("DEL"));
        assert_eq!(call.node().to_string(), "v:o-4");
        assert!(!call.is_complex_rearrangement());
    }

    #[test]
    fn test_end_fallbacks() {
        let mut rec = record(&["A", "<DEL>"]);
        rec.info.insert("SVLEN".to_owned(), InfoValue::Integer(vec![Some(-300)]));
        assert_eq!(*call(mapper(None, None).map(&rec).unwrap()).length(), 300);

        let rec = record(&["ACGT", "A"]);
        let call = call(mapper(None, None).map(&rec).unwrap());
        assert_eq!(call.end().position(), 1003);
        assert_eq!(*call.length(), 3);
    }

    #[test]
    fn test_cross_chromosome_breakend() {
        let mut rec = record(&["G", "G[chr17:198982["]);
        rec.info
            .insert("SVTYPE".to_owned(), InfoValue::String(vec!["BND".to_owned()]));
        let call = call(mapper(None, None).map(&rec).unwrap());
        assert_eq!(*call.length(), 0);
        assert_eq!(call.end(), &ExactPosition::new("chr17", 198982));
        assert!(call.is_complex_rearrangement());
        assert!(!call.is_reversed());
        assert!(!call.is_left_of_ref());
    }

    #[test]
    fn test_invalid_breakend_degrades() {
        let mut rec = record(&["G", "G[chr17198982["]);
        rec.info
            .insert("SVTYPE".to_owned(), InfoValue::String(vec!["BND".to_owned()]));
        rec.info.insert("END".to_owned(), InfoValue::Integer(vec![Some(1010)]));
        let call = call(mapper(None, None).map(&rec).unwrap());
        assert!(!call.is_complex_rearrangement());
        assert_eq!(call.end(), &ExactPosition::new("chr1", 1010));
        assert_eq!(*call.length(), 10);
    }

    #[test]
    fn test_multi_allelic_keeps_first_alt() {
        let call = call(mapper(None, None).map(&record(&["A", "T", "G"])).unwrap());
        assert_eq!(call.alternative(), "T");
        assert_eq!(call.reference(), "A");
    }

    #[test]
    fn test_intervals_support_and_genotypes() {
        let mut rec = record(&["A", "<DEL>"]);
        rec.info.insert("END".to_owned(), InfoValue::Integer(vec![Some(1200)]));
        rec.info
            .insert("CIPOS".to_owned(), InfoValue::Integer(vec![Some(-50), Some(75)]));
        rec.info.insert("MAPQ".to_owned(), InfoValue::Integer(vec![Some(60)]));
        rec.info.insert("SRQ".to_owned(), InfoValue::Float(vec![Some(0.9)]));
        let mut normal = SampleFields::default();
        normal.genotype = vec![Some(0), Some(0)];
        let mut tumor = SampleFields::default();
        tumor.genotype = vec![Some(0), Some(1)];
        rec.samples = vec![normal, tumor];

        let call = call(mapper(None, None).map(&rec).unwrap());
        let cipos = call.cipos().as_ref().unwrap();
        assert_eq!(cipos.before().position(), 950);
        assert_eq!(cipos.after().position(), 1075);
        assert!(call.ciend().is_none());
        assert_eq!(*call.mapping_quality(), Some(60));
        assert_eq!(*call.paired_end_support(), None);
        assert_eq!(*call.split_read_quality(), Some(0.9));

        let genotypes = call.genotypes();
        assert_eq!(genotypes[0].sample, "normal");
        assert_eq!(genotypes[0].zygosity, Some(Zygosity::HomozygousReference));
        assert_eq!(genotypes[1].sample, "tumor");
        assert_eq!(genotypes[1].zygosity, Some(Zygosity::Heterozygous));
    }

    #[test]
    fn test_end_interval() {
        let mut rec = record(&["A", "<DEL>"]);
        rec.info.insert("END".to_owned(), InfoValue::Integer(vec![Some(1200)]));
        rec.info
            .insert("CIEND".to_owned(), InfoValue::Integer(vec![Some(-10), Some(20)]));
        let call = call(mapper(None, None).map(&rec).unwrap());
        assert!(call.cipos().is_none());
        let ciend = call.ciend().as_ref().unwrap();
        assert_eq!(ciend.before(), &ExactPosition::new("chr1", 1190));
        assert_eq!(ciend.after(), &ExactPosition::new("chr1", 1220));
    }

    #[test]
    fn test_end_interval_around_mate() {
        let mut rec = record(&["G", "G[chr17:198982["]);
        rec.info
            .insert("SVTYPE".to_owned(), InfoValue::String(vec!["BND".to_owned()]));
        rec.info
            .insert("CIEND".to_owned(), InfoValue::Integer(vec![Some(-10), Some(20)]));
        let call = call(mapper(None, None).map(&rec).unwrap());
        let ciend = call.ciend().as_ref().unwrap();
        assert_eq!(ciend.before(), &ExactPosition::new("chr17", 198972));
        assert_eq!(ciend.after(), &ExactPosition::new("chr17", 199002));
    }

    #[test]
    fn test_record_without_genotypes() {
        let mut rec = record(&["A", "T"]);
        let mut normal = SampleFields::default();
        normal.support[2] = Some(5);
        let mut tumor = SampleFields::default();
        tumor.support[2] = Some(7);
        rec.samples = vec![normal, tumor];

        let call = call(mapper(None, None).map(&rec).unwrap());
        let genotypes = call.genotypes();
        assert_eq!(genotypes.len(), 2);
        assert!(genotypes.iter().all(|genotype| genotype.zygosity.is_none()));
        assert_eq!(genotypes[1].support[2], Some(7));

        let lines: Vec<_> = call
            .statements(&crate::rdf::Namespaces::new("http://localhost:8890/", None))
            .iter()
            .map(|stmt| stmt.to_string())
            .collect();
        assert!(!lines.iter().any(|line| line.contains(":Nullizygous")));
        assert!(!lines.iter().any(|line| line.contains(":ploidy")));
        assert!(lines.contains(&"gt:o-4-1 :variantPairs \"7\"^^xsd:integer .".to_owned()));
    }
}
