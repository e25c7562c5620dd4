// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Owned, thread-safe copies of decoded VCF/BCF records.
//!
//! `bcf::Record` keeps a reference counted handle to its header and can
//! therefore not be handed to worker threads. Records are decoded into a
//! `VariantRecord` on the reading thread instead; the slots are refilled in
//! place so their allocations are reused from batch to batch.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use rust_htslib::bcf::header::{HeaderRecord, TagType};
use rust_htslib::bcf::record::Numeric;
use rust_htslib::bcf::{self, Read};

use crate::errors::Error;

/// FORMAT fields with per-sample read support counts.
pub const SUPPORT_FORMAT_TAGS: [&str; 5] = ["RC", "DR", "DV", "RR", "RV"];

/// Value of one INFO field. Missing entries of a vector are `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    Integer(Vec<Option<i32>>),
    Float(Vec<Option<f32>>),
    String(Vec<String>),
    Flag,
}

impl InfoValue {
    pub fn first_integer(&self) -> Option<i32> {
        match self {
            InfoValue::Integer(values) => values.first().copied().flatten(),
            _ => None,
        }
    }

    pub fn first_float(&self) -> Option<f32> {
        match self {
            InfoValue::Float(values) => values.first().copied().flatten(),
            _ => None,
        }
    }

    pub fn first_string(&self) -> Option<&str> {
        match self {
            InfoValue::String(values) => values.first().map(|value| value.as_str()),
            _ => None,
        }
    }
}

/// FORMAT data of one sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleFields {
    /// GT allele indices, `None` for a missing allele.
    pub genotype: Vec<Option<u32>>,
    /// Read support counters, indexed like `SUPPORT_FORMAT_TAGS`.
    pub support: [Option<i32>; 5],
}

impl SampleFields {
    pub fn support(&self, tag: &str) -> Option<i32> {
        SUPPORT_FORMAT_TAGS
            .iter()
            .position(|t| *t == tag)
            .and_then(|i| self.support[i])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantRecord {
    /// Position of the record in the input, counting from 0.
    pub index: usize,
    pub chrom: String,
    /// 1-based position as written in the VCF.
    pub pos: u64,
    pub id: Option<String>,
    pub alleles: Vec<String>,
    pub qual: Option<f32>,
    pub filters: Vec<String>,
    pub info: HashMap<String, InfoValue>,
    pub samples: Vec<SampleFields>,
}

impl VariantRecord {
    pub fn info(&self, tag: &str) -> Option<&InfoValue> {
        self.info.get(tag)
    }

    pub fn info_integer(&self, tag: &str) -> Option<i32> {
        self.info(tag).and_then(InfoValue::first_integer)
    }

    pub fn info_float(&self, tag: &str) -> Option<f32> {
        self.info(tag).and_then(InfoValue::first_float)
    }

    pub fn info_string(&self, tag: &str) -> Option<&str> {
        self.info(tag).and_then(InfoValue::first_string)
    }

    pub fn has_filter(&self, filter: &str) -> bool {
        self.filters.iter().any(|f| f == filter)
    }

    fn clear(&mut self) {
        self.id = None;
        self.alleles.clear();
        self.qual = None;
        self.filters.clear();
        self.info.clear();
        self.samples.clear();
    }

    /// Refill this record from a decoded htslib record.
    pub fn fill_from_bcf(&mut self, record: &bcf::Record, layout: &HeaderLayout) -> Result<()> {
        self.clear();

        let rid = record
            .rid()
            .ok_or(Error::RecordMissingChrom { i: self.index })?;
        self.chrom = String::from_utf8_lossy(record.header().rid2name(rid)?).into_owned();
        self.pos = record.pos() as u64 + 1;

        let id = record.id();
        if id != b"." {
            self.id = Some(String::from_utf8_lossy(&id).into_owned());
        }

        self.alleles.extend(
            record
                .alleles()
                .iter()
                .map(|allele| String::from_utf8_lossy(allele).into_owned()),
        );

        let qual = record.qual();
        if !qual.is_missing() {
            self.qual = Some(qual);
        }

        let filter_ids: Vec<_> = record.filters().collect();
        for filter_id in filter_ids {
            let name = record.header().id_to_name(filter_id);
            self.filters.push(String::from_utf8_lossy(&name).into_owned());
        }

        for (tag, tag_type) in &layout.info_tags {
            if let Some(value) = decode_info(record, tag.as_bytes(), tag_type) {
                self.info.insert(tag.clone(), value);
            }
        }

        let sample_count = record.sample_count() as usize;
        self.samples.resize_with(sample_count, SampleFields::default);
        if let Ok(genotypes) = record.genotypes() {
            for (i, sample) in self.samples.iter_mut().enumerate() {
                sample.genotype = genotypes
                    .get(i)
                    .iter()
                    .map(|allele| allele.index())
                    .collect();
            }
        }
        for (k, tag) in SUPPORT_FORMAT_TAGS.iter().enumerate() {
            if let Ok(values) = record.format(tag.as_bytes()).integer() {
                for (sample, value) in self.samples.iter_mut().zip(values.iter()) {
                    sample.support[k] = value.first().filter(|v| !v.is_missing()).copied();
                }
            }
        }

        Ok(())
    }
}

fn decode_info(record: &bcf::Record, tag: &[u8], tag_type: &TagType) -> Option<InfoValue> {
    match tag_type {
        TagType::Flag => match record.info(tag).flag() {
            Ok(true) => Some(InfoValue::Flag),
            _ => None,
        },
        TagType::Integer => record.info(tag).integer().ok().flatten().map(|values| {
            InfoValue::Integer(
                values
                    .iter()
                    .map(|v| if v.is_missing() { None } else { Some(*v) })
                    .collect(),
            )
        }),
        TagType::Float => record.info(tag).float().ok().flatten().map(|values| {
            InfoValue::Float(
                values
                    .iter()
                    .map(|v| if v.is_missing() { None } else { Some(*v) })
                    .collect(),
            )
        }),
        TagType::String => record.info(tag).string().ok().flatten().map(|values| {
            InfoValue::String(
                values
                    .iter()
                    .map(|v| String::from_utf8_lossy(v).into_owned())
                    .collect(),
            )
        }),
    }
}

/// What the header tells about the layout of the records.
#[derive(Default)]
pub struct HeaderLayout {
    info_tags: Vec<(String, TagType)>,
}

impl HeaderLayout {
    pub fn from_header(header: &bcf::header::HeaderView) -> Self {
        let mut info_tags = Vec::new();
        for rec in header.header_records() {
            if let HeaderRecord::Info { values, .. } = rec {
                if let Some(id) = values.get("ID") {
                    match header.info_type(id.as_bytes()) {
                        Ok((tag_type, _)) => info_tags.push((id.to_owned(), tag_type)),
                        Err(_) => debug!("Ignoring INFO field {} with unknown type.", id),
                    }
                }
            }
        }
        HeaderLayout { info_tags }
    }
}

/// A stream of decoded records, read into caller-owned slots.
pub trait RecordSource {
    /// Fill `record` with the next record. Returns `None` at the end of the
    /// stream.
    fn read(&mut self, record: &mut VariantRecord) -> Option<Result<()>>;
}

/// Records of a VCF/BCF file, decoded with htslib.
pub struct BcfSource {
    reader: bcf::Reader,
    layout: HeaderLayout,
    buffer: bcf::Record,
}

impl BcfSource {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        // An existing file that htslib refuses to open has no valid header.
        let reader = bcf::Reader::from_path(path)
            .map_err(|_| {
                if path.is_file() {
                    Error::UnreadableHeader {
                        path: path.to_owned(),
                    }
                } else {
                    Error::UnreadableInput {
                        path: path.to_owned(),
                    }
                }
            })
            .with_context(|| format!("Unable to read VCF/BCF from {}.", path.display()))?;
        let layout = HeaderLayout::from_header(reader.header());
        let buffer = reader.empty_record();
        Ok(BcfSource {
            reader,
            layout,
            buffer,
        })
    }

    pub fn header(&self) -> &bcf::header::HeaderView {
        self.reader.header()
    }
}

impl RecordSource for BcfSource {
    fn read(&mut self, record: &mut VariantRecord) -> Option<Result<()>> {
        match self.reader.read(&mut self.buffer) {
            None => None,
            Some(Err(e)) => Some(Err(e.into())),
            Some(Ok(())) => Some(record.fill_from_bcf(&self.buffer, &self.layout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_accessors() {
        let mut record = VariantRecord::default();
        record
            .info
            .insert("END".to_owned(), InfoValue::Integer(vec![Some(1200)]));
        record
            .info
            .insert("SRQ".to_owned(), InfoValue::Float(vec![Some(0.75)]));
        record
            .info
            .insert("SVTYPE".to_owned(), InfoValue::String(vec!["DEL".to_owned()]));
        record
            .info
            .insert("SVLEN".to_owned(), InfoValue::Integer(vec![None]));

        assert_eq!(record.info_integer("END"), Some(1200));
        assert_eq!(record.info_float("SRQ"), Some(0.75));
        assert_eq!(record.info_string("SVTYPE"), Some("DEL"));
        assert_eq!(record.info_integer("SVLEN"), None);
        assert_eq!(record.info_integer("SVTYPE"), None);
        assert_eq!(record.info_integer("MAPQ"), None);
    }

    #[test]
    fn test_sample_support() {
        let mut sample = SampleFields::default();
        sample.support[1] = Some(12);
        assert_eq!(sample.support("DR"), Some(12));
        assert_eq!(sample.support("DV"), None);
        assert_eq!(sample.support("XX"), None);
    }
}
