// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("unsupported input format for {path}: expected .vcf, .vcf.gz, .bcf or .bcf.gz")]
    UnsupportedInputFormat { path: PathBuf },
    #[error("unable to open VCF/BCF file {path}")]
    UnreadableInput { path: PathBuf },
    #[error("unable to read the header of VCF/BCF file {path}")]
    UnreadableHeader { path: PathBuf },
    #[error("invalid dispatcher configuration: threads and jobs per thread must be greater than zero")]
    InvalidDispatchConfiguration,
    #[error("unable to allocate {slots} record buffers")]
    BufferAllocation { slots: usize },
    #[error("record {i} in VCF/BCF does not define a chromosome")]
    RecordMissingChrom { i: usize },
    #[error("invalid BND record: ALT {spec} does not follow BND spec")]
    InvalidBNDRecordAlt { spec: String },
    #[error("a conversion worker thread panicked")]
    WorkerPanicked,
    #[error("the output lock has been poisoned by a failed worker")]
    OutputPoisoned,
}
