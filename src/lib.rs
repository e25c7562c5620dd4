// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversion of VCF/BCF variant calls into an RDF graph, serialized as
//! Turtle. Positions are described with FALDO, genotypes are classified by
//! zygosity, and records are converted in parallel batches.

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate derive_builder;
#[macro_use]
extern crate getset;
#[macro_use]
extern crate derive_new;
#[macro_use]
extern crate strum_macros;

pub mod cli;
pub mod config;
pub mod conversion;
pub mod dispatch;
pub mod errors;
pub mod positions;
pub mod rdf;
pub mod record;
pub mod utils;
pub mod variants;

pub use crate::config::{Config, ConfigBuilder, ReferenceGenome};
pub use crate::conversion::Converter;
pub use crate::dispatch::Summary;
