// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use structopt::StructOpt;

use crate::config::{ConfigBuilder, ReferenceGenome};
use crate::conversion::Converter;

#[derive(Debug, StructOpt, Clone)]
#[structopt(
    name = "vcf2rdf",
    about = "Convert variant calls from VCF/BCF to RDF (Turtle).",
    setting = structopt::clap::AppSettings::ColoredHelp
)]
pub struct Vcf2Rdf {
    #[structopt(
        short,
        long,
        parse(from_os_str),
        help = "VCF/BCF file to convert (.vcf, .vcf.gz, .bcf or .bcf.gz)."
    )]
    pub input_file: PathBuf,
    #[structopt(
        short,
        long,
        parse(from_os_str),
        help = "Turtle file that shall contain the results (if omitted, write to STDOUT)."
    )]
    pub output: Option<PathBuf>,
    #[structopt(short, long, help = "Omit records carrying this FILTER value.")]
    pub filter: Option<String>,
    #[structopt(short, long, help = "Omit records not carrying this FILTER value.")]
    pub keep: Option<String>,
    #[structopt(
        short,
        long,
        default_value = "http://localhost:8890/",
        help = "Base IRI of the graph the statements will be published to."
    )]
    pub publish_to: String,
    #[structopt(
        short,
        long,
        help = "Reference genome the calls refer to (GRCh37, GRCh38 or any other name)."
    )]
    pub reference: Option<ReferenceGenome>,
    #[structopt(short, long, help = "Name of the tool that produced the calls.")]
    pub caller: Option<String>,
    #[structopt(short, long, default_value = "2", help = "Number of worker threads.")]
    pub threads: usize,
    #[structopt(
        short,
        long,
        default_value = "500",
        help = "Number of records each worker thread converts per batch."
    )]
    pub jobs_per_thread: usize,
    #[structopt(short, long, help = "Also report per-record decisions.")]
    pub verbose: bool,
}

pub fn run(opt: Vcf2Rdf) -> Result<()> {
    let mut builder = ConfigBuilder::default();
    builder
        .graph_location(opt.publish_to.clone())
        .threads(opt.threads)
        .jobs_per_thread(opt.jobs_per_thread);
    if let Some(ref filter) = opt.filter {
        builder.filter(filter.clone());
    }
    if let Some(ref keep) = opt.keep {
        builder.keep(keep.clone());
    }
    if let Some(ref reference) = opt.reference {
        builder.reference(reference.clone());
    }
    if let Some(ref caller) = opt.caller {
        builder.caller(caller.clone());
    }
    let config = builder
        .build()
        .context("Invalid conversion options.")?;
    config.check_completeness();

    let converter = Converter::new(config);
    match opt.output {
        Some(ref path) => {
            let file = File::create(path)
                .with_context(|| format!("Unable to create output file {}.", path.display()))?;
            converter.convert(&opt.input_file, BufWriter::new(file))?;
        }
        None => {
            converter.convert(&opt.input_file, BufWriter::new(io::stdout()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_GRAPH_LOCATION;

    #[test]
    fn test_parse_arguments() {
        let opt = Vcf2Rdf::from_iter(&[
            "vcf2rdf",
            "--input-file",
            "calls.vcf.gz",
            "--filter",
            "LowQual",
            "--reference",
            "GRCh38",
            "--jobs-per-thread",
            "10",
        ]);
        assert_eq!(opt.input_file, PathBuf::from("calls.vcf.gz"));
        assert_eq!(opt.filter.as_deref(), Some("LowQual"));
        assert_eq!(opt.reference, Some(ReferenceGenome::Grch38));
        assert_eq!(opt.threads, 2);
        assert_eq!(opt.jobs_per_thread, 10);
        assert_eq!(opt.publish_to, DEFAULT_GRAPH_LOCATION);
        assert!(opt.output.is_none());
        assert!(!opt.verbose);
    }

    #[test]
    fn test_invalid_threads() {
        let opt = Vcf2Rdf::from_iter(&["vcf2rdf", "-i", "calls.vcf", "--threads", "0"]);
        assert!(run(opt).is_err());
    }
}
