// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::process::exit;

use anyhow::Result;
use log::LevelFilter;
use structopt::StructOpt;

use vcf2rdf::cli::{run, Vcf2Rdf};

fn main() -> Result<()> {
    let opt = Vcf2Rdf::from_args();

    // Diagnostics are Turtle comments, so they cannot break the output even
    // if both streams end up in the same file.
    fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("# [{}] {}", record.level(), message)))
        .level(if opt.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .chain(std::io::stderr())
        .apply()?;

    if let Err(e) = run(opt) {
        log::error!("{:#}", e);
        exit(1);
    }
    Ok(())
}
