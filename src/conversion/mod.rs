// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

pub mod header;
pub mod origin;

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::dispatch::{Dispatcher, Outcome, Summary};
use crate::rdf::turtle::{SharedOutput, TurtleWriter};
use crate::rdf::Namespaces;
use crate::record::BcfSource;
use crate::utils;
use crate::variants::{Mapped, Mapper};

pub use origin::Origin;

/// Converts VCF/BCF files to Turtle.
#[derive(Debug, Clone, new)]
pub struct Converter {
    config: Config,
}

impl Converter {
    /// Convert `input`, writing the prefixes, the origin, the header items
    /// and the samples first and then one block per converted record.
    pub fn convert<W: Write + Send>(&self, input: &Path, out: W) -> Result<Summary> {
        utils::check_input_format(input)?;
        let mut source = BcfSource::from_path(input)?;

        let namespaces = Namespaces::new(
            self.config.graph_location(),
            self.config.reference().as_ref(),
        );
        let origin = Origin::from_input(input);
        let samples = header::sample_names(source.header());

        let mut writer = TurtleWriter::new(out);
        writer.write_prefixes(&namespaces)?;
        writer.write_block(origin.statements(&self.config)?)?;
        for (n, item) in header::header_items(source.header()).iter().enumerate() {
            writer.write_block(item.statements(n, origin.node()))?;
        }
        writer.write_block(header::sample_statements(&samples, origin.node()))?;

        let output = SharedOutput::new(writer);
        let mapper = Mapper::from_config(&self.config, origin.node().clone(), samples);
        let dispatcher = Dispatcher::new(self.config.threads(), self.config.jobs_per_thread())?;

        let summary = dispatcher.run(&mut source, |record| match mapper.map(record)? {
            Mapped::Call(call) => {
                output.emit(call.statements(&namespaces))?;
                Ok(Outcome::Emitted)
            }
            Mapped::Skipped(reason) => Ok(Outcome::Skipped(reason)),
        })?;
        output.into_inner()?.flush()?;

        summary.skips().display();
        info!(
            "Converted {} of {} records from {}.",
            summary.emitted(),
            summary.records(),
            origin.path().display()
        );

        Ok(summary)
    }
}
