// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::Result;
use regex::Regex;

use crate::errors::Error;

/// Orientation and mate locus of a breakend, decoded from its ALT allele.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakendProperties {
    /// The joined sequence is reverse complemented.
    pub is_reversed: bool,
    /// The joined sequence lies left of the reference base.
    pub is_left_of_ref: bool,
    pub chromosome: String,
    pub position: u64,
}

impl BreakendProperties {
    /// Parse one of the four bracket notations
    ///
    /// | ALT          | reversed | left of ref |
    /// |--------------|----------|-------------|
    /// | `]chr:pos]t` | false    | true        |
    /// | `[chr:pos[t` | true     | true        |
    /// | `t[chr:pos[` | false    | false       |
    /// | `t]chr:pos]` | true     | false       |
    ///
    /// Everything else, including mismatched brackets or a missing colon, is
    /// an `InvalidBNDRecordAlt` error.
    pub fn parse(alt: &str) -> Result<Self> {
        lazy_static! {
            static ref LEADING: Regex =
                Regex::new(r"^(?P<open>[\]\[])(?P<contig>[^\]\[]+):(?P<pos>[0-9]+)(?P<close>[\]\[])[^\]\[]+$")
                    .unwrap();
            static ref TRAILING: Regex =
                Regex::new(r"^[^\]\[]+(?P<open>[\]\[])(?P<contig>[^\]\[]+):(?P<pos>[0-9]+)(?P<close>[\]\[])$")
                    .unwrap();
        }

        let invalid = || Error::InvalidBNDRecordAlt {
            spec: alt.to_owned(),
        };

        let (caps, leading) = if let Some(caps) = LEADING.captures(alt) {
            (caps, true)
        } else if let Some(caps) = TRAILING.captures(alt) {
            (caps, false)
        } else {
            return Err(invalid().into());
        };

        let bracket = &caps["open"];
        if bracket != &caps["close"] {
            return Err(invalid().into());
        }
        let position: u64 = caps["pos"].parse().map_err(|_| invalid())?;

        let is_reversed = match (leading, bracket) {
            (true, "]") => false,
            (true, _) => true,
            (false, "[") => false,
            (false, _) => true,
        };

        Ok(BreakendProperties {
            is_reversed,
            is_left_of_ref: leading,
            chromosome: caps["contig"].to_owned(),
            position,
        })
    }
}
