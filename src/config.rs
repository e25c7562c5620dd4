// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_GRAPH_LOCATION: &str = "http://localhost:8890/";

/// Reference genome the coordinates of the input refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReferenceGenome {
    Grch37,
    Grch38,
    Other(String),
}

impl FromStr for ReferenceGenome {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "GRCh37" | "grch37" => ReferenceGenome::Grch37,
            "GRCh38" | "grch38" => ReferenceGenome::Grch38,
            other => ReferenceGenome::Other(other.to_owned()),
        })
    }
}

impl fmt::Display for ReferenceGenome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReferenceGenome::Grch37 => write!(f, "grch37"),
            ReferenceGenome::Grch38 => write!(f, "grch38"),
            ReferenceGenome::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Settings of one conversion run.
#[derive(Debug, Clone, Builder, Getters, CopyGetters, Serialize)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Config {
    /// Skip records carrying this FILTER value.
    #[builder(setter(into, strip_option), default)]
    #[getset(get = "pub")]
    filter: Option<String>,
    /// Skip records not carrying this FILTER value.
    #[builder(setter(into, strip_option), default)]
    #[getset(get = "pub")]
    keep: Option<String>,
    #[builder(setter(strip_option), default)]
    #[getset(get = "pub")]
    reference: Option<ReferenceGenome>,
    /// Name of the tool that produced the calls.
    #[builder(setter(into, strip_option), default)]
    #[getset(get = "pub")]
    caller: Option<String>,
    #[builder(default = "2")]
    #[getset(get_copy = "pub")]
    threads: usize,
    #[builder(default = "500")]
    #[getset(get_copy = "pub")]
    jobs_per_thread: usize,
    #[builder(setter(into), default = "DEFAULT_GRAPH_LOCATION.to_owned()")]
    #[getset(get = "pub")]
    graph_location: String,
}

impl ConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.threads == Some(0) {
            return Err("number of threads must be greater than zero".to_owned());
        }
        if self.jobs_per_thread == Some(0) {
            return Err("number of jobs per thread must be greater than zero".to_owned());
        }
        Ok(())
    }
}

impl Config {
    /// Warn about options whose absence leads to ambiguous output.
    pub fn check_completeness(&self) {
        if self.reference.is_none() {
            warn!(
                "No --reference has been specified. This may lead to incomplete and/or \
                 ambiguous information in the database."
            );
        }
        if self.caller.is_none() {
            warn!(
                "No --caller has been specified. This may lead to incomplete and/or \
                 ambiguous information in the database."
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigBuilder::default().build().unwrap();
        assert_eq!(config.threads(), 2);
        assert_eq!(config.jobs_per_thread(), 500);
        assert_eq!(config.graph_location(), DEFAULT_GRAPH_LOCATION);
        assert!(config.filter().is_none());
        assert!(config.reference().is_none());
    }

    #[test]
    fn test_invalid_threads() {
        assert!(ConfigBuilder::default().threads(0).build().is_err());
        assert!(ConfigBuilder::default().jobs_per_thread(0).build().is_err());
    }

    #[test]
    fn test_reference_genome_names() {
        let parse = |name: &str| name.parse::<ReferenceGenome>().unwrap();
        assert_eq!(parse("GRCh37"), ReferenceGenome::Grch37);
        assert_eq!(parse("grch38"), ReferenceGenome::Grch38);
        assert_eq!(parse("hg19"), ReferenceGenome::Other("hg19".to_owned()));
    }

    #[test]
    fn test_serialize_options() {
        let config = ConfigBuilder::default()
            .filter("LowQual")
            .reference(ReferenceGenome::Grch38)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"filter\":\"LowQual\""));
        assert!(json.contains("\"reference\":\"Grch38\""));
    }
}
