// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::ops::Deref;
use std::path::Path;

use anyhow::Result;
use itertools::Itertools;

use crate::errors::Error;

/// File name endings of the input formats htslib is asked to decode.
pub const SUPPORTED_INPUT_EXTENSIONS: [&str; 4] = [".vcf", ".vcf.gz", ".bcf", ".bcf.gz"];

/// Ensure that `path` names a VCF or BCF file, compressed or not.
pub fn check_input_format(path: &Path) -> Result<()> {
    let name = path.to_string_lossy();
    if SUPPORTED_INPUT_EXTENSIONS
        .iter()
        .any(|extension| name.ends_with(extension))
    {
        Ok(())
    } else {
        Err(Error::UnsupportedInputFormat {
            path: path.to_owned(),
        }
        .into())
    }
}

#[derive(CopyGetters, Debug, Clone)]
pub struct SimpleCounter<T>
where
    T: Eq + Hash,
{
    inner: HashMap<T, usize>,
    #[getset(get_copy = "pub")]
    total_count: usize,
}

impl<T> SimpleCounter<T>
where
    T: Eq + Hash,
{
    pub fn incr(&mut self, event: T) {
        self.total_count += 1;
        *self.inner.entry(event).or_insert(0) += 1;
    }

    /// Add all counts of `other` to this counter.
    pub fn merge(&mut self, other: SimpleCounter<T>) {
        self.total_count += other.total_count;
        for (event, count) in other.inner {
            *self.inner.entry(event).or_insert(0) += count;
        }
    }

    pub fn count(&self, event: &T) -> usize {
        self.inner.get(event).copied().unwrap_or(0)
    }
}

impl<T> SimpleCounter<T>
where
    T: Eq + Hash + Display,
{
    /// Log one line per event, most frequent first.
    pub fn display(&self) {
        for (event, count) in self
            .inner
            .iter()
            .sorted_by(|(a, n), (b, m)| m.cmp(n).then_with(|| a.to_string().cmp(&b.to_string())))
        {
            info!("Skipped {} {}.", count, event);
        }
    }
}

impl<T> Default for SimpleCounter<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        SimpleCounter {
            inner: HashMap::new(),
            total_count: 0,
        }
    }
}

impl<T> Deref for SimpleCounter<T>
where
    T: Eq + Hash,
{
    type Target = HashMap<T, usize>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
