// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Batch-wise parallel processing of a record stream.
//!
//! The dispatcher owns `threads * jobs_per_thread` record slots. Once all of
//! them are filled, every thread gets a contiguous slice of `jobs_per_thread`
//! slots and all threads are joined before the slots are refilled. A partial
//! batch at the end of the stream is processed on the calling thread, in
//! input order.

use std::time::Duration;

use anyhow::Result;
use crossbeam::thread;
use progress_logger::ProgressLogger;

use crate::errors::Error;
use crate::record::{RecordSource, VariantRecord};
use crate::utils::SimpleCounter;
use crate::variants::SkipReason;

/// What happened to a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Emitted,
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Default, CopyGetters, Getters)]
pub struct Summary {
    #[getset(get_copy = "pub")]
    records: usize,
    #[getset(get_copy = "pub")]
    emitted: usize,
    #[getset(get = "pub")]
    skips: SimpleCounter<SkipReason>,
}

impl Summary {
    fn add(&mut self, outcome: Outcome) {
        self.records += 1;
        match outcome {
            Outcome::Emitted => self.emitted += 1,
            Outcome::Skipped(reason) => self.skips.incr(reason),
        }
    }

    fn merge(&mut self, other: Summary) {
        self.records += other.records;
        self.emitted += other.emitted;
        self.skips.merge(other.skips);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    threads: usize,
    jobs_per_thread: usize,
}

impl Dispatcher {
    pub fn new(threads: usize, jobs_per_thread: usize) -> Result<Self> {
        if threads == 0 || jobs_per_thread == 0 {
            return Err(Error::InvalidDispatchConfiguration.into());
        }
        Ok(Dispatcher {
            threads,
            jobs_per_thread,
        })
    }

    /// Number of records processed per batch.
    pub fn batch_size(&self) -> usize {
        self.threads * self.jobs_per_thread
    }

    /// Read all records of `source` and pass each of them to `handler`
    /// exactly once. Record indices are assigned in input order, starting
    /// at 0.
    pub fn run<S, F>(&self, source: &mut S, handler: F) -> Result<Summary>
    where
        S: RecordSource,
        F: Fn(&VariantRecord) -> Result<Outcome> + Sync,
    {
        let slots = self.batch_size();
        let mut buffer: Vec<VariantRecord> = Vec::new();
        buffer
            .try_reserve_exact(slots)
            .map_err(|_| Error::BufferAllocation { slots })?;
        buffer.resize_with(slots, VariantRecord::default);

        let mut summary = Summary::default();
        let mut progress_logger = ProgressLogger::builder()
            .with_items_name("records")
            .with_frequency(Duration::from_secs(20))
            .start();

        let mut filled = 0;
        let mut index = 0;
        loop {
            let slot = &mut buffer[filled];
            slot.index = index;
            match source.read(slot) {
                None => break,
                Some(result) => result?,
            }
            index += 1;
            filled += 1;

            if filled == slots {
                summary.merge(self.process_batch(&buffer, &handler)?);
                progress_logger.update(slots as u64);
                filled = 0;
            }
        }

        for record in &buffer[..filled] {
            summary.add(handler(record)?);
        }
        progress_logger.update(filled as u64);
        progress_logger.stop();

        Ok(summary)
    }

    fn process_batch<F>(&self, batch: &[VariantRecord], handler: &F) -> Result<Summary>
    where
        F: Fn(&VariantRecord) -> Result<Outcome> + Sync,
    {
        let results = thread::scope(|scope| {
            let workers: Vec<_> = batch
                .chunks(self.jobs_per_thread)
                .map(|slice| {
                    scope.spawn(move |_| -> Result<Summary> {
                        let mut summary = Summary::default();
                        for record in slice {
                            summary.add(handler(record)?);
                        }
                        Ok(summary)
                    })
                })
                .collect();
            workers
                .into_iter()
                .map(|worker| worker.join())
                .collect::<Vec<_>>()
        })
        .map_err(|_| Error::WorkerPanicked)?;

        let mut summary = Summary::default();
        for result in results {
            summary.merge(result.map_err(|_| Error::WorkerPanicked)??);
        }
        Ok(summary)
    }
}
