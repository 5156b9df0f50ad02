// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Transaction scan driver for one counting task.

use std::collections::BTreeSet;

use tracing::debug;
use tracing::info;

use crate::count::CandidateTrie;
use crate::count::RecordSink;
use crate::count::TidListRecord;
use crate::error::Error;
use crate::itemset::ItemId;
use crate::itemset::Itemset;
use crate::itemset::Tid;
use crate::itemset::parse_transaction;

/// Number of buffered tids that triggers a flush.
pub const DEFAULT_TIDS_BUFFER_SIZE: usize = 1_000_000;

/// Produces the candidates of the next phase from the frequent itemsets of the previous one.
///
/// Candidate generation belongs to the upstream job; counting only consumes its output.
pub trait CandidateGenerator {
    /// Returns the length-`k + 1` candidates for length-`k` frequent itemsets.
    fn generate(&self, frequent: &[Itemset]) -> Result<Vec<Itemset>, Error>;
}

impl<F> CandidateGenerator for F
where
    F: Fn(&[Itemset]) -> Result<Vec<Itemset>, Error>,
{
    fn generate(&self, frequent: &[Itemset]) -> Result<Vec<Itemset>, Error> {
        self(frequent)
    }
}

/// Totals reported when a task finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountSummary {
    /// Transactions scanned, including those too short to match.
    pub num_transactions: u64,
    /// Records emitted across all flushes.
    pub num_records: u64,
    /// Flushes performed, including the final one.
    pub num_flushes: u64,
}

/// Counts candidate support over one partition of transactions.
///
/// Every scanned transaction gets the next transaction id, and that id is appended to each
/// candidate leaf it contains. Once the number of buffered tids reaches the buffer size, all
/// non-empty leaves are emitted and cleared, which bounds memory by the buffer size instead of
/// by the partition length. [`SupportCounter::finish`] emits whatever remains.
///
/// ```
/// # use bigfim::count::CandidateTrie;
/// # use bigfim::count::SupportCounter;
/// # use bigfim::count::TidListRecord;
/// let trie = CandidateTrie::from_candidates(vec![vec![1, 2], vec![2, 3]]).unwrap();
/// let mut counter = SupportCounter::new(trie, 0);
/// let mut records: Vec<TidListRecord> = vec![];
/// counter.process(&[1, 2, 3], &mut records).unwrap();
/// counter.process(&[2, 3], &mut records).unwrap();
/// counter.finish(&mut records).unwrap();
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].itemset(), &[2, 3]);
/// assert_eq!(records[1].tids(), &[0, 1]);
/// ```
#[derive(Debug)]
pub struct SupportCounter {
    trie: CandidateTrie,
    singletons: Option<BTreeSet<ItemId>>,
    task_id: u32,
    tids_buffer_size: usize,
    tid_counter: usize,
    transaction_counter: u64,
    num_records: u64,
    num_flushes: u64,
}

impl SupportCounter {
    /// Creates a counter over `trie` for the task `task_id`.
    pub fn new(trie: CandidateTrie, task_id: u32) -> Self {
        let singletons = if trie.phase() == 1 {
            None
        } else {
            Some(trie.singletons())
        };
        info!(
            task_id,
            phase = trie.phase(),
            num_candidates = trie.num_candidates(),
            "initialized candidate trie"
        );
        Self {
            trie,
            singletons,
            task_id,
            tids_buffer_size: DEFAULT_TIDS_BUFFER_SIZE,
            tid_counter: 0,
            transaction_counter: 0,
            num_records: 0,
            num_flushes: 0,
        }
    }

    /// Creates a counter for the phase following `frequent`.
    ///
    /// The phase is one more than the length of the frequent itemsets; `generator` supplies the
    /// candidates, which must all have that length.
    pub fn from_frequent_itemsets(
        frequent: &[Itemset],
        generator: &dyn CandidateGenerator,
        task_id: u32,
    ) -> Result<Self, Error> {
        let k = frequent
            .first()
            .map(|itemset| itemset.len())
            .ok_or_else(|| Error::invalid_argument("no frequent itemsets to extend"))?;
        let phase = k + 1;
        let candidates = generator.generate(frequent)?;
        if candidates.is_empty() {
            return Err(Error::invalid_argument("candidate generator produced no candidates")
                .with_context("phase", phase));
        }
        let trie = CandidateTrie::from_candidates(candidates)?;
        if trie.phase() != phase {
            return Err(Error::invalid_argument(format!(
                "candidates have length {}, expected {phase}",
                trie.phase()
            )));
        }
        Ok(Self::new(trie, task_id))
    }

    /// Sets the number of buffered tids that triggers a flush.
    ///
    /// Fails if `tids_buffer_size` is zero.
    pub fn with_tids_buffer_size(mut self, tids_buffer_size: usize) -> Result<Self, Error> {
        if tids_buffer_size == 0 {
            return Err(Error::invalid_argument("tids_buffer_size must be positive")
                .with_context("task_id", self.task_id));
        }
        self.tids_buffer_size = tids_buffer_size;
        Ok(self)
    }

    /// Returns the candidate length being counted.
    pub fn phase(&self) -> usize {
        self.trie.phase()
    }

    /// Returns the task id embedded in every emitted record.
    pub fn task_id(&self) -> u32 {
        self.task_id
    }

    /// Returns the flush threshold.
    pub fn tids_buffer_size(&self) -> usize {
        self.tids_buffer_size
    }

    /// Returns the number of tids buffered since the last flush.
    pub fn tid_counter(&self) -> usize {
        self.tid_counter
    }

    /// Returns the number of transactions scanned so far.
    pub fn transaction_counter(&self) -> u64 {
        self.transaction_counter
    }

    /// Returns the candidate trie.
    pub fn trie(&self) -> &CandidateTrie {
        &self.trie
    }

    /// Returns the items transactions should be restricted to, or `None` in the first phase.
    pub fn singletons(&self) -> Option<&BTreeSet<ItemId>> {
        self.singletons.as_ref()
    }

    /// Parses a raw transaction line and processes it.
    pub fn process_line<S>(&mut self, line: &str, sink: &mut S) -> Result<(), Error>
    where
        S: RecordSink + ?Sized,
    {
        let items = parse_transaction(line, self.singletons.as_ref())?;
        self.process(&items, sink)
    }

    /// Processes one sorted, duplicate-free transaction.
    ///
    /// Flushes to `sink` when the buffer threshold is reached.
    pub fn process<S>(&mut self, items: &[ItemId], sink: &mut S) -> Result<(), Error>
    where
        S: RecordSink + ?Sized,
    {
        let tid = Tid::try_from(self.transaction_counter).map_err(|_| {
            Error::invalid_argument("transaction id space exhausted")
                .with_context("task_id", self.task_id)
        })?;
        self.tid_counter += self.trie.add_transaction(items, tid);
        self.transaction_counter += 1;

        if self.tid_counter >= self.tids_buffer_size {
            info!(
                task_id = self.task_id,
                buffered = self.tid_counter,
                "tids buffer reached, reporting partial tids"
            );
            self.flush(sink)?;
        }
        Ok(())
    }

    /// Emits every non-empty leaf and resets the buffer count.
    ///
    /// Returns the number of records emitted.
    pub fn flush<S>(&mut self, sink: &mut S) -> Result<usize, Error>
    where
        S: RecordSink + ?Sized,
    {
        let task_id = self.task_id;
        let emitted = self.trie.drain_leaves(|itemset, tids| {
            sink.emit(TidListRecord::new(itemset.to_vec(), task_id, tids.to_vec()))
        })?;
        self.tid_counter = 0;
        self.num_records += emitted as u64;
        self.num_flushes += 1;
        Ok(emitted)
    }

    /// Ends the task, emitting any tids still buffered.
    pub fn finish<S>(mut self, sink: &mut S) -> Result<CountSummary, Error>
    where
        S: RecordSink + ?Sized,
    {
        if self.tid_counter != 0 {
            let emitted = self.flush(sink)?;
            debug!(task_id = self.task_id, emitted, "final flush");
        }
        let summary = CountSummary {
            num_transactions: self.transaction_counter,
            num_records: self.num_records,
            num_flushes: self.num_flushes,
        };
        info!(
            task_id = self.task_id,
            num_transactions = summary.num_transactions,
            num_records = summary.num_records,
            num_flushes = summary.num_flushes,
            "counting task finished"
        );
        Ok(summary)
    }
}
