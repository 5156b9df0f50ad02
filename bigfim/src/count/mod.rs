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

//! Trie-based support counting with bounded-memory emission.
//!
//! # Overview
//!
//! A counting task receives the candidate itemsets of the current phase as a broadcast input and
//! one partition of the transaction database. It builds a [`CandidateTrie`] once, then streams
//! every transaction through it: the transaction id is appended to each candidate leaf the
//! transaction contains.
//!
//! Tids are buffered in the trie leaves. When the number of buffered tids reaches the
//! configured buffer size, every non-empty leaf is emitted as a [`TidListRecord`] and cleared.
//! Memory therefore stays bounded by the buffer size no matter how long the partition is. The
//! price is that a candidate's tid list may be split over several records, from several flushes
//! and several tasks; [`merge_tid_lists`] recombines them.
//!
//! # Phases
//!
//! In phase 1 every item is its own candidate and the trie grows one leaf per distinct item. In
//! later phases the trie is fixed; matching descends only along edges present in both the trie
//! and the transaction, so the work is bounded by the trie size and not by the number of
//! `phase`-subsets of the transaction.
//!
//! # Examples
//!
//! ```
//! # use bigfim::count::CandidateTrie;
//! # use bigfim::count::SupportCounter;
//! # use bigfim::count::TidListRecord;
//! # use bigfim::count::merge_tid_lists;
//! let trie = CandidateTrie::from_candidates(vec![vec![1, 2], vec![1, 3], vec![2, 3]]).unwrap();
//! let mut counter = SupportCounter::new(trie, 7).with_tids_buffer_size(2).unwrap();
//! let mut records: Vec<TidListRecord> = vec![];
//! let transactions: [&[u32]; 3] = [&[1, 2, 3], &[1, 2], &[2, 3]];
//! for transaction in transactions {
//!     counter.process(transaction, &mut records).unwrap();
//! }
//! counter.finish(&mut records).unwrap();
//!
//! let merged = merge_tid_lists(records);
//! assert_eq!(merged[&vec![1, 2]], vec![(7, 0), (7, 1)]);
//! assert_eq!(merged[&vec![1, 3]], vec![(7, 0)]);
//! assert_eq!(merged[&vec![2, 3]], vec![(7, 0), (7, 2)]);
//! ```

mod counter;
mod merge;
mod record;
mod trie;

pub use self::counter::CandidateGenerator;
pub use self::counter::CountSummary;
pub use self::counter::DEFAULT_TIDS_BUFFER_SIZE;
pub use self::counter::SupportCounter;
pub use self::merge::TaskTid;
pub use self::merge::merge_tid_lists;
pub use self::merge::retain_frequent;
pub use self::record::RecordSink;
pub use self::record::TextRecordWriter;
pub use self::record::TidListRecord;
pub use self::trie::CandidateTrie;
pub use self::trie::TrieNode;
