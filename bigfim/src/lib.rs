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

//! Building blocks for distributed frequent itemset mining.
//!
//! The crate provides the per-task engines of a BigFIM / Dist-Eclat style job:
//!
//! * [`count`]: support counting of candidate itemsets with a prefix trie, buffering tid lists
//!   and emitting them in bounded-size flushes.
//! * [`prefix`]: canonical-order seed generation, growing fixed-length prefixes from frequent
//!   singletons for downstream lattice search.
//!
//! Scheduling tasks, distributing their read-only inputs and merging their outputs is left to
//! the hosting framework. Every engine here is single-threaded, owns all of its mutable state,
//! and can be restarted from scratch on the same inputs.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod codec;
pub mod config;
pub mod count;
pub mod error;
pub mod itemset;
pub mod prefix;
