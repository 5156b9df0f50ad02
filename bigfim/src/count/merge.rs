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

use std::collections::BTreeMap;

use crate::count::TidListRecord;
use crate::itemset::Itemset;
use crate::itemset::Tid;

/// A transaction id qualified by the task that assigned it.
///
/// Every task numbers its partition from zero, so a bare tid only identifies a transaction
/// within one task.
pub type TaskTid = (u32, Tid);

/// Merges partial tid lists by itemset.
///
/// Records of one itemset may come from several flushes and several tasks in any order. Each tid
/// is qualified by its record's task id, then the merged lists are sorted by task and tid and
/// deduplicated, so the support of an itemset is the length of its list.
pub fn merge_tid_lists<I>(records: I) -> BTreeMap<Itemset, Vec<TaskTid>>
where
    I: IntoIterator<Item = TidListRecord>,
{
    let mut merged: BTreeMap<Itemset, Vec<TaskTid>> = BTreeMap::new();
    for record in records {
        let task_id = record.task_id();
        let (itemset, tids) = record.into_parts();
        merged
            .entry(itemset)
            .or_default()
            .extend(tids.into_iter().map(|tid| (task_id, tid)));
    }
    for tids in merged.values_mut() {
        tids.sort_unstable();
        tids.dedup();
    }
    merged
}

/// Drops itemsets whose merged support is below `min_sup`.
pub fn retain_frequent(merged: &mut BTreeMap<Itemset, Vec<TaskTid>>, min_sup: usize) {
    merged.retain(|_, tids| tids.len() >= min_sup);
}
