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

#![allow(dead_code)]

use std::collections::BTreeMap;

use bigfim::count::CandidateTrie;
use bigfim::count::SupportCounter;
use bigfim::count::TaskTid;
use bigfim::count::TidListRecord;
use bigfim::itemset::Itemset;
use bigfim::prefix::Item;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Generates sorted, duplicate-free transactions over items `0..num_items`.
pub fn random_database(
    seed: u64,
    num_transactions: usize,
    num_items: u32,
    density: f64,
) -> Vec<Itemset> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_transactions)
        .map(|_| {
            (0..num_items)
                .filter(|_| rng.random_bool(density))
                .collect()
        })
        .collect()
}

/// All `k`-subsets of `items`, in lexicographic order.
pub fn combinations(items: &[u32], k: usize) -> Vec<Itemset> {
    fn rec(items: &[u32], k: usize, current: &mut Vec<u32>, out: &mut Vec<Itemset>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in 0..items.len() {
            current.push(items[i]);
            rec(&items[i + 1..], k, current, out);
            current.pop();
        }
    }
    let mut out = vec![];
    rec(items, k, &mut vec![], &mut out);
    out
}

/// Ids of the transactions containing every item of `itemset`.
pub fn brute_force_tids(database: &[Itemset], itemset: &[u32]) -> Vec<u32> {
    database
        .iter()
        .enumerate()
        .filter(|(_, transaction)| itemset.iter().all(|item| transaction.contains(item)))
        .map(|(tid, _)| tid as u32)
        .collect()
}

/// Runs one counting task over `database`, returning every emitted record.
pub fn count_all(
    candidates: &[Itemset],
    database: &[Itemset],
    task_id: u32,
    tids_buffer_size: usize,
) -> Vec<TidListRecord> {
    let trie = CandidateTrie::from_candidates(candidates.to_vec()).unwrap();
    let mut counter = SupportCounter::new(trie, task_id)
        .with_tids_buffer_size(tids_buffer_size)
        .unwrap();
    let mut records: Vec<TidListRecord> = vec![];
    for transaction in database {
        counter.process(transaction, &mut records).unwrap();
    }
    counter.finish(&mut records).unwrap();
    records
}

/// Frequent singletons of `database` with their tid lists.
pub fn frequent_singletons(database: &[Itemset], num_items: u32, min_sup: usize) -> Vec<Item> {
    (0..num_items)
        .map(|id| Item::new(id, brute_force_tids(database, &[id])).unwrap())
        .filter(|item| item.support() >= min_sup)
        .collect()
}

/// Every candidate's non-empty tid list when `database` is counted as task `task_id`.
pub fn expected_tid_lists(
    candidates: &[Itemset],
    database: &[Itemset],
    task_id: u32,
) -> BTreeMap<Itemset, Vec<TaskTid>> {
    candidates
        .iter()
        .map(|candidate| {
            let tids = brute_force_tids(database, candidate)
                .into_iter()
                .map(|tid| (task_id, tid))
                .collect::<Vec<_>>();
            (candidate.clone(), tids)
        })
        .filter(|(_, tids)| !tids.is_empty())
        .collect()
}
