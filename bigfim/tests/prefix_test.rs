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

mod common;

use std::collections::BTreeSet;

use bigfim::error::Error;
use bigfim::error::ErrorKind;
use bigfim::itemset::ItemId;
use bigfim::itemset::Itemset;
use bigfim::prefix::DelimitedReporter;
use bigfim::prefix::EclatMiner;
use bigfim::prefix::Item;
use bigfim::prefix::LatticeSearch;
use bigfim::prefix::PrefixSeedGenerator;
use bigfim::prefix::RecordKind;
use bigfim::prefix::SeedRecord;
use bigfim::prefix::SetReporter;
use bigfim::prefix::SingletonOrderIndex;
use bigfim::prefix::intersect;
use common::brute_force_tids;
use common::combinations;
use common::frequent_singletons;
use common::random_database;
use googletest::prelude::*;

fn item(id: ItemId, tids: &[u32]) -> Item {
    Item::new(id, tids.to_vec()).unwrap()
}

fn small_generator(prefix_length: usize) -> PrefixSeedGenerator {
    let singletons = vec![item(1, &[0, 1, 2]), item(2, &[0, 1]), item(3, &[0, 2])];
    let order = SingletonOrderIndex::parse("2 3 1").unwrap();
    PrefixSeedGenerator::new(singletons, order, 2, prefix_length).unwrap()
}

#[test]
fn test_singletons_are_sorted_by_rank() {
    let generator = small_generator(2);
    let ids: Vec<ItemId> = generator.singletons().iter().map(Item::id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
    assert_eq!(generator.resolve(3).unwrap().tids(), &[0, 2]);
}

#[test]
fn test_seeds_of_length_two() {
    let generator = small_generator(2);
    let mut miner = EclatMiner::new(2);
    let mut records: Vec<SeedRecord> = vec![];
    generator
        .process_line("task-0\t2 3 1", &mut miner, &mut records)
        .unwrap();

    // {2,3} has support 1, {3,1} and {2,1} have support 2
    assert_eq!(
        records,
        vec![
            SeedRecord {
                kind: RecordKind::Fis,
                itemset: vec![2, 1],
                tids: vec![0, 1],
            },
            SeedRecord {
                kind: RecordKind::Fis,
                itemset: vec![3, 1],
                tids: vec![0, 2],
            },
        ]
    );
}

#[test]
fn test_prefix_length_one_reports_singletons() {
    let generator = small_generator(1);
    let mut miner = EclatMiner::new(1);
    let mut out = DelimitedReporter::new(Vec::new());
    generator.process(&[1, 3], &mut miner, &mut out).unwrap();
    assert_eq!(out.num_records(), 2);

    let text = String::from_utf8(out.into_inner().unwrap()).unwrap();
    insta::assert_snapshot!(text.trim_end(), @r"
    singleton$1$0 1 2
    singleton$3$0 2
    ");
}

#[test]
fn test_line_without_key_is_read_as_ids() {
    let generator = small_generator(2);
    let mut miner = EclatMiner::new(2);
    let mut records: Vec<SeedRecord> = vec![];
    generator.process_line("3", &mut miner, &mut records).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].itemset, vec![3, 1]);
}

#[test]
fn test_unknown_prefix_item() {
    let generator = small_generator(2);
    let mut miner = EclatMiner::new(2);
    let mut records: Vec<SeedRecord> = vec![];
    let err = generator
        .process(&[42], &mut miner, &mut records)
        .unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvalidData));
    assert_that!(err.context("item"), eq(Some("42")));
    assert!(records.is_empty());
}

#[test]
fn test_order_disagreeing_with_singletons_is_fatal() {
    // item 5 is ranked but has no singleton, shifting every later rank
    let singletons = vec![item(1, &[0, 1]), item(2, &[0, 1])];
    let order = SingletonOrderIndex::parse("1 5 2").unwrap();
    let generator = PrefixSeedGenerator::new(singletons, order, 1, 2).unwrap();

    let err = generator.resolve(5).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvariantViolated));
    assert_that!(err.context("resolved"), eq(Some("2")));

    let err = generator.resolve(2).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvariantViolated));
    assert_that!(err.message(), contains_substring("rank outside"));

    let mut miner = EclatMiner::new(2);
    let mut records: Vec<SeedRecord> = vec![];
    let err = generator
        .process(&[1, 5], &mut miner, &mut records)
        .unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvariantViolated));
}

#[test]
fn test_unranked_singleton_is_rejected() {
    let singletons = vec![item(1, &[0]), item(9, &[0])];
    let order = SingletonOrderIndex::parse("1").unwrap();
    let err = PrefixSeedGenerator::new(singletons, order, 1, 2).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvalidData));
    assert_that!(err.context("item"), eq(Some("9")));
}

#[test]
fn test_order_parsing() {
    let order = SingletonOrderIndex::read("4 0 7\nignored\n".as_bytes()).unwrap();
    assert_eq!(order.ids(), &[4, 0, 7]);
    assert_eq!(order.rank(7), Some(2));
    assert_eq!(order.rank(1), None);
    assert_eq!(order.to_line(), "4 0 7");

    let err = SingletonOrderIndex::parse("1 2 1").unwrap_err();
    assert_that!(err.message(), contains_substring("ranked twice"));

    let err = SingletonOrderIndex::read("".as_bytes()).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvalidData));
}

#[test]
fn test_order_by_support_breaks_ties_by_id() {
    let items = vec![item(8, &[0, 1]), item(3, &[0, 1, 2]), item(5, &[1, 2])];
    let order = SingletonOrderIndex::by_support(&items).unwrap();
    assert_eq!(order.ids(), &[5, 8, 3]);
}

#[test]
fn test_seed_record_text_form() {
    let record = SeedRecord::parse("prefix$4 2$1 5 9").unwrap();
    assert_eq!(record.kind, RecordKind::Prefix);
    assert_eq!(record.itemset, vec![4, 2]);
    assert_eq!(record.support(), 3);
    assert_eq!(record.to_string(), "prefix$4 2$1 5 9");

    let err = SeedRecord::parse("fis$1 2").unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvalidData));
    let err = SeedRecord::parse("bogus$1$2").unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvalidData));
}

struct RecordingSearch {
    starts: Vec<ItemId>,
}

impl LatticeSearch for RecordingSearch {
    fn prefix_length(&self) -> usize {
        3
    }

    fn mine(
        &mut self,
        start: &Item,
        singletons: &[Item],
        min_sup: usize,
        _reporter: &mut dyn SetReporter,
    ) -> std::result::Result<(), Error> {
        assert_eq!(min_sup, 2);
        assert_eq!(singletons.len(), 3);
        self.starts.push(start.id());
        Ok(())
    }
}

#[test]
fn test_every_assigned_item_starts_a_search() {
    let generator = small_generator(3);
    let mut search = RecordingSearch { starts: vec![] };
    let mut records: Vec<SeedRecord> = vec![];
    generator
        .process(&[1, 2, 1], &mut search, &mut records)
        .unwrap();
    assert_eq!(search.starts, vec![1, 2, 1]);
}

#[test]
fn test_search_of_another_length_is_rejected() {
    let generator = small_generator(2);
    let mut miner = EclatMiner::new(3);
    let mut records: Vec<SeedRecord> = vec![];
    let err = generator
        .process_line("2 3 1", &mut miner, &mut records)
        .unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvalidArgument));
    assert_that!(err.context("expected"), eq(Some("2")));
    assert_that!(err.context("actual"), eq(Some("3")));
    assert!(records.is_empty());
}

#[test]
fn test_seeds_are_canonical_and_complete() {
    let num_items = 10;
    let database = random_database(41, 120, num_items, 0.45);
    let min_sup = 20;
    let singletons = frequent_singletons(&database, num_items, min_sup);
    let order = SingletonOrderIndex::by_support(&singletons).unwrap();
    let frequent_ids: Itemset = singletons.iter().map(Item::id).collect();

    for prefix_length in [2, 3] {
        // three tasks share the singletons and each receive every third ranked item
        let mut seeds: Vec<SeedRecord> = vec![];
        for task in 0..3 {
            let generator = PrefixSeedGenerator::new(
                singletons.clone(),
                order.clone(),
                min_sup,
                prefix_length,
            )
            .unwrap();
            let assigned: Vec<ItemId> =
                order.ids().iter().copied().skip(task).step_by(3).collect();
            let mut miner = EclatMiner::new(prefix_length);
            generator
                .process(&assigned, &mut miner, &mut seeds)
                .unwrap();
        }

        let mut seen = BTreeSet::new();
        for seed in &seeds {
            assert_eq!(seed.itemset.len(), prefix_length);
            let ranks: Vec<usize> =
                seed.itemset.iter().map(|id| order.rank(*id).unwrap()).collect();
            assert!(ranks.windows(2).all(|w| w[0] < w[1]), "{seed}");

            let mut sorted = seed.itemset.clone();
            sorted.sort_unstable();
            assert_eq!(seed.tids, brute_force_tids(&database, &sorted));
            assert!(seen.insert(sorted), "duplicate seed {seed}");

            let last = *seed.itemset.last().unwrap();
            let extendable = order.ids()[order.rank(last).unwrap() + 1..]
                .iter()
                .map(|id| &singletons[singletons.iter().position(|s| s.id() == *id).unwrap()])
                .any(|ext| intersect(&seed.tids, ext.tids()).len() >= min_sup);
            let expected = if extendable {
                RecordKind::Prefix
            } else {
                RecordKind::Fis
            };
            assert_eq!(seed.kind, expected, "{seed}");
        }

        let expected: BTreeSet<Itemset> = combinations(&frequent_ids, prefix_length)
            .into_iter()
            .filter(|itemset| brute_force_tids(&database, itemset).len() >= min_sup)
            .collect();
        assert_eq!(seen, expected, "prefix_length = {prefix_length}");
    }
}

#[test]
fn test_infrequent_start_reports_nothing() {
    let singletons = vec![item(1, &[0]), item(2, &[0, 1, 2])];
    let order = SingletonOrderIndex::by_support(&singletons).unwrap();
    let generator = PrefixSeedGenerator::new(singletons, order, 2, 1).unwrap();
    let mut miner = EclatMiner::new(1);
    let mut records: Vec<SeedRecord> = vec![];
    generator.process(&[1, 2], &mut miner, &mut records).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, RecordKind::Singleton);
    assert_eq!(records[0].itemset, vec![2]);
}
