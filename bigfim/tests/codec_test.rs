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

use bigfim::codec::FAMILY_ID;
use bigfim::codec::SER_VER;
use bigfim::codec::TidListStoreWriter;
use bigfim::codec::read_tid_lists;
use bigfim::count::CandidateTrie;
use bigfim::count::SupportCounter;
use bigfim::count::TidListRecord;
use bigfim::count::merge_tid_lists;
use bigfim::error::ErrorKind;
use bigfim::prefix::read_singletons;
use common::random_database;
use googletest::prelude::*;

fn sample_store() -> Vec<u8> {
    let mut writer = TidListStoreWriter::new();
    writer.append(3, &[0, 2, 5]).unwrap();
    writer.append(11, &[1]).unwrap();
    assert_eq!(writer.num_records(), 2);
    writer.finish()
}

#[test]
fn test_store_layout() {
    let bytes = sample_store();
    assert_eq!(&bytes[..8], &[1, SER_VER, FAMILY_ID, 0, 2, 0, 0, 0]);
    // key "3"
    assert_eq!(&bytes[8..13], &[1, 0, 0, 0, b'3']);
}

#[test]
fn test_empty_store() {
    let bytes = TidListStoreWriter::new().finish();
    assert_eq!(bytes, vec![1, SER_VER, FAMILY_ID, 1, 0, 0, 0, 0]);
    assert!(read_tid_lists(&bytes).unwrap().is_empty());
}

#[test]
fn test_write_to_matches_finish() {
    let mut writer = TidListStoreWriter::new();
    writer.append(3, &[0, 2, 5]).unwrap();
    writer.append(11, &[1]).unwrap();
    let mut out = vec![];
    writer.write_to(&mut out).unwrap();
    assert_eq!(out, sample_store());
}

#[test]
fn test_singletons_from_counting_output() {
    let database = random_database(7, 80, 6, 0.5);
    let mut counter = SupportCounter::new(CandidateTrie::for_singletons(), 0);
    let mut records: Vec<TidListRecord> = vec![];
    for transaction in &database {
        counter.process(transaction, &mut records).unwrap();
    }
    counter.finish(&mut records).unwrap();
    let merged = merge_tid_lists(records);

    let mut writer = TidListStoreWriter::new();
    for (itemset, tids) in &merged {
        let local: Vec<u32> = tids.iter().map(|(_, tid)| *tid).collect();
        writer.append(itemset[0], &local).unwrap();
    }
    let singletons = read_singletons(&writer.finish()).unwrap();
    assert_eq!(singletons.len(), merged.len());
    for (item, (itemset, tids)) in singletons.iter().zip(&merged) {
        assert_eq!(item.id(), itemset[0]);
        assert!(item.tids().iter().eq(tids.iter().map(|(_, tid)| tid)));
    }
}

#[test]
fn test_truncated_store() {
    let bytes = sample_store();
    for len in [0, 3, 7, 10, bytes.len() - 1] {
        let err = read_tid_lists(&bytes[..len]).unwrap_err();
        assert_that!(err.kind(), eq(ErrorKind::InvalidData));
        assert_that!(err.message(), contains_substring("insufficient data"));
    }
}

#[test]
fn test_preamble_checks() {
    let mut bytes = sample_store();
    bytes[2] = FAMILY_ID + 1;
    let err = read_tid_lists(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("invalid family"));

    let mut bytes = sample_store();
    bytes[1] = SER_VER + 1;
    let err = read_tid_lists(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("unsupported serial version"));

    let mut bytes = sample_store();
    bytes[0] = 2;
    let err = read_tid_lists(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("invalid preamble longs"));

    let mut bytes = sample_store();
    bytes[3] = 1;
    let err = read_tid_lists(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("empty flag"));
}

#[test]
fn test_rejects_non_numeric_key() {
    let mut bytes = vec![1, SER_VER, FAMILY_ID, 0, 1, 0, 0, 0];
    bytes.extend_from_slice(&[1, 0, 0, 0, b'x', 0, 0, 0, 0]);
    let err = read_tid_lists(&bytes).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvalidData));
    assert_that!(err.context("record"), eq(Some("0")));
}

#[test]
fn test_huge_length_fails_before_allocating() {
    let mut bytes = vec![1, SER_VER, FAMILY_ID, 0, 1, 0, 0, 0];
    bytes.extend_from_slice(&u32::MAX.to_le_bytes());
    let err = read_tid_lists(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("insufficient data: key"));
}

#[test]
fn test_unordered_tids_are_not_singletons() {
    let mut writer = TidListStoreWriter::new();
    writer.append(4, &[3, 1]).unwrap();
    let bytes = writer.finish();
    assert_eq!(read_tid_lists(&bytes).unwrap()[0].tids, vec![3, 1]);

    let err = read_singletons(&bytes).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvalidData));
    assert_that!(err.context("item"), eq(Some("4")));
}
