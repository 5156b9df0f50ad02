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

//! Itemsets and the line formats they travel in.

use std::collections::BTreeSet;
use std::io::BufRead;

use crate::error::Error;

/// Item identifier.
pub type ItemId = u32;

/// Transaction identifier.
pub type Tid = u32;

/// An itemset as strictly ascending item ids.
pub type Itemset = Vec<ItemId>;

/// Renders an itemset as space-delimited ids, without a trailing separator.
pub fn format_itemset(items: &[ItemId]) -> String {
    join(items)
}

/// Renders transaction ids as a space-delimited list.
pub fn format_tids(tids: &[Tid]) -> String {
    join(tids)
}

fn join(values: &[u32]) -> String {
    let mut out = String::with_capacity(values.len() * 4);
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&value.to_string());
    }
    out
}

/// Parses whitespace-delimited ids.
///
/// Tokens must be unsigned integers; `line_no` is attached to the error for diagnostics.
pub fn parse_ids(line: &str, line_no: usize) -> Result<Vec<ItemId>, Error> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<ItemId>().map_err(|_| {
                Error::deserial(format!("not an item id: {token:?}")).with_context("line", line_no)
            })
        })
        .collect()
}

/// Reads itemsets, one per line, from a candidate or frequent-itemset file.
///
/// Blank lines are skipped. Each itemset is returned sorted and duplicate-free. Every itemset in
/// the file must have the same length.
pub fn read_itemsets<R: BufRead>(reader: R) -> Result<Vec<Itemset>, Error> {
    let mut itemsets = Vec::new();
    let mut expected_len = None;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let itemset = canonicalize(parse_ids(&line, line_no + 1)?);
        match expected_len {
            None => expected_len = Some(itemset.len()),
            Some(len) if len != itemset.len() => {
                return Err(Error::deserial(format!(
                    "itemset length {} differs from {len}",
                    itemset.len()
                ))
                .with_context("line", line_no + 1));
            }
            Some(_) => {}
        }
        itemsets.push(itemset);
    }
    Ok(itemsets)
}

/// Turns a raw transaction line into a sorted, duplicate-free item list.
///
/// When `keep` is given, items outside of it are dropped; counting tasks pass the items that occur
/// in any candidate, since no other item can contribute to a match.
pub fn parse_transaction(
    line: &str,
    keep: Option<&BTreeSet<ItemId>>,
) -> Result<Itemset, Error> {
    let mut items = parse_ids(line, 0)?;
    if let Some(keep) = keep {
        items.retain(|item| keep.contains(item));
    }
    Ok(canonicalize(items))
}

fn canonicalize(mut items: Vec<ItemId>) -> Itemset {
    items.sort_unstable();
    items.dedup();
    items
}
