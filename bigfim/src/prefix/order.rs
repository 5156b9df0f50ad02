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

use std::collections::HashMap;
use std::io::BufRead;

use crate::error::Error;
use crate::itemset::ItemId;
use crate::itemset::format_itemset;
use crate::itemset::parse_ids;
use crate::prefix::Item;

/// Rank lookup over the global singleton order.
///
/// Ranks are dense in `[0, len)`. Lattice search only ever extends an itemset with items of
/// higher rank, which gives every itemset exactly one generating path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingletonOrderIndex {
    ids: Vec<ItemId>,
    ranks: HashMap<ItemId, usize>,
}

impl SingletonOrderIndex {
    /// Creates the index from ids listed in ascending rank order.
    pub fn from_ids<I>(ids: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = ItemId>,
    {
        let ids: Vec<ItemId> = ids.into_iter().collect();
        let mut ranks = HashMap::with_capacity(ids.len());
        for (rank, id) in ids.iter().enumerate() {
            if ranks.insert(*id, rank).is_some() {
                return Err(Error::deserial(format!("item {id} ranked twice")));
            }
        }
        Ok(Self { ids, ranks })
    }

    /// Computes the order by ascending support, ties broken by ascending id.
    pub fn by_support(items: &[Item]) -> Result<Self, Error> {
        let mut keyed: Vec<(usize, ItemId)> =
            items.iter().map(|item| (item.support(), item.id())).collect();
        keyed.sort_unstable();
        Self::from_ids(keyed.into_iter().map(|(_, id)| id))
    }

    /// Parses the single-line broadcast form: space-delimited ids in rank order.
    pub fn parse(line: &str) -> Result<Self, Error> {
        Self::from_ids(parse_ids(line.trim(), 1)?)
    }

    /// Reads the broadcast form from the first line of `reader`.
    pub fn read<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(Error::insufficient_data("singleton order"));
        }
        Self::parse(&line)
    }

    /// Returns the rank of `id`, if it is ordered.
    pub fn rank(&self, id: ItemId) -> Option<usize> {
        self.ranks.get(&id).copied()
    }

    /// Returns the ids in ascending rank order.
    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    /// Returns the number of ordered items.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no item is ordered.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Renders the broadcast form.
    pub fn to_line(&self) -> String {
        format_itemset(&self.ids)
    }
}
