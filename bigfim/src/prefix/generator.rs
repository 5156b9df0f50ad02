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

use tracing::debug;
use tracing::info;

use crate::error::Error;
use crate::itemset::ItemId;
use crate::itemset::parse_ids;
use crate::prefix::Item;
use crate::prefix::LatticeSearch;
use crate::prefix::SetReporter;
use crate::prefix::SingletonOrderIndex;

/// Grows fixed-length seeds from the prefix items assigned to one task.
///
/// The singletons and their order are broadcast inputs: they are loaded once, sorted by rank,
/// and never modified afterwards.
#[derive(Debug, Clone)]
pub struct PrefixSeedGenerator {
    singletons: Vec<Item>,
    order: SingletonOrderIndex,
    min_sup: usize,
    prefix_length: usize,
}

impl PrefixSeedGenerator {
    /// Creates a generator, sorting `singletons` by their rank in `order`.
    ///
    /// Fails if a singleton has no rank.
    pub fn new(
        mut singletons: Vec<Item>,
        order: SingletonOrderIndex,
        min_sup: usize,
        prefix_length: usize,
    ) -> Result<Self, Error> {
        if prefix_length == 0 {
            return Err(Error::invalid_argument("prefix_length must be positive"));
        }
        if let Some(unranked) = singletons.iter().find(|item| order.rank(item.id()).is_none()) {
            return Err(Error::deserial("singleton missing from order")
                .with_context("item", unranked.id()));
        }
        // stable, every key is present
        singletons.sort_by_key(|item| order.rank(item.id()).unwrap_or(usize::MAX));
        info!(
            num_singletons = singletons.len(),
            num_ordered = order.len(),
            min_sup,
            prefix_length,
            "loaded singletons and order"
        );
        Ok(Self {
            singletons,
            order,
            min_sup,
            prefix_length,
        })
    }

    /// Returns the singletons in rank order.
    pub fn singletons(&self) -> &[Item] {
        &self.singletons
    }

    /// Returns the order index.
    pub fn order(&self) -> &SingletonOrderIndex {
        &self.order
    }

    /// Returns the minimum support.
    pub fn min_sup(&self) -> usize {
        self.min_sup
    }

    /// Returns the seed size.
    pub fn prefix_length(&self) -> usize {
        self.prefix_length
    }

    /// Resolves `id` to its singleton through the order.
    ///
    /// An id without rank is malformed input. A rank that points at a different item means the
    /// order and the singletons disagree; that is reported as [`ErrorKind::InvariantViolated`]
    /// and must abort the task.
    ///
    /// [`ErrorKind::InvariantViolated`]: crate::error::ErrorKind::InvariantViolated
    pub fn resolve(&self, id: ItemId) -> Result<&Item, Error> {
        let rank = self
            .order
            .rank(id)
            .ok_or_else(|| Error::deserial("prefix item has no rank").with_context("item", id))?;
        let item = self.singletons.get(rank).ok_or_else(|| {
            Error::invariant("rank outside the singleton list")
                .with_context("item", id)
                .with_context("rank", rank)
        })?;
        if item.id() != id {
            return Err(Error::invariant("resolved singleton does not match prefix item")
                .with_context("item", id)
                .with_context("resolved", item.id())
                .with_context("rank", rank));
        }
        Ok(item)
    }

    /// Grows seeds from every item of an assigned prefix sequence.
    ///
    /// Fails before resolving anything if `search` grows seeds of another length.
    pub fn process(
        &self,
        items: &[ItemId],
        search: &mut dyn LatticeSearch,
        reporter: &mut dyn SetReporter,
    ) -> Result<(), Error> {
        if search.prefix_length() != self.prefix_length {
            return Err(
                Error::invalid_argument("lattice search prefix length differs from generator")
                    .with_context("expected", self.prefix_length)
                    .with_context("actual", search.prefix_length()),
            );
        }
        for id in items {
            let item = self.resolve(*id)?;
            debug!(item = id, support = item.support(), "growing seeds");
            search.mine(item, &self.singletons, self.min_sup, reporter)?;
        }
        Ok(())
    }

    /// Parses an assignment line, `<key>\t<ids>`, and processes its ids.
    ///
    /// A line without a tab is read entirely as ids.
    pub fn process_line(
        &self,
        line: &str,
        search: &mut dyn LatticeSearch,
        reporter: &mut dyn SetReporter,
    ) -> Result<(), Error> {
        let ids = match line.split_once('\t') {
            Some((_, ids)) => ids,
            None => line,
        };
        let items = parse_ids(ids, 0)?;
        self.process(&items, search, reporter)
    }
}
