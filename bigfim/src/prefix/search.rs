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

//! Lattice search growing seeds from a start item.

use crate::error::Error;
use crate::itemset::ItemId;
use crate::itemset::Tid;
use crate::prefix::Item;
use crate::prefix::RecordKind;
use crate::prefix::SetReporter;

/// Depth-first search over the itemset lattice.
///
/// Implementations must extend an itemset only with singletons that come later in `singletons`
/// and must compute supports by tid-list intersection. Under that rule each itemset is reached
/// through exactly one path, so distinct start items never report the same itemset.
pub trait LatticeSearch {
    /// Returns the size of the itemsets this search reports.
    fn prefix_length(&self) -> usize;

    /// Reports the itemsets grown from `start`.
    ///
    /// `singletons` is the full singleton list in rank order and contains `start`.
    fn mine(
        &mut self,
        start: &Item,
        singletons: &[Item],
        min_sup: usize,
        reporter: &mut dyn SetReporter,
    ) -> Result<(), Error>;
}

/// Eclat search bounded to itemsets of exactly `prefix_length` items.
///
/// * With a prefix length of one, the start item is reported as [`RecordKind::Singleton`].
/// * A full-length itemset that still has a frequent extension is reported as
///   [`RecordKind::Prefix`]; downstream search grows it further.
/// * A full-length itemset without any frequent extension is final and reported as
///   [`RecordKind::Fis`].
#[derive(Debug, Clone)]
pub struct EclatMiner {
    prefix_length: usize,
}

impl EclatMiner {
    /// Creates a miner for seeds of `prefix_length` items.
    ///
    /// # Panics
    ///
    /// Panics if `prefix_length` is zero.
    pub fn new(prefix_length: usize) -> Self {
        assert!(prefix_length > 0, "prefix_length must be positive");
        Self { prefix_length }
    }

    fn grow(
        &self,
        itemset: &mut Vec<ItemId>,
        tids: &[Tid],
        extensions: &[Item],
        min_sup: usize,
        reporter: &mut dyn SetReporter,
    ) -> Result<(), Error> {
        for (i, extension) in extensions.iter().enumerate() {
            let joined = intersect(tids, extension.tids());
            if joined.len() < min_sup {
                continue;
            }
            let rest = &extensions[i + 1..];
            itemset.push(extension.id());
            if itemset.len() == self.prefix_length {
                let kind = if has_frequent_extension(&joined, rest, min_sup) {
                    RecordKind::Prefix
                } else {
                    RecordKind::Fis
                };
                reporter.report(itemset, &joined, kind)?;
            } else {
                self.grow(itemset, &joined, rest, min_sup, reporter)?;
            }
            itemset.pop();
        }
        Ok(())
    }
}

impl LatticeSearch for EclatMiner {
    fn prefix_length(&self) -> usize {
        self.prefix_length
    }

    fn mine(
        &mut self,
        start: &Item,
        singletons: &[Item],
        min_sup: usize,
        reporter: &mut dyn SetReporter,
    ) -> Result<(), Error> {
        if start.support() < min_sup {
            return Ok(());
        }
        if self.prefix_length == 1 {
            return reporter.report(&[start.id()], start.tids(), RecordKind::Singleton);
        }
        let rank = singletons
            .iter()
            .position(|item| item.id() == start.id())
            .ok_or_else(|| {
                Error::invalid_argument("start item is not in the singleton list")
                    .with_context("item", start.id())
            })?;
        let mut itemset = Vec::with_capacity(self.prefix_length);
        itemset.push(start.id());
        self.grow(
            &mut itemset,
            start.tids(),
            &singletons[rank + 1..],
            min_sup,
            reporter,
        )
    }
}

fn has_frequent_extension(tids: &[Tid], extensions: &[Item], min_sup: usize) -> bool {
    extensions
        .iter()
        .any(|extension| intersection_len(tids, extension.tids()) >= min_sup)
}

/// Intersects two ascending tid lists.
pub fn intersect(a: &[Tid], b: &[Tid]) -> Vec<Tid> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    for_each_common(a, b, |tid| out.push(tid));
    out
}

fn intersection_len(a: &[Tid], b: &[Tid]) -> usize {
    let mut n = 0;
    for_each_common(a, b, |_| n += 1);
    n
}

fn for_each_common<F: FnMut(Tid)>(a: &[Tid], b: &[Tid], mut on_common: F) {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                on_common(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
}
