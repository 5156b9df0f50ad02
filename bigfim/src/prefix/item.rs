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

use crate::codec::TidListEntry;
use crate::codec::read_tid_lists;
use crate::error::Error;
use crate::itemset::ItemId;
use crate::itemset::Tid;

/// A frequent singleton with its tid list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    tids: Vec<Tid>,
}

impl Item {
    /// Creates an item from its ascending tid list.
    pub fn new(id: ItemId, tids: Vec<Tid>) -> Result<Self, Error> {
        if let Some(pos) = tids.windows(2).position(|w| w[0] >= w[1]) {
            return Err(Error::deserial("tid list is not strictly ascending")
                .with_context("item", id)
                .with_context("position", pos + 1));
        }
        Ok(Self { id, tids })
    }

    /// Returns the item id.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the support, i.e. the number of tids.
    pub fn support(&self) -> usize {
        self.tids.len()
    }

    /// Returns the ascending tid list.
    pub fn tids(&self) -> &[Tid] {
        &self.tids
    }
}

impl TryFrom<TidListEntry> for Item {
    type Error = Error;

    fn try_from(entry: TidListEntry) -> Result<Self, Error> {
        Item::new(entry.item, entry.tids)
    }
}

/// Loads singletons from a serialized tid-list store.
pub fn read_singletons(bytes: &[u8]) -> Result<Vec<Item>, Error> {
    read_tid_lists(bytes)?
        .into_iter()
        .map(Item::try_from)
        .collect()
}
