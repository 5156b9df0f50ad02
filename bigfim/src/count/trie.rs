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

//! Prefix tree over candidate itemsets.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::error::Error;
use crate::itemset::ItemId;
use crate::itemset::Itemset;
use crate::itemset::Tid;

/// A node of the candidate trie.
///
/// A node without children is a leaf and stands for the candidate spelled by the path from the
/// root to it. Only leaves ever hold tids.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    id: Option<ItemId>,
    children: BTreeMap<ItemId, TrieNode>,
    tids: Vec<Tid>,
}

impl TrieNode {
    fn new(id: ItemId) -> Self {
        Self {
            id: Some(id),
            children: BTreeMap::new(),
            tids: Vec::new(),
        }
    }

    /// Returns the item id of this node, or `None` for the root.
    pub fn id(&self) -> Option<ItemId> {
        self.id
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the tids buffered at this node since the last flush.
    pub fn tids(&self) -> &[Tid] {
        &self.tids
    }

    /// Returns the child for `id`, if any.
    pub fn child(&self, id: ItemId) -> Option<&TrieNode> {
        self.children.get(&id)
    }

    /// Iterates over children in ascending item order.
    pub fn children(&self) -> impl Iterator<Item = &TrieNode> {
        self.children.values()
    }

    fn child_or_insert(&mut self, id: ItemId) -> &mut TrieNode {
        self.children.entry(id).or_insert_with(|| TrieNode::new(id))
    }
}

/// Prefix tree holding the candidates counted by one task.
///
/// Candidates sharing a prefix share the nodes of that prefix. Matching a transaction walks only
/// the edges the transaction can follow, so the cost is bounded by the trie rather than by the
/// number of `phase`-subsets of the transaction.
#[derive(Debug, Clone)]
pub struct CandidateTrie {
    root: TrieNode,
    phase: usize,
    num_candidates: usize,
}

impl CandidateTrie {
    /// Creates the trie for the first phase, where every item is its own candidate.
    ///
    /// Leaves are created on demand as items are encountered.
    pub fn for_singletons() -> Self {
        Self {
            root: TrieNode::default(),
            phase: 1,
            num_candidates: 0,
        }
    }

    /// Builds a trie from candidate itemsets.
    ///
    /// Every candidate must be strictly ascending and all candidates must share one length, which
    /// becomes the phase of the trie. Duplicate candidates collapse into one path.
    pub fn from_candidates<I>(candidates: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Itemset>,
    {
        let mut root = TrieNode::default();
        let mut phase = None;
        let mut num_candidates = 0;
        for candidate in candidates {
            if candidate.is_empty() {
                return Err(Error::invalid_argument("empty candidate itemset"));
            }
            if candidate.windows(2).any(|w| w[0] >= w[1]) {
                return Err(Error::invalid_argument(format!(
                    "candidate is not strictly ascending: {candidate:?}"
                )));
            }
            match phase {
                None => phase = Some(candidate.len()),
                Some(len) if len != candidate.len() => {
                    return Err(Error::invalid_argument(format!(
                        "candidate length {} differs from phase {len}",
                        candidate.len()
                    )));
                }
                Some(_) => {}
            }

            let mut node = &mut root;
            let mut created = false;
            for item in candidate {
                created |= !node.children.contains_key(&item);
                node = node.child_or_insert(item);
            }
            if created {
                num_candidates += 1;
            }
        }

        let phase = phase.ok_or_else(|| Error::invalid_argument("empty candidate set"))?;
        Ok(Self {
            root,
            phase,
            num_candidates,
        })
    }

    /// Returns the candidate length this trie counts.
    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Returns the number of distinct candidates the trie was built from.
    ///
    /// In the first phase this is the number of distinct items seen so far.
    pub fn num_candidates(&self) -> usize {
        if self.phase == 1 {
            self.root.children.len()
        } else {
            self.num_candidates
        }
    }

    /// Returns the root node.
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Returns every item that occurs in some candidate.
    pub fn singletons(&self) -> BTreeSet<ItemId> {
        let mut items = BTreeSet::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            for (item, child) in node.children.iter() {
                items.insert(*item);
                stack.push(child);
            }
        }
        items
    }

    /// Returns the number of tids currently buffered across all leaves.
    pub fn num_buffered_tids(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            for child in node.children() {
                if child.is_leaf() {
                    total += child.tids.len();
                } else {
                    stack.push(child);
                }
            }
        }
        total
    }

    /// Records transaction `tid` at every candidate contained in `items`.
    ///
    /// `items` must be sorted and duplicate-free. Transactions shorter than the phase are
    /// skipped. Returns the number of tids appended.
    pub fn add_transaction(&mut self, items: &[ItemId], tid: Tid) -> usize {
        if items.len() < self.phase {
            return 0;
        }
        if self.phase == 1 {
            for item in items {
                self.root.child_or_insert(*item).tids.push(tid);
            }
            return items.len();
        }
        add_tid_recursive(&mut self.root, items, 0, tid)
    }

    /// Walks the trie depth-first and hands every non-empty leaf to `emit`.
    ///
    /// `emit` receives the root-to-leaf itemset and the leaf's tids. A leaf is cleared only once
    /// `emit` accepted it, so a failed emission leaves that leaf and every later one buffered.
    /// Leaves stay in place for later transactions. Returns the number of leaves emitted.
    pub fn drain_leaves<F>(&mut self, mut emit: F) -> Result<usize, Error>
    where
        F: FnMut(&[ItemId], &[Tid]) -> Result<(), Error>,
    {
        let mut path = Vec::with_capacity(self.phase);
        drain_recursive(&mut self.root, &mut path, &mut emit)
    }
}

fn add_tid_recursive(node: &mut TrieNode, items: &[ItemId], start: usize, tid: Tid) -> usize {
    let mut added = 0;
    for i in start..items.len() {
        if let Some(child) = node.children.get_mut(&items[i]) {
            if child.is_leaf() {
                child.tids.push(tid);
                added += 1;
            } else {
                added += add_tid_recursive(child, items, i + 1, tid);
            }
        }
    }
    added
}

fn drain_recursive<F>(
    node: &mut TrieNode,
    path: &mut Vec<ItemId>,
    emit: &mut F,
) -> Result<usize, Error>
where
    F: FnMut(&[ItemId], &[Tid]) -> Result<(), Error>,
{
    let mut emitted = 0;
    for (item, child) in node.children.iter_mut() {
        path.push(*item);
        if child.is_leaf() {
            if !child.tids.is_empty() {
                emit(path, &child.tids)?;
                // release the buffer rather than keep its peak capacity
                child.tids = Vec::new();
                emitted += 1;
            }
        } else {
            emitted += drain_recursive(child, path, emit)?;
        }
        path.pop();
    }
    Ok(emitted)
}
