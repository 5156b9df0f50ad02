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

//! Order-canonical prefix seeding.
//!
//! # Overview
//!
//! Distributed lattice search splits the itemset lattice by prefix. Every task receives the
//! frequent singletons with their tid lists, a global [`SingletonOrderIndex`] over them, and a
//! batch of prefix items. For each prefix item, [`PrefixSeedGenerator`] hands the item to a
//! [`LatticeSearch`], which grows itemsets of a fixed prefix length by tid-list intersection.
//!
//! The order is ascending support with ties broken by id. Search only extends an itemset with
//! items of higher rank, so each itemset has exactly one generating path across the whole job
//! and no itemset is reported twice.
//!
//! # Examples
//!
//! ```
//! # use bigfim::prefix::EclatMiner;
//! # use bigfim::prefix::Item;
//! # use bigfim::prefix::PrefixSeedGenerator;
//! # use bigfim::prefix::RecordKind;
//! # use bigfim::prefix::SeedRecord;
//! # use bigfim::prefix::SingletonOrderIndex;
//! let singletons = vec![
//!     Item::new(1, vec![0, 1, 2]).unwrap(),
//!     Item::new(2, vec![0, 1]).unwrap(),
//!     Item::new(3, vec![1, 2]).unwrap(),
//! ];
//! let order = SingletonOrderIndex::by_support(&singletons).unwrap();
//! assert_eq!(order.ids(), &[2, 3, 1]);
//!
//! let generator = PrefixSeedGenerator::new(singletons, order, 2, 2).unwrap();
//! let mut miner = EclatMiner::new(2);
//! let mut seeds: Vec<SeedRecord> = vec![];
//! generator.process_line("0\t2 3", &mut miner, &mut seeds).unwrap();
//!
//! assert_eq!(seeds.len(), 2);
//! assert_eq!(seeds[0].to_string(), "fis$2 1$0 1");
//! assert_eq!(seeds[1].kind, RecordKind::Fis);
//! assert_eq!(seeds[1].itemset, vec![3, 1]);
//! ```

mod generator;
mod item;
mod order;
mod reporter;
mod search;

pub use self::generator::PrefixSeedGenerator;
pub use self::item::Item;
pub use self::item::read_singletons;
pub use self::order::SingletonOrderIndex;
pub use self::reporter::DELIMITER;
pub use self::reporter::DelimitedReporter;
pub use self::reporter::RecordKind;
pub use self::reporter::SeedRecord;
pub use self::reporter::SetReporter;
pub use self::search::EclatMiner;
pub use self::search::LatticeSearch;
pub use self::search::intersect;
