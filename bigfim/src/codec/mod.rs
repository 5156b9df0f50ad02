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

//! Binary codec for persisted tid-list stores.
//!
//! A tid-list store is the keyed record file a counting phase leaves behind and the prefix
//! phase loads as a broadcast input. Each record maps an item id (stored as decimal text, the
//! way the upstream sequence files key it) to its ordered list of transaction ids.
//!
//! # Layout
//!
//! ```text
//! byte 0      preamble longs (always 1)
//! byte 1      serial version
//! byte 2      family id
//! byte 3      flags (bit 0: empty)
//! bytes 4..8  record count, u32 little-endian
//! records     u32 key length, key bytes, u32 tid count, tids as u32 little-endian
//! ```

pub(crate) mod assert;
mod reader;
mod tidlist;
mod writer;

pub(crate) use self::reader::RecordSlice;
pub use self::tidlist::TidListEntry;
pub use self::tidlist::TidListStoreWriter;
pub use self::tidlist::read_tid_lists;
pub(crate) use self::writer::RecordBytes;

/// Family ID for tid-list stores.
pub const FAMILY_ID: u8 = 32;
/// Serialization version.
pub const SER_VER: u8 = 1;
/// Preamble longs for every store.
pub const PREAMBLE_LONGS: u8 = 1;
/// Empty flag mask.
pub const EMPTY_FLAG_MASK: u8 = 1;
