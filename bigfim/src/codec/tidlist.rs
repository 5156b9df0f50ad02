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

use std::io::Write;
use std::str;

use crate::codec::EMPTY_FLAG_MASK;
use crate::codec::FAMILY_ID;
use crate::codec::PREAMBLE_LONGS;
use crate::codec::RecordBytes;
use crate::codec::RecordSlice;
use crate::codec::SER_VER;
use crate::codec::assert::ensure_family_is;
use crate::codec::assert::ensure_preamble_longs_is;
use crate::codec::assert::ensure_remaining;
use crate::codec::assert::ensure_serial_version_is;
use crate::codec::assert::insufficient_data;
use crate::error::Error;

const PREAMBLE_BYTES: usize = 8;
const FLAGS_BYTE: usize = 3;
const RECORD_COUNT_INT: usize = 4;

/// One record of a tid-list store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TidListEntry {
    /// Item id the record is keyed by.
    pub item: u32,
    /// Transaction ids in stored order.
    pub tids: Vec<u32>,
}

/// Builds a serialized tid-list store record by record.
///
/// ```
/// # use bigfim::codec::TidListStoreWriter;
/// # use bigfim::codec::read_tid_lists;
/// let mut writer = TidListStoreWriter::new();
/// writer.append(7, &[0, 3, 4]).unwrap();
/// let bytes = writer.finish();
///
/// let entries = read_tid_lists(&bytes).unwrap();
/// assert_eq!(entries[0].item, 7);
/// assert_eq!(entries[0].tids, vec![0, 3, 4]);
/// ```
#[derive(Debug)]
pub struct TidListStoreWriter {
    bytes: RecordBytes,
    num_records: u32,
}

impl Default for TidListStoreWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TidListStoreWriter {
    /// Creates a writer for an empty store.
    pub fn new() -> Self {
        let mut bytes = RecordBytes::with_capacity(PREAMBLE_BYTES);
        bytes.write_u8(PREAMBLE_LONGS);
        bytes.write_u8(SER_VER);
        bytes.write_u8(FAMILY_ID);
        bytes.write_u8(EMPTY_FLAG_MASK);
        // record count, patched by finish
        bytes.write_u32_le(0);
        Self {
            bytes,
            num_records: 0,
        }
    }

    /// Returns the number of records appended so far.
    pub fn num_records(&self) -> u32 {
        self.num_records
    }

    /// Appends the tid list of `item`.
    pub fn append(&mut self, item: u32, tids: &[u32]) -> Result<(), Error> {
        let num_tids = u32::try_from(tids.len())
            .map_err(|_| Error::invalid_argument("tid list too long for store"))?;
        let num_records = self
            .num_records
            .checked_add(1)
            .ok_or_else(|| Error::invalid_argument("too many records for store"))?;

        let key = item.to_string();
        self.bytes.write_u32_le(key.len() as u32);
        self.bytes.write(key.as_bytes());
        self.bytes.write_u32_le(num_tids);
        for tid in tids {
            self.bytes.write_u32_le(*tid);
        }
        self.num_records = num_records;
        Ok(())
    }

    /// Finalizes the preamble and returns the serialized store.
    pub fn finish(mut self) -> Vec<u8> {
        self.seal();
        self.bytes.into_bytes()
    }

    /// Finalizes the preamble and writes the serialized store to `writer`.
    pub fn write_to<W: Write>(mut self, writer: &mut W) -> Result<(), Error> {
        self.seal();
        writer.write_all(self.bytes.as_slice())?;
        writer.flush()?;
        Ok(())
    }

    fn seal(&mut self) {
        let flags = if self.num_records == 0 {
            EMPTY_FLAG_MASK
        } else {
            0
        };
        self.bytes.patch_u8(FLAGS_BYTE, flags);
        self.bytes.patch_u32_le(RECORD_COUNT_INT, self.num_records);
    }
}

/// Parses a serialized tid-list store.
///
/// Records are returned in stored order; tids keep their stored order as well.
pub fn read_tid_lists(bytes: &[u8]) -> Result<Vec<TidListEntry>, Error> {
    let mut cursor = RecordSlice::new(bytes);
    let preamble_longs = cursor
        .read_u8()
        .map_err(insufficient_data("preamble_longs"))?;
    let serial_version = cursor
        .read_u8()
        .map_err(insufficient_data("serial_version"))?;
    let family_id = cursor.read_u8().map_err(insufficient_data("family_id"))?;
    let flags = cursor.read_u8().map_err(insufficient_data("flags"))?;
    ensure_preamble_longs_is(PREAMBLE_LONGS, preamble_longs)?;
    ensure_serial_version_is(SER_VER, serial_version)?;
    ensure_family_is(FAMILY_ID, family_id)?;

    let num_records = cursor
        .read_u32_le()
        .map_err(insufficient_data("num_records"))? as usize;
    let is_empty = flags & EMPTY_FLAG_MASK != 0;
    if is_empty != (num_records == 0) {
        return Err(Error::deserial(format!(
            "empty flag disagrees with record count {num_records}"
        )));
    }

    let mut entries = Vec::with_capacity(num_records.min(cursor.remaining() / 8));
    for index in 0..num_records {
        let key_len = cursor
            .read_u32_le()
            .map_err(insufficient_data("key_length"))? as usize;
        ensure_remaining(cursor.remaining(), key_len, "key")?;
        let mut key = vec![0u8; key_len];
        cursor
            .read_exact(&mut key)
            .map_err(insufficient_data("key"))?;
        let item = parse_key(&key).map_err(|err| err.with_context("record", index))?;

        let num_tids = cursor
            .read_u32_le()
            .map_err(insufficient_data("num_tids"))? as usize;
        let tids_len = num_tids
            .checked_mul(4)
            .ok_or_else(|| Error::deserial("tid list size overflow"))?;
        ensure_remaining(cursor.remaining(), tids_len, "tids")?;
        let mut tids = Vec::with_capacity(num_tids);
        for _ in 0..num_tids {
            tids.push(cursor.read_u32_le().map_err(insufficient_data("tid"))?);
        }
        entries.push(TidListEntry { item, tids });
    }
    Ok(entries)
}

fn parse_key(key: &[u8]) -> Result<u32, Error> {
    let text = str::from_utf8(key).map_err(|_| Error::deserial("invalid UTF-8 key"))?;
    text.trim()
        .parse::<u32>()
        .map_err(|_| Error::deserial(format!("key is not an item id: {text:?}")))
}
