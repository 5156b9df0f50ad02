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

use std::fmt;
use std::io::Write;

use crate::error::Error;
use crate::itemset::ItemId;
use crate::itemset::Itemset;
use crate::itemset::Tid;
use crate::itemset::format_itemset;
use crate::itemset::format_tids;

/// A partial tid list emitted by one flush of one task.
///
/// The text form is `<itemset>\t<task id> <leaf item> <tids>`, all space-delimited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TidListRecord {
    itemset: Itemset,
    task_id: u32,
    tids: Vec<Tid>,
}

impl TidListRecord {
    /// Creates a record.
    ///
    /// # Panics
    ///
    /// Panics if `itemset` or `tids` is empty.
    pub fn new(itemset: Itemset, task_id: u32, tids: Vec<Tid>) -> Self {
        assert!(!itemset.is_empty(), "itemset must not be empty");
        assert!(!tids.is_empty(), "tid list must not be empty");
        Self {
            itemset,
            task_id,
            tids,
        }
    }

    /// Returns the candidate itemset this record counts.
    pub fn itemset(&self) -> &[ItemId] {
        &self.itemset
    }

    /// Returns the record key: the itemset as space-delimited ascending ids.
    pub fn key(&self) -> String {
        format_itemset(&self.itemset)
    }

    /// Returns the id of the task that produced this record.
    pub fn task_id(&self) -> u32 {
        self.task_id
    }

    /// Returns the terminal item of the itemset, i.e. the trie leaf that held the tids.
    pub fn item(&self) -> ItemId {
        self.itemset[self.itemset.len() - 1]
    }

    /// Returns the tids in the order they were encountered.
    pub fn tids(&self) -> &[Tid] {
        &self.tids
    }

    /// Consumes the record, returning the itemset and its tids.
    pub fn into_parts(self) -> (Itemset, Vec<Tid>) {
        (self.itemset, self.tids)
    }
}

impl fmt::Display for TidListRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{} {} {}",
            self.key(),
            self.task_id,
            self.item(),
            format_tids(&self.tids)
        )
    }
}

/// Destination of emitted tid-list records.
///
/// A failed emission must be reported, never swallowed: a lost record silently lowers the
/// support of its candidate.
pub trait RecordSink {
    /// Accepts one record.
    fn emit(&mut self, record: TidListRecord) -> Result<(), Error>;
}

impl RecordSink for Vec<TidListRecord> {
    fn emit(&mut self, record: TidListRecord) -> Result<(), Error> {
        self.push(record);
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn emit(&mut self, record: TidListRecord) -> Result<(), Error> {
        (**self).emit(record)
    }
}

/// Writes records in their text form, one per line.
#[derive(Debug)]
pub struct TextRecordWriter<W: Write> {
    writer: W,
    num_records: u64,
}

impl<W: Write> TextRecordWriter<W> {
    /// Creates a writer over `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            num_records: 0,
        }
    }

    /// Returns the number of records written.
    pub fn num_records(&self) -> u64 {
        self.num_records
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W, Error> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> RecordSink for TextRecordWriter<W> {
    fn emit(&mut self, record: TidListRecord) -> Result<(), Error> {
        writeln!(self.writer, "{record}")?;
        self.num_records += 1;
        Ok(())
    }
}
