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
use std::str::FromStr;

use crate::error::Error;
use crate::itemset::ItemId;
use crate::itemset::Itemset;
use crate::itemset::Tid;
use crate::itemset::format_itemset;
use crate::itemset::format_tids;
use crate::itemset::parse_ids;

/// Field delimiter of seed records.
pub const DELIMITER: char = '$';

/// Kind of a reported seed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// A final frequent itemset; it has no frequent extension.
    Fis,
    /// A prefix that downstream lattice search keeps growing.
    Prefix,
    /// A singleton passed through unchanged.
    Singleton,
}

impl RecordKind {
    /// Returns the tag written in front of the payload.
    pub const fn as_str(self) -> &'static str {
        match self {
            RecordKind::Fis => "fis",
            RecordKind::Prefix => "prefix",
            RecordKind::Singleton => "singleton",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "fis" => Ok(RecordKind::Fis),
            "prefix" => Ok(RecordKind::Prefix),
            "singleton" => Ok(RecordKind::Singleton),
            _ => Err(Error::deserial(format!("unknown record kind: {s:?}"))),
        }
    }
}

/// Receives itemsets found by lattice search.
pub trait SetReporter {
    /// Reports `itemset` (in rank order) with its tid list.
    fn report(&mut self, itemset: &[ItemId], tids: &[Tid], kind: RecordKind) -> Result<(), Error>;
}

/// A seed record: `<kind>$<itemset>$<tids>`.
///
/// The itemset lists ids in rank order, which is the order lattice search grew it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRecord {
    /// Record kind.
    pub kind: RecordKind,
    /// Itemset in rank order.
    pub itemset: Itemset,
    /// Ascending tid list of the itemset.
    pub tids: Vec<Tid>,
}

impl SeedRecord {
    /// Returns the support of the itemset.
    pub fn support(&self) -> usize {
        self.tids.len()
    }

    /// Parses the text form of a seed record.
    pub fn parse(line: &str) -> Result<Self, Error> {
        let mut fields = line.trim_end_matches(['\r', '\n']).split(DELIMITER);
        let (Some(kind), Some(itemset), Some(tids), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(Error::deserial(format!(
                "seed record must have three fields: {line:?}"
            )));
        };
        Ok(Self {
            kind: kind.parse()?,
            itemset: parse_ids(itemset, 0)?,
            tids: parse_ids(tids, 0)?,
        })
    }
}

impl fmt::Display for SeedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{DELIMITER}{}{DELIMITER}{}",
            self.kind,
            format_itemset(&self.itemset),
            format_tids(&self.tids)
        )
    }
}

impl SetReporter for Vec<SeedRecord> {
    fn report(&mut self, itemset: &[ItemId], tids: &[Tid], kind: RecordKind) -> Result<(), Error> {
        self.push(SeedRecord {
            kind,
            itemset: itemset.to_vec(),
            tids: tids.to_vec(),
        });
        Ok(())
    }
}

/// Writes seed records in their text form, one per line.
#[derive(Debug)]
pub struct DelimitedReporter<W: Write> {
    writer: W,
    num_records: u64,
}

impl<W: Write> DelimitedReporter<W> {
    /// Creates a reporter writing to `writer`.
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

impl<W: Write> SetReporter for DelimitedReporter<W> {
    fn report(&mut self, itemset: &[ItemId], tids: &[Tid], kind: RecordKind) -> Result<(), Error> {
        writeln!(
            self.writer,
            "{kind}{DELIMITER}{}{DELIMITER}{}",
            format_itemset(itemset),
            format_tids(tids)
        )?;
        self.num_records += 1;
        Ok(())
    }
}
