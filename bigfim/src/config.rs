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

//! Mining job configuration.
//!
//! ```toml
//! input_file = "data/retail.dat"
//! output_dir = "out/retail"
//! min_sup = 100
//! prefix_length = 2
//! tids_buffer_size = 500000
//! write_sets = false
//! ```
//!
//! Command-line options of the task runner override the values read here.

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::info;

use crate::count::DEFAULT_TIDS_BUFFER_SIZE;
use crate::error::Error;

/// Settings shared by counting and seeding tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MiningConfig {
    /// Transaction database.
    pub input_file: PathBuf,
    /// Directory receiving task output; standard output when unset.
    pub output_dir: PathBuf,
    /// Absolute minimum support.
    pub min_sup: Option<usize>,
    /// Minimum support relative to the number of transactions, in `(0, 1]`.
    pub min_freq: Option<f64>,
    /// Size of the seeds handed to distributed lattice search.
    pub prefix_length: usize,
    /// Number of buffered tids that triggers a flush.
    pub tids_buffer_size: usize,
    /// Whether merged frequent itemsets are written out, rather than only counted.
    pub write_sets: bool,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::new(),
            output_dir: PathBuf::new(),
            min_sup: None,
            min_freq: None,
            prefix_length: 1,
            tids_buffer_size: DEFAULT_TIDS_BUFFER_SIZE,
            write_sets: true,
        }
    }
}

impl MiningConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        toml::from_str(text).map_err(|err| Error::config("failed to parse config").set_source(err))
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| Error::from(err).with_context("path", path.display()))?;
        Self::from_toml_str(&text).map_err(|err| err.with_context("path", path.display()))
    }

    /// Checks the values that are set.
    ///
    /// Paths and thresholds may stay unset; the operations needing them report that through
    /// [`MiningConfig::input_file`] and [`MiningConfig::min_support`].
    pub fn validate(&self) -> Result<(), Error> {
        if self.min_sup == Some(0) {
            return Err(Error::config("min_sup must be positive"));
        }
        if let Some(freq) = self.min_freq {
            if !(freq > 0.0 && freq <= 1.0) {
                return Err(
                    Error::config("min_freq must be in (0, 1]").with_context("min_freq", freq)
                );
            }
        }
        if self.prefix_length == 0 {
            return Err(Error::config("prefix_length must be positive"));
        }
        if self.tids_buffer_size == 0 {
            return Err(Error::config("tids_buffer_size must be positive")
                .with_context("tids_buffer_size", self.tids_buffer_size));
        }
        Ok(())
    }

    /// Returns the transaction database path.
    pub fn input_file(&self) -> Result<&Path, Error> {
        if self.input_file.as_os_str().is_empty() {
            return Err(Error::config("input_file is not set"));
        }
        Ok(&self.input_file)
    }

    /// Returns where output `name` goes inside `output_dir`, or `None` when no directory is set.
    pub fn output_path(&self, name: &str) -> Option<PathBuf> {
        if self.output_dir.as_os_str().is_empty() {
            None
        } else {
            Some(self.output_dir.join(name))
        }
    }

    /// Resolves the absolute minimum support for a database of `num_transactions`.
    ///
    /// `min_sup` wins when both thresholds are set; `min_freq` is rounded up.
    pub fn min_support(&self, num_transactions: u64) -> Result<usize, Error> {
        match (self.min_sup, self.min_freq) {
            (Some(min_sup), _) => Ok(min_sup),
            (None, Some(freq)) => Ok((freq * num_transactions as f64).ceil() as usize),
            (None, None) => Err(Error::config("one of min_sup or min_freq must be set")),
        }
    }

    /// Logs the effective settings.
    pub fn log_summary(&self) {
        info!(
            input_file = %self.input_file.display(),
            output_dir = %self.output_dir.display(),
            min_sup = ?self.min_sup,
            min_freq = ?self.min_freq,
            prefix_length = self.prefix_length,
            tids_buffer_size = self.tids_buffer_size,
            write_sets = self.write_sets,
            "mining configuration"
        );
    }
}
