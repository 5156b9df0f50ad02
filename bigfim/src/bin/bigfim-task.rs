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

//! Runs a single counting or seeding task over local files.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use bigfim::config::MiningConfig;
use bigfim::count::CandidateTrie;
use bigfim::count::RecordSink;
use bigfim::count::SupportCounter;
use bigfim::count::TextRecordWriter;
use bigfim::count::TidListRecord;
use bigfim::count::merge_tid_lists;
use bigfim::count::retain_frequent;
use bigfim::error::Error;
use bigfim::error::ErrorKind;
use bigfim::itemset::format_itemset;
use bigfim::itemset::read_itemsets;
use bigfim::prefix::DelimitedReporter;
use bigfim::prefix::EclatMiner;
use bigfim::prefix::PrefixSeedGenerator;
use bigfim::prefix::SingletonOrderIndex;
use bigfim::prefix::read_singletons;
use clap::Parser;
use clap::Subcommand;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "bigfim-task", about = "Run one frequent itemset mining task")]
struct Args {
    /// TOML configuration supplying defaults for unset options
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output file; defaults to a file in the configured output_dir, else standard output
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count candidate support over a transaction partition.
    Count {
        /// Candidate itemsets, one per line; counts singletons when absent
        #[arg(long)]
        candidates: Option<PathBuf>,

        /// Transactions, one per line; defaults to the configured input_file
        #[arg(long)]
        transactions: Option<PathBuf>,

        /// Task id embedded in every record
        #[arg(long, default_value_t = 0)]
        task_id: u32,

        /// Number of buffered tids that triggers a flush
        #[arg(long)]
        buffer: Option<usize>,

        /// Print merged support per itemset instead of partial records
        #[arg(long)]
        merge: bool,
    },
    /// Grow fixed-length seeds from assigned prefix items.
    Seed {
        /// Singleton tid-list store
        #[arg(long)]
        singletons: PathBuf,

        /// Singleton order, one line of ids in rank order
        #[arg(long)]
        order: PathBuf,

        /// Prefix assignments, `<key>\t<ids>` per line
        #[arg(long)]
        prefixes: PathBuf,

        /// Absolute minimum support
        #[arg(long)]
        min_sup: Option<usize>,

        /// Seed size
        #[arg(long)]
        prefix_length: Option<usize>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "bigfim=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("task failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let mut config = match &args.config {
        Some(path) => MiningConfig::from_file(path)?,
        None => MiningConfig::default(),
    };

    match args.command {
        Command::Count {
            candidates,
            transactions,
            task_id,
            buffer,
            merge,
        } => {
            if let Some(transactions) = transactions {
                config.input_file = transactions;
            }
            if let Some(buffer) = buffer {
                config.tids_buffer_size = buffer;
            }
            config.validate()?;
            config.log_summary();

            let trie = match candidates {
                Some(path) => CandidateTrie::from_candidates(read_itemsets(open(&path)?)?)?,
                None => CandidateTrie::for_singletons(),
            };
            let mut counter =
                SupportCounter::new(trie, task_id).with_tids_buffer_size(config.tids_buffer_size)?;
            let name = format!("tids-{task_id}");
            let mut out = create_output(args.output.as_deref(), &config, &name)?;
            if merge {
                let mut records: Vec<TidListRecord> = vec![];
                scan(&mut counter, config.input_file()?, &mut records)?;
                let summary = counter.finish(&mut records)?;
                let mut merged = merge_tid_lists(records);
                if config.min_sup.is_some() || config.min_freq.is_some() {
                    retain_frequent(&mut merged, config.min_support(summary.num_transactions)?);
                }
                info!(task_id, num_itemsets = merged.len(), "merged tid lists");
                if config.write_sets {
                    for (itemset, tids) in merged {
                        writeln!(out, "{}\t{}", format_itemset(&itemset), tids.len())?;
                    }
                }
            } else {
                let mut writer = TextRecordWriter::new(&mut out);
                scan(&mut counter, config.input_file()?, &mut writer)?;
                counter.finish(&mut writer)?;
                writer.into_inner()?;
            }
            out.flush()?;
        }
        Command::Seed {
            singletons,
            order,
            prefixes,
            min_sup,
            prefix_length,
        } => {
            if let Some(min_sup) = min_sup {
                config.min_sup = Some(min_sup);
            }
            if let Some(prefix_length) = prefix_length {
                config.prefix_length = prefix_length;
            }
            config.validate()?;
            config.log_summary();
            let min_sup = config
                .min_sup
                .ok_or_else(|| Error::new(ErrorKind::ConfigInvalid, "min_sup is not set"))?;

            let singletons = read_singletons(&std::fs::read(&singletons)?)?;
            let order = SingletonOrderIndex::read(open(&order)?)?;
            let generator =
                PrefixSeedGenerator::new(singletons, order, min_sup, config.prefix_length)?;
            let mut miner = EclatMiner::new(generator.prefix_length());
            let mut out = create_output(args.output.as_deref(), &config, "seeds")?;
            let mut reporter = DelimitedReporter::new(&mut out);
            for line in open(&prefixes)?.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                generator.process_line(&line, &mut miner, &mut reporter)?;
            }
            reporter.into_inner()?;
            out.flush()?;
        }
    }
    Ok(())
}

fn create_output(
    output: Option<&Path>,
    config: &MiningConfig,
    name: &str,
) -> Result<Box<dyn Write>, Error> {
    let Some(path) = output.map(Path::to_path_buf).or_else(|| config.output_path(name)) else {
        return Ok(Box::new(BufWriter::new(std::io::stdout().lock())));
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|err| Error::from(err).with_context("path", parent.display()))?;
    }
    let file =
        File::create(&path).map_err(|err| Error::from(err).with_context("path", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn scan<S: RecordSink>(
    counter: &mut SupportCounter,
    transactions: &Path,
    sink: &mut S,
) -> Result<(), Error> {
    for line in open(transactions)?.lines() {
        counter.process_line(&line?, sink)?;
    }
    Ok(())
}

fn open(path: &Path) -> Result<BufReader<File>, Error> {
    let file =
        File::open(path).map_err(|err| Error::from(err).with_context("path", path.display()))?;
    Ok(BufReader::new(file))
}
