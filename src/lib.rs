// snb-datagen - local driver for the configuration bootstrap and serializers
//
// Plays the orchestrator's part for a single process: bootstrap the
// configuration once, then run one partition through a serializer.

use anyhow::{Context, Result};
use snb_datagen_config::{
    derive_output_dirs, initialize, keys, read_config_or_exit, Configuration,
};
use snb_datagen_serializer::{
    filesystem_for, serializer_for, FileSystem, Knows, Person, PersonSummary, PGX_ALIAS,
};
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

mod init;

pub use init::{init_tracing, LogFormat};

/// Defaults, then the override file when given, then derived output paths.
///
/// A broken override file terminates the process.
pub fn bootstrap(params: Option<&Path>) -> Configuration {
    let config = initialize();
    let config = match params {
        Some(path) => read_config_or_exit(config, path),
        None => config,
    };
    derive_output_dirs(config)
}

/// Summary of one partition run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionReport {
    pub edges: u64,
}

/// Stream `src dst` edge lines through the configured dynamic person
/// serializer for `partition_id`, on the filesystem named by the config.
pub fn run_knows_partition<R: BufRead>(
    config: &Configuration,
    partition_id: u32,
    input: R,
) -> Result<PartitionReport> {
    let fs = filesystem_for(config)?;
    run_knows_partition_on(config, partition_id, input, fs)
}

/// Same as [`run_knows_partition`] with an explicit filesystem
pub fn run_knows_partition_on<R: BufRead>(
    config: &Configuration,
    partition_id: u32,
    input: R,
    fs: Arc<dyn FileSystem>,
) -> Result<PartitionReport> {
    let name = config
        .get(keys::DYNAMIC_PERSON_SERIALIZER)
        .unwrap_or(PGX_ALIAS);
    let mut serializer = serializer_for(name, fs)?;
    serializer
        .initialize(config, partition_id)
        .with_context(|| {
            format!(
                "Failed to initialize serializer for partition {}",
                partition_id
            )
        })?;
    serializer.write_file_headers()?;

    let mut edges = 0u64;
    let streamed = (|| -> Result<()> {
        for (index, line) in input.lines().enumerate() {
            let line = line.context("Failed to read edge input")?;
            let Some((from, to)) = parse_edge(&line, index + 1)? else {
                continue;
            };
            let knows = Knows::new(PersonSummary { account_id: to });
            serializer.serialize_knows(&Person::new(from), &knows)?;
            edges += 1;
        }
        Ok(())
    })();

    // Writers are released even when streaming failed part way
    let closed = serializer.close().context("Failed to close partition writers");
    streamed?;
    closed?;

    info!(partition = partition_id, edges, "Partition complete");
    Ok(PartitionReport { edges })
}

fn parse_edge(line: &str, line_no: usize) -> Result<Option<(i64, i64)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let (Some(from), Some(to), None) = (fields.next(), fields.next(), fields.next()) else {
        anyhow::bail!("line {}: expected '<from> <to>', got '{}'", line_no, line);
    };
    let from = from
        .parse::<i64>()
        .with_context(|| format!("line {}: invalid source id '{}'", line_no, from))?;
    let to = to
        .parse::<i64>()
        .with_context(|| format!("line {}: invalid target id '{}'", line_no, to))?;
    Ok(Some((from, to)))
}
