use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use snb_datagen::{bootstrap, init_tracing, run_knows_partition, LogFormat};
use snb_datagen_config::print_config;
use std::io;
use std::path::PathBuf;

/// Configuration bootstrap and partitioned serializers for the SNB data generator
#[derive(Parser)]
#[command(name = "snb-datagen")]
#[command(version)]
#[command(about = "Resolve generator configuration and serialize person partitions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Property file overriding the built-in defaults
    #[arg(short, long, value_name = "FILE", global = true)]
    params: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'v', long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration (default if no subcommand given)
    Config,
    /// Serialize `<from> <to>` edges read from stdin into one partition
    Knows {
        /// Partition (reducer) id used in output file names
        #[arg(long, value_name = "ID")]
        partition: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format);

    let config = bootstrap(cli.params.as_deref());

    match cli.command {
        Some(Commands::Config) | None => {
            print_config(&config, &mut io::stdout().lock())
                .context("Failed to print configuration")?;
        }
        Some(Commands::Knows { partition }) => {
            let report = run_knows_partition(&config, partition, io::stdin().lock())?;
            println!("{} edges written to partition {}", report.edges, partition);
        }
    }

    Ok(())
}
