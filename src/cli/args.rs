use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brc-processor")]
#[command(about = "Parallel per-station min/mean/max over `station;value` measurement files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Only log warnings and hide progress")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Configuration file (TOML, JSON or YAML)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate a measurements file with parallel workers
    Process {
        #[arg(short, long, help = "Input measurements file")]
        input: PathBuf,

        #[arg(
            short,
            long,
            help = "Output file path [default: output/measurements-{YYMMDD}.txt]"
        )]
        output_file: Option<PathBuf>,

        #[arg(short, long, help = "Worker count, capped by available cores")]
        workers: Option<usize>,

        #[arg(long, help = "Read buffer size in bytes")]
        buffer_size: Option<usize>,

        #[arg(long, help = "Scan chunks through a memory map")]
        mmap: bool,
    },

    /// Produce an oracle file with the single-threaded reference implementation
    Reference {
        #[arg(short, long, help = "Input measurements file")]
        input: PathBuf,

        #[arg(short, long, help = "Oracle output file path")]
        output_file: PathBuf,
    },

    /// Compare two output files station by station
    Compare {
        #[arg(help = "Expected output (e.g. an oracle file)")]
        expected: PathBuf,

        #[arg(help = "Actual output")]
        actual: PathBuf,
    },
}
