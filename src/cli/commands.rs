use crate::analyzers::OutputComparator;
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::processors::{ParallelProcessor, ReferenceProcessor};
use crate::settings::ProcessorConfig;
use crate::utils::filename::generate_default_output_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::{OutputFormatter, OutputWriter};
use std::process::ExitCode;
use tracing::info;
use validator::Validate;

pub fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Process {
            input,
            output_file,
            workers,
            buffer_size,
            mmap,
        } => {
            let mut config = ProcessorConfig::load(cli.config.as_deref())?;
            if let Some(workers) = workers {
                config.workers = workers;
            }
            if let Some(buffer_size) = buffer_size {
                config.buffer_size = buffer_size;
            }
            config.use_mmap |= mmap;
            config.show_progress &= !cli.quiet;
            config.validate()?;

            let output_file = output_file.unwrap_or_else(generate_default_output_filename);

            info!(
                input = %input.display(),
                output = %output_file.display(),
                workers = config.workers,
                mmap = config.use_mmap,
                "Processing measurements"
            );

            let progress = ProgressReporter::new(0, "Planning chunks...", !config.show_progress);
            let processor = ParallelProcessor::from_config(&config);

            let result = match processor.process_file(&input, Some(&progress)) {
                Ok(result) => result,
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            };

            let output = OutputFormatter::new().format(&result.stations);
            OutputWriter::new().write(&output, &output_file)?;

            if !cli.quiet {
                println!("\n{}", result.summary.summary());
                println!("Output written to {}", output_file.display());
            }
        }

        Commands::Reference { input, output_file } => {
            info!(input = %input.display(), "Running reference implementation");

            let output = ReferenceProcessor::new().run(&input)?;
            OutputWriter::new().write(&output, &output_file)?;

            if !cli.quiet {
                println!("Oracle written to {}", output_file.display());
            }
        }

        Commands::Compare { expected, actual } => {
            let differences = OutputComparator::new().compare_files(&expected, &actual)?;

            println!("\nFound {} differences:\n", differences.len());
            for difference in &differences {
                println!("{}", difference);
            }

            if !differences.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
