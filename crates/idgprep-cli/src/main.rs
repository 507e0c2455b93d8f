//! idgprep — IDG target list preprocessor.
//! Entry point for the consolidation binary.

mod cli;
mod config;

use std::process::ExitCode;

use clap::Parser;
use idgprep_common::IdgPrepError;
use idgprep_ingestion::discovery::{compile_pattern, discover_inputs};
use idgprep_ingestion::{run_consolidation, ConsolidationJob, PipelineEvent};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::{Config, Settings};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Every fatal condition ends up here; nothing below exits the process.
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<IdgPrepError>() {
                Some(fatal) => eprintln!("{fatal}"),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "idgprep=debug,info" } else { "idgprep=info,warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load(cli.config.as_deref())?;
    let settings = Settings::resolve(cli, config);

    let inputs = if settings.inputs.is_empty() {
        let pattern = compile_pattern(&settings.pattern)?;
        discover_inputs(&settings.input_dir, &pattern)?
    } else {
        settings.inputs.clone()
    };

    let job = ConsolidationJob {
        inputs,
        output: settings.output_path()?,
        write_mode: settings.write_mode,
        dry_run: settings.dry_run,
    };

    let report = !cli.json;
    let (result, _) = run_consolidation(&job, |event| {
        if report {
            print_event(&event);
        }
    })?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    Ok(())
}

/// Console report: one line per input file, then the consolidated count.
fn print_event(event: &PipelineEvent<'_>) {
    match event {
        PipelineEvent::FileStarted { .. } => {}
        PipelineEvent::FileLoaded(report) => {
            let name = report
                .file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| report.file.display().to_string());
            println!("{name}: {} rows", report.rows_read);
        }
        PipelineEvent::Consolidated { loaded, unique } => {
            println!("{unique} unique records ({loaded} loaded)");
        }
        PipelineEvent::Written { output, records } => {
            println!("Wrote {records} records to {}", output.display());
        }
    }
}
