mod cli;
mod config;
mod dax;
mod diff;
mod error;
mod extract;
mod i18n;
mod pipeline;
mod process;
mod report;
mod types;

use crate::error::PbiDocsError;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const PARTIAL: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 2;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<i32, PbiDocsError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        cli::Commands::Extract(cmd) => {
            let lang = cmd.lang.or(config.language()).unwrap_or_default();
            let output_base = cmd.output.unwrap_or_else(|| config.output_dir());

            let (metadata, artifacts) =
                pipeline::process_file(&cmd.input, &output_base, lang, &config)?;
            println!(
                "{}: {} tables, {} measures, {} relationships",
                metadata.file_name,
                metadata.summary.total_tables,
                metadata.summary.total_measures,
                metadata.summary.total_relationships
            );
            println!("output: {}", artifacts.dir.display());
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Batch(cmd) => {
            let lang = cmd.lang.or(config.language()).unwrap_or_default();
            let output_base = cmd.output.unwrap_or_else(|| config.output_dir());

            if !cmd.dir.exists() {
                return Err(PbiDocsError::InputNotFound(cmd.dir.display().to_string()));
            }
            if !cmd.dir.is_dir() {
                return Err(PbiDocsError::NotADirectory(cmd.dir.display().to_string()));
            }

            let mut inputs: Vec<PathBuf> = WalkDir::new(&cmd.dir)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.path().to_path_buf())
                .filter(|path| {
                    path.extension()
                        .and_then(|extension| extension.to_str())
                        .map(|extension| extension.eq_ignore_ascii_case("pbit"))
                        .unwrap_or(false)
                })
                .collect();
            inputs.sort();

            if inputs.is_empty() {
                tracing::warn!(dir = %cmd.dir.display(), "no .pbit files found");
                println!("batch: no .pbit files found under {}", cmd.dir.display());
                return Ok(exit_code::PARTIAL);
            }

            let mut succeeded = 0usize;
            for input in &inputs {
                match pipeline::process_file(input, &output_base, lang, &config) {
                    Ok(_) => succeeded += 1,
                    Err(e) => {
                        tracing::error!(input = %input.display(), error = %e, "batch input failed");
                    }
                }
            }

            println!("batch: {succeeded}/{} files processed", inputs.len());
            if succeeded == inputs.len() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::PARTIAL)
            }
        }
        cli::Commands::Diff(cmd) => {
            let lang = cmd.lang.or(config.language()).unwrap_or_default();
            let output_base = cmd.output.unwrap_or_else(|| config.output_dir());

            let (metadata_a, _) = pipeline::process_file(&cmd.a, &output_base, lang, &config)?;
            let (metadata_b, _) = pipeline::process_file(&cmd.b, &output_base, lang, &config)?;

            let model_diff = diff::diff_models(&metadata_a, &metadata_b);
            std::fs::create_dir_all(&output_base)?;
            let diff_path = output_base.join(format!(
                "diff_{}_vs_{}.json",
                metadata_a.file_name, metadata_b.file_name
            ));
            std::fs::write(&diff_path, serde_json::to_string_pretty(&model_diff)?)?;

            println!("diff file: {}", diff_path.display());
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
