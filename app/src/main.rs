// ==============================================================================
// main.rs - Omics Pipeline Entry Point
// ==============================================================================
// Description: Command line interface for the multi-omics visualization pipeline
// Created: 2026-10-14
// Modified: 2026-10-14
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use omics_pipeline::models::{ArtifactKind, ArtifactSpec, Modality};
use omics_pipeline::processor::{make_rng, OmicsProcessor};
use omics_pipeline::results::{self, ARCHIVE_NAME};
use omics_pipeline::store::{MatrixStore, Provenance};
use omics_pipeline::validator::FileValidator;
use omics_pipeline::PipelineConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate (or load) matrices and render the configured artifacts
    Run {
        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Results directory (overrides the config file)
        #[arg(short, long, env = "OMICS_RESULTS_DIR")]
        results_dir: Option<PathBuf>,

        /// Seed for synthetic data, DE simulation and layout
        #[arg(long, env = "OMICS_SEED")]
        seed: Option<u64>,

        /// Correlation threshold for network artifacts
        #[arg(long)]
        threshold: Option<f64>,

        /// Genomics matrix CSV (synthesized if omitted)
        #[arg(long)]
        genomics: Option<PathBuf>,

        /// Metabolomics matrix CSV (synthesized if omitted)
        #[arg(long)]
        metabolomics: Option<PathBuf>,

        /// Proteomics matrix CSV (synthesized if omitted)
        #[arg(long)]
        proteomics: Option<PathBuf>,

        /// Also render a correlation network for this modality (repeatable)
        #[arg(long = "network", value_name = "MODALITY")]
        networks: Vec<Modality>,

        /// Write each run into its own <results-dir>/<run-id>/ directory
        #[arg(long)]
        isolate_runs: bool,
    },

    /// List rendered artifacts in a results directory
    List {
        #[arg(short, long, env = "OMICS_RESULTS_DIR", default_value = "results")]
        results_dir: PathBuf,
    },

    /// Zip all rendered artifacts
    Package {
        #[arg(short, long, env = "OMICS_RESULTS_DIR", default_value = "results")]
        results_dir: PathBuf,

        /// Archive path (default: <results-dir>/omics_results.zip)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that a file is an acceptable matrix upload
    Validate {
        file: PathBuf,
    },
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "omics_pipeline=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    match args.command {
        Command::Run {
            config,
            results_dir,
            seed,
            threshold,
            genomics,
            metabolomics,
            proteomics,
            networks,
            isolate_runs,
        } => {
            let mut config = match config {
                Some(path) => PipelineConfig::from_json_file(&path)
                    .with_context(|| format!("Failed to load configuration {:?}", path))?,
                None => PipelineConfig::default(),
            };

            // Command line flags override the file
            if let Some(dir) = results_dir {
                config.results_dir = dir;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            if let Some(threshold) = threshold {
                config.correlation_threshold = threshold;
            }
            if isolate_runs {
                config.isolate_runs = true;
            }
            for modality in networks {
                config.add_artifact(ArtifactSpec::new(modality, ArtifactKind::Network));
            }

            let uploads = [
                (Modality::Genomics, genomics),
                (Modality::Metabolomics, metabolomics),
                (Modality::Proteomics, proteomics),
            ];
            run_pipeline(config, uploads)
        }

        Command::List { results_dir } => {
            for name in results::list_artifacts(&results_dir)
                .with_context(|| format!("Failed to list {:?}", results_dir))?
            {
                println!("{}", name);
            }
            Ok(())
        }

        Command::Package { results_dir, output } => {
            let zip_path = output.unwrap_or_else(|| results_dir.join(ARCHIVE_NAME));
            let count = results::package_archive(&results_dir, &zip_path)
                .context("Failed to create results archive")?;
            info!("Packaged {} artifact(s) into {:?}", count, zip_path);
            println!("{}", zip_path.display());
            Ok(())
        }

        Command::Validate { file } => {
            let validated = FileValidator::new().validate_upload(&file)?;
            println!("{}", serde_json::to_string_pretty(&validated)?);
            Ok(())
        }
    }
}

fn run_pipeline(config: PipelineConfig, uploads: [(Modality, Option<PathBuf>); 3]) -> Result<()> {
    info!("Omics pipeline starting...");

    let mut rng = make_rng(config.seed);
    let mut store = MatrixStore::new();

    for (modality, path) in uploads {
        match path {
            Some(path) => {
                FileValidator::new()
                    .validate_upload(&path)
                    .with_context(|| format!("Rejected {} upload {:?}", modality, path))?;
                store
                    .load_csv(modality, &path)
                    .with_context(|| format!("Failed to load {} matrix", modality))?;
            }
            None => store.fill_synthetic(modality, &mut rng)?,
        }
    }

    for modality in store.modalities() {
        if let Some(Provenance::Uploaded(source)) = store.provenance(modality) {
            info!("{} data uploaded from {}", modality, source);
        } else {
            info!("{} data synthesized", modality);
        }
    }

    let processor = OmicsProcessor::new(config)?;
    match processor.run_with_rng(&store, &mut rng) {
        Ok(manifest) => {
            println!("{}", serde_json::to_string_pretty(&manifest)?);
            Ok(())
        }
        Err(e) => {
            warn!("Processing failed: {}", e);
            println!("{}", serde_json::to_string_pretty(&e.manifest)?);
            Err(e.into())
        }
    }
}
