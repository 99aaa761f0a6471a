use anyhow::{Context, Result};
use clap::Parser;
use franchise_tfidf::io::{load_allow_list, load_config, load_listing, write_tables};
use franchise_tfidf::pipeline::RecordingObserver;
use franchise_tfidf::{AliasConflictPolicy, Pipeline, TfIdfConfig};
use std::path::PathBuf;
use tracing::{debug, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[clap(version, about = "Score franchise characters by screen-time TF-IDF")]
struct CliArgs {
    /// Path to the scraped listing (JSON).
    pub listing: PathBuf,

    /// Path to the character allow-list CSV (`Character Name,Character ID`).
    pub characters: PathBuf,

    /// Directory the three result tables are written to.
    #[clap(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// JSON config file; flags below override its values.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Fixed franchise size N used for IDF and contribution.
    #[clap(long)]
    pub franchise_size: Option<usize>,

    /// Movie to exclude (repeatable). Replaces the default exclusion list.
    #[clap(long = "exclude")]
    pub excluded_movies: Vec<String>,

    /// Fail when two aliases hold different times for the same movie.
    #[clap(long)]
    pub strict_aliases: bool,

    /// Keep characters whose times all fail to parse (the run then fails).
    #[clap(long)]
    pub keep_empty_rows: bool,

    /// Number of top-ranked characters to log.
    #[clap(long, default_value_t = 10)]
    pub top: usize,
}

fn build_config(args: &CliArgs) -> Result<TfIdfConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => TfIdfConfig::default(),
    };
    if let Some(size) = args.franchise_size {
        config = config.with_franchise_size(size);
    }
    if !args.excluded_movies.is_empty() {
        config = config.with_excluded_movies(args.excluded_movies.iter().cloned());
    }
    if args.strict_aliases {
        config = config.with_alias_conflict(AliasConflictPolicy::Reject);
    }
    if args.keep_empty_rows {
        config = config.with_prune_empty_rows(false);
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let config = build_config(&cli_args)?;
    let allow_list = load_allow_list(&cli_args.characters).with_context(|| {
        format!("Failed to read allow-list {}", cli_args.characters.display())
    })?;
    let listing = load_listing(&cli_args.listing)
        .with_context(|| format!("Failed to read listing {}", cli_args.listing.display()))?;

    info!(
        movies = listing.movies.len(),
        characters = allow_list.len(),
        franchise_size = config.franchise_size,
        "Scoring listing"
    );

    let pipeline = Pipeline::new(config, allow_list).context("Invalid configuration")?;
    let mut observer = RecordingObserver::new();
    let output = pipeline
        .run_with_observer(&listing, &mut observer)
        .context("Scoring failed")?;

    for report in &observer.reports {
        debug!(
            stage = report.stage,
            rows = report.rows,
            columns = report.columns,
            elapsed_us = report.elapsed.as_micros() as u64,
            "stage finished"
        );
    }

    for (i, score) in output.top(cli_args.top).iter().enumerate() {
        info!(
            "#{:<3} {:<30} contribution={:.6} own_movies={:.6}",
            i + 1,
            score.character,
            score.franchise_contribution,
            score.mean_own_movies
        );
    }

    let written = write_tables(&cli_args.out_dir, &output)
        .with_context(|| format!("Failed to write tables to {}", cli_args.out_dir.display()))?;
    for path in written {
        info!("Wrote {}", path.display());
    }

    Ok(())
}
