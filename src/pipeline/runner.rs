//! Pipeline runner: sequences every stage over one dataset.
//!
//! Data flows strictly forward:
//!
//! ```text
//! appearances → resolve → build → parse_time → document_frequency → idf
//!             → tf → tf_idf → rank
//! ```
//!
//! Each stage consumes the previous stage's table and returns a new one.
//! The runner notifies a [`PipelineObserver`] around every stage and enters
//! a tracing span for it.

use crate::errors::Result;
use crate::identity::{AllowList, IdentityResolver};
use crate::matrix::{build_matrix, ScreenTimeMatrix};
use crate::parse::{parse_minutes, Listing};
use crate::pipeline::artifacts::PipelineOutput;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, STAGE_BUILD,
    STAGE_DOCUMENT_FREQUENCY, STAGE_IDF, STAGE_PARSE_TIME, STAGE_RANK, STAGE_RESOLVE, STAGE_TF,
    STAGE_TF_IDF,
};
use crate::rank::{contributions, rank};
use crate::stats::{
    document_frequency, inverse_document_frequency, term_frequency, tf_idf, Statistics,
};
use crate::types::{MovieLengths, RawAppearance, TfIdfConfig};
use tracing::{info, warn};

/// Enter a tracing span for a pipeline stage.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// A configured scoring pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: TfIdfConfig,
    allow_list: AllowList,
}

impl Pipeline {
    /// Create a pipeline, validating the configuration
    pub fn new(config: TfIdfConfig, allow_list: AllowList) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, allow_list })
    }

    pub fn config(&self) -> &TfIdfConfig {
        &self.config
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Score a scraped listing
    pub fn run(&self, listing: &Listing) -> Result<PipelineOutput> {
        self.run_with_observer(listing, &mut NoopObserver)
    }

    /// Score a scraped listing, reporting each stage to `observer`
    pub fn run_with_observer(
        &self,
        listing: &Listing,
        observer: &mut impl PipelineObserver,
    ) -> Result<PipelineOutput> {
        let appearances = listing.appearances()?;
        let lengths = listing.movie_lengths(&self.config)?;
        self.run_appearances(&listing.titles(), &appearances, &lengths, observer)
    }

    /// Score already-split appearances.
    ///
    /// `movies` fixes the column order; see [`IdentityResolver::resolve`].
    pub fn run_appearances(
        &self,
        movies: &[String],
        appearances: &[RawAppearance],
        lengths: &MovieLengths,
        observer: &mut impl PipelineObserver,
    ) -> Result<PipelineOutput> {
        let cfg = &self.config;

        // Stage 1: canonical identities
        let resolution = {
            trace_stage!(STAGE_RESOLVE);
            observer.on_stage_start(STAGE_RESOLVE);
            let clock = StageClock::start();
            let resolution =
                IdentityResolver::new(&self.allow_list, cfg).resolve(movies, appearances)?;
            observer.on_stage_end(
                &StageReport::new(STAGE_RESOLVE, clock.elapsed())
                    .with_shape(resolution.characters.len(), resolution.movies.len()),
            );
            resolution
        };

        // Stage 2: raw matrix
        let raw = {
            trace_stage!(STAGE_BUILD);
            observer.on_stage_start(STAGE_BUILD);
            let clock = StageClock::start();
            let raw = build_matrix(&resolution);
            observer.on_stage_end(
                &StageReport::new(STAGE_BUILD, clock.elapsed())
                    .with_shape(raw.num_rows(), raw.num_columns()),
            );
            raw
        };

        // Stage 3: minutes
        let (screen_time, pruned_characters) = {
            trace_stage!(STAGE_PARSE_TIME);
            observer.on_stage_start(STAGE_PARSE_TIME);
            let clock = StageClock::start();
            let mut screen_time: ScreenTimeMatrix = raw.map(|value| parse_minutes(value));
            let pruned = if cfg.prune_empty_rows {
                prune_empty_rows(&mut screen_time)
            } else {
                Vec::new()
            };
            observer.on_stage_end(
                &StageReport::new(STAGE_PARSE_TIME, clock.elapsed())
                    .with_shape(screen_time.num_rows(), screen_time.num_columns()),
            );
            (screen_time, pruned)
        };

        if screen_time.num_columns() != cfg.franchise_size {
            warn!(
                columns = screen_time.num_columns(),
                franchise_size = cfg.franchise_size,
                "movie count differs from the configured franchise size"
            );
        }

        // Stage 4: document frequency
        let df = {
            trace_stage!(STAGE_DOCUMENT_FREQUENCY);
            observer.on_stage_start(STAGE_DOCUMENT_FREQUENCY);
            let clock = StageClock::start();
            let df = document_frequency(&screen_time);
            observer.on_stage_end(
                &StageReport::new(STAGE_DOCUMENT_FREQUENCY, clock.elapsed())
                    .with_shape(df.len(), 0),
            );
            df
        };

        // Stage 5: inverse document frequency
        let idf = {
            trace_stage!(STAGE_IDF);
            observer.on_stage_start(STAGE_IDF);
            let clock = StageClock::start();
            let idf = inverse_document_frequency(&df, cfg.franchise_size)?;
            observer.on_stage_end(
                &StageReport::new(STAGE_IDF, clock.elapsed()).with_shape(idf.len(), 0),
            );
            idf
        };

        // Stage 6: term frequency
        let tf = {
            trace_stage!(STAGE_TF);
            observer.on_stage_start(STAGE_TF);
            let clock = StageClock::start();
            let tf = term_frequency(&screen_time, lengths)?;
            observer.on_stage_end(
                &StageReport::new(STAGE_TF, clock.elapsed())
                    .with_shape(tf.num_rows(), tf.num_columns()),
            );
            tf
        };

        // Stage 7: TF-IDF
        let tf_idf_matrix = {
            trace_stage!(STAGE_TF_IDF);
            observer.on_stage_start(STAGE_TF_IDF);
            let clock = StageClock::start();
            let matrix = tf_idf(&tf, &idf)?;
            observer.on_stage_end(
                &StageReport::new(STAGE_TF_IDF, clock.elapsed())
                    .with_shape(matrix.num_rows(), matrix.num_columns()),
            );
            matrix
        };

        // Stage 8: aggregate and rank
        let ranking = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let ranking = rank(contributions(&tf_idf_matrix, cfg.franchise_size));
            observer.on_stage_end(
                &StageReport::new(STAGE_RANK, clock.elapsed()).with_shape(ranking.len(), 2),
            );
            ranking
        };

        info!(
            characters = screen_time.num_rows(),
            movies = screen_time.num_columns(),
            dropped = resolution.dropped,
            merged = resolution.merged,
            pruned = pruned_characters.len(),
            "scored franchise"
        );

        Ok(PipelineOutput {
            screen_time,
            statistics: Statistics {
                document_frequency: df,
                idf,
                tf,
                tf_idf: tf_idf_matrix,
            },
            ranking,
            dropped_appearances: resolution.dropped,
            merged_appearances: resolution.merged,
            pruned_characters,
        })
    }
}

/// Drop rows without a single parseable time, returning their names
fn prune_empty_rows(matrix: &mut ScreenTimeMatrix) -> Vec<String> {
    let mut pruned = Vec::new();
    matrix.retain_rows(|character, row| {
        let keep = row.iter().any(Option::is_some);
        if !keep {
            warn!(character, "no parseable screen time, dropping character");
            pruned.push(character.to_string());
        }
        keep
    });
    pruned
}
