//! Core types for franchise_tfidf
//!
//! This module defines the records handed over by the data-acquisition side,
//! the movie runtime table used for normalization, and configuration.

use crate::errors::{Result, TfIdfError};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Franchise size used by the reference data (the Infinity Saga listing).
pub const DEFAULT_FRANCHISE_SIZE: usize = 23;

/// Movie dropped from the saga by policy, not for lack of data.
pub const DEFAULT_EXCLUDED_MOVIE: &str = "Spider-Man: Far from Home";

// ============================================================================
// Raw Appearance
// ============================================================================

/// One character's appearance in one movie, as scraped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAppearance {
    /// Movie title (column key)
    pub movie: String,
    /// Character name as written in the listing
    pub character: String,
    /// Unparsed screen time, e.g. `"5:30"`, `":45"`, `"90"`
    pub screen_time: String,
}

impl RawAppearance {
    pub fn new(
        movie: impl Into<String>,
        character: impl Into<String>,
        screen_time: impl Into<String>,
    ) -> Self {
        Self {
            movie: movie.into(),
            character: character.into(),
            screen_time: screen_time.into(),
        }
    }
}

// ============================================================================
// Movie Lengths
// ============================================================================

/// Total runtime in minutes for each movie. Only used as a TF divisor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieLengths {
    minutes: FxHashMap<String, u32>,
}

impl MovieLengths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a runtime, replacing any previous entry for the movie
    pub fn insert(&mut self, movie: impl Into<String>, minutes: u32) {
        self.minutes.insert(movie.into(), minutes);
    }

    /// Runtime of `movie` in minutes.
    ///
    /// A missing or zero entry is fatal: TF cannot be normalized without it.
    pub fn runtime(&self, movie: &str) -> Result<f64> {
        match self.minutes.get(movie) {
            None => Err(TfIdfError::missing_runtime(movie)),
            Some(0) => Err(TfIdfError::invalid_runtime(movie, "0")),
            Some(&minutes) => Ok(minutes as f64),
        }
    }

    pub fn len(&self) -> usize {
        self.minutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for MovieLengths {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut lengths = MovieLengths::new();
        for (movie, minutes) in iter {
            lengths.insert(movie, minutes);
        }
        lengths
    }
}

// ============================================================================
// Alias Conflict Policy
// ============================================================================

/// What to do when two aliases of one character both hold a time for the
/// same movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasConflictPolicy {
    /// Keep the value from the last alias visited (legacy behavior).
    #[default]
    LastWins,
    /// Fail the run with [`TfIdfError::AliasConflict`].
    Reject,
}

impl AliasConflictPolicy {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "reject" | "strict" | "error" => AliasConflictPolicy::Reject,
            _ => AliasConflictPolicy::LastWins,
        }
    }
}

impl std::str::FromStr for AliasConflictPolicy {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(AliasConflictPolicy::parse(value))
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for a scoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfConfig {
    /// Fixed franchise size N used by both IDF and the franchise contribution.
    /// Deliberately not derived from the live column count.
    #[serde(default = "default_franchise_size")]
    pub franchise_size: usize,
    /// Movie columns removed after alias merging
    #[serde(default = "default_excluded_movies")]
    pub excluded_movies: Vec<String>,
    /// Alias merge conflict handling
    #[serde(default)]
    pub alias_conflict: AliasConflictPolicy,
    /// Drop rows whose every time fails to parse before computing statistics
    #[serde(default = "default_prune_empty_rows")]
    pub prune_empty_rows: bool,
}

fn default_franchise_size() -> usize {
    DEFAULT_FRANCHISE_SIZE
}

fn default_excluded_movies() -> Vec<String> {
    vec![DEFAULT_EXCLUDED_MOVIE.to_string()]
}

fn default_prune_empty_rows() -> bool {
    true
}

impl Default for TfIdfConfig {
    fn default() -> Self {
        Self {
            franchise_size: default_franchise_size(),
            excluded_movies: default_excluded_movies(),
            alias_conflict: AliasConflictPolicy::default(),
            prune_empty_rows: default_prune_empty_rows(),
        }
    }
}

impl TfIdfConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.franchise_size == 0 {
            return Err(TfIdfError::invalid_config("franchise_size must be > 0"));
        }

        if self.excluded_movies.iter().any(|m| m.trim().is_empty()) {
            return Err(TfIdfError::invalid_config(
                "excluded_movies must not contain blank titles",
            ));
        }

        Ok(())
    }

    /// Builder method: set the fixed franchise size N
    pub fn with_franchise_size(mut self, franchise_size: usize) -> Self {
        self.franchise_size = franchise_size;
        self
    }

    /// Builder method: replace the excluded movie list
    pub fn with_excluded_movies<I, S>(mut self, movies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_movies = movies.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: set the alias conflict policy
    pub fn with_alias_conflict(mut self, policy: AliasConflictPolicy) -> Self {
        self.alias_conflict = policy;
        self
    }

    /// Builder method: toggle pruning of rows with no parseable time
    pub fn with_prune_empty_rows(mut self, prune: bool) -> Self {
        self.prune_empty_rows = prune;
        self
    }

    pub fn is_excluded(&self, movie: &str) -> bool {
        self.excluded_movies.iter().any(|m| m == movie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TfIdfConfig::default();
        assert_eq!(config.franchise_size, 23);
        assert!(config.is_excluded("Spider-Man: Far from Home"));
        assert_eq!(config.alias_conflict, AliasConflictPolicy::LastWins);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = TfIdfConfig::default().with_franchise_size(0);
        assert!(config.validate().is_err());

        let config = TfIdfConfig::default().with_excluded_movies(["  "]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: TfIdfConfig = serde_json::from_str(r#"{"franchise_size": 5}"#).unwrap();
        assert_eq!(config.franchise_size, 5);
        assert_eq!(config.excluded_movies, vec![DEFAULT_EXCLUDED_MOVIE.to_string()]);
        assert!(config.prune_empty_rows);

        let config: TfIdfConfig =
            serde_json::from_str(r#"{"alias_conflict": "reject", "excluded_movies": []}"#)
                .unwrap();
        assert_eq!(config.alias_conflict, AliasConflictPolicy::Reject);
        assert!(config.excluded_movies.is_empty());
    }

    #[test]
    fn test_alias_policy_from_str() {
        assert_eq!(
            "strict".parse::<AliasConflictPolicy>().unwrap(),
            AliasConflictPolicy::Reject
        );
        assert_eq!(
            "anything".parse::<AliasConflictPolicy>().unwrap(),
            AliasConflictPolicy::LastWins
        );
    }

    #[test]
    fn test_movie_lengths() {
        let lengths: MovieLengths = [("Iron Man", 126), ("Broken", 0)].into_iter().collect();
        assert_eq!(lengths.runtime("Iron Man").unwrap(), 126.0);
        assert_eq!(
            lengths.runtime("Thor"),
            Err(TfIdfError::missing_runtime("Thor"))
        );
        assert!(matches!(
            lengths.runtime("Broken"),
            Err(TfIdfError::InvalidRuntime { .. })
        ));
    }
}
