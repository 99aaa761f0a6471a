//! # franchise_tfidf
//!
//! Screen-time TF-IDF scoring for characters across a film franchise.
//!
//! A character's screen time in a movie plays the role of term frequency,
//! and how rarely the character shows up across the franchise plays the role
//! of inverse document frequency:
//!
//! - **TF** = minutes on screen / movie runtime
//! - **IDF** = `ln(N / DF)`, with `N` the fixed franchise size and `DF` the
//!   number of movies the character appears in
//! - **Contribution** = mean TF-IDF over the character's own movies, and
//!   TF-IDF sum over `N`
//!
//! ## Quick start
//!
//! ```
//! use franchise_tfidf::{AllowList, Pipeline, RawAppearance, MovieLengths, TfIdfConfig};
//! use franchise_tfidf::pipeline::NoopObserver;
//!
//! let allow_list = AllowList::from_pairs([("Tony Stark", "iron_man")]);
//! let config = TfIdfConfig::default().with_franchise_size(2);
//! let pipeline = Pipeline::new(config, allow_list).unwrap();
//!
//! let movies = vec!["M1".to_string(), "M2".to_string()];
//! let appearances = vec![RawAppearance::new("M1", "Tony Stark", "10:00")];
//! let lengths: MovieLengths = [("M1", 120), ("M2", 90)].into_iter().collect();
//!
//! let output = pipeline
//!     .run_appearances(&movies, &appearances, &lengths, &mut NoopObserver)
//!     .unwrap();
//! assert_eq!(output.ranking[0].character, "iron_man");
//! ```

pub mod errors;
pub mod identity;
pub mod io;
pub mod matrix;
pub mod parse;
pub mod pipeline;
pub mod rank;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use errors::{Result, TfIdfError};
pub use identity::{AllowList, IdentityResolver, Resolution};
pub use matrix::{Matrix, MatrixBuilder, RawMatrix, ScreenTimeMatrix};
pub use parse::{parse_minutes, Listing, MovieListing, RawRuntime};
pub use pipeline::{Pipeline, PipelineOutput};
pub use rank::ContributionScore;
pub use stats::{DocumentFrequency, InverseDocumentFrequency, PerCharacter, Statistics};
pub use types::{AliasConflictPolicy, MovieLengths, RawAppearance, TfIdfConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
