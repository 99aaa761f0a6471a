//! Listing line parsing
//!
//! Each scraped listing line reads `Character Name <mm:ss>`: the name runs up
//! to the first `<`, the time runs from there to the next `>` (or `<`).

use crate::errors::{Result, TfIdfError};
use crate::types::{MovieLengths, RawAppearance, TfIdfConfig};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Runtime as scraped: either a bare number or text like `"143 min"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRuntime {
    Minutes(u32),
    Text(String),
}

/// One movie of the scraped listing, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieListing {
    pub title: String,
    #[serde(default)]
    pub runtime: Option<RawRuntime>,
    /// Lines of the form `Character Name <mm:ss>`
    #[serde(default)]
    pub characters: Vec<String>,
}

/// The full scraped dataset handed over by the acquisition side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub movies: Vec<MovieListing>,
}

impl Listing {
    /// Movie titles in listing order
    pub fn titles(&self) -> Vec<String> {
        self.movies.iter().map(|m| m.title.clone()).collect()
    }

    /// Runtimes of every movie that has one, excluded movies skipped.
    ///
    /// Movies without a runtime are left out here and surface later as
    /// [`TfIdfError::MissingRuntime`] if they reach the TF stage.
    pub fn movie_lengths(&self, config: &TfIdfConfig) -> Result<MovieLengths> {
        let mut lengths = MovieLengths::new();
        for movie in self.movies.iter().filter(|m| !config.is_excluded(&m.title)) {
            let minutes = match &movie.runtime {
                None => continue,
                Some(RawRuntime::Minutes(0)) => {
                    return Err(TfIdfError::invalid_runtime(&movie.title, "0"))
                }
                Some(RawRuntime::Minutes(minutes)) => *minutes,
                Some(RawRuntime::Text(text)) => parse_runtime(&movie.title, text)?,
            };
            lengths.insert(movie.title.clone(), minutes);
        }
        Ok(lengths)
    }

    /// All appearances, movie by movie in listing order
    pub fn appearances(&self) -> Result<Vec<RawAppearance>> {
        let mut appearances = Vec::new();
        for movie in &self.movies {
            appearances.extend(parse_movie_appearances(
                &movie.title,
                movie.characters.iter().map(String::as_str),
            )?);
        }
        Ok(appearances)
    }
}

/// Split one listing line into a [`RawAppearance`].
///
/// Blank lines yield `Ok(None)`. A non-blank line without a `<` marker is
/// malformed.
pub fn parse_appearance(movie: &str, line: &str) -> Result<Option<RawAppearance>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (name, rest) = line
        .split_once('<')
        .ok_or_else(|| TfIdfError::malformed_appearance(movie, line))?;
    let time = match rest.find(|c: char| c == '<' || c == '>') {
        Some(end) => &rest[..end],
        None => rest,
    };

    Ok(Some(RawAppearance::new(movie, name.trim(), time.trim())))
}

/// Parse all listing lines of one movie.
///
/// A name listed twice keeps its first position and its last time.
pub fn parse_movie_appearances<'a, I>(movie: &str, lines: I) -> Result<Vec<RawAppearance>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut appearances: Vec<RawAppearance> = Vec::new();
    let mut position: FxHashMap<String, usize> = FxHashMap::default();

    for line in lines {
        let Some(appearance) = parse_appearance(movie, line)? else {
            continue;
        };
        match position.get(&appearance.character) {
            Some(&idx) => appearances[idx].screen_time = appearance.screen_time,
            None => {
                position.insert(appearance.character.clone(), appearances.len());
                appearances.push(appearance);
            }
        }
    }

    Ok(appearances)
}

/// Parse a listing runtime such as `"143 min"` into whole minutes.
///
/// Only the first whitespace-separated token is read.
pub fn parse_runtime(movie: &str, raw: &str) -> Result<u32> {
    let token = raw.split_whitespace().next().unwrap_or("");
    match token.parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(TfIdfError::invalid_runtime(movie, raw)),
    }
}
