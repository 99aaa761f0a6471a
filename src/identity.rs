//! Character identity resolution
//!
//! Raw listing names are mapped to canonical IDs through an allow-list of
//! `(display name, canonical ID)` pairs. Names the allow-list does not know
//! are dropped. Once renamed, several aliases can land on the same
//! `(character, movie)` cell; those collisions are merged here, before any
//! numeric interpretation happens.

use crate::errors::{Result, TfIdfError};
use crate::parse::parse_minutes;
use crate::types::{AliasConflictPolicy, RawAppearance, TfIdfConfig};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

/// Tracked characters and their aliases
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    /// Display name to canonical ID
    aliases: FxHashMap<String, String>,
    /// All canonical IDs
    ids: FxHashSet<String>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(display name, canonical ID)` pairs.
    ///
    /// A display name listed twice keeps its last ID.
    pub fn from_pairs<I, N, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        let mut list = Self::new();
        for (name, id) in pairs {
            list.insert(name, id);
        }
        list
    }

    pub fn insert(&mut self, display_name: impl Into<String>, id: impl Into<String>) {
        let id = id.into();
        self.ids.insert(id.clone());
        self.aliases.insert(display_name.into(), id);
    }

    /// Canonical ID for a raw name.
    ///
    /// A raw name that already is a canonical ID resolves to itself.
    pub fn canonical<'a>(&'a self, raw_name: &'a str) -> Option<&'a str> {
        match self.aliases.get(raw_name) {
            Some(id) => Some(id.as_str()),
            None if self.ids.contains(raw_name) => Some(raw_name),
            None => None,
        }
    }

    /// Number of distinct canonical IDs
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Output of [`IdentityResolver::resolve`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Movie columns, excluded titles removed
    pub movies: Vec<String>,
    /// Canonical characters in first-seen order
    pub characters: Vec<String>,
    /// At most one appearance per `(character, movie)`
    pub appearances: Vec<RawAppearance>,
    /// Appearances dropped for not being on the allow-list
    pub dropped: usize,
    /// Appearances folded into an earlier alias
    pub merged: usize,
}

/// Renames, filters and merges raw appearances
#[derive(Debug)]
pub struct IdentityResolver<'a> {
    allow_list: &'a AllowList,
    config: &'a TfIdfConfig,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(allow_list: &'a AllowList, config: &'a TfIdfConfig) -> Self {
        Self { allow_list, config }
    }

    /// Resolve raw appearances against the allow-list.
    ///
    /// `movies` gives the column order. Movies only seen in `appearances`
    /// are appended in first-seen order. Excluded movies are removed after
    /// merging; characters left with no appearance at all are dropped.
    ///
    /// Duplicates collapse per canonical ID only. Two different characters
    /// whose merged rows happen to be identical both stay.
    pub fn resolve(&self, movies: &[String], appearances: &[RawAppearance]) -> Result<Resolution> {
        let mut merged_rows: Vec<RawAppearance> = Vec::new();
        let mut slots: FxHashMap<(String, String), usize> = FxHashMap::default();
        let mut order: Vec<String> = Vec::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut columns: Vec<String> = movies.to_vec();
        let mut dropped = 0;
        let mut merged = 0;

        for appearance in appearances {
            let Some(id) = self.allow_list.canonical(&appearance.character) else {
                dropped += 1;
                continue;
            };

            if !columns.contains(&appearance.movie) {
                columns.push(appearance.movie.clone());
            }
            if seen.insert(id.to_string()) {
                order.push(id.to_string());
            }

            let key = (id.to_string(), appearance.movie.clone());
            match slots.get(&key) {
                None => {
                    slots.insert(key, merged_rows.len());
                    merged_rows.push(RawAppearance::new(
                        &appearance.movie,
                        id,
                        &appearance.screen_time,
                    ));
                }
                Some(&idx) => {
                    merged += 1;
                    self.merge_into(&mut merged_rows[idx], &appearance.screen_time)?;
                }
            }
        }

        merged_rows.retain(|a| !self.config.is_excluded(&a.movie));
        columns.retain(|m| !self.config.is_excluded(m));

        let remaining: FxHashSet<&str> = merged_rows.iter().map(|a| a.character.as_str()).collect();
        let characters: Vec<String> = order
            .into_iter()
            .filter(|c| remaining.contains(c.as_str()))
            .collect();

        debug!(
            characters = characters.len(),
            movies = columns.len(),
            dropped,
            merged,
            "resolved character identities"
        );

        Ok(Resolution {
            movies: columns,
            characters,
            appearances: merged_rows,
            dropped,
            merged,
        })
    }

    /// Fold an alias's time into the cell already held for the character.
    ///
    /// A time the parser reads as absent (`"nan"`, `"n/a"`, blank) never
    /// overrides or conflicts with a present one.
    fn merge_into(&self, existing: &mut RawAppearance, incoming: &str) -> Result<()> {
        let Some(incoming_minutes) = parse_minutes(incoming) else {
            return Ok(());
        };
        match parse_minutes(&existing.screen_time) {
            None => {
                existing.screen_time = incoming.to_string();
                return Ok(());
            }
            Some(existing_minutes) if existing_minutes == incoming_minutes => return Ok(()),
            Some(_) => {}
        }

        match self.config.alias_conflict {
            AliasConflictPolicy::Reject => Err(TfIdfError::alias_conflict(
                &existing.character,
                &existing.movie,
            )),
            AliasConflictPolicy::LastWins => {
                warn!(
                    character = %existing.character,
                    movie = %existing.movie,
                    kept = incoming,
                    discarded = %existing.screen_time,
                    "alias conflict, keeping last value"
                );
                existing.screen_time = incoming.to_string();
                Ok(())
            }
        }
    }
}
