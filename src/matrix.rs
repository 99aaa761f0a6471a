//! Character × movie tables
//!
//! [`Matrix`] is a dense row-major table with one row per canonical
//! character and one column per movie. Every cell is an `Option<T>`:
//! `None` means the character does not appear in that movie. Each pipeline
//! pass produces a new matrix instead of rewriting cells in place.

use crate::errors::Result;
use crate::identity::Resolution;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Raw screen-time strings, before parsing
pub type RawMatrix = Matrix<String>;

/// Screen time in minutes
pub type ScreenTimeMatrix = Matrix<f64>;

/// A character × movie table with absent-or-present cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    characters: Vec<String>,
    movies: Vec<String>,
    cells: Vec<Option<T>>,
}

impl<T> Matrix<T> {
    /// An all-absent matrix with the given labels
    pub fn empty(characters: Vec<String>, movies: Vec<String>) -> Self {
        let len = characters.len() * movies.len();
        let mut cells = Vec::with_capacity(len);
        cells.resize_with(len, || None);
        Self {
            characters,
            movies,
            cells,
        }
    }

    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    pub fn movies(&self) -> &[String] {
        &self.movies
    }

    pub fn num_rows(&self) -> usize {
        self.characters.len()
    }

    pub fn num_columns(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.movies.len() + col
    }

    /// Cell at `(row, col)`; `None` when absent or out of range
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.num_rows() || col >= self.num_columns() {
            return None;
        }
        self.cells[self.index(row, col)].as_ref()
    }

    /// Cell looked up by labels
    pub fn get_by_name(&self, character: &str, movie: &str) -> Option<&T> {
        let row = self.row_index(character)?;
        let col = self.column_index(movie)?;
        self.get(row, col)
    }

    /// Overwrite a cell. Out-of-range positions are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: Option<T>) {
        if row < self.num_rows() && col < self.num_columns() {
            let idx = self.index(row, col);
            self.cells[idx] = value;
        }
    }

    pub fn row_index(&self, character: &str) -> Option<usize> {
        self.characters.iter().position(|c| c == character)
    }

    pub fn column_index(&self, movie: &str) -> Option<usize> {
        self.movies.iter().position(|m| m == movie)
    }

    /// All cells of one row, in column order
    pub fn row(&self, row: usize) -> &[Option<T>] {
        let cols = self.num_columns();
        &self.cells[row * cols..(row + 1) * cols]
    }

    /// Iterate `(character, row cells)`
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[Option<T>])> + '_ {
        (0..self.num_rows()).map(move |r| (self.characters[r].as_str(), self.row(r)))
    }

    /// Present values of one row, in column order
    pub fn present_in_row(&self, row: usize) -> impl Iterator<Item = &T> + '_ {
        self.row(row).iter().flatten()
    }

    /// Build a new matrix by visiting every cell. Absent cells stay absent;
    /// `f` decides whether a present cell stays present.
    pub fn map<U, F>(&self, mut f: F) -> Matrix<U>
    where
        F: FnMut(&T) -> Option<U>,
    {
        Matrix {
            characters: self.characters.clone(),
            movies: self.movies.clone(),
            cells: self.cells.iter().map(|c| c.as_ref().and_then(&mut f)).collect(),
        }
    }

    /// Like [`Matrix::map`], with the cell's `(row, col)` and a fallible
    /// callback. Stops at the first error.
    pub fn try_map_indexed<U, F>(&self, mut f: F) -> Result<Matrix<U>>
    where
        F: FnMut(usize, usize, &T) -> Result<Option<U>>,
    {
        let cols = self.num_columns();
        let mut cells = Vec::with_capacity(self.cells.len());
        for (idx, cell) in self.cells.iter().enumerate() {
            let mapped = match cell {
                Some(value) => f(idx / cols, idx % cols, value)?,
                None => None,
            };
            cells.push(mapped);
        }
        Ok(Matrix {
            characters: self.characters.clone(),
            movies: self.movies.clone(),
            cells,
        })
    }

    /// Keep only rows for which `keep` returns true
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &[Option<T>]) -> bool,
    {
        let cols = self.num_columns();
        let mut characters = Vec::with_capacity(self.characters.len());
        let mut cells = Vec::with_capacity(self.cells.len());
        let mut old_cells = std::mem::take(&mut self.cells).into_iter();

        for character in std::mem::take(&mut self.characters) {
            let row: Vec<Option<T>> = old_cells.by_ref().take(cols).collect();
            if keep(&character, &row) {
                characters.push(character);
                cells.extend(row);
            }
        }

        self.characters = characters;
        self.cells = cells;
    }

    /// Remove a movie column. Returns `false` if there was no such column.
    pub fn remove_movie(&mut self, movie: &str) -> bool {
        let Some(col) = self.column_index(movie) else {
            return false;
        };
        let cols = self.num_columns();
        let cells = std::mem::take(&mut self.cells);
        self.cells = cells
            .into_iter()
            .enumerate()
            .filter(|(idx, _)| idx % cols != col)
            .map(|(_, cell)| cell)
            .collect();
        self.movies.remove(col);
        true
    }

    /// Number of present cells in a row
    pub fn present_count(&self, row: usize) -> usize {
        self.row(row).iter().filter(|c| c.is_some()).count()
    }
}

// ============================================================================
// Matrix Builder
// ============================================================================

/// Assembles resolved appearances into a [`RawMatrix`].
///
/// Purely structural: cell values stay raw strings.
#[derive(Debug, Default)]
pub struct MatrixBuilder {
    characters: Vec<String>,
    movies: Vec<String>,
    row_of: FxHashMap<String, usize>,
    col_of: FxHashMap<String, usize>,
    entries: Vec<(usize, usize, String)>,
}

impl MatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from known row and column labels (in order)
    pub fn with_labels(characters: &[String], movies: &[String]) -> Self {
        let mut builder = Self::new();
        for character in characters {
            builder.row_for(character);
        }
        for movie in movies {
            builder.column_for(movie);
        }
        builder
    }

    fn row_for(&mut self, character: &str) -> usize {
        if let Some(&row) = self.row_of.get(character) {
            return row;
        }
        let row = self.characters.len();
        self.characters.push(character.to_string());
        self.row_of.insert(character.to_string(), row);
        row
    }

    fn column_for(&mut self, movie: &str) -> usize {
        if let Some(&col) = self.col_of.get(movie) {
            return col;
        }
        let col = self.movies.len();
        self.movies.push(movie.to_string());
        self.col_of.insert(movie.to_string(), col);
        col
    }

    /// Place a raw time; unseen labels get a new row/column. A later value
    /// for the same cell replaces the earlier one.
    pub fn insert(&mut self, character: &str, movie: &str, screen_time: &str) {
        let row = self.row_for(character);
        let col = self.column_for(movie);
        self.entries.push((row, col, screen_time.to_string()));
    }

    pub fn build(self) -> RawMatrix {
        let mut matrix = Matrix::empty(self.characters, self.movies);
        for (row, col, value) in self.entries {
            matrix.set(row, col, Some(value));
        }
        matrix
    }
}

/// Build the raw screen-time matrix from a [`Resolution`]
pub fn build_matrix(resolution: &Resolution) -> RawMatrix {
    let mut builder = MatrixBuilder::with_labels(&resolution.characters, &resolution.movies);
    for appearance in &resolution.appearances {
        builder.insert(&appearance.character, &appearance.movie, &appearance.screen_time);
    }
    builder.build()
}
