//! Screen-time TF-IDF statistics
//!
//! Four passes, each producing a new table from the previous one:
//!
//! 1. document frequency: movies with a recorded time, per character
//! 2. IDF: `ln(N / DF)` with `N` the configured franchise size
//! 3. TF: minutes / movie runtime, per present cell
//! 4. TF-IDF: TF × IDF of the row's character, per present cell
//!
//! `N` is a fixed configuration value, not the live column count.

use crate::errors::{Result, TfIdfError};
use crate::matrix::{Matrix, ScreenTimeMatrix};
use crate::types::MovieLengths;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One value per character, aligned with the matrix rows it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerCharacter<T> {
    characters: Vec<String>,
    values: Vec<T>,
}

impl<T> PerCharacter<T> {
    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn get(&self, character: &str) -> Option<&T> {
        let idx = self.characters.iter().position(|c| c == character)?;
        self.values.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.characters
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub type DocumentFrequency = PerCharacter<usize>;
pub type InverseDocumentFrequency = PerCharacter<f64>;

/// Count the movies each character has a time in
pub fn document_frequency(matrix: &ScreenTimeMatrix) -> DocumentFrequency {
    PerCharacter {
        characters: matrix.characters().to_vec(),
        values: (0..matrix.num_rows())
            .map(|row| matrix.present_count(row))
            .collect(),
    }
}

/// `ln(N / DF)` per character.
///
/// A zero DF is a broken invariant and fails instead of producing infinity.
pub fn inverse_document_frequency(
    df: &DocumentFrequency,
    franchise_size: usize,
) -> Result<InverseDocumentFrequency> {
    let n = franchise_size as f64;
    let values = df
        .iter()
        .map(|(character, &count)| {
            if count == 0 {
                return Err(TfIdfError::zero_document_frequency(character));
            }
            Ok((n / count as f64).ln())
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(PerCharacter {
        characters: df.characters.clone(),
        values,
    })
}

/// Minutes divided by movie runtime for every present cell.
///
/// Every movie column needs a runtime, even one with no present cells.
pub fn term_frequency(matrix: &ScreenTimeMatrix, lengths: &MovieLengths) -> Result<Matrix<f64>> {
    let runtimes = matrix
        .movies()
        .iter()
        .map(|movie| lengths.runtime(movie))
        .collect::<Result<Vec<f64>>>()?;

    matrix.try_map_indexed(|_, col, minutes| Ok(Some(minutes / runtimes[col])))
}

/// TF × IDF for every present cell
pub fn tf_idf(tf: &Matrix<f64>, idf: &InverseDocumentFrequency) -> Result<Matrix<f64>> {
    if tf.characters() != idf.characters() {
        return Err(TfIdfError::internal(
            "TF rows and IDF characters are not aligned",
        ));
    }
    tf.try_map_indexed(|row, _, value| Ok(Some(value * idf.values[row])))
}

/// All statistics passes for one matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub document_frequency: DocumentFrequency,
    pub idf: InverseDocumentFrequency,
    pub tf: Matrix<f64>,
    pub tf_idf: Matrix<f64>,
}

impl Statistics {
    /// Run the four passes in order
    pub fn compute(
        matrix: &ScreenTimeMatrix,
        lengths: &MovieLengths,
        franchise_size: usize,
    ) -> Result<Self> {
        let document_frequency = document_frequency(matrix);
        let idf = inverse_document_frequency(&document_frequency, franchise_size)?;
        let tf = term_frequency(matrix, lengths)?;
        let tf_idf = tf_idf(&tf, &idf)?;

        debug!(
            characters = matrix.num_rows(),
            movies = matrix.num_columns(),
            franchise_size,
            "computed tf-idf statistics"
        );

        Ok(Self {
            document_frequency,
            idf,
            tf,
            tf_idf,
        })
    }
}
