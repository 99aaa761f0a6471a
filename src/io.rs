//! File collaborators: dataset loading and table persistence.
//!
//! The scoring core never touches the filesystem; these helpers read the
//! scraped listing (JSON) and the character allow-list (CSV), and write the
//! three result tables as CSV. Absent cells are written as empty fields.

use crate::errors::Result;
use crate::identity::AllowList;
use crate::matrix::Matrix;
use crate::parse::Listing;
use crate::pipeline::PipelineOutput;
use crate::rank::ContributionScore;
use crate::types::TfIdfConfig;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const SCREEN_TIME_FILE: &str = "character_screen_time_every_movie.csv";
pub const TF_IDF_FILE: &str = "character_tf_idf_every_movie.csv";
pub const CONTRIBUTION_FILE: &str = "character_tf_idf_mcu_contribution.csv";

pub const MEAN_OWN_MOVIES_HEADER: &str = "TF-IDF Their Movies Only";
pub const FRANCHISE_CONTRIBUTION_HEADER: &str = "TF-IDF MCU Contribution";

#[derive(Debug, Deserialize)]
struct AllowListRecord {
    #[serde(rename = "Character Name")]
    name: String,
    #[serde(rename = "Character ID")]
    id: String,
}

/// Read an allow-list with `Character Name,Character ID` headers
pub fn read_allow_list<R: Read>(reader: R) -> Result<AllowList> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut list = AllowList::new();
    for record in csv_reader.deserialize::<AllowListRecord>() {
        let record = record?;
        list.insert(record.name, record.id);
    }
    Ok(list)
}

pub fn load_allow_list(path: &Path) -> Result<AllowList> {
    let list = read_allow_list(File::open(path)?)?;
    debug!(path = %path.display(), characters = list.len(), "loaded allow-list");
    Ok(list)
}

/// Load a scraped listing from JSON
pub fn load_listing(path: &Path) -> Result<Listing> {
    let listing: Listing = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), movies = listing.movies.len(), "loaded listing");
    Ok(listing)
}

/// Load a [`TfIdfConfig`] from JSON; missing fields take their defaults
pub fn load_config(path: &Path) -> Result<TfIdfConfig> {
    let config: TfIdfConfig = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    Ok(config)
}

/// Write a character × movie table
pub fn write_matrix<W: Write>(writer: W, matrix: &Matrix<f64>) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec![String::new()];
    header.extend(matrix.movies().iter().cloned());
    csv_writer.write_record(&header)?;

    for (character, cells) in matrix.rows() {
        let mut record = vec![character.to_string()];
        record.extend(cells.iter().map(|cell| match cell {
            Some(value) => format_value(*value),
            None => String::new(),
        }));
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the ranked contribution table
pub fn write_contributions<W: Write>(writer: W, ranking: &[ContributionScore]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["", MEAN_OWN_MOVIES_HEADER, FRANCHISE_CONTRIBUTION_HEADER])?;
    for score in ranking {
        csv_writer.write_record([
            score.character.clone(),
            format_value(score.mean_own_movies),
            format_value(score.franchise_contribution),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write all three tables into `dir`, returning the written paths
pub fn write_tables(dir: &Path, output: &PipelineOutput) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let screen_time = dir.join(SCREEN_TIME_FILE);
    write_matrix(File::create(&screen_time)?, &output.screen_time)?;

    let tf_idf = dir.join(TF_IDF_FILE);
    write_matrix(File::create(&tf_idf)?, output.tf_idf())?;

    let contribution = dir.join(CONTRIBUTION_FILE);
    write_contributions(File::create(&contribution)?, &output.ranking)?;

    debug!(dir = %dir.display(), "wrote result tables");
    Ok(vec![screen_time, tf_idf, contribution])
}

/// Shortest round-trip form, always with a decimal point (`90.0`, not `90`)
fn format_value(value: f64) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_allow_list() {
        let data = "Character Name,Character ID\nTony Stark,iron_man\nIron Man , iron_man\n";
        let list = read_allow_list(data.as_bytes()).unwrap();
        assert_eq!(list.canonical("Tony Stark"), Some("iron_man"));
        assert_eq!(list.canonical("Iron Man"), Some("iron_man"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_read_allow_list_bad_header() {
        let data = "Name,ID\nTony Stark,iron_man\n";
        assert!(read_allow_list(data.as_bytes()).is_err());
    }

    #[test]
    fn test_write_matrix() {
        let mut m = Matrix::empty(vec!["x".to_string()], vec!["M1".to_string(), "M2".to_string()]);
        m.set(0, 0, Some(90.0));

        let mut buf = Vec::new();
        write_matrix(&mut buf, &m).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), ",M1,M2\nx,90.0,\n");
    }

    #[test]
    fn test_write_contributions() {
        let ranking = vec![ContributionScore::from_values("x", &[0.5], 2)];
        let mut buf = Vec::new();
        write_contributions(&mut buf, &ranking).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            ",TF-IDF Their Movies Only,TF-IDF MCU Contribution\nx,0.5,0.25\n"
        );
    }
}
