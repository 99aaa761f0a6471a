//! Parsing of raw listing text
//!
//! - [`time`] turns a screen-time string into minutes (or absent)
//! - [`listing`] splits scraped listing lines and runtimes

pub mod listing;
pub mod time;

pub use listing::{
    parse_appearance, parse_movie_appearances, parse_runtime, Listing, MovieListing, RawRuntime,
};
pub use time::parse_minutes;
