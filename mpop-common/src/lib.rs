//! # mpop Common Library
//!
//! Shared code for the movie popularity service including:
//! - Data model (demographic facts, movie facts, fused records)
//! - Demographic normalization pipeline (parse, aggregate, reduce, assemble)
//! - Year-keyed join of the two series
//! - Static code tables
//! - Configuration loading

pub mod codes;
pub mod config;
pub mod demographics;
pub mod error;
pub mod join;
pub mod models;
pub mod year_range;

pub use codes::CodeTables;
pub use demographics::{aggregate, assemble, parse, reduce};
pub use error::{Error, Result};
pub use join::join;
pub use year_range::YearRange;
