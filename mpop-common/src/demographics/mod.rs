//! Demographic normalization pipeline
//!
//! raw response text → [`parse`] → raw facts → {[`aggregate`], [`reduce`]}
//! → [`assemble`] → one `DemographicYearFact` per (country, year).
//!
//! Everything here is pure and synchronous. Bad rows are skipped, empty
//! responses become zero-valued facts; nothing in this module returns an
//! error.

pub mod aggregate;
pub mod assemble;
pub mod indicator;
pub mod parser;

pub use aggregate::{aggregate, coarse_bucket_for};
pub use assemble::assemble;
pub use indicator::reduce;
pub use parser::{parse, MalformedLine, ParsedResponse};
