//! Building one [`DemographicYearFact`] from a raw response body

use tracing::{debug, warn};

use super::{aggregate, parse, reduce};
use crate::models::{DemographicYearFact, Year};

/// Parse, aggregate and reduce one (country, year) response
///
/// `requested_year` is the year the caller asked the upstream for. It is
/// used when the body yields no qualifying rows, so an empty or fully
/// filtered response still produces a zero-valued fact for that year.
pub fn assemble(country: &str, requested_year: Year, raw_text: &str) -> DemographicYearFact {
    let parsed = parse(raw_text, country);

    let year = match parsed.year {
        Some(year) => {
            if year != requested_year {
                warn!(
                    country = %country,
                    requested = requested_year,
                    reported = year,
                    "Response year differs from requested year, using reported year"
                );
            }
            year
        }
        None => {
            debug!(country = %country, year = requested_year, "No qualifying rows, using zeroed fact");
            return DemographicYearFact::empty(country, requested_year);
        }
    };

    let buckets = aggregate(&parsed.facts);
    let indicator_value = reduce(&parsed.facts);

    DemographicYearFact::new(country, year, indicator_value, buckets)
}
