//! Year-keyed inner join of the demographic and movie-count series

use std::collections::HashMap;

use tracing::debug;

use crate::models::{DemographicYearFact, FusedYearRecord, MovieYearFact, Year};

/// Join demographic facts with movie facts on year
///
/// - Duplicate demographic years: the last one in `demographics` wins.
/// - Output follows the order of `movies`; no sorting happens here.
/// - Years present in only one series are dropped without a warning.
pub fn join(
    demographics: Vec<DemographicYearFact>,
    movies: Vec<MovieYearFact>,
) -> Vec<FusedYearRecord> {
    let demographic_count = demographics.len();
    let movie_count = movies.len();

    let by_year: HashMap<Year, DemographicYearFact> = demographics
        .into_iter()
        .map(|fact| (fact.year(), fact))
        .collect();

    let fused: Vec<FusedYearRecord> = movies
        .into_iter()
        .filter_map(|movie| {
            let demographic = by_year.get(&movie.year)?.clone();
            Some(FusedYearRecord {
                country: demographic.country().to_string(),
                genre: movie.genre,
                year: movie.year,
                demographic,
                movie_count: movie.movie_count,
            })
        })
        .collect();

    debug!(
        demographics = demographic_count,
        movies = movie_count,
        fused = fused.len(),
        "Joined series by year"
    );

    fused
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AgeBuckets;
    use std::collections::BTreeSet;

    fn demographic(year: Year, indicator: u64) -> DemographicYearFact {
        DemographicYearFact::new("246", year, indicator, AgeBuckets::default())
    }

    fn movie(year: Year, count: u64) -> MovieYearFact {
        MovieYearFact {
            genre: "28".to_string(),
            year,
            country: "fi".to_string(),
            movie_count: count,
        }
    }

    #[test]
    fn test_join_drops_unmatched_movie_year() {
        let fused = join(vec![demographic(2000, 250)], vec![movie(1999, 5), movie(2000, 7)]);

        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].year, 2000);
        assert_eq!(fused[0].movie_count, 7);
        assert_eq!(fused[0].demographic.indicator_value(), 250);
        assert_eq!(fused[0].country, "246");
        assert_eq!(fused[0].genre, "28");
    }

    #[test]
    fn test_join_drops_unmatched_demographic_year() {
        let fused = join(vec![demographic(2000, 1), demographic(2001, 2)], vec![movie(2001, 3)]);
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].year, 2001);
    }

    #[test]
    fn test_join_output_is_intersection() {
        let demographics: Vec<_> = [1990, 1992, 1994, 1995].iter().map(|y| demographic(*y, 0)).collect();
        let movies: Vec<_> = (1990..=1995).map(|y| movie(y, 1)).collect();
        let fused = join(demographics, movies);

        let years: BTreeSet<Year> = fused.iter().map(|r| r.year).collect();
        assert_eq!(years, BTreeSet::from([1990, 1992, 1994, 1995]));
        assert!(fused.len() <= 4);
    }

    #[test]
    fn test_join_preserves_movie_order() {
        let demographics = vec![demographic(2002, 0), demographic(2000, 0), demographic(2001, 0)];
        let movies = vec![movie(2001, 1), movie(2000, 2), movie(2002, 3)];
        let years: Vec<Year> = join(demographics, movies).iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2001, 2000, 2002]);
    }

    #[test]
    fn test_duplicate_demographic_year_last_wins() {
        let fused = join(vec![demographic(2000, 1), demographic(2000, 2)], vec![movie(2000, 9)]);
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].demographic.indicator_value(), 2);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(join(vec![], vec![movie(2000, 1)]).is_empty());
        assert!(join(vec![demographic(2000, 1)], vec![]).is_empty());
    }

    #[test]
    fn test_zero_movie_count_still_joined() {
        let fused = join(vec![demographic(2000, 1)], vec![movie(2000, 0)]);
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].movie_count, 0);
    }
}
