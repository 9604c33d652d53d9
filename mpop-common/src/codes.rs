//! Static code tables mapping user-facing names to upstream codes
//!
//! Built once at startup and shared read-only (`Arc<CodeTables>`).

use serde::Serialize;
use std::collections::BTreeMap;

/// UN location code used for unknown countries (Finland)
pub const DEFAULT_LOCATION_CODE: &str = "246";

/// TMDB original-language code used for unknown countries
pub const DEFAULT_LANGUAGE_CODE: &str = "fi";

/// TMDB genre id used for unknown genres (Action)
pub const DEFAULT_GENRE_CODE: &str = "28";

const COUNTRIES: &[(&str, &str, &str)] = &[
    // name, UN location code, TMDB original language
    ("Finland", "246", "fi"),
    ("Germany", "276", "de"),
    ("Poland", "616", "pl"),
    ("Sweden", "752", "sv"),
    ("Japanese", "392", "ja"),
    ("Netherlands", "528", "nl"),
    ("Greece", "300", "el"),
];

const GENRES: &[(&str, &str)] = &[
    ("Action", "28"),
    ("Adventure", "12"),
    ("Animation", "16"),
    ("Comedy", "35"),
    ("Crime", "80"),
    ("Documentary", "99"),
    ("Drama", "18"),
    ("Family", "10751"),
    ("Fantasy", "14"),
    ("History", "36"),
    ("Horror", "27"),
    ("Romance", "10749"),
    ("Science Fiction", "878"),
    ("Thriller", "53"),
    ("War", "10752"),
    ("Western", "37"),
];

const INDICATORS: &[(&str, &str)] = &[
    ("Total Population", "46"),
    ("Life expectancy at birth", "61"),
    ("Population change", "50"),
    ("Total net migration", "65"),
];

/// Name → code lookup tables
///
/// Serializes to the `codeMappings` JSON shape
/// (`countries`, `movieCountries`, `genres`, `indicators`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeTables {
    countries: BTreeMap<String, String>,
    movie_countries: BTreeMap<String, String>,
    genres: BTreeMap<String, String>,
    indicators: BTreeMap<String, String>,
}

fn table(pairs: impl IntoIterator<Item = (&'static str, &'static str)>) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl CodeTables {
    /// Tables for the supported countries, genres and indicators
    pub fn builtin() -> Self {
        Self {
            countries: table(COUNTRIES.iter().map(|(name, loc, _)| (*name, *loc))),
            movie_countries: table(COUNTRIES.iter().map(|(name, _, lang)| (*name, *lang))),
            genres: table(GENRES.iter().copied()),
            indicators: table(INDICATORS.iter().copied()),
        }
    }

    /// UN location code for a country name, Finland when unknown
    pub fn location_code(&self, country: &str) -> &str {
        self.countries
            .get(country)
            .map(String::as_str)
            .unwrap_or(DEFAULT_LOCATION_CODE)
    }

    /// TMDB original-language code for a country name, Finnish when unknown
    pub fn language_code(&self, country: &str) -> &str {
        self.movie_countries
            .get(country)
            .map(String::as_str)
            .unwrap_or(DEFAULT_LANGUAGE_CODE)
    }

    /// TMDB genre id for a genre name, Action when unknown
    pub fn genre_code(&self, genre: &str) -> &str {
        self.genres
            .get(genre)
            .map(String::as_str)
            .unwrap_or(DEFAULT_GENRE_CODE)
    }

    /// UN indicator code for an indicator name
    ///
    /// Anything that is not a known name is assumed to already be a code.
    pub fn indicator_code<'a>(&'a self, indicator: &'a str) -> &'a str {
        self.indicators
            .get(indicator)
            .map(String::as_str)
            .unwrap_or(indicator)
    }

    pub fn countries(&self) -> &BTreeMap<String, String> {
        &self.countries
    }

    pub fn genres(&self) -> &BTreeMap<String, String> {
        &self.genres
    }

    pub fn indicators(&self) -> &BTreeMap<String, String> {
        &self.indicators
    }
}

impl Default for CodeTables {
    fn default() -> Self {
        Self::builtin()
    }
}
