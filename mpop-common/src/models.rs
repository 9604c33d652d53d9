//! Data model shared by the pipeline and the HTTP surface
//!
//! Serialized field names follow the JSON contract the charting frontend
//! consumes (`populationInformation`, `populationAges`, `howManyMovies`).

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Calendar year as reported by the upstream sources
pub type Year = i32;

/// Sex dimension of a demographic row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
    /// "Both sexes" total, reported independently of the Male/Female rows
    Both,
}

impl Sex {
    /// Parse the upstream sex label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Male" => Some(Sex::Male),
            "Female" => Some(Sex::Female),
            "Both sexes" => Some(Sex::Both),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::Both => "Both sexes",
        }
    }
}

/// One (age bracket, sex) → count fact read from a single response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFact {
    /// Fine age bracket label, e.g. "0-4" or "100+"
    pub age_bracket: String,
    pub sex: Sex,
    pub count: u64,
    pub year: Year,
}

/// The four coarse life-stage buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BucketLabel {
    #[serde(rename = "0-14")]
    Children,
    #[serde(rename = "15-24")]
    Youth,
    #[serde(rename = "25-64")]
    Adults,
    #[serde(rename = "+65")]
    Elders,
}

impl BucketLabel {
    /// All labels in ascending age order
    pub const ALL: [BucketLabel; 4] = [
        BucketLabel::Children,
        BucketLabel::Youth,
        BucketLabel::Adults,
        BucketLabel::Elders,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BucketLabel::Children => "0-14",
            BucketLabel::Youth => "15-24",
            BucketLabel::Adults => "25-64",
            BucketLabel::Elders => "+65",
        }
    }

    fn index(&self) -> usize {
        match self {
            BucketLabel::Children => 0,
            BucketLabel::Youth => 1,
            BucketLabel::Adults => 2,
            BucketLabel::Elders => 3,
        }
    }
}

impl std::fmt::Display for BucketLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Male/female/both-sexes totals for one coarse bucket
///
/// `both_sexes_population` is summed from the source "Both sexes" rows and
/// is never derived from the male and female totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBucket {
    #[serde(rename = "ageRange")]
    pub label: BucketLabel,
    pub male_population: u64,
    pub female_population: u64,
    pub both_sexes_population: u64,
}

impl AgeBucket {
    pub fn zeroed(label: BucketLabel) -> Self {
        Self {
            label,
            male_population: 0,
            female_population: 0,
            both_sexes_population: 0,
        }
    }

    /// Add a count to the running total for `sex`
    pub fn add(&mut self, sex: Sex, count: u64) {
        let total = match sex {
            Sex::Male => &mut self.male_population,
            Sex::Female => &mut self.female_population,
            Sex::Both => &mut self.both_sexes_population,
        };
        *total = total.saturating_add(count);
    }
}

/// Fixed set of the four coarse buckets
///
/// Every label is always present; there is no way to remove one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeBuckets {
    buckets: [AgeBucket; 4],
}

impl Default for AgeBuckets {
    fn default() -> Self {
        Self {
            buckets: BucketLabel::ALL.map(AgeBucket::zeroed),
        }
    }
}

impl AgeBuckets {
    pub fn get(&self, label: BucketLabel) -> &AgeBucket {
        &self.buckets[label.index()]
    }

    /// Look up a bucket by its textual label ("0-14", "15-24", "25-64", "+65")
    pub fn by_label(&self, label: &str) -> Option<&AgeBucket> {
        self.buckets.iter().find(|b| b.label.as_str() == label)
    }

    pub fn add(&mut self, label: BucketLabel, sex: Sex, count: u64) {
        self.buckets[label.index()].add(sex, count);
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgeBucket> {
        self.buckets.iter()
    }
}

impl Serialize for AgeBuckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(bucket.label.as_str(), bucket)?;
        }
        map.end()
    }
}

/// Demographic summary of one (country, year) response
///
/// Built once by [`crate::demographics::assemble`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicYearFact {
    country: String,
    year: Year,
    indicator_value: u64,
    #[serde(rename = "populationAges")]
    age_buckets: AgeBuckets,
}

impl DemographicYearFact {
    pub fn new(
        country: impl Into<String>,
        year: Year,
        indicator_value: u64,
        age_buckets: AgeBuckets,
    ) -> Self {
        Self {
            country: country.into(),
            year,
            indicator_value,
            age_buckets,
        }
    }

    /// "No data for this year": indicator 0 and all buckets zeroed
    pub fn empty(country: impl Into<String>, year: Year) -> Self {
        Self::new(country, year, 0, AgeBuckets::default())
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn indicator_value(&self) -> u64 {
        self.indicator_value
    }

    pub fn age_buckets(&self) -> &AgeBuckets {
        &self.age_buckets
    }
}

/// Number of movies matching (genre, country) in one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieYearFact {
    pub genre: String,
    pub year: Year,
    pub country: String,
    /// 0 when the upstream source reports no matches
    pub movie_count: u64,
}

/// Terminal per-year record combining both series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FusedYearRecord {
    pub country: String,
    pub genre: String,
    pub year: Year,
    #[serde(rename = "populationInformation")]
    pub demographic: DemographicYearFact,
    #[serde(rename = "howManyMovies")]
    pub movie_count: u64,
}
