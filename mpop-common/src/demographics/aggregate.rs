//! Folding fine age brackets into the four coarse buckets

use crate::models::{AgeBuckets, BucketLabel, RawFact};

/// Fine brackets per coarse bucket, in the upstream's label format
const PARTITION: [(BucketLabel, &[&str]); 4] = [
    (BucketLabel::Children, &["0-4", "5-9", "10-14"]),
    (BucketLabel::Youth, &["15-19", "20-24"]),
    (
        BucketLabel::Adults,
        &[
            "25-29", "30-34", "35-39", "40-44", "45-49", "50-54", "55-59", "60-64",
        ],
    ),
    (
        BucketLabel::Elders,
        &[
            "65-69", "70-74", "75-79", "80-84", "85-89", "90-94", "95-99", "100+",
        ],
    ),
];

/// Coarse bucket a fine bracket belongs to, if any
pub fn coarse_bucket_for(age_bracket: &str) -> Option<BucketLabel> {
    PARTITION
        .iter()
        .find(|(_, brackets)| brackets.contains(&age_bracket))
        .map(|(label, _)| *label)
}

/// Sum raw facts into the four coarse buckets
///
/// Brackets outside the partition are ignored. The result does not depend
/// on the order of `facts`.
pub fn aggregate(facts: &[RawFact]) -> AgeBuckets {
    facts.iter().fold(AgeBuckets::default(), |mut buckets, fact| {
        if let Some(label) = coarse_bucket_for(&fact.age_bracket) {
            buckets.add(label, fact.sex, fact.count);
        }
        buckets
    })
}
