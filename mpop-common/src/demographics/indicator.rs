//! Scalar indicator value for one year

use crate::models::{RawFact, Sex};

/// Sum every "Both sexes" count across all fine brackets
///
/// Uses the unaggregated facts, so brackets outside the coarse partition
/// still contribute. An empty input yields 0.
pub fn reduce(facts: &[RawFact]) -> u64 {
    facts
        .iter()
        .filter(|f| f.sex == Sex::Both)
        .fold(0u64, |acc, f| acc.saturating_add(f.count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(age: &str, sex: Sex, count: u64) -> RawFact {
        RawFact {
            age_bracket: age.to_string(),
            sex,
            count,
            year: 1990,
        }
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(reduce(&[]), 0);
    }

    #[test]
    fn test_only_both_sexes_counted() {
        let facts = vec![
            fact("0-4", Sex::Male, 100),
            fact("0-4", Sex::Female, 100),
            fact("0-4", Sex::Both, 210),
            fact("5-9", Sex::Both, 40),
        ];
        assert_eq!(reduce(&facts), 250);
    }

    #[test]
    fn test_brackets_outside_partition_included() {
        let facts = vec![fact("Total", Sex::Both, 5), fact("0-4", Sex::Both, 1)];
        assert_eq!(reduce(&facts), 6);
    }
}
