//! Inclusive year range supplied by callers

use crate::models::Year;
use crate::{Error, Result};

/// Validated inclusive `[start, end]` range of years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: Year,
    end: Year,
}

impl YearRange {
    /// Validate a range passed in by a collaborator
    ///
    /// Negative or inverted ranges are contract violations.
    pub fn new(start: Year, end: Year) -> Result<Self> {
        if start < 0 || end < 0 {
            return Err(Error::InvalidInput(format!(
                "year range must not be negative: {}..={}",
                start, end
            )));
        }
        if start > end {
            return Err(Error::InvalidInput(format!(
                "start year {} is after end year {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Reject ranges holding more than `max_years` years
    pub fn capped(self, max_years: usize) -> Result<Self> {
        if self.len() > max_years {
            return Err(Error::InvalidInput(format!(
                "year range {}..={} spans {} years, at most {} allowed",
                self.start,
                self.end,
                self.len(),
                max_years
            )));
        }
        Ok(self)
    }

    pub fn start(&self) -> Year {
        self.start
    }

    pub fn end(&self) -> Year {
        self.end
    }

    /// Number of years in the range
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// A validated range always holds at least one year
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Years in ascending order
    pub fn years(&self) -> impl Iterator<Item = Year> {
        self.start..=self.end
    }
}
