//! Academic term labels.
//!
//! The calendar year is cut into `terms_per_year` equal runs of whole months.
//! With the default three terms, January-April is "Winter", May-August
//! "Spring" and September-December "Fall".

use crate::config::AnalysisConfig;
use crate::error::{ChatstatsError, Result};

/// A validated term scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermScheme {
    terms_per_year: u32,
    suffixes: Vec<String>,
}

impl TermScheme {
    /// Creates a scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::Configuration`] if `terms_per_year` does not
    /// divide 12 or the suffix count does not match it.
    pub fn new(terms_per_year: u32, suffixes: Vec<String>) -> Result<Self> {
        if terms_per_year == 0 || 12 % terms_per_year != 0 {
            return Err(ChatstatsError::configuration(
                "terms_per_year",
                format!("{terms_per_year} does not evenly divide the 12 months of a year"),
            ));
        }
        if !suffixes.is_empty() && suffixes.len() != terms_per_year as usize {
            return Err(ChatstatsError::configuration(
                "term_suffixes",
                format!("expected {} names, got {}", terms_per_year, suffixes.len()),
            ));
        }
        Ok(Self {
            terms_per_year,
            suffixes,
        })
    }

    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Self::new(config.terms_per_year, config.term_suffixes.clone())
    }

    pub fn terms_per_year(&self) -> u32 {
        self.terms_per_year
    }

    /// Months per term.
    pub fn term_length(&self) -> u32 {
        12 / self.terms_per_year
    }

    /// 1-based term for a 1-based month: `ceil(month / term_length)`.
    pub fn term_number(&self, month: u32) -> u32 {
        month.div_ceil(self.term_length())
    }

    /// Label for a term, e.g. "2021 Fall", or "2021 T3" without suffixes.
    pub fn label(&self, year: i32, term_number: u32) -> String {
        match self.suffixes.get(term_number as usize - 1) {
            Some(suffix) => format!("{year} {suffix}"),
            None => format!("{year} T{term_number}"),
        }
    }

    /// Term number and label for a calendar month.
    pub fn classify(&self, year: i32, month: u32) -> (u32, String) {
        let number = self.term_number(month);
        (number, self.label(year, number))
    }
}
