//! Client-side filtering over the already-fetched model list.

use std::collections::BTreeSet;

use crate::aggregate::{FilterDomains, LicenseOption, NumericRange};
use crate::format::NOT_APPLICABLE;
use crate::models::ModelRecord;

/// An inclusive `[low, high]` selection inside the domain it was built from.
///
/// A record with no value passes only while the selection still spans the
/// whole domain. Once narrowed, "not applicable" is outside every range.
/// A range the user typed in is always narrowed, even when it covers the
/// whole domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeFilter {
    pub low: u64,
    pub high: u64,
    pub domain: NumericRange,
    pub requested: bool,
}

impl RangeFilter {
    pub fn full(domain: NumericRange) -> Self {
        Self {
            low: domain.min,
            high: domain.max,
            domain,
            requested: false,
        }
    }

    pub fn new(domain: NumericRange, low: u64, high: u64) -> Self {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        Self {
            low,
            high,
            domain,
            requested: false,
        }
    }

    /// An explicit bound pair; records without a value never pass.
    pub fn requested(domain: NumericRange, low: u64, high: u64) -> Self {
        Self {
            requested: true,
            ..Self::new(domain, low, high)
        }
    }

    pub fn is_narrowed(&self) -> bool {
        self.requested || self.low > self.domain.min || self.high < self.domain.max
    }

    pub fn admits(&self, value: Option<u64>) -> bool {
        match value {
            Some(v) => NumericRange {
                min: self.low,
                max: self.high,
            }
            .contains(v),
            None => !self.is_narrowed(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LicenseChoice {
    #[default]
    Any,
    Named(String),
    Unspecified,
}

impl LicenseChoice {
    pub fn admits(&self, model: &ModelRecord) -> bool {
        match self {
            LicenseChoice::Any => true,
            LicenseChoice::Named(name) => model.license_name() == Some(name.as_str()),
            LicenseChoice::Unspecified => model.license_name().is_none(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LicenseChoice::Any => "All",
            LicenseChoice::Named(name) => name,
            LicenseChoice::Unspecified => NOT_APPLICABLE,
        }
    }

    /// Cycle `Any` -> each license option in order -> `Any`.
    pub fn next(&self, options: &[LicenseOption]) -> Self {
        let current = match self {
            LicenseChoice::Any => None,
            LicenseChoice::Named(name) => options
                .iter()
                .position(|o| matches!(o, LicenseOption::Named(n) if n == name)),
            LicenseChoice::Unspecified => options
                .iter()
                .position(|o| *o == LicenseOption::Unspecified),
        };
        let next_idx = current.map_or(0, |i| i + 1);
        options
            .get(next_idx)
            .map(LicenseChoice::from)
            .unwrap_or(LicenseChoice::Any)
    }
}

impl From<&LicenseOption> for LicenseChoice {
    fn from(option: &LicenseOption) -> Self {
        match option {
            LicenseOption::Named(name) => LicenseChoice::Named(name.clone()),
            LicenseOption::Unspecified => LicenseChoice::Unspecified,
        }
    }
}

/// The conjunction of predicates currently selected on a catalog page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Empty means every provider.
    pub providers: BTreeSet<String>,
    pub parameter_count: Option<RangeFilter>,
    pub context_size: Option<RangeFilter>,
    pub license: LicenseChoice,
}

impl FilterState {
    /// No restriction, with ranges spanning the full extrema of `domains`.
    pub fn unrestricted(domains: &FilterDomains) -> Self {
        Self {
            providers: BTreeSet::new(),
            parameter_count: domains.parameter_range.map(RangeFilter::full),
            context_size: domains.context_range.map(RangeFilter::full),
            license: LicenseChoice::Any,
        }
    }

    pub fn admits(&self, model: &ModelRecord) -> bool {
        (self.providers.is_empty() || self.providers.contains(&model.provider_name))
            && self
                .parameter_count
                .is_none_or(|r| r.admits(model.parameter_count))
            && self
                .context_size
                .is_none_or(|r| r.admits(model.context_size))
            && self.license.admits(model)
    }

    pub fn is_restricted(&self) -> bool {
        !self.providers.is_empty()
            || self.parameter_count.is_some_and(|r| r.is_narrowed())
            || self.context_size.is_some_and(|r| r.is_narrowed())
            || self.license != LicenseChoice::Any
    }
}

/// Stable filter: the result is a subsequence of `models`.
pub fn filter_models<'a>(models: &'a [ModelRecord], state: &FilterState) -> Vec<&'a ModelRecord> {
    models.iter().filter(|m| state.admits(m)).collect()
}

/// Same as [`filter_models`] but yields positions in `models`.
pub fn filter_indices(models: &[ModelRecord], state: &FilterState) -> Vec<usize> {
    models
        .iter()
        .enumerate()
        .filter(|(_, m)| state.admits(m))
        .map(|(i, _)| i)
        .collect()
}
