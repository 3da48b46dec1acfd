pub mod aggregate;
pub mod client;
pub mod error;
pub mod filter;
pub mod format;
pub mod models;
pub mod pages;
pub mod slider;
pub mod sort;

#[cfg(test)]
mod testing;

pub use aggregate::{FilterDomains, LicenseOption, NumericRange, ProviderOption};
pub use client::{CatalogClient, CatalogSource, ClientConfig};
pub use error::{ClientError, PageError, Panel};
pub use filter::{FilterState, LicenseChoice, RangeFilter, filter_indices, filter_models};
pub use models::{ModelId, ModelRecord, PerformanceRecord};
pub use pages::{CatalogPage, ComparePage, DetailPage, RangeField};
pub use slider::RangeSlider;
pub use sort::{Direction, SortColumn, SortKey, sort_indices, sort_models};
