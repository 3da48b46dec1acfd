//! Filter domains derived from a full model list.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::format::NOT_APPLICABLE;
use crate::models::ModelRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumericRange {
    pub min: u64,
    pub max: u64,
}

impl NumericRange {
    pub fn contains(&self, value: u64) -> bool {
        value >= self.min && value <= self.max
    }

    fn widen(range: Option<Self>, value: u64) -> Option<Self> {
        Some(match range {
            None => NumericRange {
                min: value,
                max: value,
            },
            Some(r) => NumericRange {
                min: r.min.min(value),
                max: r.max.max(value),
            },
        })
    }
}

/// A selectable provider with the logo of the first record that named it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderOption {
    pub name: String,
    pub logo: Option<String>,
}

/// A selectable license. Records with no license share the `Unspecified` bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum LicenseOption {
    Named(String),
    Unspecified,
}

impl LicenseOption {
    pub fn of(model: &ModelRecord) -> Self {
        match model.license_name() {
            Some(name) => LicenseOption::Named(name.to_string()),
            None => LicenseOption::Unspecified,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LicenseOption::Named(name) => name,
            LicenseOption::Unspecified => NOT_APPLICABLE,
        }
    }
}

impl fmt::Display for LicenseOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the filter controls need, computed from the full list.
///
/// Providers and licenses keep first-appearance order. Numeric ranges
/// ignore absent values and are `None` when no record has one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterDomains {
    pub providers: Vec<ProviderOption>,
    pub licenses: Vec<LicenseOption>,
    pub parameter_range: Option<NumericRange>,
    pub context_range: Option<NumericRange>,
}

impl FilterDomains {
    pub fn from_models(models: &[ModelRecord]) -> Self {
        let mut domains = FilterDomains::default();
        let mut seen_providers = HashSet::new();
        let mut seen_licenses = HashSet::new();
        let mut has_unspecified = false;

        for model in models {
            if seen_providers.insert(model.provider_name.as_str()) {
                domains.providers.push(ProviderOption {
                    name: model.provider_name.clone(),
                    logo: model.provider_logo.clone(),
                });
            }

            match LicenseOption::of(model) {
                LicenseOption::Unspecified => has_unspecified = true,
                named => {
                    if seen_licenses.insert(named.clone()) {
                        domains.licenses.push(named);
                    }
                }
            }

            if let Some(params) = model.parameter_count {
                domains.parameter_range = NumericRange::widen(domains.parameter_range, params);
            }
            if let Some(context) = model.context_size {
                domains.context_range = NumericRange::widen(domains.context_range, context);
            }
        }

        // Listed last so named licenses keep their order.
        if has_unspecified {
            domains.licenses.push(LicenseOption::Unspecified);
        }

        domains
    }

    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sized;

    fn catalog() -> Vec<ModelRecord> {
        let mut models = vec![
            sized(1, "OpenAI", Some(175000), Some(4096), Some("Proprietary")),
            sized(2, "Meta", Some(7000), Some(8192), Some("Llama 2")),
            sized(3, "OpenAI", None, Some(128000), Some("Proprietary")),
            sized(4, "Mistral", Some(7300), None, None),
            sized(5, "Meta", Some(13), Some(2048), Some("Llama 2")),
        ];
        models[1].provider_logo = Some("meta.png".to_string());
        models[4].provider_logo = Some("meta-alt.png".to_string());
        models
    }

    #[test]
    fn test_providers_in_first_appearance_order() {
        let domains = FilterDomains::from_models(&catalog());
        let names: Vec<&str> = domains.provider_names().collect();
        assert_eq!(names, vec!["OpenAI", "Meta", "Mistral"]);
    }

    #[test]
    fn test_provider_logo_first_match_wins() {
        let domains = FilterDomains::from_models(&catalog());
        assert_eq!(domains.providers[0].logo, None);
        assert_eq!(domains.providers[1].logo.as_deref(), Some("meta.png"));
    }

    #[test]
    fn test_licenses_keep_unspecified_bucket() {
        let domains = FilterDomains::from_models(&catalog());
        assert_eq!(
            domains.licenses,
            vec![
                LicenseOption::Named("Proprietary".to_string()),
                LicenseOption::Named("Llama 2".to_string()),
                LicenseOption::Unspecified,
            ]
        );
        assert_eq!(LicenseOption::Unspecified.label(), "N/A");
    }

    #[test]
    fn test_numeric_extrema_skip_absent_values() {
        let domains = FilterDomains::from_models(&catalog());
        assert_eq!(
            domains.parameter_range,
            Some(NumericRange { min: 13, max: 175000 })
        );
        assert_eq!(
            domains.context_range,
            Some(NumericRange { min: 2048, max: 128000 })
        );
    }

    #[test]
    fn test_all_absent_gives_no_range() {
        let models = vec![sized(1, "A", None, None, None)];
        let domains = FilterDomains::from_models(&models);
        assert_eq!(domains.parameter_range, None);
        assert_eq!(domains.context_range, None);
    }

    #[test]
    fn test_empty_list_gives_empty_domains() {
        assert_eq!(FilterDomains::from_models(&[]), FilterDomains::default());
    }

    #[test]
    fn test_recomputation_is_deterministic() {
        let models = catalog();
        let first = FilterDomains::from_models(&models);
        let second = FilterDomains::from_models(&models);
        assert_eq!(first, second);
    }
}
